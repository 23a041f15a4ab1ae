//! Terminal battle client.
//!
//! Composition root: loads configuration from the environment, sets up
//! logging on stderr so it never interleaves with the game output, spawns
//! the runtime, and hands control to the interactive loop.

mod app;
mod commands;
mod config;
mod message;
mod view_model;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = match std::env::var("GAUNTLET_LOG") {
        Ok(directives) => EnvFilter::new(directives),
        Err(_) => EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    App::new(&config).run().await
}
