//! Interactive loop tying stdin commands to the battle runtime.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::broadcast;
use tracing::warn;

use gauntlet_core::{BalanceTables, TurnPhase, UpgradeOffer};
use gauntlet_runtime::{BattleEvent, BattleRuntime, RuntimeHandle, Topic};

use crate::commands::{self, Command};
use crate::config::ClientConfig;
use crate::message::{MessageEntry, MessageLevel, MessageLog, render_event};
use crate::view_model::{UiFrame, passive_name, skill_name, stat_name};

pub struct App {
    runtime: BattleRuntime,
    handle: RuntimeHandle,
    tables: BalanceTables,
    log: MessageLog,
    skill_menu_open: bool,
}

impl App {
    pub fn new(config: &ClientConfig) -> Self {
        let seed = config.session_seed();
        tracing::info!(seed, "starting session");

        let runtime = BattleRuntime::builder()
            .seed(seed)
            .timings(config.timings())
            .build();
        let handle = runtime.handle();

        Self {
            runtime,
            handle,
            tables: BalanceTables::default(),
            log: MessageLog::new(config.messages.capacity),
            skill_menu_open: false,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut combat = self.handle.subscribe(Topic::Combat);
        let mut turns = self.handle.subscribe(Topic::Turn);
        let mut progression = self.handle.subscribe(Topic::Progression);
        let mut lines: Lines<BufReader<Stdin>> = BufReader::new(tokio::io::stdin()).lines();

        println!("Welcome to the gauntlet. Type help for the command list.");
        self.print_frame().await?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    if !self.handle_line(&line).await? {
                        break;
                    }
                }
                event = combat.recv() => self.handle_event(event).await?,
                event = turns.recv() => self.handle_event(event).await?,
                event = progression.recv() => self.handle_event(event).await?,
            }
        }

        self.runtime.shutdown().await?;
        Ok(())
    }

    /// Dispatches one input line. Returns false when the player quits.
    async fn handle_line(&mut self, line: &str) -> Result<bool> {
        let command = match commands::parse(line, self.skill_menu_open) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(true),
            Err(error) => {
                println!("{error}");
                return Ok(true);
            }
        };

        match command {
            Command::Attack => {
                self.skill_menu_open = false;
                self.handle.attack().await?;
            }
            Command::Defend => {
                self.skill_menu_open = false;
                self.handle.defend().await?;
            }
            Command::OpenSkillMenu => {
                self.skill_menu_open = true;
                self.print_skill_menu().await?;
            }
            Command::UseSkill(kind) => {
                self.skill_menu_open = false;
                self.handle.use_skill(kind).await?;
            }
            Command::CloseSkillMenu => {
                self.skill_menu_open = false;
                self.print_frame().await?;
            }
            Command::PickStat(slot) => self.handle.choose_stat(slot).await?,
            Command::PickPassive => self.handle.choose_passive().await?,
            Command::NextLevel => self.handle.advance_level().await?,
            Command::Restart => {
                self.skill_menu_open = false;
                self.handle.restart().await?;
            }
            Command::ShowState => {
                let state = self.handle.query_state().await?;
                println!("{}", serde_json::to_string_pretty(&state)?);
            }
            Command::Help => println!("{}", commands::HELP_TEXT),
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    async fn handle_event(
        &mut self,
        event: std::result::Result<BattleEvent, broadcast::error::RecvError>,
    ) -> Result<()> {
        let event = match event {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "event stream lagged");
                return Ok(());
            }
            Err(broadcast::error::RecvError::Closed) => return Ok(()),
        };

        if let Some(entry) = render_event(&event) {
            self.print_entry(entry);
        }

        match &event {
            BattleEvent::UpgradesOffered { offer } => self.print_offer(offer),
            BattleEvent::SessionStarted { .. } => {
                self.skill_menu_open = false;
                self.print_frame().await?;
            }
            BattleEvent::TurnPassed {
                phase: TurnPhase::PlayerTurn,
                ..
            } => self.print_frame().await?,
            _ => {}
        }
        Ok(())
    }

    fn print_entry(&mut self, entry: MessageEntry) {
        let prefix = match entry.level {
            MessageLevel::Info | MessageLevel::Combat => "",
            MessageLevel::Warning => "! ",
            MessageLevel::System => "== ",
        };
        println!("{prefix}{}", entry.text);
        self.log.push(entry);
    }

    async fn print_frame(&self) -> Result<()> {
        let state = self.handle.query_state().await?;
        print!("{}", UiFrame::from_state(&state, &self.tables));
        Ok(())
    }

    async fn print_skill_menu(&self) -> Result<()> {
        let state = self.handle.query_state().await?;
        let frame = UiFrame::from_state(&state, &self.tables);

        println!("Skills (back to close):");
        for (slot, row) in frame.skills.iter().enumerate() {
            let availability = match row.reason {
                Some(reason) => reason,
                None => "ready",
            };
            println!(
                "  use {} - {} ({} rage, {} turn cooldown) [{}] {}",
                slot + 1,
                skill_name(row.kind),
                row.rage_cost,
                self.tables.skill(row.kind).cooldown,
                availability,
                commands::skill_description(row.kind),
            );
        }
        Ok(())
    }

    fn print_offer(&self, offer: &UpgradeOffer) {
        println!("Choose your reward (next to continue):");
        for (slot, stat) in offer.stats.iter().enumerate() {
            let taken = if offer.stat_taken == Some(*stat) { " (taken)" } else { "" };
            println!(
                "  pick {} - {} (+{}){}",
                slot + 1,
                stat_name(*stat),
                self.tables.upgrades.bonus(*stat),
                taken,
            );
        }
        if let Some(passive) = offer.passive {
            let taken = if offer.passive_taken { " (taken)" } else { "" };
            println!(
                "  passive - {}: {}{}",
                passive_name(passive),
                commands::passive_description(passive),
                taken,
            );
        }
    }
}
