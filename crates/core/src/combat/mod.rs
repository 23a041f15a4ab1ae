//! Combat math and resolved-strike reports.
pub mod report;
pub mod strike;

pub use report::{SkillReport, StrikeReport};
pub use strike::BASIC_POWER;
