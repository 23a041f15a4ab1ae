//! Line-oriented command parsing.
//!
//! The skill menu is a purely client-side affordance: opening it changes
//! how bare digits parse, nothing more. Whether a command is valid for the
//! current battle phase is the engine's call, not the parser's.

use std::str::FromStr;

use gauntlet_core::{PassiveKind, SkillKind};

/// Parsed player command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Attack,
    Defend,
    OpenSkillMenu,
    UseSkill(SkillKind),
    CloseSkillMenu,
    /// Stat pick by offer slot (0-based).
    PickStat(u8),
    PickPassive,
    NextLevel,
    Restart,
    ShowState,
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command: {0} (type help for the list)")]
    Unknown(String),
    #[error("which skill? use 1 or use 2")]
    BadSkillSlot,
    #[error("which upgrade? pick 1 or pick 2")]
    BadUpgradeSlot,
}

/// Parses one input line. Blank lines parse to `None`.
///
/// While the skill menu is open, a bare `1` or `2` selects that slot.
pub fn parse(line: &str, menu_open: bool) -> Result<Option<Command>, ParseError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();

    let command = match head.to_ascii_lowercase().as_str() {
        "attack" | "a" => Command::Attack,
        "defend" | "d" => Command::Defend,
        "skills" | "s" => Command::OpenSkillMenu,
        "use" => Command::UseSkill(skill_from_arg(arg)?),
        "back" => Command::CloseSkillMenu,
        slot @ ("1" | "2") if menu_open => Command::UseSkill(skill_from_arg(Some(slot))?),
        "pick" => Command::PickStat(stat_slot(arg)?),
        "passive" => Command::PickPassive,
        "next" => Command::NextLevel,
        "restart" => Command::Restart,
        "state" => Command::ShowState,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// Accepts a menu slot (`1`/`2`) or a skill name (`heavy_strike`).
fn skill_from_arg(arg: Option<&str>) -> Result<SkillKind, ParseError> {
    match arg {
        Some("1") => Ok(SkillKind::HeavyStrike),
        Some("2") => Ok(SkillKind::RecklessAttack),
        Some(name) => SkillKind::from_str(name).map_err(|_| ParseError::BadSkillSlot),
        None => Err(ParseError::BadSkillSlot),
    }
}

fn stat_slot(arg: Option<&str>) -> Result<u8, ParseError> {
    match arg {
        Some("1") => Ok(0),
        Some("2") => Ok(1),
        _ => Err(ParseError::BadUpgradeSlot),
    }
}

/// Menu description for a skill.
pub fn skill_description(kind: SkillKind) -> &'static str {
    match kind {
        SkillKind::HeavyStrike => "A powerful blow that may stun the enemy.",
        SkillKind::RecklessAttack => "Sacrifice health to deal massive damage.",
    }
}

/// Draft description for a passive.
pub fn passive_description(kind: PassiveKind) -> &'static str {
    match kind {
        PassiveKind::LifeSteal => "Attacks heal you for 10% of damage dealt.",
        PassiveKind::Thorns => "Enemies take 5 damage when they attack you.",
    }
}

pub const HELP_TEXT: &str = "\
Commands:
  attack (a)      basic attack
  defend (d)      guard against the next strike
  skills (s)      open the skill menu
  use 1|2         use a skill by slot
  back            close the skill menu
  pick 1|2        take a stat upgrade from the draft
  passive         take the offered passive
  next            start the next level
  restart         abandon the run and start over
  state           dump the battle state as JSON
  help            this list
  quit            exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_commands_and_aliases_parse() {
        for (line, expected) in [
            ("attack", Command::Attack),
            ("a", Command::Attack),
            ("DEFEND", Command::Defend),
            ("s", Command::OpenSkillMenu),
            ("back", Command::CloseSkillMenu),
            ("next", Command::NextLevel),
            ("restart", Command::Restart),
            ("state", Command::ShowState),
            ("?", Command::Help),
            ("quit", Command::Quit),
        ] {
            assert_eq!(parse(line, false), Ok(Some(expected)), "line: {line}");
        }
    }

    #[test]
    fn blank_lines_parse_to_nothing() {
        assert_eq!(parse("", false), Ok(None));
        assert_eq!(parse("   ", true), Ok(None));
    }

    #[test]
    fn use_accepts_slots_and_names() {
        assert_eq!(
            parse("use 1", false),
            Ok(Some(Command::UseSkill(SkillKind::HeavyStrike)))
        );
        assert_eq!(
            parse("use 2", false),
            Ok(Some(Command::UseSkill(SkillKind::RecklessAttack)))
        );
        assert_eq!(
            parse("use heavy_strike", false),
            Ok(Some(Command::UseSkill(SkillKind::HeavyStrike)))
        );
        assert_eq!(parse("use", false), Err(ParseError::BadSkillSlot));
        assert_eq!(parse("use 3", false), Err(ParseError::BadSkillSlot));
    }

    #[test]
    fn bare_digits_select_only_while_the_menu_is_open() {
        assert_eq!(
            parse("1", true),
            Ok(Some(Command::UseSkill(SkillKind::HeavyStrike)))
        );
        assert_eq!(
            parse("2", true),
            Ok(Some(Command::UseSkill(SkillKind::RecklessAttack)))
        );
        assert_eq!(parse("1", false), Err(ParseError::Unknown("1".to_string())));
    }

    #[test]
    fn draft_picks_use_one_based_slots() {
        assert_eq!(parse("pick 1", false), Ok(Some(Command::PickStat(0))));
        assert_eq!(parse("pick 2", false), Ok(Some(Command::PickStat(1))));
        assert_eq!(parse("pick", false), Err(ParseError::BadUpgradeSlot));
        assert_eq!(parse("pick 0", false), Err(ParseError::BadUpgradeSlot));
        assert_eq!(parse("passive", false), Ok(Some(Command::PickPassive)));
    }

    #[test]
    fn unknown_input_reports_the_word() {
        assert_eq!(
            parse("dance", false),
            Err(ParseError::Unknown("dance".to_string()))
        );
    }
}
