//! Message log and event narration.
//!
//! [`render_event`] turns runtime events into the lines the player reads.
//! Events that only exist for bookkeeping (turn flips, the resolved halves
//! of draft actions that get dedicated progression events) render nothing.

use std::collections::VecDeque;

use gauntlet_core::engine::ActionReport;
use gauntlet_core::{Action, ChosenUpgrade, Side, SkillReport, StrikeReport};
use gauntlet_runtime::BattleEvent;

use crate::view_model::{passive_name, skill_name, stat_name};

/// Severity level for lines produced from runtime events.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MessageLevel {
    Info,
    Combat,
    Warning,
    System,
}

/// A single rendered log line.
#[derive(Clone, Debug)]
pub struct MessageEntry {
    pub level: MessageLevel,
    pub text: String,
}

impl MessageEntry {
    pub fn new(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// Circular buffer of messages shown to the player.
#[derive(Clone, Debug)]
pub struct MessageLog {
    entries: VecDeque<MessageEntry>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: MessageEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Most recent entries first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter().rev().take(limit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Renders one battle event as a log line.
pub fn render_event(event: &BattleEvent) -> Option<MessageEntry> {
    match event {
        BattleEvent::SessionStarted { level, .. } | BattleEvent::LevelStarted { level } => Some(
            MessageEntry::new(MessageLevel::System, format!("Level {level}! The battle begins!")),
        ),
        BattleEvent::ActionResolved { report, .. } => render_report(report),
        BattleEvent::ActionRejected { action, reason } => Some(render_rejection(action, reason)),
        BattleEvent::TurnPassed { .. } => None,
        BattleEvent::Victory { .. } => Some(MessageEntry::new(
            MessageLevel::System,
            "You defeated the enemy!",
        )),
        BattleEvent::Defeat { .. } => Some(MessageEntry::new(MessageLevel::System, "You Lose!")),
        // The draft menu is printed by the app; no log line here.
        BattleEvent::UpgradesOffered { .. } => None,
        BattleEvent::UpgradeChosen { choice } => Some(match choice {
            ChosenUpgrade::Stat(upgrade) => MessageEntry::new(
                MessageLevel::Info,
                format!("You gained {}!", stat_name(*upgrade)),
            ),
            ChosenUpgrade::Passive(passive) => MessageEntry::new(
                MessageLevel::Info,
                format!("You learned {}!", passive_name(*passive)),
            ),
        }),
    }
}

fn render_report(report: &ActionReport) -> Option<MessageEntry> {
    match report {
        ActionReport::Attack(strike) => Some(render_strike(strike)),
        ActionReport::Defend { actor } => Some(MessageEntry::new(
            MessageLevel::Combat,
            match actor {
                Side::Player => "You brace behind your guard.",
                Side::Enemy => "The enemy braces behind its guard.",
            },
        )),
        ActionReport::Skill(skill) => Some(render_skill(skill)),
        ActionReport::TurnSkipped => Some(MessageEntry::new(
            MessageLevel::Warning,
            "Enemy is stunned and cannot act!",
        )),
        // These carry dedicated progression events.
        ActionReport::OfferPresented { .. }
        | ActionReport::StatChosen { .. }
        | ActionReport::PassiveChosen { .. }
        | ActionReport::LevelAdvanced { .. } => None,
    }
}

fn render_strike(strike: &StrikeReport) -> MessageEntry {
    let mut text = match strike.attacker {
        Side::Player => format!("You hit the enemy for {} damage.", strike.damage),
        Side::Enemy => format!("The enemy hits you for {} damage.", strike.damage),
    };
    if strike.crit {
        text.push_str(" CRITICAL HIT!");
    }
    if strike.lifesteal > 0 {
        text.push_str(&format!(" Life Steal restores {} HP.", strike.lifesteal));
    }
    if strike.thorns > 0 {
        text.push_str(&format!(" Thorns reflects {} damage.", strike.thorns));
    }
    MessageEntry::new(MessageLevel::Combat, text)
}

fn render_skill(skill: &SkillReport) -> MessageEntry {
    let mut text = format!(
        "You use {} for {} damage.",
        skill_name(skill.skill),
        skill.damage
    );
    if skill.hp_cost > 0 {
        text.push_str(&format!(" You sacrifice {} HP.", skill.hp_cost));
    }
    if skill.stunned {
        text.push_str(" The enemy is stunned!");
    }
    MessageEntry::new(MessageLevel::Combat, text)
}

/// Maps a rejection reason onto its canonical player-facing line.
///
/// Unrecognized reasons fall through verbatim; the engine's error
/// messages are readable on their own.
fn render_rejection(action: &Action, reason: &str) -> MessageEntry {
    let text = if matches!(action, Action::UseSkill(_)) {
        if reason.contains("insufficient rage") {
            "Not enough Rage for this skill!".to_string()
        } else if reason.contains("cooldown") {
            "This skill is on cooldown!".to_string()
        } else if reason.contains("insufficient health") {
            "Not enough HP for Reckless Attack!".to_string()
        } else {
            reason.to_string()
        }
    } else if reason.contains("already over") {
        "The battle is already over!".to_string()
    } else {
        reason.to_string()
    };
    MessageEntry::new(MessageLevel::Warning, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauntlet_core::{PassiveKind, SkillKind, StatUpgrade};

    #[test]
    fn log_evicts_the_oldest_entry_at_capacity() {
        let mut log = MessageLog::new(2);
        log.push(MessageEntry::new(MessageLevel::Info, "first"));
        log.push(MessageEntry::new(MessageLevel::Info, "second"));
        log.push(MessageEntry::new(MessageLevel::Info, "third"));

        assert_eq!(log.len(), 2);
        let texts: Vec<_> = log.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["second", "third"]);
        assert_eq!(log.recent(1).next().map(|e| e.text.as_str()), Some("third"));
    }

    #[test]
    fn crits_append_the_canonical_shout() {
        let entry = render_strike(&StrikeReport {
            attacker: Side::Player,
            damage: 12,
            crit: true,
            lifesteal: 0,
            thorns: 0,
            attacker_rage_gain: 0,
            defender_rage_gain: 0,
            defender_hp_after: 88,
        });
        assert_eq!(entry.text, "You hit the enemy for 12 damage. CRITICAL HIT!");
        assert_eq!(entry.level, MessageLevel::Combat);
    }

    #[test]
    fn passive_procs_are_narrated_on_the_strike_line() {
        let entry = render_strike(&StrikeReport {
            attacker: Side::Enemy,
            damage: 8,
            crit: false,
            lifesteal: 0,
            thorns: 5,
            attacker_rage_gain: 0,
            defender_rage_gain: 1_400,
            defender_hp_after: 70,
        });
        assert_eq!(
            entry.text,
            "The enemy hits you for 8 damage. Thorns reflects 5 damage."
        );
    }

    #[test]
    fn stun_skip_uses_the_canonical_line() {
        let entry = render_event(&BattleEvent::ActionResolved {
            action: Action::skip_turn(),
            report: ActionReport::TurnSkipped,
        })
        .expect("a skip renders a line");
        assert_eq!(entry.text, "Enemy is stunned and cannot act!");
        assert_eq!(entry.level, MessageLevel::Warning);
    }

    #[test]
    fn skill_rejections_map_to_player_facing_lines() {
        let action = Action::use_skill(SkillKind::HeavyStrike);
        let cases = [
            ("insufficient rage: need 5000, have 0", "Not enough Rage for this skill!"),
            ("heavy_strike is on cooldown for 2 more turns", "This skill is on cooldown!"),
            ("insufficient health: need more than 20, have 20", "Not enough HP for Reckless Attack!"),
        ];
        for (reason, expected) in cases {
            let entry = render_rejection(&action, reason);
            assert_eq!(entry.text, expected);
            assert_eq!(entry.level, MessageLevel::Warning);
        }
    }

    #[test]
    fn terminal_and_progression_events_render_their_lines() {
        let defeat = render_event(&BattleEvent::Defeat { level: 3 }).unwrap();
        assert_eq!(defeat.text, "You Lose!");

        let victory = render_event(&BattleEvent::Victory { level: 3 }).unwrap();
        assert_eq!(victory.text, "You defeated the enemy!");

        let next = render_event(&BattleEvent::LevelStarted { level: 4 }).unwrap();
        assert_eq!(next.text, "Level 4! The battle begins!");

        let stat = render_event(&BattleEvent::UpgradeChosen {
            choice: ChosenUpgrade::Stat(StatUpgrade::MaxHp),
        })
        .unwrap();
        assert_eq!(stat.text, "You gained Max HP!");

        let passive = render_event(&BattleEvent::UpgradeChosen {
            choice: ChosenUpgrade::Passive(PassiveKind::LifeSteal),
        })
        .unwrap();
        assert_eq!(passive.text, "You learned Life Steal!");
    }

    #[test]
    fn bookkeeping_events_render_nothing() {
        use gauntlet_core::TurnPhase;
        assert!(render_event(&BattleEvent::TurnPassed {
            phase: TurnPhase::EnemyTurn,
            round: 1,
        })
        .is_none());
    }
}
