//! Read-only projection of the battle state for terminal rendering.
//!
//! [`UiFrame`] is a plain snapshot: everything is precomputed into
//! display-ready values so the rendering code stays free of game rules.
//! Skill availability mirrors the checks the engine applies, in the same
//! order, so the menu never promises an action the engine would reject.

use std::fmt;

use serde::Serialize;

use gauntlet_core::combat::strike;
use gauntlet_core::{
    BalanceTables, BattleConfig, BattleState, CombatantState, PassiveKind, SkillKind, StatUpgrade,
    TurnPhase,
};

/// Human-readable skill name.
pub fn skill_name(kind: SkillKind) -> &'static str {
    match kind {
        SkillKind::HeavyStrike => "Heavy Strike",
        SkillKind::RecklessAttack => "Reckless Attack",
    }
}

/// Human-readable stat upgrade name.
pub fn stat_name(upgrade: StatUpgrade) -> &'static str {
    match upgrade {
        StatUpgrade::MaxHp => "Max HP",
        StatUpgrade::Attack => "Attack",
        StatUpgrade::Defense => "Defense",
        StatUpgrade::CritChance => "Crit Chance",
    }
}

/// Human-readable passive name.
pub fn passive_name(kind: PassiveKind) -> &'static str {
    match kind {
        PassiveKind::LifeSteal => "Life Steal",
        PassiveKind::Thorns => "Thorns",
    }
}

/// Rage milli-points rendered as whole points with one decimal.
pub fn rage_points(milli: u32) -> String {
    format!("{}.{}", milli / BattleConfig::RAGE_UNIT, milli % BattleConfig::RAGE_UNIT / 100)
}

fn phase_banner(phase: TurnPhase) -> &'static str {
    match phase {
        TurnPhase::PlayerTurn => "Your turn",
        TurnPhase::EnemyTurn => "Enemy turn",
        TurnPhase::LevelTransition => "Victory! Choose your upgrade",
        TurnPhase::GameOver => "Game over",
    }
}

/// One combatant's display panel.
#[derive(Clone, Debug, Serialize)]
pub struct CombatantPanel {
    pub name: &'static str,
    pub hp: u32,
    pub max_hp: u32,
    /// `"5.0/100.0"`, absent for combatants with no rage capacity.
    pub rage: Option<String>,
    /// `"10-15"`.
    pub attack: String,
    pub defense: String,
    pub crit_chance: u32,
    pub defending: bool,
    /// `"stun (2)"` per active effect.
    pub statuses: Vec<String>,
    pub passives: Vec<&'static str>,
}

impl CombatantPanel {
    fn from_combatant(name: &'static str, combatant: &CombatantState) -> Self {
        let rage = (combatant.max_rage > 0).then(|| {
            format!(
                "{}/{}",
                rage_points(combatant.rage),
                rage_points(combatant.max_rage)
            )
        });
        Self {
            name,
            hp: combatant.hp,
            max_hp: combatant.max_hp,
            rage,
            attack: format!("{}-{}", combatant.attack.min, combatant.attack.max),
            defense: format!("{}-{}", combatant.defense.min, combatant.defense.max),
            crit_chance: combatant.crit_chance,
            defending: combatant.defending,
            statuses: combatant
                .statuses
                .iter()
                .map(|effect| format!("{} ({})", effect.kind, effect.remaining))
                .collect(),
            passives: combatant.passives.learned().map(passive_name).collect(),
        }
    }
}

/// Per-skill availability row for the skill menu.
#[derive(Clone, Debug, Serialize)]
pub struct SkillRow {
    pub kind: SkillKind,
    /// Whole rage points.
    pub rage_cost: u32,
    pub cooldown_remaining: u8,
    pub usable: bool,
    /// Why the skill is unusable right now, if it is.
    pub reason: Option<&'static str>,
}

impl SkillRow {
    /// Mirrors the engine's validation order: rage, cooldown, HP floor.
    fn from_state(kind: SkillKind, player: &CombatantState, tables: &BalanceTables) -> Self {
        let spec = tables.skill(kind);
        let cooldown_remaining = player.cooldowns.remaining(kind);

        let reason = if player.rage < spec.rage_cost {
            Some("not enough rage")
        } else if cooldown_remaining > 0 {
            Some("on cooldown")
        } else if spec.hp_cost_percent > 0
            && player.hp <= strike::hp_cost(player.hp, spec.hp_cost_percent)
        {
            Some("not enough HP")
        } else {
            None
        };

        Self {
            kind,
            rage_cost: spec.rage_cost / BattleConfig::RAGE_UNIT,
            cooldown_remaining,
            usable: reason.is_none(),
            reason,
        }
    }
}

/// Complete display snapshot of a battle.
#[derive(Clone, Debug, Serialize)]
pub struct UiFrame {
    pub level: u32,
    pub round: u32,
    pub phase: TurnPhase,
    pub player: CombatantPanel,
    pub enemy: CombatantPanel,
    pub skills: Vec<SkillRow>,
}

impl UiFrame {
    pub fn from_state(state: &BattleState, tables: &BalanceTables) -> Self {
        Self {
            level: state.progression.level,
            round: state.turn.round,
            phase: state.turn.phase,
            player: CombatantPanel::from_combatant("You", &state.player),
            enemy: CombatantPanel::from_combatant("Enemy", &state.enemy),
            skills: SkillKind::all()
                .into_iter()
                .map(|kind| SkillRow::from_state(kind, &state.player, tables))
                .collect(),
        }
    }
}

impl fmt::Display for UiFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Level {} | Round {} | {} ===",
            self.level,
            self.round,
            phase_banner(self.phase)
        )?;
        write_panel(f, &self.player)?;
        write_panel(f, &self.enemy)
    }
}

fn write_panel(f: &mut fmt::Formatter<'_>, panel: &CombatantPanel) -> fmt::Result {
    write!(
        f,
        "{:<6} HP {}/{}",
        panel.name, panel.hp, panel.max_hp
    )?;
    if let Some(rage) = &panel.rage {
        write!(f, "  Rage {rage}")?;
    }
    write!(
        f,
        "  ATK {}  DEF {}  CRIT {}%",
        panel.attack, panel.defense, panel.crit_chance
    )?;
    if panel.defending {
        write!(f, "  [guarding]")?;
    }
    for status in &panel.statuses {
        write!(f, "  [{status}]")?;
    }
    if !panel.passives.is_empty() {
        write!(f, "  <{}>", panel.passives.join(", "))?;
    }
    writeln!(f)
}
