//! Status effect storage for combatants.
//!
//! Effects carry a remaining-turn counter instead of an absolute expiry:
//! durations are decremented at the boundary where their owner's turn
//! begins and dropped once they reach zero.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StatusKind {
    /// Cannot act; the turn is forfeit while any stun is active.
    Stun,
}

/// A single status effect with its remaining duration in turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Turns left, strictly positive while the effect is stored.
    pub remaining: u8,
}

/// Active status effects on a combatant.
///
/// Repeat applications of the same kind stack as independent entries that
/// tick down in parallel; a turn is skipped once per boundary no matter how
/// many entries are present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { BattleConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks if any effect of the given kind is active.
    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Adds a status effect with the given duration.
    ///
    /// Zero-duration effects are ignored. When the list is full the new
    /// entry is dropped rather than evicting an old one.
    pub fn add(&mut self, kind: StatusKind, duration: u8) {
        if duration == 0 {
            return;
        }
        if !self.effects.is_full() {
            self.effects.push(StatusEffect {
                kind,
                remaining: duration,
            });
        }
    }

    /// Decrements every effect of `kind` by one turn and drops the entries
    /// that expire. Returns true if at least one such effect was present
    /// before ticking, regardless of whether it expired.
    pub fn tick(&mut self, kind: StatusKind) -> bool {
        let was_present = self.has(kind);
        for effect in self.effects.iter_mut() {
            if effect.kind == kind {
                effect.remaining -= 1;
            }
        }
        self.effects.retain(|e| e.kind != kind || e.remaining > 0);
        was_present
    }

    /// Removes every effect of the given kind immediately.
    pub fn remove(&mut self, kind: StatusKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    /// Returns an iterator over all active effects.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }
}
