//! Between-level draft: presenting, choosing, and cashing in upgrades.

use arrayvec::ArrayVec;

use crate::action::ActionTransition;
use crate::action::error::{SystemActionError, UpgradeError};
use crate::env::{BattleEnv, RollContext, compute_seed};
use crate::state::{
    BattleState, CombatantState, PassiveKind, Side, StatUpgrade, TurnPhase, UpgradeChoice,
    UpgradeOffer,
};

/// Resolved pick from an upgrade offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChosenUpgrade {
    Stat(StatUpgrade),
    Passive(PassiveKind),
}

/// Draws the upgrade offer for the current level transition.
///
/// Two distinct stat upgrades are drawn from the pool of four, plus one
/// passive drawn uniformly from whatever the player has not learned yet.
/// The draw is seeded off the action nonce, so replays present the same
/// offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PresentUpgradesAction;

impl ActionTransition for PresentUpgradesAction {
    type Error = SystemActionError;
    type Outcome = UpgradeOffer;

    fn pre_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        if state.turn.phase != TurnPhase::LevelTransition {
            return Err(SystemActionError::WrongPhase {
                expected: TurnPhase::LevelTransition,
                actual: state.turn.phase,
            });
        }
        if state.progression.offer.is_some() {
            return Err(SystemActionError::OfferAlreadyPresented);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        env: &BattleEnv<'_>,
    ) -> Result<Self::Outcome, Self::Error> {
        let seed = state.seed;
        let nonce = state.turn.nonce;
        let actor = Side::Player.as_index();

        let first_seed = compute_seed(seed, nonce, actor, RollContext::UpgradeFirst);
        let second_seed = compute_seed(seed, nonce, actor, RollContext::UpgradeSecond);
        let passive_seed = compute_seed(seed, nonce, actor, RollContext::UpgradePassive);

        let pool = StatUpgrade::all();
        let first = env.rng.range(first_seed, 0, (StatUpgrade::COUNT - 1) as u32) as usize;
        // Draw the second slot from the remaining three, shifting past the
        // first pick to keep the pair distinct.
        let mut second = env.rng.range(second_seed, 0, (StatUpgrade::COUNT - 2) as u32) as usize;
        if second >= first {
            second += 1;
        }

        let unlearned: ArrayVec<PassiveKind, { PassiveKind::COUNT }> =
            state.player.passives.unlearned().collect();
        let passive = if unlearned.is_empty() {
            None
        } else {
            let idx = env.rng.range(passive_seed, 0, (unlearned.len() - 1) as u32) as usize;
            Some(unlearned[idx])
        };

        let offer = UpgradeOffer::new([pool[first], pool[second]], passive);
        state.progression.offer = Some(offer);
        Ok(offer)
    }
}

/// Takes one pick from the open upgrade offer and applies it immediately.
///
/// Each offer allows at most one stat pick and one passive pick; the
/// benefit lands the moment it is chosen rather than on advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChooseUpgradeAction {
    pub choice: UpgradeChoice,
}

impl ActionTransition for ChooseUpgradeAction {
    type Error = UpgradeError;
    type Outcome = ChosenUpgrade;

    fn pre_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        let Some(offer) = state.progression.offer.as_ref() else {
            return Err(UpgradeError::NoOfferOpen);
        };

        match self.choice {
            UpgradeChoice::Stat(slot) => {
                if usize::from(slot) >= offer.stats.len() {
                    return Err(UpgradeError::InvalidSlot { slot });
                }
                if offer.stat_taken.is_some() {
                    return Err(UpgradeError::StatAlreadyChosen);
                }
            }
            UpgradeChoice::Passive => {
                if offer.passive.is_none() {
                    return Err(UpgradeError::NoPassiveOffered);
                }
                if offer.passive_taken {
                    return Err(UpgradeError::PassiveAlreadyChosen);
                }
            }
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        env: &BattleEnv<'_>,
    ) -> Result<Self::Outcome, Self::Error> {
        let BattleState {
            player, progression, ..
        } = state;
        let Some(offer) = progression.offer.as_mut() else {
            return Err(UpgradeError::NoOfferOpen);
        };

        match self.choice {
            UpgradeChoice::Stat(slot) => {
                let Some(&upgrade) = offer.stats.get(usize::from(slot)) else {
                    return Err(UpgradeError::InvalidSlot { slot });
                };
                let bonus = env.tables.upgrades.bonus(upgrade);
                match upgrade {
                    StatUpgrade::MaxHp => player.raise_max_hp(bonus),
                    StatUpgrade::Attack => player.attack.raise(bonus),
                    StatUpgrade::Defense => player.defense.raise(bonus),
                    StatUpgrade::CritChance => {
                        player.crit_chance = (player.crit_chance + bonus).min(100);
                    }
                }
                offer.stat_taken = Some(upgrade);
                Ok(ChosenUpgrade::Stat(upgrade))
            }
            UpgradeChoice::Passive => {
                let Some(passive) = offer.passive else {
                    return Err(UpgradeError::NoPassiveOffered);
                };
                player.passives.learn(passive);
                offer.passive_taken = true;
                Ok(ChosenUpgrade::Passive(passive))
            }
        }
    }
}

/// Closes the draft and starts the next battle.
///
/// The enemy is rebuilt from the scaling table at the new level. The
/// player refills to their (possibly raised) max HP with an empty rage
/// bar, while cooldowns and statuses deliberately carry over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdvanceLevelAction;

impl ActionTransition for AdvanceLevelAction {
    type Error = UpgradeError;
    type Outcome = u32;

    fn pre_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        let Some(offer) = state.progression.offer.as_ref() else {
            return Err(UpgradeError::NoOfferOpen);
        };
        if !offer.any_taken() {
            return Err(UpgradeError::NothingChosen);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        env: &BattleEnv<'_>,
    ) -> Result<Self::Outcome, Self::Error> {
        match state.progression.offer.as_ref() {
            Some(offer) if offer.any_taken() => {}
            Some(_) => return Err(UpgradeError::NothingChosen),
            None => return Err(UpgradeError::NoOfferOpen),
        }

        state.progression.level += 1;
        state.progression.offer = None;

        let level = state.progression.level;
        state.enemy = CombatantState::from_template(&env.tables.enemy.template_at(level));

        state.player.hp = state.player.max_hp;
        state.player.rage = 0;
        state.player.defending = false;

        state.turn.phase = TurnPhase::PlayerTurn;
        state.turn.round = 1;

        Ok(level)
    }
}
