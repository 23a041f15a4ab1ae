//! End-of-turn bookkeeping.

use crate::state::{Side, StatusKind, TurnPhase};

use super::{BattleEngine, TurnReport};

/// Turn advancement methods for [`BattleEngine`].
impl<'a> BattleEngine<'a> {
    /// Runs the unconditional end-of-turn sequence after a turn-spending
    /// action.
    ///
    /// Order matters and is part of the contract:
    /// 1. Terminal check. Player defeat wins over enemy defeat, so a
    ///    double knockout is a loss. A terminal phase freezes the board;
    ///    cooldowns are not ticked on the ending turn.
    /// 2. The ending side's cooldowns tick down, including the cooldown
    ///    started this very turn.
    /// 3. The phase flips. Entering the enemy turn ticks stun; entering
    ///    the player turn starts a new round.
    pub(super) fn advance_turn(&mut self) -> TurnReport {
        if self.state.player.is_defeated() {
            self.state.turn.phase = TurnPhase::GameOver;
            return self.turn_report(false);
        }
        if self.state.enemy.is_defeated() {
            self.state.turn.phase = TurnPhase::LevelTransition;
            return self.turn_report(false);
        }

        let Some(ending) = self.state.turn.phase.acting_side() else {
            return self.turn_report(false);
        };

        self.state.combatant_mut(ending).cooldowns.tick_down();

        let mut enemy_stunned = false;
        match ending.opponent() {
            Side::Enemy => {
                self.state.turn.phase = TurnPhase::EnemyTurn;
                enemy_stunned = self.state.enemy.statuses.tick(StatusKind::Stun);
            }
            Side::Player => {
                self.state.turn.phase = TurnPhase::PlayerTurn;
                self.state.turn.round += 1;
            }
        }

        self.turn_report(enemy_stunned)
    }

    fn turn_report(&self, enemy_stunned: bool) -> TurnReport {
        TurnReport {
            phase: self.state.turn.phase,
            round: self.state.turn.round,
            enemy_stunned,
        }
    }
}
