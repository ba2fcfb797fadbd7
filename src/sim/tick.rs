//! Battle arbitration
//!
//! One `tick` call advances the battle by `dt` seconds. Answer submissions
//! are only honored in `AwaitingAnswer` with no swing in flight; a correct
//! answer arms the player's attack, a wrong one arms the enemy's, and damage
//! lands on the frame the swing completes, never at submission time.

use log::debug;

use super::state::{BattlePhase, BattleState, Outcome};
use crate::consts::ATTACK_DAMAGE;

/// Player input for one tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Answer slot chosen this frame, if any
    pub select_answer: Option<usize>,
    /// Abandon the battle
    pub cancel: bool,
}

pub fn tick(state: &mut BattleState, input: &TickInput, dt: f32) {
    if matches!(state.phase, BattlePhase::Finished(_)) {
        return;
    }

    if input.cancel {
        state.player.stand_down();
        state.enemy.stand_down();
        state.phase = BattlePhase::Finished(Outcome::Abandoned);
        debug!("battle abandoned");
        return;
    }

    match state.phase {
        BattlePhase::AwaitingAnswer => {
            let Some(index) = input.select_answer else {
                return;
            };
            // Out-of-range selections are dropped silently
            if index >= state.question.answers.len() || state.is_animating() {
                return;
            }
            if state.question.is_correct(index) {
                debug!("correct answer, player strikes");
                state.player.attack();
            } else {
                debug!("wrong answer, enemy strikes");
                state.enemy.attack();
            }
            state.next_question();
            state.phase = BattlePhase::Resolving;
        }
        BattlePhase::Resolving => {
            // Targets are snapshotted before either fighter moves this frame
            let player_target = state.enemy.pos;
            let enemy_target = state.player.pos;

            if state.player.update(player_target, dt)
                && state.enemy.take_damage(ATTACK_DAMAGE)
            {
                debug!("enemy defeated");
                state.phase = BattlePhase::Finished(Outcome::Victory);
                return;
            }
            if state.enemy.update(enemy_target, dt)
                && state.player.take_damage(ATTACK_DAMAGE)
            {
                debug!("player defeated");
                state.phase = BattlePhase::Finished(Outcome::Defeat);
                return;
            }

            if !state.is_animating() {
                state.phase = BattlePhase::AwaitingAnswer;
            }
        }
        BattlePhase::Finished(_) => {}
    }
}
