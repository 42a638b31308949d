#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Translates sampled player input into world commands.
//!
//! The system holds no state of its own: each frame it inspects the sampled
//! [`InputFrame`] together with a player snapshot and the session outcome,
//! and emits the commands the world should adjudicate. Held movement keys
//! produce one step command per idle frame, so releasing a key between
//! cells leaves the player parked at a cell center.

use retro_bomber_core::{Command, InputFrame};
use retro_bomber_world::query::PlayerSnapshot;
use retro_bomber_world::Outcome;

/// Pure system mapping one input sample to zero or more commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlayerControl;

impl PlayerControl {
    /// Emits the commands implied by `input` for the current frame.
    pub fn handle(
        &self,
        input: InputFrame,
        player: &PlayerSnapshot,
        outcome: Outcome,
        out: &mut Vec<Command>,
    ) {
        if outcome == Outcome::GameOver {
            if input.restart {
                out.push(Command::RestartGame);
            }
            return;
        }

        if input.place_bomb {
            out.push(Command::PlaceBomb);
        }
        if let Some(direction) = input.direction {
            if !player.in_transit {
                out.push(Command::StepPlayer { direction });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retro_bomber_core::Direction;
    use retro_bomber_world::{query, World};

    fn idle_player() -> PlayerSnapshot {
        query::player(&World::with_seed(0x1))
    }

    #[test]
    fn held_direction_steps_only_while_idle() {
        let control = PlayerControl;
        let mut player = idle_player();
        let input = InputFrame {
            direction: Some(Direction::East),
            ..InputFrame::default()
        };

        let mut out = Vec::new();
        control.handle(input, &player, Outcome::Running, &mut out);
        assert_eq!(
            out,
            vec![Command::StepPlayer {
                direction: Direction::East,
            }]
        );

        player.in_transit = true;
        out.clear();
        control.handle(input, &player, Outcome::Running, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn bomb_and_step_requests_combine_in_one_frame() {
        let control = PlayerControl;
        let input = InputFrame {
            direction: Some(Direction::South),
            place_bomb: true,
            restart: false,
        };

        let mut out = Vec::new();
        control.handle(input, &idle_player(), Outcome::Running, &mut out);
        assert_eq!(
            out,
            vec![
                Command::PlaceBomb,
                Command::StepPlayer {
                    direction: Direction::South,
                },
            ]
        );
    }

    #[test]
    fn only_restart_survives_a_finished_game() {
        let control = PlayerControl;
        let input = InputFrame {
            direction: Some(Direction::North),
            place_bomb: true,
            restart: true,
        };

        let mut out = Vec::new();
        control.handle(input, &idle_player(), Outcome::GameOver, &mut out);
        assert_eq!(out, vec![Command::RestartGame]);
    }

    #[test]
    fn restart_is_not_emitted_while_running() {
        let control = PlayerControl;
        let input = InputFrame {
            restart: true,
            ..InputFrame::default()
        };

        let mut out = Vec::new();
        control.handle(input, &idle_player(), Outcome::Running, &mut out);
        assert!(out.is_empty());

        out.clear();
        control.handle(input, &idle_player(), Outcome::Victory, &mut out);
        assert!(out.is_empty());
    }
}
