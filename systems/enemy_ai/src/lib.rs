#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic enemy behavior system.
//!
//! Enemies wander on randomized timers until the player comes close enough,
//! then chase along breadth-first shortest paths and shoot on a tighter
//! cadence. The system never mutates the world directly: it consumes events
//! and immutable views and emits [`Command`] values for the world to
//! adjudicate.

use std::collections::BTreeMap;
use std::time::Duration;

use retro_bomber_core::{CellCoord, Command, Direction, EnemyId, Event};
use retro_bomber_world::query::EnemyView;

pub mod pathfinding;

/// Euclidean cell distance within which an enemy switches to chasing.
pub const CHASE_RADIUS: f32 = 6.0;

const WANDER_MOVE_DELAY_BASE: f32 = 0.4;
const WANDER_MOVE_DELAY_SPREAD: f32 = 0.9;
const WANDER_RETRY_DELAY_BASE: f32 = 0.2;
const WANDER_RETRY_DELAY_SPREAD: f32 = 0.6;
const WANDER_SHOOT_CHANCE: f32 = 0.12;
const WANDER_SHOOT_DELAY_BASE: f32 = 0.8;
const WANDER_SHOOT_DELAY_SPREAD: f32 = 1.5;
const CHASE_SHOOT_DELAY_BASE: f32 = 0.8;
const CHASE_SHOOT_DELAY_SPREAD: f32 = 1.2;
const INITIAL_MOVE_DELAY_SPREAD: f32 = 0.7;
const INITIAL_SHOOT_DELAY_BASE: f32 = 0.6;
const INITIAL_SHOOT_DELAY_SPREAD: f32 = 1.4;

/// Adjudication of a proposed single-cell enemy step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepVerdict {
    /// The destination is open; the step would commit.
    Clear,
    /// The destination holds the player; the step damages but never commits.
    PlayerContact,
    /// A wall, crate, bomb or another enemy blocks the destination.
    Blocked,
}

/// Behavior mode, a pure function of the distance to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Mode {
    /// Random walk on relaxed timers.
    Wander,
    /// Shortest-path pursuit with a tighter shot cadence.
    Chase,
}

impl Mode {
    fn for_distance(distance: f32) -> Self {
        if distance <= CHASE_RADIUS {
            Self::Chase
        } else {
            Self::Wander
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct AiState {
    move_delay: Duration,
    shoot_delay: Duration,
}

/// Pure system that drives enemy movement and fire on randomized timers.
#[derive(Debug)]
pub struct EnemyAi {
    states: BTreeMap<EnemyId, AiState>,
    rng_state: u64,
}

impl EnemyAi {
    /// Creates a system whose timer and direction draws derive from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            states: BTreeMap::new(),
            rng_state: seed,
        }
    }

    /// Consumes world events and immutable views to emit enemy commands.
    ///
    /// `is_cell_open` reports grid floor passability and feeds the path
    /// search; `step_verdict` adjudicates a concrete wander step so blocked
    /// attempts reschedule on the shorter retry delay.
    pub fn handle<F, G>(
        &mut self,
        events: &[Event],
        enemies: &EnemyView,
        player_cell: CellCoord,
        grid_columns: u32,
        grid_rows: u32,
        is_cell_open: F,
        step_verdict: G,
        out: &mut Vec<Command>,
    ) where
        F: Fn(CellCoord) -> bool,
        G: Fn(CellCoord, Direction) -> StepVerdict,
    {
        let mut elapsed = Duration::ZERO;
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => elapsed = elapsed.saturating_add(*dt),
                Event::EnemySlain { enemy, .. } => {
                    let _ = self.states.remove(enemy);
                }
                Event::GameRestarted => self.states.clear(),
                _ => {}
            }
        }
        if elapsed.is_zero() {
            return;
        }

        for snapshot in enemies.iter() {
            let mut state = match self.states.get(&snapshot.id) {
                Some(state) => *state,
                None => self.fresh_state(),
            };
            // Timers freeze while the enemy slides between cells; a moving
            // enemy makes no decisions until it lands.
            if snapshot.in_transit {
                let _ = self.states.insert(snapshot.id, state);
                continue;
            }
            state.move_delay = state.move_delay.saturating_sub(elapsed);
            state.shoot_delay = state.shoot_delay.saturating_sub(elapsed);

            match Mode::for_distance(snapshot.cell.grid_distance(player_cell)) {
                Mode::Chase => {
                    if let Some(direction) = pathfinding::next_step_toward(
                        snapshot.cell,
                        player_cell,
                        grid_columns,
                        grid_rows,
                        &is_cell_open,
                    ) {
                        out.push(Command::StepEnemy {
                            enemy: snapshot.id,
                            direction,
                        });
                    }
                    if state.shoot_delay.is_zero() {
                        if let Some(direction) = aim_at(snapshot.cell, player_cell) {
                            out.push(Command::FireBullet {
                                enemy: snapshot.id,
                                direction,
                            });
                        }
                        state.shoot_delay =
                            self.random_delay(CHASE_SHOOT_DELAY_BASE, CHASE_SHOOT_DELAY_SPREAD);
                    }
                }
                Mode::Wander => {
                    if state.move_delay.is_zero() {
                        if state.shoot_delay.is_zero() && self.random_unit() < WANDER_SHOOT_CHANCE
                        {
                            if let Some(direction) = aim_at(snapshot.cell, player_cell) {
                                out.push(Command::FireBullet {
                                    enemy: snapshot.id,
                                    direction,
                                });
                                state.shoot_delay = self.random_delay(
                                    WANDER_SHOOT_DELAY_BASE,
                                    WANDER_SHOOT_DELAY_SPREAD,
                                );
                            }
                        }

                        // Try the four directions in shuffled order; the
                        // first open one wins. Contact attempts still damage
                        // the player but never occupy the cell, so scanning
                        // continues past them.
                        let mut stepped = false;
                        for direction in self.shuffled_directions() {
                            match step_verdict(snapshot.cell, direction) {
                                StepVerdict::Clear => {
                                    out.push(Command::StepEnemy {
                                        enemy: snapshot.id,
                                        direction,
                                    });
                                    stepped = true;
                                    break;
                                }
                                StepVerdict::PlayerContact => {
                                    out.push(Command::StepEnemy {
                                        enemy: snapshot.id,
                                        direction,
                                    });
                                }
                                StepVerdict::Blocked => {}
                            }
                        }
                        state.move_delay = if stepped {
                            self.random_delay(WANDER_MOVE_DELAY_BASE, WANDER_MOVE_DELAY_SPREAD)
                        } else {
                            self.random_delay(WANDER_RETRY_DELAY_BASE, WANDER_RETRY_DELAY_SPREAD)
                        };
                    }
                }
            }

            let _ = self.states.insert(snapshot.id, state);
        }
    }

    fn fresh_state(&mut self) -> AiState {
        AiState {
            move_delay: self.random_delay(0.0, INITIAL_MOVE_DELAY_SPREAD),
            shoot_delay: self.random_delay(INITIAL_SHOOT_DELAY_BASE, INITIAL_SHOOT_DELAY_SPREAD),
        }
    }

    fn random_delay(&mut self, base: f32, spread: f32) -> Duration {
        Duration::from_secs_f32(base + self.random_unit() * spread)
    }

    fn shuffled_directions(&mut self) -> [Direction; 4] {
        let mut directions = Direction::CARDINAL;
        for index in (1..directions.len()).rev() {
            let other = self.random_below(index as u32 + 1) as usize;
            directions.swap(index, other);
        }
        directions
    }

    fn random_unit(&mut self) -> f32 {
        self.rng_state = next_random(self.rng_state);
        ((self.rng_state >> 40) as f32) / (1u64 << 24) as f32
    }

    fn random_below(&mut self, bound: u32) -> u32 {
        self.rng_state = next_random(self.rng_state);
        ((self.rng_state >> 32) % u64::from(bound)) as u32
    }
}

fn next_random(state: u64) -> u64 {
    state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1)
}

/// Cardinal direction from shooter to target along the dominant axis.
///
/// Ties between the axes resolve vertically. Returns `None` only when the
/// two cells coincide.
fn aim_at(from: CellCoord, target: CellCoord) -> Option<Direction> {
    let dx = i64::from(target.column()) - i64::from(from.column());
    let dy = i64::from(target.row()) - i64::from(from.row());
    if dx == 0 && dy == 0 {
        return None;
    }
    if dx.abs() > dy.abs() {
        if dx > 0 {
            Some(Direction::East)
        } else {
            Some(Direction::West)
        }
    } else if dy > 0 {
        Some(Direction::South)
    } else {
        Some(Direction::North)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aim_prefers_the_dominant_axis_and_breaks_ties_vertically() {
        let from = CellCoord::new(5, 5);
        assert_eq!(aim_at(from, CellCoord::new(9, 6)), Some(Direction::East));
        assert_eq!(aim_at(from, CellCoord::new(1, 4)), Some(Direction::West));
        assert_eq!(aim_at(from, CellCoord::new(6, 8)), Some(Direction::South));
        assert_eq!(aim_at(from, CellCoord::new(4, 2)), Some(Direction::North));
        // Equal offsets fall back to the vertical axis.
        assert_eq!(aim_at(from, CellCoord::new(8, 8)), Some(Direction::South));
        assert_eq!(aim_at(from, CellCoord::new(2, 2)), Some(Direction::North));
        assert_eq!(aim_at(from, from), None);
    }

    #[test]
    fn timer_draws_are_deterministic_for_the_same_seed() {
        let mut first = EnemyAi::new(0x7e57);
        let mut second = EnemyAi::new(0x7e57);
        for _ in 0..16 {
            assert_eq!(first.random_unit(), second.random_unit());
        }
    }

    #[test]
    fn mode_flips_exactly_at_the_chase_radius() {
        assert_eq!(Mode::for_distance(0.0), Mode::Chase);
        assert_eq!(Mode::for_distance(CHASE_RADIUS), Mode::Chase);
        assert_eq!(Mode::for_distance(CHASE_RADIUS + f32::EPSILON * 8.0), Mode::Wander);
        assert_eq!(Mode::for_distance(10.0), Mode::Wander);
    }

    #[test]
    fn shuffles_always_yield_a_permutation_of_the_cardinals() {
        let mut ai = EnemyAi::new(0x5a5a);
        for _ in 0..64 {
            let directions = ai.shuffled_directions();
            for direction in Direction::CARDINAL {
                assert!(directions.contains(&direction));
            }
        }
    }

    #[test]
    fn random_delays_stay_within_their_ranges() {
        let mut ai = EnemyAi::new(0xace);
        for _ in 0..256 {
            let delay = ai.random_delay(WANDER_MOVE_DELAY_BASE, WANDER_MOVE_DELAY_SPREAD);
            assert!(delay >= Duration::from_secs_f32(WANDER_MOVE_DELAY_BASE));
            assert!(
                delay
                    < Duration::from_secs_f32(
                        WANDER_MOVE_DELAY_BASE + WANDER_MOVE_DELAY_SPREAD
                    )
            );
        }
    }
}
