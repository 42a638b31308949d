use std::time::Duration;

use glam::Vec2;
use retro_bomber_core::{Command, Event, InputFrame, WorldPoint, GAME_TITLE};
use retro_bomber_rendering::{
    BombPresentation, BulletPresentation, Color, EnemyPresentation, ExplosionPresentation,
    HudPresentation, PlayerPresentation, Presentation, Scene, SceneBanner, TileGridPresentation,
};
use retro_bomber_system_enemy_ai::{EnemyAi, StepVerdict};
use retro_bomber_system_player_control::PlayerControl;
use retro_bomber_world::{
    apply, query, Outcome, World, BOMB_FUSE, EXPLOSION_DURATION, TILE_LENGTH,
};

const CLEAR_COLOR: Color = Color::from_rgb_u8(16, 16, 24);
const FLOOR_COLOR: Color = Color::from_rgb_u8(32, 36, 44);
const WALL_COLOR: Color = Color::from_rgb_u8(96, 96, 112);
const CRATE_COLOR: Color = Color::from_rgb_u8(168, 120, 64);
const PLAYER_COLOR: Color = Color::from_rgb_u8(80, 200, 120);
const ENEMY_COLOR: Color = Color::from_rgb_u8(220, 72, 72);

/// Seeds that fully reproduce a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SessionSeeds {
    /// Seed that drives map generation and enemy spawns.
    pub world: u64,
    /// Seed that drives enemy behavior timers and direction draws.
    pub ai: u64,
}

impl SessionSeeds {
    /// Pairs a world seed with a behavior seed derived from it.
    pub(crate) fn derived_from(world_seed: u64) -> Self {
        Self {
            world: world_seed,
            ai: world_seed
                .wrapping_mul(0x2545_f491_4f6c_dd1d)
                .wrapping_add(0x9e37_79b9_7f4a_7c15),
        }
    }
}

/// Frame orchestrator wiring input, the world and the behavior systems.
///
/// Each frame applies player commands first, then advances time, then lets
/// the enemy system react to everything that happened. The returned event
/// log contains the frame's events in the order the world emitted them.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    enemy_ai: EnemyAi,
    player_control: PlayerControl,
    #[allow(dead_code)]
    seeds: SessionSeeds,
}

impl Session {
    pub(crate) fn new(seeds: SessionSeeds) -> Self {
        Self {
            world: World::with_seed(seeds.world),
            enemy_ai: EnemyAi::new(seeds.ai),
            player_control: PlayerControl,
            seeds,
        }
    }

    #[allow(dead_code)]
    pub(crate) fn seeds(&self) -> SessionSeeds {
        self.seeds
    }

    pub(crate) fn outcome(&self) -> Outcome {
        query::outcome(&self.world)
    }

    /// Advances the session by one frame and returns the emitted events.
    pub(crate) fn frame(&mut self, dt: Duration, input: InputFrame) -> Vec<Event> {
        let mut events = Vec::new();

        let mut commands = Vec::new();
        self.player_control.handle(
            input,
            &query::player(&self.world),
            query::outcome(&self.world),
            &mut commands,
        );
        for command in commands {
            apply(&mut self.world, command, &mut events);
        }

        apply(&mut self.world, Command::Tick { dt }, &mut events);

        let mut enemy_commands = Vec::new();
        {
            let world = &self.world;
            let tiles = query::tiles(world);
            let enemies = query::enemies(world);
            let player_cell = query::player(world).cell;
            self.enemy_ai.handle(
                &events,
                &enemies,
                player_cell,
                tiles.columns(),
                tiles.rows(),
                |cell| tiles.is_open(cell),
                |from, direction| match from.step(direction) {
                    Some(next) if !tiles.is_open(next) => StepVerdict::Blocked,
                    Some(next)
                        if query::bomb_occupies(world, next)
                            || query::enemy_occupies(world, next) =>
                    {
                        StepVerdict::Blocked
                    }
                    Some(next) if next == player_cell => StepVerdict::PlayerContact,
                    Some(_) => StepVerdict::Clear,
                    None => StepVerdict::Blocked,
                },
                &mut enemy_commands,
            );
        }
        for command in enemy_commands {
            apply(&mut self.world, command, &mut events);
        }

        events
    }

    /// Builds the presentation describing the current world state.
    pub(crate) fn presentation(&self) -> anyhow::Result<Presentation> {
        let tiles = query::tiles(&self.world);
        let tile_grid = TileGridPresentation::new(
            tiles.columns(),
            tiles.rows(),
            TILE_LENGTH,
            FLOOR_COLOR,
            WALL_COLOR,
            CRATE_COLOR,
        )?;

        let player = query::player(&self.world);
        let enemies = query::enemies(&self.world)
            .iter()
            .map(|snapshot| EnemyPresentation {
                id: snapshot.id,
                position: to_vec2(snapshot.position),
                color: ENEMY_COLOR,
            })
            .collect();
        let bombs = query::bombs(&self.world)
            .iter()
            .map(|bomb| BombPresentation {
                cell: bomb.cell,
                fuse_fraction: fraction(bomb.fuse_remaining, BOMB_FUSE),
            })
            .collect();
        let explosions = query::explosions(&self.world)
            .iter()
            .map(|explosion| ExplosionPresentation {
                cells: explosion.cells.clone(),
                intensity: fraction(explosion.remaining, EXPLOSION_DURATION),
            })
            .collect();
        let bullets = query::bullets(&self.world)
            .iter()
            .map(|bullet| BulletPresentation {
                position: to_vec2(bullet.position),
            })
            .collect();

        let banner = match self.outcome() {
            Outcome::Running => None,
            Outcome::Victory => Some(SceneBanner::Victory),
            Outcome::GameOver => Some(SceneBanner::GameOver),
        };
        let scene = Scene {
            tile_grid,
            tiles: tiles.tiles().to_vec(),
            player: PlayerPresentation {
                position: to_vec2(player.position),
                color: PLAYER_COLOR,
            },
            enemies,
            bombs,
            explosions,
            bullets,
            hud: HudPresentation {
                lives: player.lives,
                score: player.score,
                bombs_remaining: player.bombs_remaining,
                max_bombs: player.max_bombs,
                bomb_range: player.bomb_range,
                banner,
            },
        };

        Ok(Presentation::new(GAME_TITLE, CLEAR_COLOR, scene))
    }
}

fn to_vec2(point: WorldPoint) -> Vec2 {
    Vec2::new(point.x, point.y)
}

fn fraction(remaining: Duration, total: Duration) -> f32 {
    if total.is_zero() {
        return 0.0;
    }
    (remaining.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use retro_bomber_core::Direction;
    use retro_bomber_world::{ENEMY_COUNT, GRID_COLUMNS, GRID_ROWS};

    const FRAME: Duration = Duration::from_millis(16);

    fn run(seeds: SessionSeeds, frames: u32) -> (Session, Vec<Event>) {
        let mut session = Session::new(seeds);
        let mut log = Vec::new();
        for _ in 0..frames {
            log.extend(session.frame(FRAME, InputFrame::default()));
        }
        (session, log)
    }

    #[test]
    fn identical_seeds_replay_identical_sessions() {
        let seeds = SessionSeeds::derived_from(0xc0ff_ee00);
        let (first_session, first_log) = run(seeds, 240);
        let (second_session, second_log) = run(seeds, 240);

        assert_eq!(first_log, second_log);
        assert_eq!(first_session.outcome(), second_session.outcome());
    }

    #[test]
    fn held_input_moves_the_player() {
        let mut session = Session::new(SessionSeeds::derived_from(0x1));
        let input = InputFrame {
            direction: Some(Direction::East),
            ..InputFrame::default()
        };

        let events = session.frame(FRAME, input);
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::PlayerMoved { .. })));
    }

    #[test]
    fn bomb_press_places_or_rejects_exactly_once() {
        let mut session = Session::new(SessionSeeds::derived_from(0x2));
        let input = InputFrame {
            place_bomb: true,
            ..InputFrame::default()
        };

        let events = session.frame(FRAME, input);
        let responses = events
            .iter()
            .filter(|event| {
                matches!(event, Event::BombPlaced { .. } | Event::BombRejected { .. })
            })
            .count();
        assert_eq!(responses, 1);
    }

    #[test]
    fn presentation_mirrors_the_starting_world() {
        let session = Session::new(SessionSeeds::derived_from(0x3));
        let presentation = session.presentation().expect("presentation builds");
        let scene = &presentation.scene;

        assert_eq!(presentation.window_title, GAME_TITLE);
        assert_eq!(
            scene.tiles.len(),
            (GRID_COLUMNS * GRID_ROWS) as usize
        );
        assert_eq!(scene.enemies.len(), ENEMY_COUNT);
        assert!(scene.bombs.is_empty());
        assert!(scene.hud.banner.is_none());
    }

    #[test]
    fn derived_seeds_differ_from_their_world_seed() {
        let seeds = SessionSeeds::derived_from(7);
        assert_ne!(seeds.world, seeds.ai);
    }
}
