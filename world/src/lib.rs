#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Retro Bomber.
//!
//! The world owns the tile grid, the player, enemies, bombs, explosions and
//! bullets, and mutates them exclusively through [`apply`]. Every observable
//! change is reported through [`Event`] values so systems and adapters can
//! react without reaching into world internals. Queries hand out immutable
//! snapshots in deterministic order.

use std::time::Duration;

use retro_bomber_core::{
    CellCoord, Command, DamageCause, Direction, EnemyId, Event, Lives, PlacementRejection,
    TileKind, WorldPoint,
};

mod grid;

use grid::GridMap;

const WORLD_GENERATION_SEED: u64 = 0x9a3c_51f2_047b_6e8d;

/// Number of tile columns in the arena.
pub const GRID_COLUMNS: u32 = 13;
/// Number of tile rows in the arena.
pub const GRID_ROWS: u32 = 11;
/// Side length of a square tile expressed in world units.
pub const TILE_LENGTH: f32 = 48.0;
/// Time between placing a bomb and its detonation.
pub const BOMB_FUSE: Duration = Duration::from_millis(2_000);
/// Time an explosion stays visible and hazardous after detonation.
pub const EXPLOSION_DURATION: Duration = Duration::from_millis(450);
/// Number of enemies spawned at session start and after a restart.
pub const ENEMY_COUNT: usize = 5;
/// Grid cell the player spawns at and respawns to after damage.
pub const PLAYER_SPAWN: CellCoord = CellCoord::new(1, 1);

const STARTING_LIVES: Lives = Lives::new(7);
const STARTING_BOMB_RANGE: u32 = 2;
const STARTING_MAX_BOMBS: u32 = 3;
const PLAYER_SPEED: f32 = 220.0;
const ENEMY_BASE_SPEED: f32 = 110.0;
const ENEMY_SPEED_SPREAD: f32 = 60.0;
const BULLET_SPEED: f32 = 320.0;
const BULLET_TTL: Duration = Duration::from_millis(2_500);
const BULLET_HIT_RADIUS: f32 = TILE_LENGTH * 0.42;
const CRATE_POINTS: u32 = 10;
const ENEMY_KILL_POINTS: u32 = 100;
const SPAWN_CLEARANCE: f32 = 3.0;
const SPAWN_RETRY_BUDGET: u32 = 2_000;

/// Terminal-state classification of the running session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The session is live and the simulation advances every tick.
    Running,
    /// Every enemy was cleared while the player lived; simulation continues.
    Victory,
    /// The player ran out of lives; ticks are inert until a restart.
    GameOver,
}

/// Represents the authoritative Retro Bomber world state.
#[derive(Debug)]
pub struct World {
    grid: GridMap,
    player: Player,
    enemies: Vec<Enemy>,
    bombs: Vec<Bomb>,
    explosions: Vec<Explosion>,
    bullets: Vec<Bullet>,
    wave: WaveState,
    next_enemy_id: u32,
    rng_state: u64,
    outcome: Outcome,
}

impl World {
    /// Creates a new world using the default generation seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(WORLD_GENERATION_SEED)
    }

    /// Creates a new world whose map layout and spawns derive from `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let mut rng_state = seed;
        let grid = GridMap::generate(GRID_COLUMNS, GRID_ROWS, &mut rng_state);
        let mut world = Self {
            grid,
            player: Player::at_spawn(),
            enemies: Vec::new(),
            bombs: Vec::new(),
            explosions: Vec::new(),
            bullets: Vec::new(),
            wave: WaveState::default(),
            next_enemy_id: 0,
            rng_state,
            outcome: Outcome::Running,
        };
        world.spawn_enemies();
        world
    }

    fn spawn_enemies(&mut self) {
        let mut tries = 0;
        while self.enemies.len() < ENEMY_COUNT && tries < SPAWN_RETRY_BUDGET {
            tries += 1;
            let column = 2 + random_below(&mut self.rng_state, GRID_COLUMNS - 4);
            let row = 2 + random_below(&mut self.rng_state, GRID_ROWS - 4);
            let cell = CellCoord::new(column, row);
            if !self.grid.is_open(cell) || cell == self.player.cell {
                continue;
            }
            if cell.grid_distance(PLAYER_SPAWN) < SPAWN_CLEARANCE {
                continue;
            }
            if self.enemies.iter().any(|enemy| enemy.cell == cell) {
                continue;
            }
            let speed = ENEMY_BASE_SPEED + random_unit(&mut self.rng_state) * ENEMY_SPEED_SPREAD;
            let id = EnemyId::new(self.next_enemy_id);
            self.next_enemy_id = self.next_enemy_id.wrapping_add(1);
            self.enemies.push(Enemy::at_cell(id, cell, speed));
        }
    }

    fn bomb_at(&self, cell: CellCoord) -> bool {
        self.bombs.iter().any(|bomb| bomb.cell == cell)
    }

    fn enemy_at(&self, cell: CellCoord) -> bool {
        self.enemies.iter().any(|enemy| enemy.cell == cell)
    }

    fn step_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if self.outcome == Outcome::GameOver || self.player.in_transit {
            return;
        }
        let Some(destination) = self.player.cell.step(direction) else {
            return;
        };
        if !self.grid.is_open(destination)
            || self.bomb_at(destination)
            || self.enemy_at(destination)
        {
            return;
        }

        let from = self.player.cell;
        self.player.cell = destination;
        self.player.target = cell_center(destination);
        self.player.in_transit = true;
        out_events.push(Event::PlayerMoved {
            from,
            to: destination,
        });
    }

    fn place_bomb(&mut self, out_events: &mut Vec<Event>) {
        if self.outcome == Outcome::GameOver {
            return;
        }
        let reason = if self.wave.active {
            Some(PlacementRejection::WaveActive)
        } else if self.wave.placed >= self.player.max_bombs {
            Some(PlacementRejection::NoBombsRemaining)
        } else if self.bomb_at(self.player.cell) {
            Some(PlacementRejection::CellOccupied)
        } else if self.grid.kind_at(self.player.cell) != Some(TileKind::Empty) {
            Some(PlacementRejection::TileBlocked)
        } else {
            None
        };

        if let Some(reason) = reason {
            out_events.push(Event::BombRejected { reason });
            return;
        }

        self.bombs.push(Bomb {
            cell: self.player.cell,
            fuse: BOMB_FUSE,
            range: self.player.bomb_range,
        });
        self.wave.placed += 1;
        if self.wave.placed >= self.player.max_bombs {
            self.wave.active = true;
        }
        out_events.push(Event::BombPlaced {
            cell: self.player.cell,
        });
    }

    fn step_enemy(&mut self, enemy_id: EnemyId, direction: Direction, out_events: &mut Vec<Event>) {
        if self.outcome == Outcome::GameOver {
            return;
        }
        let Some(index) = self.enemies.iter().position(|enemy| enemy.id == enemy_id) else {
            return;
        };
        if self.enemies[index].in_transit {
            return;
        }
        let from = self.enemies[index].cell;
        let Some(destination) = from.step(direction) else {
            return;
        };
        if !self.grid.is_open(destination) {
            return;
        }
        if self
            .enemies
            .iter()
            .enumerate()
            .any(|(other, enemy)| other != index && enemy.cell == destination)
        {
            return;
        }
        // A bomb shields the cell outright, even from contact damage.
        if self.bomb_at(destination) {
            return;
        }
        if destination == self.player.cell {
            // Contact damages the player but never yields the cell.
            self.damage_player(DamageCause::EnemyContact, out_events);
            return;
        }

        let enemy = &mut self.enemies[index];
        enemy.cell = destination;
        enemy.target = cell_center(destination);
        enemy.in_transit = true;
        out_events.push(Event::EnemyAdvanced {
            enemy: enemy_id,
            from,
            to: destination,
        });
    }

    fn fire_bullet(&mut self, enemy_id: EnemyId, direction: Direction, out_events: &mut Vec<Event>) {
        if self.outcome == Outcome::GameOver {
            return;
        }
        let Some(enemy) = self.enemies.iter().find(|enemy| enemy.id == enemy_id) else {
            return;
        };
        let origin = cell_center(enemy.cell);
        let (vx, vy) = match direction {
            Direction::North => (0.0, -BULLET_SPEED),
            Direction::East => (BULLET_SPEED, 0.0),
            Direction::South => (0.0, BULLET_SPEED),
            Direction::West => (-BULLET_SPEED, 0.0),
        };
        self.bullets.push(Bullet {
            position: origin,
            vx,
            vy,
            ttl: BULLET_TTL,
        });
        out_events.push(Event::BulletFired {
            enemy: enemy_id,
            origin,
            direction,
        });
    }

    fn restart(&mut self, out_events: &mut Vec<Event>) {
        if self.outcome != Outcome::GameOver {
            return;
        }
        self.player = Player::at_spawn();
        self.bombs.clear();
        self.explosions.clear();
        self.bullets.clear();
        self.enemies.clear();
        self.wave = WaveState::default();
        self.outcome = Outcome::Running;
        self.spawn_enemies();
        out_events.push(Event::GameRestarted);
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if self.outcome == Outcome::GameOver {
            return;
        }
        out_events.push(Event::TimeAdvanced { dt });
        let dt_secs = dt.as_secs_f32();

        advance_transit(
            &mut self.player.position,
            self.player.target,
            PLAYER_SPEED * dt_secs,
            &mut self.player.in_transit,
        );
        self.update_bombs(dt, out_events);
        self.update_explosions(dt, out_events);
        if self.wave.active && self.bombs.is_empty() && self.explosions.is_empty() {
            self.wave = WaveState::default();
            out_events.push(Event::WaveRecharged);
        }
        self.update_bullets(dt, dt_secs, out_events);
        for enemy in &mut self.enemies {
            let travel = enemy.speed * dt_secs;
            advance_transit(&mut enemy.position, enemy.target, travel, &mut enemy.in_transit);
        }
        if self.outcome == Outcome::Running
            && self.enemies.is_empty()
            && !self.player.lives.is_depleted()
        {
            self.outcome = Outcome::Victory;
            out_events.push(Event::Victory {
                score: self.player.score,
            });
        }
    }

    fn update_bombs(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let mut index = 0;
        while index < self.bombs.len() {
            self.bombs[index].fuse = self.bombs[index].fuse.saturating_sub(dt);
            if self.bombs[index].fuse.is_zero() {
                let bomb = self.bombs.remove(index);
                self.detonate(bomb, out_events);
            } else {
                index += 1;
            }
        }
    }

    fn detonate(&mut self, bomb: Bomb, out_events: &mut Vec<Event>) {
        let cells = self.blast_cells(bomb.cell, bomb.range);
        out_events.push(Event::BombDetonated {
            origin: bomb.cell,
            cells: cells.clone(),
        });

        for &cell in &cells {
            if self.grid.destroy_crate_at(cell) {
                self.player.score += CRATE_POINTS;
                out_events.push(Event::CrateDestroyed { cell });
            }
        }

        let mut index = 0;
        while index < self.enemies.len() {
            if cells.contains(&self.enemies[index].cell) {
                let enemy = self.enemies.remove(index);
                self.player.score += ENEMY_KILL_POINTS;
                out_events.push(Event::EnemySlain {
                    enemy: enemy.id,
                    cell: enemy.cell,
                });
            } else {
                index += 1;
            }
        }

        self.explosions.push(Explosion {
            cells,
            remaining: EXPLOSION_DURATION,
        });
    }

    /// Computes the cells covered by a blast of the provided radius.
    ///
    /// Each cardinal ray extends up to `range` cells, stops before a wall and
    /// stops after the first crate it covers. Each ray visits distinct cells,
    /// so the result carries no duplicates by construction.
    fn blast_cells(&self, origin: CellCoord, range: u32) -> Vec<CellCoord> {
        let mut cells = vec![origin];
        for direction in Direction::CARDINAL {
            let mut cursor = origin;
            for _ in 0..range {
                let Some(next) = cursor.step(direction) else {
                    break;
                };
                match self.grid.kind_at(next) {
                    None | Some(TileKind::Wall) => break,
                    Some(TileKind::Empty) => {
                        cells.push(next);
                        cursor = next;
                    }
                    Some(TileKind::Crate) => {
                        cells.push(next);
                        break;
                    }
                }
            }
        }
        cells
    }

    fn update_explosions(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        for explosion in &mut self.explosions {
            explosion.remaining = explosion.remaining.saturating_sub(dt);
        }
        // Deliberate continuous-exposure hazard: every live explosion that
        // covers the player's cell costs one life on every tick.
        for index in 0..self.explosions.len() {
            let hit = self.explosions[index]
                .cells
                .iter()
                .any(|&cell| cell == self.player.cell);
            if hit {
                self.damage_player(DamageCause::Explosion, out_events);
            }
        }
        self.explosions.retain(|explosion| !explosion.remaining.is_zero());
    }

    fn update_bullets(&mut self, dt: Duration, dt_secs: f32, out_events: &mut Vec<Event>) {
        let width = GRID_COLUMNS as f32 * TILE_LENGTH;
        let height = GRID_ROWS as f32 * TILE_LENGTH;
        let mut index = 0;
        while index < self.bullets.len() {
            {
                let bullet = &mut self.bullets[index];
                bullet.ttl = bullet.ttl.saturating_sub(dt);
                bullet.position.x += bullet.vx * dt_secs;
                bullet.position.y += bullet.vy * dt_secs;
            }
            let bullet = self.bullets[index];

            let out_of_bounds = bullet.position.x < 0.0
                || bullet.position.x >= width
                || bullet.position.y < 0.0
                || bullet.position.y >= height;
            if out_of_bounds {
                let _ = self.bullets.remove(index);
                continue;
            }

            let cell = CellCoord::new(
                (bullet.position.x / TILE_LENGTH) as u32,
                (bullet.position.y / TILE_LENGTH) as u32,
            );
            if matches!(self.grid.kind_at(cell), None | Some(TileKind::Wall)) {
                let _ = self.bullets.remove(index);
                continue;
            }

            if bullet.position.distance_to(cell_center(self.player.cell)) < BULLET_HIT_RADIUS {
                let _ = self.bullets.remove(index);
                self.damage_player(DamageCause::Bullet, out_events);
                continue;
            }

            if bullet.ttl.is_zero() {
                let _ = self.bullets.remove(index);
                continue;
            }
            index += 1;
        }
    }

    fn damage_player(&mut self, cause: DamageCause, out_events: &mut Vec<Event>) {
        self.player.lives = self.player.lives.decremented();
        out_events.push(Event::PlayerDamaged {
            cause,
            lives_remaining: self.player.lives,
        });

        let center = cell_center(PLAYER_SPAWN);
        self.player.cell = PLAYER_SPAWN;
        self.player.position = center;
        self.player.target = center;
        self.player.in_transit = false;

        if self.player.lives.is_depleted() && self.outcome == Outcome::Running {
            self.outcome = Outcome::GameOver;
            out_events.push(Event::GameOver {
                score: self.player.score,
            });
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::StepPlayer { direction } => world.step_player(direction, out_events),
        Command::PlaceBomb => world.place_bomb(out_events),
        Command::StepEnemy { enemy, direction } => world.step_enemy(enemy, direction, out_events),
        Command::FireBullet { enemy, direction } => world.fire_bullet(enemy, direction, out_events),
        Command::RestartGame => world.restart(out_events),
    }
}

/// Center of the provided cell expressed in world units.
#[must_use]
pub fn cell_center(cell: CellCoord) -> WorldPoint {
    WorldPoint::new(
        cell.column() as f32 * TILE_LENGTH + TILE_LENGTH / 2.0,
        cell.row() as f32 * TILE_LENGTH + TILE_LENGTH / 2.0,
    )
}

fn advance_transit(position: &mut WorldPoint, target: WorldPoint, travel: f32, in_transit: &mut bool) {
    if !*in_transit {
        return;
    }
    let dx = target.x - position.x;
    let dy = target.y - position.y;
    let distance = dx.hypot(dy);
    if distance <= travel {
        *position = target;
        *in_transit = false;
    } else {
        position.x += dx / distance * travel;
        position.y += dy / distance * travel;
    }
}

#[derive(Clone, Copy, Debug)]
struct Player {
    cell: CellCoord,
    position: WorldPoint,
    target: WorldPoint,
    in_transit: bool,
    lives: Lives,
    score: u32,
    bomb_range: u32,
    max_bombs: u32,
}

impl Player {
    fn at_spawn() -> Self {
        let center = cell_center(PLAYER_SPAWN);
        Self {
            cell: PLAYER_SPAWN,
            position: center,
            target: center,
            in_transit: false,
            lives: STARTING_LIVES,
            score: 0,
            bomb_range: STARTING_BOMB_RANGE,
            max_bombs: STARTING_MAX_BOMBS,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Enemy {
    id: EnemyId,
    cell: CellCoord,
    position: WorldPoint,
    target: WorldPoint,
    in_transit: bool,
    speed: f32,
}

impl Enemy {
    fn at_cell(id: EnemyId, cell: CellCoord, speed: f32) -> Self {
        let center = cell_center(cell);
        Self {
            id,
            cell,
            position: center,
            target: center,
            in_transit: false,
            speed,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Bomb {
    cell: CellCoord,
    fuse: Duration,
    range: u32,
}

#[derive(Clone, Debug)]
struct Explosion {
    cells: Vec<CellCoord>,
    remaining: Duration,
}

#[derive(Clone, Copy, Debug)]
struct Bullet {
    position: WorldPoint,
    vx: f32,
    vy: f32,
    ttl: Duration,
}

#[derive(Clone, Copy, Debug, Default)]
struct WaveState {
    placed: u32,
    active: bool,
}

fn next_random(state: u64) -> u64 {
    state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1)
}

pub(crate) fn random_unit(state: &mut u64) -> f32 {
    *state = next_random(*state);
    ((*state >> 40) as f32) / (1u64 << 24) as f32
}

fn random_below(state: &mut u64, bound: u32) -> u32 {
    debug_assert!(bound > 0, "random_below requires a positive bound");
    *state = next_random(*state);
    ((*state >> 32) % u64::from(bound)) as u32
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::{cell_center, GridMap, Outcome, World};
    use retro_bomber_core::{CellCoord, EnemyId, Lives, TileKind, WorldPoint};

    /// Immutable representation of the player's state used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct PlayerSnapshot {
        /// Grid cell currently occupied by the player.
        pub cell: CellCoord,
        /// Continuous position in world units, at the cell center when idle.
        pub position: WorldPoint,
        /// Indicates whether the player is interpolating toward a target cell.
        pub in_transit: bool,
        /// Lives the player has left.
        pub lives: Lives,
        /// Accumulated score.
        pub score: u32,
        /// Blast radius applied to newly placed bombs.
        pub bomb_range: u32,
        /// Number of bombs a single wave may hold.
        pub max_bombs: u32,
        /// Bombs still available in the current wave.
        pub bombs_remaining: u32,
    }

    /// Captures a read-only snapshot of the player.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            cell: world.player.cell,
            position: world.player.position,
            in_transit: world.player.in_transit,
            lives: world.player.lives,
            score: world.player.score,
            bomb_range: world.player.bomb_range,
            max_bombs: world.player.max_bombs,
            bombs_remaining: world.player.max_bombs.saturating_sub(world.wave.placed),
        }
    }

    /// Immutable representation of a single enemy's state used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct EnemySnapshot {
        /// Unique identifier assigned to the enemy.
        pub id: EnemyId,
        /// Grid cell currently occupied by the enemy.
        pub cell: CellCoord,
        /// Continuous position in world units, at the cell center when idle.
        pub position: WorldPoint,
        /// Indicates whether the enemy is interpolating toward a target cell.
        pub in_transit: bool,
        /// Movement speed in world units per second.
        pub speed: f32,
    }

    /// Read-only snapshot describing all live enemies.
    #[derive(Clone, Debug, Default)]
    pub struct EnemyView {
        snapshots: Vec<EnemySnapshot>,
    }

    impl EnemyView {
        /// Builds a view from hand-assembled snapshots, sorted by identifier.
        ///
        /// Lets system tests stage enemy configurations the simulation would
        /// only reach mid-flight.
        #[must_use]
        pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
            snapshots.sort_by_key(|snapshot| snapshot.id);
            Self { snapshots }
        }

        /// Iterator over the captured enemy snapshots in deterministic order.
        pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
            self.snapshots.iter()
        }

        /// Number of live enemies captured in the view.
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.len()
        }

        /// Reports whether no enemies remain.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.is_empty()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<EnemySnapshot> {
            self.snapshots
        }
    }

    /// Captures a read-only view of the live enemies, sorted by identifier.
    #[must_use]
    pub fn enemies(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .enemies
                .iter()
                .map(|enemy| EnemySnapshot {
                    id: enemy.id,
                    cell: enemy.cell,
                    position: enemy.position,
                    in_transit: enemy.in_transit,
                    speed: enemy.speed,
                })
                .collect(),
        )
    }

    /// Immutable representation of a placed bomb used for queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct BombSnapshot {
        /// Cell occupied by the bomb.
        pub cell: CellCoord,
        /// Time left on the fuse.
        pub fuse_remaining: Duration,
        /// Blast radius fixed at placement time.
        pub range: u32,
    }

    /// Captures the bombs currently waiting to detonate.
    #[must_use]
    pub fn bombs(world: &World) -> Vec<BombSnapshot> {
        world
            .bombs
            .iter()
            .map(|bomb| BombSnapshot {
                cell: bomb.cell,
                fuse_remaining: bomb.fuse,
                range: bomb.range,
            })
            .collect()
    }

    /// Immutable representation of a live explosion used for queries.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct ExplosionSnapshot {
        /// Every cell covered by the blast.
        pub cells: Vec<CellCoord>,
        /// Time left on the display/hazard window.
        pub remaining: Duration,
    }

    /// Captures the explosions currently alive.
    #[must_use]
    pub fn explosions(world: &World) -> Vec<ExplosionSnapshot> {
        world
            .explosions
            .iter()
            .map(|explosion| ExplosionSnapshot {
                cells: explosion.cells.clone(),
                remaining: explosion.remaining,
            })
            .collect()
    }

    /// Immutable representation of a bullet in flight used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct BulletSnapshot {
        /// Continuous position in world units.
        pub position: WorldPoint,
        /// Velocity in world units per second.
        pub velocity: WorldPoint,
    }

    /// Captures the bullets currently in flight.
    #[must_use]
    pub fn bullets(world: &World) -> Vec<BulletSnapshot> {
        world
            .bullets
            .iter()
            .map(|bullet| BulletSnapshot {
                position: bullet.position,
                velocity: WorldPoint::new(bullet.vx, bullet.vy),
            })
            .collect()
    }

    /// Read-only view into the tile grid.
    #[derive(Clone, Copy, Debug)]
    pub struct TileView<'a> {
        grid: &'a GridMap,
    }

    impl<'a> TileView<'a> {
        /// Number of columns contained in the grid.
        #[must_use]
        pub fn columns(&self) -> u32 {
            self.grid.columns()
        }

        /// Number of rows contained in the grid.
        #[must_use]
        pub fn rows(&self) -> u32 {
            self.grid.rows()
        }

        /// Classification of the provided cell, or `None` when out of bounds.
        #[must_use]
        pub fn kind_at(&self, cell: CellCoord) -> Option<TileKind> {
            self.grid.kind_at(cell)
        }

        /// Reports whether the cell lies in bounds and is walkable floor.
        #[must_use]
        pub fn is_open(&self, cell: CellCoord) -> bool {
            self.grid.is_open(cell)
        }

        /// Dense tile classifications stored in row-major order.
        #[must_use]
        pub fn tiles(&self) -> &'a [TileKind] {
            self.grid.tiles()
        }
    }

    /// Exposes a read-only view of the tile grid.
    #[must_use]
    pub fn tiles(world: &World) -> TileView<'_> {
        TileView { grid: &world.grid }
    }

    /// Reports whether a bomb occupies the provided cell.
    #[must_use]
    pub fn bomb_occupies(world: &World, cell: CellCoord) -> bool {
        world.bomb_at(cell)
    }

    /// Reports whether an enemy occupies the provided cell.
    #[must_use]
    pub fn enemy_occupies(world: &World, cell: CellCoord) -> bool {
        world.enemy_at(cell)
    }

    /// Terminal-state classification of the session.
    #[must_use]
    pub fn outcome(world: &World) -> Outcome {
        world.outcome
    }

    /// Center of the player's current cell; bullets aim at this point.
    #[must_use]
    pub fn player_cell_center(world: &World) -> WorldPoint {
        cell_center(world.player.cell)
    }
}
