#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Retro Bomber simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems and adapters to react to deterministically. Systems consume
//! event streams, query immutable snapshots, and respond exclusively with new
//! command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const GAME_TITLE: &str = "Retro Bomber";

/// Classification of a single tile within the arena grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Walkable floor tile.
    Empty,
    /// Permanently impassable, indestructible tile.
    Wall,
    /// Destructible tile that an explosion converts to [`TileKind::Empty`].
    Crate,
}

/// Cardinal movement directions available to the player and enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// All cardinal directions in a fixed, deterministic order.
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Remaining number of lives held by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lives(u32);

impl Lives {
    /// Creates a new life counter with the provided value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the number of remaining lives.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the counter reduced by one life, saturating at zero.
    #[must_use]
    pub const fn decremented(self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    /// Reports whether no lives remain.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.0 == 0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row)
    }

    /// Computes the Euclidean distance between two cells in grid units.
    #[must_use]
    pub fn grid_distance(self, other: CellCoord) -> f32 {
        let column_diff = self.column.abs_diff(other.column) as f32;
        let row_diff = self.row.abs_diff(other.row) as f32;
        column_diff.hypot(row_diff)
    }

    /// Returns the cell one step in the provided direction.
    ///
    /// Produces `None` when the step would leave the coordinate space on the
    /// low side; upper-bound checks belong to the grid that owns the cells.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Option<CellCoord> {
        match direction {
            Direction::North => match self.row.checked_sub(1) {
                Some(row) => Some(CellCoord::new(self.column, row)),
                None => None,
            },
            Direction::East => Some(CellCoord::new(self.column + 1, self.row)),
            Direction::South => Some(CellCoord::new(self.column, self.row + 1)),
            Direction::West => match self.column.checked_sub(1) {
                Some(column) => Some(CellCoord::new(column, self.row)),
                None => None,
            },
        }
    }
}

/// Continuous position expressed in world units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct WorldPoint {
    /// Horizontal coordinate in world units.
    pub x: f32,
    /// Vertical coordinate in world units.
    pub y: f32,
}

impl WorldPoint {
    /// Creates a new continuous position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Computes the Euclidean distance to another position.
    #[must_use]
    pub fn distance_to(self, other: WorldPoint) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Normalized input intents sampled once at the start of each tick.
///
/// Directions carry latest-state semantics: a held direction re-requests a
/// step every tick while the player is idle. `place_bomb` and `restart` are
/// edge-triggered by the input collaborator and fire once per discrete press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct InputFrame {
    /// Direction currently requested by the player, if any.
    pub direction: Option<Direction>,
    /// Whether a bomb placement was requested this tick.
    pub place_bomb: bool,
    /// Whether a restart was requested this tick.
    pub restart: bool,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the player advance a single grid step.
    StepPlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that a bomb be placed at the player's current cell.
    PlaceBomb,
    /// Requests that an enemy advance a single grid step.
    StepEnemy {
        /// Identifier of the enemy attempting to move.
        enemy: EnemyId,
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that an enemy fire a bullet from its current cell.
    FireBullet {
        /// Identifier of the enemy firing the bullet.
        enemy: EnemyId,
        /// Direction the bullet travels in.
        direction: Direction,
    },
    /// Requests a fresh session; only honored while the game is over.
    RestartGame,
}

/// Causes of a single point of player damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DamageCause {
    /// The player's cell overlapped a live explosion.
    Explosion,
    /// An enemy bullet struck the player.
    Bullet,
    /// An enemy attempted to step into the player's cell.
    EnemyContact,
}

/// Reasons a bomb placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementRejection {
    /// The current wave is closed until all bombs and explosions resolve.
    WaveActive,
    /// Every bomb of the current wave has already been placed.
    NoBombsRemaining,
    /// A bomb already occupies the player's cell.
    CellOccupied,
    /// The player's cell is not an empty floor tile.
    TileBlocked,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the player committed a step between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after the step commits.
        to: CellCoord,
    },
    /// Reports that the player lost a life and respawned at the spawn cell.
    PlayerDamaged {
        /// Source of the damage.
        cause: DamageCause,
        /// Lives remaining after the hit.
        lives_remaining: Lives,
    },
    /// Confirms that a bomb was placed at the provided cell.
    BombPlaced {
        /// Cell now occupied by the bomb.
        cell: CellCoord,
    },
    /// Reports that a bomb placement request had no effect.
    BombRejected {
        /// Specific reason the placement failed.
        reason: PlacementRejection,
    },
    /// Announces that a bomb's fuse expired and its blast committed.
    BombDetonated {
        /// Cell the bomb occupied.
        origin: CellCoord,
        /// Every grid cell covered by the blast, origin included.
        cells: Vec<CellCoord>,
    },
    /// Confirms that a blast converted a crate tile to empty floor.
    CrateDestroyed {
        /// Cell that held the destroyed crate.
        cell: CellCoord,
    },
    /// Confirms that a blast removed an enemy.
    EnemySlain {
        /// Identifier of the removed enemy.
        enemy: EnemyId,
        /// Cell the enemy occupied when the blast hit.
        cell: CellCoord,
    },
    /// Confirms that an enemy fired a bullet.
    BulletFired {
        /// Identifier of the shooter.
        enemy: EnemyId,
        /// Muzzle position at the center of the shooter's cell.
        origin: WorldPoint,
        /// Direction the bullet travels in.
        direction: Direction,
    },
    /// Confirms that an enemy committed a step between two cells.
    EnemyAdvanced {
        /// Identifier of the enemy that advanced.
        enemy: EnemyId,
        /// Cell the enemy occupied before moving.
        from: CellCoord,
        /// Cell the enemy occupies after the step commits.
        to: CellCoord,
    },
    /// Announces that the bomb wave reopened for placement.
    WaveRecharged,
    /// Announces that the player ran out of lives and the simulation halted.
    GameOver {
        /// Final score at the moment of defeat.
        score: u32,
    },
    /// Announces that every enemy was cleared while the player lived.
    Victory {
        /// Score at the moment the last enemy fell.
        score: u32,
    },
    /// Confirms that the session was reset after a game over.
    GameRestarted,
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, Direction, Lives, TileKind};
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn grid_distance_is_euclidean() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 5);
        assert!((origin.grid_distance(destination) - 5.0).abs() < f32::EPSILON);
        assert!((destination.grid_distance(origin) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn step_refuses_to_leave_the_low_edge() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.step(Direction::North), None);
        assert_eq!(corner.step(Direction::West), None);
        assert_eq!(corner.step(Direction::East), Some(CellCoord::new(1, 0)));
        assert_eq!(corner.step(Direction::South), Some(CellCoord::new(0, 1)));
    }

    #[test]
    fn lives_saturate_at_zero() {
        let lives = Lives::new(1).decremented();
        assert!(lives.is_depleted());
        assert_eq!(lives.decremented(), Lives::new(0));
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        assert_round_trip(&CellCoord::new(7, 9));
    }

    #[test]
    fn tile_kind_round_trips_through_bincode() {
        assert_round_trip(&TileKind::Crate);
    }

    #[test]
    fn direction_round_trips_through_bincode() {
        assert_round_trip(&Direction::West);
    }
}
