#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Retro Bomber adapters.
//!
//! Frontends depend on this crate instead of the world: the session builds a
//! [`Scene`] from world snapshots each frame, and a [`RenderingBackend`]
//! presents it however it likes. Nothing here touches simulation state.

use std::time::Duration;

use anyhow::Result as AnyResult;
use glam::Vec2;
use retro_bomber_core::{CellCoord, Direction, EnemyId, Event, Lives, TileKind};
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Movement direction currently held by the player, if any.
    pub direction: Option<Direction>,
    /// Whether the adapter detected a bomb placement press on this frame.
    pub place_bomb: bool,
    /// Whether the adapter detected a restart press on this frame.
    pub restart: bool,
}

/// Tile grid geometry and palette shared by every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGridPresentation {
    /// Number of tile columns in the arena.
    pub columns: u32,
    /// Number of tile rows in the arena.
    pub rows: u32,
    /// Side length of a square tile expressed in world units.
    pub tile_length: f32,
    /// Color used for walkable floor tiles.
    pub floor_color: Color,
    /// Color used for indestructible wall tiles.
    pub wall_color: Color,
    /// Color used for destructible crate tiles.
    pub crate_color: Color,
}

impl TileGridPresentation {
    /// Creates a new tile grid descriptor, validating the tile length.
    pub fn new(
        columns: u32,
        rows: u32,
        tile_length: f32,
        floor_color: Color,
        wall_color: Color,
        crate_color: Color,
    ) -> Result<Self, RenderingError> {
        if !(tile_length > 0.0) {
            return Err(RenderingError::InvalidTileLength { tile_length });
        }
        Ok(Self {
            columns,
            rows,
            tile_length,
            floor_color,
            wall_color,
            crate_color,
        })
    }

    /// Total width of the grid in world units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Total height of the grid in world units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }

    /// Center of the provided cell in world units.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(
            cell.column() as f32 * self.tile_length + self.tile_length / 2.0,
            cell.row() as f32 * self.tile_length + self.tile_length / 2.0,
        )
    }
}

/// Visible player state, positioned in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPresentation {
    /// Continuous position of the player sprite.
    pub position: Vec2,
    /// Fill color of the player sprite.
    pub color: Color,
}

/// Visible enemy state, positioned in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyPresentation {
    /// Identifier of the presented enemy.
    pub id: EnemyId,
    /// Continuous position of the enemy sprite.
    pub position: Vec2,
    /// Fill color of the enemy sprite.
    pub color: Color,
}

/// Visible bomb state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BombPresentation {
    /// Cell occupied by the bomb.
    pub cell: CellCoord,
    /// Fraction of the fuse still remaining, in the range 0.0..=1.0.
    pub fuse_fraction: f32,
}

/// Visible explosion state covering one or more cells.
#[derive(Clone, Debug, PartialEq)]
pub struct ExplosionPresentation {
    /// Every cell covered by the blast.
    pub cells: Vec<CellCoord>,
    /// Fraction of the display window still remaining, in the range 0.0..=1.0.
    pub intensity: f32,
}

/// Visible bullet state, positioned in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletPresentation {
    /// Continuous position of the bullet.
    pub position: Vec2,
}

/// Session banner displayed over the arena when the run has resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneBanner {
    /// Every enemy was cleared; the session continues.
    Victory,
    /// The player ran out of lives; a restart is required.
    GameOver,
}

/// Heads-up display channels drawn alongside the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudPresentation {
    /// Lives the player has left.
    pub lives: Lives,
    /// Accumulated score.
    pub score: u32,
    /// Bombs still available in the current wave.
    pub bombs_remaining: u32,
    /// Number of bombs a single wave may hold.
    pub max_bombs: u32,
    /// Blast radius applied to newly placed bombs.
    pub bomb_range: u32,
    /// Banner shown when the session has resolved.
    pub banner: Option<SceneBanner>,
}

/// Scene description combining the tile grid and its inhabitants.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Tile grid geometry and palette.
    pub tile_grid: TileGridPresentation,
    /// Tile classifications stored in row-major order.
    pub tiles: Vec<TileKind>,
    /// Player sprite.
    pub player: PlayerPresentation,
    /// Enemy sprites in deterministic order.
    pub enemies: Vec<EnemyPresentation>,
    /// Bombs currently waiting to detonate.
    pub bombs: Vec<BombPresentation>,
    /// Explosions currently alive.
    pub explosions: Vec<ExplosionPresentation>,
    /// Bullets currently in flight.
    pub bullets: Vec<BulletPresentation>,
    /// Heads-up display channels.
    pub hud: HudPresentation,
}

impl Scene {
    /// Total width of the scene in world units.
    #[must_use]
    pub fn total_width(&self) -> f32 {
        self.tile_grid.width()
    }

    /// Total height of the scene in world units.
    #[must_use]
    pub fn total_height(&self) -> f32 {
        self.tile_grid.height()
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Discrete audio cues a backend may fire alongside the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// A bomb was placed on the arena.
    BombPlaced,
    /// A bomb detonated.
    Explosion,
    /// An enemy fired a bullet.
    Shot,
    /// The player lost a life.
    LifeLost,
    /// An enemy was removed by a blast.
    EnemyKilled,
}

/// Derives the audio cues implied by a frame's event log.
///
/// Cues are fire-and-forget and preserve event order, so a frame with two
/// detonations yields two [`SoundCue::Explosion`] entries.
#[must_use]
pub fn sound_cues(events: &[Event]) -> Vec<SoundCue> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::BombPlaced { .. } => Some(SoundCue::BombPlaced),
            Event::BombDetonated { .. } => Some(SoundCue::Explosion),
            Event::BulletFired { .. } => Some(SoundCue::Shot),
            Event::PlayerDamaged { .. } => Some(SoundCue::LifeLost),
            Event::EnemySlain { .. } => Some(SoundCue::EnemyKilled),
            _ => None,
        })
        .collect()
}

/// Rendering backend capable of presenting Retro Bomber scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame
    /// delta and the per-frame input captured by the adapter, and may mutate
    /// the scene before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, Error, PartialEq)]
pub enum RenderingError {
    /// Tile length must be positive to avoid a zero-sized arena.
    #[error("tile_length must be positive (received {tile_length})")]
    InvalidTileLength {
        /// Provided tile length that failed validation.
        tile_length: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> (Color, Color, Color) {
        (
            Color::from_rgb_u8(24, 24, 32),
            Color::from_rgb_u8(96, 96, 112),
            Color::from_rgb_u8(168, 120, 64),
        )
    }

    #[test]
    fn tile_grid_creation_accepts_positive_tile_length() {
        let (floor, wall, crates) = palette();
        let grid = TileGridPresentation::new(13, 11, 48.0, floor, wall, crates)
            .expect("positive tile_length should succeed");

        assert_eq!(grid.width(), 13.0 * 48.0);
        assert_eq!(grid.height(), 11.0 * 48.0);
    }

    #[test]
    fn tile_grid_creation_rejects_zero_tile_length_without_panicking() {
        let (floor, wall, crates) = palette();
        let error = TileGridPresentation::new(13, 11, 0.0, floor, wall, crates)
            .expect_err("zero tile_length must be rejected");

        assert!(matches!(
            error,
            RenderingError::InvalidTileLength { .. }
        ));
    }

    #[test]
    fn cell_centers_land_midway_through_tiles() {
        let (floor, wall, crates) = palette();
        let grid = TileGridPresentation::new(13, 11, 48.0, floor, wall, crates)
            .expect("valid grid");

        assert_eq!(grid.cell_center(CellCoord::new(0, 0)), Vec2::new(24.0, 24.0));
        assert_eq!(grid.cell_center(CellCoord::new(2, 1)), Vec2::new(120.0, 72.0));
    }

    #[test]
    fn sound_cues_preserve_event_order_and_multiplicity() {
        let origin = CellCoord::new(3, 3);
        let events = vec![
            Event::TimeAdvanced {
                dt: std::time::Duration::from_millis(16),
            },
            Event::BombDetonated {
                origin,
                cells: vec![origin],
            },
            Event::EnemySlain {
                enemy: EnemyId::new(0),
                cell: origin,
            },
            Event::BombDetonated {
                origin,
                cells: vec![origin],
            },
        ];

        assert_eq!(
            sound_cues(&events),
            vec![
                SoundCue::Explosion,
                SoundCue::EnemyKilled,
                SoundCue::Explosion,
            ]
        );
    }

    #[test]
    fn lighten_moves_channels_toward_white() {
        let color = Color::from_rgb_u8(100, 40, 200).lighten(0.5);
        assert!(color.red > 100.0 / 255.0);
        assert!(color.green > 40.0 / 255.0);
        assert!(color.blue > 200.0 / 255.0);
        assert_eq!(color.alpha, 1.0);
    }
}
