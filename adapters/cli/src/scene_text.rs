use retro_bomber_core::{CellCoord, TileKind};
use retro_bomber_rendering::{Scene, SceneBanner};

const FLOOR_GLYPH: char = '.';
const WALL_GLYPH: char = '#';
const CRATE_GLYPH: char = '%';
const BOMB_GLYPH: char = 'o';
const EXPLOSION_GLYPH: char = '*';
const BULLET_GLYPH: char = '!';
const ENEMY_GLYPH: char = 'E';
const PLAYER_GLYPH: char = 'P';

/// Renders the scene as an ASCII arena followed by a HUD line.
///
/// Later layers overwrite earlier ones, so the player glyph always wins the
/// cell it occupies.
pub(crate) fn render(scene: &Scene) -> String {
    let columns = scene.tile_grid.columns as usize;
    let rows = scene.tile_grid.rows as usize;
    let mut glyphs = vec![vec![FLOOR_GLYPH; columns]; rows];

    for (index, tile) in scene.tiles.iter().enumerate().take(columns * rows) {
        let glyph = match tile {
            TileKind::Empty => FLOOR_GLYPH,
            TileKind::Wall => WALL_GLYPH,
            TileKind::Crate => CRATE_GLYPH,
        };
        glyphs[index / columns][index % columns] = glyph;
    }

    for explosion in &scene.explosions {
        for &cell in &explosion.cells {
            plot_cell(&mut glyphs, cell, EXPLOSION_GLYPH);
        }
    }
    for bomb in &scene.bombs {
        plot_cell(&mut glyphs, bomb.cell, BOMB_GLYPH);
    }
    for bullet in &scene.bullets {
        plot_world(scene, &mut glyphs, bullet.position.x, bullet.position.y, BULLET_GLYPH);
    }
    for enemy in &scene.enemies {
        plot_world(scene, &mut glyphs, enemy.position.x, enemy.position.y, ENEMY_GLYPH);
    }
    plot_world(
        scene,
        &mut glyphs,
        scene.player.position.x,
        scene.player.position.y,
        PLAYER_GLYPH,
    );

    let mut output = String::new();
    for row in &glyphs {
        output.extend(row.iter());
        output.push('\n');
    }
    output.push_str(&hud_line(scene));
    output
}

fn hud_line(scene: &Scene) -> String {
    let hud = &scene.hud;
    let mut line = format!(
        "score {}  lives {}  bombs {}/{}  range {}",
        hud.score,
        hud.lives.get(),
        hud.bombs_remaining,
        hud.max_bombs,
        hud.bomb_range
    );
    match hud.banner {
        Some(SceneBanner::Victory) => line.push_str("  VICTORY"),
        Some(SceneBanner::GameOver) => line.push_str("  GAME OVER"),
        None => {}
    }
    line
}

fn plot_cell(glyphs: &mut [Vec<char>], cell: CellCoord, glyph: char) {
    let row = cell.row() as usize;
    let column = cell.column() as usize;
    if let Some(slots) = glyphs.get_mut(row) {
        if let Some(slot) = slots.get_mut(column) {
            *slot = glyph;
        }
    }
}

fn plot_world(scene: &Scene, glyphs: &mut [Vec<char>], x: f32, y: f32, glyph: char) {
    if x < 0.0 || y < 0.0 {
        return;
    }
    let cell = CellCoord::new(
        (x / scene.tile_grid.tile_length) as u32,
        (y / scene.tile_grid.tile_length) as u32,
    );
    plot_cell(glyphs, cell, glyph);
}
