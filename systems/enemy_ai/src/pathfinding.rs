//! Breadth-first grid search used by chasing enemies.

use std::collections::VecDeque;

use retro_bomber_core::{CellCoord, Direction};

const UNVISITED: u32 = u32::MAX;

/// Computes the first step of a shortest path from `origin` to `goal`.
///
/// The search expands neighbors in the fixed order north, east, south, west,
/// so ties between equally short paths resolve deterministically. Cells are
/// walkable exactly when `is_open` reports them so; `origin` itself is never
/// consulted. Returns `None` when `origin` equals `goal` or no path exists.
pub fn next_step_toward<F>(
    origin: CellCoord,
    goal: CellCoord,
    columns: u32,
    rows: u32,
    is_open: F,
) -> Option<Direction>
where
    F: Fn(CellCoord) -> bool,
{
    if origin == goal || columns == 0 || rows == 0 {
        return None;
    }
    if origin.column() >= columns || origin.row() >= rows {
        return None;
    }

    let node_count = usize::try_from(u64::from(columns) * u64::from(rows)).ok()?;
    let index_of = |cell: CellCoord| -> usize {
        (cell.row() as usize) * (columns as usize) + cell.column() as usize
    };

    // Parent links double as the visited set.
    let mut parents = vec![UNVISITED; node_count];
    let mut queue = VecDeque::new();

    let origin_index = index_of(origin);
    parents[origin_index] = origin_index as u32;
    queue.push_back(origin);

    while let Some(cell) = queue.pop_front() {
        for direction in Direction::CARDINAL {
            let Some(next) = cell.step(direction) else {
                continue;
            };
            if next.column() >= columns || next.row() >= rows {
                continue;
            }
            let next_index = index_of(next);
            if parents[next_index] != UNVISITED || !is_open(next) {
                continue;
            }
            parents[next_index] = index_of(cell) as u32;

            if next == goal {
                return Some(first_step(origin, next_index, &parents, columns));
            }
            queue.push_back(next);
        }
    }

    None
}

/// Walks parent links from the goal back to the cell adjacent to `origin`
/// and converts that step into a direction.
fn first_step(origin: CellCoord, goal_index: usize, parents: &[u32], columns: u32) -> Direction {
    let origin_index =
        (origin.row() as usize) * (columns as usize) + origin.column() as usize;
    let mut cursor = goal_index;
    while parents[cursor] as usize != origin_index {
        cursor = parents[cursor] as usize;
    }

    let column = (cursor % columns as usize) as u32;
    let row = (cursor / columns as usize) as u32;
    if row < origin.row() {
        Direction::North
    } else if column > origin.column() {
        Direction::East
    } else if row > origin.row() {
        Direction::South
    } else {
        Direction::West
    }
}
