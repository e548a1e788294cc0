use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Picks a cell not occupied by the snake, uniformly at random.
///
/// Returns `None` when the snake covers the whole board.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    free_cells(bounds, snake).choose(rng).copied()
}

/// Lists every in-bounds cell the snake does not cover, row by row.
#[must_use]
pub fn free_cells(bounds: GridSize, snake: &Snake) -> Vec<Position> {
    let mut candidates = Vec::with_capacity(bounds.total_cells().saturating_sub(snake.len()));

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !snake.occupies(position) {
                candidates.push(position);
            }
        }
    }

    candidates
}
