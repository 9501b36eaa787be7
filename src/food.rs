use rand::Rng;
use tracing::trace;

use crate::config::{GLYPH_FOOD, GridSize};
use crate::snake::{Position, Snake};

/// Random draws tried per interior cell before falling back to enumeration.
const SAMPLES_PER_CELL: u32 = 4;

/// The single food item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
    pub glyph: char,
}

impl Food {
    /// Creates food at `position`.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            position,
            glyph: GLYPH_FOOD,
        }
    }

    /// Spawns food on a random free interior cell, or `None` when the
    /// interior is fully occupied.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Option<Self> {
        spawn_position(rng, bounds, snake).map(Self::new)
    }
}

/// Picks an interior cell not occupied by the snake.
///
/// Draws uniformly random interior cells until one is free. On crowded boards
/// the draws are capped and the remaining free cells are enumerated instead,
/// so the call always terminates.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    let cells = bounds.interior_cells();
    if cells == 0 {
        return None;
    }

    for _ in 0..cells.saturating_mul(SAMPLES_PER_CELL) {
        let candidate = Position {
            x: rng.gen_range(1..=bounds.max_x()),
            y: rng.gen_range(1..=bounds.max_y()),
        };
        if !snake.occupies(candidate) {
            trace!(x = candidate.x, y = candidate.y, "food placed");
            return Some(candidate);
        }
    }

    let candidates: Vec<Position> = (1..=bounds.max_y())
        .flat_map(|y| (1..=bounds.max_x()).map(move |x| Position { x, y }))
        .filter(|position| !snake.occupies(*position))
        .collect();

    if candidates.is_empty() {
        trace!("no free interior cell for food");
        return None;
    }

    Some(candidates[rng.gen_range(0..candidates.len())])
}
