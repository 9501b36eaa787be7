use std::ops::Add;

use crate::config::{GLYPH_BODY, GLYPH_HEAD, GridSize, INITIAL_HEAD, INITIAL_LENGTH};

/// Cell coordinate relative to the window's top-left corner.
///
/// Also used as a velocity: directions are unit positions added to the head.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Add for Position {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Position {
    /// Returns true when the position lies in the playable interior.
    #[must_use]
    pub fn is_inside_interior(self, bounds: GridSize) -> bool {
        (1..=bounds.max_x()).contains(&self.x) && (1..=bounds.max_y()).contains(&self.y)
    }

    /// Returns this position wrapped back into the interior.
    ///
    /// Reaching the frame column or row on one side re-enters at the first
    /// interior cell on the opposite side.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: wrap_axis(self.x, bounds.max_x()),
            y: wrap_axis(self.y, bounds.max_y()),
        }
    }
}

fn wrap_axis(value: i32, last_interior: i32) -> i32 {
    if value > last_interior {
        1
    } else if value < 1 {
        last_interior
    } else {
        value
    }
}

/// One occupied cell of the body and the glyph it is drawn with.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Segment {
    pub position: Position,
    pub glyph: char,
}

/// Ordered body of the snake.
///
/// Index 0 is always the head and the last index is always the tail. The
/// body is never empty: every constructor creates at least the head and no
/// operation removes segments.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    segments: Vec<Segment>,
}

impl Snake {
    /// Creates the three-segment body a restart begins with, heading right.
    #[must_use]
    pub fn initial() -> Self {
        let (x, y) = INITIAL_HEAD;
        Self::from_positions((0..INITIAL_LENGTH).map(|i| Position { x: x - i, y }).collect())
    }

    /// Creates a snake from explicit positions (first is head).
    ///
    /// # Panics
    ///
    /// Panics when `positions` is empty.
    #[must_use]
    pub fn from_positions(positions: Vec<Position>) -> Self {
        assert!(!positions.is_empty(), "snake body needs at least a head");

        let segments = positions
            .into_iter()
            .enumerate()
            .map(|(index, position)| Segment {
                position,
                glyph: if index == 0 { GLYPH_HEAD } else { GLYPH_BODY },
            })
            .collect();

        Self { segments }
    }

    /// Moves every segment onto its predecessor's cell, then steps the head
    /// by `velocity` and wraps it into the interior.
    pub fn advance(&mut self, velocity: Position, bounds: GridSize) {
        // Walk tail to head so each segment reads its predecessor before it moves.
        for index in (1..self.segments.len()).rev() {
            self.segments[index].position = self.segments[index - 1].position;
        }

        let head = &mut self.segments[0].position;
        *head = (*head + velocity).wrapped(bounds);
    }

    /// Appends a tail segment on the head's current cell.
    ///
    /// The new segment separates from the head on the next [`Snake::advance`].
    pub fn grow(&mut self) {
        self.segments.push(Segment {
            position: self.head(),
            glyph: GLYPH_BODY,
        });
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.segments[0].position
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.segments.iter().any(|segment| segment.position == position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.segments[1..]
            .iter()
            .any(|segment| segment.position == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Segment> {
        self.segments.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{GLYPH_BODY, GLYPH_HEAD, GridSize};
    use crate::input::Direction;

    use super::{Position, Snake};

    const BOARD: GridSize = GridSize {
        width: 10,
        height: 10,
    };

    fn positions(snake: &Snake) -> Vec<(i32, i32)> {
        snake
            .segments()
            .map(|segment| (segment.position.x, segment.position.y))
            .collect()
    }

    #[test]
    fn wrapping_skips_the_frame() {
        assert_eq!(Position { x: 9, y: 4 }.wrapped(BOARD), Position { x: 1, y: 4 });
        assert_eq!(Position { x: 0, y: 4 }.wrapped(BOARD), Position { x: 8, y: 4 });
        assert_eq!(Position { x: 3, y: 9 }.wrapped(BOARD), Position { x: 3, y: 1 });
        assert_eq!(Position { x: 3, y: 0 }.wrapped(BOARD), Position { x: 3, y: 8 });
        assert_eq!(Position { x: 3, y: 5 }.wrapped(BOARD), Position { x: 3, y: 5 });
    }

    #[test]
    fn interior_check_excludes_frame_cells() {
        assert!(Position { x: 1, y: 1 }.is_inside_interior(BOARD));
        assert!(Position { x: 8, y: 8 }.is_inside_interior(BOARD));
        assert!(!Position { x: 0, y: 4 }.is_inside_interior(BOARD));
        assert!(!Position { x: 4, y: 9 }.is_inside_interior(BOARD));
    }

    #[test]
    fn initial_snake_has_head_glyph_first() {
        let snake = Snake::initial();

        assert_eq!(positions(&snake), vec![(5, 2), (4, 2), (3, 2)]);
        let glyphs: Vec<char> = snake.segments().map(|segment| segment.glyph).collect();
        assert_eq!(glyphs, vec![GLYPH_HEAD, GLYPH_BODY, GLYPH_BODY]);
    }

    #[test]
    fn advance_shifts_body_onto_predecessors() {
        let mut snake = Snake::initial();

        snake.advance(Direction::Right.velocity(), BOARD);

        assert_eq!(positions(&snake), vec![(6, 2), (5, 2), (4, 2)]);
    }

    #[test]
    fn advance_wraps_head_across_the_frame() {
        let mut snake =
            Snake::from_positions(vec![Position { x: 8, y: 3 }, Position { x: 7, y: 3 }]);

        snake.advance(Direction::Right.velocity(), BOARD);

        assert_eq!(positions(&snake), vec![(1, 3), (8, 3)]);
    }

    #[test]
    fn growth_stacks_tail_on_head_until_next_advance() {
        let mut snake = Snake::initial();

        snake.grow();
        assert_eq!(snake.len(), 4);
        assert!(snake.head_overlaps_body());

        snake.advance(Direction::Down.velocity(), BOARD);
        assert_eq!(positions(&snake), vec![(5, 3), (5, 2), (4, 2), (3, 2)]);
        assert!(!snake.head_overlaps_body());
    }

    #[test]
    fn head_overlap_detects_self_collision() {
        let snake = Snake::from_positions(vec![
            Position { x: 2, y: 2 },
            Position { x: 3, y: 2 },
            Position { x: 3, y: 3 },
            Position { x: 2, y: 2 },
        ]);

        assert!(snake.head_overlaps_body());
        assert!(!Snake::initial().head_overlaps_body());
    }
}
