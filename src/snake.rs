use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one step along `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snake body plus the committed and pending headings.
///
/// `direction` is the heading of the last completed move. `pending_direction`
/// is what the next move will use; reversal checks always compare against
/// `direction`, so several requests within one tick cannot fold the head back
/// onto the neck.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending_direction: Direction,
}

impl Snake {
    /// Creates a straight snake of `length` cells whose head is at `head`,
    /// with the rest of the body trailing behind it.
    #[must_use]
    pub fn new(head: Position, direction: Direction, length: u16) -> Self {
        let behind = direction.opposite();
        let mut body = VecDeque::with_capacity(usize::from(length.max(1)));
        let mut cell = head;
        body.push_back(cell);
        for _ in 1..length {
            cell = cell.stepped(behind);
            body.push_back(cell);
        }

        Self {
            body,
            direction,
            pending_direction: direction,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Returns `None` for an empty segment list.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        Some(Self {
            body: VecDeque::from(segments),
            direction,
            pending_direction: direction,
        })
    }

    /// Queues `direction` for the next move.
    ///
    /// A direct reversal of the committed heading is ignored unless the snake
    /// is a single cell, which has no neck to run into.
    pub fn request_direction(&mut self, direction: Direction) {
        if direction == self.direction.opposite() && self.body.len() > 1 {
            return;
        }
        self.pending_direction = direction;
    }

    /// Makes the pending heading the active one.
    pub fn commit_direction(&mut self) {
        self.direction = self.pending_direction;
    }

    /// Returns the head position for a move along the pending heading.
    #[must_use]
    pub fn next_head_position(&self) -> Position {
        self.head().stepped(self.pending_direction)
    }

    /// Returns true if `cell` is occupied by any segment except the tail.
    ///
    /// The tail vacates on a normal move, so it is not a collision target.
    #[must_use]
    pub fn occupies_except_tail(&self, cell: Position) -> bool {
        let keep = self.body.len().saturating_sub(1);
        self.body.iter().take(keep).any(|segment| *segment == cell)
    }

    /// Pushes `new_head` and drops the tail unless `grow` is set.
    pub fn advance_to(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake has at least one segment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the heading used by the most recent move.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the heading the next move will use.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Position, Snake};

    #[test]
    fn new_snake_trails_behind_its_head() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 4);

        let cells: Vec<Position> = snake.segments().copied().collect();
        assert_eq!(
            cells,
            vec![
                Position::new(5, 5),
                Position::new(4, 5),
                Position::new(3, 5),
                Position::new(2, 5),
            ]
        );
        assert_eq!(snake.tail(), Position::new(2, 5));
    }

    #[test]
    fn from_segments_rejects_empty_body() {
        assert!(Snake::from_segments(Vec::new(), Direction::Up).is_none());
    }

    #[test]
    fn bounds_check_covers_all_edges() {
        let bounds = GridSize::new(4, 3);

        assert!(Position::new(0, 0).is_within_bounds(bounds));
        assert!(Position::new(3, 2).is_within_bounds(bounds));
        assert!(!Position::new(4, 0).is_within_bounds(bounds));
        assert!(!Position::new(0, 3).is_within_bounds(bounds));
        assert!(!Position::new(-1, 0).is_within_bounds(bounds));
        assert!(!Position::new(0, -1).is_within_bounds(bounds));
    }

    #[test]
    fn advance_without_growth_keeps_length() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        let next = snake.next_head_position();
        snake.advance_to(next, false);

        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.tail(), Position::new(4, 5));
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn advance_with_growth_keeps_previous_tail() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        let next = snake.next_head_position();
        snake.advance_to(next, true);

        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Position::new(3, 5));
    }

    #[test]
    fn reversal_is_rejected_for_long_snake() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Up, 2);

        snake.request_direction(Direction::Down);

        assert_eq!(snake.pending_direction(), Direction::Up);
    }

    #[test]
    fn reversal_is_allowed_for_single_cell() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Up, 1);

        snake.request_direction(Direction::Down);
        snake.commit_direction();

        assert_eq!(snake.direction(), Direction::Down);
        assert_eq!(snake.next_head_position(), Position::new(5, 6));
    }

    #[test]
    fn latest_request_wins_before_commit() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 4);

        snake.request_direction(Direction::Up);
        snake.request_direction(Direction::Down);

        assert_eq!(snake.pending_direction(), Direction::Down);
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn reversal_check_uses_committed_heading() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 4);

        // Up is queued, but Left is still the reverse of the committed Right.
        snake.request_direction(Direction::Up);
        snake.request_direction(Direction::Left);

        assert_eq!(snake.pending_direction(), Direction::Up);
    }

    #[test]
    fn tail_is_not_a_collision_target() {
        let snake = Snake::from_segments(
            vec![
                Position::new(1, 1),
                Position::new(2, 1),
                Position::new(2, 2),
                Position::new(1, 2),
            ],
            Direction::Down,
        )
        .expect("segments are non-empty");

        assert!(!snake.occupies_except_tail(Position::new(1, 2)));
        assert!(snake.occupies_except_tail(Position::new(2, 2)));
        assert!(snake.occupies(Position::new(1, 2)));
    }
}
