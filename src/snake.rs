use std::collections::VecDeque;

use crate::grid::Position;

/// Heading of the snake. `None` until the first direction is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Velocity {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Velocity {
    /// Unit step in grid units, or `None` when not moving.
    pub fn delta(self) -> Option<(i32, i32)> {
        match self {
            Velocity::Up => Some((0, -1)),
            Velocity::Down => Some((0, 1)),
            Velocity::Left => Some((-1, 0)),
            Velocity::Right => Some((1, 0)),
            Velocity::None => None,
        }
    }

    pub fn opposite(self) -> Velocity {
        match self {
            Velocity::Up => Velocity::Down,
            Velocity::Down => Velocity::Up,
            Velocity::Left => Velocity::Right,
            Velocity::Right => Velocity::Left,
            Velocity::None => Velocity::None,
        }
    }

    pub fn is_moving(self) -> bool {
        self != Velocity::None
    }
}

/// Resolves a requested heading against the current one.
///
/// A 180-degree turn is refused regardless of snake length. Asking for
/// `None` never stops a moving snake.
pub fn apply_direction(requested: Velocity, current: Velocity) -> Velocity {
    match requested {
        Velocity::None => current,
        requested if current.is_moving() && requested == current.opposite() => current,
        requested => requested,
    }
}

/// Occupied cells, head first. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    cells: VecDeque<Position>,
}

impl Snake {
    /// A single-segment snake.
    pub fn new(head: Position) -> Self {
        Self {
            cells: VecDeque::from([head]),
        }
    }

    /// A snake with `head` followed by `body`, nearest segment first.
    pub fn with_body(head: Position, body: impl IntoIterator<Item = Position>) -> Self {
        let mut cells = VecDeque::from([head]);
        cells.extend(body);
        Self { cells }
    }

    pub fn head(&self) -> Position {
        self.cells[0]
    }

    /// Everything behind the head.
    pub fn body(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().skip(1).copied()
    }

    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().copied()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false, a snake keeps at least its head.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Moves the head to `new_head`; the old head becomes the first body
    /// segment. The tail stays until [`Snake::drop_tail`] is called.
    pub(crate) fn push_head(&mut self, new_head: Position) {
        self.cells.push_front(new_head);
    }

    /// Undoes [`Snake::push_head`].
    pub(crate) fn pop_head(&mut self) {
        if self.cells.len() > 1 {
            self.cells.pop_front();
        }
    }

    pub(crate) fn drop_tail(&mut self) {
        if self.cells.len() > 1 {
            self.cells.pop_back();
        }
    }
}
