use crate::grid::Grid;
use crate::snake::Snake;

/// What the head ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfHit,
}

/// Checks the head of `snake` against the grid edges, then against its own
/// body. Walls win when both apply.
pub fn detect(snake: &Snake, grid: &Grid) -> Option<Collision> {
    let head = snake.head();

    if !grid.contains(head) {
        return Some(Collision::Wall);
    }

    if snake.body().any(|segment| segment == head) {
        return Some(Collision::SelfHit);
    }

    None
}
