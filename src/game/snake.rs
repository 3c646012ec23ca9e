use super::direction::Direction;
use super::grid::{Cell, Grid};
use std::collections::VecDeque;

/// The snake: a chain of cells that moves one step per tick
///
/// The body always holds at least one cell, with the head at the front.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The cells occupied by the snake, head first
    pub(super) body: VecDeque<Cell>,

    /// The length that the body is restored to after each move
    pub(super) target_len: usize,

    /// The direction in which the snake is currently moving
    pub(super) direction: Direction,

    /// A requested change of direction that will take effect on the next
    /// call to [`Snake::commit_direction()`]
    pub(super) pending: Option<Direction>,

    /// The cell that the snake starts from after a reset
    home: Cell,
}

impl Snake {
    /// Create a new snake of length 1 at `home`, facing right
    pub(crate) fn new(home: Cell) -> Snake {
        Snake {
            body: VecDeque::from([home]),
            target_len: 1,
            direction: Direction::Right,
            pending: None,
            home,
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Cell {
        *self.body.front().expect("snake body should never be empty")
    }

    /// Return the cells occupied by the snake, head first
    pub(crate) fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    pub(crate) fn target_len(&self) -> usize {
        self.target_len
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    #[cfg(test)]
    pub(crate) fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    /// Request a change of direction.  Requests to turn back the way the
    /// snake is currently moving are ignored.
    pub(crate) fn buffer_direction(&mut self, requested: Direction) {
        if !requested.is_opposite(self.direction) {
            self.pending = Some(requested);
        }
    }

    /// Apply the pending change of direction, if any
    pub(crate) fn commit_direction(&mut self) {
        if let Some(d) = self.pending.take() {
            self.direction = d;
        }
    }

    /// Push a new head one cell forwards in the current direction and return
    /// it.  The tail is left in place; call [`Snake::grow_and_truncate()`]
    /// afterwards to settle the length.
    ///
    /// Returns `None` without moving if the snake would leave a grid with
    /// solid edges.
    pub(crate) fn advance(&mut self, grid: Grid) -> Option<Cell> {
        let head = grid.step(self.head(), self.direction)?;
        self.body.push_front(head);
        Some(head)
    }

    /// Settle the length of the body after a call to [`Snake::advance()`].
    /// If `ate_food` is true, the target length grows by one to match the
    /// new body; otherwise, the tail is removed and returned.
    pub(crate) fn grow_and_truncate(&mut self, ate_food: bool) -> Option<Cell> {
        if ate_food {
            self.target_len += 1;
            None
        } else {
            let mut removed = None;
            while self.body.len() > self.target_len {
                removed = self.body.pop_back();
            }
            removed
        }
    }

    /// Return true if the head occupies the same cell as any other segment
    pub(crate) fn collides_with_self(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&c| c == head)
    }

    /// Shrink back to a single cell at the home position, facing right
    pub(crate) fn reset(&mut self) {
        self.target_len = 1;
        self.body = VecDeque::from([self.home]);
        self.direction = Direction::Right;
        self.pending = None;
    }
}
