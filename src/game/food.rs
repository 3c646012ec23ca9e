use super::grid::{Cell, Grid};
use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use std::collections::HashSet;
use thiserror::Error;

/// The single piece of food on the grid
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Food {
    pub(super) position: Cell,
}

impl Food {
    /// Place a new piece of food on `grid` at a random cell not in `avoid`
    pub(crate) fn place<R: Rng>(
        rng: &mut R,
        grid: Grid,
        avoid: &HashSet<Cell>,
    ) -> Result<Food, PlacementError> {
        let mut food = Food {
            position: Cell::default(),
        };
        food.relocate(rng, grid, avoid)?;
        Ok(food)
    }

    pub(crate) fn position(&self) -> Cell {
        self.position
    }

    /// Move the food to a uniformly random cell of `grid` that is not in
    /// `avoid`, and return the new position.
    ///
    /// Cells are sampled at random up to
    /// [`MAX_PLACEMENT_ATTEMPTS`][consts::MAX_PLACEMENT_ATTEMPTS] times; after
    /// that, the position is chosen directly from the remaining free cells.
    ///
    /// # Errors
    ///
    /// Returns `Err` if every cell of the grid is in `avoid`.  The food's
    /// position is left unchanged in that case.
    pub(crate) fn relocate<R: Rng>(
        &mut self,
        rng: &mut R,
        grid: Grid,
        avoid: &HashSet<Cell>,
    ) -> Result<Cell, PlacementError> {
        for _ in 0..consts::MAX_PLACEMENT_ATTEMPTS {
            let cell = Cell::new(
                rng.random_range(0..grid.width()),
                rng.random_range(0..grid.height()),
            );
            if !avoid.contains(&cell) {
                self.position = cell;
                return Ok(cell);
            }
        }
        log::debug!(
            "Random food placement failed {} times; choosing among free cells",
            consts::MAX_PLACEMENT_ATTEMPTS
        );
        let cell = grid
            .cells()
            .filter(|c| !avoid.contains(c))
            .choose(rng)
            .ok_or(PlacementError::NoFreeCells {
                width: grid.width(),
                height: grid.height(),
            })?;
        self.position = cell;
        Ok(cell)
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum PlacementError {
    #[error("no free cell left for food on {width}x{height} grid")]
    NoFreeCells { width: u16, height: u16 },
}
