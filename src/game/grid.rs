use super::direction::Direction;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// The smallest permitted width or height of a grid, in cells
pub(crate) const MIN_GRID_SIDE: u16 = 3;

/// A single cell of the grid, as a column & row counted from the top-left
/// corner
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Cell {
    pub(crate) x: u16,
    pub(crate) y: u16,
}

impl Cell {
    pub(crate) const fn new(x: u16, y: u16) -> Cell {
        Cell { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// What happens when the snake moves off the edge of the grid
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum EdgeMode {
    /// Leaving one edge re-enters at the opposite edge
    #[default]
    Wrap,

    /// Leaving the grid ends the current run
    Solid,
}

/// The discrete coordinate space that the snake & food live in
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    width: u16,
    height: u16,
    edges: EdgeMode,
}

impl Grid {
    /// Create a grid of `width` × `height` cells.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either side is shorter than [`MIN_GRID_SIDE`].
    pub(crate) fn new(width: u16, height: u16, edges: EdgeMode) -> Result<Grid, GridError> {
        if width < MIN_GRID_SIDE || height < MIN_GRID_SIDE {
            return Err(GridError::TooSmall { width, height });
        }
        Ok(Grid {
            width,
            height,
            edges,
        })
    }

    pub(crate) fn width(self) -> u16 {
        self.width
    }

    pub(crate) fn height(self) -> u16 {
        self.height
    }

    pub(crate) fn edges(self) -> EdgeMode {
        self.edges
    }

    /// Total number of cells in the grid
    #[cfg(test)]
    pub(crate) fn area(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// The cell at which a new snake is placed
    pub(crate) fn center(self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    #[cfg(test)]
    pub(crate) fn contains(self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Reduce an arbitrary coordinate pair onto the torus formed by the grid
    pub(crate) fn wrap(self, x: i32, y: i32) -> Cell {
        Cell::new(reduce(x, self.width), reduce(y, self.height))
    }

    /// Return the cell one step from `cell` in direction `dir`.  With solid
    /// edges, `None` is returned if the step would leave the grid.
    pub(crate) fn step(self, cell: Cell, dir: Direction) -> Option<Cell> {
        let (dx, dy) = dir.delta();
        let x = i32::from(cell.x) + dx;
        let y = i32::from(cell.y) + dy;
        match self.edges {
            EdgeMode::Wrap => Some(self.wrap(x, y)),
            EdgeMode::Solid => {
                let x = u16::try_from(x).ok().filter(|&x| x < self.width)?;
                let y = u16::try_from(y).ok().filter(|&y| y < self.height)?;
                Some(Cell::new(x, y))
            }
        }
    }

    /// Iterate over every cell in the grid in row-major order
    pub(crate) fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
    }
}

fn reduce(value: i32, modulus: u16) -> u16 {
    u16::try_from(value.rem_euclid(i32::from(modulus)))
        .expect("value reduced modulo a u16 should fit in a u16")
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum GridError {
    #[error("grid of {width}x{height} cells is too small; each side must be at least {MIN_GRID_SIDE}")]
    TooSmall { width: u16, height: u16 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn grid(edges: EdgeMode) -> Grid {
        Grid::new(10, 15, edges).expect("10x15 grid should be valid")
    }

    #[rstest]
    #[case(2, 7, Cell::new(2, 7))]
    #[case(10, 7, Cell::new(0, 7))]
    #[case(-1, 7, Cell::new(9, 7))]
    #[case(2, -1, Cell::new(2, 14))]
    #[case(2, 15, Cell::new(2, 0))]
    #[case(-11, 31, Cell::new(9, 1))]
    fn test_wrap(#[case] x: i32, #[case] y: i32, #[case] cell: Cell) {
        assert_eq!(grid(EdgeMode::Wrap).wrap(x, y), cell);
    }

    #[rstest]
    #[case(Direction::Up, Cell::new(2, 7), EdgeMode::Solid, Some(Cell::new(2, 6)))]
    #[case(Direction::Down, Cell::new(2, 7), EdgeMode::Solid, Some(Cell::new(2, 8)))]
    #[case(Direction::Right, Cell::new(2, 7), EdgeMode::Solid, Some(Cell::new(3, 7)))]
    #[case(Direction::Left, Cell::new(2, 7), EdgeMode::Solid, Some(Cell::new(1, 7)))]
    #[case(Direction::Up, Cell::new(2, 0), EdgeMode::Solid, None)]
    #[case(Direction::Up, Cell::new(2, 0), EdgeMode::Wrap, Some(Cell::new(2, 14)))]
    #[case(Direction::Down, Cell::new(2, 14), EdgeMode::Solid, None)]
    #[case(Direction::Down, Cell::new(2, 14), EdgeMode::Wrap, Some(Cell::new(2, 0)))]
    #[case(Direction::Right, Cell::new(9, 7), EdgeMode::Solid, None)]
    #[case(Direction::Right, Cell::new(9, 7), EdgeMode::Wrap, Some(Cell::new(0, 7)))]
    #[case(Direction::Left, Cell::new(0, 7), EdgeMode::Solid, None)]
    #[case(Direction::Left, Cell::new(0, 7), EdgeMode::Wrap, Some(Cell::new(9, 7)))]
    fn test_step(
        #[case] dir: Direction,
        #[case] cell: Cell,
        #[case] edges: EdgeMode,
        #[case] r: Option<Cell>,
    ) {
        assert_eq!(grid(edges).step(cell, dir), r);
    }

    #[test]
    fn wrapped_steps_stay_in_bounds() {
        let g = grid(EdgeMode::Wrap);
        for cell in g.cells() {
            for dir in Direction::iter() {
                let next = g.step(cell, dir);
                assert!(
                    next.is_some_and(|c| g.contains(c)),
                    "stepping {dir:?} from {cell} left the grid: {next:?}"
                );
            }
        }
    }

    #[test]
    fn cells_cover_grid() {
        let g = grid(EdgeMode::Wrap);
        let cells = g.cells().collect::<Vec<_>>();
        assert_eq!(cells.len(), g.area());
        assert_eq!(cells.first(), Some(&Cell::new(0, 0)));
        assert_eq!(cells.get(10), Some(&Cell::new(0, 1)));
        assert_eq!(cells.last(), Some(&Cell::new(9, 14)));
    }

    #[test]
    fn center() {
        let g = Grid::new(32, 24, EdgeMode::Wrap).expect("32x24 grid should be valid");
        assert_eq!(g.center(), Cell::new(16, 12));
    }

    #[rstest]
    #[case(2, 10)]
    #[case(10, 2)]
    #[case(0, 0)]
    fn too_small(#[case] width: u16, #[case] height: u16) {
        assert_eq!(
            Grid::new(width, height, EdgeMode::Wrap),
            Err(GridError::TooSmall { width, height })
        );
    }

    #[test]
    fn smallest_allowed() {
        assert!(Grid::new(MIN_GRID_SIDE, MIN_GRID_SIDE, EdgeMode::Solid).is_ok());
    }
}
