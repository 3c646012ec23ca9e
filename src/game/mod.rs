mod direction;
mod food;
mod grid;
mod snake;
pub(crate) use self::direction::Direction;
use self::food::Food;
pub(crate) use self::food::PlacementError;
pub(crate) use self::grid::{Cell, EdgeMode, Grid, GridError};
use self::snake::Snake;
use rand::Rng;
use std::collections::{HashSet, VecDeque};
use std::fmt;
use thiserror::Error;

/// The game state machine: one snake and one piece of food on a grid,
/// advanced one tick at a time
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GameLoop<R = rand::rngs::StdRng> {
    rng: R,
    grid: Grid,
    snake: Snake,
    food: Food,
    /// Best score reached so far in this session
    best: usize,
    /// Number of the current run, starting from 1
    run: u32,
}

impl<R: Rng> GameLoop<R> {
    /// Start a new game on `grid` with the snake at the center
    ///
    /// # Errors
    ///
    /// Returns `Err` if the food cannot be placed.
    pub(crate) fn new(grid: Grid, mut rng: R) -> Result<GameLoop<R>, GameError> {
        let snake = Snake::new(grid.center());
        let food = Food::place(&mut rng, grid, &occupied(&snake))?;
        log::debug!(
            "New game on {}x{} grid ({:?} edges); food at {}",
            grid.width(),
            grid.height(),
            grid.edges(),
            food.position()
        );
        Ok(GameLoop {
            rng,
            grid,
            snake,
            food,
            best: 0,
            run: 1,
        })
    }

    /// Advance the game by one tick, first applying `input` as a requested
    /// change of direction.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the snake ate the food and there was nowhere left to
    /// place a new piece.  This is fatal.
    pub(crate) fn tick(&mut self, input: Option<Direction>) -> Result<TickOutcome, GameError> {
        if let Some(d) = input {
            self.snake.buffer_direction(d);
        }
        self.snake.commit_direction();
        let Some(head) = self.snake.advance(self.grid) else {
            self.end_run(ResetCause::Wall);
            return Ok(TickOutcome {
                ate_food: false,
                reset: Some(ResetCause::Wall),
            });
        };
        let ate_food = head == self.food.position();
        let _ = self.snake.grow_and_truncate(ate_food);
        if ate_food {
            self.best = self.best.max(self.score());
            let cell = self.food.relocate(&mut self.rng, self.grid, &occupied(&self.snake))?;
            log::debug!(
                "Snake ate food at {head}; length now {}; food moved to {cell}",
                self.snake.target_len()
            );
        }
        let reset = if self.snake.collides_with_self() {
            self.end_run(ResetCause::SelfCollision);
            Some(ResetCause::SelfCollision)
        } else {
            None
        };
        debug_assert_eq!(
            self.snake.len(),
            self.snake.target_len(),
            "snake body should match its target length after a tick"
        );
        Ok(TickOutcome { ate_food, reset })
    }
}

impl<R> GameLoop<R> {
    pub(crate) fn grid(&self) -> Grid {
        self.grid
    }

    /// Return the current score: the number of pieces of food eaten during
    /// the current run
    pub(crate) fn score(&self) -> usize {
        self.snake.target_len() - 1
    }

    /// Return everything needed to draw the current frame
    pub(crate) fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            body: self.snake.body(),
            food: self.food.position(),
            direction: self.snake.direction(),
            score: self.score(),
            best: self.best,
            run: self.run,
        }
    }

    fn end_run(&mut self, cause: ResetCause) {
        log::info!(
            "Run {} ended by {cause} at {} with length {}",
            self.run,
            self.snake.head(),
            self.snake.target_len()
        );
        self.snake.reset();
        self.run += 1;
    }
}

fn occupied(snake: &Snake) -> HashSet<Cell> {
    snake.body().iter().copied().collect()
}

/// What happened during a single tick
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct TickOutcome {
    /// Whether the snake ate the food
    pub(crate) ate_food: bool,

    /// If the run ended & the snake was reset, the reason why
    pub(crate) reset: Option<ResetCause>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ResetCause {
    /// The snake's head ran into its body
    SelfCollision,

    /// The snake ran into a solid edge of the grid
    Wall,
}

impl fmt::Display for ResetCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResetCause::SelfCollision => write!(f, "self-collision"),
            ResetCause::Wall => write!(f, "wall collision"),
        }
    }
}

/// The state of the game as needed for drawing a frame
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot<'a> {
    /// The cells occupied by the snake, head first
    pub(crate) body: &'a VecDeque<Cell>,

    pub(crate) food: Cell,

    /// The direction the snake is facing
    pub(crate) direction: Direction,

    pub(crate) score: usize,
    pub(crate) best: usize,
    pub(crate) run: u32,
}

impl Snapshot<'_> {
    pub(crate) fn head(&self) -> Option<Cell> {
        self.body.front().copied()
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum GameError {
    #[error("failed to place food")]
    Placement(#[from] PlacementError),
}
