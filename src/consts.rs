//! Assorted constants & hard-coded configuration
use ratatui::style::{Color, Modifier, Style};

/// Default time between movements of the snake, in milliseconds
pub(crate) const DEFAULT_TICK_MS: u64 = 100;

/// Default grid width, in cells
pub(crate) const DEFAULT_GRID_WIDTH: u16 = 32;

/// Default grid height, in cells
pub(crate) const DEFAULT_GRID_HEIGHT: u16 = 24;

/// How many random cells to try when placing food before falling back to
/// picking from the list of free cells
pub(crate) const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Number of terminal columns used to draw one grid cell
pub(crate) const CELL_WIDTH: u16 = 2;

/// Glyphs for the snake's head, drawn in the direction it is moving
pub(crate) const SNAKE_HEAD_UP_SYMBOL: &str = "▲▲";
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: &str = "▼▼";
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: &str = "◀█";
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: &str = "█▶";

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: &str = "██";

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: &str = "●●";

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the "PAUSED" banner
pub(crate) const PAUSED_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::REVERSED);
