use crate::consts;
use crate::game::{Cell, Direction, EdgeMode, Grid, Snapshot};
use crate::util::center_rect;
use enum_map::{enum_map, EnumMap};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

/// A widget drawing one frame of the game: a score bar, the board with the
/// snake & food, and a line of key hints
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GameView<'a> {
    snapshot: Snapshot<'a>,
    grid: Grid,
    paused: bool,
}

impl<'a> GameView<'a> {
    pub(crate) fn new(snapshot: Snapshot<'a>, grid: Grid, paused: bool) -> GameView<'a> {
        GameView {
            snapshot,
            grid,
            paused,
        }
    }

    /// Return the smallest terminal area that can display the whole view
    pub(crate) fn required_size(grid: Grid) -> Size {
        let board = board_size(grid);
        Size {
            width: board.width,
            height: board.height.saturating_add(2),
        }
    }
}

impl Widget for GameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let required = GameView::required_size(self.grid);
        let Some(display) = center_rect(area, required) else {
            TooSmall { required }.render(area, buf);
            return;
        };
        let [score_area, board_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);

        Line::styled(
            format!(
                " Score: {}  Best: {}  Run: {}",
                self.snapshot.score, self.snapshot.best, self.snapshot.run
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        match self.grid.edges() {
            EdgeMode::Wrap => DottedBorder.render(board_area, buf),
            EdgeMode::Solid => Block::bordered().render(board_area, buf),
        }
        let inner = board_area.inner(Margin::new(1, 1));
        let mut canvas = Canvas { area: inner, buf };
        canvas.draw_cell(
            self.snapshot.food,
            consts::FOOD_SYMBOL,
            consts::FOOD_STYLE,
        );
        for &cell in self.snapshot.body.iter().skip(1) {
            canvas.draw_cell(cell, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        // Draw the head last so that it covers whatever it overlaps
        if let Some(head) = self.snapshot.head() {
            let symbols = head_symbols();
            canvas.draw_cell(head, symbols[self.snapshot.direction], consts::SNAKE_STYLE);
        }

        if self.paused {
            if let Some(banner) = center_rect(inner, Size::new(8, 1)) {
                Line::styled(" PAUSED ", consts::PAUSED_STYLE).render(banner, buf);
            }
        }

        Line::from_iter([
            Span::raw(" Move ("),
            Span::styled("←↓↑→", consts::KEY_STYLE),
            Span::raw(") Pause ("),
            Span::styled("p", consts::KEY_STYLE),
            Span::raw(") Quit ("),
            Span::styled("q", consts::KEY_STYLE),
            Span::raw(")"),
        ])
        .render(hint_area, buf);
    }
}

fn board_size(grid: Grid) -> Size {
    Size {
        width: grid
            .width()
            .saturating_mul(consts::CELL_WIDTH)
            .saturating_add(2),
        height: grid.height().saturating_add(2),
    }
}

fn head_symbols() -> EnumMap<Direction, &'static str> {
    enum_map! {
        Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
    }
}

/// Message shown in place of the game when the terminal cannot hold it
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct TooSmall {
    required: Size,
}

impl Widget for TooSmall {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(format!(
            "Terminal too small: need {}x{}, have {}x{}",
            self.required.width, self.required.height, area.width, area.height
        ))
        .wrap(Wrap { trim: true })
        .render(area, buf);
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_char(&mut self, pos: Position, symbol: char) {
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
        }
    }

    /// Draw `symbol` across the terminal columns making up grid cell `cell`
    fn draw_cell(&mut self, cell: Cell, symbol: &str, style: Style) {
        let Some(left) = cell.x.checked_mul(consts::CELL_WIDTH) else {
            return;
        };
        for (offset, ch) in (0..consts::CELL_WIDTH).zip(symbol.chars()) {
            let Some(x) = self.area.x.checked_add(left).and_then(|x| x.checked_add(offset))
            else {
                return;
            };
            let Some(y) = self.area.y.checked_add(cell.y) else {
                return;
            };
            if let Some(c) = self.buf.cell_mut((x, y)) {
                c.set_char(ch);
                c.set_style(Style::reset().patch(style));
            }
        }
    }
}

/// Border drawn around a board whose edges wrap around
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let size = area.as_size();
        let max_x = size.width.saturating_sub(1);
        let max_y = size.height.saturating_sub(1);
        let mut canvas = Canvas { area, buf };
        canvas.draw_char(Position::ORIGIN, '·');
        canvas.draw_char(Position::new(max_x, 0), '·');
        canvas.draw_char(Position::new(max_x, max_y), '·');
        canvas.draw_char(Position::new(0, max_y), '·');
        for x in 1..max_x {
            canvas.draw_char(Position::new(x, 0), '⋯');
            canvas.draw_char(Position::new(x, max_y), '⋯');
        }
        for y in 1..max_y {
            canvas.draw_char(Position::new(0, y), '⋮');
            canvas.draw_char(Position::new(max_x, y), '⋮');
        }
    }
}
