use crate::command::Command;
use crate::game::{Direction, GameError, GameLoop, TickOutcome};
use crate::view::GameView;
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{backend::Backend, Frame, Terminal};
use std::time::{Duration, Instant};
use thiserror::Error;

/// The terminal front end: feeds key presses & timer ticks to the game and
/// draws the result
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<R = rand::rngs::StdRng> {
    game: GameLoop<R>,
    state: AppState,
    tick_period: Duration,
    next_tick: Option<Instant>,
    /// The most recent direction key pressed since the last tick
    input: Option<Direction>,
}

impl<R: Rng> App<R> {
    pub(crate) fn new(game: GameLoop<R>, tick_period: Duration) -> App<R> {
        App {
            game,
            state: AppState::Running,
            tick_period,
            next_tick: None,
            input: None,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> Result<(), AppError> {
        while !self.quitting() {
            terminal.draw(|frame| self.draw(frame))?;
            self.process_input()?;
        }
        log::info!(
            "Quitting during run {} with best score {}",
            self.game.snapshot().run,
            self.game.snapshot().best
        );
        Ok(())
    }

    /// Wait for either the next key press or the next tick, whichever comes
    /// first, and handle it
    fn process_input(&mut self) -> Result<(), AppError> {
        if self.running() {
            let when = *self
                .next_tick
                .get_or_insert_with(|| Instant::now() + self.tick_period);
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.tick()?;
                self.next_tick = None;
            } else {
                self.handle_event(read()?);
            }
        } else {
            self.handle_event(read()?);
        }
        Ok(())
    }

    fn tick(&mut self) -> Result<TickOutcome, GameError> {
        let outcome = self.game.tick(self.input.take())?;
        if outcome.ate_food {
            log::trace!("Score is now {}", self.game.score());
        }
        if let Some(cause) = outcome.reset {
            log::debug!("Snake reset after {cause}");
        }
        Ok(outcome)
    }
}

impl<R> App<R> {
    fn draw(&self, frame: &mut Frame<'_>) {
        let view = GameView::new(
            self.game.snapshot(),
            self.game.grid(),
            self.state == AppState::Paused,
        );
        frame.render_widget(view, frame.area());
    }

    fn handle_event(&mut self, event: Event) {
        if event == Event::FocusLost {
            if self.running() {
                log::debug!("Terminal lost focus; pausing");
                self.state = AppState::Paused;
            }
            return;
        }
        let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event) else {
            return;
        };
        match (self.state, cmd) {
            (_, Command::Quit) => self.state = AppState::Quit,
            (AppState::Running, Command::Pause) => self.state = AppState::Paused,
            (AppState::Paused, Command::Pause) => {
                self.state = AppState::Running;
                self.next_tick = None;
            }
            (AppState::Running, cmd) => {
                if let Some(d) = cmd.direction() {
                    self.input = Some(d);
                }
            }
            _ => (),
        }
    }

    fn running(&self) -> bool {
        self.state == AppState::Running
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quit
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Running,
    Paused,
    Quit,
}

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("terminal I/O failed")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Game(#[from] GameError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{EdgeMode, Grid};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn app() -> App<ChaCha12Rng> {
        let grid = Grid::new(32, 24, EdgeMode::Wrap).expect("32x24 grid should be valid");
        let game =
            GameLoop::new(grid, ChaCha12Rng::seed_from_u64(RNG_SEED)).expect("food should be placed");
        App::new(game, Duration::from_millis(100))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn last_direction_wins() {
        let mut app = app();
        app.handle_event(key(KeyCode::Up));
        app.handle_event(key(KeyCode::Char('a')));
        assert_eq!(app.input, Some(Direction::Left));
        app.tick().expect("tick should succeed");
        assert_eq!(app.input, None);
        // Left is the reverse of Right, so it is filtered out by the game
        assert_eq!(app.game.snapshot().direction, Direction::Right);
    }

    #[test]
    fn direction_applied_on_tick() {
        let mut app = app();
        app.handle_event(key(KeyCode::Down));
        assert_eq!(app.game.snapshot().direction, Direction::Right);
        app.tick().expect("tick should succeed");
        assert_eq!(app.game.snapshot().direction, Direction::Down);
    }

    #[test]
    fn pause_and_resume() {
        let mut app = app();
        app.handle_event(key(KeyCode::Char('p')));
        assert_eq!(app.state, AppState::Paused);
        app.handle_event(key(KeyCode::Up));
        assert_eq!(app.input, None);
        app.handle_event(key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Running);
    }

    #[test]
    fn focus_lost_pauses() {
        let mut app = app();
        app.handle_event(Event::FocusLost);
        assert_eq!(app.state, AppState::Paused);
    }

    #[test]
    fn quit() {
        let mut a1 = app();
        a1.handle_event(key(KeyCode::Char('q')));
        assert!(a1.quitting());
        let mut a2 = app();
        a2.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(a2.quitting());
    }

    #[test]
    fn draw_snapshot() {
        let app = app();
        let mut terminal = Terminal::new(ratatui::backend::TestBackend::new(66, 28))
            .expect("test terminal should be created");
        terminal
            .draw(|frame| app.draw(frame))
            .expect("drawing should succeed");
        let buffer = terminal.backend().buffer();
        let head = buffer
            .cell((33, 14))
            .expect("head cell should be in the buffer");
        assert_eq!(head.symbol(), "█");
        let arrow = buffer
            .cell((34, 14))
            .expect("head cell should be in the buffer");
        assert_eq!(arrow.symbol(), "▶");
    }
}
