//! Poll/render scheduler.
//!
//! One tick-driven loop: fetch-then-append on each tick, redraw after
//! every event. Poll failures back off and eventually halt polling; the
//! UI itself stays responsive until quit.

use std::io;
use std::time::Duration;

use chrono::Local;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::warn;

use crate::stats::{StatsHistory, StatsSource};

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::{AppState, Dashboard, PollState};

/// Cap on the backoff window, in ticks.
const MAX_BACKOFF_TICKS: u32 = 8;

/// Main dashboard application. Owns the history and drives the poll/render
/// cycle.
pub struct App<S> {
    history: StatsHistory<S>,
    state: AppState,
    should_quit: bool,
}

impl<S: StatsSource> App<S> {
    /// Creates the app around an already-primed history (the binary does
    /// one append before entering the alternate screen).
    pub fn new(history: StatsHistory<S>, failure_budget: u32) -> Self {
        let mut state = AppState::new(failure_budget);
        state.samples = history.len();
        Self {
            history,
            state,
            should_quit: false,
        }
    }

    /// Runs the TUI until quit. `tick_rate` is the poll cadence.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(tick_rate);

        loop {
            let dashboard = Dashboard::collect(&self.history);
            terminal.draw(|frame| render(frame, &self.state, &dashboard))?;

            match events.next() {
                Ok(Event::Tick) => self.on_tick(),
                Ok(Event::Key(key)) => match handle_key(key) {
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::Reload => {
                        self.state.message = Some("reloaded".to_string());
                    }
                    KeyAction::None => {}
                },
                Ok(Event::Resize) => {}
                Err(_) => self.should_quit = true,
            }

            if self.should_quit {
                break;
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// One scheduling tick: append unless halted or inside a backoff
    /// window.
    fn on_tick(&mut self) {
        if self.state.poll == PollState::Halted {
            return;
        }
        if self.state.skip_ticks > 0 {
            self.state.skip_ticks -= 1;
            return;
        }

        match self.history.append() {
            Ok(()) => {
                self.state.consecutive_failures = 0;
                self.state.last_error = None;
                self.state.message = None;
                self.state.samples = self.history.len();
                self.state.last_poll = Some(Local::now());
            }
            Err(e) => {
                warn!(error = %e, "poll failed");
                self.state.consecutive_failures += 1;
                self.state.last_error = Some(e.to_string());
                if self.state.consecutive_failures >= self.state.failure_budget {
                    self.state.poll = PollState::Halted;
                } else {
                    self.state.skip_ticks = backoff_ticks(self.state.consecutive_failures);
                }
            }
        }
    }
}

/// Backoff window after the n-th consecutive failure (n >= 1): 1, 2, 4
/// ticks, capped at [`MAX_BACKOFF_TICKS`].
fn backoff_ticks(failures: u32) -> u32 {
    (1u32 << (failures - 1).min(3)).min(MAX_BACKOFF_TICKS)
}
