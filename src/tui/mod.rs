//! # TUI Adapter
//!
//! The ratatui-specific layer. Renders the card grid, translates keyboard
//! and mouse input into `FlipMachine` calls, and drives the machine's
//! virtual clock from the wall clock.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Loop
//!
//! Each pass draws, then waits for input no longer than the time until the
//! next scheduled task (capped so the countdown display stays fresh). Real
//! elapsed time is fed to `FlipMachine::advance` after every wait, so the
//! mismatch hide and the countdown fire on time without a second thread.

mod app;
mod colors;
mod event;
mod ui;

pub use app::{StatusPanel, TuiApp};
pub use colors::css_color;

use log::info;
use std::io::stdout;
use std::time::{Duration, Instant};

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::settings::ResolvedConfig;
use crate::tui::event::{poll_event_immediate, poll_event_timeout};

/// Longest wait between redraws.
const MAX_IDLE: Duration = Duration::from_millis(250);

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Event types let held keys be told apart from fresh presses
        execute!(
            stdout(),
            EnableMouseCapture,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
        info!("Terminal modes enabled (mouse, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, DisableMouseCapture);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = TuiApp::new(config);

    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new().and_then(|_guard| {
        let mut last = Instant::now();
        loop {
            terminal.draw(|f| ui::draw_ui(f, &mut app))?;

            let timeout = app
                .machine
                .until_next_task()
                .map_or(MAX_IDLE, |due| due.min(MAX_IDLE));
            let first_event = poll_event_timeout(timeout)?;

            let now = Instant::now();
            app.update(now - last);
            last = now;

            let mut should_quit = false;
            let mut next = first_event;
            while let Some(event) = next {
                if app.handle(event) {
                    should_quit = true;
                    break;
                }
                next = poll_event_immediate()?;
            }
            if should_quit {
                info!("Quit requested");
                return Ok(());
            }
        }
    });
    ratatui::restore();
    result
}
