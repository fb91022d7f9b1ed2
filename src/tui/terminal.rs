//! Terminal primitives: raw mode, alternate screen, cursor, viewport size, bell.
//!
//! `restore()` may be reached from the normal quit path, the termination
//! path and the guard's `Drop`; only the first call does anything.

use std::io::{self, Stdout, Write, stdout};
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{info, warn};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Rect, Size};
use ratatui::{Terminal, TerminalOptions, Viewport};

pub type Screen = Terminal<CrosstermBackend<Stdout>>;

/// Used when the terminal cannot report its size.
pub const FALLBACK_SIZE: Size = Size {
    width: 80,
    height: 25,
};

static ACTIVE: AtomicBool = AtomicBool::new(false);

/// Current viewport size, or 80×25 if the query fails. Never errors.
pub fn viewport_size() -> Size {
    match crossterm::terminal::size() {
        Ok((width, height)) if width > 0 && height > 0 => Size { width, height },
        Ok(_) => FALLBACK_SIZE,
        Err(e) => {
            warn!("Viewport size query failed, using 80x25: {}", e);
            FALLBACK_SIZE
        }
    }
}

/// Raw input on, alternate screen on, cursor hidden.
///
/// The returned guard restores the terminal when dropped.
pub fn enter() -> io::Result<(Screen, TerminalGuard)> {
    enable_raw_mode()?;
    ACTIVE.store(true, Ordering::SeqCst);
    let guard = TerminalGuard;
    execute!(stdout(), EnterAlternateScreen, Hide)?;

    let size = viewport_size();
    let terminal = Terminal::with_options(
        CrosstermBackend::new(stdout()),
        TerminalOptions {
            viewport: Viewport::Fixed(Rect::new(0, 0, size.width, size.height)),
        },
    )?;
    info!("Terminal ready ({}x{})", size.width, size.height);
    Ok((terminal, guard))
}

/// Resizes the fixed viewport to the current terminal size if it changed.
pub fn sync_viewport(terminal: &mut Screen) -> io::Result<()> {
    let size = viewport_size();
    let area = Rect::new(0, 0, size.width, size.height);
    if terminal.get_frame().area() != area {
        terminal.resize(area)?;
    }
    Ok(())
}

/// Raw input off, cursor visible, alternate screen left. Safe to call any
/// number of times from any thread.
pub fn restore() {
    if !ACTIVE.swap(false, Ordering::SeqCst) {
        return;
    }
    if let Err(e) = disable_raw_mode() {
        warn!("Failed to leave raw mode: {}", e);
    }
    if let Err(e) = execute!(stdout(), Show, LeaveAlternateScreen) {
        warn!("Failed to restore screen: {}", e);
    }
    info!("Terminal restored");
}

/// Restores the terminal and ends the process with status 0. Called from
/// whichever thread sees the termination first.
pub fn terminate() {
    restore();
    info!("Terminated");
    std::process::exit(0);
}

/// Audible alert.
pub fn bell() {
    let mut out = stdout();
    let _ = out.write_all(b"\x07");
    let _ = out.flush();
}

pub struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore();
    }
}
