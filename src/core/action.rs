//! # Actions
//!
//! Everything that can happen to the reader becomes an `Action`.
//! A keystroke? That's `Action::Key(byte)`. A finished fetch? That's
//! `Action::Fetched { .. }`.
//!
//! `update()` applies an action to the state and returns the one `Effect`
//! the adapter must carry out (ring the bell, fetch, open a browser, ...).
//! No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! The adapter redraws after every action, so there is no render effect.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::core::document::{Document, ENTRIES_PER_PAGE};
use crate::core::state::{App, Mode, Position};
use crate::source::SourceError;

pub const NOT_FOUND_MESSAGE: &str = "Article not found.";

const ENTER: u8 = b'\r';
const NEWLINE: u8 = b'\n';
const ESCAPE: u8 = 0x1b;
const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7f;

/// Why a fetch was started. Decides what a failure falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    /// Typed at the prompt or given on the command line.
    Query,
    /// A numbered option on the current page.
    Link,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub target: String,
    pub origin: FetchOrigin,
}

#[derive(Debug)]
pub enum Action {
    /// One byte read from the keyboard.
    Key(u8),
    /// The terminal changed size. Nothing moves; the adapter redraws.
    Resized,
    /// Look up a query straight away (command-line arguments).
    Query(String),
    /// A fetch started by an earlier `Effect::Fetch` finished.
    Fetched {
        request: FetchRequest,
        result: Result<Document, SourceError>,
    },
}

/// Side effect requested by `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Audible alert: the input was not valid here.
    Bell,
    Fetch(FetchRequest),
    OpenExternal(String),
    CopyToClipboard(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Resized => Effect::None,
        Action::Query(query) => fetch(query, FetchOrigin::Query),
        Action::Fetched { request, result } => on_fetched(app, request, result),
        Action::Key(byte) => match app.mode {
            Mode::QueryInput => on_query_key(app, byte),
            Mode::Viewing => on_viewing_key(app, byte),
            Mode::Idle => on_idle_key(app, byte),
        },
    }
}

fn fetch(target: String, origin: FetchOrigin) -> Effect {
    Effect::Fetch(FetchRequest { target, origin })
}

fn enter_prompt(app: &mut App) -> Effect {
    app.mode = Mode::QueryInput;
    app.query.clear();
    Effect::None
}

fn on_idle_key(app: &mut App, byte: u8) -> Effect {
    app.status = None;
    match byte.to_ascii_lowercase() {
        b'g' => enter_prompt(app),
        b'q' => Effect::Quit,
        _ => Effect::Bell,
    }
}

fn on_query_key(app: &mut App, byte: u8) -> Effect {
    app.status = None;
    match byte {
        ESCAPE => {
            app.query.clear();
            app.mode = app.resting_mode();
            Effect::None
        }
        ENTER | NEWLINE => {
            let query = app.query.to_query();
            if query.is_empty() {
                return Effect::Bell;
            }
            fetch(query, FetchOrigin::Query)
        }
        BACKSPACE | DELETE => {
            if app.query.pop() {
                Effect::None
            } else {
                Effect::Bell
            }
        }
        b if b >= 0x20 => {
            app.query.push(b);
            Effect::None
        }
        _ => Effect::Bell,
    }
}

fn on_viewing_key(app: &mut App, byte: u8) -> Effect {
    app.status = None;
    let Some(current) = app.current.clone() else {
        // Viewing without a document cannot happen; fall back to the idle keys.
        return on_idle_key(app, byte);
    };

    match byte.to_ascii_lowercase() {
        b'n' | ENTER | NEWLINE => match current.next() {
            Some(next) => move_to(app, next),
            None => Effect::Bell,
        },
        b'p' => match current.previous() {
            Some(previous) => move_to(app, previous),
            None => Effect::Bell,
        },
        b'b' => match app.history.pop() {
            Some(position) => {
                debug!(
                    "Back to '{}' page {}",
                    position.document.title, position.page
                );
                app.current = Some(position);
                Effect::None
            }
            None => Effect::Bell,
        },
        b'g' => enter_prompt(app),
        b'o' => Effect::OpenExternal(current.document.origin.clone()),
        b'u' => Effect::CopyToClipboard(current.document.origin.clone()),
        b't' => match current.paragraph() {
            Some(paragraph) if !paragraph.text.is_empty() => {
                Effect::CopyToClipboard(paragraph.text.clone())
            }
            _ => Effect::Bell,
        },
        b'q' => Effect::Quit,
        digit @ b'0'..=b'9' => select_option(&current, digit),
        _ => Effect::Bell,
    }
}

/// Digit `1`–`9` picks options 1–9, `0` picks option 10.
fn select_option(current: &Position, digit: u8) -> Effect {
    let number = match digit - b'0' {
        0 => ENTRIES_PER_PAGE,
        n => n as usize,
    };
    let options = current.options();
    let selectable = options.len().min(ENTRIES_PER_PAGE);
    if number > selectable {
        return Effect::Bell;
    }
    let link = &options[number - 1];
    debug!("Selected option {} -> {}", number, link.target);
    fetch(link.target.clone(), FetchOrigin::Link)
}

fn move_to(app: &mut App, position: Position) -> Effect {
    if let Some(previous) = app.current.replace(position) {
        app.history.push(previous);
    }
    Effect::None
}

fn on_fetched(
    app: &mut App,
    request: FetchRequest,
    result: Result<Document, SourceError>,
) -> Effect {
    match result {
        Ok(document) => {
            info!(
                "Showing '{}' ({} paragraphs, {} entries, disambiguation={})",
                document.title,
                document.paragraphs.len(),
                document.entries.len(),
                document.is_disambiguation
            );
            move_to(app, Position::start_of(Arc::new(document)));
            app.mode = Mode::Viewing;
            app.query.clear();
            app.status = None;
            Effect::None
        }
        Err(e) => {
            if e == SourceError::NotFound {
                info!("No article for '{}'", request.target);
            } else {
                warn!("Fetch of '{}' failed: {}", request.target, e);
            }
            if request.origin == FetchOrigin::Query {
                app.query.clear();
                app.mode = Mode::QueryInput;
            }
            app.status = Some(NOT_FOUND_MESSAGE.to_string());
            Effect::Bell
        }
    }
}
