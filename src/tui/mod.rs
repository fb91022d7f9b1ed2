//! # TUI Adapter
//!
//! Terminal I/O, rendering, and the foreground loop that feeds input events
//! into `core::action::update()` and carries out the returned effects.
//!
//! This is the only module that knows about ratatui, crossterm, the
//! clipboard and the browser.
//!
//! ## Loop
//!
//! ```text
//! draw ──▶ input.next() ──▶ update() ──▶ effect ──┐
//!  ▲                                              │
//!  └──────────────────────────────────────────────┘
//! ```
//!
//! Exactly one input event is handled per iteration and the screen is
//! redrawn after each one. A fetch is awaited in the foreground; only a
//! termination can interrupt it.

pub mod component;
pub mod components;
pub mod desktop;
pub mod input;
pub mod layout;
pub mod terminal;
pub mod ui;

use std::io;
use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::source::{ContentSource, WikipediaSource};
use crate::tui::desktop::{Desktop, SystemDesktop};
use crate::tui::input::{InputEvent, InputMultiplexer};

/// What the loop does after an action has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The user quit or stdin closed.
    Quit,
    /// A termination signal arrived.
    Terminated,
}

/// The navigation state plus the collaborators its effects need.
pub struct Reader {
    pub app: App,
    source: Arc<dyn ContentSource>,
    desktop: Arc<dyn Desktop>,
    bell: fn(),
}

impl Reader {
    pub fn new(source: Arc<dyn ContentSource>, desktop: Arc<dyn Desktop>, bell: fn()) -> Self {
        Self {
            app: App::new(),
            source,
            desktop,
            bell,
        }
    }

    /// Applies `action` and carries out the resulting effects.
    ///
    /// A fetch feeds its result straight back into `update()`, so one call
    /// may run two effects: the fetch and whatever its outcome asks for.
    pub async fn dispatch(&mut self, action: Action, input: &mut InputMultiplexer) -> Flow {
        let mut effect = update(&mut self.app, action);
        loop {
            match effect {
                Effect::None => return Flow::Continue,
                Effect::Bell => {
                    (self.bell)();
                    return Flow::Continue;
                }
                Effect::Quit => return Flow::Quit,
                Effect::OpenExternal(url) => {
                    if let Err(e) = self.desktop.open_url(&url) {
                        warn!("Could not open {}: {}", url, e);
                    }
                    return Flow::Continue;
                }
                Effect::CopyToClipboard(text) => {
                    if let Err(e) = self.desktop.copy_text(&text) {
                        warn!("Could not copy to clipboard: {}", e);
                    }
                    return Flow::Continue;
                }
                Effect::Fetch(request) => {
                    debug!("{:?} via {}", request, self.source.name());
                    let fetch = self.source.fetch(&request.target);
                    let Some(result) = input.or_terminated(fetch).await else {
                        info!("Fetch of '{}' interrupted", request.target);
                        return Flow::Terminated;
                    };
                    effect = update(&mut self.app, Action::Fetched { request, result });
                }
            }
        }
    }
}

/// Runs the reader until the user quits, stdin closes or a termination
/// signal arrives. A termination exits the process with status 0 once the
/// terminal is restored, from the signal listener itself if the loop is
/// busy.
pub async fn run(config: ResolvedConfig, initial_query: Option<String>) -> io::Result<()> {
    let source = WikipediaSource::new(&config).map_err(|e| {
        error!("Cannot build content source: {}", e);
        io::Error::other(e.to_string())
    })?;
    let mut reader = Reader::new(
        Arc::new(source),
        Arc::new(SystemDesktop::new()),
        terminal::bell,
    );

    let mut input = InputMultiplexer::start(terminal::terminate)?;
    let (mut screen, _guard) = terminal::enter()?;

    let mut flow = match initial_query {
        Some(query) => {
            info!("Initial query '{}'", query);
            reader.dispatch(Action::Query(query), &mut input).await
        }
        None => Flow::Continue,
    };

    while flow == Flow::Continue {
        terminal::sync_viewport(&mut screen)?;
        screen.draw(|f| ui::draw_ui(f, &reader.app))?;

        flow = match input.next().await {
            InputEvent::Key(byte) => {
                debug!("Key 0x{:02x} in {:?}", byte, reader.app.mode);
                reader.dispatch(Action::Key(byte), &mut input).await
            }
            InputEvent::Resized => {
                debug!("Resized");
                reader.dispatch(Action::Resized, &mut input).await
            }
            InputEvent::Terminated => Flow::Terminated,
            InputEvent::Closed => {
                info!("Input closed, leaving");
                Flow::Quit
            }
        };
    }

    if flow == Flow::Terminated {
        terminal::terminate();
    }
    terminal::restore();
    info!("Quit");
    Ok(())
}
