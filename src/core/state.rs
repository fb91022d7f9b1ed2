//! # Application State
//!
//! Everything the navigation loop owns. There is exactly one writer: the
//! foreground loop calling `update()` in action.rs. Background producers
//! never see this value.
//!
//! ```text
//! App
//! ├── mode: Mode                  // Idle | Viewing | QueryInput
//! ├── current: Option<Position>   // what is on screen
//! ├── history: BackStack          // positions to go back to
//! ├── query: QueryBuffer          // text typed at the "Go to:" prompt
//! └── status: Option<String>      // inline message on the prompt row
//! ```

use std::sync::Arc;

use crate::core::document::{Document, Link, Paragraph};
use crate::core::history::BackStack;
use crate::core::query::QueryBuffer;

/// How a document's pages are cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// One paragraph per page.
    Normal,
    /// Ten list entries per page.
    Disambiguation,
}

/// A place in a document. Immutable; superseded positions go onto the back-stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub document: Arc<Document>,
    pub page: usize,
    pub mode: PageMode,
}

impl Position {
    pub fn new(document: Arc<Document>, page: usize, mode: PageMode) -> Self {
        Self {
            document,
            page,
            mode,
        }
    }

    /// The first page of a freshly fetched document, past any leading
    /// non-content paragraphs.
    pub fn start_of(document: Arc<Document>) -> Self {
        if document.is_disambiguation {
            Self::new(document, 0, PageMode::Disambiguation)
        } else {
            let page = document.content_page_from(0);
            Self::new(document, page, PageMode::Normal)
        }
    }

    pub fn is_disambiguation(&self) -> bool {
        self.mode == PageMode::Disambiguation
    }

    pub fn page_count(&self) -> usize {
        self.document.page_count(self.is_disambiguation())
    }

    /// The paragraph on screen, if any. Always `None` on disambiguation pages.
    pub fn paragraph(&self) -> Option<&Paragraph> {
        match self.mode {
            PageMode::Normal => self.document.paragraphs.get(self.page),
            PageMode::Disambiguation => None,
        }
    }

    /// Selectable links for this page, in display order.
    pub fn options(&self) -> Vec<Link> {
        match self.mode {
            PageMode::Normal => self.document.paragraph_options(self.page),
            PageMode::Disambiguation => self
                .document
                .entry_page(self.page)
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    /// The next page, skipping non-content paragraphs.
    pub fn next(&self) -> Option<Position> {
        if self.page + 1 >= self.page_count() {
            return None;
        }
        let page = match self.mode {
            PageMode::Normal => self.document.content_page_from(self.page + 1),
            PageMode::Disambiguation => self.page + 1,
        };
        Some(Self::new(self.document.clone(), page, self.mode))
    }

    /// The previous page, skipping non-content paragraphs backwards.
    pub fn previous(&self) -> Option<Position> {
        let page = match self.mode {
            PageMode::Normal => (0..self.page)
                .rev()
                .find(|&i| self.document.paragraphs[i].is_content())?,
            PageMode::Disambiguation => self.page.checked_sub(1)?,
        };
        Some(Self::new(self.document.clone(), page, self.mode))
    }
}

/// Which screen the user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No document yet: splash screen.
    Idle,
    /// A document page is shown and single-key commands apply.
    Viewing,
    /// Typing at the "Go to:" prompt.
    QueryInput,
}

#[derive(Debug)]
pub struct App {
    pub mode: Mode,
    pub current: Option<Position>,
    pub history: BackStack,
    pub query: QueryBuffer,
    pub status: Option<String>,
}

impl App {
    /// A fresh session waiting at the prompt over the splash screen.
    pub fn new() -> Self {
        Self {
            mode: Mode::QueryInput,
            current: None,
            history: BackStack::new(),
            query: QueryBuffer::new(),
            status: None,
        }
    }

    /// Mode to return to when leaving the prompt.
    pub fn resting_mode(&self) -> Mode {
        if self.current.is_some() {
            Mode::Viewing
        } else {
            Mode::Idle
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
