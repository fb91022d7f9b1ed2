//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::document::{Document, Link, Paragraph};
use crate::source::{ContentSource, SourceError};
use crate::tui::desktop::{Desktop, DesktopError};

fn origin_of(title: &str) -> String {
    format!("https://en.wikipedia.org/wiki/{}", title.replace(' ', "_"))
}

/// An article with `paragraphs` one-sentence paragraphs and no links.
pub fn article(title: &str, paragraphs: usize) -> Arc<Document> {
    Arc::new(Document {
        title: title.to_string(),
        origin: origin_of(title),
        paragraphs: (1..=paragraphs)
            .map(|i| Paragraph::new(format!("{title} paragraph {i}."), vec![]))
            .collect(),
        ..Default::default()
    })
}

/// An article with a single paragraph holding `links` links named
/// `Link 0`, `Link 1`, ...
pub fn article_with_links(title: &str, links: usize) -> Arc<Document> {
    let links: Vec<Link> = (0..links)
        .map(|i| Link::new(format!("/wiki/Link_{i}"), format!("Link {i}")))
        .collect();
    let text = links
        .iter()
        .map(|l| format!("See {}.", l.text))
        .collect::<Vec<_>>()
        .join(" ");
    Arc::new(Document {
        title: title.to_string(),
        origin: origin_of(title),
        paragraphs: vec![Paragraph::new(text, links)],
        ..Default::default()
    })
}

/// A disambiguation page with `entries` entries named `Entry 0`, `Entry 1`, ...
pub fn disambiguation(title: &str, entries: usize) -> Arc<Document> {
    Arc::new(Document {
        title: title.to_string(),
        origin: origin_of(title),
        is_disambiguation: true,
        entries: (0..entries)
            .map(|i| Link::new(format!("/wiki/Entry_{i}"), format!("Entry {i}")))
            .collect(),
        ..Default::default()
    })
}

/// A content source backed by a map from query to document.
#[derive(Default)]
pub struct FakeSource {
    documents: HashMap<String, Document>,
    pub requests: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, query: &str, document: Arc<Document>) -> Self {
        self.documents.insert(query.to_string(), (*document).clone());
        self
    }
}

#[async_trait]
impl ContentSource for FakeSource {
    fn name(&self) -> &str {
        "fake"
    }

    async fn fetch(&self, query: &str) -> Result<Document, SourceError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(query.to_string());
        }
        self.documents
            .get(query)
            .cloned()
            .ok_or(SourceError::NotFound)
    }
}

/// A desktop that records what it was asked to do.
#[derive(Default)]
pub struct FakeDesktop {
    pub opened: Mutex<Vec<String>>,
    pub copied: Mutex<Vec<String>>,
    pub fail: bool,
}

impl Desktop for FakeDesktop {
    fn open_url(&self, url: &str) -> Result<(), DesktopError> {
        if self.fail {
            return Err(DesktopError::Browser("no browser".to_string()));
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }

    fn copy_text(&self, text: &str) -> Result<(), DesktopError> {
        if self.fail {
            return Err(DesktopError::Clipboard("no clipboard".to_string()));
        }
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Each row of a rendered buffer as a string, trailing spaces trimmed.
pub fn buffer_rows(buffer: &ratatui::buffer::Buffer) -> Vec<String> {
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| {
            row.iter()
                .map(|cell| cell.symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}
