//! # Content Sources
//!
//! Where documents come from. The navigation core only sees the
//! `ContentSource` trait; `WikipediaSource` is the implementation the
//! binary wires in.
//!
//! ```text
//! fetch("Alan_Turing")        → GET {base}/wiki/Alan_Turing
//! fetch("/wiki/Enigma_machine") → GET {base}/wiki/Enigma_machine
//! ```

pub mod html;
pub mod wikipedia;

use std::fmt;

use async_trait::async_trait;

use crate::core::document::Document;

pub use wikipedia::WikipediaSource;

/// Errors that can occur while fetching a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// No document matches the query. The reader re-prompts.
    NotFound,
    /// Request could not be built or sent (bad URL, DNS, timeout, connection refused).
    Network(String),
    /// The server answered with a non-success status other than 404.
    Http { status: u16 },
    /// The response body could not be read.
    Parse(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::NotFound => write!(f, "article not found"),
            SourceError::Network(msg) => write!(f, "network error: {msg}"),
            SourceError::Http { status } => write!(f, "HTTP error: {status}"),
            SourceError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Returns the name of the source, for logs.
    fn name(&self) -> &str;

    /// Fetches a document by query (`Title_Cased_Words`) or by a link
    /// target taken from a previously fetched document (`/wiki/...`).
    async fn fetch(&self, query: &str) -> Result<Document, SourceError>;
}
