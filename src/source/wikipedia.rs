//! Wikipedia content source over plain HTTP page fetches.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{StatusCode, Url};

use crate::core::config::ResolvedConfig;
use crate::core::document::Document;
use crate::source::{ContentSource, SourceError, html};

pub struct WikipediaSource {
    base_url: Url,
    article_path: String,
    client: reqwest::Client,
}

impl WikipediaSource {
    pub fn new(config: &ResolvedConfig) -> Result<Self, SourceError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| SourceError::Network(format!("invalid base URL: {e}")))?;
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        Ok(Self {
            base_url,
            article_path: config.article_path.clone(),
            client,
        })
    }

    /// The page URL for a query or a link target.
    ///
    /// ```text
    /// "Alan_Turing"          → {base}/wiki/Alan_Turing
    /// "/wiki/Enigma_machine" → {base}/wiki/Enigma_machine
    /// ```
    pub fn page_url(&self, query: &str) -> Result<Url, SourceError> {
        if query.starts_with('/') {
            return self.base_url.join(query).map_err(invalid_url);
        }

        let mut url = self.base_url.join(&self.article_path).map_err(invalid_url)?;
        url.path_segments_mut()
            .map_err(|_| invalid_url("base URL cannot have a path"))?
            .pop_if_empty()
            .push(query);
        Ok(url)
    }
}

fn invalid_url(e: impl std::fmt::Display) -> SourceError {
    SourceError::Network(format!("invalid URL: {e}"))
}

#[async_trait]
impl ContentSource for WikipediaSource {
    fn name(&self) -> &str {
        "wikipedia"
    }

    async fn fetch(&self, query: &str) -> Result<Document, SourceError> {
        let url = self.page_url(query)?;
        info!("Fetching '{}' from {}", query, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Response status: {}", status);
        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound);
        }
        if !status.is_success() {
            warn!("Unexpected status {} for '{}'", status, query);
            return Err(SourceError::Http {
                status: status.as_u16(),
            });
        }

        let origin = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;
        debug!("Received {} bytes from {}", body.len(), origin);

        let document = html::parse_document(&body, &origin).ok_or(SourceError::NotFound)?;
        info!(
            "Parsed '{}': {} paragraphs, {} entries",
            document.title,
            document.paragraphs.len(),
            document.entries.len()
        );
        Ok(document)
    }
}
