//! # Documents
//!
//! The immutable content unit the reader navigates. A `Document` is produced
//! by a content source and never changes afterwards; positions and the
//! back-stack share it through `Arc`.
//!
//! ```text
//! Document
//! ├── title: String
//! ├── origin: String                    // URL, used for open / copy / re-fetch
//! ├── paragraphs: Vec<Paragraph>        // prose pages
//! │   └── Paragraph { text, links: Vec<Link> }
//! ├── is_disambiguation: bool
//! ├── entries: Vec<Link>                // disambiguation list items
//! └── other_uses: Option<Link>          // hatnote link to a disambiguation page
//! ```

/// Number of list entries shown per disambiguation page.
pub const ENTRIES_PER_PAGE: usize = 10;

/// Paragraphs starting with one of these are skipped when paging.
const NON_CONTENT_PREFIXES: &[&str] = &["Coordinates: "];

/// A link target plus the text it is displayed as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub target: String,
    pub text: String,
}

impl Link {
    pub fn new(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            text: text.into(),
        }
    }

    /// Whether the target points at another article rather than an anchor
    /// on the same page or an external site.
    pub fn is_internal(&self) -> bool {
        self.target.starts_with("/wiki/") || self.target.starts_with("/w/")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
    pub links: Vec<Link>,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, links: Vec<Link>) -> Self {
        Self {
            text: text.into(),
            links,
        }
    }

    /// Whether this paragraph is worth a page of its own.
    pub fn is_content(&self) -> bool {
        !self.text.is_empty()
            && !NON_CONTENT_PREFIXES
                .iter()
                .any(|prefix| self.text.starts_with(prefix))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub title: String,
    pub origin: String,
    pub paragraphs: Vec<Paragraph>,
    pub is_disambiguation: bool,
    pub entries: Vec<Link>,
    pub other_uses: Option<Link>,
}

impl Document {
    /// Entries that can be followed: internal article links only.
    pub fn eligible_entries(&self) -> impl Iterator<Item = &Link> {
        self.entries.iter().filter(|entry| entry.is_internal())
    }

    /// The eligible entries shown on disambiguation page `page`.
    pub fn entry_page(&self, page: usize) -> Vec<&Link> {
        self.eligible_entries()
            .skip(page * ENTRIES_PER_PAGE)
            .take(ENTRIES_PER_PAGE)
            .collect()
    }

    /// Page count for the given mode: one page per paragraph, or one page
    /// per ten eligible entries.
    pub fn page_count(&self, disambiguation: bool) -> usize {
        if disambiguation {
            self.eligible_entries().count().div_ceil(ENTRIES_PER_PAGE)
        } else {
            self.paragraphs.len()
        }
    }

    /// First paragraph at or after `index` that holds content.
    ///
    /// Scans forward while the paragraph is not content and a later one
    /// exists, so the last paragraph is returned even when it is empty.
    pub fn content_page_from(&self, index: usize) -> usize {
        let mut page = index;
        while page + 1 < self.paragraphs.len() && !self.paragraphs[page].is_content() {
            page += 1;
        }
        page
    }

    /// The selectable options for paragraph `page`: the other-uses link on
    /// the first paragraph, followed by the paragraph's own links.
    pub fn paragraph_options(&self, page: usize) -> Vec<Link> {
        let mut options = Vec::new();
        if page == 0
            && let Some(other) = &self.other_uses
        {
            options.push(Link::new(
                other.target.clone(),
                format!("Other uses of {} (disambiguation)", self.title),
            ));
        }
        if let Some(paragraph) = self.paragraphs.get(page) {
            options.extend(paragraph.links.iter().cloned());
        }
        options
    }
}
