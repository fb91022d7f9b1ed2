//! # Queries
//!
//! Turning typed or command-line words into a content-source query, and the
//! byte buffer behind the "Go to:" prompt.

/// Title-cases each whitespace-separated word and joins them with underscores.
///
/// ```text
/// ["new", "york"]   → "New_York"
/// ["rock-n-roll"]   → "Rock-N-Roll"
/// ```
pub fn build_query<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .flat_map(|w| w.as_ref().split_whitespace())
        .map(title_case)
        .collect::<Vec<_>>()
        .join("_")
}

/// Upper-cases the first letter of every word, where a word starts after
/// anything that is not a letter, digit or underscore.
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut at_boundary = true;
    for c in word.chars() {
        if at_boundary {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_boundary = !(c.is_alphanumeric() || c == '_');
    }
    out
}

/// Text typed at the prompt.
///
/// Input arrives one byte at a time, so multi-byte characters are held as
/// raw bytes and decoded on display.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryBuffer {
    bytes: Vec<u8>,
}

impl QueryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    /// Removes the last character. Returns `false` if the buffer was empty.
    pub fn pop(&mut self) -> bool {
        if self.bytes.is_empty() {
            return false;
        }
        // Drop UTF-8 continuation bytes, then the lead byte.
        while let Some(&b) = self.bytes.last() {
            self.bytes.pop();
            if b & 0xC0 != 0x80 {
                break;
            }
        }
        true
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// The buffer as a content-source query.
    pub fn to_query(&self) -> String {
        build_query(&[self.text()])
    }
}
