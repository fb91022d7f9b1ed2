//! # Text Layout Engine
//!
//! Fits one page of a document into the viewport.
//!
//! ```text
//! paragraph text ──▶ strip footnotes ──▶ collapse whitespace
//!                                             │
//!             options ──▶ highlight ranges ◀──┤
//!                                             ▼
//!                                     wrap to min(cols-4, 256)
//!                                             │
//!                                             ▼
//!                       fit rows: keep all lines + some options,
//!                             or cut lines and show no options
//! ```
//!
//! ## Screen rows
//!
//! ```text
//!  0  (blank)
//!  1    TITLE  [page/pages]
//!  2  (blank)
//!  …    wrapped text lines
//!     (blank)
//!  …    (1) option …
//!     (blank)
//! -3  Go to: / status
//! -2  command bar
//! -1  command bar
//! ```
//!
//! Highlights are styles on spans, not bytes in the text, so the row count
//! of the text is exactly its number of wrapped lines.

use std::ops::Range;
use std::sync::LazyLock;

use ratatui::layout::Size;
use regex::Regex;
use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::document::{ENTRIES_PER_PAGE, Link};

/// Left margin before every text line and option.
pub const MARGIN: u16 = 2;
/// Upper bound on the wrap width, however wide the terminal.
pub const MAX_WIDTH: usize = 256;
/// At most this many options are ever listed.
pub const MAX_OPTIONS: usize = ENTRIES_PER_PAGE;
/// Shown on its own line after text cut short.
pub const TRUNCATION_MARKER: &str = "...";

pub const HEADER_ROWS: usize = 3;
const GAP_AFTER_TEXT: usize = 1;
const GAP_BEFORE_PROMPT: usize = 1;
const PROMPT_ROWS: usize = 1;
pub const COMMAND_BAR_ROWS: usize = 2;
/// Rows never available to text or options.
pub const RESERVED_ROWS: usize =
    HEADER_ROWS + GAP_AFTER_TEXT + GAP_BEFORE_PROMPT + PROMPT_ROWS + COMMAND_BAR_ROWS;

static FOOTNOTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([0-9]+|citation needed)\]").expect("valid footnote regex")
});

/// One wrapped line, without margin. `highlights` are byte ranges into `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub text: String,
    pub highlights: Vec<Range<usize>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphLayout {
    pub lines: Vec<TextLine>,
    /// Lines were dropped to fit; the marker line follows the last one.
    pub truncated: bool,
    /// How many of the options to list.
    pub visible_options: usize,
}

/// Wrap width for a viewport `columns` wide.
pub fn wrap_width(columns: u16) -> usize {
    (columns as usize).saturating_sub(4).clamp(1, MAX_WIDTH)
}

/// Column budget for one listed option.
pub fn option_width(columns: u16) -> usize {
    (columns as usize).saturating_sub(8).clamp(4, MAX_WIDTH)
}

/// Rows left for text and options once the fixed rows are taken.
pub fn available_rows(rows: u16) -> usize {
    (rows as usize).saturating_sub(RESERVED_ROWS)
}

/// `(1)` … `(9)`, then `(0)` for the tenth.
pub fn option_label(index: usize) -> String {
    format!("({})", (index + 1) % 10)
}

/// Removes `[12]` and `[citation needed]` markers.
pub fn strip_footnotes(text: &str) -> String {
    FOOTNOTE_RE.replace_all(text, "").into_owned()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Byte ranges of the options' display texts in `text`.
///
/// Each option is searched for after the end of the previous match, so
/// repeated words pair up with options in order. An option whose text is
/// not found is skipped and does not move the search on.
pub fn highlight_ranges(text: &str, options: &[Link]) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut from = 0;
    for option in options {
        if option.text.is_empty() {
            continue;
        }
        if let Some(found) = text[from..].find(&option.text) {
            let start = from + found;
            let end = start + option.text.len();
            ranges.push(start..end);
            from = end;
        }
    }
    ranges
}

/// Greedy word wrap. Words wider than `width` get a line to themselves.
/// Returns the byte range of each line in `text`.
fn wrap_ranges(text: &str, width: usize) -> Vec<Range<usize>> {
    let options = Options::new(width)
        .break_words(false)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation)
        .wrap_algorithm(WrapAlgorithm::FirstFit);

    let mut ranges = Vec::new();
    let mut cursor = 0;
    for line in textwrap::wrap(text, options) {
        let rest = &text[cursor..];
        let start = cursor + (rest.len() - rest.trim_start().len());
        let end = (start + line.len()).min(text.len());
        ranges.push(start..end);
        cursor = end;
    }
    ranges
}

fn clip_highlights(highlights: &[Range<usize>], line: &Range<usize>) -> Vec<Range<usize>> {
    highlights
        .iter()
        .filter(|h| h.start < line.end && h.end > line.start)
        .map(|h| h.start.max(line.start) - line.start..h.end.min(line.end) - line.start)
        .collect()
}

/// Lays out a paragraph and decides how many options fit below it.
///
/// If the wrapped text needs more rows than are available, no options are
/// listed and the text is cut to leave one row for the truncation marker.
/// Otherwise `min(10, options, rows left)` options are listed.
pub fn layout_paragraph(text: &str, options: &[Link], viewport: Size) -> ParagraphLayout {
    let clean = collapse_whitespace(&strip_footnotes(text));
    let highlights = highlight_ranges(&clean, options);

    let mut lines: Vec<TextLine> = wrap_ranges(&clean, wrap_width(viewport.width))
        .into_iter()
        .map(|range| TextLine {
            text: clean[range.clone()].to_string(),
            highlights: clip_highlights(&highlights, &range),
        })
        .collect();

    let available = available_rows(viewport.height);
    if lines.len() > available {
        lines.truncate(available.saturating_sub(1));
        return ParagraphLayout {
            lines,
            truncated: true,
            visible_options: 0,
        };
    }

    let visible_options = MAX_OPTIONS
        .min(options.len())
        .min(available - lines.len());
    ParagraphLayout {
        lines,
        truncated: false,
        visible_options,
    }
}

/// Cuts `text` to `width` columns, ending in `...` when anything was cut.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let budget = width.saturating_sub(TRUNCATION_MARKER.len());
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(TRUNCATION_MARKER);
    out
}

/// Numbered lines for listed options, already cut to the column budget.
pub fn option_lines(options: &[Link], count: usize, columns: u16) -> Vec<(String, String)> {
    let width = option_width(columns);
    options
        .iter()
        .take(count.min(MAX_OPTIONS))
        .enumerate()
        .map(|(i, link)| (option_label(i), truncate_to_width(&link.text, width)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(width: u16, height: u16) -> Size {
        Size { width, height }
    }

    fn links(texts: &[&str]) -> Vec<Link> {
        texts
            .iter()
            .map(|t| Link::new(format!("/wiki/{}", t.replace(' ', "_")), *t))
            .collect()
    }

    const PROSE: &str = "Go is an abstract strategy board game for two players in which the \
        aim is to fence off more territory than the opponent. The game was invented in China \
        more than 2,500 years ago and is believed to be the oldest board game continuously \
        played to the present day.";

    #[test]
    fn test_reserved_rows() {
        assert_eq!(RESERVED_ROWS, 8);
        assert_eq!(available_rows(25), 17);
        assert_eq!(available_rows(5), 0);
    }

    #[test]
    fn test_wrap_width_bounds() {
        assert_eq!(wrap_width(80), 76);
        assert_eq!(wrap_width(1000), MAX_WIDTH);
        assert_eq!(wrap_width(3), 1);
    }

    #[test]
    fn test_lines_never_exceed_wrap_width() {
        let long_word = "Pneumonoultramicroscopicsilicovolcanoconiosis";
        let text = format!("{PROSE} {long_word} {PROSE}");
        for columns in [5u16, 12, 20, 33, 47, 80, 132, 300] {
            let width = wrap_width(columns);
            let layout = layout_paragraph(&text, &[], size(columns, 500));
            assert!(!layout.truncated);
            for line in &layout.lines {
                let single_word = !line.text.contains(' ');
                assert!(
                    line.text.width() <= width || single_word,
                    "line {:?} wider than {} at {} columns",
                    line.text,
                    width,
                    columns
                );
            }
        }
    }

    #[test]
    fn test_wrapping_keeps_every_word_in_order() {
        let layout = layout_paragraph(PROSE, &[], size(30, 500));
        let joined = layout
            .lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(joined, collapse_whitespace(PROSE));
    }

    #[test]
    fn test_footnotes_stripped_before_wrap() {
        let text = "Paris is the capital of France.[1] It is large.[citation needed][23]";
        let layout = layout_paragraph(text, &[], size(80, 25));
        assert_eq!(layout.lines.len(), 1);
        assert_eq!(layout.lines[0].text, "Paris is the capital of France. It is large.");
    }

    #[test]
    fn test_non_numeric_brackets_kept() {
        assert_eq!(strip_footnotes("[a] and [note 1]"), "[a] and [note 1]");
    }

    #[test]
    fn test_highlight_search_consumes_text() {
        let text = "the cat and the dog and the cat";
        let ranges = highlight_ranges(text, &links(&["cat", "dog", "cat", "bird"]));
        assert_eq!(ranges, vec![4..7, 16..19, 28..31]);
    }

    #[test]
    fn test_missing_link_does_not_advance_search() {
        let text = "alpha beta gamma";
        let ranges = highlight_ranges(text, &links(&["zeta", "alpha", "gamma"]));
        assert_eq!(ranges, vec![0..5, 11..16]);
    }

    #[test]
    fn test_highlight_split_across_lines() {
        let options = links(&["strategy board game"]);
        let layout = layout_paragraph(PROSE, &options, size(30, 500));
        let highlighted: Vec<String> = layout
            .lines
            .iter()
            .flat_map(|l| l.highlights.iter().map(|h| l.text[h.clone()].to_string()))
            .collect();
        assert_eq!(highlighted.join(" "), "strategy board game");
        assert!(highlighted.len() > 1);
    }

    #[test]
    fn test_options_limited_by_remaining_rows() {
        let options = links(&["a1", "a2", "a3", "a4", "a5", "a6", "a7", "a8", "a9", "a10", "a11"]);
        let roomy = layout_paragraph("One line.", &options, size(80, 40));
        assert_eq!(roomy.visible_options, 10);

        // 12 rows: 4 available, 1 text line, 3 options.
        let tight = layout_paragraph("One line.", &options, size(80, 12));
        assert_eq!(tight.visible_options, 3);
        assert!(!tight.truncated);
    }

    #[test]
    fn test_overflow_drops_options_and_truncates() {
        let options = links(&["board game"]);
        let layout = layout_paragraph(PROSE, &options, size(20, 12));
        assert!(layout.truncated);
        assert_eq!(layout.visible_options, 0);
        assert_eq!(layout.lines.len(), available_rows(12) - 1);
    }

    #[test]
    fn test_truncation_is_stable() {
        let viewport = size(24, 13);
        let first = layout_paragraph(PROSE, &[], viewport);
        assert!(first.truncated);
        let kept = first
            .lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let again = layout_paragraph(&kept, &[], viewport);
        assert_eq!(again.lines, first.lines);
        assert_eq!(layout_paragraph(PROSE, &[], viewport), first);
    }

    #[test]
    fn test_option_numbering() {
        let labels: Vec<String> = (0..10).map(option_label).collect();
        assert_eq!(labels[0], "(1)");
        assert_eq!(labels[8], "(9)");
        assert_eq!(labels[9], "(0)");
    }

    #[test]
    fn test_option_lines_truncate_long_text() {
        let long = "x".repeat(100);
        let options = links(&[long.as_str(), "short"]);
        let lines = option_lines(&options, 2, 40);
        assert_eq!(lines[0].1.width(), option_width(40));
        assert!(lines[0].1.ends_with("..."));
        assert_eq!(lines[1], ("(2)".to_string(), "short".to_string()));
    }

    #[test]
    fn test_truncate_to_width_wide_chars() {
        assert_eq!(truncate_to_width("東京都庁舎", 7), "東京...");
        assert_eq!(truncate_to_width("abc", 3), "abc");
    }
}
