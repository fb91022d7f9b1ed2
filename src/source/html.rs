//! # HTML Extraction
//!
//! Turns a rendered article page into a `Document`. Pattern matching with
//! `regex` plus a depth-counting scan for nested elements; no DOM is built.
//!
//! ```text
//! <h1 id="firstHeading">      → title
//! <div id="mw-content-text">  → body
//!   <table>, <style>          → removed
//!   <p>…</p>                  → paragraphs (+ their article links)
//!   <li>…</li>                → disambiguation entries
//!   <div class="hatnote">     → "other uses" link
//! ```

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::core::document::{Document, Link, Paragraph};

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<h1\b[^>]*firstHeading[^>]*>(.*?)</h1>"#).expect("valid title regex")
});

static CONTENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<(div)\b[^>]*\bid="mw-content-text"[^>]*>"#).expect("valid content regex")
});

static PARAGRAPH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<p\b[^>]*>(.*?)</p>").expect("valid paragraph regex")
});

static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<a\b([^>]*)>(.*?)</a>").expect("valid anchor regex")
});

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z][\w-]*)\s*=\s*"([^"]*)""#).expect("valid attribute regex")
});

static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<li\b([^>]*)>").expect("valid list item regex"));

static HATNOTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div\b[^>]*class="[^"]*\bhatnote\b[^"]*"[^>]*>"#).expect("valid hatnote regex")
});

static REFERENCES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<ol\b[^>]*class="[^"]*\breferences\b[^"]*"[^>]*>"#)
        .expect("valid references regex")
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"));

static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#?[A-Za-z0-9]+);").expect("valid entity regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

const DISAMBIGUATION_MARKERS: &[&str] = &[
    "dmbox-disambig",
    "disambigbox",
    "Category:Disambiguation_pages",
    ">Disambiguation pages<",
];

/// Link titles that never make useful options.
const SKIPPED_TITLE_PREFIXES: &[&str] = &["Help:IPA", "Wikipedia:", "File:"];

/// Parses an article page. Returns `None` when the page has no article body.
pub fn parse_document(html: &str, origin: &str) -> Option<Document> {
    let body = content_body(html)?;
    let body = remove_elements(body, "table");
    let body = remove_elements(&body, "style");
    let body = remove_reference_lists(&body);

    let title = TITLE_RE
        .captures(html)
        .map(|c| text_of(&c[1]))
        .unwrap_or_default();

    let is_disambiguation = DISAMBIGUATION_MARKERS.iter().any(|m| html.contains(m));

    let mut document = Document {
        title,
        origin: origin.to_string(),
        is_disambiguation,
        other_uses: other_uses_link(&body),
        ..Default::default()
    };

    if is_disambiguation {
        document.entries = list_entries(&body);
    } else {
        document.paragraphs = paragraphs(&body);
    }
    Some(document)
}

/// Inner HTML of the `mw-content-text` container.
fn content_body(html: &str) -> Option<&str> {
    let caps = CONTENT_RE.captures(html)?;
    let open = caps.get(0)?;
    let range = element_inner(html, &caps[1], open.end())?;
    Some(&html[range])
}

/// Finds the inner range of an element whose opening tag ends at `from`,
/// counting nested elements of the same name.
fn element_inner(html: &str, tag: &str, from: usize) -> Option<Range<usize>> {
    let open_tag = format!("<{tag}");
    let close_tag = format!("</{tag}>");
    let mut depth = 1;
    let mut scan = from;
    loop {
        let next_open = html[scan..].find(&open_tag);
        let next_close = html[scan..].find(&close_tag)?;
        match next_open {
            Some(o) if o < next_close => {
                depth += 1;
                scan += o + open_tag.len();
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(from..scan + next_close);
                }
                scan += next_close + close_tag.len();
            }
        }
    }
}

/// Removes every `tag` element, nested ones included. An unclosed element
/// is cut to the end of the input.
fn remove_elements(html: &str, tag: &str) -> String {
    let open_tag = format!("<{tag}");
    let close_tag = format!("</{tag}>");
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find(&open_tag) {
        out.push_str(&rest[..start]);
        let Some(tag_end) = rest[start..].find('>') else {
            return out;
        };
        match element_inner(rest, tag, start + tag_end + 1) {
            Some(inner) => rest = &rest[inner.end + close_tag.len()..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Removes `<ol class="references">` citation lists.
fn remove_reference_lists(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(open) = REFERENCES_RE.find(rest) {
        out.push_str(&rest[..open.start()]);
        match element_inner(rest, "ol", open.end()) {
            Some(inner) => rest = &rest[inner.end + "</ol>".len()..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Every `<p>` whose text has at least two characters.
fn paragraphs(body: &str) -> Vec<Paragraph> {
    PARAGRAPH_RE
        .captures_iter(body)
        .filter_map(|caps| {
            let inner = &caps[1];
            let text = text_of(inner);
            if text.chars().count() < 2 {
                return None;
            }
            Some(Paragraph::new(text, article_links(inner)))
        })
        .collect()
}

/// Anchors in `html` that lead to other articles.
fn article_links(html: &str) -> Vec<Link> {
    ANCHOR_RE
        .captures_iter(html)
        .filter_map(|caps| {
            let attrs = &caps[1];
            let href = attribute(attrs, "href")?;
            let text = text_of(&caps[2]);
            let title = attribute(attrs, "title");
            is_article_link(&href, &text, title.as_deref()).then(|| Link::new(href, text))
        })
        .collect()
}

fn is_article_link(href: &str, text: &str, title: Option<&str>) -> bool {
    let internal = href.starts_with("/wiki/") || href.starts_with("/w/");
    let skipped_title = title.is_some_and(|t| {
        SKIPPED_TITLE_PREFIXES
            .iter()
            .any(|prefix| t.starts_with(prefix))
    });
    internal && text.chars().count() > 1 && !skipped_title && !href.contains("redlink=1")
}

/// Disambiguation list items, in document order. Nested items are entries
/// too; an item's own text stops where its nested list begins.
fn list_entries(body: &str) -> Vec<Link> {
    LIST_ITEM_RE
        .captures_iter(body)
        .filter_map(|caps| {
            let open = caps.get(0)?;
            if attribute(&caps[1], "class").is_some_and(|c| c.starts_with("toclevel")) {
                return None;
            }
            let rest = &body[open.end()..];
            let end = ["<li", "</li>"]
                .iter()
                .filter_map(|t| rest.find(t))
                .min()
                .unwrap_or(rest.len());
            let item = &rest[..end];

            let target = ANCHOR_RE
                .captures(item)
                .and_then(|a| attribute(&a[1], "href"))?;
            let own = ["<ul", "<ol", "<dl"]
                .iter()
                .filter_map(|t| item.find(t))
                .min()
                .map_or(item, |cut| &item[..cut]);
            let text = text_of(own);
            (!text.is_empty()).then(|| Link::new(target, text))
        })
        .collect()
}

/// The first `mw-disambig` anchor inside a hatnote.
fn other_uses_link(body: &str) -> Option<Link> {
    HATNOTE_RE.find_iter(body).find_map(|open| {
        let inner = element_inner(body, "div", open.end())?;
        ANCHOR_RE.captures_iter(&body[inner]).find_map(|a| {
            let class = attribute(&a[1], "class")?;
            if !class.split_whitespace().any(|c| c == "mw-disambig") {
                return None;
            }
            Some(Link::new(attribute(&a[1], "href")?, text_of(&a[2])))
        })
    })
}

fn attribute(attrs: &str, name: &str) -> Option<String> {
    ATTR_RE
        .captures_iter(attrs)
        .find(|c| c[1].eq_ignore_ascii_case(name))
        .map(|c| decode_entities(&c[2]))
}

/// Visible text of an HTML fragment: tags dropped, entities decoded,
/// whitespace collapsed.
pub fn text_of(html: &str) -> String {
    let stripped = TAG_RE.replace_all(html, "");
    let decoded = decode_entities(&stripped);
    WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string()
}

/// Replaces `&name;` and `&#NN;` references. Unknown entities are left as is.
pub fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures| match decode_entity(&caps[1]) {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn decode_entity(entity: &str) -> Option<char> {
    let c = match entity.to_ascii_lowercase().as_str() {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "ndash" => '–',
        "mdash" => '—',
        "hellip" => '…',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "laquo" => '«',
        "raquo" => '»',
        "middot" => '·',
        "deg" => '°',
        "minus" => '−',
        "times" => '×',
        _ => return decode_numeric_entity(entity),
    };
    Some(c)
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let value = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    match char::from_u32(value)? {
        '\u{a0}' => Some(' '),
        c => Some(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> String {
        format!(
            r#"<html><body><h1 id="firstHeading" class="firstHeading"><span>Go (game)</span></h1>
<div id="bodyContent"><div id="mw-content-text" class="mw-body-content"><div class="mw-parser-output">{body}</div></div></div>
<div id="catlinks"></div></body></html>"#
        )
    }

    #[test]
    fn test_missing_body_is_none() {
        assert!(parse_document("<html><p>Hello there</p></html>", "u").is_none());
    }

    #[test]
    fn test_title_and_origin() {
        let doc = parse_document(&page("<p>Go is a game.</p>"), "https://x/wiki/Go").unwrap();
        assert_eq!(doc.title, "Go (game)");
        assert_eq!(doc.origin, "https://x/wiki/Go");
        assert!(!doc.is_disambiguation);
    }

    #[test]
    fn test_paragraphs_drop_short_and_table_content() {
        let body = r#"<table class="infobox"><tr><td><p>Inside a table</p></td></tr></table>
<p> </p><p>x</p>
<p>Go is an <b>abstract</b> strategy game.</p>
<style>.a{color:red}</style>
<p>Second   paragraph
here.</p>"#;
        let doc = parse_document(&page(body), "u").unwrap();
        let texts: Vec<&str> = doc.paragraphs.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Go is an abstract strategy game.", "Second paragraph here."]
        );
    }

    #[test]
    fn test_nested_tables_removed() {
        let body = r#"<table><tr><td><table><tr><td><p>deep</p></td></tr></table><p>mid</p></td></tr></table><p>After tables.</p>"#;
        let doc = parse_document(&page(body), "u").unwrap();
        assert_eq!(doc.paragraphs.len(), 1);
        assert_eq!(doc.paragraphs[0].text, "After tables.");
    }

    #[test]
    fn test_link_filter() {
        let body = r##"<p>
<a href="/wiki/Board_game" title="Board game">board game</a>
<a href="/wiki/X" title="X">X</a>
<a href="/wiki/Help:IPA/English" title="Help:IPA/English">[ɡoʊ]</a>
<a href="/wiki/Wikipedia:Citation" title="Wikipedia:Citation">citation</a>
<a href="/wiki/File:Go.svg" title="File:Go.svg">image</a>
<a href="/w/index.php?title=Nope&amp;redlink=1" title="Nope">nope</a>
<a href="#cite_note-1">[1]</a>
<a href="https://example.org">external</a>
<a href="/w/index.php?title=Weiqi" title="Weiqi">weiqi</a>
</p>"##;
        let doc = parse_document(&page(body), "u").unwrap();
        let links = &doc.paragraphs[0].links;
        assert_eq!(
            links,
            &vec![
                Link::new("/wiki/Board_game", "board game"),
                Link::new("/w/index.php?title=Weiqi", "weiqi"),
            ]
        );
    }

    #[test]
    fn test_entities_decoded() {
        let doc = parse_document(
            &page("<p>Tom &amp; Jerry&#160;&#x2014; &quot;cat&quot; &bogus;</p>"),
            "u",
        )
        .unwrap();
        assert_eq!(doc.paragraphs[0].text, "Tom & Jerry — \"cat\" &bogus;");
    }

    #[test]
    fn test_disambiguation_entries() {
        let body = r#"<p><b>Mercury</b> may refer to:</p>
<ul>
<li class="toclevel-1"><a href="/wiki/Mercury#Science">Science</a></li>
<li><a href="/wiki/Mercury_(planet)" title="Mercury (planet)">Mercury (planet)</a>, the first planet</li>
<li><a href="/wiki/Mercury_(element)">Mercury (element)</a>, a metal
  <ul><li><a href="/wiki/Mercury_poisoning">Mercury poisoning</a></li></ul>
</li>
</ul>
<table id="disambigbox" class="metadata plainlinks dmbox dmbox-disambig"><tr><td>list</td></tr></table>"#;
        let doc = parse_document(&page(body), "u").unwrap();
        assert!(doc.is_disambiguation);
        assert!(doc.paragraphs.is_empty());
        let entries: Vec<(&str, &str)> = doc
            .entries
            .iter()
            .map(|l| (l.target.as_str(), l.text.as_str()))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("/wiki/Mercury_(planet)", "Mercury (planet), the first planet"),
                ("/wiki/Mercury_(element)", "Mercury (element), a metal"),
                ("/wiki/Mercury_poisoning", "Mercury poisoning"),
            ]
        );
    }

    #[test]
    fn test_other_uses_link_from_hatnote() {
        let body = r#"<div role="note" class="hatnote navigation-not-searchable">For other uses, see <a href="/wiki/Go_(disambiguation)" class="mw-disambig" title="Go (disambiguation)">Go (disambiguation)</a>.</div>
<p>Go is a game.</p>"#;
        let doc = parse_document(&page(body), "u").unwrap();
        assert_eq!(
            doc.other_uses,
            Some(Link::new("/wiki/Go_(disambiguation)", "Go (disambiguation)"))
        );
    }

    #[test]
    fn test_no_other_uses_without_disambig_class() {
        let body = r#"<div class="hatnote">See also <a href="/wiki/Chess">Chess</a></div><p>Go is a game.</p>"#;
        let doc = parse_document(&page(body), "u").unwrap();
        assert!(doc.other_uses.is_none());
    }

    #[test]
    fn test_remove_elements_unclosed_cuts_rest() {
        assert_eq!(remove_elements("a<table><tr>b", "table"), "a");
        assert_eq!(remove_elements("a<style>x</style>b", "style"), "ab");
    }

    #[test]
    fn test_reference_lists_are_not_entries() {
        let body = r#"<ul><li><a href="/wiki/Mercury_(planet)">Mercury (planet)</a></li></ul>
<div class="reflist"><ol class="references"><li id="cite_note-1"><a href="/wiki/Some_source">Some source</a> <ol><li>nested</li></ol></li></ol></div>
<div class="dmbox-disambig"></div>"#;
        let doc = parse_document(&page(body), "u").unwrap();
        assert_eq!(
            doc.entries,
            vec![Link::new("/wiki/Mercury_(planet)", "Mercury (planet)")]
        );
    }
}
