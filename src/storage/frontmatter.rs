//! Frontmatter parsing and rendering
//!
//! Posts start with an optional metadata block delimited by `---` lines:
//!
//! ```markdown
//! ---
//! title: "My Post"
//! date: 2026-01-01
//! tags: [rust, blog]
//! ---
//!
//! # Post content here
//! ```
//!
//! The block is a small YAML-like subset, one `key: value` per line:
//!
//! - `"quoted"` values lose exactly one pair of double quotes
//! - `[a, b]` values become lists, each item trimmed
//! - `YYYY-MM-DD` values that name a real day become dates
//! - anything else is kept as a trimmed string
//!
//! Parsing never fails. A document without a complete block comes back
//! with empty metadata and its text untouched. Inside the block, blank
//! lines, lines without a `:` and lines with an empty key are skipped.
//!
//! Rendering drops (with a warning) any field the line format cannot hold:
//! keys with a `:`, a line break or surrounding whitespace, strings with a
//! line break, and lists whose items hold `,`, `]`, a line break or
//! surrounding whitespace.

use super::document::{Meta, ParsedDocument, Value};
use crate::dates;

const DELIMITER: &str = "---";

/// Split `content` into frontmatter fields and body
pub fn parse(content: &str) -> ParsedDocument {
    match split(content) {
        Some((block, body)) => ParsedDocument {
            meta: parse_block(block),
            body: body.trim().to_string(),
        },
        None => ParsedDocument {
            meta: Meta::new(),
            body: content.to_string(),
        },
    }
}

/// Locate the metadata block. Returns the text between the delimiter lines
/// and everything after the closing one.
fn split(content: &str) -> Option<(&str, &str)> {
    let (first, mut rest) = next_line(content)?;
    if !is_delimiter(first) {
        return None;
    }

    let block_start = content.len() - rest.len();
    loop {
        let line_start = content.len() - rest.len();
        let (line, after) = next_line(rest)?;
        if is_delimiter(line) {
            return Some((&content[block_start..line_start], after));
        }
        rest = after;
    }
}

fn next_line(s: &str) -> Option<(&str, &str)> {
    if s.is_empty() {
        return None;
    }
    Some(match s.find('\n') {
        Some(i) => (&s[..i], &s[i + 1..]),
        None => (s, ""),
    })
}

fn is_delimiter(line: &str) -> bool {
    line.strip_suffix('\r').unwrap_or(line) == DELIMITER
}

fn parse_block(block: &str) -> Meta {
    let mut meta = Meta::new();

    for line in block.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        meta.insert(key.to_string(), parse_value(value.trim()));
    }

    meta
}

fn parse_value(raw: &str) -> Value {
    if let Some(inner) = unwrap_pair(raw, '"', '"') {
        return Value::String(inner.to_string());
    }

    if let Some(inner) = unwrap_pair(raw, '[', ']') {
        if inner.trim().is_empty() {
            return Value::List(Vec::new());
        }
        return Value::List(inner.split(',').map(|item| item.trim().to_string()).collect());
    }

    match dates::parse_date(raw) {
        Some(date) => Value::Date(date),
        None => Value::String(raw.to_string()),
    }
}

fn unwrap_pair(s: &str, open: char, close: char) -> Option<&str> {
    if s.len() < 2 {
        return None;
    }
    s.strip_prefix(open)?.strip_suffix(close)
}

/// Render fields and body back to markdown with frontmatter
pub fn render(meta: &Meta, body: &str) -> String {
    if meta.is_empty() {
        return body.to_string();
    }

    let mut out = String::new();
    out.push_str(DELIMITER);
    out.push('\n');

    for (key, value) in meta {
        if !is_writable_key(key) {
            tracing::warn!("Dropping frontmatter key that cannot be written: {:?}", key);
            continue;
        }
        let Some(rendered) = render_value(value) else {
            tracing::warn!("Dropping frontmatter value for {:?} that cannot be written", key);
            continue;
        };
        out.push_str(key);
        out.push_str(": ");
        out.push_str(&rendered);
        out.push('\n');
    }

    out.push_str(DELIMITER);
    out.push_str("\n\n");
    out.push_str(body);
    out
}

fn is_writable_key(key: &str) -> bool {
    !key.is_empty() && key.trim() == key && !key.contains([':', '\n', '\r'])
}

/// `None` when the value would not parse back unchanged
fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Date(date) => Some(date.format("%Y-%m-%d").to_string()),
        Value::List(items) => {
            // `[""]` would read back as an empty list
            if items.len() == 1 && items[0].is_empty() {
                return None;
            }
            let writable = items
                .iter()
                .all(|item| item.trim() == item && !item.contains([',', ']', '\n', '\r']));
            writable.then(|| format!("[{}]", items.join(", ")))
        }
        Value::String(s) if s.contains(['\n', '\r']) => None,
        Value::String(s) if needs_quotes(s) => Some(format!("\"{}\"", s)),
        Value::String(s) => Some(s.clone()),
    }
}

/// Strings that would read back as another type, or lose whitespace
fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s.trim() != s
        || s.starts_with('"')
        || unwrap_pair(s, '[', ']').is_some()
        || dates::looks_like_date(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_frontmatter() {
        let content = "---\ntitle: \"Test Post\"\ndate: 2026-01-01\ntags: [a, b]\n---\nBody content here.";

        let doc = parse(content);

        assert_eq!(doc.meta.get("title"), Some(&Value::from("Test Post")));
        assert_eq!(
            doc.meta.get("date"),
            Some(&Value::Date(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()))
        );
        assert_eq!(doc.meta.get("tags"), Some(&Value::from(vec!["a", "b"])));
        assert_eq!(doc.body.trim(), "Body content here.");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just a post\n\nWith no frontmatter.\n";
        let doc = parse(content);

        assert!(doc.meta.is_empty());
        assert_eq!(doc.body, content);
    }

    #[test]
    fn test_leading_whitespace_is_not_frontmatter() {
        let content = "\n---\ntitle: x\n---\nbody";
        let doc = parse(content);

        assert!(doc.meta.is_empty());
        assert_eq!(doc.body, content);
    }

    #[test]
    fn test_unclosed_frontmatter() {
        let content = "---\ntitle: Draft\n\nNo closing delimiter.";
        let doc = parse(content);

        assert!(doc.meta.is_empty());
        assert_eq!(doc.body, content);

        let doc = parse("---");
        assert!(doc.meta.is_empty());
        assert_eq!(doc.body, "---");
    }

    #[test]
    fn test_delimiter_must_be_whole_line() {
        let content = "----\ntitle: x\n----\nbody";
        assert!(parse(content).meta.is_empty());

        let content = "---\ntitle: x\n--- \nbody";
        let doc = parse(content);
        assert!(doc.meta.is_empty());
        assert_eq!(doc.body, content);
    }

    #[test]
    fn test_empty_block() {
        let doc = parse("---\n---\nJust body");
        assert!(doc.meta.is_empty());
        assert_eq!(doc.body, "Just body");

        let doc = parse("---\n---");
        assert!(doc.meta.is_empty());
        assert_eq!(doc.body, "");
    }

    #[test]
    fn test_body_is_trimmed() {
        let doc = parse("---\ntitle: x\n---\n\n\n  Hello\n\n");
        assert_eq!(doc.body, "Hello");
    }

    #[test]
    fn test_crlf_line_endings() {
        let doc = parse("---\r\ntitle: \"Windows\"\r\ntags: [a, b]\r\n---\r\nBody\r\n");

        assert_eq!(doc.meta.get("title"), Some(&Value::from("Windows")));
        assert_eq!(doc.meta.get("tags"), Some(&Value::from(vec!["a", "b"])));
        assert_eq!(doc.body, "Body");
    }

    #[test]
    fn test_quotes_strip_exactly_one_pair() {
        let doc = parse("---\na: \"\"double\"\"\nb: \"\"\nc: \"\nd: plain \"inner\"\n---\n");

        assert_eq!(doc.meta.get("a"), Some(&Value::from("\"double\"")));
        assert_eq!(doc.meta.get("b"), Some(&Value::from("")));
        assert_eq!(doc.meta.get("c"), Some(&Value::from("\"")));
        assert_eq!(doc.meta.get("d"), Some(&Value::from("plain \"inner\"")));
    }

    #[test]
    fn test_quoted_date_stays_string() {
        let doc = parse("---\ndate: \"2026-01-01\"\n---\n");
        assert_eq!(doc.meta.get("date"), Some(&Value::from("2026-01-01")));
    }

    #[test]
    fn test_unquoted_scalars_kept_verbatim() {
        let doc = parse("---\ntitle:   Hello, World!  \nurl: https://example.com:8080/x\ncount: 42\n---\n");

        assert_eq!(doc.meta.get("title"), Some(&Value::from("Hello, World!")));
        assert_eq!(doc.meta.get("url"), Some(&Value::from("https://example.com:8080/x")));
        assert_eq!(doc.meta.get("count"), Some(&Value::from("42")));
    }

    #[test]
    fn test_lists() {
        let doc = parse("---\nempty: []\nspaced: [ one ,two,  three ]\nsingle: [solo]\n---\n");

        assert_eq!(doc.meta.get("empty"), Some(&Value::List(vec![])));
        assert_eq!(
            doc.meta.get("spaced"),
            Some(&Value::from(vec!["one", "two", "three"]))
        );
        assert_eq!(doc.meta.get("single"), Some(&Value::from(vec!["solo"])));
    }

    #[test]
    fn test_invalid_calendar_date_is_string() {
        let doc = parse("---\ndate: 2026-02-30\nother: 2026-1-1\n---\n");
        assert_eq!(doc.meta.get("date"), Some(&Value::from("2026-02-30")));
        assert_eq!(doc.meta.get("other"), Some(&Value::from("2026-1-1")));
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let doc = parse("---\ntitle: Ok\nno colon here\n: orphan value\n# no colon either\n\n   \nlast: one\n---\nBody");

        assert_eq!(doc.meta.len(), 2);
        assert_eq!(doc.meta.get("title"), Some(&Value::from("Ok")));
        assert_eq!(doc.meta.get("last"), Some(&Value::from("one")));
        assert_eq!(doc.body, "Body");
    }

    #[test]
    fn test_hash_prefixed_key_is_a_key() {
        let doc = parse("---\n#tag: x\ntitle: t\n---\nb");

        assert_eq!(doc.meta.get("#tag"), Some(&Value::from("x")));
        assert_eq!(doc.meta.get("title"), Some(&Value::from("t")));

        let mut meta = Meta::new();
        meta.insert("#x".into(), Value::from("y"));
        assert_eq!(parse(&render(&meta, "b")).meta, meta);
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let doc = parse("---\ntitle: First\nauthor: me\ntitle: Second\n---\n");

        assert_eq!(doc.meta.get("title"), Some(&Value::from("Second")));
        assert_eq!(doc.meta.keys().collect::<Vec<_>>(), vec!["title", "author"]);
    }

    #[test]
    fn test_reparse_body_is_idempotent() {
        let doc = parse("---\ntitle: x\n---\nBody content here.");
        let again = parse(&doc.body);

        assert!(again.meta.is_empty());
        assert_eq!(again.body, doc.body);
    }

    #[test]
    fn test_closing_delimiter_later_in_body() {
        let doc = parse("---\ntitle: x\n---\nIntro\n---\nMore");
        assert_eq!(doc.body, "Intro\n---\nMore");
    }

    #[test]
    fn test_render_empty_meta_is_body() {
        assert_eq!(render(&Meta::new(), "# Content"), "# Content");
    }

    #[test]
    fn test_render_roundtrip() {
        let mut meta = Meta::new();
        meta.insert("title".into(), Value::from("Test"));
        meta.insert("date".into(), Value::Date(NaiveDate::from_ymd_opt(2026, 2, 4).unwrap()));
        meta.insert("tags".into(), Value::from(vec!["rust", "web"]));
        meta.insert("tricky".into(), Value::from("2026-03-01"));
        meta.insert("listy".into(), Value::from("[not, a, list]"));
        meta.insert("padded".into(), Value::from("  spaced  "));
        meta.insert("blank".into(), Value::from(""));
        meta.insert("quoted".into(), Value::from("\"already\""));

        let body = "# Content\n\nHello!";
        let rendered = render(&meta, body);
        let parsed = parse(&rendered);

        assert_eq!(parsed.meta, meta);
        assert_eq!(parsed.body, body);
    }

    #[test]
    fn test_render_drops_unwritable_values() {
        let mut meta = Meta::new();
        meta.insert("title".into(), Value::from("Hi\n---\nInjected"));
        meta.insert("tags".into(), Value::from(vec!["a,b", " c "]));
        meta.insert("bracket".into(), Value::from(vec!["x]"]));
        meta.insert("lone".into(), Value::from(vec![""]));
        meta.insert(" padded".into(), Value::from("v"));
        meta.insert("kept".into(), Value::from("ok"));

        let parsed = parse(&render(&meta, "Real body"));

        let mut expected = Meta::new();
        expected.insert("kept".into(), Value::from("ok"));
        assert_eq!(parsed.meta, expected);
        assert_eq!(parsed.body, "Real body");
    }

    #[test]
    fn test_render_layout() {
        let mut meta = Meta::new();
        meta.insert("title".into(), Value::from("Hello"));
        meta.insert("tags".into(), Value::from(vec!["a", "b"]));

        assert_eq!(render(&meta, "Body"), "---\ntitle: Hello\ntags: [a, b]\n---\n\nBody");
    }
}
