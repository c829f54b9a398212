//! Post representation
//!
//! A Post is a single markdown file with a frontmatter block.
//! The frontmatter holds the metadata (title, date, tags), and the body
//! holds the markdown content.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::dates;

/// A value decoded from a frontmatter line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Value {
    Date(NaiveDate),
    List(Vec<String>),
    String(String),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::List(items.into_iter().map(str::to_string).collect())
    }
}

/// Frontmatter keys mapped to their values, in source order
pub type Meta = IndexMap<String, Value>;

/// The result of splitting a document into frontmatter and body
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParsedDocument {
    pub meta: Meta,
    pub body: String,
}

/// A blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier (file name without the .md extension)
    pub slug: String,

    /// Path relative to the posts directory
    pub path: PathBuf,

    /// Frontmatter fields
    pub meta: Meta,

    /// Markdown body content
    pub body: String,
}

impl Post {
    /// Create an empty post with the given slug
    pub fn new(slug: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            path: PathBuf::from(format!("{}.md", &slug)),
            slug,
            meta: Meta::new(),
            body: String::new(),
        }
    }

    /// Set a frontmatter field
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Get a frontmatter field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.meta.get(key)
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Build a post from raw markdown content
    pub fn parse(slug: impl Into<String>, content: &str) -> Self {
        let slug = slug.into();
        let ParsedDocument { meta, body } = super::frontmatter::parse(content);

        Self {
            path: PathBuf::from(format!("{}.md", &slug)),
            slug,
            meta,
            body,
        }
    }

    /// Render the post back to markdown with frontmatter
    pub fn render(&self) -> String {
        super::frontmatter::render(&self.meta, &self.body)
    }

    /// The `title` field, or the slug when there is none
    pub fn title(&self) -> &str {
        self.get("title")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.slug)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.get("date").and_then(Value::as_date)
    }

    /// The `tags` field. A single unbracketed tag counts as a one-item list.
    pub fn tags(&self) -> Vec<String> {
        match self.get("tags") {
            Some(Value::List(items)) => items.iter().filter(|t| !t.is_empty()).cloned().collect(),
            Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
            _ => Vec::new(),
        }
    }

    /// Site-relative URL of the post page
    pub fn url(&self) -> String {
        format!("post/{}/", self.slug)
    }

    pub fn summary(&self) -> PostSummary {
        let date = self.date();
        PostSummary {
            slug: self.slug.clone(),
            title: self.title().to_string(),
            date: date.map(|d| d.to_string()),
            date_display: date.map(dates::format_naive_date),
            tags: self.tags(),
            url: self.url(),
        }
    }
}

/// Flattened post data handed to templates and the JSON index
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub date: Option<String>,
    pub date_display: Option<String>,
    pub tags: Vec<String>,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_creation() {
        let mut post = Post::new("hello");
        post.set("title", "Hello World")
            .set("date", NaiveDate::from_ymd_opt(2026, 2, 4).unwrap())
            .set("tags", vec!["rust", "blog"]);

        assert_eq!(post.slug, "hello");
        assert_eq!(post.title(), "Hello World");
        assert_eq!(post.date(), NaiveDate::from_ymd_opt(2026, 2, 4));
        assert_eq!(post.tags(), vec!["rust", "blog"]);
    }

    #[test]
    fn test_title_falls_back_to_slug() {
        let post = Post::new("untitled-draft");
        assert_eq!(post.title(), "untitled-draft");

        let mut post = Post::new("empty-title");
        post.set("title", "");
        assert_eq!(post.title(), "empty-title");
    }

    #[test]
    fn test_single_string_tag() {
        let mut post = Post::new("one-tag");
        post.set("tags", "rust");
        assert_eq!(post.tags(), vec!["rust"]);
    }

    #[test]
    fn test_undated_post() {
        let mut post = Post::new("draft");
        post.set("date", "someday");
        assert_eq!(post.date(), None);
        assert_eq!(post.summary().date_display, None);
    }

    #[test]
    fn test_summary() {
        let post = Post::parse(
            "guardians",
            "---\ntitle: Guardians\ndate: 2026-02-04\ntags: [ai]\n---\nText",
        );
        let summary = post.summary();

        assert_eq!(summary.title, "Guardians");
        assert_eq!(summary.date.as_deref(), Some("2026-02-04"));
        assert_eq!(summary.date_display.as_deref(), Some("February 4, 2026"));
        assert_eq!(summary.url, "post/guardians/");
    }

    #[test]
    fn test_roundtrip() {
        let mut post = Post::new("test");
        post.set("title", "Test Post");
        post.body = "This is the body.\n\nWith multiple paragraphs.".into();

        let rendered = post.render();
        let parsed = Post::parse("test", &rendered);

        assert_eq!(parsed.meta, post.meta);
        assert_eq!(parsed.body.trim(), post.body.trim());
    }

    #[test]
    fn test_value_serializes_untagged() {
        let mut meta = Meta::new();
        meta.insert("title".into(), Value::from("Test"));
        meta.insert("date".into(), Value::Date(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
        meta.insert("tags".into(), Value::from(vec!["a", "b"]));

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": "Test", "date": "2026-01-01", "tags": ["a", "b"]})
        );
    }
}
