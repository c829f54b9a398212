//! Page routes
//!
//! The blog answers a handful of paths, written either as hash routes
//! (`#/post/hello`) or plain paths (`/post/hello`):
//!
//! | Path            | Route       |
//! |-----------------|-------------|
//! | `/`             | `Home`      |
//! | `/archive`      | `Archive`   |
//! | `/tags`         | `Tags`      |
//! | `/tags/<tag>`   | `Tag`       |
//! | `/post/<slug>`  | `Post`      |
//! | anything else   | `NotFound`  |

use std::fmt;

use crate::validation::validate_slug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Archive,
    Tags,
    /// Tag slug, as produced by [`crate::validation::slugify`]
    Tag(String),
    Post(String),
    /// The path that failed to resolve
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        // `/#/archive` routes on the fragment, like the browser does
        let trimmed = match trimmed.split_once('#') {
            Some((_, fragment)) => fragment,
            None => trimmed,
        };
        let trimmed = trimmed.split('?').next().unwrap_or_default();
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["index.html"] => Route::Home,
            ["archive"] => Route::Archive,
            ["tags"] => Route::Tags,
            ["tags", tag] if validate_slug(tag).is_ok() => Route::Tag(tag.to_string()),
            ["post", slug] if validate_slug(slug).is_ok() => Route::Post(slug.to_string()),
            _ => Route::NotFound(path.to_string()),
        }
    }

    /// Site-relative path of the page, without the base URL
    pub fn href(&self) -> String {
        match self {
            Route::Home => String::new(),
            Route::Archive => "archive/".to_string(),
            Route::Tags => "tags/".to_string(),
            Route::Tag(tag) => format!("tags/{}/", tag),
            Route::Post(slug) => format!("post/{}/", slug),
            Route::NotFound(_) => "404.html".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::NotFound(path) => write!(f, "not found ({})", path),
            other => write!(f, "/{}", other.href()),
        }
    }
}
