//! Site pages for inkpost
//!
//! Every page is a tera template rendered against the loaded posts. The
//! same rendering backs both `show` (one page to stdout) and `build`
//! (the whole site to disk).
//!
//! # Output Structure
//!
//! ```text
//! /dist/
//!   index.html                 # post list
//!   archive/index.html         # posts grouped by year
//!   tags/index.html            # tag cloud
//!   tags/{tag}/index.html      # posts with one tag
//!   post/{slug}/index.html     # single post
//!   404.html
//!   posts.json                 # metadata and body of every post
//! ```

mod build;
mod templates;

pub use build::{build, BuildReport};
pub use templates::{markdown_to_html, TemplateEngine};

use serde::Serialize;
use tera::Context;

use crate::config::SiteConfig;
use crate::error::Result;
use crate::routes::Route;
use crate::storage::document::{Post, PostSummary};
use crate::validation::slugify;

/// Dated posts from one year
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ArchiveYear {
    pub year: i32,
    pub posts: Vec<PostSummary>,
}

/// How many posts carry a tag
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TagCount {
    /// Display name, as first written in a post
    pub tag: String,
    pub slug: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Ok,
    NotFound,
}

/// A rendered page
#[derive(Debug, Clone)]
pub struct Page {
    pub route: Route,
    pub status: PageStatus,
    pub html: String,
}

/// Group dated posts by year, newest year first
///
/// Posts keep their relative order within a year. Undated posts are left out.
pub fn archive(posts: &[Post]) -> Vec<ArchiveYear> {
    use chrono::Datelike;

    let mut years: Vec<ArchiveYear> = Vec::new();
    for post in posts {
        let Some(date) = post.date() else { continue };
        let year = date.year();

        match years.iter_mut().find(|y| y.year == year) {
            Some(group) => group.posts.push(post.summary()),
            None => years.push(ArchiveYear {
                year,
                posts: vec![post.summary()],
            }),
        }
    }

    years.sort_by(|a, b| b.year.cmp(&a.year));
    years
}

/// Count posts per tag, most used first, ties by name
///
/// Tags that slugify to the same value (`Rust`, `rust`) are one tag.
pub fn tag_cloud(posts: &[Post]) -> Vec<TagCount> {
    let mut counts: Vec<TagCount> = Vec::new();

    for post in posts {
        let mut seen: Vec<String> = Vec::new();
        for tag in post.tags() {
            let Some(slug) = slugify(&tag) else {
                tracing::debug!(slug = %post.slug, "Tag {:?} has no usable slug", tag);
                continue;
            };
            if seen.contains(&slug) {
                continue;
            }

            match counts.iter_mut().find(|t| t.slug == slug) {
                Some(entry) => entry.count += 1,
                None => counts.push(TagCount {
                    tag,
                    slug: slug.clone(),
                    count: 1,
                }),
            }
            seen.push(slug);
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.slug.cmp(&b.slug)));
    counts
}

/// Posts carrying the tag with the given slug
pub fn tagged<'a>(posts: &'a [Post], tag_slug: &str) -> Vec<&'a Post> {
    posts
        .iter()
        .filter(|p| p.tags().iter().any(|t| slugify(t).as_deref() == Some(tag_slug)))
        .collect()
}

/// Render the page for a route
///
/// A route that names a post or tag that doesn't exist renders the
/// not-found page.
pub fn render_page(
    engine: &TemplateEngine,
    config: &SiteConfig,
    posts: &[Post],
    route: &Route,
) -> Result<Page> {
    let mut context = Context::new();
    context.insert("site", config);
    context.insert("base", &config.base_url);

    let template = match route {
        Route::Home => {
            context.insert("posts", &summaries(posts.iter()));
            Some("home.html")
        }
        Route::Archive => {
            context.insert("archive", &archive(posts));
            Some("archive.html")
        }
        Route::Tags => {
            context.insert("tags", &tag_cloud(posts));
            Some("tags.html")
        }
        Route::Tag(slug) => {
            let matching = tagged(posts, slug);
            let entry = tag_cloud(posts).into_iter().find(|t| t.slug == *slug);
            match entry {
                Some(entry) if !matching.is_empty() => {
                    context.insert("tag", &entry);
                    context.insert("posts", &summaries(matching.into_iter()));
                    Some("tag.html")
                }
                _ => None,
            }
        }
        Route::Post(slug) => match posts.iter().find(|p| p.slug == *slug) {
            Some(post) => {
                context.insert("post", &post.summary());
                context.insert("body", &post.body);
                Some("post.html")
            }
            None => None,
        },
        Route::NotFound(_) => None,
    };

    let (template, status) = match template {
        Some(name) => (name, PageStatus::Ok),
        None => {
            let path = match route {
                Route::NotFound(path) => path.clone(),
                other => format!("/{}", other.href()),
            };
            tracing::debug!("No page for {}", path);
            context.insert("path", &path);
            ("not_found.html", PageStatus::NotFound)
        }
    };

    Ok(Page {
        route: route.clone(),
        status,
        html: engine.render(template, &context)?,
    })
}

fn summaries<'a>(posts: impl Iterator<Item = &'a Post>) -> Vec<PostSummary> {
    posts.map(Post::summary).collect()
}
