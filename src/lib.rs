//! inkpost - a small markdown blog engine
//!
//! Posts are markdown files with an optional frontmatter block. The blog
//! renders them into a post list, per-post pages, a yearly archive and a
//! tag cloud, either one page at a time or as a static site.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                          Blog                            │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐  │
//! │  │  SiteConfig  │   │    Route     │   │  Templates   │  │
//! │  │ (blog.yaml)  │   │  resolution  │   │   (tera)     │  │
//! │  └──────┬───────┘   └──────┬───────┘   └──────┬───────┘  │
//! │         │                  ▼                  │          │
//! │         │     ┌──────────────────────────┐    │          │
//! │         └────►│   Site: pages & build    │◄───┘          │
//! │               └────────────┬─────────────┘               │
//! │                            ▼                             │
//! │               ┌──────────────────────────┐               │
//! │               │   PostStore (posts/*.md) │               │
//! │               └────────────┬─────────────┘               │
//! │                            ▼                             │
//! │               ┌──────────────────────────┐               │
//! │               │   Frontmatter parser     │               │
//! │               └──────────────────────────┘               │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod dates;
pub mod error;
pub mod routes;
pub mod site;
pub mod storage;
pub mod validation;

pub use config::SiteConfig;
pub use dates::format_date;
pub use error::{Error, Result};
pub use routes::Route;
pub use site::{ArchiveYear, BuildReport, Page, PageStatus, TagCount};
pub use storage::collection::PostStore;
pub use storage::document::{Meta, ParsedDocument, Post, Value};
pub use storage::frontmatter::parse as parse_frontmatter;

use std::path::PathBuf;

use site::TemplateEngine;

/// Directory under the blog root holding template overrides
pub const TEMPLATES_DIR: &str = "templates";

const WELCOME_POST: &str = "---
title: \"Hello, World\"
date: 2026-01-01
tags: [welcome]
---

This is your first post. Edit or delete `posts/hello-world.md`, then run
`inkpost build`.

```rust
fn main() {
    println!(\"Hello, world!\");
}
```
";

/// The main blog handle
pub struct Blog {
    /// Root path of the blog
    pub root: PathBuf,
    pub config: SiteConfig,
    pub store: PostStore,
    posts: Vec<Post>,
    engine: TemplateEngine,
}

impl Blog {
    /// Open the blog at the given path and load its posts
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let root = path.into();
        let config = SiteConfig::load(&root)?;
        let store = PostStore::open(root.join(&config.posts_dir));
        let posts = store.list().await?;
        let engine = TemplateEngine::new(&root.join(TEMPLATES_DIR))?;

        tracing::debug!("Opened blog at {:?} with {} post(s)", root, posts.len());

        Ok(Self {
            root,
            config,
            store,
            posts,
            engine,
        })
    }

    /// Create `blog.yaml` and a first post where they are missing, then open
    pub async fn init(path: impl Into<PathBuf>) -> Result<Self> {
        let root = path.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|source| Error::FileWrite {
                path: root.clone(),
                source,
            })?;

        let config_path = root.join(config::CONFIG_FILE);
        if !config_path.exists() {
            let yaml = SiteConfig::default()
                .to_yaml()
                .map_err(|e| Error::Other(e.to_string()))?;
            tokio::fs::write(&config_path, yaml)
                .await
                .map_err(|source| Error::FileWrite {
                    path: config_path.clone(),
                    source,
                })?;
        }

        let config = SiteConfig::load(&root)?;
        let store = PostStore::open(root.join(&config.posts_dir));
        store.ensure_exists().await?;
        if store.count().await? == 0 {
            store.insert(&Post::parse("hello-world", WELCOME_POST)).await?;
        }

        Self::open(root).await
    }

    /// Re-read posts from disk
    pub async fn reload(&mut self) -> Result<()> {
        self.posts = self.store.list().await?;
        Ok(())
    }

    /// All posts, newest first
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, slug: &str) -> Result<&Post> {
        self.posts
            .iter()
            .find(|p| p.slug == slug)
            .ok_or_else(|| Error::PostNotFound {
                slug: slug.to_string(),
            })
    }

    pub fn archive(&self) -> Vec<ArchiveYear> {
        site::archive(&self.posts)
    }

    pub fn tag_cloud(&self) -> Vec<TagCount> {
        site::tag_cloud(&self.posts)
    }

    /// Render the page for a route
    pub fn render(&self, route: &Route) -> Result<Page> {
        site::render_page(&self.engine, &self.config, &self.posts, route)
    }

    /// Render the page for a path such as `/#/post/hello` or `/archive`
    pub fn render_path(&self, path: &str) -> Result<Page> {
        self.render(&Route::parse(path))
    }

    /// Directory `build` writes to
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.config.output_dir)
    }

    /// Write the whole site to the output directory
    pub async fn build(&self) -> Result<BuildReport> {
        site::build(&self.engine, &self.config, &self.posts, &self.output_dir()).await
    }
}
