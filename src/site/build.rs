//! Static site generation

use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::{render_page, tag_cloud, Page, PageStatus, TemplateEngine};
use crate::config::SiteConfig;
use crate::error::{Error, Result};
use crate::routes::Route;
use crate::storage::document::{Meta, Post, PostSummary};

/// What a build wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    pub pages: usize,
    pub posts: usize,
}

/// Render every page of the site into `output_dir`
pub async fn build(
    engine: &TemplateEngine,
    config: &SiteConfig,
    posts: &[Post],
    output_dir: &Path,
) -> Result<BuildReport> {
    create_dir(output_dir).await?;

    let mut routes = vec![Route::Home, Route::Archive, Route::Tags];
    routes.extend(tag_cloud(posts).into_iter().map(|t| Route::Tag(t.slug)));
    routes.extend(posts.iter().map(|p| Route::Post(p.slug.clone())));

    let mut pages = 0;
    for route in &routes {
        let page = render_page(engine, config, posts, route)?;
        if page.status != PageStatus::Ok {
            tracing::warn!("Skipping {}: rendered as not found", route);
            continue;
        }
        write_page(output_dir, &page).await?;
        pages += 1;
    }

    let not_found = render_page(engine, config, posts, &Route::NotFound("/404.html".into()))?;
    write_file(&output_dir.join("404.html"), &not_found.html).await?;
    pages += 1;

    let json = generate_json(posts)?;
    write_file(&output_dir.join("posts.json"), &json).await?;

    tracing::info!(pages, posts = posts.len(), "Built site in {:?}", output_dir);

    Ok(BuildReport {
        output_dir: output_dir.to_path_buf(),
        pages,
        posts: posts.len(),
    })
}

async fn write_page(output_dir: &Path, page: &Page) -> Result<()> {
    let dir = output_dir.join(page.route.href());
    create_dir(&dir).await?;
    write_file(&dir.join("index.html"), &page.html).await
}

async fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).await.map_err(|source| Error::FileWrite {
        path: dir.to_path_buf(),
        source,
    })
}

async fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).await.map_err(|source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Serialize)]
struct JsonPost<'a> {
    #[serde(flatten)]
    summary: PostSummary,
    meta: &'a Meta,
    body: &'a str,
}

fn generate_json(posts: &[Post]) -> Result<String> {
    let items: Vec<JsonPost<'_>> = posts
        .iter()
        .map(|post| JsonPost {
            summary: post.summary(),
            meta: &post.meta,
            body: &post.body,
        })
        .collect();

    Ok(serde_json::to_string_pretty(&items)?)
}
