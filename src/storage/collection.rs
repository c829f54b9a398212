//! PostStore - the posts directory
//!
//! Every `*.md` file directly inside the directory is one post; the file
//! stem is its slug.
//!
//! Directory structure:
//! ```text
//! /posts/
//!   ai-coding-guardians.md
//!   hello-world.md
//! ```

use super::document::Post;
use crate::error::{Error, Result};
use crate::validation::validate_slug;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// A directory of markdown posts
#[derive(Debug)]
pub struct PostStore {
    /// Path to the posts directory
    pub path: PathBuf,
}

impl PostStore {
    /// Open a store rooted at the given directory
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create the posts directory if it doesn't exist
    pub async fn ensure_exists(&self) -> Result<()> {
        fs::create_dir_all(&self.path)
            .await
            .map_err(|source| Error::FileWrite {
                path: self.path.clone(),
                source,
            })
    }

    /// List all posts, newest first
    ///
    /// Undated posts sort after dated ones; ties break on slug.
    pub async fn list(&self) -> Result<Vec<Post>> {
        let mut posts = Vec::new();

        if !self.path.is_dir() {
            tracing::debug!("Posts directory {:?} does not exist", self.path);
            return Ok(posts);
        }

        for entry in WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().map(|e| e != "md").unwrap_or(true) {
                continue;
            }

            match self.read_post(path).await {
                Ok(post) => {
                    tracing::debug!(slug = %post.slug, "Loaded post");
                    posts.push(post);
                }
                Err(e) => tracing::warn!("Skipping {:?}: {}", path, e),
            }
        }

        posts.sort_by(compare_posts);
        Ok(posts)
    }

    /// Read a single post by slug
    pub async fn get(&self, slug: &str) -> Result<Option<Post>> {
        validate_slug(slug)?;

        let path = self.post_path(slug);
        if !path.is_file() {
            return Ok(None);
        }
        self.read_post(&path).await.map(Some)
    }

    /// Write a new post
    pub async fn insert(&self, post: &Post) -> Result<()> {
        validate_slug(&post.slug)?;
        self.ensure_exists().await?;

        let path = self.post_path(&post.slug);
        if path.exists() {
            return Err(Error::PostAlreadyExists {
                slug: post.slug.clone(),
            });
        }

        fs::write(&path, post.render())
            .await
            .map_err(|source| Error::FileWrite { path, source })
    }

    /// Count posts in the store
    pub async fn count(&self) -> Result<usize> {
        Ok(self.list().await?.len())
    }

    fn post_path(&self, slug: &str) -> PathBuf {
        self.path.join(format!("{}.md", slug))
    }

    async fn read_post(&self, path: &Path) -> Result<Post> {
        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::Other(format!("Invalid post path {:?}", path)))?;
        validate_slug(slug)?;

        let content = fs::read_to_string(path)
            .await
            .map_err(|source| Error::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        let mut post = Post::parse(slug, &content);

        post.path = path
            .strip_prefix(&self.path)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf());

        Ok(post)
    }
}

fn compare_posts(a: &Post, b: &Post) -> Ordering {
    let by_date = match (a.date(), b.date()) {
        (Some(a_date), Some(b_date)) => b_date.cmp(&a_date),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_date.then_with(|| a.slug.cmp(&b.slug))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).await.unwrap();
    }

    #[tokio::test]
    async fn test_store_insert_and_get() {
        let tmp = TempDir::new().unwrap();
        let store = PostStore::open(tmp.path().join("posts"));

        let mut post = Post::new("hello-world").with_body("Hi there.");
        post.set("title", "Hello World").set("tags", vec!["intro"]);

        store.insert(&post).await.unwrap();

        let fetched = store.get("hello-world").await.unwrap().unwrap();
        assert_eq!(fetched.title(), "Hello World");
        assert_eq!(fetched.tags(), vec!["intro"]);
        assert_eq!(fetched.body, "Hi there.");

        let dup = store.insert(&post).await;
        assert!(matches!(dup, Err(Error::PostAlreadyExists { .. })));

        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_rejects_bad_slug() {
        let tmp = TempDir::new().unwrap();
        let store = PostStore::open(tmp.path());

        let result = store.get("../secret").await;
        assert!(matches!(result, Err(Error::InvalidSlug { .. })));
    }

    #[tokio::test]
    async fn test_list_order_and_filtering() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();

        write(dir, "old.md", "---\ntitle: Old\ndate: 2024-05-01\n---\nold").await;
        write(dir, "new.md", "---\ntitle: New\ndate: 2026-02-04\n---\nnew").await;
        write(dir, "draft.md", "No frontmatter at all").await;
        write(dir, "notes.txt", "not a post").await;
        write(dir, "bad name.md", "---\ntitle: Skipped\n---\n").await;
        fs::create_dir(dir.join("nested")).await.unwrap();
        write(&dir.join("nested"), "deep.md", "---\ntitle: Deep\n---\n").await;

        let store = PostStore::open(dir);
        let posts = store.list().await.unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();

        assert_eq!(slugs, vec!["new", "old", "draft"]);
        assert_eq!(posts[2].body, "No frontmatter at all");
        assert_eq!(posts[0].path, PathBuf::from("new.md"));
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_missing_directory_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = PostStore::open(tmp.path().join("nope"));
        assert!(store.list().await.unwrap().is_empty());
    }
}
