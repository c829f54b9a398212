//! Site configuration
//!
//! Read from `blog.yaml` at the blog root. Every key is optional:
//!
//! ```yaml
//! title: My Blog
//! description: Notes on building things
//! posts_dir: posts
//! output_dir: dist
//! base_url: /
//! highlight: true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const CONFIG_FILE: &str = "blog.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title shown in the header and `<title>`
    pub title: String,
    pub description: String,
    /// Posts directory, relative to the blog root
    pub posts_dir: PathBuf,
    /// Where `build` writes the site, relative to the blog root
    pub output_dir: PathBuf,
    /// Prefix for every link in generated pages
    pub base_url: String,
    /// Load highlight.js for fenced code blocks
    pub highlight: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: String::new(),
            posts_dir: PathBuf::from("posts"),
            output_dir: PathBuf::from("dist"),
            base_url: "/".to_string(),
            highlight: true,
        }
    }
}

impl SiteConfig {
    /// Load `blog.yaml` from `root`, falling back to defaults when absent
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, root);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| Error::FileRead {
            path: path.clone(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|e| Error::ConfigParse {
            path,
            message: e.to_string(),
        })
    }

    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty file deserializes as null rather than an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Self = serde_yaml::from_str(content)?;
        config.normalize();
        Ok(config)
    }

    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// `base_url` always ends in a slash so templates can append paths
    fn normalize(&mut self) {
        if !self.base_url.ends_with('/') {
            self.base_url.push('/');
        }
    }
}
