//! Storage layer for inkpost
//!
//! Handles reading/writing markdown posts with a frontmatter block.

pub mod collection;
pub mod document;
pub mod frontmatter;
