//! Blog articles: storage seam, home listing and tag cloud
//!
//! # Examples
//!
//! ```rust
//! use quillpost::articles::{home_listing, InMemoryArticles};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let articles = InMemoryArticles::default();
//! let home = home_listing(&articles, 0, None, 10).await?;
//! assert_eq!(home.pagination.map(|p| p.page), Some(1));
//! # Ok(())
//! # }
//! ```

mod listing;
mod memory;
mod model;

pub use listing::{aggregate_tags, home_listing, tag_cloud, HomePage, Pagination, TagCount};
pub use memory::InMemoryArticles;
pub use model::{split_tags, Article, TAG_SEPARATOR};

use crate::error::QuillpostError;
use async_trait::async_trait;

/// Read access to published articles
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Total number of articles
    async fn count(&self) -> Result<usize, QuillpostError>;

    /// One page of articles, newest first; `page` starts at 1
    async fn page(&self, page: u32, per_page: u32) -> Result<Vec<Article>, QuillpostError>;

    /// Every article carrying `tag`
    async fn with_tag(&self, tag: &str) -> Result<Vec<Article>, QuillpostError>;

    /// Raw tag string of every article
    async fn raw_tags(&self) -> Result<Vec<String>, QuillpostError>;
}
