//! In-memory article store

use super::{Article, ArticleSource};
use crate::error::QuillpostError;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Article store held in memory, newest first
///
/// Cheap to clone; clones share the same articles.
#[derive(Debug, Clone, Default)]
pub struct InMemoryArticles {
    articles: Arc<RwLock<Vec<Article>>>,
}

impl InMemoryArticles {
    /// Creates a store from a list of articles
    #[must_use]
    pub fn new(mut articles: Vec<Article>) -> Self {
        sort_newest_first(&mut articles);
        Self {
            articles: Arc::new(RwLock::new(articles)),
        }
    }

    /// Loads articles from a JSON array on disk
    ///
    /// # Errors
    ///
    /// Returns [`QuillpostError::Io`] if the file cannot be read and
    /// [`QuillpostError::Articles`] if it is not a valid article list.
    pub async fn from_json_file(path: &Path) -> Result<Self, QuillpostError> {
        let raw = tokio::fs::read(path).await?;
        let articles: Vec<Article> = serde_json::from_slice(&raw).map_err(|e| {
            QuillpostError::Articles(format!("invalid article file {}: {e}", path.display()))
        })?;

        tracing::info!(path = %path.display(), count = articles.len(), "Loaded articles");
        Ok(Self::new(articles))
    }

    /// Adds an article
    pub async fn insert(&self, article: Article) {
        let mut articles = self.articles.write().await;
        articles.push(article);
        sort_newest_first(&mut articles);
    }
}

fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

#[async_trait]
impl ArticleSource for InMemoryArticles {
    async fn count(&self) -> Result<usize, QuillpostError> {
        Ok(self.articles.read().await.len())
    }

    async fn page(&self, page: u32, per_page: u32) -> Result<Vec<Article>, QuillpostError> {
        let per_page = per_page.max(1) as usize;
        let skip = (page.max(1) as usize - 1).saturating_mul(per_page);

        Ok(self
            .articles
            .read()
            .await
            .iter()
            .skip(skip)
            .take(per_page)
            .cloned()
            .collect())
    }

    async fn with_tag(&self, tag: &str) -> Result<Vec<Article>, QuillpostError> {
        Ok(self
            .articles
            .read()
            .await
            .iter()
            .filter(|a| a.has_tag(tag))
            .cloned()
            .collect())
    }

    async fn raw_tags(&self) -> Result<Vec<String>, QuillpostError> {
        Ok(self
            .articles
            .read()
            .await
            .iter()
            .map(|a| a.tags.clone())
            .collect())
    }
}
