//! Application state shared by all handlers

use crate::articles::{ArticleSource, InMemoryArticles};
use crate::config::QuillpostConfig;
use crate::error::QuillpostError;
use crate::extractors::ReadTimeout;
use crate::upload::UploadPipeline;
use axum::extract::FromRef;
use std::sync::Arc;

/// Application state for quillpost
///
/// Combines:
/// - Configuration
/// - The upload pipeline
/// - The article store
///
/// # Example
///
/// ```rust,no_run
/// use quillpost::state::QuillpostState;
///
/// # fn example() -> anyhow::Result<()> {
/// let state = QuillpostState::new()?;
///
/// let app: axum::Router = axum::Router::new()
///     .route("/", axum::routing::get(|| async { "Hello!" }))
///     .with_state(state);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct QuillpostState {
    config: Arc<QuillpostConfig>,
    pipeline: Arc<UploadPipeline>,
    articles: Arc<dyn ArticleSource>,
}

impl QuillpostState {
    /// Create state with default configuration and no articles
    ///
    /// # Errors
    ///
    /// Returns an error if the default upload settings are invalid.
    pub fn new() -> Result<Self, QuillpostError> {
        Self::with_config(QuillpostConfig::default(), Arc::new(InMemoryArticles::default()))
    }

    /// Create state with custom configuration and article store
    ///
    /// # Errors
    ///
    /// Returns [`QuillpostError::Config`] if the upload settings are invalid.
    pub fn with_config(
        config: QuillpostConfig,
        articles: Arc<dyn ArticleSource>,
    ) -> Result<Self, QuillpostError> {
        let pipeline = UploadPipeline::from_settings(&config.upload)?;
        Ok(Self::from_parts(config, pipeline, articles))
    }

    /// Assemble state from prebuilt parts
    #[must_use]
    pub fn from_parts(
        config: QuillpostConfig,
        pipeline: UploadPipeline,
        articles: Arc<dyn ArticleSource>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
            articles,
        }
    }

    /// Get configuration reference
    #[must_use]
    pub fn config(&self) -> &QuillpostConfig {
        &self.config
    }

    /// Get the upload pipeline
    #[must_use]
    pub fn pipeline(&self) -> &UploadPipeline {
        &self.pipeline
    }

    /// Get the article store
    #[must_use]
    pub fn articles(&self) -> &dyn ArticleSource {
        self.articles.as_ref()
    }
}

impl FromRef<QuillpostState> for ReadTimeout {
    fn from_ref(state: &QuillpostState) -> Self {
        Self(state.config.upload.read_timeout())
    }
}
