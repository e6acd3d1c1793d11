//! Upload pipeline: validation through storage
//!
//! Each upload moves through a fixed sequence of stages:
//!
//! ```text
//! Received -> TypeChecked -> SizeChecked -> PathPlanned -> DirectoryEnsured -> Written -> Succeeded
//! ```
//!
//! Any stage after `Received` can fail. Failures are returned as values and
//! converted into an [`UploadResult`]; nothing in here panics on bad input or
//! I/O errors.

use super::error::UploadError;
use super::file_info::{AcceptedTypes, FileInfo, SizeLimits};
use super::namespace::Namespace;
use super::result::UploadResult;
use super::source::UploadSource;
use crate::config::UploadSettings;
use crate::error::QuillpostError;
use crate::storage::{LocalStorage, PathPlanner, StoragePlan, UploadStore};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

/// Stages of the upload state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStage {
    /// Stream and declared name obtained from the request
    Received,
    /// Extension accepted
    TypeChecked,
    /// Size known and within bounds
    SizeChecked,
    /// Destination computed
    PathPlanned,
    /// Destination directory exists
    DirectoryEnsured,
    /// Bytes persisted
    Written,
    /// Result produced
    Succeeded,
}

impl fmt::Display for UploadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Received => "received",
            Self::TypeChecked => "type_checked",
            Self::SizeChecked => "size_checked",
            Self::PathPlanned => "path_planned",
            Self::DirectoryEnsured => "directory_ensured",
            Self::Written => "written",
            Self::Succeeded => "succeeded",
        };
        f.write_str(name)
    }
}

/// A failed upload and the stage it could not reach
#[derive(Debug)]
pub struct UploadFailure {
    /// Stage whose transition failed
    pub stage: UploadStage,
    /// Why it failed
    pub error: UploadError,
}

impl UploadFailure {
    const fn at(stage: UploadStage, error: UploadError) -> Self {
        Self { stage, error }
    }
}

/// A stored upload
#[derive(Debug, Clone)]
pub struct StoredUpload {
    /// Validated file metadata
    pub info: FileInfo,
    /// Where the file was written
    pub plan: StoragePlan,
    /// Bytes copied to disk
    pub bytes_written: u64,
}

impl StoredUpload {
    /// Root-relative URL of the stored file
    #[must_use]
    pub fn url(&self) -> String {
        self.plan.url()
    }
}

/// Source of the current time for path planning
pub trait Clock: Send + Sync {
    /// Current wall-clock time
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Validates uploads and writes them to date-partitioned storage
///
/// The pipeline holds no per-request state and can be shared between
/// concurrent requests behind an `Arc`.
///
/// # Examples
///
/// ```rust,no_run
/// use quillpost::config::UploadSettings;
/// use quillpost::upload::{MemoryUpload, UploadPipeline};
///
/// # async fn example() -> anyhow::Result<()> {
/// let pipeline = UploadPipeline::from_settings(&UploadSettings::default())?;
///
/// let file = MemoryUpload::new("photo.png", vec![0x89, 0x50, 0x4E, 0x47]);
/// let result = pipeline.process("article", Ok(file)).await;
///
/// if result.uploaded {
///     println!("Stored at {}", result.url.unwrap_or_default());
/// } else {
///     println!("Rejected: {}", result.message);
/// }
/// # Ok(())
/// # }
/// ```
pub struct UploadPipeline {
    accepted: AcceptedTypes,
    limits: SizeLimits,
    planner: PathPlanner,
    store: Arc<dyn UploadStore>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for UploadPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadPipeline")
            .field("accepted", &self.accepted)
            .field("limits", &self.limits)
            .field("planner", &self.planner)
            .finish_non_exhaustive()
    }
}

impl UploadPipeline {
    /// Creates a pipeline from its parts, using the system clock
    #[must_use]
    pub fn new(
        accepted: AcceptedTypes,
        limits: SizeLimits,
        planner: PathPlanner,
        store: Arc<dyn UploadStore>,
    ) -> Self {
        Self {
            accepted,
            limits,
            planner,
            store,
            clock: Arc::new(SystemClock),
        }
    }

    /// Creates a pipeline writing to the local filesystem
    ///
    /// # Errors
    ///
    /// Returns [`QuillpostError::Config`] if the accepted-type pattern is
    /// invalid or the size bounds are inverted.
    pub fn from_settings(settings: &UploadSettings) -> Result<Self, QuillpostError> {
        let accepted = AcceptedTypes::new(&settings.accepted_types).map_err(|e| {
            QuillpostError::Config(format!(
                "invalid upload.accepted_types {:?}: {e}",
                settings.accepted_types
            ))
        })?;

        let limits = SizeLimits::from_settings(settings);
        if limits.min > limits.max {
            return Err(QuillpostError::Config(format!(
                "upload.min_size ({}) exceeds upload.max_size ({})",
                limits.min, limits.max
            )));
        }

        Ok(Self::new(
            accepted,
            limits,
            PathPlanner::from_settings(settings),
            Arc::new(LocalStorage::new(settings.write_timeout())),
        ))
    }

    /// Replaces the clock used for path planning
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Path planner used by this pipeline
    #[must_use]
    pub const fn planner(&self) -> &PathPlanner {
        &self.planner
    }

    /// Runs an upload and converts the outcome into an [`UploadResult`]
    ///
    /// `retrieved` is what the request boundary managed to extract; a
    /// retrieval error becomes a failed result like any other.
    pub async fn process<S>(&self, namespace: &str, retrieved: Result<S, UploadError>) -> UploadResult
    where
        S: UploadSource,
    {
        match self.run(namespace, retrieved).await {
            Ok(stored) => UploadResult::success(stored.url()),
            Err(failure) => UploadResult::failure(failure.error.to_string()),
        }
    }

    /// Runs an upload through every stage
    ///
    /// # Errors
    ///
    /// Returns an [`UploadFailure`] naming the stage that could not be
    /// reached and the reason.
    pub async fn run<S>(
        &self,
        namespace: &str,
        retrieved: Result<S, UploadError>,
    ) -> Result<StoredUpload, UploadFailure>
    where
        S: UploadSource,
    {
        let result = self.advance(namespace, retrieved).await;

        match &result {
            Ok(stored) => tracing::info!(
                namespace,
                stage = %UploadStage::Succeeded,
                path = %stored.plan.full_path.display(),
                size = stored.bytes_written,
                "Upload stored"
            ),
            Err(failure) if failure.error.is_rejection() => tracing::warn!(
                namespace,
                stage = %failure.stage,
                error = %failure.error,
                detail = ?failure.error,
                "Upload rejected"
            ),
            Err(failure) => tracing::error!(
                namespace,
                stage = %failure.stage,
                error = %failure.error,
                detail = ?failure.error,
                "Upload failed"
            ),
        }

        result
    }

    async fn advance<S>(
        &self,
        namespace: &str,
        retrieved: Result<S, UploadError>,
    ) -> Result<StoredUpload, UploadFailure>
    where
        S: UploadSource,
    {
        use UploadStage::{DirectoryEnsured, PathPlanned, Received, SizeChecked, TypeChecked, Written};

        let source = retrieved.map_err(|e| UploadFailure::at(Received, e))?;
        let namespace = Namespace::new(namespace).map_err(|e| UploadFailure::at(Received, e))?;
        let mut info = FileInfo::new(source.file_name());
        tracing::debug!(%namespace, name = %info.name, stage = %Received, "Upload received");

        info.check_type(&self.accepted)
            .map_err(|e| UploadFailure::at(TypeChecked, e))?;
        tracing::debug!(%namespace, file_type = %info.file_type, stage = %TypeChecked, "Type accepted");

        info.size = source
            .size()
            .ok_or_else(|| UploadFailure::at(SizeChecked, UploadError::SizeUnavailable))?;
        info.check_size(self.limits)
            .map_err(|e| UploadFailure::at(SizeChecked, e))?;
        tracing::debug!(%namespace, size = info.size, stage = %SizeChecked, "Size accepted");

        let plan = self
            .planner
            .plan(&namespace, self.clock.now(), &info.extension());
        tracing::debug!(%namespace, path = %plan.full_path.display(), stage = %PathPlanned, "Path planned");

        self.store
            .ensure_directory(&plan.directory)
            .await
            .map_err(|source| {
                UploadFailure::at(
                    DirectoryEnsured,
                    UploadError::Directory {
                        directory: plan.directory.clone(),
                        source,
                    },
                )
            })?;

        // One byte past the declared size is enough to catch a source that lied
        let mut reader = source.into_reader().take(info.size.saturating_add(1));
        let bytes_written = self
            .store
            .write_stream(&mut reader, &plan.full_path)
            .await
            .map_err(|e| UploadFailure::at(Written, UploadError::Write(e)))?;

        if bytes_written != info.size {
            if let Err(err) = self.store.remove(&plan.full_path).await {
                tracing::warn!(
                    %namespace,
                    path = %plan.full_path.display(),
                    error = %err,
                    "Failed to remove upload with mismatched size"
                );
            }
            let error = if bytes_written > self.limits.max {
                UploadError::TooLarge {
                    size: bytes_written,
                    max: self.limits.max,
                }
            } else {
                UploadError::SizeMismatch {
                    declared: info.size,
                    written: bytes_written,
                }
            };
            return Err(UploadFailure::at(Written, error));
        }

        Ok(StoredUpload {
            info,
            plan,
            bytes_written,
        })
    }
}
