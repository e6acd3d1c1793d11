//! Storage placement for validated uploads
//!
//! Uploads are grouped by namespace and date so that no single directory
//! grows without bound:
//!
//! ```text
//! static/upload/
//! └── article/
//!     └── 2026-10/
//!         └── 17/
//!             └── upload_3f9a2c1b_1760688000.png
//! ```

use crate::config::UploadSettings;
use crate::upload::Namespace;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Length of the random token mixed into generated file names
const TOKEN_LEN: usize = 8;

/// Where a single upload will be written
///
/// Computed fresh for each request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePlan {
    /// Date-partitioned directory for the upload
    pub directory: PathBuf,

    /// Generated file name inside `directory`
    pub file_name: String,

    /// `directory` joined with `file_name`
    pub full_path: PathBuf,
}

impl StoragePlan {
    /// Root-relative URL the stored file is served from
    ///
    /// ```rust
    /// use quillpost::storage::StoragePlan;
    /// use std::path::PathBuf;
    ///
    /// let plan = StoragePlan {
    ///     directory: PathBuf::from("static/upload/article/2026-10/17"),
    ///     file_name: "upload_1760688000.png".to_string(),
    ///     full_path: PathBuf::from("static/upload/article/2026-10/17/upload_1760688000.png"),
    /// };
    /// assert_eq!(plan.url(), "/static/upload/article/2026-10/17/upload_1760688000.png");
    /// ```
    #[must_use]
    pub fn url(&self) -> String {
        format!("/{}", url_path(&self.full_path))
    }
}

/// Derives directories and file names for uploads
///
/// Planning is a pure function of namespace, time, extension and the
/// optional uniqueness token. Nothing touches the filesystem here.
#[derive(Debug, Clone)]
pub struct PathPlanner {
    root: PathBuf,
    prefix: String,
    unique_names: bool,
}

impl PathPlanner {
    /// Creates a planner writing under `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, prefix: impl Into<String>, unique_names: bool) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.into(),
            unique_names,
        }
    }

    /// Creates a planner from upload settings
    #[must_use]
    pub fn from_settings(settings: &UploadSettings) -> Self {
        Self::new(
            settings.root.clone(),
            settings.file_prefix.clone(),
            settings.unique_names,
        )
    }

    /// Upload root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// URL path under which the upload root is served, e.g. `/static/upload`
    #[must_use]
    pub fn url_prefix(&self) -> String {
        format!("/{}", url_path(&self.root))
    }

    /// Directory for uploads in `namespace` at `now`
    ///
    /// Layout is `<root>/<namespace>/<YYYY-MM>/<DD>`.
    #[must_use]
    pub fn directory(&self, namespace: &Namespace, now: DateTime<Utc>) -> PathBuf {
        self.root
            .join(namespace.as_str())
            .join(now.format("%Y-%m").to_string())
            .join(now.format("%d").to_string())
    }

    /// File name for an upload with `extension` at `now`
    ///
    /// `<prefix>_<unix seconds>.<ext>`, or `<prefix>_<token>_<unix seconds>.<ext>`
    /// when a token is given. The extension is lowercased and any leading
    /// dots are dropped.
    #[must_use]
    pub fn file_name(&self, now: DateTime<Utc>, extension: &str, token: Option<&str>) -> String {
        let extension = extension.trim_start_matches('.').to_ascii_lowercase();
        let timestamp = now.timestamp();
        match token {
            Some(token) => format!("{}_{token}_{timestamp}.{extension}", self.prefix),
            None => format!("{}_{timestamp}.{extension}", self.prefix),
        }
    }

    /// Plans the destination for one upload using an explicit token
    #[must_use]
    pub fn plan_with_token(
        &self,
        namespace: &Namespace,
        now: DateTime<Utc>,
        extension: &str,
        token: Option<&str>,
    ) -> StoragePlan {
        let directory = self.directory(namespace, now);
        let file_name = self.file_name(now, extension, token);
        let full_path = directory.join(&file_name);

        StoragePlan {
            directory,
            file_name,
            full_path,
        }
    }

    /// Plans the destination for one upload
    ///
    /// When unique names are enabled a fresh random token is drawn so that
    /// two uploads within the same second do not overwrite each other.
    #[must_use]
    pub fn plan(&self, namespace: &Namespace, now: DateTime<Utc>, extension: &str) -> StoragePlan {
        let token = self.unique_names.then(random_token);
        self.plan_with_token(namespace, now, extension, token.as_deref())
    }
}

fn random_token() -> String {
    let mut token = Uuid::new_v4().simple().to_string();
    token.truncate(TOKEN_LEN);
    token
}

/// Forward-slash form of a relative path, without leading `./` or `/`
fn url_path(path: &Path) -> String {
    let joined = path
        .iter()
        .map(|part| part.to_string_lossy())
        .filter(|part| part != "." && part != "/" && part != "\\")
        .collect::<Vec<_>>()
        .join("/");
    joined.trim_start_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 7, 9, 30, 0).unwrap()
    }

    fn article() -> Namespace {
        Namespace::new("article").unwrap()
    }

    #[test]
    fn test_directory_layout() {
        let planner = PathPlanner::new("static/upload", "upload", false);
        let dir = planner.directory(&article(), fixed_time());
        assert_eq!(dir, PathBuf::from("static/upload/article/2026-03/07"));
    }

    #[test]
    fn test_directory_is_deterministic() {
        let planner = PathPlanner::new("static/upload", "upload", true);
        let first = planner.directory(&article(), fixed_time());
        let second = planner.directory(&article(), fixed_time());
        assert_eq!(first, second);
    }

    #[test]
    fn test_file_name_without_token() {
        let planner = PathPlanner::new("static/upload", "test", false);
        let name = planner.file_name(fixed_time(), ".PNG", None);
        assert_eq!(name, format!("test_{}.png", fixed_time().timestamp()));
    }

    #[test]
    fn test_file_name_with_token() {
        let planner = PathPlanner::new("static/upload", "upload", true);
        let name = planner.file_name(fixed_time(), "jpeg", Some("abcd1234"));
        assert_eq!(name, format!("upload_abcd1234_{}.jpeg", fixed_time().timestamp()));
    }

    #[test]
    fn test_plan_joins_directory_and_name() {
        let planner = PathPlanner::new("static/upload", "upload", false);
        let plan = planner.plan(&article(), fixed_time(), "gif");
        assert_eq!(plan.full_path, plan.directory.join(&plan.file_name));
        assert_eq!(
            plan.url(),
            format!(
                "/static/upload/article/2026-03/07/upload_{}.gif",
                fixed_time().timestamp()
            )
        );
    }

    #[test]
    fn test_unique_plans_differ_within_same_second() {
        let planner = PathPlanner::new("static/upload", "upload", true);
        let first = planner.plan(&article(), fixed_time(), "png");
        let second = planner.plan(&article(), fixed_time(), "png");
        assert_eq!(first.directory, second.directory);
        assert_ne!(first.file_name, second.file_name);
        assert!(first
            .file_name
            .ends_with(&format!("_{}.png", fixed_time().timestamp())));
    }

    #[test]
    fn test_url_prefix() {
        assert_eq!(
            PathPlanner::new("static/upload", "upload", true).url_prefix(),
            "/static/upload"
        );
        assert_eq!(
            PathPlanner::new("./media", "upload", true).url_prefix(),
            "/media"
        );
    }
}
