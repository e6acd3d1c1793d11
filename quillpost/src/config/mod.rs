//! Configuration management for quillpost
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `QUILLPOST_` prefix, `__` for nesting)
//! 2. `./config.toml` (development)
//! 3. `~/.config/quillpost/{service}/config.toml` (user config, XDG)
//! 4. `/etc/quillpost/{service}/config.toml` (system config)
//! 5. Hardcoded defaults (fallback)
//!
//! Environment variable format: `QUILLPOST_SECTION__FIELD_NAME`
//! - Example: `QUILLPOST_UPLOAD__MAX_SIZE=2000000`
//!
//! # Example Configuration
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [upload]
//! root = "static/upload"
//! accepted_types = "jpg|gif|p?jpeg|(x-)?png"
//! min_size = 1
//! max_size = 5000000
//! file_prefix = "upload"
//!
//! [articles]
//! per_page = 10
//! seed_file = "articles.json"
//! ```

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Interface to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Maximum accepted request body in bytes
    ///
    /// Kept above `upload.max_size` so oversized images still reach the
    /// pipeline and get a "too large" result instead of a bare 413.
    pub body_limit_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            body_limit_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Upload pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    /// Directory uploads are written under, relative to the working directory
    pub root: PathBuf,

    /// Accepted extension pattern, matched case-insensitively against the
    /// whole extension
    pub accepted_types: String,

    /// Smallest accepted file in bytes (inclusive)
    pub min_size: u64,

    /// Largest accepted file in bytes (inclusive)
    pub max_size: u64,

    /// Prefix of generated file names
    pub file_prefix: String,

    /// Add a random token to generated file names
    pub unique_names: bool,

    /// Upper bound on reading one upload from the client
    pub read_timeout_secs: u64,

    /// Upper bound on copying one upload to disk
    pub write_timeout_secs: u64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("static/upload"),
            accepted_types: "jpg|gif|p?jpeg|(x-)?png".to_string(),
            min_size: 1,
            max_size: 5_000_000,
            file_prefix: "upload".to_string(),
            unique_names: true,
            read_timeout_secs: 30,
            write_timeout_secs: 30,
        }
    }
}

impl UploadSettings {
    /// Get the read timeout as a Duration
    #[must_use]
    pub const fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    /// Get the write timeout as a Duration
    #[must_use]
    pub const fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }
}

/// Article listing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleSettings {
    /// Articles per home page
    pub per_page: u32,

    /// JSON file with articles to load at startup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,
}

impl Default for ArticleSettings {
    fn default() -> Self {
        Self {
            per_page: 10,
            seed_file: None,
        }
    }
}

/// Complete quillpost configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QuillpostConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Upload pipeline settings
    #[serde(default)]
    pub upload: UploadSettings,

    /// Article listing settings
    #[serde(default)]
    pub articles: ArticleSettings,
}

impl QuillpostConfig {
    /// Load configuration for a specific service
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be parsed or a value
    /// has the wrong type.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use quillpost::config::QuillpostConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = QuillpostConfig::load_for_service("blog")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_for_service(service_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(&toml::to_string(&Self::default())?));

        let system_config = PathBuf::from("/etc/quillpost")
            .join(service_name)
            .join("config.toml");
        if system_config.exists() {
            figment = figment.merge(Toml::file(&system_config));
        }

        let user_config = Self::recommended_path(service_name);
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        let local_config = PathBuf::from("./config.toml");
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        figment = figment.merge(Env::prefixed("QUILLPOST_").split("__").lowercase(true));

        Ok(figment.extract()?)
    }

    /// Load configuration from a specific file, with environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file contains invalid TOML or a value has the
    /// wrong type.
    pub fn load_from(path: &str) -> anyhow::Result<Self> {
        let config = Figment::new()
            .merge(Toml::string(&toml::to_string(&Self::default())?))
            .merge(Toml::file(path))
            .merge(Env::prefixed("QUILLPOST_").split("__").lowercase(true))
            .extract()?;

        Ok(config)
    }

    /// Get the recommended XDG config path for a service
    #[must_use]
    pub fn recommended_path(service_name: &str) -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from("./config.toml"),
            |config_dir| {
                config_dir
                    .join("quillpost")
                    .join(service_name)
                    .join("config.toml")
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = QuillpostConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.upload.root, PathBuf::from("static/upload"));
        assert_eq!(config.upload.min_size, 1);
        assert_eq!(config.upload.max_size, 5_000_000);
        assert_eq!(config.articles.per_page, 10);
    }

    #[test]
    fn test_body_limit_exceeds_max_upload() {
        let config = QuillpostConfig::default();
        assert!(config.server.body_limit_bytes as u64 > config.upload.max_size);
    }

    #[test]
    fn test_timeouts() {
        let upload = UploadSettings::default();
        assert_eq!(upload.read_timeout(), Duration::from_secs(30));
        assert_eq!(upload.write_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[upload]\nmax_size = 1024\nfile_prefix = \"img\"\n\n[articles]\nper_page = 3"
        )
        .unwrap();

        let config = QuillpostConfig::load_from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.upload.max_size, 1024);
        assert_eq!(config.upload.file_prefix, "img");
        assert_eq!(config.articles.per_page, 3);
        // Untouched values keep their defaults
        assert_eq!(config.upload.min_size, 1);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_recommended_path_ends_with_service() {
        let path = QuillpostConfig::recommended_path("blog");
        assert!(path.ends_with("config.toml"));
    }
}
