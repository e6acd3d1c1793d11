//! Article model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Separator between tags in an article's raw tag string
pub const TAG_SEPARATOR: char = '&';

/// A published blog article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Unique identifier
    pub id: u64,

    /// Title
    pub title: String,

    /// Author name
    pub author: String,

    /// Raw tag string, `&`-separated (e.g. `rust&web`)
    #[serde(default)]
    pub tags: String,

    /// Short summary shown in listings
    #[serde(default)]
    pub summary: String,

    /// Publication time
    pub created_at: DateTime<Utc>,
}

impl Article {
    /// Individual tags, trimmed, without empty segments
    pub fn tag_list(&self) -> impl Iterator<Item = &str> {
        split_tags(&self.tags)
    }

    /// Whether the article carries `tag`
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.trim();
        self.tag_list().any(|t| t == tag)
    }
}

/// Splits a raw tag string into trimmed, non-empty tags
pub fn split_tags(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(TAG_SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(tags: &str) -> Article {
        Article {
            id: 1,
            title: "Hello".to_string(),
            author: "admin".to_string(),
            tags: tags.to_string(),
            summary: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_tag_list_skips_empty_segments() {
        let article = article(" rust & &web&");
        assert_eq!(article.tag_list().collect::<Vec<_>>(), vec!["rust", "web"]);
    }

    #[test]
    fn test_has_tag_is_exact() {
        let article = article("rust&web");
        assert!(article.has_tag("rust"));
        assert!(article.has_tag(" web "));
        assert!(!article.has_tag("ru"));
    }
}
