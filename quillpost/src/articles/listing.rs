//! Home page listing and tag cloud

use super::model::split_tags;
use super::{Article, ArticleSource};
use crate::error::QuillpostError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pagination footer for the home listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page, starting at 1
    pub page: u32,
    /// Total number of pages, at least 1
    pub total_pages: u32,
    /// Whether a previous page exists
    pub has_prev: bool,
    /// Whether a next page exists
    pub has_next: bool,
}

impl Pagination {
    /// Footer for `page` of `total` articles shown `per_page` at a time
    ///
    /// ```rust
    /// use quillpost::articles::Pagination;
    ///
    /// let footer = Pagination::new(2, 25, 10);
    /// assert_eq!(footer.total_pages, 3);
    /// assert!(footer.has_prev && footer.has_next);
    /// ```
    #[must_use]
    pub fn new(page: u32, total: usize, per_page: u32) -> Self {
        let per_page = per_page.max(1) as usize;
        let total_pages = u32::try_from(total.div_ceil(per_page).max(1)).unwrap_or(u32::MAX);
        Self {
            page,
            total_pages,
            has_prev: page > 1,
            has_next: page < total_pages,
        }
    }
}

/// Articles shown on the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomePage {
    /// Articles on this page
    pub articles: Vec<Article>,

    /// Tag filter, when listing by tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Footer, absent when listing by tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Builds the home listing
///
/// A non-empty `tag` lists every article with that tag and no footer.
/// Otherwise `page` values below 1 are treated as 1.
///
/// # Errors
///
/// Propagates article store failures.
pub async fn home_listing(
    source: &dyn ArticleSource,
    page: i64,
    tag: Option<&str>,
    per_page: u32,
) -> Result<HomePage, QuillpostError> {
    if let Some(tag) = tag.map(str::trim).filter(|t| !t.is_empty()) {
        let articles = source.with_tag(tag).await?;
        return Ok(HomePage {
            articles,
            tag: Some(tag.to_string()),
            pagination: None,
        });
    }

    let page = u32::try_from(page.max(1)).unwrap_or(u32::MAX);
    let articles = source.page(page, per_page).await?;
    let total = source.count().await?;

    Ok(HomePage {
        articles,
        tag: None,
        pagination: Some(Pagination::new(page, total, per_page)),
    })
}

/// A tag and the number of articles carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    /// Tag name
    pub tag: String,
    /// Articles with this tag
    pub count: usize,
}

/// Counts tags across raw `&`-separated tag strings, sorted by name
///
/// ```rust
/// use quillpost::articles::aggregate_tags;
///
/// let tags = aggregate_tags(["rust&web", "rust", " life & "]);
/// let names: Vec<_> = tags.iter().map(|t| (t.tag.as_str(), t.count)).collect();
/// assert_eq!(names, vec![("life", 1), ("rust", 2), ("web", 1)]);
/// ```
pub fn aggregate_tags<I, S>(raw: I) -> Vec<TagCount>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for entry in raw {
        for tag in split_tags(entry.as_ref()) {
            *counts.entry(tag.to_string()).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|(tag, count)| TagCount { tag, count })
        .collect()
}

/// Builds the tag cloud from every article
///
/// # Errors
///
/// Propagates article store failures.
pub async fn tag_cloud(source: &dyn ArticleSource) -> Result<Vec<TagCount>, QuillpostError> {
    Ok(aggregate_tags(source.raw_tags().await?))
}
