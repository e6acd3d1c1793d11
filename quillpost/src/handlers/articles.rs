//! Article listing endpoints

use crate::articles::{self, HomePage, TagCount};
use crate::error::QuillpostError;
use crate::state::QuillpostState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

/// Query string for the home listing
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    /// Page number; anything unparsable counts as the first page
    #[serde(default)]
    pub page: Option<String>,

    /// Tag filter
    #[serde(default)]
    pub tag: Option<String>,
}

impl HomeQuery {
    fn page_number(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(0)
    }
}

/// `GET /?page=N&tag=T`
pub async fn home(
    State(state): State<QuillpostState>,
    Query(query): Query<HomeQuery>,
) -> Result<Json<HomePage>, QuillpostError> {
    let home = articles::home_listing(
        state.articles(),
        query.page_number(),
        query.tag.as_deref(),
        state.config().articles.per_page,
    )
    .await?;

    Ok(Json(home))
}

/// `GET /tags`
pub async fn tags(State(state): State<QuillpostState>) -> Result<Json<Vec<TagCount>>, QuillpostError> {
    Ok(Json(articles::tag_cloud(state.articles()).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparsable_page_is_zero() {
        let query = HomeQuery {
            page: Some("abc".to_string()),
            tag: None,
        };
        assert_eq!(query.page_number(), 0);
        assert_eq!(HomeQuery::default().page_number(), 0);
    }

    #[test]
    fn test_page_number() {
        let query = HomeQuery {
            page: Some(" 3 ".to_string()),
            tag: None,
        };
        assert_eq!(query.page_number(), 3);
    }
}
