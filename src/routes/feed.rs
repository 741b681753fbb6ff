//! Feed API endpoints
//!
//! Reconciles one fetched feed page so items already shown inside a
//! collection wrapper are not repeated as bare entries.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::feed::{normalize_items, reconcile_page, FeedPage, RawFeedItem};
use crate::state::AppState;

/// Create the feed router
pub fn router() -> Router<AppState> {
    Router::new().route("/reconcile", post(reconcile_feed))
}

/// One raw page as returned by the annotation API
#[derive(Debug, Deserialize)]
pub struct ReconcileRequest {
    pub items: Vec<RawFeedItem>,
    pub cursor: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReconcileResponse {
    #[serde(flatten)]
    pub page: FeedPage,
    pub kept: usize,
    pub hidden: usize,
}

async fn reconcile_feed(
    State(state): State<AppState>,
    Json(req): Json<ReconcileRequest>,
) -> Result<Json<ReconcileResponse>> {
    let limit = state.limits().max_feed_items;
    if req.items.len() > limit {
        return Err(AppError::TooLarge {
            what: "feed page",
            len: req.items.len(),
            limit,
        });
    }

    let page = FeedPage {
        items: normalize_items(req.items),
        cursor: req.cursor,
    };
    let (page, report) = reconcile_page(page);

    tracing::debug!(kept = report.kept, hidden = report.hidden, "Reconciled feed page");

    Ok(Json(ReconcileResponse {
        page,
        kept: report.kept,
        hidden: report.hidden,
    }))
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::routes::test_support::{app, app_with, post_json};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_reconcile_endpoint() {
        let body = json!({
            "cursor": "next-page",
            "items": [
                {"type": "Annotation", "uri": "at://ann/1", "author": "did:plc:a", "text": "hi"},
                {"type": "Bookmark", "uri": "at://bm/1", "source": "https://ex.com"},
                {
                    "type": "CollectionItem",
                    "uri": "at://ci/1",
                    "author": "did:plc:b",
                    "collectionRef": "at://coll/1",
                    "innerItem": {"type": "Annotation", "uri": "at://ann/1", "text": "hi"}
                }
            ]
        });

        let (status, json) = post_json(app(), "/api/v1/feed/reconcile", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["kept"], 2);
        assert_eq!(json["hidden"], 1);
        assert_eq!(json["cursor"], "next-page");
        assert_eq!(json["items"][0]["type"], "Bookmark");
        assert_eq!(json["items"][1]["type"], "CollectionItem");
        assert_eq!(json["items"][1]["innerItem"]["uri"], "at://ann/1");
    }

    #[tokio::test]
    async fn test_unknown_item_type_is_rejected() {
        let body = json!({"items": [{"type": "Story", "uri": "x"}]});
        let (status, _) = post_json(app(), "/api/v1/feed/reconcile", body).await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_page_limit() {
        let mut config = Config::default();
        config.limits.max_feed_items = 1;

        let body = json!({"items": [
            {"type": "Bookmark", "uri": "a"},
            {"type": "Bookmark", "uri": "b"}
        ]});
        let (status, json) = post_json(app_with(config), "/api/v1/feed/reconcile", body).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json["error"], "too_large");
    }
}
