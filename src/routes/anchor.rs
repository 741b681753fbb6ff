//! Deep-link endpoint

use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::anchor::build_anchor_url;
use crate::annotations::pick_selector;

#[derive(Debug, Deserialize)]
pub struct AnchorRequest {
    /// Page the selector was captured on
    pub url: String,
    /// Stored selector; malformed values fall back to the bare URL
    pub selector: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct AnchorResponse {
    pub url: String,
}

pub async fn build_anchor(Json(req): Json<AnchorRequest>) -> Json<AnchorResponse> {
    let selector = req.selector.and_then(pick_selector);
    Json(AnchorResponse {
        url: build_anchor_url(&req.url, selector.as_ref()),
    })
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{app, post_json};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_anchor_endpoint() {
        let body = json!({
            "url": "https://ex.com/a",
            "selector": {"type": "TextQuoteSelector", "exact": "hello world", "prefix": "say ", "suffix": "."}
        });
        let (status, json) = post_json(app(), "/api/v1/anchor", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["url"], "https://ex.com/a#:~:text=say%20-,hello%20world,-.");
    }

    #[tokio::test]
    async fn test_malformed_selector_returns_base_url() {
        let body = json!({"url": "https://ex.com/a", "selector": {"exact": 42}});
        let (status, json) = post_json(app(), "/api/v1/anchor", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["url"], "https://ex.com/a");

        let body = json!({"url": "https://ex.com/b"});
        let (_, json) = post_json(app(), "/api/v1/anchor", body).await;
        assert_eq!(json["url"], "https://ex.com/b");
    }
}
