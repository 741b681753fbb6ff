//! Reply thread endpoints

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::replies::{build_tree_with_max_depth, count_nodes, normalize_replies, RawReply, ReplyNode};
use crate::state::AppState;

/// Create the replies router
pub fn router() -> Router<AppState> {
    Router::new().route("/tree", post(thread_replies))
}

/// Flat reply batch fetched for one thread root
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadRequest {
    #[serde(alias = "rootId")]
    pub root_uri: String,
    pub replies: Vec<RawReply>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadResponse {
    pub root_uri: String,
    pub replies: Vec<ReplyNode>,
    pub total: usize,
}

async fn thread_replies(
    State(state): State<AppState>,
    Json(req): Json<ThreadRequest>,
) -> Result<Json<ThreadResponse>> {
    let root_uri = req.root_uri.trim().to_string();
    if root_uri.is_empty() {
        return Err(AppError::BadRequest("rootUri must not be empty".to_string()));
    }

    let limit = state.limits().max_reply_batch;
    if req.replies.len() > limit {
        return Err(AppError::TooLarge {
            what: "reply batch",
            len: req.replies.len(),
            limit,
        });
    }

    // Serializing the response recurses once per level, so nesting is capped
    let records = normalize_replies(req.replies, &root_uri);
    let replies = build_tree_with_max_depth(records, &root_uri, state.limits().max_reply_depth);
    let total = count_nodes(&replies);

    tracing::debug!(root = %root_uri, total, top_level = replies.len(), "Threaded replies");

    Ok(Json(ThreadResponse {
        root_uri,
        replies,
        total,
    }))
}
