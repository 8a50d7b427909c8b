//! Friendship endpoints

use axum::Json;
use axum::extract::State;

use crate::error::ApiError;
use crate::models::{MakeFriendsRequest, MakeFriendsResponse};
use crate::state::AppState;

pub async fn make_friends(
    State(state): State<AppState>,
    Json(req): Json<MakeFriendsRequest>,
) -> Result<Json<MakeFriendsResponse>, ApiError> {
    let (source, target) = state
        .users
        .make_friends(&req.source_id, &req.target_id)
        .await?;

    Ok(Json(MakeFriendsResponse {
        source: source.into(),
        target: target.into(),
    }))
}
