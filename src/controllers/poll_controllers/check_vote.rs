use axum::{
    Json,
    extract::{Extension, Path, State},
};
use serde_json::json;

use crate::controllers::poll_controllers::{find_poll, parse_user_id};
use crate::state::AppState;
use crate::utils::error::AppResult;
use crate::utils::session::Claims;
use crate::voting::VoteStore;

/// The caller's current selection for a poll, if any.
pub async fn check_user_vote(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<serde_json::Value>> {
    let user_id = parse_user_id(&claims.sub)?;
    let poll = find_poll(&state.db, &poll_id).await?;

    let vote_record = state.votes.find_vote(user_id, poll.id).await?;

    match vote_record {
        Some(record) => Ok(Json(json!({
            "has_voted": true,
            "option_id": record.option_id
        }))),
        None => Ok(Json(json!({
            "has_voted": false
        }))),
    }
}
