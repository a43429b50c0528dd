use axum::{
    Json,
    extract::{Extension, Path, State},
};
use chrono::Utc;

use crate::controllers::poll_controllers::{find_poll, parse_user_id};
use crate::controllers::poll_controllers::models::{CastVoteRequest, CastVoteResponse};
use crate::state::AppState;
use crate::utils::error::AppResult;
use crate::utils::session::Claims;
use crate::voting;

/// Cast or change the caller's vote. The register creates a vote record on
/// first submission and reassigns it on later ones, so casting again is how
/// a vote is changed.
pub async fn cast_vote(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CastVoteRequest>,
) -> AppResult<Json<CastVoteResponse>> {
    let user_id = parse_user_id(&claims.sub)?;
    let poll = find_poll(&state.db, &poll_id).await?;
    let now = Utc::now();

    let outcome = voting::cast_vote(&state.votes, &poll, user_id, &payload.option_id, now).await?;

    Ok(Json(CastVoteResponse {
        poll_id: poll.id.to_hex(),
        option_id: outcome.vote.option_id.clone(),
        first_vote: outcome.is_first_vote(),
        previous_option: outcome.previous_option,
    }))
}
