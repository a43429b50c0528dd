use axum::{
    Json,
    extract::{Extension, State},
};
use chrono::Utc;
use mongodb::bson::doc;
use futures::TryStreamExt;

use crate::controllers::poll_controllers::{POLLS_COLLECTION, parse_user_id};
use crate::controllers::poll_controllers::models::PollResponse;
use crate::models::poll_models::Poll;
use crate::state::AppState;
use crate::utils::error::AppResult;
use crate::utils::session::Claims;

/// Polls created by the caller, unpublished ones included.
pub async fn get_polls_by_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<Vec<PollResponse>>> {
    let creator_id = parse_user_id(&claims.sub)?;
    let now = Utc::now();

    let polls_collection = state.db.collection::<Poll>(POLLS_COLLECTION);

    let cursor = polls_collection
        .find(doc! { "creator_id": creator_id })
        .await?;

    let polls: Vec<Poll> = cursor.try_collect().await?;

    let poll_responses: Vec<PollResponse> = polls
        .into_iter()
        .map(|poll| PollResponse::from_poll(poll, now))
        .collect();

    Ok(Json(poll_responses))
}
