use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;

use crate::controllers::poll_controllers::find_poll;
use crate::controllers::poll_controllers::models::PollResponse;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn get_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<PollResponse>> {
    let poll = find_poll(&state.db, &poll_id).await?;

    Ok(Json(PollResponse::from_poll(poll, Utc::now())))
}
