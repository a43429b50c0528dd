use axum::{
    Json,
    extract::{Extension, Path, State},
};
use chrono::Utc;
use mongodb::bson::doc;

use crate::controllers::poll_controllers::{POLLS_COLLECTION, find_poll, parse_user_id};
use crate::controllers::poll_controllers::models::PollResponse;
use crate::models::poll_models::Poll;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::session::Claims;

/// Close a poll early by moving its close date to now. Eligibility is purely
/// date-based, so this immediately ends the voting window.
pub async fn close_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<PollResponse>> {
    let user_id = parse_user_id(&claims.sub)?;
    let poll = find_poll(&state.db, &poll_id).await?;

    if !poll.is_creator(user_id) {
        return Err(AppError::BadRequest(
            "Only the creator of the poll is allowed to close it".to_string(),
        ));
    }

    let now = Utc::now();
    if poll.close_at <= now {
        return Err(AppError::Conflict("Poll is already closed".to_string()));
    }

    let coll = state.db.collection::<Poll>(POLLS_COLLECTION);

    coll.update_one(
        doc! { "_id": poll.id },
        doc! {
            "$set": {
                "close_at": now.to_rfc3339(),
                "updated_at": now.to_rfc3339(),
            }
        },
    )
    .await?;

    let updated_poll = coll
        .find_one(doc! { "_id": poll.id })
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    Ok(Json(PollResponse::from_poll(updated_poll, now)))
}
