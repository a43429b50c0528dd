use axum::{
    Json,
    extract::{Extension, Path, State},
};
use mongodb::bson::doc;
use serde_json::json;
use tracing::info;

use crate::controllers::poll_controllers::{find_poll, parse_user_id};
use crate::models::vote_record_models::VoteRecord;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::session::Claims;
use crate::voting::MongoVoteStore;

/// Wipe a poll's vote records. Creator only; the poll itself is untouched
/// since tallies are derived from the records.
pub async fn reset_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<serde_json::Value>> {
    let user_id = parse_user_id(&claims.sub)?;
    let poll = find_poll(&state.db, &poll_id).await?;

    if !poll.is_creator(user_id) {
        return Err(AppError::BadRequest(
            "Only the creator of the poll is allowed to reset it".to_string(),
        ));
    }

    let vote_collection = state.db.collection::<VoteRecord>(MongoVoteStore::COLLECTION);

    let deleted = vote_collection
        .delete_many(doc! { "poll_id": poll.id })
        .await?;

    info!(poll_id = %poll.id, deleted = deleted.deleted_count, "poll reset");

    Ok(Json(json!({
        "success": true,
        "deleted_votes": deleted.deleted_count
    })))
}
