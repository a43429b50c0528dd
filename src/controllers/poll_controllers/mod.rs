use mongodb::{Database, bson::{doc, oid::ObjectId}};

use crate::models::poll_models::Poll;
use crate::utils::error::{AppError, AppResult};

pub mod cast_vote;
pub mod check_vote;
pub mod close_poll;
pub mod create_poll;
pub mod get_poll;
pub mod get_results;
pub mod get_user_polls;
pub mod models;
pub mod polls;
pub mod reset_poll;

pub const POLLS_COLLECTION: &str = "polls";

/// Look up a poll from its path parameter.
pub(crate) async fn find_poll(db: &Database, poll_id: &str) -> AppResult<Poll> {
    let obj_id = ObjectId::parse_str(poll_id)
        .map_err(|_| AppError::BadRequest("Invalid poll id".to_string()))?;

    db.collection::<Poll>(POLLS_COLLECTION)
        .find_one(doc! { "_id": obj_id })
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))
}

pub(crate) fn parse_user_id(sub: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(sub).map_err(|_| AppError::BadRequest("Invalid user id".to_string()))
}
