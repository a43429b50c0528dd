use serde::{Deserialize, Serialize};
use mongodb::bson::oid::ObjectId;
use chrono::{DateTime, Utc};

/// A user's current selection for a poll. At most one record exists per
/// (poll_id, user_id) pair; changing a vote reassigns `option_id` on the
/// existing record instead of inserting a second one.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VoteRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub poll_id: ObjectId,

    pub user_id: ObjectId,

    pub option_id: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}
