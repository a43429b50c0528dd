use serde::{Serialize, Deserialize};
use mongodb::bson::oid::ObjectId;
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Poll {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub question: String,
    pub creator_id: ObjectId,
    pub options: Vec<PollOption>,
    pub publish_at: DateTime<Utc>,
    pub close_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Option texts are embedded in the poll document. Vote counts are not
/// stored here; they are counted from `vote_records` when results are read.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PollOption {
    pub id: String,
    pub text: String,
}

impl Poll {
    /// A poll is published once its publish date has passed.
    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        now >= self.publish_at
    }

    /// Published within the last day, i.e. `publish_at` in `(now - 1d, now]`.
    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        now - Duration::days(1) <= self.publish_at && self.publish_at <= now
    }

    /// Voting is open during the half-open window `[publish_at, close_at)`.
    pub fn can_vote(&self, now: DateTime<Utc>) -> bool {
        self.publish_at <= now && now < self.close_at
    }

    pub fn has_option(&self, option_id: &str) -> bool {
        self.options.iter().any(|option| option.id == option_id)
    }

    pub fn is_creator(&self, user_id: ObjectId) -> bool {
        self.creator_id == user_id
    }
}
