use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::poll_models::Poll;

#[derive(Deserialize, Debug)]
pub struct CreatePollRequest {
    pub question: String,
    pub options: Vec<String>,
    /// Defaults to now: the poll opens immediately.
    pub publish_at: Option<DateTime<Utc>>,
    /// Defaults to one week after `publish_at`.
    pub close_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Debug)]
pub struct PollOptionResponse {
    pub id: String,
    pub text: String,
}

#[derive(Serialize, Debug)]
pub struct PollResponse {
    pub id: String,
    pub question: String,
    pub creator_id: String,
    pub options: Vec<PollOptionResponse>,
    pub publish_at: DateTime<Utc>,
    pub close_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub is_published: bool,
    pub recently_published: bool,
    pub can_vote: bool,
}

impl PollResponse {
    /// Flags are evaluated against the request's `now`, not a global clock.
    pub fn from_poll(poll: Poll, now: DateTime<Utc>) -> Self {
        Self {
            id: poll.id.to_hex(),
            question: poll.question.clone(),
            creator_id: poll.creator_id.to_hex(),
            options: poll
                .options
                .iter()
                .map(|option| PollOptionResponse {
                    id: option.id.clone(),
                    text: option.text.clone(),
                })
                .collect(),
            publish_at: poll.publish_at,
            close_at: poll.close_at,
            created_at: poll.created_at,
            is_published: poll.is_published(now),
            recently_published: poll.was_published_recently(now),
            can_vote: poll.can_vote(now),
        }
    }
}

#[derive(Deserialize)]
pub struct CastVoteRequest {
    pub option_id: String,
}

#[derive(Serialize)]
pub struct CastVoteResponse {
    pub poll_id: String,
    pub option_id: String,
    pub first_vote: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_option: Option<String>,
}

#[derive(Serialize)]
pub struct OptionTally {
    pub id: String,
    pub text: String,
    pub votes: i64,
}

#[derive(Serialize)]
pub struct PollResultsResponse {
    pub id: String,
    pub question: String,
    pub total_votes: i64,
    pub results: Vec<OptionTally>,
}
