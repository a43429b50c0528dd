use axum::{
    Json,
    extract::State,
};
use chrono::{DateTime, Utc};
use mongodb::bson::doc;
use futures::TryStreamExt;

use crate::controllers::poll_controllers::POLLS_COLLECTION;
use crate::controllers::poll_controllers::models::PollResponse;
use crate::models::poll_models::Poll;
use crate::state::AppState;
use crate::utils::error::AppResult;

/// List published polls, newest publication first.
pub async fn get_all_polls(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PollResponse>>> {
    let polls_collection = state.db.collection::<Poll>(POLLS_COLLECTION);
    let now = Utc::now();

    let mut cursor = polls_collection.find(doc! {}).await?;

    let mut polls = Vec::new();

    while let Some(poll) = cursor.try_next().await? {
        polls.push(poll);
    }

    let poll_responses: Vec<PollResponse> = published_polls(polls, now)
        .into_iter()
        .map(|poll| PollResponse::from_poll(poll, now))
        .collect();

    Ok(Json(poll_responses))
}

/// Polls whose publish date is still in the future stay hidden; the rest
/// are ordered by publish date, newest first.
fn published_polls(polls: Vec<Poll>, now: DateTime<Utc>) -> Vec<Poll> {
    let mut published: Vec<Poll> = polls
        .into_iter()
        .filter(|poll| poll.is_published(now))
        .collect();

    published.sort_by(|a, b| b.publish_at.cmp(&a.publish_at));

    published
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use mongodb::bson::oid::ObjectId;

    use super::*;

    fn poll_published_at(now: DateTime<Utc>, offset: Duration, question: &str) -> Poll {
        Poll {
            id: ObjectId::new(),
            question: question.to_string(),
            creator_id: ObjectId::new(),
            options: Vec::new(),
            publish_at: now + offset,
            close_at: now + offset + Duration::days(1),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn future_polls_are_hidden() {
        let now = Utc::now();
        let polls = vec![
            poll_published_at(now, -Duration::days(30), "past"),
            poll_published_at(now, Duration::days(30), "future"),
        ];

        let listed = published_polls(polls, now);

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].question, "past");
    }

    #[test]
    fn empty_when_nothing_is_published() {
        let now = Utc::now();
        let polls = vec![poll_published_at(now, Duration::days(30), "future")];

        assert!(published_polls(polls, now).is_empty());
    }

    #[test]
    fn newest_publication_comes_first() {
        let now = Utc::now();
        let polls = vec![
            poll_published_at(now, -Duration::days(30), "older"),
            poll_published_at(now, -Duration::days(5), "newer"),
        ];

        let listed = published_polls(polls, now);

        assert_eq!(listed[0].question, "newer");
        assert_eq!(listed[1].question, "older");
    }
}
