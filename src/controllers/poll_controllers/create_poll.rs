use axum::{
    Json,
    extract::{Extension, State},
};
use chrono::{DateTime, Duration, Utc};
use mongodb::bson::oid::ObjectId;
use uuid::Uuid;

use crate::controllers::poll_controllers::{POLLS_COLLECTION, parse_user_id};
use crate::controllers::poll_controllers::models::{CreatePollRequest, PollResponse};
use crate::models::poll_models::{Poll, PollOption};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::session::Claims;

pub async fn create_poll(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreatePollRequest>,
) -> AppResult<Json<PollResponse>> {
    let creator_id = parse_user_id(&claims.sub)?;
    let now = Utc::now();

    let question = payload.question.trim().to_string();
    if question.is_empty() {
        return Err(AppError::ValidationError("Question must not be empty".to_string()));
    }

    let option_texts = normalize_options(&payload.options)?;
    let (publish_at, close_at) = voting_window(payload.publish_at, payload.close_at, now)?;

    let new_poll = Poll {
        id: ObjectId::new(),
        question,
        creator_id,
        options: option_texts
            .into_iter()
            .map(|text| PollOption {
                id: Uuid::new_v4().to_string(),
                text,
            })
            .collect(),
        publish_at,
        close_at,
        created_at: now,
        updated_at: now,
    };

    state
        .db
        .collection::<Poll>(POLLS_COLLECTION)
        .insert_one(&new_poll)
        .await?;

    Ok(Json(PollResponse::from_poll(new_poll, now)))
}

/// Trimmed, at least two, all distinct.
fn normalize_options(options: &[String]) -> AppResult<Vec<String>> {
    let trimmed: Vec<String> = options
        .iter()
        .map(|option| option.trim().to_string())
        .filter(|option| !option.is_empty())
        .collect();

    if trimmed.len() < 2 {
        return Err(AppError::ValidationError(
            "Poll must have at least 2 options".to_string(),
        ));
    }

    let mut deduped = Vec::new();
    for option in &trimmed {
        if !deduped.contains(option) {
            deduped.push(option.clone());
        }
    }

    if deduped.len() != trimmed.len() {
        return Err(AppError::ValidationError(
            "Poll options must be unique".to_string(),
        ));
    }

    Ok(deduped)
}

fn voting_window(
    publish_at: Option<DateTime<Utc>>,
    close_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let publish_at = publish_at.unwrap_or(now);
    let close_at = close_at.unwrap_or(publish_at + Duration::days(7));

    if close_at <= publish_at {
        return Err(AppError::ValidationError(
            "Close date must be after the publish date".to_string(),
        ));
    }

    Ok((publish_at, close_at))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn options_are_trimmed_and_blanks_dropped() {
        let options = normalize_options(&strings(&["  Earhart ", "Hillenbrand", "   "])).unwrap();
        assert_eq!(options, strings(&["Earhart", "Hillenbrand"]));
    }

    #[test]
    fn fewer_than_two_options_is_rejected() {
        assert!(normalize_options(&strings(&["Earhart"])).is_err());
        assert!(normalize_options(&strings(&[])).is_err());
    }

    #[test]
    fn duplicate_options_are_rejected() {
        assert!(normalize_options(&strings(&["Earhart", "Earhart"])).is_err());
    }

    #[test]
    fn window_defaults_open_now_for_a_week() {
        let now = Utc::now();
        let (publish_at, close_at) = voting_window(None, None, now).unwrap();
        assert_eq!(publish_at, now);
        assert_eq!(close_at, now + Duration::days(7));
    }

    #[test]
    fn close_before_publish_is_rejected() {
        let now = Utc::now();
        let err = voting_window(Some(now), Some(now - Duration::hours(1)), now);
        assert!(err.is_err());
    }

    #[test]
    fn close_equal_to_publish_is_rejected() {
        let now = Utc::now();
        assert!(voting_window(Some(now), Some(now), now).is_err());
    }
}
