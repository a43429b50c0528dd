use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
};
use mongodb::bson::doc;
use futures::TryStreamExt;

use crate::controllers::poll_controllers::find_poll;
use crate::controllers::poll_controllers::models::{OptionTally, PollResultsResponse};
use crate::models::vote_record_models::VoteRecord;
use crate::state::AppState;
use crate::utils::error::AppResult;
use crate::voting::MongoVoteStore;

/// Tally the poll's votes. Counts are derived from `vote_records` at read
/// time; every option appears in the result, zero-count ones included.
pub async fn get_results(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<PollResultsResponse>> {
    let poll = find_poll(&state.db, &poll_id).await?;

    let vote_collection = state.db.collection::<VoteRecord>(MongoVoteStore::COLLECTION);

    let mut cursor = vote_collection.find(doc! { "poll_id": poll.id }).await?;

    let mut counts: HashMap<String, i64> = HashMap::new();
    while let Some(vote) = cursor.try_next().await? {
        *counts.entry(vote.option_id).or_insert(0) += 1;
    }

    let results: Vec<OptionTally> = poll
        .options
        .iter()
        .map(|option| OptionTally {
            id: option.id.clone(),
            text: option.text.clone(),
            votes: counts.get(&option.id).copied().unwrap_or(0),
        })
        .collect();

    let total_votes = results.iter().map(|tally| tally.votes).sum();

    Ok(Json(PollResultsResponse {
        id: poll.id.to_hex(),
        question: poll.question,
        total_votes,
        results,
    }))
}
