use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::{
    Collection, Database,
    bson::{doc, oid::ObjectId},
};

use crate::models::vote_record_models::VoteRecord;
use crate::utils::error::AppError;
use crate::voting::VoteStore;

/// Vote repository backed by the `vote_records` collection. The collection
/// carries a unique index on (poll_id, user_id), so a concurrent duplicate
/// insert fails with a duplicate-key error instead of a second row.
#[derive(Clone)]
pub struct MongoVoteStore {
    votes: Collection<VoteRecord>,
}

impl MongoVoteStore {
    pub const COLLECTION: &'static str = "vote_records";

    pub fn new(db: &Database) -> Self {
        Self {
            votes: db.collection::<VoteRecord>(Self::COLLECTION),
        }
    }
}

#[async_trait]
impl VoteStore for MongoVoteStore {
    async fn find_vote(
        &self,
        user_id: ObjectId,
        poll_id: ObjectId,
    ) -> Result<Option<VoteRecord>, AppError> {
        let vote = self
            .votes
            .find_one(doc! { "poll_id": poll_id, "user_id": user_id })
            .await?;
        Ok(vote)
    }

    async fn create_vote(
        &self,
        user_id: ObjectId,
        poll_id: ObjectId,
        option_id: &str,
        now: DateTime<Utc>,
    ) -> Result<VoteRecord, AppError> {
        let record = VoteRecord {
            id: ObjectId::new(),
            poll_id,
            user_id,
            option_id: option_id.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.votes.insert_one(&record).await?;

        Ok(record)
    }

    async fn update_vote(
        &self,
        vote: &VoteRecord,
        option_id: &str,
        now: DateTime<Utc>,
    ) -> Result<VoteRecord, AppError> {
        self.votes
            .update_one(
                doc! { "_id": vote.id },
                doc! {
                    "$set": {
                        "option_id": option_id,
                        "updated_at": now.to_rfc3339(),
                    }
                },
            )
            .await?;

        Ok(VoteRecord {
            option_id: option_id.to_string(),
            updated_at: now,
            ..vote.clone()
        })
    }
}
