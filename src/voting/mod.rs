use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;

use crate::models::{poll_models::Poll, vote_record_models::VoteRecord};
use crate::utils::error::AppError;

pub mod mongo;

pub use mongo::MongoVoteStore;

/// The persistence seam for vote records. Production uses [`MongoVoteStore`];
/// tests use an in-memory map so the register runs without a database.
#[async_trait]
pub trait VoteStore {
    async fn find_vote(
        &self,
        user_id: ObjectId,
        poll_id: ObjectId,
    ) -> Result<Option<VoteRecord>, AppError>;

    async fn create_vote(
        &self,
        user_id: ObjectId,
        poll_id: ObjectId,
        option_id: &str,
        now: DateTime<Utc>,
    ) -> Result<VoteRecord, AppError>;

    async fn update_vote(
        &self,
        vote: &VoteRecord,
        option_id: &str,
        now: DateTime<Utc>,
    ) -> Result<VoteRecord, AppError>;
}

/// Why a ballot was not accepted. The two domain conditions are reported to
/// the caller so the submission form can be re-rendered with a message;
/// store failures pass through untouched.
#[derive(Debug)]
pub enum VoteError {
    NotOpen,
    UnknownOption,
    Store(AppError),
}

impl fmt::Display for VoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteError::NotOpen => write!(f, "Poll is not open for voting"),
            VoteError::UnknownOption => write!(f, "Option does not belong to this poll"),
            VoteError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl From<AppError> for VoteError {
    fn from(err: AppError) -> Self {
        VoteError::Store(err)
    }
}

impl From<VoteError> for AppError {
    fn from(err: VoteError) -> Self {
        match err {
            VoteError::NotOpen => AppError::BadRequest("Poll is not open for voting".to_string()),
            VoteError::UnknownOption => {
                AppError::BadRequest("Option does not belong to this poll".to_string())
            }
            VoteError::Store(inner) => inner,
        }
    }
}

/// Result of a successful ballot. `previous_option` is the option the user
/// had selected before this call, if any.
#[derive(Debug)]
pub struct CastOutcome {
    pub vote: VoteRecord,
    pub previous_option: Option<String>,
}

impl CastOutcome {
    pub fn is_first_vote(&self) -> bool {
        self.previous_option.is_none()
    }
}

/// Register a user's choice for a poll.
///
/// The poll must be inside its `[publish_at, close_at)` window and the option
/// must belong to the poll. A first submission creates the vote record;
/// later submissions reassign the existing record, so exactly one record per
/// (user, poll) exists after any successful call. Re-casting the currently
/// selected option succeeds without touching the store.
pub async fn cast_vote<S: VoteStore>(
    store: &S,
    poll: &Poll,
    user_id: ObjectId,
    option_id: &str,
    now: DateTime<Utc>,
) -> Result<CastOutcome, VoteError> {
    if !poll.can_vote(now) {
        return Err(VoteError::NotOpen);
    }

    if !poll.has_option(option_id) {
        return Err(VoteError::UnknownOption);
    }

    match store.find_vote(user_id, poll.id).await? {
        None => {
            let vote = store.create_vote(user_id, poll.id, option_id, now).await?;
            Ok(CastOutcome { vote, previous_option: None })
        }
        Some(existing) => {
            let previous = existing.option_id.clone();
            if previous == option_id {
                return Ok(CastOutcome { vote: existing, previous_option: Some(previous) });
            }
            let vote = store.update_vote(&existing, option_id, now).await?;
            Ok(CastOutcome { vote, previous_option: Some(previous) })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::Duration;

    use super::*;
    use crate::models::poll_models::PollOption;

    /// Map keyed by (user, poll), guarded by a plain mutex.
    struct MemoryVoteStore {
        votes: Mutex<HashMap<(ObjectId, ObjectId), VoteRecord>>,
    }

    impl MemoryVoteStore {
        fn new() -> Self {
            Self { votes: Mutex::new(HashMap::new()) }
        }

        fn count(&self) -> usize {
            self.votes.lock().unwrap().len()
        }

        fn option_for(&self, user_id: ObjectId, poll_id: ObjectId) -> Option<String> {
            self.votes
                .lock()
                .unwrap()
                .get(&(user_id, poll_id))
                .map(|vote| vote.option_id.clone())
        }
    }

    #[async_trait]
    impl VoteStore for MemoryVoteStore {
        async fn find_vote(
            &self,
            user_id: ObjectId,
            poll_id: ObjectId,
        ) -> Result<Option<VoteRecord>, AppError> {
            Ok(self.votes.lock().unwrap().get(&(user_id, poll_id)).cloned())
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
            let mut votes = self.votes.lock().unwrap();
            if votes.contains_key(&(user_id, poll_id)) {
                return Err(AppError::Conflict("Vote already exists".to_string()));
            }
            votes.insert((user_id, poll_id), record.clone());
            Ok(record)
        }

        async fn update_vote(
            &self,
            vote: &VoteRecord,
            option_id: &str,
            now: DateTime<Utc>,
        ) -> Result<VoteRecord, AppError> {
            let mut votes = self.votes.lock().unwrap();
            let stored = votes
                .get_mut(&(vote.user_id, vote.poll_id))
                .ok_or_else(|| AppError::NotFound("Vote not found".to_string()))?;
            stored.option_id = option_id.to_string();
            stored.updated_at = now;
            Ok(stored.clone())
        }
    }

    fn open_poll(now: DateTime<Utc>) -> Poll {
        poll(now, -Duration::days(1), now + Duration::days(1))
    }

    fn poll(now: DateTime<Utc>, publish_offset: Duration, close_at: DateTime<Utc>) -> Poll {
        Poll {
            id: ObjectId::new(),
            question: "Best campus coffee?".to_string(),
            creator_id: ObjectId::new(),
            options: vec![
                PollOption { id: "opt-a".to_string(), text: "Vienna".to_string() },
                PollOption { id: "opt-b".to_string(), text: "Greyhouse".to_string() },
            ],
            publish_at: now + publish_offset,
            close_at,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn first_ballot_creates_a_vote() {
        let now = Utc::now();
        let store = MemoryVoteStore::new();
        let poll = open_poll(now);
        let user = ObjectId::new();

        let outcome = cast_vote(&store, &poll, user, "opt-a", now).await.unwrap();

        assert!(outcome.is_first_vote());
        assert_eq!(store.count(), 1);
        assert_eq!(store.option_for(user, poll.id), Some("opt-a".to_string()));
    }

    #[tokio::test]
    async fn second_ballot_reassigns_the_existing_vote() {
        let now = Utc::now();
        let store = MemoryVoteStore::new();
        let poll = open_poll(now);
        let user = ObjectId::new();

        cast_vote(&store, &poll, user, "opt-a", now).await.unwrap();
        let outcome = cast_vote(&store, &poll, user, "opt-b", now).await.unwrap();

        assert_eq!(outcome.previous_option.as_deref(), Some("opt-a"));
        assert_eq!(store.count(), 1);
        assert_eq!(store.option_for(user, poll.id), Some("opt-b".to_string()));
    }

    #[tokio::test]
    async fn recasting_the_same_option_is_a_no_op() {
        let now = Utc::now();
        let store = MemoryVoteStore::new();
        let poll = open_poll(now);
        let user = ObjectId::new();

        let first = cast_vote(&store, &poll, user, "opt-a", now).await.unwrap();
        let second = cast_vote(&store, &poll, user, "opt-a", now).await.unwrap();

        assert_eq!(second.vote.updated_at, first.vote.updated_at);
        assert_eq!(store.count(), 1);
        assert_eq!(store.option_for(user, poll.id), Some("opt-a".to_string()));
    }

    #[tokio::test]
    async fn ballots_before_publication_are_rejected() {
        let now = Utc::now();
        let store = MemoryVoteStore::new();
        let poll = poll(now, Duration::days(1), now + Duration::days(2));

        let err = cast_vote(&store, &poll, ObjectId::new(), "opt-a", now)
            .await
            .unwrap_err();

        assert!(matches!(err, VoteError::NotOpen));
        assert_eq!(store.count(), 0);
    }

    #[tokio::test]
    async fn ballots_after_close_never_touch_the_store() {
        let now = Utc::now();
        let store = MemoryVoteStore::new();
        let closed = poll(now, -Duration::days(2), now - Duration::days(1));
        let user = ObjectId::new();

        let err = cast_vote(&store, &closed, user, "opt-a", now).await.unwrap_err();

        assert!(matches!(err, VoteError::NotOpen));
        assert_eq!(store.count(), 0);
    }

    #[tokio::test]
    async fn ballot_exactly_at_close_is_rejected() {
        let now = Utc::now();
        let store = MemoryVoteStore::new();
        let poll = poll(now, -Duration::days(1), now);

        let err = cast_vote(&store, &poll, ObjectId::new(), "opt-a", now)
            .await
            .unwrap_err();

        assert!(matches!(err, VoteError::NotOpen));
    }

    #[tokio::test]
    async fn options_from_another_poll_are_rejected() {
        let now = Utc::now();
        let store = MemoryVoteStore::new();
        let poll = open_poll(now);

        let err = cast_vote(&store, &poll, ObjectId::new(), "someone-elses-option", now)
            .await
            .unwrap_err();

        assert!(matches!(err, VoteError::UnknownOption));
        assert_eq!(store.count(), 0);
    }

    #[tokio::test]
    async fn votes_are_tracked_per_user() {
        let now = Utc::now();
        let store = MemoryVoteStore::new();
        let poll = open_poll(now);
        let alice = ObjectId::new();
        let bob = ObjectId::new();

        cast_vote(&store, &poll, alice, "opt-a", now).await.unwrap();
        cast_vote(&store, &poll, bob, "opt-b", now).await.unwrap();

        assert_eq!(store.count(), 2);
        assert_eq!(store.option_for(alice, poll.id), Some("opt-a".to_string()));
        assert_eq!(store.option_for(bob, poll.id), Some("opt-b".to_string()));
    }
}
