use mongodb::Database;
use std::sync::Arc;

use crate::voting::MongoVoteStore;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub votes: MongoVoteStore,
}

impl AppState {
    pub fn new(db: Arc<Database>) -> Self {
        let votes = MongoVoteStore::new(&db);
        Self { db, votes }
    }
}
