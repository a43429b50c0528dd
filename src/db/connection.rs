use mongodb::{
    Client, Database, IndexModel,
    bson::doc,
    options::{ClientOptions, IndexOptions},
};
use std::env;
use dotenvy::dotenv;
use tracing::info;

use crate::models::{user_models::User, vote_record_models::VoteRecord};
use crate::utils::error::{AppError, AppResult};
use crate::voting::MongoVoteStore;

pub async fn init_db() -> AppResult<Database> {
    dotenv().ok();

    let mongo_uri = env::var("MONGO_URI")
        .map_err(|_| AppError::InternalError("MONGO_URI must be set in .env".to_string()))?;
    let db_name = env::var("DB_NAME")
        .map_err(|_| AppError::InternalError("DB_NAME must be set in .env".to_string()))?;

    let mut client_options = ClientOptions::parse(&mongo_uri)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to parse MongoDB URI: {}", e)))?;

    client_options.app_name = Some("PollsBackend".to_string());

    let client = Client::with_options(client_options)
        .map_err(|e| AppError::DatabaseError(format!("Failed to initialize MongoDB client: {}", e)))?;

    let db = client.database(&db_name);

    ensure_indexes(&db).await?;

    info!("Database connection successful");

    Ok(db)
}

/// Unique indexes back the two at-most-one invariants: one live vote per
/// (poll, user) and one account per username. A race between two first-time
/// ballots becomes a duplicate-key conflict instead of a second record.
async fn ensure_indexes(db: &Database) -> AppResult<()> {
    let votes = db.collection::<VoteRecord>(MongoVoteStore::COLLECTION);
    votes
        .create_index(
            IndexModel::builder()
                .keys(doc! { "poll_id": 1, "user_id": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
        )
        .await?;

    let users = db.collection::<User>("users");
    users
        .create_index(
            IndexModel::builder()
                .keys(doc! { "username": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
        )
        .await?;

    Ok(())
}
