use axum::{
    Json,
    extract::State,
    response::Response,
};
use chrono::Utc;
use mongodb::bson::{doc, oid::ObjectId};

use crate::controllers::auth_controllers::{USERS_COLLECTION, session_response};
use crate::controllers::auth_controllers::models::RegisterRequest;
use crate::models::user_models::User;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::password;

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Response> {
    let username = payload.username.trim().to_string();

    if username.len() < 3 || username.len() > 32 {
        return Err(AppError::ValidationError(
            "Username must be between 3 and 32 characters".to_string(),
        ));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(AppError::ValidationError(
            "Username may only contain letters, digits, '-' and '_'".to_string(),
        ));
    }
    if payload.password.len() < 8 {
        return Err(AppError::ValidationError(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let users = state.db.collection::<User>(USERS_COLLECTION);

    let existing = users.find_one(doc! { "username": &username }).await?;
    if existing.is_some() {
        return Err(AppError::Conflict("Username is already taken".to_string()));
    }

    let now = Utc::now();
    let user = User {
        id: ObjectId::new(),
        username,
        password_hash: password::hash_password(&payload.password)?,
        created_at: now,
        updated_at: now,
    };

    // The unique index on username catches the race where two registrations
    // pass the find_one check at the same time.
    users.insert_one(&user).await?;

    session_response(&user)
}
