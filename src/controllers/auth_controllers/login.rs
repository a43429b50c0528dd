use axum::{
    Json,
    extract::State,
    response::Response,
};
use mongodb::bson::doc;

use crate::controllers::auth_controllers::{USERS_COLLECTION, session_response};
use crate::controllers::auth_controllers::models::LoginRequest;
use crate::models::user_models::User;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::password;

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Response> {
    let users = state.db.collection::<User>(USERS_COLLECTION);

    let user = users
        .find_one(doc! { "username": payload.username.trim() })
        .await?
        .ok_or_else(|| AppError::AuthenticationError("Invalid username or password".to_string()))?;

    if !password::verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::AuthenticationError(
            "Invalid username or password".to_string(),
        ));
    }

    session_response(&user)
}
