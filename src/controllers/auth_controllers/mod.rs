use axum::{
    Json,
    http::{HeaderValue, header::SET_COOKIE},
    response::{IntoResponse, Response},
};

use crate::models::user_models::User;
use crate::utils::error::{AppError, AppResult};
use crate::utils::session;

pub mod login;
pub mod logout;
pub mod models;
pub mod register;

pub const USERS_COLLECTION: &str = "users";

/// Issue a session token for the user and attach it as an HttpOnly cookie.
pub(crate) fn session_response(user: &User) -> AppResult<Response> {
    let token = session::create_token(&user.id.to_hex())
        .map_err(|e| AppError::InternalError(format!("Failed to create session token: {}", e)))?;

    let body = models::AuthResponse {
        success: true,
        username: user.username.clone(),
        user_id: user.id.to_hex(),
        token: token.clone(),
    };

    let mut resp = Json(body).into_response();
    resp.headers_mut().insert(
        SET_COOKIE,
        HeaderValue::from_str(&session::session_cookie(&token))
            .map_err(|e| AppError::InternalError(format!("Failed to create cookie header: {}", e)))?,
    );

    Ok(resp)
}
