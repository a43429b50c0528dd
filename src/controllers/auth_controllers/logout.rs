use axum::Json;
use axum::http::{HeaderValue, header::SET_COOKIE};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use crate::utils::error::{AppError, AppResult};
use crate::utils::session::{self, SESSION_COOKIE};

pub async fn logout(cookie_jar: CookieJar) -> AppResult<Response> {
    if let Some(cookie) = cookie_jar.get(SESSION_COOKIE) {
        if let Ok(claims) = session::verify_token(cookie.value()) {
            debug!(user_id = %claims.sub, "logout");
        }
    }

    let mut resp = Json(serde_json::json!({
        "success": true,
        "message": "Logged out successfully"
    }))
    .into_response();

    resp.headers_mut().insert(
        SET_COOKIE,
        HeaderValue::from_str(&session::clear_session_cookie())
            .map_err(|e| AppError::InternalError(format!("Failed to create cookie header: {}", e)))?,
    );

    Ok(resp)
}
