use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::utils::{error::AppError, session::{SESSION_COOKIE, verify_token}};

/// Reads the session cookie, verifies the JWT and stashes the claims in the
/// request extensions for the handlers behind this layer.
pub async fn jwt_auth(
    cookie_jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = cookie_jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| AppError::AuthenticationError("Login required".to_string()))?;

    let claims = verify_token(&token)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
