//! Bearer-token authentication middleware.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use database::user;
use orchestrator::UserContext;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Token from `Authorization: Bearer <token>`. The scheme is case-insensitive.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    Some(token.trim()).filter(|token| !token.is_empty())
}

/// Resolve the bearer token into a [`UserContext`] request extension.
///
/// Requests without a known token are rejected with 401.
pub async fn require_user(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = bearer_token(req.headers()) else {
        return Err(ApiError::Unauthorized);
    };

    let Some(found) = user::find_user_by_token(state.db.pool(), token).await? else {
        return Err(ApiError::Unauthorized);
    };

    debug!(user = %found.name, path = %req.uri().path(), "Authenticated request");
    req.extensions_mut().insert(UserContext::from(found));

    Ok(next.run(req).await)
}
