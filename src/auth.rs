use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{debug, instrument, warn};

use crate::errors::{error_response, ApiError};
use crate::schemas::AppState;

/// Owner identified by the bearer token of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedOwner {
    pub id: i32,
    pub username: String,
}

fn bearer_token(request: &Request) -> Option<String> {
    let value = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return None;
    }
    Some(token.trim().to_string())
}

/// Rejects requests without a valid bearer token and records the caller as an
/// [`AuthenticatedOwner`] extension.
#[instrument(skip_all, fields(path = %request.uri().path()))]
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = bearer_token(&request) else {
        warn!("Request without bearer token");
        return Err(error_response(
            StatusCode::UNAUTHORIZED,
            "MISSING_TOKEN",
            "A bearer token is required",
        ));
    };

    match state.tokens.verify(&token) {
        Ok(claims) => {
            debug!("Authenticated owner {} ({})", claims.uid, claims.sub);
            request.extensions_mut().insert(AuthenticatedOwner {
                id: claims.uid,
                username: claims.sub,
            });
            Ok(next.run(request).await)
        }
        Err(err) => {
            warn!("Rejected bearer token: {}", err);
            Err(error_response(
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "The bearer token is invalid or expired",
            ))
        }
    }
}
