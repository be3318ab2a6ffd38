//! Caller identity extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use pomopet_core::access::Caller;
use pomopet_core::error::CoreError;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The caller on whose behalf a request runs.
///
/// Requests without an `Authorization` header are served anonymously. A
/// header that is present must carry a valid `Bearer` token whose subject is
/// a positive user id, otherwise the request is rejected with 401:
///
/// ```ignore
/// async fn my_handler(CallerIdentity(caller): CallerIdentity) -> AppResult<Json<()>> {
///     tracing::info!(owner = ?caller.owner(), "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CallerIdentity(pub Caller);

impl FromRequestParts<AppState> for CallerIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(CallerIdentity(Caller::anonymous()));
        };

        let token = header
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid Authorization format. Expected: Bearer <token>".into(),
                ))
            })?;

        let jwt = state.config.jwt.as_ref().ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Token authentication is not enabled".into(),
            ))
        })?;

        let claims = validate_token(token, jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        // Owner keys start at 1; 0 and below would alias the anonymous bucket.
        if claims.sub <= 0 {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid token subject".into(),
            )));
        }

        Ok(CallerIdentity(Caller::user(claims.sub)))
    }
}
