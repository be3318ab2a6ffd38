//! Fallback for requests that match no route.

use axum::http::Uri;

use crate::error::AppError;

/// Answer unmatched paths (a missing trailing slash included) with the
/// standard JSON error body instead of an empty 404.
pub async fn route_not_found(uri: Uri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}
