//! The page shown for routes and goals that do not exist.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// Fallback handler for unknown routes.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

pub fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(
            error_view(
                "Not Found",
                "404",
                "Page not found.",
                "Sorry, we can't find that page. Your savings goals are on the homepage.",
            )
            .into_string(),
        ),
    )
        .into_response()
}
