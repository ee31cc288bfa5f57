//! Savings Tracker is a web app for planning purchases and tracking the
//! money put aside for them.
//!
//! A user records a product, its price and how much they save each week.
//! The app shows how far along each goal is and estimates how many weeks
//! remain. This library provides the routes, which directly serve HTML pages,
//! and the storage backends behind them.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod config;
mod endpoints;
pub mod goal;
mod html;
mod internal_server_error;
mod logging;
mod not_found;
mod routing;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use config::{Backend, StoreConfig, open_goal_store};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

use crate::{
    alert::Alert, goal::ValidationError, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The input had the wrong shape or was out of range.
    ///
    /// The message is safe to show to the user.
    #[error("{0}")]
    Validation(ValidationError),

    /// The submitted form could not be parsed, e.g. a price that is not a
    /// number. Holds a message describing the bad field.
    #[error("{0}")]
    InvalidForm(String),

    /// The operation targeted a goal that does not exist.
    ///
    /// For HTTP request handlers, the client should check that the goal ID
    /// is correct and that the goal has not already been deleted.
    #[error("the requested goal could not be found")]
    NotFound,

    /// The storage backend could not be reached or returned an error.
    ///
    /// The string is the backend's own message. Alerts show it to the user,
    /// or a generic message for the operation if it is empty.
    #[error("the goal store is unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<ValidationError> for Error {
    fn from(value: ValidationError) -> Self {
        Error::Validation(value)
    }
}

impl From<FormRejection> for Error {
    fn from(value: FormRejection) -> Self {
        tracing::debug!("rejected form: {value}");
        Error::InvalidForm(value.body_text())
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::StoreUnavailable(error.to_string())
            }
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        tracing::error!("an I/O error occurred while accessing the goal store: {value}");
        Error::StoreUnavailable(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        tracing::error!("could not (de)serialize goals as JSON: {value}");
        Error::StoreUnavailable(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::StoreUnavailable(_) => {
                tracing::error!("An unexpected error occurred: {}", self);
                InternalServerError {
                    description: "Could not load your savings goals",
                    fix: "The goal store is unavailable. Try again later or check the server logs.",
                }
                .into_response()
            }
            Error::Validation(_) | Error::InvalidForm(_) => {
                tracing::error!("An unexpected error occurred: {}", self);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Render the error as an alert for the alert container.
    ///
    /// Validation, form and missing-goal messages are shown as is. Store failures
    /// show the backend's message, or `fallback` (e.g. "Failed to add goal")
    /// if the backend gave none.
    fn into_alert_response(self, fallback: &str) -> Response {
        let (status_code, description) = match &self {
            Error::Validation(error) => (StatusCode::BAD_REQUEST, error.to_string()),
            Error::InvalidForm(message) => (StatusCode::BAD_REQUEST, message.clone()),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                "The goal could not be found. \
                Try refreshing the page to see if it has already been deleted."
                    .to_owned(),
            ),
            Error::StoreUnavailable(message) => {
                tracing::error!("{fallback}: {message}");
                let description = match message.trim() {
                    "" => fallback.to_owned(),
                    message => message.to_owned(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, description)
            }
        };

        (status_code, Alert::error("Error", &description)).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{
        Error,
        goal::ValidationError,
        test_utils::{assert_alert, assert_valid_html, parse_html_fragment},
    };

    #[test]
    fn sql_no_rows_is_not_found() {
        assert_eq!(
            Error::from(rusqlite::Error::QueryReturnedNoRows),
            Error::NotFound
        );
    }

    #[test]
    fn other_sql_errors_are_store_unavailable() {
        let error = Error::from(rusqlite::Error::InvalidQuery);

        assert!(matches!(error, Error::StoreUnavailable(_)), "got {error:?}");
    }

    #[test]
    fn not_found_page_is_404() {
        assert_eq!(
            Error::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn validation_alert_shows_message() {
        let response = Error::Validation(ValidationError::EmptyProductName)
            .into_alert_response("Failed to add goal");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Product name cannot be empty"), "got {text}");
    }

    #[tokio::test]
    async fn store_alert_shows_underlying_message() {
        let response = Error::StoreUnavailable("disk on fire".to_owned())
            .into_alert_response("Failed to delete goal");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = parse_html_fragment(response).await;
        assert_alert(&html, "Error", "disk on fire");
    }

    #[tokio::test]
    async fn store_alert_without_message_uses_fallback() {
        let response = Error::StoreUnavailable(" ".to_owned())
            .into_alert_response("Failed to delete goal");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = parse_html_fragment(response).await;
        assert_alert(&html, "Error", "Failed to delete goal");
    }
}
