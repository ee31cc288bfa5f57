//! Alert system for displaying success and error messages to users.
//!
//! Alerts are shown in the `#alert-container` element of the base page.
//! Error responses are swapped into it by htmx's `hx-target-error`, while
//! successful responses carry the alert out-of-band next to the main content.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

/// The ID of the element that alerts are placed in.
pub const ALERT_CONTAINER_ID: &str = "alert-container";

const ALERT_CONTAINER_STYLE: &str =
    "position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;";

/// How an alert should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    Success,
    /// Something was removed on purpose.
    Destructive,
    Error,
}

/// A short status message with a title and a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub description: String,
    pub severity: AlertSeverity,
}

impl Alert {
    /// Create a new success alert
    pub fn success(title: &str, description: &str) -> Self {
        Self::new(title, description, AlertSeverity::Success)
    }

    /// Create a new alert for a deliberate removal
    pub fn destructive(title: &str, description: &str) -> Self {
        Self::new(title, description, AlertSeverity::Destructive)
    }

    /// Create a new error alert
    pub fn error(title: &str, description: &str) -> Self {
        Self::new(title, description, AlertSeverity::Error)
    }

    fn new(title: &str, description: &str, severity: AlertSeverity) -> Self {
        Self {
            title: title.to_owned(),
            description: description.to_owned(),
            severity,
        }
    }

    pub fn into_html(self) -> Markup {
        let style = match self.severity {
            AlertSeverity::Success => {
                "flex items-start justify-between gap-4 p-4 rounded-lg border shadow-lg \
                text-green-800 bg-green-50 border-green-300 \
                dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
            }
            AlertSeverity::Destructive | AlertSeverity::Error => {
                "flex items-start justify-between gap-4 p-4 rounded-lg border shadow-lg \
                text-red-800 bg-red-50 border-red-300 \
                dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
            }
        };
        let role = match self.severity {
            AlertSeverity::Error => "alert",
            AlertSeverity::Success | AlertSeverity::Destructive => "status",
        };

        html!(
            div class=(style) role=(role) data-severity=(severity_name(self.severity))
            {
                div
                {
                    p class="font-semibold" { (self.title) }

                    @if !self.description.is_empty() {
                        p class="text-sm" { (self.description) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    class="text-lg leading-none opacity-70 hover:opacity-100"
                    onclick="this.parentElement.remove()"
                {
                    "×"
                }
            }
        )
    }

    /// Render the alert inside a replacement for the alert container so that
    /// htmx swaps it in out-of-band.
    pub fn into_oob_html(self) -> Markup {
        alert_container(Some(self.into_html()), true)
    }
}

fn severity_name(severity: AlertSeverity) -> &'static str {
    match severity {
        AlertSeverity::Success => "success",
        AlertSeverity::Destructive => "destructive",
        AlertSeverity::Error => "error",
    }
}

/// The container alerts are swapped into.
pub fn alert_container(content: Option<Markup>, out_of_band: bool) -> Markup {
    html!(
        div
            id=(ALERT_CONTAINER_ID)
            hx-swap-oob=[out_of_band.then_some("true")]
            class="w-full max-w-md px-4"
            style=(ALERT_CONTAINER_STYLE)
        {
            @if let Some(content) = content {
                (content)
            }
        }
    )
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        (StatusCode::OK, Html(self.into_html().into_string())).into_response()
    }
}
