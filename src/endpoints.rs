//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/goals/{goal_id}', use [format_endpoint].

use std::fmt::Display;

/// The page listing all savings goals with the form for adding one.
pub const ROOT: &str = "/";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to create a goal.
pub const GOALS_API: &str = "/api/goals";
/// The route to delete a goal.
pub const GOAL: &str = "/api/goals/{goal_id}";
/// The route to add money to a goal's savings.
pub const GOAL_DEPOSIT: &str = "/api/goals/{goal_id}/deposit";
/// The route to spend or remove money from a goal's savings.
pub const GOAL_WITHDRAW: &str = "/api/goals/{goal_id}/withdraw";
/// The route to overwrite a goal's savings total.
pub const GOAL_SAVINGS: &str = "/api/goals/{goal_id}/savings";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/goals/{goal_id}', '{goal_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: impl Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
