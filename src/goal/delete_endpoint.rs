//! Goal deletion endpoint.

use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::{
    Error,
    alert::Alert,
    goal::{GoalId, GoalState, page::goal_list_response},
};

/// Handle goal deletion. Deleting a goal that does not exist is an error.
pub async fn delete_goal_endpoint(
    Path(goal_id): Path<GoalId>,
    State(state): State<GoalState>,
) -> Response {
    match state.store.delete_goal(goal_id).await {
        Ok(()) => {
            goal_list_response(
                &state,
                Alert::destructive("Goal Removed", "Your savings goal has been deleted"),
            )
            .await
        }
        Err(Error::NotFound) => Error::NotFound.into_alert_response("Failed to delete goal"),
        Err(error) => {
            tracing::error!("An unexpected error occurred while deleting goal {goal_id}: {error}");
            error.into_alert_response("Failed to delete goal")
        }
    }
}
