//! Goal creation endpoint.

use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::Response,
};

use crate::{
    Error,
    alert::Alert,
    goal::{
        GoalForm, GoalState,
        page::{goal_list_response_with, new_goal_form_view},
    },
};

const CREATE_FAILED: &str = "Failed to add goal";

/// Handle the goal creation form.
///
/// Responds with the refreshed goal list, a blank form and a "Goal Added!"
/// alert, or an error alert for the alert container. Nothing is stored if the
/// form is invalid or cannot be parsed.
pub async fn create_goal_endpoint(
    State(state): State<GoalState>,
    form: Result<Form<GoalForm>, FormRejection>,
) -> Response {
    let new_goal = match form.map(|Form(form)| form.into_new_goal()) {
        Ok(Ok(new_goal)) => new_goal,
        Ok(Err(error)) => return Error::from(error).into_alert_response(CREATE_FAILED),
        Err(rejection) => return Error::from(rejection).into_alert_response(CREATE_FAILED),
    };

    match state.store.create_goal(new_goal).await {
        Ok(goal) => {
            let description = format!("Started tracking savings for {}", goal.product_name);
            goal_list_response_with(
                &state,
                Alert::success("Goal Added!", &description),
                Some(new_goal_form_view(true)),
            )
            .await
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a goal: {error}");
            error.into_alert_response(CREATE_FAILED)
        }
    }
}
