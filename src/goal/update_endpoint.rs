//! Endpoints that change how much has been saved towards a goal.
//!
//! The store only ever replaces the savings total, so the deposit and
//! withdraw handlers read the goal, compute the new total and send that.

use axum::{
    Form,
    extract::{Path, State, rejection::FormRejection},
    response::Response,
};

use crate::{
    Error,
    alert::Alert,
    goal::{
        AmountForm, GoalId, GoalState, SavingsForm, SavingsGoal, is_achieved,
        page::goal_list_response, validate_amount,
    },
};

const UPDATE_FAILED: &str = "Failed to update savings";

/// Add `amount` to the goal's savings.
pub async fn add_savings_endpoint(
    Path(goal_id): Path<GoalId>,
    State(state): State<GoalState>,
    form: Result<Form<AmountForm>, FormRejection>,
) -> Response {
    let result = match form {
        Ok(Form(form)) => {
            adjust_savings(&state, goal_id, form.amount, |current, amount| {
                current + amount
            })
            .await
        }
        Err(rejection) => Err(rejection.into()),
    };

    updated_response(&state, goal_id, result).await
}

/// Remove `amount` from the goal's savings. Removing more than has been
/// saved leaves the goal at zero rather than going negative.
pub async fn spend_savings_endpoint(
    Path(goal_id): Path<GoalId>,
    State(state): State<GoalState>,
    form: Result<Form<AmountForm>, FormRejection>,
) -> Response {
    let result = match form {
        Ok(Form(form)) => {
            adjust_savings(&state, goal_id, form.amount, |current, amount| {
                (current - amount).max(0.0)
            })
            .await
        }
        Err(rejection) => Err(rejection.into()),
    };

    updated_response(&state, goal_id, result).await
}

/// Overwrite the goal's savings total.
pub async fn set_savings_endpoint(
    Path(goal_id): Path<GoalId>,
    State(state): State<GoalState>,
    form: Result<Form<SavingsForm>, FormRejection>,
) -> Response {
    let result = match form {
        Ok(Form(form)) => {
            state
                .store
                .set_current_savings(goal_id, form.current_savings)
                .await
        }
        Err(rejection) => Err(rejection.into()),
    };

    updated_response(&state, goal_id, result).await
}

async fn adjust_savings(
    state: &GoalState,
    goal_id: GoalId,
    amount: f64,
    new_total: impl FnOnce(f64, f64) -> f64,
) -> Result<SavingsGoal, Error> {
    let amount = validate_amount(amount)?;
    let goal = state.store.get_goal(goal_id).await?;

    state
        .store
        .set_current_savings(goal_id, new_total(goal.current_savings, amount))
        .await
}

async fn updated_response(
    state: &GoalState,
    goal_id: GoalId,
    result: Result<SavingsGoal, Error>,
) -> Response {
    match result {
        Ok(goal) => goal_list_response(state, savings_updated_alert(&goal)).await,
        Err(error @ (Error::Validation(_) | Error::InvalidForm(_) | Error::NotFound)) => {
            error.into_alert_response(UPDATE_FAILED)
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating the savings for goal {goal_id}: {error}"
            );
            error.into_alert_response(UPDATE_FAILED)
        }
    }
}

fn savings_updated_alert(goal: &SavingsGoal) -> Alert {
    if is_achieved(goal) {
        Alert::success(
            "🎉 Goal Achieved!",
            &format!(
                "Congratulations! You've reached your goal for {}",
                goal.product_name
            ),
        )
    } else {
        Alert::success("Progress Updated!", "Your savings have been updated")
    }
}
