//! Application router configuration.

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::{
    AppState, endpoints,
    goal::{
        add_savings_endpoint, create_goal_endpoint, delete_goal_endpoint, get_goals_page,
        set_savings_endpoint, spend_savings_endpoint,
    },
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_goals_page))
        .route(endpoints::GOALS_API, post(create_goal_endpoint))
        .route(endpoints::GOAL, delete(delete_goal_endpoint))
        .route(endpoints::GOAL_DEPOSIT, post(add_savings_endpoint))
        .route(endpoints::GOAL_WITHDRAW, post(spend_savings_endpoint))
        .route(endpoints::GOAL_SAVINGS, put(set_savings_endpoint))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}
