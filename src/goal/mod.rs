//! Savings goals: the domain model, the stores that persist it, the derived
//! progress values and the page that shows it all.

mod cache;
mod calculator;
mod create_endpoint;
mod delete_endpoint;
mod domain;
mod form;
mod json_file;
mod page;
mod sqlite;
mod store;
mod update_endpoint;

pub use cache::CachedGoalStore;
pub use calculator::{
    GoalProgress, WeeksRemaining, is_achieved, progress_percent, remaining, weeks_remaining,
};
pub use create_endpoint::create_goal_endpoint;
pub use delete_endpoint::delete_goal_endpoint;
pub use domain::{
    GoalId, NewGoal, ProductName, SavingsGoal, ValidationError, validate_amount, validate_savings,
};
pub use form::{AmountForm, GoalForm, SavingsForm};
pub use json_file::{DEFAULT_SLOT_KEY, JsonFileGoalStore};
pub use page::get_goals_page;
pub use sqlite::{SQLiteGoalStore, create_goal_table};
pub use store::{GoalState, GoalStore};
pub use update_endpoint::{add_savings_endpoint, set_savings_endpoint, spend_savings_endpoint};
