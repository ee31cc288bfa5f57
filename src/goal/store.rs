//! The storage contract shared by every goal backend.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRef;

use crate::{
    AppState, Error,
    goal::{GoalId, NewGoal, SavingsGoal},
};

/// Durable CRUD over the savings goal collection.
///
/// Implementations must return goals newest first from [GoalStore::list_goals]
/// and must report missing goals as [Error::NotFound] rather than ignoring them.
#[async_trait]
pub trait GoalStore: Send + Sync {
    /// All goals, newest created first.
    ///
    /// # Errors
    ///
    /// Returns [Error::StoreUnavailable] if the backend cannot be read.
    async fn list_goals(&self) -> Result<Vec<SavingsGoal>, Error>;

    /// The goal with the given `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no such goal, or
    /// [Error::StoreUnavailable] if the backend cannot be read.
    async fn get_goal(&self, id: GoalId) -> Result<SavingsGoal, Error>;

    /// Persist `new_goal`, assigning its ID and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [Error::StoreUnavailable] if the goal could not be written.
    async fn create_goal(&self, new_goal: NewGoal) -> Result<SavingsGoal, Error>;

    /// Replace the current savings of goal `id` with `new_amount`.
    ///
    /// The caller computes the new total. Repeating the call with the same
    /// amount leaves the goal unchanged apart from `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if `new_amount` is negative or not finite,
    /// [Error::NotFound] if there is no such goal, or
    /// [Error::StoreUnavailable] on backend failure.
    async fn set_current_savings(&self, id: GoalId, new_amount: f64)
    -> Result<SavingsGoal, Error>;

    /// Permanently remove goal `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no such goal, or
    /// [Error::StoreUnavailable] on backend failure.
    async fn delete_goal(&self, id: GoalId) -> Result<(), Error>;
}

/// The state needed by the goal page and endpoints.
#[derive(Clone)]
pub struct GoalState {
    /// The store every goal operation goes through.
    pub store: Arc<dyn GoalStore>,
}

impl FromRef<AppState> for GoalState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.goal_store.clone(),
        }
    }
}
