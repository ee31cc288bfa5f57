//! Implements a struct that holds the state of the server.

use std::sync::Arc;

use crate::goal::{CachedGoalStore, GoalStore};

/// The state of the server.
#[derive(Clone)]
pub struct AppState {
    /// The goal store, behind the read-through cache of the goal list.
    pub goal_store: Arc<dyn GoalStore>,
}

impl AppState {
    /// Create a new [AppState] over `goal_store`.
    ///
    /// The store is wrapped in a [CachedGoalStore] so repeated page loads do
    /// not hit the backend until a goal changes.
    pub fn new(goal_store: Arc<dyn GoalStore>) -> Self {
        Self {
            goal_store: Arc::new(CachedGoalStore::new(goal_store)),
        }
    }
}
