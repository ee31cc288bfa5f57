//! A read-through cache of the goal list in front of any [GoalStore].

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    Error,
    goal::{GoalId, NewGoal, SavingsGoal, store::GoalStore},
};

/// Caches the result of [GoalStore::list_goals] until the next mutation.
///
/// Every call to a mutating operation invalidates the cache, whether or not
/// it succeeded, so the next list is a fresh read of the backend.
pub struct CachedGoalStore {
    inner: Arc<dyn GoalStore>,
    goals: RwLock<Option<Vec<SavingsGoal>>>,
}

impl CachedGoalStore {
    /// Wrap `inner` with an empty cache.
    pub fn new(inner: Arc<dyn GoalStore>) -> Self {
        Self {
            inner,
            goals: RwLock::new(None),
        }
    }

    /// Drop the cached list.
    pub async fn invalidate(&self) {
        *self.goals.write().await = None;
        tracing::debug!("goal list cache invalidated");
    }
}

#[async_trait]
impl GoalStore for CachedGoalStore {
    async fn list_goals(&self) -> Result<Vec<SavingsGoal>, Error> {
        if let Some(goals) = self.goals.read().await.as_ref() {
            return Ok(goals.clone());
        }

        let mut cache = self.goals.write().await;

        // Another task may have filled the cache while we waited for the lock.
        if let Some(goals) = cache.as_ref() {
            return Ok(goals.clone());
        }

        let goals = self.inner.list_goals().await?;
        *cache = Some(goals.clone());

        Ok(goals)
    }

    async fn get_goal(&self, id: GoalId) -> Result<SavingsGoal, Error> {
        self.list_goals()
            .await?
            .into_iter()
            .find(|goal| goal.id == id)
            .ok_or(Error::NotFound)
    }

    async fn create_goal(&self, new_goal: NewGoal) -> Result<SavingsGoal, Error> {
        let result = self.inner.create_goal(new_goal).await;
        self.invalidate().await;

        result
    }

    async fn set_current_savings(
        &self,
        id: GoalId,
        new_amount: f64,
    ) -> Result<SavingsGoal, Error> {
        let result = self.inner.set_current_savings(id, new_amount).await;
        self.invalidate().await;

        result
    }

    async fn delete_goal(&self, id: GoalId) -> Result<(), Error> {
        let result = self.inner.delete_goal(id).await;
        self.invalidate().await;

        result
    }
}
