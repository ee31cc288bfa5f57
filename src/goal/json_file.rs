//! A [GoalStore] that keeps the whole goal list under one key of a JSON document on disk.
//!
//! The document is a JSON object used as a key-value store, e.g.
//! `{"savingsGoals": [...]}`. Keys other than the goal slot are left untouched.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::{
    Error,
    goal::{
        GoalId, NewGoal, SavingsGoal,
        domain::{now_utc, validate_savings},
        store::GoalStore,
    },
};

/// The default key under which the goal list is stored.
pub const DEFAULT_SLOT_KEY: &str = "savingsGoals";

/// Stores goals as a JSON array in a single slot of a JSON document.
#[derive(Debug)]
pub struct JsonFileGoalStore {
    path: PathBuf,
    key: String,
    // Serializes read-modify-write cycles on the file.
    file_lock: Mutex<()>,
}

impl JsonFileGoalStore {
    /// Create a store for the document at `path`, using the slot `key`.
    ///
    /// The file does not need to exist yet. It is created on the first write.
    pub fn new(path: impl Into<PathBuf>, key: &str) -> Self {
        Self {
            path: path.into(),
            key: key.to_owned(),
            file_lock: Mutex::new(()),
        }
    }

    /// The path of the JSON document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Map<String, Value>, Error> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(error) => return Err(error.into()),
        };

        if text.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&text)? {
            Value::Object(document) => Ok(document),
            _ => {
                tracing::error!("{:?} does not contain a JSON object", self.path);
                Err(Error::StoreUnavailable(format!(
                    "{} does not contain a JSON object",
                    self.path.display()
                )))
            }
        }
    }

    async fn read_goals(&self) -> Result<(Map<String, Value>, Vec<SavingsGoal>), Error> {
        let mut document = self.read_document().await?;

        let goals: Vec<SavingsGoal> = match document.remove(&self.key) {
            Some(value) => serde_json::from_value(value)?,
            None => Vec::new(),
        };

        for goal in &goals {
            if let Err(error) = goal.validate() {
                tracing::error!("goal {} in {:?} is invalid: {error}", goal.id, self.path);
                return Err(Error::StoreUnavailable(format!(
                    "goal {} in {} is invalid: {error}",
                    goal.id,
                    self.path.display()
                )));
            }
        }

        Ok((document, goals))
    }

    async fn write_goals(
        &self,
        mut document: Map<String, Value>,
        goals: &[SavingsGoal],
    ) -> Result<(), Error> {
        document.insert(self.key.clone(), serde_json::to_value(goals)?);
        let text = serde_json::to_string_pretty(&document)?;

        let mut temp_path = self.path.clone().into_os_string();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);

        tokio::fs::write(&temp_path, text).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        Ok(())
    }
}

/// Goals are kept newest first. New goals are pushed to the front, so equal
/// timestamps keep insertion order.
fn sort_newest_first(goals: &mut [SavingsGoal]) {
    goals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[async_trait]
impl GoalStore for JsonFileGoalStore {
    async fn list_goals(&self) -> Result<Vec<SavingsGoal>, Error> {
        let _guard = self.file_lock.lock().await;
        let (_, mut goals) = self.read_goals().await?;
        sort_newest_first(&mut goals);

        Ok(goals)
    }

    async fn get_goal(&self, id: GoalId) -> Result<SavingsGoal, Error> {
        let _guard = self.file_lock.lock().await;
        let (_, goals) = self.read_goals().await?;

        goals
            .into_iter()
            .find(|goal| goal.id == id)
            .ok_or(Error::NotFound)
    }

    async fn create_goal(&self, new_goal: NewGoal) -> Result<SavingsGoal, Error> {
        let _guard = self.file_lock.lock().await;
        let (document, mut goals) = self.read_goals().await?;

        let goal = new_goal.into_goal(GoalId::new_random(), now_utc());
        goals.insert(0, goal.clone());
        sort_newest_first(&mut goals);
        self.write_goals(document, &goals).await?;

        tracing::debug!("created goal {} for {}", goal.id, goal.product_name);

        Ok(goal)
    }

    async fn set_current_savings(
        &self,
        id: GoalId,
        new_amount: f64,
    ) -> Result<SavingsGoal, Error> {
        let new_amount = validate_savings(new_amount)?;

        let _guard = self.file_lock.lock().await;
        let (document, mut goals) = self.read_goals().await?;

        let goal = goals
            .iter_mut()
            .find(|goal| goal.id == id)
            .ok_or(Error::NotFound)?;
        goal.current_savings = new_amount;
        goal.updated_at = now_utc();
        let updated = goal.clone();

        self.write_goals(document, &goals).await?;

        Ok(updated)
    }

    async fn delete_goal(&self, id: GoalId) -> Result<(), Error> {
        let _guard = self.file_lock.lock().await;
        let (document, mut goals) = self.read_goals().await?;

        let count_before = goals.len();
        goals.retain(|goal| goal.id != id);

        if goals.len() == count_before {
            return Err(Error::NotFound);
        }

        self.write_goals(document, &goals).await?;

        tracing::debug!("deleted goal {id}");

        Ok(())
    }
}
