//! A [GoalStore] backed by a `savings_goal` table in SQLite.

use std::{
    str::FromStr,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use rusqlite::{Connection, Row, types::Type};

use crate::{
    Error,
    goal::{
        GoalId, NewGoal, ProductName, SavingsGoal,
        domain::{now_utc, validate_savings},
        store::GoalStore,
    },
};

/// Stores goals as rows addressed by their ID.
#[derive(Debug, Clone)]
pub struct SQLiteGoalStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteGoalStore {
    /// Create a store over `connection`, creating the goal table if needed.
    ///
    /// # Errors
    ///
    /// Returns [Error::StoreUnavailable] if the table cannot be created.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Result<Self, Error> {
        {
            let guard = lock(&connection)?;
            create_goal_table(&guard)?;
        }

        Ok(Self { connection })
    }
}

#[async_trait]
impl GoalStore for SQLiteGoalStore {
    async fn list_goals(&self) -> Result<Vec<SavingsGoal>, Error> {
        let connection = lock(&self.connection)?;
        get_all_goals(&connection)
    }

    async fn get_goal(&self, id: GoalId) -> Result<SavingsGoal, Error> {
        let connection = lock(&self.connection)?;
        get_goal(id, &connection)
    }

    async fn create_goal(&self, new_goal: NewGoal) -> Result<SavingsGoal, Error> {
        let connection = lock(&self.connection)?;
        create_goal(new_goal, &connection)
    }

    async fn set_current_savings(
        &self,
        id: GoalId,
        new_amount: f64,
    ) -> Result<SavingsGoal, Error> {
        let connection = lock(&self.connection)?;
        set_current_savings(id, new_amount, &connection)
    }

    async fn delete_goal(&self, id: GoalId) -> Result<(), Error> {
        let connection = lock(&self.connection)?;
        delete_goal(id, &connection)
    }
}

fn lock(connection: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>, Error> {
    connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::StoreUnavailable("could not acquire the database lock".to_owned())
    })
}

/// Create the goal table and its index.
pub fn create_goal_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS savings_goal (
            id TEXT PRIMARY KEY,
            product_name TEXT NOT NULL CHECK (length(trim(product_name)) > 0),
            target_price REAL NOT NULL CHECK (target_price > 0),
            weekly_savings REAL NOT NULL CHECK (weekly_savings >= 0),
            current_savings REAL NOT NULL CHECK (current_savings >= 0),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_savings_goal_created_at ON savings_goal(created_at);",
    )?;

    Ok(())
}

/// Insert a goal and return it with its generated ID and timestamps.
pub fn create_goal(new_goal: NewGoal, connection: &Connection) -> Result<SavingsGoal, Error> {
    let goal = new_goal.into_goal(GoalId::new_random(), now_utc());

    connection.execute(
        "INSERT INTO savings_goal
            (id, product_name, target_price, weekly_savings, current_savings, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
        (
            goal.id.to_string(),
            goal.product_name.as_ref(),
            goal.target_price,
            goal.weekly_savings,
            goal.current_savings,
            goal.created_at,
            goal.updated_at,
        ),
    )?;

    tracing::debug!("created goal {} for {}", goal.id, goal.product_name);

    Ok(goal)
}

/// Retrieve a single goal by ID.
pub fn get_goal(id: GoalId, connection: &Connection) -> Result<SavingsGoal, Error> {
    connection
        .prepare(
            "SELECT id, product_name, target_price, weekly_savings, current_savings, created_at, updated_at
            FROM savings_goal WHERE id = :id;",
        )?
        .query_row(&[(":id", &id.to_string())], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all goals, newest first.
pub fn get_all_goals(connection: &Connection) -> Result<Vec<SavingsGoal>, Error> {
    connection
        .prepare(
            "SELECT id, product_name, target_price, weekly_savings, current_savings, created_at, updated_at
            FROM savings_goal ORDER BY created_at DESC, rowid DESC;",
        )?
        .query_map([], map_row)?
        .map(|maybe_goal| maybe_goal.map_err(|error| error.into()))
        .collect()
}

/// Overwrite a goal's current savings. Returns an error if the goal doesn't exist.
pub fn set_current_savings(
    id: GoalId,
    new_amount: f64,
    connection: &Connection,
) -> Result<SavingsGoal, Error> {
    let new_amount = validate_savings(new_amount)?;

    let rows_affected = connection.execute(
        "UPDATE savings_goal SET current_savings = ?1, updated_at = ?2 WHERE id = ?3",
        (new_amount, now_utc(), id.to_string()),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    get_goal(id, connection)
}

/// Delete a goal by ID. Returns an error if the goal doesn't exist.
pub fn delete_goal(id: GoalId, connection: &Connection) -> Result<(), Error> {
    let rows_affected =
        connection.execute("DELETE FROM savings_goal WHERE id = ?1", [id.to_string()])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    tracing::debug!("deleted goal {id}");

    Ok(())
}

fn map_row(row: &Row) -> Result<SavingsGoal, rusqlite::Error> {
    let raw_id: String = row.get(0)?;
    let id = GoalId::from_str(&raw_id).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(error))
    })?;
    let raw_name: String = row.get(1)?;

    Ok(SavingsGoal {
        id,
        product_name: ProductName::new_unchecked(&raw_name),
        target_price: row.get(2)?,
        weekly_savings: row.get(3)?,
        current_savings: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}



#[cfg(test)]
mod sqlite_goal_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        Error,
        goal::{GoalStore, NewGoal, SQLiteGoalStore},
    };

    fn get_store() -> SQLiteGoalStore {
        let connection = Connection::open_in_memory().unwrap();
        SQLiteGoalStore::new(Arc::new(Mutex::new(connection))).expect("Could not create store")
    }

    #[tokio::test]
    async fn create_then_list_contains_goal() {
        let store = get_store();

        let goal = store
            .create_goal(NewGoal::new("Bike", 1000.0, 0.0).unwrap())
            .await
            .unwrap();

        assert_eq!(store.list_goals().await, Ok(vec![goal]));
    }

    #[tokio::test]
    async fn delete_then_list_excludes_goal() {
        let store = get_store();
        let keep = store
            .create_goal(NewGoal::new("Keep", 10.0, 1.0).unwrap())
            .await
            .unwrap();
        let remove = store
            .create_goal(NewGoal::new("Remove", 10.0, 1.0).unwrap())
            .await
            .unwrap();

        store.delete_goal(remove.id).await.unwrap();

        assert_eq!(store.list_goals().await, Ok(vec![keep]));
        assert_eq!(store.delete_goal(remove.id).await, Err(Error::NotFound));
    }

    #[tokio::test]
    async fn set_then_get_returns_new_total() {
        let store = get_store();
        let goal = store
            .create_goal(NewGoal::new("Bike", 1000.0, 10.0).unwrap())
            .await
            .unwrap();

        let updated = store.set_current_savings(goal.id, 400.0).await.unwrap();

        assert_eq!(updated.current_savings, 400.0);
        assert_eq!(store.get_goal(goal.id).await, Ok(updated));
    }
}
