//! Selects and opens the storage backend for savings goals.

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use clap::ValueEnum;
use rusqlite::Connection;

use crate::{
    Error,
    goal::{DEFAULT_SLOT_KEY, GoalStore, JsonFileGoalStore, SQLiteGoalStore},
};

/// The storage backends a [GoalStore] can be opened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// A `savings_goal` table in a SQLite database.
    Sqlite,
    /// A goal list held under one key of a JSON document.
    JsonFile,
}

/// Where and how goals are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// Use the SQLite database at `db_path`. `:memory:` opens an in-memory database.
    Sqlite {
        /// File path to the SQLite database.
        db_path: PathBuf,
    },
    /// Use the JSON document at `path`, storing the goals under `key`.
    JsonFile {
        /// File path to the JSON document.
        path: PathBuf,
        /// The key of the slot that holds the goal list.
        key: String,
    },
}

impl StoreConfig {
    /// Pick the config for `backend` from the paths for both backends.
    pub fn new(backend: Backend, db_path: PathBuf, json_path: PathBuf, json_key: String) -> Self {
        match backend {
            Backend::Sqlite => StoreConfig::Sqlite { db_path },
            Backend::JsonFile => StoreConfig::JsonFile {
                path: json_path,
                key: json_key,
            },
        }
    }

    /// A JSON document config using the default slot key.
    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        StoreConfig::JsonFile {
            path: path.into(),
            key: DEFAULT_SLOT_KEY.to_owned(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Sqlite {
            db_path: PathBuf::from("savings_tracker.db"),
        }
    }
}

/// Open the goal store described by `config`.
///
/// # Errors
///
/// Returns [Error::StoreUnavailable] if the SQLite database cannot be opened
/// or initialised. The JSON document is only touched on first use.
pub fn open_goal_store(config: &StoreConfig) -> Result<Arc<dyn GoalStore>, Error> {
    match config {
        StoreConfig::Sqlite { db_path } => {
            let connection = if db_path.as_os_str() == ":memory:" {
                Connection::open_in_memory()?
            } else {
                Connection::open(db_path)?
            };

            tracing::info!("Storing goals in the SQLite database {}", db_path.display());
            let store = SQLiteGoalStore::new(Arc::new(Mutex::new(connection)))?;

            Ok(Arc::new(store))
        }
        StoreConfig::JsonFile { path, key } => {
            tracing::info!("Storing goals under {key:?} in {}", path.display());

            Ok(Arc::new(JsonFileGoalStore::new(path, key)))
        }
    }
}

#[cfg(test)]
mod open_goal_store_tests {
    use std::path::PathBuf;

    use crate::{
        config::{Backend, StoreConfig, open_goal_store},
        goal::{DEFAULT_SLOT_KEY, NewGoal},
    };

    #[test]
    fn new_picks_backend() {
        let sqlite = StoreConfig::new(
            Backend::Sqlite,
            PathBuf::from("goals.db"),
            PathBuf::from("goals.json"),
            "slot".to_owned(),
        );
        let json = StoreConfig::new(
            Backend::JsonFile,
            PathBuf::from("goals.db"),
            PathBuf::from("goals.json"),
            "slot".to_owned(),
        );

        assert_eq!(
            sqlite,
            StoreConfig::Sqlite {
                db_path: PathBuf::from("goals.db")
            }
        );
        assert_eq!(
            json,
            StoreConfig::JsonFile {
                path: PathBuf::from("goals.json"),
                key: "slot".to_owned()
            }
        );
    }

    #[tokio::test]
    async fn opens_in_memory_sqlite_store() {
        let store = open_goal_store(&StoreConfig::Sqlite {
            db_path: PathBuf::from(":memory:"),
        })
        .expect("Could not open store");

        let goal = store
            .create_goal(NewGoal::new("Bike", 100.0, 10.0).unwrap())
            .await
            .unwrap();

        assert_eq!(store.list_goals().await, Ok(vec![goal]));
    }

    #[tokio::test]
    async fn sqlite_goals_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::Sqlite {
            db_path: dir.path().join("goals.db"),
        };

        let goal = open_goal_store(&config)
            .unwrap()
            .create_goal(NewGoal::new("Bike", 100.0, 10.0).unwrap())
            .await
            .unwrap();

        let reopened = open_goal_store(&config).unwrap();
        assert_eq!(reopened.list_goals().await, Ok(vec![goal]));
    }

    #[tokio::test]
    async fn opens_json_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("goals.json");
        let store = open_goal_store(&StoreConfig::json_file(&path)).unwrap();

        store
            .create_goal(NewGoal::new("Bike", 100.0, 10.0).unwrap())
            .await
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains(DEFAULT_SLOT_KEY), "got {text}");
    }
}
