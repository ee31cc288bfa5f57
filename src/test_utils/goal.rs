use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use scraper::{Html, Selector};
use tempfile::TempDir;

use crate::goal::{
    CachedGoalStore, DEFAULT_SLOT_KEY, GoalState, JsonFileGoalStore, SQLiteGoalStore,
};

/// A cached store over an empty in-memory database, as the server sets it up.
pub(crate) fn get_goal_state() -> GoalState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    let store = SQLiteGoalStore::new(Arc::new(Mutex::new(connection)))
        .expect("Could not create goal store");

    GoalState {
        store: Arc::new(CachedGoalStore::new(Arc::new(store))),
    }
}

/// A store whose every operation fails with `StoreUnavailable`.
///
/// The JSON document path points at a directory, so it can never be read.
/// Keep the returned directory alive for the duration of the test.
pub(crate) fn broken_goal_state() -> (TempDir, GoalState) {
    let dir = tempfile::tempdir().expect("Could not create temporary directory");
    let store = JsonFileGoalStore::new(dir.path(), DEFAULT_SLOT_KEY);

    (
        dir,
        GoalState {
            store: Arc::new(store),
        },
    )
}

/// The message every operation on the store from [broken_goal_state] fails with.
pub(crate) fn broken_store_message(dir: &TempDir) -> String {
    std::fs::read_to_string(dir.path())
        .expect_err("Reading a directory as a file should fail")
        .to_string()
}

#[track_caller]
pub(crate) fn assert_alert(html: &Html, want_title: &str, want_description: &str) {
    let alert = html
        .select(&Selector::parse("[data-severity]").unwrap())
        .next()
        .expect("No alert found");

    let paragraphs = alert
        .select(&Selector::parse("p").unwrap())
        .map(|p| p.text().collect::<String>().trim().to_owned())
        .collect::<Vec<_>>();

    assert_eq!(
        paragraphs,
        vec![want_title, want_description],
        "want alert with title {want_title:?} and description {want_description:?}"
    );
}
