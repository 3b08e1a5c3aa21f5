//! SQLite connection factory.
//!
//! Connections are opened per unit of work and released when dropped, so the
//! pool is cheap to clone into the HTTP state and into blocking tasks.

use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How long a writer waits for another writer's transaction before failing.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct DbPool {
    path: PathBuf,
}

impl DbPool {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Open a configured connection. Dropping it releases the handle.
    pub fn get(&self) -> AppResult<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    /// Helper to execute a closure with a scoped, mutable connection.
    pub fn with_conn<F, T>(&self, func: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T>,
    {
        let mut conn = self.get()?;
        func(&mut conn)
    }
}
