use rusqlite::Connection;
use std::cell::RefCell;
use std::path::Path;

use crate::errors::{MonitorError, MonitorResult};

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

/// The run is single-threaded, so one connection owned by the handle is enough.
pub struct Database {
    conn: RefCell<Connection>,
}

impl Database {
    pub fn open(path: impl AsRef<Path>) -> MonitorResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .map_err(|e| MonitorError::Db(format!("Open {} failed: {e}", path.display())))?;
        Ok(Self {
            conn: RefCell::new(conn),
        })
    }

    pub fn in_memory() -> MonitorResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| MonitorError::Db(format!("Open in-memory DB failed: {e}")))?;
        Ok(Self {
            conn: RefCell::new(conn),
        })
    }

    /// Provides a mutable connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> MonitorResult<T>
    where
        F: FnOnce(&mut Connection) -> MonitorResult<T>,
    {
        let mut conn = self
            .conn
            .try_borrow_mut()
            .map_err(|_| MonitorError::Db("connection already in use".to_string()))?;
        f(&mut *conn)
    }
}

/// Apply the bundled schema. Safe to run on every start.
pub fn init_db(db: &Database) -> MonitorResult<()> {
    db.with_conn(|conn| {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| MonitorError::Db(format!("Failed to apply schema: {e}")))?;
        Ok(())
    })?;

    tracing::debug!("database schema applied");
    Ok(())
}
