use crate::db::connection::Database;
use crate::domain::asset::lookup_key;
use crate::errors::{MonitorError, MonitorResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

/// One row of the change log.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub logged_at: DateTime<Utc>,
    pub asset_id: String,
    pub previous_status: String,
    pub new_status: String,
    pub owner_id: String,
}

/// Append-only status log. Readers see the newest entry first.
pub trait HistoryStore {
    fn append(&self, entry: &HistoryEntry) -> MonitorResult<()>;

    /// Earliest entry for `asset_id` whose new status is `marker`.
    /// Ids are compared by `lookup_key`.
    fn first_with_status(&self, asset_id: &str, marker: &str)
        -> MonitorResult<Option<DateTime<Utc>>>;

    /// Every entry, newest first.
    fn entries(&self) -> MonitorResult<Vec<HistoryEntry>>;
}

pub struct SqliteHistory<'a> {
    db: &'a Database,
}

impl<'a> SqliteHistory<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }
}

impl HistoryStore for SqliteHistory<'_> {
    fn append(&self, entry: &HistoryEntry) -> MonitorResult<()> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO status_history
                    (logged_at, asset_id, asset_key, previous_status, new_status, owner_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    entry.logged_at,
                    entry.asset_id,
                    lookup_key(&entry.asset_id),
                    entry.previous_status,
                    entry.new_status,
                    entry.owner_id,
                ],
            )
            .map_err(|e| MonitorError::Db(format!("insert history failed: {e}")))?;
            Ok(())
        })
    }

    fn first_with_status(
        &self,
        asset_id: &str,
        marker: &str,
    ) -> MonitorResult<Option<DateTime<Utc>>> {
        let key = lookup_key(asset_id);
        if key.is_empty() {
            return Ok(None);
        }

        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT logged_at FROM status_history
                 WHERE asset_key = ?1 AND new_status = ?2
                 ORDER BY id ASC
                 LIMIT 1",
                params![key, marker],
                |row| row.get::<_, DateTime<Utc>>(0),
            )
            .optional()
            .map_err(|e| MonitorError::Db(format!("history lookup failed: {e}")))
        })
    }

    fn entries(&self) -> MonitorResult<Vec<HistoryEntry>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT logged_at, asset_id, previous_status, new_status, owner_id
                     FROM status_history
                     ORDER BY id DESC",
                )?;

            let rows = stmt
                .query_map([], |row| {
                    Ok(HistoryEntry {
                        logged_at: row.get(0)?,
                        asset_id: row.get(1)?,
                        previous_status: row.get(2)?,
                        new_status: row.get(3)?,
                        owner_id: row.get(4)?,
                    })
                })?;

            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            Ok(out)
        })
    }
}
