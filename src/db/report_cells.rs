use crate::db::connection::Database;
use crate::errors::{MonitorError, MonitorResult};
use rusqlite::params;

/// A cell of the report grid. Rows and columns are 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: u32,
    pub col: u16,
    pub value: String,
    pub highlight: bool,
}

/// Tabular surface the report is written to.
pub trait ReportSink {
    /// `rows` x `cols` block starting at (`top`, `left`); empty cells are `None`.
    fn read_range(&self, top: u32, left: u16, rows: u32, cols: u16)
        -> MonitorResult<Vec<Vec<Option<String>>>>;

    fn write_cell(&self, row: u32, col: u16, value: &str) -> MonitorResult<()>;

    /// Writes `values` row by row starting at (`top`, `left`).
    fn write_range(&self, top: u32, left: u16, values: &[Vec<String>]) -> MonitorResult<()> {
        for (r, row) in values.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                self.write_cell(top + r as u32, left + c as u16, value)?;
            }
        }
        Ok(())
    }

    /// Removes values and styling in the block.
    fn clear_range(&self, top: u32, left: u16, rows: u32, cols: u16) -> MonitorResult<()>;

    fn set_highlight(&self, row: u32, col: u16, on: bool) -> MonitorResult<()>;
}

/// Report grid persisted in SQLite so the next run can read the previous statuses.
pub struct SqliteReportSheet<'a> {
    db: &'a Database,
}

impl<'a> SqliteReportSheet<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Every non-empty cell, row-major.
    pub fn cells(&self) -> MonitorResult<Vec<Cell>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT row, col, value, highlight FROM report_cells ORDER BY row, col")?;

            let rows = stmt
                .query_map([], |row| {
                    Ok(Cell {
                        row: row.get(0)?,
                        col: row.get(1)?,
                        value: row.get(2)?,
                        highlight: row.get(3)?,
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

impl ReportSink for SqliteReportSheet<'_> {
    fn read_range(
        &self,
        top: u32,
        left: u16,
        rows: u32,
        cols: u16,
    ) -> MonitorResult<Vec<Vec<Option<String>>>> {
        let mut grid = vec![vec![None; cols as usize]; rows as usize];
        if rows == 0 || cols == 0 {
            return Ok(grid);
        }

        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT row, col, value FROM report_cells
                     WHERE row >= ?1 AND row < ?2 AND col >= ?3 AND col < ?4",
                )?;

            let found = stmt
                .query_map(
                    params![top, top + rows, left, left + cols],
                    |row| {
                        Ok((
                            row.get::<_, u32>(0)?,
                            row.get::<_, u16>(1)?,
                            row.get::<_, String>(2)?,
                        ))
                    },
                )?;

            for r in found {
                let (row, col, value) = r?;
                if !value.is_empty() {
                    grid[(row - top) as usize][(col - left) as usize] = Some(value);
                }
            }
            Ok(())
        })?;

        Ok(grid)
    }

    fn write_cell(&self, row: u32, col: u16, value: &str) -> MonitorResult<()> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO report_cells (row, col, value) VALUES (?1, ?2, ?3)
                 ON CONFLICT (row, col) DO UPDATE SET value = excluded.value",
                params![row, col, value],
            )
            .map_err(|e| MonitorError::Db(format!("write cell ({row}, {col}) failed: {e}")))?;
            Ok(())
        })
    }

    fn clear_range(&self, top: u32, left: u16, rows: u32, cols: u16) -> MonitorResult<()> {
        self.db.with_conn(|conn| {
            conn.execute(
                "DELETE FROM report_cells
                 WHERE row >= ?1 AND row < ?2 AND col >= ?3 AND col < ?4",
                params![top, top + rows, left, left + cols],
            )
            .map_err(|e| MonitorError::Db(format!("clear range failed: {e}")))?;
            Ok(())
        })
    }

    fn set_highlight(&self, row: u32, col: u16, on: bool) -> MonitorResult<()> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO report_cells (row, col, value, highlight) VALUES (?1, ?2, '', ?3)
                 ON CONFLICT (row, col) DO UPDATE SET highlight = excluded.highlight",
                params![row, col, on],
            )
            .map_err(|e| MonitorError::Db(format!("highlight ({row}, {col}) failed: {e}")))?;
            Ok(())
        })
    }
}
