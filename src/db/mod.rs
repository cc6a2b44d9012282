pub mod connection;
pub mod history;
pub mod report_cells;

pub use connection::{init_db, Database};
pub use history::{HistoryEntry, HistoryStore, SqliteHistory};
pub use report_cells::{ReportSink, SqliteReportSheet};
