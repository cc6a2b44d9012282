use crate::db::report_cells::Cell;
use crate::db::HistoryEntry;
use crate::errors::MonitorResult;
use rust_xlsxwriter::{Color, Format, Workbook};
use std::path::Path;

const REPORT_SHEET: &str = "Report";
const HISTORY_SHEET: &str = "History";
const HISTORY_HEADERS: [&str; 5] = [
    "Timestamp",
    "Number",
    "Previous Status",
    "New Status",
    "Account ID",
];

/// Renders the persisted report grid and the change log to one workbook.
pub fn export_report_xlsx(
    cells: &[Cell],
    history: &[HistoryEntry],
    path: impl AsRef<Path>,
) -> MonitorResult<()> {
    let mut workbook = Workbook::new();
    let highlight = Format::new().set_background_color(Color::RGB(0xFFF2CC));
    let bold = Format::new().set_bold();

    let report = workbook.add_worksheet();
    report.set_name(REPORT_SHEET)?;
    for col in 0..12u16 {
        report.set_column_width(col, 24)?;
    }

    for cell in cells {
        if cell.highlight {
            report.write_string_with_format(cell.row, cell.col, &cell.value, &highlight)?;
        } else if !cell.value.is_empty() {
            report.write_string(cell.row, cell.col, &cell.value)?;
        }
    }

    let log = workbook.add_worksheet();
    log.set_name(HISTORY_SHEET)?;
    for (col, header) in HISTORY_HEADERS.iter().enumerate() {
        log.write_string_with_format(0, col as u16, *header, &bold)?;
        log.set_column_width(col as u16, 26)?;
    }

    // Newest first, right under the header.
    for (i, entry) in history.iter().enumerate() {
        let r = (i + 1) as u32;
        log.write_string(r, 0, entry.logged_at.format("%Y-%m-%d %H:%M:%S").to_string())?;
        log.write_string(r, 1, &entry.asset_id)?;
        log.write_string(r, 2, &entry.previous_status)?;
        log.write_string(r, 3, &entry.new_status)?;
        log.write_string(r, 4, &entry.owner_id)?;
    }

    workbook.save(path.as_ref())?;
    Ok(())
}
