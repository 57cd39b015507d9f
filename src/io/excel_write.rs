use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use tracing::debug;

use crate::error::Result;
use crate::layout::WorkbookData;

/// Writes the provided workbook data to the given path. The file is only
/// created once every sheet has been laid out.
pub fn write_workbook(path: &Path, workbook: &WorkbookData) -> Result<()> {
    let mut workbook_writer = Workbook::new();
    let header_format = Format::new().set_bold();

    for table in &workbook.tables {
        let worksheet = workbook_writer.add_worksheet();
        worksheet.set_name(&table.sheet_name)?;

        for (col_idx, header) in table.columns.iter().enumerate() {
            worksheet.write_string_with_format(0, col_idx as u16, header, &header_format)?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                worksheet.write_string((row_idx + 1) as u32, col_idx as u16, cell)?;
            }
        }

        for (col_idx, width) in table.column_widths().into_iter().enumerate() {
            worksheet.set_column_width(col_idx as u16, width as f64)?;
        }
        worksheet.set_freeze_panes(1, 0)?;

        debug!(sheet = %table.sheet_name, rows = table.rows.len(), "sheet laid out");
    }

    workbook_writer.save(path)?;
    Ok(())
}
