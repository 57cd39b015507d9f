use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::error::{PayrollError, Result};
use crate::layout::SheetTable;

/// Reads every sheet of a workbook written by
/// [`excel_write`](crate::io::excel_write) back into tables, first row as
/// the column labels. This is the path used to check a run's output.
pub fn read_tables(path: &Path) -> Result<Vec<SheetTable>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_names = workbook.sheet_names().to_vec();

    let mut tables = Vec::with_capacity(sheet_names.len());
    for sheet_name in sheet_names {
        let range = workbook
            .worksheet_range(&sheet_name)
            .ok_or_else(|| PayrollError::InvalidWorkbook(format!("missing sheet '{sheet_name}'")))?
            .map_err(PayrollError::from)?;

        let mut rows = range
            .rows()
            .map(|row| row.iter().map(|cell| cell_to_string(Some(cell))).collect::<Vec<_>>());
        let columns = rows.next().ok_or_else(|| {
            PayrollError::InvalidWorkbook(format!("sheet '{sheet_name}' has no header row"))
        })?;

        tables.push(SheetTable {
            sheet_name,
            columns,
            rows: rows.collect(),
        });
    }

    Ok(tables)
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
