use std::collections::HashSet;

use tracing::info;

use crate::group::CompanyGroup;
use crate::model::EMPLOYEE_HEADERS;
use crate::naming::MAX_SHEET_NAME_LEN;

/// Characters added to the widest cell of a column.
pub const COLUMN_PADDING: usize = 2;

/// A table that will be materialised as an Excel sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub sheet_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetTable {
    /// Display width of every column, see [`column_widths`].
    pub fn column_widths(&self) -> Vec<usize> {
        column_widths(&self.columns, &self.rows, COLUMN_PADDING)
    }
}

/// Represents all tables required to materialise the Excel workbook.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkbookData {
    pub tables: Vec<SheetTable>,
    /// Groups left out because they hold no employees.
    pub empty_groups: Vec<String>,
}

/// Lays out one sheet per company that has employees, in group order.
pub fn build_workbook(groups: &[CompanyGroup]) -> WorkbookData {
    let mut sheet_names = SheetNameRegistry::default();
    let mut workbook = WorkbookData::default();

    for group in groups {
        if group.employees.is_empty() {
            info!(company = %group.name, "company has no employees; no sheet written");
            workbook.empty_groups.push(group.name.clone());
            continue;
        }

        workbook.tables.push(SheetTable {
            sheet_name: sheet_names.assign(&group.name),
            columns: EMPLOYEE_HEADERS.iter().map(|label| label.to_string()).collect(),
            rows: group.employees.iter().map(|record| record.to_row()).collect(),
        });
    }

    workbook
}

/// Width of each column: the character count of its longest entry, header
/// included, plus `padding`. Rows shorter than the header contribute nothing
/// for the missing cells.
pub fn column_widths<S: AsRef<str>>(headers: &[S], rows: &[Vec<S>], padding: usize) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(column, header)| {
            let widest = rows
                .iter()
                .filter_map(|row| row.get(column))
                .map(|cell| cell.as_ref().chars().count())
                .fold(header.as_ref().chars().count(), usize::max);
            widest + padding
        })
        .collect()
}

/// Makes company names acceptable to the workbook writer, which compares
/// sheet names case-insensitively and rejects a few more shapes than the
/// company name resolver removes.
#[derive(Debug, Default)]
struct SheetNameRegistry {
    used: HashSet<String>,
}

impl SheetNameRegistry {
    fn assign(&mut self, raw: &str) -> String {
        let base = workbook_safe(raw);
        if self.claim(&base) {
            return base;
        }

        let mut counter = 1;
        loop {
            let suffix = format!("_{counter}");
            let max_len = MAX_SHEET_NAME_LEN - suffix.len();
            let prefix: String = base.chars().take(max_len).collect();
            let candidate = format!("{prefix}{suffix}");
            if self.claim(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }

    fn claim(&mut self, name: &str) -> bool {
        let key = name.to_lowercase();
        if key == "history" {
            return false;
        }
        self.used.insert(key)
    }
}

fn workbook_safe(raw: &str) -> String {
    let trimmed = raw.trim_matches('\'').trim();
    if trimmed.is_empty() {
        "Sheet".to_string()
    } else {
        trimmed.to_string()
    }
}
