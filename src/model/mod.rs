use serde::{Deserialize, Serialize};

/// Group used for detail lines that appear before any header in their file.
pub const FALLBACK_COMPANY: &str = "Unknown_Company";

/// Column labels of every company sheet, in output order.
pub const EMPLOYEE_HEADERS: [&str; 8] = [
    "SSN",
    "Full_name",
    "Address",
    "City",
    "State",
    "Zip_code",
    "Date_hired",
    "Original_file",
];

/// One employee taken from a `B` line. Fields are kept as the raw trimmed
/// text found at their offsets; nothing is parsed or validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub ssn: String,
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub date_hired: String,
    /// Base name of the payroll file the line came from.
    pub original_file: String,
}

impl EmployeeRecord {
    /// Returns the cells of the record in [`EMPLOYEE_HEADERS`] order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.ssn.clone(),
            self.full_name.clone(),
            self.address.clone(),
            self.city.clone(),
            self.state.clone(),
            self.zip_code.clone(),
            self.date_hired.clone(),
            self.original_file.clone(),
        ]
    }
}

/// Tallies collected over a run. Written as JSON when a report path is given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub files_discovered: usize,
    pub files_processed: usize,
    pub files_skipped: usize,
    pub lines_read: usize,
    pub header_lines: usize,
    pub detail_lines: usize,
    pub ignored_lines: usize,
    pub malformed_lines: usize,
    pub orphan_records: usize,
    pub sheets_written: usize,
    pub empty_groups: usize,
    pub output: String,
}
