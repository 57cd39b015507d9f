//! Classification of fixed-width payroll lines and extraction of their fields.
//!
//! Every line carries a one character marker in its first column: `A` opens
//! a company block, `B` describes one employee of the most recent company,
//! and anything else is ignored. Offsets below are character positions in
//! the trimmed line, end-exclusive.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::EmployeeRecord;

pub const HEADER_MARKER: char = 'A';
pub const DETAIL_MARKER: char = 'B';

/// Identifier segment of a header line; the name heuristic runs on what follows.
pub const COMPANY_ID: Range<usize> = 1..10;

pub const SSN: Range<usize> = 1..10;
pub const FULL_NAME: Range<usize> = 10..40;
pub const ADDRESS: Range<usize> = 40..58;
pub const CITY: Range<usize> = 58..76;
pub const STATE: Range<usize> = 76..78;
pub const ZIP_CODE: Range<usize> = 78..83;
// 83..87 is unused in the layout.
pub const DATE_HIRED: Range<usize> = 87..93;

/// First digit run followed by letters, taken as the start of the street
/// address that trails the company name.
static ADDRESS_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\s*[A-Za-z]+").expect("address pattern is valid"));

/// Company header as read from an `A` line, before sanitisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyHeader {
    pub company_id: String,
    pub raw_name: String,
}

/// Result of classifying a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayrollLine {
    Blank,
    Header(CompanyHeader),
    Detail(EmployeeRecord),
    /// Any line whose marker is neither `A` nor `B`.
    Ignored(char),
}

/// Classifies `line` and extracts its fields. `source_file` is the base name
/// recorded on detail records.
pub fn classify_line(line: &str, source_file: &str) -> PayrollLine {
    let line = line.trim();
    match line.chars().next() {
        None => PayrollLine::Blank,
        Some(HEADER_MARKER) => PayrollLine::Header(parse_header(line)),
        Some(DETAIL_MARKER) => PayrollLine::Detail(parse_detail(line, source_file)),
        Some(other) => PayrollLine::Ignored(other),
    }
}

/// Reads the identifier and the raw company name from a header line.
pub fn parse_header(line: &str) -> CompanyHeader {
    let remainder: String = line.chars().skip(COMPANY_ID.end).collect();
    CompanyHeader {
        company_id: field(line, COMPANY_ID),
        raw_name: extract_company_name(&remainder),
    }
}

/// Splits the company name off the text following the header identifier.
///
/// Header lines run the company name straight into its street address, so
/// the name is taken to end where the first `<digits><letters>` sequence
/// begins (`"ACME CORP 12 MAIN ST"` yields `"ACME CORP"`). This is a
/// heuristic: a name that itself contains such a sequence (`"3M COMPANY"`)
/// is cut short. Without any match the whole remainder is the name.
pub fn extract_company_name(remainder: &str) -> String {
    match ADDRESS_START.find(remainder) {
        Some(found) => remainder[..found.start()].trim().to_string(),
        None => remainder.trim().to_string(),
    }
}

/// Slices the employee fields out of a detail line.
pub fn parse_detail(line: &str, source_file: &str) -> EmployeeRecord {
    EmployeeRecord {
        ssn: field(line, SSN),
        full_name: field(line, FULL_NAME),
        address: field(line, ADDRESS),
        city: field(line, CITY),
        state: field(line, STATE),
        zip_code: field(line, ZIP_CODE),
        date_hired: field(line, DATE_HIRED),
        original_file: source_file.to_string(),
    }
}

/// Returns the trimmed characters of `line` within `range`, clamped to the
/// line length.
fn field(line: &str, range: Range<usize>) -> String {
    let text: String = line
        .chars()
        .skip(range.start)
        .take(range.end.saturating_sub(range.start))
        .collect();
    text.trim().to_string()
}
