use std::fs;
use std::path::{Path, PathBuf};

use payroll_organizer::io::excel_read;
use payroll_organizer::layout::SheetTable;
use payroll_organizer::model::{EMPLOYEE_HEADERS, FALLBACK_COMPANY};
use payroll_organizer::PayrollError;
use payroll_organizer::organize::{self, OrganizeOptions};
use tempfile::tempdir;

fn header(name_and_address: &str) -> String {
    format!("A000000001{name_and_address}")
}

fn detail(ssn: &str, name: &str, hired: &str) -> String {
    format!(
        "B{ssn:<9}{name:<30}{:<18}{:<18}{:<2}{:<5}{:<4}{hired:<6}",
        "1 MAIN ST", "BOSTON", "MA", "02101", ""
    )
}

fn write_file(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, lines.join("\n")).expect("payroll file written");
    path
}

fn sheet<'a>(tables: &'a [SheetTable], name: &str) -> &'a SheetTable {
    tables
        .iter()
        .find(|table| table.sheet_name == name)
        .unwrap_or_else(|| panic!("sheet {name} present"))
}

#[test]
fn same_company_across_files_shares_one_sheet() {
    let temp_dir = tempdir().expect("temporary directory");
    let first = write_file(
        temp_dir.path(),
        "file1.txt",
        &[
            header("Acme Corp 100 Industrial Way"),
            detail("111111111", "ALPHA ANN", "010120"),
            detail("222222222", "BRAVO BEN", "020220"),
        ],
    );
    let second = write_file(
        temp_dir.path(),
        "file2.txt",
        &[header("Acme Corp 100 Industrial Way"), detail("333333333", "CHARLIE CY", "030320")],
    );
    let output = temp_dir.path().join("out.xlsx");

    let report = organize::organize_files(&[first, second], &output).expect("run succeeded");
    let tables = excel_read::read_tables(&output).expect("workbook read");

    assert_eq!(tables.len(), 1);
    let acme = sheet(&tables, "Acme Corp");
    assert_eq!(acme.columns, EMPLOYEE_HEADERS.map(String::from).to_vec());
    let names: Vec<&str> = acme.rows.iter().map(|row| row[1].as_str()).collect();
    assert_eq!(names, vec!["ALPHA ANN", "BRAVO BEN", "CHARLIE CY"]);
    let files: Vec<&str> = acme.rows.iter().map(|row| row[7].as_str()).collect();
    assert_eq!(files, vec!["file1.txt", "file1.txt", "file2.txt"]);
    assert_eq!(acme.rows[2][6], "030320");
    assert_eq!(report.sheets_written, 1);
    assert_eq!(report.detail_lines, 3);
}

#[test]
fn detail_before_header_lands_in_fallback_sheet() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = write_file(
        temp_dir.path(),
        "orphans.txt",
        &[
            detail("999999999", "LOST LARRY", "121219"),
            header("Globex 7 Elm Rd"),
            detail("888888888", "FOUND FAY", "111119"),
        ],
    );
    let output = temp_dir.path().join("out.xlsx");

    let report = organize::organize_files(&[input], &output).expect("run succeeded");
    let tables = excel_read::read_tables(&output).expect("workbook read");

    let fallback = sheet(&tables, FALLBACK_COMPANY);
    assert_eq!(fallback.rows.len(), 1);
    assert_eq!(fallback.rows[0][0], "999999999");
    assert_eq!(sheet(&tables, "Globex").rows.len(), 1);
    assert_eq!(report.orphan_records, 1);
}

#[test]
fn company_context_resets_between_files() {
    let temp_dir = tempdir().expect("temporary directory");
    let first = write_file(
        temp_dir.path(),
        "a.txt",
        &[header("Initech 5 Office Park"), detail("1", "PETER G", "010199")],
    );
    let second = write_file(temp_dir.path(), "b.txt", &[detail("2", "MILTON W", "010185")]);
    let output = temp_dir.path().join("out.xlsx");

    organize::organize_files(&[first, second], &output).expect("run succeeded");
    let tables = excel_read::read_tables(&output).expect("workbook read");

    assert_eq!(sheet(&tables, "Initech").rows.len(), 1);
    assert_eq!(sheet(&tables, FALLBACK_COMPANY).rows[0][1], "MILTON W");
}

#[test]
fn missing_input_is_skipped() {
    let temp_dir = tempdir().expect("temporary directory");
    let present = write_file(
        temp_dir.path(),
        "present.txt",
        &[header("Umbrella 9 Raccoon St"), detail("4", "ALICE A", "070702")],
    );
    let missing = temp_dir.path().join("missing.txt");
    let output = temp_dir.path().join("out.xlsx");

    let report = organize::organize_files(&[missing, present], &output).expect("run succeeded");

    assert_eq!(report.files_skipped, 1);
    assert_eq!(report.files_processed, 1);
    let tables = excel_read::read_tables(&output).expect("workbook read");
    assert_eq!(sheet(&tables, "Umbrella").rows.len(), 1);
}

#[test]
fn undecodable_and_unknown_lines_are_skipped() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("mixed.txt");
    let mut bytes = Vec::new();
    bytes.extend_from_slice(header("Hooli 1 Valley Rd").as_bytes());
    bytes.extend_from_slice(b"\nB\xff\xfe broken\n");
    bytes.extend_from_slice(b"Z trailer record\n\n");
    bytes.extend_from_slice(detail("5", "GAVIN B", "050515").as_bytes());
    fs::write(&path, bytes).expect("payroll file written");
    let output = temp_dir.path().join("out.xlsx");

    let report = organize::organize_files(&[path], &output).expect("run succeeded");

    assert_eq!(report.malformed_lines, 1);
    assert_eq!(report.ignored_lines, 1);
    let tables = excel_read::read_tables(&output).expect("workbook read");
    assert_eq!(sheet(&tables, "Hooli").rows.len(), 1);
}

#[test]
fn headers_without_employees_produce_no_sheet() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = write_file(
        temp_dir.path(),
        "sparse.txt",
        &[
            header("Empty Co 2 Nowhere Ln"),
            header("Busy Co 3 Somewhere Ave"),
            detail("6", "BUSY BEE", "060616"),
        ],
    );
    let output = temp_dir.path().join("out.xlsx");

    let report = organize::organize_files(&[input], &output).expect("run succeeded");
    let tables = excel_read::read_tables(&output).expect("workbook read");

    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].sheet_name, "Busy Co");
    assert_eq!(report.empty_groups, 1);
}

#[test]
fn directory_run_writes_workbook_and_report() {
    let temp_dir = tempdir().expect("temporary directory");
    write_file(
        temp_dir.path(),
        "payroll.txt",
        &[header("Stark: Industries 10880 Malibu Pt"), detail("7", "TONY S", "052908")],
    );
    fs::write(temp_dir.path().join("readme.md"), "not payroll").expect("readme written");
    let options = OrganizeOptions {
        input_dir: temp_dir.path().to_path_buf(),
        output: temp_dir.path().join("organized.xlsx"),
    };

    let report = organize::organize_directory(&options).expect("run succeeded");
    let report_path = temp_dir.path().join("report.json");
    organize::write_report(&report_path, &report).expect("report written");

    assert_eq!(report.files_discovered, 1);
    let tables = excel_read::read_tables(&options.output).expect("workbook read");
    assert_eq!(tables[0].sheet_name, "Stark Industries");

    let written = fs::read_to_string(&report_path).expect("report read");
    let parsed: serde_json::Value = serde_json::from_str(&written).expect("report parsed");
    assert_eq!(parsed["sheets_written"], 1);
}

#[test]
fn unwritable_output_is_an_error() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = write_file(
        temp_dir.path(),
        "ok.txt",
        &[header("Wayne Enterprises 1007 Mountain Dr"), detail("8", "BRUCE W", "041939")],
    );
    let output = temp_dir.path().join("no_such_dir").join("out.xlsx");

    assert!(organize::organize_files(&[input], &output).is_err());
}

#[test]
fn empty_directory_writes_no_workbook() {
    let temp_dir = tempdir().expect("temporary directory");
    let options = OrganizeOptions {
        input_dir: temp_dir.path().to_path_buf(),
        output: temp_dir.path().join("organized.xlsx"),
    };

    let result = organize::organize_directory(&options);

    assert!(matches!(result, Err(PayrollError::NoEmployees)));
    assert!(!options.output.exists());
}

#[test]
fn headers_only_writes_no_workbook() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = write_file(temp_dir.path(), "headers.txt", &[header("Acme Corp 1 Main St")]);
    let output = temp_dir.path().join("out.xlsx");

    let result = organize::organize_files(&[input], &output);

    assert!(matches!(result, Err(PayrollError::NoEmployees)));
    assert!(!output.exists());
}
