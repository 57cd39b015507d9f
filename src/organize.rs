use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::error::{PayrollError, Result};
use crate::group::{CompanyGroups, Placement, RunContext};
use crate::io::excel_write;
use crate::io::payroll_read::{self, RawLine};
use crate::layout::build_workbook;
use crate::model::RunReport;
use crate::parse::{PayrollLine, classify_line};

/// Workbook name used when no output path is given.
pub const DEFAULT_OUTPUT_FILE: &str = "Payroll_Organized_By_Company.xlsx";

/// Where to look for payroll files and where to put the workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizeOptions {
    pub input_dir: PathBuf,
    pub output: PathBuf,
}

impl Default for OrganizeOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

/// Organises every payroll file of `options.input_dir` into one workbook.
#[instrument(
    level = "info",
    skip_all,
    fields(input_dir = %options.input_dir.display(), output = %options.output.display())
)]
pub fn organize_directory(options: &OrganizeOptions) -> Result<RunReport> {
    let files = payroll_read::discover_payroll_files(&options.input_dir)?;
    info!(file_count = files.len(), "discovered payroll files");
    organize_files(&files, &options.output)
}

/// Groups the employees of `inputs` by company and writes one sheet per
/// company to `output`. Files that cannot be opened are skipped. Fails with
/// [`PayrollError::NoEmployees`], leaving `output` untouched, when no
/// company has an employee.
#[instrument(level = "info", skip_all, fields(output = %output.display()))]
pub fn organize_files(inputs: &[PathBuf], output: &Path) -> Result<RunReport> {
    let mut report = RunReport {
        files_discovered: inputs.len(),
        output: output.display().to_string(),
        ..RunReport::default()
    };

    let mut groups = CompanyGroups::new();
    let mut context = RunContext::new();
    for input in inputs {
        context.reset();
        collect_file(input, &mut groups, &mut context, &mut report);
    }
    info!(company_count = groups.len(), "grouped employees by company");

    let workbook = build_workbook(&groups.into_groups());
    report.sheets_written = workbook.tables.len();
    report.empty_groups = workbook.empty_groups.len();
    debug!(sheet_count = workbook.tables.len(), "workbook constructed");
    if workbook.tables.is_empty() {
        return Err(PayrollError::NoEmployees);
    }

    excel_write::write_workbook(output, &workbook)?;
    info!("all data processed and organised by company");
    Ok(report)
}

/// Writes `report` as pretty JSON.
pub fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let json_string = serde_json::to_string_pretty(report)?;
    fs::write(path, json_string)?;
    Ok(())
}

#[instrument(level = "info", skip_all, fields(file = %input.display()))]
fn collect_file(
    input: &Path,
    groups: &mut CompanyGroups,
    context: &mut RunContext,
    report: &mut RunReport,
) {
    info!("processing file");
    let lines = match payroll_read::open_payroll_file(input) {
        Ok(lines) => lines,
        Err(error) => {
            warn!(%error, "payroll file could not be opened; skipping");
            report.files_skipped += 1;
            return;
        }
    };
    report.files_processed += 1;

    let source = payroll_read::source_name(input);
    for item in lines {
        let (line_number, raw) = match item {
            Ok(item) => item,
            Err(error) => {
                warn!(%error, "read failed; skipping rest of file");
                break;
            }
        };
        report.lines_read += 1;

        let text = match raw {
            RawLine::Text(text) => text,
            RawLine::Undecodable(content) => {
                warn!(line_number, %content, "line is not valid UTF-8; skipping");
                report.malformed_lines += 1;
                continue;
            }
        };

        match classify_line(&text, &source) {
            PayrollLine::Blank => {}
            PayrollLine::Header(header) => {
                report.header_lines += 1;
                let company = groups.open_company(context, &header);
                debug!(line_number, company_id = %header.company_id, %company, "company header");
            }
            PayrollLine::Detail(record) => {
                report.detail_lines += 1;
                let full_name = record.full_name.clone();
                if groups.add_employee(context, record) == Placement::Orphan {
                    warn!(
                        line_number,
                        employee = %full_name,
                        company = %context.current_company(),
                        "employee found without associated company"
                    );
                    report.orphan_records += 1;
                }
            }
            PayrollLine::Ignored(marker) => {
                report.ignored_lines += 1;
                debug!(line_number, %marker, "ignoring line with unknown marker");
            }
        }
    }
}
