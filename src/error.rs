use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, PayrollError>;

/// Error type covering the failures that abort a run. Per-line and per-file
/// problems are logged and skipped instead of surfacing here.
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the run report cannot be serialised.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when the directory holding the payroll files cannot be listed.
    #[error("cannot scan input directory {path}: {source}")]
    InputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raised when no company has any employee, so there is nothing to write.
    #[error("no employee records found; workbook not written")]
    NoEmployees,

    /// Raised when a workbook read back from disk is not shaped as expected.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
