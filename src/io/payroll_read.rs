use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{PayrollError, Result};

/// Extension of the fixed-width payroll exports.
pub const PAYROLL_EXTENSION: &str = "txt";

/// Lists the regular `.txt` files directly inside `dir`, sorted by name.
pub fn discover_payroll_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| PayrollError::InputDirectory {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_payroll = path
            .extension()
            .is_some_and(|extension| extension == PAYROLL_EXTENSION);
        if is_payroll && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Base name stored in the `Original_file` column.
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// One physical line of a payroll file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawLine {
    Text(String),
    /// Bytes that are not valid UTF-8, rendered lossily for diagnostics.
    Undecodable(String),
}

/// Numbered lines of a payroll file. Lines are split on `\n`; the line
/// terminator is not included.
pub struct PayrollLines<R> {
    reader: R,
    buffer: Vec<u8>,
    line_number: usize,
}

impl<R: BufRead> PayrollLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for PayrollLines<R> {
    type Item = io::Result<(usize, RawLine)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                if self.buffer.last() == Some(&b'\n') {
                    self.buffer.pop();
                }
                let line = match String::from_utf8(std::mem::take(&mut self.buffer)) {
                    Ok(text) => RawLine::Text(text),
                    Err(error) => {
                        RawLine::Undecodable(String::from_utf8_lossy(error.as_bytes()).into_owned())
                    }
                };
                Some(Ok((self.line_number, line)))
            }
            Err(error) => Some(Err(error)),
        }
    }
}

/// Opens `path` for line-by-line reading.
pub fn open_payroll_file(path: &Path) -> io::Result<PayrollLines<BufReader<File>>> {
    Ok(PayrollLines::new(BufReader::new(File::open(path)?)))
}
