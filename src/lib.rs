//! Core library for the payroll-organizer command line application.
//!
//! Fixed-width payroll exports are read line by line: company headers open a
//! group, employee details are filed under the latest header, and every
//! group becomes one sheet of a single Excel workbook. Line handling lives in
//! [`parse`], sheet-name cleanup in [`naming`], the grouping store in
//! [`group`], sheet layout in [`layout`], file access under [`io`], and the
//! run itself in [`organize`].

pub mod error;
pub mod group;
pub mod io;
pub mod layout;
pub mod model;
pub mod naming;
pub mod organize;
pub mod parse;

pub use error::{PayrollError, Result};
