use std::collections::HashMap;

use crate::model::{EmployeeRecord, FALLBACK_COMPANY};
use crate::naming::resolve_company_name;
use crate::parse::CompanyHeader;

/// Employees collected under one sheet-safe company name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyGroup {
    pub name: String,
    pub employees: Vec<EmployeeRecord>,
}

/// Company name → employees, kept in order of first appearance.
#[derive(Debug, Default)]
pub struct CompanyGroups {
    groups: Vec<CompanyGroup>,
    index: HashMap<String, usize>,
}

/// Where [`CompanyGroups::add_employee`] placed a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Filed under the company of the most recent header.
    Company,
    /// No header seen yet in the file; filed under [`FALLBACK_COMPANY`].
    Orphan,
}

impl CompanyGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&CompanyGroup> {
        self.index.get(name).map(|&position| &self.groups[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompanyGroup> {
        self.groups.iter()
    }

    /// Creates an empty group for `name` unless one already exists.
    pub fn ensure_group(&mut self, name: &str) -> &mut CompanyGroup {
        let position = match self.index.get(name) {
            Some(&position) => position,
            None => {
                self.groups.push(CompanyGroup {
                    name: name.to_string(),
                    employees: Vec::new(),
                });
                let position = self.groups.len() - 1;
                self.index.insert(name.to_string(), position);
                position
            }
        };
        &mut self.groups[position]
    }

    /// Appends `record` to the group `name`, creating the group if needed.
    /// Orphan records are warned about by the caller of
    /// [`add_employee`](Self::add_employee), which knows the file and line.
    pub fn append(&mut self, name: &str, record: EmployeeRecord) {
        self.ensure_group(name).employees.push(record);
    }

    /// Resolves the header's company name, makes sure its group exists and
    /// makes it the current company of `context`.
    pub fn open_company(&mut self, context: &mut RunContext, header: &CompanyHeader) -> String {
        let name = resolve_company_name(&header.raw_name, self.len());
        self.ensure_group(&name);
        context.enter_company(name.clone());
        name
    }

    /// Files `record` under the current company of `context`, or under the
    /// fallback group when the current file has not opened a company yet.
    pub fn add_employee(&mut self, context: &RunContext, record: EmployeeRecord) -> Placement {
        if context.has_header() {
            self.append(context.current_company(), record);
            Placement::Company
        } else {
            self.append(FALLBACK_COMPANY, record);
            Placement::Orphan
        }
    }

    pub fn into_groups(self) -> Vec<CompanyGroup> {
        self.groups
    }
}

/// The company detail lines currently belong to. Reset for every file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    current_company: String,
    header_seen: bool,
}

impl Default for RunContext {
    fn default() -> Self {
        Self {
            current_company: FALLBACK_COMPANY.to_string(),
            header_seen: false,
        }
    }
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the company of the previous file.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn current_company(&self) -> &str {
        &self.current_company
    }

    pub fn has_header(&self) -> bool {
        self.header_seen
    }

    pub fn enter_company(&mut self, name: String) {
        self.current_company = name;
        self.header_seen = true;
    }
}
