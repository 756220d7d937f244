//! Bulk result import.
//!
//! Imports arrive as a base64-encoded CSV document plus an explicit list of
//! subject names. Each subject is read from a `subject_<name>` column; the
//! identity columns are fixed. The header is checked once and every row is
//! validated before anything is handed to the engine, so a bad document
//! writes nothing.

use std::collections::{HashMap, HashSet};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use validator::ValidateEmail;

use crate::engine::ImportedResult;
use crate::error::{DomainError, DomainResult};
use crate::models::StudentKey;
use crate::models::result::SubjectMark;

pub const SUBJECT_COLUMN_PREFIX: &str = "subject_";
pub const NAME_COLUMN: &str = "name";
pub const REGISTER_NUMBER_COLUMN: &str = "register_number";
pub const SEMESTER_COLUMN: &str = "semester";
pub const BRANCH_COLUMN: &str = "branch";
pub const ATTENDANCE_COLUMN: &str = "attendance";
pub const EMAIL_COLUMN: &str = "email";

const REQUIRED_COLUMNS: [&str; 5] = [
    NAME_COLUMN,
    REGISTER_NUMBER_COLUMN,
    SEMESTER_COLUMN,
    BRANCH_COLUMN,
    ATTENDANCE_COLUMN,
];

/// The subject columns an import is expected to carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSchema {
    subjects: Vec<String>,
}

/// Column positions resolved from a header row.
struct ColumnIndex {
    name: usize,
    register_number: usize,
    semester: usize,
    branch: usize,
    attendance: usize,
    email: Option<usize>,
    subjects: Vec<(String, usize)>,
}

impl ImportSchema {
    /// Builds a schema from subject names. Names are trimmed and must be unique.
    pub fn new<I, S>(subjects: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut names = Vec::new();

        for subject in subjects {
            let name = subject.as_ref().trim();
            if name.is_empty() {
                return Err(DomainError::Validation(
                    "Subject names must not be blank".into(),
                ));
            }
            if !seen.insert(name.to_owned()) {
                return Err(DomainError::Validation(format!(
                    "Subject '{name}' is listed more than once"
                )));
            }
            names.push(name.to_owned());
        }

        if names.is_empty() {
            return Err(DomainError::Validation(
                "At least one subject is required".into(),
            ));
        }

        Ok(Self { subjects: names })
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn column_for(subject: &str) -> String {
        format!("{SUBJECT_COLUMN_PREFIX}{subject}")
    }

    /// Decodes a base64 payload and parses it with [`ImportSchema::parse_csv`].
    pub fn parse_base64(&self, csv_data: &str) -> DomainResult<Vec<ImportedResult>> {
        let bytes = STANDARD
            .decode(csv_data.trim())
            .map_err(|e| DomainError::Validation(format!("csv_data is not valid base64: {e}")))?;
        self.parse_csv(&bytes)
    }

    /// Parses and validates every row. Any invalid row rejects the whole document.
    pub fn parse_csv(&self, bytes: &[u8]) -> DomainResult<Vec<ImportedResult>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(bytes);

        let headers = reader
            .headers()
            .map_err(|e| DomainError::Validation(format!("Unreadable CSV header: {e}")))?
            .clone();
        let columns = self.resolve_columns(&headers)?;

        let mut rows = Vec::new();
        let mut problems = Vec::new();
        let mut first_line: HashMap<StudentKey, usize> = HashMap::new();

        for (index, record) in reader.records().enumerate() {
            // Line 1 is the header.
            let line = index + 2;
            match record {
                Ok(record) => match columns.read_row(&record) {
                    Ok(row) => match first_line.get(&row.key) {
                        Some(first) => problems.push(format!(
                            "line {line}: student {} already appears on line {first}",
                            row.key
                        )),
                        None => {
                            first_line.insert(row.key.clone(), line);
                            rows.push(row);
                        }
                    },
                    Err(issues) => {
                        problems.extend(issues.into_iter().map(|issue| format!("line {line}: {issue}")))
                    }
                },
                Err(e) => problems.push(format!("line {line}: {e}")),
            }
        }

        if !problems.is_empty() {
            return Err(DomainError::Validation(problems.join("; ")));
        }
        if rows.is_empty() {
            return Err(DomainError::Validation("CSV contains no data rows".into()));
        }

        Ok(rows)
    }

    fn resolve_columns(&self, headers: &csv::StringRecord) -> DomainResult<ColumnIndex> {
        let mut positions: HashMap<String, usize> = HashMap::new();
        for (i, header) in headers.iter().enumerate() {
            let header = header.trim();
            let normalized = if header.starts_with(SUBJECT_COLUMN_PREFIX) {
                header.to_owned()
            } else {
                header.to_lowercase()
            };
            if positions.insert(normalized, i).is_some() {
                return Err(DomainError::Validation(format!(
                    "Duplicate CSV column '{header}'"
                )));
            }
        }

        let subject_columns: Vec<String> =
            self.subjects.iter().map(|s| Self::column_for(s)).collect();
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .chain(subject_columns.iter().map(String::as_str))
            .filter(|column| !positions.contains_key(*column))
            .collect();

        if !missing.is_empty() {
            return Err(DomainError::Validation(format!(
                "Missing CSV columns: {}",
                missing.join(", ")
            )));
        }

        Ok(ColumnIndex {
            name: positions[NAME_COLUMN],
            register_number: positions[REGISTER_NUMBER_COLUMN],
            semester: positions[SEMESTER_COLUMN],
            branch: positions[BRANCH_COLUMN],
            attendance: positions[ATTENDANCE_COLUMN],
            email: positions.get(EMAIL_COLUMN).copied(),
            subjects: self
                .subjects
                .iter()
                .zip(subject_columns.iter())
                .map(|(subject, column)| (subject.clone(), positions[column]))
                .collect(),
        })
    }
}

impl ColumnIndex {
    fn read_row(&self, record: &csv::StringRecord) -> Result<ImportedResult, Vec<String>> {
        let mut issues = Vec::new();
        let field = |i: usize| record.get(i).unwrap_or("").trim();

        let mut required = |column: &str, i: usize| {
            let value = field(i);
            if value.is_empty() {
                issues.push(format!("{column} is required"));
            }
            value.to_owned()
        };
        let student_name = required(NAME_COLUMN, self.name);
        let register_number = required(REGISTER_NUMBER_COLUMN, self.register_number);
        let semester = required(SEMESTER_COLUMN, self.semester);
        let branch = required(BRANCH_COLUMN, self.branch);

        let attendance_percent = percent(field(self.attendance))
            .map_err(|e| issues.push(format!("{ATTENDANCE_COLUMN} {e}")))
            .unwrap_or_default();

        let student_email = self.email.map(field).unwrap_or_default().to_owned();
        if !student_email.is_empty() && !student_email.as_str().validate_email() {
            issues.push(format!("{EMAIL_COLUMN} '{student_email}' is not a valid address"));
        }

        let mut subjects = Vec::with_capacity(self.subjects.len());
        for (subject, i) in &self.subjects {
            match percent(field(*i)) {
                Ok(marks) => subjects.push(SubjectMark {
                    subject_name: subject.clone(),
                    marks,
                }),
                Err(e) => issues.push(format!("{} {e}", ImportSchema::column_for(subject))),
            }
        }

        if !issues.is_empty() {
            return Err(issues);
        }

        Ok(ImportedResult {
            key: StudentKey::new(register_number, semester, branch),
            student_name,
            student_email,
            subjects,
            attendance_percent,
        })
    }
}

/// Parses a whole number in `0..=100`.
fn percent(raw: &str) -> Result<i32, String> {
    let value: i64 = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a whole number"))?;
    if !(0..=100).contains(&value) {
        return Err(format!("{value} is outside 0..=100"));
    }
    Ok(value as i32)
}
