use serde::Serialize;
use std::fmt::Display;

use super::{CourseRecord, StudentRecord};

/// Which backing dataset a row or error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Students,
    Courses,
}

impl Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetKind::Students => write!(f, "students"),
            DatasetKind::Courses => write!(f, "courses"),
        }
    }
}

/// Unvalidated tabular data: the header line plus one raw struct per row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDataset<R> {
    pub columns: Vec<String>,
    pub rows: Vec<R>,
}

impl<R> RawDataset<R> {
    pub fn new(columns: Vec<String>, rows: Vec<R>) -> Self {
        Self { columns, rows }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

/// Course dataset that passed every schema check.
///
/// Only the validation layer can build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCourseDataset(Vec<CourseRecord>);

impl ValidatedCourseDataset {
    pub(crate) fn new(records: Vec<CourseRecord>) -> Self {
        Self(records)
    }

    pub fn records(&self) -> &[CourseRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Student dataset that passed every schema check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedStudentDataset(Vec<StudentRecord>);

impl ValidatedStudentDataset {
    pub(crate) fn new(records: Vec<StudentRecord>) -> Self {
        Self(records)
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.0
    }

    /// Finds the profile of a student by id
    pub fn find(&self, student_id: u64) -> Option<&StudentRecord> {
        self.0.iter().find(|s| s.student_id == student_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
