use serde::{Deserialize, Serialize};

/// A validated row of the student profile dataset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentRecord {
    pub student_id: u64,
    pub year_level: Option<String>,
    pub area_of_interest: String,
}

/// A student row exactly as read from the tabular source
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct RawStudentRow {
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub year_level: Option<String>,
    #[serde(default)]
    pub area_of_interest: Option<String>,
}
