use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A validated row of the course content dataset, returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseRecord {
    pub id: u64,
    pub title: String,
    pub keyword: String,
    /// Duration in minutes
    pub duration: u32,
    pub creation_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub content_type: String,
}

/// A course row exactly as read from the tabular source.
///
/// Every cell stays textual so that type errors surface as violations
/// during validation instead of failing the load.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct RawCourseRow {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub creation_date: Option<String>,
    #[serde(default, rename = "type")]
    pub content_type: Option<String>,
}
