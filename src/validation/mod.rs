//! Schema definitions and the checks applied to request parameters and to
//! the two tabular datasets before any recommendation logic runs.

use chrono::NaiveDate;

mod datasets;
mod parameters;
mod violation;

pub use datasets::{validate_course_dataset, validate_student_dataset};
pub use parameters::validate_parameters;
pub use violation::{Check, Violation};

pub const CONTENT_TYPE_LIST: &[&str] = &[
    "video",
    "course",
    "exercise",
    "press_article",
    "web_url",
    "exam",
];

pub const KEYWORDS_LIST: &[&str] = &[
    "maths",
    "computer_science",
    "data_science",
    "history",
    "biology",
    "physics",
    "arts",
    "sport",
    "video_games",
    "economics",
    "social_sciences",
    "management",
];

pub const YEAR_LEVEL_LIST: &[&str] = &["L1", "L2", "L3", "M1", "M2"];

pub const MIN_DURATION: i64 = 0;
pub const MAX_DURATION: i64 = 180;

/// Creation dates must be strictly after this day
pub const CREATION_DATE_FLOOR: NaiveDate = match NaiveDate::from_ymd_opt(1990, 1, 1) {
    Some(date) => date,
    None => panic!("invalid creation date floor"),
};

/// Enumerations and bounds every request and dataset is checked against.
///
/// Passed explicitly to each validation call so tests can swap in
/// alternate vocabularies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub keywords: Vec<String>,
    pub content_types: Vec<String>,
    pub year_levels: Vec<String>,
    pub min_duration: i64,
    pub max_duration: i64,
    pub creation_date_floor: NaiveDate,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            keywords: to_owned_list(KEYWORDS_LIST),
            content_types: to_owned_list(CONTENT_TYPE_LIST),
            year_levels: to_owned_list(YEAR_LEVEL_LIST),
            min_duration: MIN_DURATION,
            max_duration: MAX_DURATION,
            creation_date_floor: CREATION_DATE_FLOOR,
        }
    }
}

impl Schema {
    pub fn is_keyword(&self, value: &str) -> bool {
        self.keywords.iter().any(|k| k == value)
    }
}

fn to_owned_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
