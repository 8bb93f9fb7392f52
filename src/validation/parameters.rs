use crate::{error::ParameterError, models::RequestParameters};

use super::Schema;

const MISSING_FIELD: &str = "Missing data for required field.";
const NOT_AN_INTEGER: &str = "Not a valid integer.";
const MIN_STUDENT_ID: i64 = 1;

/// Parses and checks the raw query-string values of a recommendation request.
///
/// `student_id` must be an integer >= 1. `keyword` may be absent; when
/// present it must belong to the schema's keyword list. Every failing field
/// is reported, not just the first one.
pub fn validate_parameters(
    schema: &Schema,
    raw_student_id: Option<&str>,
    raw_keyword: Option<&str>,
) -> Result<RequestParameters, ParameterError> {
    let mut errors = ParameterError::default();

    let student_id = match raw_student_id {
        None => {
            errors.add("student_id", MISSING_FIELD);
            None
        }
        Some(raw) => match raw.trim().parse::<i64>() {
            Err(_) => {
                errors.add("student_id", NOT_AN_INTEGER);
                None
            }
            Ok(value) if value < MIN_STUDENT_ID => {
                errors.add(
                    "student_id",
                    format!("Must be greater than or equal to {}.", MIN_STUDENT_ID),
                );
                None
            }
            Ok(value) => u64::try_from(value).ok(),
        },
    };

    if let Some(keyword) = raw_keyword {
        if !schema.is_keyword(keyword) {
            errors.add(
                "keyword",
                format!("Must be one of: {}.", schema.keywords.join(", ")),
            );
        }
    }

    match student_id {
        Some(student_id) if errors.is_empty() => Ok(RequestParameters {
            student_id,
            keyword: raw_keyword.map(str::to_string),
        }),
        _ => Err(errors),
    }
}
