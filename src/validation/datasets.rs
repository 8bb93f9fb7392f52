use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;

use crate::{
    error::DatasetValidationError,
    models::{
        CourseRecord, DatasetKind, RawCourseRow, RawDataset, RawStudentRow, StudentRecord,
        ValidatedCourseDataset, ValidatedStudentDataset,
    },
};

use super::{Check, Schema, Violation};

const COURSE_COLUMNS: &[&str] = &["id", "title", "keyword", "duration", "creation_date", "type"];
const STUDENT_COLUMNS: &[&str] = &["student_id", "year_level", "area_of_interest"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Checks every course row against the schema, including dataset-wide `id`
/// uniqueness. All violations are collected before the dataset is rejected.
pub fn validate_course_dataset(
    schema: &Schema,
    raw: &RawDataset<RawCourseRow>,
) -> Result<ValidatedCourseDataset, DatasetValidationError> {
    let mut checker = Checker::new(raw, COURSE_COLUMNS);
    let mut records = Vec::with_capacity(raw.rows.len());
    let mut ids = Vec::with_capacity(raw.rows.len());

    for (row, course) in raw.rows.iter().enumerate() {
        let id = checker
            .required(row, "id", &course.id)
            .and_then(|value| checker.non_negative_integer(row, "id", value));
        if let Some(id) = id {
            ids.push((row, id));
        }

        let title = checker
            .required(row, "title", &course.title)
            .and_then(|value| checker.non_empty(row, "title", value));

        let keyword = checker
            .required(row, "keyword", &course.keyword)
            .and_then(|value| checker.member(row, "keyword", value, &schema.keywords));

        let duration = checker
            .required(row, "duration", &course.duration)
            .and_then(|value| checker.duration(row, value, schema));

        let creation_date = checker.creation_date(row, &course.creation_date, schema);

        let content_type = checker
            .required(row, "type", &course.content_type)
            .and_then(|value| checker.member(row, "type", value, &schema.content_types));

        if let (
            Some(id),
            Some(title),
            Some(keyword),
            Some(duration),
            Some(creation_date),
            Some(content_type),
        ) = (id, title, keyword, duration, creation_date, content_type)
        {
            records.push(CourseRecord {
                id,
                title: title.to_string(),
                keyword: keyword.to_string(),
                duration,
                creation_date,
                content_type: content_type.to_string(),
            });
        }
    }

    checker.unique("id", &ids);
    checker.finish(DatasetKind::Courses)?;

    tracing::debug!(rows = records.len(), "Course dataset validated");
    Ok(ValidatedCourseDataset::new(records))
}

/// Checks every student row against the schema, including dataset-wide
/// `student_id` uniqueness.
pub fn validate_student_dataset(
    schema: &Schema,
    raw: &RawDataset<RawStudentRow>,
) -> Result<ValidatedStudentDataset, DatasetValidationError> {
    let mut checker = Checker::new(raw, STUDENT_COLUMNS);
    let mut records = Vec::with_capacity(raw.rows.len());
    let mut ids = Vec::with_capacity(raw.rows.len());

    for (row, student) in raw.rows.iter().enumerate() {
        let student_id = checker
            .required(row, "student_id", &student.student_id)
            .and_then(|value| checker.non_negative_integer(row, "student_id", value));
        if let Some(student_id) = student_id {
            ids.push((row, student_id));
        }

        let year_level = match checker.optional("year_level", &student.year_level) {
            Some(value) => checker
                .member(row, "year_level", value, &schema.year_levels)
                .map(|level| Some(level.to_string())),
            None => Some(None),
        };

        let area_of_interest = checker
            .required(row, "area_of_interest", &student.area_of_interest)
            .and_then(|value| checker.member(row, "area_of_interest", value, &schema.keywords));

        if let (Some(student_id), Some(year_level), Some(area_of_interest)) =
            (student_id, year_level, area_of_interest)
        {
            records.push(StudentRecord {
                student_id,
                year_level,
                area_of_interest: area_of_interest.to_string(),
            });
        }
    }

    checker.unique("student_id", &ids);
    checker.finish(DatasetKind::Students)?;

    tracing::debug!(rows = records.len(), "Student dataset validated");
    Ok(ValidatedStudentDataset::new(records))
}

/// Accumulates violations for one dataset.
///
/// Cell checks on a column missing from the header are skipped; the column
/// itself is reported once.
struct Checker {
    missing: Vec<&'static str>,
    violations: Vec<Violation>,
}

impl Checker {
    fn new<R>(raw: &RawDataset<R>, expected: &[&'static str]) -> Self {
        let missing: Vec<&'static str> = expected
            .iter()
            .copied()
            .filter(|name| !raw.has_column(name))
            .collect();
        let violations = missing
            .iter()
            .map(|name| Violation::column(name, Check::ColumnPresent))
            .collect();

        Self {
            missing,
            violations,
        }
    }

    fn is_missing(&self, column: &str) -> bool {
        self.missing.iter().any(|m| *m == column)
    }

    fn push(&mut self, row: usize, column: &str, check: Check, value: Option<&str>) {
        self.violations
            .push(Violation::cell(row, column, check, value));
    }

    fn optional<'v>(&self, column: &str, value: &'v Option<String>) -> Option<&'v str> {
        if self.is_missing(column) {
            return None;
        }
        value.as_deref()
    }

    fn required<'v>(
        &mut self,
        row: usize,
        column: &str,
        value: &'v Option<String>,
    ) -> Option<&'v str> {
        if self.is_missing(column) {
            return None;
        }
        if value.is_none() {
            self.push(row, column, Check::NotNullable, None);
        }
        value.as_deref()
    }

    fn integer(&mut self, row: usize, column: &str, value: &str) -> Option<i64> {
        match value.parse::<i64>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                self.push(row, column, Check::Integer, Some(value));
                None
            }
        }
    }

    fn non_negative_integer(&mut self, row: usize, column: &str, value: &str) -> Option<u64> {
        let parsed = self.integer(row, column, value)?;
        match u64::try_from(parsed) {
            Ok(id) => Some(id),
            Err(_) => {
                self.push(row, column, Check::GreaterThanOrEqual(0), Some(value));
                None
            }
        }
    }

    fn non_empty<'v>(&mut self, row: usize, column: &str, value: &'v str) -> Option<&'v str> {
        if value.is_empty() {
            self.push(row, column, Check::NonEmpty, Some(value));
            return None;
        }
        Some(value)
    }

    fn member<'v>(
        &mut self,
        row: usize,
        column: &str,
        value: &'v str,
        allowed: &[String],
    ) -> Option<&'v str> {
        if allowed.iter().any(|a| a == value) {
            return Some(value);
        }
        self.push(row, column, Check::IsIn(allowed.to_vec()), Some(value));
        None
    }

    fn duration(&mut self, row: usize, value: &str, schema: &Schema) -> Option<u32> {
        let parsed = self.integer(row, "duration", value)?;
        if parsed < schema.min_duration {
            self.push(
                row,
                "duration",
                Check::GreaterThanOrEqual(schema.min_duration),
                Some(value),
            );
            return None;
        }
        if parsed > schema.max_duration {
            self.push(
                row,
                "duration",
                Check::LessThanOrEqual(schema.max_duration),
                Some(value),
            );
            return None;
        }
        match u32::try_from(parsed) {
            Ok(minutes) => Some(minutes),
            Err(_) => {
                self.push(
                    row,
                    "duration",
                    Check::LessThanOrEqual(i64::from(u32::MAX)),
                    Some(value),
                );
                None
            }
        }
    }

    /// Outer `None` means the cell failed a check; `Some(None)` is a null date
    fn creation_date(
        &mut self,
        row: usize,
        value: &Option<String>,
        schema: &Schema,
    ) -> Option<Option<NaiveDate>> {
        let Some(raw) = self.optional("creation_date", value) else {
            return Some(None);
        };
        let Some(date) = parse_date(raw) else {
            self.push(row, "creation_date", Check::DateCoercion, Some(raw));
            return None;
        };
        if date <= schema.creation_date_floor {
            self.push(
                row,
                "creation_date",
                Check::DateAfter(schema.creation_date_floor),
                Some(raw),
            );
            return None;
        }
        Some(Some(date))
    }

    /// Reports every row sharing a value with another row
    fn unique(&mut self, column: &str, values: &[(usize, u64)]) {
        let mut counts: HashMap<u64, usize> = HashMap::new();
        for (_, value) in values {
            *counts.entry(*value).or_default() += 1;
        }
        for (row, value) in values {
            if counts.get(value).copied().unwrap_or_default() > 1 {
                self.push(*row, column, Check::Unique, Some(value.to_string().as_str()));
            }
        }
    }

    fn finish(self, dataset: DatasetKind) -> Result<(), DatasetValidationError> {
        if self.violations.is_empty() {
            return Ok(());
        }
        tracing::warn!(
            dataset = %dataset,
            violation_count = self.violations.len(),
            "Dataset failed schema validation"
        );
        Err(DatasetValidationError {
            dataset,
            violations: self.violations,
        })
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATETIME_FORMATS.iter().find_map(|format| {
                NaiveDateTime::parse_from_str(raw, format)
                    .ok()
                    .map(|dt| dt.date())
            })
        })
}
