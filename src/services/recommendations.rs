use rand::{seq::IndexedRandom, Rng};

use crate::{
    error::{AppError, AppResult},
    models::{CourseRecord, RequestParameters, ValidatedCourseDataset, ValidatedStudentDataset},
};

/// Picks one course at random among those matching the effective keyword.
///
/// The effective keyword is the caller-supplied one when present, otherwise
/// the requesting student's area of interest.
pub fn select_recommendation(
    params: &RequestParameters,
    students: &ValidatedStudentDataset,
    courses: &ValidatedCourseDataset,
) -> AppResult<CourseRecord> {
    select_recommendation_with(params, students, courses, &mut rand::rng())
}

/// Same as [`select_recommendation`] with a caller-provided random source
pub fn select_recommendation_with<R>(
    params: &RequestParameters,
    students: &ValidatedStudentDataset,
    courses: &ValidatedCourseDataset,
    rng: &mut R,
) -> AppResult<CourseRecord>
where
    R: Rng + ?Sized,
{
    let keyword = resolve_keyword(params, students)?;

    let candidates: Vec<&CourseRecord> = courses
        .records()
        .iter()
        .filter(|course| course.keyword == keyword)
        .collect();

    tracing::debug!(
        student_id = params.student_id,
        keyword = %keyword,
        candidates = candidates.len(),
        "Selecting recommendation"
    );

    candidates
        .choose(rng)
        .map(|course| (*course).clone())
        .ok_or_else(|| AppError::NoMatch {
            keyword: keyword.to_string(),
        })
}

/// Resolves the keyword used to filter courses
pub fn resolve_keyword<'a>(
    params: &'a RequestParameters,
    students: &'a ValidatedStudentDataset,
) -> AppResult<&'a str> {
    if let Some(keyword) = params.keyword.as_deref() {
        return Ok(keyword);
    }

    students
        .find(params.student_id)
        .map(|student| student.area_of_interest.as_str())
        .ok_or(AppError::StudentNotFound {
            student_id: params.student_id,
        })
}
