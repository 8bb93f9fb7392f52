//! Tabular data sources for the student and course datasets
//!
//! Implementations return raw, string-typed rows; schema checks happen in
//! the validation layer so that every row can be inspected before any is used.
use crate::{
    error::AppResult,
    models::{RawCourseRow, RawDataset, RawStudentRow},
};

pub mod flat_file;

pub use flat_file::FlatFileStore;

/// Source of the two datasets a recommendation reads.
///
/// Called on every request; implementations must not hand back data cached
/// from an earlier load.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DataStore: Send + Sync {
    /// Load the student profile dataset
    async fn load_students(&self) -> AppResult<RawDataset<RawStudentRow>>;

    /// Load the course content dataset
    async fn load_courses(&self) -> AppResult<RawDataset<RawCourseRow>>;

    /// Store name for logging and debugging
    fn name(&self) -> &'static str;
}
