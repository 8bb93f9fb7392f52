use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::{RawCourseRow, RawDataset, RawStudentRow},
};

use super::DataStore;

/// Reads both datasets from comma-separated files on each call
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    students_path: PathBuf,
    courses_path: PathBuf,
}

impl FlatFileStore {
    pub fn new(students_path: impl Into<PathBuf>, courses_path: impl Into<PathBuf>) -> Self {
        Self {
            students_path: students_path.into(),
            courses_path: courses_path.into(),
        }
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    async fn read_table<R>(&self, path: &Path) -> AppResult<RawDataset<R>>
    where
        R: DeserializeOwned,
    {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            AppError::DataSource(format!("cannot read {}: {}", path.display(), e))
        })?;

        let dataset = parse_csv(&bytes).map_err(|e| {
            AppError::DataSource(format!("cannot parse {}: {}", path.display(), e))
        })?;

        tracing::debug!(rows = dataset.rows.len(), "Loaded table");
        Ok(dataset)
    }
}

#[async_trait::async_trait]
impl DataStore for FlatFileStore {
    async fn load_students(&self) -> AppResult<RawDataset<RawStudentRow>> {
        self.read_table(&self.students_path).await
    }

    async fn load_courses(&self) -> AppResult<RawDataset<RawCourseRow>> {
        self.read_table(&self.courses_path).await
    }

    fn name(&self) -> &'static str {
        "flat_file"
    }
}

/// Parses CSV text with a header line into raw rows.
///
/// Cells are trimmed and empty cells become `None`. Columns the row type
/// does not name are ignored; short rows leave the trailing fields `None`.
pub fn parse_csv<R>(bytes: &[u8]) -> Result<RawDataset<R>, csv::Error>
where
    R: DeserializeOwned,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let columns = reader.headers()?.iter().map(str::to_string).collect();
    let rows = reader.deserialize().collect::<Result<Vec<R>, _>>()?;

    Ok(RawDataset::new(columns, rows))
}
