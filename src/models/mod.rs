mod course;
mod dataset;
mod request;
mod student;

pub use course::{CourseRecord, RawCourseRow};
pub use dataset::{DatasetKind, RawDataset, ValidatedCourseDataset, ValidatedStudentDataset};
pub use request::RequestParameters;
pub use student::{RawStudentRow, StudentRecord};
