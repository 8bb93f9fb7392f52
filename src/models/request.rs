use serde::Serialize;

/// Validated query parameters of a recommendation request
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RequestParameters {
    /// Always >= 1
    pub student_id: u64,
    /// `None` when the caller left the keyword unset
    pub keyword: Option<String>,
}
