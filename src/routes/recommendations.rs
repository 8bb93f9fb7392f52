use axum::{
    extract::{Query, State},
    Extension, Json,
};
use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::CourseRecord,
    routes::AppState,
    services::recommendations,
    validation::{validate_course_dataset, validate_parameters, validate_student_dataset},
};

/// Raw query string; values stay textual until validated
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RecommendationQuery {
    pub student_id: Option<String>,
    pub keyword: Option<String>,
}

impl RecommendationQuery {
    /// Keeps the first value of each known key; repeats and unknown keys are ignored
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "student_id" => &mut query.student_id,
                "keyword" => &mut query.keyword,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

/// Handler for `GET /random-recommendation`
///
/// Parameters are checked before any dataset is read. Both datasets are then
/// loaded and validated in full, and one matching course is drawn at random.
/// The response is a one-element array.
pub async fn random_recommendation(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<Vec<CourseRecord>>> {
    let query = RecommendationQuery::from_pairs(pairs);

    tracing::info!(
        request_id = %request_id,
        student_id = ?query.student_id,
        keyword = ?query.keyword,
        "Processing recommendation request"
    );

    // Reject bad parameters before touching any data
    let params = validate_parameters(
        &state.schema,
        query.student_id.as_deref(),
        query.keyword.as_deref(),
    )?;

    // Fresh snapshot of both datasets for this request
    let raw_students = state.store.load_students().await?;
    let raw_courses = state.store.load_courses().await?;

    // Whole-dataset checks; any violation rejects the request
    let students = validate_student_dataset(&state.schema, &raw_students)?;
    let courses = validate_course_dataset(&state.schema, &raw_courses)?;

    let recommendation = recommendations::select_recommendation(&params, &students, &courses)?;

    tracing::info!(
        request_id = %request_id,
        store = state.store.name(),
        course_id = recommendation.id,
        "Recommendation selected"
    );

    Ok(Json(vec![recommendation]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::MockDataStore, routes::create_router, validation::Schema};
    use axum_test::TestServer;
    use std::sync::Arc;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_query_keeps_first_value_of_repeated_keys() {
        let query = RecommendationQuery::from_pairs(pairs(&[
            ("student_id", "1"),
            ("keyword", "maths"),
            ("student_id", "2"),
            ("keyword", "arts"),
            ("page", "3"),
        ]));
        assert_eq!(query.student_id.as_deref(), Some("1"));
        assert_eq!(query.keyword.as_deref(), Some("maths"));
    }

    #[test]
    fn test_query_without_known_keys() {
        let query = RecommendationQuery::from_pairs(pairs(&[("other", "x")]));
        assert_eq!(query, RecommendationQuery::default());
    }

    #[tokio::test]
    async fn test_invalid_parameters_never_touch_the_store() {
        let mut store = MockDataStore::new();
        store.expect_load_students().times(0);
        store.expect_load_courses().times(0);
        store.expect_name().return_const("mock");

        let state = AppState::new(Arc::new(store), Schema::default());
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server
            .get("/random-recommendation")
            .add_query_param("student_id", "0")
            .await;

        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["student_id"][0], "Must be greater than or equal to 1.");
    }

    #[tokio::test]
    async fn test_store_failure_is_server_error() {
        let mut store = MockDataStore::new();
        store.expect_load_students().times(1).returning(|| {
            Err(crate::error::AppError::DataSource(
                "cannot read student_data.csv".to_string(),
            ))
        });
        store.expect_load_courses().times(0);
        store.expect_name().return_const("mock");

        let state = AppState::new(Arc::new(store), Schema::default());
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server
            .get("/random-recommendation")
            .add_query_param("student_id", "1")
            .await;

        response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
