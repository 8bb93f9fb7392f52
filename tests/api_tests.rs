use axum::http::StatusCode;
use axum_test::TestServer;
use std::{path::Path, sync::Arc};
use tempfile::TempDir;

use course_reco_api::{
    db::FlatFileStore,
    routes::{create_router, AppState},
    validation::Schema,
};

const STUDENTS: &str = "\
student_id,year_level,area_of_interest
1,L1,biology
2,M2,maths
3,,history
";

const COURSES: &str = "\
id,title,keyword,duration,creation_date,type
10,Limits and continuity,maths,60,2018-02-01,course
11,Integrals drill,maths,30,,exercise
20,Cell division,biology,15,2020-05-05,video
21,Evolution essay,biology,90,2012-09-09,press_article
30,World War I,history,120,2010-01-10,course
";

struct Fixture {
    dir: TempDir,
    server: TestServer,
}

impl Fixture {
    fn students_path(&self) -> std::path::PathBuf {
        self.dir.path().join("student_data.csv")
    }

    fn courses_path(&self) -> std::path::PathBuf {
        self.dir.path().join("courses_data.csv")
    }
}

fn write(path: &Path, contents: &str) {
    std::fs::write(path, contents).unwrap();
}

fn create_test_server(students: &str, courses: &str) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let students_path = dir.path().join("student_data.csv");
    let courses_path = dir.path().join("courses_data.csv");
    write(&students_path, students);
    write(&courses_path, courses);

    let store = FlatFileStore::new(students_path, courses_path);
    let state = AppState::new(Arc::new(store), Schema::default());
    let server = TestServer::new(create_router(state)).unwrap();

    Fixture { dir, server }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = create_test_server(STUDENTS, COURSES);
    let response = fixture.server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_hello_world() {
    let fixture = create_test_server(STUDENTS, COURSES);
    let response = fixture.server.get("/").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "<p>Hello, World!</p>");
}

#[tokio::test]
async fn test_recommendation_for_explicit_keyword() {
    let fixture = create_test_server(STUDENTS, COURSES);

    let response = fixture
        .server
        .get("/random-recommendation")
        .add_query_param("student_id", "1")
        .add_query_param("keyword", "maths")
        .await;

    response.assert_status_ok();
    let body: Vec<serde_json::Value> = response.json();
    assert_eq!(body.len(), 1);
    let course = &body[0];
    assert_eq!(course["keyword"], "maths");
    assert!([10, 11].contains(&course["id"].as_u64().unwrap()));
    for key in ["id", "title", "keyword", "duration", "creation_date", "type"] {
        assert!(course.get(key).is_some(), "missing key {}", key);
    }
}

#[tokio::test]
async fn test_recommendation_uses_area_of_interest() {
    let fixture = create_test_server(STUDENTS, COURSES);

    for _ in 0..20 {
        let response = fixture
            .server
            .get("/random-recommendation")
            .add_query_param("student_id", "1")
            .await;

        response.assert_status_ok();
        let body: Vec<serde_json::Value> = response.json();
        assert_eq!(body[0]["keyword"], "biology");
        assert!([20, 21].contains(&body[0]["id"].as_u64().unwrap()));
    }
}

#[tokio::test]
async fn test_serialized_course_shape() {
    let courses = "\
id,title,keyword,duration,creation_date,type
30,World War I,history,120,2010-01-10,course
";
    let fixture = create_test_server(STUDENTS, courses);

    let response = fixture
        .server
        .get("/random-recommendation")
        .add_query_param("student_id", "3")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(
        body,
        serde_json::json!([{
            "id": 30,
            "title": "World War I",
            "keyword": "history",
            "duration": 120,
            "creation_date": "2010-01-10",
            "type": "course"
        }])
    );
}

#[tokio::test]
async fn test_unknown_student_without_keyword() {
    let fixture = create_test_server(STUDENTS, COURSES);

    let response = fixture
        .server
        .get("/random-recommendation")
        .add_query_param("student_id", "999")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Student not found: 999");
}

#[tokio::test]
async fn test_no_matching_course() {
    let fixture = create_test_server(STUDENTS, COURSES);

    let response = fixture
        .server
        .get("/random-recommendation")
        .add_query_param("student_id", "1")
        .add_query_param("keyword", "sport")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "No content matches keyword: sport");
}

#[tokio::test]
async fn test_invalid_student_id_rejected_before_reading_data() {
    let fixture = create_test_server(STUDENTS, COURSES);
    // Unreadable data would surface as a 500 if it were loaded
    std::fs::remove_file(fixture.students_path()).unwrap();

    let response = fixture
        .server
        .get("/random-recommendation")
        .add_query_param("student_id", "0")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["student_id"][0], "Must be greater than or equal to 1.");
}

#[tokio::test]
async fn test_parameter_errors_are_keyed_by_field() {
    let fixture = create_test_server(STUDENTS, COURSES);

    let response = fixture
        .server
        .get("/random-recommendation")
        .add_query_param("student_id", "abc")
        .add_query_param("keyword", "cooking")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["student_id"][0], "Not a valid integer.");
    assert!(body["keyword"][0]
        .as_str()
        .unwrap()
        .starts_with("Must be one of: maths"));

    let response = fixture.server.get("/random-recommendation").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["student_id"][0], "Missing data for required field.");
}

#[tokio::test]
async fn test_invalid_course_dataset_lists_all_violations() {
    let courses = "\
id,title,keyword,duration,creation_date,type
1,Good row,maths,30,2020-01-01,video
1,Duplicate id,maths,30,,video
2,Too long,maths,500,,course
3,Ancient,maths,10,1985-06-01,exam
";
    let fixture = create_test_server(STUDENTS, courses);

    let response = fixture
        .server
        .get("/random-recommendation")
        .add_query_param("student_id", "2")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["dataset"], "courses");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid data received from DB"));

    let checks: Vec<&str> = body["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["check"].as_str().unwrap())
        .collect();
    assert_eq!(
        checks,
        vec![
            "less_than_or_equal_to(180)",
            "greater_than(1990-01-01)",
            "field_uniqueness",
            "field_uniqueness",
        ]
    );
}

#[tokio::test]
async fn test_invalid_student_dataset_rejected_even_with_keyword() {
    let students = "\
student_id,year_level,area_of_interest
1,L7,biology
";
    let fixture = create_test_server(students, COURSES);

    let response = fixture
        .server
        .get("/random-recommendation")
        .add_query_param("student_id", "1")
        .add_query_param("keyword", "maths")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["dataset"], "students");
    assert_eq!(body["violations"][0]["column"], "year_level");
    assert_eq!(body["violations"][0]["value"], "L7");
}

#[tokio::test]
async fn test_data_changes_visible_on_next_request() {
    let fixture = create_test_server(STUDENTS, COURSES);

    let response = fixture
        .server
        .get("/random-recommendation")
        .add_query_param("student_id", "1")
        .add_query_param("keyword", "sport")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    write(
        &fixture.courses_path(),
        "id,title,keyword,duration,creation_date,type\n40,Football tactics,sport,50,,video\n",
    );

    let response = fixture
        .server
        .get("/random-recommendation")
        .add_query_param("student_id", "1")
        .add_query_param("keyword", "sport")
        .await;
    response.assert_status_ok();
    let body: Vec<serde_json::Value> = response.json();
    assert_eq!(body[0]["id"], 40);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let fixture = create_test_server(STUDENTS, COURSES);
    let id = "5f0c6f0e-8a41-4d7c-9d83-1b2a3c4d5e6f";

    let response = fixture
        .server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static(id),
        )
        .await;

    assert_eq!(response.header("x-request-id"), id);
}

#[tokio::test]
async fn test_repeated_query_key_uses_first_value() {
    let fixture = create_test_server(STUDENTS, COURSES);

    // student 1 likes biology, student 2 likes maths
    let response = fixture
        .server
        .get("/random-recommendation?student_id=1&student_id=2")
        .await;

    response.assert_status_ok();
    let body: Vec<serde_json::Value> = response.json();
    assert_eq!(body[0]["keyword"], "biology");
}

#[tokio::test]
async fn test_repeated_invalid_key_reports_json_errors() {
    let fixture = create_test_server(STUDENTS, COURSES);

    let response = fixture
        .server
        .get("/random-recommendation?student_id=0&student_id=5")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["student_id"][0], "Must be greater than or equal to 1.");
}
