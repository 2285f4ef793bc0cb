//! Integration tests for the task endpoints.
//!
//! Requests go through the full router (extractors, handlers, service,
//! in-memory repository, error mapping) without opening a socket.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use rstest::rstest;
use serde_json::{Value, json};

use common::{create_task, create_test_app, due_in_hours, id_of, send, send_request};

// =============================================================================
// POST /tasks
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_create_and_get_task() {
    let app = create_test_app();

    let created = create_task(
        &app,
        json!({"title": "Integration Task", "description": "Test description", "due_date": due_in_hours(24)}),
    )
    .await;
    let id = id_of(&created);
    assert!(!id.is_empty());
    assert_eq!(created["status"], "PENDING");

    let (status, found) = send(&app, Method::GET, &format!("/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["title"], "Integration Task");
    assert_eq!(found["description"], "Test description");
    assert_eq!(found, created);
}

#[rstest]
#[tokio::test]
async fn test_create_task_with_all_fields() {
    let app = create_test_app();
    let created = create_task(
        &app,
        json!({"title": "Full", "description": "All fields", "status": "IN_PROGRESS", "due_date": due_in_hours(48)}),
    )
    .await;

    assert_eq!(created["status"], "IN_PROGRESS");
    assert_eq!(created["description"], "All fields");
}

#[rstest]
#[case::empty_title(json!({"title": "", "due_date": due_in_hours(24)}), "title is required")]
#[case::missing_due_date(json!({"title": "Task"}), "due_date is required")]
#[case::past_due_date(json!({"title": "Task", "due_date": due_in_hours(-24)}), "due_date must be in the future")]
#[case::invalid_status(json!({"title": "Task", "status": "INVALID", "due_date": due_in_hours(24)}), "invalid status")]
#[tokio::test]
async fn test_create_task_validation(#[case] body: Value, #[case] message: &str) {
    let app = create_test_app();

    let (status, error) = send(&app, Method::POST, "/tasks", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert_eq!(error["message"], message);
}

#[rstest]
#[tokio::test]
async fn test_create_task_invalid_date_format() {
    let app = create_test_app();

    let (status, error) = send(
        &app,
        Method::POST,
        "/tasks",
        Some(json!({"title": "Task", "due_date": "01/02/2030"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["message"], "invalid due_date format, expected RFC3339");
}

#[rstest]
#[tokio::test]
async fn test_invalid_json() {
    let app = create_test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/tasks")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("invalid json"))
        .unwrap();

    let (status, error) = send_request(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_JSON");
    assert_eq!(error["message"], "invalid JSON body");
}

// =============================================================================
// GET /tasks/{id}, PUT /tasks/{id}, DELETE /tasks/{id}
// =============================================================================

#[rstest]
#[case(Method::GET, None)]
#[case(Method::PUT, Some(json!({"title": "Updated"})))]
#[case(Method::DELETE, None)]
#[tokio::test]
async fn test_unknown_task_is_not_found(#[case] method: Method, #[case] body: Option<Value>) {
    let app = create_test_app();

    let (status, error) = send(&app, method, "/tasks/nonexistent-id", body).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "NOT_FOUND");
    assert_eq!(error["message"], "task not found");
}

#[rstest]
#[tokio::test]
async fn test_update_task() {
    let app = create_test_app();
    let created = create_task(
        &app,
        json!({"title": "Original", "due_date": due_in_hours(24)}),
    )
    .await;
    let id = id_of(&created);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/tasks/{id}"),
        Some(json!({"title": "Updated", "status": "IN_PROGRESS"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Updated");
    assert_eq!(updated["status"], "IN_PROGRESS");
    assert_eq!(updated["due_date"], created["due_date"]);
}

#[rstest]
#[case::invalid_status(json!({"status": "INVALID"}), "invalid status")]
#[case::empty_status(json!({"status": ""}), "invalid status")]
#[case::empty_title(json!({"title": ""}), "title is required")]
#[case::past_due_date(json!({"due_date": due_in_hours(-1)}), "due_date must be in the future")]
#[tokio::test]
async fn test_update_task_validation(#[case] body: Value, #[case] message: &str) {
    let app = create_test_app();
    let created = create_task(&app, json!({"title": "Task", "due_date": due_in_hours(24)})).await;
    let uri = format!("/tasks/{}", id_of(&created));

    let (status, error) = send(&app, Method::PUT, &uri, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["message"], message);

    let (_, unchanged) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(unchanged, created);
}

#[rstest]
#[case::null(json!({"due_date": null}))]
#[case::empty(json!({"due_date": ""}))]
#[case::absent(json!({"description": "notes"}))]
#[tokio::test]
async fn test_update_task_without_due_date_keeps_it(#[case] body: Value) {
    let app = create_test_app();
    let created = create_task(&app, json!({"title": "Task", "due_date": due_in_hours(24)})).await;
    let uri = format!("/tasks/{}", id_of(&created));

    let (status, updated) = send(&app, Method::PUT, &uri, Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["due_date"], created["due_date"]);
}

#[rstest]
#[case("2099-06-01T10:00:00+02:00")]
#[case("2099-06-01T10:00:00-07:00")]
#[case("2099-06-01T10:00:00Z")]
#[tokio::test]
async fn test_due_date_keeps_supplied_offset(#[case] due_date: &str) {
    let app = create_test_app();

    let created = create_task(&app, json!({"title": "Task", "due_date": due_date})).await;
    assert_eq!(created["due_date"], due_date);

    let uri = format!("/tasks/{}", id_of(&created));
    let (_, found) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(found["due_date"], due_date);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"due_date": "2099-07-01T08:30:00+05:30"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["due_date"], "2099-07-01T08:30:00+05:30");
}

#[rstest]
#[tokio::test]
async fn test_delete_task() {
    let app = create_test_app();
    let created = create_task(
        &app,
        json!({"title": "To Delete", "due_date": due_in_hours(24)}),
    )
    .await;
    let uri = format!("/tasks/{}", id_of(&created));

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// GET /tasks
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_list_tasks() {
    let app = create_test_app();
    create_task(&app, json!({"title": "Task 1", "due_date": due_in_hours(24)})).await;
    create_task(&app, json!({"title": "Task 2", "due_date": due_in_hours(24)})).await;

    let (status, tasks) = send(&app, Method::GET, "/tasks", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(tasks.as_array().map(Vec::len), Some(2));
}

#[rstest]
#[tokio::test]
async fn test_list_tasks_filter_by_status() {
    let app = create_test_app();
    create_task(&app, json!({"title": "Pending", "due_date": due_in_hours(24)})).await;
    create_task(
        &app,
        json!({"title": "Working", "status": "IN_PROGRESS", "due_date": due_in_hours(24)}),
    )
    .await;
    create_task(
        &app,
        json!({"title": "Finished", "status": "DONE", "due_date": due_in_hours(24)}),
    )
    .await;

    let (status, tasks) = send(&app, Method::GET, "/tasks?status=DONE", None).await;

    assert_eq!(status, StatusCode::OK);
    let tasks = tasks.as_array().expect("list body is an array");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Finished");
}

#[rstest]
#[case("/tasks?status=ARCHIVED")]
#[case("/tasks?status=done")]
#[case("/tasks?status=%20DONE")]
#[tokio::test]
async fn test_list_tasks_unknown_status_filter_matches_nothing(#[case] uri: &str) {
    let app = create_test_app();
    create_task(
        &app,
        json!({"title": "Finished", "status": "DONE", "due_date": due_in_hours(24)}),
    )
    .await;

    let (status, tasks) = send(&app, Method::GET, uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(tasks, json!([]));
}

#[rstest]
#[tokio::test]
async fn test_list_tasks_empty_status_filter_is_ignored() {
    let app = create_test_app();
    create_task(&app, json!({"title": "Task", "due_date": due_in_hours(24)})).await;

    let (status, tasks) = send(&app, Method::GET, "/tasks?status=", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(tasks.as_array().map(Vec::len), Some(1));
}

#[rstest]
#[case("/tasks?page=1&page_size=10", 10)]
#[case("/tasks?page=2&page_size=10", 10)]
#[case("/tasks?page=3&page_size=10", 5)]
#[case("/tasks?page=100&page_size=10", 0)]
#[case("/tasks", 10)]
#[case("/tasks?page=0&page_size=-5", 10)]
#[case("/tasks?page=abc&page_size=xyz", 10)]
#[case("/tasks?page_size=30", 25)]
#[tokio::test]
async fn test_list_tasks_pagination(#[case] uri: &str, #[case] expected: usize) {
    let app = create_test_app();
    for index in 0..25 {
        create_task(
            &app,
            json!({"title": format!("Task {index}"), "due_date": due_in_hours(24 + index)}),
        )
        .await;
    }

    let (status, tasks) = send(&app, Method::GET, uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(tasks.as_array().map(Vec::len), Some(expected));
}

#[rstest]
#[tokio::test]
async fn test_list_tasks_sorted_by_due_date() {
    let app = create_test_app();
    create_task(&app, json!({"title": "Later", "due_date": due_in_hours(48)})).await;
    create_task(&app, json!({"title": "Sooner", "due_date": due_in_hours(24)})).await;

    let (_, tasks) = send(&app, Method::GET, "/tasks", None).await;

    let titles: Vec<&str> = tasks
        .as_array()
        .expect("list body is an array")
        .iter()
        .filter_map(|task| task["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["Sooner", "Later"]);
}

// =============================================================================
// End-to-end
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_task_lifecycle() {
    let app = create_test_app();

    let created = create_task(&app, json!({"title": "Report", "due_date": due_in_hours(24)})).await;
    assert_eq!(created["status"], "PENDING");
    assert_eq!(created["description"], "");
    let uri = format!("/tasks/{}", id_of(&created));

    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"status": "IN_PROGRESS"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "IN_PROGRESS");
    assert_eq!(updated["title"], "Report");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
