use httpmock::prelude::*;
use school_admin::core::resource::{CourseForm, Instructors, NameForm, Students};
use school_admin::{CourseBoard, HttpRecordApi, ListView, LoadPhase, RecordApi, SubmitOutcome};
use std::sync::Arc;
use std::time::Duration;

fn api_for(server: &MockServer) -> Arc<dyn RecordApi> {
    Arc::new(HttpRecordApi::new(server.base_url()))
}

#[tokio::test]
async fn test_create_trims_name_and_reloads() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/students")
            .json_body(serde_json::json!({"name": "Cy"}));
        then.status(200).json_body(serde_json::json!(3));
    });
    let list = server.mock(|when, then| {
        when.method(GET).path("/students");
        then.status(200).json_body(serde_json::json!([{"id": 3, "name": "Cy"}]));
    });

    let view: ListView<Students> = ListView::new(api_for(&server));
    view.activate().await;
    view.set_form(NameForm::new("  Cy ")).await;

    assert_eq!(view.submit().await, SubmitOutcome::Created(3));

    create.assert();
    list.assert_hits(2);
    assert_eq!(view.records().await[0].name, "Cy");
    assert_eq!(view.form().await, NameForm::default());
}

#[tokio::test]
async fn test_blank_name_issues_zero_requests() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method(POST).path("/instructors");
        then.status(200).json_body(serde_json::json!(1));
    });

    let view: ListView<Instructors> = ListView::new(api_for(&server));
    view.set_form(NameForm::new("    ")).await;

    assert_eq!(view.submit().await, SubmitOutcome::Rejected);
    create.assert_hits(0);
}

#[tokio::test]
async fn test_second_submission_while_in_flight_is_ignored() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method(POST).path("/students");
        then.status(200)
            .delay(Duration::from_millis(300))
            .json_body(serde_json::json!(1));
    });
    server.mock(|when, then| {
        when.method(GET).path("/students");
        then.status(200).json_body(serde_json::json!([{"id": 1, "name": "Ann"}]));
    });

    let view: ListView<Students> = ListView::new(api_for(&server));
    view.set_form(NameForm::new("Ann")).await;

    let (first, second) = tokio::join!(view.submit(), view.submit());

    assert_eq!(first, SubmitOutcome::Created(1));
    assert_eq!(second, SubmitOutcome::Ignored);
    create.assert_hits(1);
    assert!(!view.is_creating());
}

#[tokio::test]
async fn test_failed_load_reports_and_stays_empty() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/students");
        then.status(502);
    });

    let view: ListView<Students> = ListView::new(api_for(&server));
    let phase = view.activate().await;

    assert_eq!(phase, LoadPhase::Failed("Bad Gateway".to_string()));
    assert!(view.records().await.is_empty());
    let notes = view.take_notifications().await;
    assert_eq!(notes.len(), 1);
    assert!(notes[0].is_error());
}

#[tokio::test]
async fn test_failed_create_leaves_form_for_resubmission() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method(POST).path("/students");
        then.status(500);
    });
    let list = server.mock(|when, then| {
        when.method(GET).path("/students");
        then.status(200).json_body(serde_json::json!([]));
    });

    let view: ListView<Students> = ListView::new(api_for(&server));
    view.set_form(NameForm::new("Dee")).await;

    assert_eq!(
        view.submit().await,
        SubmitOutcome::Failed("Internal Server Error".to_string())
    );
    create.assert();
    list.assert_hits(0);
    assert_eq!(view.form().await, NameForm::new("Dee"));
}

#[tokio::test]
async fn test_course_board_resolves_instructors() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/courses");
        then.status(200).json_body(serde_json::json!([
            {"id": 5, "name": "Algebra", "semester": "Fall 2024", "instructor_id": 3},
            {"id": 6, "name": "Poetry", "semester": "Fall 2024", "instructor_id": 8}
        ]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/instructors");
        then.status(200).json_body(serde_json::json!([{"id": 3, "name": "Dr. Lee"}]));
    });

    let board = CourseBoard::new(api_for(&server));
    board.activate().await;

    assert_eq!(board.courses().records().await.len(), 2);
    assert_eq!(board.instructor_name(3).await, "Dr. Lee");
    assert_eq!(board.instructor_name(8).await, "Unknown Instructor");
    assert!(board.can_create().await);
}

#[tokio::test]
async fn test_course_creation_needs_an_instructor() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/courses");
        then.status(200).json_body(serde_json::json!([]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/instructors");
        then.status(200).json_body(serde_json::json!([{"id": 3, "name": "Dr. Lee"}]));
    });
    let create = server.mock(|when, then| {
        when.method(POST).path("/courses").json_body(serde_json::json!({
            "name": "Algebra",
            "semester": "Fall 2024",
            "instructor_id": 3
        }));
        then.status(200).json_body(serde_json::json!(5));
    });

    let board = CourseBoard::new(api_for(&server));
    board.activate().await;
    board
        .courses()
        .set_form(CourseForm {
            name: " Algebra".to_string(),
            semester: "Fall 2024 ".to_string(),
            instructor_id: None,
        })
        .await;

    assert_eq!(board.submit().await, SubmitOutcome::Rejected);
    create.assert_hits(0);

    board
        .courses()
        .update_form(|form| form.instructor_id = Some(3))
        .await;
    assert_eq!(board.submit().await, SubmitOutcome::Created(5));
    create.assert_hits(1);
}

#[tokio::test]
async fn test_course_board_without_instructors_cannot_create() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/courses");
        then.status(200).json_body(serde_json::json!([]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/instructors");
        then.status(200).json_body(serde_json::json!([]));
    });
    let create = server.mock(|when, then| {
        when.method(POST).path("/courses");
        then.status(200).json_body(serde_json::json!(1));
    });

    let board = CourseBoard::new(api_for(&server));
    board.activate().await;
    board
        .courses()
        .set_form(CourseForm {
            name: "Algebra".to_string(),
            semester: "Fall 2024".to_string(),
            instructor_id: Some(3),
        })
        .await;

    assert!(!board.can_create().await);
    assert_eq!(board.submit().await, SubmitOutcome::Rejected);
    create.assert_hits(0);
}

#[tokio::test]
async fn test_abandoned_submission_releases_the_form() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method(POST).path("/students");
        then.status(200)
            .delay(Duration::from_millis(500))
            .json_body(serde_json::json!(1));
    });
    server.mock(|when, then| {
        when.method(GET).path("/students");
        then.status(200).json_body(serde_json::json!([{"id": 1, "name": "Ann"}]));
    });

    let view: ListView<Students> = ListView::new(api_for(&server));
    view.set_form(NameForm::new("Ann")).await;

    let abandoned = tokio::time::timeout(Duration::from_millis(50), view.submit()).await;
    assert!(abandoned.is_err());
    assert!(!view.is_creating());

    // Let the server finish with the dropped request before counting hits.
    tokio::time::sleep(Duration::from_millis(600)).await;

    assert_eq!(view.submit().await, SubmitOutcome::Created(1));
    create.assert_hits(2);
}

#[tokio::test]
async fn test_loading_phase_while_list_is_pending() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/students");
        then.status(200)
            .delay(Duration::from_millis(300))
            .json_body(serde_json::json!([{"id": 1, "name": "Ann"}]));
    });

    let view: ListView<Students> = ListView::new(api_for(&server));
    assert!(!view.is_loading().await);

    let (loaded, pending) = tokio::join!(view.activate(), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        (view.phase().await, view.is_loading().await)
    });

    assert_eq!(pending, (LoadPhase::Loading, true));
    assert_eq!(loaded, LoadPhase::Loaded);
    assert!(!view.is_loading().await);
    assert_eq!(view.records().await.len(), 1);
}
