//! End-to-end playback flow: enroll, tick, throttled persistence.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use mentora_core::types::DbId;
use mentora_db::models::student::NewStudent;
use mentora_db::models::transaction::NewTransaction;
use mentora_db::repositories::{DashboardRepo, StudentRepo, TransactionRepo};
use sqlx::PgPool;
use tower::ServiceExt;

/// Student with a provisioned dashboard and an active supreme purchase.
async fn seed_entitled_student(pool: &PgPool, email: &str) -> DbId {
    let student = StudentRepo::create(
        pool,
        &NewStudent {
            email: email.to_string(),
            display_name: "Test Student".to_string(),
            partner_id: None,
        },
    )
    .await
    .expect("student should be created");

    DashboardRepo::provision(pool, student.id)
        .await
        .expect("dashboard should be provisioned");

    TransactionRepo::create(
        pool,
        &NewTransaction {
            student_id: student.id,
            package_id: "supreme".to_string(),
            amount_cents: 29_900,
            status: "active".to_string(),
            expires_at: None,
        },
    )
    .await
    .expect("transaction should be created");

    student.id
}

async fn tick(app: &Router, auth: &str, position: f64, duration: f64) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(common::request(
            "PUT",
            "/api/v1/courses/foundations/playback/position",
            Some(auth),
            Some(serde_json::json!({
                "positionSeconds": position,
                "durationSeconds": duration,
            })),
        ))
        .await
        .expect("tick should succeed");
    assert_eq!(response.status(), StatusCode::OK);
    common::body_json(response).await
}

/// Poll the caller's enrollments until the writer has caught up.
async fn wait_for_progress(app: &Router, auth: &str, expected_percent: i64) -> serde_json::Value {
    for _ in 0..100 {
        let response = app
            .clone()
            .oneshot(common::request(
                "GET",
                "/api/v1/user/enrollments",
                Some(auth),
                None,
            ))
            .await
            .expect("list should succeed");
        let json = common::body_json(response).await;
        if json["data"][0]["progressPercent"] == expected_percent {
            return json["data"][0].clone();
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("sample writer did not persist progress {expected_percent} in time");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn enroll_is_idempotent_over_http(pool: PgPool) {
    let student_id = seed_entitled_student(&pool, "enroll-http@test.io").await;
    let app = common::build_test_app(pool);
    let auth = common::bearer(student_id, "student");

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(common::request(
                "POST",
                "/api/v1/courses/foundations/enroll",
                Some(&auth),
                None,
            ))
            .await
            .expect("enroll should succeed");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(common::request(
            "GET",
            "/api/v1/user/enrollments",
            Some(&auth),
            None,
        ))
        .await
        .expect("list should succeed");
    let json = common::body_json(response).await;
    assert_eq!(json["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["data"][0]["courseId"], "foundations");
    assert_eq!(json["data"][0]["progressPercent"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn enrollment_requires_entitlement(pool: PgPool) {
    let student = StudentRepo::create(
        &pool,
        &NewStudent {
            email: "unentitled@test.io".to_string(),
            display_name: "No Package".to_string(),
            partner_id: None,
        },
    )
    .await
    .expect("student should be created");

    let app = common::build_test_app(pool);
    let auth = common::bearer(student.id, "student");

    let response = app
        .oneshot(common::request(
            "POST",
            "/api/v1/courses/foundations/enroll",
            Some(&auth),
            None,
        ))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn playback_start_requires_enrollment(pool: PgPool) {
    let student_id = seed_entitled_student(&pool, "not-enrolled@test.io").await;
    let app = common::build_test_app(pool);
    let auth = common::bearer(student_id, "student");

    let response = app
        .oneshot(common::request(
            "POST",
            "/api/v1/courses/foundations/playback/start",
            Some(&auth),
            None,
        ))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ticks_persist_only_past_the_gate(pool: PgPool) {
    let student_id = seed_entitled_student(&pool, "gate@test.io").await;
    let app = common::build_test_app(pool.clone());
    let auth = common::bearer(student_id, "student");

    app.clone()
        .oneshot(common::request(
            "POST",
            "/api/v1/courses/foundations/enroll",
            Some(&auth),
            None,
        ))
        .await
        .expect("enroll should succeed");

    let start = app
        .clone()
        .oneshot(common::request(
            "POST",
            "/api/v1/courses/foundations/playback/start",
            Some(&auth),
            None,
        ))
        .await
        .expect("start should succeed");
    assert_eq!(start.status(), StatusCode::OK);
    let start_json = common::body_json(start).await;
    assert!(start_json["data"]["resumePositionSeconds"].is_null());

    // Positions 0..=4: below the save interval, nothing persisted.
    for position in 0..=4 {
        let json = tick(&app, &auth, position as f64, 100.0).await;
        assert_eq!(json["data"]["persisted"], false, "position {position}");
        assert_eq!(json["data"]["percent"], position);
    }

    // Position 5 clears the gate.
    let json = tick(&app, &auth, 5.0, 100.0).await;
    assert_eq!(json["data"]["persisted"], true);

    let enrollment = wait_for_progress(&app, &auth, 5).await;
    assert_eq!(enrollment["lastPlaybackPositionSeconds"], 5);
    assert_eq!(enrollment["completed"], false);

    // Dashboard absorbs the 5 watched seconds once the writer catches up.
    let mut total = 0;
    for _ in 0..100 {
        total = DashboardRepo::find_by_student(&pool, student_id)
            .await
            .expect("dashboard read should succeed")
            .expect("dashboard row should exist")
            .active_seconds_total;
        if total == 5 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert_eq!(total, 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completion_rides_the_throttle(pool: PgPool) {
    let student_id = seed_entitled_student(&pool, "finish@test.io").await;
    let app = common::build_test_app(pool);
    let auth = common::bearer(student_id, "student");

    app.clone()
        .oneshot(common::request(
            "POST",
            "/api/v1/courses/foundations/enroll",
            Some(&auth),
            None,
        ))
        .await
        .expect("enroll should succeed");
    app.clone()
        .oneshot(common::request(
            "POST",
            "/api/v1/courses/foundations/playback/start",
            Some(&auth),
            None,
        ))
        .await
        .expect("start should succeed");

    // Play to the end of a 60-second video.
    let json = tick(&app, &auth, 60.0, 60.0).await;
    assert_eq!(json["data"]["percent"], 100);
    assert_eq!(json["data"]["persisted"], true);

    let enrollment = wait_for_progress(&app, &auth, 100).await;
    assert_eq!(enrollment["completed"], true);

    // Session teardown after the media ended.
    let response = app
        .oneshot(common::request(
            "DELETE",
            "/api/v1/courses/foundations/playback?reason=ended",
            Some(&auth),
            None,
        ))
        .await
        .expect("end should succeed");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ticks_without_a_session_are_not_found(pool: PgPool) {
    let student_id = seed_entitled_student(&pool, "no-session@test.io").await;
    let app = common::build_test_app(pool);
    let auth = common::bearer(student_id, "student");

    let response = app
        .oneshot(common::request(
            "PUT",
            "/api/v1/courses/foundations/playback/position",
            Some(&auth),
            Some(serde_json::json!({
                "positionSeconds": 5.0,
                "durationSeconds": 100.0,
            })),
        ))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_duration_is_rejected(pool: PgPool) {
    let student_id = seed_entitled_student(&pool, "bad-duration@test.io").await;
    let app = common::build_test_app(pool);
    let auth = common::bearer(student_id, "student");

    app.clone()
        .oneshot(common::request(
            "POST",
            "/api/v1/courses/foundations/enroll",
            Some(&auth),
            None,
        ))
        .await
        .expect("enroll should succeed");
    app.clone()
        .oneshot(common::request(
            "POST",
            "/api/v1/courses/foundations/playback/start",
            Some(&auth),
            None,
        ))
        .await
        .expect("start should succeed");

    let response = app
        .oneshot(common::request(
            "PUT",
            "/api/v1/courses/foundations/playback/position",
            Some(&auth),
            Some(serde_json::json!({
                "positionSeconds": 5.0,
                "durationSeconds": 0.0,
            })),
        ))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
