//! Admin metrics API integration tests.

mod common;

use axum::http::StatusCode;
use mentora_db::models::partner::NewPartner;
use mentora_db::models::payout::NewPayout;
use mentora_db::repositories::{PartnerRepo, PayoutRepo};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../../db/migrations")]
async fn metrics_require_admin_role(pool: PgPool) {
    let app = common::build_test_app(pool);
    let auth = common::bearer(1, "student");

    let response = app
        .oneshot(common::request(
            "GET",
            "/api/v1/admin/metrics",
            Some(&auth),
            None,
        ))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn metrics_snapshot_has_the_projection_shape(pool: PgPool) {
    let app = common::build_test_app(pool);
    let auth = common::bearer(1, "admin");

    let response = app
        .oneshot(common::request(
            "GET",
            "/api/v1/admin/metrics",
            Some(&auth),
            None,
        ))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    let metrics = &json["data"]["metrics"];
    assert!(metrics["revenue"].get("total_cents").is_some());
    assert!(metrics["enrollments"].get("total").is_some());
    assert!(metrics["students"].get("total").is_some());
    assert!(json["data"]["pending_payouts"].get("pending_cents").is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pending_payouts_are_listed_with_totals(pool: PgPool) {
    let partner = PartnerRepo::create(
        &pool,
        &NewPartner {
            name: "Acme Learning".to_string(),
            code: "ACME".to_string(),
            commission_rate_pct: 20,
        },
    )
    .await
    .expect("partner should be created");

    for amount in [1_000, 2_500] {
        PayoutRepo::create(
            &pool,
            &NewPayout {
                partner_id: partner.id,
                amount_cents: amount,
            },
        )
        .await
        .expect("payout should be created");
    }

    let app = common::build_test_app(pool);
    let auth = common::bearer(1, "admin");

    let response = app
        .oneshot(common::request(
            "GET",
            "/api/v1/admin/payouts/pending",
            Some(&auth),
            None,
        ))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["data"]["payouts"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["data"]["summary"]["pending_count"], 2);
    assert_eq!(json["data"]["summary"]["pending_cents"], 3_500);
}
