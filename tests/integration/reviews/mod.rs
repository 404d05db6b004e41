//! Review handler integration tests: submissions, edits, deletions, and
//! the reputation aggregate they maintain

use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use crate::common::{anon_request, authed_request, create_test_jwt, parse_body, TestApp};

/// Submit a review and return the response body
async fn submit(
    app: &TestApp,
    jwt: &str,
    reviewed: Uuid,
    listing: Uuid,
    rating: i64,
) -> axum::http::Response<axum::body::Body> {
    let req = authed_request(
        Method::POST,
        "/v1/reviews",
        jwt,
        Some(json!({
            "reviewed_id": reviewed,
            "rating": rating,
            "comment": "Smooth handover, fair price",
            "listing_id": listing
        })),
    );
    app.test_router().oneshot(req).await.unwrap()
}

/// Read a user's reputation
async fn reputation(app: &TestApp, user: Uuid) -> serde_json::Value {
    let req = anon_request(Method::GET, &format!("/v1/users/{}/reputation", user));
    let resp = app.test_router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    parse_body(resp).await
}

#[tokio::test]
#[ignore = "requires a Postgres test database (TEST_DATABASE_URL)"]
async fn test_submit_review_returns_201_and_updates_aggregate() {
    let app = TestApp::new().await.unwrap();
    let (alice, seller) = (Uuid::new_v4(), Uuid::new_v4());
    let jwt = create_test_jwt(alice, &app.config.jwt_secret).unwrap();

    let resp = submit(&app, &jwt, seller, Uuid::new_v4(), 4).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = parse_body(resp).await;
    assert_eq!(body["reviewer_id"], alice.to_string());
    assert_eq!(body["reviewed_id"], seller.to_string());
    assert_eq!(body["rating"], 4);

    let rep = reputation(&app, seller).await;
    assert_eq!(rep["average"], 4.0);
    assert_eq!(rep["count"], 1);

    app.cleanup(&[alice, seller]).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a Postgres test database (TEST_DATABASE_URL)"]
async fn test_aggregate_is_mean_over_all_reviewers() {
    let app = TestApp::new().await.unwrap();
    let (alice, carol, seller) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let alice_jwt = create_test_jwt(alice, &app.config.jwt_secret).unwrap();
    let carol_jwt = create_test_jwt(carol, &app.config.jwt_secret).unwrap();

    submit(&app, &alice_jwt, seller, Uuid::new_v4(), 4).await;
    submit(&app, &carol_jwt, seller, Uuid::new_v4(), 2).await;

    let rep = reputation(&app, seller).await;
    assert_eq!(rep["average"], 3.0);
    assert_eq!(rep["count"], 2);

    app.cleanup(&[alice, carol, seller]).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a Postgres test database (TEST_DATABASE_URL)"]
async fn test_duplicate_review_rejected_and_aggregate_unchanged() {
    let app = TestApp::new().await.unwrap();
    let (alice, seller) = (Uuid::new_v4(), Uuid::new_v4());
    let listing = Uuid::new_v4();
    let jwt = create_test_jwt(alice, &app.config.jwt_secret).unwrap();

    let resp = submit(&app, &jwt, seller, listing, 5).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Same reviewer, same transaction
    let resp = submit(&app, &jwt, seller, listing, 1).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body = parse_body(resp).await;
    assert_eq!(body["error"]["code"], "DUPLICATE_REVIEW");

    let rep = reputation(&app, seller).await;
    assert_eq!(rep["average"], 5.0);
    assert_eq!(rep["count"], 1);

    app.cleanup(&[alice, seller]).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a Postgres test database (TEST_DATABASE_URL)"]
async fn test_rating_out_of_range_rejected() {
    let app = TestApp::new().await.unwrap();
    let (alice, seller) = (Uuid::new_v4(), Uuid::new_v4());
    let jwt = create_test_jwt(alice, &app.config.jwt_secret).unwrap();

    for rating in [0, 6] {
        let resp = submit(&app, &jwt, seller, Uuid::new_v4(), rating).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
#[ignore = "requires a Postgres test database (TEST_DATABASE_URL)"]
async fn test_empty_comment_rejected() {
    let app = TestApp::new().await.unwrap();
    let (alice, seller) = (Uuid::new_v4(), Uuid::new_v4());
    let jwt = create_test_jwt(alice, &app.config.jwt_secret).unwrap();

    let req = authed_request(
        Method::POST,
        "/v1/reviews",
        &jwt,
        Some(json!({
            "reviewed_id": seller,
            "rating": 3,
            "comment": "",
            "listing_id": Uuid::new_v4()
        })),
    );
    let resp = app.test_router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a Postgres test database (TEST_DATABASE_URL)"]
async fn test_edit_review_recomputes_aggregate() {
    let app = TestApp::new().await.unwrap();
    let (alice, carol, seller) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let alice_jwt = create_test_jwt(alice, &app.config.jwt_secret).unwrap();
    let carol_jwt = create_test_jwt(carol, &app.config.jwt_secret).unwrap();

    let resp = submit(&app, &alice_jwt, seller, Uuid::new_v4(), 2).await;
    let review_id = parse_body(resp).await["id"].as_str().unwrap().to_string();
    submit(&app, &carol_jwt, seller, Uuid::new_v4(), 2).await;

    let req = authed_request(
        Method::PATCH,
        &format!("/v1/reviews/{}", review_id),
        &alice_jwt,
        Some(json!({ "rating": 5 })),
    );
    let resp = app.test_router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(parse_body(resp).await["rating"], 5);

    let rep = reputation(&app, seller).await;
    assert_eq!(rep["average"], 3.5);
    assert_eq!(rep["count"], 2);

    app.cleanup(&[alice, carol, seller]).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a Postgres test database (TEST_DATABASE_URL)"]
async fn test_edit_foreign_review_returns_404() {
    let app = TestApp::new().await.unwrap();
    let (alice, mallory, seller) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let alice_jwt = create_test_jwt(alice, &app.config.jwt_secret).unwrap();
    let mallory_jwt = create_test_jwt(mallory, &app.config.jwt_secret).unwrap();

    let resp = submit(&app, &alice_jwt, seller, Uuid::new_v4(), 3).await;
    let review_id = parse_body(resp).await["id"].as_str().unwrap().to_string();

    let req = authed_request(
        Method::PATCH,
        &format!("/v1/reviews/{}", review_id),
        &mallory_jwt,
        Some(json!({ "rating": 1 })),
    );
    let resp = app.test_router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    app.cleanup(&[alice, mallory, seller]).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a Postgres test database (TEST_DATABASE_URL)"]
async fn test_delete_last_review_zeroes_aggregate() {
    let app = TestApp::new().await.unwrap();
    let (alice, seller) = (Uuid::new_v4(), Uuid::new_v4());
    let jwt = create_test_jwt(alice, &app.config.jwt_secret).unwrap();

    let resp = submit(&app, &jwt, seller, Uuid::new_v4(), 5).await;
    let review_id = parse_body(resp).await["id"].as_str().unwrap().to_string();

    let req = authed_request(
        Method::DELETE,
        &format!("/v1/reviews/{}", review_id),
        &jwt,
        None,
    );
    let resp = app.test_router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let rep = reputation(&app, seller).await;
    assert_eq!(rep["average"], 0.0);
    assert_eq!(rep["count"], 0);

    app.cleanup(&[alice, seller]).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a Postgres test database (TEST_DATABASE_URL)"]
async fn test_list_user_reviews_newest_first() {
    let app = TestApp::new().await.unwrap();
    let (alice, carol, seller) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let alice_jwt = create_test_jwt(alice, &app.config.jwt_secret).unwrap();
    let carol_jwt = create_test_jwt(carol, &app.config.jwt_secret).unwrap();

    submit(&app, &alice_jwt, seller, Uuid::new_v4(), 4).await;
    submit(&app, &carol_jwt, seller, Uuid::new_v4(), 2).await;

    let req = anon_request(Method::GET, &format!("/v1/users/{}/reviews", seller));
    let resp = app.test_router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = parse_body(resp).await;
    let reviews = body.as_array().unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0]["reviewer_id"], carol.to_string());
    assert_eq!(reviews[1]["reviewer_id"], alice.to_string());

    app.cleanup(&[alice, carol, seller]).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a Postgres test database (TEST_DATABASE_URL)"]
async fn test_reputation_of_unreviewed_user_is_zero() {
    let app = TestApp::new().await.unwrap();
    let nobody = Uuid::new_v4();

    let rep = reputation(&app, nobody).await;
    assert_eq!(rep["average"], 0.0);
    assert_eq!(rep["count"], 0);
}
