use axum::http::StatusCode;
use confirm_links::configuration::PermissionStrategy;
use confirm_links::domain::AcceptResult;

use crate::helpers::{spawn_app, status_and_body};

#[tokio::test]
async fn accepted_token_returns_200() {
    // Arrange
    let test_app = spawn_app(PermissionStrategy::AcceptInvite).await;
    test_app
        .store
        .set_accept_result("tok-1", AcceptResult::accepted());

    // Act
    let response = test_app.confirm_permission("?token=tok-1").await;

    // Assert
    assert_eq!(
        response.headers()["content-type"],
        "text/plain; charset=utf-8"
    );
    let (status, body) = status_and_body(response).await;
    assert_eq!(StatusCode::OK, status);
    assert_eq!(body, "✅ Permission confirmed successfully");
}

#[tokio::test]
async fn token_is_trimmed_before_the_procedure_call() {
    let test_app = spawn_app(PermissionStrategy::AcceptInvite).await;
    test_app
        .store
        .set_accept_result("tok-1", AcceptResult::accepted());

    let response = test_app.confirm_permission("?token=%20tok-1%0A").await;

    assert_eq!(StatusCode::OK, response.status());
}

#[tokio::test]
async fn repeated_token_uses_the_first_one() {
    let test_app = spawn_app(PermissionStrategy::AcceptInvite).await;
    test_app
        .store
        .set_accept_result("tok-a", AcceptResult::accepted());
    test_app
        .store
        .set_accept_result("tok-b", AcceptResult::rejected("expired"));

    let (status, body) =
        status_and_body(test_app.confirm_permission("?token=tok-a&token=tok-b").await).await;

    assert_eq!(StatusCode::OK, status);
    assert_eq!(body, "✅ Permission confirmed successfully");
}

#[tokio::test]
async fn rejected_token_returns_400_with_the_reason() {
    let test_app = spawn_app(PermissionStrategy::AcceptInvite).await;
    test_app
        .store
        .set_accept_result("tok-1", AcceptResult::rejected("expired"));

    let (status, body) = status_and_body(test_app.confirm_permission("?token=tok-1").await).await;

    assert_eq!(StatusCode::BAD_REQUEST, status);
    assert!(body.starts_with("❌"));
    assert!(body.contains("expired"));
}

#[tokio::test]
async fn rejection_without_reason_reports_unknown() {
    let test_app = spawn_app(PermissionStrategy::AcceptInvite).await;
    test_app.store.set_accept_result(
        "tok-1",
        AcceptResult {
            ok: false,
            reason: None,
        },
    );

    let (status, body) = status_and_body(test_app.confirm_permission("?token=tok-1").await).await;

    assert_eq!(StatusCode::BAD_REQUEST, status);
    assert_eq!(body, "❌ Could not confirm invitation: unknown");
}

#[tokio::test]
async fn missing_token_returns_400() {
    let test_app = spawn_app(PermissionStrategy::AcceptInvite).await;

    let test_cases = vec![
        ("", "no query string"),
        ("?token=", "an empty token"),
        ("?token=%20%20", "a whitespace-only token"),
        ("?permissionLogId=log-1", "a permissionLogId instead of a token"),
    ];

    for (query, description) in test_cases {
        let (status, body) = status_and_body(test_app.confirm_permission(query).await).await;

        assert_eq!(
            StatusCode::BAD_REQUEST,
            status,
            "The API did not return a 400 Bad Request for {description}."
        );
        assert!(body.contains("token"));
    }
}

#[tokio::test]
async fn procedure_failure_returns_500_with_the_remote_message() {
    let test_app = spawn_app(PermissionStrategy::AcceptInvite).await;
    test_app
        .store
        .fail_all("function public.accept_invite(text) does not exist");

    let (status, body) = status_and_body(test_app.confirm_permission("?token=tok-1").await).await;

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status);
    assert!(body.starts_with("❌ Unexpected error: "));
    assert!(body.contains("function public.accept_invite(text) does not exist"));
}

#[tokio::test]
async fn store_panics_return_500() {
    let test_app = spawn_app(PermissionStrategy::AcceptInvite).await;
    test_app.store.panic_with("rpc client exploded");

    let (status, body) = status_and_body(test_app.confirm_permission("?token=tok-1").await).await;

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status);
    assert!(body.contains("rpc client exploded"));
}
