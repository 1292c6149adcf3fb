//! End-to-end tests driving the HTTP router.
//!
//! Requests go through the full axum stack with `tower::ServiceExt::oneshot`,
//! so routing, JSON extraction, the transfer engine and error mapping are
//! all exercised together.

#[cfg(test)]
mod tests {
    use std::{str::FromStr, sync::Arc};

    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode},
        response::Response,
    };
    use funds_transfer_server::{
        app::{AppState, router},
        models::account::AccountResponse,
        services::notification_service::LoggingNotifier,
    };
    use rstest::rstest;
    use rust_decimal::Decimal;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn app_with(accounts: &[(&str, &str)]) -> Router {
        let app = router(AppState::new(Arc::new(LoggingNotifier)));
        for (id, balance) in accounts {
            let response = send(
                &app,
                "POST",
                "/v1/accounts",
                Some(json!({"account_id": id, "balance": balance})),
            )
            .await;
            assert_eq!(response.status(), StatusCode::CREATED);
        }
        app
    }

    async fn transfer(app: &Router, from: &str, to: &str, amount: &str) -> Response {
        send(
            app,
            "POST",
            "/v1/accounts/transfer",
            Some(json!({"account_from_id": from, "account_to_id": to, "amount": amount})),
        )
        .await
    }

    async fn balance(app: &Router, id: &str) -> Decimal {
        let response = send(app, "GET", &format!("/v1/accounts/{}", id), None).await;
        let account: AccountResponse = serde_json::from_value(body_json(response).await).unwrap();
        account.balance
    }

    #[tokio::test]
    async fn test_scenario_successful_transfer() {
        let app = app_with(&[("A", "100"), ("B", "50")]).await;

        let response = transfer(&app, "A", "B", "30").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(balance(&app, "A").await, dec("70"));
        assert_eq!(balance(&app, "B").await, dec("80"));
    }

    #[rstest]
    #[case::insufficient_balance("A", "B", "50", "insufficient_balance", None)]
    #[case::unknown_account("X", "B", "5", "unknown_account", Some("X"))]
    #[case::zero_amount("A", "B", "0", "invalid_amount", None)]
    #[case::negative_amount("A", "B", "-3", "invalid_amount", None)]
    #[tokio::test]
    async fn test_rejected_transfer_changes_nothing(
        #[case] from: &str,
        #[case] to: &str,
        #[case] amount: &str,
        #[case] code: &str,
        #[case] mentions: Option<&str>,
    ) {
        let app = app_with(&[("A", "10"), ("B", "0")]).await;

        let response = transfer(&app, from, to, amount).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], code);
        if let Some(id) = mentions {
            assert!(body["error"]["message"].as_str().unwrap().contains(id));
        }
        assert_eq!(balance(&app, "A").await, dec("10"));
        assert_eq!(balance(&app, "B").await, Decimal::ZERO);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_opposite_transfers_conserve_total() {
        const N: usize = 100;
        let app = app_with(&[("A", "500"), ("B", "500")]).await;

        let mut tasks = Vec::with_capacity(2 * N);
        for i in 0..2 * N {
            let app = app.clone();
            tasks.push(tokio::spawn(async move {
                let (from, to) = if i % 2 == 0 { ("A", "B") } else { ("B", "A") };
                transfer(&app, from, to, "3").await.status()
            }));
        }
        for task in tasks {
            let status = task.await.unwrap();
            assert!(status == StatusCode::OK || status == StatusCode::BAD_REQUEST);
        }

        let a = balance(&app, "A").await;
        let b = balance(&app, "B").await;
        assert_eq!(a + b, dec("1000"));
        assert!(a >= Decimal::ZERO && b >= Decimal::ZERO);
    }
}
