//! Shared application state and HTTP router.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    handlers,
    services::{notification_service::Notifier, transfer_service::TransferEngine},
    store::{AccountStore, SharedStore},
};

/// State shared with all handlers via `State` extraction.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub engine: TransferEngine,
}

impl AppState {
    /// Fresh, empty store wired to the given notifier.
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        let store: SharedStore = Arc::new(AccountStore::new());
        let engine = TransferEngine::new(Arc::clone(&store), notifier);
        Self { store, engine }
    }
}

/// Build the HTTP router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/v1/accounts",
            post(handlers::accounts::create_account).get(handlers::accounts::list_accounts),
        )
        .route(
            "/v1/accounts/transfer",
            post(handlers::transfers::transfer_funds),
        )
        .route("/v1/accounts/{id}", get(handlers::accounts::get_account))
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        handlers::health::HealthResponse,
        models::{account::AccountResponse, transfer::TransferResult},
        services::notification_service::LoggingNotifier,
    };
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
        response::Response,
    };
    use rust_decimal::Decimal;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn test_app() -> Router {
        router(AppState::new(Arc::new(LoggingNotifier)))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create(app: &Router, id: &str, balance: &str) -> Response {
        app.clone()
            .oneshot(post_json(
                "/v1/accounts",
                json!({"account_id": id, "balance": balance}),
            ))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_account() {
        let app = test_app();

        let created = create(&app, "Id-123", "1000").await;
        assert_eq!(created.status(), StatusCode::CREATED);

        let response = app.clone().oneshot(get_request("/v1/accounts/Id-123")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let account: AccountResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(account.account_id, "Id-123");
        assert_eq!(account.balance, Decimal::new(1000, 0));
    }

    #[tokio::test]
    async fn test_duplicate_account_is_bad_request() {
        let app = test_app();
        create(&app, "Id-123", "1000").await;

        let response = create(&app, "Id-123", "5").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "duplicate_account");
        assert_eq!(body["error"]["message"], "Account id Id-123 already exists!");
    }

    #[tokio::test]
    async fn test_negative_initial_balance_is_bad_request() {
        let app = test_app();

        let response = create(&app, "Id-123", "-1").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "invalid_request");
    }

    #[tokio::test]
    async fn test_missing_account_is_not_found() {
        let response = test_app().oneshot(get_request("/v1/accounts/nope")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "account_not_found");
    }

    #[tokio::test]
    async fn test_transfer_endpoint_moves_funds() {
        let app = test_app();
        create(&app, "A", "100").await;
        create(&app, "B", "50").await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/v1/accounts/transfer",
                json!({"account_from_id": "A", "account_to_id": "B", "amount": "30"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let result: TransferResult = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(result.message, "Funds has been transferred successfully");

        let response = app.clone().oneshot(get_request("/v1/accounts")).await.unwrap();
        let accounts: Vec<AccountResponse> =
            serde_json::from_value(body_json(response).await).unwrap();
        let balances: Vec<(String, Decimal)> = accounts
            .into_iter()
            .map(|a| (a.account_id, a.balance))
            .collect();
        assert_eq!(
            balances,
            vec![
                ("A".to_string(), Decimal::new(70, 0)),
                ("B".to_string(), Decimal::new(80, 0)),
            ]
        );
    }

    #[tokio::test]
    async fn test_transfer_validation_errors_are_bad_request() {
        let app = test_app();
        create(&app, "A", "10").await;
        create(&app, "B", "0").await;

        for (body, code) in [
            (
                json!({"account_from_id": "A", "account_to_id": "B", "amount": "50"}),
                "insufficient_balance",
            ),
            (
                json!({"account_from_id": "A", "account_to_id": "B", "amount": "0"}),
                "invalid_amount",
            ),
            (
                json!({"account_from_id": "X", "account_to_id": "B", "amount": "1"}),
                "unknown_account",
            ),
        ] {
            let response = app
                .clone()
                .oneshot(post_json("/v1/accounts/transfer", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(response).await["error"]["code"], code);
        }
    }

    #[tokio::test]
    async fn test_health_reports_account_count() {
        let app = test_app();
        create(&app, "A", "10").await;

        let response = app.clone().oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let health: HealthResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.accounts, 1);
    }
}
