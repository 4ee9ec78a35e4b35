use axum::{
    http::{header, Method, StatusCode},
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::Config,
    handlers::{
        clients::active_pending_clients,
        companies::{get_company, list_companies, update_client_status, upsert_company},
        health::test,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::PUT])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/companies", get(list_companies))
        .route(
            "/companies/{company_id}",
            get(get_company).put(upsert_company),
        )
        .route("/companies/{company_id}/status", put(update_client_status))
        .route("/clients/active-pending", get(active_pending_clients))
        .route("/test", get(test))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout(),
        ))
        .with_state(state)
}

#[cfg(all(test, feature = "inmemory"))]
mod tests {
    use std::sync::Arc;

    use super::*;
    use async_trait::async_trait;
    use axum::{body::Body, http::Request, response::Response};
    use companydesk_core::company::{Company, CompanyId, UpdateExpression, CLIENT_STATUS_FIELD};
    use companydesk_core::storage::{CompanyRepository, RepositoryError, Result};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::storage::InMemoryRepository;

    /// Repository whose every call fails, for exercising the 500 paths.
    struct FailingRepository;

    #[async_trait]
    impl CompanyRepository for FailingRepository {
        async fn get_company(&self, _id: CompanyId) -> Result<Option<Company>> {
            Err(RepositoryError::ConnectionFailed("store offline".to_string()))
        }

        async fn put_company(&self, _company: &Company) -> Result<()> {
            Err(RepositoryError::ConnectionFailed("store offline".to_string()))
        }

        async fn update_company(
            &self,
            _id: CompanyId,
            _update: &UpdateExpression,
        ) -> Result<Company> {
            Err(RepositoryError::ConnectionFailed("store offline".to_string()))
        }

        async fn scan_companies(&self) -> Result<Vec<Company>> {
            Err(RepositoryError::ConnectionFailed("store offline".to_string()))
        }
    }

    fn app_with(companies: impl IntoIterator<Item = Company>) -> Router {
        let repo = InMemoryRepository::with_companies(companies);
        create_app(AppState::new(Arc::new(repo)), &Config::default())
    }

    fn failing_app() -> Router {
        create_app(
            AppState::new(Arc::new(FailingRepository)),
            &Config::default(),
        )
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn put_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn acme() -> Company {
        Company::new(CompanyId(123456))
            .with_attribute("name", "Acme")
            .with_attribute("city", "Sydney")
    }

    fn numbered(count: i64) -> Vec<Company> {
        (1..=count)
            .map(|i| {
                Company::new(CompanyId(100_000 + i))
                    .with_attribute(CLIENT_STATUS_FIELD, i % 3 == 0)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_liveness() {
        let response = app_with([]).oneshot(get("/test")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Serverless function running successfully" })
        );
    }

    #[tokio::test]
    async fn test_create_without_id_generates_six_digit_id() {
        let app = app_with([]);

        let response = app
            .clone()
            .oneshot(put_json("/companies/new", json!({ "name": "Globex" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["message"], "New company created successfully.");
        assert_eq!(json["data"]["name"], "Globex");

        let id = json["data"]["id"].as_i64().unwrap();
        assert!((100_000..=999_999).contains(&id), "id {id} is not six digits");

        // The new record is retrievable
        let response = app.oneshot(get(&format!("/companies/{id}"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["name"], "Globex");
    }

    #[tokio::test]
    async fn test_update_with_id_merges_into_existing_record() {
        let app = app_with([acme()]);

        let response = app
            .clone()
            .oneshot(put_json(
                "/companies/123456",
                json!({ "id": 123456, "name": "Acme Pty Ltd", "staff": 12 }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Company info updated successfully.");
        assert_eq!(
            json["data"],
            json!({ "id": 123456, "name": "Acme Pty Ltd", "city": "Sydney", "staff": 12 })
        );

        let response = app.oneshot(get("/companies/123456")).await.unwrap();
        assert_eq!(body_json(response).await["data"]["name"], "Acme Pty Ltd");
    }

    #[tokio::test]
    async fn test_update_target_comes_from_body_not_path() {
        let app = app_with([acme()]);

        let response = app
            .clone()
            .oneshot(put_json(
                "/companies/999",
                json!({ "id": "123456", "name": "Renamed" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["id"], 123456);
    }

    #[tokio::test]
    async fn test_update_with_only_id_fails() {
        let response = app_with([acme()])
            .oneshot(put_json("/companies/123456", json!({ "id": 123456 })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Could not update or create company info" })
        );
    }

    #[tokio::test]
    async fn test_negative_id_is_updated_not_duplicated() {
        let app = app_with([]);

        let response = app
            .clone()
            .oneshot(put_json(
                "/companies/-5/status",
                json!({ "clientStatus": true }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.clone().oneshot(get("/companies/-5")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(put_json("/companies/x", json!({ "id": -5, "name": "Neg" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["data"],
            json!({ "id": -5, "name": "Neg", "clientStatus": true })
        );

        let response = app.oneshot(get("/companies")).await.unwrap();
        assert_eq!(body_json(response).await["data"]["total"], 1);
    }

    #[tokio::test]
    async fn test_upsert_without_content_type_creates_empty_record() {
        let request = Request::builder()
            .method("PUT")
            .uri("/companies/1")
            .body(Body::from(r#"{"name":"Ignored"}"#))
            .unwrap();

        let response = app_with([]).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        let data = json["data"].as_object().unwrap();
        assert_eq!(data.len(), 1);
        assert!(data["id"].is_i64());
    }

    #[tokio::test]
    async fn test_status_without_content_type_fails() {
        let request = Request::builder()
            .method("PUT")
            .uri("/companies/123456/status")
            .body(Body::from(r#"{"clientStatus":true}"#))
            .unwrap();

        let response = app_with([acme()]).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Could not update client status" })
        );
    }

    #[tokio::test]
    async fn test_upsert_with_malformed_body_fails() {
        let request = Request::builder()
            .method("PUT")
            .uri("/companies/1")
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app_with([]).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Could not update or create company info" })
        );
    }

    #[tokio::test]
    async fn test_get_company() {
        let response = app_with([acme()])
            .oneshot(get("/companies/123456"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "message": "Company details retrieved successfully.",
                "data": { "id": 123456, "name": "Acme", "city": "Sydney" }
            })
        );
    }

    #[tokio::test]
    async fn test_get_nonexistent_company_returns_404() {
        let response = app_with([acme()])
            .oneshot(get("/companies/654321"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Company not found" })
        );
    }

    #[tokio::test]
    async fn test_get_with_non_numeric_id_fails() {
        let response = app_with([]).oneshot(get("/companies/acme")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Could not retrieve company" })
        );
    }

    #[tokio::test]
    async fn test_list_uses_default_pagination() {
        let response = app_with(numbered(25))
            .oneshot(get("/companies"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Companies retrieved successfully");
        assert_eq!(json["data"]["page"], 1);
        assert_eq!(json["data"]["limit"], 10);
        assert_eq!(json["data"]["total"], 25);
        assert_eq!(json["data"]["companies"].as_array().unwrap().len(), 10);
        assert_eq!(json["data"]["companies"][0]["id"], 100_001);
    }

    #[tokio::test]
    async fn test_list_respects_page_number_and_limit() {
        let response = app_with(numbered(25))
            .oneshot(get("/companies?pageNumber=3&pageLimit=4"))
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["data"]["page"], 3);
        assert_eq!(json["data"]["limit"], 4);
        assert_eq!(json["data"]["total"], 25);

        let ids: Vec<i64> = json["data"]["companies"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![100_009, 100_010, 100_011, 100_012]);
    }

    #[tokio::test]
    async fn test_list_with_garbage_query_falls_back_to_defaults() {
        let response = app_with(numbered(3))
            .oneshot(get("/companies?pageNumber=abc&pageLimit=0"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["page"], 1);
        assert_eq!(json["data"]["limit"], 10);
        assert_eq!(json["data"]["companies"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_client_status() {
        let app = app_with([acme()]);

        let response = app
            .clone()
            .oneshot(put_json(
                "/companies/123456/status",
                json!({ "clientStatus": true }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Updated company client status");
        assert_eq!(
            json["data"],
            json!({ "id": 123456, "name": "Acme", "city": "Sydney", "clientStatus": true })
        );

        let response = app.oneshot(get("/clients/active-pending")).await.unwrap();
        assert_eq!(
            body_json(response).await["data"],
            json!({ "activeClients": 1, "pendingClients": 0 })
        );
    }

    #[tokio::test]
    async fn test_update_client_status_requires_boolean() {
        for body in [json!({}), json!({ "clientStatus": "active" })] {
            let response = app_with([acme()])
                .oneshot(put_json("/companies/123456/status", body))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                body_json(response).await,
                json!({ "error": "Could not update client status" })
            );
        }
    }

    #[tokio::test]
    async fn test_active_pending_counts_sum_to_total() {
        let companies = numbered(10);
        let total = companies.len() as u64;

        let response = app_with(companies)
            .oneshot(get("/clients/active-pending"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Active and pending clients fetched.");

        let active = json["data"]["activeClients"].as_u64().unwrap();
        let pending = json["data"]["pendingClients"].as_u64().unwrap();
        assert_eq!(active, 3);
        assert_eq!(active + pending, total);
    }

    #[tokio::test]
    async fn test_store_failures_return_route_errors() {
        let cases = [
            (get("/companies/123456"), "Could not retrieve company"),
            (get("/companies"), "Could not retrieve companies"),
            (
                get("/clients/active-pending"),
                "Could not fetch active and pending clients",
            ),
            (
                put_json("/companies/1", json!({ "name": "Acme" })),
                "Could not update or create company info",
            ),
            (
                put_json("/companies/1", json!({ "id": 1, "name": "Acme" })),
                "Could not update or create company info",
            ),
            (
                put_json("/companies/1/status", json!({ "clientStatus": false })),
                "Could not update client status",
            ),
        ];

        for (request, message) in cases {
            let uri = request.uri().to_string();
            let response = failing_app().oneshot(request).await.unwrap();

            assert_eq!(
                response.status(),
                StatusCode::INTERNAL_SERVER_ERROR,
                "{uri}"
            );
            assert_eq!(body_json(response).await, json!({ "error": message }), "{uri}");
        }
    }
}
