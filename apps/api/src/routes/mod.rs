pub mod body;
pub mod health;

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::routing::{get, post, MethodRouter};
use axum::{handler::Handler, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::errors::AppError;
use crate::extraction::handlers;
use crate::state::AppState;

/// Pre-flight probe: 200, empty body. The CORS layer fills in the headers.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Anything that is neither POST nor OPTIONS.
async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// POST-only route with the shared OPTIONS / 405 contract.
fn post_only<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    post(handler)
        .options(preflight)
        .fallback(method_not_allowed)
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/jobs/extract", post_only(handlers::handle_extract))
        .route(
            "/api/v1/jobs/extract-link",
            post_only(handlers::handle_extract_link),
        )
        .route(
            "/api/v1/jobs/experience-search",
            post_only(handlers::handle_experience_search),
        )
        .route(
            "/api/v1/jobs/relevance",
            post_only(handlers::handle_relevance),
        )
        .route(
            "/api/v1/jobs/title-probe",
            post_only(handlers::handle_title_probe),
        )
        .layer(cors)
        // Non-preflight responses carry the open-origin header too.
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::extraction::retry::RetryPolicy;
    use crate::llm_client::testing::ScriptedModel;
    use crate::llm_client::ModelError;

    const VALID_EXTRACTION: &str = r#"{"job_title": "Senior Data Engineer", "city": "Richmond, VA", "work_arrangement": "hybrid", "experience": "Senior (6-8 Years)"}"#;

    fn test_router(model: ScriptedModel) -> (Router, Arc<ScriptedModel>) {
        let model = Arc::new(model);
        let state = AppState {
            llm: model.clone(),
            retry: RetryPolicy {
                max_attempts: 3,
                base_delay: Duration::ZERO,
            },
        };
        (build_router(state), model)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn wrong_method_returns_405_with_json_body() {
        let (router, _) = test_router(ScriptedModel::new(vec![]));
        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/jobs/extract")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = body_json(response).await;
        assert_eq!(body, json!({ "error": "Method not allowed" }));
    }

    #[tokio::test]
    async fn preflight_options_returns_200_with_cors_headers() {
        let (router, _) = test_router(ScriptedModel::new(vec![]));
        let response = router
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/v1/jobs/relevance")
                    .header(header::ORIGIN, "https://example.com")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn plain_options_without_preflight_headers_still_succeeds() {
        let (router, _) = test_router(ScriptedModel::new(vec![]));
        let response = router
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/v1/jobs/extract")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn post_responses_carry_the_open_origin_header() {
        let (router, _) = test_router(ScriptedModel::new(vec![Ok(VALID_EXTRACTION.to_string())]));
        let response = router
            .oneshot(post_json(
                "/api/v1/jobs/extract",
                json!({ "job_title": "Engineer", "job_description": "5+ years" }),
            ))
            .await
            .unwrap();
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }

    #[tokio::test]
    async fn extract_requires_title_and_description() {
        let (router, model) = test_router(ScriptedModel::new(vec![]));
        let response = router
            .oneshot(post_json(
                "/api/v1/jobs/extract",
                json!({ "job_title": "Engineer" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(
            body["error"],
            "Missing required fields: job_title and job_description"
        );
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn extract_round_trips_an_already_valid_model_response() {
        let (router, model) = test_router(ScriptedModel::new(vec![Ok(VALID_EXTRACTION.to_string())]));
        let response = router
            .oneshot(post_json(
                "/api/v1/jobs/extract",
                json!({ "job_title": "Senior Data Engineer", "job_description": "5+ years of Spark" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let expected: Value = serde_json::from_str(VALID_EXTRACTION).unwrap();
        assert_eq!(body, expected);
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn extract_accepts_urlencoded_bodies() {
        let (router, _) = test_router(ScriptedModel::new(vec![Ok(VALID_EXTRACTION.to_string())]));
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/jobs/extract")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(
                        "job_title=Senior+Data+Engineer&job_description=5%2B+years+of+Spark",
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn extract_link_rejects_missing_and_malformed_links() {
        let (router, _) = test_router(ScriptedModel::new(vec![]));
        let response = router
            .clone()
            .oneshot(post_json("/api/v1/jobs/extract-link", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing required field: job_link");

        let response = router
            .oneshot(post_json(
                "/api/v1/jobs/extract-link",
                json!({ "job_link": "not a url" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid URL format");
    }

    #[tokio::test]
    async fn relevance_short_circuits_without_a_model_call() {
        let (router, model) = test_router(ScriptedModel::new(vec![]));
        let response = router
            .oneshot(post_json(
                "/api/v1/jobs/relevance",
                json!({ "job_title": "Engineer", "job_type": "Data Engineering", "job_description": "   " }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["score"], 0);
        assert_eq!(body["relevant"], false);
        assert!(body["reason"]
            .as_str()
            .unwrap()
            .starts_with("Missing job description"));
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn relevance_scores_when_description_present() {
        let scored = r#"{"score": 85, "relevant": true, "reason": "strong title and stack match"}"#;
        let (router, model) = test_router(ScriptedModel::new(vec![Ok(scored.to_string())]));
        let response = router
            .oneshot(post_json(
                "/api/v1/jobs/relevance",
                json!({
                    "job_title": "Data Engineer",
                    "job_type": "Data Engineering",
                    "job_description": "Airflow, Spark, 3+ years"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["score"], 85);
        assert_eq!(body["relevant"], true);
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn exhausted_retries_surface_as_500_with_details() {
        let (router, model) = test_router(ScriptedModel::new(vec![
            Ok("garbage".to_string()),
            Ok("more garbage".to_string()),
            Ok("final garbage".to_string()),
        ]));
        let response = router
            .oneshot(post_json(
                "/api/v1/jobs/extract",
                json!({ "job_title": "Engineer", "job_description": "things" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Failed to extract job details");
        assert!(body["details"].as_str().unwrap().contains("final garbage"));
        assert_eq!(model.calls(), 3);
    }

    #[tokio::test]
    async fn transport_failures_surface_as_500() {
        let (router, _) = test_router(ScriptedModel::new(vec![
            Err(ModelError::RateLimited),
            Err(ModelError::RateLimited),
            Err(ModelError::RateLimited),
        ]));
        let response = router
            .oneshot(post_json(
                "/api/v1/jobs/experience-search",
                json!({ "job_link": "https://example.com/job/1" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(
            body["error"],
            "Failed to extract experience level from job link"
        );
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (router, _) = test_router(ScriptedModel::new(vec![]));
        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }
}
