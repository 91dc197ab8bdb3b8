//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::RatingService;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{health, plans, quotes};

/// Shared state for all routes.
#[derive(Clone)]
pub struct AppState {
    pub rating: Arc<RatingService>,
    pub started_at: Arc<Instant>,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Plans
        plans::handlers::list_plans,
        plans::handlers::get_plan,
        plans::handlers::get_plan_summary,
        plans::handlers::register_plan,
        // Quotes
        quotes::handlers::quote_usage,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::handlers::HealthResponse,
            plans::dto::TierDto,
            plans::dto::PlanResponse,
            plans::dto::RegisterPlanRequest,
            quotes::dto::QuoteRequest,
            quotes::dto::QuoteResponse,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Plans", description = "Tariff plan catalog: lookup and registration"),
        (name = "Quotes", description = "Tiered overage rating of usage records"),
    ),
    info(
        title = "SBD Billing Service API",
        version = "1.0.0",
        description = "REST API for rating Iridium SBD usage against tiered tariff plans",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(rating: Arc<RatingService>) -> Router {
    let state = AppState {
        rating,
        started_at: Arc::new(Instant::now()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let plan_routes = Router::new()
        .route(
            "/",
            get(plans::handlers::list_plans).post(plans::handlers::register_plan),
        )
        .route("/{name}", get(plans::handlers::get_plan))
        .route("/{name}/summary", get(plans::handlers::get_plan_summary));

    let quote_routes = Router::new().route("/", post(quotes::handlers::quote_usage));

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::handlers::health_check))
        .nest("/api/v1/plans", plan_routes)
        .nest("/api/v1/quotes", quote_routes)
        .with_state(state)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TariffCatalog;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        create_api_router(Arc::new(RatingService::new(TariffCatalog::builtin())))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    async fn body_json(resp: axum::http::Response<Body>) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_plan_count() {
        let resp = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["plans"], 2);
    }

    #[tokio::test]
    async fn quote_returns_the_itemized_breakdown() {
        let req = post_json(
            "/api/v1/quotes",
            json!({"plan": "SBD Tiered 1250 10K", "usage_bytes": 100000}),
        );
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["plan_code"], "SBD-10");
        assert_eq!(body["data"]["tier1_charge"], "4.50");
        assert_eq!(body["data"]["total_charge"], "14.50");
    }

    #[tokio::test]
    async fn quote_for_unknown_plan_is_not_found() {
        let req = post_json(
            "/api/v1/quotes",
            json!({"plan": "No Such Plan", "usage_bytes": 1000}),
        );
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = body_json(resp).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn quote_with_empty_plan_name_fails_validation() {
        let req = post_json("/api/v1/quotes", json!({"plan": "", "usage_bytes": 1000}));
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn negative_usage_is_rejected_at_the_boundary() {
        let req = post_json(
            "/api/v1/quotes",
            json!({"plan": "SBD Tiered 1250 10K", "usage_bytes": -1}),
        );
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn registered_plan_is_listed_and_quotable() {
        let app = app();

        let register = post_json(
            "/api/v1/plans",
            json!({
                "name": "SBD Tiered 1250 30K",
                "code": "SBD-30",
                "included_kb": "30",
                "tiers": [
                    {"from_kb": "30", "to_kb": "60", "price_per_kb": "0.15"},
                    {"from_kb": "60", "to_kb": "120", "price_per_kb": "0.10"},
                    {"from_kb": "120", "to_kb": null, "price_per_kb": "0.05"}
                ]
            }),
        );
        let resp = app.clone().oneshot(register).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let quote = post_json(
            "/api/v1/quotes",
            json!({"plan": "SBD Tiered 1250 30K", "usage_bytes": 100000}),
        );
        let resp = app.clone().oneshot(quote).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["total_charge"], "8.50");
    }

    #[tokio::test]
    async fn gapped_tiers_are_a_bad_request() {
        let register = post_json(
            "/api/v1/plans",
            json!({
                "name": "Gapped",
                "code": "GAP",
                "included_kb": "0",
                "tiers": [
                    {"from_kb": "0", "to_kb": "10", "price_per_kb": "0.30"},
                    {"from_kb": "15", "to_kb": "20", "price_per_kb": "0.20"},
                    {"from_kb": "20", "to_kb": null, "price_per_kb": "0.10"}
                ]
            }),
        );
        let resp = app().oneshot(register).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn plan_summary_is_human_readable() {
        let resp = app()
            .oneshot(
                Request::get("/api/v1/plans/SBD%20Tiered%201250%2010K/summary")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        let summary = body["data"].as_str().unwrap();
        assert!(summary.contains("included allowance: 10 KB"));
    }
}
