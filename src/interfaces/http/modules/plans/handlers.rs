//! Plan REST API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{PlanResponse, RegisterPlanRequest};
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/plans",
    tag = "Plans",
    responses(
        (status = 200, description = "Plan list", body = ApiResponse<Vec<PlanResponse>>)
    )
)]
pub async fn list_plans(State(state): State<AppState>) -> Json<ApiResponse<Vec<PlanResponse>>> {
    let plans: Vec<PlanResponse> = state
        .rating
        .list_plans()
        .into_iter()
        .map(Into::into)
        .collect();
    Json(ApiResponse::success(plans))
}

#[utoipa::path(
    get,
    path = "/api/v1/plans/{name}",
    tag = "Plans",
    params(("name" = String, Path, description = "Plan name")),
    responses(
        (status = 200, description = "Plan details", body = ApiResponse<PlanResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_plan(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<PlanResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.rating.get_plan(&name) {
        Ok(plan) => Ok(Json(ApiResponse::success(plan.into()))),
        Err(e) => Err((StatusCode::NOT_FOUND, Json(ApiResponse::error(e.to_string())))),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/plans/{name}/summary",
    tag = "Plans",
    params(("name" = String, Path, description = "Plan name")),
    responses(
        (status = 200, description = "Human-readable tier summary", body = ApiResponse<String>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_plan_summary(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.rating.describe_plan(&name) {
        Ok(summary) => Ok(Json(ApiResponse::success(summary))),
        Err(e) => Err((StatusCode::NOT_FOUND, Json(ApiResponse::error(e.to_string())))),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/plans",
    tag = "Plans",
    request_body = RegisterPlanRequest,
    responses(
        (status = 201, description = "Registered", body = ApiResponse<PlanResponse>),
        (status = 400, description = "Invalid tier schedule"),
        (status = 422, description = "Validation failure")
    )
)]
pub async fn register_plan(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterPlanRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PlanResponse>>), (StatusCode, Json<ApiResponse<()>>)> {
    match req.into_plan() {
        Ok(plan) => {
            let response = PlanResponse::from(plan.clone());
            state.rating.register_plan(plan);
            Ok((StatusCode::CREATED, Json(ApiResponse::success(response))))
        }
        Err(e @ DomainError::InvalidPlan(_)) => Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(e.to_string())),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}
