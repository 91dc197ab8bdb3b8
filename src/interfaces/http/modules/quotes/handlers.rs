//! Quote REST API handlers

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{QuoteRequest, QuoteResponse};
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/quotes",
    tag = "Quotes",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Itemized overage charge", body = ApiResponse<QuoteResponse>),
        (status = 404, description = "Plan not found"),
        (status = 422, description = "Validation failure")
    )
)]
pub async fn quote_usage(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<QuoteRequest>,
) -> Result<Json<ApiResponse<QuoteResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.rating.quote(&req.plan, req.usage_bytes) {
        Ok(quote) => Ok(Json(ApiResponse::success(quote.into()))),
        Err(e @ DomainError::PlanNotFound { .. }) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(e.to_string())),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )),
    }
}
