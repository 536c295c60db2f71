//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::IntoParams;

use payrec_types::{AppError, PageRequest, PaymentId, PaymentRecordRepository, PaymentRecordView, Sort};

use crate::PaymentRecordService;

/// Page size used when the query string does not name one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Application state shared across handlers.
pub struct AppState<R: PaymentRecordRepository> {
    pub service: PaymentRecordService<R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(AppError::BadRequest(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(AppError::BadRequest(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::IntegrityViolation(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.0.to_string(),
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Query string accepted by the listing endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Zero-based page index (default 0)
    pub page: Option<u32>,
    /// Items per page, greater than zero (default 10)
    pub size: Option<u32>,
    /// `field` or `field,asc|desc`, e.g. `amount,desc`
    pub sort: Option<String>,
}

impl ListParams {
    fn into_page_request(self) -> Result<PageRequest, AppError> {
        let request = PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
        )?;
        match self.sort.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(sort) => Ok(request.with_sort(sort.parse::<Sort>()?)),
            None => Ok(request),
        }
    }
}

fn parse_payment_id(raw: &str) -> Result<PaymentId, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid payment ID: {raw}")))
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// List payment records, one page at a time.
#[tracing::instrument(skip(state))]
pub async fn list_payments<R: PaymentRecordRepository>(
    State(state): State<Arc<AppState<R>>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let request = params.into_page_request()?;
    let page = state.service.list(&request).await?;
    Ok(Json(page))
}

/// Get a payment record by ID.
#[tracing::instrument(skip(state), fields(payment_id = %id))]
pub async fn get_payment<R: PaymentRecordRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_payment_id(&id)?;
    let view = state.service.get_by_id(id).await?;
    Ok(Json(view))
}

#[tracing::instrument(skip(state, body))]
pub async fn create_payment<R: PaymentRecordRepository>(
    State(state): State<Arc<AppState<R>>>,
    body: Result<Json<PaymentRecordView>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(view) = body?;
    view.validate().map_err(AppError::from)?;

    let created = state.service.create(view).await?;
    let location = created
        .id
        .map(|id| format!("/payments/{id}"))
        .unwrap_or_default();

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// Replace every field of a payment record.
#[tracing::instrument(skip(state, body), fields(payment_id = %id))]
pub async fn update_payment<R: PaymentRecordRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
    body: Result<Json<PaymentRecordView>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_payment_id(&id)?;
    let Json(view) = body?;
    view.validate().map_err(AppError::from)?;

    let updated = state.service.update(id, view).await?;
    Ok(Json(updated))
}

#[tracing::instrument(skip(state), fields(payment_id = %id))]
pub async fn delete_payment<R: PaymentRecordRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_payment_id(&id)?;
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Serves the OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    use utoipa::OpenApi;
    Json(crate::openapi::ApiDoc::openapi())
}
