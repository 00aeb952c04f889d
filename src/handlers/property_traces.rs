use crate::errors::{error_response, service_error, ApiError};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common::{PropertyTraceRequest, PropertyTraceResponse};
use service::property_trace;
use tracing::{debug, info, instrument, warn};

/// Get all property traces
#[utoipa::path(
    get,
    path = "/api/propertytraces",
    tag = "property-traces",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Traces retrieved successfully", body = ApiResponse<Vec<PropertyTraceResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_property_traces(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PropertyTraceResponse>>>, ApiError> {
    let traces = property_trace::list_all(&state.store).await.map_err(service_error)?;
    debug!("Retrieved {} traces", traces.len());
    Ok(Json(ApiResponse::new(traces, "Property traces retrieved successfully")))
}

/// Get the trace of one property
#[utoipa::path(
    get,
    path = "/api/propertytraces/property/{propertyId}",
    tag = "property-traces",
    security(("bearer_auth" = [])),
    params(
        ("propertyId" = i32, Path, description = "Property ID"),
    ),
    responses(
        (status = 200, description = "Traces retrieved successfully", body = ApiResponse<Vec<PropertyTraceResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_traces_for_property(
    Path(property_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PropertyTraceResponse>>>, ApiError> {
    let traces = property_trace::list_for_property(&state.store, property_id)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::new(traces, "Property traces retrieved successfully")))
}

/// Get a specific property trace by ID
#[utoipa::path(
    get,
    path = "/api/propertytraces/{id}",
    tag = "property-traces",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Property trace ID"),
    ),
    responses(
        (status = 200, description = "Trace retrieved successfully", body = ApiResponse<PropertyTraceResponse>),
        (status = 404, description = "Trace not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_property_trace(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PropertyTraceResponse>>, ApiError> {
    match property_trace::get_by_id(&state.store, id).await {
        Ok(Some(found)) => Ok(Json(ApiResponse::new(found, "Property trace retrieved successfully"))),
        Ok(None) => {
            warn!("Property trace with ID {} not found", id);
            Err(error_response(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Property trace with ID {} not found.", id),
            ))
        }
        Err(err) => Err(service_error(err)),
    }
}

/// Record a property sale
#[utoipa::path(
    post,
    path = "/api/propertytraces",
    tag = "property-traces",
    security(("bearer_auth" = [])),
    request_body = PropertyTraceRequest,
    responses(
        (status = 201, description = "Trace created successfully", body = ApiResponse<PropertyTraceResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "The property has already been purchased", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_property_trace(
    State(state): State<AppState>,
    Json(request): Json<PropertyTraceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PropertyTraceResponse>>), ApiError> {
    match property_trace::create(&state.store, request).await {
        Ok(created) => {
            info!("Property trace created with ID: {}", created.id);
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse::new(created, "Property trace created successfully")),
            ))
        }
        Err(err) => {
            warn!("Failed to create property trace: {}", err);
            Err(service_error(err))
        }
    }
}

/// Replace a property trace
#[utoipa::path(
    put,
    path = "/api/propertytraces/{id}",
    tag = "property-traces",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Property trace ID"),
    ),
    request_body = PropertyTraceRequest,
    responses(
        (status = 200, description = "Trace updated successfully", body = ApiResponse<PropertyTraceResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Trace not found", body = ErrorResponse),
        (status = 409, description = "The property already has another trace", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_property_trace(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<PropertyTraceRequest>,
) -> Result<Json<ApiResponse<PropertyTraceResponse>>, ApiError> {
    let updated = property_trace::update(&state.store, id, request)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::new(updated, "Property trace updated successfully")))
}

/// Delete a property trace
#[utoipa::path(
    delete,
    path = "/api/propertytraces/{id}",
    tag = "property-traces",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Property trace ID"),
    ),
    responses(
        (status = 200, description = "Trace deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Trace not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_property_trace(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    property_trace::delete(&state.store, id).await.map_err(service_error)?;
    info!("Property trace with ID {} deleted successfully", id);
    Ok(Json(ApiResponse::new(
        format!("Property trace {} deleted", id),
        "Property trace deleted successfully",
    )))
}
