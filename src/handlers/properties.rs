use crate::auth::AuthenticatedOwner;
use crate::errors::{error_response, service_error, ApiError};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use common::{
    PropertyFilter, PropertyRequest, PropertyResponse, PurchaseRequest, PurchaseResponse,
    UpdateForSaleRequest, UpdateOwnerRequest, UpdatePriceRequest,
};
use service::{property, sale};
use tracing::{debug, info, instrument, trace, warn};

/// List properties, optionally filtered
#[utoipa::path(
    get,
    path = "/api/properties",
    tag = "properties",
    security(("bearer_auth" = [])),
    params(PropertyFilter),
    responses(
        (status = 200, description = "Properties retrieved successfully", body = ApiResponse<Vec<PropertyResponse>>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_properties(
    State(state): State<AppState>,
    Query(filter): Query<PropertyFilter>,
) -> Result<Json<ApiResponse<Vec<PropertyResponse>>>, ApiError> {
    trace!("Entering get_properties function");
    debug!("Filter: {:?}", filter);

    let properties = property::list_filtered(&state.store, &filter)
        .await
        .map_err(service_error)?;
    info!("Successfully retrieved {} properties", properties.len());
    Ok(Json(ApiResponse::new(properties, "Properties retrieved successfully")))
}

/// Get a specific property by ID
#[utoipa::path(
    get,
    path = "/api/properties/{id}",
    tag = "properties",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Property ID"),
    ),
    responses(
        (status = 200, description = "Property retrieved successfully", body = ApiResponse<PropertyResponse>),
        (status = 404, description = "Property not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_property(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PropertyResponse>>, ApiError> {
    trace!("Entering get_property function for id: {}", id);

    match property::get_by_id(&state.store, id).await {
        Ok(Some(found)) => Ok(Json(ApiResponse::new(found, "Property retrieved successfully"))),
        Ok(None) => {
            warn!("Property with ID {} not found", id);
            Err(error_response(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Property with ID {} not found.", id),
            ))
        }
        Err(err) => Err(service_error(err)),
    }
}

/// Create a new property
#[utoipa::path(
    post,
    path = "/api/properties",
    tag = "properties",
    security(("bearer_auth" = [])),
    request_body = PropertyRequest,
    responses(
        (status = 201, description = "Property created successfully", body = ApiResponse<PropertyResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_property(
    State(state): State<AppState>,
    Json(request): Json<PropertyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PropertyResponse>>), ApiError> {
    trace!("Entering create_property function");

    match property::create(&state.store, request).await {
        Ok(created) => {
            info!("Property created successfully with ID: {}", created.id);
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse::new(created, "Property created successfully")),
            ))
        }
        Err(err) => {
            warn!("Failed to create property: {}", err);
            Err(service_error(err))
        }
    }
}

/// Replace a property
#[utoipa::path(
    put,
    path = "/api/properties/{id}",
    tag = "properties",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Property ID"),
    ),
    request_body = PropertyRequest,
    responses(
        (status = 200, description = "Property updated successfully", body = ApiResponse<PropertyResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Property not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_property(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<PropertyRequest>,
) -> Result<Json<ApiResponse<PropertyResponse>>, ApiError> {
    trace!("Entering update_property function for id: {}", id);

    let updated = property::update(&state.store, id, request)
        .await
        .map_err(service_error)?;
    info!("Property with ID {} updated successfully", id);
    Ok(Json(ApiResponse::new(updated, "Property updated successfully")))
}

/// Delete a property
#[utoipa::path(
    delete,
    path = "/api/properties/{id}",
    tag = "properties",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Property ID"),
    ),
    responses(
        (status = 200, description = "Property deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Property not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_property(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    trace!("Entering delete_property function for id: {}", id);

    property::delete(&state.store, id).await.map_err(service_error)?;
    info!("Property with ID {} deleted successfully", id);
    Ok(Json(ApiResponse::new(
        format!("Property {} deleted", id),
        "Property deleted successfully",
    )))
}

/// Mark a property as for sale or not
#[utoipa::path(
    patch,
    path = "/api/properties/{id}/for-sale",
    tag = "properties",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Property ID"),
    ),
    request_body = UpdateForSaleRequest,
    responses(
        (status = 200, description = "For-sale flag updated", body = ApiResponse<PropertyResponse>),
        (status = 404, description = "Property not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_for_sale(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateForSaleRequest>,
) -> Result<Json<ApiResponse<PropertyResponse>>, ApiError> {
    let updated = property::set_for_sale(&state.store, id, request.for_sale)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::new(updated, "Property for-sale status updated successfully")))
}

/// Change or clear the owner of a property
#[utoipa::path(
    patch,
    path = "/api/properties/{id}/owner",
    tag = "properties",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Property ID"),
    ),
    request_body = UpdateOwnerRequest,
    responses(
        (status = 200, description = "Owner updated", body = ApiResponse<PropertyResponse>),
        (status = 404, description = "Property not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_owner(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateOwnerRequest>,
) -> Result<Json<ApiResponse<PropertyResponse>>, ApiError> {
    let updated = property::set_owner(&state.store, id, request.owner_id)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::new(updated, "Property owner updated successfully")))
}

/// Change the price of a property
#[utoipa::path(
    patch,
    path = "/api/properties/{id}/price",
    tag = "properties",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Property ID"),
    ),
    request_body = UpdatePriceRequest,
    responses(
        (status = 200, description = "Price updated", body = ApiResponse<PropertyResponse>),
        (status = 400, description = "Price must be greater than zero", body = ErrorResponse),
        (status = 404, description = "Property not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_price(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdatePriceRequest>,
) -> Result<Json<ApiResponse<PropertyResponse>>, ApiError> {
    let updated = property::set_price(&state.store, id, request.price)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::new(updated, "Property price updated successfully")))
}

/// An empty body buys for the caller. Anything else must be a valid `PurchaseRequest`.
fn parse_purchase_request(body: &Bytes) -> Result<PurchaseRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(PurchaseRequest::default());
    }
    serde_json::from_slice(body).map_err(|err| {
        warn!("Malformed purchase request: {}", err);
        error_response(
            StatusCode::BAD_REQUEST,
            "INVALID_REQUEST_BODY",
            format!("Invalid purchase request: {}", err),
        )
    })
}

/// Buy a property
///
/// The buyer defaults to the owner the bearer token was issued for.
#[utoipa::path(
    post,
    path = "/api/properties/{id}/purchase",
    tag = "properties",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Property ID"),
    ),
    request_body(content = PurchaseRequest, description = "Optional buyer; defaults to the caller"),
    responses(
        (status = 200, description = "Property purchased", body = ApiResponse<PurchaseResponse>),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 404, description = "Property or buyer not found", body = ErrorResponse),
        (status = 409, description = "Property is not for sale or was already purchased", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, caller, body), fields(caller = caller.id))]
pub async fn purchase_property(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedOwner>,
    body: Bytes,
) -> Result<Json<ApiResponse<PurchaseResponse>>, ApiError> {
    trace!("Entering purchase_property function for id: {}", id);

    let buyer_id = parse_purchase_request(&body)?.buyer_id.unwrap_or(caller.id);
    debug!("Buyer: {}", buyer_id);

    match sale::purchase(&state.store, id, buyer_id).await {
        Ok(outcome) => {
            info!("Property {} purchased by owner {}", id, buyer_id);
            Ok(Json(ApiResponse::new(outcome, "Property purchased successfully")))
        }
        Err(err) => {
            warn!("Purchase of property {} failed: {}", id, err);
            Err(service_error(err))
        }
    }
}
