use crate::errors::{error_response, service_error, ApiError};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common::{PropertyImageRequest, PropertyImageResponse};
use service::property_image;
use tracing::{debug, info, instrument, trace, warn};

/// Get all property images
#[utoipa::path(
    get,
    path = "/api/propertyimages",
    tag = "property-images",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Images retrieved successfully", body = ApiResponse<Vec<PropertyImageResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_property_images(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PropertyImageResponse>>>, ApiError> {
    trace!("Entering get_property_images function");

    let images = property_image::list_all(&state.store).await.map_err(service_error)?;
    debug!("Retrieved {} images", images.len());
    Ok(Json(ApiResponse::new(images, "Property images retrieved successfully")))
}

/// Get all property images (POST form used by the web client)
#[utoipa::path(
    post,
    path = "/api/propertyimages/all",
    tag = "property-images",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Images retrieved successfully", body = ApiResponse<Vec<PropertyImageResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_all_property_images(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PropertyImageResponse>>>, ApiError> {
    get_property_images(State(state)).await
}

/// Get the images of one property
#[utoipa::path(
    get,
    path = "/api/propertyimages/property/{propertyId}",
    tag = "property-images",
    security(("bearer_auth" = [])),
    params(
        ("propertyId" = i32, Path, description = "Property ID"),
    ),
    responses(
        (status = 200, description = "Images retrieved successfully", body = ApiResponse<Vec<PropertyImageResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_images_for_property(
    Path(property_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PropertyImageResponse>>>, ApiError> {
    let images = property_image::list_for_property(&state.store, property_id)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::new(images, "Property images retrieved successfully")))
}

/// Get a specific property image by ID
#[utoipa::path(
    get,
    path = "/api/propertyimages/{id}",
    tag = "property-images",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Property image ID"),
    ),
    responses(
        (status = 200, description = "Image retrieved successfully", body = ApiResponse<PropertyImageResponse>),
        (status = 404, description = "Image not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_property_image(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PropertyImageResponse>>, ApiError> {
    match property_image::get_by_id(&state.store, id).await {
        Ok(Some(found)) => Ok(Json(ApiResponse::new(found, "Property image retrieved successfully"))),
        Ok(None) => {
            warn!("Property image with ID {} not found", id);
            Err(error_response(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Property image with ID {} not found.", id),
            ))
        }
        Err(err) => Err(service_error(err)),
    }
}

/// Attach an image to a property
#[utoipa::path(
    post,
    path = "/api/propertyimages",
    tag = "property-images",
    security(("bearer_auth" = [])),
    request_body = PropertyImageRequest,
    responses(
        (status = 201, description = "Image created successfully", body = ApiResponse<PropertyImageResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_property_image(
    State(state): State<AppState>,
    Json(request): Json<PropertyImageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PropertyImageResponse>>), ApiError> {
    let created = property_image::create(&state.store, request)
        .await
        .map_err(service_error)?;
    info!("Property image created with ID: {}", created.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(created, "Property image created successfully")),
    ))
}

/// Replace a property image
#[utoipa::path(
    put,
    path = "/api/propertyimages/{id}",
    tag = "property-images",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Property image ID"),
    ),
    request_body = PropertyImageRequest,
    responses(
        (status = 200, description = "Image updated successfully", body = ApiResponse<PropertyImageResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Image not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_property_image(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<PropertyImageRequest>,
) -> Result<Json<ApiResponse<PropertyImageResponse>>, ApiError> {
    let updated = property_image::update(&state.store, id, request)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::new(updated, "Property image updated successfully")))
}

/// Delete a property image
#[utoipa::path(
    delete,
    path = "/api/propertyimages/{id}",
    tag = "property-images",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Property image ID"),
    ),
    responses(
        (status = 200, description = "Image deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Image not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_property_image(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    property_image::delete(&state.store, id).await.map_err(service_error)?;
    info!("Property image with ID {} deleted successfully", id);
    Ok(Json(ApiResponse::new(
        format!("Property image {} deleted", id),
        "Property image deleted successfully",
    )))
}
