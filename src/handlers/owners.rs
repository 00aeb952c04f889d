use crate::errors::{error_response, service_error, ApiError};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use common::{LoginRequest, LoginResponse, OwnerRequest, OwnerResponse};
use service::owner;
use tracing::{debug, error, info, instrument, trace, warn};

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/api/owners/login",
    tag = "owners",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login succeeded", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid username or password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(username = %request.username))]
pub async fn login(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<LoginRequest>>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    trace!("Entering login function");

    match owner::authenticate(&state.store, &state.tokens, &request.username, &request.password).await {
        Ok(Some(login)) => {
            info!("Owner {} logged in", login.owner.id);
            Ok(Json(ApiResponse::new(login, "Login successful")))
        }
        Ok(None) => {
            warn!("Invalid credentials");
            Err(error_response(
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid username or password",
            ))
        }
        Err(err) => {
            error!("Login failed: {}", err);
            Err(service_error(err))
        }
    }
}

/// Register a new owner
#[utoipa::path(
    post,
    path = "/api/owners",
    tag = "owners",
    request_body = OwnerRequest,
    responses(
        (status = 201, description = "Owner created successfully", body = ApiResponse<OwnerResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Username already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(username = %request.username))]
pub async fn create_owner(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<OwnerRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<OwnerResponse>>), ApiError> {
    trace!("Entering create_owner function");

    match owner::create(&state.store, request).await {
        Ok(created) => {
            info!("Owner created successfully with ID: {}", created.id);
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse::new(created, "Owner created successfully")),
            ))
        }
        Err(err) => {
            warn!("Failed to create owner: {}", err);
            Err(service_error(err))
        }
    }
}

/// Get all owners
#[utoipa::path(
    get,
    path = "/api/owners",
    tag = "owners",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Owners retrieved successfully", body = ApiResponse<Vec<OwnerResponse>>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_owners(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<OwnerResponse>>>, ApiError> {
    trace!("Entering get_owners function");

    let owners = owner::list_all(&state.store).await.map_err(service_error)?;
    debug!("Retrieved {} owners", owners.len());
    Ok(Json(ApiResponse::new(owners, "Owners retrieved successfully")))
}

/// Get a specific owner by ID
#[utoipa::path(
    get,
    path = "/api/owners/{id}",
    tag = "owners",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Owner ID"),
    ),
    responses(
        (status = 200, description = "Owner retrieved successfully", body = ApiResponse<OwnerResponse>),
        (status = 404, description = "Owner not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_owner(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<OwnerResponse>>, ApiError> {
    trace!("Entering get_owner function for id: {}", id);

    match owner::get_by_id(&state.store, id).await {
        Ok(Some(found)) => {
            debug!("Found owner {}", found.username);
            Ok(Json(ApiResponse::new(found, "Owner retrieved successfully")))
        }
        Ok(None) => {
            warn!("Owner with ID {} not found", id);
            Err(error_response(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Owner with ID {} not found.", id),
            ))
        }
        Err(err) => Err(service_error(err)),
    }
}

/// Replace an owner
#[utoipa::path(
    put,
    path = "/api/owners/{id}",
    tag = "owners",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Owner ID"),
    ),
    request_body = OwnerRequest,
    responses(
        (status = 200, description = "Owner updated successfully", body = ApiResponse<OwnerResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Owner not found", body = ErrorResponse),
        (status = 409, description = "Username already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn update_owner(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<OwnerRequest>>,
) -> Result<Json<ApiResponse<OwnerResponse>>, ApiError> {
    trace!("Entering update_owner function for id: {}", id);

    match owner::update(&state.store, id, request).await {
        Ok(updated) => {
            info!("Owner with ID {} updated successfully", id);
            Ok(Json(ApiResponse::new(updated, "Owner updated successfully")))
        }
        Err(err) => {
            warn!("Failed to update owner {}: {}", id, err);
            Err(service_error(err))
        }
    }
}

/// Delete an owner
#[utoipa::path(
    delete,
    path = "/api/owners/{id}",
    tag = "owners",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Owner ID"),
    ),
    responses(
        (status = 200, description = "Owner deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Owner not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_owner(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    trace!("Entering delete_owner function for id: {}", id);

    owner::delete(&state.store, id).await.map_err(service_error)?;
    info!("Owner with ID {} deleted successfully", id);
    Ok(Json(ApiResponse::new(
        format!("Owner {} deleted", id),
        "Owner deleted successfully",
    )))
}
