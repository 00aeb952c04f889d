use common::{
    LoginRequest, LoginResponse, OwnerRequest, OwnerResponse, PropertyImageRequest,
    PropertyImageResponse, PropertyRequest, PropertyResponse, PropertyTraceRequest,
    PropertyTraceResponse, PurchaseRequest, PurchaseResponse, UpdateForSaleRequest,
    UpdateOwnerRequest, UpdatePriceRequest,
};
use serde::{Deserialize, Serialize};
use service::{Store, TokenIssuer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi, ToSchema,
};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database store
    pub store: Store,
    /// Signs and verifies bearer tokens
    pub tokens: TokenIssuer,
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Registers the bearer token scheme used by the protected routes.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            let scheme = HttpBuilder::new()
                .scheme(HttpAuthScheme::Bearer)
                .bearer_format("JWT")
                .build();
            components.add_security_scheme("bearer_auth", SecurityScheme::Http(scheme));
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::owners::login,
        crate::handlers::owners::get_owners,
        crate::handlers::owners::get_owner,
        crate::handlers::owners::create_owner,
        crate::handlers::owners::update_owner,
        crate::handlers::owners::delete_owner,
        crate::handlers::properties::get_properties,
        crate::handlers::properties::get_property,
        crate::handlers::properties::create_property,
        crate::handlers::properties::update_property,
        crate::handlers::properties::delete_property,
        crate::handlers::properties::update_for_sale,
        crate::handlers::properties::update_owner,
        crate::handlers::properties::update_price,
        crate::handlers::properties::purchase_property,
        crate::handlers::property_images::get_property_images,
        crate::handlers::property_images::get_all_property_images,
        crate::handlers::property_images::get_images_for_property,
        crate::handlers::property_images::get_property_image,
        crate::handlers::property_images::create_property_image,
        crate::handlers::property_images::update_property_image,
        crate::handlers::property_images::delete_property_image,
        crate::handlers::property_traces::get_property_traces,
        crate::handlers::property_traces::get_traces_for_property,
        crate::handlers::property_traces::get_property_trace,
        crate::handlers::property_traces::create_property_trace,
        crate::handlers::property_traces::update_property_trace,
        crate::handlers::property_traces::delete_property_trace,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            LoginRequest,
            LoginResponse,
            OwnerRequest,
            OwnerResponse,
            PropertyRequest,
            PropertyResponse,
            UpdateForSaleRequest,
            UpdateOwnerRequest,
            UpdatePriceRequest,
            PurchaseRequest,
            PurchaseResponse,
            PropertyImageRequest,
            PropertyImageResponse,
            PropertyTraceRequest,
            PropertyTraceResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "owners", description = "Owner accounts and login"),
        (name = "properties", description = "Property listings and purchases"),
        (name = "property-images", description = "Images attached to properties"),
        (name = "property-traces", description = "Property sale records"),
    ),
    info(
        title = "Realty API",
        description = "Real-estate listing service: owners, properties, images and sale traces",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
