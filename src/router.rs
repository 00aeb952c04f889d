use crate::auth::require_bearer;
use crate::handlers::{
    health::health_check,
    owners::{create_owner, delete_owner, get_owner, get_owners, login, update_owner},
    properties::{
        create_property, delete_property, get_properties, get_property, purchase_property,
        update_for_sale, update_owner as update_property_owner, update_price, update_property,
    },
    property_images::{
        create_property_image, delete_property_image, get_all_property_images,
        get_images_for_property, get_property_image, get_property_images, update_property_image,
    },
    property_traces::{
        create_property_trace, delete_property_trace, get_property_trace, get_property_traces,
        get_traces_for_property, update_property_trace,
    },
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    create_router_with_timeout(state, DEFAULT_REQUEST_TIMEOUT)
}

pub fn create_router_with_timeout(state: AppState, request_timeout: Duration) -> Router {
    // Routes that require a bearer token
    let protected = Router::new()
        // Owners
        .route("/api/owners", get(get_owners))
        .route(
            "/api/owners/:id",
            get(get_owner).put(update_owner).delete(delete_owner),
        )
        // Properties
        .route("/api/properties", get(get_properties).post(create_property))
        .route(
            "/api/properties/:id",
            get(get_property).put(update_property).delete(delete_property),
        )
        .route("/api/properties/:id/for-sale", patch(update_for_sale))
        .route("/api/properties/:id/owner", patch(update_property_owner))
        .route("/api/properties/:id/price", patch(update_price))
        .route("/api/properties/:id/purchase", post(purchase_property))
        // Property images
        .route(
            "/api/propertyimages",
            get(get_property_images).post(create_property_image),
        )
        .route("/api/propertyimages/all", post(get_all_property_images))
        .route(
            "/api/propertyimages/property/:property_id",
            get(get_images_for_property),
        )
        .route(
            "/api/propertyimages/:id",
            get(get_property_image)
                .put(update_property_image)
                .delete(delete_property_image),
        )
        // Property traces
        .route(
            "/api/propertytraces",
            get(get_property_traces).post(create_property_trace),
        )
        .route(
            "/api/propertytraces/property/:property_id",
            get(get_traces_for_property),
        )
        .route(
            "/api/propertytraces/:id",
            get(get_property_trace)
                .put(update_property_trace)
                .delete(delete_property_trace),
        )
        .route_layer(from_fn_with_state(state.clone(), require_bearer));

    // Public routes (no auth)
    let public = Router::new()
        .route("/health", get(health_check))
        .route("/api/owners/login", post(login))
        .route("/api/owners", post(create_owner));

    Router::new()
        .merge(public)
        .merge(protected)
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
