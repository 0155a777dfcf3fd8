//! Rutas de la API
//!
//! Un router por recurso, anidados bajo /api.

use axum::{routing::get, Json, Router};
use serde_json::json;

use crate::state::AppState;

pub mod auth_routes;
pub mod booking_routes;
pub mod contact_routes;
pub mod user_routes;
pub mod vehicle_routes;

/// Construir el router completo de la API
pub fn create_api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes::create_auth_router(state.clone()))
        .nest(
            "/api/vehicles",
            vehicle_routes::create_vehicle_router(state.clone()),
        )
        .nest(
            "/api/bookings",
            booking_routes::create_booking_router(state.clone()),
        )
        .nest("/api/users", user_routes::create_user_router(state.clone()))
        .nest("/api/contact", contact_routes::create_contact_router(state))
}

/// Health check del servicio
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "service": "vehicle-rental-api",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
