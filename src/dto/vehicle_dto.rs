use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::Vehicle;

/// Request para publicar un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 3, max = 120))]
    pub title: String,

    #[validate(length(min = 2, max = 120))]
    pub location: String,

    pub daily_price: Decimal,

    pub monthly_price: Option<Decimal>,
}

/// Request para actualizar un vehículo existente.
/// No incluye `is_available`: ese flag lo gobierna la admisión de reservas.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 3, max = 120))]
    pub title: Option<String>,

    #[validate(length(min = 2, max = 120))]
    pub location: Option<String>,

    pub daily_price: Option<Decimal>,

    pub monthly_price: Option<Decimal>,
}

/// Response de vehículo para la API
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub location: String,
    pub daily_price: Decimal,
    pub monthly_price: Option<Decimal>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            owner_id: vehicle.owner_id,
            title: vehicle.title,
            location: vehicle.location,
            daily_price: vehicle.daily_price,
            monthly_price: vehicle.monthly_price,
            is_available: vehicle.is_available,
            created_at: vehicle.created_at,
        }
    }
}

/// Filtros para búsqueda de vehículos
#[derive(Debug, Deserialize)]
pub struct VehicleFilters {
    pub location: Option<String>,
    pub max_daily_price: Option<Decimal>,
    pub available_only: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
