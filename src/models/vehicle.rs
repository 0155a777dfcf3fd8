//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle publicado por un propietario.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.
//!
//! El flag `is_available` es la puerta de admisión de reservas: solo la
//! admisión lo pone en false y solo cancelar/completar lo restauran a true.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub location: String,
    pub daily_price: Decimal,
    pub monthly_price: Option<Decimal>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}
