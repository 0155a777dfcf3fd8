//! Modelo de Booking
//!
//! Este módulo contiene el struct Booking y su máquina de estados.
//! Un booking nace siempre en PENDING a través de la admisión y solo
//! avanza por las transiciones permitidas del ciclo de vida.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado del booking - almacenado como texto en la tabla bookings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    PaymentConfirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::PaymentConfirmed => "payment_confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "payment_confirmed" => Some(BookingStatus::PaymentConfirmed),
            "completed" => Some(BookingStatus::Completed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    /// COMPLETED y CANCELLED son estados terminales
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// Transiciones permitidas del ciclo de vida
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Confirmed, PaymentConfirmed)
                | (PaymentConfirmed, Completed)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
                | (PaymentConfirmed, Cancelled)
        )
    }

    /// Las transiciones que devuelven el vehículo a disponible
    pub fn releases_vehicle(&self) -> bool {
        self.is_terminal()
    }
}

/// Booking principal - mapea exactamente a la tabla bookings.
/// `owner_id` se desnormaliza desde el vehículo en el momento de la admisión.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub renter_id: Uuid,
    pub owner_id: Uuid,
    pub status: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_price: Decimal,
    pub needs_delivery: bool,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn status(&self) -> Option<BookingStatus> {
        BookingStatus::parse(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BookingStatus::*;

    #[test]
    fn test_status_round_trip() {
        for status in [Pending, Confirmed, PaymentConfirmed, Completed, Cancelled] {
            assert_eq!(BookingStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(BookingStatus::parse("paid"), None);
    }

    #[test]
    fn test_happy_path_transitions() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(PaymentConfirmed));
        assert!(PaymentConfirmed.can_transition_to(Completed));
    }

    #[test]
    fn test_cancellation_from_any_non_terminal_state() {
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(PaymentConfirmed.can_transition_to(Cancelled));
    }

    #[test]
    fn test_terminal_states_admit_no_transitions() {
        for next in [Pending, Confirmed, PaymentConfirmed, Completed, Cancelled] {
            assert!(!Completed.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn test_illegal_skips_rejected() {
        assert!(!Pending.can_transition_to(PaymentConfirmed));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Confirmed.can_transition_to(Completed));
    }

    #[test]
    fn test_release_only_on_terminal_transitions() {
        assert!(Completed.releases_vehicle());
        assert!(Cancelled.releases_vehicle());
        assert!(!Confirmed.releases_vehicle());
        assert!(!PaymentConfirmed.releases_vehicle());
    }
}
