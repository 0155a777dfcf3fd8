//! Modelo de User
//!
//! Este módulo contiene el struct User y los enums de rol y estado KYC.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Rol del usuario dentro del marketplace
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Renter,
    Owner,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Renter => "renter",
            UserRole::Owner => "owner",
            UserRole::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "renter" => Some(UserRole::Renter),
            "owner" => Some(UserRole::Owner),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

/// Estado KYC del usuario - gate para poder transaccionar
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KycStatus {
    Pending,
    Submitted,
    Verified,
    Rejected,
}

impl KycStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            KycStatus::Pending => "pending",
            KycStatus::Submitted => "submitted",
            KycStatus::Verified => "verified",
            KycStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(KycStatus::Pending),
            "submitted" => Some(KycStatus::Submitted),
            "verified" => Some(KycStatus::Verified),
            "rejected" => Some(KycStatus::Rejected),
            _ => None,
        }
    }

    /// Un usuario solo puede (re)enviar documentos desde pending o rejected
    pub fn can_submit(&self) -> bool {
        matches!(self, KycStatus::Pending | KycStatus::Rejected)
    }

    /// Solo una solicitud enviada puede ser revisada por un admin
    pub fn can_review(&self) -> bool {
        matches!(self, KycStatus::Submitted)
    }
}

/// User principal - mapea exactamente a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub kyc_status: String,
    pub kyc_document_type: Option<String>,
    pub kyc_document_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [UserRole::Renter, UserRole::Owner, UserRole::Admin] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::parse("driver"), None);
    }

    #[test]
    fn test_kyc_submit_states() {
        assert!(KycStatus::Pending.can_submit());
        assert!(KycStatus::Rejected.can_submit());
        assert!(!KycStatus::Submitted.can_submit());
        assert!(!KycStatus::Verified.can_submit());
    }

    #[test]
    fn test_kyc_review_states() {
        assert!(KycStatus::Submitted.can_review());
        assert!(!KycStatus::Pending.can_review());
        assert!(!KycStatus::Verified.can_review());
        assert!(!KycStatus::Rejected.can_review());
    }
}
