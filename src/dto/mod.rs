//! DTOs de la API
//!
//! Requests y responses de cada recurso, con sus validaciones derive.

pub mod auth_dto;
pub mod booking_dto;
pub mod contact_dto;
pub mod kyc_dto;
pub mod vehicle_dto;
