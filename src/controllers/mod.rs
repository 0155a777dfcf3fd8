//! Controllers de la API
//!
//! Lógica de negocio y comprobaciones de permisos por recurso,
//! construidos por request sobre el pool.

pub mod auth_controller;
pub mod booking_controller;
pub mod contact_controller;
pub mod kyc_controller;
pub mod vehicle_controller;
