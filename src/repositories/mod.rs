//! Repositorios de acceso a datos
//!
//! Un struct por agregado sobre el pool de PostgreSQL.

pub mod booking_repository;
pub mod contact_repository;
pub mod user_repository;
pub mod vehicle_repository;
