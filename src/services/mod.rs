//! Services module
//!
//! Este módulo contiene la lógica de negocio y servicios de la aplicación.

pub mod booking_service;

pub use booking_service::*;
