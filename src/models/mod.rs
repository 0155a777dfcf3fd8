//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod booking;
pub mod contact;
pub mod user;
pub mod vehicle;

pub use booking::*;
pub use contact::*;
pub use user::*;
pub use vehicle::*;
