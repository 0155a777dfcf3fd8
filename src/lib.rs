//! API del marketplace de alquiler de vehículos
//!
//! Backend CRUD sobre axum + sqlx: autenticación JWT, KYC, publicación de
//! vehículos, contacto y la admisión de reservas con su puerta de
//! disponibilidad por vehículo.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
