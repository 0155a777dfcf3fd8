//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;
use std::time::Duration;

use crate::config::environment::EnvironmentConfig;
use crate::middleware::rate_limit::RateLimitState;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub rate_limiter: RateLimitState,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let rate_limiter = RateLimitState::new(
            config.rate_limit_requests,
            Duration::from_secs(config.rate_limit_window),
        );

        Self {
            pool,
            config,
            rate_limiter,
        }
    }
}
