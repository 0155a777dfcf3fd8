use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::{error, info};

use vehicle_rental::config::environment::EnvironmentConfig;
use vehicle_rental::database::DatabaseConnection;
use vehicle_rental::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use vehicle_rental::middleware::rate_limit::rate_limit_middleware;
use vehicle_rental::routes::create_api_router;
use vehicle_rental::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Vehicle Rental Marketplace - API");
    info!("===================================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();
    let config = EnvironmentConfig::default();

    // CORS permisivo solo en desarrollo
    let cors = if config.is_development() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let port = config.port;
    let app_state = AppState::new(pool, config);

    let app = create_api_router(app_state.clone())
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            rate_limit_middleware,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Auth:");
    info!("   POST /api/auth/register - Registrar usuario (renter/owner)");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/me - Perfil del usuario autenticado");
    info!("🪪 KYC:");
    info!("   POST /api/users/kyc - Enviar documentos KYC");
    info!("   POST /api/users/:id/kyc/review - Revisar KYC (admin)");
    info!("🚗 Vehicles:");
    info!("   POST /api/vehicles - Publicar vehículo (owner)");
    info!("   GET  /api/vehicles - Listar vehículos disponibles");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   PUT  /api/vehicles/:id - Actualizar vehículo (owner)");
    info!("   DELETE /api/vehicles/:id - Retirar vehículo (owner)");
    info!("📅 Bookings:");
    info!("   POST /api/bookings - Crear reserva (renter con KYC)");
    info!("   GET  /api/bookings - Listar reservas propias");
    info!("   GET  /api/bookings/:id - Obtener reserva");
    info!("   POST /api/bookings/:id/confirm - Confirmar reserva (owner)");
    info!("   POST /api/bookings/:id/payment - Confirmar pago (renter)");
    info!("   POST /api/bookings/:id/complete - Completar reserva (owner)");
    info!("   POST /api/bookings/:id/cancel - Cancelar reserva");
    info!("✉️  Contact:");
    info!("   POST /api/contact - Enviar mensaje de contacto");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                anyhow::Error::from(e)
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
