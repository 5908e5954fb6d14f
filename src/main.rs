use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use vehicle_registry::config::EnvironmentConfig;
use vehicle_registry::database::DatabaseConnection;
use vehicle_registry::events::RedisEventPublisher;
use vehicle_registry::middleware::cors_middleware;
use vehicle_registry::repositories::PgVehicleRepository;
use vehicle_registry::routes::vehicle_routes::create_vehicle_router;
use vehicle_registry::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Registro de Vehículos - API REST");
    info!("===================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos (crea la tabla vehicles si no existe)
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    let pool = db_connection.pool().clone();

    // Inicializar el publicador de eventos hacia el worker
    let publisher =
        match RedisEventPublisher::new(&config.redis_url, &config.vehicle_queue).await {
            Ok(publisher) => publisher,
            Err(e) => {
                error!("❌ Error conectando a Redis: {}", e);
                return Err(anyhow::anyhow!("Error de Redis: {}", e));
            }
        };

    // Crear router de la API
    let app_state = AppState::new(
        Arc::new(PgVehicleRepository::new(pool)),
        Arc::new(publisher),
        config.clone(),
    );

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/vehicles", create_vehicle_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware())
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("   POST   /vehicles - Crear vehículo");
    info!("   GET    /vehicles - Listar vehículos");
    info!("   GET    /vehicles/:id - Obtener vehículo");
    info!("   PATCH  /vehicles/:id - Actualizar vehículo");
    info!("   DELETE /vehicles/:id - Eliminar vehículo");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "vehicle-registry",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
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
