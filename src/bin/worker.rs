use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use vehicle_registry::config::EnvironmentConfig;
use vehicle_registry::worker::EventConsumer;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = EnvironmentConfig::default();

    let consumer = match EventConsumer::connect(&config.redis_url, &config.vehicle_queue).await {
        Ok(consumer) => consumer,
        Err(e) => {
            error!("❌ Error conectando a Redis: {}", e);
            return Err(anyhow::anyhow!("Error de Redis: {}", e));
        }
    };

    info!("🚀 Worker iniciado con éxito");
    info!("🔗 Conectado a Redis: {}", config.redis_url);
    info!("📋 Escuchando eventos: vehicle_created, vehicle_updated, vehicle_deleted");
    info!("⏳ Esperando eventos para procesar...");

    tokio::select! {
        result = consumer.run() => {
            if let Err(e) = result {
                error!("❌ Worker terminó con error: {}", e);
                return Err(e);
            }
        }
        _ = shutdown_signal() => {}
    }

    info!("👋 Worker terminado");
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
            info!("🛑 Señal Ctrl+C recibida, apagando worker...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando worker...");
        },
    }
}
