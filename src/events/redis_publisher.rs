use anyhow::Result;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisResult};
use tracing::{error, info};

use super::{EventPublisher, VehicleEvent};

/// Publicador de eventos sobre una lista Redis.
///
/// Cada evento se serializa a JSON y se hace LPUSH en la cola configurada;
/// el worker los consume con BRPOP desde el otro extremo.
#[derive(Clone)]
pub struct RedisEventPublisher {
    manager: ConnectionManager,
    queue: String,
}

impl RedisEventPublisher {
    /// Crear el publicador y verificar la conexión
    pub async fn new(redis_url: &str, queue: &str) -> Result<Self> {
        info!("🔗 Conectando a Redis: {}", redis_url);

        let client = redis::Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        // Test de conexión usando un comando simple
        let mut conn = manager.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis conectado exitosamente");

        Ok(Self {
            manager,
            queue: queue.to_string(),
        })
    }
}

#[async_trait]
impl EventPublisher for RedisEventPublisher {
    async fn publish(&self, event: VehicleEvent) {
        let payload = match serde_json::to_string(&event) {
            Ok(payload) => payload,
            Err(e) => {
                error!("❌ Falla al serializar evento {}: {}", event.name(), e);
                return;
            }
        };

        let mut conn = self.manager.clone();
        let result: RedisResult<i64> = conn.lpush(&self.queue, payload).await;

        match result {
            Ok(_) => {
                info!(
                    "📤 Enviando evento {} al worker - Vehículo ID: {}",
                    event.name(),
                    event.vehicle_id()
                );
            }
            Err(e) => {
                // La mutación ya está confirmada; el error solo se loguea
                error!(
                    "❌ Falla al enviar evento {} - Vehículo ID: {}: {}",
                    event.name(),
                    event.vehicle_id(),
                    e
                );
            }
        }
    }
}
