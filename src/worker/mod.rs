//! Worker de procesamiento de eventos
//!
//! Consume los eventos de vehículos desde la cola Redis y delega cada uno
//! al procesador en una tarea propia: los eventos en vuelo se procesan de
//! forma concurrente, sin estado compartido.

pub mod processor;

pub use processor::VehicleProcessor;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use redis::aio::ConnectionManager;
use tracing::{info, warn};

use crate::events::VehicleEvent;

/// Segundos que BRPOP bloquea antes de devolver vacío y volver a consultar
const BLOCK_SECONDS: u64 = 5;

/// Consumidor de la cola de eventos de vehículos
pub struct EventConsumer {
    manager: ConnectionManager,
    queue: String,
}

impl EventConsumer {
    /// Conectar el consumidor a Redis y verificar la conexión
    pub async fn connect(redis_url: &str, queue: &str) -> Result<Self> {
        info!("🔗 Conectando a Redis: {}", redis_url);

        let client = redis::Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        let mut conn = manager.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis conectado exitosamente");

        Ok(Self {
            manager,
            queue: queue.to_string(),
        })
    }

    /// Bucle principal: cada evento recibido se procesa en su propia tarea
    pub async fn run(&self) -> Result<()> {
        let processor = Arc::new(VehicleProcessor::new());

        loop {
            match self.next_event().await {
                Ok(Some(event)) => {
                    let processor = processor.clone();
                    tokio::spawn(async move {
                        processor.process(event).await;
                    });
                }
                Ok(None) => {
                    // timeout del BRPOP, volver a consultar
                }
                Err(e) => {
                    warn!("⚠️ Error leyendo la cola de eventos: {}", e);
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        }
    }

    /// Bloquear hasta el próximo evento; None en timeout o mensaje inválido
    async fn next_event(&self) -> Result<Option<VehicleEvent>> {
        let mut conn = self.manager.clone();

        let reply: Option<(String, String)> = redis::cmd("BRPOP")
            .arg(&self.queue)
            .arg(BLOCK_SECONDS)
            .query_async(&mut conn)
            .await?;

        match reply {
            Some((_, payload)) => match serde_json::from_str(&payload) {
                Ok(event) => Ok(Some(event)),
                Err(e) => {
                    // mensaje ajeno o corrupto: se descarta logueado
                    warn!("⚠️ Mensaje inválido descartado de la cola: {}", e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }
}
