use std::time::Duration;

use tokio::time::sleep;
use tracing::info;

use crate::events::VehicleEvent;

/// Retardo fijo del paso de procesamiento simulado
const PROCESSING_DELAY: Duration = Duration::from_secs(1);

/// Procesador de eventos de vehículos.
///
/// Sin estado: registra la recepción, espera el retardo fijo y loguea la
/// finalización. No garantiza idempotencia, orden ni reintentos.
pub struct VehicleProcessor {
    processing_delay: Duration,
}

impl VehicleProcessor {
    pub fn new() -> Self {
        Self::with_delay(PROCESSING_DELAY)
    }

    pub fn with_delay(processing_delay: Duration) -> Self {
        Self { processing_delay }
    }

    /// Procesar un evento recibido de la cola
    pub async fn process(&self, event: VehicleEvent) {
        match &event {
            VehicleEvent::VehicleCreated(vehicle) => {
                info!(
                    "📥 Procesando evento {} - Nuevo vehículo creado (ID: {})",
                    event.name(),
                    vehicle.id
                );
            }
            VehicleEvent::VehicleUpdated(vehicle) => {
                info!(
                    "📥 Procesando evento {} - Vehículo actualizado (ID: {})",
                    event.name(),
                    vehicle.id
                );
            }
            VehicleEvent::VehicleDeleted { id } => {
                info!(
                    "📥 Procesando evento {} - Vehículo eliminado (ID: {})",
                    event.name(),
                    id
                );
            }
        }

        self.simulate_processing(&event).await;
    }

    /// Simular el procesamiento asíncrono del evento
    async fn simulate_processing(&self, event: &VehicleEvent) {
        sleep(self.processing_delay).await;

        let action = match event {
            VehicleEvent::VehicleCreated(_) => "CREATE",
            VehicleEvent::VehicleUpdated(_) => "UPDATE",
            VehicleEvent::VehicleDeleted { .. } => "DELETE",
        };

        info!(
            "✅ Procesamiento completado - Acción: {} | Vehículo ID: {}",
            action,
            event.vehicle_id()
        );
    }
}

impl Default for VehicleProcessor {
    fn default() -> Self {
        Self::new()
    }
}
