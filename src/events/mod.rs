//! Eventos de cambio de vehículos
//!
//! El servicio publica un evento por cada mutación exitosa; el worker los
//! consume desde la cola. La publicación es fire-and-forget: un intento de
//! entrega, sin reintentos, y los errores de transporte se loguean sin
//! afectar el resultado de la operación CRUD.

pub mod redis_publisher;

pub use redis_publisher::RedisEventPublisher;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::Vehicle;

/// Evento publicado en la cola al worker.
///
/// Formato en la cola: `{"event": "vehicle_created", "data": {...}}` con el
/// registro completo para create/update y solo `{"id": N}` para delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum VehicleEvent {
    VehicleCreated(Vehicle),
    VehicleUpdated(Vehicle),
    VehicleDeleted { id: i32 },
}

impl VehicleEvent {
    /// Nombre del evento tal como viaja por la cola
    pub fn name(&self) -> &'static str {
        match self {
            VehicleEvent::VehicleCreated(_) => "vehicle_created",
            VehicleEvent::VehicleUpdated(_) => "vehicle_updated",
            VehicleEvent::VehicleDeleted { .. } => "vehicle_deleted",
        }
    }

    /// Id del vehículo afectado
    pub fn vehicle_id(&self) -> i32 {
        match self {
            VehicleEvent::VehicleCreated(v) | VehicleEvent::VehicleUpdated(v) => v.id,
            VehicleEvent::VehicleDeleted { id } => *id,
        }
    }
}

/// Publicador de eventos hacia el worker.
///
/// Contrato fire-and-forget: la implementación intenta la entrega una vez y
/// se traga (logueando) cualquier error de transporte, por eso `publish` no
/// devuelve `Result`. La publicación ocurre siempre después del commit.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: VehicleEvent);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn vehicle() -> Vehicle {
        let now = Utc::now();
        Vehicle {
            id: 7,
            placa: "ABC1234".to_string(),
            chassi: "12345678901234567".to_string(),
            renavam: "12345678901".to_string(),
            modelo: "Civic".to_string(),
            marca: "Honda".to_string(),
            ano: 2023,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_created_event_wire_format() {
        let json = serde_json::to_value(VehicleEvent::VehicleCreated(vehicle())).unwrap();
        assert_eq!(json["event"], "vehicle_created");
        assert_eq!(json["data"]["id"], 7);
        assert_eq!(json["data"]["placa"], "ABC1234");
        assert!(json["data"]["createdAt"].is_string());
    }

    #[test]
    fn test_deleted_event_carries_only_id() {
        let json = serde_json::to_value(VehicleEvent::VehicleDeleted { id: 3 }).unwrap();
        assert_eq!(json["event"], "vehicle_deleted");
        assert_eq!(json["data"], serde_json::json!({ "id": 3 }));
    }

    #[test]
    fn test_event_roundtrip() {
        let payload = serde_json::to_string(&VehicleEvent::VehicleUpdated(vehicle())).unwrap();
        let decoded: VehicleEvent = serde_json::from_str(&payload).unwrap();
        assert_eq!(decoded.name(), "vehicle_updated");
        assert_eq!(decoded.vehicle_id(), 7);
    }
}
