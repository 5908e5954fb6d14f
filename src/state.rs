//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::EnvironmentConfig;
use crate::events::EventPublisher;
use crate::repositories::VehicleStore;
use crate::services::VehicleService;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VehicleStore>,
    pub events: Arc<dyn EventPublisher>,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn VehicleStore>,
        events: Arc<dyn EventPublisher>,
        config: EnvironmentConfig,
    ) -> Self {
        Self {
            store,
            events,
            config,
        }
    }

    /// Construir el servicio de vehículos sobre las dependencias del estado
    pub fn vehicle_service(&self) -> VehicleService {
        VehicleService::new(self.store.clone(), self.events.clone())
    }
}
