use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{UniqueFieldFilter, VehicleStore};
use crate::models::{NewVehicle, Vehicle};
use crate::utils::errors::AppError;

/// Store de vehículos en memoria, usado por los tests.
///
/// Replica la semántica del repositorio PostgreSQL: ids secuenciales,
/// listado más reciente primero y updated_at refrescado en cada update.
pub struct InMemoryVehicleRepository {
    vehicles: RwLock<Vec<Vehicle>>,
    next_id: AtomicI32,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self {
            vehicles: RwLock::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

fn matches_filter(vehicle: &Vehicle, filter: &UniqueFieldFilter) -> bool {
    filter.placa.as_deref() == Some(vehicle.placa.as_str())
        || filter.chassi.as_deref() == Some(vehicle.chassi.as_str())
        || filter.renavam.as_deref() == Some(vehicle.renavam.as_str())
}

#[async_trait]
impl VehicleStore for InMemoryVehicleRepository {
    async fn insert(&self, input: NewVehicle) -> Result<Vehicle, AppError> {
        let now = Utc::now();
        let vehicle = Vehicle {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            placa: input.placa,
            chassi: input.chassi,
            renavam: input.renavam,
            modelo: input.modelo,
            marca: input.marca,
            ano: input.ano,
            created_at: now,
            updated_at: now,
        };

        self.vehicles.write().await.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Vehicle>, AppError> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles.iter().find(|v| v.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Vehicle>, AppError> {
        let mut vehicles = self.vehicles.read().await.clone();
        // Desempate por id para timestamps idénticos dentro del mismo instante
        vehicles.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(vehicles)
    }

    async fn find_conflicting(
        &self,
        filter: &UniqueFieldFilter,
        exclude_id: Option<i32>,
    ) -> Result<Option<Vehicle>, AppError> {
        if filter.is_empty() {
            return Ok(None);
        }

        let vehicles = self.vehicles.read().await;
        Ok(vehicles
            .iter()
            .find(|v| Some(v.id) != exclude_id && matches_filter(v, filter))
            .cloned())
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        let mut vehicles = self.vehicles.write().await;
        let stored = vehicles
            .iter_mut()
            .find(|v| v.id == vehicle.id)
            .ok_or_else(|| {
                AppError::NotFound(format!("Vehículo con ID {} no encontrado", vehicle.id))
            })?;

        stored.placa = vehicle.placa.clone();
        stored.chassi = vehicle.chassi.clone();
        stored.renavam = vehicle.renavam.clone();
        stored.modelo = vehicle.modelo.clone();
        stored.marca = vehicle.marca.clone();
        stored.ano = vehicle.ano;
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let mut vehicles = self.vehicles.write().await;
        let before = vehicles.len();
        vehicles.retain(|v| v.id != id);

        if vehicles.len() == before {
            return Err(AppError::NotFound(format!(
                "Vehículo con ID {} no encontrado",
                id
            )));
        }

        Ok(())
    }
}
