//! Repositorios de persistencia
//!
//! El servicio habla con el store a través del trait [`VehicleStore`];
//! la implementación de producción es PostgreSQL vía SQLx y los tests
//! usan la variante en memoria.

pub mod memory;
pub mod vehicle_repository;

pub use memory::InMemoryVehicleRepository;
pub use vehicle_repository::PgVehicleRepository;

use async_trait::async_trait;

use crate::models::{NewVehicle, Vehicle};
use crate::utils::errors::AppError;

/// Campos únicos a consultar en la verificación de conflictos.
///
/// Los campos en `None` no participan de la consulta; los presentes se
/// combinan con OR (basta que uno colisione con otro registro).
#[derive(Debug, Clone, Default)]
pub struct UniqueFieldFilter {
    pub placa: Option<String>,
    pub chassi: Option<String>,
    pub renavam: Option<String>,
}

impl UniqueFieldFilter {
    pub fn is_empty(&self) -> bool {
        self.placa.is_none() && self.chassi.is_none() && self.renavam.is_none()
    }
}

/// Operaciones de persistencia sobre la tabla vehicles
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Insertar un vehículo nuevo con id y timestamps generados
    async fn insert(&self, input: NewVehicle) -> Result<Vehicle, AppError>;

    /// Buscar un vehículo por id
    async fn find_by_id(&self, id: i32) -> Result<Option<Vehicle>, AppError>;

    /// Listar todos los vehículos, más recientes primero (created_at DESC)
    async fn find_all(&self) -> Result<Vec<Vehicle>, AppError>;

    /// Buscar un registro que colisione con alguno de los campos del filtro.
    ///
    /// `exclude_id` excluye de la comparación al registro que se está
    /// actualizando; un registro no entra en conflicto consigo mismo.
    async fn find_conflicting(
        &self,
        filter: &UniqueFieldFilter,
        exclude_id: Option<i32>,
    ) -> Result<Option<Vehicle>, AppError>;

    /// Persistir los campos mutables de un vehículo y refrescar updated_at
    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError>;

    /// Eliminar un vehículo por id (borrado físico)
    async fn delete(&self, id: i32) -> Result<(), AppError>;
}
