use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Vehicle;

// Request para crear un vehículo - todos los campos son requeridos.
// La cota superior de `ano` depende del año actual y se valida en el
// servicio (utils::validation::validate_ano).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 7, max = 8))]
    pub placa: String,

    #[validate(length(equal = 17))]
    pub chassi: String,

    #[validate(length(min = 9, max = 11))]
    pub renavam: String,

    #[validate(length(min = 1))]
    pub modelo: String,

    #[validate(length(min = 1))]
    pub marca: String,

    #[validate(range(min = 1900))]
    pub ano: i32,
}

// Request para actualizar un vehículo - patch parcial: los campos ausentes
// no cambian. Un string vacío es un valor (inválido), no "sin cambio".
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 7, max = 8))]
    pub placa: Option<String>,

    #[validate(length(equal = 17))]
    pub chassi: Option<String>,

    #[validate(length(min = 9, max = 11))]
    pub renavam: Option<String>,

    #[validate(length(min = 1))]
    pub modelo: Option<String>,

    #[validate(length(min = 1))]
    pub marca: Option<String>,

    #[validate(range(min = 1900))]
    pub ano: Option<i32>,
}

// Response de vehículo
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: i32,
    pub placa: String,
    pub chassi: String,
    pub renavam: String,
    pub modelo: String,
    pub marca: String,
    pub ano: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            placa: vehicle.placa,
            chassi: vehicle.chassi,
            renavam: vehicle.renavam,
            modelo: vehicle.modelo,
            marca: vehicle.marca,
            ano: vehicle.ano,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}
