//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle que mapea exactamente a la tabla
//! vehicles, con primary key 'id' generada por la base de datos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Vehicle principal - mapea exactamente a la tabla vehicles
///
/// La representación JSON (API y eventos) usa camelCase para los
/// timestamps: `createdAt` / `updatedAt`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
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

/// Valores candidatos para insertar un vehículo nuevo
///
/// El id y los timestamps los genera el store.
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub placa: String,
    pub chassi: String,
    pub renavam: String,
    pub modelo: String,
    pub marca: String,
    pub ano: i32,
}
