//! Registro de vehículos
//!
//! Backend REST para el registro de vehículos: persistencia en PostgreSQL,
//! verificación de unicidad (placa, chassi, renavam) en la capa de servicio
//! y publicación de eventos de cambio hacia el worker vía Redis.

pub mod config;
pub mod database;
pub mod dto;
pub mod events;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
pub mod worker;
