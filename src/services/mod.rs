//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación. El servicio
//! de vehículos es el único mediador de mutaciones sobre el store.

pub mod vehicle_service;

pub use vehicle_service::VehicleService;
