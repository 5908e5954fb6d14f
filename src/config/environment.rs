//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Todas las variables
//! tienen un default documentado para levantar el sistema sin configurar
//! nada:
//!
//! - `ENVIRONMENT` (default `development`)
//! - `HOST` (default `0.0.0.0`)
//! - `PORT` (default `3000`)
//! - `REDIS_URL` (default `redis://localhost:6379`)
//! - `VEHICLE_QUEUE` (default `vehicle_queue`)

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub redis_url: String,
    pub vehicle_queue: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            vehicle_queue: env::var("VEHICLE_QUEUE").unwrap_or_else(|_| "vehicle_queue".to_string()),
        }
    }
}

impl EnvironmentConfig {
    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
