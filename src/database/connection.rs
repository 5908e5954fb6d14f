//! Conexión a PostgreSQL
//!
//! Este módulo crea el pool de conexiones y asegura el schema al arranque.

use anyhow::Result;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Schema de la tabla vehicles. Además de la verificación del servicio, la
/// tabla declara UNIQUE sobre placa, chassi y renavam: dos creates
/// concurrentes con la misma placa no pueden confirmar ambos.
const VEHICLES_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS vehicles (
    id SERIAL PRIMARY KEY,
    placa VARCHAR(8) NOT NULL UNIQUE,
    chassi VARCHAR(17) NOT NULL UNIQUE,
    renavam VARCHAR(11) NOT NULL UNIQUE,
    modelo TEXT NOT NULL,
    marca TEXT NOT NULL,
    ano INTEGER NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// Conexión a la base de datos con el schema asegurado
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Conectar usando una configuración explícita
    pub async fn new(config: DatabaseConfig) -> Result<Self> {
        let pool = config.create_pool().await?;
        ensure_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// Conectar usando DATABASE_URL del entorno
    pub async fn new_default() -> Result<Self> {
        Self::new(DatabaseConfig::default()).await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Crear la tabla vehicles si no existe
async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(VEHICLES_SCHEMA).execute(pool).await?;
    Ok(())
}
