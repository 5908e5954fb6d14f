use async_trait::async_trait;
use sqlx::PgPool;

use super::{UniqueFieldFilter, VehicleStore};
use crate::models::{NewVehicle, Vehicle};
use crate::utils::errors::AppError;

const UNIQUE_VIOLATION: &str = "23505";

/// Repositorio de vehículos sobre PostgreSQL
pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Traducir la violación de UNIQUE al mismo conflicto que produce la
/// verificación previa del servicio.
fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return AppError::Conflict(
                "Ya existe un vehículo con esta placa, chassi o renavam".to_string(),
            );
        }
    }
    AppError::Database(e)
}

#[async_trait]
impl VehicleStore for PgVehicleRepository {
    async fn insert(&self, input: NewVehicle) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (placa, chassi, renavam, modelo, marca, ano)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(input.placa)
        .bind(input.chassi)
        .bind(input.renavam)
        .bind(input.modelo)
        .bind(input.marca)
        .bind(input.ano)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(vehicle)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn find_all(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

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

        // Consulta OR sobre los campos presentes del filtro, con los
        // placeholders numerados según el orden de bind.
        let mut values: Vec<&str> = Vec::new();
        let mut conditions: Vec<String> = Vec::new();

        if let Some(placa) = &filter.placa {
            values.push(placa);
            conditions.push(format!("placa = ${}", values.len()));
        }
        if let Some(chassi) = &filter.chassi {
            values.push(chassi);
            conditions.push(format!("chassi = ${}", values.len()));
        }
        if let Some(renavam) = &filter.renavam {
            values.push(renavam);
            conditions.push(format!("renavam = ${}", values.len()));
        }

        let mut sql = format!(
            "SELECT * FROM vehicles WHERE ({})",
            conditions.join(" OR ")
        );
        if exclude_id.is_some() {
            sql.push_str(&format!(" AND id <> ${}", values.len() + 1));
        }
        sql.push_str(" LIMIT 1");

        let mut query = sqlx::query_as::<_, Vehicle>(&sql);
        for value in values {
            query = query.bind(value);
        }
        if let Some(id) = exclude_id {
            query = query.bind(id);
        }

        let vehicle = query.fetch_optional(&self.pool).await?;
        Ok(vehicle)
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        let updated = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET placa = $2, chassi = $3, renavam = $4, modelo = $5, marca = $6, ano = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.placa)
        .bind(&vehicle.chassi)
        .bind(&vehicle.renavam)
        .bind(&vehicle.modelo)
        .bind(&vehicle.marca)
        .bind(vehicle.ano)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Vehículo con ID {} no encontrado",
                id
            )));
        }

        Ok(())
    }
}
