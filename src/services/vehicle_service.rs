use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::events::{EventPublisher, VehicleEvent};
use crate::models::{NewVehicle, Vehicle};
use crate::repositories::{UniqueFieldFilter, VehicleStore};
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation::validate_ano;

const CONFLICT_MESSAGE: &str = "Ya existe un vehículo con esta placa, chassi o renavam";

/// Servicio de registro de vehículos.
///
/// Hace cumplir la invariante de unicidad (ningún par de registros comparte
/// placa, chassi ni renavam), media todas las mutaciones del store y publica
/// un evento después de cada mutación exitosa. Las dependencias se inyectan
/// por constructor.
pub struct VehicleService {
    store: Arc<dyn VehicleStore>,
    events: Arc<dyn EventPublisher>,
}

impl VehicleService {
    pub fn new(store: Arc<dyn VehicleStore>, events: Arc<dyn EventPublisher>) -> Self {
        Self { store, events }
    }

    /// Crear un vehículo nuevo.
    ///
    /// Valida los campos, verifica que placa, chassi y renavam no colisionen
    /// con ningún registro existente (consulta OR única), inserta y notifica
    /// `vehicle_created` con el registro completo.
    pub async fn create(&self, input: CreateVehicleRequest) -> Result<Vehicle, AppError> {
        input.validate()?;
        validate_ano(input.ano).map_err(|e| validation_error("ano", e))?;

        let filter = UniqueFieldFilter {
            placa: Some(input.placa.clone()),
            chassi: Some(input.chassi.clone()),
            renavam: Some(input.renavam.clone()),
        };

        if self.store.find_conflicting(&filter, None).await?.is_some() {
            return Err(AppError::Conflict(CONFLICT_MESSAGE.to_string()));
        }

        let saved = self
            .store
            .insert(NewVehicle {
                placa: input.placa,
                chassi: input.chassi,
                renavam: input.renavam,
                modelo: input.modelo,
                marca: input.marca,
                ano: input.ano,
            })
            .await?;

        info!("🚗 Vehículo creado - ID: {}", saved.id);
        self.events
            .publish(VehicleEvent::VehicleCreated(saved.clone()))
            .await;

        Ok(saved)
    }

    /// Listar todos los vehículos, más recientes primero
    pub async fn find_all(&self) -> Result<Vec<Vehicle>, AppError> {
        self.store.find_all().await
    }

    /// Buscar un vehículo por id
    pub async fn find_one(&self, id: i32) -> Result<Vehicle, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehículo con ID {} no encontrado", id)))
    }

    /// Actualizar un vehículo con semántica de patch parcial.
    ///
    /// Solo los campos presentes cambian. Si el patch trae alguno de los
    /// campos únicos, la verificación de conflicto se restringe a esos
    /// campos y excluye al propio registro: reenviar la placa propia sin
    /// cambios no es conflicto.
    pub async fn update(&self, id: i32, patch: UpdateVehicleRequest) -> Result<Vehicle, AppError> {
        patch.validate()?;
        if let Some(ano) = patch.ano {
            validate_ano(ano).map_err(|e| validation_error("ano", e))?;
        }

        let mut vehicle = self.find_one(id).await?;

        let filter = UniqueFieldFilter {
            placa: patch.placa.clone(),
            chassi: patch.chassi.clone(),
            renavam: patch.renavam.clone(),
        };

        if !filter.is_empty()
            && self
                .store
                .find_conflicting(&filter, Some(id))
                .await?
                .is_some()
        {
            return Err(AppError::Conflict(CONFLICT_MESSAGE.to_string()));
        }

        if let Some(placa) = patch.placa {
            vehicle.placa = placa;
        }
        if let Some(chassi) = patch.chassi {
            vehicle.chassi = chassi;
        }
        if let Some(renavam) = patch.renavam {
            vehicle.renavam = renavam;
        }
        if let Some(modelo) = patch.modelo {
            vehicle.modelo = modelo;
        }
        if let Some(marca) = patch.marca {
            vehicle.marca = marca;
        }
        if let Some(ano) = patch.ano {
            vehicle.ano = ano;
        }

        let updated = self.store.update(&vehicle).await?;

        info!("🚗 Vehículo actualizado - ID: {}", updated.id);
        self.events
            .publish(VehicleEvent::VehicleUpdated(updated.clone()))
            .await;

        Ok(updated)
    }

    /// Eliminar un vehículo (borrado físico) y notificar con su id
    pub async fn remove(&self, id: i32) -> Result<(), AppError> {
        let vehicle = self.find_one(id).await?;
        self.store.delete(vehicle.id).await?;

        info!("🚗 Vehículo eliminado - ID: {}", vehicle.id);
        self.events
            .publish(VehicleEvent::VehicleDeleted { id: vehicle.id })
            .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryVehicleRepository;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Publicador que registra los eventos recibidos, para asserts
    #[derive(Default)]
    struct RecordingPublisher {
        events: Mutex<Vec<VehicleEvent>>,
    }

    impl RecordingPublisher {
        fn recorded(&self) -> Vec<VehicleEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EventPublisher for RecordingPublisher {
        async fn publish(&self, event: VehicleEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn service() -> (VehicleService, Arc<InMemoryVehicleRepository>, Arc<RecordingPublisher>) {
        let store = Arc::new(InMemoryVehicleRepository::new());
        let events = Arc::new(RecordingPublisher::default());
        let service = VehicleService::new(store.clone(), events.clone());
        (service, store, events)
    }

    fn request(placa: &str, chassi: &str, renavam: &str) -> CreateVehicleRequest {
        CreateVehicleRequest {
            placa: placa.to_string(),
            chassi: chassi.to_string(),
            renavam: renavam.to_string(),
            modelo: "Civic".to_string(),
            marca: "Honda".to_string(),
            ano: 2023,
        }
    }

    async fn row_count(store: &InMemoryVehicleRepository) -> usize {
        store.find_all().await.unwrap().len()
    }

    #[tokio::test]
    async fn test_create_assigns_fresh_ids_and_publishes() {
        let (service, _, events) = service();

        let first = service
            .create(request("ABC1234", "11111111111111111", "111111111"))
            .await
            .unwrap();
        let second = service
            .create(request("DEF5678", "22222222222222222", "222222222"))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.created_at, first.updated_at);

        let recorded = events.recorded();
        assert_eq!(recorded.len(), 2);
        assert!(matches!(&recorded[0], VehicleEvent::VehicleCreated(v) if v.id == 1));
        assert!(matches!(&recorded[1], VehicleEvent::VehicleCreated(v) if v.id == 2));
    }

    #[tokio::test]
    async fn test_create_rejects_collision_on_any_unique_field() {
        let (service, store, events) = service();

        service
            .create(request("ABC1234", "11111111111111111", "111111111"))
            .await
            .unwrap();

        // misma placa
        let result = service
            .create(request("ABC1234", "22222222222222222", "222222222"))
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        // mismo chassi
        let result = service
            .create(request("DEF5678", "11111111111111111", "333333333"))
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        // mismo renavam
        let result = service
            .create(request("GHI9012", "33333333333333333", "111111111"))
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        // sin mutaciones ni eventos adicionales
        assert_eq!(row_count(&store).await, 1);
        assert_eq!(events.recorded().len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_before_store_access() {
        let (service, store, events) = service();

        let short_placa = request("AB12", "11111111111111111", "111111111");
        assert!(matches!(
            service.create(short_placa).await,
            Err(AppError::Validation(_))
        ));

        let bad_chassi = request("ABC1234", "123", "111111111");
        assert!(matches!(
            service.create(bad_chassi).await,
            Err(AppError::Validation(_))
        ));

        let mut old_ano = request("ABC1234", "11111111111111111", "111111111");
        old_ano.ano = 1899;
        assert!(matches!(
            service.create(old_ano).await,
            Err(AppError::Validation(_))
        ));

        let mut future_ano = request("ABC1234", "11111111111111111", "111111111");
        future_ano.ano = chrono::Datelike::year(&chrono::Utc::now()) + 2;
        assert!(matches!(
            service.create(future_ano).await,
            Err(AppError::Validation(_))
        ));

        assert_eq!(row_count(&store).await, 0);
        assert!(events.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_find_all_returns_newest_first() {
        let (service, _, _) = service();

        for i in 1..=3 {
            service
                .create(request(
                    &format!("ABC123{}", i),
                    &format!("{}1111111111111111", i),
                    &format!("{}11111111", i),
                ))
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_millis(2)).await;
        }

        let all = service.find_all().await.unwrap();
        assert_eq!(all.len(), 3);
        let ids: Vec<i32> = all.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_find_one_missing_is_not_found() {
        let (service, _, _) = service();
        assert!(matches!(
            service.find_one(42).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_accepts_own_placa() {
        let (service, _, _) = service();

        let created = service
            .create(request("ABC1234", "11111111111111111", "111111111"))
            .await
            .unwrap();

        // reenviar la placa propia sin cambios no es conflicto
        let patch = UpdateVehicleRequest {
            placa: Some("ABC1234".to_string()),
            ..Default::default()
        };
        let updated = service.update(created.id, patch).await.unwrap();
        assert_eq!(updated.placa, "ABC1234");
    }

    #[tokio::test]
    async fn test_update_rejects_placa_of_another_vehicle() {
        let (service, store, _) = service();

        let first = service
            .create(request("ABC1234", "11111111111111111", "111111111"))
            .await
            .unwrap();
        let second = service
            .create(request("DEF5678", "22222222222222222", "222222222"))
            .await
            .unwrap();

        let patch = UpdateVehicleRequest {
            placa: Some(first.placa.clone()),
            ..Default::default()
        };
        assert!(matches!(
            service.update(second.id, patch).await,
            Err(AppError::Conflict(_))
        ));

        // ambos registros quedan intactos
        let stored_first = store.find_by_id(first.id).await.unwrap().unwrap();
        let stored_second = store.find_by_id(second.id).await.unwrap().unwrap();
        assert_eq!(stored_first.placa, "ABC1234");
        assert_eq!(stored_second.placa, "DEF5678");
        assert_eq!(stored_second.updated_at, second.updated_at);
    }

    #[tokio::test]
    async fn test_update_partial_patch_refreshes_updated_at() {
        let (service, _, events) = service();

        let created = service
            .create(request("ABC1234", "11111111111111111", "111111111"))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(2)).await;

        let patch = UpdateVehicleRequest {
            ano: Some(2024),
            ..Default::default()
        };
        let updated = service.update(created.id, patch).await.unwrap();

        assert_eq!(updated.ano, 2024);
        assert_eq!(updated.placa, created.placa);
        assert_eq!(updated.modelo, created.modelo);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);

        let recorded = events.recorded();
        assert!(matches!(
            recorded.last(),
            Some(VehicleEvent::VehicleUpdated(v)) if v.ano == 2024
        ));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (service, _, _) = service();
        let patch = UpdateVehicleRequest {
            ano: Some(2024),
            ..Default::default()
        };
        assert!(matches!(
            service.update(42, patch).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_then_find_one_is_not_found() {
        let (service, store, events) = service();

        let created = service
            .create(request("ABC1234", "11111111111111111", "111111111"))
            .await
            .unwrap();

        service.remove(created.id).await.unwrap();

        assert!(matches!(
            service.find_one(created.id).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(row_count(&store).await, 0);
        assert!(matches!(
            events.recorded().last(),
            Some(VehicleEvent::VehicleDeleted { id }) if *id == created.id
        ));
    }

    #[tokio::test]
    async fn test_remove_missing_has_no_side_effect() {
        let (service, store, events) = service();

        service
            .create(request("ABC1234", "11111111111111111", "111111111"))
            .await
            .unwrap();

        assert!(matches!(
            service.remove(42).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(row_count(&store).await, 1);
        // solo el evento del create
        assert_eq!(events.recorded().len(), 1);
    }

    #[tokio::test]
    async fn test_full_lifecycle_scenario() {
        let (service, _, _) = service();

        let created = service
            .create(request("ABC1234", "12345678901234567", "12345678901"))
            .await
            .unwrap();
        assert_eq!(created.id, 1);

        // misma placa, chassi y renavam distintos
        let conflict = service
            .create(request("ABC1234", "76543210987654321", "10987654321"))
            .await;
        assert!(matches!(conflict, Err(AppError::Conflict(_))));

        tokio::time::sleep(Duration::from_millis(2)).await;

        let patch = UpdateVehicleRequest {
            ano: Some(2024),
            ..Default::default()
        };
        let updated = service.update(1, patch).await.unwrap();
        assert_eq!(updated.placa, "ABC1234");
        assert_eq!(updated.ano, 2024);
        assert!(updated.updated_at > created.updated_at);

        service.remove(1).await.unwrap();
        assert!(matches!(service.find_one(1).await, Err(AppError::NotFound(_))));
    }
}
