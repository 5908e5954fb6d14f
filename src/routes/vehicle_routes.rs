use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/", get(list_vehicles))
        .route("/:id", get(get_vehicle))
        .route("/:id", patch(update_vehicle))
        .route("/:id", delete(delete_vehicle))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<VehicleResponse>), AppError> {
    let service = state.vehicle_service();
    let vehicle = service.create(request).await?;
    Ok((StatusCode::CREATED, Json(vehicle.into())))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let service = state.vehicle_service();
    let vehicles = service.find_all().await?;
    Ok(Json(vehicles.into_iter().map(Into::into).collect()))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<VehicleResponse>, AppError> {
    let service = state.vehicle_service();
    let vehicle = service.find_one(id).await?;
    Ok(Json(vehicle.into()))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<VehicleResponse>, AppError> {
    let service = state.vehicle_service();
    let vehicle = service.update(id, request).await?;
    Ok(Json(vehicle.into()))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let service = state.vehicle_service();
    service.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
