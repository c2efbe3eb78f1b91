use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehiculo_controller::VehiculoController;
use crate::dto::neumatico_dto::NeumaticoResponse;
use crate::dto::vehiculo_dto::{ActualizarVehiculoRequest, CrearVehiculoRequest};
use crate::dto::ApiResponse;
use crate::models::vehiculo::{Posicion, TipoVehiculo, Vehiculo};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehiculo_router() -> Router<AppState> {
    Router::new()
        .route("/", post(crear_vehiculo))
        .route("/", get(listar_vehiculos))
        .route("/tipos", get(listar_tipos_vehiculo))
        .route("/:id", get(obtener_vehiculo))
        .route("/:id", put(actualizar_vehiculo))
        .route("/:id/posiciones", get(posiciones_vehiculo))
        .route("/:id/neumaticos", get(neumaticos_vehiculo))
}

async fn crear_vehiculo(
    State(state): State<AppState>,
    Json(request): Json<CrearVehiculoRequest>,
) -> Result<Json<ApiResponse<Vehiculo>>, AppError> {
    let controller = VehiculoController::new(state.pool.clone());
    let response = controller.crear(request).await?;
    Ok(Json(response))
}

async fn listar_vehiculos(State(state): State<AppState>) -> Result<Json<Vec<Vehiculo>>, AppError> {
    let controller = VehiculoController::new(state.pool.clone());
    let response = controller.listar().await?;
    Ok(Json(response))
}

async fn listar_tipos_vehiculo(
    State(state): State<AppState>,
) -> Result<Json<Vec<TipoVehiculo>>, AppError> {
    let controller = VehiculoController::new(state.pool.clone());
    let response = controller.listar_tipos().await?;
    Ok(Json(response))
}

async fn obtener_vehiculo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vehiculo>, AppError> {
    let controller = VehiculoController::new(state.pool.clone());
    let response = controller.obtener(id).await?;
    Ok(Json(response))
}

async fn actualizar_vehiculo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ActualizarVehiculoRequest>,
) -> Result<Json<ApiResponse<Vehiculo>>, AppError> {
    let controller = VehiculoController::new(state.pool.clone());
    let response = controller.actualizar(id, request).await?;
    Ok(Json(response))
}

async fn posiciones_vehiculo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Posicion>>, AppError> {
    let controller = VehiculoController::new(state.pool.clone());
    let response = controller.posiciones(id).await?;
    Ok(Json(response))
}

async fn neumaticos_vehiculo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<NeumaticoResponse>>, AppError> {
    let controller = VehiculoController::new(state.pool.clone());
    let response = controller.neumaticos(id).await?;
    Ok(Json(response))
}
