use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::almacen_controller::AlmacenController;
use crate::dto::catalogo_dto::CrearAlmacenRequest;
use crate::dto::ApiResponse;
use crate::models::catalogo::Almacen;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_almacen_router() -> Router<AppState> {
    Router::new()
        .route("/", post(crear_almacen))
        .route("/", get(listar_almacenes))
        .route("/:id", get(obtener_almacen))
}

async fn crear_almacen(
    State(state): State<AppState>,
    Json(request): Json<CrearAlmacenRequest>,
) -> Result<Json<ApiResponse<Almacen>>, AppError> {
    let controller = AlmacenController::new(state.pool.clone());
    let response = controller.crear(request).await?;
    Ok(Json(response))
}

async fn listar_almacenes(State(state): State<AppState>) -> Result<Json<Vec<Almacen>>, AppError> {
    let controller = AlmacenController::new(state.pool.clone());
    let response = controller.listar().await?;
    Ok(Json(response))
}

async fn obtener_almacen(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Almacen>, AppError> {
    let controller = AlmacenController::new(state.pool.clone());
    let response = controller.obtener(id).await?;
    Ok(Json(response))
}
