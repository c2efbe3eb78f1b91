use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::proveedor_controller::ProveedorController;
use crate::dto::catalogo_dto::CrearProveedorRequest;
use crate::dto::ApiResponse;
use crate::models::catalogo::Proveedor;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_proveedor_router() -> Router<AppState> {
    Router::new()
        .route("/", post(crear_proveedor))
        .route("/", get(listar_proveedores))
        .route("/:id", get(obtener_proveedor))
}

async fn crear_proveedor(
    State(state): State<AppState>,
    Json(request): Json<CrearProveedorRequest>,
) -> Result<Json<ApiResponse<Proveedor>>, AppError> {
    let controller = ProveedorController::new(state.pool.clone());
    let response = controller.crear(request).await?;
    Ok(Json(response))
}

async fn listar_proveedores(
    State(state): State<AppState>,
) -> Result<Json<Vec<Proveedor>>, AppError> {
    let controller = ProveedorController::new(state.pool.clone());
    let response = controller.listar().await?;
    Ok(Json(response))
}

async fn obtener_proveedor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Proveedor>, AppError> {
    let controller = ProveedorController::new(state.pool.clone());
    let response = controller.obtener(id).await?;
    Ok(Json(response))
}
