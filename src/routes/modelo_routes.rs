use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::modelo_controller::ModeloController;
use crate::dto::modelo_dto::{ActualizarModeloRequest, CrearModeloRequest};
use crate::dto::ApiResponse;
use crate::models::modelo_neumatico::ModeloNeumatico;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_modelo_router() -> Router<AppState> {
    Router::new()
        .route("/", post(crear_modelo))
        .route("/", get(listar_modelos))
        .route("/:id", get(obtener_modelo))
        .route("/:id", put(actualizar_modelo))
}

async fn crear_modelo(
    State(state): State<AppState>,
    Json(request): Json<CrearModeloRequest>,
) -> Result<Json<ApiResponse<ModeloNeumatico>>, AppError> {
    let controller = ModeloController::new(state.pool.clone());
    let response = controller.crear(request).await?;
    Ok(Json(response))
}

async fn listar_modelos(
    State(state): State<AppState>,
) -> Result<Json<Vec<ModeloNeumatico>>, AppError> {
    let controller = ModeloController::new(state.pool.clone());
    let response = controller.listar().await?;
    Ok(Json(response))
}

async fn obtener_modelo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ModeloNeumatico>, AppError> {
    let controller = ModeloController::new(state.pool.clone());
    let response = controller.obtener(id).await?;
    Ok(Json(response))
}

async fn actualizar_modelo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ActualizarModeloRequest>,
) -> Result<Json<ApiResponse<ModeloNeumatico>>, AppError> {
    let controller = ModeloController::new(state.pool.clone());
    let response = controller.actualizar(id, request).await?;
    Ok(Json(response))
}
