use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::catalogo_controller::CatalogoController;
use crate::dto::catalogo_dto::{CrearFabricanteRequest, CrearMotivoDesechoRequest};
use crate::dto::ApiResponse;
use crate::models::catalogo::{Fabricante, MotivoDesecho};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_fabricante_router() -> Router<AppState> {
    Router::new()
        .route("/", post(crear_fabricante))
        .route("/", get(listar_fabricantes))
}

pub fn create_motivo_desecho_router() -> Router<AppState> {
    Router::new()
        .route("/", post(crear_motivo_desecho))
        .route("/", get(listar_motivos_desecho))
}

async fn crear_fabricante(
    State(state): State<AppState>,
    Json(request): Json<CrearFabricanteRequest>,
) -> Result<Json<ApiResponse<Fabricante>>, AppError> {
    let controller = CatalogoController::new(state.pool.clone());
    let response = controller.crear_fabricante(request).await?;
    Ok(Json(response))
}

async fn listar_fabricantes(
    State(state): State<AppState>,
) -> Result<Json<Vec<Fabricante>>, AppError> {
    let controller = CatalogoController::new(state.pool.clone());
    let response = controller.listar_fabricantes().await?;
    Ok(Json(response))
}

async fn crear_motivo_desecho(
    State(state): State<AppState>,
    Json(request): Json<CrearMotivoDesechoRequest>,
) -> Result<Json<ApiResponse<MotivoDesecho>>, AppError> {
    let controller = CatalogoController::new(state.pool.clone());
    let response = controller.crear_motivo_desecho(request).await?;
    Ok(Json(response))
}

async fn listar_motivos_desecho(
    State(state): State<AppState>,
) -> Result<Json<Vec<MotivoDesecho>>, AppError> {
    let controller = CatalogoController::new(state.pool.clone());
    let response = controller.listar_motivos_desecho().await?;
    Ok(Json(response))
}
