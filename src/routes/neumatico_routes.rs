use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::neumatico_controller::NeumaticoController;
use crate::dto::neumatico_dto::{FiltrosNeumaticos, NeumaticoResponse};
use crate::models::alerta::Alerta;
use crate::models::evento::EventoNeumatico;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_neumatico_router() -> Router<AppState> {
    Router::new()
        .route("/", get(buscar_neumaticos))
        .route("/:id", get(obtener_neumatico))
        .route("/:id/eventos", get(historial_neumatico))
        .route("/:id/alertas", get(alertas_neumatico))
}

async fn buscar_neumaticos(
    State(state): State<AppState>,
    Query(filtros): Query<FiltrosNeumaticos>,
) -> Result<Json<Vec<NeumaticoResponse>>, AppError> {
    let controller = NeumaticoController::new(state.pool.clone());
    let response = controller.buscar(filtros).await?;
    Ok(Json(response))
}

async fn obtener_neumatico(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NeumaticoResponse>, AppError> {
    let controller = NeumaticoController::new(state.pool.clone());
    let response = controller.obtener(id).await?;
    Ok(Json(response))
}

async fn historial_neumatico(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<EventoNeumatico>>, AppError> {
    let controller = NeumaticoController::new(state.pool.clone());
    let response = controller.historial(id).await?;
    Ok(Json(response))
}

async fn alertas_neumatico(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Alerta>>, AppError> {
    let controller = NeumaticoController::new(state.pool.clone());
    let response = controller.alertas(id).await?;
    Ok(Json(response))
}
