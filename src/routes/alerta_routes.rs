use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::alerta_controller::AlertaController;
use crate::dto::alerta_dto::{FiltrosAlertas, ResolverAlertaRequest};
use crate::dto::ApiResponse;
use crate::middleware::auth::ActorAutenticado;
use crate::models::alerta::Alerta;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_alerta_router() -> Router<AppState> {
    Router::new()
        .route("/", get(buscar_alertas))
        .route("/:id", get(obtener_alerta))
        .route("/:id/resolver", post(resolver_alerta))
}

async fn buscar_alertas(
    State(state): State<AppState>,
    Query(filtros): Query<FiltrosAlertas>,
) -> Result<Json<Vec<Alerta>>, AppError> {
    let controller = AlertaController::new(state.pool.clone());
    let response = controller.buscar(filtros).await?;
    Ok(Json(response))
}

async fn obtener_alerta(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Alerta>, AppError> {
    let controller = AlertaController::new(state.pool.clone());
    let response = controller.obtener(id).await?;
    Ok(Json(response))
}

async fn resolver_alerta(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(actor): Extension<ActorAutenticado>,
    Json(request): Json<ResolverAlertaRequest>,
) -> Result<Json<ApiResponse<Alerta>>, AppError> {
    let controller = AlertaController::new(state.pool.clone());
    let response = controller.resolver(id, request, actor.usuario_id).await?;
    Ok(Json(response))
}
