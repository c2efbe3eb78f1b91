use axum::{
    extract::{Query, State},
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::evento_controller::EventoController;
use crate::dto::evento_dto::{FiltrosEventos, RegistrarEventoRequest, RegistrarEventoResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::ActorAutenticado;
use crate::models::evento::EventoNeumatico;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_evento_router() -> Router<AppState> {
    Router::new()
        .route("/", post(registrar_evento))
        .route("/", get(listar_eventos))
}

async fn registrar_evento(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorAutenticado>,
    Json(request): Json<RegistrarEventoRequest>,
) -> Result<Json<ApiResponse<RegistrarEventoResponse>>, AppError> {
    let controller = EventoController::new(
        state.pool.clone(),
        state.config_alertas.clone(),
        state.notificador.clone(),
    );
    let response = controller.registrar(request, actor.usuario_id).await?;
    Ok(Json(response))
}

async fn listar_eventos(
    State(state): State<AppState>,
    Query(filtros): Query<FiltrosEventos>,
) -> Result<Json<Vec<EventoNeumatico>>, AppError> {
    let controller = EventoController::new(
        state.pool.clone(),
        state.config_alertas.clone(),
        state.notificador.clone(),
    );
    let response = controller.listar(filtros).await?;
    Ok(Json(response))
}
