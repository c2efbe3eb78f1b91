use axum::{
    extract::{Query, State},
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::parametro_controller::ParametroController;
use crate::dto::parametro_dto::{CrearParametroRequest, FiltrosParametros};
use crate::dto::ApiResponse;
use crate::middleware::auth::ActorAutenticado;
use crate::models::parametro::Parametro;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_parametro_router() -> Router<AppState> {
    Router::new()
        .route("/", post(crear_parametro))
        .route("/", get(listar_parametros))
}

async fn crear_parametro(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorAutenticado>,
    Json(request): Json<CrearParametroRequest>,
) -> Result<Json<ApiResponse<Parametro>>, AppError> {
    let controller = ParametroController::new(state.pool.clone());
    let response = controller.crear(request, actor.rol).await?;
    Ok(Json(response))
}

async fn listar_parametros(
    State(state): State<AppState>,
    Query(filtros): Query<FiltrosParametros>,
) -> Result<Json<Vec<Parametro>>, AppError> {
    let controller = ParametroController::new(state.pool.clone());
    let response = controller.listar(filtros).await?;
    Ok(Json(response))
}
