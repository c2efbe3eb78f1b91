use axum::{
    extract::State,
    http::{header, HeaderMap},
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegistrarUsuarioRequest, UsuarioResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::ActorAutenticado;
use crate::models::usuario::RolUsuario;
use crate::repositories::UsuarioRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token, JwtConfig};
use uuid::Uuid;

/// Rutas públicas: login y registro. El registro valida el token por su
/// cuenta porque debe aceptar la primera cuenta sin ninguno.
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/registro", post(registro))
}

/// Rutas de autenticación que sí pasan por el middleware
pub fn create_auth_me_router() -> Router<AppState> {
    Router::new().route("/me", get(me))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone(), JwtConfig::from(&state.config));
    let response = controller.login(request).await?;
    Ok(Json(response))
}

async fn registro(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RegistrarUsuarioRequest>,
) -> Result<Json<ApiResponse<UsuarioResponse>>, AppError> {
    let actor_rol = rol_del_token(&state, &headers).await?;
    let controller = AuthController::new(state.pool.clone(), JwtConfig::from(&state.config));
    let response = controller.registrar(request, actor_rol).await?;
    Ok(Json(response))
}

async fn me(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorAutenticado>,
) -> Result<Json<UsuarioResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone(), JwtConfig::from(&state.config));
    let response = controller.me(actor.usuario_id).await?;
    Ok(Json(response))
}

/// Rol del actor si la request trae un token válido de un usuario activo.
/// Sin header devuelve None; un token presente pero inválido es error.
async fn rol_del_token(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<RolUsuario>, AppError> {
    let auth_header = match headers.get(header::AUTHORIZATION) {
        Some(value) => value
            .to_str()
            .map_err(|_| AppError::Unauthorized("Header Authorization inválido".to_string()))?,
        None => return Ok(None),
    };

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &JwtConfig::from(&state.config))?;

    let usuario_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de usuario inválido en el token".to_string()))?;

    let usuario = UsuarioRepository::new(state.pool.clone())
        .obtener_por_id(usuario_id)
        .await?
        .filter(|u| u.activo)
        .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    Ok(Some(usuario.rol))
}
