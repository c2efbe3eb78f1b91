//! Middleware de autenticación JWT
//!
//! Valida el token Bearer, confirma que el usuario siga activo y deja el
//! actor autenticado en las extensions de la request.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::models::usuario::RolUsuario;
use crate::repositories::usuario_repository::UsuarioRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token, JwtConfig};

/// Actor autenticado que se inyecta en las requests protegidas
#[derive(Debug, Clone)]
pub struct ActorAutenticado {
    pub usuario_id: Uuid,
    pub rol: RolUsuario,
}

/// Middleware de autenticación para las rutas protegidas
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &JwtConfig::from(&state.config))?;

    let usuario_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de usuario inválido en el token".to_string()))?;

    // El token puede ser válido con la cuenta ya desactivada
    let usuario = UsuarioRepository::new(state.pool.clone())
        .obtener_por_id(usuario_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    if !usuario.activo {
        return Err(AppError::Unauthorized(
            "la cuenta está desactivada".to_string(),
        ));
    }

    let actor = ActorAutenticado {
        usuario_id: usuario.id,
        rol: usuario.rol,
    };

    request.extensions_mut().insert(actor);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::generate_token;

    #[test]
    fn claims_sub_invalido_no_es_uuid() {
        let config = JwtConfig {
            secret: "secreto-de-prueba".to_string(),
            expiration: 3600,
        };

        let token = generate_token(Uuid::new_v4(), "OPERADOR", &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();
        assert!(Uuid::parse_str(&claims.sub).is_ok());
        assert!(Uuid::parse_str("no-es-un-uuid").is_err());
    }
}
