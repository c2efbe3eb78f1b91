use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::usuario::{RolUsuario, Usuario};

// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub nombre_usuario: String,
    pub password: String,
}

// Login response: el token y el perfil del usuario autenticado
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub usuario: UsuarioResponse,
}

// Request para registrar un usuario
#[derive(Debug, Deserialize, Validate)]
pub struct RegistrarUsuarioRequest {
    #[validate(length(min = 3, max = 50))]
    pub nombre_usuario: String,

    #[validate(custom = "crate::utils::validation::validate_email")]
    pub email: String,

    #[validate(length(min = 8, max = 100))]
    pub password: String,

    #[validate(length(min = 3, max = 255))]
    pub nombre_completo: Option<String>,

    pub rol: Option<RolUsuario>,
}

// Response de usuario (sin password_hash)
#[derive(Debug, Serialize)]
pub struct UsuarioResponse {
    pub id: Uuid,
    pub nombre_usuario: String,
    pub email: String,
    pub nombre_completo: Option<String>,
    pub rol: RolUsuario,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Usuario> for UsuarioResponse {
    fn from(usuario: Usuario) -> Self {
        Self {
            id: usuario.id,
            nombre_usuario: usuario.nombre_usuario,
            email: usuario.email,
            nombre_completo: usuario.nombre_completo,
            rol: usuario.rol,
            activo: usuario.activo,
            created_at: usuario.created_at,
        }
    }
}
