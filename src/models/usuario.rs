//! Modelo de Usuario
//!
//! Usuarios del sistema con roles para control de acceso.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Rol del usuario - mapea al ENUM rol_usuario
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "rol_usuario", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RolUsuario {
    Admin,
    Supervisor,
    Operador,
}

impl RolUsuario {
    pub fn as_str(&self) -> &'static str {
        match self {
            RolUsuario::Admin => "ADMIN",
            RolUsuario::Supervisor => "SUPERVISOR",
            RolUsuario::Operador => "OPERADOR",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "ADMIN" => Some(RolUsuario::Admin),
            "SUPERVISOR" => Some(RolUsuario::Supervisor),
            "OPERADOR" => Some(RolUsuario::Operador),
            _ => None,
        }
    }

    /// Los parámetros y catálogos solo los administran supervisores y admins
    pub fn puede_administrar(&self) -> bool {
        matches!(self, RolUsuario::Admin | RolUsuario::Supervisor)
    }
}

/// Usuario principal - mapea exactamente a la tabla usuarios
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Usuario {
    pub id: Uuid,
    pub nombre_usuario: String,
    pub email: String,
    pub password_hash: String,
    pub nombre_completo: Option<String>,
    pub rol: RolUsuario,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rol_parse() {
        assert_eq!(RolUsuario::parse("admin"), Some(RolUsuario::Admin));
        assert_eq!(RolUsuario::parse("SUPERVISOR"), Some(RolUsuario::Supervisor));
        assert_eq!(RolUsuario::parse("invitado"), None);
    }

    #[test]
    fn test_puede_administrar() {
        assert!(RolUsuario::Admin.puede_administrar());
        assert!(RolUsuario::Supervisor.puede_administrar());
        assert!(!RolUsuario::Operador.puede_administrar());
    }
}
