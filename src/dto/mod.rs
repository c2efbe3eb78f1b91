//! DTOs de la API
//!
//! Requests y responses HTTP, separados de los modelos de persistencia.

use serde::Serialize;

pub mod alerta_dto;
pub mod auth_dto;
pub mod catalogo_dto;
pub mod evento_dto;
pub mod modelo_dto;
pub mod neumatico_dto;
pub mod parametro_dto;
pub mod vehiculo_dto;

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            message: Some(message),
            data: None,
        }
    }
}
