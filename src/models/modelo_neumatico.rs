//! Modelo comercial de neumático
//!
//! Un modelo (fabricante + nombre + medida) define la profundidad original,
//! la presión recomendada y la política de reencauche de sus neumáticos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Modelo de neumático - mapea exactamente a la tabla modelos_neumatico
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ModeloNeumatico {
    pub id: Uuid,
    pub fabricante_id: Uuid,
    pub nombre: String,
    pub medida: String,
    pub profundidad_original_mm: f64,
    pub presion_recomendada_psi: Option<f64>,
    pub permite_reencauche: bool,
    pub reencauches_maximos: i32,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
}

impl ModeloNeumatico {
    /// El límite de reencauches aplica solo si el modelo permite reencauchar
    pub fn limite_reencauches(&self) -> Option<i32> {
        if self.permite_reencauche {
            Some(self.reencauches_maximos)
        } else {
            None
        }
    }
}
