//! Modelo de Vehículo
//!
//! Este módulo contiene Vehiculo, TipoVehiculo y Posicion. Las posiciones
//! de montaje pertenecen al tipo de vehículo, no al vehículo individual.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Clase de peso del tipo de vehículo - mapea al ENUM clase_peso
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "clase_peso", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClasePeso {
    Liviano,
    Mediano,
    Pesado,
}

/// Tipo de vehículo - mapea a la tabla tipos_vehiculo
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TipoVehiculo {
    pub id: Uuid,
    pub nombre: String,
    pub clase_peso: ClasePeso,
    pub activo: bool,
}

/// Posición de montaje - mapea a la tabla posiciones
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Posicion {
    pub id: Uuid,
    pub tipo_vehiculo_id: Uuid,
    pub codigo: String,
    pub eje: i16,
    pub lado: String,
    pub activo: bool,
}

/// Vehículo principal - mapea exactamente a la tabla vehiculos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehiculo {
    pub id: Uuid,
    pub placa: String,
    pub tipo_vehiculo_id: Uuid,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub anio: Option<i32>,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
}
