//! Modelo de Parámetro
//!
//! Parámetros configurables por modelo, con override opcional por almacén:
//! profundidad mínima y stock mínimo.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de parámetro - mapea al ENUM tipo_parametro
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "tipo_parametro", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoParametro {
    ProfundidadMinima,
    StockMinimo,
}

impl TipoParametro {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoParametro::ProfundidadMinima => "PROFUNDIDAD_MINIMA",
            TipoParametro::StockMinimo => "STOCK_MINIMO",
        }
    }
}

/// Parámetro principal - mapea exactamente a la tabla parametros
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Parametro {
    pub id: Uuid,
    pub tipo_parametro: TipoParametro,
    pub modelo_id: Uuid,
    pub almacen_id: Option<Uuid>,
    pub valor: Decimal,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
}
