//! Modelo de Alerta
//!
//! Las alertas materializan condiciones detectadas por el motor de alertas.
//! Nunca se eliminan: se crean abiertas y se marcan resueltas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de alerta - mapea al ENUM tipo_alerta
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "tipo_alerta", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoAlerta {
    ProfundidadBaja,
    PresionBaja,
    PresionAlta,
    LimiteReencauches,
    DesgasteIrregular,
    FinVidaUtil,
    StockMinimo,
    Otro,
}

impl TipoAlerta {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoAlerta::ProfundidadBaja => "PROFUNDIDAD_BAJA",
            TipoAlerta::PresionBaja => "PRESION_BAJA",
            TipoAlerta::PresionAlta => "PRESION_ALTA",
            TipoAlerta::LimiteReencauches => "LIMITE_REENCAUCHES",
            TipoAlerta::DesgasteIrregular => "DESGASTE_IRREGULAR",
            TipoAlerta::FinVidaUtil => "FIN_VIDA_UTIL",
            TipoAlerta::StockMinimo => "STOCK_MINIMO",
            TipoAlerta::Otro => "OTRO",
        }
    }
}

impl std::fmt::Display for TipoAlerta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severidad de alerta - mapea al ENUM severidad_alerta
///
/// El orden de las variantes define el orden de severidad creciente.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, PartialOrd, Ord)]
#[sqlx(type_name = "severidad_alerta", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeveridadAlerta {
    Info,
    Warn,
    High,
    Critical,
}

impl SeveridadAlerta {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeveridadAlerta::Info => "INFO",
            SeveridadAlerta::Warn => "WARN",
            SeveridadAlerta::High => "HIGH",
            SeveridadAlerta::Critical => "CRITICAL",
        }
    }
}

/// Alerta principal - mapea exactamente a la tabla alertas
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Alerta {
    pub id: Uuid,
    pub tipo_alerta: TipoAlerta,
    pub severidad: SeveridadAlerta,
    pub descripcion: String,
    pub neumatico_id: Option<Uuid>,
    pub vehiculo_id: Option<Uuid>,
    pub modelo_id: Option<Uuid>,
    pub almacen_id: Option<Uuid>,
    pub parametro_id: Option<Uuid>,
    pub datos_contexto: serde_json::Value,
    pub resuelta: bool,
    pub fecha_resolucion: Option<DateTime<Utc>>,
    pub notas_resolucion: Option<String>,
    pub resuelto_por: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Detección producida por una regla del motor de alertas: los datos de la
/// alerta que existiría si la condición se materializa.
#[derive(Debug, Clone, PartialEq)]
pub struct DeteccionAlerta {
    pub tipo_alerta: TipoAlerta,
    pub severidad: SeveridadAlerta,
    pub descripcion: String,
    pub neumatico_id: Option<Uuid>,
    pub vehiculo_id: Option<Uuid>,
    pub modelo_id: Option<Uuid>,
    pub almacen_id: Option<Uuid>,
    pub parametro_id: Option<Uuid>,
    pub datos_contexto: serde_json::Value,
}

impl DeteccionAlerta {
    /// Detección con alcance de neumático
    pub fn para_neumatico(
        tipo_alerta: TipoAlerta,
        severidad: SeveridadAlerta,
        neumatico_id: Uuid,
        descripcion: String,
        datos_contexto: serde_json::Value,
    ) -> Self {
        Self {
            tipo_alerta,
            severidad,
            descripcion,
            neumatico_id: Some(neumatico_id),
            vehiculo_id: None,
            modelo_id: None,
            almacen_id: None,
            parametro_id: None,
            datos_contexto,
        }
    }

    /// Detección con alcance de modelo + almacén (alertas de stock)
    pub fn para_stock(
        severidad: SeveridadAlerta,
        modelo_id: Uuid,
        almacen_id: Uuid,
        descripcion: String,
        datos_contexto: serde_json::Value,
    ) -> Self {
        Self {
            tipo_alerta: TipoAlerta::StockMinimo,
            severidad,
            descripcion,
            neumatico_id: None,
            vehiculo_id: None,
            modelo_id: Some(modelo_id),
            almacen_id: Some(almacen_id),
            parametro_id: None,
            datos_contexto,
        }
    }

    /// Asociar el vehículo sobre el que se detectó la condición.
    pub fn con_vehiculo(mut self, vehiculo_id: Option<Uuid>) -> Self {
        self.vehiculo_id = vehiculo_id;
        self
    }

    /// Asociar el parámetro configurado que definió el umbral.
    pub fn con_parametro(mut self, parametro_id: Option<Uuid>) -> Self {
        self.parametro_id = parametro_id;
        self
    }
}
