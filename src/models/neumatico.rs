//! Modelo de Neumático
//!
//! Este módulo contiene el struct Neumatico y el enum de estados del ciclo
//! de vida. Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del neumático - mapea al ENUM estado_neumatico
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "estado_neumatico", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoNeumatico {
    EnStock,
    Instalado,
    EnReparacion,
    EnReencauche,
    Desechado,
    ParaReparacion,
    Reparado,
    ParaReencauche,
    Reencauchado,
    EnTransito,
}

impl EstadoNeumatico {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoNeumatico::EnStock => "EN_STOCK",
            EstadoNeumatico::Instalado => "INSTALADO",
            EstadoNeumatico::EnReparacion => "EN_REPARACION",
            EstadoNeumatico::EnReencauche => "EN_REENCAUCHE",
            EstadoNeumatico::Desechado => "DESECHADO",
            EstadoNeumatico::ParaReparacion => "PARA_REPARACION",
            EstadoNeumatico::Reparado => "REPARADO",
            EstadoNeumatico::ParaReencauche => "PARA_REENCAUCHE",
            EstadoNeumatico::Reencauchado => "REENCAUCHADO",
            EstadoNeumatico::EnTransito => "EN_TRANSITO",
        }
    }

    /// DESECHADO es terminal: ningún evento posterior es válido
    pub fn es_terminal(&self) -> bool {
        matches!(self, EstadoNeumatico::Desechado)
    }

    /// Parsear desde el valor textual del wire (estado_ajuste)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "EN_STOCK" => Some(EstadoNeumatico::EnStock),
            "INSTALADO" => Some(EstadoNeumatico::Instalado),
            "EN_REPARACION" => Some(EstadoNeumatico::EnReparacion),
            "EN_REENCAUCHE" => Some(EstadoNeumatico::EnReencauche),
            "DESECHADO" => Some(EstadoNeumatico::Desechado),
            "PARA_REPARACION" => Some(EstadoNeumatico::ParaReparacion),
            "REPARADO" => Some(EstadoNeumatico::Reparado),
            "PARA_REENCAUCHE" => Some(EstadoNeumatico::ParaReencauche),
            "REENCAUCHADO" => Some(EstadoNeumatico::Reencauchado),
            "EN_TRANSITO" => Some(EstadoNeumatico::EnTransito),
            _ => None,
        }
    }
}

impl std::fmt::Display for EstadoNeumatico {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Neumático principal - mapea exactamente a la tabla neumaticos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Neumatico {
    pub id: Uuid,
    pub numero_serie: String,
    pub modelo_id: Uuid,
    pub estado_actual: EstadoNeumatico,
    pub almacen_id: Option<Uuid>,
    pub vehiculo_id: Option<Uuid>,
    pub posicion_id: Option<Uuid>,
    pub kilometraje_acumulado: Decimal,
    pub km_instalacion: Option<Decimal>,
    pub fecha_instalacion: Option<NaiveDate>,
    pub reencauches_realizados: i32,
    pub es_reencauchado: bool,
    pub vida_actual: i32,
    pub profundidad_inicial_mm: f64,
    pub fecha_fabricacion: Option<NaiveDate>,
    pub fecha_compra: NaiveDate,
    pub costo_compra: Decimal,
    pub proveedor_compra_id: Uuid,
    pub motivo_desecho_id: Option<Uuid>,
    pub fecha_desecho: Option<NaiveDate>,
    pub creado_por: Uuid,
    pub actualizado_por: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Neumatico {
    pub fn esta_instalado(&self) -> bool {
        self.estado_actual == EstadoNeumatico::Instalado
    }

    /// Fecha base para calcular la edad: fabricación, o compra si no se conoce
    pub fn fecha_referencia_edad(&self) -> NaiveDate {
        self.fecha_fabricacion.unwrap_or(self.fecha_compra)
    }

    /// Edad en años cumplidos a una fecha dada
    pub fn edad_anos(&self, hoy: NaiveDate) -> u32 {
        hoy.years_since(self.fecha_referencia_edad()).unwrap_or(0)
    }

    /// Porcentaje desgastado de la banda respecto a la profundidad inicial
    /// de la vida actual. None si la profundidad inicial no es positiva.
    pub fn pct_desgaste(&self, profundidad_medida_mm: f64) -> Option<f64> {
        if self.profundidad_inicial_mm <= 0.0 {
            return None;
        }
        let pct = (self.profundidad_inicial_mm - profundidad_medida_mm)
            / self.profundidad_inicial_mm
            * 100.0;
        Some(pct.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neumatico_de_prueba() -> Neumatico {
        Neumatico {
            id: Uuid::new_v4(),
            numero_serie: "NS-0001".to_string(),
            modelo_id: Uuid::new_v4(),
            estado_actual: EstadoNeumatico::EnStock,
            almacen_id: Some(Uuid::new_v4()),
            vehiculo_id: None,
            posicion_id: None,
            kilometraje_acumulado: Decimal::ZERO,
            km_instalacion: None,
            fecha_instalacion: None,
            reencauches_realizados: 0,
            es_reencauchado: false,
            vida_actual: 1,
            profundidad_inicial_mm: 18.0,
            fecha_fabricacion: Some(NaiveDate::from_ymd_opt(2020, 3, 1).unwrap()),
            fecha_compra: NaiveDate::from_ymd_opt(2020, 6, 15).unwrap(),
            costo_compra: Decimal::from(450),
            proveedor_compra_id: Uuid::new_v4(),
            motivo_desecho_id: None,
            fecha_desecho: None,
            creado_por: Uuid::new_v4(),
            actualizado_por: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_estado_parse() {
        assert_eq!(EstadoNeumatico::parse("EN_STOCK"), Some(EstadoNeumatico::EnStock));
        assert_eq!(EstadoNeumatico::parse("reparado"), Some(EstadoNeumatico::Reparado));
        assert_eq!(EstadoNeumatico::parse("NO_EXISTE"), None);
    }

    #[test]
    fn test_estado_terminal() {
        assert!(EstadoNeumatico::Desechado.es_terminal());
        assert!(!EstadoNeumatico::EnStock.es_terminal());
    }

    #[test]
    fn test_edad_anos_usa_fabricacion() {
        let neumatico = neumatico_de_prueba();
        let hoy = NaiveDate::from_ymd_opt(2027, 4, 1).unwrap();
        assert_eq!(neumatico.edad_anos(hoy), 7);
    }

    #[test]
    fn test_edad_anos_sin_fabricacion_usa_compra() {
        let mut neumatico = neumatico_de_prueba();
        neumatico.fecha_fabricacion = None;
        let hoy = NaiveDate::from_ymd_opt(2027, 4, 1).unwrap();
        assert_eq!(neumatico.edad_anos(hoy), 6);
    }

    #[test]
    fn test_pct_desgaste() {
        let neumatico = neumatico_de_prueba();
        let pct = neumatico.pct_desgaste(4.5).unwrap();
        assert!((pct - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_pct_desgaste_profundidad_invalida() {
        let mut neumatico = neumatico_de_prueba();
        neumatico.profundidad_inicial_mm = 0.0;
        assert!(neumatico.pct_desgaste(4.5).is_none());
    }
}
