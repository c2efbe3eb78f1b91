//! Configuración de umbrales de alertas
//!
//! Este módulo centraliza los umbrales del motor de alertas. Los valores
//! se inyectan explícitamente en los servicios, con defaults de operación
//! que pueden sobreescribirse por variables de entorno.

use rust_decimal::Decimal;
use std::env;

use crate::models::vehiculo::ClasePeso;

/// Umbrales del motor de alertas
#[derive(Debug, Clone)]
pub struct ConfigAlertas {
    /// Profundidad mínima global (mm) cuando el modelo no tiene parámetro propio
    pub profundidad_minima_default_mm: f64,
    /// Tolerancia de presión respecto a la recomendada del modelo (%)
    pub tolerancia_presion_pct: f64,
    /// Diferencia máxima normal entre zonas de banda (mm)
    pub umbral_desgaste_irregular_mm: f64,
    /// Diferencia máxima normal entre zonas para vehículos pesados (mm)
    pub umbral_desgaste_pesado_mm: f64,
    /// Edad de servicio a partir de la cual se evalúa fin de vida útil
    pub anos_vida_util: u32,
    /// Kilometraje acumulado de referencia para fin de vida útil
    pub km_vida_util: Decimal,
    /// Porcentaje de desgaste que genera advertencia
    pub pct_desgaste_advertencia: f64,
    /// Porcentaje de desgaste que genera alerta crítica
    pub pct_desgaste_critico: f64,
}

impl Default for ConfigAlertas {
    fn default() -> Self {
        Self {
            profundidad_minima_default_mm: 3.0,
            tolerancia_presion_pct: 15.0,
            umbral_desgaste_irregular_mm: 2.0,
            umbral_desgaste_pesado_mm: 2.5,
            anos_vida_util: 7,
            km_vida_util: Decimal::from(80_000),
            pct_desgaste_advertencia: 70.0,
            pct_desgaste_critico: 85.0,
        }
    }
}

fn var_f64(name: &str, default: f64) -> f64 {
    env::var(name).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn var_u32(name: &str, default: u32) -> u32 {
    env::var(name).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn var_decimal(name: &str, default: Decimal) -> Decimal {
    env::var(name).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

impl ConfigAlertas {
    /// Cargar umbrales desde el entorno, con defaults de operación
    pub fn desde_entorno() -> Self {
        let base = Self::default();
        Self {
            profundidad_minima_default_mm: var_f64(
                "ALERTA_PROFUNDIDAD_MINIMA_MM",
                base.profundidad_minima_default_mm,
            ),
            tolerancia_presion_pct: var_f64(
                "ALERTA_TOLERANCIA_PRESION_PCT",
                base.tolerancia_presion_pct,
            ),
            umbral_desgaste_irregular_mm: var_f64(
                "ALERTA_UMBRAL_DESGASTE_MM",
                base.umbral_desgaste_irregular_mm,
            ),
            umbral_desgaste_pesado_mm: var_f64(
                "ALERTA_UMBRAL_DESGASTE_PESADO_MM",
                base.umbral_desgaste_pesado_mm,
            ),
            anos_vida_util: var_u32("ALERTA_ANOS_VIDA_UTIL", base.anos_vida_util),
            km_vida_util: var_decimal("ALERTA_KM_VIDA_UTIL", base.km_vida_util),
            pct_desgaste_advertencia: var_f64(
                "ALERTA_PCT_DESGASTE_ADVERTENCIA",
                base.pct_desgaste_advertencia,
            ),
            pct_desgaste_critico: var_f64(
                "ALERTA_PCT_DESGASTE_CRITICO",
                base.pct_desgaste_critico,
            ),
        }
    }

    /// Banda aceptable de presión alrededor de la recomendada del modelo
    pub fn banda_presion(&self, presion_recomendada_psi: f64) -> (f64, f64) {
        let margen = presion_recomendada_psi * self.tolerancia_presion_pct / 100.0;
        (presion_recomendada_psi - margen, presion_recomendada_psi + margen)
    }

    /// Umbral de diferencia entre zonas según la clase de peso del vehículo
    pub fn umbral_desgaste_para(&self, clase: Option<ClasePeso>) -> f64 {
        match clase {
            Some(ClasePeso::Pesado) => self.umbral_desgaste_pesado_mm,
            _ => self.umbral_desgaste_irregular_mm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConfigAlertas::default();
        assert_eq!(config.profundidad_minima_default_mm, 3.0);
        assert_eq!(config.tolerancia_presion_pct, 15.0);
        assert_eq!(config.anos_vida_util, 7);
        assert_eq!(config.km_vida_util, Decimal::from(80_000));
    }

    #[test]
    fn test_banda_presion() {
        let config = ConfigAlertas::default();
        let (min, max) = config.banda_presion(100.0);
        assert_eq!(min, 85.0);
        assert_eq!(max, 115.0);
    }

    #[test]
    fn test_umbral_desgaste_por_clase() {
        let config = ConfigAlertas::default();
        assert_eq!(config.umbral_desgaste_para(Some(ClasePeso::Pesado)), 2.5);
        assert_eq!(config.umbral_desgaste_para(Some(ClasePeso::Liviano)), 2.0);
        assert_eq!(config.umbral_desgaste_para(None), 2.0);
    }
}
