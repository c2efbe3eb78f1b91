//! Modelo de Evento de Neumático
//!
//! Cada invocación del motor de ciclo de vida produce exactamente una fila
//! en eventos_neumatico. Las filas son inmutables: son la traza de auditoría.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de evento - mapea al ENUM tipo_evento_neumatico
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "tipo_evento_neumatico", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoEvento {
    Compra,
    Instalacion,
    Desmontaje,
    Inspeccion,
    Rotacion,
    ReparacionEntrada,
    ReparacionSalida,
    ReencaucheEntrada,
    ReencaucheSalida,
    Desecho,
    AjusteInventario,
    Movimiento,
    Venta,
    BajaPorRobo,
}

impl TipoEvento {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoEvento::Compra => "COMPRA",
            TipoEvento::Instalacion => "INSTALACION",
            TipoEvento::Desmontaje => "DESMONTAJE",
            TipoEvento::Inspeccion => "INSPECCION",
            TipoEvento::Rotacion => "ROTACION",
            TipoEvento::ReparacionEntrada => "REPARACION_ENTRADA",
            TipoEvento::ReparacionSalida => "REPARACION_SALIDA",
            TipoEvento::ReencaucheEntrada => "REENCAUCHE_ENTRADA",
            TipoEvento::ReencaucheSalida => "REENCAUCHE_SALIDA",
            TipoEvento::Desecho => "DESECHO",
            TipoEvento::AjusteInventario => "AJUSTE_INVENTARIO",
            TipoEvento::Movimiento => "MOVIMIENTO",
            TipoEvento::Venta => "VENTA",
            TipoEvento::BajaPorRobo => "BAJA_POR_ROBO",
        }
    }
}

impl std::fmt::Display for TipoEvento {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evento principal - mapea exactamente a la tabla eventos_neumatico
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventoNeumatico {
    pub id: Uuid,
    pub neumatico_id: Uuid,
    pub tipo_evento: TipoEvento,
    pub usuario_id: Uuid,
    pub fecha_evento: NaiveDate,
    pub odometro_vehiculo_en_evento: Option<Decimal>,
    pub profundidad_remanente_mm: Option<f64>,
    pub profundidad_exterior_mm: Option<f64>,
    pub profundidad_centro_mm: Option<f64>,
    pub profundidad_interior_mm: Option<f64>,
    pub presion_psi: Option<f64>,
    pub costo_evento: Option<Decimal>,
    pub proveedor_servicio_id: Option<Uuid>,
    pub destino_almacen_id: Option<Uuid>,
    pub vehiculo_id: Option<Uuid>,
    pub posicion_id: Option<Uuid>,
    pub motivo_desmontaje_destino: Option<String>,
    pub motivo_desecho_id_evento: Option<Uuid>,
    pub profundidad_post_reencauche_mm: Option<f64>,
    pub estado_ajuste: Option<String>,
    pub notas: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl EventoNeumatico {
    /// Fila nueva con solo los campos obligatorios; el resto se completa
    /// según el tipo de evento.
    pub fn nuevo(
        neumatico_id: Uuid,
        tipo_evento: TipoEvento,
        usuario_id: Uuid,
        fecha_evento: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            neumatico_id,
            tipo_evento,
            usuario_id,
            fecha_evento,
            odometro_vehiculo_en_evento: None,
            profundidad_remanente_mm: None,
            profundidad_exterior_mm: None,
            profundidad_centro_mm: None,
            profundidad_interior_mm: None,
            presion_psi: None,
            costo_evento: None,
            proveedor_servicio_id: None,
            destino_almacen_id: None,
            vehiculo_id: None,
            posicion_id: None,
            motivo_desmontaje_destino: None,
            motivo_desecho_id_evento: None,
            profundidad_post_reencauche_mm: None,
            estado_ajuste: None,
            notas: None,
            created_at: Utc::now(),
        }
    }

    /// Profundidad medida del evento: la remanente informada o, en su
    /// defecto, la menor de las tres zonas.
    pub fn profundidad_medida(&self) -> Option<f64> {
        self.profundidad_remanente_mm.or_else(|| {
            self.zonas()
                .map(|(ext, cen, int)| ext.min(cen).min(int))
        })
    }

    /// Las tres zonas de profundidad, solo si están todas presentes
    pub fn zonas(&self) -> Option<(f64, f64, f64)> {
        match (
            self.profundidad_exterior_mm,
            self.profundidad_centro_mm,
            self.profundidad_interior_mm,
        ) {
            (Some(ext), Some(cen), Some(int)) => Some((ext, cen, int)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profundidad_medida_prefiere_remanente() {
        let mut evento = EventoNeumatico::nuevo(
            Uuid::new_v4(),
            TipoEvento::Inspeccion,
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        );
        evento.profundidad_remanente_mm = Some(6.0);
        evento.profundidad_exterior_mm = Some(5.0);
        evento.profundidad_centro_mm = Some(5.5);
        evento.profundidad_interior_mm = Some(5.2);

        assert_eq!(evento.profundidad_medida(), Some(6.0));
    }

    #[test]
    fn test_profundidad_medida_usa_minimo_de_zonas() {
        let mut evento = EventoNeumatico::nuevo(
            Uuid::new_v4(),
            TipoEvento::Inspeccion,
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        );
        evento.profundidad_exterior_mm = Some(5.0);
        evento.profundidad_centro_mm = Some(7.0);
        evento.profundidad_interior_mm = Some(6.2);

        assert_eq!(evento.profundidad_medida(), Some(5.0));
        assert_eq!(evento.zonas(), Some((5.0, 7.0, 6.2)));
    }

    #[test]
    fn test_zonas_incompletas() {
        let mut evento = EventoNeumatico::nuevo(
            Uuid::new_v4(),
            TipoEvento::Inspeccion,
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        );
        evento.profundidad_exterior_mm = Some(5.0);

        assert_eq!(evento.zonas(), None);
        assert_eq!(evento.profundidad_medida(), None);
    }
}
