use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::alerta::Alerta;
use crate::models::evento::{EventoNeumatico, TipoEvento};
use crate::models::neumatico::Neumatico;
use crate::utils::errors::{validation_error, AppError};

// Request de registro de evento: superset de campos opcionales.
// El subconjunto requerido depende de tipo_evento y lo valida el parser
// de comandos, no serde.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrarEventoRequest {
    pub neumatico_id: Option<Uuid>,
    pub tipo_evento: TipoEvento,
    pub fecha_evento: Option<NaiveDate>,
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
    pub numero_serie: Option<String>,
    pub modelo_id: Option<Uuid>,
    pub proveedor_compra_id: Option<Uuid>,
    pub costo_compra: Option<Decimal>,
    pub fecha_fabricacion: Option<NaiveDate>,
    pub notas: Option<String>,
}

// Response del registro: el neumático actualizado, el evento inmutable
// creado y las alertas que este evento generó.
#[derive(Debug, Serialize)]
pub struct RegistrarEventoResponse {
    pub neumatico: Neumatico,
    pub evento: EventoNeumatico,
    pub alertas_generadas: Vec<Alerta>,
}

// Filtros para consultar el historial de eventos
#[derive(Debug, Deserialize)]
pub struct FiltrosEventos {
    pub neumatico_id: Option<Uuid>,
    pub tipo_evento: Option<TipoEvento>,
    pub vehiculo_id: Option<Uuid>,
    pub usuario_id: Option<Uuid>,
    pub desde: Option<String>,
    pub hasta: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl FiltrosEventos {
    /// Parsea el rango desde/hasta (formato YYYY-MM-DD).
    pub fn rango_fechas(&self) -> Result<(Option<NaiveDate>, Option<NaiveDate>), AppError> {
        let parsear = |valor: &Option<String>, campo: &str| match valor {
            Some(texto) => NaiveDate::parse_from_str(texto, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| {
                    validation_error(format!(
                        "el filtro '{}' debe tener formato YYYY-MM-DD",
                        campo
                    ))
                }),
            None => Ok(None),
        };

        Ok((parsear(&self.desde, "desde")?, parsear(&self.hasta, "hasta")?))
    }
}
