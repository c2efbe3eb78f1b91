use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::neumatico::{EstadoNeumatico, Neumatico};

// Response de neumático con los datos de referencia resueltos
#[derive(Debug, Serialize)]
pub struct NeumaticoResponse {
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Neumatico> for NeumaticoResponse {
    fn from(neumatico: Neumatico) -> Self {
        Self {
            id: neumatico.id,
            numero_serie: neumatico.numero_serie,
            modelo_id: neumatico.modelo_id,
            estado_actual: neumatico.estado_actual,
            almacen_id: neumatico.almacen_id,
            vehiculo_id: neumatico.vehiculo_id,
            posicion_id: neumatico.posicion_id,
            kilometraje_acumulado: neumatico.kilometraje_acumulado,
            km_instalacion: neumatico.km_instalacion,
            fecha_instalacion: neumatico.fecha_instalacion,
            reencauches_realizados: neumatico.reencauches_realizados,
            es_reencauchado: neumatico.es_reencauchado,
            vida_actual: neumatico.vida_actual,
            profundidad_inicial_mm: neumatico.profundidad_inicial_mm,
            fecha_fabricacion: neumatico.fecha_fabricacion,
            fecha_compra: neumatico.fecha_compra,
            costo_compra: neumatico.costo_compra,
            proveedor_compra_id: neumatico.proveedor_compra_id,
            motivo_desecho_id: neumatico.motivo_desecho_id,
            fecha_desecho: neumatico.fecha_desecho,
            created_at: neumatico.created_at,
            updated_at: neumatico.updated_at,
        }
    }
}

// Filtros para búsqueda de neumáticos
#[derive(Debug, Deserialize)]
pub struct FiltrosNeumaticos {
    pub estado: Option<EstadoNeumatico>,
    pub modelo_id: Option<Uuid>,
    pub almacen_id: Option<Uuid>,
    pub vehiculo_id: Option<Uuid>,
    pub numero_serie: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
