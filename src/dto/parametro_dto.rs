use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::parametro::TipoParametro;

// Request para crear o reemplazar un parámetro. El par (tipo, modelo,
// almacén) identifica al parámetro activo; crear sobre uno existente lo
// desactiva y lo sustituye.
#[derive(Debug, Deserialize)]
pub struct CrearParametroRequest {
    pub tipo_parametro: TipoParametro,
    pub modelo_id: Uuid,
    pub almacen_id: Option<Uuid>,
    pub valor: Decimal,
}

// Filtros para consultar parámetros
#[derive(Debug, Deserialize)]
pub struct FiltrosParametros {
    pub tipo_parametro: Option<TipoParametro>,
    pub modelo_id: Option<Uuid>,
    pub almacen_id: Option<Uuid>,
}
