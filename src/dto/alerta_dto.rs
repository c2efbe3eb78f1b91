use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::alerta::{SeveridadAlerta, TipoAlerta};

// Request para resolver manualmente una alerta
#[derive(Debug, Deserialize, Validate)]
pub struct ResolverAlertaRequest {
    #[validate(length(min = 3, max = 500))]
    pub notas: String,
}

// Filtros para consultar alertas
#[derive(Debug, Deserialize)]
pub struct FiltrosAlertas {
    pub tipo_alerta: Option<TipoAlerta>,
    pub severidad: Option<SeveridadAlerta>,
    pub resuelta: Option<bool>,
    pub neumatico_id: Option<Uuid>,
    pub vehiculo_id: Option<Uuid>,
    pub modelo_id: Option<Uuid>,
    pub almacen_id: Option<Uuid>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
