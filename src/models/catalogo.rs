//! Modelos de catálogo
//!
//! Entidades de referencia: fabricantes, proveedores, almacenes y motivos
//! de desecho.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Fabricante de neumáticos - mapea a la tabla fabricantes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Fabricante {
    pub id: Uuid,
    pub nombre: String,
    pub pais: Option<String>,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
}

/// Proveedor de compra o de servicio - mapea a la tabla proveedores
///
/// es_proveedor_servicio distingue talleres de reparación/reencauche de
/// proveedores de compra.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Proveedor {
    pub id: Uuid,
    pub nombre: String,
    pub ruc: Option<String>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub es_proveedor_servicio: bool,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
}

/// Almacén físico - mapea a la tabla almacenes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Almacen {
    pub id: Uuid,
    pub nombre: String,
    pub ubicacion: Option<String>,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
}

/// Motivo de desecho - mapea a la tabla motivos_desecho
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MotivoDesecho {
    pub id: Uuid,
    pub codigo: String,
    pub descripcion: String,
    pub activo: bool,
}
