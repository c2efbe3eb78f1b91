use serde::Deserialize;
use validator::Validate;

// Request para crear un fabricante
#[derive(Debug, Deserialize, Validate)]
pub struct CrearFabricanteRequest {
    #[validate(length(min = 2, max = 100))]
    pub nombre: String,

    #[validate(length(min = 2, max = 100))]
    pub pais: Option<String>,
}

// Request para crear un proveedor
#[derive(Debug, Deserialize, Validate)]
pub struct CrearProveedorRequest {
    #[validate(length(min = 2, max = 150))]
    pub nombre: String,

    #[validate(length(min = 8, max = 20))]
    pub ruc: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub telefono: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_email")]
    pub email: Option<String>,

    pub es_proveedor_servicio: Option<bool>,
}

// Request para crear un almacén
#[derive(Debug, Deserialize, Validate)]
pub struct CrearAlmacenRequest {
    #[validate(length(min = 2, max = 100))]
    pub nombre: String,

    #[validate(length(min = 2, max = 255))]
    pub ubicacion: Option<String>,
}

// Request para crear un motivo de desecho
#[derive(Debug, Deserialize, Validate)]
pub struct CrearMotivoDesechoRequest {
    #[validate(length(min = 2, max = 50))]
    pub codigo: String,

    #[validate(length(min = 3, max = 255))]
    pub descripcion: String,
}
