use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CrearVehiculoRequest {
    #[validate(custom = "crate::utils::validation::validate_license_plate")]
    pub placa: String,

    pub tipo_vehiculo_id: Uuid,

    #[validate(length(min = 2, max = 100))]
    pub marca: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub modelo: Option<String>,

    #[validate(range(min = 1950, max = 2035))]
    pub anio: Option<i32>,
}

// Request para actualizar un vehículo existente
#[derive(Debug, Deserialize, Validate)]
pub struct ActualizarVehiculoRequest {
    #[validate(custom = "crate::utils::validation::validate_license_plate")]
    pub placa: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub marca: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub modelo: Option<String>,

    #[validate(range(min = 1950, max = 2035))]
    pub anio: Option<i32>,

    pub activo: Option<bool>,
}
