use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

// Request para crear un modelo de neumático
#[derive(Debug, Deserialize, Validate)]
pub struct CrearModeloRequest {
    pub fabricante_id: Uuid,

    #[validate(length(min = 2, max = 100))]
    pub nombre: String,

    #[validate(length(min = 2, max = 50))]
    pub medida: String,

    #[validate(range(min = 1.0, max = 40.0))]
    pub profundidad_original_mm: f64,

    #[validate(range(min = 1.0, max = 200.0))]
    pub presion_recomendada_psi: Option<f64>,

    pub permite_reencauche: Option<bool>,

    #[validate(range(min = 0, max = 10))]
    pub reencauches_maximos: Option<i32>,
}

// Request para actualizar un modelo existente
#[derive(Debug, Deserialize, Validate)]
pub struct ActualizarModeloRequest {
    #[validate(length(min = 2, max = 100))]
    pub nombre: Option<String>,

    #[validate(length(min = 2, max = 50))]
    pub medida: Option<String>,

    #[validate(range(min = 1.0, max = 40.0))]
    pub profundidad_original_mm: Option<f64>,

    #[validate(range(min = 1.0, max = 200.0))]
    pub presion_recomendada_psi: Option<f64>,

    pub permite_reencauche: Option<bool>,

    #[validate(range(min = 0, max = 10))]
    pub reencauches_maximos: Option<i32>,

    pub activo: Option<bool>,
}
