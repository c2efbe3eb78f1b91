use crate::dto::modelo_dto::{ActualizarModeloRequest, CrearModeloRequest};
use crate::dto::ApiResponse;
use crate::models::modelo_neumatico::ModeloNeumatico;
use crate::repositories::catalogo_repository::CatalogoRepository;
use crate::repositories::modelo_repository::ModeloRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct ModeloController {
    repository: ModeloRepository,
    catalogo_repository: CatalogoRepository,
}

impl ModeloController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ModeloRepository::new(pool.clone()),
            catalogo_repository: CatalogoRepository::new(pool),
        }
    }

    pub async fn crear(
        &self,
        request: CrearModeloRequest,
    ) -> Result<ApiResponse<ModeloNeumatico>, AppError> {
        request.validate()?;

        // El fabricante debe existir antes de aceptar el modelo
        self.catalogo_repository
            .obtener_fabricante(request.fabricante_id)
            .await?
            .filter(|f| f.activo)
            .ok_or_else(|| AppError::NotFound("Fabricante no encontrado".to_string()))?;

        let modelo = self.repository.crear(&request).await?;

        Ok(ApiResponse::success_with_message(
            modelo,
            "Modelo creado exitosamente".to_string(),
        ))
    }

    pub async fn obtener(&self, id: Uuid) -> Result<ModeloNeumatico, AppError> {
        self.repository
            .obtener_por_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Modelo no encontrado".to_string()))
    }

    pub async fn listar(&self) -> Result<Vec<ModeloNeumatico>, AppError> {
        self.repository.listar().await
    }

    pub async fn actualizar(
        &self,
        id: Uuid,
        request: ActualizarModeloRequest,
    ) -> Result<ApiResponse<ModeloNeumatico>, AppError> {
        request.validate()?;
        let modelo = self.repository.actualizar(id, &request).await?;

        Ok(ApiResponse::success_with_message(
            modelo,
            "Modelo actualizado exitosamente".to_string(),
        ))
    }
}
