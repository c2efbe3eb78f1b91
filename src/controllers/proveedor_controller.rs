use crate::dto::catalogo_dto::CrearProveedorRequest;
use crate::dto::ApiResponse;
use crate::models::catalogo::Proveedor;
use crate::repositories::proveedor_repository::ProveedorRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct ProveedorController {
    repository: ProveedorRepository,
}

impl ProveedorController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ProveedorRepository::new(pool),
        }
    }

    pub async fn crear(
        &self,
        request: CrearProveedorRequest,
    ) -> Result<ApiResponse<Proveedor>, AppError> {
        request.validate()?;
        let proveedor = self.repository.crear(&request).await?;

        Ok(ApiResponse::success_with_message(
            proveedor,
            "Proveedor creado exitosamente".to_string(),
        ))
    }

    pub async fn obtener(&self, id: Uuid) -> Result<Proveedor, AppError> {
        self.repository
            .obtener_por_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Proveedor no encontrado".to_string()))
    }

    pub async fn listar(&self) -> Result<Vec<Proveedor>, AppError> {
        self.repository.listar().await
    }
}
