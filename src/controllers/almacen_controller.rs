use crate::dto::catalogo_dto::CrearAlmacenRequest;
use crate::dto::ApiResponse;
use crate::models::catalogo::Almacen;
use crate::repositories::almacen_repository::AlmacenRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct AlmacenController {
    repository: AlmacenRepository,
}

impl AlmacenController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: AlmacenRepository::new(pool),
        }
    }

    pub async fn crear(
        &self,
        request: CrearAlmacenRequest,
    ) -> Result<ApiResponse<Almacen>, AppError> {
        request.validate()?;
        let almacen = self.repository.crear(&request).await?;

        Ok(ApiResponse::success_with_message(
            almacen,
            "Almacén creado exitosamente".to_string(),
        ))
    }

    pub async fn obtener(&self, id: Uuid) -> Result<Almacen, AppError> {
        self.repository
            .obtener_por_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Almacén no encontrado".to_string()))
    }

    pub async fn listar(&self) -> Result<Vec<Almacen>, AppError> {
        self.repository.listar().await
    }
}
