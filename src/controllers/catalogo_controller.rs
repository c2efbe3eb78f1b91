use crate::dto::catalogo_dto::{CrearFabricanteRequest, CrearMotivoDesechoRequest};
use crate::dto::ApiResponse;
use crate::models::catalogo::{Fabricante, MotivoDesecho};
use crate::repositories::catalogo_repository::CatalogoRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use validator::Validate;

/// Fabricantes y motivos de desecho comparten controller: son catálogos
/// chicos de alta esporádica.
pub struct CatalogoController {
    repository: CatalogoRepository,
}

impl CatalogoController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CatalogoRepository::new(pool),
        }
    }

    pub async fn crear_fabricante(
        &self,
        request: CrearFabricanteRequest,
    ) -> Result<ApiResponse<Fabricante>, AppError> {
        request.validate()?;
        let fabricante = self.repository.crear_fabricante(&request).await?;

        Ok(ApiResponse::success_with_message(
            fabricante,
            "Fabricante creado exitosamente".to_string(),
        ))
    }

    pub async fn listar_fabricantes(&self) -> Result<Vec<Fabricante>, AppError> {
        self.repository.listar_fabricantes().await
    }

    pub async fn crear_motivo_desecho(
        &self,
        request: CrearMotivoDesechoRequest,
    ) -> Result<ApiResponse<MotivoDesecho>, AppError> {
        request.validate()?;
        let motivo = self.repository.crear_motivo_desecho(&request).await?;

        Ok(ApiResponse::success_with_message(
            motivo,
            "Motivo de desecho creado exitosamente".to_string(),
        ))
    }

    pub async fn listar_motivos_desecho(&self) -> Result<Vec<MotivoDesecho>, AppError> {
        self.repository.listar_motivos_desecho().await
    }
}
