use crate::dto::alerta_dto::{FiltrosAlertas, ResolverAlertaRequest};
use crate::dto::ApiResponse;
use crate::models::alerta::Alerta;
use crate::repositories::alerta_repository::AlertaRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct AlertaController {
    repository: AlertaRepository,
}

impl AlertaController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: AlertaRepository::new(pool),
        }
    }

    pub async fn buscar(&self, filtros: FiltrosAlertas) -> Result<Vec<Alerta>, AppError> {
        self.repository.buscar(&filtros).await
    }

    pub async fn obtener(&self, id: Uuid) -> Result<Alerta, AppError> {
        self.repository
            .obtener_por_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Alerta no encontrada".to_string()))
    }

    /// Resolución manual: registra quién la cerró y por qué. El motor de
    /// alertas resuelve las suyas por condición; esta vía es para el resto.
    pub async fn resolver(
        &self,
        id: Uuid,
        request: ResolverAlertaRequest,
        usuario_id: Uuid,
    ) -> Result<ApiResponse<Alerta>, AppError> {
        request.validate()?;

        let alerta = self
            .repository
            .obtener_por_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Alerta no encontrada".to_string()))?;

        if alerta.resuelta {
            return Err(AppError::Conflict("la alerta ya está resuelta".to_string()));
        }

        // El UPDATE exige resuelta = FALSE; None aquí significa que otra
        // petición la resolvió entre la lectura y la escritura
        let resuelta = self
            .repository
            .resolver_manual(id, &request.notas, usuario_id)
            .await?
            .ok_or_else(|| AppError::Conflict("la alerta ya está resuelta".to_string()))?;

        log::info!("✅ Alerta {} resuelta manualmente por {}", id, usuario_id);

        Ok(ApiResponse::success_with_message(
            resuelta,
            "Alerta resuelta exitosamente".to_string(),
        ))
    }
}
