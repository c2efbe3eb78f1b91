use std::sync::Arc;

use crate::config::ConfigAlertas;
use crate::dto::evento_dto::{FiltrosEventos, RegistrarEventoRequest, RegistrarEventoResponse};
use crate::dto::ApiResponse;
use crate::models::evento::EventoNeumatico;
use crate::repositories::evento_repository::EventoRepository;
use crate::services::evento_service::EventoService;
use crate::services::notificacion_service::NotificadorAlertas;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct EventoController {
    service: EventoService,
    repository: EventoRepository,
}

impl EventoController {
    pub fn new(
        pool: PgPool,
        config_alertas: ConfigAlertas,
        notificador: Arc<dyn NotificadorAlertas>,
    ) -> Self {
        Self {
            service: EventoService::new(pool.clone(), config_alertas, notificador),
            repository: EventoRepository::new(pool),
        }
    }

    pub async fn registrar(
        &self,
        request: RegistrarEventoRequest,
        usuario_id: Uuid,
    ) -> Result<ApiResponse<RegistrarEventoResponse>, AppError> {
        let response = self.service.registrar_evento(request, usuario_id).await?;

        Ok(ApiResponse::success_with_message(
            response,
            "Evento registrado exitosamente".to_string(),
        ))
    }

    pub async fn listar(
        &self,
        filtros: FiltrosEventos,
    ) -> Result<Vec<EventoNeumatico>, AppError> {
        let (desde, hasta) = filtros.rango_fechas()?;
        self.repository.buscar(&filtros, desde, hasta).await
    }
}
