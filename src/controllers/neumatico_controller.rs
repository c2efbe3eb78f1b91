use crate::dto::neumatico_dto::{FiltrosNeumaticos, NeumaticoResponse};
use crate::models::alerta::Alerta;
use crate::models::evento::EventoNeumatico;
use crate::repositories::alerta_repository::AlertaRepository;
use crate::repositories::evento_repository::EventoRepository;
use crate::repositories::neumatico_repository::NeumaticoRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct NeumaticoController {
    repository: NeumaticoRepository,
    evento_repository: EventoRepository,
    alerta_repository: AlertaRepository,
}

impl NeumaticoController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: NeumaticoRepository::new(pool.clone()),
            evento_repository: EventoRepository::new(pool.clone()),
            alerta_repository: AlertaRepository::new(pool),
        }
    }

    pub async fn buscar(
        &self,
        filtros: FiltrosNeumaticos,
    ) -> Result<Vec<NeumaticoResponse>, AppError> {
        let neumaticos = self.repository.buscar(&filtros).await?;
        Ok(neumaticos.into_iter().map(NeumaticoResponse::from).collect())
    }

    pub async fn obtener(&self, id: Uuid) -> Result<NeumaticoResponse, AppError> {
        let neumatico = self
            .repository
            .obtener_por_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Neumático no encontrado".to_string()))?;

        Ok(NeumaticoResponse::from(neumatico))
    }

    /// Historial completo de eventos del neumático, el más reciente primero
    pub async fn historial(&self, id: Uuid) -> Result<Vec<EventoNeumatico>, AppError> {
        self.verificar_existe(id).await?;
        self.evento_repository.historial_de_neumatico(id).await
    }

    /// Alertas del neumático, las abiertas primero
    pub async fn alertas(&self, id: Uuid) -> Result<Vec<Alerta>, AppError> {
        self.verificar_existe(id).await?;
        self.alerta_repository.de_neumatico(id).await
    }

    async fn verificar_existe(&self, id: Uuid) -> Result<(), AppError> {
        self.repository
            .obtener_por_id(id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Neumático no encontrado".to_string()))
    }
}
