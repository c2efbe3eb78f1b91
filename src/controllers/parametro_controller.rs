use rust_decimal::Decimal;

use crate::dto::parametro_dto::{CrearParametroRequest, FiltrosParametros};
use crate::dto::ApiResponse;
use crate::models::parametro::Parametro;
use crate::models::usuario::RolUsuario;
use crate::repositories::modelo_repository::ModeloRepository;
use crate::repositories::parametro_repository::ParametroRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;

pub struct ParametroController {
    repository: ParametroRepository,
    modelo_repository: ModeloRepository,
}

impl ParametroController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ParametroRepository::new(pool.clone()),
            modelo_repository: ModeloRepository::new(pool),
        }
    }

    /// Crea el parámetro vigente para (tipo, modelo, almacén), desactivando
    /// el anterior si lo había. Solo roles administradores.
    pub async fn crear(
        &self,
        request: CrearParametroRequest,
        actor_rol: RolUsuario,
    ) -> Result<ApiResponse<Parametro>, AppError> {
        if !actor_rol.puede_administrar() {
            return Err(AppError::Forbidden(
                "solo un administrador puede configurar parámetros".to_string(),
            ));
        }

        if request.valor <= Decimal::ZERO {
            return Err(AppError::Validation(
                "el valor del parámetro debe ser mayor que cero".to_string(),
            ));
        }

        self.modelo_repository
            .obtener_por_id(request.modelo_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Modelo no encontrado".to_string()))?;

        let parametro = self.repository.crear_reemplazando(&request).await?;

        log::info!(
            "💾 Parámetro {} = {} para modelo {} (almacén {:?})",
            parametro.tipo_parametro.as_str(),
            parametro.valor,
            parametro.modelo_id,
            parametro.almacen_id
        );

        Ok(ApiResponse::success_with_message(
            parametro,
            "Parámetro configurado exitosamente".to_string(),
        ))
    }

    pub async fn listar(&self, filtros: FiltrosParametros) -> Result<Vec<Parametro>, AppError> {
        self.repository.buscar(&filtros).await
    }
}
