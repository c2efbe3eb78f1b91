use crate::dto::neumatico_dto::{FiltrosNeumaticos, NeumaticoResponse};
use crate::dto::vehiculo_dto::{ActualizarVehiculoRequest, CrearVehiculoRequest};
use crate::dto::ApiResponse;
use crate::models::vehiculo::{Posicion, TipoVehiculo, Vehiculo};
use crate::repositories::neumatico_repository::NeumaticoRepository;
use crate::repositories::vehiculo_repository::VehiculoRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct VehiculoController {
    repository: VehiculoRepository,
    neumatico_repository: NeumaticoRepository,
}

impl VehiculoController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehiculoRepository::new(pool.clone()),
            neumatico_repository: NeumaticoRepository::new(pool),
        }
    }

    pub async fn crear(
        &self,
        request: CrearVehiculoRequest,
    ) -> Result<ApiResponse<Vehiculo>, AppError> {
        request.validate()?;

        // El tipo define las posiciones montables, tiene que existir
        let tipos = self.repository.listar_tipos().await?;
        if !tipos.iter().any(|t| t.id == request.tipo_vehiculo_id) {
            return Err(AppError::NotFound(
                "Tipo de vehículo no encontrado".to_string(),
            ));
        }

        let vehiculo = self.repository.crear(&request).await?;

        Ok(ApiResponse::success_with_message(
            vehiculo,
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn obtener(&self, id: Uuid) -> Result<Vehiculo, AppError> {
        self.repository
            .obtener_por_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))
    }

    pub async fn listar(&self) -> Result<Vec<Vehiculo>, AppError> {
        self.repository.listar().await
    }

    pub async fn actualizar(
        &self,
        id: Uuid,
        request: ActualizarVehiculoRequest,
    ) -> Result<ApiResponse<Vehiculo>, AppError> {
        request.validate()?;
        let vehiculo = self.repository.actualizar(id, &request).await?;

        Ok(ApiResponse::success_with_message(
            vehiculo,
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn listar_tipos(&self) -> Result<Vec<TipoVehiculo>, AppError> {
        self.repository.listar_tipos().await
    }

    /// Posiciones montables del vehículo según su tipo
    pub async fn posiciones(&self, id: Uuid) -> Result<Vec<Posicion>, AppError> {
        let vehiculo = self.obtener(id).await?;
        self.repository
            .posiciones_de_tipo(vehiculo.tipo_vehiculo_id)
            .await
    }

    /// Neumáticos actualmente instalados en el vehículo
    pub async fn neumaticos(&self, id: Uuid) -> Result<Vec<NeumaticoResponse>, AppError> {
        self.obtener(id).await?;

        let filtros = FiltrosNeumaticos {
            estado: None,
            modelo_id: None,
            almacen_id: None,
            vehiculo_id: Some(id),
            numero_serie: None,
            limit: None,
            offset: None,
        };

        let neumaticos = self.neumatico_repository.buscar(&filtros).await?;
        Ok(neumaticos.into_iter().map(NeumaticoResponse::from).collect())
    }
}
