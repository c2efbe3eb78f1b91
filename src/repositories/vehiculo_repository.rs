use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::vehiculo_dto::{ActualizarVehiculoRequest, CrearVehiculoRequest};
use crate::models::vehiculo::{ClasePeso, Posicion, TipoVehiculo, Vehiculo};
use crate::utils::errors::{AppError, conflict_error, not_found_error};

pub struct VehiculoRepository {
    pool: PgPool,
}

impl VehiculoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn crear(&self, request: &CrearVehiculoRequest) -> Result<Vehiculo, AppError> {
        let vehiculo = sqlx::query_as::<_, Vehiculo>(
            r#"
            INSERT INTO vehiculos (id, placa, tipo_vehiculo_id, marca, modelo, anio, activo, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.placa.trim().to_uppercase())
        .bind(request.tipo_vehiculo_id)
        .bind(request.marca.as_deref())
        .bind(request.modelo.as_deref())
        .bind(request.anio)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.constraint() == Some("vehiculos_placa_key") => {
                conflict_error("Vehículo", "placa", &request.placa)
            }
            _ => AppError::from(e),
        })?;

        Ok(vehiculo)
    }

    pub async fn obtener_por_id(&self, id: Uuid) -> Result<Option<Vehiculo>, AppError> {
        let vehiculo = sqlx::query_as::<_, Vehiculo>("SELECT * FROM vehiculos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehiculo)
    }

    pub async fn listar(&self) -> Result<Vec<Vehiculo>, AppError> {
        let vehiculos = sqlx::query_as::<_, Vehiculo>(
            "SELECT * FROM vehiculos WHERE activo = TRUE ORDER BY placa",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vehiculos)
    }

    pub async fn actualizar(
        &self,
        id: Uuid,
        request: &ActualizarVehiculoRequest,
    ) -> Result<Vehiculo, AppError> {
        let actual = self
            .obtener_por_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", &id.to_string()))?;

        let placa = request
            .placa
            .as_ref()
            .map(|p| p.trim().to_uppercase())
            .unwrap_or(actual.placa);

        let vehiculo = sqlx::query_as::<_, Vehiculo>(
            r#"
            UPDATE vehiculos
            SET placa = $2, marca = $3, modelo = $4, anio = $5, activo = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&placa)
        .bind(request.marca.as_ref().or(actual.marca.as_ref()))
        .bind(request.modelo.as_ref().or(actual.modelo.as_ref()))
        .bind(request.anio.or(actual.anio))
        .bind(request.activo.unwrap_or(actual.activo))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.constraint() == Some("vehiculos_placa_key") => {
                conflict_error("Vehículo", "placa", &placa)
            }
            _ => AppError::from(e),
        })?;

        Ok(vehiculo)
    }

    pub async fn listar_tipos(&self) -> Result<Vec<TipoVehiculo>, AppError> {
        let tipos = sqlx::query_as::<_, TipoVehiculo>(
            "SELECT * FROM tipos_vehiculo WHERE activo = TRUE ORDER BY nombre",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tipos)
    }

    pub async fn obtener_posicion(&self, id: Uuid) -> Result<Option<Posicion>, AppError> {
        let posicion = sqlx::query_as::<_, Posicion>("SELECT * FROM posiciones WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(posicion)
    }

    pub async fn posiciones_de_tipo(
        &self,
        tipo_vehiculo_id: Uuid,
    ) -> Result<Vec<Posicion>, AppError> {
        let posiciones = sqlx::query_as::<_, Posicion>(
            r#"
            SELECT * FROM posiciones
            WHERE tipo_vehiculo_id = $1 AND activo = TRUE
            ORDER BY eje, codigo
            "#,
        )
        .bind(tipo_vehiculo_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(posiciones)
    }

    /// Clase de peso del tipo del vehículo, para el umbral de desgaste
    /// irregular.
    pub async fn clase_peso_de_vehiculo(
        &self,
        vehiculo_id: Uuid,
    ) -> Result<Option<ClasePeso>, AppError> {
        let clase: Option<(ClasePeso,)> = sqlx::query_as(
            r#"
            SELECT t.clase_peso
            FROM vehiculos v
            JOIN tipos_vehiculo t ON t.id = v.tipo_vehiculo_id
            WHERE v.id = $1
            "#,
        )
        .bind(vehiculo_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(clase.map(|(c,)| c))
    }
}
