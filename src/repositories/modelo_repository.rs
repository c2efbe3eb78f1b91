use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::modelo_dto::{ActualizarModeloRequest, CrearModeloRequest};
use crate::models::modelo_neumatico::ModeloNeumatico;
use crate::utils::errors::{AppError, conflict_error, not_found_error};

pub struct ModeloRepository {
    pool: PgPool,
}

impl ModeloRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn crear(&self, request: &CrearModeloRequest) -> Result<ModeloNeumatico, AppError> {
        let modelo = sqlx::query_as::<_, ModeloNeumatico>(
            r#"
            INSERT INTO modelos_neumatico (
                id, fabricante_id, nombre, medida, profundidad_original_mm,
                presion_recomendada_psi, permite_reencauche, reencauches_maximos,
                activo, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.fabricante_id)
        .bind(&request.nombre)
        .bind(&request.medida)
        .bind(request.profundidad_original_mm)
        .bind(request.presion_recomendada_psi)
        .bind(request.permite_reencauche.unwrap_or(true))
        .bind(request.reencauches_maximos.unwrap_or(0))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db)
                if db.constraint() == Some("modelos_neumatico_fabricante_id_nombre_medida_key") =>
            {
                conflict_error("Modelo", "nombre/medida", &request.nombre)
            }
            _ => AppError::from(e),
        })?;

        Ok(modelo)
    }

    pub async fn obtener_por_id(&self, id: Uuid) -> Result<Option<ModeloNeumatico>, AppError> {
        let modelo =
            sqlx::query_as::<_, ModeloNeumatico>("SELECT * FROM modelos_neumatico WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(modelo)
    }

    pub async fn listar(&self) -> Result<Vec<ModeloNeumatico>, AppError> {
        let modelos = sqlx::query_as::<_, ModeloNeumatico>(
            "SELECT * FROM modelos_neumatico WHERE activo = TRUE ORDER BY nombre, medida",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(modelos)
    }

    pub async fn actualizar(
        &self,
        id: Uuid,
        request: &ActualizarModeloRequest,
    ) -> Result<ModeloNeumatico, AppError> {
        let actual = self
            .obtener_por_id(id)
            .await?
            .ok_or_else(|| not_found_error("Modelo", &id.to_string()))?;

        let modelo = sqlx::query_as::<_, ModeloNeumatico>(
            r#"
            UPDATE modelos_neumatico
            SET nombre = $2, medida = $3, profundidad_original_mm = $4,
                presion_recomendada_psi = $5, permite_reencauche = $6,
                reencauches_maximos = $7, activo = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.nombre.as_ref().unwrap_or(&actual.nombre))
        .bind(request.medida.as_ref().unwrap_or(&actual.medida))
        .bind(
            request
                .profundidad_original_mm
                .unwrap_or(actual.profundidad_original_mm),
        )
        .bind(
            request
                .presion_recomendada_psi
                .or(actual.presion_recomendada_psi),
        )
        .bind(
            request
                .permite_reencauche
                .unwrap_or(actual.permite_reencauche),
        )
        .bind(
            request
                .reencauches_maximos
                .unwrap_or(actual.reencauches_maximos),
        )
        .bind(request.activo.unwrap_or(actual.activo))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db)
                if db.constraint() == Some("modelos_neumatico_fabricante_id_nombre_medida_key") =>
            {
                conflict_error(
                    "Modelo",
                    "nombre/medida",
                    request.nombre.as_ref().unwrap_or(&actual.nombre),
                )
            }
            _ => AppError::from(e),
        })?;

        Ok(modelo)
    }
}
