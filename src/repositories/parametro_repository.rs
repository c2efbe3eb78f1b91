use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::parametro_dto::{CrearParametroRequest, FiltrosParametros};
use crate::models::parametro::{Parametro, TipoParametro};
use crate::utils::errors::AppError;

pub struct ParametroRepository {
    pool: PgPool,
}

impl ParametroRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Parámetro vigente para un modelo, con precedencia del ámbito: la fila
    /// del almacén pisa a la fila general del modelo.
    pub async fn vigente(
        &self,
        tipo: TipoParametro,
        modelo_id: Uuid,
        almacen_id: Option<Uuid>,
    ) -> Result<Option<Parametro>, AppError> {
        let parametro = sqlx::query_as::<_, Parametro>(
            r#"
            SELECT * FROM parametros
            WHERE tipo_parametro = $1
              AND modelo_id = $2
              AND activo = TRUE
              AND (almacen_id IS NULL OR almacen_id = $3)
            ORDER BY almacen_id NULLS LAST
            LIMIT 1
            "#,
        )
        .bind(tipo)
        .bind(modelo_id)
        .bind(almacen_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(parametro)
    }

    /// Alta de parámetro con reemplazo: desactiva la fila vigente del mismo
    /// (tipo, modelo, almacén) antes de insertar la nueva.
    pub async fn crear_reemplazando(
        &self,
        request: &CrearParametroRequest,
    ) -> Result<Parametro, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE parametros
            SET activo = FALSE
            WHERE tipo_parametro = $1
              AND modelo_id = $2
              AND almacen_id IS NOT DISTINCT FROM $3
              AND activo = TRUE
            "#,
        )
        .bind(request.tipo_parametro)
        .bind(request.modelo_id)
        .bind(request.almacen_id)
        .execute(&mut *tx)
        .await?;

        let parametro = sqlx::query_as::<_, Parametro>(
            r#"
            INSERT INTO parametros (id, tipo_parametro, modelo_id, almacen_id, valor, activo, created_at)
            VALUES ($1, $2, $3, $4, $5, TRUE, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.tipo_parametro)
        .bind(request.modelo_id)
        .bind(request.almacen_id)
        .bind(request.valor)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(parametro)
    }

    pub async fn buscar(&self, filtros: &FiltrosParametros) -> Result<Vec<Parametro>, AppError> {
        let parametros = sqlx::query_as::<_, Parametro>(
            r#"
            SELECT * FROM parametros
            WHERE activo = TRUE
              AND ($1::tipo_parametro IS NULL OR tipo_parametro = $1)
              AND ($2::uuid IS NULL OR modelo_id = $2)
              AND ($3::uuid IS NULL OR almacen_id = $3)
            ORDER BY tipo_parametro, modelo_id, almacen_id NULLS FIRST
            "#,
        )
        .bind(filtros.tipo_parametro)
        .bind(filtros.modelo_id)
        .bind(filtros.almacen_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(parametros)
    }
}
