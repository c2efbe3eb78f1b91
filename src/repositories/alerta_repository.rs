use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::alerta_dto::FiltrosAlertas;
use crate::models::alerta::{Alerta, DeteccionAlerta, TipoAlerta};
use crate::utils::errors::AppError;

pub struct AlertaRepository {
    pool: PgPool,
}

impl AlertaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Alerta abierta de un tipo para un neumático. El motor garantiza a lo
    /// sumo una, así que cero o una fila.
    pub async fn abierta_de_neumatico(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tipo: TipoAlerta,
        neumatico_id: Uuid,
    ) -> Result<Option<Alerta>, AppError> {
        let alerta = sqlx::query_as::<_, Alerta>(
            r#"
            SELECT * FROM alertas
            WHERE tipo_alerta = $1 AND neumatico_id = $2 AND resuelta = FALSE
            "#,
        )
        .bind(tipo)
        .bind(neumatico_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(alerta)
    }

    /// Alerta abierta de stock para un modelo en un almacén. Las alertas de
    /// stock no referencian neumático.
    pub async fn abierta_de_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        modelo_id: Uuid,
        almacen_id: Uuid,
    ) -> Result<Option<Alerta>, AppError> {
        let alerta = sqlx::query_as::<_, Alerta>(
            r#"
            SELECT * FROM alertas
            WHERE tipo_alerta = 'STOCK_MINIMO'
              AND modelo_id = $1
              AND almacen_id = $2
              AND neumatico_id IS NULL
              AND resuelta = FALSE
            "#,
        )
        .bind(modelo_id)
        .bind(almacen_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(alerta)
    }

    pub async fn crear(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        deteccion: &DeteccionAlerta,
    ) -> Result<Alerta, AppError> {
        let alerta = sqlx::query_as::<_, Alerta>(
            r#"
            INSERT INTO alertas (
                id, tipo_alerta, severidad, descripcion, neumatico_id, vehiculo_id,
                modelo_id, almacen_id, parametro_id, datos_contexto, resuelta, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, FALSE, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(deteccion.tipo_alerta)
        .bind(deteccion.severidad)
        .bind(&deteccion.descripcion)
        .bind(deteccion.neumatico_id)
        .bind(deteccion.vehiculo_id)
        .bind(deteccion.modelo_id)
        .bind(deteccion.almacen_id)
        .bind(deteccion.parametro_id)
        .bind(&deteccion.datos_contexto)
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await?;

        Ok(alerta)
    }

    /// Cierre automático: la condición dejó de cumplirse. Marca resueltas
    /// todas las alertas abiertas del tipo para el neumático, con nota
    /// generada y sin actor humano.
    pub async fn resolver_abiertas_de_neumatico(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tipo: TipoAlerta,
        neumatico_id: Uuid,
        notas: &str,
    ) -> Result<Vec<Alerta>, AppError> {
        let resueltas = sqlx::query_as::<_, Alerta>(
            r#"
            UPDATE alertas
            SET resuelta = TRUE, fecha_resolucion = $3, notas_resolucion = $4
            WHERE tipo_alerta = $1 AND neumatico_id = $2 AND resuelta = FALSE
            RETURNING *
            "#,
        )
        .bind(tipo)
        .bind(neumatico_id)
        .bind(Utc::now())
        .bind(notas)
        .fetch_all(&mut **tx)
        .await?;

        Ok(resueltas)
    }

    /// Cierre automático de la alerta de stock de un modelo en un almacén.
    pub async fn resolver_abiertas_de_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        modelo_id: Uuid,
        almacen_id: Uuid,
        notas: &str,
    ) -> Result<Vec<Alerta>, AppError> {
        let resueltas = sqlx::query_as::<_, Alerta>(
            r#"
            UPDATE alertas
            SET resuelta = TRUE, fecha_resolucion = $3, notas_resolucion = $4
            WHERE tipo_alerta = 'STOCK_MINIMO'
              AND modelo_id = $1
              AND almacen_id = $2
              AND neumatico_id IS NULL
              AND resuelta = FALSE
            RETURNING *
            "#,
        )
        .bind(modelo_id)
        .bind(almacen_id)
        .bind(Utc::now())
        .bind(notas)
        .fetch_all(&mut **tx)
        .await?;

        Ok(resueltas)
    }

    /// Resolución manual desde la API. Devuelve None si la alerta ya no
    /// estaba abierta al momento del UPDATE.
    pub async fn resolver_manual(
        &self,
        alerta_id: Uuid,
        notas: &str,
        resuelto_por: Uuid,
    ) -> Result<Option<Alerta>, AppError> {
        let alerta = sqlx::query_as::<_, Alerta>(
            r#"
            UPDATE alertas
            SET resuelta = TRUE, fecha_resolucion = $2, notas_resolucion = $3, resuelto_por = $4
            WHERE id = $1 AND resuelta = FALSE
            RETURNING *
            "#,
        )
        .bind(alerta_id)
        .bind(Utc::now())
        .bind(notas)
        .bind(resuelto_por)
        .fetch_optional(&self.pool)
        .await?;

        Ok(alerta)
    }

    pub async fn obtener_por_id(&self, id: Uuid) -> Result<Option<Alerta>, AppError> {
        let alerta = sqlx::query_as::<_, Alerta>("SELECT * FROM alertas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(alerta)
    }

    /// Alertas de un neumático, abiertas primero y luego por antigüedad.
    pub async fn de_neumatico(&self, neumatico_id: Uuid) -> Result<Vec<Alerta>, AppError> {
        let alertas = sqlx::query_as::<_, Alerta>(
            r#"
            SELECT * FROM alertas
            WHERE neumatico_id = $1
            ORDER BY resuelta ASC, created_at DESC
            "#,
        )
        .bind(neumatico_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(alertas)
    }

    pub async fn buscar(&self, filtros: &FiltrosAlertas) -> Result<Vec<Alerta>, AppError> {
        let limit = filtros.limit.unwrap_or(50).clamp(1, 500);
        let offset = filtros.offset.unwrap_or(0).max(0);

        let alertas = sqlx::query_as::<_, Alerta>(
            r#"
            SELECT * FROM alertas
            WHERE ($1::tipo_alerta IS NULL OR tipo_alerta = $1)
              AND ($2::severidad_alerta IS NULL OR severidad = $2)
              AND ($3::boolean IS NULL OR resuelta = $3)
              AND ($4::uuid IS NULL OR neumatico_id = $4)
              AND ($5::uuid IS NULL OR vehiculo_id = $5)
              AND ($6::uuid IS NULL OR modelo_id = $6)
              AND ($7::uuid IS NULL OR almacen_id = $7)
            ORDER BY created_at DESC
            LIMIT $8 OFFSET $9
            "#,
        )
        .bind(filtros.tipo_alerta)
        .bind(filtros.severidad)
        .bind(filtros.resuelta)
        .bind(filtros.neumatico_id)
        .bind(filtros.vehiculo_id)
        .bind(filtros.modelo_id)
        .bind(filtros.almacen_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(alertas)
    }
}
