use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::neumatico_dto::FiltrosNeumaticos;
use crate::models::neumatico::Neumatico;
use crate::utils::errors::{conflict_error, AppError};

pub struct NeumaticoRepository {
    pool: PgPool,
}

impl NeumaticoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar el neumático creado por un evento COMPRA, dentro de la
    /// transacción del evento. Una colisión de numero_serie es Conflict.
    pub async fn crear(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        neumatico: &Neumatico,
    ) -> Result<Neumatico, AppError> {
        let creado = sqlx::query_as::<_, Neumatico>(
            r#"
            INSERT INTO neumaticos (
                id, numero_serie, modelo_id, estado_actual, almacen_id, vehiculo_id,
                posicion_id, kilometraje_acumulado, km_instalacion, fecha_instalacion,
                reencauches_realizados, es_reencauchado, vida_actual, profundidad_inicial_mm,
                fecha_fabricacion, fecha_compra, costo_compra, proveedor_compra_id,
                motivo_desecho_id, fecha_desecho, creado_por, actualizado_por,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19, $20, $21, $22, $23, $24)
            RETURNING *
            "#,
        )
        .bind(neumatico.id)
        .bind(&neumatico.numero_serie)
        .bind(neumatico.modelo_id)
        .bind(neumatico.estado_actual)
        .bind(neumatico.almacen_id)
        .bind(neumatico.vehiculo_id)
        .bind(neumatico.posicion_id)
        .bind(neumatico.kilometraje_acumulado)
        .bind(neumatico.km_instalacion)
        .bind(neumatico.fecha_instalacion)
        .bind(neumatico.reencauches_realizados)
        .bind(neumatico.es_reencauchado)
        .bind(neumatico.vida_actual)
        .bind(neumatico.profundidad_inicial_mm)
        .bind(neumatico.fecha_fabricacion)
        .bind(neumatico.fecha_compra)
        .bind(neumatico.costo_compra)
        .bind(neumatico.proveedor_compra_id)
        .bind(neumatico.motivo_desecho_id)
        .bind(neumatico.fecha_desecho)
        .bind(neumatico.creado_por)
        .bind(neumatico.actualizado_por)
        .bind(neumatico.created_at)
        .bind(neumatico.updated_at)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.constraint() == Some("neumaticos_numero_serie_key") => {
                conflict_error("Neumático", "numero_serie", &neumatico.numero_serie)
            }
            _ => AppError::from(e),
        })?;

        Ok(creado)
    }

    pub async fn obtener_por_id(&self, id: Uuid) -> Result<Option<Neumatico>, AppError> {
        let neumatico = sqlx::query_as::<_, Neumatico>("SELECT * FROM neumaticos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(neumatico)
    }

    /// Cargar el neumático con bloqueo de escritura para serializar los
    /// eventos concurrentes sobre la misma fila.
    pub async fn obtener_para_actualizar(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<Neumatico>, AppError> {
        let neumatico =
            sqlx::query_as::<_, Neumatico>("SELECT * FROM neumaticos WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut **tx)
                .await?;

        Ok(neumatico)
    }

    pub async fn existe_numero_serie(&self, numero_serie: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM neumaticos WHERE numero_serie = $1)")
                .bind(numero_serie)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    /// Persistir el estado mutado por el motor. Solo cambian las columnas
    /// de ciclo de vida; identidad y datos de compra son inmutables.
    pub async fn actualizar(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        neumatico: &Neumatico,
    ) -> Result<Neumatico, AppError> {
        let actualizado = sqlx::query_as::<_, Neumatico>(
            r#"
            UPDATE neumaticos SET
                estado_actual = $2,
                almacen_id = $3,
                vehiculo_id = $4,
                posicion_id = $5,
                kilometraje_acumulado = $6,
                km_instalacion = $7,
                fecha_instalacion = $8,
                reencauches_realizados = $9,
                es_reencauchado = $10,
                vida_actual = $11,
                profundidad_inicial_mm = $12,
                motivo_desecho_id = $13,
                fecha_desecho = $14,
                actualizado_por = $15,
                updated_at = $16
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(neumatico.id)
        .bind(neumatico.estado_actual)
        .bind(neumatico.almacen_id)
        .bind(neumatico.vehiculo_id)
        .bind(neumatico.posicion_id)
        .bind(neumatico.kilometraje_acumulado)
        .bind(neumatico.km_instalacion)
        .bind(neumatico.fecha_instalacion)
        .bind(neumatico.reencauches_realizados)
        .bind(neumatico.es_reencauchado)
        .bind(neumatico.vida_actual)
        .bind(neumatico.profundidad_inicial_mm)
        .bind(neumatico.motivo_desecho_id)
        .bind(neumatico.fecha_desecho)
        .bind(neumatico.actualizado_por)
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.constraint() == Some("uq_posicion_instalada") => {
                AppError::Conflict("la posición ya está ocupada por otro neumático".to_string())
            }
            _ => AppError::from(e),
        })?;

        Ok(actualizado)
    }

    /// Neumático actualmente instalado en una posición de un vehículo,
    /// excluyendo opcionalmente al propio neumático en rotación.
    pub async fn instalado_en_posicion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vehiculo_id: Uuid,
        posicion_id: Uuid,
        excluir_id: Option<Uuid>,
    ) -> Result<Option<Uuid>, AppError> {
        let ocupante: Option<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT id FROM neumaticos
            WHERE vehiculo_id = $1
              AND posicion_id = $2
              AND estado_actual = 'INSTALADO'
              AND ($3::uuid IS NULL OR id <> $3)
            "#,
        )
        .bind(vehiculo_id)
        .bind(posicion_id)
        .bind(excluir_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(ocupante.map(|(id,)| id))
    }

    /// Stock EN_STOCK de un modelo en un almacén, visto desde la
    /// transacción en curso.
    pub async fn contar_en_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        modelo_id: Uuid,
        almacen_id: Uuid,
    ) -> Result<i64, AppError> {
        let cantidad: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM neumaticos
            WHERE modelo_id = $1 AND almacen_id = $2 AND estado_actual = 'EN_STOCK'
            "#,
        )
        .bind(modelo_id)
        .bind(almacen_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(cantidad)
    }

    pub async fn buscar(&self, filtros: &FiltrosNeumaticos) -> Result<Vec<Neumatico>, AppError> {
        let limit = filtros.limit.unwrap_or(50).clamp(1, 500);
        let offset = filtros.offset.unwrap_or(0).max(0);

        let neumaticos = sqlx::query_as::<_, Neumatico>(
            r#"
            SELECT * FROM neumaticos
            WHERE ($1::estado_neumatico IS NULL OR estado_actual = $1)
              AND ($2::uuid IS NULL OR modelo_id = $2)
              AND ($3::uuid IS NULL OR almacen_id = $3)
              AND ($4::uuid IS NULL OR vehiculo_id = $4)
              AND ($5::text IS NULL OR numero_serie ILIKE '%' || $5 || '%')
            ORDER BY created_at DESC
            LIMIT $6 OFFSET $7
            "#,
        )
        .bind(filtros.estado)
        .bind(filtros.modelo_id)
        .bind(filtros.almacen_id)
        .bind(filtros.vehiculo_id)
        .bind(filtros.numero_serie.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(neumaticos)
    }
}
