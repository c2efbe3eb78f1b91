use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::evento_dto::FiltrosEventos;
use crate::models::evento::EventoNeumatico;
use crate::utils::errors::AppError;

pub struct EventoRepository {
    pool: PgPool,
}

impl EventoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar el registro inmutable del evento dentro de la transacción
    /// del motor de ciclo de vida.
    pub async fn insertar(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        evento: &EventoNeumatico,
    ) -> Result<EventoNeumatico, AppError> {
        let insertado = sqlx::query_as::<_, EventoNeumatico>(
            r#"
            INSERT INTO eventos_neumatico (
                id, neumatico_id, tipo_evento, usuario_id, fecha_evento,
                odometro_vehiculo_en_evento, profundidad_remanente_mm,
                profundidad_exterior_mm, profundidad_centro_mm, profundidad_interior_mm,
                presion_psi, costo_evento, proveedor_servicio_id, destino_almacen_id,
                vehiculo_id, posicion_id, motivo_desmontaje_destino,
                motivo_desecho_id_evento, profundidad_post_reencauche_mm,
                estado_ajuste, notas, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19, $20, $21, $22)
            RETURNING *
            "#,
        )
        .bind(evento.id)
        .bind(evento.neumatico_id)
        .bind(evento.tipo_evento)
        .bind(evento.usuario_id)
        .bind(evento.fecha_evento)
        .bind(evento.odometro_vehiculo_en_evento)
        .bind(evento.profundidad_remanente_mm)
        .bind(evento.profundidad_exterior_mm)
        .bind(evento.profundidad_centro_mm)
        .bind(evento.profundidad_interior_mm)
        .bind(evento.presion_psi)
        .bind(evento.costo_evento)
        .bind(evento.proveedor_servicio_id)
        .bind(evento.destino_almacen_id)
        .bind(evento.vehiculo_id)
        .bind(evento.posicion_id)
        .bind(evento.motivo_desmontaje_destino.as_deref())
        .bind(evento.motivo_desecho_id_evento)
        .bind(evento.profundidad_post_reencauche_mm)
        .bind(evento.estado_ajuste.as_deref())
        .bind(evento.notas.as_deref())
        .bind(evento.created_at)
        .fetch_one(&mut **tx)
        .await?;

        Ok(insertado)
    }

    /// Historial completo de un neumático, del evento más reciente al
    /// más antiguo.
    pub async fn historial_de_neumatico(
        &self,
        neumatico_id: Uuid,
    ) -> Result<Vec<EventoNeumatico>, AppError> {
        let eventos = sqlx::query_as::<_, EventoNeumatico>(
            r#"
            SELECT * FROM eventos_neumatico
            WHERE neumatico_id = $1
            ORDER BY fecha_evento DESC, created_at DESC
            "#,
        )
        .bind(neumatico_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(eventos)
    }

    pub async fn buscar(
        &self,
        filtros: &FiltrosEventos,
        desde: Option<NaiveDate>,
        hasta: Option<NaiveDate>,
    ) -> Result<Vec<EventoNeumatico>, AppError> {
        let limit = filtros.limit.unwrap_or(50).clamp(1, 500);
        let offset = filtros.offset.unwrap_or(0).max(0);

        let eventos = sqlx::query_as::<_, EventoNeumatico>(
            r#"
            SELECT * FROM eventos_neumatico
            WHERE ($1::uuid IS NULL OR neumatico_id = $1)
              AND ($2::tipo_evento_neumatico IS NULL OR tipo_evento = $2)
              AND ($3::uuid IS NULL OR vehiculo_id = $3)
              AND ($4::uuid IS NULL OR usuario_id = $4)
              AND ($5::date IS NULL OR fecha_evento >= $5)
              AND ($6::date IS NULL OR fecha_evento <= $6)
            ORDER BY fecha_evento DESC, created_at DESC
            LIMIT $7 OFFSET $8
            "#,
        )
        .bind(filtros.neumatico_id)
        .bind(filtros.tipo_evento)
        .bind(filtros.vehiculo_id)
        .bind(filtros.usuario_id)
        .bind(desde)
        .bind(hasta)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(eventos)
    }
}
