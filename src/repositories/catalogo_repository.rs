use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::catalogo_dto::{CrearFabricanteRequest, CrearMotivoDesechoRequest};
use crate::models::catalogo::{Fabricante, MotivoDesecho};
use crate::utils::errors::{AppError, conflict_error};

/// Catálogos chicos sin lógica propia: fabricantes y motivos de desecho.
pub struct CatalogoRepository {
    pool: PgPool,
}

impl CatalogoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn crear_fabricante(
        &self,
        request: &CrearFabricanteRequest,
    ) -> Result<Fabricante, AppError> {
        let fabricante = sqlx::query_as::<_, Fabricante>(
            r#"
            INSERT INTO fabricantes (id, nombre, pais, activo, created_at)
            VALUES ($1, $2, $3, TRUE, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.nombre.trim())
        .bind(request.pais.as_deref())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.constraint() == Some("fabricantes_nombre_key") => {
                conflict_error("Fabricante", "nombre", &request.nombre)
            }
            _ => AppError::from(e),
        })?;

        Ok(fabricante)
    }

    pub async fn obtener_fabricante(&self, id: Uuid) -> Result<Option<Fabricante>, AppError> {
        let fabricante = sqlx::query_as::<_, Fabricante>("SELECT * FROM fabricantes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(fabricante)
    }

    pub async fn listar_fabricantes(&self) -> Result<Vec<Fabricante>, AppError> {
        let fabricantes = sqlx::query_as::<_, Fabricante>(
            "SELECT * FROM fabricantes WHERE activo = TRUE ORDER BY nombre",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(fabricantes)
    }

    pub async fn crear_motivo_desecho(
        &self,
        request: &CrearMotivoDesechoRequest,
    ) -> Result<MotivoDesecho, AppError> {
        let motivo = sqlx::query_as::<_, MotivoDesecho>(
            r#"
            INSERT INTO motivos_desecho (id, codigo, descripcion, activo)
            VALUES ($1, $2, $3, TRUE)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.codigo.trim().to_uppercase())
        .bind(request.descripcion.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.constraint() == Some("motivos_desecho_codigo_key") => {
                conflict_error("Motivo de desecho", "codigo", &request.codigo)
            }
            _ => AppError::from(e),
        })?;

        Ok(motivo)
    }

    pub async fn obtener_motivo_desecho(
        &self,
        id: Uuid,
    ) -> Result<Option<MotivoDesecho>, AppError> {
        let motivo =
            sqlx::query_as::<_, MotivoDesecho>("SELECT * FROM motivos_desecho WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(motivo)
    }

    pub async fn listar_motivos_desecho(&self) -> Result<Vec<MotivoDesecho>, AppError> {
        let motivos = sqlx::query_as::<_, MotivoDesecho>(
            "SELECT * FROM motivos_desecho WHERE activo = TRUE ORDER BY codigo",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(motivos)
    }
}
