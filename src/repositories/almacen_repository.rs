use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::catalogo_dto::CrearAlmacenRequest;
use crate::models::catalogo::Almacen;
use crate::utils::errors::{AppError, conflict_error};

pub struct AlmacenRepository {
    pool: PgPool,
}

impl AlmacenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn crear(&self, request: &CrearAlmacenRequest) -> Result<Almacen, AppError> {
        let almacen = sqlx::query_as::<_, Almacen>(
            r#"
            INSERT INTO almacenes (id, nombre, ubicacion, activo, created_at)
            VALUES ($1, $2, $3, TRUE, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.nombre.trim())
        .bind(request.ubicacion.as_deref())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.constraint() == Some("almacenes_nombre_key") => {
                conflict_error("Almacén", "nombre", &request.nombre)
            }
            _ => AppError::from(e),
        })?;

        Ok(almacen)
    }

    pub async fn obtener_por_id(&self, id: Uuid) -> Result<Option<Almacen>, AppError> {
        let almacen = sqlx::query_as::<_, Almacen>("SELECT * FROM almacenes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(almacen)
    }

    pub async fn listar(&self) -> Result<Vec<Almacen>, AppError> {
        let almacenes = sqlx::query_as::<_, Almacen>(
            "SELECT * FROM almacenes WHERE activo = TRUE ORDER BY nombre",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(almacenes)
    }
}
