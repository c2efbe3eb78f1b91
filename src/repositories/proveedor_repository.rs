use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::catalogo_dto::CrearProveedorRequest;
use crate::models::catalogo::Proveedor;
use crate::utils::errors::{AppError, conflict_error};

pub struct ProveedorRepository {
    pool: PgPool,
}

impl ProveedorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn crear(&self, request: &CrearProveedorRequest) -> Result<Proveedor, AppError> {
        let proveedor = sqlx::query_as::<_, Proveedor>(
            r#"
            INSERT INTO proveedores (id, nombre, ruc, telefono, email, es_proveedor_servicio, activo, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.nombre.trim())
        .bind(request.ruc.as_deref())
        .bind(request.telefono.as_deref())
        .bind(request.email.as_deref())
        .bind(request.es_proveedor_servicio.unwrap_or(false))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.constraint() == Some("proveedores_nombre_key") => {
                conflict_error("Proveedor", "nombre", &request.nombre)
            }
            _ => AppError::from(e),
        })?;

        Ok(proveedor)
    }

    pub async fn obtener_por_id(&self, id: Uuid) -> Result<Option<Proveedor>, AppError> {
        let proveedor = sqlx::query_as::<_, Proveedor>("SELECT * FROM proveedores WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(proveedor)
    }

    pub async fn listar(&self) -> Result<Vec<Proveedor>, AppError> {
        let proveedores = sqlx::query_as::<_, Proveedor>(
            "SELECT * FROM proveedores WHERE activo = TRUE ORDER BY nombre",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(proveedores)
    }
}
