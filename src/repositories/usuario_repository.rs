use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::usuario::{RolUsuario, Usuario};
use crate::utils::errors::{AppError, conflict_error};

pub struct UsuarioRepository {
    pool: PgPool,
}

impl UsuarioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn crear(
        &self,
        nombre_usuario: &str,
        email: &str,
        password_hash: &str,
        nombre_completo: Option<&str>,
        rol: RolUsuario,
    ) -> Result<Usuario, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            INSERT INTO usuarios (id, nombre_usuario, email, password_hash, nombre_completo, rol, activo, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(nombre_usuario.trim().to_lowercase())
        .bind(email.trim().to_lowercase())
        .bind(password_hash)
        .bind(nombre_completo)
        .bind(rol)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.constraint() == Some("usuarios_nombre_usuario_key") => {
                conflict_error("Usuario", "nombre_usuario", nombre_usuario)
            }
            sqlx::Error::Database(db) if db.constraint() == Some("usuarios_email_key") => {
                conflict_error("Usuario", "email", email)
            }
            _ => AppError::from(e),
        })?;

        Ok(usuario)
    }

    pub async fn obtener_por_nombre_usuario(
        &self,
        nombre_usuario: &str,
    ) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>(
            "SELECT * FROM usuarios WHERE nombre_usuario = $1 AND activo = TRUE",
        )
        .bind(nombre_usuario.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        Ok(usuario)
    }

    pub async fn obtener_por_id(&self, id: Uuid) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(usuario)
    }

    /// True si ya existe al menos un usuario. La tabla vacía habilita el
    /// registro inicial sin token.
    pub async fn hay_usuarios(&self) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM usuarios)")
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }
}
