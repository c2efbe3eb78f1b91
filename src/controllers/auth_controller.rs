use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegistrarUsuarioRequest, UsuarioResponse};
use crate::dto::ApiResponse;
use crate::models::usuario::RolUsuario;
use crate::repositories::usuario_repository::UsuarioRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};
use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct AuthController {
    repository: UsuarioRepository,
    jwt_config: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt_config: JwtConfig) -> Self {
        Self {
            repository: UsuarioRepository::new(pool),
            jwt_config,
        }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        // El mismo mensaje para usuario inexistente y password incorrecto
        let usuario = self
            .repository
            .obtener_por_nombre_usuario(&request.nombre_usuario)
            .await?
            .ok_or_else(|| AppError::Unauthorized("credenciales inválidas".to_string()))?;

        if !verify(&request.password, &usuario.password_hash)? {
            log::warn!(
                "⚠️ Intento de login fallido para el usuario {}",
                usuario.nombre_usuario
            );
            return Err(AppError::Unauthorized("credenciales inválidas".to_string()));
        }

        let token = generate_token(usuario.id, usuario.rol.as_str(), &self.jwt_config)?;
        log::info!("🔐 Login exitoso de {} ({})", usuario.nombre_usuario, usuario.rol.as_str());

        Ok(LoginResponse {
            token,
            usuario: UsuarioResponse::from(usuario),
        })
    }

    /// Registra un usuario nuevo. Requiere un actor administrador, salvo
    /// cuando la tabla está vacía: el primer registro queda abierto y la
    /// cuenta creada es ADMIN.
    pub async fn registrar(
        &self,
        request: RegistrarUsuarioRequest,
        actor_rol: Option<RolUsuario>,
    ) -> Result<ApiResponse<UsuarioResponse>, AppError> {
        request.validate()?;

        let bootstrap = !self.repository.hay_usuarios().await?;

        let rol = if bootstrap {
            log::info!("🔐 Registro inicial: la primera cuenta se crea como ADMIN");
            RolUsuario::Admin
        } else {
            match actor_rol {
                None => {
                    return Err(AppError::Unauthorized(
                        "se requiere un token para registrar usuarios".to_string(),
                    ))
                }
                Some(rol) if !rol.puede_administrar() => {
                    return Err(AppError::Forbidden(
                        "solo un administrador puede registrar usuarios".to_string(),
                    ))
                }
                Some(_) => request.rol.unwrap_or(RolUsuario::Operador),
            }
        };

        let password_hash = hash(&request.password, DEFAULT_COST)?;

        let usuario = self
            .repository
            .crear(
                &request.nombre_usuario,
                &request.email,
                &password_hash,
                request.nombre_completo.as_deref(),
                rol,
            )
            .await?;

        log::info!(
            "✅ Usuario {} registrado con rol {}",
            usuario.nombre_usuario,
            usuario.rol.as_str()
        );

        Ok(ApiResponse::success_with_message(
            UsuarioResponse::from(usuario),
            "Usuario registrado exitosamente".to_string(),
        ))
    }

    pub async fn me(&self, usuario_id: Uuid) -> Result<UsuarioResponse, AppError> {
        let usuario = self
            .repository
            .obtener_por_id(usuario_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        Ok(UsuarioResponse::from(usuario))
    }
}
