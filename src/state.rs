//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::config::ConfigAlertas;
use crate::services::notificacion_service::{NotificadorAlertas, NotificadorLog};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub config_alertas: ConfigAlertas,
    pub notificador: Arc<dyn NotificadorAlertas>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, config_alertas: ConfigAlertas) -> Self {
        Self {
            pool,
            config,
            config_alertas,
            notificador: Arc::new(NotificadorLog),
        }
    }
}
