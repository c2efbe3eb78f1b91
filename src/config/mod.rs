//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de base de datos, variables de entorno
//! y los umbrales del motor de alertas.

pub mod alertas;
pub mod database;
pub mod environment;

pub use alertas::ConfigAlertas;
pub use environment::*;
