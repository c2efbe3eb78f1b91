//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod alerta;
pub mod catalogo;
pub mod comando;
pub mod evento;
pub mod modelo_neumatico;
pub mod neumatico;
pub mod parametro;
pub mod usuario;
pub mod vehiculo;
