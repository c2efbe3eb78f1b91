//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: el motor
//! de ciclo de vida de neumáticos, el motor de alertas y la entrega de
//! notificaciones.

pub mod alerta_service;
pub mod evento_service;
pub mod notificacion_service;

pub use alerta_service::AlertaService;
pub use evento_service::EventoService;
pub use notificacion_service::{NotificadorAlertas, NotificadorLog};
