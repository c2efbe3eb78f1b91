//! Controllers HTTP
//!
//! Cada controller arma sus repositorios sobre el pool y expone las
//! operaciones que las rutas publican.

pub mod alerta_controller;
pub mod almacen_controller;
pub mod auth_controller;
pub mod catalogo_controller;
pub mod evento_controller;
pub mod modelo_controller;
pub mod neumatico_controller;
pub mod parametro_controller;
pub mod proveedor_controller;
pub mod vehiculo_controller;
