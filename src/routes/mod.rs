pub mod alerta_routes;
pub mod almacen_routes;
pub mod auth_routes;
pub mod catalogo_routes;
pub mod evento_routes;
pub mod modelo_routes;
pub mod neumatico_routes;
pub mod parametro_routes;
pub mod proveedor_routes;
pub mod vehiculo_routes;
