pub mod alerta_repository;
pub mod almacen_repository;
pub mod catalogo_repository;
pub mod evento_repository;
pub mod modelo_repository;
pub mod neumatico_repository;
pub mod parametro_repository;
pub mod proveedor_repository;
pub mod usuario_repository;
pub mod vehiculo_repository;

pub use alerta_repository::AlertaRepository;
pub use almacen_repository::AlmacenRepository;
pub use catalogo_repository::CatalogoRepository;
pub use evento_repository::EventoRepository;
pub use modelo_repository::ModeloRepository;
pub use neumatico_repository::NeumaticoRepository;
pub use parametro_repository::ParametroRepository;
pub use proveedor_repository::ProveedorRepository;
pub use usuario_repository::UsuarioRepository;
pub use vehiculo_repository::VehiculoRepository;
