mod config;
mod state;
mod database;
mod services;
mod utils;
mod models;
mod middleware;
mod controllers;
mod repositories;
mod routes;
mod dto;

use anyhow::Result;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::get,
    response::Json,
};
use std::net::SocketAddr;
use tokio::signal;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::{info, error};
use dotenvy::dotenv;
use serde_json::json;

use config::environment::EnvironmentConfig;
use config::ConfigAlertas;
use state::*;
use database::DatabaseConnection;
use middleware::auth::auth_middleware;
use middleware::cors::cors_layer;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🛞 Fleet Tires - Gestión de Neumáticos de Flota");
    info!("===============================================");

    // Inicializar base de datos (incluye migraciones)
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    let config = EnvironmentConfig::default();
    let config_alertas = ConfigAlertas::desde_entorno();
    let app_state = AppState::new(pool, config.clone(), config_alertas);

    // Rutas públicas: health check y autenticación
    let rutas_publicas = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/auth", routes::auth_routes::create_auth_router());

    // Rutas protegidas: todo lo demás exige un token válido
    let rutas_protegidas = Router::new()
        .nest("/api/auth", routes::auth_routes::create_auth_me_router())
        .nest("/api/eventos", routes::evento_routes::create_evento_router())
        .nest("/api/neumaticos", routes::neumatico_routes::create_neumatico_router())
        .nest("/api/alertas", routes::alerta_routes::create_alerta_router())
        .nest("/api/modelos", routes::modelo_routes::create_modelo_router())
        .nest("/api/vehiculos", routes::vehiculo_routes::create_vehiculo_router())
        .nest("/api/almacenes", routes::almacen_routes::create_almacen_router())
        .nest("/api/proveedores", routes::proveedor_routes::create_proveedor_router())
        .nest("/api/fabricantes", routes::catalogo_routes::create_fabricante_router())
        .nest("/api/motivos-desecho", routes::catalogo_routes::create_motivo_desecho_router())
        .nest("/api/parametros", routes::parametro_routes::create_parametro_router())
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    let app = rutas_publicas
        .merge(rutas_protegidas)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer(&config.cors_origins))
        .with_state(app_state);

    // Puerto del servidor
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Endpoints - Auth:");
    info!("   POST /api/auth/login - Iniciar sesión");
    info!("   POST /api/auth/registro - Registrar usuario");
    info!("   GET  /api/auth/me - Usuario actual");
    info!("🛞 Endpoints - Eventos:");
    info!("   POST /api/eventos - Registrar evento de neumático");
    info!("   GET  /api/eventos - Listar eventos");
    info!("🛞 Endpoints - Neumáticos:");
    info!("   GET  /api/neumaticos - Buscar neumáticos");
    info!("   GET  /api/neumaticos/:id - Obtener neumático");
    info!("   GET  /api/neumaticos/:id/eventos - Historial del neumático");
    info!("   GET  /api/neumaticos/:id/alertas - Alertas del neumático");
    info!("🚨 Endpoints - Alertas:");
    info!("   GET  /api/alertas - Buscar alertas");
    info!("   GET  /api/alertas/:id - Obtener alerta");
    info!("   POST /api/alertas/:id/resolver - Resolver alerta manualmente");
    info!("📋 Endpoints - Modelos:");
    info!("   POST /api/modelos - Crear modelo de neumático");
    info!("   GET  /api/modelos - Listar modelos");
    info!("   GET  /api/modelos/:id - Obtener modelo");
    info!("   PUT  /api/modelos/:id - Actualizar modelo");
    info!("🚛 Endpoints - Vehículos:");
    info!("   POST /api/vehiculos - Crear vehículo");
    info!("   GET  /api/vehiculos - Listar vehículos");
    info!("   GET  /api/vehiculos/tipos - Tipos de vehículo");
    info!("   GET  /api/vehiculos/:id - Obtener vehículo");
    info!("   PUT  /api/vehiculos/:id - Actualizar vehículo");
    info!("   GET  /api/vehiculos/:id/posiciones - Posiciones del vehículo");
    info!("   GET  /api/vehiculos/:id/neumaticos - Neumáticos instalados");
    info!("💾 Endpoints - Almacenes y proveedores:");
    info!("   POST /api/almacenes - Crear almacén");
    info!("   GET  /api/almacenes - Listar almacenes");
    info!("   GET  /api/almacenes/:id - Obtener almacén");
    info!("   POST /api/proveedores - Crear proveedor");
    info!("   GET  /api/proveedores - Listar proveedores");
    info!("   GET  /api/proveedores/:id - Obtener proveedor");
    info!("📋 Endpoints - Catálogos:");
    info!("   POST /api/fabricantes - Crear fabricante");
    info!("   GET  /api/fabricantes - Listar fabricantes");
    info!("   POST /api/motivos-desecho - Crear motivo de desecho");
    info!("   GET  /api/motivos-desecho - Listar motivos de desecho");
    info!("🧮 Endpoints - Parámetros:");
    info!("   POST /api/parametros - Configurar parámetro (admin)");
    info!("   GET  /api/parametros - Listar parámetros");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "fleet-tires-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
