use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "fleet-tires-api");
}

#[tokio::test]
async fn test_ruta_desconocida_devuelve_404() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/no-existe")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ruta_estatica_gana_sobre_parametro() {
    // /api/vehiculos/tipos y /api/vehiculos/:id conviven en el router real;
    // el segmento estático debe resolverse antes que el parámetro
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/vehiculos/tipos")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["ruta"], "tipos");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/vehiculos/1234")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["ruta"], "por_id");
}

#[tokio::test]
async fn test_routers_publico_y_protegido_conviven_bajo_auth() {
    // El router real monta /api/auth dos veces (login/registro públicos,
    // me protegido); merge no debe chocar mientras las rutas difieran
    let publicas = Router::new()
        .route("/api/auth/login", post(|| async { "login" }))
        .route("/api/auth/registro", post(|| async { "registro" }));
    let protegidas = Router::new().route("/api/auth/me", get(|| async { "me" }));
    let app: Router = publicas.merge(protegidas);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_metodo_incorrecto_devuelve_405() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// Router de prueba con la misma forma que el de la aplicación
fn create_test_app() -> Router {
    Router::new()
        .route(
            "/health",
            get(|| async {
                Json(json!({
                    "status": "ok",
                    "service": "fleet-tires-api",
                }))
            }),
        )
        .route(
            "/api/vehiculos/tipos",
            get(|| async { Json(json!({ "ruta": "tipos" })) }),
        )
        .route(
            "/api/vehiculos/:id",
            get(|| async { Json(json!({ "ruta": "por_id" })) }),
        )
}
