use async_trait::async_trait;

use crate::models::alerta::Alerta;

/// Salida de alertas hacia el mundo exterior (correo, webhook, etc.).
/// Mejor esfuerzo: una entrega fallida jamás afecta a la alerta ya
/// persistida.
#[async_trait]
pub trait NotificadorAlertas: Send + Sync {
    async fn deliver(&self, alerta: &Alerta);
}

/// Implementación por defecto: deja la alerta en el log del proceso.
pub struct NotificadorLog;

#[async_trait]
impl NotificadorAlertas for NotificadorLog {
    async fn deliver(&self, alerta: &Alerta) {
        log::info!(
            "🔔 Alerta {} [{}] {}: {}",
            alerta.id,
            alerta.severidad.as_str(),
            alerta.tipo_alerta.as_str(),
            alerta.descripcion
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Notificador de prueba que acumula lo entregado.
    pub struct NotificadorMemoria {
        pub entregadas: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl NotificadorAlertas for NotificadorMemoria {
        async fn deliver(&self, alerta: &Alerta) {
            self.entregadas
                .lock()
                .unwrap()
                .push(alerta.descripcion.clone());
        }
    }

    #[tokio::test]
    async fn notificador_log_no_entra_en_panico() {
        use crate::models::alerta::{DeteccionAlerta, SeveridadAlerta, TipoAlerta};
        use serde_json::json;

        let deteccion = DeteccionAlerta::para_neumatico(
            TipoAlerta::ProfundidadBaja,
            SeveridadAlerta::High,
            uuid::Uuid::new_v4(),
            "Profundidad 2.5 mm por debajo del umbral mínimo de 3.0 mm".to_string(),
            json!({"profundidad_medida_mm": 2.5}),
        );

        let alerta = Alerta {
            id: uuid::Uuid::new_v4(),
            tipo_alerta: deteccion.tipo_alerta,
            severidad: deteccion.severidad,
            descripcion: deteccion.descripcion.clone(),
            neumatico_id: deteccion.neumatico_id,
            vehiculo_id: deteccion.vehiculo_id,
            modelo_id: deteccion.modelo_id,
            almacen_id: deteccion.almacen_id,
            parametro_id: deteccion.parametro_id,
            datos_contexto: deteccion.datos_contexto.clone(),
            resuelta: false,
            fecha_resolucion: None,
            notas_resolucion: None,
            resuelto_por: None,
            created_at: chrono::Utc::now(),
        };

        NotificadorLog.deliver(&alerta).await;

        let memoria = NotificadorMemoria {
            entregadas: Mutex::new(Vec::new()),
        };
        memoria.deliver(&alerta).await;
        assert_eq!(memoria.entregadas.lock().unwrap().len(), 1);
    }
}
