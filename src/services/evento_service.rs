use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::ConfigAlertas;
use crate::dto::evento_dto::{RegistrarEventoRequest, RegistrarEventoResponse};
use crate::models::comando::{
    ComandoEvento, DatosAjusteInventario, DatosCompra, DatosDesecho, DatosDesmontaje,
    DatosInstalacion, DatosReencaucheSalida, DatosReparacionSalida, DatosRotacion, Operacion,
};
use crate::models::evento::EventoNeumatico;
use crate::models::modelo_neumatico::ModeloNeumatico;
use crate::models::neumatico::{EstadoNeumatico, Neumatico};
use crate::repositories::{
    AlmacenRepository, CatalogoRepository, EventoRepository, ModeloRepository,
    NeumaticoRepository, ProveedorRepository, VehiculoRepository,
};
use crate::services::alerta_service::{AlertaService, ResultadoAlertas};
use crate::services::notificacion_service::NotificadorAlertas;
use crate::utils::errors::{conflict_error, internal_error, not_found_error, AppError};

/// Motor de ciclo de vida: aplica un evento tipado sobre un neumático,
/// bloqueando su fila, y corre el motor de alertas en la misma
/// transacción. El evento, la mutación del neumático y las alertas se
/// confirman o revierten juntos.
pub struct EventoService {
    pool: PgPool,
    neumatico_repo: NeumaticoRepository,
    evento_repo: EventoRepository,
    modelo_repo: ModeloRepository,
    vehiculo_repo: VehiculoRepository,
    almacen_repo: AlmacenRepository,
    proveedor_repo: ProveedorRepository,
    catalogo_repo: CatalogoRepository,
    alerta_service: AlertaService,
    notificador: Arc<dyn NotificadorAlertas>,
}

impl EventoService {
    pub fn new(
        pool: PgPool,
        config_alertas: ConfigAlertas,
        notificador: Arc<dyn NotificadorAlertas>,
    ) -> Self {
        Self {
            neumatico_repo: NeumaticoRepository::new(pool.clone()),
            evento_repo: EventoRepository::new(pool.clone()),
            modelo_repo: ModeloRepository::new(pool.clone()),
            vehiculo_repo: VehiculoRepository::new(pool.clone()),
            almacen_repo: AlmacenRepository::new(pool.clone()),
            proveedor_repo: ProveedorRepository::new(pool.clone()),
            catalogo_repo: CatalogoRepository::new(pool.clone()),
            alerta_service: AlertaService::new(pool.clone(), config_alertas),
            notificador,
            pool,
        }
    }

    /// Punto de entrada del motor. `usuario_id` es el actor ya autenticado
    /// por la capa HTTP.
    pub async fn registrar_evento(
        &self,
        request: RegistrarEventoRequest,
        usuario_id: Uuid,
    ) -> Result<RegistrarEventoResponse, AppError> {
        let comando = ComandoEvento::parsear(&request)?;
        log::info!(
            "🛞 Evento {} solicitado por usuario {} (neumático {:?})",
            comando.tipo_evento(),
            usuario_id,
            comando.neumatico_id
        );

        self.validar_referencias(&comando).await?;

        let mut tx = self.pool.begin().await?;

        let mut neumatico = match &comando.operacion {
            Operacion::Compra(datos) => {
                if self
                    .neumatico_repo
                    .existe_numero_serie(&datos.numero_serie)
                    .await?
                {
                    return Err(conflict_error(
                        "Neumático",
                        "numero_serie",
                        &datos.numero_serie,
                    ));
                }
                let modelo = self
                    .modelo_repo
                    .obtener_por_id(datos.modelo_id)
                    .await?
                    .filter(|m| m.activo)
                    .ok_or_else(|| not_found_error("Modelo", &datos.modelo_id.to_string()))?;
                neumatico_de_compra(datos, &modelo, comando.fecha_evento, usuario_id)
            }
            _ => {
                let neumatico_id = comando
                    .neumatico_id
                    .ok_or_else(|| internal_error("comando sin neumatico_id tras el parseo"))?;
                let neumatico = self
                    .neumatico_repo
                    .obtener_para_actualizar(&mut tx, neumatico_id)
                    .await?
                    .ok_or_else(|| not_found_error("Neumático", &neumatico_id.to_string()))?;

                if neumatico.estado_actual.es_terminal() {
                    return Err(AppError::Conflict(format!(
                        "el neumático {} está desechado y no admite más eventos",
                        neumatico.id
                    )));
                }
                neumatico
            }
        };

        // El evento registra el contexto previo a la mutación (vehículo y
        // posición de los que el neumático sale, por ejemplo).
        let evento_nuevo = construir_evento(&comando, &neumatico, usuario_id);

        match &comando.operacion {
            Operacion::Compra(_) | Operacion::Inspeccion(_) => {}
            Operacion::Instalacion(datos) => {
                if let Some(ocupante) = self
                    .neumatico_repo
                    .instalado_en_posicion(&mut tx, datos.vehiculo_id, datos.posicion_id, None)
                    .await?
                {
                    return Err(AppError::Conflict(format!(
                        "la posición ya está ocupada por el neumático {}",
                        ocupante
                    )));
                }
                aplicar_instalacion(&mut neumatico, datos, comando.fecha_evento)?;
            }
            Operacion::Desmontaje(datos) => {
                aplicar_desmontaje(&mut neumatico, datos, comando.fecha_evento)?;
            }
            Operacion::Rotacion(datos) => {
                if let Some(ocupante) = self
                    .neumatico_repo
                    .instalado_en_posicion(
                        &mut tx,
                        datos.vehiculo_id,
                        datos.posicion_id,
                        Some(neumatico.id),
                    )
                    .await?
                {
                    return Err(AppError::Conflict(format!(
                        "la posición ya está ocupada por el neumático {}",
                        ocupante
                    )));
                }
                aplicar_rotacion(&mut neumatico, datos, comando.fecha_evento)?;
            }
            Operacion::ReparacionEntrada(_) => aplicar_reparacion_entrada(&mut neumatico)?,
            Operacion::ReparacionSalida(datos) => {
                aplicar_reparacion_salida(&mut neumatico, datos)?;
            }
            Operacion::ReencaucheEntrada(_) => {
                let modelo = self.modelo_del_neumatico(&neumatico).await?;
                aplicar_reencauche_entrada(&mut neumatico, &modelo)?;
            }
            Operacion::ReencaucheSalida(datos) => {
                aplicar_reencauche_salida(&mut neumatico, datos)?;
            }
            Operacion::Desecho(datos) => {
                aplicar_desecho(&mut neumatico, datos, comando.fecha_evento)?;
            }
            Operacion::AjusteInventario(datos) => {
                aplicar_ajuste_inventario(&mut neumatico, datos)?;
            }
        }

        let neumatico_guardado = match &comando.operacion {
            Operacion::Compra(_) => self.neumatico_repo.crear(&mut tx, &neumatico).await?,
            // Una inspección no muta al neumático
            Operacion::Inspeccion(_) => neumatico,
            _ => {
                neumatico.actualizado_por = usuario_id;
                self.neumatico_repo.actualizar(&mut tx, &neumatico).await?
            }
        };

        let evento = self.evento_repo.insertar(&mut tx, &evento_nuevo).await?;

        let alertas = self
            .alerta_service
            .verificar_y_crear_alertas(&mut tx, &neumatico_guardado, &evento)
            .await?;

        tx.commit().await?;

        log::info!(
            "✅ Evento {} registrado para neumático {} (estado {})",
            evento.tipo_evento,
            neumatico_guardado.id,
            neumatico_guardado.estado_actual
        );

        self.notificar_creadas(&alertas);

        Ok(RegistrarEventoResponse {
            neumatico: neumatico_guardado,
            evento,
            alertas_generadas: alertas.activas(),
        })
    }

    /// Entrega en segundo plano de las alertas recién creadas; la respuesta
    /// HTTP no espera al notificador.
    fn notificar_creadas(&self, resultado: &ResultadoAlertas) {
        if resultado.creadas.is_empty() {
            return;
        }

        let notificador = Arc::clone(&self.notificador);
        let creadas = resultado.creadas.clone();
        tokio::spawn(async move {
            for alerta in &creadas {
                notificador.deliver(alerta).await;
            }
        });
    }

    /// Verificación de catálogos referenciados por el comando. Entidad
    /// ausente o inactiva es NotFound; referencias incoherentes entre sí
    /// son Validation.
    async fn validar_referencias(&self, comando: &ComandoEvento) -> Result<(), AppError> {
        match &comando.operacion {
            Operacion::Compra(datos) => {
                self.almacen_activo(datos.destino_almacen_id).await?;
                self.proveedor_activo(datos.proveedor_compra_id, false)
                    .await?;
            }
            Operacion::Instalacion(datos) => {
                self.validar_vehiculo_y_posicion(datos.vehiculo_id, datos.posicion_id)
                    .await?;
            }
            Operacion::Rotacion(datos) => {
                self.validar_vehiculo_y_posicion(datos.vehiculo_id, datos.posicion_id)
                    .await?;
            }
            Operacion::Desmontaje(datos) => {
                if let Some(almacen_id) = datos.destino.almacen_destino() {
                    self.almacen_activo(almacen_id).await?;
                }
                if let Some(motivo_id) = datos.destino.motivo_desecho() {
                    self.motivo_desecho_activo(motivo_id).await?;
                }
            }
            Operacion::ReparacionEntrada(datos) => {
                if let Some(proveedor_id) = datos.proveedor_servicio_id {
                    self.proveedor_activo(proveedor_id, false).await?;
                }
            }
            Operacion::ReparacionSalida(datos) => {
                self.almacen_activo(datos.destino_almacen_id).await?;
                if let Some(proveedor_id) = datos.proveedor_servicio_id {
                    self.proveedor_activo(proveedor_id, false).await?;
                }
            }
            Operacion::ReencaucheEntrada(datos) => {
                self.proveedor_activo(datos.proveedor_servicio_id, true)
                    .await?;
            }
            Operacion::ReencaucheSalida(datos) => {
                self.almacen_activo(datos.destino_almacen_id).await?;
                if let Some(proveedor_id) = datos.proveedor_servicio_id {
                    self.proveedor_activo(proveedor_id, false).await?;
                }
            }
            Operacion::Desecho(datos) => {
                self.motivo_desecho_activo(datos.motivo_desecho_id).await?;
            }
            Operacion::AjusteInventario(datos) => {
                self.almacen_activo(datos.destino_almacen_id).await?;
            }
            Operacion::Inspeccion(_) => {}
        }

        Ok(())
    }

    async fn almacen_activo(&self, almacen_id: Uuid) -> Result<(), AppError> {
        self.almacen_repo
            .obtener_por_id(almacen_id)
            .await?
            .filter(|a| a.activo)
            .map(|_| ())
            .ok_or_else(|| not_found_error("Almacén", &almacen_id.to_string()))
    }

    async fn proveedor_activo(
        &self,
        proveedor_id: Uuid,
        exigir_servicio: bool,
    ) -> Result<(), AppError> {
        let proveedor = self
            .proveedor_repo
            .obtener_por_id(proveedor_id)
            .await?
            .filter(|p| p.activo)
            .ok_or_else(|| not_found_error("Proveedor", &proveedor_id.to_string()))?;

        if exigir_servicio && !proveedor.es_proveedor_servicio {
            return Err(AppError::Validation(format!(
                "el proveedor {} no está marcado como proveedor de servicio",
                proveedor.nombre
            )));
        }
        Ok(())
    }

    async fn motivo_desecho_activo(&self, motivo_id: Uuid) -> Result<(), AppError> {
        self.catalogo_repo
            .obtener_motivo_desecho(motivo_id)
            .await?
            .filter(|m| m.activo)
            .map(|_| ())
            .ok_or_else(|| not_found_error("Motivo de desecho", &motivo_id.to_string()))
    }

    async fn validar_vehiculo_y_posicion(
        &self,
        vehiculo_id: Uuid,
        posicion_id: Uuid,
    ) -> Result<(), AppError> {
        let vehiculo = self
            .vehiculo_repo
            .obtener_por_id(vehiculo_id)
            .await?
            .filter(|v| v.activo)
            .ok_or_else(|| not_found_error("Vehículo", &vehiculo_id.to_string()))?;

        let posicion = self
            .vehiculo_repo
            .obtener_posicion(posicion_id)
            .await?
            .filter(|p| p.activo)
            .ok_or_else(|| not_found_error("Posición", &posicion_id.to_string()))?;

        if posicion.tipo_vehiculo_id != vehiculo.tipo_vehiculo_id {
            return Err(AppError::Validation(format!(
                "la posición {} no corresponde al tipo del vehículo {}",
                posicion.codigo, vehiculo.placa
            )));
        }

        Ok(())
    }

    async fn modelo_del_neumatico(
        &self,
        neumatico: &Neumatico,
    ) -> Result<ModeloNeumatico, AppError> {
        self.modelo_repo
            .obtener_por_id(neumatico.modelo_id)
            .await?
            .ok_or_else(|| {
                internal_error(&format!(
                    "el modelo {} referenciado por el neumático {} no existe",
                    neumatico.modelo_id, neumatico.id
                ))
            })
    }
}

/// Suma al acumulado el tramo recorrido desde la instalación vigente.
/// Un odómetro menor al de instalación es una anomalía de captura: el
/// tramo se descarta (delta 0) y queda registrado en el log.
fn acumular_kilometraje(neumatico: &mut Neumatico, odometro: Decimal) -> Result<Decimal, AppError> {
    let base = neumatico.km_instalacion.ok_or_else(|| {
        internal_error(&format!(
            "el neumático {} figura instalado sin km_instalacion",
            neumatico.id
        ))
    })?;

    let delta = if odometro < base {
        log::error!(
            "🧮 Odómetro {} menor que el de instalación {} para neumático {}; el tramo se descarta",
            odometro,
            base,
            neumatico.id
        );
        Decimal::ZERO
    } else {
        odometro - base
    };

    neumatico.kilometraje_acumulado += delta;
    Ok(delta)
}

fn aplicar_instalacion(
    neumatico: &mut Neumatico,
    datos: &DatosInstalacion,
    fecha: NaiveDate,
) -> Result<(), AppError> {
    if neumatico.estado_actual != EstadoNeumatico::EnStock {
        return Err(AppError::Conflict(format!(
            "solo un neumático EN_STOCK puede instalarse; estado actual: {}",
            neumatico.estado_actual
        )));
    }

    neumatico.estado_actual = EstadoNeumatico::Instalado;
    neumatico.vehiculo_id = Some(datos.vehiculo_id);
    neumatico.posicion_id = Some(datos.posicion_id);
    neumatico.almacen_id = None;
    neumatico.km_instalacion = Some(datos.odometro);
    neumatico.fecha_instalacion = Some(fecha);
    Ok(())
}

fn aplicar_desmontaje(
    neumatico: &mut Neumatico,
    datos: &DatosDesmontaje,
    fecha: NaiveDate,
) -> Result<(), AppError> {
    if neumatico.estado_actual != EstadoNeumatico::Instalado {
        return Err(AppError::Conflict(format!(
            "el neumático no está instalado; estado actual: {}",
            neumatico.estado_actual
        )));
    }

    acumular_kilometraje(neumatico, datos.odometro)?;

    neumatico.vehiculo_id = None;
    neumatico.posicion_id = None;
    neumatico.km_instalacion = None;
    neumatico.fecha_instalacion = None;
    neumatico.estado_actual = datos.destino.estado_resultante();
    neumatico.almacen_id = datos.destino.almacen_destino();

    if let Some(motivo_id) = datos.destino.motivo_desecho() {
        neumatico.motivo_desecho_id = Some(motivo_id);
        neumatico.fecha_desecho = Some(fecha);
    }

    Ok(())
}

fn aplicar_rotacion(
    neumatico: &mut Neumatico,
    datos: &DatosRotacion,
    fecha: NaiveDate,
) -> Result<(), AppError> {
    if neumatico.estado_actual != EstadoNeumatico::Instalado {
        return Err(AppError::Conflict(format!(
            "el neumático no está instalado; estado actual: {}",
            neumatico.estado_actual
        )));
    }
    if neumatico.vehiculo_id != Some(datos.vehiculo_id) {
        return Err(AppError::Validation(
            "la rotación debe realizarse dentro del mismo vehículo".to_string(),
        ));
    }
    if neumatico.posicion_id == Some(datos.posicion_id) {
        return Err(AppError::Validation(
            "la posición destino de la rotación debe ser distinta de la actual".to_string(),
        ));
    }

    // Cierra el tramo en la posición saliente y abre uno nuevo
    acumular_kilometraje(neumatico, datos.odometro)?;
    neumatico.posicion_id = Some(datos.posicion_id);
    neumatico.km_instalacion = Some(datos.odometro);
    neumatico.fecha_instalacion = Some(fecha);
    Ok(())
}

fn aplicar_reparacion_entrada(neumatico: &mut Neumatico) -> Result<(), AppError> {
    if neumatico.esta_instalado() {
        return Err(AppError::Conflict(
            "el neumático está instalado; debe desmontarse antes de entrar a reparación"
                .to_string(),
        ));
    }

    neumatico.estado_actual = EstadoNeumatico::EnReparacion;
    neumatico.almacen_id = None;
    Ok(())
}

fn aplicar_reparacion_salida(
    neumatico: &mut Neumatico,
    datos: &DatosReparacionSalida,
) -> Result<(), AppError> {
    if neumatico.estado_actual != EstadoNeumatico::EnReparacion {
        return Err(AppError::Conflict(format!(
            "el neumático no está en reparación; estado actual: {}",
            neumatico.estado_actual
        )));
    }

    neumatico.estado_actual = EstadoNeumatico::EnStock;
    neumatico.almacen_id = Some(datos.destino_almacen_id);
    Ok(())
}

fn aplicar_reencauche_entrada(
    neumatico: &mut Neumatico,
    modelo: &ModeloNeumatico,
) -> Result<(), AppError> {
    if neumatico.esta_instalado() {
        return Err(AppError::Conflict(
            "el neumático está instalado; debe desmontarse antes de enviarse a reencauche"
                .to_string(),
        ));
    }
    if !modelo.permite_reencauche {
        return Err(AppError::Validation(format!(
            "el modelo {} {} no permite reencauche",
            modelo.nombre, modelo.medida
        )));
    }
    if let Some(maximos) = modelo.limite_reencauches() {
        if neumatico.reencauches_realizados >= maximos {
            return Err(AppError::Validation(format!(
                "el neumático ya alcanzó el límite de {} reencauches",
                maximos
            )));
        }
    }

    neumatico.estado_actual = EstadoNeumatico::EnReencauche;
    neumatico.almacen_id = None;
    Ok(())
}

fn aplicar_reencauche_salida(
    neumatico: &mut Neumatico,
    datos: &DatosReencaucheSalida,
) -> Result<(), AppError> {
    if neumatico.estado_actual != EstadoNeumatico::EnReencauche {
        return Err(AppError::Conflict(format!(
            "el neumático no está en reencauche; estado actual: {}",
            neumatico.estado_actual
        )));
    }

    neumatico.estado_actual = EstadoNeumatico::EnStock;
    neumatico.almacen_id = Some(datos.destino_almacen_id);
    neumatico.reencauches_realizados += 1;
    neumatico.kilometraje_acumulado = Decimal::ZERO;
    neumatico.vida_actual += 1;
    neumatico.es_reencauchado = true;
    neumatico.profundidad_inicial_mm = datos.profundidad_post_mm;
    Ok(())
}

fn aplicar_desecho(
    neumatico: &mut Neumatico,
    datos: &DatosDesecho,
    fecha: NaiveDate,
) -> Result<(), AppError> {
    if neumatico.esta_instalado() {
        return Err(AppError::Conflict(
            "el neumático está instalado; debe desmontarse antes de desecharse".to_string(),
        ));
    }

    neumatico.estado_actual = EstadoNeumatico::Desechado;
    neumatico.motivo_desecho_id = Some(datos.motivo_desecho_id);
    neumatico.fecha_desecho = Some(fecha);
    Ok(())
}

fn aplicar_ajuste_inventario(
    neumatico: &mut Neumatico,
    datos: &DatosAjusteInventario,
) -> Result<(), AppError> {
    // El parser ya rechazó INSTALADO y DESECHADO como destino
    if neumatico.esta_instalado() {
        log::warn!(
            "🧮 Ajuste de inventario sobre el neumático {} instalado; el tramo de kilometraje en curso se descarta",
            neumatico.id
        );
        neumatico.vehiculo_id = None;
        neumatico.posicion_id = None;
        neumatico.km_instalacion = None;
        neumatico.fecha_instalacion = None;
    }

    neumatico.estado_actual = datos.estado_destino;
    neumatico.almacen_id = Some(datos.destino_almacen_id);
    Ok(())
}

/// Neumático nuevo dado de alta por un evento COMPRA: nace EN_STOCK en el
/// almacén destino, con la profundidad original de su modelo.
fn neumatico_de_compra(
    datos: &DatosCompra,
    modelo: &ModeloNeumatico,
    fecha: NaiveDate,
    usuario_id: Uuid,
) -> Neumatico {
    let ahora = Utc::now();
    Neumatico {
        id: Uuid::new_v4(),
        numero_serie: datos.numero_serie.clone(),
        modelo_id: modelo.id,
        estado_actual: EstadoNeumatico::EnStock,
        almacen_id: Some(datos.destino_almacen_id),
        vehiculo_id: None,
        posicion_id: None,
        kilometraje_acumulado: Decimal::ZERO,
        km_instalacion: None,
        fecha_instalacion: None,
        reencauches_realizados: 0,
        es_reencauchado: false,
        vida_actual: 1,
        profundidad_inicial_mm: modelo.profundidad_original_mm,
        fecha_fabricacion: datos.fecha_fabricacion,
        fecha_compra: fecha,
        costo_compra: datos.costo_compra,
        proveedor_compra_id: datos.proveedor_compra_id,
        motivo_desecho_id: None,
        fecha_desecho: None,
        creado_por: usuario_id,
        actualizado_por: usuario_id,
        created_at: ahora,
        updated_at: ahora,
    }
}

/// Arma la fila inmutable del evento. Para desmontajes e inspecciones el
/// vehículo y la posición registrados son los previos a la mutación.
fn construir_evento(
    comando: &ComandoEvento,
    neumatico: &Neumatico,
    usuario_id: Uuid,
) -> EventoNeumatico {
    let mut evento = EventoNeumatico::nuevo(
        neumatico.id,
        comando.tipo_evento(),
        usuario_id,
        comando.fecha_evento,
    );
    evento.notas = comando.notas.clone();

    match &comando.operacion {
        Operacion::Compra(datos) => {
            evento.costo_evento = Some(datos.costo_compra);
            evento.destino_almacen_id = Some(datos.destino_almacen_id);
        }
        Operacion::Instalacion(datos) => {
            evento.vehiculo_id = Some(datos.vehiculo_id);
            evento.posicion_id = Some(datos.posicion_id);
            evento.odometro_vehiculo_en_evento = Some(datos.odometro);
            evento.presion_psi = datos.presion_psi;
        }
        Operacion::Desmontaje(datos) => {
            evento.vehiculo_id = neumatico.vehiculo_id;
            evento.posicion_id = neumatico.posicion_id;
            evento.odometro_vehiculo_en_evento = Some(datos.odometro);
            evento.motivo_desmontaje_destino = Some(datos.destino.as_str().to_string());
            evento.destino_almacen_id = datos.destino.almacen_destino();
            evento.motivo_desecho_id_evento = datos.destino.motivo_desecho();
        }
        Operacion::Inspeccion(datos) => {
            evento.vehiculo_id = neumatico.vehiculo_id;
            evento.posicion_id = neumatico.posicion_id;
            evento.profundidad_remanente_mm = datos.profundidad_remanente_mm;
            evento.profundidad_exterior_mm = datos.profundidad_exterior_mm;
            evento.profundidad_centro_mm = datos.profundidad_centro_mm;
            evento.profundidad_interior_mm = datos.profundidad_interior_mm;
            evento.presion_psi = datos.presion_psi;
            evento.odometro_vehiculo_en_evento = datos.odometro;
        }
        Operacion::Rotacion(datos) => {
            evento.vehiculo_id = Some(datos.vehiculo_id);
            evento.posicion_id = Some(datos.posicion_id);
            evento.odometro_vehiculo_en_evento = Some(datos.odometro);
        }
        Operacion::ReparacionEntrada(datos) => {
            evento.proveedor_servicio_id = datos.proveedor_servicio_id;
            evento.costo_evento = datos.costo;
        }
        Operacion::ReparacionSalida(datos) => {
            evento.proveedor_servicio_id = datos.proveedor_servicio_id;
            evento.costo_evento = datos.costo;
            evento.destino_almacen_id = Some(datos.destino_almacen_id);
        }
        Operacion::ReencaucheEntrada(datos) => {
            evento.proveedor_servicio_id = Some(datos.proveedor_servicio_id);
            evento.costo_evento = datos.costo;
        }
        Operacion::ReencaucheSalida(datos) => {
            evento.proveedor_servicio_id = datos.proveedor_servicio_id;
            evento.costo_evento = datos.costo;
            evento.destino_almacen_id = Some(datos.destino_almacen_id);
            evento.profundidad_post_reencauche_mm = Some(datos.profundidad_post_mm);
        }
        Operacion::Desecho(datos) => {
            evento.motivo_desecho_id_evento = Some(datos.motivo_desecho_id);
            evento.costo_evento = datos.costo;
        }
        Operacion::AjusteInventario(datos) => {
            evento.estado_ajuste = Some(datos.estado_destino.as_str().to_string());
            evento.destino_almacen_id = Some(datos.destino_almacen_id);
        }
    }

    evento
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::comando::DestinoDesmontaje;

    fn fecha(anio: i32, mes: u32, dia: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(anio, mes, dia).unwrap()
    }

    fn neumatico_en_stock() -> Neumatico {
        let ahora = Utc::now();
        Neumatico {
            id: Uuid::new_v4(),
            numero_serie: "SER-1000".to_string(),
            modelo_id: Uuid::new_v4(),
            estado_actual: EstadoNeumatico::EnStock,
            almacen_id: Some(Uuid::new_v4()),
            vehiculo_id: None,
            posicion_id: None,
            kilometraje_acumulado: Decimal::ZERO,
            km_instalacion: None,
            fecha_instalacion: None,
            reencauches_realizados: 0,
            es_reencauchado: false,
            vida_actual: 1,
            profundidad_inicial_mm: 18.0,
            fecha_fabricacion: Some(fecha(2024, 1, 15)),
            fecha_compra: fecha(2024, 3, 1),
            costo_compra: Decimal::from(420),
            proveedor_compra_id: Uuid::new_v4(),
            motivo_desecho_id: None,
            fecha_desecho: None,
            creado_por: Uuid::new_v4(),
            actualizado_por: Uuid::new_v4(),
            created_at: ahora,
            updated_at: ahora,
        }
    }

    fn neumatico_instalado(odometro_instalacion: i64) -> (Neumatico, Uuid, Uuid) {
        let mut neumatico = neumatico_en_stock();
        let vehiculo_id = Uuid::new_v4();
        let posicion_id = Uuid::new_v4();
        let datos = DatosInstalacion {
            vehiculo_id,
            posicion_id,
            odometro: Decimal::from(odometro_instalacion),
            presion_psi: None,
        };
        aplicar_instalacion(&mut neumatico, &datos, fecha(2025, 1, 10)).unwrap();
        (neumatico, vehiculo_id, posicion_id)
    }

    fn modelo_reencauchable(maximos: i32) -> ModeloNeumatico {
        ModeloNeumatico {
            id: Uuid::new_v4(),
            fabricante_id: Uuid::new_v4(),
            nombre: "XDE MS".to_string(),
            medida: "11R22.5".to_string(),
            profundidad_original_mm: 16.0,
            presion_recomendada_psi: Some(105.0),
            permite_reencauche: true,
            reencauches_maximos: maximos,
            activo: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn instalacion_desde_stock_fija_el_ciclo() {
        let (neumatico, vehiculo_id, posicion_id) = neumatico_instalado(1000);

        assert_eq!(neumatico.estado_actual, EstadoNeumatico::Instalado);
        assert_eq!(neumatico.vehiculo_id, Some(vehiculo_id));
        assert_eq!(neumatico.posicion_id, Some(posicion_id));
        assert_eq!(neumatico.almacen_id, None);
        assert_eq!(neumatico.km_instalacion, Some(Decimal::from(1000)));
        assert_eq!(neumatico.fecha_instalacion, Some(fecha(2025, 1, 10)));
    }

    #[test]
    fn instalacion_fuera_de_stock_es_conflicto() {
        let (mut neumatico, vehiculo_id, posicion_id) = neumatico_instalado(1000);
        let datos = DatosInstalacion {
            vehiculo_id,
            posicion_id,
            odometro: Decimal::from(2000),
            presion_psi: None,
        };

        let resultado = aplicar_instalacion(&mut neumatico, &datos, fecha(2025, 2, 1));
        assert!(matches!(resultado, Err(AppError::Conflict(_))));
    }

    #[test]
    fn desmontaje_a_stock_acumula_y_limpia() {
        let (mut neumatico, _, _) = neumatico_instalado(1000);
        let almacen_id = Uuid::new_v4();
        let datos = DatosDesmontaje {
            destino: DestinoDesmontaje::EnStock { almacen_id },
            odometro: Decimal::from(1500),
        };

        aplicar_desmontaje(&mut neumatico, &datos, fecha(2025, 3, 1)).unwrap();

        assert_eq!(neumatico.estado_actual, EstadoNeumatico::EnStock);
        assert_eq!(neumatico.kilometraje_acumulado, Decimal::from(500));
        assert_eq!(neumatico.almacen_id, Some(almacen_id));
        assert_eq!(neumatico.vehiculo_id, None);
        assert_eq!(neumatico.posicion_id, None);
        assert_eq!(neumatico.km_instalacion, None);
        assert_eq!(neumatico.fecha_instalacion, None);
    }

    #[test]
    fn odometro_menor_que_el_de_instalacion_descarta_el_tramo() {
        let (mut neumatico, _, _) = neumatico_instalado(5000);
        let datos = DatosDesmontaje {
            destino: DestinoDesmontaje::EnStock {
                almacen_id: Uuid::new_v4(),
            },
            odometro: Decimal::from(4000),
        };

        aplicar_desmontaje(&mut neumatico, &datos, fecha(2025, 3, 1)).unwrap();

        assert_eq!(neumatico.kilometraje_acumulado, Decimal::ZERO);
        assert_eq!(neumatico.estado_actual, EstadoNeumatico::EnStock);
    }

    #[test]
    fn desmontaje_a_desechado_fija_motivo_y_fecha() {
        let (mut neumatico, _, _) = neumatico_instalado(1000);
        let motivo_id = Uuid::new_v4();
        let datos = DatosDesmontaje {
            destino: DestinoDesmontaje::Desechado {
                motivo_desecho_id: motivo_id,
                almacen_id: None,
            },
            odometro: Decimal::from(1800),
        };

        aplicar_desmontaje(&mut neumatico, &datos, fecha(2025, 4, 2)).unwrap();

        assert_eq!(neumatico.estado_actual, EstadoNeumatico::Desechado);
        assert_eq!(neumatico.motivo_desecho_id, Some(motivo_id));
        assert_eq!(neumatico.fecha_desecho, Some(fecha(2025, 4, 2)));
        assert_eq!(neumatico.kilometraje_acumulado, Decimal::from(800));
    }

    #[test]
    fn rotacion_cierra_el_tramo_y_rebasa_la_instalacion() {
        let (mut neumatico, vehiculo_id, posicion_original) = neumatico_instalado(1000);
        let posicion_nueva = Uuid::new_v4();
        let datos = DatosRotacion {
            vehiculo_id,
            posicion_id: posicion_nueva,
            odometro: Decimal::from(1400),
        };

        aplicar_rotacion(&mut neumatico, &datos, fecha(2025, 2, 20)).unwrap();

        assert_eq!(neumatico.estado_actual, EstadoNeumatico::Instalado);
        assert_eq!(neumatico.kilometraje_acumulado, Decimal::from(400));
        assert_eq!(neumatico.posicion_id, Some(posicion_nueva));
        assert_ne!(neumatico.posicion_id, Some(posicion_original));
        assert_eq!(neumatico.km_instalacion, Some(Decimal::from(1400)));
        assert_eq!(neumatico.fecha_instalacion, Some(fecha(2025, 2, 20)));
    }

    #[test]
    fn rotacion_exige_mismo_vehiculo_y_otra_posicion() {
        let (mut neumatico, vehiculo_id, posicion_id) = neumatico_instalado(1000);

        let otro_vehiculo = DatosRotacion {
            vehiculo_id: Uuid::new_v4(),
            posicion_id: Uuid::new_v4(),
            odometro: Decimal::from(1200),
        };
        assert!(matches!(
            aplicar_rotacion(&mut neumatico, &otro_vehiculo, fecha(2025, 2, 20)),
            Err(AppError::Validation(_))
        ));

        let misma_posicion = DatosRotacion {
            vehiculo_id,
            posicion_id,
            odometro: Decimal::from(1200),
        };
        assert!(matches!(
            aplicar_rotacion(&mut neumatico, &misma_posicion, fecha(2025, 2, 20)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn reparacion_completa_vuelve_a_stock() {
        let mut neumatico = neumatico_en_stock();
        aplicar_reparacion_entrada(&mut neumatico).unwrap();
        assert_eq!(neumatico.estado_actual, EstadoNeumatico::EnReparacion);
        assert_eq!(neumatico.almacen_id, None);

        let almacen_id = Uuid::new_v4();
        let salida = DatosReparacionSalida {
            destino_almacen_id: almacen_id,
            proveedor_servicio_id: None,
            costo: Some(Decimal::from(50)),
        };
        aplicar_reparacion_salida(&mut neumatico, &salida).unwrap();
        assert_eq!(neumatico.estado_actual, EstadoNeumatico::EnStock);
        assert_eq!(neumatico.almacen_id, Some(almacen_id));
    }

    #[test]
    fn reparacion_salida_requiere_estar_en_reparacion() {
        let mut neumatico = neumatico_en_stock();
        let salida = DatosReparacionSalida {
            destino_almacen_id: Uuid::new_v4(),
            proveedor_servicio_id: None,
            costo: None,
        };
        assert!(matches!(
            aplicar_reparacion_salida(&mut neumatico, &salida),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn reencauche_entrada_respeta_el_limite() {
        let mut neumatico = neumatico_en_stock();
        neumatico.reencauches_realizados = 1;
        let modelo = modelo_reencauchable(1);

        // Dos intentos con el límite ya alcanzado fallan igual
        for _ in 0..2 {
            let resultado = aplicar_reencauche_entrada(&mut neumatico, &modelo);
            assert!(matches!(resultado, Err(AppError::Validation(_))));
            assert_eq!(neumatico.estado_actual, EstadoNeumatico::EnStock);
        }
    }

    #[test]
    fn reencauche_entrada_rechaza_modelo_sin_permiso() {
        let mut neumatico = neumatico_en_stock();
        let mut modelo = modelo_reencauchable(2);
        modelo.permite_reencauche = false;

        assert!(matches!(
            aplicar_reencauche_entrada(&mut neumatico, &modelo),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn reencauche_salida_renueva_la_vida() {
        let mut neumatico = neumatico_en_stock();
        neumatico.kilometraje_acumulado = Decimal::from(60_000);
        let modelo = modelo_reencauchable(2);
        aplicar_reencauche_entrada(&mut neumatico, &modelo).unwrap();

        let almacen_id = Uuid::new_v4();
        let salida = DatosReencaucheSalida {
            profundidad_post_mm: 14.0,
            destino_almacen_id: almacen_id,
            proveedor_servicio_id: None,
            costo: Some(Decimal::from(180)),
        };
        aplicar_reencauche_salida(&mut neumatico, &salida).unwrap();

        assert_eq!(neumatico.estado_actual, EstadoNeumatico::EnStock);
        assert_eq!(neumatico.reencauches_realizados, 1);
        assert_eq!(neumatico.kilometraje_acumulado, Decimal::ZERO);
        assert_eq!(neumatico.vida_actual, 2);
        assert!(neumatico.es_reencauchado);
        assert_eq!(neumatico.profundidad_inicial_mm, 14.0);
        assert_eq!(neumatico.almacen_id, Some(almacen_id));
    }

    #[test]
    fn desecho_sobre_instalado_es_conflicto_y_no_muta() {
        let (mut neumatico, _, _) = neumatico_instalado(1000);
        let antes = neumatico.clone();
        let datos = DatosDesecho {
            motivo_desecho_id: Uuid::new_v4(),
            costo: None,
        };

        let resultado = aplicar_desecho(&mut neumatico, &datos, fecha(2025, 5, 5));

        assert!(matches!(resultado, Err(AppError::Conflict(_))));
        assert_eq!(neumatico.estado_actual, antes.estado_actual);
        assert_eq!(neumatico.motivo_desecho_id, None);
        assert_eq!(neumatico.fecha_desecho, None);
    }

    #[test]
    fn ajuste_sobre_instalado_limpia_el_ciclo_sin_acumular() {
        let (mut neumatico, _, _) = neumatico_instalado(1000);
        let almacen_id = Uuid::new_v4();
        let datos = DatosAjusteInventario {
            estado_destino: EstadoNeumatico::EnStock,
            destino_almacen_id: almacen_id,
        };

        aplicar_ajuste_inventario(&mut neumatico, &datos).unwrap();

        assert_eq!(neumatico.estado_actual, EstadoNeumatico::EnStock);
        assert_eq!(neumatico.almacen_id, Some(almacen_id));
        assert_eq!(neumatico.vehiculo_id, None);
        assert_eq!(neumatico.km_instalacion, None);
        // El tramo en curso se descarta, no se acumula
        assert_eq!(neumatico.kilometraje_acumulado, Decimal::ZERO);
    }

    #[test]
    fn compra_da_de_alta_en_stock_con_profundidad_del_modelo() {
        let modelo = modelo_reencauchable(2);
        let almacen_id = Uuid::new_v4();
        let usuario_id = Uuid::new_v4();
        let datos = DatosCompra {
            numero_serie: "SER-2000".to_string(),
            modelo_id: modelo.id,
            costo_compra: Decimal::from(510),
            proveedor_compra_id: Uuid::new_v4(),
            destino_almacen_id: almacen_id,
            fecha_fabricacion: Some(fecha(2025, 1, 1)),
        };

        let neumatico = neumatico_de_compra(&datos, &modelo, fecha(2025, 6, 1), usuario_id);

        assert_eq!(neumatico.estado_actual, EstadoNeumatico::EnStock);
        assert_eq!(neumatico.almacen_id, Some(almacen_id));
        assert_eq!(neumatico.profundidad_inicial_mm, 16.0);
        assert_eq!(neumatico.vida_actual, 1);
        assert_eq!(neumatico.kilometraje_acumulado, Decimal::ZERO);
        assert_eq!(neumatico.fecha_compra, fecha(2025, 6, 1));
        assert_eq!(neumatico.creado_por, usuario_id);
    }

    #[test]
    fn el_evento_de_desmontaje_registra_la_posicion_previa() {
        let (neumatico, vehiculo_id, posicion_id) = neumatico_instalado(1000);
        let comando = ComandoEvento {
            neumatico_id: Some(neumatico.id),
            fecha_evento: fecha(2025, 3, 1),
            notas: Some("cubierta con corte lateral".to_string()),
            operacion: Operacion::Desmontaje(DatosDesmontaje {
                destino: DestinoDesmontaje::ParaReparacion {
                    almacen_id: Uuid::new_v4(),
                },
                odometro: Decimal::from(1500),
            }),
        };

        let evento = construir_evento(&comando, &neumatico, Uuid::new_v4());

        assert_eq!(evento.vehiculo_id, Some(vehiculo_id));
        assert_eq!(evento.posicion_id, Some(posicion_id));
        assert_eq!(
            evento.motivo_desmontaje_destino.as_deref(),
            Some("PARA_REPARACION")
        );
        assert_eq!(evento.odometro_vehiculo_en_evento, Some(Decimal::from(1500)));
        assert_eq!(evento.notas.as_deref(), Some("cubierta con corte lateral"));
    }

    #[test]
    fn el_kilometraje_nunca_decrece_en_un_ciclo_completo() {
        let (mut neumatico, vehiculo_id, _) = neumatico_instalado(1000);

        let rotacion = DatosRotacion {
            vehiculo_id,
            posicion_id: Uuid::new_v4(),
            odometro: Decimal::from(3000),
        };
        aplicar_rotacion(&mut neumatico, &rotacion, fecha(2025, 2, 1)).unwrap();
        let tras_rotacion = neumatico.kilometraje_acumulado;

        let desmontaje = DatosDesmontaje {
            destino: DestinoDesmontaje::EnStock {
                almacen_id: Uuid::new_v4(),
            },
            // Odómetro anómalo, menor al de la rotación
            odometro: Decimal::from(2500),
        };
        aplicar_desmontaje(&mut neumatico, &desmontaje, fecha(2025, 3, 1)).unwrap();

        assert_eq!(tras_rotacion, Decimal::from(2000));
        assert_eq!(neumatico.kilometraje_acumulado, tras_rotacion);
    }
}
