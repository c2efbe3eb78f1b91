//! Comando de evento del ciclo de vida
//!
//! El request HTTP de eventos es un superset de campos opcionales; este
//! módulo lo convierte en un comando tipado donde cada operación lleva
//! exactamente los campos que necesita. Toda la validación de campos
//! requeridos por tipo de evento vive aquí, en un único punto de despacho.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::dto::evento_dto::RegistrarEventoRequest;
use crate::models::evento::TipoEvento;
use crate::models::neumatico::EstadoNeumatico;
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::{
    validate_non_negative, validate_positive, validate_pressure_psi, validate_serial_number,
    validate_tread_depth_mm,
};

/// Comando ya validado, listo para el motor de ciclo de vida
#[derive(Debug, Clone, PartialEq)]
pub struct ComandoEvento {
    /// None únicamente para COMPRA, que crea el neumático
    pub neumatico_id: Option<Uuid>,
    pub fecha_evento: NaiveDate,
    pub notas: Option<String>,
    pub operacion: Operacion,
}

/// Operación del ciclo de vida con sus datos específicos
#[derive(Debug, Clone, PartialEq)]
pub enum Operacion {
    Compra(DatosCompra),
    Instalacion(DatosInstalacion),
    Desmontaje(DatosDesmontaje),
    Inspeccion(DatosInspeccion),
    Rotacion(DatosRotacion),
    ReparacionEntrada(DatosReparacionEntrada),
    ReparacionSalida(DatosReparacionSalida),
    ReencaucheEntrada(DatosReencaucheEntrada),
    ReencaucheSalida(DatosReencaucheSalida),
    Desecho(DatosDesecho),
    AjusteInventario(DatosAjusteInventario),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatosCompra {
    pub numero_serie: String,
    pub modelo_id: Uuid,
    pub costo_compra: Decimal,
    pub proveedor_compra_id: Uuid,
    pub destino_almacen_id: Uuid,
    pub fecha_fabricacion: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatosInstalacion {
    pub vehiculo_id: Uuid,
    pub posicion_id: Uuid,
    pub odometro: Decimal,
    pub presion_psi: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatosDesmontaje {
    pub destino: DestinoDesmontaje,
    pub odometro: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatosInspeccion {
    pub profundidad_remanente_mm: Option<f64>,
    pub profundidad_exterior_mm: Option<f64>,
    pub profundidad_centro_mm: Option<f64>,
    pub profundidad_interior_mm: Option<f64>,
    pub presion_psi: Option<f64>,
    pub odometro: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatosRotacion {
    pub vehiculo_id: Uuid,
    pub posicion_id: Uuid,
    pub odometro: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatosReparacionEntrada {
    pub proveedor_servicio_id: Option<Uuid>,
    pub costo: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatosReparacionSalida {
    pub destino_almacen_id: Uuid,
    pub proveedor_servicio_id: Option<Uuid>,
    pub costo: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatosReencaucheEntrada {
    pub proveedor_servicio_id: Uuid,
    pub costo: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatosReencaucheSalida {
    pub profundidad_post_mm: f64,
    pub destino_almacen_id: Uuid,
    pub proveedor_servicio_id: Option<Uuid>,
    pub costo: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatosDesecho {
    pub motivo_desecho_id: Uuid,
    pub costo: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatosAjusteInventario {
    pub estado_destino: EstadoNeumatico,
    pub destino_almacen_id: Uuid,
}

/// Destino de un desmontaje. Cada variante lleva lo que ese destino exige,
/// de modo que un desmontaje a stock sin almacén no sea representable.
#[derive(Debug, Clone, PartialEq)]
pub enum DestinoDesmontaje {
    EnStock { almacen_id: Uuid },
    ParaReparacion { almacen_id: Uuid },
    ParaReencauche { almacen_id: Uuid },
    Desechado { motivo_desecho_id: Uuid, almacen_id: Option<Uuid> },
}

impl DestinoDesmontaje {
    fn parsear(
        texto: &str,
        almacen_id: Option<Uuid>,
        motivo_desecho_id: Option<Uuid>,
    ) -> AppResult<Self> {
        match texto.trim().to_uppercase().as_str() {
            "EN_STOCK" | "STOCK" => Ok(DestinoDesmontaje::EnStock {
                almacen_id: requerido(almacen_id, "destino_almacen_id", TipoEvento::Desmontaje)?,
            }),
            "PARA_REPARACION" | "EN_REPARACION" | "REPARACION" => {
                Ok(DestinoDesmontaje::ParaReparacion {
                    almacen_id: requerido(almacen_id, "destino_almacen_id", TipoEvento::Desmontaje)?,
                })
            }
            "PARA_REENCAUCHE" | "EN_REENCAUCHE" | "REENCAUCHE" => {
                Ok(DestinoDesmontaje::ParaReencauche {
                    almacen_id: requerido(almacen_id, "destino_almacen_id", TipoEvento::Desmontaje)?,
                })
            }
            "DESECHADO" | "DESECHO" => Ok(DestinoDesmontaje::Desechado {
                motivo_desecho_id: requerido(
                    motivo_desecho_id,
                    "motivo_desecho_id_evento",
                    TipoEvento::Desmontaje,
                )?,
                almacen_id,
            }),
            otro => Err(validation_error(format!(
                "destino de desmontaje desconocido: '{}'",
                otro
            ))),
        }
    }

    /// Estado en el que queda el neumático tras el desmontaje
    pub fn estado_resultante(&self) -> EstadoNeumatico {
        match self {
            DestinoDesmontaje::EnStock { .. } => EstadoNeumatico::EnStock,
            DestinoDesmontaje::ParaReparacion { .. } => EstadoNeumatico::EnReparacion,
            DestinoDesmontaje::ParaReencauche { .. } => EstadoNeumatico::EnReencauche,
            DestinoDesmontaje::Desechado { .. } => EstadoNeumatico::Desechado,
        }
    }

    /// Almacén al que llega el neumático, si corresponde
    pub fn almacen_destino(&self) -> Option<Uuid> {
        match self {
            DestinoDesmontaje::EnStock { almacen_id } => Some(*almacen_id),
            DestinoDesmontaje::ParaReparacion { almacen_id } => Some(*almacen_id),
            DestinoDesmontaje::ParaReencauche { almacen_id } => Some(*almacen_id),
            DestinoDesmontaje::Desechado { almacen_id, .. } => *almacen_id,
        }
    }

    /// Motivo de desecho, solo para el destino DESECHADO
    pub fn motivo_desecho(&self) -> Option<Uuid> {
        match self {
            DestinoDesmontaje::Desechado { motivo_desecho_id, .. } => Some(*motivo_desecho_id),
            _ => None,
        }
    }

    /// Valor textual que queda registrado en el evento
    pub fn as_str(&self) -> &'static str {
        match self {
            DestinoDesmontaje::EnStock { .. } => "EN_STOCK",
            DestinoDesmontaje::ParaReparacion { .. } => "PARA_REPARACION",
            DestinoDesmontaje::ParaReencauche { .. } => "PARA_REENCAUCHE",
            DestinoDesmontaje::Desechado { .. } => "DESECHADO",
        }
    }
}

fn requerido<T>(valor: Option<T>, campo: &str, tipo: TipoEvento) -> AppResult<T> {
    valor.ok_or_else(|| {
        validation_error(format!("el campo {} es requerido para {}", campo, tipo))
    })
}

fn odometro_valido(valor: Decimal, campo: &str) -> AppResult<Decimal> {
    validate_non_negative(valor)
        .map_err(|_| validation_error(format!("{} no puede ser negativo", campo)))?;
    Ok(valor)
}

fn profundidad_valida(valor: f64, campo: &str) -> AppResult<f64> {
    validate_tread_depth_mm(valor)
        .map_err(|_| validation_error(format!("{} fuera de rango (0-40 mm)", campo)))?;
    Ok(valor)
}

fn presion_valida(valor: f64) -> AppResult<f64> {
    validate_pressure_psi(valor)
        .map_err(|_| validation_error("presion_psi fuera de rango (1-200 psi)".to_string()))?;
    Ok(valor)
}

impl ComandoEvento {
    /// Convertir el request superset en un comando tipado.
    ///
    /// Valida la presencia y el rango de los campos que el tipo de evento
    /// exige; los tipos que el motor no soporta se rechazan aquí.
    pub fn parsear(request: &RegistrarEventoRequest) -> AppResult<Self> {
        let fecha_evento = request
            .fecha_evento
            .unwrap_or_else(|| chrono::Utc::now().date_naive());

        let operacion = match request.tipo_evento {
            TipoEvento::Compra => {
                let numero_serie =
                    requerido(request.numero_serie.clone(), "numero_serie", TipoEvento::Compra)?;
                validate_serial_number(&numero_serie).map_err(|_| {
                    validation_error(format!("numero_serie inválido: '{}'", numero_serie))
                })?;
                let costo_compra =
                    requerido(request.costo_compra, "costo_compra", TipoEvento::Compra)?;
                validate_positive(costo_compra)
                    .map_err(|_| validation_error("costo_compra debe ser positivo"))?;

                Operacion::Compra(DatosCompra {
                    numero_serie: numero_serie.trim().to_string(),
                    modelo_id: requerido(request.modelo_id, "modelo_id", TipoEvento::Compra)?,
                    costo_compra,
                    proveedor_compra_id: requerido(
                        request.proveedor_compra_id,
                        "proveedor_compra_id",
                        TipoEvento::Compra,
                    )?,
                    destino_almacen_id: requerido(
                        request.destino_almacen_id,
                        "destino_almacen_id",
                        TipoEvento::Compra,
                    )?,
                    fecha_fabricacion: request.fecha_fabricacion,
                })
            }

            TipoEvento::Instalacion => {
                let odometro = requerido(
                    request.odometro_vehiculo_en_evento,
                    "odometro_vehiculo_en_evento",
                    TipoEvento::Instalacion,
                )?;
                let presion_psi = request.presion_psi.map(presion_valida).transpose()?;

                Operacion::Instalacion(DatosInstalacion {
                    vehiculo_id: requerido(
                        request.vehiculo_id,
                        "vehiculo_id",
                        TipoEvento::Instalacion,
                    )?,
                    posicion_id: requerido(
                        request.posicion_id,
                        "posicion_id",
                        TipoEvento::Instalacion,
                    )?,
                    odometro: odometro_valido(odometro, "odometro_vehiculo_en_evento")?,
                    presion_psi,
                })
            }

            TipoEvento::Desmontaje => {
                let destino_texto = requerido(
                    request.motivo_desmontaje_destino.clone(),
                    "motivo_desmontaje_destino",
                    TipoEvento::Desmontaje,
                )?;
                let odometro = requerido(
                    request.odometro_vehiculo_en_evento,
                    "odometro_vehiculo_en_evento",
                    TipoEvento::Desmontaje,
                )?;

                Operacion::Desmontaje(DatosDesmontaje {
                    destino: DestinoDesmontaje::parsear(
                        &destino_texto,
                        request.destino_almacen_id,
                        request.motivo_desecho_id_evento,
                    )?,
                    odometro: odometro_valido(odometro, "odometro_vehiculo_en_evento")?,
                })
            }

            TipoEvento::Inspeccion => {
                let zonas = [
                    request.profundidad_exterior_mm,
                    request.profundidad_centro_mm,
                    request.profundidad_interior_mm,
                ];
                let zonas_presentes = zonas.iter().filter(|z| z.is_some()).count();
                if zonas_presentes > 0 && zonas_presentes < 3 {
                    return Err(validation_error(
                        "las profundidades por zona (exterior, centro, interior) se informan juntas",
                    ));
                }

                let tiene_profundidad =
                    request.profundidad_remanente_mm.is_some() || zonas_presentes == 3;
                if !tiene_profundidad && request.presion_psi.is_none() {
                    return Err(validation_error(
                        "INSPECCION requiere al menos una medida: profundidad o presión",
                    ));
                }

                Operacion::Inspeccion(DatosInspeccion {
                    profundidad_remanente_mm: request
                        .profundidad_remanente_mm
                        .map(|v| profundidad_valida(v, "profundidad_remanente_mm"))
                        .transpose()?,
                    profundidad_exterior_mm: request
                        .profundidad_exterior_mm
                        .map(|v| profundidad_valida(v, "profundidad_exterior_mm"))
                        .transpose()?,
                    profundidad_centro_mm: request
                        .profundidad_centro_mm
                        .map(|v| profundidad_valida(v, "profundidad_centro_mm"))
                        .transpose()?,
                    profundidad_interior_mm: request
                        .profundidad_interior_mm
                        .map(|v| profundidad_valida(v, "profundidad_interior_mm"))
                        .transpose()?,
                    presion_psi: request.presion_psi.map(presion_valida).transpose()?,
                    odometro: request
                        .odometro_vehiculo_en_evento
                        .map(|v| odometro_valido(v, "odometro_vehiculo_en_evento"))
                        .transpose()?,
                })
            }

            TipoEvento::Rotacion => {
                let odometro = requerido(
                    request.odometro_vehiculo_en_evento,
                    "odometro_vehiculo_en_evento",
                    TipoEvento::Rotacion,
                )?;

                Operacion::Rotacion(DatosRotacion {
                    vehiculo_id: requerido(
                        request.vehiculo_id,
                        "vehiculo_id",
                        TipoEvento::Rotacion,
                    )?,
                    posicion_id: requerido(
                        request.posicion_id,
                        "posicion_id",
                        TipoEvento::Rotacion,
                    )?,
                    odometro: odometro_valido(odometro, "odometro_vehiculo_en_evento")?,
                })
            }

            TipoEvento::ReparacionEntrada => {
                Operacion::ReparacionEntrada(DatosReparacionEntrada {
                    proveedor_servicio_id: request.proveedor_servicio_id,
                    costo: request.costo_evento,
                })
            }

            TipoEvento::ReparacionSalida => Operacion::ReparacionSalida(DatosReparacionSalida {
                destino_almacen_id: requerido(
                    request.destino_almacen_id,
                    "destino_almacen_id",
                    TipoEvento::ReparacionSalida,
                )?,
                proveedor_servicio_id: request.proveedor_servicio_id,
                costo: request.costo_evento,
            }),

            TipoEvento::ReencaucheEntrada => {
                Operacion::ReencaucheEntrada(DatosReencaucheEntrada {
                    proveedor_servicio_id: requerido(
                        request.proveedor_servicio_id,
                        "proveedor_servicio_id",
                        TipoEvento::ReencaucheEntrada,
                    )?,
                    costo: request.costo_evento,
                })
            }

            TipoEvento::ReencaucheSalida => {
                let profundidad = requerido(
                    request.profundidad_post_reencauche_mm,
                    "profundidad_post_reencauche_mm",
                    TipoEvento::ReencaucheSalida,
                )?;

                Operacion::ReencaucheSalida(DatosReencaucheSalida {
                    profundidad_post_mm: profundidad_valida(
                        profundidad,
                        "profundidad_post_reencauche_mm",
                    )?,
                    destino_almacen_id: requerido(
                        request.destino_almacen_id,
                        "destino_almacen_id",
                        TipoEvento::ReencaucheSalida,
                    )?,
                    proveedor_servicio_id: request.proveedor_servicio_id,
                    costo: request.costo_evento,
                })
            }

            TipoEvento::Desecho => Operacion::Desecho(DatosDesecho {
                motivo_desecho_id: requerido(
                    request.motivo_desecho_id_evento,
                    "motivo_desecho_id_evento",
                    TipoEvento::Desecho,
                )?,
                costo: request.costo_evento,
            }),

            TipoEvento::AjusteInventario => {
                let estado_texto = requerido(
                    request.estado_ajuste.clone(),
                    "estado_ajuste",
                    TipoEvento::AjusteInventario,
                )?;
                let estado_destino = EstadoNeumatico::parse(&estado_texto).ok_or_else(|| {
                    validation_error(format!("estado_ajuste desconocido: '{}'", estado_texto))
                })?;
                if matches!(
                    estado_destino,
                    EstadoNeumatico::Instalado | EstadoNeumatico::Desechado
                ) {
                    return Err(validation_error(format!(
                        "AJUSTE_INVENTARIO no puede llevar un neumático a {}",
                        estado_destino
                    )));
                }

                Operacion::AjusteInventario(DatosAjusteInventario {
                    estado_destino,
                    destino_almacen_id: requerido(
                        request.destino_almacen_id,
                        "destino_almacen_id",
                        TipoEvento::AjusteInventario,
                    )?,
                })
            }

            TipoEvento::Movimiento | TipoEvento::Venta | TipoEvento::BajaPorRobo => {
                return Err(validation_error(format!(
                    "el tipo de evento {} no está soportado por el motor de ciclo de vida",
                    request.tipo_evento
                )));
            }
        };

        let neumatico_id = match operacion {
            Operacion::Compra(_) => {
                if request.neumatico_id.is_some() {
                    return Err(validation_error(
                        "COMPRA crea el neumático: no debe indicar neumatico_id",
                    ));
                }
                None
            }
            _ => Some(requerido(
                request.neumatico_id,
                "neumatico_id",
                request.tipo_evento,
            )?),
        };

        Ok(ComandoEvento {
            neumatico_id,
            fecha_evento,
            notas: request.notas.clone(),
            operacion,
        })
    }

    pub fn tipo_evento(&self) -> TipoEvento {
        match self.operacion {
            Operacion::Compra(_) => TipoEvento::Compra,
            Operacion::Instalacion(_) => TipoEvento::Instalacion,
            Operacion::Desmontaje(_) => TipoEvento::Desmontaje,
            Operacion::Inspeccion(_) => TipoEvento::Inspeccion,
            Operacion::Rotacion(_) => TipoEvento::Rotacion,
            Operacion::ReparacionEntrada(_) => TipoEvento::ReparacionEntrada,
            Operacion::ReparacionSalida(_) => TipoEvento::ReparacionSalida,
            Operacion::ReencaucheEntrada(_) => TipoEvento::ReencaucheEntrada,
            Operacion::ReencaucheSalida(_) => TipoEvento::ReencaucheSalida,
            Operacion::Desecho(_) => TipoEvento::Desecho,
            Operacion::AjusteInventario(_) => TipoEvento::AjusteInventario,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_base(tipo: TipoEvento) -> RegistrarEventoRequest {
        RegistrarEventoRequest {
            neumatico_id: None,
            tipo_evento: tipo,
            fecha_evento: None,
            odometro_vehiculo_en_evento: None,
            profundidad_remanente_mm: None,
            profundidad_exterior_mm: None,
            profundidad_centro_mm: None,
            profundidad_interior_mm: None,
            presion_psi: None,
            costo_evento: None,
            proveedor_servicio_id: None,
            destino_almacen_id: None,
            vehiculo_id: None,
            posicion_id: None,
            motivo_desmontaje_destino: None,
            motivo_desecho_id_evento: None,
            profundidad_post_reencauche_mm: None,
            estado_ajuste: None,
            numero_serie: None,
            modelo_id: None,
            proveedor_compra_id: None,
            costo_compra: None,
            fecha_fabricacion: None,
            notas: None,
        }
    }

    fn es_validacion(resultado: AppResult<ComandoEvento>) -> bool {
        matches!(resultado, Err(crate::utils::errors::AppError::Validation(_)))
    }

    #[test]
    fn test_compra_completa() {
        let mut req = request_base(TipoEvento::Compra);
        req.numero_serie = Some("NS-2024-001".to_string());
        req.modelo_id = Some(Uuid::new_v4());
        req.costo_compra = Some(Decimal::from(450));
        req.proveedor_compra_id = Some(Uuid::new_v4());
        req.destino_almacen_id = Some(Uuid::new_v4());

        let comando = ComandoEvento::parsear(&req).unwrap();
        assert_eq!(comando.neumatico_id, None);
        assert_eq!(comando.tipo_evento(), TipoEvento::Compra);
        match comando.operacion {
            Operacion::Compra(datos) => assert_eq!(datos.numero_serie, "NS-2024-001"),
            otra => panic!("operación inesperada: {:?}", otra),
        }
    }

    #[test]
    fn test_compra_sin_numero_serie() {
        let mut req = request_base(TipoEvento::Compra);
        req.modelo_id = Some(Uuid::new_v4());
        req.costo_compra = Some(Decimal::from(450));
        req.proveedor_compra_id = Some(Uuid::new_v4());
        req.destino_almacen_id = Some(Uuid::new_v4());

        assert!(es_validacion(ComandoEvento::parsear(&req)));
    }

    #[test]
    fn test_compra_costo_negativo() {
        let mut req = request_base(TipoEvento::Compra);
        req.numero_serie = Some("NS-2024-001".to_string());
        req.modelo_id = Some(Uuid::new_v4());
        req.costo_compra = Some(Decimal::from(-10));
        req.proveedor_compra_id = Some(Uuid::new_v4());
        req.destino_almacen_id = Some(Uuid::new_v4());

        assert!(es_validacion(ComandoEvento::parsear(&req)));
    }

    #[test]
    fn test_compra_con_neumatico_id_es_invalida() {
        let mut req = request_base(TipoEvento::Compra);
        req.neumatico_id = Some(Uuid::new_v4());
        req.numero_serie = Some("NS-2024-001".to_string());
        req.modelo_id = Some(Uuid::new_v4());
        req.costo_compra = Some(Decimal::from(450));
        req.proveedor_compra_id = Some(Uuid::new_v4());
        req.destino_almacen_id = Some(Uuid::new_v4());

        assert!(es_validacion(ComandoEvento::parsear(&req)));
    }

    #[test]
    fn test_instalacion_requiere_neumatico_id() {
        let mut req = request_base(TipoEvento::Instalacion);
        req.vehiculo_id = Some(Uuid::new_v4());
        req.posicion_id = Some(Uuid::new_v4());
        req.odometro_vehiculo_en_evento = Some(Decimal::from(1000));

        assert!(es_validacion(ComandoEvento::parsear(&req)));
    }

    #[test]
    fn test_instalacion_completa() {
        let mut req = request_base(TipoEvento::Instalacion);
        req.neumatico_id = Some(Uuid::new_v4());
        req.vehiculo_id = Some(Uuid::new_v4());
        req.posicion_id = Some(Uuid::new_v4());
        req.odometro_vehiculo_en_evento = Some(Decimal::from(1000));

        let comando = ComandoEvento::parsear(&req).unwrap();
        assert!(comando.neumatico_id.is_some());
        match comando.operacion {
            Operacion::Instalacion(datos) => assert_eq!(datos.odometro, Decimal::from(1000)),
            otra => panic!("operación inesperada: {:?}", otra),
        }
    }

    #[test]
    fn test_instalacion_odometro_negativo() {
        let mut req = request_base(TipoEvento::Instalacion);
        req.neumatico_id = Some(Uuid::new_v4());
        req.vehiculo_id = Some(Uuid::new_v4());
        req.posicion_id = Some(Uuid::new_v4());
        req.odometro_vehiculo_en_evento = Some(Decimal::from(-5));

        assert!(es_validacion(ComandoEvento::parsear(&req)));
    }

    #[test]
    fn test_desmontaje_a_stock_requiere_almacen() {
        let mut req = request_base(TipoEvento::Desmontaje);
        req.neumatico_id = Some(Uuid::new_v4());
        req.motivo_desmontaje_destino = Some("EN_STOCK".to_string());
        req.odometro_vehiculo_en_evento = Some(Decimal::from(5000));

        assert!(es_validacion(ComandoEvento::parsear(&req)));
    }

    #[test]
    fn test_desmontaje_a_reparacion_normaliza_estado() {
        let mut req = request_base(TipoEvento::Desmontaje);
        req.neumatico_id = Some(Uuid::new_v4());
        req.motivo_desmontaje_destino = Some("PARA_REPARACION".to_string());
        req.destino_almacen_id = Some(Uuid::new_v4());
        req.odometro_vehiculo_en_evento = Some(Decimal::from(5000));

        let comando = ComandoEvento::parsear(&req).unwrap();
        match comando.operacion {
            Operacion::Desmontaje(datos) => {
                assert_eq!(datos.destino.estado_resultante(), EstadoNeumatico::EnReparacion);
                assert_eq!(datos.destino.as_str(), "PARA_REPARACION");
            }
            otra => panic!("operación inesperada: {:?}", otra),
        }
    }

    #[test]
    fn test_desmontaje_acepta_alias_de_destino() {
        let mut req = request_base(TipoEvento::Desmontaje);
        req.neumatico_id = Some(Uuid::new_v4());
        req.motivo_desmontaje_destino = Some("EN_REENCAUCHE".to_string());
        req.destino_almacen_id = Some(Uuid::new_v4());
        req.odometro_vehiculo_en_evento = Some(Decimal::from(5000));

        let comando = ComandoEvento::parsear(&req).unwrap();
        match comando.operacion {
            Operacion::Desmontaje(datos) => {
                assert_eq!(datos.destino.estado_resultante(), EstadoNeumatico::EnReencauche);
            }
            otra => panic!("operación inesperada: {:?}", otra),
        }
    }

    #[test]
    fn test_desmontaje_a_desecho_requiere_motivo() {
        let mut req = request_base(TipoEvento::Desmontaje);
        req.neumatico_id = Some(Uuid::new_v4());
        req.motivo_desmontaje_destino = Some("DESECHADO".to_string());
        req.odometro_vehiculo_en_evento = Some(Decimal::from(5000));

        assert!(es_validacion(ComandoEvento::parsear(&req)));
    }

    #[test]
    fn test_desmontaje_destino_desconocido() {
        let mut req = request_base(TipoEvento::Desmontaje);
        req.neumatico_id = Some(Uuid::new_v4());
        req.motivo_desmontaje_destino = Some("A_LA_LUNA".to_string());
        req.odometro_vehiculo_en_evento = Some(Decimal::from(5000));

        assert!(es_validacion(ComandoEvento::parsear(&req)));
    }

    #[test]
    fn test_inspeccion_sin_medidas() {
        let mut req = request_base(TipoEvento::Inspeccion);
        req.neumatico_id = Some(Uuid::new_v4());

        assert!(es_validacion(ComandoEvento::parsear(&req)));
    }

    #[test]
    fn test_inspeccion_solo_presion() {
        let mut req = request_base(TipoEvento::Inspeccion);
        req.neumatico_id = Some(Uuid::new_v4());
        req.presion_psi = Some(105.0);

        let comando = ComandoEvento::parsear(&req).unwrap();
        match comando.operacion {
            Operacion::Inspeccion(datos) => assert_eq!(datos.presion_psi, Some(105.0)),
            otra => panic!("operación inesperada: {:?}", otra),
        }
    }

    #[test]
    fn test_inspeccion_zonas_parciales() {
        let mut req = request_base(TipoEvento::Inspeccion);
        req.neumatico_id = Some(Uuid::new_v4());
        req.profundidad_exterior_mm = Some(8.0);
        req.profundidad_centro_mm = Some(7.5);

        assert!(es_validacion(ComandoEvento::parsear(&req)));
    }

    #[test]
    fn test_inspeccion_zonas_completas() {
        let mut req = request_base(TipoEvento::Inspeccion);
        req.neumatico_id = Some(Uuid::new_v4());
        req.profundidad_exterior_mm = Some(8.0);
        req.profundidad_centro_mm = Some(7.5);
        req.profundidad_interior_mm = Some(7.8);

        assert!(ComandoEvento::parsear(&req).is_ok());
    }

    #[test]
    fn test_reencauche_entrada_requiere_proveedor() {
        let mut req = request_base(TipoEvento::ReencaucheEntrada);
        req.neumatico_id = Some(Uuid::new_v4());

        assert!(es_validacion(ComandoEvento::parsear(&req)));
    }

    #[test]
    fn test_reencauche_salida_completa() {
        let mut req = request_base(TipoEvento::ReencaucheSalida);
        req.neumatico_id = Some(Uuid::new_v4());
        req.profundidad_post_reencauche_mm = Some(16.0);
        req.destino_almacen_id = Some(Uuid::new_v4());

        let comando = ComandoEvento::parsear(&req).unwrap();
        match comando.operacion {
            Operacion::ReencaucheSalida(datos) => assert_eq!(datos.profundidad_post_mm, 16.0),
            otra => panic!("operación inesperada: {:?}", otra),
        }
    }

    #[test]
    fn test_reencauche_salida_profundidad_fuera_de_rango() {
        let mut req = request_base(TipoEvento::ReencaucheSalida);
        req.neumatico_id = Some(Uuid::new_v4());
        req.profundidad_post_reencauche_mm = Some(75.0);
        req.destino_almacen_id = Some(Uuid::new_v4());

        assert!(es_validacion(ComandoEvento::parsear(&req)));
    }

    #[test]
    fn test_ajuste_no_permite_instalado_ni_desechado() {
        for estado in ["INSTALADO", "DESECHADO"] {
            let mut req = request_base(TipoEvento::AjusteInventario);
            req.neumatico_id = Some(Uuid::new_v4());
            req.estado_ajuste = Some(estado.to_string());
            req.destino_almacen_id = Some(Uuid::new_v4());

            assert!(es_validacion(ComandoEvento::parsear(&req)), "estado {}", estado);
        }
    }

    #[test]
    fn test_ajuste_a_reparado() {
        let mut req = request_base(TipoEvento::AjusteInventario);
        req.neumatico_id = Some(Uuid::new_v4());
        req.estado_ajuste = Some("REPARADO".to_string());
        req.destino_almacen_id = Some(Uuid::new_v4());

        let comando = ComandoEvento::parsear(&req).unwrap();
        match comando.operacion {
            Operacion::AjusteInventario(datos) => {
                assert_eq!(datos.estado_destino, EstadoNeumatico::Reparado);
            }
            otra => panic!("operación inesperada: {:?}", otra),
        }
    }

    #[test]
    fn test_tipos_no_soportados() {
        for tipo in [TipoEvento::Movimiento, TipoEvento::Venta, TipoEvento::BajaPorRobo] {
            let mut req = request_base(tipo);
            req.neumatico_id = Some(Uuid::new_v4());
            assert!(es_validacion(ComandoEvento::parsear(&req)), "tipo {}", tipo);
        }
    }

    #[test]
    fn test_fecha_evento_default_es_hoy() {
        let mut req = request_base(TipoEvento::Inspeccion);
        req.neumatico_id = Some(Uuid::new_v4());
        req.presion_psi = Some(100.0);

        let comando = ComandoEvento::parsear(&req).unwrap();
        assert_eq!(comando.fecha_evento, chrono::Utc::now().date_naive());
    }
}
