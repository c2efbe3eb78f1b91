use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use serde_json::json;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::config::ConfigAlertas;
use crate::models::alerta::{Alerta, DeteccionAlerta, SeveridadAlerta, TipoAlerta};
use crate::models::evento::{EventoNeumatico, TipoEvento};
use crate::models::modelo_neumatico::ModeloNeumatico;
use crate::models::neumatico::Neumatico;
use crate::models::parametro::TipoParametro;
use crate::repositories::{
    AlertaRepository, AlmacenRepository, ModeloRepository, NeumaticoRepository,
    ParametroRepository, VehiculoRepository,
};
use crate::utils::errors::AppError;

/// Resultado de una regla sobre los datos del evento, antes de mirar qué
/// alertas hay abiertas.
#[derive(Debug, Clone)]
pub enum EvaluacionRegla {
    /// La condición se cumple; así se vería la alerta.
    Deteccion(DeteccionAlerta),
    /// La regla midió la condición y ya no se cumple.
    CondicionLimpia { nota: String },
    /// La regla no tiene datos suficientes en este evento.
    NoAplica,
}

/// Qué hacer con la alerta abierta (o su ausencia) dada una evaluación.
#[derive(Debug)]
pub enum DecisionAlerta {
    Crear(DeteccionAlerta),
    /// Ya existe una alerta abierta del tipo: se devuelve sin duplicar.
    Mantener(Alerta),
    Resolver { nota: String },
    Nada,
}

/// Única función de decisión del motor: cruza la evaluación de la regla
/// con la alerta abierta del mismo tipo y alcance.
pub fn decidir_alerta(evaluacion: EvaluacionRegla, abierta: Option<Alerta>) -> DecisionAlerta {
    match (evaluacion, abierta) {
        (EvaluacionRegla::Deteccion(deteccion), None) => DecisionAlerta::Crear(deteccion),
        (EvaluacionRegla::Deteccion(_), Some(existente)) => DecisionAlerta::Mantener(existente),
        (EvaluacionRegla::CondicionLimpia { nota }, Some(_)) => DecisionAlerta::Resolver { nota },
        (EvaluacionRegla::CondicionLimpia { .. }, None) => DecisionAlerta::Nada,
        (EvaluacionRegla::NoAplica, _) => DecisionAlerta::Nada,
    }
}

/// Alertas tocadas por una pasada del motor.
#[derive(Debug, Default)]
pub struct ResultadoAlertas {
    /// Creadas en esta pasada; son las únicas que se notifican.
    pub creadas: Vec<Alerta>,
    /// Ya estaban abiertas y la condición persiste.
    pub vigentes: Vec<Alerta>,
    /// Cerradas automáticamente porque la condición dejó de cumplirse.
    pub resueltas: Vec<Alerta>,
}

impl ResultadoAlertas {
    /// Alertas activas tras la pasada: las nuevas más las que siguen
    /// abiertas.
    pub fn activas(&self) -> Vec<Alerta> {
        self.creadas
            .iter()
            .chain(self.vigentes.iter())
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatronDesgaste {
    Lateral,
    Central,
    Asimetrico,
}

impl PatronDesgaste {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatronDesgaste::Lateral => "LATERAL",
            PatronDesgaste::Central => "CENTRAL",
            PatronDesgaste::Asimetrico => "ASIMETRICO",
        }
    }

    pub fn causa_probable(&self) -> &'static str {
        match self {
            PatronDesgaste::Lateral => "desgaste en hombros, posible baja presión de inflado",
            PatronDesgaste::Central => {
                "desgaste concentrado en el centro de la banda, posible exceso de presión"
            }
            PatronDesgaste::Asimetrico => {
                "desgaste asimétrico entre lados, posible desalineación o falla de suspensión"
            }
        }
    }
}

/// Clasifica el patrón de desgaste a partir de las tres zonas medidas.
/// Devuelve el patrón y la amplitud (máx - mín) cuando alguna diferencia
/// alcanza el umbral.
pub fn clasificar_desgaste(
    exterior: f64,
    centro: f64,
    interior: f64,
    umbral: f64,
) -> Option<(PatronDesgaste, f64)> {
    let diferencia_lados = (exterior - interior).abs();
    let promedio_lados = (exterior + interior) / 2.0;
    let maxima = exterior.max(centro).max(interior);
    let minima = exterior.min(centro).min(interior);
    let amplitud = maxima - minima;

    if diferencia_lados >= umbral {
        Some((PatronDesgaste::Asimetrico, amplitud))
    } else if centro - promedio_lados >= umbral {
        // Hombros más gastados que el centro
        Some((PatronDesgaste::Lateral, amplitud))
    } else if promedio_lados - centro >= umbral {
        Some((PatronDesgaste::Central, amplitud))
    } else {
        None
    }
}

lazy_static! {
    /// Término canónico y patrón tolerante a mayúsculas y espacios múltiples
    static ref PATRONES_DESGASTE: Vec<(&'static str, Regex)> = [
        ("desgaste irregular", r"desgaste\s+irregular"),
        ("hombro", r"hombro"),
        ("desalinea", r"desalinea"),
        ("escalonado", r"escalonado"),
        ("ondulado", r"ondulado"),
        ("dientes de sierra", r"dientes\s+de\s+sierra"),
    ]
    .iter()
    .map(|(termino, patron)| (*termino, Regex::new(&format!("(?i){}", patron)).unwrap()))
    .collect();
}

/// Palabras clave de patrones de desgaste presentes en las notas de una
/// inspección.
pub fn palabras_clave_en_notas(notas: &str) -> Vec<String> {
    PATRONES_DESGASTE
        .iter()
        .filter(|(_, regex)| regex.is_match(notas))
        .map(|(termino, _)| termino.to_string())
        .collect()
}

/// Regla de profundidad baja, ya resuelto el umbral vigente.
pub fn evaluar_profundidad(
    neumatico: &Neumatico,
    medida_mm: f64,
    umbral_mm: f64,
    parametro_id: Option<Uuid>,
) -> EvaluacionRegla {
    if medida_mm >= umbral_mm {
        return EvaluacionRegla::CondicionLimpia {
            nota: format!(
                "profundidad {:.1} mm alcanza el umbral mínimo de {:.1} mm",
                medida_mm, umbral_mm
            ),
        };
    }

    let severidad = if medida_mm < umbral_mm / 2.0 {
        SeveridadAlerta::Critical
    } else {
        SeveridadAlerta::High
    };

    let deteccion = DeteccionAlerta::para_neumatico(
        TipoAlerta::ProfundidadBaja,
        severidad,
        neumatico.id,
        format!(
            "Profundidad {:.1} mm por debajo del umbral mínimo de {:.1} mm",
            medida_mm, umbral_mm
        ),
        json!({
            "profundidad_medida_mm": medida_mm,
            "umbral_mm": umbral_mm,
            "parametro_id": parametro_id,
        }),
    )
    .con_vehiculo(neumatico.vehiculo_id)
    .con_parametro(parametro_id);

    EvaluacionRegla::Deteccion(deteccion)
}

/// Regla de presión anormal: una medición decide sobre ambos tipos
/// (PRESION_BAJA y PRESION_ALTA) a la vez.
pub fn evaluar_presion(
    neumatico: &Neumatico,
    presion_psi: f64,
    recomendada_psi: f64,
    config: &ConfigAlertas,
) -> Vec<(TipoAlerta, EvaluacionRegla)> {
    let (banda_min, banda_max) = config.banda_presion(recomendada_psi);
    let desviacion_pct = (presion_psi - recomendada_psi) / recomendada_psi * 100.0;
    let severidad = if desviacion_pct.abs() >= config.tolerancia_presion_pct * 2.0 {
        SeveridadAlerta::High
    } else {
        SeveridadAlerta::Warn
    };
    let contexto = json!({
        "presion_medida_psi": presion_psi,
        "presion_recomendada_psi": recomendada_psi,
        "banda_min_psi": banda_min,
        "banda_max_psi": banda_max,
        "desviacion_pct": desviacion_pct,
    });

    if presion_psi < banda_min {
        let deteccion = DeteccionAlerta::para_neumatico(
            TipoAlerta::PresionBaja,
            severidad,
            neumatico.id,
            format!(
                "Presión {:.1} psi por debajo de la banda recomendada [{:.1}, {:.1}] psi",
                presion_psi, banda_min, banda_max
            ),
            contexto,
        )
        .con_vehiculo(neumatico.vehiculo_id);

        vec![
            (TipoAlerta::PresionBaja, EvaluacionRegla::Deteccion(deteccion)),
            (
                TipoAlerta::PresionAlta,
                EvaluacionRegla::CondicionLimpia {
                    nota: format!(
                        "presión {:.1} psi por debajo de la banda, sin exceso de presión",
                        presion_psi
                    ),
                },
            ),
        ]
    } else if presion_psi > banda_max {
        let deteccion = DeteccionAlerta::para_neumatico(
            TipoAlerta::PresionAlta,
            severidad,
            neumatico.id,
            format!(
                "Presión {:.1} psi por encima de la banda recomendada [{:.1}, {:.1}] psi",
                presion_psi, banda_min, banda_max
            ),
            contexto,
        )
        .con_vehiculo(neumatico.vehiculo_id);

        vec![
            (TipoAlerta::PresionAlta, EvaluacionRegla::Deteccion(deteccion)),
            (
                TipoAlerta::PresionBaja,
                EvaluacionRegla::CondicionLimpia {
                    nota: format!(
                        "presión {:.1} psi por encima de la banda, sin defecto de presión",
                        presion_psi
                    ),
                },
            ),
        ]
    } else {
        let nota = format!(
            "presión {:.1} psi dentro de la banda recomendada [{:.1}, {:.1}] psi",
            presion_psi, banda_min, banda_max
        );
        vec![
            (
                TipoAlerta::PresionBaja,
                EvaluacionRegla::CondicionLimpia { nota: nota.clone() },
            ),
            (TipoAlerta::PresionAlta, EvaluacionRegla::CondicionLimpia { nota }),
        ]
    }
}

/// Regla de límite de reencauches alcanzado.
pub fn evaluar_limite_reencauches(
    neumatico: &Neumatico,
    modelo: &ModeloNeumatico,
) -> EvaluacionRegla {
    let Some(maximos) = modelo.limite_reencauches() else {
        // El modelo no se reencaucha; no hay límite que vigilar
        return EvaluacionRegla::NoAplica;
    };

    if neumatico.reencauches_realizados < maximos {
        return EvaluacionRegla::CondicionLimpia {
            nota: format!(
                "reencauches realizados {} por debajo del límite {}",
                neumatico.reencauches_realizados, maximos
            ),
        };
    }

    let deteccion = DeteccionAlerta::para_neumatico(
        TipoAlerta::LimiteReencauches,
        SeveridadAlerta::Warn,
        neumatico.id,
        format!(
            "El neumático alcanzó el límite de {} reencauches del modelo {} {}",
            maximos, modelo.nombre, modelo.medida
        ),
        json!({
            "reencauches_realizados": neumatico.reencauches_realizados,
            "reencauches_maximos": maximos,
        }),
    )
    .con_vehiculo(neumatico.vehiculo_id);

    EvaluacionRegla::Deteccion(deteccion)
}

/// Regla de desgaste irregular sobre una inspección: zonas medidas y
/// palabras clave en las notas.
pub fn evaluar_desgaste_irregular(
    neumatico: &Neumatico,
    evento: &EventoNeumatico,
    umbral_mm: f64,
) -> EvaluacionRegla {
    if evento.tipo_evento != TipoEvento::Inspeccion {
        return EvaluacionRegla::NoAplica;
    }

    let palabras = evento
        .notas
        .as_deref()
        .map(palabras_clave_en_notas)
        .unwrap_or_default();

    match evento.zonas() {
        Some((exterior, centro, interior)) => {
            match clasificar_desgaste(exterior, centro, interior, umbral_mm) {
                Some((patron, diferencia_mm)) => {
                    let severidad = if diferencia_mm >= umbral_mm * 2.0 {
                        SeveridadAlerta::High
                    } else {
                        SeveridadAlerta::Warn
                    };
                    let deteccion = DeteccionAlerta::para_neumatico(
                        TipoAlerta::DesgasteIrregular,
                        severidad,
                        neumatico.id,
                        format!(
                            "Desgaste irregular {}: diferencia de {:.1} mm entre zonas (umbral {:.1} mm); {}",
                            patron.as_str(),
                            diferencia_mm,
                            umbral_mm,
                            patron.causa_probable()
                        ),
                        json!({
                            "profundidad_exterior_mm": exterior,
                            "profundidad_centro_mm": centro,
                            "profundidad_interior_mm": interior,
                            "diferencia_mm": diferencia_mm,
                            "umbral_mm": umbral_mm,
                            "patron": patron.as_str(),
                            "causa_probable": patron.causa_probable(),
                            "palabras_clave": palabras,
                        }),
                    )
                    .con_vehiculo(neumatico.vehiculo_id);

                    EvaluacionRegla::Deteccion(deteccion)
                }
                // Las zonas medidas mandan sobre las notas
                None => EvaluacionRegla::CondicionLimpia {
                    nota: format!(
                        "diferencia entre zonas por debajo del umbral de {:.1} mm",
                        umbral_mm
                    ),
                },
            }
        }
        None if !palabras.is_empty() => {
            let deteccion = DeteccionAlerta::para_neumatico(
                TipoAlerta::DesgasteIrregular,
                SeveridadAlerta::Warn,
                neumatico.id,
                format!(
                    "Desgaste irregular reportado en notas de inspección: {}",
                    palabras.join(", ")
                ),
                json!({
                    "umbral_mm": umbral_mm,
                    "palabras_clave": palabras,
                }),
            )
            .con_vehiculo(neumatico.vehiculo_id);

            EvaluacionRegla::Deteccion(deteccion)
        }
        None => EvaluacionRegla::NoAplica,
    }
}

/// Regla de fin de vida útil: edad, kilometraje acumulado o porcentaje de
/// desgaste cuando la inspección trae profundidad.
pub fn evaluar_fin_vida(
    neumatico: &Neumatico,
    fecha_evento: chrono::NaiveDate,
    pct_desgaste: Option<f64>,
    config: &ConfigAlertas,
) -> EvaluacionRegla {
    let edad_anos = neumatico.edad_anos(fecha_evento);
    let km = neumatico.kilometraje_acumulado;

    let mut motivos: Vec<String> = Vec::new();
    let mut severidad = SeveridadAlerta::Warn;

    if edad_anos >= config.anos_vida_util {
        motivos.push(format!(
            "edad {} años alcanza el límite de {} años",
            edad_anos, config.anos_vida_util
        ));
    }
    if km >= config.km_vida_util {
        motivos.push(format!(
            "kilometraje acumulado {} km alcanza el límite de {} km",
            km, config.km_vida_util
        ));
    }
    if let Some(pct) = pct_desgaste {
        if pct >= config.pct_desgaste_critico {
            motivos.push(format!(
                "desgaste {:.1}% alcanza el nivel crítico de {:.1}%",
                pct, config.pct_desgaste_critico
            ));
            severidad = SeveridadAlerta::High;
        } else if pct >= config.pct_desgaste_advertencia {
            motivos.push(format!(
                "desgaste {:.1}% alcanza el nivel de advertencia de {:.1}%",
                pct, config.pct_desgaste_advertencia
            ));
        }
    }

    if motivos.is_empty() {
        return EvaluacionRegla::CondicionLimpia {
            nota: "edad, kilometraje y desgaste dentro de los límites de vida útil".to_string(),
        };
    }

    let deteccion = DeteccionAlerta::para_neumatico(
        TipoAlerta::FinVidaUtil,
        severidad,
        neumatico.id,
        format!("Fin de vida útil: {}", motivos.join("; ")),
        json!({
            "edad_anos": edad_anos,
            "km_acumulado": km.to_f64(),
            "pct_desgaste": pct_desgaste,
            "edad_limite_anos": config.anos_vida_util,
            "km_limite": config.km_vida_util.to_f64(),
            "pct_advertencia": config.pct_desgaste_advertencia,
            "pct_critico": config.pct_desgaste_critico,
        }),
    )
    .con_vehiculo(neumatico.vehiculo_id);

    EvaluacionRegla::Deteccion(deteccion)
}

/// Regla de stock mínimo de un modelo en un almacén.
pub fn evaluar_stock(
    modelo: &ModeloNeumatico,
    almacen_id: Uuid,
    almacen_nombre: &str,
    stock_actual: i64,
    stock_minimo: i64,
    parametro_id: Uuid,
) -> EvaluacionRegla {
    if stock_actual >= stock_minimo {
        return EvaluacionRegla::CondicionLimpia {
            nota: format!(
                "stock recuperado: {} unidades sobre el mínimo de {}",
                stock_actual, stock_minimo
            ),
        };
    }

    let severidad = if stock_actual == 0 {
        SeveridadAlerta::High
    } else {
        SeveridadAlerta::Warn
    };

    let deteccion = DeteccionAlerta::para_stock(
        severidad,
        modelo.id,
        almacen_id,
        format!(
            "Stock de {} {} en {}: {} unidades, por debajo del mínimo de {}",
            modelo.nombre, modelo.medida, almacen_nombre, stock_actual, stock_minimo
        ),
        json!({
            "stock_actual": stock_actual,
            "stock_minimo": stock_minimo,
            "modelo_id": modelo.id,
            "almacen_id": almacen_id,
            "parametro_id": parametro_id,
        }),
    )
    .con_parametro(Some(parametro_id));

    EvaluacionRegla::Deteccion(deteccion)
}

/// Motor de alertas: corre las reglas sobre el neumático recién mutado y
/// su evento, dentro de la transacción del motor de ciclo de vida.
pub struct AlertaService {
    config: ConfigAlertas,
    alerta_repo: AlertaRepository,
    neumatico_repo: NeumaticoRepository,
    modelo_repo: ModeloRepository,
    vehiculo_repo: VehiculoRepository,
    parametro_repo: ParametroRepository,
    almacen_repo: AlmacenRepository,
}

impl AlertaService {
    pub fn new(pool: PgPool, config: ConfigAlertas) -> Self {
        Self {
            config,
            alerta_repo: AlertaRepository::new(pool.clone()),
            neumatico_repo: NeumaticoRepository::new(pool.clone()),
            modelo_repo: ModeloRepository::new(pool.clone()),
            vehiculo_repo: VehiculoRepository::new(pool.clone()),
            parametro_repo: ParametroRepository::new(pool.clone()),
            almacen_repo: AlmacenRepository::new(pool),
        }
    }

    /// Evalúa todas las reglas para (neumático, evento). Una regla que
    /// falla se registra y se omite; nunca tumba a las demás ni a la
    /// transacción que nos contiene.
    pub async fn verificar_y_crear_alertas(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        neumatico: &Neumatico,
        evento: &EventoNeumatico,
    ) -> Result<ResultadoAlertas, AppError> {
        log::info!(
            "🔎 Evaluando reglas de alerta para neumático {} tras {}",
            neumatico.id,
            evento.tipo_evento
        );

        let mut resultado = ResultadoAlertas::default();
        let modelo = self.cargar_modelo(neumatico).await;

        if let Err(e) = self
            .regla_profundidad_baja(tx, neumatico, evento, &mut resultado)
            .await
        {
            log::warn!("⚠️ Regla PROFUNDIDAD_BAJA no aplicada: {}", e);
        }

        if let Err(e) = self
            .regla_presion(tx, neumatico, evento, modelo.as_ref(), &mut resultado)
            .await
        {
            log::warn!("⚠️ Regla de presión no aplicada: {}", e);
        }

        if let Err(e) = self
            .regla_limite_reencauches(tx, neumatico, modelo.as_ref(), &mut resultado)
            .await
        {
            log::warn!("⚠️ Regla LIMITE_REENCAUCHES no aplicada: {}", e);
        }

        if let Err(e) = self
            .regla_desgaste_irregular(tx, neumatico, evento, &mut resultado)
            .await
        {
            log::warn!("⚠️ Regla DESGASTE_IRREGULAR no aplicada: {}", e);
        }

        if let Err(e) = self
            .regla_fin_vida_util(tx, neumatico, evento, &mut resultado)
            .await
        {
            log::warn!("⚠️ Regla FIN_VIDA_UTIL no aplicada: {}", e);
        }

        if let Err(e) = self
            .regla_stock_minimo(tx, neumatico, evento, modelo.as_ref(), &mut resultado)
            .await
        {
            log::warn!("⚠️ Regla STOCK_MINIMO no aplicada: {}", e);
        }

        log::info!(
            "📋 Alertas para neumático {}: {} creadas, {} vigentes, {} resueltas",
            neumatico.id,
            resultado.creadas.len(),
            resultado.vigentes.len(),
            resultado.resueltas.len()
        );

        Ok(resultado)
    }

    async fn cargar_modelo(&self, neumatico: &Neumatico) -> Option<ModeloNeumatico> {
        match self.modelo_repo.obtener_por_id(neumatico.modelo_id).await {
            Ok(Some(modelo)) => Some(modelo),
            Ok(None) => {
                log::warn!(
                    "⚠️ Neumático {} referencia un modelo inexistente {}; se omiten las reglas que dependen del modelo",
                    neumatico.id,
                    neumatico.modelo_id
                );
                None
            }
            Err(e) => {
                log::warn!(
                    "⚠️ No se pudo cargar el modelo {} del neumático {}: {}",
                    neumatico.modelo_id,
                    neumatico.id,
                    e
                );
                None
            }
        }
    }

    async fn regla_profundidad_baja(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        neumatico: &Neumatico,
        evento: &EventoNeumatico,
        resultado: &mut ResultadoAlertas,
    ) -> Result<(), AppError> {
        let medida = match (evento.tipo_evento, evento.profundidad_medida()) {
            (TipoEvento::Inspeccion, Some(mm)) => mm,
            _ => return Ok(()),
        };

        let parametro = self
            .parametro_repo
            .vigente(
                TipoParametro::ProfundidadMinima,
                neumatico.modelo_id,
                neumatico.almacen_id,
            )
            .await?;
        let (umbral, parametro_id) = match &parametro {
            Some(p) => (
                p.valor
                    .to_f64()
                    .unwrap_or(self.config.profundidad_minima_default_mm),
                Some(p.id),
            ),
            None => (self.config.profundidad_minima_default_mm, None),
        };

        let evaluacion = evaluar_profundidad(neumatico, medida, umbral, parametro_id);
        self.aplicar_a_neumatico(tx, TipoAlerta::ProfundidadBaja, neumatico.id, evaluacion, resultado)
            .await
    }

    async fn regla_presion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        neumatico: &Neumatico,
        evento: &EventoNeumatico,
        modelo: Option<&ModeloNeumatico>,
        resultado: &mut ResultadoAlertas,
    ) -> Result<(), AppError> {
        let presion = match (evento.tipo_evento, evento.presion_psi) {
            (TipoEvento::Inspeccion | TipoEvento::Instalacion, Some(psi)) => psi,
            _ => return Ok(()),
        };
        let recomendada = match modelo.and_then(|m| m.presion_recomendada_psi) {
            Some(psi) if psi > 0.0 => psi,
            // Sin presión de referencia no hay banda contra la que comparar
            _ => return Ok(()),
        };

        for (tipo, evaluacion) in evaluar_presion(neumatico, presion, recomendada, &self.config) {
            self.aplicar_a_neumatico(tx, tipo, neumatico.id, evaluacion, resultado)
                .await?;
        }
        Ok(())
    }

    async fn regla_limite_reencauches(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        neumatico: &Neumatico,
        modelo: Option<&ModeloNeumatico>,
        resultado: &mut ResultadoAlertas,
    ) -> Result<(), AppError> {
        let Some(modelo) = modelo else {
            return Ok(());
        };

        let evaluacion = evaluar_limite_reencauches(neumatico, modelo);
        self.aplicar_a_neumatico(
            tx,
            TipoAlerta::LimiteReencauches,
            neumatico.id,
            evaluacion,
            resultado,
        )
        .await
    }

    async fn regla_desgaste_irregular(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        neumatico: &Neumatico,
        evento: &EventoNeumatico,
        resultado: &mut ResultadoAlertas,
    ) -> Result<(), AppError> {
        if evento.tipo_evento != TipoEvento::Inspeccion {
            return Ok(());
        }

        let clase = match neumatico.vehiculo_id {
            Some(vehiculo_id) => self.vehiculo_repo.clase_peso_de_vehiculo(vehiculo_id).await?,
            None => None,
        };
        let umbral = self.config.umbral_desgaste_para(clase);

        let evaluacion = evaluar_desgaste_irregular(neumatico, evento, umbral);
        self.aplicar_a_neumatico(
            tx,
            TipoAlerta::DesgasteIrregular,
            neumatico.id,
            evaluacion,
            resultado,
        )
        .await
    }

    async fn regla_fin_vida_util(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        neumatico: &Neumatico,
        evento: &EventoNeumatico,
        resultado: &mut ResultadoAlertas,
    ) -> Result<(), AppError> {
        let pct = match (evento.tipo_evento, evento.profundidad_medida()) {
            (TipoEvento::Inspeccion, Some(mm)) => neumatico.pct_desgaste(mm),
            _ => None,
        };

        let evaluacion = evaluar_fin_vida(neumatico, evento.fecha_evento, pct, &self.config);
        self.aplicar_a_neumatico(tx, TipoAlerta::FinVidaUtil, neumatico.id, evaluacion, resultado)
            .await
    }

    /// El stock se revisa para los almacenes que el evento tocó: donde quedó
    /// el neumático y el almacén destino del evento. Una instalación deja el
    /// almacén de origen sin revisar hasta el próximo movimiento; la cuenta
    /// se corrige sola en ese momento.
    async fn regla_stock_minimo(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        neumatico: &Neumatico,
        evento: &EventoNeumatico,
        modelo: Option<&ModeloNeumatico>,
        resultado: &mut ResultadoAlertas,
    ) -> Result<(), AppError> {
        let Some(modelo) = modelo else {
            return Ok(());
        };

        let mut almacenes: Vec<Uuid> = Vec::new();
        if let Some(almacen_id) = neumatico.almacen_id {
            almacenes.push(almacen_id);
        }
        if let Some(almacen_id) = evento.destino_almacen_id {
            if !almacenes.contains(&almacen_id) {
                almacenes.push(almacen_id);
            }
        }

        for almacen_id in almacenes {
            let Some(parametro) = self
                .parametro_repo
                .vigente(TipoParametro::StockMinimo, modelo.id, Some(almacen_id))
                .await?
            else {
                continue;
            };
            let minimo = parametro.valor.to_i64().unwrap_or(0);
            let stock = self
                .neumatico_repo
                .contar_en_stock(tx, modelo.id, almacen_id)
                .await?;
            let almacen_nombre = self
                .almacen_repo
                .obtener_por_id(almacen_id)
                .await?
                .map(|a| a.nombre)
                .unwrap_or_else(|| almacen_id.to_string());

            let evaluacion =
                evaluar_stock(modelo, almacen_id, &almacen_nombre, stock, minimo, parametro.id);
            self.aplicar_a_stock(tx, modelo.id, almacen_id, evaluacion, resultado)
                .await?;
        }

        Ok(())
    }

    async fn aplicar_a_neumatico(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tipo: TipoAlerta,
        neumatico_id: Uuid,
        evaluacion: EvaluacionRegla,
        resultado: &mut ResultadoAlertas,
    ) -> Result<(), AppError> {
        if matches!(evaluacion, EvaluacionRegla::NoAplica) {
            return Ok(());
        }

        let abierta = self
            .alerta_repo
            .abierta_de_neumatico(tx, tipo, neumatico_id)
            .await?;

        match decidir_alerta(evaluacion, abierta) {
            DecisionAlerta::Crear(deteccion) => {
                let alerta = self.alerta_repo.crear(tx, &deteccion).await?;
                log::info!(
                    "🚨 Alerta {} [{}] creada para neumático {}",
                    tipo,
                    alerta.severidad.as_str(),
                    neumatico_id
                );
                resultado.creadas.push(alerta);
            }
            DecisionAlerta::Mantener(alerta) => resultado.vigentes.push(alerta),
            DecisionAlerta::Resolver { nota } => {
                let nota = format!("Resuelta automáticamente: {}", nota);
                let mut cerradas = self
                    .alerta_repo
                    .resolver_abiertas_de_neumatico(tx, tipo, neumatico_id, &nota)
                    .await?;
                log::info!(
                    "✅ {} alerta(s) {} resuelta(s) para neumático {}",
                    cerradas.len(),
                    tipo,
                    neumatico_id
                );
                resultado.resueltas.append(&mut cerradas);
            }
            DecisionAlerta::Nada => {}
        }

        Ok(())
    }

    async fn aplicar_a_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        modelo_id: Uuid,
        almacen_id: Uuid,
        evaluacion: EvaluacionRegla,
        resultado: &mut ResultadoAlertas,
    ) -> Result<(), AppError> {
        if matches!(evaluacion, EvaluacionRegla::NoAplica) {
            return Ok(());
        }

        let abierta = self
            .alerta_repo
            .abierta_de_stock(tx, modelo_id, almacen_id)
            .await?;

        match decidir_alerta(evaluacion, abierta) {
            DecisionAlerta::Crear(deteccion) => {
                let alerta = self.alerta_repo.crear(tx, &deteccion).await?;
                log::info!(
                    "🚨 Alerta STOCK_MINIMO [{}] creada para modelo {} en almacén {}",
                    alerta.severidad.as_str(),
                    modelo_id,
                    almacen_id
                );
                resultado.creadas.push(alerta);
            }
            DecisionAlerta::Mantener(alerta) => resultado.vigentes.push(alerta),
            DecisionAlerta::Resolver { nota } => {
                let nota = format!("Resuelta automáticamente: {}", nota);
                let mut cerradas = self
                    .alerta_repo
                    .resolver_abiertas_de_stock(tx, modelo_id, almacen_id, &nota)
                    .await?;
                log::info!(
                    "✅ {} alerta(s) STOCK_MINIMO resuelta(s) para modelo {} en almacén {}",
                    cerradas.len(),
                    modelo_id,
                    almacen_id
                );
                resultado.resueltas.append(&mut cerradas);
            }
            DecisionAlerta::Nada => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::neumatico::EstadoNeumatico;

    fn neumatico_de_prueba() -> Neumatico {
        Neumatico {
            id: Uuid::new_v4(),
            numero_serie: "SER-0001".to_string(),
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
            fecha_fabricacion: Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
            fecha_compra: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            costo_compra: Decimal::from(350),
            proveedor_compra_id: Uuid::new_v4(),
            motivo_desecho_id: None,
            fecha_desecho: None,
            creado_por: Uuid::new_v4(),
            actualizado_por: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn modelo_de_prueba() -> ModeloNeumatico {
        ModeloNeumatico {
            id: Uuid::new_v4(),
            fabricante_id: Uuid::new_v4(),
            nombre: "XZE2".to_string(),
            medida: "295/80R22.5".to_string(),
            profundidad_original_mm: 18.0,
            presion_recomendada_psi: Some(110.0),
            permite_reencauche: true,
            reencauches_maximos: 2,
            activo: true,
            created_at: Utc::now(),
        }
    }

    fn inspeccion_de_prueba(neumatico: &Neumatico) -> EventoNeumatico {
        let mut evento = EventoNeumatico::nuevo(
            neumatico.id,
            TipoEvento::Inspeccion,
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        );
        evento.profundidad_remanente_mm = Some(10.0);
        evento
    }

    fn alerta_abierta(tipo: TipoAlerta, neumatico_id: Uuid) -> Alerta {
        Alerta {
            id: Uuid::new_v4(),
            tipo_alerta: tipo,
            severidad: SeveridadAlerta::Warn,
            descripcion: "abierta".to_string(),
            neumatico_id: Some(neumatico_id),
            vehiculo_id: None,
            modelo_id: None,
            almacen_id: None,
            parametro_id: None,
            datos_contexto: serde_json::json!({}),
            resuelta: false,
            fecha_resolucion: None,
            notas_resolucion: None,
            resuelto_por: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn decidir_crea_cuando_no_hay_abierta() {
        let neumatico = neumatico_de_prueba();
        let evaluacion = evaluar_profundidad(&neumatico, 2.5, 3.0, None);
        match decidir_alerta(evaluacion, None) {
            DecisionAlerta::Crear(deteccion) => {
                assert_eq!(deteccion.tipo_alerta, TipoAlerta::ProfundidadBaja);
            }
            otra => panic!("se esperaba Crear, hubo {:?}", otra),
        }
    }

    #[test]
    fn decidir_mantiene_la_abierta_sin_duplicar() {
        let neumatico = neumatico_de_prueba();
        let abierta = alerta_abierta(TipoAlerta::ProfundidadBaja, neumatico.id);
        let id_abierta = abierta.id;
        let evaluacion = evaluar_profundidad(&neumatico, 2.5, 3.0, None);
        match decidir_alerta(evaluacion, Some(abierta)) {
            DecisionAlerta::Mantener(alerta) => assert_eq!(alerta.id, id_abierta),
            otra => panic!("se esperaba Mantener, hubo {:?}", otra),
        }
    }

    #[test]
    fn decidir_resuelve_cuando_la_condicion_limpia() {
        let neumatico = neumatico_de_prueba();
        let abierta = alerta_abierta(TipoAlerta::ProfundidadBaja, neumatico.id);
        let evaluacion = evaluar_profundidad(&neumatico, 5.0, 3.0, None);
        assert!(matches!(
            decidir_alerta(evaluacion, Some(abierta)),
            DecisionAlerta::Resolver { .. }
        ));
    }

    #[test]
    fn decidir_nada_sin_condicion_ni_abierta() {
        let neumatico = neumatico_de_prueba();
        let evaluacion = evaluar_profundidad(&neumatico, 5.0, 3.0, None);
        assert!(matches!(
            decidir_alerta(evaluacion, None),
            DecisionAlerta::Nada
        ));
        assert!(matches!(
            decidir_alerta(EvaluacionRegla::NoAplica, None),
            DecisionAlerta::Nada
        ));
    }

    #[test]
    fn profundidad_baja_lleva_la_medida_en_contexto() {
        let neumatico = neumatico_de_prueba();
        match evaluar_profundidad(&neumatico, 4.5, 5.0, None) {
            EvaluacionRegla::Deteccion(deteccion) => {
                assert_eq!(deteccion.severidad, SeveridadAlerta::High);
                assert_eq!(deteccion.datos_contexto["profundidad_medida_mm"], 4.5);
                assert_eq!(deteccion.datos_contexto["umbral_mm"], 5.0);
            }
            otra => panic!("se esperaba Deteccion, hubo {:?}", otra),
        }
    }

    #[test]
    fn profundidad_muy_baja_es_critica() {
        let neumatico = neumatico_de_prueba();
        match evaluar_profundidad(&neumatico, 1.2, 3.0, None) {
            EvaluacionRegla::Deteccion(deteccion) => {
                assert_eq!(deteccion.severidad, SeveridadAlerta::Critical);
            }
            otra => panic!("se esperaba Deteccion, hubo {:?}", otra),
        }
    }

    #[test]
    fn presion_baja_y_alta_son_excluyentes() {
        let neumatico = neumatico_de_prueba();
        let config = ConfigAlertas::default();

        // 110 psi recomendada, banda [93.5, 126.5]
        let bajas = evaluar_presion(&neumatico, 80.0, 110.0, &config);
        assert!(matches!(
            bajas[0],
            (TipoAlerta::PresionBaja, EvaluacionRegla::Deteccion(_))
        ));
        assert!(matches!(
            bajas[1],
            (TipoAlerta::PresionAlta, EvaluacionRegla::CondicionLimpia { .. })
        ));

        let altas = evaluar_presion(&neumatico, 140.0, 110.0, &config);
        assert!(matches!(
            altas[0],
            (TipoAlerta::PresionAlta, EvaluacionRegla::Deteccion(_))
        ));

        let normales = evaluar_presion(&neumatico, 110.0, 110.0, &config);
        assert!(normales.iter().all(|(_, evaluacion)| matches!(
            evaluacion,
            EvaluacionRegla::CondicionLimpia { .. }
        )));
    }

    #[test]
    fn presion_muy_desviada_escala_a_high() {
        let neumatico = neumatico_de_prueba();
        let config = ConfigAlertas::default();

        // Desviación de -36%, más del doble de la tolerancia del 15%
        match &evaluar_presion(&neumatico, 70.0, 110.0, &config)[0] {
            (TipoAlerta::PresionBaja, EvaluacionRegla::Deteccion(deteccion)) => {
                assert_eq!(deteccion.severidad, SeveridadAlerta::High);
            }
            otra => panic!("se esperaba PRESION_BAJA, hubo {:?}", otra),
        }
    }

    #[test]
    fn limite_reencauches_alcanzado_avisa_con_el_limite() {
        let mut neumatico = neumatico_de_prueba();
        neumatico.reencauches_realizados = 2;
        let modelo = modelo_de_prueba();

        match evaluar_limite_reencauches(&neumatico, &modelo) {
            EvaluacionRegla::Deteccion(deteccion) => {
                assert_eq!(deteccion.severidad, SeveridadAlerta::Warn);
                assert!(deteccion.descripcion.contains("límite de 2 reencauches"));
                assert_eq!(deteccion.datos_contexto["reencauches_realizados"], 2);
            }
            otra => panic!("se esperaba Deteccion, hubo {:?}", otra),
        }
    }

    #[test]
    fn limite_reencauches_sin_permiso_no_aplica() {
        let mut neumatico = neumatico_de_prueba();
        neumatico.reencauches_realizados = 5;
        let mut modelo = modelo_de_prueba();
        modelo.permite_reencauche = false;

        assert!(matches!(
            evaluar_limite_reencauches(&neumatico, &modelo),
            EvaluacionRegla::NoAplica
        ));
    }

    #[test]
    fn clasificar_desgaste_detecta_los_tres_patrones() {
        // Hombros gastados: centro conserva más goma
        let (patron, amplitud) = clasificar_desgaste(6.0, 9.0, 6.5, 2.0).unwrap();
        assert_eq!(patron, PatronDesgaste::Lateral);
        assert!((amplitud - 3.0).abs() < 1e-9);

        // Centro gastado
        let (patron, _) = clasificar_desgaste(9.0, 6.0, 8.5, 2.0).unwrap();
        assert_eq!(patron, PatronDesgaste::Central);

        // Un lado mucho más gastado que el otro
        let (patron, _) = clasificar_desgaste(9.0, 8.0, 5.0, 2.0).unwrap();
        assert_eq!(patron, PatronDesgaste::Asimetrico);

        // Desgaste uniforme
        assert!(clasificar_desgaste(8.0, 8.5, 8.2, 2.0).is_none());
    }

    #[test]
    fn desgaste_irregular_escala_con_la_amplitud() {
        let neumatico = neumatico_de_prueba();
        let mut evento = inspeccion_de_prueba(&neumatico);
        evento.profundidad_exterior_mm = Some(4.0);
        evento.profundidad_centro_mm = Some(9.0);
        evento.profundidad_interior_mm = Some(4.5);

        match evaluar_desgaste_irregular(&neumatico, &evento, 2.0) {
            EvaluacionRegla::Deteccion(deteccion) => {
                assert_eq!(deteccion.severidad, SeveridadAlerta::High);
                assert_eq!(deteccion.datos_contexto["patron"], "LATERAL");
            }
            otra => panic!("se esperaba Deteccion, hubo {:?}", otra),
        }
    }

    #[test]
    fn desgaste_por_palabras_clave_sin_zonas() {
        let neumatico = neumatico_de_prueba();
        let mut evento = inspeccion_de_prueba(&neumatico);
        evento.notas = Some("Se observa desgaste irregular en hombro externo".to_string());

        match evaluar_desgaste_irregular(&neumatico, &evento, 2.0) {
            EvaluacionRegla::Deteccion(deteccion) => {
                assert_eq!(deteccion.severidad, SeveridadAlerta::Warn);
                let palabras = deteccion.datos_contexto["palabras_clave"]
                    .as_array()
                    .unwrap()
                    .clone();
                assert!(palabras.iter().any(|p| p == "hombro"));
            }
            otra => panic!("se esperaba Deteccion, hubo {:?}", otra),
        }
    }

    #[test]
    fn zonas_uniformes_limpian_aunque_haya_notas() {
        let neumatico = neumatico_de_prueba();
        let mut evento = inspeccion_de_prueba(&neumatico);
        evento.profundidad_exterior_mm = Some(8.0);
        evento.profundidad_centro_mm = Some(8.3);
        evento.profundidad_interior_mm = Some(8.1);
        evento.notas = Some("chequear hombro".to_string());

        assert!(matches!(
            evaluar_desgaste_irregular(&neumatico, &evento, 2.0),
            EvaluacionRegla::CondicionLimpia { .. }
        ));
    }

    #[test]
    fn fin_de_vida_por_edad() {
        let neumatico = neumatico_de_prueba();
        let config = ConfigAlertas::default();
        let fecha = NaiveDate::from_ymd_opt(2031, 6, 1).unwrap();

        match evaluar_fin_vida(&neumatico, fecha, None, &config) {
            EvaluacionRegla::Deteccion(deteccion) => {
                assert_eq!(deteccion.severidad, SeveridadAlerta::Warn);
                assert!(deteccion.descripcion.contains("edad"));
            }
            otra => panic!("se esperaba Deteccion, hubo {:?}", otra),
        }
    }

    #[test]
    fn fin_de_vida_por_kilometraje() {
        let mut neumatico = neumatico_de_prueba();
        neumatico.kilometraje_acumulado = Decimal::from(85_000);
        let config = ConfigAlertas::default();
        let fecha = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        assert!(matches!(
            evaluar_fin_vida(&neumatico, fecha, None, &config),
            EvaluacionRegla::Deteccion(_)
        ));
    }

    #[test]
    fn fin_de_vida_por_desgaste_critico_es_high() {
        let neumatico = neumatico_de_prueba();
        let config = ConfigAlertas::default();
        let fecha = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        match evaluar_fin_vida(&neumatico, fecha, Some(90.0), &config) {
            EvaluacionRegla::Deteccion(deteccion) => {
                assert_eq!(deteccion.severidad, SeveridadAlerta::High);
            }
            otra => panic!("se esperaba Deteccion, hubo {:?}", otra),
        }

        match evaluar_fin_vida(&neumatico, fecha, Some(75.0), &config) {
            EvaluacionRegla::Deteccion(deteccion) => {
                assert_eq!(deteccion.severidad, SeveridadAlerta::Warn);
            }
            otra => panic!("se esperaba Deteccion, hubo {:?}", otra),
        }
    }

    #[test]
    fn fin_de_vida_dentro_de_limites_limpia() {
        let neumatico = neumatico_de_prueba();
        let config = ConfigAlertas::default();
        let fecha = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        assert!(matches!(
            evaluar_fin_vida(&neumatico, fecha, Some(40.0), &config),
            EvaluacionRegla::CondicionLimpia { .. }
        ));
    }

    #[test]
    fn stock_bajo_avisa_y_cero_escala() {
        let modelo = modelo_de_prueba();
        let almacen_id = Uuid::new_v4();
        let parametro_id = Uuid::new_v4();

        match evaluar_stock(&modelo, almacen_id, "Central", 2, 4, parametro_id) {
            EvaluacionRegla::Deteccion(deteccion) => {
                assert_eq!(deteccion.severidad, SeveridadAlerta::Warn);
                assert_eq!(deteccion.datos_contexto["stock_actual"], 2);
                assert_eq!(deteccion.datos_contexto["stock_minimo"], 4);
                assert_eq!(deteccion.modelo_id, Some(modelo.id));
                assert_eq!(deteccion.almacen_id, Some(almacen_id));
                assert_eq!(deteccion.neumatico_id, None);
            }
            otra => panic!("se esperaba Deteccion, hubo {:?}", otra),
        }

        match evaluar_stock(&modelo, almacen_id, "Central", 0, 4, parametro_id) {
            EvaluacionRegla::Deteccion(deteccion) => {
                assert_eq!(deteccion.severidad, SeveridadAlerta::High);
            }
            otra => panic!("se esperaba Deteccion, hubo {:?}", otra),
        }

        assert!(matches!(
            evaluar_stock(&modelo, almacen_id, "Central", 4, 4, parametro_id),
            EvaluacionRegla::CondicionLimpia { .. }
        ));
    }

    #[test]
    fn palabras_clave_ignoran_mayusculas() {
        let palabras = palabras_clave_en_notas("DESGASTE IRREGULAR con Hombro marcado");
        assert!(palabras.contains(&"desgaste irregular".to_string()));
        assert!(palabras.contains(&"hombro".to_string()));
        assert!(palabras_clave_en_notas("todo normal").is_empty());
    }
}
