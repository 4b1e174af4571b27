// [libs/domain/models-rs/src/deformation.rs]
/*!
 * =================================================================
 * APARATO: DEFORMATION MODELS (V3.0)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: CONTRATO DE MEDICIONES DE DESPLAZAMIENTO VERTICAL
 * =================================================================
 */

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Medición cruda producida por el muestreador de rásters.
///
/// Los puntos sin muestra (fuera de huella, NoData, coherencia bajo el
/// piso configurado) se omiten del lote; nunca viajan como nulos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointMeasurement {
    pub point_id: Uuid,
    /// Fecha de la adquisición secundaria (la más tardía del par).
    pub acquired_on: NaiveDate,
    /// Desplazamiento vertical en milímetros, precisión 0.001 mm.
    pub displacement_mm: f64,
    /// Coherencia interferométrica en [0, 1]; ausente si el ráster de
    /// coherencia no fue emitido.
    pub coherence: Option<f64>,
}

/// Fila de deformación persistida, única por (punto, misión, fecha).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeformationSample {
    pub point_id: Uuid,
    pub job_id: Uuid,
    pub acquired_on: NaiveDate,
    pub displacement_mm: f64,
    pub coherence: Option<f64>,
    /// Pendiente OLS en mm/año; nula hasta la pasada de derivación.
    pub velocity_mm_year: Option<f64>,
}
