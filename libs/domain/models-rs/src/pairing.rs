// [libs/domain/models-rs/src/pairing.rs]
/*!
 * =================================================================
 * APARATO: PAIR CANDIDATE MODEL (V3.0)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: CONTRATO DEL PAR INTERFEROMÉTRICO CANDIDATO
 * =================================================================
 */

use serde::{Deserialize, Serialize};

/// Par (referencia, secundaria) candidato a interferograma.
///
/// Tipo de valor efímero: se calcula, se ordena por puntaje y se
/// descarta; nunca se persiste.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairCandidate {
    pub reference_granule: String,
    pub secondary_granule: String,
    /// Separación temporal entre adquisiciones, en días.
    pub temporal_baseline_days: f64,
    /// Distancia perpendicular estimada entre posiciones orbitales (m).
    pub perpendicular_baseline_m: f64,
    pub orbital_path: Option<i64>,
    /// Puntaje compuesto acotado a [0, 1].
    pub quality_score: f64,
}
