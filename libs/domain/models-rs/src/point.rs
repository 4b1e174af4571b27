// [libs/domain/models-rs/src/point.rs]
/*!
 * =================================================================
 * APARATO: MONITORING POINT ENTITY (V3.0)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: CONTRATO DE LA RETÍCULA DE REFERENCIA TERRESTRE
 * =================================================================
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Punto de referencia terrestre generado por la retícula geodésica.
///
/// Inmutable tras su creación; pertenece exactamente a una
/// infraestructura y se destruye junto a ella.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringPoint {
    pub id: Uuid,
    pub infrastructure_id: Uuid,
    /// Longitud WGS84 en grados decimales.
    pub longitude: f64,
    /// Latitud WGS84 en grados decimales.
    pub latitude: f64,
    /// Clasificación de suelo opcional (estrato geotécnico externo).
    pub soil_type: Option<String>,
}

/// Recibo de materialización de una retícula persistida.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridProvisionReceipt {
    /// Puntos efectivamente persistidos.
    pub point_count: usize,
    /// Duración física de la materialización (validación + inserción).
    pub duration_ms: u64,
}
