// [libs/domain/models-rs/src/granule.rs]
/*!
 * =================================================================
 * APARATO: GRANULE CATALOG MODELS (V3.0)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: CONTRATO DE ADQUISICIONES SENTINEL-1 SLC
 * =================================================================
 */

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Ventana de fechas cerrada para la búsqueda de adquisiciones.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

/// Registro de una adquisición satelital reportada por el catálogo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GranuleRecord {
    /// Nombre estandarizado del producto (codifica plataforma y fechas).
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub stop_time: DateTime<Utc>,
    /// Identificador de track orbital; los pares solo se forman dentro
    /// del mismo track.
    pub orbital_path: Option<i64>,
    pub frame: Option<i64>,
    pub polarization: Option<String>,
    pub flight_direction: Option<String>,
    /// Huella del granulo como WKT, cuando el catálogo la reporta.
    pub footprint_wkt: Option<String>,
    /// Baseline perpendicular en metros, cuando el catálogo la reporta.
    pub perpendicular_baseline_m: Option<f64>,
}
