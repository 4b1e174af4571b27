// [libs/domain/models-rs/src/units.rs]
/*!
 * =================================================================
 * APARATO: FIXED-POINT UNIT HELPERS (V3.0)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: CONVERSIONES DE UNIDADES CON PRECISIÓN NOMINAL
 * =================================================================
 */

/// Días físicos por año juliano, para la conversión de pendientes.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Redondeo half-to-even a precisión de 0.001 (tres decimales).
pub fn round_to_milli(value: f64) -> f64 {
    (value * 1000.0).round_ties_even() / 1000.0
}

/// Convierte un desplazamiento en metros a milímetros con precisión
/// fija de 0.001 mm.
pub fn meters_to_millimeters(meters: f64) -> f64 {
    round_to_milli(meters * 1000.0)
}
