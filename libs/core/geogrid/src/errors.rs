// [libs/core/geogrid/src/errors.rs]
/*!
 * =================================================================
 * APARATO: GEODESIC FAULT CATALOG (V5.0)
 * CLASIFICACIÓN: COMPUTE CORE (ESTRATO L1)
 * RESPONSABILIDAD: CATALOGACIÓN SEMÁNTICA DE FALLOS GEOMÉTRICOS
 * =================================================================
 */

use thiserror::Error;

/// Fallos del motor de retículas; todos rechazan la solicitud del
/// llamador sin efectos secundarios.
#[derive(Error, Debug)]
pub enum GridFault {
    /// El contorno no es un polígono simple, cerrado y dentro de los
    /// rangos WGS84 admitidos.
    #[error("[L1_GRID_FAULT]: INVALID_GEOMETRY -> {0}")]
    InvalidGeometry(String),

    /// El área geodésica del contorno excede el techo configurado.
    #[error("[L1_GRID_FAULT]: AREA_TOO_LARGE -> {area_km2:.4} km2 exceeds {limit_km2:.4} km2")]
    AreaTooLarge { area_km2: f64, limit_km2: f64 },

    /// El espaciado solicitado está bajo el piso físico de 1 m.
    #[error("[L1_GRID_FAULT]: INVALID_SPACING -> {0} m")]
    InvalidSpacing(f64),
}
