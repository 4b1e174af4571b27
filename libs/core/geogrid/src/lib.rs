// [libs/core/geogrid/src/lib.rs]
/*!
 * =================================================================
 * APARATO: GEODESIC GRID ENGINE HUB (V5.0 - CELL CENTERED)
 * CLASIFICACIÓN: COMPUTE CORE (ESTRATO L1)
 * RESPONSABILIDAD: EXPOSICIÓN NOMINAL DEL MOTOR DE RETÍCULAS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. PURE COMPUTE: Este estrato no conoce persistencia ni red; recibe
 *    polígonos y devuelve sitios o fallos semánticos.
 * 2. DETERMINISM: Aritmética IEEE-754 doble en todo el recorrido;
 *    bordes exclusivos para que la contención sea reproducible.
 * =================================================================
 */

pub mod boundary;
pub mod errors;
pub mod lattice;

pub use boundary::{validate_boundary, GridPolicy};
pub use errors::GridFault;
pub use lattice::{estimate_lattice, materialize_lattice, GridEstimate, LatticeSite};

/// Metros de arco por grado de latitud sobre el elipsoide WGS84.
pub const METERS_PER_DEGREE_LATITUDE: f64 = 111_320.0;

/// Créditos de procesamiento estimados por kilómetro cuadrado de AOI.
pub const CREDITS_PER_SQUARE_KILOMETER: f64 = 15.0;
