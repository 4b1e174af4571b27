// [libs/core/raster/src/lib.rs]
/*!
 * =================================================================
 * APARATO: RASTER ENGINE HUB (V6.0 - GEOTIFF NATIVE)
 * CLASIFICACIÓN: COMPUTE CORE (ESTRATO L1)
 * RESPONSABILIDAD: EXPOSICIÓN NOMINAL DEL MOTOR RÁSTER
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. TAGGED VARIANTS: El CRS y el resultado de muestreo son enums
 *    cerrados (Geographic | Projected, valor | sin-muestra); nada de
 *    acceso dinámico a metadatos.
 * 2. MEMORY DISCIPLINE: Lectura monobanda contigua mientras quepa en
 *    el techo configurado; ventana de strips anclada a las filas de
 *    consulta cuando no.
 * =================================================================
 */

pub mod decoder;
pub mod errors;
pub mod georef;
pub mod products;
pub mod projection;
pub mod sampler;

pub use decoder::RasterSheet;
pub use errors::RasterFault;
pub use georef::{CrsTag, Georeference};
pub use products::{acquisition_dates_from_filename, AcquisitionDates, ProductKind};
pub use projection::utm_forward;
