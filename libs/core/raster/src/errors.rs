// [libs/core/raster/src/errors.rs]
/*!
 * =================================================================
 * APARATO: RASTER FAULT CATALOG (V6.0)
 * CLASIFICACIÓN: COMPUTE CORE (ESTRATO L1)
 * RESPONSABILIDAD: CATALOGACIÓN SEMÁNTICA DE FALLOS RÁSTER
 * =================================================================
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterFault {
    /// Fallo físico de lectura del archivo local.
    #[error("[L1_RASTER_IO_FAULT]: {0}")]
    Io(#[from] std::io::Error),

    /// El contenedor TIFF no pudo decodificarse.
    #[error("[L1_RASTER_FAULT]: CORRUPTED_CONTAINER -> {0}")]
    Corrupted(String),

    /// Georreferenciación ausente o inconsistente en las etiquetas.
    #[error("[L1_RASTER_FAULT]: GEOREFERENCE_VOID -> {0}")]
    MissingGeoreference(String),

    /// CRS proyectado fuera de las familias UTM admitidas.
    #[error("[L1_RASTER_FAULT]: UNSUPPORTED_CRS -> EPSG:{0}")]
    UnsupportedCrs(u32),
}

impl From<tiff::TiffError> for RasterFault {
    fn from(fault: tiff::TiffError) -> Self {
        RasterFault::Corrupted(fault.to_string())
    }
}
