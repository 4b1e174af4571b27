// [libs/core/raster/src/georef.rs]
/*!
 * =================================================================
 * APARATO: GEOREFERENCE DECODER (V6.2 - TAGGED VARIANTS)
 * CLASIFICACIÓN: COMPUTE CORE (ESTRATO L1)
 * RESPONSABILIDAD: INTERPRETACIÓN DE ETIQUETAS DE GEORREFERENCIACIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. TIEPOINT + PIXELSCALE como vía nominal; ModelTransformation se
 *    admite solo en su forma norte-arriba alineada a ejes.
 * 2. GEOKEYS: Se interpretan GTModelType (1024), GeographicType (2048)
 *    y ProjectedCSType (3072); todo lo demás se ignora.
 * =================================================================
 */

use crate::errors::RasterFault;
use crate::projection::{utm_forward, UtmZone};

// Identificadores de GeoKey del directorio 34735.
const KEY_MODEL_TYPE: u64 = 1024;
const KEY_GEOGRAPHIC_TYPE: u64 = 2048;
const KEY_PROJECTED_CS_TYPE: u64 = 3072;

const MODEL_TYPE_PROJECTED: u64 = 1;
const MODEL_TYPE_GEOGRAPHIC: u64 = 2;

const EPSG_WGS84: u64 = 4326;

/// Sistema de referencia declarado por el ráster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrsTag {
    /// Coordenadas geográficas WGS84 (EPSG:4326).
    Geographic,
    /// CRS proyectado de las familias UTM (EPSG 326xx / 327xx).
    Projected { zone: UtmZone },
}

/// Georreferenciación resuelta: origen superior-izquierdo y tamaño de
/// píxel en las unidades del CRS.
#[derive(Debug, Clone, Copy)]
pub struct Georeference {
    pub crs: CrsTag,
    pub origin_x: f64,
    pub origin_y: f64,
    pub pixel_width: f64,
    pub pixel_height: f64,
}

impl Georeference {
    /// Resuelve la georreferenciación desde los vectores de etiquetas.
    ///
    /// # Errors:
    /// - `MissingGeoreference`: sin tiepoint+scale ni transformación.
    /// - `Corrupted`: transformación con rotación (no norte-arriba).
    /// - `UnsupportedCrs`: CRS proyectado fuera de las familias UTM.
    pub fn resolve(
        tiepoint: Option<Vec<f64>>,
        pixel_scale: Option<Vec<f64>>,
        transformation: Option<Vec<f64>>,
        geokey_directory: Option<Vec<u64>>,
    ) -> Result<Self, RasterFault> {
        let crs = decode_crs(geokey_directory)?;

        if let (Some(tie), Some(scale)) = (tiepoint.as_ref(), pixel_scale.as_ref()) {
            if tie.len() < 6 || scale.len() < 2 {
                return Err(RasterFault::MissingGeoreference(
                    "TRUNCATED_TIEPOINT_OR_SCALE".into(),
                ));
            }

            // Tiepoint: (i, j, k) -> (x, y, z); origen desplazado al
            // píxel (0, 0).
            let origin_x = tie[3] - tie[0] * scale[0];
            let origin_y = tie[4] + tie[1] * scale[1];

            return Self::certified(crs, origin_x, origin_y, scale[0], scale[1]);
        }

        if let Some(matrix) = transformation {
            if matrix.len() < 16 {
                return Err(RasterFault::MissingGeoreference("TRUNCATED_TRANSFORMATION".into()));
            }
            // Solo se admite la forma afín alineada a ejes: sin
            // términos de rotación cruzados.
            if matrix[1] != 0.0 || matrix[4] != 0.0 {
                return Err(RasterFault::Corrupted(
                    "ROTATED_TRANSFORMATION_UNSUPPORTED".into(),
                ));
            }

            return Self::certified(crs, matrix[3], matrix[7], matrix[0], -matrix[5]);
        }

        Err(RasterFault::MissingGeoreference(
            "NO_TIEPOINT_SCALE_NOR_TRANSFORMATION".into(),
        ))
    }

    fn certified(
        crs: CrsTag,
        origin_x: f64,
        origin_y: f64,
        pixel_width: f64,
        pixel_height: f64,
    ) -> Result<Self, RasterFault> {
        if pixel_width <= 0.0 || pixel_height <= 0.0 {
            return Err(RasterFault::Corrupted("NON_POSITIVE_PIXEL_SIZE".into()));
        }

        Ok(Self {
            crs,
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
        })
    }

    /// Índice de píxel (columna, fila) para una consulta WGS84.
    ///
    /// El origen vive en la esquina superior-izquierda y las filas
    /// crecen hacia abajo, de ahí la inversión del eje y.
    pub fn pixel_of(&self, longitude_deg: f64, latitude_deg: f64) -> (i64, i64) {
        let (query_x, query_y) = match self.crs {
            CrsTag::Geographic => (longitude_deg, latitude_deg),
            CrsTag::Projected { zone } => utm_forward(longitude_deg, latitude_deg, zone),
        };

        let pixel_x = ((query_x - self.origin_x) / self.pixel_width).round() as i64;
        let pixel_y = ((self.origin_y - query_y) / self.pixel_height).round() as i64;

        (pixel_x, pixel_y)
    }
}

/// Decodifica el directorio de GeoKeys en un CRS etiquetado.
fn decode_crs(geokey_directory: Option<Vec<u64>>) -> Result<CrsTag, RasterFault> {
    let Some(directory) = geokey_directory else {
        return Err(RasterFault::MissingGeoreference("GEOKEY_DIRECTORY_ABSENT".into()));
    };

    if directory.len() < 4 {
        return Err(RasterFault::MissingGeoreference("GEOKEY_HEADER_TRUNCATED".into()));
    }

    let mut model_type: Option<u64> = None;
    let mut geographic_type: Option<u64> = None;
    let mut projected_type: Option<u64> = None;

    // Entradas de 4 shorts tras la cabecera: (key, location, count, value).
    for entry in directory[4..].chunks_exact(4) {
        let (key_id, tag_location, value) = (entry[0], entry[1], entry[3]);
        if tag_location != 0 {
            continue; // El valor vive en otra etiqueta; irrelevante aquí.
        }
        match key_id {
            KEY_MODEL_TYPE => model_type = Some(value),
            KEY_GEOGRAPHIC_TYPE => geographic_type = Some(value),
            KEY_PROJECTED_CS_TYPE => projected_type = Some(value),
            _ => {}
        }
    }

    match model_type {
        Some(MODEL_TYPE_GEOGRAPHIC) => match geographic_type {
            Some(EPSG_WGS84) | None => Ok(CrsTag::Geographic),
            Some(other) => Err(RasterFault::UnsupportedCrs(other as u32)),
        },
        Some(MODEL_TYPE_PROJECTED) => {
            let epsg = projected_type.ok_or_else(|| {
                RasterFault::MissingGeoreference("PROJECTED_CS_KEY_ABSENT".into())
            })?;
            Ok(CrsTag::Projected {
                zone: UtmZone::from_epsg(epsg as u32)?,
            })
        }
        _ => Err(RasterFault::MissingGeoreference("MODEL_TYPE_KEY_ABSENT".into())),
    }
}
