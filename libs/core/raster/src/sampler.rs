// [libs/core/raster/src/sampler.rs]
/*!
 * =================================================================
 * APARATO: POINT SAMPLER (V6.2 - SENTINEL AWARE)
 * CLASIFICACIÓN: COMPUTE CORE (ESTRATO L1)
 * RESPONSABILIDAD: MUESTREO PUNTUAL CON PRECEDENCIA DE CENTINELAS
 *
 * Precedencia NoData: etiqueta declarada, luego NaN, luego el
 * centinela -9999. Un píxel fuera de la banda cargada equivale a
 * "sin muestra"; jamás a cero.
 * =================================================================
 */

use crate::decoder::RasterSheet;

/// Centinela NoData convencional de los productos geocodificados.
const NODATA_SENTINEL: f64 = -9999.0;

impl RasterSheet {
    /// Muestrea la hoja en una coordenada WGS84.
    ///
    /// Devuelve `None` para píxeles fuera de la huella, fuera de la
    /// ventana cargada o marcados como NoData por cualquier centinela.
    pub fn sample_wgs84(&self, longitude_deg: f64, latitude_deg: f64) -> Option<f64> {
        let (pixel_x, pixel_y) = self.georeference.pixel_of(longitude_deg, latitude_deg);

        let raw_value = self.value_at(pixel_x, pixel_y)?;
        let value = f64::from(raw_value);

        if let Some(declared) = self.declared_nodata {
            let matches_declared =
                (declared.is_nan() && value.is_nan()) || raw_value == declared as f32;
            if matches_declared {
                return None;
            }
        }

        if value.is_nan() || value == NODATA_SENTINEL {
            return None;
        }

        Some(value)
    }
}
