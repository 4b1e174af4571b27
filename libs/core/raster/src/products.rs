// [libs/core/raster/src/products.rs]
/*!
 * =================================================================
 * APARATO: PRODUCT NAME DECODER (V6.1)
 * CLASIFICACIÓN: COMPUTE CORE (ESTRATO L1)
 * RESPONSABILIDAD: CLASIFICACIÓN DE PRODUCTOS Y FECHAS DE ADQUISICIÓN
 * =================================================================
 */

use chrono::NaiveDate;

/// Categoría de un producto geocodificado, inferida por sufijo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductKind {
    /// Desplazamiento vertical (obligatorio para la ingesta).
    VerticalDisplacement,
    /// Desplazamiento en línea de vista (opcional).
    LineOfSightDisplacement,
    /// Coherencia interferométrica (opcional, recomendado).
    Coherence,
}

impl ProductKind {
    /// Clasifica un nombre de archivo; None para productos ajenos.
    pub fn from_filename(filename: &str) -> Option<Self> {
        if filename.ends_with("_vert_disp.tif") {
            Some(ProductKind::VerticalDisplacement)
        } else if filename.ends_with("_los_disp.tif") {
            Some(ProductKind::LineOfSightDisplacement)
        } else if filename.ends_with("_corr.tif") {
            Some(ProductKind::Coherence)
        } else {
            None
        }
    }
}

/// Par de fechas de adquisición codificadas en el nombre del producto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquisitionDates {
    pub reference: NaiveDate,
    /// Fecha secundaria (la más tardía); fecha nominal de la medición.
    pub secondary: NaiveDate,
}

/// Extrae las dos fechas `YYYYMMDD` del patrón de nombre
/// `..._YYYYMMDD[Thhmmss]_YYYYMMDD[Thhmmss]_...`.
pub fn acquisition_dates_from_filename(filename: &str) -> Option<AcquisitionDates> {
    let mut decoded_dates = Vec::with_capacity(2);

    for token in filename.split('_') {
        if token.len() < 8 {
            continue;
        }
        let date_prefix = &token[..8];
        if !date_prefix.bytes().all(|byte| byte.is_ascii_digit()) {
            continue;
        }
        if let Ok(date) = NaiveDate::parse_from_str(date_prefix, "%Y%m%d") {
            decoded_dates.push(date);
            if decoded_dates.len() == 2 {
                break;
            }
        }
    }

    if decoded_dates.len() < 2 {
        return None;
    }

    let (first, second) = (decoded_dates[0], decoded_dates[1]);
    Some(AcquisitionDates {
        reference: first.min(second),
        secondary: first.max(second),
    })
}
