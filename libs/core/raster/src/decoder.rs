// [libs/core/raster/src/decoder.rs]
/*!
 * =================================================================
 * APARATO: GEOTIFF SHEET DECODER (V6.3 - WINDOWED FALLBACK)
 * CLASIFICACIÓN: COMPUTE CORE (ESTRATO L1)
 * RESPONSABILIDAD: CARGA MONOBANDA F32 CON DISCIPLINA DE MEMORIA
 *
 * # Mathematical Proof (Memory Ceiling):
 * Una hoja completa ocupa w·h·4 bytes. Si excede el techo, solo se
 * decodifican los strips que intersectan la banda de filas de las
 * consultas; el consumo queda acotado por strips·w·rows_per_strip·4.
 * =================================================================
 */

use crate::errors::RasterFault;
use crate::georef::Georeference;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;
use tracing::debug;

/// Hoja ráster monobanda decodificada y georreferenciada.
pub struct RasterSheet {
    pub width: u32,
    pub height: u32,
    pub georeference: Georeference,
    /// NoData declarado por la etiqueta GDAL, si existe.
    pub declared_nodata: Option<f64>,
    payload: SheetPayload,
}

enum SheetPayload {
    /// Banda completa contigua.
    Full(Vec<f32>),
    /// Banda parcial: strips que cubren la ventana de consulta.
    Window { first_row: u32, data: Vec<f32> },
}

impl RasterSheet {
    /// Carga la hoja completa en memoria.
    pub fn open(path: &Path) -> Result<Self, RasterFault> {
        Self::open_bounded(path, usize::MAX, &[])
    }

    /// Carga la hoja respetando un techo de memoria en bytes.
    ///
    /// Si la banda completa no cabe, se decodifica la ventana de
    /// strips que cubre las filas de los puntos de consulta.
    pub fn open_bounded(
        path: &Path,
        max_raster_bytes: usize,
        query_points_wgs84: &[(f64, f64)],
    ) -> Result<Self, RasterFault> {
        let file_handle = File::open(path)?;
        let mut decoder = Decoder::new(BufReader::new(file_handle))?;

        let (width, height) = decoder.dimensions()?;
        let georeference = Georeference::resolve(
            read_f64_tag(&mut decoder, Tag::ModelTiepointTag)?,
            read_f64_tag(&mut decoder, Tag::ModelPixelScaleTag)?,
            read_f64_tag(&mut decoder, Tag::ModelTransformationTag)?,
            read_u64_tag(&mut decoder, Tag::GeoKeyDirectoryTag)?,
        )?;
        let declared_nodata = read_nodata_tag(&mut decoder)?;

        let full_band_bytes = width as usize * height as usize * 4;

        let payload = if full_band_bytes <= max_raster_bytes {
            match decoder.read_image()? {
                DecodingResult::F32(band) => SheetPayload::Full(band),
                _ => {
                    return Err(RasterFault::Corrupted(
                        "UNEXPECTED_SAMPLE_FORMAT: expected single-band f32".into(),
                    ))
                }
            }
        } else {
            decode_row_window(&mut decoder, &georeference, width, height, query_points_wgs84)?
        };

        debug!(
            "🧮 [SHEET_DECODED]: {}x{} px, nodata={:?}, windowed={}",
            width,
            height,
            declared_nodata,
            matches!(payload, SheetPayload::Window { .. })
        );

        Ok(Self {
            width,
            height,
            georeference,
            declared_nodata,
            payload,
        })
    }

    /// Valor crudo del píxel, o None fuera de la banda cargada.
    pub(crate) fn value_at(&self, pixel_x: i64, pixel_y: i64) -> Option<f32> {
        if pixel_x < 0 || pixel_y < 0 || pixel_x >= i64::from(self.width) || pixel_y >= i64::from(self.height)
        {
            return None;
        }

        let (row_offset, band): (i64, &[f32]) = match &self.payload {
            SheetPayload::Full(band) => (0, band),
            SheetPayload::Window { first_row, data } => (i64::from(*first_row), data),
        };

        let local_row = pixel_y - row_offset;
        if local_row < 0 {
            return None;
        }

        let flat_index = local_row as usize * self.width as usize + pixel_x as usize;
        band.get(flat_index).copied()
    }
}

/// Decodifica los strips que cubren la banda de filas de las consultas.
fn decode_row_window(
    decoder: &mut Decoder<BufReader<File>>,
    georeference: &Georeference,
    width: u32,
    height: u32,
    query_points_wgs84: &[(f64, f64)],
) -> Result<SheetPayload, RasterFault> {
    let rows_per_strip = decoder.get_tag_u32(Tag::RowsPerStrip).unwrap_or(height).max(1);

    // Banda de filas tocada por las consultas, recortada a la hoja.
    let mut min_row: i64 = i64::from(height);
    let mut max_row: i64 = -1;
    for (longitude, latitude) in query_points_wgs84 {
        let (_, pixel_y) = georeference.pixel_of(*longitude, *latitude);
        min_row = min_row.min(pixel_y);
        max_row = max_row.max(pixel_y);
    }

    let clamped_min = min_row.clamp(0, i64::from(height) - 1) as u32;
    let clamped_max = max_row.clamp(0, i64::from(height) - 1) as u32;

    if max_row < 0 || min_row >= i64::from(height) || query_points_wgs84.is_empty() {
        // Ninguna consulta toca la hoja: ventana vacía.
        return Ok(SheetPayload::Window {
            first_row: 0,
            data: Vec::new(),
        });
    }

    let first_chunk = clamped_min / rows_per_strip;
    let last_chunk = clamped_max / rows_per_strip;

    let mut window_data = Vec::new();
    for chunk_index in first_chunk..=last_chunk {
        match decoder.read_chunk(chunk_index)? {
            DecodingResult::F32(strip) => window_data.extend_from_slice(&strip),
            _ => {
                return Err(RasterFault::Corrupted(
                    "UNEXPECTED_SAMPLE_FORMAT: expected single-band f32".into(),
                ))
            }
        }
    }

    Ok(SheetPayload::Window {
        first_row: first_chunk * rows_per_strip,
        data: window_data,
    })
}

fn read_f64_tag(
    decoder: &mut Decoder<BufReader<File>>,
    tag: Tag,
) -> Result<Option<Vec<f64>>, RasterFault> {
    match decoder.find_tag(tag)? {
        Some(value) => Ok(Some(value.into_f64_vec()?)),
        None => Ok(None),
    }
}

fn read_u64_tag(
    decoder: &mut Decoder<BufReader<File>>,
    tag: Tag,
) -> Result<Option<Vec<u64>>, RasterFault> {
    match decoder.find_tag(tag)? {
        Some(value) => Ok(Some(value.into_u64_vec()?)),
        None => Ok(None),
    }
}

/// Etiqueta GDAL NoData: ASCII con un numeral o "nan".
fn read_nodata_tag(decoder: &mut Decoder<BufReader<File>>) -> Result<Option<f64>, RasterFault> {
    let Some(value) = decoder.find_tag(Tag::GdalNodata)? else {
        return Ok(None);
    };

    let label = value.into_string()?;
    let trimmed = label.trim().trim_end_matches('\0');

    if trimmed.eq_ignore_ascii_case("nan") {
        return Ok(Some(f64::NAN));
    }

    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| RasterFault::Corrupted(format!("UNPARSEABLE_NODATA_LABEL: {trimmed}")))
}
