// [libs/core/geogrid/src/lattice.rs]
/*!
 * =================================================================
 * APARATO: CELL-CENTERED LATTICE ENGINE (V5.2)
 * CLASIFICACIÓN: COMPUTE CORE (ESTRATO L1)
 * RESPONSABILIDAD: MATERIALIZACIÓN DE LA RETÍCULA DE MONITOREO
 *
 * # Mathematical Proof (Cell Centering):
 * Las filas viven en min + (i + ½)·Δφ y las columnas en
 * min + (j + ½)·Δλ. Centrar la retícula en la celda garantiza que un
 * cuadrado de 100 m con espaciado de 5 m produzca exactamente 20×20
 * sitios interiores y que count·spacing² aproxime el área del AOI.
 * El paso longitudinal usa la latitud media de la caja envolvente:
 * Δλ(φ̄) = spacing / (cos(φ̄)·111 320).
 * =================================================================
 */

use crate::boundary::{validate_boundary, GridPolicy};
use crate::errors::GridFault;
use crate::{CREDITS_PER_SQUARE_KILOMETER, METERS_PER_DEGREE_LATITUDE};
use geo::{BoundingRect, Contains, Point, Polygon};
use tracing::debug;

/// Sitio de la retícula en coordenadas WGS84.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeSite {
    pub longitude: f64,
    pub latitude: f64,
}

/// Resultado del levantamiento puro de una retícula (sin persistencia).
#[derive(Debug, Clone, Copy)]
pub struct GridEstimate {
    pub point_count: usize,
    pub area_km2: f64,
    /// Créditos de procesamiento proyectados para el AOI.
    pub estimated_cost_credits: f64,
}

/// Levanta la retícula sin materializar los sitios.
///
/// Cómputo puro: mismo conteo que `materialize_lattice`, cero efectos.
pub fn estimate_lattice(
    boundary: &Polygon<f64>,
    spacing_m: f64,
    policy: &GridPolicy,
) -> Result<GridEstimate, GridFault> {
    let (sites, area_km2) = survey(boundary, spacing_m, policy)?;

    Ok(GridEstimate {
        point_count: sites.len(),
        area_km2,
        estimated_cost_credits: area_km2 * CREDITS_PER_SQUARE_KILOMETER,
    })
}

/// Materializa todos los sitios interiores de la retícula.
pub fn materialize_lattice(
    boundary: &Polygon<f64>,
    spacing_m: f64,
    policy: &GridPolicy,
) -> Result<Vec<LatticeSite>, GridFault> {
    let (sites, _) = survey(boundary, spacing_m, policy)?;
    Ok(sites)
}

/// Barrido compartido: valida, convierte el espaciado y filtra por
/// contención estricta (bordes exclusivos, huecos excluidos).
fn survey(
    boundary: &Polygon<f64>,
    spacing_m: f64,
    policy: &GridPolicy,
) -> Result<(Vec<LatticeSite>, f64), GridFault> {
    if !spacing_m.is_finite() || spacing_m < policy.min_spacing_m {
        return Err(GridFault::InvalidSpacing(spacing_m));
    }

    let area_km2 = validate_boundary(boundary, policy)?;

    let envelope = boundary
        .bounding_rect()
        .ok_or_else(|| GridFault::InvalidGeometry("EMPTY_ENVELOPE".into()))?;

    let mean_latitude_deg = (envelope.min().y + envelope.max().y) / 2.0;
    let latitude_step_deg = spacing_m / METERS_PER_DEGREE_LATITUDE;
    let longitude_step_deg =
        spacing_m / (mean_latitude_deg.to_radians().cos() * METERS_PER_DEGREE_LATITUDE);

    let mut interior_sites = Vec::new();
    let mut row_index: u64 = 0;

    loop {
        let latitude = envelope.min().y + (row_index as f64 + 0.5) * latitude_step_deg;
        if latitude >= envelope.max().y {
            break;
        }

        let mut column_index: u64 = 0;
        loop {
            let longitude = envelope.min().x + (column_index as f64 + 0.5) * longitude_step_deg;
            if longitude >= envelope.max().x {
                break;
            }

            // Contención estricta: un sitio exactamente sobre una arista
            // se considera exterior para mantener el determinismo.
            if boundary.contains(&Point::new(longitude, latitude)) {
                interior_sites.push(LatticeSite { longitude, latitude });
            }

            column_index += 1;
        }

        row_index += 1;
    }

    debug!(
        "📍 [LATTICE]: Survey complete. {} interior sites over {:.6} km2 at {} m spacing.",
        interior_sites.len(),
        area_km2,
        spacing_m
    );

    Ok((interior_sites, area_km2))
}
