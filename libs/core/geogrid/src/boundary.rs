// [libs/core/geogrid/src/boundary.rs]
/*!
 * =================================================================
 * APARATO: BOUNDARY VALIDATION ENGINE (V5.1)
 * CLASIFICACIÓN: COMPUTE CORE (ESTRATO L1)
 * RESPONSABILIDAD: CERTIFICACIÓN GEOMÉTRICA DEL CONTORNO AOI
 *
 * # Mathematical Proof (Simple Polygon Guard):
 * Un polígono es simple si ningún par de aristas no adyacentes se
 * toca y ningún par de aristas es colineal-solapado. El barrido
 * O(n²) sobre las aristas del anillo exterior es suficiente para los
 * contornos de infraestructura civil (decenas de vértices).
 * =================================================================
 */

use crate::errors::GridFault;
use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{GeodesicArea, Line, Polygon};
use tracing::debug;

/// Política de admisión de contornos del plano de control.
#[derive(Debug, Clone, Copy)]
pub struct GridPolicy {
    /// Techo de área del AOI en km².
    pub max_area_km2: f64,
    /// Latitud absoluta máxima admitida; más allá el denominador
    /// cos(φ) degrada la conversión metro→grado.
    pub max_abs_latitude_deg: f64,
    /// Piso físico del espaciado de retícula en metros.
    pub min_spacing_m: f64,
}

impl Default for GridPolicy {
    fn default() -> Self {
        Self {
            max_area_km2: 5.0,
            max_abs_latitude_deg: 85.0,
            min_spacing_m: 1.0,
        }
    }
}

/// Valida el contorno y devuelve su área geodésica en km².
///
/// # Errors:
/// - `GridFault::InvalidGeometry`: anillo degenerado, vértices fuera de
///   rango WGS84, latitud sobre el techo, o auto-intersección.
/// - `GridFault::AreaTooLarge`: área geodésica sobre el techo.
pub fn validate_boundary(boundary: &Polygon<f64>, policy: &GridPolicy) -> Result<f64, GridFault> {
    let exterior_ring = boundary.exterior();

    // Un anillo cerrado necesita al menos 3 vértices distintos más el
    // vértice de cierre.
    if exterior_ring.0.len() < 4 {
        return Err(GridFault::InvalidGeometry(
            "DEGENERATE_RING: fewer than three distinct vertices".into(),
        ));
    }

    if !exterior_ring.is_closed() {
        return Err(GridFault::InvalidGeometry("OPEN_RING: boundary is not closed".into()));
    }

    certify_vertex_ranges(boundary, policy)?;
    certify_ring_simplicity(exterior_ring.lines().collect::<Vec<_>>().as_slice())?;

    let area_km2 = boundary.geodesic_area_unsigned() / 1_000_000.0;

    if !area_km2.is_finite() || area_km2 <= 0.0 {
        return Err(GridFault::InvalidGeometry("NULL_AREA: boundary encloses no surface".into()));
    }

    if area_km2 > policy.max_area_km2 {
        return Err(GridFault::AreaTooLarge {
            area_km2,
            limit_km2: policy.max_area_km2,
        });
    }

    debug!("🗺️  [BOUNDARY]: Contour certified. Geodesic area {:.6} km2.", area_km2);
    Ok(area_km2)
}

/// Verifica rangos WGS84 y el techo de latitud sobre todos los anillos.
fn certify_vertex_ranges(boundary: &Polygon<f64>, policy: &GridPolicy) -> Result<(), GridFault> {
    let all_rings = std::iter::once(boundary.exterior()).chain(boundary.interiors().iter());

    for ring in all_rings {
        for vertex in &ring.0 {
            if !vertex.x.is_finite() || !vertex.y.is_finite() {
                return Err(GridFault::InvalidGeometry("NON_FINITE_VERTEX".into()));
            }
            if vertex.x < -180.0 || vertex.x > 180.0 || vertex.y < -90.0 || vertex.y > 90.0 {
                return Err(GridFault::InvalidGeometry(format!(
                    "VERTEX_OUT_OF_WGS84_RANGE: ({}, {})",
                    vertex.x, vertex.y
                )));
            }
            if vertex.y.abs() > policy.max_abs_latitude_deg {
                return Err(GridFault::InvalidGeometry(format!(
                    "LATITUDE_CEILING_EXCEEDED: |{}| > {}",
                    vertex.y, policy.max_abs_latitude_deg
                )));
            }
        }
    }

    Ok(())
}

/// Barrido de simplicidad: ningún cruce entre aristas no adyacentes.
fn certify_ring_simplicity(edges: &[Line<f64>]) -> Result<(), GridFault> {
    let edge_count = edges.len();

    for i in 0..edge_count {
        for j in (i + 1)..edge_count {
            let are_adjacent = j == i + 1 || (i == 0 && j == edge_count - 1);

            match line_intersection(edges[i], edges[j]) {
                None => {}
                Some(LineIntersection::SinglePoint { is_proper, .. }) => {
                    // Las aristas adyacentes comparten exactamente su
                    // vértice común; cualquier otro contacto es un pellizco.
                    if !(are_adjacent && !is_proper) {
                        return Err(GridFault::InvalidGeometry(format!(
                            "SELF_INTERSECTION: edges {} and {}",
                            i, j
                        )));
                    }
                }
                Some(LineIntersection::Collinear { .. }) => {
                    return Err(GridFault::InvalidGeometry(format!(
                        "COLLINEAR_OVERLAP: edges {} and {}",
                        i, j
                    )));
                }
            }
        }
    }

    Ok(())
}
