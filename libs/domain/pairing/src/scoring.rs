// [libs/domain/pairing/src/scoring.rs]
/*!
 * =================================================================
 * APARATO: PAIR QUALITY SCORING ENGINE (V4.1)
 * CLASIFICACIÓN: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: PUNTAJE COMPUESTO DE PARES INTERFEROMÉTRICOS
 *
 * # Mathematical Proof (Bounded Composite):
 * Los tres factores viven en [0, 1]; su producto también. El factor
 * temporal es una carpa lineal con vértice en la baseline óptima y
 * ceros exactos en los bordes de la ventana admitida, de modo que un
 * par en el borde queda formado pero jamás supera el umbral mínimo.
 * =================================================================
 */

use geo::{BooleanOps, GeodesicArea, Polygon};
use tracing::warn;
use wkt::TryFromWkt;

/// Política de apareamiento del plano de control.
#[derive(Debug, Clone, Copy)]
pub struct PairPolicy {
    pub min_baseline_days: f64,
    pub max_baseline_days: f64,
    pub optimal_baseline_days: f64,
    /// Baseline perpendicular a la cual el factor cae a cero.
    pub max_perp_baseline_m: f64,
    /// Constante de reemplazo cuando el catálogo no reporta baseline.
    pub fallback_perp_baseline_m: f64,
    /// Umbral de selección aplicado por los llamadores.
    pub min_quality_score: f64,
}

impl Default for PairPolicy {
    fn default() -> Self {
        Self {
            min_baseline_days: 6.0,
            max_baseline_days: 48.0,
            optimal_baseline_days: 12.0,
            max_perp_baseline_m: 300.0,
            fallback_perp_baseline_m: 100.0,
            min_quality_score: 0.3,
        }
    }
}

/// Carpa lineal: 1.0 en la baseline óptima, 0.0 en ambos bordes.
pub fn temporal_factor(baseline_days: f64, policy: &PairPolicy) -> f64 {
    if baseline_days < policy.min_baseline_days || baseline_days > policy.max_baseline_days {
        return 0.0;
    }

    let factor = if baseline_days <= policy.optimal_baseline_days {
        (baseline_days - policy.min_baseline_days)
            / (policy.optimal_baseline_days - policy.min_baseline_days)
    } else {
        (policy.max_baseline_days - baseline_days)
            / (policy.max_baseline_days - policy.optimal_baseline_days)
    };

    factor.clamp(0.0, 1.0)
}

/// Decaimiento lineal: 1.0 a 0 m, 0.0 desde el techo perpendicular.
pub fn baseline_factor(perpendicular_baseline_m: f64, policy: &PairPolicy) -> f64 {
    (1.0 - perpendicular_baseline_m.abs() / policy.max_perp_baseline_m).clamp(0.0, 1.0)
}

/// Fracción del área del AOI intersectada por la huella del granulo.
///
/// Una huella ausente o malformada degrada a cobertura total con
/// rastro de advertencia; el par no se descarta en silencio.
pub fn coverage_factor(aoi: &Polygon<f64>, footprint_wkt: Option<&str>) -> f64 {
    let Some(raw_footprint) = footprint_wkt else {
        return 1.0;
    };

    let footprint = match Polygon::try_from_wkt_str(raw_footprint) {
        Ok(polygon) => polygon,
        Err(parse_fault) => {
            warn!("🛰️  [COVERAGE_DEGRADED]: Footprint WKT rejected: {}", parse_fault);
            return 1.0;
        }
    };

    let aoi_area = aoi.geodesic_area_unsigned();
    if aoi_area <= 0.0 || !aoi_area.is_finite() {
        return 0.0;
    }

    let intersection_area = aoi.intersection(&footprint).geodesic_area_unsigned();
    (intersection_area / aoi_area).clamp(0.0, 1.0)
}
