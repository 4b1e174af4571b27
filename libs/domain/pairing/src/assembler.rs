// [libs/domain/pairing/src/assembler.rs]
/*!
 * =================================================================
 * APARATO: PAIR ASSEMBLER (V4.1 - TRACK GROUPED)
 * CLASIFICACIÓN: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: FORMACIÓN Y RANKING DE PARES POR TRACK ORBITAL
 * =================================================================
 */

use crate::scoring::{baseline_factor, coverage_factor, temporal_factor, PairPolicy};
use geo::Polygon;
use std::collections::BTreeMap;
use tellus_domain_models::{GranuleRecord, PairCandidate};
use tracing::debug;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Forma todos los pares admisibles dentro de cada track orbital y los
/// devuelve ordenados por puntaje descendente.
///
/// Los granulos sin track declarado se agrupan entre sí: el catálogo
/// no permite afirmar que pertenezcan a tracks distintos.
pub fn assemble_candidates(
    granules: &[GranuleRecord],
    aoi: &Polygon<f64>,
    policy: &PairPolicy,
) -> Vec<PairCandidate> {
    let mut granules_by_track: BTreeMap<Option<i64>, Vec<&GranuleRecord>> = BTreeMap::new();
    for granule in granules {
        granules_by_track.entry(granule.orbital_path).or_default().push(granule);
    }

    let mut candidates = Vec::new();

    for (orbital_path, mut track_granules) in granules_by_track {
        track_granules.sort_by_key(|granule| granule.start_time);

        for reference_index in 0..track_granules.len() {
            for secondary_index in (reference_index + 1)..track_granules.len() {
                let reference = track_granules[reference_index];
                let secondary = track_granules[secondary_index];

                let temporal_baseline_days = (secondary.start_time - reference.start_time)
                    .num_seconds() as f64
                    / SECONDS_PER_DAY;

                if temporal_baseline_days < policy.min_baseline_days
                    || temporal_baseline_days > policy.max_baseline_days
                {
                    continue;
                }

                let perpendicular_baseline_m =
                    estimate_perpendicular_baseline(reference, secondary, policy);

                let quality_score = temporal_factor(temporal_baseline_days, policy)
                    * baseline_factor(perpendicular_baseline_m, policy)
                    * coverage_factor(aoi, secondary.footprint_wkt.as_deref());

                candidates.push(PairCandidate {
                    reference_granule: reference.name.clone(),
                    secondary_granule: secondary.name.clone(),
                    temporal_baseline_days,
                    perpendicular_baseline_m,
                    orbital_path,
                    quality_score,
                });
            }
        }
    }

    candidates.sort_by(|left, right| {
        right
            .quality_score
            .partial_cmp(&left.quality_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    debug!(
        "📡 [PAIR_ASSEMBLY]: {} candidates formed from {} granules.",
        candidates.len(),
        granules.len()
    );

    candidates
}

/// Baseline perpendicular relativa entre las dos adquisiciones.
///
/// Cuando el catálogo no reporta baselines por granulo se usa la
/// constante de reemplazo declarada en la política.
fn estimate_perpendicular_baseline(
    reference: &GranuleRecord,
    secondary: &GranuleRecord,
    policy: &PairPolicy,
) -> f64 {
    match (reference.perpendicular_baseline_m, secondary.perpendicular_baseline_m) {
        (Some(reference_baseline), Some(secondary_baseline)) => {
            (secondary_baseline - reference_baseline).abs()
        }
        _ => policy.fallback_perp_baseline_m,
    }
}
