// [apps/orchestrator/src/services/pair_scout.rs]
/*!
 * =================================================================
 * APARATO: PAIR SCOUT SERVICE (V4.1)
 * CLASIFICACIÓN: CONTROL SERVICE (ESTRATO L4)
 * RESPONSABILIDAD: DESCUBRIMIENTO Y RANKING DE PARES SOBRE EL AOI
 * =================================================================
 */

use crate::errors::OrchestratorError;
use crate::state::AppState;
use geo::{BoundingRect, Polygon};
use tellus_domain_models::{DateWindow, PairCandidate};
use tellus_domain_pairing::assemble_candidates;
use tellus_infra_catalog::GranuleQuery;
use tracing::{info, instrument};

pub struct PairScout {
    application_state: AppState,
}

impl PairScout {
    pub fn new(application_state: AppState) -> Self {
        Self { application_state }
    }

    /// Consulta el catálogo y devuelve los pares ordenados por puntaje
    /// descendente. Lista vacía cuando no se formó ningún par.
    #[instrument(skip(self, aoi))]
    pub async fn find_pairs(
        &self,
        aoi: &Polygon<f64>,
        window: DateWindow,
    ) -> Result<Vec<PairCandidate>, OrchestratorError> {
        let envelope = aoi.bounding_rect().ok_or_else(|| {
            OrchestratorError::Grid(tellus_core_geogrid::GridFault::InvalidGeometry(
                "EMPTY_ENVELOPE".into(),
            ))
        })?;

        let query = GranuleQuery {
            bbox: (
                envelope.min().x,
                envelope.min().y,
                envelope.max().x,
                envelope.max().y,
            ),
            window,
        };

        let granules = self
            .application_state
            .catalog
            .search_slc_granules(&query)
            .await
            .map_err(|fault| OrchestratorError::CatalogUnavailable(fault.to_string()))?;

        let candidates = assemble_candidates(&granules, aoi, &self.application_state.config.pairs);

        info!(
            "📡 [PAIR_SCOUT]: {} candidates ranked over the AOI window.",
            candidates.len()
        );
        Ok(candidates)
    }

    /// Mejor candidato sobre el umbral de calidad, si existe.
    pub fn select_best(&self, candidates: &[PairCandidate]) -> Option<PairCandidate> {
        let quality_floor = self.application_state.config.pairs.min_quality_score;
        candidates
            .iter()
            .find(|candidate| candidate.quality_score >= quality_floor)
            .cloned()
    }
}
