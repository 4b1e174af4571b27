// [apps/orchestrator/src/services/mission_dispatch.rs]
/*!
 * =================================================================
 * APARATO: MISSION DISPATCH SERVICE (V4.3 - ADMISSION GUARD)
 * CLASIFICACIÓN: CONTROL SERVICE (ESTRATO L4)
 * RESPONSABILIDAD: ADMISIÓN, LECTURA, REINTENTO Y CANCELACIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NO ROW BEFORE ACCEPTANCE: La fila de misión nace únicamente tras
 *    la aceptación aguas arriba; un rechazo no deja rastro.
 * 2. RETRY LINEAGE: El reintento crea una fila nueva con 'retry_of'
 *    apuntando a la misión terminal; la historia jamás se reescribe.
 * =================================================================
 */

use crate::errors::OrchestratorError;
use crate::services::pair_scout::PairScout;
use crate::state::AppState;
use chrono::Utc;
use tellus_domain_models::{DateWindow, Job, PairCandidate};
use tellus_infra_db::JobSeed;
use tellus_infra_hyp3::{Hyp3Error, InterferogramRequest};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use wkt::ToWkt;

pub struct MissionDispatch {
    application_state: AppState,
}

impl MissionDispatch {
    pub fn new(application_state: AppState) -> Self {
        Self { application_state }
    }

    /// Admite una misión: valida la retícula, descubre el mejor par,
    /// somete aguas arriba y encola el sondeo.
    ///
    /// # Errors:
    /// `InfrastructureNotFound`, `NoPointsForInfrastructure`,
    /// `CatalogUnavailable`, `NoSuitablePairs`, `UpstreamRejected`.
    #[instrument(skip(self))]
    pub async fn submit_mission(
        &self,
        infrastructure_id: Uuid,
        window: DateWindow,
    ) -> Result<Uuid, OrchestratorError> {
        let infrastructure =
            self.application_state.infrastructures()?.fetch(infrastructure_id).await?;

        let point_count = self
            .application_state
            .points()?
            .count_for_infrastructure(infrastructure_id)
            .await?;
        if point_count == 0 {
            return Err(OrchestratorError::NoPointsForInfrastructure);
        }

        let boundary = infrastructure.boundary_polygon()?;

        let scout = PairScout::new(self.application_state.clone());
        let candidates = scout.find_pairs(&boundary, window).await?;
        let best_pair = scout
            .select_best(&candidates)
            .ok_or(OrchestratorError::NoSuitablePairs)?;

        self.ignite_mission(infrastructure_id, &boundary, &best_pair, None).await
    }

    /// Instantánea de solo lectura de la misión.
    pub async fn fetch_mission(&self, job_id: Uuid) -> Result<Job, OrchestratorError> {
        Ok(self.application_state.jobs()?.fetch(job_id).await?)
    }

    /// Reintenta una misión terminal no exitosa: resomete el par
    /// original y crea una fila nueva; la fila vieja se preserva.
    #[instrument(skip(self))]
    pub async fn retry_mission(&self, job_id: Uuid) -> Result<Uuid, OrchestratorError> {
        let terminal_job = self.fetch_mission(job_id).await?;

        if !terminal_job.status.is_terminal()
            || terminal_job.status == tellus_domain_models::JobStatus::Succeeded
        {
            return Err(OrchestratorError::RetryNotPermitted(
                terminal_job.status.as_str().into(),
            ));
        }

        let infrastructure = self
            .application_state
            .infrastructures()?
            .fetch(terminal_job.infrastructure_id)
            .await?;
        let boundary = infrastructure.boundary_polygon()?;

        let original_pair = PairCandidate {
            reference_granule: terminal_job.reference_granule.clone(),
            secondary_granule: terminal_job.secondary_granule.clone(),
            temporal_baseline_days: 0.0,
            perpendicular_baseline_m: 0.0,
            orbital_path: None,
            quality_score: 1.0,
        };

        self.ignite_mission(
            terminal_job.infrastructure_id,
            &boundary,
            &original_pair,
            Some(terminal_job.id),
        )
        .await
    }

    /// Cancelación externa: transición guardada a CANCELLED y retiro
    /// de la cola; el siguiente sondeo descarta la misión.
    #[instrument(skip(self))]
    pub async fn cancel_mission(&self, job_id: Uuid) -> Result<(), OrchestratorError> {
        self.application_state.jobs()?.mark_cancelled(job_id).await?;
        self.application_state.queue()?.remove(job_id).await?;
        warn!("🛑 [MISSION_CANCELLED]: Job [{}] withdrawn by external request.", job_id);
        Ok(())
    }

    /// Génesis común de misiones (admisión y reintento).
    async fn ignite_mission(
        &self,
        infrastructure_id: Uuid,
        boundary: &geo::Polygon<f64>,
        pair: &PairCandidate,
        retry_of: Option<Uuid>,
    ) -> Result<Uuid, OrchestratorError> {
        use geo::BoundingRect;

        let job_id = Uuid::new_v4();

        let request = InterferogramRequest {
            job_name: format!("tellus_{}", &job_id.simple().to_string()[..12]),
            reference_granule: pair.reference_granule.clone(),
            secondary_granule: pair.secondary_granule.clone(),
        };

        // El rechazo aguas arriba retiene el mensaje y no crea fila.
        let upstream_id = self
            .application_state
            .processor
            .submit_pair(&request)
            .await
            .map_err(|fault| match fault {
                Hyp3Error::Rejected(message) => OrchestratorError::UpstreamRejected(message),
                other => OrchestratorError::UpstreamRejected(other.to_string()),
            })?;

        let envelope_wkt = boundary
            .bounding_rect()
            .map(|envelope| envelope.to_polygon().wkt_string())
            .unwrap_or_else(|| boundary.wkt_string());

        self.application_state
            .jobs()?
            .create(&JobSeed {
                id: job_id,
                infrastructure_id,
                upstream_id,
                bbox_wkt: envelope_wkt,
                reference_granule: pair.reference_granule.clone(),
                secondary_granule: pair.secondary_granule.clone(),
                retry_of,
            })
            .await?;

        self.application_state
            .queue()?
            .enqueue(job_id, Utc::now().timestamp_millis(), 0)
            .await?;

        info!(
            "🚀 [MISSION_ADMITTED]: Job [{}] queued for pair [{} / {}].",
            job_id, pair.reference_granule, pair.secondary_granule
        );
        Ok(job_id)
    }
}
