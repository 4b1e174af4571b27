// [apps/orchestrator/src/services/grid_architect.rs]
/*!
 * =================================================================
 * APARATO: GRID ARCHITECT SERVICE (V4.2 - ATOMIC PROVISION)
 * CLASIFICACIÓN: CONTROL SERVICE (ESTRATO L4)
 * RESPONSABILIDAD: ESTIMACIÓN Y MATERIALIZACIÓN DE RETÍCULAS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. PURE ESTIMATE: La estimación es cómputo puro; cero persistencia.
 * 2. ALL OR NOTHING: La materialización delega en la vía masiva
 *    atómica del repositorio; una retícula parcial jamás sobrevive.
 * =================================================================
 */

use crate::errors::OrchestratorError;
use crate::state::AppState;
use geo::Polygon;
use std::time::Instant;
use tellus_core_geogrid::{estimate_lattice, materialize_lattice, GridEstimate};
use tellus_domain_models::{GridProvisionReceipt, MonitoringPoint};
use tracing::{info, instrument};
use uuid::Uuid;

pub struct GridArchitect {
    application_state: AppState,
}

impl GridArchitect {
    pub fn new(application_state: AppState) -> Self {
        Self { application_state }
    }

    /// Estima la retícula sin tocar el sustrato de persistencia.
    ///
    /// # Errors:
    /// - `OrchestratorError::Grid` por geometría inválida o área
    ///   sobre el techo.
    pub fn estimate(
        &self,
        boundary: &Polygon<f64>,
        spacing_m: f64,
    ) -> Result<GridEstimate, OrchestratorError> {
        let policy = self.application_state.config.grid_policy();
        Ok(estimate_lattice(boundary, spacing_m, &policy)?)
    }

    /// Materializa y persiste la retícula completa del activo.
    ///
    /// # Errors:
    /// Los de `estimate`, más `InfrastructureNotFound` y
    /// `PointLimitExceeded`.
    #[instrument(skip(self, boundary))]
    pub async fn generate(
        &self,
        infrastructure_id: Uuid,
        boundary: &Polygon<f64>,
        spacing_m: f64,
    ) -> Result<GridProvisionReceipt, OrchestratorError> {
        let provision_start = Instant::now();

        // El activo debe existir antes de cualquier cómputo pesado.
        self.application_state.infrastructures()?.fetch(infrastructure_id).await?;

        let policy = self.application_state.config.grid_policy();
        let lattice_sites = materialize_lattice(boundary, spacing_m, &policy)?;

        let point_ceiling = self.application_state.config.grid.max_points;
        if lattice_sites.len() > point_ceiling {
            return Err(OrchestratorError::PointLimitExceeded {
                projected: lattice_sites.len(),
                ceiling: point_ceiling,
            });
        }

        // Cada fila porta un identificador fresco; jamás IDs del cliente.
        let monitoring_points: Vec<MonitoringPoint> = lattice_sites
            .iter()
            .map(|site| MonitoringPoint {
                id: Uuid::new_v4(),
                infrastructure_id,
                longitude: site.longitude,
                latitude: site.latitude,
                soil_type: None,
            })
            .collect();

        let persisted_count = self
            .application_state
            .points()?
            .bulk_insert_atomic(
                &monitoring_points,
                self.application_state.config.storage_bulk_chunk_size,
            )
            .await?;

        let receipt = GridProvisionReceipt {
            point_count: persisted_count,
            duration_ms: provision_start.elapsed().as_millis() as u64,
        };

        info!(
            "🏗️  [GRID_PROVISIONED]: {} points in {} ms for asset [{}].",
            receipt.point_count, receipt.duration_ms, infrastructure_id
        );
        Ok(receipt)
    }
}
