// INICIO DEL ARCHIVO [apps/orchestrator/src/kernel.rs]
/**
 * =================================================================
 * APARATO: ORCHESTRATOR SOVEREIGN KERNEL (V4.4 - HEADLESS PLANE)
 * CLASIFICACIÓN: COMPOSITION ROOT (ESTRATO L1-APP)
 * RESPONSABILIDAD: BOOTSTRAP DE INFRAESTRUCTURA E IGNICIÓN SEGURA
 *
 * VISION HIPER-HOLÍSTICA:
 * Actúa como la placa base donde se conectan las capacidades: el
 * sustrato libSQL, el catálogo de granulos y el procesador InSAR se
 * construyen aquí y viajan inyectados. El plano es headless: la
 * superficie HTTP vive en un estrato externo.
 * =================================================================
 */

use crate::config::ControlPlaneConfig;
use crate::services::{spawn_janitor, PollSentinel};
use crate::state::AppState;
use std::sync::Arc;
use tellus_infra_catalog::{AsfCatalogClient, CatalogRetryPolicy, GranuleCatalog};
use tellus_infra_db::TursoClient;
use tellus_infra_hyp3::{Hyp3Client, InsarProcessor};
use tracing::{error, info, instrument};

pub struct OrchestratorKernel {
    pub application_shared_state: AppState,
}

impl OrchestratorKernel {
    /**
     * Ignición nominal: construye los colaboradores reales desde la
     * configuración y establece el enlace de base de datos.
     */
    #[instrument(skip(config))]
    pub async fn ignite(config: ControlPlaneConfig) -> Self {
        let database_client =
            TursoClient::connect(&config.database_url, config.database_token.clone())
                .await
                .expect("FATAL: Database link collapse. Ignition aborted.");

        let catalog: Arc<dyn GranuleCatalog> = Arc::new(AsfCatalogClient::new(
            config.catalog_base_url.clone(),
            CatalogRetryPolicy::default(),
        ));

        let processor: Arc<dyn InsarProcessor> = Arc::new(Hyp3Client::new(
            config.processor_base_url.clone(),
            config.processor_bearer_token.clone(),
            config.sampler.download_timeout_ms,
        ));

        Self::ignite_with_collaborators(config, database_client, catalog, processor)
    }

    /**
     * Ignición con colaboradores inyectados (pruebas y herramientas).
     */
    pub fn ignite_with_collaborators(
        config: ControlPlaneConfig,
        database_client: TursoClient,
        catalog: Arc<dyn GranuleCatalog>,
        processor: Arc<dyn InsarProcessor>,
    ) -> Self {
        Self {
            application_shared_state: AppState::new(config, database_client, catalog, processor),
        }
    }

    /**
     * Lanza las operaciones autónomas del plano de control y espera
     * la señal de apagado cooperativo.
     */
    pub async fn launch_sovereign_operations(self) {
        let shared_application_state = self.application_shared_state.clone();

        // --- 1. RESURRECCIÓN DE MISIONES VIVAS (POST-REINICIO) ---
        let sentinel = PollSentinel::new(shared_application_state.clone());
        if let Err(resurrection_fault) = sentinel.recover_orphaned_missions().await {
            error!("❌ [RESURRECTION_FAULT]: {}", resurrection_fault);
        }

        // --- 2. DAEMON DE HIGIENE DE DIRECTORIOS ---
        spawn_janitor(shared_application_state.clone());

        // --- 3. DESPLIEGUE DEL POOL DE SONDEO ---
        let worker_handles = sentinel.spawn_worker_pool();
        info!(
            "🚀 [KERNEL_ONLINE]: Control plane operational with {} poll workers.",
            worker_handles.len()
        );

        // --- 4. ESPERA DE APAGADO COOPERATIVO ---
        if let Err(signal_fault) = tokio::signal::ctrl_c().await {
            error!("❌ [SIGNAL_FAULT]: {}", signal_fault);
        }

        info!("🛑 [KERNEL_DRAINING]: Shutdown requested; draining poll workers...");
        shared_application_state.request_shutdown();

        for handle in worker_handles {
            let _ = handle.await;
        }

        info!("🏁 [KERNEL_RETIRED]: Deterministic teardown complete.");
    }
}
// FIN DEL ARCHIVO [apps/orchestrator/src/kernel.rs]
