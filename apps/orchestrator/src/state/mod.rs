// [apps/orchestrator/src/state/mod.rs]
/*!
 * =================================================================
 * APARATO: APPLICATION SHARED STATE (V4.3 - CAPABILITY HANDLES)
 * CLASIFICACIÓN: SHARED STATE (ESTRATO L4)
 * RESPONSABILIDAD: NEXO DE CAPACIDADES INYECTADAS DEL PLANO DE CONTROL
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NARROW CAPABILITIES: Cada componente recibe solo las capacidades
 *    que necesita (catálogo = búsqueda; procesador = someter/sondear/
 *    descargar); nada de singletons de proceso.
 * 2. WORKERS SIN MEMORIA COMPARTIDA: Fuera de estos manejadores, los
 *    workers no comparten estado mutable; todo lo persistente viaja
 *    por el sustrato de almacenamiento.
 * =================================================================
 */

pub mod job_locks;
pub mod rate_gate;

pub use job_locks::JobLockRegistry;
pub use rate_gate::UpstreamRateGate;

use crate::config::ControlPlaneConfig;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tellus_infra_catalog::GranuleCatalog;
use tellus_infra_db::{
    DeformationRepository, InfrastructureRepository, JobRepository, PointRepository,
    QueueRepository, TursoClient,
};
use tellus_infra_db::DbError;
use tellus_infra_hyp3::InsarProcessor;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ControlPlaneConfig>,
    database_client: TursoClient,
    pub catalog: Arc<dyn GranuleCatalog>,
    pub processor: Arc<dyn InsarProcessor>,
    pub job_locks: Arc<JobLockRegistry>,
    pub rate_gate: Arc<UpstreamRateGate>,
    shutdown_flag: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(
        config: ControlPlaneConfig,
        database_client: TursoClient,
        catalog: Arc<dyn GranuleCatalog>,
        processor: Arc<dyn InsarProcessor>,
    ) -> Self {
        let rate_ceiling = config.orchestrator.upstream_rate_per_min;
        Self {
            config: Arc::new(config),
            database_client,
            catalog,
            processor,
            job_locks: Arc::new(JobLockRegistry::new()),
            rate_gate: Arc::new(UpstreamRateGate::new(rate_ceiling)),
            shutdown_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    // --- FÁBRICAS DE REPOSITORIOS (una conexión por unidad de trabajo) ---

    pub fn infrastructures(&self) -> Result<InfrastructureRepository, DbError> {
        Ok(InfrastructureRepository::new(self.database_client.get_connection()?))
    }

    pub fn points(&self) -> Result<PointRepository, DbError> {
        Ok(PointRepository::new(self.database_client.get_connection()?))
    }

    pub fn jobs(&self) -> Result<JobRepository, DbError> {
        Ok(JobRepository::new(self.database_client.get_connection()?))
    }

    pub fn deformations(&self) -> Result<DeformationRepository, DbError> {
        Ok(DeformationRepository::new(self.database_client.get_connection()?))
    }

    pub fn queue(&self) -> Result<QueueRepository, DbError> {
        Ok(QueueRepository::new(self.database_client.get_connection()?))
    }

    // --- PROTOCOLO DE APAGADO COOPERATIVO ---

    pub fn request_shutdown(&self) {
        self.shutdown_flag.store(true, Ordering::SeqCst);
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown_flag.load(Ordering::SeqCst)
    }
}
