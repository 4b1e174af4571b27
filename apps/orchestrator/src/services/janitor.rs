// [apps/orchestrator/src/services/janitor.rs]
/*!
 * =================================================================
 * APARATO: WORKDIR JANITOR DAEMON (V4.1 - HYGIENE SWEEP)
 * CLASIFICACIÓN: BACKGROUND INFRASTRUCTURE (ESTRATO L4)
 * RESPONSABILIDAD: PURGA DE DIRECTORIOS DE MISIONES TERMINALES
 *
 * Un colapso de proceso puede dejar subdirectorios de trabajo
 * huérfanos (rásters descargados de misiones ya terminales). El
 * daemon barre el directorio raíz cada 60 s y retira los residuos
 * cuya misión es terminal o desconocida.
 * =================================================================
 */

use crate::state::AppState;
use std::time::Duration;
use tellus_infra_db::DbError;
use tokio::time::interval;
use tracing::{info, warn};
use uuid::Uuid;

const SWEEP_CADENCE: Duration = Duration::from_secs(60);

/// Inicia el servicio de limpieza perpetua en el runtime de Tokio.
pub fn spawn_janitor(application_state: AppState) {
    tokio::spawn(async move {
        let mut sweep_ticker = interval(SWEEP_CADENCE);
        info!("💀 [JANITOR_ACTIVE]: Workdir hygiene daemon initiated.");

        loop {
            sweep_ticker.tick().await;

            if application_state.is_shutting_down() {
                break;
            }

            match sweep_once(&application_state).await {
                Ok(purged) if purged > 0 => {
                    info!("💀 [JANITOR_CLEANUP]: Evicted {} orphaned mission workdirs.", purged);
                }
                Ok(_) => {}
                Err(sweep_fault) => {
                    warn!("⚠️  [JANITOR_DEGRADED]: Sweep incomplete: {}", sweep_fault);
                }
            }
        }
    });
}

/// Una pasada de barrido sobre el directorio de trabajo raíz.
async fn sweep_once(state: &AppState) -> Result<usize, DbError> {
    let root = state.config.working_dir.clone();
    if !root.exists() {
        return Ok(0);
    }

    let mut purged_count = 0usize;
    let jobs = state.jobs()?;

    let mut directory_stream = match tokio::fs::read_dir(&root).await {
        Ok(stream) => stream,
        Err(_) => return Ok(0),
    };

    while let Ok(Some(entry)) = directory_stream.next_entry().await {
        let entry_name = entry.file_name();
        let Some(name) = entry_name.to_str() else { continue };

        // Solo los subdirectorios con nombre de misión son elegibles.
        let Ok(job_id) = Uuid::parse_str(name) else { continue };

        let is_disposable = match jobs.fetch(job_id).await {
            Ok(job) => job.status.is_terminal(),
            Err(DbError::JobNotFound) => true,
            Err(_) => false,
        };

        if is_disposable && tokio::fs::remove_dir_all(entry.path()).await.is_ok() {
            purged_count += 1;
        }
    }

    Ok(purged_count)
}
