// [apps/orchestrator/src/services/poll_sentinel.rs]
/*!
 * =================================================================
 * APARATO: POLL SENTINEL WORKER POOL (V4.5 - BACKOFF JITTERED)
 * CLASIFICACIÓN: CONTROL SERVICE (ESTRATO L4)
 * RESPONSABILIDAD: DRENAJE DE LA COLA DURABLE Y PASO DE SONDEO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ONE STEP PER CLAIM: Cada worker toma una entrega, ejecuta UN
 *    paso de sondeo y retorna; el post-procesamiento corre inline
 *    dentro del mismo paso cuando el trabajo aguas arriba culminó.
 * 2. LOCK THEN MUTATE: El candado exclusivo por misión se posee antes
 *    de releer estado y de cualquier mutación; las entregas
 *    duplicadas se serializan y se autodescartan.
 * 3. TRANSIENT NEUTRALITY: Un fallo transitorio re-encola con
 *    retroceso sin mutar la fila de misión.
 * =================================================================
 */

use crate::services::raster_harvest::RasterHarvest;
use crate::state::AppState;
use chrono::Utc;
use rand::Rng;
use std::time::{Duration, Instant};
use tellus_domain_models::{Job, JobStatus};
use tellus_infra_db::DbError;
use tellus_infra_hyp3::{Hyp3Error, UpstreamSnapshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Pausa del worker cuando la cola no tiene entregas vencidas.
const IDLE_DRAIN_PAUSE: Duration = Duration::from_millis(500);

pub struct PollSentinel {
    application_state: AppState,
}

impl PollSentinel {
    pub fn new(application_state: AppState) -> Self {
        Self { application_state }
    }

    /// Re-encola una vez todas las misiones vivas (recuperación tras
    /// reinicio); los duplicados son absorbidos por la cola.
    #[instrument(skip(self))]
    pub async fn recover_orphaned_missions(&self) -> Result<usize, DbError> {
        let survivors = self.application_state.jobs()?.fetch_non_terminal_ids().await?;
        let queue = self.application_state.queue()?;
        let now_ms = Utc::now().timestamp_millis();

        for job_id in &survivors {
            queue.enqueue(*job_id, now_ms, 0).await?;
        }

        if !survivors.is_empty() {
            info!("♻️  [RESURRECTION]: {} live missions re-enqueued after ignition.", survivors.len());
        }
        Ok(survivors.len())
    }

    /// Despliega el pool de workers de sondeo.
    pub fn spawn_worker_pool(&self) -> Vec<JoinHandle<()>> {
        let worker_count = self.application_state.config.orchestrator.worker_count.max(1);

        (0..worker_count)
            .map(|worker_index| {
                let state = self.application_state.clone();
                tokio::spawn(async move {
                    info!("⛏️  [SENTINEL_{}]: Poll worker operational.", worker_index);
                    worker_drain_loop(state, worker_index).await;
                    info!("🛑 [SENTINEL_{}]: Poll worker drained and retired.", worker_index);
                })
            })
            .collect()
    }
}

/// Bucle de drenaje de un worker: reclama, sondea, retorna.
async fn worker_drain_loop(state: AppState, worker_index: usize) {
    loop {
        if state.is_shutting_down() {
            break;
        }

        let claim = match state.queue() {
            Ok(queue) => queue.claim_due(Utc::now().timestamp_millis()).await,
            Err(fault) => Err(fault),
        };

        match claim {
            Ok(Some(delivery)) => {
                execute_poll_step(&state, delivery.job_id, delivery.attempt).await;
            }
            Ok(None) => tokio::time::sleep(IDLE_DRAIN_PAUSE).await,
            Err(fault) => {
                warn!("⚠️  [SENTINEL_{}]: Queue claim failed: {}. Backing off.", worker_index, fault);
                tokio::time::sleep(IDLE_DRAIN_PAUSE).await;
            }
        }
    }
}

/// Un paso de sondeo completo para una entrega reclamada.
#[instrument(skip(state, job_id), fields(job = %job_id))]
async fn execute_poll_step(state: &AppState, job_id: Uuid, attempt: u32) {
    // Candado exclusivo por misión antes de releer o mutar.
    let advisory_lock = state.job_locks.lease(job_id);
    let _exclusive_guard = advisory_lock.lock().await;

    let job = match fetch_job(state, job_id).await {
        Ok(Some(job)) => job,
        Ok(None) => return, // Fila desaparecida: entrega descartada.
        Err(_) => {
            requeue_transient(state, job_id, attempt).await;
            return;
        }
    };

    // 1. Estado terminal: descartar y limpiar residuos.
    if job.status.is_terminal() {
        debug!("⚪ [POLL_DROP]: Job already terminal ({}).", job.status.as_str());
        finalize_mission(state, &job).await;
        return;
    }

    // 2. Techo de reloj de pared desde el primer RUNNING.
    if wall_clock_exceeded(state, &job) {
        seal_failure(state, &job, "TIMEOUT: wall clock ceiling exceeded").await;
        return;
    }

    let Some(upstream_id) = job.upstream_id.clone() else {
        seal_failure(state, &job, "UPSTREAM_ID_VOID: mission lost its upstream handle").await;
        return;
    };

    // 3. Consulta de estado aguas arriba tras la compuerta de tasa.
    state.rate_gate.admit().await;
    let snapshot = state.processor.fetch_status(&upstream_id).await;

    match snapshot {
        Err(Hyp3Error::Transient(message)) => {
            debug!("🔁 [POLL_TRANSIENT]: {}", message);
            requeue_transient(state, job_id, attempt).await;
        }
        Err(fault) => {
            // Respuesta malformada u otro fallo permanente del enlace.
            seal_failure(state, &job, &fault.to_string()).await;
        }
        Ok(UpstreamSnapshot::Pending) | Ok(UpstreamSnapshot::Running) => {
            advance_running(state, &job, attempt).await;
        }
        Ok(UpstreamSnapshot::Failed { message }) => {
            seal_failure(state, &job, &message).await;
        }
        Ok(UpstreamSnapshot::Succeeded { files }) => {
            complete_mission(state, &job, files).await;
        }
    }
}

/// upstream PENDING/RUNNING: sella RUNNING y reprograma con retroceso.
async fn advance_running(state: &AppState, job: &Job, attempt: u32) {
    let next_attempt = attempt + 1;

    if next_attempt > state.config.orchestrator.max_attempts {
        seal_failure(state, job, "TIMEOUT: poll attempt ceiling exhausted").await;
        return;
    }

    if let Err(fault) = mark_running_guarded(state, job).await {
        warn!("⚠️  [POLL_MUTATION_DEFERRED]: {}", fault);
        requeue_transient(state, job.id, attempt).await;
        return;
    }

    let delay_ms = jittered_backoff_ms(state, next_attempt);
    let next_poll_at = Utc::now().timestamp_millis() + delay_ms as i64;

    if let Err(fault) = enqueue(state, job.id, next_poll_at, next_attempt).await {
        // La misión sigue viva en el Ledger; la resurrección de la
        // ignición la recuperará si la cola quedó coja.
        error!("❌ [REQUEUE_FAULT]: {}", fault);
    }
}

/// upstream SUCCEEDED: PROCESSING + cosecha inline + sellado terminal.
async fn complete_mission(state: &AppState, job: &Job, files: Vec<tellus_domain_models::ProductFile>) {
    let Ok(jobs) = state.jobs() else {
        requeue_transient(state, job.id, 0).await;
        return;
    };

    // La cadena nominal jamás saltea estados: PENDING pasa por RUNNING.
    if job.status == JobStatus::Pending {
        if let Err(fault) = jobs.mark_running(job.id).await {
            warn!("⚠️  [POLL_MUTATION_DEFERRED]: {}", fault);
            requeue_transient(state, job.id, 0).await;
            return;
        }
    }

    if let Err(fault) = jobs.record_product_files(job.id, &files).await {
        warn!("⚠️  [EVIDENCE_DEFERRED]: {}", fault);
        requeue_transient(state, job.id, 0).await;
        return;
    }

    // Un colapso tras este punto deja la misión en PROCESSING; la
    // recuperación de ignición re-sondeará y la cosecha idempotente
    // reescribirá las mismas filas.
    if job.status != JobStatus::Processing {
        if let Err(fault) = jobs.mark_processing(job.id).await {
            warn!("⚠️  [POLL_MUTATION_DEFERRED]: {}", fault);
            requeue_transient(state, job.id, 0).await;
            return;
        }
    }

    let harvest = RasterHarvest::new(state.clone());
    let processing_start = Instant::now();

    match harvest.execute(job, &files).await {
        Ok(ingested_rows) => {
            let processing_ms = processing_start.elapsed().as_millis() as u64;
            match jobs.mark_succeeded(job.id, processing_ms).await {
                Ok(()) => info!(
                    "✅ [MISSION_SEALED]: Job [{}] SUCCEEDED with {} measurements in {} ms.",
                    job.id, ingested_rows, processing_ms
                ),
                Err(fault) => error!("❌ [SEAL_FAULT]: {}", fault),
            }
        }
        Err(harvest_fault) => {
            seal_failure(state, job, &harvest_fault.to_string()).await;
            return;
        }
    }

    finalize_mission(state, job).await;
}

// --- AUXILIARES DE PASO ---

async fn fetch_job(state: &AppState, job_id: Uuid) -> Result<Option<Job>, DbError> {
    match state.jobs()?.fetch(job_id).await {
        Ok(job) => Ok(Some(job)),
        Err(DbError::JobNotFound) => Ok(None),
        Err(fault) => Err(fault),
    }
}

fn wall_clock_exceeded(state: &AppState, job: &Job) -> bool {
    let Some(first_running_at) = job.first_running_at else {
        return false;
    };
    let elapsed_ms = (Utc::now() - first_running_at).num_milliseconds();
    elapsed_ms >= 0 && elapsed_ms as u64 >= state.config.orchestrator.job_wall_clock_ms
}

async fn mark_running_guarded(state: &AppState, job: &Job) -> Result<(), DbError> {
    state.jobs()?.mark_running(job.id).await
}

async fn enqueue(
    state: &AppState,
    job_id: Uuid,
    next_poll_at_ms: i64,
    attempt: u32,
) -> Result<(), DbError> {
    state.queue()?.enqueue(job_id, next_poll_at_ms, attempt).await
}

/// Re-encola sin mutar estado tras un fallo transitorio.
async fn requeue_transient(state: &AppState, job_id: Uuid, attempt: u32) {
    let delay_ms = jittered_backoff_ms(state, attempt.saturating_add(1));
    let next_poll_at = Utc::now().timestamp_millis() + delay_ms as i64;

    if let Err(fault) = enqueue(state, job_id, next_poll_at, attempt.saturating_add(1)).await {
        error!("❌ [REQUEUE_FAULT]: {}", fault);
    }
}

/// Sella FAILED con el mensaje forense y limpia residuos.
async fn seal_failure(state: &AppState, job: &Job, message: &str) {
    match state.jobs() {
        Ok(jobs) => {
            if let Err(fault) = jobs.mark_failed(job.id, message).await {
                // InvalidState aquí significa carrera con otra
                // transición terminal; el descarte es seguro.
                warn!("⚠️  [FAILURE_SEAL_SKIPPED]: {}", fault);
            } else {
                warn!("💀 [MISSION_FAILED]: Job [{}] -> FAILED: {}", job.id, message);
            }
        }
        Err(fault) => error!("❌ [FAILURE_SEAL_FAULT]: {}", fault),
    }

    finalize_mission(state, job).await;
}

/// Higiene tras una transición terminal: workdir, cola y candado.
async fn finalize_mission(state: &AppState, job: &Job) {
    RasterHarvest::new(state.clone()).cleanup_workdir(job).await;

    if let Ok(queue) = state.queue() {
        let _ = queue.remove(job.id).await;
    }

    state.job_locks.release(job.id);
}

/// Retroceso exponencial acotado con jitter uniforme de ±10 %.
fn jittered_backoff_ms(state: &AppState, attempt: u32) -> u64 {
    let base = state.config.orchestrator.poll_base_ms.max(1);
    let cap = state.config.orchestrator.poll_max_ms.max(base);

    let exponent = attempt.saturating_sub(1).min(20);
    let raw_delay = base.saturating_mul(1u64 << exponent).min(cap);

    let jitter_span = raw_delay / 10;
    if jitter_span == 0 {
        return raw_delay;
    }

    let jitter = rand::thread_rng().gen_range(0..=jitter_span * 2);
    raw_delay - jitter_span + jitter
}
