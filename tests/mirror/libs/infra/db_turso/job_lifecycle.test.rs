// [tests/mirror/libs/infra/db_turso/job_lifecycle.test.rs]
/*!
 * =================================================================
 * APARATO: CERTIFICADOR DE CICLO DE VIDA DE MISIONES (V2.3)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L3-MIRROR
 * RESPONSABILIDAD: AUDITORÍA DE LA MÁQUINA DE ESTADOS GUARDADA
 *
 * # Mathematical Proof (Guarded Ledger):
 * Las guardias de estado en SQL convierten cada transición ilegal en
 * una actualización de cero filas; el test certifica que la cadena
 * nominal avanza y que toda desviación es rechazada con
 * INVALID_STATE_TRANSITION.
 * =================================================================
 */

use tellus_domain_models::{JobStatus, ProductFile};
use tellus_infra_db::{DbError, JobRepository, JobSeed, TursoClient};
use uuid::Uuid;

async fn anchored_client(label: &str) -> TursoClient {
    TursoClient::connect(&format!("file:{label}?mode=memory&cache=shared"), None)
        .await
        .expect("CRITICAL_FAULT: Failed to anchor in-memory ledger.")
}

fn seed(job_id: Uuid) -> JobSeed {
    JobSeed {
        id: job_id,
        infrastructure_id: Uuid::new_v4(),
        upstream_id: "UP-777".into(),
        bbox_wkt: "POLYGON((2.35 48.85,2.36 48.85,2.36 48.86,2.35 48.86,2.35 48.85))".into(),
        reference_granule: "S1A_REF".into(),
        secondary_granule: "S1A_SEC".into(),
        retry_of: None,
    }
}

#[tokio::test]
async fn nominal_chain_advances_to_succeeded() {
    let client = anchored_client("mem_job_nominal").await;
    let jobs = JobRepository::new(client.get_connection().unwrap());

    let job_id = Uuid::new_v4();
    jobs.create(&seed(job_id)).await.expect("genesis");

    let fresh = jobs.fetch(job_id).await.unwrap();
    assert_eq!(fresh.status, JobStatus::Pending);
    assert_eq!(fresh.retry_count, 0);
    assert!(fresh.first_running_at.is_none());
    assert_eq!(fresh.upstream_id.as_deref(), Some("UP-777"));

    // PENDING -> RUNNING sella el primer avistamiento y el contador.
    jobs.mark_running(job_id).await.expect("first running");
    let running = jobs.fetch(job_id).await.unwrap();
    assert_eq!(running.status, JobStatus::Running);
    assert_eq!(running.retry_count, 1);
    let first_sighting = running.first_running_at.expect("first running sealed");

    // RUNNING -> RUNNING es legal (sondeos sucesivos) y acumula.
    jobs.mark_running(job_id).await.expect("second running");
    let still_running = jobs.fetch(job_id).await.unwrap();
    assert_eq!(still_running.retry_count, 2);
    assert_eq!(still_running.first_running_at, Some(first_sighting));

    jobs.mark_processing(job_id).await.expect("processing");
    assert_eq!(jobs.fetch(job_id).await.unwrap().status, JobStatus::Processing);

    jobs.mark_succeeded(job_id, 4_321).await.expect("sealing");
    let sealed = jobs.fetch(job_id).await.unwrap();
    assert_eq!(sealed.status, JobStatus::Succeeded);
    assert_eq!(sealed.processing_ms, Some(4_321));
    assert!(sealed.completed_at.is_some());
}

#[tokio::test]
async fn success_never_skips_the_processing_stage() {
    let client = anchored_client("mem_job_skip").await;
    let jobs = JobRepository::new(client.get_connection().unwrap());

    let job_id = Uuid::new_v4();
    jobs.create(&seed(job_id)).await.unwrap();
    jobs.mark_running(job_id).await.unwrap();

    // RUNNING -> SUCCEEDED directo: rechazado por la guardia.
    assert!(matches!(
        jobs.mark_succeeded(job_id, 1).await,
        Err(DbError::InvalidState)
    ));

    // PENDING -> PROCESSING tampoco existe.
    let other_id = Uuid::new_v4();
    jobs.create(&seed(other_id)).await.unwrap();
    assert!(matches!(
        jobs.mark_processing(other_id).await,
        Err(DbError::InvalidState)
    ));
}

#[tokio::test]
async fn terminal_states_are_tombs() {
    let client = anchored_client("mem_job_tombs").await;
    let jobs = JobRepository::new(client.get_connection().unwrap());

    let job_id = Uuid::new_v4();
    jobs.create(&seed(job_id)).await.unwrap();
    jobs.mark_running(job_id).await.unwrap();
    jobs.mark_failed(job_id, "UPSTREAM_REPORTED_FAILURE").await.unwrap();

    let failed = jobs.fetch(job_id).await.unwrap();
    assert_eq!(failed.status, JobStatus::Failed);
    assert_eq!(failed.error_message.as_deref(), Some("UPSTREAM_REPORTED_FAILURE"));

    // Ninguna transición escapa de una tumba.
    assert!(matches!(jobs.mark_running(job_id).await, Err(DbError::InvalidState)));
    assert!(matches!(jobs.mark_processing(job_id).await, Err(DbError::InvalidState)));
    assert!(matches!(jobs.mark_cancelled(job_id).await, Err(DbError::InvalidState)));
    assert!(matches!(
        jobs.mark_failed(job_id, "again").await,
        Err(DbError::InvalidState)
    ));
}

#[tokio::test]
async fn cancellation_reaches_any_non_terminal_state() {
    let client = anchored_client("mem_job_cancel").await;
    let jobs = JobRepository::new(client.get_connection().unwrap());

    let pending_id = Uuid::new_v4();
    jobs.create(&seed(pending_id)).await.unwrap();
    jobs.mark_cancelled(pending_id).await.expect("cancel from pending");
    assert_eq!(jobs.fetch(pending_id).await.unwrap().status, JobStatus::Cancelled);

    let running_id = Uuid::new_v4();
    jobs.create(&seed(running_id)).await.unwrap();
    jobs.mark_running(running_id).await.unwrap();
    jobs.mark_cancelled(running_id).await.expect("cancel from running");
    assert_eq!(jobs.fetch(running_id).await.unwrap().status, JobStatus::Cancelled);
}

#[tokio::test]
async fn ledger_distinguishes_absence_from_illegality() {
    let client = anchored_client("mem_job_absence").await;
    let jobs = JobRepository::new(client.get_connection().unwrap());

    assert!(matches!(jobs.fetch(Uuid::new_v4()).await, Err(DbError::JobNotFound)));
    assert!(matches!(
        jobs.mark_running(Uuid::new_v4()).await,
        Err(DbError::JobNotFound)
    ));
}

#[tokio::test]
async fn product_inventory_and_lineage_round_trip() {
    let client = anchored_client("mem_job_inventory").await;
    let jobs = JobRepository::new(client.get_connection().unwrap());

    let terminal_id = Uuid::new_v4();
    jobs.create(&seed(terminal_id)).await.unwrap();

    let inventory = vec![
        ProductFile {
            url: "http://processor.invalid/a_vert_disp.tif".into(),
            filename: "a_vert_disp.tif".into(),
            size_bytes: Some(2_048),
        },
        ProductFile {
            url: "http://processor.invalid/a_corr.tif".into(),
            filename: "a_corr.tif".into(),
            size_bytes: None,
        },
    ];
    jobs.record_product_files(terminal_id, &inventory).await.unwrap();

    let snapshot = jobs.fetch(terminal_id).await.unwrap();
    assert_eq!(snapshot.product_files.len(), 2);
    assert_eq!(snapshot.product_files[0].filename, "a_vert_disp.tif");
    assert_eq!(snapshot.product_files[1].size_bytes, None);

    // Linaje de reintento.
    let retry_id = Uuid::new_v4();
    let mut retry_seed = seed(retry_id);
    retry_seed.retry_of = Some(terminal_id);
    jobs.create(&retry_seed).await.unwrap();
    assert_eq!(jobs.fetch(retry_id).await.unwrap().retry_of, Some(terminal_id));

    // Listado de misiones vivas.
    let survivors = jobs.fetch_non_terminal_ids().await.unwrap();
    assert!(survivors.contains(&terminal_id));
    assert!(survivors.contains(&retry_id));
}
