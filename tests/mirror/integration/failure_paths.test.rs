// [tests/mirror/integration/failure_paths.test.rs]
/*!
 * =================================================================
 * APARATO: CERTIFICADOR DE SENDEROS DE FALLO (V3.2)
 * CLASIFICACIÓN: TRINITY EVIDENCE // INTEGRACIÓN TOTAL
 * RESPONSABILIDAD: AUDITORÍA DE DESCARGAS COLAPSADAS, REPETICIÓN
 *                  POST-COLAPSO, TECHO DE SONDEOS Y CANCELACIÓN
 * =================================================================
 */

#[path = "../support/mocks.rs"]
mod mocks;
#[path = "../support/geotiff_forge.rs"]
mod geotiff_forge;

use chrono::NaiveDate;
use geo::{polygon, Polygon};
use geotiff_forge::{forge_geotiff, GeoTiffSpec, GEOGRAPHIC_WGS84_KEYS};
use mocks::{product_file, synthetic_granule, test_config, ScriptedCatalog, ScriptedProcessor};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tellus_domain_models::{DateWindow, Infrastructure, Job, JobStatus};
use tellus_infra_db::{JobSeed, TursoClient};
use tellus_infra_hyp3::UpstreamSnapshot;
use tellus_orchestrator::prelude::*;
use uuid::Uuid;
use wkt::ToWkt;

const VERT_NAME: &str = "S1AA_20260101T060000_20260113T060000_VVP012_INT80_G_ueF_CCCC_vert_disp.tif";
const CORR_NAME: &str = "S1AA_20260101T060000_20260113T060000_VVP012_INT80_G_ueF_CCCC_corr.tif";

fn small_square() -> Polygon<f64> {
    let half_lat = 15.0 / 111_320.0;
    let half_lon = 15.0 / (48.8566f64.to_radians().cos() * 111_320.0);
    polygon![
        (x: 2.3522 - half_lon, y: 48.8566 - half_lat),
        (x: 2.3522 + half_lon, y: 48.8566 - half_lat),
        (x: 2.3522 + half_lon, y: 48.8566 + half_lat),
        (x: 2.3522 - half_lon, y: 48.8566 + half_lat),
        (x: 2.3522 - half_lon, y: 48.8566 - half_lat),
    ]
}

fn forge_products(products_dir: &Path, boundary: &Polygon<f64>) {
    use geo::BoundingRect;
    let envelope = boundary.bounding_rect().unwrap();

    let pixel_height = 2.5 / 111_320.0;
    let pixel_width = 2.5 / (48.8566f64.to_radians().cos() * 111_320.0);
    let band = vec![0.0070f32; 24 * 24];

    for (name, samples) in [(VERT_NAME, &band), (CORR_NAME, &vec![0.9f32; 24 * 24])] {
        forge_geotiff(
            &products_dir.join(name),
            &GeoTiffSpec {
                width: 24,
                height: 24,
                origin_x: envelope.min().x - 8.0 * pixel_width,
                origin_y: envelope.max().y + 8.0 * pixel_height,
                pixel_width,
                pixel_height,
                geokeys: GEOGRAPHIC_WGS84_KEYS,
                nodata_label: None,
                rows_per_strip: None,
                samples,
            },
        );
    }
}

struct FailureHarness {
    state: AppState,
    dispatch: MissionDispatch,
    asset_id: Uuid,
    processor: Arc<ScriptedProcessor>,
    working_dir: std::path::PathBuf,
    _workspace: tempfile::TempDir,
}

async fn ignite_harness(label: &str, mut shape: impl FnMut(&mut ControlPlaneConfig)) -> FailureHarness {
    let workspace = tempfile::tempdir().unwrap();
    let products_dir = workspace.path().join("products");
    std::fs::create_dir_all(&products_dir).unwrap();
    let working_dir = workspace.path().join("workdir");

    let database_url = format!("file:{label}?mode=memory&cache=shared");
    let database_client = TursoClient::connect(&database_url, None).await.unwrap();

    let boundary = small_square();
    forge_products(&products_dir, &boundary);

    let catalog = Arc::new(ScriptedCatalog::with_granules(vec![
        synthetic_granule("S1A_REF_20260101", 0, Some(88)),
        synthetic_granule("S1A_SEC_20260113", 12, Some(88)),
    ]));
    let processor = Arc::new(ScriptedProcessor::accepting(Some(products_dir)));

    let mut config = test_config(&database_url, &working_dir);
    shape(&mut config);

    let state = OrchestratorKernel::ignite_with_collaborators(
        config,
        database_client,
        catalog,
        processor.clone(),
    )
    .application_shared_state;

    let asset = Infrastructure {
        id: Uuid::new_v4(),
        owner_identity: "failure-auditor".into(),
        display_name: "Failure Dam".into(),
        boundary_wkt: boundary.wkt_string(),
    };
    state.infrastructures().unwrap().register(&asset).await.unwrap();
    GridArchitect::new(state.clone()).generate(asset.id, &boundary, 5.0).await.unwrap();

    FailureHarness {
        dispatch: MissionDispatch::new(state.clone()),
        state,
        asset_id: asset.id,
        processor,
        working_dir,
        _workspace: workspace,
    }
}

fn audit_window() -> DateWindow {
    DateWindow::new(
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
    )
}

async fn await_terminal(dispatch: &MissionDispatch, job_id: Uuid, budget: Duration) -> Job {
    let deadline = Instant::now() + budget;
    loop {
        let snapshot = dispatch.fetch_mission(job_id).await.expect("mission readable");
        if snapshot.status.is_terminal() {
            return snapshot;
        }
        assert!(Instant::now() < deadline, "mission did not reach a terminal state in time");
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn exhausted_vertical_download_seals_failed_without_rows() {
    let harness = ignite_harness("mem_fail_download", |_| {}).await;
    // La descarga del producto vertical colapsa tras sus reintentos.
    harness.processor.poison_suffix("_vert_disp.tif");

    let sentinel = PollSentinel::new(harness.state.clone());
    let workers = sentinel.spawn_worker_pool();

    harness
        .processor
        .script_statuses(
            "UP-1",
            vec![UpstreamSnapshot::Succeeded {
                files: vec![product_file(VERT_NAME), product_file(CORR_NAME)],
            }],
        );

    let mission = harness.dispatch.submit_mission(harness.asset_id, audit_window()).await.unwrap();
    let sealed = await_terminal(&harness.dispatch, mission, Duration::from_secs(15)).await;

    assert_eq!(sealed.status, JobStatus::Failed);
    let forensic = sealed.error_message.expect("forensic message sealed");
    assert!(forensic.contains("SCRIPTED_EXHAUSTION"), "message: {forensic}");

    // Ni una fila de deformación; el workdir fue retirado.
    assert_eq!(harness.state.deformations().unwrap().count_for_job(mission).await.unwrap(), 0);
    assert!(!harness.working_dir.join(mission.to_string()).exists());

    harness.state.request_shutdown();
    for handle in workers {
        let _ = handle.await;
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn processing_crash_replay_converges_to_exactly_once_rows() {
    let harness = ignite_harness("mem_fail_replay", |_| {}).await;

    // Misión forjada a mano en el estado PROCESSING: el proceso previo
    // colapsó tras ver SUCCEEDED aguas arriba y antes de la ingesta.
    let crashed_id = Uuid::new_v4();
    let boundary_wkt = small_square().wkt_string();
    harness
        .state
        .jobs()
        .unwrap()
        .create(&JobSeed {
            id: crashed_id,
            infrastructure_id: harness.asset_id,
            upstream_id: "UP-CRASH".into(),
            bbox_wkt: boundary_wkt,
            reference_granule: "S1A_REF_20260101".into(),
            secondary_granule: "S1A_SEC_20260113".into(),
            retry_of: None,
        })
        .await
        .unwrap();
    harness.state.jobs().unwrap().mark_running(crashed_id).await.unwrap();
    harness.state.jobs().unwrap().mark_processing(crashed_id).await.unwrap();

    harness.processor.script_statuses(
        "UP-CRASH",
        vec![UpstreamSnapshot::Succeeded {
            files: vec![product_file(VERT_NAME), product_file(CORR_NAME)],
        }],
    );

    // La ignición re-encola las misiones vivas exactamente una vez.
    let sentinel = PollSentinel::new(harness.state.clone());
    assert_eq!(sentinel.recover_orphaned_missions().await.unwrap(), 1);

    let workers = sentinel.spawn_worker_pool();
    let sealed = await_terminal(&harness.dispatch, crashed_id, Duration::from_secs(15)).await;
    assert_eq!(sealed.status, JobStatus::Succeeded);

    let point_count = harness
        .state
        .points()
        .unwrap()
        .count_for_infrastructure(harness.asset_id)
        .await
        .unwrap();
    let row_count =
        harness.state.deformations().unwrap().count_for_job(crashed_id).await.unwrap();
    assert_eq!(row_count, point_count, "every lattice point sampled exactly once");

    // La cosecha es reproducible: re-ejecutarla no duplica filas.
    let replayed_rows = RasterHarvest::new(harness.state.clone())
        .execute(
            &harness.dispatch.fetch_mission(crashed_id).await.unwrap(),
            &[product_file(VERT_NAME), product_file(CORR_NAME)],
        )
        .await
        .unwrap();
    assert_eq!(replayed_rows as u64, row_count);
    assert_eq!(
        harness.state.deformations().unwrap().count_for_job(crashed_id).await.unwrap(),
        row_count
    );

    // Una misión terminal jamás se re-encola.
    assert_eq!(sentinel.recover_orphaned_missions().await.unwrap(), 0);

    harness.state.request_shutdown();
    for handle in workers {
        let _ = handle.await;
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn poll_attempt_ceiling_seals_timeout() {
    let harness = ignite_harness("mem_fail_ceiling", |config| {
        config.orchestrator.max_attempts = 2;
    })
    .await;

    // Sin guion: el procesador reporta RUNNING indefinidamente.
    let sentinel = PollSentinel::new(harness.state.clone());
    let workers = sentinel.spawn_worker_pool();

    let mission = harness.dispatch.submit_mission(harness.asset_id, audit_window()).await.unwrap();
    let sealed = await_terminal(&harness.dispatch, mission, Duration::from_secs(15)).await;

    assert_eq!(sealed.status, JobStatus::Failed);
    let forensic = sealed.error_message.expect("forensic message sealed");
    assert!(forensic.contains("TIMEOUT"), "message: {forensic}");
    assert!(sealed.retry_count >= 2, "attempts accumulated before the ceiling");

    harness.state.request_shutdown();
    for handle in workers {
        let _ = handle.await;
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn cancellation_before_polling_leaves_the_upstream_untouched() {
    let harness = ignite_harness("mem_fail_cancel", |_| {}).await;

    let mission = harness.dispatch.submit_mission(harness.asset_id, audit_window()).await.unwrap();
    harness.dispatch.cancel_mission(mission).await.unwrap();

    // El pool arranca después de la cancelación: la cola está vacía y
    // el procesador jamás es consultado.
    let sentinel = PollSentinel::new(harness.state.clone());
    let workers = sentinel.spawn_worker_pool();
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(
        harness.dispatch.fetch_mission(mission).await.unwrap().status,
        JobStatus::Cancelled
    );
    assert_eq!(
        harness.processor.status_calls.load(std::sync::atomic::Ordering::SeqCst),
        0
    );

    harness.state.request_shutdown();
    for handle in workers {
        let _ = handle.await;
    }
}
