// [tests/mirror/apps/orchestrator/services/grid_architect.test.rs]
/*!
 * =================================================================
 * APARATO: CERTIFICADOR DEL ARQUITECTO DE RETÍCULAS (V2.1)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L4-MIRROR
 * RESPONSABILIDAD: AUDITORÍA DE TECHOS DE PUNTOS, PUREZA DE LA
 *                  ESTIMACIÓN Y ACTIVOS INEXISTENTES
 * =================================================================
 */

#[path = "../../../support/mocks.rs"]
mod mocks;

use geo::{polygon, Polygon};
use mocks::{test_config, ScriptedCatalog, ScriptedProcessor};
use std::sync::Arc;
use tellus_domain_models::Infrastructure;
use tellus_infra_db::TursoClient;
use tellus_orchestrator::prelude::*;
use uuid::Uuid;
use wkt::ToWkt;

fn paris_square(side_m: f64) -> Polygon<f64> {
    let half_lat = side_m / 2.0 / 111_320.0;
    let half_lon = side_m / 2.0 / (48.8566f64.to_radians().cos() * 111_320.0);
    polygon![
        (x: 2.3522 - half_lon, y: 48.8566 - half_lat),
        (x: 2.3522 + half_lon, y: 48.8566 - half_lat),
        (x: 2.3522 + half_lon, y: 48.8566 + half_lat),
        (x: 2.3522 - half_lon, y: 48.8566 + half_lat),
        (x: 2.3522 - half_lon, y: 48.8566 - half_lat),
    ]
}

async fn ignite_state(label: &str, max_points: usize) -> (AppState, tempfile::TempDir) {
    let workspace = tempfile::tempdir().unwrap();
    let database_url = format!("file:{label}?mode=memory&cache=shared");
    let database_client = TursoClient::connect(&database_url, None)
        .await
        .expect("CRITICAL_FAULT: Failed to anchor in-memory ledger.");

    let mut config = test_config(&database_url, workspace.path());
    config.grid.max_points = max_points;

    let state = OrchestratorKernel::ignite_with_collaborators(
        config,
        database_client,
        Arc::new(ScriptedCatalog::empty()),
        Arc::new(ScriptedProcessor::accepting(None)),
    )
    .application_shared_state;

    (state, workspace)
}

async fn register_asset(state: &AppState, boundary: &Polygon<f64>) -> Uuid {
    let asset = Infrastructure {
        id: Uuid::new_v4(),
        owner_identity: "architect-auditor".into(),
        display_name: "Architect Dam".into(),
        boundary_wkt: boundary.wkt_string(),
    };
    state.infrastructures().unwrap().register(&asset).await.unwrap();
    asset.id
}

#[tokio::test]
async fn estimate_is_pure_and_persists_nothing() {
    let (state, _workspace) = ignite_state("mem_architect_pure", 200_000).await;
    let architect = GridArchitect::new(state.clone());

    let boundary = paris_square(100.0);
    let estimate = architect.estimate(&boundary, 5.0).expect("acceptance estimate");
    assert_eq!(estimate.point_count, 400);

    // Cero filas: la estimación jamás toca el sustrato.
    let asset_id = register_asset(&state, &boundary).await;
    assert_eq!(state.points().unwrap().count_for_infrastructure(asset_id).await.unwrap(), 0);
}

#[tokio::test]
async fn point_ceiling_is_inclusive_at_the_exact_count() {
    // Techo == 400: la retícula de aceptación pasa justa.
    let (state, _workspace) = ignite_state("mem_architect_exact", 400).await;
    let architect = GridArchitect::new(state.clone());

    let boundary = paris_square(100.0);
    let asset_id = register_asset(&state, &boundary).await;

    let receipt = architect.generate(asset_id, &boundary, 5.0).await.expect("at the ceiling");
    assert_eq!(receipt.point_count, 400);
    assert_eq!(state.points().unwrap().count_for_infrastructure(asset_id).await.unwrap(), 400);
}

#[tokio::test]
async fn one_point_beyond_the_ceiling_is_refused_without_rows() {
    let (state, _workspace) = ignite_state("mem_architect_beyond", 399).await;
    let architect = GridArchitect::new(state.clone());

    let boundary = paris_square(100.0);
    let asset_id = register_asset(&state, &boundary).await;

    match architect.generate(asset_id, &boundary, 5.0).await {
        Err(OrchestratorError::PointLimitExceeded { projected, ceiling }) => {
            assert_eq!(projected, 400);
            assert_eq!(ceiling, 399);
        }
        other => panic!("expected PointLimitExceeded, got {other:?}"),
    }

    assert_eq!(state.points().unwrap().count_for_infrastructure(asset_id).await.unwrap(), 0);
}

#[tokio::test]
async fn unknown_assets_are_refused_before_any_survey() {
    let (state, _workspace) = ignite_state("mem_architect_unknown", 200_000).await;
    let architect = GridArchitect::new(state);

    let verdict = architect.generate(Uuid::new_v4(), &paris_square(100.0), 5.0).await;
    assert!(matches!(verdict, Err(OrchestratorError::InfrastructureNotFound)));
}

#[tokio::test]
async fn oversized_boundaries_are_refused_with_area_semantics() {
    let (state, _workspace) = ignite_state("mem_architect_area", 200_000).await;
    let architect = GridArchitect::new(state);

    // 3 km × 3 km = 9 km² sobre el techo de 5 km².
    let verdict = architect.estimate(&paris_square(3_000.0), 5.0);
    assert!(matches!(
        verdict,
        Err(OrchestratorError::Grid(tellus_core_geogrid::GridFault::AreaTooLarge { .. }))
    ));
}
