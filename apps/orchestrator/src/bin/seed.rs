// [apps/orchestrator/src/bin/seed.rs]
/*!
 * =================================================================
 * APARATO: DEMO ASSET SEEDER (V4.1)
 * CLASIFICACIÓN: OPERATIONS TOOL (ESTRATO L4)
 * RESPONSABILIDAD: SIEMBRA DE UN ACTIVO DE DEMOSTRACIÓN CON RETÍCULA
 *
 * Provisiona un cuadrado de 100 m centrado en París con la retícula
 * de 5 m (400 puntos), material suficiente para ejercitar el ciclo
 * completo en entornos de desarrollo.
 * =================================================================
 */

use dotenvy::dotenv;
use geo::polygon;
use std::sync::Arc;
use tellus_infra_catalog::{AsfCatalogClient, CatalogRetryPolicy, GranuleCatalog};
use tellus_infra_db::TursoClient;
use tellus_infra_hyp3::{Hyp3Client, InsarProcessor};
use tellus_orchestrator::prelude::*;
use tellus_shared_heimdall::init_tracing;
use tracing::info;
use uuid::Uuid;
use wkt::ToWkt;

const DEMO_CENTER_LONGITUDE: f64 = 2.3522;
const DEMO_CENTER_LATITUDE: f64 = 48.8566;
const DEMO_HALF_SIDE_M: f64 = 50.0;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_tracing("tellus-seed");

    let configuration = ControlPlaneConfig::from_environment();
    let spacing_m = configuration.grid.default_spacing_m;

    let database_client =
        TursoClient::connect(&configuration.database_url, configuration.database_token.clone())
            .await?;
    let catalog: Arc<dyn GranuleCatalog> = Arc::new(AsfCatalogClient::new(
        configuration.catalog_base_url.clone(),
        CatalogRetryPolicy::default(),
    ));
    let processor: Arc<dyn InsarProcessor> = Arc::new(Hyp3Client::new(
        configuration.processor_base_url.clone(),
        configuration.processor_bearer_token.clone(),
        configuration.sampler.download_timeout_ms,
    ));

    let kernel = OrchestratorKernel::ignite_with_collaborators(
        configuration,
        database_client,
        catalog,
        processor,
    );
    let state = kernel.application_shared_state;

    // Cuadrado de demostración centrado en París.
    let half_side_lat = DEMO_HALF_SIDE_M / 111_320.0;
    let half_side_lon =
        DEMO_HALF_SIDE_M / (DEMO_CENTER_LATITUDE.to_radians().cos() * 111_320.0);

    let boundary = polygon![
        (x: DEMO_CENTER_LONGITUDE - half_side_lon, y: DEMO_CENTER_LATITUDE - half_side_lat),
        (x: DEMO_CENTER_LONGITUDE + half_side_lon, y: DEMO_CENTER_LATITUDE - half_side_lat),
        (x: DEMO_CENTER_LONGITUDE + half_side_lon, y: DEMO_CENTER_LATITUDE + half_side_lat),
        (x: DEMO_CENTER_LONGITUDE - half_side_lon, y: DEMO_CENTER_LATITUDE + half_side_lat),
        (x: DEMO_CENTER_LONGITUDE - half_side_lon, y: DEMO_CENTER_LATITUDE - half_side_lat),
    ];

    let demo_asset = tellus_domain_models::Infrastructure {
        id: Uuid::new_v4(),
        owner_identity: "seed-operator".into(),
        display_name: "Demo Bridge (Paris)".into(),
        boundary_wkt: boundary.wkt_string(),
    };

    state.infrastructures()?.register(&demo_asset).await?;

    let architect = GridArchitect::new(state.clone());
    let estimate = architect.estimate(&boundary, spacing_m)?;
    info!(
        "🗺️  [SEED]: Estimate -> {} points over {:.6} km2 (cost {:.2} credits).",
        estimate.point_count, estimate.area_km2, estimate.estimated_cost_credits
    );

    let receipt = architect.generate(demo_asset.id, &boundary, spacing_m).await?;
    info!(
        "✅ [SEED]: Asset [{}] provisioned with {} points in {} ms.",
        demo_asset.id, receipt.point_count, receipt.duration_ms
    );

    Ok(())
}
