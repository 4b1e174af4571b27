// [apps/orchestrator/src/bin/migrator.rs]
/*!
 * =================================================================
 * APARATO: SCHEMA MIGRATOR (V4.0)
 * CLASIFICACIÓN: OPERATIONS TOOL (ESTRATO L4)
 * RESPONSABILIDAD: SINCRONIZACIÓN EXPLÍCITA DEL ESQUEMA Y SALIDA
 *
 * El cliente aplica el esquema idempotente en el enlace; esta
 * herramienta existe para ejecutar la sincronización en despliegues
 * sin levantar el plano de control completo.
 * =================================================================
 */

use dotenvy::dotenv;
use tellus_infra_db::TursoClient;
use tellus_orchestrator::prelude::ControlPlaneConfig;
use tellus_shared_heimdall::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_tracing("tellus-migrator");

    let configuration = ControlPlaneConfig::from_environment();

    info!("🏗️  [MIGRATOR]: Synchronizing schema at [{}]...", configuration.database_url);
    TursoClient::connect(&configuration.database_url, configuration.database_token.clone()).await?;
    info!("✅ [MIGRATOR]: Schema level and certified. Exiting.");

    Ok(())
}
