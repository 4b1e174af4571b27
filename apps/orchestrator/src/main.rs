// [apps/orchestrator/src/main.rs]
/*!
 * =================================================================
 * APARATO: ORCHESTRATOR MAIN ENTRY POINT (V4.2 - HEADLESS MASTER)
 * CLASIFICACIÓN: APPLICATION SHELL (ESTRATO L4)
 * RESPONSABILIDAD: BOOTSTRAP DE INFRAESTRUCTURA E IGNICIÓN SEGURA
 *
 * # Mathematical Proof (Deterministic Ignition):
 * El orden es estricto: entorno -> observabilidad -> runtime ->
 * configuración -> kernel. La resurrección de misiones vivas ocurre
 * dentro del kernel ANTES de desplegar el pool de sondeo, evitando
 * que un worker compita con la recuperación.
 * =================================================================
 */

use tellus_orchestrator::prelude::*;

use dotenvy::dotenv;
use tellus_shared_heimdall::init_tracing;
use tracing::info;

/// Punto de ignición del binario del plano de control.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. CARGA DE ENTORNO SOBERANO
    dotenv().ok();

    // 2. INICIALIZACIÓN DE OBSERVABILIDAD NEURAL (HEIMDALL)
    init_tracing("tellus-orchestrator");

    // 3. RUNTIME SOBERANO MULTIHILO
    let runtime_orchestrator = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime_orchestrator.block_on(async {
        info!("🛰️  [COMMAND_CENTER]: Global ignition sequence starting...");

        // 4. ADQUISICIÓN DE COORDENADAS TÁCTICAS
        let configuration = ControlPlaneConfig::from_environment();

        // 5. CONSTRUCCIÓN DEL KERNEL SOBERANO
        let kernel_instance = OrchestratorKernel::ignite(configuration).await;

        // 6. IGNICIÓN DE OPERACIONES DEL PLANO DE CONTROL
        kernel_instance.launch_sovereign_operations().await;

        Ok(())
    })
}
