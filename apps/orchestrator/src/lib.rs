// [apps/orchestrator/src/lib.rs]
/*!
 * =================================================================
 * APARATO: ORCHESTRATOR LIBRARY HUB (V4.0)
 * CLASIFICACIÓN: APPLICATION SHELL (ESTRATO L4)
 * RESPONSABILIDAD: EXPOSICIÓN NOMINAL DEL PLANO DE CONTROL
 * =================================================================
 */

pub mod config;
pub mod errors;
pub mod kernel;
pub mod services;
pub mod state;

/// Preludio nominal del plano de control.
pub mod prelude {
    pub use crate::config::ControlPlaneConfig;
    pub use crate::errors::OrchestratorError;
    pub use crate::kernel::OrchestratorKernel;
    pub use crate::services::{
        GridArchitect, HarvestFault, MissionDispatch, PairScout, PollSentinel, RasterHarvest,
    };
    pub use crate::state::AppState;
}
