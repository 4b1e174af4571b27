// [apps/orchestrator/src/services/mod.rs]
/*!
 * =================================================================
 * APARATO: CONTROL SERVICES REGISTRY (V4.0)
 * CLASIFICACIÓN: CONTROL SERVICE (ESTRATO L4)
 * RESPONSABILIDAD: REGISTRO NOMINAL DE SERVICIOS DEL PLANO DE CONTROL
 * =================================================================
 */

pub mod grid_architect;
pub mod janitor;
pub mod mission_dispatch;
pub mod pair_scout;
pub mod poll_sentinel;
pub mod raster_harvest;

pub use grid_architect::GridArchitect;
pub use janitor::spawn_janitor;
pub use mission_dispatch::MissionDispatch;
pub use pair_scout::PairScout;
pub use poll_sentinel::PollSentinel;
pub use raster_harvest::{HarvestFault, RasterHarvest};
