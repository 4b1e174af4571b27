// [libs/domain/pairing/src/lib.rs]
/*!
 * =================================================================
 * APARATO: PAIRING STRATEGY HUB (V4.0)
 * CLASIFICACIÓN: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: EXPOSICIÓN NOMINAL DE LA ESTRATEGIA DE PARES
 * =================================================================
 */

pub mod assembler;
pub mod scoring;

pub use assembler::assemble_candidates;
pub use scoring::{baseline_factor, coverage_factor, temporal_factor, PairPolicy};
