// [libs/domain/models-rs/src/lib.rs]
/*!
 * =================================================================
 * APARATO: DOMAIN MODELS HUB (V3.0 - SINGLE SOURCE OF TRUTH)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: EXPOSICIÓN NOMINAL DE CONTRATOS DEL DOMINIO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ZERO CYCLES: Las entidades persisten únicamente la dirección
 *    hijo -> padre (Point -> Infrastructure, Deformation -> Point/Job);
 *    la navegación inversa se reconstruye por consulta.
 * 2. TAGGED VARIANTS: Estados y CRS modelados como enums cerrados,
 *    nunca como cadenas sueltas atravesando los estratos.
 * =================================================================
 */

pub mod deformation;
pub mod granule;
pub mod infrastructure;
pub mod job;
pub mod pairing;
pub mod point;
pub mod units;

pub use deformation::{DeformationSample, PointMeasurement};
pub use granule::{DateWindow, GranuleRecord};
pub use infrastructure::Infrastructure;
pub use job::{Job, JobStatus, ProductFile};
pub use pairing::PairCandidate;
pub use point::{GridProvisionReceipt, MonitoringPoint};

use thiserror::Error;

/// Fallos de transformación entre representaciones del dominio.
#[derive(Error, Debug)]
pub enum ModelFault {
    /// La geometría WKT almacenada no pudo reconstruirse como polígono.
    #[error("[L2_MODEL_FAULT]: BOUNDARY_WKT_REJECTED -> {0}")]
    MalformedBoundary(String),

    /// La etiqueta de estado persistida no pertenece al conjunto cerrado.
    #[error("[L2_MODEL_FAULT]: UNKNOWN_STATUS_LABEL -> {0}")]
    UnknownStatus(String),
}
