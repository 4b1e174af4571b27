// [libs/infra/hyp3-client/src/models.rs]
/*!
 * =================================================================
 * APARATO: PROCESSOR WIRE CONTRACTS (V2.1 - TAGGED VARIANTS)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: CONTRATOS DE CABLE Y ESTADO ETIQUETADO
 *
 * El estado aguas arriba se modela como variantes cerradas; el JSON
 * dinámico muere en este estrato y jamás atraviesa el dominio.
 * =================================================================
 */

use serde::{Deserialize, Serialize};
use tellus_domain_models::ProductFile;

/// Solicitud de interferograma para un par (referencia, secundaria).
#[derive(Debug, Clone)]
pub struct InterferogramRequest {
    /// Nombre exhibible del trabajo aguas arriba.
    pub job_name: String,
    pub reference_granule: String,
    pub secondary_granule: String,
}

/// Estado del trabajo aguas arriba, ya etiquetado.
#[derive(Debug, Clone)]
pub enum UpstreamSnapshot {
    Pending,
    Running,
    Succeeded { files: Vec<ProductFile> },
    Failed { message: String },
}

// --- CONTRATO DE CABLE (SOMETIMIENTO) ---

#[derive(Serialize)]
pub(crate) struct SubmissionEnvelope {
    pub jobs: Vec<SubmissionEntry>,
}

#[derive(Serialize)]
pub(crate) struct SubmissionEntry {
    pub name: String,
    pub job_type: &'static str,
    pub job_parameters: SubmissionParameters,
}

#[derive(Serialize)]
pub(crate) struct SubmissionParameters {
    pub granules: [String; 2],
    pub looks: &'static str,
    pub include_los_displacement: bool,
    pub include_displacement_maps: bool,
}

// --- CONTRATO DE CABLE (RESPUESTAS) ---

#[derive(Deserialize)]
pub(crate) struct JobsEnvelope {
    pub jobs: Vec<UpstreamJobRecord>,
}

#[derive(Deserialize)]
pub(crate) struct UpstreamJobRecord {
    pub job_id: String,
    pub status_code: String,
    #[serde(default)]
    pub files: Vec<UpstreamFileRecord>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct UpstreamFileRecord {
    pub url: String,
    pub filename: String,
    #[serde(default)]
    pub size: Option<u64>,
}

impl From<UpstreamFileRecord> for ProductFile {
    fn from(record: UpstreamFileRecord) -> Self {
        ProductFile {
            url: record.url,
            filename: record.filename,
            size_bytes: record.size,
        }
    }
}
