// [libs/domain/models-rs/src/job.rs]
/*!
 * =================================================================
 * APARATO: INTERFEROMETRIC MISSION MODELS (V3.1 - CLOSED MACHINE)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: CONTRATO DEL CICLO DE VIDA DE MISIONES InSAR
 *
 * # Mathematical Proof (State Machine Closure):
 * El conjunto de transiciones es cerrado: PENDING -> RUNNING ->
 * PROCESSING -> SUCCEEDED, con salidas laterales de cualquier estado
 * no terminal hacia FAILED o CANCELLED. Toda otra transición es
 * rechazada en el estrato de persistencia mediante guardias de estado.
 * =================================================================
 */

use crate::ModelFault;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Estado interno de una misión interferométrica.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Encolada localmente, aún sin confirmar aguas arriba.
    Pending,
    /// Sometida; el servicio de procesamiento la está ejecutando.
    Running,
    /// El servicio terminó; post-procesamiento local en curso.
    Processing,
    /// Terminal: todas las mediciones persistidas.
    Succeeded,
    /// Terminal: error registrado en la fila.
    Failed,
    /// Terminal: cancelación externa, sin procesar.
    Cancelled,
}

impl JobStatus {
    /// Etiqueta canónica persistida en el Ledger.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "PENDING",
            JobStatus::Running => "RUNNING",
            JobStatus::Processing => "PROCESSING",
            JobStatus::Succeeded => "SUCCEEDED",
            JobStatus::Failed => "FAILED",
            JobStatus::Cancelled => "CANCELLED",
        }
    }

    /// Reconstruye el estado desde su etiqueta persistida.
    pub fn parse(label: &str) -> Result<Self, ModelFault> {
        match label {
            "PENDING" => Ok(JobStatus::Pending),
            "RUNNING" => Ok(JobStatus::Running),
            "PROCESSING" => Ok(JobStatus::Processing),
            "SUCCEEDED" => Ok(JobStatus::Succeeded),
            "FAILED" => Ok(JobStatus::Failed),
            "CANCELLED" => Ok(JobStatus::Cancelled),
            other => Err(ModelFault::UnknownStatus(other.to_string())),
        }
    }

    /// Un estado terminal jamás vuelve a mutar.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed | JobStatus::Cancelled)
    }

    /// Relación cerrada de transiciones válidas.
    pub fn may_transition_to(&self, next: JobStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            JobStatus::Running => matches!(self, JobStatus::Pending | JobStatus::Running),
            JobStatus::Processing => matches!(self, JobStatus::Running),
            JobStatus::Succeeded => matches!(self, JobStatus::Processing),
            JobStatus::Failed | JobStatus::Cancelled => true,
            JobStatus::Pending => false,
        }
    }
}

/// Descriptor de un producto geocodificado emitido aguas arriba.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductFile {
    pub url: String,
    pub filename: String,
    pub size_bytes: Option<u64>,
}

/// Instantánea de una misión interferométrica persistida.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Identificador interno opaco.
    pub id: Uuid,
    pub infrastructure_id: Uuid,
    /// Identificador asignado por el servicio de procesamiento externo.
    pub upstream_id: Option<String>,
    pub status: JobStatus,
    /// Polígono envolvente de la misión, serializado como WKT.
    pub bbox_wkt: String,
    pub reference_granule: String,
    pub secondary_granule: String,
    /// Productos reportados aguas arriba al finalizar.
    pub product_files: Vec<ProductFile>,
    pub error_message: Option<String>,
    /// Sondeos acumulados contra el servicio externo.
    pub retry_count: u32,
    /// Duración del post-procesamiento local (descarga -> ingesta).
    pub processing_ms: Option<u64>,
    /// Misión terminal de la que esta fila es reintento, si aplica.
    pub retry_of: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
    /// Primer instante en que la misión se observó RUNNING.
    pub first_running_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}
