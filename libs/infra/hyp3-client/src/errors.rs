// [libs/infra/hyp3-client/src/errors.rs]
/*!
 * =================================================================
 * APARATO: PROCESSOR ERROR CATALOG (V2.0)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: CATALOGACIÓN SEMÁNTICA DE FALLOS DEL PROCESADOR
 * =================================================================
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Hyp3Error {
    /// Rechazo no reintentable en el sometimiento; el mensaje aguas
    /// arriba se retiene para el solicitante.
    #[error("[L3_PROCESSOR_FAULT]: UPSTREAM_REJECTED -> {0}")]
    Rejected(String),

    /// Fallo transitorio de red o de servicio; elegible a reintento.
    #[error("[L3_PROCESSOR_FAULT]: UPSTREAM_TRANSIENT -> {0}")]
    Transient(String),

    /// La respuesta llegó pero su estructura fue rechazada.
    #[error("[L3_PROCESSOR_FAULT]: MALFORMED_RESPONSE -> {0}")]
    MalformedResponse(String),

    /// Descarga agotada tras los reintentos internos.
    #[error("[L3_PROCESSOR_FAULT]: DOWNLOAD_EXHAUSTED -> {0}")]
    DownloadFailed(String),

    /// Fallo físico al escribir el producto en disco.
    #[error("[L3_PROCESSOR_IO_FAULT]: {0}")]
    IoFault(#[from] std::io::Error),
}
