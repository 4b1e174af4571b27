// [libs/infra/hyp3-client/src/lib.rs]
/*!
 * =================================================================
 * APARATO: INSAR PROCESSOR HUB (V2.0)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: EXPOSICIÓN NOMINAL DEL PROCESADOR EXTERNO
 * =================================================================
 */

pub mod client;
pub mod errors;
pub mod models;

pub use client::Hyp3Client;
pub use errors::Hyp3Error;
pub use models::{InterferogramRequest, UpstreamSnapshot};

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tellus_domain_models::ProductFile;

/// Capacidad estrecha del procesador: someter, sondear y descargar.
///
/// El plano de control habla únicamente a través de este contrato;
/// las pruebas inyectan dobles deterministas.
#[async_trait]
pub trait InsarProcessor: Send + Sync {
    /// Somete un par y devuelve el identificador asignado aguas arriba.
    async fn submit_pair(&self, request: &InterferogramRequest) -> Result<String, Hyp3Error>;

    /// Estado actual del trabajo aguas arriba.
    async fn fetch_status(&self, upstream_id: &str) -> Result<UpstreamSnapshot, Hyp3Error>;

    /// Descarga un producto al directorio dado; devuelve la ruta local.
    async fn download_product(
        &self,
        file: &ProductFile,
        destination_dir: &Path,
    ) -> Result<PathBuf, Hyp3Error>;
}
