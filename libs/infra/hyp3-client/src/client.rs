// [libs/infra/hyp3-client/src/client.rs]
/*!
 * =================================================================
 * APARATO: INSAR PROCESSOR UPLINK (V2.2 - BEARER SEALED)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: SOMETIMIENTO, SONDEO Y DESCARGA DE PRODUCTOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DUAL SESSION: Canal de control con timeout corto (30 s) y canal
 *    de descarga con timeout extendido para productos de cientos de MB.
 * 2. WHOLE-FILE RETRY: Cada intento de descarga re-trae el archivo
 *    completo; tres intentos con retroceso exponencial.
 * =================================================================
 */

use crate::errors::Hyp3Error;
use crate::models::{
    InterferogramRequest, JobsEnvelope, SubmissionEntry, SubmissionEnvelope,
    SubmissionParameters, UpstreamSnapshot,
};
use crate::InsarProcessor;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tellus_domain_models::ProductFile;
use tokio::fs;
use tracing::{info, instrument, warn};

const CONTROL_CALL_TIMEOUT_SECONDS: u64 = 30;
const DOWNLOAD_RETRY_CEILING: u32 = 3;
const DOWNLOAD_BACKOFF_BASE_MS: u64 = 1_000;
const INSAR_JOB_TYPE: &str = "INSAR_GAMMA";
const RANGE_AZIMUTH_LOOKS: &str = "20x4";

pub struct Hyp3Client {
    control_session_client: Client,
    download_session_client: Client,
    processor_base_endpoint: String,
}

impl Hyp3Client {
    /// Inicializa ambos canales con el token Bearer sellado en las
    /// cabeceras por defecto.
    pub fn new(base_url: String, bearer_token: String, download_timeout_ms: u64) -> Self {
        let mut header_map = reqwest::header::HeaderMap::new();
        let auth_value =
            reqwest::header::HeaderValue::from_str(&format!("Bearer {}", bearer_token))
                .expect("CRITICAL: Invalid Authentication Token Format.");
        header_map.insert(reqwest::header::AUTHORIZATION, auth_value);

        Self {
            control_session_client: Client::builder()
                .default_headers(header_map.clone())
                .user_agent("Tellus-Monitoring-Plane/V2")
                .timeout(Duration::from_secs(CONTROL_CALL_TIMEOUT_SECONDS))
                .build()
                .expect("FATAL: Control client initialization failed."),
            download_session_client: Client::builder()
                .default_headers(header_map)
                .user_agent("Tellus-Monitoring-Plane/V2")
                .timeout(Duration::from_millis(download_timeout_ms))
                .build()
                .expect("FATAL: Download client initialization failed."),
            processor_base_endpoint: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Un intento físico de descarga: blob completo a disco.
    async fn execute_download_attempt(
        &self,
        file: &ProductFile,
        local_destination: &Path,
    ) -> Result<(), Hyp3Error> {
        let network_response = self
            .download_session_client
            .get(&file.url)
            .send()
            .await
            .map_err(|fault| Hyp3Error::Transient(fault.to_string()))?;

        if network_response.status() != StatusCode::OK {
            return Err(Hyp3Error::Transient(format!(
                "PRODUCT_FETCH_ERR_{}",
                network_response.status()
            )));
        }

        let binary_blob = network_response
            .bytes()
            .await
            .map_err(|fault| Hyp3Error::Transient(fault.to_string()))?;

        fs::write(local_destination, binary_blob).await.map_err(Hyp3Error::IoFault)?;
        Ok(())
    }
}

#[async_trait]
impl InsarProcessor for Hyp3Client {
    /// POST /jobs con el par; un rechazo HTTP es no reintentable y
    /// retiene el cuerpo del mensaje aguas arriba.
    #[instrument(skip(self, request))]
    async fn submit_pair(&self, request: &InterferogramRequest) -> Result<String, Hyp3Error> {
        let target_url = format!("{}/jobs", self.processor_base_endpoint);

        let submission = SubmissionEnvelope {
            jobs: vec![SubmissionEntry {
                name: request.job_name.clone(),
                job_type: INSAR_JOB_TYPE,
                job_parameters: SubmissionParameters {
                    granules: [
                        request.reference_granule.clone(),
                        request.secondary_granule.clone(),
                    ],
                    looks: RANGE_AZIMUTH_LOOKS,
                    include_los_displacement: true,
                    include_displacement_maps: true,
                },
            }],
        };

        let network_response = self
            .control_session_client
            .post(&target_url)
            .json(&submission)
            .send()
            .await
            .map_err(|fault| Hyp3Error::Transient(fault.to_string()))?;

        let status = network_response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            let upstream_message = network_response.text().await.unwrap_or_default();
            return Err(Hyp3Error::Rejected(format!("HTTP_{status}: {upstream_message}")));
        }

        let envelope: JobsEnvelope = network_response
            .json()
            .await
            .map_err(|fault| Hyp3Error::MalformedResponse(fault.to_string()))?;

        let accepted_record = envelope
            .jobs
            .into_iter()
            .next()
            .ok_or_else(|| Hyp3Error::MalformedResponse("EMPTY_JOBS_ENVELOPE".into()))?;

        info!(
            "🛰️  [SUBMISSION]: Pair accepted upstream as [{}].",
            accepted_record.job_id
        );
        Ok(accepted_record.job_id)
    }

    /// GET /jobs?job_id= y mapeo a variantes cerradas.
    #[instrument(skip(self))]
    async fn fetch_status(&self, upstream_id: &str) -> Result<UpstreamSnapshot, Hyp3Error> {
        let target_url = format!("{}/jobs", self.processor_base_endpoint);

        let network_response = self
            .control_session_client
            .get(&target_url)
            .query(&[("job_id", upstream_id)])
            .send()
            .await
            .map_err(|fault| Hyp3Error::Transient(fault.to_string()))?;

        if !network_response.status().is_success() {
            return Err(Hyp3Error::Transient(format!(
                "STATUS_FETCH_ERR_{}",
                network_response.status()
            )));
        }

        let envelope: JobsEnvelope = network_response
            .json()
            .await
            .map_err(|fault| Hyp3Error::MalformedResponse(fault.to_string()))?;

        let record = envelope
            .jobs
            .into_iter()
            .find(|job| job.job_id == upstream_id)
            .ok_or_else(|| Hyp3Error::MalformedResponse("UPSTREAM_ID_VANISHED".into()))?;

        match record.status_code.as_str() {
            "PENDING" => Ok(UpstreamSnapshot::Pending),
            "RUNNING" => Ok(UpstreamSnapshot::Running),
            "SUCCEEDED" => Ok(UpstreamSnapshot::Succeeded {
                files: record.files.into_iter().map(Into::into).collect(),
            }),
            "FAILED" => Ok(UpstreamSnapshot::Failed {
                message: record
                    .error_message
                    .unwrap_or_else(|| "UPSTREAM_REPORTED_FAILURE".into()),
            }),
            other => Err(Hyp3Error::MalformedResponse(format!(
                "UNKNOWN_STATUS_CODE: {other}"
            ))),
        }
    }

    /// Descarga con reintentos de archivo completo y retroceso
    /// exponencial; devuelve la ruta local del producto.
    #[instrument(skip(self, file, destination_dir))]
    async fn download_product(
        &self,
        file: &ProductFile,
        destination_dir: &Path,
    ) -> Result<PathBuf, Hyp3Error> {
        if !destination_dir.exists() {
            fs::create_dir_all(destination_dir).await.map_err(Hyp3Error::IoFault)?;
        }

        let local_destination = destination_dir.join(&file.filename);
        let mut last_fault: Option<Hyp3Error> = None;

        for attempt in 0..DOWNLOAD_RETRY_CEILING {
            match self.execute_download_attempt(file, &local_destination).await {
                Ok(()) => {
                    info!(
                        "🌊 [PRODUCT_LANDED]: [{}] secured at attempt {}.",
                        file.filename,
                        attempt + 1
                    );
                    return Ok(local_destination);
                }
                Err(fault) => {
                    warn!(
                        "⚠️  [DOWNLOAD_RETRY]: [{}] attempt {} failed: {}",
                        file.filename,
                        attempt + 1,
                        fault
                    );
                    last_fault = Some(fault);

                    if attempt + 1 < DOWNLOAD_RETRY_CEILING {
                        let backoff_ms = DOWNLOAD_BACKOFF_BASE_MS << attempt;
                        tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    }
                }
            }
        }

        Err(Hyp3Error::DownloadFailed(format!(
            "{}: {}",
            file.filename,
            last_fault.map(|fault| fault.to_string()).unwrap_or_default()
        )))
    }
}
