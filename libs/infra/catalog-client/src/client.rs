// [libs/infra/catalog-client/src/client.rs]
/*!
 * =================================================================
 * APARATO: SENTINEL-1 CATALOG UPLINK (V2.1 - BACKOFF SHIELDED)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: BÚSQUEDA DE GRANULOS SLC CON REINTENTOS ACOTADOS
 *
 * El endpoint acepta GET parametrizado (plataforma, nivel SLC, modo
 * IW, bbox lon/lat, ventana temporal) y responde JSON sin
 * autenticación. Los fallos transitorios se reintentan con retroceso
 * exponencial hasta el techo; después el fallo es CATALOG_UNAVAILABLE.
 * =================================================================
 */

use crate::errors::CatalogError;
use crate::GranuleCatalog;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tellus_domain_models::{DateWindow, GranuleRecord};
use tracing::{info, instrument, warn};

const STATUS_CALL_TIMEOUT_SECONDS: u64 = 30;

/// Consulta de granulos sobre el AOI y la ventana de fechas.
#[derive(Debug, Clone, Copy)]
pub struct GranuleQuery {
    /// Caja envolvente (min_lon, min_lat, max_lon, max_lat) en WGS84.
    pub bbox: (f64, f64, f64, f64),
    pub window: DateWindow,
}

/// Política de reintentos del enlace de catálogo.
#[derive(Debug, Clone, Copy)]
pub struct CatalogRetryPolicy {
    pub max_attempts: u32,
    pub backoff_base_ms: u64,
}

impl Default for CatalogRetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 4, backoff_base_ms: 500 }
    }
}

pub struct AsfCatalogClient {
    network_session_client: Client,
    catalog_base_endpoint: String,
    retry_policy: CatalogRetryPolicy,
}

// --- CONTRATO DE CABLE DEL CATÁLOGO ---

#[derive(Deserialize)]
struct CatalogSearchEnvelope {
    results: Vec<CatalogGranuleRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogGranuleRecord {
    granule_name: String,
    start_time: DateTime<Utc>,
    stop_time: DateTime<Utc>,
    path: Option<i64>,
    frame: Option<i64>,
    polarization: Option<String>,
    flight_direction: Option<String>,
    wkt: Option<String>,
    perpendicular_baseline: Option<f64>,
}

impl AsfCatalogClient {
    pub fn new(base_url: String, retry_policy: CatalogRetryPolicy) -> Self {
        Self {
            network_session_client: Client::builder()
                .user_agent("Tellus-Monitoring-Plane/V2")
                .timeout(Duration::from_secs(STATUS_CALL_TIMEOUT_SECONDS))
                .build()
                .expect("FATAL: Catalog client initialization failed."),
            catalog_base_endpoint: base_url.trim_end_matches('/').to_string(),
            retry_policy,
        }
    }

    /// Un intento físico de búsqueda contra el endpoint.
    async fn execute_search_attempt(
        &self,
        query: &GranuleQuery,
    ) -> Result<Vec<GranuleRecord>, CatalogError> {
        let (min_lon, min_lat, max_lon, max_lat) = query.bbox;
        let target_url = format!("{}/services/search/param", self.catalog_base_endpoint);

        let network_response = self
            .network_session_client
            .get(&target_url)
            .query(&[
                ("platform", "Sentinel-1".to_string()),
                ("processingLevel", "SLC".to_string()),
                ("beamMode", "IW".to_string()),
                ("bbox", format!("{min_lon},{min_lat},{max_lon},{max_lat}")),
                ("start", format!("{}T00:00:00Z", query.window.start)),
                ("end", format!("{}T23:59:59Z", query.window.end)),
                ("output", "jsonlite".to_string()),
            ])
            .send()
            .await
            .map_err(|fault| CatalogError::Unavailable(fault.to_string()))?;

        if !network_response.status().is_success() {
            return Err(CatalogError::Unavailable(format!(
                "HTTP_{}",
                network_response.status()
            )));
        }

        let envelope: CatalogSearchEnvelope = network_response
            .json()
            .await
            .map_err(|fault| CatalogError::MalformedResponse(fault.to_string()))?;

        Ok(envelope
            .results
            .into_iter()
            .map(|record| GranuleRecord {
                name: record.granule_name,
                start_time: record.start_time,
                stop_time: record.stop_time,
                orbital_path: record.path,
                frame: record.frame,
                polarization: record.polarization,
                flight_direction: record.flight_direction,
                footprint_wkt: record.wkt,
                perpendicular_baseline_m: record.perpendicular_baseline,
            })
            .collect())
    }
}

#[async_trait]
impl GranuleCatalog for AsfCatalogClient {
    /// Búsqueda con retroceso exponencial acotado.
    #[instrument(skip(self, query))]
    async fn search_slc_granules(
        &self,
        query: &GranuleQuery,
    ) -> Result<Vec<GranuleRecord>, CatalogError> {
        let mut last_fault: Option<CatalogError> = None;

        for attempt in 0..self.retry_policy.max_attempts {
            match self.execute_search_attempt(query).await {
                Ok(granules) => {
                    info!(
                        "📡 [CATALOG]: {} SLC granules located (attempt {}).",
                        granules.len(),
                        attempt + 1
                    );
                    return Ok(granules);
                }
                Err(fault) => {
                    warn!(
                        "⚠️  [CATALOG_RETRY]: Attempt {} failed: {}",
                        attempt + 1,
                        fault
                    );
                    last_fault = Some(fault);

                    if attempt + 1 < self.retry_policy.max_attempts {
                        let backoff_ms = self.retry_policy.backoff_base_ms << attempt;
                        tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    }
                }
            }
        }

        Err(last_fault
            .unwrap_or_else(|| CatalogError::Unavailable("RETRY_CEILING_VOID".into())))
    }
}
