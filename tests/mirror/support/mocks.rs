// [tests/mirror/support/mocks.rs]
/*!
 * =================================================================
 * APARATO: SCRIPTED COLLABORATOR DOUBLES (V1.3)
 * CLASIFICACIÓN: PROVING GROUNDS // SOPORTE COMPARTIDO
 * RESPONSABILIDAD: DOBLES DETERMINISTAS DE CATÁLOGO Y PROCESADOR
 *
 * Los dobles implementan exactamente las capacidades estrechas que el
 * plano de control consume; las respuestas se programan por guion.
 * =================================================================
 */

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;
use tellus_domain_models::{GranuleRecord, ProductFile};
use tellus_infra_catalog::{CatalogError, GranuleCatalog, GranuleQuery};
use tellus_infra_hyp3::{Hyp3Error, InsarProcessor, InterferogramRequest, UpstreamSnapshot};
use tellus_orchestrator::prelude::ControlPlaneConfig;

// --- FÁBRICA DE CONFIGURACIÓN DE PRUEBA ---

/// Configuración acelerada: retrocesos de milisegundos y memoria RAM.
pub fn test_config(database_url: &str, working_dir: &Path) -> ControlPlaneConfig {
    use tellus_domain_pairing::PairPolicy;
    use tellus_orchestrator::config::{GridSettings, OrchestratorSettings, SamplerSettings};

    ControlPlaneConfig {
        grid: GridSettings {
            max_area_km2: 5.0,
            max_points: 200_000,
            default_spacing_m: 5.0,
            max_abs_latitude_deg: 85.0,
        },
        pairs: PairPolicy::default(),
        orchestrator: OrchestratorSettings {
            worker_count: 1,
            poll_base_ms: 10,
            poll_max_ms: 80,
            max_attempts: 50,
            job_wall_clock_ms: 3_600_000,
            upstream_rate_per_min: 10_000,
        },
        sampler: SamplerSettings {
            min_coherence: 0.3,
            download_timeout_ms: 5_000,
            max_raster_bytes: 50 * 1024 * 1024,
        },
        storage_bulk_chunk_size: 1_000,
        working_dir: working_dir.to_path_buf(),
        database_url: database_url.to_string(),
        database_token: None,
        catalog_base_url: "http://catalog.invalid".into(),
        processor_base_url: "http://processor.invalid".into(),
        processor_bearer_token: "observer".into(),
    }
}

// --- FÁBRICA DE GRANULOS ---

/// Granulo sintético con fecha base 2026-01-01 + offset en días.
pub fn synthetic_granule(name: &str, day_offset: i64, orbital_path: Option<i64>) -> GranuleRecord {
    let base = Utc.with_ymd_and_hms(2026, 1, 1, 6, 0, 0).unwrap();
    let start_time = base + Duration::days(day_offset);

    GranuleRecord {
        name: name.to_string(),
        start_time,
        stop_time: start_time + Duration::seconds(27),
        orbital_path,
        frame: Some(120),
        polarization: Some("VV+VH".into()),
        flight_direction: Some("ASCENDING".into()),
        footprint_wkt: None,
        perpendicular_baseline_m: None,
    }
}

// --- DOBLE DE CATÁLOGO ---

pub struct ScriptedCatalog {
    pub granules: Vec<GranuleRecord>,
    pub unavailable: bool,
    pub search_calls: AtomicUsize,
}

impl ScriptedCatalog {
    pub fn with_granules(granules: Vec<GranuleRecord>) -> Self {
        Self { granules, unavailable: false, search_calls: AtomicUsize::new(0) }
    }

    pub fn empty() -> Self {
        Self::with_granules(Vec::new())
    }

    pub fn severed() -> Self {
        Self { granules: Vec::new(), unavailable: true, search_calls: AtomicUsize::new(0) }
    }
}

#[async_trait]
impl GranuleCatalog for ScriptedCatalog {
    async fn search_slc_granules(
        &self,
        _query: &GranuleQuery,
    ) -> Result<Vec<GranuleRecord>, CatalogError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(CatalogError::Unavailable("SCRIPTED_SEVERANCE".into()));
        }
        Ok(self.granules.clone())
    }
}

// --- DOBLE DE PROCESADOR ---

#[derive(Default)]
pub struct ScriptedProcessor {
    /// Mensaje de rechazo al someter; None acepta con IDs secuenciales.
    pub rejection_message: Option<String>,
    /// Guiones de estado por identificador aguas arriba (FIFO).
    status_scripts: Mutex<HashMap<String, Vec<UpstreamSnapshot>>>,
    /// Directorio de productos pre-forjados para las "descargas".
    pub products_dir: Option<PathBuf>,
    /// Sufijo cuya descarga colapsa (agotamiento simulado).
    poisoned_suffix: Mutex<Option<String>>,
    submissions: AtomicU32,
    pub status_calls: AtomicUsize,
}

impl ScriptedProcessor {
    pub fn accepting(products_dir: Option<PathBuf>) -> Self {
        Self { products_dir, ..Self::default() }
    }

    pub fn rejecting(message: &str) -> Self {
        Self { rejection_message: Some(message.to_string()), ..Self::default() }
    }

    /// Programa la secuencia de estados de un trabajo aguas arriba;
    /// el último estado del guion se repite indefinidamente.
    pub fn script_statuses(&self, upstream_id: &str, script: Vec<UpstreamSnapshot>) {
        self.status_scripts
            .lock()
            .expect("status script lock")
            .insert(upstream_id.to_string(), script);
    }

    /// Envenena las descargas cuyo nombre termina con el sufijo dado.
    pub fn poison_suffix(&self, suffix: &str) {
        *self.poisoned_suffix.lock().expect("poison lock") = Some(suffix.to_string());
    }
}

#[async_trait]
impl InsarProcessor for ScriptedProcessor {
    async fn submit_pair(&self, _request: &InterferogramRequest) -> Result<String, Hyp3Error> {
        if let Some(message) = &self.rejection_message {
            return Err(Hyp3Error::Rejected(message.clone()));
        }
        let sequence = self.submissions.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("UP-{sequence}"))
    }

    async fn fetch_status(&self, upstream_id: &str) -> Result<UpstreamSnapshot, Hyp3Error> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);

        let mut scripts = self.status_scripts.lock().expect("status script lock");
        let Some(script) = scripts.get_mut(upstream_id) else {
            return Ok(UpstreamSnapshot::Running);
        };

        if script.len() > 1 {
            Ok(script.remove(0))
        } else {
            script.first().cloned().ok_or_else(|| {
                Hyp3Error::MalformedResponse("EMPTY_SCRIPT".into())
            })
        }
    }

    async fn download_product(
        &self,
        file: &ProductFile,
        destination_dir: &Path,
    ) -> Result<PathBuf, Hyp3Error> {
        if let Some(poisoned) = self.poisoned_suffix.lock().expect("poison lock").clone() {
            if file.filename.ends_with(poisoned.as_str()) {
                return Err(Hyp3Error::DownloadFailed(format!(
                    "{}: SCRIPTED_EXHAUSTION",
                    file.filename
                )));
            }
        }

        let source_dir = self
            .products_dir
            .as_ref()
            .ok_or_else(|| Hyp3Error::DownloadFailed("NO_PRODUCTS_DIR".into()))?;

        if !destination_dir.exists() {
            std::fs::create_dir_all(destination_dir).map_err(Hyp3Error::IoFault)?;
        }

        let destination = destination_dir.join(&file.filename);
        std::fs::copy(source_dir.join(&file.filename), &destination)
            .map_err(Hyp3Error::IoFault)?;
        Ok(destination)
    }
}

/// Descriptor de producto sintético (la URL jamás se visita).
pub fn product_file(filename: &str) -> ProductFile {
    ProductFile {
        url: format!("http://processor.invalid/products/{filename}"),
        filename: filename.to_string(),
        size_bytes: Some(1_024),
    }
}
