// [apps/orchestrator/src/services/raster_harvest.rs]
/*!
 * =================================================================
 * APARATO: RASTER HARVEST SERVICE (V4.4 - INLINE PIPELINE)
 * CLASIFICACIÓN: CONTROL SERVICE (ESTRATO L4)
 * RESPONSABILIDAD: DESCARGA, MUESTREO E INGESTA DE UNA MISIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. PARALLEL LANDING: Los productos de la misión descienden en
 *    paralelo (join_all); el muestreo y la ingesta son secuenciales
 *    dentro del mismo paso de sondeo.
 * 2. OMISSION SEMANTICS: Un punto sin muestra (fuera de huella,
 *    NoData, coherencia bajo el piso) simplemente no produce fila.
 * =================================================================
 */

use crate::state::AppState;
use futures::future::join_all;
use std::path::PathBuf;
use tellus_core_raster::{
    acquisition_dates_from_filename, ProductKind, RasterFault, RasterSheet,
};
use tellus_domain_models::units::meters_to_millimeters;
use tellus_domain_models::{Job, PointMeasurement, ProductFile};
use tellus_infra_db::DbError;
use tellus_infra_hyp3::Hyp3Error;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Fallos terminales del post-procesamiento; se sellan como FAILED
/// sobre la fila de misión.
#[derive(Error, Debug)]
pub enum HarvestFault {
    #[error("HARVEST_FAULT: VERTICAL_PRODUCT_MISSING")]
    MissingVerticalProduct,

    #[error("HARVEST_FAULT: UNDATED_PRODUCT -> {0}")]
    UndatedProduct(String),

    #[error("HARVEST_FAULT: DOWNLOAD_COLLAPSED -> {0}")]
    Download(#[from] Hyp3Error),

    #[error("HARVEST_FAULT: CORRUPTED_RASTER -> {0}")]
    CorruptedRaster(#[from] RasterFault),

    #[error("HARVEST_FAULT: STORAGE_COLLAPSED -> {0}")]
    Storage(#[from] DbError),
}

/// Inventario clasificado de los productos de una misión.
struct ProductManifest {
    vertical: ProductFile,
    coherence: Option<ProductFile>,
    line_of_sight: Option<ProductFile>,
}

pub struct RasterHarvest {
    application_state: AppState,
}

impl RasterHarvest {
    pub fn new(application_state: AppState) -> Self {
        Self { application_state }
    }

    /// Ejecuta la secuencia descarga -> muestreo -> ingesta ->
    /// derivación para una misión con productos reportados.
    ///
    /// Devuelve la cantidad de mediciones persistidas.
    #[instrument(skip(self, job, files), fields(job_id = %job.id))]
    pub async fn execute(&self, job: &Job, files: &[ProductFile]) -> Result<usize, HarvestFault> {
        let manifest = classify_products(files)?;

        let acquisition = acquisition_dates_from_filename(&manifest.vertical.filename)
            .ok_or_else(|| HarvestFault::UndatedProduct(manifest.vertical.filename.clone()))?;

        if let Some(los) = &manifest.line_of_sight {
            info!("🛰️  [HARVEST]: LOS product [{}] present; vertical decomposition used.", los.filename);
        }

        // 1. ATERRIZAJE PARALELO DE PRODUCTOS
        let mission_workdir = self.mission_workdir(job);
        let vertical_path = {
            let mut download_tasks = vec![self
                .application_state
                .processor
                .download_product(&manifest.vertical, &mission_workdir)];

            if let Some(coherence_file) = &manifest.coherence {
                download_tasks.push(
                    self.application_state
                        .processor
                        .download_product(coherence_file, &mission_workdir),
                );
            }

            let mut landed_paths = join_all(download_tasks).await;
            // El primer resultado corresponde siempre al vertical.
            let vertical = landed_paths.remove(0)?;
            for extra in landed_paths {
                extra?;
            }
            vertical
        };

        let coherence_path = manifest
            .coherence
            .as_ref()
            .map(|file| mission_workdir.join(&file.filename));

        // 2. DECODIFICACIÓN CON DISCIPLINA DE MEMORIA
        let points = self
            .application_state
            .points()?
            .fetch_for_infrastructure(job.infrastructure_id)
            .await?;

        let query_coordinates: Vec<(f64, f64)> =
            points.iter().map(|point| (point.longitude, point.latitude)).collect();

        let memory_ceiling = self.application_state.config.sampler.max_raster_bytes;
        let vertical_sheet =
            RasterSheet::open_bounded(&vertical_path, memory_ceiling, &query_coordinates)?;
        let coherence_sheet = match &coherence_path {
            Some(path) => Some(RasterSheet::open_bounded(path, memory_ceiling, &query_coordinates)?),
            None => None,
        };

        // 3. MUESTREO PUNTUAL CON SEMÁNTICA DE OMISIÓN
        let coherence_floor = self.application_state.config.sampler.min_coherence;
        let mut measurements: Vec<PointMeasurement> = Vec::with_capacity(points.len());

        for point in &points {
            let Some(displacement_m) =
                vertical_sheet.sample_wgs84(point.longitude, point.latitude)
            else {
                continue;
            };

            let coherence = match &coherence_sheet {
                Some(sheet) => {
                    // Con ráster de coherencia presente, un punto sin
                    // muestra de coherencia no es certificable.
                    let Some(raw_coherence) =
                        sheet.sample_wgs84(point.longitude, point.latitude)
                    else {
                        continue;
                    };
                    let clamped = raw_coherence.clamp(0.0, 1.0);
                    if clamped < coherence_floor {
                        continue;
                    }
                    Some(clamped)
                }
                None => None,
            };

            measurements.push(PointMeasurement {
                point_id: point.id,
                acquired_on: acquisition.secondary,
                displacement_mm: meters_to_millimeters(displacement_m),
                coherence,
            });
        }

        if measurements.len() < points.len() {
            warn!(
                "⚠️  [HARVEST_OMISSIONS]: {} of {} points yielded no certifiable sample.",
                points.len() - measurements.len(),
                points.len()
            );
        }

        // 4. INGESTA MASIVA Y DERIVACIÓN DE VELOCIDADES
        let ingested = self
            .application_state
            .deformations()?
            .bulk_upsert(
                job.id,
                &measurements,
                self.application_state.config.storage_bulk_chunk_size,
            )
            .await?;

        self.application_state
            .deformations()?
            .recompute_velocities(job.infrastructure_id)
            .await?;

        info!(
            "🌊 [HARVEST_SEALED]: {} measurements ingested for job [{}].",
            ingested, job.id
        );
        Ok(ingested)
    }

    /// Subdirectorio de trabajo dedicado de la misión.
    pub fn mission_workdir(&self, job: &Job) -> PathBuf {
        self.application_state.config.working_dir.join(job.id.to_string())
    }

    /// Retira el subdirectorio de trabajo tras la transición terminal.
    pub async fn cleanup_workdir(&self, job: &Job) {
        let workdir = self.mission_workdir(job);
        if workdir.exists() {
            if let Err(io_fault) = tokio::fs::remove_dir_all(&workdir).await {
                warn!("⚠️  [WORKDIR_RESIDUE]: {} not removed: {}", workdir.display(), io_fault);
            }
        }
    }
}

/// Clasifica el inventario por sufijo; el vertical es obligatorio.
fn classify_products(files: &[ProductFile]) -> Result<ProductManifest, HarvestFault> {
    let mut vertical = None;
    let mut coherence = None;
    let mut line_of_sight = None;

    for file in files {
        match ProductKind::from_filename(&file.filename) {
            Some(ProductKind::VerticalDisplacement) => vertical = Some(file.clone()),
            Some(ProductKind::Coherence) => coherence = Some(file.clone()),
            Some(ProductKind::LineOfSightDisplacement) => line_of_sight = Some(file.clone()),
            None => {}
        }
    }

    Ok(ProductManifest {
        vertical: vertical.ok_or(HarvestFault::MissingVerticalProduct)?,
        coherence,
        line_of_sight,
    })
}
