// [apps/orchestrator/src/config.rs]
/*!
 * =================================================================
 * APARATO: CONTROL PLANE CONFIGURATION (V4.2 - ENV SOVEREIGN)
 * CLASIFICACIÓN: APPLICATION SHELL (ESTRATO L4)
 * RESPONSABILIDAD: CAPTURA DE ENTORNO Y POLÍTICAS NOMINALES
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ZERO GLOBALS: La configuración se captura una única vez en la
 *    ignición y viaja inyectada; ningún estrato relee el entorno.
 * 2. NOMINAL DEFAULTS: Cada opción porta su valor de operación
 *    certificado; el entorno solo lo sobreescribe.
 * =================================================================
 */

use std::path::PathBuf;
use tellus_core_geogrid::GridPolicy;
use tellus_domain_pairing::PairPolicy;

/// Política de retícula del plano de control.
#[derive(Debug, Clone, Copy)]
pub struct GridSettings {
    pub max_area_km2: f64,
    pub max_points: usize,
    pub default_spacing_m: f64,
    pub max_abs_latitude_deg: f64,
}

/// Política del muestreador de rásters.
#[derive(Debug, Clone, Copy)]
pub struct SamplerSettings {
    pub min_coherence: f64,
    pub download_timeout_ms: u64,
    pub max_raster_bytes: usize,
}

/// Política del bucle de sondeo y del pool de workers.
#[derive(Debug, Clone, Copy)]
pub struct OrchestratorSettings {
    pub worker_count: usize,
    pub poll_base_ms: u64,
    pub poll_max_ms: u64,
    pub max_attempts: u32,
    pub job_wall_clock_ms: u64,
    pub upstream_rate_per_min: u32,
}

/// Configuración completa del plano de control.
#[derive(Debug, Clone)]
pub struct ControlPlaneConfig {
    pub grid: GridSettings,
    pub pairs: PairPolicy,
    pub orchestrator: OrchestratorSettings,
    pub sampler: SamplerSettings,
    pub storage_bulk_chunk_size: usize,
    pub working_dir: PathBuf,

    // --- COORDENADAS DE ENLACES EXTERNOS ---
    pub database_url: String,
    pub database_token: Option<String>,
    pub catalog_base_url: String,
    pub processor_base_url: String,
    pub processor_bearer_token: String,
}

impl ControlPlaneConfig {
    /// Hidrata la configuración desde el entorno del proceso.
    pub fn from_environment() -> Self {
        Self {
            grid: GridSettings {
                max_area_km2: env_f64("TELLUS_GRID_MAX_AREA_KM2", 5.0),
                max_points: env_usize("TELLUS_GRID_MAX_POINTS", 200_000),
                default_spacing_m: env_f64("TELLUS_GRID_DEFAULT_SPACING_M", 5.0),
                max_abs_latitude_deg: env_f64("TELLUS_GRID_MAX_ABS_LATITUDE_DEG", 85.0),
            },
            pairs: PairPolicy {
                min_baseline_days: env_f64("TELLUS_PAIRS_MIN_BASELINE_DAYS", 6.0),
                max_baseline_days: env_f64("TELLUS_PAIRS_MAX_BASELINE_DAYS", 48.0),
                optimal_baseline_days: env_f64("TELLUS_PAIRS_OPTIMAL_BASELINE_DAYS", 12.0),
                max_perp_baseline_m: env_f64("TELLUS_PAIRS_MAX_PERP_BASELINE_M", 300.0),
                fallback_perp_baseline_m: env_f64("TELLUS_PAIRS_FALLBACK_PERP_BASELINE_M", 100.0),
                min_quality_score: env_f64("TELLUS_PAIRS_MIN_QUALITY_SCORE", 0.3),
            },
            orchestrator: OrchestratorSettings {
                worker_count: env_usize("TELLUS_ORCHESTRATOR_WORKER_COUNT", 5),
                poll_base_ms: env_u64("TELLUS_ORCHESTRATOR_POLL_BASE_MS", 30_000),
                poll_max_ms: env_u64("TELLUS_ORCHESTRATOR_POLL_MAX_MS", 300_000),
                max_attempts: env_u64("TELLUS_ORCHESTRATOR_MAX_ATTEMPTS", 50) as u32,
                job_wall_clock_ms: env_u64("TELLUS_ORCHESTRATOR_JOB_WALL_CLOCK_MS", 3_600_000),
                upstream_rate_per_min: env_u64("TELLUS_ORCHESTRATOR_UPSTREAM_RATE_PER_MIN", 10)
                    as u32,
            },
            sampler: SamplerSettings {
                min_coherence: env_f64("TELLUS_SAMPLER_MIN_COHERENCE", 0.3),
                download_timeout_ms: env_u64("TELLUS_SAMPLER_DOWNLOAD_TIMEOUT_MS", 600_000),
                max_raster_bytes: env_usize("TELLUS_SAMPLER_MAX_RASTER_BYTES", 50 * 1024 * 1024),
            },
            storage_bulk_chunk_size: env_usize("TELLUS_STORAGE_BULK_CHUNK_SIZE", 1_000),
            working_dir: PathBuf::from(
                std::env::var("TELLUS_WORKING_DIR").unwrap_or_else(|_| "./tellus-workdir".into()),
            ),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "file:tellus.db".into()),
            database_token: std::env::var("TURSO_AUTH_TOKEN").ok(),
            catalog_base_url: std::env::var("TELLUS_CATALOG_BASE_URL")
                .unwrap_or_else(|_| "https://api.daac.asf.alaska.edu".into()),
            processor_base_url: std::env::var("TELLUS_PROCESSOR_BASE_URL")
                .unwrap_or_else(|_| "https://hyp3-api.asf.alaska.edu".into()),
            processor_bearer_token: std::env::var("TELLUS_PROCESSOR_TOKEN").unwrap_or_default(),
        }
    }

    /// Política geodésica derivada para el núcleo de retículas.
    pub fn grid_policy(&self) -> GridPolicy {
        GridPolicy {
            max_area_km2: self.grid.max_area_km2,
            max_abs_latitude_deg: self.grid.max_abs_latitude_deg,
            min_spacing_m: 1.0,
        }
    }
}

fn env_f64(key: &str, fallback: f64) -> f64 {
    std::env::var(key).ok().and_then(|raw| raw.parse().ok()).unwrap_or(fallback)
}

fn env_u64(key: &str, fallback: u64) -> u64 {
    std::env::var(key).ok().and_then(|raw| raw.parse().ok()).unwrap_or(fallback)
}

fn env_usize(key: &str, fallback: usize) -> usize {
    std::env::var(key).ok().and_then(|raw| raw.parse().ok()).unwrap_or(fallback)
}
