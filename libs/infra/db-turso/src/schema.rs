// [libs/infra/db-turso/src/schema.rs]
/**
 * =================================================================
 * APARATO: MONITORING DATABASE SCHEMA (V9.2 - DEFORMATION STRATA)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: GOBERNANZA ESTRUCTURAL E IDEMPOTENCIA TOTAL
 *
 * VISION HIPER-HOLÍSTICA:
 * 1. CUATRO AGREGADOS + COLA: infraestructuras, puntos, misiones,
 *    deformaciones y la cola durable de sondeo.
 * 2. IDEMPOTENCIA: Las tres fases (génesis, evolución, índices) pueden
 *    ejecutarse en caliente cuantas veces haga falta.
 * 3. PERFORMANCE: Índices de aceleración para la ingesta masiva y el
 *    despacho de la cola.
 * =================================================================
 */

use anyhow::{Context, Result};
use libsql::Connection;
use tracing::{debug, info, instrument, warn};

/**
 * ESTRATO 1: SOLIDIFICACIÓN (Génesis de Tablas)
 * Define las entidades base del ecosistema de monitoreo.
 */
const TACTICAL_TABLES: &[(&str, &str)] = &[
    ("TABLE_INFRASTRUCTURES", r#"
        CREATE TABLE IF NOT EXISTS infrastructures (
            id TEXT PRIMARY KEY,
            owner_identity TEXT NOT NULL,
            display_name TEXT NOT NULL,
            boundary_wkt TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );
    "#),
    ("TABLE_POINTS", r#"
        CREATE TABLE IF NOT EXISTS points (
            id TEXT PRIMARY KEY,
            infrastructure_id TEXT NOT NULL,
            longitude REAL NOT NULL,
            latitude REAL NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );
    "#),
    ("TABLE_JOBS", r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id TEXT PRIMARY KEY,
            infrastructure_id TEXT NOT NULL,
            upstream_id TEXT,
            status TEXT NOT NULL DEFAULT 'PENDING',
            bbox_wkt TEXT NOT NULL,
            reference_granule TEXT NOT NULL,
            secondary_granule TEXT NOT NULL,
            product_files_json TEXT,
            error_message TEXT,
            retry_count INTEGER NOT NULL DEFAULT 0,
            processing_ms INTEGER,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            first_running_at TEXT,
            completed_at TEXT
        );
    "#),
    ("TABLE_DEFORMATIONS", r#"
        CREATE TABLE IF NOT EXISTS deformations (
            id TEXT PRIMARY KEY,
            point_id TEXT NOT NULL,
            job_id TEXT NOT NULL,
            acquired_on TEXT NOT NULL,
            displacement_mm REAL NOT NULL,
            coherence REAL,
            velocity_mm_year REAL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            UNIQUE(point_id, job_id, acquired_on)
        );
    "#),
    ("TABLE_POLL_QUEUE", r#"
        CREATE TABLE IF NOT EXISTS poll_queue (
            job_id TEXT PRIMARY KEY,
            next_poll_at_ms INTEGER NOT NULL,
            attempt INTEGER NOT NULL DEFAULT 0,
            enqueued_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );
    "#),
];

/**
 * ESTRATO 2: EVOLUCIÓN (Mutaciones de Columna)
 * Asegura que las tablas existentes se adapten a capacidades nuevas.
 */
const EVOLUTIONARY_STRATA: &[(&str, &str)] = &[
    // --- LINAJE DE REINTENTOS ---
    ("JOB_RETRY_OF", "ALTER TABLE jobs ADD COLUMN retry_of TEXT"),
    // --- CLASIFICACIÓN GEOTÉCNICA ---
    ("POINT_SOIL_TYPE", "ALTER TABLE points ADD COLUMN soil_type TEXT"),
];

/**
 * ESTRATO 3: ENDURECIMIENTO (Índices de Aceleración)
 * Optimiza la ingesta masiva y el despacho de la cola de sondeo.
 */
const ACCELERATION_INDEXES: &[(&str, &str)] = &[
    ("IDX_POINTS_INFRA", "CREATE INDEX IF NOT EXISTS idx_points_infrastructure ON points(infrastructure_id);"),
    ("IDX_POINTS_LOCATION", "CREATE INDEX IF NOT EXISTS idx_points_location ON points(longitude, latitude);"),
    ("IDX_JOBS_INFRA_STATUS", "CREATE INDEX IF NOT EXISTS idx_jobs_infrastructure_status ON jobs(infrastructure_id, status);"),
    ("IDX_DEFORMATIONS_POINT", "CREATE INDEX IF NOT EXISTS idx_deformations_point ON deformations(point_id, acquired_on);"),
    ("IDX_DEFORMATIONS_JOB", "CREATE INDEX IF NOT EXISTS idx_deformations_job ON deformations(job_id);"),
    ("IDX_QUEUE_DUE", "CREATE INDEX IF NOT EXISTS idx_poll_queue_due ON poll_queue(next_poll_at_ms);"),
];

/**
 * Ejecuta la secuencia maestra de sincronización del esquema.
 *
 * # Errors:
 * Retorna error si alguna tabla base falla en solidificarse.
 */
#[instrument(skip(database_connection))]
pub async fn apply_monitoring_schema(database_connection: &Connection) -> Result<()> {
    info!("🏗️ [SCHEMA_ENGINE]: Initiating structural synchronization V9.2...");

    solidify_base_strata(database_connection).await?;
    execute_evolutionary_repair(database_connection).await?;
    harden_access_layer(database_connection).await?;

    info!("✅ [SCHEMA_ENGINE]: Monitoring ledger level and certified.");
    Ok(())
}

async fn solidify_base_strata(db: &Connection) -> Result<()> {
    for (identifier, sql) in TACTICAL_TABLES {
        debug!("  ↳ Solidifying: {}", identifier);
        db.execute(*sql, ()).await
            .with_context(|| format!("CRITICAL_SOLIDIFICATION_FAULT: {}", identifier))?;
    }
    Ok(())
}

async fn execute_evolutionary_repair(db: &Connection) -> Result<()> {
    for (identifier, sql) in EVOLUTIONARY_STRATA {
        match db.execute(*sql, ()).await {
            Ok(_) => debug!("  🟢 [REPAIR_OK]: Applied evolutionary stratum {}", identifier),
            Err(e) => {
                let message = e.to_string();
                if message.contains("duplicate column name") {
                    debug!("  ⚪ [REPAIR_SKIP]: {} already level.", identifier);
                } else {
                    warn!("  ⚠️ [REPAIR_BYPASS]: {} check incomplete: {}", identifier, message);
                }
            }
        }
    }
    Ok(())
}

async fn harden_access_layer(db: &Connection) -> Result<()> {
    for (identifier, sql) in ACCELERATION_INDEXES {
        debug!("  ↳ Hardening: {}", identifier);
        db.execute(*sql, ()).await
            .with_context(|| format!("CRITICAL_HARDENING_FAULT: {}", identifier))?;
    }
    Ok(())
}
