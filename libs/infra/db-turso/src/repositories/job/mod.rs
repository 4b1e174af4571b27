// [libs/infra/db-turso/src/repositories/job/mod.rs]
/*!
 * =================================================================
 * APARATO: MISSION LEDGER REPOSITORY (V9.3 - STATE GUARDED)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: GESTIÓN DEL CICLO DE VIDA DE MISIONES InSAR
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SEMANTIC ERROR HANDLING: Una transición ilegal se distingue de
 *    una fila ausente (InvalidState vs JobNotFound).
 * 2. SINGLE WRITER: Solo el orquestador muta filas de misión tras su
 *    creación; este repositorio es su única pluma.
 * =================================================================
 */

pub mod queries;

use crate::errors::DbError;
use crate::repositories::{parse_uuid, text_or_null};
use chrono::{DateTime, Utc};
use libsql::{params, Connection};
use tellus_domain_models::{Job, JobStatus, ProductFile};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use self::queries as sql_registry;

/// Material de génesis de una misión recién admitida.
pub struct JobSeed {
    pub id: Uuid,
    pub infrastructure_id: Uuid,
    pub upstream_id: String,
    pub bbox_wkt: String,
    pub reference_granule: String,
    pub secondary_granule: String,
    /// Misión terminal de la que esta es reintento, si aplica.
    pub retry_of: Option<Uuid>,
}

pub struct JobRepository {
    database_connection: Connection,
}

impl JobRepository {
    pub fn new(connection: Connection) -> Self {
        Self { database_connection: connection }
    }

    /// Registra la misión en estado PENDING.
    #[instrument(skip(self, seed))]
    pub async fn create(&self, seed: &JobSeed) -> Result<(), DbError> {
        self.database_connection
            .execute(
                sql_registry::INITIALIZE_JOB,
                params![
                    seed.id.to_string(),
                    seed.infrastructure_id.to_string(),
                    seed.upstream_id.clone(),
                    seed.bbox_wkt.clone(),
                    seed.reference_granule.clone(),
                    seed.secondary_granule.clone(),
                    text_or_null(seed.retry_of.map(|id| id.to_string()))
                ],
            )
            .await?;

        info!("✨ [MISSION_GENESIS]: Job [{}] registered as PENDING.", seed.id);
        Ok(())
    }

    /// Instantánea completa de la misión.
    pub async fn fetch(&self, job_id: Uuid) -> Result<Job, DbError> {
        let mut query_result = self
            .database_connection
            .query(sql_registry::FETCH_JOB, params![job_id.to_string()])
            .await?;

        let Some(data_row) = query_result.next().await? else {
            return Err(DbError::JobNotFound);
        };

        let raw_id: String = data_row.get(0)?;
        let raw_infrastructure: String = data_row.get(1)?;
        let raw_status: String = data_row.get(3)?;

        let product_files = match data_row.get::<Option<String>>(7)? {
            Some(serialized) => serde_json::from_str::<Vec<ProductFile>>(&serialized)
                .map_err(|fault| DbError::MappingError(format!("PRODUCT_JSON_REJECTED: {fault}")))?,
            None => Vec::new(),
        };

        Ok(Job {
            id: parse_uuid(&raw_id)?,
            infrastructure_id: parse_uuid(&raw_infrastructure)?,
            upstream_id: data_row.get::<Option<String>>(2)?,
            status: JobStatus::parse(&raw_status)
                .map_err(|fault| DbError::MappingError(fault.to_string()))?,
            bbox_wkt: data_row.get(4)?,
            reference_granule: data_row.get(5)?,
            secondary_granule: data_row.get(6)?,
            product_files,
            error_message: data_row.get::<Option<String>>(8)?,
            retry_count: data_row.get::<Option<i64>>(9)?.unwrap_or(0).max(0) as u32,
            processing_ms: data_row.get::<Option<i64>>(10)?.map(|ms| ms.max(0) as u64),
            retry_of: match data_row.get::<Option<String>>(11)? {
                Some(raw) => Some(parse_uuid(&raw)?),
                None => None,
            },
            created_at: parse_stored_timestamp(data_row.get::<Option<String>>(12)?),
            first_running_at: parse_stored_timestamp(data_row.get::<Option<String>>(13)?),
            completed_at: parse_stored_timestamp(data_row.get::<Option<String>>(14)?),
        })
    }

    /// Identificadores de misiones vivas (recuperación post-reinicio).
    pub async fn fetch_non_terminal_ids(&self) -> Result<Vec<Uuid>, DbError> {
        let mut query_result = self
            .database_connection
            .query(sql_registry::FETCH_NON_TERMINAL_IDS, ())
            .await?;

        let mut identifiers = Vec::new();
        while let Some(data_row) = query_result.next().await? {
            let raw_id: String = data_row.get(0)?;
            identifiers.push(parse_uuid(&raw_id)?);
        }
        Ok(identifiers)
    }

    // --- TRANSICIONES GUARDADAS ---

    /// PENDING/RUNNING -> RUNNING; acumula el contador de sondeos.
    pub async fn mark_running(&self, job_id: Uuid) -> Result<(), DbError> {
        let rows_affected = self
            .database_connection
            .execute(
                sql_registry::MARK_RUNNING,
                params![job_id.to_string(), Utc::now().to_rfc3339()],
            )
            .await?;
        self.certify_transition(job_id, rows_affected, "RUNNING").await
    }

    /// RUNNING -> PROCESSING.
    pub async fn mark_processing(&self, job_id: Uuid) -> Result<(), DbError> {
        let rows_affected = self
            .database_connection
            .execute(sql_registry::MARK_PROCESSING, params![job_id.to_string()])
            .await?;
        self.certify_transition(job_id, rows_affected, "PROCESSING").await
    }

    /// PROCESSING -> SUCCEEDED con la duración del post-procesamiento.
    pub async fn mark_succeeded(&self, job_id: Uuid, processing_ms: u64) -> Result<(), DbError> {
        let rows_affected = self
            .database_connection
            .execute(
                sql_registry::MARK_SUCCEEDED,
                params![
                    job_id.to_string(),
                    processing_ms as i64,
                    Utc::now().to_rfc3339()
                ],
            )
            .await?;
        self.certify_transition(job_id, rows_affected, "SUCCEEDED").await
    }

    /// No-terminal -> FAILED con el mensaje forense.
    pub async fn mark_failed(&self, job_id: Uuid, error_message: &str) -> Result<(), DbError> {
        let rows_affected = self
            .database_connection
            .execute(
                sql_registry::MARK_FAILED,
                params![job_id.to_string(), error_message, Utc::now().to_rfc3339()],
            )
            .await?;
        self.certify_transition(job_id, rows_affected, "FAILED").await
    }

    /// No-terminal -> CANCELLED.
    pub async fn mark_cancelled(&self, job_id: Uuid) -> Result<(), DbError> {
        let rows_affected = self
            .database_connection
            .execute(
                sql_registry::MARK_CANCELLED,
                params![job_id.to_string(), Utc::now().to_rfc3339()],
            )
            .await?;
        self.certify_transition(job_id, rows_affected, "CANCELLED").await
    }

    /// Sella el inventario de productos reportado aguas arriba.
    pub async fn record_product_files(
        &self,
        job_id: Uuid,
        files: &[ProductFile],
    ) -> Result<(), DbError> {
        let serialized = serde_json::to_string(files)
            .map_err(|fault| DbError::MappingError(format!("PRODUCT_JSON_SEAL_FAULT: {fault}")))?;

        self.database_connection
            .execute(
                sql_registry::RECORD_PRODUCT_FILES,
                params![job_id.to_string(), serialized],
            )
            .await?;
        Ok(())
    }

    /// Distingue transición ilegal de fila ausente cuando la guardia
    /// de estado no afectó filas.
    async fn certify_transition(
        &self,
        job_id: Uuid,
        rows_affected: u64,
        target_label: &str,
    ) -> Result<(), DbError> {
        if rows_affected > 0 {
            info!("🛰️  [TRANSITION]: Job [{}] -> {}.", job_id, target_label);
            return Ok(());
        }

        match self.fetch(job_id).await {
            Ok(snapshot) => {
                warn!(
                    "⚠️  [TRANSITION_REJECTED]: Job [{}] is {} and refused {}.",
                    job_id,
                    snapshot.status.as_str(),
                    target_label
                );
                Err(DbError::InvalidState)
            }
            Err(DbError::JobNotFound) => Err(DbError::JobNotFound),
            Err(other) => Err(other),
        }
    }
}

/// Marcas temporales persistidas: RFC 3339 propio o el formato
/// 'YYYY-MM-DD HH:MM:SS' de CURRENT_TIMESTAMP.
fn parse_stored_timestamp(raw: Option<String>) -> Option<DateTime<Utc>> {
    let text = raw?;

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&text) {
        return Some(parsed.with_timezone(&Utc));
    }

    chrono::NaiveDateTime::parse_from_str(&text, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
