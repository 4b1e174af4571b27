// [libs/infra/db-turso/src/repositories/deformation/mod.rs]
/*!
 * =================================================================
 * APARATO: DEFORMATION REPOSITORY (V9.3 - BULK & DERIVE)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: INGESTA MASIVA IDEMPOTENTE Y DERIVACIÓN DE
 *                  VELOCIDADES POR PUNTO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CHUNKED COMMITS: Cada trozo es una transacción; la reanudación
 *    parcial es inocua gracias a la clave natural.
 * 2. SINGLE WRITER: El muestreador es la única pluma de este estrato;
 *    ningún otro componente muta filas de deformación.
 * =================================================================
 */

pub mod math;
pub mod queries;

use crate::errors::DbError;
use crate::repositories::{parse_uuid, real_or_null};
use chrono::NaiveDate;
use libsql::{params, Connection, Value};
use std::collections::BTreeMap;
use tellus_domain_models::{DeformationSample, PointMeasurement};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use self::math::LinearTrend;
use self::queries as sql_registry;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

pub struct DeformationRepository {
    database_connection: Connection,
}

impl DeformationRepository {
    pub fn new(connection: Connection) -> Self {
        Self { database_connection: connection }
    }

    /// Ingesta masiva con semántica upsert sobre la clave natural.
    ///
    /// Cada trozo se compromete en su propia transacción; reproducir
    /// el mismo lote deja la tabla bit a bit idéntica.
    #[instrument(skip(self, measurements))]
    pub async fn bulk_upsert(
        &self,
        job_id: Uuid,
        measurements: &[PointMeasurement],
        chunk_size: usize,
    ) -> Result<usize, DbError> {
        if measurements.is_empty() {
            return Ok(0);
        }

        let effective_chunk_size = chunk_size.max(1);
        let job_identifier = job_id.to_string();

        for (chunk_index, chunk) in measurements.chunks(effective_chunk_size).enumerate() {
            let placeholders = vec!["(?, ?, ?, ?, ?, ?)"; chunk.len()].join(", ");
            let statement = format!(
                "{}{}{}",
                sql_registry::BULK_UPSERT_PREFIX,
                placeholders,
                sql_registry::BULK_UPSERT_SUFFIX
            );

            let mut parameters: Vec<Value> = Vec::with_capacity(chunk.len() * 6);
            for measurement in chunk {
                parameters.push(Value::Text(Uuid::new_v4().to_string()));
                parameters.push(Value::Text(measurement.point_id.to_string()));
                parameters.push(Value::Text(job_identifier.clone()));
                parameters.push(Value::Text(
                    measurement.acquired_on.format(ISO_DATE_FORMAT).to_string(),
                ));
                parameters.push(Value::Real(measurement.displacement_mm));
                parameters.push(real_or_null(measurement.coherence));
            }

            let chunk_transaction = self
                .database_connection
                .transaction()
                .await
                .map_err(|_| DbError::TransactionError)?;
            chunk_transaction.execute(&statement, parameters).await?;
            chunk_transaction.commit().await.map_err(|_| DbError::TransactionError)?;

            debug!(
                "  💾 [INGEST_CHUNK]: Chunk {} ({} rows) committed for job [{}].",
                chunk_index,
                chunk.len(),
                job_identifier
            );
        }

        info!(
            "💾 [INGEST_SEALED]: {} measurements upserted for job [{}].",
            measurements.len(),
            job_identifier
        );
        Ok(measurements.len())
    }

    /// Deriva y sella la velocidad OLS (mm/año) de cada punto del
    /// activo; los puntos con menos de dos mediciones quedan nulos.
    #[instrument(skip(self))]
    pub async fn recompute_velocities(&self, infrastructure_id: Uuid) -> Result<usize, DbError> {
        let mut query_result = self
            .database_connection
            .query(
                sql_registry::FETCH_SERIES_FOR_INFRASTRUCTURE,
                params![infrastructure_id.to_string()],
            )
            .await?;

        // Agrupación por punto preservando el orden temporal.
        let mut series_by_point: BTreeMap<String, Vec<(NaiveDate, f64)>> = BTreeMap::new();
        while let Some(data_row) = query_result.next().await? {
            let point_identifier: String = data_row.get(0)?;
            let raw_date: String = data_row.get(1)?;
            let displacement_mm: f64 = data_row.get(2)?;

            let acquired_on = NaiveDate::parse_from_str(&raw_date, ISO_DATE_FORMAT)
                .map_err(|fault| DbError::MappingError(format!("DATE_REJECTED: {fault}")))?;

            series_by_point
                .entry(point_identifier)
                .or_default()
                .push((acquired_on, displacement_mm));
        }

        let mut sealed_points = 0usize;

        for (point_identifier, history) in series_by_point {
            let earliest_date = history
                .iter()
                .map(|(date, _)| *date)
                .min()
                .expect("grouped history is never empty");

            let day_offset_series: Vec<(f64, f64)> = history
                .iter()
                .map(|(date, displacement)| {
                    ((*date - earliest_date).num_days() as f64, *displacement)
                })
                .collect();

            let annual_velocity = LinearTrend::annual_velocity(&day_offset_series);

            self.database_connection
                .execute(
                    sql_registry::SEAL_POINT_VELOCITY,
                    params![point_identifier.clone(), real_or_null(annual_velocity)],
                )
                .await?;

            sealed_points += 1;
        }

        info!(
            "🧮 [VELOCITY_SEALED]: {} point series regressed for asset [{}].",
            sealed_points, infrastructure_id
        );
        Ok(sealed_points)
    }

    /// Filas de un punto en orden temporal.
    pub async fn fetch_for_point(&self, point_id: Uuid) -> Result<Vec<DeformationSample>, DbError> {
        let mut query_result = self
            .database_connection
            .query(sql_registry::FETCH_SAMPLES_FOR_POINT, params![point_id.to_string()])
            .await?;

        let mut samples = Vec::new();
        while let Some(data_row) = query_result.next().await? {
            let raw_point: String = data_row.get(0)?;
            let raw_job: String = data_row.get(1)?;
            let raw_date: String = data_row.get(2)?;

            samples.push(DeformationSample {
                point_id: parse_uuid(&raw_point)?,
                job_id: parse_uuid(&raw_job)?,
                acquired_on: NaiveDate::parse_from_str(&raw_date, ISO_DATE_FORMAT)
                    .map_err(|fault| DbError::MappingError(format!("DATE_REJECTED: {fault}")))?,
                displacement_mm: data_row.get(3)?,
                coherence: data_row.get::<Option<f64>>(4)?,
                velocity_mm_year: data_row.get::<Option<f64>>(5)?,
            });
        }

        Ok(samples)
    }

    /// Conteo de mediciones selladas por una misión.
    pub async fn count_for_job(&self, job_id: Uuid) -> Result<u64, DbError> {
        let mut query_result = self
            .database_connection
            .query(sql_registry::COUNT_FOR_JOB, params![job_id.to_string()])
            .await?;

        let Some(data_row) = query_result.next().await? else {
            return Ok(0);
        };

        let count: i64 = data_row.get(0)?;
        Ok(count.max(0) as u64)
    }
}
