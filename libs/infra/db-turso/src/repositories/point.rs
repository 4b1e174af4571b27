// [libs/infra/db-turso/src/repositories/point.rs]
/*!
 * =================================================================
 * APARATO: MONITORING POINT REPOSITORY (V9.2 - BULK ATOMIC)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: PERSISTENCIA MASIVA DE LA RETÍCULA DE REFERENCIA
 *
 * # Mathematical Proof (Atomic Bulk Path):
 * Todos los trozos multi-fila viven dentro de UNA transacción: o la
 * retícula completa se solidifica o ninguna fila sobrevive. El tamaño
 * de trozo mantiene el conteo de parámetros bajo el techo del driver
 * (5 parámetros por fila).
 * =================================================================
 */

use crate::errors::DbError;
use crate::repositories::{parse_uuid, text_or_null};
use libsql::{params, Connection, Value};
use tellus_domain_models::MonitoringPoint;
use tracing::{debug, info, instrument};
use uuid::Uuid;

pub struct PointRepository {
    database_connection: Connection,
}

impl PointRepository {
    pub fn new(connection: Connection) -> Self {
        Self { database_connection: connection }
    }

    /// Inserta la retícula completa de forma atómica en trozos
    /// multi-fila. Ante cualquier fallo, cero filas permanecen.
    #[instrument(skip(self, points))]
    pub async fn bulk_insert_atomic(
        &self,
        points: &[MonitoringPoint],
        chunk_size: usize,
    ) -> Result<usize, DbError> {
        if points.is_empty() {
            return Ok(0);
        }

        let effective_chunk_size = chunk_size.max(1);

        let bulk_transaction = self
            .database_connection
            .transaction()
            .await
            .map_err(|_| DbError::TransactionError)?;

        for (chunk_index, chunk) in points.chunks(effective_chunk_size).enumerate() {
            let placeholders = vec!["(?, ?, ?, ?, ?)"; chunk.len()].join(", ");
            let statement = format!(
                "INSERT INTO points (id, infrastructure_id, longitude, latitude, soil_type)
                 VALUES {placeholders}"
            );

            let mut parameters: Vec<Value> = Vec::with_capacity(chunk.len() * 5);
            for point in chunk {
                parameters.push(Value::Text(point.id.to_string()));
                parameters.push(Value::Text(point.infrastructure_id.to_string()));
                parameters.push(Value::Real(point.longitude));
                parameters.push(Value::Real(point.latitude));
                parameters.push(text_or_null(point.soil_type.clone()));
            }

            bulk_transaction.execute(&statement, parameters).await?;
            debug!("  💾 [GRID_CHUNK]: Chunk {} committed to the transaction buffer.", chunk_index);
        }

        bulk_transaction.commit().await.map_err(|_| DbError::TransactionError)?;

        info!("💾 [GRID_SEALED]: {} monitoring points solidified atomically.", points.len());
        Ok(points.len())
    }

    /// Conteo de puntos del activo.
    pub async fn count_for_infrastructure(&self, infrastructure_id: Uuid) -> Result<u64, DbError> {
        let mut query_result = self
            .database_connection
            .query(
                "SELECT COUNT(*) FROM points WHERE infrastructure_id = ?1",
                params![infrastructure_id.to_string()],
            )
            .await?;

        let Some(data_row) = query_result.next().await? else {
            return Ok(0);
        };

        let count: i64 = data_row.get(0)?;
        Ok(count.max(0) as u64)
    }

    /// Recupera todos los puntos del activo.
    pub async fn fetch_for_infrastructure(
        &self,
        infrastructure_id: Uuid,
    ) -> Result<Vec<MonitoringPoint>, DbError> {
        let mut query_result = self
            .database_connection
            .query(
                "SELECT id, infrastructure_id, longitude, latitude, soil_type
                 FROM points WHERE infrastructure_id = ?1",
                params![infrastructure_id.to_string()],
            )
            .await?;

        let mut points = Vec::new();
        while let Some(data_row) = query_result.next().await? {
            let raw_id: String = data_row.get(0)?;
            let raw_infrastructure: String = data_row.get(1)?;

            points.push(MonitoringPoint {
                id: parse_uuid(&raw_id)?,
                infrastructure_id: parse_uuid(&raw_infrastructure)?,
                longitude: data_row.get(2)?,
                latitude: data_row.get(3)?,
                soil_type: data_row.get::<Option<String>>(4)?,
            });
        }

        Ok(points)
    }
}
