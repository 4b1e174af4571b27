// [libs/infra/db-turso/src/repositories/queue.rs]
/*!
 * =================================================================
 * APARATO: DURABLE POLL QUEUE (V9.2 - AT LEAST ONCE)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: COLA DURABLE DE SONDEO CON RECLAMO ATÓMICO
 *
 * # Mathematical Proof (Claim Exclusivity):
 * El reclamo borra la fila dentro de una transacción verificando las
 * filas afectadas: si otro worker la tomó primero, el DELETE afecta
 * cero filas y el reclamo se reporta vacío. Las entregas perdidas por
 * colapso de proceso se recuperan re-encolando las misiones vivas en
 * la ignición; el INSERT por conflicto absorbe duplicados.
 * =================================================================
 */

use crate::errors::DbError;
use crate::repositories::parse_uuid;
use libsql::{params, Connection};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Entrega reclamada desde la cola durable.
#[derive(Debug, Clone, Copy)]
pub struct QueueDelivery {
    pub job_id: Uuid,
    /// Sondeos ya consumidos por la misión.
    pub attempt: u32,
}

pub struct QueueRepository {
    database_connection: Connection,
}

impl QueueRepository {
    pub fn new(connection: Connection) -> Self {
        Self { database_connection: connection }
    }

    /// Encola (o re-encola) la misión para su próximo sondeo.
    ///
    /// El conflicto sobre job_id reprograma la entrega existente, de
    /// modo que los duplicados de recuperación queden absorbidos.
    #[instrument(skip(self))]
    pub async fn enqueue(
        &self,
        job_id: Uuid,
        next_poll_at_ms: i64,
        attempt: u32,
    ) -> Result<(), DbError> {
        self.database_connection
            .execute(
                "INSERT INTO poll_queue (job_id, next_poll_at_ms, attempt)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(job_id) DO UPDATE SET
                     next_poll_at_ms = excluded.next_poll_at_ms,
                     attempt = excluded.attempt",
                params![job_id.to_string(), next_poll_at_ms, attempt as i64],
            )
            .await?;

        debug!("📬 [QUEUE]: Job [{}] scheduled (attempt {}).", job_id, attempt);
        Ok(())
    }

    /// Reclama la entrega vencida más antigua, si existe.
    pub async fn claim_due(&self, now_ms: i64) -> Result<Option<QueueDelivery>, DbError> {
        let claim_transaction = self
            .database_connection
            .transaction()
            .await
            .map_err(|_| DbError::TransactionError)?;

        let mut due_query = claim_transaction
            .query(
                "SELECT job_id, attempt FROM poll_queue
                 WHERE next_poll_at_ms <= ?1
                 ORDER BY next_poll_at_ms ASC
                 LIMIT 1",
                params![now_ms],
            )
            .await?;

        let Some(data_row) = due_query.next().await? else {
            claim_transaction.commit().await.map_err(|_| DbError::TransactionError)?;
            return Ok(None);
        };

        let raw_job_id: String = data_row.get(0)?;
        let attempt: i64 = data_row.get(1)?;

        let rows_removed = claim_transaction
            .execute("DELETE FROM poll_queue WHERE job_id = ?1", params![raw_job_id.clone()])
            .await?;

        claim_transaction.commit().await.map_err(|_| DbError::TransactionError)?;

        // Otro worker ganó la carrera: el reclamo se reporta vacío.
        if rows_removed == 0 {
            return Ok(None);
        }

        Ok(Some(QueueDelivery {
            job_id: parse_uuid(&raw_job_id)?,
            attempt: attempt.max(0) as u32,
        }))
    }

    /// Retira una entrega programada (misión terminal).
    pub async fn remove(&self, job_id: Uuid) -> Result<(), DbError> {
        self.database_connection
            .execute("DELETE FROM poll_queue WHERE job_id = ?1", params![job_id.to_string()])
            .await?;
        Ok(())
    }

    /// Profundidad actual de la cola (telemetría).
    pub async fn depth(&self) -> Result<u64, DbError> {
        let mut query_result = self
            .database_connection
            .query("SELECT COUNT(*) FROM poll_queue", ())
            .await?;

        let Some(data_row) = query_result.next().await? else {
            return Ok(0);
        };

        let count: i64 = data_row.get(0)?;
        Ok(count.max(0) as u64)
    }
}
