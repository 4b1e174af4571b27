// [libs/infra/db-turso/src/repositories/infrastructure.rs]
/*!
 * =================================================================
 * APARATO: INFRASTRUCTURE REPOSITORY (V9.1 - CASCADE GUARD)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: LECTURA DEL AGREGADO RAÍZ Y BORRADO EN CASCADA
 *
 * El agregado se crea en una superficie externa; este estrato solo lo
 * registra (para siembra y pruebas), lo lee y lo desmantela. La
 * cascada se ejecuta en una única transacción: deformaciones ->
 * cola -> misiones -> puntos -> activo.
 * =================================================================
 */

use crate::errors::DbError;
use crate::repositories::parse_uuid;
use libsql::{params, Connection};
use tellus_domain_models::Infrastructure;
use tracing::{info, instrument};
use uuid::Uuid;

pub struct InfrastructureRepository {
    database_connection: Connection,
}

impl InfrastructureRepository {
    pub fn new(connection: Connection) -> Self {
        Self { database_connection: connection }
    }

    /// Registra un activo (vía de siembra; la superficie de alta vive
    /// en un estrato externo).
    pub async fn register(&self, infrastructure: &Infrastructure) -> Result<(), DbError> {
        self.database_connection
            .execute(
                "INSERT INTO infrastructures (id, owner_identity, display_name, boundary_wkt)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    infrastructure.id.to_string(),
                    infrastructure.owner_identity.clone(),
                    infrastructure.display_name.clone(),
                    infrastructure.boundary_wkt.clone()
                ],
            )
            .await?;
        Ok(())
    }

    /// Recupera el agregado por identificador.
    ///
    /// # Errors:
    /// - `DbError::InfrastructureNotFound` si la fila no existe.
    pub async fn fetch(&self, infrastructure_id: Uuid) -> Result<Infrastructure, DbError> {
        let mut query_result = self
            .database_connection
            .query(
                "SELECT id, owner_identity, display_name, boundary_wkt
                 FROM infrastructures WHERE id = ?1",
                params![infrastructure_id.to_string()],
            )
            .await?;

        let Some(data_row) = query_result.next().await? else {
            return Err(DbError::InfrastructureNotFound);
        };

        let raw_id: String = data_row.get(0)?;

        Ok(Infrastructure {
            id: parse_uuid(&raw_id)?,
            owner_identity: data_row.get(1)?,
            display_name: data_row.get(2)?,
            boundary_wkt: data_row.get(3)?,
        })
    }

    /// Desmantela el activo y toda su progenie en una transacción.
    #[instrument(skip(self))]
    pub async fn decommission(&self, infrastructure_id: Uuid) -> Result<(), DbError> {
        let asset_identifier = infrastructure_id.to_string();

        let cascade_transaction = self
            .database_connection
            .transaction()
            .await
            .map_err(|_| DbError::TransactionError)?;

        cascade_transaction
            .execute(
                "DELETE FROM deformations WHERE point_id IN
                 (SELECT id FROM points WHERE infrastructure_id = ?1)",
                params![asset_identifier.clone()],
            )
            .await?;
        cascade_transaction
            .execute(
                "DELETE FROM poll_queue WHERE job_id IN
                 (SELECT id FROM jobs WHERE infrastructure_id = ?1)",
                params![asset_identifier.clone()],
            )
            .await?;
        cascade_transaction
            .execute("DELETE FROM jobs WHERE infrastructure_id = ?1", params![asset_identifier.clone()])
            .await?;
        cascade_transaction
            .execute("DELETE FROM points WHERE infrastructure_id = ?1", params![asset_identifier.clone()])
            .await?;
        cascade_transaction
            .execute("DELETE FROM infrastructures WHERE id = ?1", params![asset_identifier.clone()])
            .await?;

        cascade_transaction.commit().await.map_err(|_| DbError::TransactionError)?;

        info!("🏗️  [DECOMMISSION]: Asset [{}] and its progeny removed.", asset_identifier);
        Ok(())
    }
}
