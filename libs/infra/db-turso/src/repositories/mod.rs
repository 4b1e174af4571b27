// [libs/infra/db-turso/src/repositories/mod.rs]
/*!
 * =================================================================
 * APARATO: REPOSITORY REGISTRY (V9.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: REGISTRO NOMINAL DE REPOSITORIOS Y MAPEO DE VALORES
 * =================================================================
 */

pub mod deformation;
pub mod infrastructure;
pub mod job;
pub mod point;
pub mod queue;

pub use deformation::DeformationRepository;
pub use infrastructure::InfrastructureRepository;
pub use job::{JobRepository, JobSeed};
pub use point::PointRepository;
pub use queue::QueueRepository;

use crate::errors::DbError;
use libsql::Value;
use uuid::Uuid;

/// Texto opcional hacia un parámetro SQLite.
pub(crate) fn text_or_null(value: Option<String>) -> Value {
    match value {
        Some(text) => Value::Text(text),
        None => Value::Null,
    }
}

/// Real opcional hacia un parámetro SQLite.
pub(crate) fn real_or_null(value: Option<f64>) -> Value {
    match value {
        Some(real) => Value::Real(real),
        None => Value::Null,
    }
}

/// UUID desde su forma textual persistida.
pub(crate) fn parse_uuid(text: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(text).map_err(|fault| DbError::MappingError(format!("UUID_REJECTED: {fault}")))
}
