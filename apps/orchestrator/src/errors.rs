// [apps/orchestrator/src/errors.rs]
/*!
 * =================================================================
 * APARATO: CONTROL PLANE ERROR CATALOG (V4.1)
 * CLASIFICACIÓN: APPLICATION SHELL (ESTRATO L4)
 * RESPONSABILIDAD: FALLOS DE CARA AL SOLICITANTE
 *
 * Los fallos de este catálogo retornan inmediatamente en la frontera
 * de solicitud. Los fallos transitorios internos jamás llegan aquí:
 * se reintentan dentro del componente que los origina y, agotados,
 * emergen como estado FAILED sobre la fila de misión.
 * =================================================================
 */

use tellus_core_geogrid::GridFault;
use tellus_domain_models::ModelFault;
use tellus_infra_db::DbError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// Geometría rechazada o área sobre el techo (núcleo geodésico).
    #[error(transparent)]
    Grid(#[from] GridFault),

    /// La retícula proyectada excede el techo de puntos por activo.
    #[error("[L4_CONTROL_FAULT]: POINT_LIMIT_EXCEEDED -> {projected} > {ceiling}")]
    PointLimitExceeded { projected: usize, ceiling: usize },

    /// El activo referido no existe.
    #[error("[L4_CONTROL_FAULT]: INFRASTRUCTURE_NOT_FOUND")]
    InfrastructureNotFound,

    /// El activo no tiene retícula materializada.
    #[error("[L4_CONTROL_FAULT]: NO_POINTS_FOR_INFRASTRUCTURE")]
    NoPointsForInfrastructure,

    /// El catálogo no respondió tras agotar los reintentos.
    #[error("[L4_CONTROL_FAULT]: CATALOG_UNAVAILABLE -> {0}")]
    CatalogUnavailable(String),

    /// Ningún par superó el umbral de calidad configurado.
    #[error("[L4_CONTROL_FAULT]: NO_SUITABLE_PAIRS")]
    NoSuitablePairs,

    /// El procesador rechazó el sometimiento; mensaje retenido.
    #[error("[L4_CONTROL_FAULT]: UPSTREAM_REJECTED -> {0}")]
    UpstreamRejected(String),

    /// Reintento solicitado desde un estado que no lo admite.
    #[error("[L4_CONTROL_FAULT]: RETRY_NOT_PERMITTED -> current status {0}")]
    RetryNotPermitted(String),

    /// Fallo de persistencia no clasificado como de cara al cliente.
    #[error(transparent)]
    Storage(DbError),

    /// Fallo de transformación de modelos (WKT corrupto, etc.).
    #[error(transparent)]
    Model(#[from] ModelFault),
}

impl From<DbError> for OrchestratorError {
    fn from(fault: DbError) -> Self {
        match fault {
            DbError::InfrastructureNotFound => OrchestratorError::InfrastructureNotFound,
            other => OrchestratorError::Storage(other),
        }
    }
}
