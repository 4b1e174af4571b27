// [libs/infra/catalog-client/src/lib.rs]
/*!
 * =================================================================
 * APARATO: GRANULE CATALOG HUB (V2.0)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: EXPOSICIÓN NOMINAL DEL CATÁLOGO DE ADQUISICIONES
 * =================================================================
 */

pub mod client;
pub mod errors;

pub use client::{AsfCatalogClient, CatalogRetryPolicy, GranuleQuery};
pub use errors::CatalogError;

use async_trait::async_trait;
use tellus_domain_models::GranuleRecord;

/// Capacidad estrecha del catálogo: solo búsqueda de granulos SLC.
#[async_trait]
pub trait GranuleCatalog: Send + Sync {
    async fn search_slc_granules(
        &self,
        query: &GranuleQuery,
    ) -> Result<Vec<GranuleRecord>, CatalogError>;
}
