// [libs/infra/catalog-client/src/errors.rs]
/*!
 * =================================================================
 * APARATO: CATALOG ERROR CATALOG (V2.0)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: CATALOGACIÓN SEMÁNTICA DE FALLOS DE CATÁLOGO
 * =================================================================
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// El catálogo no respondió tras agotar los reintentos.
    #[error("[L3_CATALOG_FAULT]: CATALOG_UNAVAILABLE -> {0}")]
    Unavailable(String),

    /// La respuesta llegó pero su estructura fue rechazada.
    #[error("[L3_CATALOG_FAULT]: MALFORMED_RESPONSE -> {0}")]
    MalformedResponse(String),
}
