// [libs/domain/models-rs/src/infrastructure.rs]
/*!
 * =================================================================
 * APARATO: INFRASTRUCTURE ENTITY (V3.0)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: CONTRATO DEL AGREGADO RAÍZ DE MONITOREO
 * =================================================================
 */

use crate::ModelFault;
use geo_types::Polygon;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wkt::TryFromWkt;

/// Activo civil bajo monitoreo (puente, presa, tubería).
///
/// La entidad se crea en un estrato externo y es de solo lectura para
/// el plano de control; su borrado cascada sobre puntos, misiones y
/// deformaciones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Infrastructure {
    /// Identificador opaco del activo.
    pub id: Uuid,
    /// Identidad del propietario resuelta por la superficie externa.
    pub owner_identity: String,
    /// Nombre exhibible del activo.
    pub display_name: String,
    /// Contorno WGS84 (lon/lat) serializado como WKT.
    pub boundary_wkt: String,
}

impl Infrastructure {
    /// Materializa el contorno WKT como polígono del ecosistema geo.
    pub fn boundary_polygon(&self) -> Result<Polygon<f64>, ModelFault> {
        Polygon::try_from_wkt_str(&self.boundary_wkt)
            .map_err(|fault| ModelFault::MalformedBoundary(fault.to_string()))
    }
}
