// [libs/core/raster/src/projection.rs]
/*!
 * =================================================================
 * APARATO: TRANSVERSE MERCATOR FORWARD CORE (V6.1)
 * CLASIFICACIÓN: COMPUTE CORE (ESTRATO L1)
 * RESPONSABILIDAD: PROYECCIÓN WGS84 -> UTM PARA CONSULTAS DE PÍXEL
 *
 * # Mathematical Proof (Series Accuracy):
 * Serie clásica de Redfearn truncada en A⁶ sobre el elipsoide WGS84.
 * Dentro de una zona UTM (|Δλ| ≤ 3°) el error de truncamiento queda
 * por debajo del milímetro, órdenes de magnitud bajo el tamaño de
 * píxel de los productos geocodificados (decenas de metros).
 * =================================================================
 */

use crate::errors::RasterFault;

/// Semieje mayor WGS84 (m).
const SEMI_MAJOR_AXIS: f64 = 6_378_137.0;
/// Achatamiento WGS84.
const FLATTENING: f64 = 1.0 / 298.257_223_563;
/// Factor de escala en el meridiano central UTM.
const CENTRAL_SCALE: f64 = 0.9996;
/// Falso este UTM (m).
const FALSE_EASTING: f64 = 500_000.0;
/// Falso norte para el hemisferio sur (m).
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Zona UTM decodificada desde un código EPSG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtmZone {
    pub number: u8,
    pub northern_hemisphere: bool,
}

impl UtmZone {
    /// Decodifica las familias EPSG 326xx (norte) y 327xx (sur).
    pub fn from_epsg(epsg: u32) -> Result<Self, RasterFault> {
        match epsg {
            32601..=32660 => Ok(Self {
                number: (epsg - 32600) as u8,
                northern_hemisphere: true,
            }),
            32701..=32760 => Ok(Self {
                number: (epsg - 32700) as u8,
                northern_hemisphere: false,
            }),
            other => Err(RasterFault::UnsupportedCrs(other)),
        }
    }

    /// Meridiano central de la zona, en grados.
    pub fn central_meridian_deg(&self) -> f64 {
        f64::from(self.number) * 6.0 - 183.0
    }
}

/// Proyecta una coordenada WGS84 a (easting, northing) en la zona dada.
pub fn utm_forward(longitude_deg: f64, latitude_deg: f64, zone: UtmZone) -> (f64, f64) {
    let phi = latitude_deg.to_radians();
    let lambda = longitude_deg.to_radians();
    let lambda_origin = zone.central_meridian_deg().to_radians();

    let e2 = FLATTENING * (2.0 - FLATTENING);
    let e4 = e2 * e2;
    let e6 = e4 * e2;
    let ep2 = e2 / (1.0 - e2);

    let sin_phi = phi.sin();
    let cos_phi = phi.cos();
    let tan_phi = phi.tan();

    let prime_vertical_radius = SEMI_MAJOR_AXIS / (1.0 - e2 * sin_phi * sin_phi).sqrt();
    let t = tan_phi * tan_phi;
    let c = ep2 * cos_phi * cos_phi;
    let a = (lambda - lambda_origin) * cos_phi;

    // Arco de meridiano desde el ecuador hasta φ.
    let meridian_arc = SEMI_MAJOR_AXIS
        * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
            - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
            + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
            - (35.0 * e6 / 3072.0) * (6.0 * phi).sin());

    let a2 = a * a;
    let a3 = a2 * a;
    let a4 = a3 * a;
    let a5 = a4 * a;
    let a6 = a5 * a;

    let easting = FALSE_EASTING
        + CENTRAL_SCALE
            * prime_vertical_radius
            * (a
                + (1.0 - t + c) * a3 / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a5 / 120.0);

    let mut northing = CENTRAL_SCALE
        * (meridian_arc
            + prime_vertical_radius
                * tan_phi
                * (a2 / 2.0
                    + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                    + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a6 / 720.0));

    if !zone.northern_hemisphere {
        northing += FALSE_NORTHING_SOUTH;
    }

    (easting, northing)
}
