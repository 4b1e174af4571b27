// [tests/mirror/libs/core/raster/projection_integrity.test.rs]
/*!
 * =================================================================
 * APARATO: CERTIFICADOR DE PROYECCIÓN TRANSVERSA (V1.1)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-MIRROR
 * RESPONSABILIDAD: AUDITORÍA DEL NÚCLEO UTM FORWARD
 * =================================================================
 */

use tellus_core_raster::projection::{utm_forward, UtmZone};
use tellus_core_raster::RasterFault;

#[test]
fn epsg_families_decode_into_utm_zones() {
    let north = UtmZone::from_epsg(32631).expect("31N is valid");
    assert_eq!(north.number, 31);
    assert!(north.northern_hemisphere);
    assert_eq!(north.central_meridian_deg(), 3.0);

    let south = UtmZone::from_epsg(32733).expect("33S is valid");
    assert_eq!(south.number, 33);
    assert!(!south.northern_hemisphere);
    assert_eq!(south.central_meridian_deg(), 15.0);

    assert!(matches!(UtmZone::from_epsg(4326), Err(RasterFault::UnsupportedCrs(4326))));
    assert!(matches!(UtmZone::from_epsg(32600), Err(RasterFault::UnsupportedCrs(_))));
    assert!(matches!(UtmZone::from_epsg(32761), Err(RasterFault::UnsupportedCrs(_))));
}

#[test]
fn equator_on_central_meridian_is_the_false_origin() {
    let zone = UtmZone::from_epsg(32631).unwrap();
    let (easting, northing) = utm_forward(3.0, 0.0, zone);

    assert!((easting - 500_000.0).abs() < 1e-6, "easting {}", easting);
    assert!(northing.abs() < 1e-6, "northing {}", northing);
}

#[test]
fn easting_is_symmetric_around_the_central_meridian() {
    let zone = UtmZone::from_epsg(32631).unwrap();
    let (east_of, _) = utm_forward(3.5, 45.0, zone);
    let (west_of, _) = utm_forward(2.5, 45.0, zone);

    let east_offset = east_of - 500_000.0;
    let west_offset = 500_000.0 - west_of;
    assert!(
        (east_offset - west_offset).abs() < 1e-6,
        "asymmetric offsets: {} vs {}",
        east_offset,
        west_offset
    );
}

#[test]
fn northing_grows_monotonically_with_latitude() {
    let zone = UtmZone::from_epsg(32631).unwrap();
    let mut previous_northing = f64::NEG_INFINITY;

    for latitude_step in 0..8 {
        let latitude = 10.0 + f64::from(latitude_step) * 8.0;
        let (_, northing) = utm_forward(3.2, latitude, zone);
        assert!(northing > previous_northing, "northing regressed at {latitude}");
        previous_northing = northing;
    }
}

#[test]
fn parisian_coordinate_lands_in_the_known_utm_envelope() {
    // Zona 31N; valores de referencia con holgura de decenas de metros.
    let zone = UtmZone::from_epsg(32631).unwrap();
    let (easting, northing) = utm_forward(2.3522, 48.8566, zone);

    assert!(easting > 445_000.0 && easting < 460_000.0, "easting {}", easting);
    assert!(northing > 5_405_000.0 && northing < 5_418_000.0, "northing {}", northing);
}

#[test]
fn southern_hemisphere_carries_the_false_northing() {
    let zone = UtmZone::from_epsg(32731).unwrap();
    let (_, northing) = utm_forward(3.0, -0.001, zone);

    assert!(northing < 10_000_000.0);
    assert!(northing > 9_999_000.0, "false northing missing: {}", northing);
}
