// [tests/mirror/libs/core/geogrid/boundary_validation.test.rs]
/*!
 * =================================================================
 * APARATO: CERTIFICADOR DE CONTORNOS AOI (V2.1)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-MIRROR
 * RESPONSABILIDAD: ESCRUTINIO DE SIMPLICIDAD, RANGOS Y TECHOS
 * =================================================================
 */

use geo::{polygon, Polygon};
use tellus_core_geogrid::{
    estimate_lattice, validate_boundary, GridFault, GridPolicy, METERS_PER_DEGREE_LATITUDE,
};

fn square_at(center_lon: f64, center_lat: f64, side_m: f64) -> Polygon<f64> {
    let half_lat = side_m / 2.0 / METERS_PER_DEGREE_LATITUDE;
    let half_lon = side_m / 2.0 / (center_lat.to_radians().cos() * METERS_PER_DEGREE_LATITUDE);

    polygon![
        (x: center_lon - half_lon, y: center_lat - half_lat),
        (x: center_lon + half_lon, y: center_lat - half_lat),
        (x: center_lon + half_lon, y: center_lat + half_lat),
        (x: center_lon - half_lon, y: center_lat + half_lat),
        (x: center_lon - half_lon, y: center_lat - half_lat),
    ]
}

#[test]
fn area_ceiling_is_inclusive_at_the_exact_boundary() {
    let boundary = square_at(2.35, 48.85, 2_000.0);
    let generous_policy = GridPolicy { max_area_km2: 1_000.0, ..GridPolicy::default() };

    // El área geodésica exacta del contorno fija el techo de la prueba.
    let exact_area_km2 =
        validate_boundary(&boundary, &generous_policy).expect("square is valid");

    // Techo == área: admitido.
    let at_limit_policy = GridPolicy { max_area_km2: exact_area_km2, ..GridPolicy::default() };
    assert!(validate_boundary(&boundary, &at_limit_policy).is_ok());

    // Techo infinitesimalmente menor: rechazado.
    let epsilon_policy = GridPolicy {
        max_area_km2: exact_area_km2 * (1.0 - 1e-12),
        ..GridPolicy::default()
    };
    assert!(matches!(
        validate_boundary(&boundary, &epsilon_policy),
        Err(GridFault::AreaTooLarge { .. })
    ));
}

#[test]
fn nine_square_kilometers_exceed_the_default_ceiling() {
    let oversized = square_at(2.35, 48.85, 3_000.0);
    assert!(matches!(
        validate_boundary(&oversized, &GridPolicy::default()),
        Err(GridFault::AreaTooLarge { .. })
    ));
}

#[test]
fn latitude_ceiling_admits_85_and_refuses_beyond() {
    let policy = GridPolicy::default();

    // Cuadrado cuyo vértice superior toca exactamente 85°.
    let top_touching = polygon![
        (x: 10.0, y: 84.99),
        (x: 10.02, y: 84.99),
        (x: 10.02, y: 85.0),
        (x: 10.0, y: 85.0),
        (x: 10.0, y: 84.99),
    ];
    assert!(validate_boundary(&top_touching, &policy).is_ok());

    // Un épsilon más allá del techo: rechazado.
    let beyond = polygon![
        (x: 10.0, y: 84.99),
        (x: 10.02, y: 84.99),
        (x: 10.02, y: 85.000001),
        (x: 10.0, y: 85.000001),
        (x: 10.0, y: 84.99),
    ];
    assert!(matches!(
        validate_boundary(&beyond, &policy),
        Err(GridFault::InvalidGeometry(_))
    ));
}

#[test]
fn self_intersecting_bowtie_is_refused() {
    let bowtie = polygon![
        (x: 0.0, y: 0.0),
        (x: 0.01, y: 0.01),
        (x: 0.01, y: 0.0),
        (x: 0.0, y: 0.01),
        (x: 0.0, y: 0.0),
    ];
    assert!(matches!(
        validate_boundary(&bowtie, &GridPolicy::default()),
        Err(GridFault::InvalidGeometry(_))
    ));
}

#[test]
fn vertices_outside_wgs84_ranges_are_refused() {
    let escaped = polygon![
        (x: 180.5, y: 10.0),
        (x: 180.6, y: 10.0),
        (x: 180.6, y: 10.1),
        (x: 180.5, y: 10.1),
        (x: 180.5, y: 10.0),
    ];
    assert!(matches!(
        validate_boundary(&escaped, &GridPolicy::default()),
        Err(GridFault::InvalidGeometry(_))
    ));
}

#[test]
fn degenerate_rings_are_refused() {
    let needle: Polygon<f64> = polygon![
        (x: 0.0, y: 0.0),
        (x: 0.01, y: 0.0),
        (x: 0.0, y: 0.0),
    ];
    assert!(matches!(
        validate_boundary(&needle, &GridPolicy::default()),
        Err(GridFault::InvalidGeometry(_))
    ));
}

#[test]
fn sub_meter_spacing_is_refused_before_any_survey() {
    let boundary = square_at(2.35, 48.85, 100.0);
    assert!(matches!(
        estimate_lattice(&boundary, 0.5, &GridPolicy::default()),
        Err(GridFault::InvalidSpacing(_))
    ));
}
