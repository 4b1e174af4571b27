// [libs/infra/db-turso/src/repositories/deformation/queries.rs]
/*!
 * =================================================================
 * APARATO: DEFORMATION SQL STORE (V9.2 - UPSERT KEYED)
 * CLASIFICACIÓN: INFRASTRUCTURE SQL (ESTRATO L3)
 * RESPONSABILIDAD: SENTENCIAS DE INGESTA MASIVA Y DERIVACIÓN
 *
 * # Mathematical Proof (Idempotent Replay):
 * La clave única (point_id, job_id, acquired_on) convierte cada
 * re-ejecución del mismo lote en una operación neutra: el upsert
 * reescribe valores idénticos y el conteo de filas no crece.
 * =================================================================
 */

/// Cabecera del upsert multi-fila; los VALUES se generan por trozo.
pub const BULK_UPSERT_PREFIX: &str = r#"
    INSERT INTO deformations (
        id, point_id, job_id, acquired_on, displacement_mm, coherence
    ) VALUES
"#;

/// Cláusula de conflicto sobre la clave natural de la medición.
pub const BULK_UPSERT_SUFFIX: &str = r#"
    ON CONFLICT(point_id, job_id, acquired_on) DO UPDATE SET
        displacement_mm = excluded.displacement_mm,
        coherence = excluded.coherence
"#;

/// Historia (fecha, desplazamiento) por punto de un activo, en orden
/// estable para la regresión.
pub const FETCH_SERIES_FOR_INFRASTRUCTURE: &str = r#"
    SELECT d.point_id, d.acquired_on, d.displacement_mm
    FROM deformations d
    JOIN points p ON p.id = d.point_id
    WHERE p.infrastructure_id = ?1
    ORDER BY d.point_id, d.acquired_on
"#;

/// Sella la velocidad derivada en todas las filas del punto.
pub const SEAL_POINT_VELOCITY: &str = r#"
    UPDATE deformations
    SET velocity_mm_year = ?2
    WHERE point_id = ?1
"#;

/// Filas de un punto, en orden temporal (auditoría y pruebas).
pub const FETCH_SAMPLES_FOR_POINT: &str = r#"
    SELECT point_id, job_id, acquired_on, displacement_mm, coherence, velocity_mm_year
    FROM deformations
    WHERE point_id = ?1
    ORDER BY acquired_on
"#;

/// Conteo de mediciones selladas por una misión.
pub const COUNT_FOR_JOB: &str = r#"
    SELECT COUNT(*) FROM deformations WHERE job_id = ?1
"#;
