// [libs/infra/db-turso/src/repositories/job/queries.rs]
/*!
 * =================================================================
 * APARATO: MISSION LEDGER SQL STORE (V9.3 - STATE GUARDED)
 * CLASIFICACIÓN: INFRASTRUCTURE SQL (ESTRATO L3)
 * RESPONSABILIDAD: SENTENCIAS ATÓMICAS DEL CICLO DE VIDA InSAR
 *
 * # Mathematical Proof (Guarded Transitions):
 * Cada UPDATE porta una guardia de estado (WHERE status IN ...). La
 * máquina PENDING -> RUNNING -> PROCESSING -> SUCCEEDED, con salidas
 * laterales a FAILED/CANCELLED desde estados no terminales, queda
 * sellada en el propio motor SQL: una transición ilegal afecta cero
 * filas y se reporta como violación de estado.
 * =================================================================
 */

// --- ESTRATO DE IGNICIÓN ---

/// Registra una nueva misión interferométrica en estado PENDING.
pub const INITIALIZE_JOB: &str = r#"
    INSERT INTO jobs (
        id, infrastructure_id, upstream_id, status, bbox_wkt,
        reference_granule, secondary_granule, retry_of,
        created_at
    ) VALUES (?1, ?2, ?3, 'PENDING', ?4, ?5, ?6, ?7, CURRENT_TIMESTAMP)
"#;

// --- ESTRATO DE LECTURA ---

pub const FETCH_JOB: &str = r#"
    SELECT
        id, infrastructure_id, upstream_id, status, bbox_wkt,
        reference_granule, secondary_granule, product_files_json,
        error_message, retry_count, processing_ms, retry_of,
        created_at, first_running_at, completed_at
    FROM jobs
    WHERE id = ?1
"#;

/// Misiones vivas a re-encolar tras un reinicio del proceso.
pub const FETCH_NON_TERMINAL_IDS: &str = r#"
    SELECT id FROM jobs
    WHERE status IN ('PENDING', 'RUNNING', 'PROCESSING')
"#;

// --- ESTRATO DE TRANSICIONES GUARDADAS ---

/// PENDING/RUNNING -> RUNNING: sella el primer avistamiento RUNNING y
/// acumula el contador de sondeos.
pub const MARK_RUNNING: &str = r#"
    UPDATE jobs
    SET status = 'RUNNING',
        retry_count = retry_count + 1,
        first_running_at = COALESCE(first_running_at, ?2)
    WHERE id = ?1 AND status IN ('PENDING', 'RUNNING')
"#;

/// RUNNING -> PROCESSING: el servicio externo terminó; comienza el
/// post-procesamiento local.
pub const MARK_PROCESSING: &str = r#"
    UPDATE jobs
    SET status = 'PROCESSING'
    WHERE id = ?1 AND status = 'RUNNING'
"#;

/// PROCESSING -> SUCCEEDED: toda la ingesta quedó persistida.
pub const MARK_SUCCEEDED: &str = r#"
    UPDATE jobs
    SET status = 'SUCCEEDED',
        processing_ms = ?2,
        completed_at = ?3
    WHERE id = ?1 AND status = 'PROCESSING'
"#;

/// No-terminal -> FAILED con mensaje forense.
pub const MARK_FAILED: &str = r#"
    UPDATE jobs
    SET status = 'FAILED',
        error_message = ?2,
        completed_at = ?3
    WHERE id = ?1 AND status IN ('PENDING', 'RUNNING', 'PROCESSING')
"#;

/// No-terminal -> CANCELLED por solicitud externa.
pub const MARK_CANCELLED: &str = r#"
    UPDATE jobs
    SET status = 'CANCELLED',
        completed_at = ?2
    WHERE id = ?1 AND status IN ('PENDING', 'RUNNING', 'PROCESSING')
"#;

// --- ESTRATO DE EVIDENCIA ---

/// Sella el inventario de productos reportado aguas arriba.
pub const RECORD_PRODUCT_FILES: &str = r#"
    UPDATE jobs
    SET product_files_json = ?2
    WHERE id = ?1
"#;
