// [tests/mirror/libs/infra/db_turso/deformation_ingestion.test.rs]
/*!
 * =================================================================
 * APARATO: CERTIFICADOR DE INGESTA DE DEFORMACIONES (V2.2)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L3-MIRROR
 * RESPONSABILIDAD: AUDITORÍA DEL UPSERT MASIVO IDEMPOTENTE
 * =================================================================
 */

use chrono::NaiveDate;
use tellus_domain_models::PointMeasurement;
use tellus_infra_db::{DeformationRepository, TursoClient};
use uuid::Uuid;

async fn anchored_client(label: &str) -> TursoClient {
    TursoClient::connect(&format!("file:{label}?mode=memory&cache=shared"), None)
        .await
        .expect("CRITICAL_FAULT: Failed to anchor in-memory ledger.")
}

fn measurement(point_id: Uuid, date: (i32, u32, u32), displacement_mm: f64) -> PointMeasurement {
    PointMeasurement {
        point_id,
        acquired_on: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        displacement_mm,
        coherence: Some(0.87),
    }
}

#[tokio::test]
async fn replayed_batches_leave_identical_table_contents() {
    let client = anchored_client("mem_def_replay").await;
    let deformations = DeformationRepository::new(client.get_connection().unwrap());

    let job_id = Uuid::new_v4();
    let point_a = Uuid::new_v4();
    let point_b = Uuid::new_v4();

    let batch = vec![
        measurement(point_a, (2026, 1, 13), -2.417),
        measurement(point_a, (2026, 1, 25), -3.002),
        measurement(point_b, (2026, 1, 13), 0.513),
        measurement(point_b, (2026, 1, 25), 1.118),
    ];

    // Trozos de 1 fila: máxima fragmentación del upsert.
    deformations.bulk_upsert(job_id, &batch, 1).await.expect("first ingest");
    assert_eq!(deformations.count_for_job(job_id).await.unwrap(), 4);

    // Reproducción íntegra del mismo lote: tabla bit a bit idéntica.
    deformations.bulk_upsert(job_id, &batch, 1_000).await.expect("replay ingest");
    assert_eq!(deformations.count_for_job(job_id).await.unwrap(), 4);

    let history = deformations.fetch_for_point(point_a).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].displacement_mm, -2.417);
    assert_eq!(history[1].displacement_mm, -3.002);
    assert_eq!(history[0].coherence, Some(0.87));
}

#[tokio::test]
async fn natural_key_conflicts_rewrite_instead_of_duplicating() {
    let client = anchored_client("mem_def_conflict").await;
    let deformations = DeformationRepository::new(client.get_connection().unwrap());

    let job_id = Uuid::new_v4();
    let point_id = Uuid::new_v4();

    deformations
        .bulk_upsert(job_id, &[measurement(point_id, (2026, 2, 6), -1.0)], 1_000)
        .await
        .unwrap();

    // Misma clave natural, valor corregido: reescritura, no duplicado.
    deformations
        .bulk_upsert(job_id, &[measurement(point_id, (2026, 2, 6), -1.25)], 1_000)
        .await
        .unwrap();

    assert_eq!(deformations.count_for_job(job_id).await.unwrap(), 1);
    let history = deformations.fetch_for_point(point_id).await.unwrap();
    assert_eq!(history[0].displacement_mm, -1.25);
}

#[tokio::test]
async fn distinct_jobs_coexist_for_the_same_point_and_date() {
    let client = anchored_client("mem_def_coexist").await;
    let deformations = DeformationRepository::new(client.get_connection().unwrap());

    let point_id = Uuid::new_v4();
    let job_alpha = Uuid::new_v4();
    let job_beta = Uuid::new_v4();

    deformations
        .bulk_upsert(job_alpha, &[measurement(point_id, (2026, 3, 2), 4.2)], 1_000)
        .await
        .unwrap();
    deformations
        .bulk_upsert(job_beta, &[measurement(point_id, (2026, 3, 2), 4.9)], 1_000)
        .await
        .unwrap();

    // La clave es (punto, misión, fecha): misiones distintas conviven.
    assert_eq!(deformations.fetch_for_point(point_id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn coherence_travels_nullable_through_the_ledger() {
    let client = anchored_client("mem_def_nullable").await;
    let deformations = DeformationRepository::new(client.get_connection().unwrap());

    let job_id = Uuid::new_v4();
    let point_id = Uuid::new_v4();

    let mut uncertified = measurement(point_id, (2026, 4, 1), 0.0);
    uncertified.coherence = None;

    deformations.bulk_upsert(job_id, &[uncertified], 1_000).await.unwrap();

    let history = deformations.fetch_for_point(point_id).await.unwrap();
    assert_eq!(history[0].coherence, None);
    assert_eq!(history[0].velocity_mm_year, None, "velocity is null until derived");
}
