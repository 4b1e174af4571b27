// [tests/mirror/libs/infra/db_turso/poll_queue.test.rs]
/*!
 * =================================================================
 * APARATO: CERTIFICADOR DE LA COLA DURABLE (V2.1)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L3-MIRROR
 * RESPONSABILIDAD: AUDITORÍA DE RECLAMO ATÓMICO Y ABSORCIÓN DE
 *                  DUPLICADOS
 * =================================================================
 */

use tellus_infra_db::{QueueRepository, TursoClient};
use uuid::Uuid;

async fn anchored_client(label: &str) -> TursoClient {
    TursoClient::connect(&format!("file:{label}?mode=memory&cache=shared"), None)
        .await
        .expect("CRITICAL_FAULT: Failed to anchor in-memory ledger.")
}

const NOW_MS: i64 = 1_770_000_000_000;

#[tokio::test]
async fn due_deliveries_claim_once_and_only_once() {
    let client = anchored_client("mem_queue_claim").await;
    let queue = QueueRepository::new(client.get_connection().unwrap());

    let job_id = Uuid::new_v4();
    queue.enqueue(job_id, NOW_MS - 1_000, 3).await.unwrap();

    let delivery = queue.claim_due(NOW_MS).await.unwrap().expect("due delivery");
    assert_eq!(delivery.job_id, job_id);
    assert_eq!(delivery.attempt, 3);

    // El reclamo consumió la entrega; no hay segunda.
    assert!(queue.claim_due(NOW_MS).await.unwrap().is_none());
    assert_eq!(queue.depth().await.unwrap(), 0);
}

#[tokio::test]
async fn future_deliveries_stay_invisible_until_due() {
    let client = anchored_client("mem_queue_future").await;
    let queue = QueueRepository::new(client.get_connection().unwrap());

    let job_id = Uuid::new_v4();
    queue.enqueue(job_id, NOW_MS + 60_000, 0).await.unwrap();

    assert!(queue.claim_due(NOW_MS).await.unwrap().is_none());
    assert_eq!(queue.depth().await.unwrap(), 1, "delivery remains scheduled");

    let delivery = queue.claim_due(NOW_MS + 61_000).await.unwrap().expect("now due");
    assert_eq!(delivery.job_id, job_id);
}

#[tokio::test]
async fn duplicate_enqueues_collapse_into_one_reprogrammed_delivery() {
    let client = anchored_client("mem_queue_dupes").await;
    let queue = QueueRepository::new(client.get_connection().unwrap());

    let job_id = Uuid::new_v4();
    queue.enqueue(job_id, NOW_MS + 10_000, 1).await.unwrap();
    // Recuperación post-reinicio re-encola lo mismo: absorción.
    queue.enqueue(job_id, NOW_MS - 5_000, 2).await.unwrap();

    assert_eq!(queue.depth().await.unwrap(), 1, "one row per mission");

    let delivery = queue.claim_due(NOW_MS).await.unwrap().expect("reprogrammed");
    assert_eq!(delivery.attempt, 2, "latest schedule wins");
}

#[tokio::test]
async fn oldest_due_delivery_is_served_first() {
    let client = anchored_client("mem_queue_order").await;
    let queue = QueueRepository::new(client.get_connection().unwrap());

    let older_job = Uuid::new_v4();
    let newer_job = Uuid::new_v4();
    queue.enqueue(newer_job, NOW_MS - 1_000, 0).await.unwrap();
    queue.enqueue(older_job, NOW_MS - 9_000, 0).await.unwrap();

    let first = queue.claim_due(NOW_MS).await.unwrap().expect("first claim");
    assert_eq!(first.job_id, older_job, "oldest schedule first");

    let second = queue.claim_due(NOW_MS).await.unwrap().expect("second claim");
    assert_eq!(second.job_id, newer_job);
}

#[tokio::test]
async fn terminal_missions_are_withdrawn_from_the_queue() {
    let client = anchored_client("mem_queue_withdraw").await;
    let queue = QueueRepository::new(client.get_connection().unwrap());

    let job_id = Uuid::new_v4();
    queue.enqueue(job_id, NOW_MS - 1_000, 0).await.unwrap();
    queue.remove(job_id).await.unwrap();

    assert!(queue.claim_due(NOW_MS).await.unwrap().is_none());
    assert_eq!(queue.depth().await.unwrap(), 0);
}
