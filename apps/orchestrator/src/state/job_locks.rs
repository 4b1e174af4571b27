// [apps/orchestrator/src/state/job_locks.rs]
/*!
 * =================================================================
 * APARATO: PER-JOB ADVISORY LOCK REGISTRY (V4.1)
 * CLASIFICACIÓN: SHARED STATE (ESTRATO L4)
 * RESPONSABILIDAD: EXCLUSIÓN MUTUA POR MISIÓN EN EL POOL DE WORKERS
 *
 * # Mathematical Proof (Serialized Transitions):
 * Cada misión posee exactamente un mutex asíncrono. Un worker debe
 * poseer el candado antes de mutar la fila, de modo que las entregas
 * duplicadas de la cola at-least-once se serializan: la segunda
 * entrega observa el estado ya mutado y se descarta sola.
 * =================================================================
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;
use uuid::Uuid;

#[derive(Default)]
pub struct JobLockRegistry {
    registry: Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>,
}

impl JobLockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Obtiene (o crea) el candado exclusivo de la misión.
    pub fn lease(&self, job_id: Uuid) -> Arc<AsyncMutex<()>> {
        let mut registry_guard = self.registry.lock().expect("lock registry poisoned");
        registry_guard.entry(job_id).or_insert_with(|| Arc::new(AsyncMutex::new(()))).clone()
    }

    /// Libera el candado de una misión terminal (higiene de RAM).
    pub fn release(&self, job_id: Uuid) {
        let mut registry_guard = self.registry.lock().expect("lock registry poisoned");
        registry_guard.remove(&job_id);
    }

    /// Candados vivos (telemetría).
    pub fn active_count(&self) -> usize {
        self.registry.lock().expect("lock registry poisoned").len()
    }
}
