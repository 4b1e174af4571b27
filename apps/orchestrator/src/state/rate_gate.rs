// [apps/orchestrator/src/state/rate_gate.rs]
/*!
 * =================================================================
 * APARATO: UPSTREAM RATE GATE (V4.1 - FIXED WINDOW)
 * CLASIFICACIÓN: SHARED STATE (ESTRATO L4)
 * RESPONSABILIDAD: THROTTLE DE VENTANA FIJA HACIA EL PROCESADOR
 *
 * El servicio externo opera bajo una política de cortesía de
 * free-tier; la compuerta admite como máximo N llamadas por ventana
 * de 60 s y duerme a los workers excedentes hasta la ventana
 * siguiente.
 * =================================================================
 */

use std::time::{Duration, Instant};
use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;

const WINDOW_SPAN: Duration = Duration::from_secs(60);

struct WindowState {
    window_started: Instant,
    admitted: u32,
}

pub struct UpstreamRateGate {
    max_per_window: u32,
    state: AsyncMutex<WindowState>,
}

impl UpstreamRateGate {
    pub fn new(max_per_window: u32) -> Self {
        Self {
            max_per_window: max_per_window.max(1),
            state: AsyncMutex::new(WindowState {
                window_started: Instant::now(),
                admitted: 0,
            }),
        }
    }

    /// Admite una llamada, durmiendo hasta la ventana siguiente si la
    /// actual está saturada.
    pub async fn admit(&self) {
        loop {
            let sleep_until_next_window = {
                let mut window_guard = self.state.lock().await;
                let elapsed = window_guard.window_started.elapsed();

                if elapsed >= WINDOW_SPAN {
                    window_guard.window_started = Instant::now();
                    window_guard.admitted = 0;
                }

                if window_guard.admitted < self.max_per_window {
                    window_guard.admitted += 1;
                    return;
                }

                WINDOW_SPAN.saturating_sub(elapsed)
            };

            debug!(
                "⏳ [RATE_GATE]: Window saturated; sleeping {:?} before next admission.",
                sleep_until_next_window
            );
            tokio::time::sleep(sleep_until_next_window.max(Duration::from_millis(50))).await;
        }
    }
}
