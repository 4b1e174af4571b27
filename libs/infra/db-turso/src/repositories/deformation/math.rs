// [libs/infra/db-turso/src/repositories/deformation/math.rs]
/*!
 * =================================================================
 * APARATO: VELOCITY REGRESSION CORE (V9.1 - OLS)
 * CLASIFICACIÓN: INFRASTRUCTURE MATH (ESTRATO L3)
 * RESPONSABILIDAD: PENDIENTE DE MÍNIMOS CUADRADOS EN MM/AÑO
 *
 * # Mathematical Proof (Ordinary Least Squares):
 * Para y = a + b·t, la pendiente cerrada es
 * b = Σ(tᵢ-t̄)(yᵢ-ȳ) / Σ(tᵢ-t̄)². Con t en días y b en mm/día, la
 * velocidad anual es b·365.25, redondeada half-to-even a 0.001.
 * =================================================================
 */

use tellus_domain_models::units::{round_to_milli, DAYS_PER_YEAR};

/// Ajuste lineal sobre una serie (día_offset, desplazamiento_mm).
pub struct LinearTrend;

impl LinearTrend {
    /// Pendiente OLS en mm/día; None con menos de dos observaciones o
    /// una abscisa degenerada (todas las fechas iguales).
    pub fn fit_slope(series: &[(f64, f64)]) -> Option<f64> {
        if series.len() < 2 {
            return None;
        }

        let observation_count = series.len() as f64;
        let mean_day: f64 = series.iter().map(|(day, _)| day).sum::<f64>() / observation_count;
        let mean_displacement: f64 =
            series.iter().map(|(_, mm)| mm).sum::<f64>() / observation_count;

        let mut covariance_accumulator = 0.0;
        let mut variance_accumulator = 0.0;

        for (day, displacement) in series {
            let day_deviation = day - mean_day;
            covariance_accumulator += day_deviation * (displacement - mean_displacement);
            variance_accumulator += day_deviation * day_deviation;
        }

        if variance_accumulator <= 0.0 {
            return None;
        }

        Some(covariance_accumulator / variance_accumulator)
    }

    /// Velocidad anual sellada con precisión fija de 0.001 mm/año.
    pub fn annual_velocity(series: &[(f64, f64)]) -> Option<f64> {
        Self::fit_slope(series).map(|slope_mm_per_day| round_to_milli(slope_mm_per_day * DAYS_PER_YEAR))
    }
}
