// [libs/domain/models-rs/src/tests_serialization.rs]
/*!
 * =================================================================
 * APARATO: CERTIFICADOR DE INTEGRIDAD DE MODELOS (V1.2)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L2-MIRROR
 * RESPONSABILIDAD: AUDITORÍA DE CONTRATOS SERDE Y MÁQUINA DE ESTADOS
 * =================================================================
 */

use chrono::NaiveDate;
use tellus_domain_models::{JobStatus, ModelFault, PairCandidate, PointMeasurement};
use uuid::Uuid;

#[test]
fn status_labels_round_trip_through_ledger_form() {
    for status in [
        JobStatus::Pending,
        JobStatus::Running,
        JobStatus::Processing,
        JobStatus::Succeeded,
        JobStatus::Failed,
        JobStatus::Cancelled,
    ] {
        let reconstructed = JobStatus::parse(status.as_str())
            .expect("canonical label must parse back");
        assert_eq!(reconstructed, status);
    }

    assert!(matches!(
        JobStatus::parse("EXPLODED"),
        Err(ModelFault::UnknownStatus(_))
    ));
}

#[test]
fn transition_relation_is_the_closed_diagram() {
    use JobStatus::*;

    // Cadena nominal completa.
    assert!(Pending.may_transition_to(Running));
    assert!(Running.may_transition_to(Processing));
    assert!(Processing.may_transition_to(Succeeded));

    // Salidas laterales desde estados no terminales.
    assert!(Pending.may_transition_to(Failed));
    assert!(Running.may_transition_to(Cancelled));
    assert!(Processing.may_transition_to(Failed));

    // El éxito jamás saltea el post-procesamiento.
    assert!(!Running.may_transition_to(Succeeded));
    assert!(!Pending.may_transition_to(Processing));

    // Los terminales son tumbas.
    assert!(!Succeeded.may_transition_to(Failed));
    assert!(!Failed.may_transition_to(Running));
    assert!(!Cancelled.may_transition_to(Pending));
}

#[test]
fn measurement_contract_survives_json_round_trip() {
    let artifact = PointMeasurement {
        point_id: Uuid::new_v4(),
        acquired_on: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        displacement_mm: -4.217,
        coherence: Some(0.83),
    };

    let wire = serde_json::to_string(&artifact).expect("serialization");
    let back: PointMeasurement = serde_json::from_str(&wire).expect("deserialization");

    assert_eq!(back.point_id, artifact.point_id);
    assert_eq!(back.acquired_on, artifact.acquired_on);
    assert_eq!(back.displacement_mm, artifact.displacement_mm);
    assert_eq!(back.coherence, artifact.coherence);
}

#[test]
fn pair_candidate_score_is_plain_data() {
    let candidate = PairCandidate {
        reference_granule: "S1A_IW_SLC__1SDV_20260101".into(),
        secondary_granule: "S1A_IW_SLC__1SDV_20260113".into(),
        temporal_baseline_days: 12.0,
        perpendicular_baseline_m: 100.0,
        orbital_path: Some(88),
        quality_score: 0.66,
    };

    let wire = serde_json::to_value(&candidate).expect("serialization");
    assert_eq!(wire["temporal_baseline_days"], 12.0);
    assert_eq!(wire["orbital_path"], 88);
}
