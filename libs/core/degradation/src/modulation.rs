// [libs/core/degradation/src/modulation.rs]
/*!
 * APARATO: MODULACION POR ANIMO Y ENSAMBLAJE DE ESTADO (ESTRATO L1)
 * RESPONSABILIDAD: Aplica la onda de animo sobre el coeficiente base y
 * deriva los campos observables del modelo de degradacion (spec.md 4.2).
 */

use lifespan_domain_models::{DegradationParams, DegradationState};

use crate::curve::coefficient;

/// A happier agent degrades slower: `modulated = clamp(c*(1-0.2*mood), 0, 1)`.
/// `mood` is expected in `[-1, 1]`; a trough therefore raises the
/// effective coefficient by up to 20%, a peak lowers it by up to 20%.
pub fn modulate(raw_coefficient: f64, mood_value: f64) -> f64 {
    let factor = 1.0 - 0.2 * mood_value;
    (raw_coefficient * factor).clamp(0.0, 1.0)
}

/// Assembles the full derived snapshot for one tick (spec.md 4.2).
pub fn derive_state(onset_cycle: Option<i64>, current_cycle: i64, mood_value: f64, params: DegradationParams) -> DegradationState {
    let Some(onset) = onset_cycle else {
        return DegradationState::inactive();
    };

    let n = current_cycle - onset;
    let raw = coefficient(n, params);
    let modulated = modulate(raw, mood_value);

    DegradationState {
        active: true,
        coefficient: modulated,
        tool_failure_probability: modulated * 0.6,
        heartbeat_drift_ms: modulated * 30_000.0,
        inference_downgrade: modulated > 0.3,
        onset_cycle: Some(onset),
    }
}
