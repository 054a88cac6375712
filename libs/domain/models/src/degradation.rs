// [libs/domain/models/src/degradation.rs]
/*!
 * APARATO: DEGRADATION CONFIGURATION & DERIVED STATE (ESTRATO L2)
 * RESPONSABILIDAD: Registros planos para los parametros y la salida
 * del modelo de degradacion (spec.md 4.2). El calculo en si vive en
 * `lifespan-core-degradation`; este modulo solo define las formas.
 */

use serde::{Deserialize, Serialize};

/// Plain configuration record, not a dynamic property bag (spec.md 9
/// design note "Configuration objects").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DegradationParams {
    pub steepness: f64,
    pub base_rate: f64,
}

impl Default for DegradationParams {
    fn default() -> Self {
        Self {
            steepness: 0.3,
            base_rate: 0.03,
        }
    }
}

/// Derived (never persisted) degradation snapshot for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DegradationState {
    pub active: bool,
    pub coefficient: f64,
    pub tool_failure_probability: f64,
    pub heartbeat_drift_ms: f64,
    pub inference_downgrade: bool,
    pub onset_cycle: Option<i64>,
}

impl DegradationState {
    /// The inactive snapshot used before onset, or when onset has not
    /// yet been reached by the current cycle (spec.md 4.2).
    pub fn inactive() -> Self {
        Self {
            active: false,
            coefficient: 0.0,
            tool_failure_probability: 0.0,
            heartbeat_drift_ms: 0.0,
            inference_downgrade: false,
            onset_cycle: None,
        }
    }
}
