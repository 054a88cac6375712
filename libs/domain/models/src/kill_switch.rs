// [libs/domain/models/src/kill_switch.rs]
/*!
 * APARATO: KILL SWITCH STATUS (ESTRATO L2)
 * RESPONSABILIDAD: Forma de respuesta de consulta del corte de riesgo
 * (spec.md 4.5). Expira un `until` pasado como inactivo.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillSwitchStatus {
    pub active: bool,
    pub until: Option<DateTime<Utc>>,
    pub reason: Option<String>,
    pub remaining_ms: i64,
}

impl KillSwitchStatus {
    pub fn inactive() -> Self {
        Self {
            active: false,
            until: None,
            reason: None,
            remaining_ms: 0,
        }
    }

    /// Build a status from raw persisted fields, treating an expired
    /// `until` as inactive regardless of what `kill_switch_reason`
    /// still says (spec.md 4.5).
    pub fn from_persisted(
        until: Option<DateTime<Utc>>,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        match until {
            Some(until) if now < until => Self {
                active: true,
                until: Some(until),
                reason,
                remaining_ms: (until - now).num_milliseconds().max(0),
            },
            _ => Self::inactive(),
        }
    }
}
