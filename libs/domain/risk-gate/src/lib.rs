// [libs/domain/risk-gate/src/lib.rs]
/*!
 * =================================================================
 * APARATO: SESSION RISK GATE (ESTRATO L2)
 * RESPONSABILIDAD: Rastreo acumulado de P&L y el corte de riesgo por
 * drawdown que detiene las tareas "may act" sin importar lo que pida
 * cualquier planificador (spec.md 4.5).
 * =================================================================
 */

pub mod gate;
pub mod limits;

pub use gate::{add_session_pnl, apply_pnl_delta, KillSwitchArm, PnlUpdateOutcome};
pub use limits::{DRAWDOWN_LIMIT_CENTS, HALT_DURATION_MS, MAX_DRAWDOWN_FRACTION, STARTING_VIRTUAL_BALANCE_CENTS};

pub use lifespan_domain_models::KillSwitchStatus;

/// The gate's verdict for one task evaluated at lease-acquire time
/// (spec.md 4.5 "Enforcement point").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateVerdict {
    Allowed,
    Blocked,
}

/// Read-only tasks always pass; "may act" tasks are blocked exactly
/// while the switch reports active.
pub fn evaluate_gate(status: &KillSwitchStatus, task_may_act: bool) -> GateVerdict {
    if task_may_act && status.active {
        GateVerdict::Blocked
    } else {
        GateVerdict::Allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn read_only_tasks_always_pass() {
        let status = KillSwitchStatus {
            active: true,
            until: Some(Utc::now()),
            reason: Some("armed".into()),
            remaining_ms: 1_000,
        };
        assert_eq!(evaluate_gate(&status, false), GateVerdict::Allowed);
    }

    #[test]
    fn may_act_tasks_blocked_while_active() {
        let status = KillSwitchStatus {
            active: true,
            until: Some(Utc::now()),
            reason: Some("armed".into()),
            remaining_ms: 1_000,
        };
        assert_eq!(evaluate_gate(&status, true), GateVerdict::Blocked);
    }

    #[test]
    fn may_act_tasks_resume_once_inactive() {
        assert_eq!(evaluate_gate(&KillSwitchStatus::inactive(), true), GateVerdict::Allowed);
    }
}
