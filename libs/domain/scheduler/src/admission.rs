// [libs/domain/scheduler/src/admission.rs]
/*!
 * APARATO: PUERTA DE ADMISION (ESTRATO L2)
 * RESPONSABILIDAD: Las dos comprobaciones que preceden a la
 * adquisicion del lease en cada tick: el filtro de tier de
 * supervivencia y el corte de riesgo (spec.md 4.4 paso 2a, 4.5
 * "Enforcement point").
 */

use lifespan_domain_models::{KillSwitchStatus, TaskCategory, Tier};
use lifespan_domain_risk_gate::{evaluate_gate, GateVerdict};

use crate::errors::SchedulerError;

pub fn check_tier(task_name: &str, tier_minimum: Tier, current_tier: Tier) -> Result<(), SchedulerError> {
    if current_tier < tier_minimum {
        return Err(SchedulerError::TierBlocked {
            task: task_name.to_string(),
            required: tier_minimum.as_str().to_string(),
            current: current_tier.as_str().to_string(),
        });
    }
    Ok(())
}

pub fn check_kill_switch(task_name: &str, category: TaskCategory, status: &KillSwitchStatus) -> Result<(), SchedulerError> {
    let may_act = matches!(category, TaskCategory::MayAct);
    match evaluate_gate(status, may_act) {
        GateVerdict::Allowed => Ok(()),
        GateVerdict::Blocked => Err(SchedulerError::KillSwitchActive(task_name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_below_minimum_is_blocked() {
        assert!(check_tier("t", Tier::Normal, Tier::Critical).is_err());
    }

    #[test]
    fn tier_at_or_above_minimum_passes() {
        assert!(check_tier("t", Tier::Normal, Tier::Normal).is_ok());
        assert!(check_tier("t", Tier::Critical, Tier::Normal).is_ok());
    }

    #[test]
    fn read_only_tasks_bypass_the_kill_switch() {
        let status = KillSwitchStatus { active: true, until: None, reason: None, remaining_ms: 0 };
        assert!(check_kill_switch("t", TaskCategory::ReadOnly, &status).is_ok());
    }

    #[test]
    fn may_act_tasks_are_blocked_while_armed() {
        let status = KillSwitchStatus { active: true, until: None, reason: None, remaining_ms: 0 };
        assert!(check_kill_switch("t", TaskCategory::MayAct, &status).is_err());
    }
}
