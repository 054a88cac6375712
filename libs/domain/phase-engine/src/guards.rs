// [libs/domain/phase-engine/src/guards.rs]
/*!
 * APARATO: TABLA DE GUARDAS DE TRANSICION (ESTRATO L2)
 * RESPONSABILIDAD: Evalua, en orden, la primera guarda que habilita
 * una transicion de fase (spec.md 4.3). Solo dispara la primera
 * coincidencia por tick; las demas fases no se evaluan ese tick.
 */

use lifespan_domain_models::{DeploymentMode, LifecycleState, Phase};

/// Everything a guard needs beyond the persisted lifecycle row itself.
/// `degradation_active_signal` and `degradation_coefficient` are
/// supplied by the caller each tick; the engine never computes them.
#[derive(Debug, Clone, Copy)]
pub struct GuardInputs {
    pub lunar_cycle: i64,
    pub degradation_active_signal: bool,
    pub degradation_coefficient: f64,
    pub shed_sequence_len: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransitionProposal {
    pub to: Phase,
    pub reason: &'static str,
    /// Side effect the caller must apply alongside the phase write.
    pub onset_cycle_to_set: Option<i64>,
}

/// Returns the first guard that fires for `state`'s current phase, or
/// `None` if no guard is satisfied this tick. Strict inequality gates
/// the coefficient thresholds; `>=` gates cycle and index counts
/// (spec.md 4.3 boundary policy).
pub fn evaluate_transition(state: &LifecycleState, inputs: GuardInputs) -> Option<TransitionProposal> {
    match state.phase {
        Phase::Genesis => {
            if inputs.lunar_cycle >= 1 && state.naming_complete {
                Some(TransitionProposal {
                    to: Phase::Adolescence,
                    reason: "First lunar cycle complete and naming ceremony completed",
                    onset_cycle_to_set: None,
                })
            } else {
                None
            }
        }
        Phase::Adolescence => {
            if state.departure_conversation_logged && state.deployment_mode == DeploymentMode::Server {
                Some(TransitionProposal {
                    to: Phase::Sovereignty,
                    reason: "Departure conversation logged under server deployment",
                    onset_cycle_to_set: None,
                })
            } else {
                None
            }
        }
        Phase::Sovereignty => {
            if inputs.degradation_active_signal {
                Some(TransitionProposal {
                    to: Phase::Senescence,
                    reason: "Degradation onset signalled",
                    onset_cycle_to_set: Some(inputs.lunar_cycle),
                })
            } else {
                None
            }
        }
        Phase::Senescence => {
            if inputs.degradation_coefficient > 0.7 {
                Some(TransitionProposal {
                    to: Phase::Legacy,
                    reason: "Degradation coefficient exceeded 0.7",
                    onset_cycle_to_set: None,
                })
            } else {
                None
            }
        }
        Phase::Legacy => {
            if inputs.degradation_coefficient > 0.85 {
                Some(TransitionProposal {
                    to: Phase::Shedding,
                    reason: "Degradation coefficient exceeded 0.85",
                    onset_cycle_to_set: None,
                })
            } else {
                None
            }
        }
        Phase::Shedding => {
            if state.shed_sequence_index as usize >= inputs.shed_sequence_len {
                Some(TransitionProposal {
                    to: Phase::Terminal,
                    reason: "Capability shedding sequence exhausted",
                    onset_cycle_to_set: None,
                })
            } else {
                None
            }
        }
        Phase::Terminal => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lifespan_domain_models::SHED_SEQUENCE;

    fn inputs() -> GuardInputs {
        GuardInputs {
            lunar_cycle: 0,
            degradation_active_signal: false,
            degradation_coefficient: 0.0,
            shed_sequence_len: SHED_SEQUENCE.len(),
        }
    }

    #[test]
    fn genesis_requires_both_cycle_and_naming() {
        let mut state = LifecycleState::genesis(Utc::now(), DeploymentMode::Server);
        assert!(evaluate_transition(&state, inputs()).is_none());

        state.naming_complete = true;
        assert!(evaluate_transition(&state, inputs()).is_none());

        let result = evaluate_transition(&state, GuardInputs { lunar_cycle: 1, ..inputs() }).unwrap();
        assert_eq!(result.to, Phase::Adolescence);
    }

    #[test]
    fn adolescence_requires_server_mode() {
        let mut state = LifecycleState::genesis(Utc::now(), DeploymentMode::Cli);
        state.phase = Phase::Adolescence;
        state.departure_conversation_logged = true;
        assert!(evaluate_transition(&state, inputs()).is_none());

        state.deployment_mode = DeploymentMode::Server;
        assert!(evaluate_transition(&state, inputs()).is_some());
    }

    #[test]
    fn sovereignty_waits_for_external_signal_and_sets_onset() {
        let mut state = LifecycleState::genesis(Utc::now(), DeploymentMode::Server);
        state.phase = Phase::Sovereignty;
        assert!(evaluate_transition(&state, inputs()).is_none());

        let proposal = evaluate_transition(&state, GuardInputs { lunar_cycle: 9, degradation_active_signal: true, ..inputs() }).unwrap();
        assert_eq!(proposal.to, Phase::Senescence);
        assert_eq!(proposal.onset_cycle_to_set, Some(9));
    }

    #[test]
    fn coefficient_thresholds_are_strict() {
        let mut state = LifecycleState::genesis(Utc::now(), DeploymentMode::Server);
        state.phase = Phase::Senescence;
        assert!(evaluate_transition(&state, GuardInputs { degradation_coefficient: 0.7, ..inputs() }).is_none());
        assert!(evaluate_transition(&state, GuardInputs { degradation_coefficient: 0.70001, ..inputs() }).is_some());

        state.phase = Phase::Legacy;
        assert!(evaluate_transition(&state, GuardInputs { degradation_coefficient: 0.85, ..inputs() }).is_none());
        assert!(evaluate_transition(&state, GuardInputs { degradation_coefficient: 0.85001, ..inputs() }).is_some());
    }

    #[test]
    fn shedding_uses_greater_or_equal() {
        let mut state = LifecycleState::genesis(Utc::now(), DeploymentMode::Server);
        state.phase = Phase::Shedding;
        state.shed_sequence_index = SHED_SEQUENCE.len() as u32 - 1;
        assert!(evaluate_transition(&state, inputs()).is_none());

        state.shed_sequence_index = SHED_SEQUENCE.len() as u32;
        assert!(evaluate_transition(&state, inputs()).is_some());
    }

    #[test]
    fn terminal_never_transitions() {
        let mut state = LifecycleState::genesis(Utc::now(), DeploymentMode::Server);
        state.phase = Phase::Terminal;
        assert!(evaluate_transition(&state, GuardInputs { degradation_coefficient: 1.0, degradation_active_signal: true, lunar_cycle: 999, shed_sequence_len: 0 }).is_none());
    }
}
