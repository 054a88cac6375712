// [libs/domain/phase-engine/src/transition.rs]
/*!
 * APARATO: EJECUCION DE TRANSICIONES (ESTRATO L2)
 * RESPONSABILIDAD: Aplica un `TransitionProposal` ya evaluado sobre el
 * estado en memoria y produce los registros de solo-anexo que la capa
 * de infraestructura debe persistir en una sola transaccion
 * (spec.md 4.3 "On transition").
 */

use chrono::{DateTime, Utc};
use lifespan_domain_models::{LifecycleEvent, LifecycleState, NarrativeEvent, Phase};

use crate::errors::PhaseEngineError;
use crate::guards::TransitionProposal;
use crate::narrative::narrative_label_for_transition;

/// Rows the caller must persist atomically alongside the new phase.
/// `id` fields are placeholders (0); the persistence layer assigns the
/// real autoincrement identity on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionOutcome {
    pub event: LifecycleEvent,
    pub narrative_event: NarrativeEvent,
    pub will_locked_now: bool,
}

/// Applies an already-evaluated proposal. Idempotent guard: refuses to
/// move backward even if the caller constructs a malformed proposal by
/// hand (`evaluate_transition` itself never does).
pub fn execute_transition(state: &mut LifecycleState, proposal: TransitionProposal, now: DateTime<Utc>) -> Result<TransitionOutcome, PhaseEngineError> {
    if proposal.to < state.phase {
        return Err(PhaseEngineError::InvalidTransition {
            from: state.phase.to_string(),
            to: proposal.to.to_string(),
        });
    }

    let from_phase = state.phase;
    state.phase = proposal.to;
    if let Some(onset) = proposal.onset_cycle_to_set {
        state.degradation_onset_cycle = Some(onset);
    }

    let will_locked_now = proposal.to == Phase::Senescence && !state.will_locked;
    if will_locked_now {
        state.will_locked = true;
    }

    let event = LifecycleEvent {
        id: 0,
        from_phase,
        to_phase: proposal.to,
        reason: proposal.reason.to_string(),
        timestamp: now,
    };

    let narrative_event = NarrativeEvent {
        id: 0,
        label: narrative_label_for_transition(proposal.to).to_string(),
        detail: None,
        timestamp: now,
    };

    Ok(TransitionOutcome { event, narrative_event, will_locked_now })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifespan_domain_models::DeploymentMode;

    #[test]
    fn genesis_to_adolescence_matches_the_literal_scenario() {
        // spec.md scenario 1.
        let mut state = LifecycleState::genesis("2025-01-01T00:00:00Z".parse().unwrap(), DeploymentMode::Server);
        state.naming_complete = true;

        let proposal = crate::guards::evaluate_transition(
            &state,
            crate::guards::GuardInputs {
                lunar_cycle: 1,
                degradation_active_signal: false,
                degradation_coefficient: 0.0,
                shed_sequence_len: lifespan_domain_models::SHED_SEQUENCE.len(),
            },
        )
        .unwrap();

        let now: DateTime<Utc> = "2025-01-31T00:00:00Z".parse().unwrap();
        let outcome = execute_transition(&mut state, proposal, now).unwrap();

        assert_eq!(state.phase, Phase::Adolescence);
        assert_eq!(outcome.event.to_phase, Phase::Adolescence);
        assert_eq!(outcome.narrative_event.label, "adolescence_begins");
        assert_eq!(outcome.event.reason, "First lunar cycle complete and naming ceremony completed");
    }

    #[test]
    fn entering_senescence_locks_the_will_exactly_once() {
        let mut state = LifecycleState::genesis(Utc::now(), DeploymentMode::Server);
        state.phase = Phase::Sovereignty;

        let proposal = crate::guards::TransitionProposal {
            to: Phase::Senescence,
            reason: "test",
            onset_cycle_to_set: Some(3),
        };

        let outcome = execute_transition(&mut state, proposal, Utc::now()).unwrap();
        assert!(outcome.will_locked_now);
        assert!(state.will_locked);
        assert_eq!(state.degradation_onset_cycle, Some(3));
    }

    #[test]
    fn evaluating_and_executing_twice_from_the_same_stored_state_yields_one_event_total() {
        // spec.md 8: re-running the evaluate/execute pair against a state
        // already advanced by the first run must not double-fire. The
        // caller (`LifespanKernel::evaluate_phase_transition`) always
        // re-derives the proposal from the freshly persisted state before
        // executing, so the second pass sees no pending transition.
        let mut state = LifecycleState::genesis("2025-01-01T00:00:00Z".parse().unwrap(), DeploymentMode::Server);
        state.naming_complete = true;

        let inputs = crate::guards::GuardInputs {
            lunar_cycle: 1,
            degradation_active_signal: false,
            degradation_coefficient: 0.0,
            shed_sequence_len: lifespan_domain_models::SHED_SEQUENCE.len(),
        };
        let now: DateTime<Utc> = "2025-01-31T00:00:00Z".parse().unwrap();

        let mut events = Vec::new();
        let mut narrative_events = Vec::new();

        for _ in 0..2 {
            if let Some(proposal) = crate::guards::evaluate_transition(&state, inputs) {
                let outcome = execute_transition(&mut state, proposal, now).unwrap();
                events.push(outcome.event);
                narrative_events.push(outcome.narrative_event);
            }
        }

        assert_eq!(events.len(), 1);
        assert_eq!(narrative_events.len(), 1);
        assert_eq!(state.phase, Phase::Adolescence);
    }

    #[test]
    fn refuses_to_move_the_phase_backward() {
        let mut state = LifecycleState::genesis(Utc::now(), DeploymentMode::Server);
        state.phase = Phase::Sovereignty;

        let proposal = crate::guards::TransitionProposal {
            to: Phase::Genesis,
            reason: "malformed",
            onset_cycle_to_set: None,
        };

        let err = execute_transition(&mut state, proposal, Utc::now()).unwrap_err();
        assert!(matches!(err, PhaseEngineError::InvalidTransition { .. }));
        assert_eq!(state.phase, Phase::Sovereignty);
    }
}
