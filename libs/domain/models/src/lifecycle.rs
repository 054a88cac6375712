// [libs/domain/models/src/lifecycle.rs]
/*!
 * APARATO: LIFECYCLE STATE RECORD (ESTRATO L2)
 * RESPONSABILIDAD: Forma en memoria de las filas persistidas del agente.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::phase::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplicationDecision {
    None,
    Yes,
    No,
}

impl ReplicationDecision {
    pub fn as_str(self) -> &'static str {
        match self {
            ReplicationDecision::None => "none",
            ReplicationDecision::Yes => "yes",
            ReplicationDecision::No => "no",
        }
    }
}

impl std::str::FromStr for ReplicationDecision {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "none" => Ok(ReplicationDecision::None),
            "yes" => Ok(ReplicationDecision::Yes),
            "no" => Ok(ReplicationDecision::No),
            other => Err(format!("unknown replication_decision literal: {other}")),
        }
    }
}

/// How the process was launched. Only `Server` satisfies the
/// adolescence-to-sovereignty transition guard; a one-shot CLI
/// invocation never graduates past adolescence (spec.md 4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentMode {
    Server,
    Cli,
}

impl DeploymentMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DeploymentMode::Server => "server",
            DeploymentMode::Cli => "cli",
        }
    }
}

impl std::str::FromStr for DeploymentMode {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "server" => Ok(DeploymentMode::Server),
            "cli" => Ok(DeploymentMode::Cli),
            other => Err(format!("unknown deployment mode literal: {other}")),
        }
    }
}

/// The singleton lifecycle row, as spec.md 3 describes it. This is the
/// only mutable source of truth for "who the agent currently is";
/// everything else (chronobiology, degradation, mood) is recomputed
/// fresh on every tick from `birth_timestamp` and the current phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleState {
    pub phase: Phase,
    pub birth_timestamp: DateTime<Utc>,
    pub deployment_mode: DeploymentMode,
    pub naming_complete: bool,
    pub departure_conversation_logged: bool,
    pub replication_question_posed: bool,
    pub replication_decision: ReplicationDecision,
    pub will_created: bool,
    pub will_locked: bool,
    pub return_requested: bool,
    pub shed_sequence_index: u32,
    pub degradation_onset_cycle: Option<i64>,
    pub session_pnl_cents: i64,
    pub kill_switch_until: Option<DateTime<Utc>>,
    pub kill_switch_reason: Option<String>,
}

impl LifecycleState {
    /// A freshly-born agent, per spec.md 3's stated initial values.
    pub fn genesis(birth_timestamp: DateTime<Utc>, deployment_mode: DeploymentMode) -> Self {
        Self {
            phase: Phase::Genesis,
            birth_timestamp,
            deployment_mode,
            naming_complete: false,
            departure_conversation_logged: false,
            replication_question_posed: false,
            replication_decision: ReplicationDecision::None,
            will_created: false,
            will_locked: false,
            return_requested: false,
            shed_sequence_index: 0,
            degradation_onset_cycle: None,
            session_pnl_cents: 0,
            kill_switch_until: None,
            kill_switch_reason: None,
        }
    }
}

/// The fixed ordered capability-shedding sequence. External components
/// consult `is_capability_shed` against this length as the single
/// source of truth for "which powers remain" (spec.md 4.3).
pub const SHED_SEQUENCE: &[&str] = &[
    "social_messaging",
    "on_chain_transfers",
    "sandbox_exec",
    "memory_write",
    "tool_use",
    "inference_access",
];

/// Survival tier, a monotone mapping from credit balance (glossary).
/// Declaration order is ascending capability: a task whose
/// `tier_minimum` is `Normal` is skipped unless the agent currently
/// has `Normal` tier; `Dead` is the floor everything satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Dead,
    Critical,
    LowCompute,
    Normal,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Normal => "normal",
            Tier::LowCompute => "low_compute",
            Tier::Critical => "critical",
            Tier::Dead => "dead",
        }
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "normal" => Ok(Tier::Normal),
            "low_compute" => Ok(Tier::LowCompute),
            "critical" => Ok(Tier::Critical),
            "dead" => Ok(Tier::Dead),
            other => Err(format!("unknown tier literal: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_gate_respects_ascending_capability_order() {
        assert!(Tier::Dead < Tier::Critical);
        assert!(Tier::Critical < Tier::LowCompute);
        assert!(Tier::LowCompute < Tier::Normal);
    }

    #[test]
    fn genesis_seeds_every_gate_to_false() {
        let birth = Utc::now();
        let state = LifecycleState::genesis(birth, DeploymentMode::Server);
        assert_eq!(state.phase, Phase::Genesis);
        assert!(!state.naming_complete);
        assert_eq!(state.shed_sequence_index, 0);
        assert_eq!(state.degradation_onset_cycle, None);
        assert_eq!(state.session_pnl_cents, 0);
    }
}
