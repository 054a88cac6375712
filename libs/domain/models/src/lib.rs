// [libs/domain/models/src/lib.rs]
/*!
 * =================================================================
 * APARATO: LIFESPAN DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: Formas compartidas del estado del agente, sus
 * eventos de solo-anexo, y los contratos hacia colaboradores externos.
 *
 * This crate is deliberately inert: no I/O, no async runtime, no
 * SQL. Every other crate in the workspace depends on it for a common
 * vocabulary of types.
 * =================================================================
 */

pub mod degradation;
pub mod events;
pub mod heartbeat;
pub mod interfaces;
pub mod kill_switch;
pub mod lifecycle;
pub mod phase;

pub use degradation::{DegradationParams, DegradationState};
pub use events::{
    LifecycleEvent, NarrativeEvent, SpawnQueueEntry, SpawnStatus, WillCodicil, WillEntry,
};
pub use heartbeat::{HeartbeatScheduleRow, HeartbeatTaskConfig, TaskCategory};
pub use interfaces::{
    ChatMessage, ChatOptions, ChatResponse, InferenceClient, NullWakeCallback, SandboxClient,
    WakeCallback,
};
pub use kill_switch::KillSwitchStatus;
pub use lifecycle::{DeploymentMode, LifecycleState, ReplicationDecision, Tier, SHED_SEQUENCE};
pub use phase::Phase;
