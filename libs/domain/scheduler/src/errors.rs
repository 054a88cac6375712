// [libs/domain/scheduler/src/errors.rs]
/*!
 * APARATO: CATALOGO DE ERRORES DEL SCHEDULER (ESTRATO L2)
 * RESPONSABILIDAD: Taxonomia de fallos que el bucle de ticks produce
 * por si mismo (spec.md 7). `TaskFailure`/`TaskTimeout` wrap whatever a
 * task itself surfaced; they never propagate out of the tick loop.
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Task skipped this tick; logged at debug, not fatal.
    #[error("[L2_SCHED_LEASE_CONTENDED]: lease for '{0}' held by another owner")]
    LeaseContended(String),

    /// Survival tier below the task's configured minimum; logged at debug.
    #[error("[L2_SCHED_TIER_BLOCKED]: '{task}' requires tier {required}, agent is {current}")]
    TierBlocked { task: String, required: String, current: String },

    /// Task skipped; logged once per halt at info.
    #[error("[L2_SCHED_KILL_SWITCH_ACTIVE]: '{0}' skipped while the kill switch is armed")]
    KillSwitchActive(String),

    /// Recorded in `last_error`, counts toward `fail_count`.
    #[error("[L2_SCHED_TASK_TIMEOUT]: '{task}' exceeded {timeout_ms}ms")]
    TaskTimeout { task: String, timeout_ms: i64 },

    /// Recorded; retry policy applies.
    #[error("[L2_SCHED_TASK_FAILURE]: '{task}' failed: {cause}")]
    TaskFailure { task: String, cause: String },

    /// Cron expression could not be parsed, or no invocation of
    /// `next_fire_after` found a match within the search horizon.
    #[error("[L2_SCHED_CRON_FAULT]: {0}")]
    CronError(String),

    /// A task was never registered under the name looked up.
    #[error("[L2_SCHED_UNKNOWN_TASK]: no task function registered as '{0}'")]
    UnknownTask(String),
}
