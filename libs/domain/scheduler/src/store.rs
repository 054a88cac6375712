// [libs/domain/scheduler/src/store.rs]
/*!
 * APARATO: PUERTO DE PERSISTENCIA DEL SCHEDULER (ESTRATO L2)
 * RESPONSABILIDAD: El seam de inversion de dependencia hacia la capa
 * de infraestructura: este crate razona sobre el bucle de ticks sin
 * saber nada de SQLite (spec.md 5 "Shared resource policy").
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lifespan_domain_models::{HeartbeatScheduleRow, KillSwitchStatus, Tier};

#[async_trait]
pub trait ScheduleStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Rows with `enabled = true` and `next_run_at <= now`.
    async fn due_tasks(&self, now: DateTime<Utc>) -> Result<Vec<HeartbeatScheduleRow>, Self::Error>;

    /// A single row by name, used by `force_run` (spec.md 4.4
    /// "Force-run"), which bypasses scheduling but not the lease, tier
    /// gate, or kill switch.
    async fn get_task(&self, task_name: &str) -> Result<Option<HeartbeatScheduleRow>, Self::Error>;

    /// Atomic compare-and-swap: succeeds only if the previous lease was
    /// null or expired (spec.md 4.4 step 2b).
    async fn try_acquire_lease(&self, task_name: &str, self_id: &str, now: DateTime<Utc>, expires_at: DateTime<Utc>) -> Result<bool, Self::Error>;

    async fn release_lease(&self, task_name: &str, self_id: &str) -> Result<(), Self::Error>;

    /// Writes back `last_run_at`, `next_run_at`, `last_result`,
    /// `last_error`, `run_count`, `fail_count` in one transaction
    /// (spec.md 4.4 step 2f).
    async fn record_outcome(&self, task_name: &str, update: TaskRunUpdate) -> Result<(), Self::Error>;

    async fn current_tier(&self) -> Result<Tier, Self::Error>;

    async fn kill_switch_status(&self, now: DateTime<Utc>) -> Result<KillSwitchStatus, Self::Error>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskRunUpdate {
    pub last_run_at: DateTime<Utc>,
    pub next_run_at: DateTime<Utc>,
    pub last_result: Option<String>,
    pub last_error: Option<String>,
    pub run_count_increment: u64,
    pub fail_count: u64,
}
