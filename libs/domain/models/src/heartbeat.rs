// [libs/domain/models/src/heartbeat.rs]
/*!
 * APARATO: HEARTBEAT SCHEDULE ROW (ESTRATO L2)
 * RESPONSABILIDAD: Forma persistida de una tarea registrada en el
 * scheduler, y su contraparte de configuracion de arranque.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lifecycle::Tier;

/// Whether a task is allowed to take action, or is read-only and
/// therefore bypasses the session risk gate (spec.md 4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskCategory {
    ReadOnly,
    MayAct,
}

impl TaskCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskCategory::ReadOnly => "read_only",
            TaskCategory::MayAct => "may_act",
        }
    }
}

impl std::str::FromStr for TaskCategory {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "read_only" => Ok(TaskCategory::ReadOnly),
            "may_act" => Ok(TaskCategory::MayAct),
            other => Err(format!("unknown task category literal: {other}")),
        }
    }
}

/// A configuration-time entry, accepted at startup per spec.md 6
/// "Configuration". Missing entries are seeded into `heartbeat_schedule`;
/// existing rows are preserved (never overwritten by a later boot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartbeatTaskConfig {
    pub name: String,
    pub category: TaskCategory,
    pub cron_expression: Option<String>,
    pub interval_ms: Option<i64>,
    pub enabled: bool,
    pub priority: i32,
    pub timeout_ms: i64,
    pub max_retries: u32,
    pub tier_minimum: Tier,
}

/// One row of the `heartbeat_schedule` table (spec.md 3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartbeatScheduleRow {
    pub task_name: String,
    pub category: TaskCategory,
    pub cron_expression: Option<String>,
    pub interval_ms: Option<i64>,
    pub enabled: bool,
    pub priority: i32,
    pub timeout_ms: i64,
    pub max_retries: u32,
    pub tier_minimum: Tier,
    pub last_run_at: Option<DateTime<Utc>>,
    pub next_run_at: DateTime<Utc>,
    pub last_result: Option<String>,
    pub last_error: Option<String>,
    pub run_count: u64,
    pub fail_count: u64,
    pub lease_owner: Option<String>,
    pub lease_expires_at: Option<DateTime<Utc>>,
}

impl HeartbeatScheduleRow {
    pub fn seed_from_config(config: &HeartbeatTaskConfig, now: DateTime<Utc>) -> Self {
        Self {
            task_name: config.name.clone(),
            category: config.category,
            cron_expression: config.cron_expression.clone(),
            interval_ms: config.interval_ms,
            enabled: config.enabled,
            priority: config.priority,
            timeout_ms: config.timeout_ms,
            max_retries: config.max_retries,
            tier_minimum: config.tier_minimum,
            last_run_at: None,
            next_run_at: now,
            last_result: None,
            last_error: None,
            run_count: 0,
            fail_count: 0,
            lease_owner: None,
            lease_expires_at: None,
        }
    }

    /// A lease is respected if it is held by someone else and has not
    /// yet expired (spec.md 3 invariant).
    pub fn lease_held_by_other(&self, now: DateTime<Utc>, self_id: &str) -> bool {
        match (&self.lease_owner, self.lease_expires_at) {
            (Some(owner), Some(expires_at)) => owner != self_id && now < expires_at,
            _ => false,
        }
    }
}
