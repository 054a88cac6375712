// [libs/domain/scheduler/src/retry.rs]
/*!
 * APARATO: POLITICA DE REINTENTO Y RECALCULO DE PROXIMA EJECUCION
 * (ESTRATO L2)
 * RESPONSABILIDAD: Decide `next_run_at` tras el exito o fallo de una
 * tarea, y resuelve la precedencia cron-sobre-intervalo (spec.md 4.4).
 */

use chrono::{DateTime, Duration, Utc};
use lifespan_domain_models::HeartbeatScheduleRow;

use crate::cron::CronSchedule;
use crate::errors::SchedulerError;

/// `cron_expression` takes precedence over `interval_ms`; a task with
/// neither is never due (callers must keep such rows `enabled = false`).
pub fn compute_next_fire(row: &HeartbeatScheduleRow, reference: DateTime<Utc>) -> Result<DateTime<Utc>, SchedulerError> {
    if let Some(expression) = &row.cron_expression {
        return CronSchedule::parse(expression)?.next_fire_after(reference);
    }

    if let Some(interval_ms) = row.interval_ms {
        return Ok(reference + Duration::milliseconds(interval_ms));
    }

    Err(SchedulerError::CronError(format!(
        "task '{}' has neither cron_expression nor interval_ms",
        row.task_name
    )))
}

#[derive(Debug, Clone, PartialEq)]
pub struct FollowUp {
    pub next_run_at: DateTime<Utc>,
    pub fail_count: u64,
}

/// Retry-next-tick below `max_retries`; beyond it, fall through to the
/// ordinary cron/interval schedule computed from `last_run_at` (which
/// the caller must have already set to `now`).
pub fn on_task_failure(row: &HeartbeatScheduleRow, now: DateTime<Utc>) -> Result<FollowUp, SchedulerError> {
    let fail_count = row.fail_count + 1;

    if fail_count <= row.max_retries as u64 {
        return Ok(FollowUp { next_run_at: now, fail_count });
    }

    let next_run_at = compute_next_fire(row, now)?;
    Ok(FollowUp { next_run_at, fail_count })
}

pub fn on_task_success(row: &HeartbeatScheduleRow, now: DateTime<Utc>) -> Result<DateTime<Utc>, SchedulerError> {
    compute_next_fire(row, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifespan_domain_models::{TaskCategory, Tier};

    fn sample_row(interval_ms: Option<i64>, cron: Option<&str>, max_retries: u32) -> HeartbeatScheduleRow {
        HeartbeatScheduleRow {
            task_name: "test_task".into(),
            category: TaskCategory::ReadOnly,
            cron_expression: cron.map(String::from),
            interval_ms,
            enabled: true,
            priority: 0,
            timeout_ms: 5_000,
            max_retries,
            tier_minimum: Tier::Dead,
            last_run_at: None,
            next_run_at: Utc::now(),
            last_result: None,
            last_error: None,
            run_count: 0,
            fail_count: 0,
            lease_owner: None,
            lease_expires_at: None,
        }
    }

    #[test]
    fn cron_takes_precedence_over_interval() {
        let row = sample_row(Some(1_000), Some("0 0 * * *"), 3);
        let now: DateTime<Utc> = "2025-06-01T10:00:00Z".parse().unwrap();
        let next = compute_next_fire(&row, now).unwrap();
        assert_eq!(next, "2025-06-02T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn interval_used_when_cron_absent() {
        let row = sample_row(Some(60_000), None, 3);
        let now: DateTime<Utc> = "2025-06-01T10:00:00Z".parse().unwrap();
        let next = compute_next_fire(&row, now).unwrap();
        assert_eq!(next, now + Duration::minutes(1));
    }

    #[test]
    fn neither_cron_nor_interval_is_an_error() {
        let row = sample_row(None, None, 3);
        assert!(compute_next_fire(&row, Utc::now()).is_err());
    }

    #[test]
    fn failure_below_max_retries_retries_immediately() {
        let mut row = sample_row(Some(60_000), None, 3);
        row.fail_count = 1;
        let now = Utc::now();
        let follow_up = on_task_failure(&row, now).unwrap();
        assert_eq!(follow_up.next_run_at, now);
        assert_eq!(follow_up.fail_count, 2);
    }

    #[test]
    fn failure_beyond_max_retries_falls_through_to_schedule() {
        let mut row = sample_row(Some(60_000), None, 2);
        row.fail_count = 2;
        let now = Utc::now();
        let follow_up = on_task_failure(&row, now).unwrap();
        assert_eq!(follow_up.next_run_at, now + Duration::milliseconds(60_000));
        assert_eq!(follow_up.fail_count, 3);
    }
}
