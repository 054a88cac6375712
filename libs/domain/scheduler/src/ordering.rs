// [libs/domain/scheduler/src/ordering.rs]
/*!
 * APARATO: ORDEN DETERMINISTA DE TAREAS (ESTRATO L2)
 * RESPONSABILIDAD: Dentro de un tick, las tareas se consideran en
 * orden por `priority` ascendente y luego `task_name` ascendente
 * (spec.md 4.4 "Ordering guarantees").
 */

use lifespan_domain_models::HeartbeatScheduleRow;

pub fn sort_due_tasks(rows: &mut [HeartbeatScheduleRow]) {
    rows.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.task_name.cmp(&b.task_name)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lifespan_domain_models::{TaskCategory, Tier};

    fn row(name: &str, priority: i32) -> HeartbeatScheduleRow {
        HeartbeatScheduleRow {
            task_name: name.into(),
            category: TaskCategory::ReadOnly,
            cron_expression: None,
            interval_ms: Some(60_000),
            enabled: true,
            priority,
            timeout_ms: 1_000,
            max_retries: 0,
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
    fn sorts_by_priority_then_name() {
        let mut rows = vec![row("zeta", 1), row("alpha", 1), row("beta", 0)];
        sort_due_tasks(&mut rows);
        let names: Vec<&str> = rows.iter().map(|r| r.task_name.as_str()).collect();
        assert_eq!(names, vec!["beta", "alpha", "zeta"]);
    }
}
