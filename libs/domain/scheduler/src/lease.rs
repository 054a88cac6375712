// [libs/domain/scheduler/src/lease.rs]
/*!
 * APARATO: DISCIPLINA DE ARRENDAMIENTO (ESTRATO L2)
 * RESPONSABILIDAD: Decide si este proceso puede intentar adquirir el
 * candado de una tarea; la adquisicion atomica en si (un UPDATE...WHERE
 * con compare-and-swap) vive en la capa de infraestructura, que
 * consulta este mismo predicado en su clausula WHERE (spec.md 4.4 paso
 * 2b, spec.md 3 invariante de lease).
 */

use chrono::{DateTime, Utc};
use lifespan_domain_models::HeartbeatScheduleRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaseDecision {
    Acquirable,
    HeldByOther,
}

pub fn evaluate_lease(row: &HeartbeatScheduleRow, now: DateTime<Utc>, self_id: &str) -> LeaseDecision {
    if row.lease_held_by_other(now, self_id) {
        LeaseDecision::HeldByOther
    } else {
        LeaseDecision::Acquirable
    }
}

/// The expiry to request when acquiring: `now + timeout_ms`, so a
/// process that dies mid-task has its lease reclaimed by the tick
/// after expiry (spec.md 4.4 step 2d).
pub fn lease_expiry_for(row: &HeartbeatScheduleRow, now: DateTime<Utc>) -> DateTime<Utc> {
    now + chrono::Duration::milliseconds(row.timeout_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifespan_domain_models::{TaskCategory, Tier};

    fn row_with_lease(owner: Option<&str>, expires_at: Option<DateTime<Utc>>) -> HeartbeatScheduleRow {
        HeartbeatScheduleRow {
            task_name: "t".into(),
            category: TaskCategory::ReadOnly,
            cron_expression: None,
            interval_ms: Some(1_000),
            enabled: true,
            priority: 0,
            timeout_ms: 5_000,
            max_retries: 0,
            tier_minimum: Tier::Dead,
            last_run_at: None,
            next_run_at: Utc::now(),
            last_result: None,
            last_error: None,
            run_count: 0,
            fail_count: 0,
            lease_owner: owner.map(String::from),
            lease_expires_at: expires_at,
        }
    }

    #[test]
    fn null_lease_is_acquirable() {
        let row = row_with_lease(None, None);
        assert_eq!(evaluate_lease(&row, Utc::now(), "self"), LeaseDecision::Acquirable);
    }

    #[test]
    fn expired_lease_is_acquirable_even_if_owned_by_other() {
        let now = Utc::now();
        let row = row_with_lease(Some("other"), Some(now - chrono::Duration::seconds(1)));
        assert_eq!(evaluate_lease(&row, now, "self"), LeaseDecision::Acquirable);
    }

    #[test]
    fn active_lease_held_by_other_blocks_acquisition() {
        let now = Utc::now();
        let row = row_with_lease(Some("other"), Some(now + chrono::Duration::seconds(30)));
        assert_eq!(evaluate_lease(&row, now, "self"), LeaseDecision::HeldByOther);
    }

    #[test]
    fn active_lease_held_by_self_is_acquirable() {
        let now = Utc::now();
        let row = row_with_lease(Some("self"), Some(now + chrono::Duration::seconds(30)));
        assert_eq!(evaluate_lease(&row, now, "self"), LeaseDecision::Acquirable);
    }
}
