// [libs/domain/risk-gate/src/gate.rs]
/*!
 * APARATO: TRANSICIONES PURAS DEL CORTE DE RIESGO (ESTRATO L2)
 * RESPONSABILIDAD: Aritmetica de P&L y armado del kill switch, sin
 * tocar la base de datos; la capa de infraestructura aplica estos
 * resultados dentro de una transaccion corta (spec.md 4.5).
 */

use chrono::{DateTime, Duration, Utc};
use lifespan_domain_models::KillSwitchStatus;

use crate::limits::{DRAWDOWN_LIMIT_CENTS, HALT_DURATION_MS, STARTING_VIRTUAL_BALANCE_CENTS};

#[derive(Debug, Clone, PartialEq)]
pub struct PnlUpdateOutcome {
    pub new_pnl_cents: i64,
    pub newly_armed: Option<KillSwitchArm>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KillSwitchArm {
    pub until: DateTime<Utc>,
    pub reason: String,
}

/// Applies `delta_cents` to `current_pnl_cents`. If the resulting total
/// falls at or below the drawdown limit, arms the kill switch for
/// exactly `HALT_DURATION_MS` from `now` with a formatted reason.
/// Arming never happens twice while already armed -- callers only
/// invoke this when the switch is currently inactive; see
/// `add_session_pnl` for the guarded entry point.
pub fn apply_pnl_delta(current_pnl_cents: i64, delta_cents: i64, now: DateTime<Utc>) -> PnlUpdateOutcome {
    let new_pnl_cents = current_pnl_cents + delta_cents;

    let newly_armed = if new_pnl_cents <= DRAWDOWN_LIMIT_CENTS {
        Some(KillSwitchArm {
            until: now + Duration::milliseconds(HALT_DURATION_MS),
            reason: format_drawdown_reason(new_pnl_cents),
        })
    } else {
        None
    };

    PnlUpdateOutcome { new_pnl_cents, newly_armed }
}

/// The guarded entry point matching spec.md's `add_session_pnl`:
/// while already armed, the halt is never extended, even if the new
/// total would independently justify arming again.
pub fn add_session_pnl(current_pnl_cents: i64, delta_cents: i64, current_status: &KillSwitchStatus, now: DateTime<Utc>) -> PnlUpdateOutcome {
    let new_pnl_cents = current_pnl_cents + delta_cents;

    if current_status.active {
        return PnlUpdateOutcome { new_pnl_cents, newly_armed: None };
    }

    apply_pnl_delta(current_pnl_cents, delta_cents, now)
}

fn format_drawdown_reason(new_pnl_cents: i64) -> String {
    let loss_usd = new_pnl_cents as f64 / 100.0;
    let pct = (new_pnl_cents as f64 / STARTING_VIRTUAL_BALANCE_CENTS as f64) * 100.0;
    format!("session drawdown {pct:.1}% (${loss_usd:.2}) breached the -5.0% limit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arms_exactly_at_the_limit() {
        let outcome = apply_pnl_delta(0, DRAWDOWN_LIMIT_CENTS, Utc::now());
        assert!(outcome.newly_armed.is_some());
    }

    #[test]
    fn does_not_arm_one_cent_above_the_limit() {
        let outcome = apply_pnl_delta(0, DRAWDOWN_LIMIT_CENTS + 1, Utc::now());
        assert!(outcome.newly_armed.is_none());
    }

    #[test]
    fn halt_lasts_exactly_twelve_hours() {
        let now = Utc::now();
        let outcome = apply_pnl_delta(0, -5_000, now);
        let arm = outcome.newly_armed.unwrap();
        assert_eq!((arm.until - now).num_milliseconds(), HALT_DURATION_MS);
    }

    #[test]
    fn reason_contains_percentage_and_usd_amount() {
        // spec.md scenario 5.
        let outcome = apply_pnl_delta(0, -5_000, Utc::now());
        let reason = outcome.newly_armed.unwrap().reason;
        assert!(reason.contains("-5.0%"));
        assert!(reason.contains("-50.00"));
    }

    #[test]
    fn active_switch_is_never_extended_by_further_losses() {
        let now = Utc::now();
        let status = KillSwitchStatus {
            active: true,
            until: Some(now + Duration::hours(6)),
            reason: Some("already armed".into()),
            remaining_ms: 0,
        };

        let outcome = add_session_pnl(-5_000, -1_000, &status, now);
        assert!(outcome.newly_armed.is_none());
        assert_eq!(outcome.new_pnl_cents, -6_000);
    }

    #[test]
    fn inactive_switch_arms_normally_through_the_guarded_entry_point() {
        let outcome = add_session_pnl(0, -5_000, &KillSwitchStatus::inactive(), Utc::now());
        assert!(outcome.newly_armed.is_some());
    }
}
