// [libs/infra/db/src/risk_repository.rs]
/*!
 * APARATO: REPOSITORIO DEL CORTE DE RIESGO (ESTRATO L3)
 * RESPONSABILIDAD: Aplica las transiciones puras de
 * `lifespan-domain-risk-gate` y persiste el resultado en la misma fila
 * de ciclo de vida (spec.md 4.5, 6).
 */

use chrono::{DateTime, Utc};
use libsql::Connection;
use lifespan_domain_models::KillSwitchStatus;
use lifespan_domain_risk_gate::add_session_pnl;

use crate::errors::DbError;
use crate::lifecycle_repository;

pub async fn status(connection: &Connection, now: DateTime<Utc>) -> Result<KillSwitchStatus, DbError> {
    let state = lifecycle_repository::load(connection)
        .await?
        .ok_or_else(|| DbError::NotFound("lifecycle row".into()))?;
    Ok(KillSwitchStatus::from_persisted(state.kill_switch_until, state.kill_switch_reason, now))
}

/// The running session P&L balance in cents, independent of whether
/// the kill switch it may have armed is still active (spec.md 4.5, 183).
pub async fn get_session_pnl(connection: &Connection) -> Result<i64, DbError> {
    let state = lifecycle_repository::load(connection)
        .await?
        .ok_or_else(|| DbError::NotFound("lifecycle row".into()))?;
    Ok(state.session_pnl_cents)
}

/// Zeroes the running P&L balance without touching any active halt --
/// clearing a halt is `reset_kill_switch`'s job, not this one's
/// (spec.md 183 lists the two as separate operations).
pub async fn reset_session_pnl(connection: &Connection) -> Result<(), DbError> {
    let mut state = lifecycle_repository::load(connection)
        .await?
        .ok_or_else(|| DbError::NotFound("lifecycle row".into()))?;
    state.session_pnl_cents = 0;
    lifecycle_repository::save(connection, &state).await
}

/// Clears an armed halt, regardless of whether it has expired yet --
/// used for an operator-initiated override, not the ordinary expiry
/// path (which `KillSwitchStatus::from_persisted` already handles by
/// treating a past `until` as inactive).
pub async fn reset_kill_switch(connection: &Connection) -> Result<(), DbError> {
    let mut state = lifecycle_repository::load(connection)
        .await?
        .ok_or_else(|| DbError::NotFound("lifecycle row".into()))?;
    state.kill_switch_until = None;
    state.kill_switch_reason = None;
    lifecycle_repository::save(connection, &state).await
}

/// Applies a realized P&L delta and persists the resulting balance and,
/// if this delta breaches the drawdown limit, the newly armed halt.
/// An already-active switch is never extended (spec.md 4.5).
pub async fn apply_session_pnl(connection: &Connection, delta_cents: i64, now: DateTime<Utc>) -> Result<KillSwitchStatus, DbError> {
    let mut state = lifecycle_repository::load(connection)
        .await?
        .ok_or_else(|| DbError::NotFound("lifecycle row".into()))?;

    let current_status = KillSwitchStatus::from_persisted(state.kill_switch_until, state.kill_switch_reason.clone(), now);
    let outcome = add_session_pnl(state.session_pnl_cents, delta_cents, &current_status, now);

    state.session_pnl_cents = outcome.new_pnl_cents;
    if let Some(arm) = outcome.newly_armed {
        state.kill_switch_until = Some(arm.until);
        state.kill_switch_reason = Some(arm.reason);
    }

    lifecycle_repository::save(connection, &state).await?;
    Ok(KillSwitchStatus::from_persisted(state.kill_switch_until, state.kill_switch_reason, now))
}
