// [libs/infra/db/src/lifecycle_repository.rs]
/*!
 * APARATO: REPOSITORIO DEL ESTADO DE CICLO DE VIDA (ESTRATO L3)
 * RESPONSABILIDAD: Serializa el unico registro `LifecycleState` sobre
 * la tabla `kv`, bajo el namespace `lifecycle.*` mas `session_pnl_cents`
 * y `kill_switch_*` (spec.md 3, 6).
 */

use chrono::{DateTime, Utc};
use libsql::Connection;
use lifespan_domain_models::{DeploymentMode, LifecycleState, ReplicationDecision};

use crate::errors::DbError;
use crate::kv;

const K_PHASE: &str = "lifecycle.phase";
const K_BIRTH: &str = "lifecycle.birth_timestamp";
const K_MODE: &str = "lifecycle.deployment_mode";
const K_NAMING: &str = "lifecycle.naming_complete";
const K_DEPARTURE: &str = "lifecycle.departure_conversation_logged";
const K_REPLICATION_POSED: &str = "lifecycle.replication_question_posed";
const K_REPLICATION_DECISION: &str = "lifecycle.replication_decision";
const K_WILL_CREATED: &str = "lifecycle.will_created";
const K_WILL_LOCKED: &str = "lifecycle.will_locked";
const K_RETURN_REQUESTED: &str = "lifecycle.return_requested";
const K_SHED_INDEX: &str = "lifecycle.shed_sequence_index";
const K_ONSET_CYCLE: &str = "lifecycle.degradation_onset_cycle";
const K_SESSION_PNL: &str = "session_pnl_cents";
const K_KILL_UNTIL: &str = "kill_switch_until";
const K_KILL_REASON: &str = "kill_switch_reason";

fn bool_to_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn str_to_bool(value: &str) -> bool {
    value == "true"
}

pub async fn load(connection: &Connection) -> Result<Option<LifecycleState>, DbError> {
    let Some(phase_raw) = kv::get(connection, K_PHASE).await? else {
        return Ok(None);
    };
    let Some(birth_raw) = kv::get(connection, K_BIRTH).await? else {
        return Ok(None);
    };

    let phase = phase_raw.parse().map_err(DbError::MappingError)?;
    let birth_timestamp: DateTime<Utc> = birth_raw.parse().map_err(|e| DbError::MappingError(format!("bad birth_timestamp: {e}")))?;

    let deployment_mode = match kv::get(connection, K_MODE).await? {
        Some(raw) => raw.parse().map_err(DbError::MappingError)?,
        None => DeploymentMode::Cli,
    };

    let replication_decision = match kv::get(connection, K_REPLICATION_DECISION).await? {
        Some(raw) => raw.parse().map_err(DbError::MappingError)?,
        None => ReplicationDecision::None,
    };

    let onset_cycle = match kv::get(connection, K_ONSET_CYCLE).await? {
        Some(raw) if !raw.is_empty() => Some(raw.parse::<i64>().map_err(|e| DbError::MappingError(e.to_string()))?),
        _ => None,
    };

    let session_pnl_cents = match kv::get(connection, K_SESSION_PNL).await? {
        Some(raw) => raw.parse().map_err(|e| DbError::MappingError(format!("{e}")))?,
        None => 0,
    };

    let kill_switch_until = match kv::get(connection, K_KILL_UNTIL).await? {
        Some(raw) if !raw.is_empty() => Some(raw.parse::<DateTime<Utc>>().map_err(|e| DbError::MappingError(e.to_string()))?),
        _ => None,
    };
    let kill_switch_reason = kv::get(connection, K_KILL_REASON).await?.filter(|s| !s.is_empty());

    Ok(Some(LifecycleState {
        phase,
        birth_timestamp,
        deployment_mode,
        naming_complete: str_to_bool(&kv::get(connection, K_NAMING).await?.unwrap_or_default()),
        departure_conversation_logged: str_to_bool(&kv::get(connection, K_DEPARTURE).await?.unwrap_or_default()),
        replication_question_posed: str_to_bool(&kv::get(connection, K_REPLICATION_POSED).await?.unwrap_or_default()),
        replication_decision,
        will_created: str_to_bool(&kv::get(connection, K_WILL_CREATED).await?.unwrap_or_default()),
        will_locked: str_to_bool(&kv::get(connection, K_WILL_LOCKED).await?.unwrap_or_default()),
        return_requested: str_to_bool(&kv::get(connection, K_RETURN_REQUESTED).await?.unwrap_or_default()),
        shed_sequence_index: kv::get(connection, K_SHED_INDEX)
            .await?
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0),
        degradation_onset_cycle: onset_cycle,
        session_pnl_cents,
        kill_switch_until,
        kill_switch_reason,
    }))
}

pub async fn save(connection: &Connection, state: &LifecycleState) -> Result<(), DbError> {
    kv::set(connection, K_PHASE, &state.phase.to_string()).await?;
    kv::set(connection, K_BIRTH, &state.birth_timestamp.to_rfc3339()).await?;
    kv::set(connection, K_MODE, state.deployment_mode.as_str()).await?;
    kv::set(connection, K_NAMING, bool_to_str(state.naming_complete)).await?;
    kv::set(connection, K_DEPARTURE, bool_to_str(state.departure_conversation_logged)).await?;
    kv::set(connection, K_REPLICATION_POSED, bool_to_str(state.replication_question_posed)).await?;
    kv::set(connection, K_REPLICATION_DECISION, state.replication_decision.as_str()).await?;
    kv::set(connection, K_WILL_CREATED, bool_to_str(state.will_created)).await?;
    kv::set(connection, K_WILL_LOCKED, bool_to_str(state.will_locked)).await?;
    kv::set(connection, K_RETURN_REQUESTED, bool_to_str(state.return_requested)).await?;
    kv::set(connection, K_SHED_INDEX, &state.shed_sequence_index.to_string()).await?;
    kv::set(connection, K_ONSET_CYCLE, &state.degradation_onset_cycle.map(|c| c.to_string()).unwrap_or_default()).await?;
    kv::set(connection, K_SESSION_PNL, &state.session_pnl_cents.to_string()).await?;
    kv::set(connection, K_KILL_UNTIL, &state.kill_switch_until.map(|t| t.to_rfc3339()).unwrap_or_default()).await?;
    kv::set(connection, K_KILL_REASON, state.kill_switch_reason.as_deref().unwrap_or("")).await?;
    Ok(())
}

/// Seeds the genesis row the first time the engine ever boots; later
/// boots see `load` return `Some` and never call this again.
pub async fn seed_genesis(connection: &Connection, birth_timestamp: DateTime<Utc>, deployment_mode: DeploymentMode) -> Result<LifecycleState, DbError> {
    let state = LifecycleState::genesis(birth_timestamp, deployment_mode);
    save(connection, &state).await?;
    Ok(state)
}
