// [libs/infra/db/src/heartbeat_repository.rs]
/*!
 * APARATO: REPOSITORIO DEL SCHEDULER (ESTRATO L3)
 * RESPONSABILIDAD: Implementa `ScheduleStore` contra `heartbeat_schedule`
 * usando CAS UPDATE...WHERE para la adquisicion de arrendamientos, en el
 * mismo estilo que `mission_repository.rs` resuelve el robo de misiones
 * (spec.md 3, 4.4).
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{params, Connection, Row};
use lifespan_domain_models::{HeartbeatScheduleRow, HeartbeatTaskConfig, KillSwitchStatus, TaskCategory, Tier};
use lifespan_domain_scheduler::{ScheduleStore, TaskRunUpdate};

use crate::errors::DbError;
use crate::kv;

const K_CURRENT_TIER: &str = "lifecycle.tier";

/// Upserts every configured task at startup without disturbing rows
/// that already exist (spec.md 6 "Configuration").
pub async fn seed_missing_tasks(connection: &Connection, configs: &[HeartbeatTaskConfig], now: DateTime<Utc>) -> Result<(), DbError> {
    for config in configs {
        let row = HeartbeatScheduleRow::seed_from_config(config, now);
        connection
            .execute(
                "INSERT INTO heartbeat_schedule (
                    task_name, category, cron_expression, interval_ms, enabled, priority,
                    timeout_ms, max_retries, tier_minimum, next_run_at, run_count, fail_count
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 0, 0)
                 ON CONFLICT(task_name) DO NOTHING",
                params![
                    row.task_name.clone(),
                    row.category.as_str(),
                    row.cron_expression.clone(),
                    row.interval_ms,
                    row.enabled as i64,
                    row.priority,
                    row.timeout_ms,
                    row.max_retries,
                    row.tier_minimum.as_str(),
                    row.next_run_at.to_rfc3339(),
                ],
            )
            .await?;
    }
    Ok(())
}

pub async fn set_current_tier(connection: &Connection, tier: Tier) -> Result<(), DbError> {
    kv::set(connection, K_CURRENT_TIER, tier.as_str()).await
}

fn map_row(row: &Row) -> Result<HeartbeatScheduleRow, DbError> {
    let category: String = row.get(1)?;
    let tier_minimum: String = row.get(8)?;
    let last_run_at: Option<String> = row.get(9)?;
    let next_run_at: String = row.get(10)?;
    let lease_expires_at: Option<String> = row.get(16)?;

    Ok(HeartbeatScheduleRow {
        task_name: row.get(0)?,
        category: category.parse().map_err(DbError::MappingError)?,
        cron_expression: row.get(2)?,
        interval_ms: row.get(3)?,
        enabled: row.get::<i64>(4)? != 0,
        priority: row.get(5)?,
        timeout_ms: row.get(6)?,
        max_retries: row.get::<i64>(7)? as u32,
        tier_minimum: tier_minimum.parse().map_err(DbError::MappingError)?,
        last_run_at: last_run_at.map(|s| s.parse()).transpose().map_err(|e| DbError::MappingError(format!("{e}")))?,
        next_run_at: next_run_at.parse().map_err(|e| DbError::MappingError(format!("{e}")))?,
        last_result: row.get(11)?,
        last_error: row.get(12)?,
        run_count: row.get::<i64>(13)? as u64,
        fail_count: row.get::<i64>(14)? as u64,
        lease_owner: row.get(15)?,
        lease_expires_at: lease_expires_at.map(|s| s.parse()).transpose().map_err(|e| DbError::MappingError(format!("{e}")))?,
    })
}

const SELECT_COLUMNS: &str = "task_name, category, cron_expression, interval_ms, enabled, priority, timeout_ms, \
     max_retries, tier_minimum, last_run_at, next_run_at, last_result, last_error, run_count, \
     fail_count, lease_owner, lease_expires_at";

pub struct HeartbeatRepository {
    connection: Connection,
}

impl HeartbeatRepository {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl ScheduleStore for HeartbeatRepository {
    type Error = DbError;

    async fn due_tasks(&self, now: DateTime<Utc>) -> Result<Vec<HeartbeatScheduleRow>, Self::Error> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM heartbeat_schedule WHERE enabled = 1 AND next_run_at <= ?1");
        let mut rows = self.connection.query(&sql, params![now.to_rfc3339()]).await?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            out.push(map_row(&row)?);
        }
        Ok(out)
    }

    async fn get_task(&self, task_name: &str) -> Result<Option<HeartbeatScheduleRow>, Self::Error> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM heartbeat_schedule WHERE task_name = ?1");
        let mut rows = self.connection.query(&sql, params![task_name]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(map_row(&row)?)),
            None => Ok(None),
        }
    }

    /// CAS: succeeds only when no lease is held, the prior one expired,
    /// or this same process already owns it (idempotent re-acquisition).
    async fn try_acquire_lease(&self, task_name: &str, self_id: &str, now: DateTime<Utc>, expires_at: DateTime<Utc>) -> Result<bool, Self::Error> {
        let changed = self
            .connection
            .execute(
                "UPDATE heartbeat_schedule
                 SET lease_owner = ?2, lease_expires_at = ?3, updated_at = CURRENT_TIMESTAMP
                 WHERE task_name = ?1
                   AND (lease_owner IS NULL OR lease_expires_at <= ?4 OR lease_owner = ?2)",
                params![task_name, self_id, expires_at.to_rfc3339(), now.to_rfc3339()],
            )
            .await?;
        Ok(changed > 0)
    }

    async fn release_lease(&self, task_name: &str, self_id: &str) -> Result<(), Self::Error> {
        self.connection
            .execute(
                "UPDATE heartbeat_schedule SET lease_owner = NULL, lease_expires_at = NULL, updated_at = CURRENT_TIMESTAMP WHERE task_name = ?1 AND lease_owner = ?2",
                params![task_name, self_id],
            )
            .await?;
        Ok(())
    }

    async fn record_outcome(&self, task_name: &str, update: TaskRunUpdate) -> Result<(), Self::Error> {
        self.connection
            .execute(
                "UPDATE heartbeat_schedule
                 SET last_run_at = ?2, next_run_at = ?3, last_result = ?4, last_error = ?5,
                     run_count = run_count + ?6, fail_count = ?7, updated_at = CURRENT_TIMESTAMP
                 WHERE task_name = ?1",
                params![
                    task_name,
                    update.last_run_at.to_rfc3339(),
                    update.next_run_at.to_rfc3339(),
                    update.last_result,
                    update.last_error,
                    update.run_count_increment,
                    update.fail_count,
                ],
            )
            .await?;
        Ok(())
    }

    async fn current_tier(&self) -> Result<Tier, Self::Error> {
        match kv::get(&self.connection, K_CURRENT_TIER).await? {
            Some(raw) => raw.parse().map_err(DbError::MappingError),
            None => Ok(Tier::Normal),
        }
    }

    async fn kill_switch_status(&self, now: DateTime<Utc>) -> Result<KillSwitchStatus, Self::Error> {
        let state = crate::lifecycle_repository::load(&self.connection)
            .await?
            .ok_or_else(|| DbError::NotFound("lifecycle row".into()))?;
        Ok(KillSwitchStatus::from_persisted(state.kill_switch_until, state.kill_switch_reason, now))
    }
}
