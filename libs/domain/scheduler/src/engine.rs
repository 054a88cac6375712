// [libs/domain/scheduler/src/engine.rs]
/*!
 * =================================================================
 * APARATO: BUCLE DE TICKS DEL SCHEDULER (ESTRATO L2)
 * RESPONSABILIDAD: El ciclo cooperativo de un solo proceso que
 * despacha tareas de heartbeat con proteccion de superposicion
 * (spec.md 4.4).
 *
 * "Recursive one-shot timer" means exactly this: sleep, then run, then
 * sleep again for a freshly modulated duration -- never
 * `tokio::time::interval`, whose ticks fire on a fixed cadence
 * regardless of how long the previous tick took and would therefore
 * let two ticks run concurrently under load.
 * =================================================================
 */

use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lifespan_core_chronobiology::{MoodSample, WeeklyDay};
use lifespan_domain_models::{DegradationState, HeartbeatScheduleRow, NullWakeCallback, Phase, WakeCallback};
use tracing::{debug, info, instrument, warn};

use crate::admission::{check_kill_switch, check_tier};
use crate::errors::SchedulerError;
use crate::interval::modulate_tick_interval;
use crate::lease::{evaluate_lease, lease_expiry_for, LeaseDecision};
use crate::ordering::sort_due_tasks;
use crate::registry::TaskRegistry;
use crate::retry::{on_task_failure, on_task_success};
use crate::store::{ScheduleStore, TaskRunUpdate};
use crate::task::TaskContext;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickEnvironment {
    pub phase: Phase,
    pub mood: MoodSample,
    pub weekly_day: WeeklyDay,
    pub degradation: DegradationState,
}

/// Supplies the chronobiology/degradation snapshot for a tick. The
/// engine itself never computes a sine wave or an exponential curve --
/// that arithmetic belongs to `lifespan-core-chronobiology` and
/// `lifespan-core-degradation`, wired together by the caller.
#[async_trait]
pub trait TickEnvironmentProvider: Send + Sync {
    async fn snapshot(&self, now: DateTime<Utc>) -> TickEnvironment;
}

pub struct SchedulerEngine<S, Db, P>
where
    S: ScheduleStore,
    Db: Clone + Send + Sync + 'static,
    P: TickEnvironmentProvider,
{
    store: Arc<S>,
    registry: Arc<TaskRegistry<Db>>,
    db: Db,
    self_id: String,
    base_tick_interval_ms: i64,
    wake: Arc<dyn WakeCallback>,
    environment: Arc<P>,
    last_logged_halt: Mutex<Option<DateTime<Utc>>>,
}

impl<S, Db, P> SchedulerEngine<S, Db, P>
where
    S: ScheduleStore + 'static,
    Db: Clone + Send + Sync + 'static,
    P: TickEnvironmentProvider + 'static,
{
    pub fn new(store: Arc<S>, registry: Arc<TaskRegistry<Db>>, db: Db, self_id: String, base_tick_interval_ms: i64, environment: Arc<P>) -> Self {
        Self {
            store,
            registry,
            db,
            self_id,
            base_tick_interval_ms,
            wake: Arc::new(NullWakeCallback),
            environment,
            last_logged_halt: Mutex::new(None),
        }
    }

    pub fn with_wake_callback(mut self, wake: Arc<dyn WakeCallback>) -> Self {
        self.wake = wake;
        self
    }

    /// Runs the first tick synchronously, then sleeps and ticks forever.
    /// Never returns under normal operation.
    pub async fn run_forever(self: Arc<Self>) {
        loop {
            self.run_tick().await;

            let now = Utc::now();
            let environment = self.environment.snapshot(now).await;
            let delay_ms = modulate_tick_interval(
                self.base_tick_interval_ms,
                environment.weekly_day,
                environment.mood.value,
                environment.degradation.heartbeat_drift_ms,
            );

            tokio::time::sleep(StdDuration::from_millis(delay_ms.max(0) as u64)).await;
        }
    }

    #[instrument(skip(self))]
    pub async fn run_tick(&self) {
        let now = Utc::now();

        let mut due = match self.store.due_tasks(now).await {
            Ok(rows) => rows,
            Err(err) => {
                warn!("tick aborted: failed to load due tasks: {err}");
                return;
            }
        };
        sort_due_tasks(&mut due);

        let kill_switch = match self.store.kill_switch_status(now).await {
            Ok(status) => status,
            Err(err) => {
                warn!("tick aborted: failed to load kill switch status: {err}");
                return;
            }
        };
        let current_tier = match self.store.current_tier().await {
            Ok(tier) => tier,
            Err(err) => {
                warn!("tick aborted: failed to load survival tier: {err}");
                return;
            }
        };
        let environment = self.environment.snapshot(now).await;

        for row in due {
            self.attempt_task(&row, now, &kill_switch, current_tier, environment).await;
        }
    }

    /// Bypasses scheduling (ignores `next_run_at`) but not the lease,
    /// tier gate, or kill switch (spec.md 4.4 "Force-run").
    pub async fn force_run(&self, task_name: &str) -> Result<String, SchedulerError> {
        let now = Utc::now();

        let row = self
            .store
            .get_task(task_name)
            .await
            .map_err(|err| SchedulerError::TaskFailure { task: task_name.to_string(), cause: err.to_string() })?
            .ok_or_else(|| SchedulerError::UnknownTask(task_name.to_string()))?;

        let kill_switch = self
            .store
            .kill_switch_status(now)
            .await
            .map_err(|err| SchedulerError::TaskFailure { task: task_name.to_string(), cause: err.to_string() })?;
        let current_tier = self
            .store
            .current_tier()
            .await
            .map_err(|err| SchedulerError::TaskFailure { task: task_name.to_string(), cause: err.to_string() })?;
        let environment = self.environment.snapshot(now).await;

        self.attempt_task(&row, now, &kill_switch, current_tier, environment)
            .await
            .ok_or_else(|| SchedulerError::LeaseContended(task_name.to_string()))
    }

    /// Logs a kill-switch skip once per halt at `info`, matching "skipped
    /// with a single log line" (spec.md 152) instead of once per may-act
    /// task per tick for the whole 12-hour halt. Repeats within the same
    /// halt fall back to `debug`.
    fn log_kill_switch_skip(&self, err: &SchedulerError, until: Option<DateTime<Utc>>) {
        let mut last_logged = self.last_logged_halt.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if *last_logged == until {
            debug!("{err}");
            return;
        }
        *last_logged = until;
        info!("{err}");
    }

    async fn attempt_task(
        &self,
        row: &HeartbeatScheduleRow,
        now: DateTime<Utc>,
        kill_switch: &lifespan_domain_models::KillSwitchStatus,
        current_tier: lifespan_domain_models::Tier,
        environment: TickEnvironment,
    ) -> Option<String> {
        if let Err(err) = check_tier(&row.task_name, row.tier_minimum, current_tier) {
            debug!("{err}");
            return None;
        }
        if let Err(err) = check_kill_switch(&row.task_name, row.category, kill_switch) {
            self.log_kill_switch_skip(&err, kill_switch.until);
            return None;
        }
        if evaluate_lease(row, now, &self.self_id) == LeaseDecision::HeldByOther {
            debug!("lease for '{}' held by another owner", row.task_name);
            return None;
        }

        let expires_at = lease_expiry_for(row, now);
        let acquired = self.store.try_acquire_lease(&row.task_name, &self.self_id, now, expires_at).await.unwrap_or(false);
        if !acquired {
            debug!("lease for '{}' contended at acquisition time", row.task_name);
            return None;
        }

        let Some(task_fn) = self.registry.get(&row.task_name) else {
            warn!("'{}' is scheduled but has no registered task function", row.task_name);
            let _ = self.store.release_lease(&row.task_name, &self.self_id).await;
            return None;
        };

        let context = TaskContext {
            task_name: row.task_name.clone(),
            self_id: self.self_id.clone(),
            db: self.db.clone(),
            phase: environment.phase,
            mood: environment.mood,
            weekly_day: environment.weekly_day,
            degradation: environment.degradation,
            kill_switch: kill_switch.clone(),
            wake: self.wake.clone(),
        };

        let timeout = StdDuration::from_millis(row.timeout_ms.max(0) as u64);
        let run_started_at = Utc::now();
        let outcome = tokio::time::timeout(timeout, task_fn(context)).await;

        let returned_result = match outcome {
            Ok(Ok(result)) => {
                let next_run_at = on_task_success(row, run_started_at).unwrap_or(run_started_at);
                let update = TaskRunUpdate {
                    last_run_at: run_started_at,
                    next_run_at,
                    last_result: Some(result.clone()),
                    last_error: None,
                    run_count_increment: 1,
                    fail_count: row.fail_count,
                };
                let _ = self.store.record_outcome(&row.task_name, update).await;
                let _ = self.store.release_lease(&row.task_name, &self.self_id).await;
                Some(result)
            }
            Ok(Err(message)) => {
                let follow_up = on_task_failure(row, run_started_at).unwrap_or(crate::retry::FollowUp { next_run_at: run_started_at, fail_count: row.fail_count + 1 });
                let update = TaskRunUpdate {
                    last_run_at: run_started_at,
                    next_run_at: follow_up.next_run_at,
                    last_result: None,
                    last_error: Some(message),
                    run_count_increment: 0,
                    fail_count: follow_up.fail_count,
                };
                let _ = self.store.record_outcome(&row.task_name, update).await;
                let _ = self.store.release_lease(&row.task_name, &self.self_id).await;
                None
            }
            Err(_elapsed) => {
                // Timed out: the spawned future may still be running uncancelled.
                // Abandon the lease rather than release it -- it is reclaimed
                // naturally once it expires (spec.md 127), never immediately by
                // a second tick or process while the original attempt may still
                // be in flight.
                let err = SchedulerError::TaskTimeout { task: row.task_name.clone(), timeout_ms: row.timeout_ms };
                warn!("{err}");
                let follow_up = on_task_failure(row, run_started_at).unwrap_or(crate::retry::FollowUp { next_run_at: run_started_at, fail_count: row.fail_count + 1 });
                let update = TaskRunUpdate {
                    last_run_at: run_started_at,
                    next_run_at: follow_up.next_run_at,
                    last_result: None,
                    last_error: Some(err.to_string()),
                    run_count_increment: 0,
                    fail_count: follow_up.fail_count,
                };
                let _ = self.store.record_outcome(&row.task_name, update).await;
                None
            }
        };

        returned_result
    }
}
