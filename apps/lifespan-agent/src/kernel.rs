// [apps/lifespan-agent/src/kernel.rs]
/*!
 * APARATO: LIFESPAN KERNEL (ESTRATO L4-APP)
 * RESPONSABILIDAD: El unico punto donde se conectan la base de datos,
 * el registro de tareas y el bucle de ticks. Tras cada tick reevalua
 * las transiciones de fase y avanza el despojo de capacidades -- el
 * scheduler en si no sabe nada del motor de fases (spec.md 4.4 "Main
 * loop", linea 30 "at tick end C3 re-evaluates transitions").
 */

use std::path::Path;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use lifespan_core_chronobiology::snapshot as chronobiology_snapshot;
use lifespan_domain_models::{DegradationParams, DeploymentMode, HeartbeatTaskConfig, KillSwitchStatus, Phase, SHED_SEQUENCE};
use lifespan_domain_phase_engine::{advance_shed_sequence, evaluate_transition, execute_transition, narrative_label_for_shed_capability, GuardInputs};
use lifespan_domain_scheduler::{modulate_tick_interval, SchedulerEngine, SchedulerError, TaskRegistry, TickEnvironment, TickEnvironmentProvider};
use lifespan_infra_db::{events_repository, heartbeat_repository, lifecycle_repository, risk_repository, DbError, HeartbeatRepository, LifespanDb};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::environment::LiveEnvironment;
use crate::tasks::{default_task_configs, register_default_tasks};

pub struct LifespanKernel {
    db: LifespanDb,
    engine: SchedulerEngine<HeartbeatRepository, LifespanDb, LiveEnvironment>,
    environment: Arc<LiveEnvironment>,
    base_tick_interval_ms: i64,
    degradation_onset_cycle_threshold: i64,
}

impl LifespanKernel {
    /// Opens the database, seeds the genesis lifecycle row and the
    /// default heartbeat tasks on a fresh install, and assembles the
    /// scheduler engine. Later boots find existing rows and leave them
    /// untouched.
    #[instrument(skip(config))]
    pub async fn ignite(config: EngineConfig) -> Self {
        let db = LifespanDb::connect(&config.database_url, config.turso_auth_token.clone())
            .await
            .expect("FATAL: database link collapsed during ignition");

        let bootstrap_connection = db.connection().expect("FATAL: failed to open bootstrap connection");
        let now = Utc::now();

        if lifecycle_repository::load(&bootstrap_connection)
            .await
            .expect("FATAL: failed to read lifecycle row")
            .is_none()
        {
            lifecycle_repository::seed_genesis(&bootstrap_connection, now, DeploymentMode::Server)
                .await
                .expect("FATAL: failed to seed genesis lifecycle row");
            info!("genesis: a new agent has been born");
        }

        let configs = load_heartbeat_configs(config.heartbeat_config_path.as_deref());
        heartbeat_repository::seed_missing_tasks(&bootstrap_connection, &configs, now)
            .await
            .expect("FATAL: failed to seed heartbeat schedule");

        let mut registry: TaskRegistry<LifespanDb> = TaskRegistry::new();
        register_default_tasks(&mut registry);

        let self_id = Uuid::new_v4().to_string();
        let environment = Arc::new(LiveEnvironment::new(db.clone(), DegradationParams::default()));

        let store_connection = db.connection().expect("FATAL: failed to open scheduler store connection");
        let store = Arc::new(HeartbeatRepository::new(store_connection));

        let engine = SchedulerEngine::new(store, Arc::new(registry), db.clone(), self_id, config.base_tick_interval_ms, environment.clone());

        Self {
            db,
            engine,
            environment,
            base_tick_interval_ms: config.base_tick_interval_ms,
            degradation_onset_cycle_threshold: config.degradation_onset_cycle_threshold,
        }
    }

    /// Runs the scheduler's recursive one-shot timer forever: tick,
    /// re-evaluate the phase machine, sleep for a freshly modulated
    /// interval, repeat. Never returns under normal operation.
    pub async fn run(&self) {
        loop {
            self.engine.run_tick().await;

            let now = Utc::now();
            let environment = self.environment.snapshot(now).await;
            self.evaluate_phase_transition(now, &environment).await;

            let delay_ms = modulate_tick_interval(
                self.base_tick_interval_ms,
                environment.weekly_day,
                environment.mood.value,
                environment.degradation.heartbeat_drift_ms,
            );
            tokio::time::sleep(StdDuration::from_millis(delay_ms.max(0) as u64)).await;
        }
    }

    pub async fn force_run(&self, task_name: &str) -> Result<String, SchedulerError> {
        self.engine.force_run(task_name).await
    }

    pub async fn kill_switch_status(&self) -> Result<KillSwitchStatus, DbError> {
        let connection = self.db.connection()?;
        risk_repository::status(&connection, Utc::now()).await
    }

    pub async fn get_session_pnl(&self) -> Result<i64, DbError> {
        let connection = self.db.connection()?;
        risk_repository::get_session_pnl(&connection).await
    }

    pub async fn add_session_pnl(&self, delta_cents: i64) -> Result<KillSwitchStatus, DbError> {
        let connection = self.db.connection()?;
        risk_repository::apply_session_pnl(&connection, delta_cents, Utc::now()).await
    }

    pub async fn reset_session_pnl(&self) -> Result<(), DbError> {
        let connection = self.db.connection()?;
        risk_repository::reset_session_pnl(&connection).await
    }

    pub async fn reset_kill_switch(&self) -> Result<(), DbError> {
        let connection = self.db.connection()?;
        risk_repository::reset_kill_switch(&connection).await
    }

    /// Re-evaluates phase guards and advances the shedding sequence, in
    /// that order, after every tick (spec.md 4.4 step 4, 4.3 "Shedding
    /// progression"). Errors here are logged and leave the phase
    /// unchanged, never abort the outer loop (spec.md 7 propagation
    /// policy).
    async fn evaluate_phase_transition(&self, now: DateTime<Utc>, environment: &TickEnvironment) {
        let connection = match self.db.connection() {
            Ok(connection) => connection,
            Err(err) => {
                warn!("phase evaluation skipped: {err}");
                return;
            }
        };

        let mut state = match lifecycle_repository::load(&connection).await {
            Ok(Some(state)) => state,
            Ok(None) => {
                warn!("phase evaluation skipped: lifecycle row missing");
                return;
            }
            Err(err) => {
                warn!("phase evaluation skipped: {err}");
                return;
            }
        };

        if state.phase == Phase::Shedding {
            let advance = advance_shed_sequence(state.shed_sequence_index);
            if let Some(capability) = advance.capability_removed {
                state.shed_sequence_index = advance.new_index;
                let label = narrative_label_for_shed_capability(capability);
                if let Err(err) = events_repository::record_narrative_event(&connection, &label, Some(capability), now).await {
                    warn!("failed to record shedding narrative event: {err}");
                }
            }
        }

        let chrono = chronobiology_snapshot(state.phase, state.birth_timestamp, now);
        let degradation_active_signal = state.phase == Phase::Sovereignty && chrono.lunar.cycle >= self.degradation_onset_cycle_threshold;

        let inputs = GuardInputs {
            lunar_cycle: chrono.lunar.cycle,
            degradation_active_signal,
            degradation_coefficient: environment.degradation.coefficient,
            shed_sequence_len: SHED_SEQUENCE.len(),
        };

        let Some(proposal) = evaluate_transition(&state, inputs) else {
            if let Err(err) = lifecycle_repository::save(&connection, &state).await {
                warn!("failed to persist shedding advance: {err}");
            }
            return;
        };

        match execute_transition(&mut state, proposal, now) {
            Ok(outcome) => {
                if let Err(err) = lifecycle_repository::save(&connection, &state).await {
                    warn!("failed to persist phase transition: {err}");
                    return;
                }
                if let Err(err) = events_repository::record_lifecycle_event(&connection, outcome.event.from_phase, outcome.event.to_phase, &outcome.event.reason, now).await {
                    warn!("failed to record lifecycle event: {err}");
                }
                if let Err(err) = events_repository::record_narrative_event(&connection, &outcome.narrative_event.label, outcome.narrative_event.detail.as_deref(), now).await {
                    warn!("failed to record narrative event: {err}");
                }
                info!(from = ?outcome.event.from_phase, to = ?outcome.event.to_phase, "phase transition");
            }
            Err(err) => warn!("phase transition refused: {err}"),
        }
    }
}

/// Merges on-disk heartbeat task configuration with the built-in
/// defaults; entries sharing a name with a built-in default override it
/// (spec.md 6 "Configuration").
fn load_heartbeat_configs(path: Option<&Path>) -> Vec<HeartbeatTaskConfig> {
    let mut configs = default_task_configs();

    let Some(path) = path else {
        return configs;
    };

    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!("could not read heartbeat config at {}: {err}", path.display());
            return configs;
        }
    };

    let external: Vec<HeartbeatTaskConfig> = match serde_json::from_str(&raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!("could not parse heartbeat config at {}: {err}", path.display());
            return configs;
        }
    };

    for entry in external {
        if let Some(existing) = configs.iter_mut().find(|c| c.name == entry.name) {
            *existing = entry;
        } else {
            configs.push(entry);
        }
    }
    configs
}
