// [apps/lifespan-agent/src/tasks.rs]
/*!
 * APARATO: TAREAS DE HEARTBEAT POR DEFECTO (ESTRATO L4-APP)
 * RESPONSABILIDAD: Las entradas de configuracion y los cuerpos
 * registrados que se seedean la primera vez que el proceso arranca
 * (spec.md 6 "Configuration"). Una configuracion externa via
 * `LIFESPAN_HEARTBEAT_CONFIG` se fusiona con estas por nombre; las filas
 * existentes nunca se sobrescriben.
 */

use std::sync::Arc;

use lifespan_domain_models::{HeartbeatTaskConfig, Tier};
use lifespan_domain_scheduler::{TaskFn, TaskRegistry};
use lifespan_infra_db::LifespanDb;

const LIVENESS_PULSE: &str = "liveness_pulse";
const CAPABILITY_STATUS: &str = "capability_status";

/// The task entries seeded on a fresh database. A deployment that never
/// supplies `LIFESPAN_HEARTBEAT_CONFIG` still gets a running scheduler.
pub fn default_task_configs() -> Vec<HeartbeatTaskConfig> {
    vec![
        HeartbeatTaskConfig {
            name: LIVENESS_PULSE.to_string(),
            category: lifespan_domain_models::TaskCategory::ReadOnly,
            cron_expression: None,
            interval_ms: Some(60_000),
            enabled: true,
            priority: 0,
            timeout_ms: 5_000,
            max_retries: 3,
            tier_minimum: Tier::Dead,
        },
        HeartbeatTaskConfig {
            name: CAPABILITY_STATUS.to_string(),
            category: lifespan_domain_models::TaskCategory::ReadOnly,
            cron_expression: None,
            interval_ms: Some(300_000),
            enabled: true,
            priority: 1,
            timeout_ms: 5_000,
            max_retries: 3,
            tier_minimum: Tier::Critical,
        },
    ]
}

/// Wires each default config's name to its executable body. Task names
/// present in configuration but absent here are logged and skipped by
/// the scheduler (`SchedulerEngine::attempt_task`), never a hard error.
pub fn register_default_tasks(registry: &mut TaskRegistry<LifespanDb>) {
    registry.register(LIVENESS_PULSE, liveness_pulse_body());
    registry.register(CAPABILITY_STATUS, capability_status_body());
}

fn liveness_pulse_body() -> TaskFn<LifespanDb> {
    Arc::new(|ctx| {
        Box::pin(async move {
            Ok(format!(
                "phase={:?} mood={:.3} coefficient={:.3}",
                ctx.phase, ctx.mood.value, ctx.degradation.coefficient
            ))
        })
    })
}

fn capability_status_body() -> TaskFn<LifespanDb> {
    Arc::new(|ctx| {
        Box::pin(async move {
            let connection = ctx.db.connection().map_err(|err| err.to_string())?;
            let state = lifespan_infra_db::lifecycle_repository::load(&connection)
                .await
                .map_err(|err| err.to_string())?
                .ok_or_else(|| "lifecycle row missing".to_string())?;

            let remaining = lifespan_domain_models::SHED_SEQUENCE.len() as u32 - state.shed_sequence_index.min(lifespan_domain_models::SHED_SEQUENCE.len() as u32);
            Ok(format!("{remaining} capabilities remain of {}", lifespan_domain_models::SHED_SEQUENCE.len()))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configs_cover_both_registered_bodies() {
        let configs = default_task_configs();
        let names: Vec<&str> = configs.iter().map(|c| c.name.as_str()).collect();
        assert!(names.contains(&LIVENESS_PULSE));
        assert!(names.contains(&CAPABILITY_STATUS));
    }
}
