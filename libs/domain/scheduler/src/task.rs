// [libs/domain/scheduler/src/task.rs]
/*!
 * APARATO: CONTEXTO Y FIRMA DE TAREA (ESTRATO L2)
 * RESPONSABILIDAD: La forma que recibe el cuerpo de cada tarea de
 * heartbeat en cada ejecucion (spec.md 4.4 paso 2c).
 */

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use lifespan_core_chronobiology::{MoodSample, WeeklyDay};
use lifespan_domain_models::{DegradationState, KillSwitchStatus, Phase, WakeCallback};

/// Everything a task body needs, reassembled fresh on every invocation.
/// `Db` is left generic so this crate never depends on a concrete
/// storage engine -- the binary crate supplies the real connection type.
#[derive(Clone)]
pub struct TaskContext<Db> {
    pub task_name: String,
    pub self_id: String,
    pub db: Db,
    pub phase: Phase,
    pub mood: MoodSample,
    pub weekly_day: WeeklyDay,
    pub degradation: DegradationState,
    pub kill_switch: KillSwitchStatus,
    pub wake: Arc<dyn WakeCallback>,
}

/// A task either reports a human-readable result string, or an opaque
/// failure message destined for `last_error` -- never the underlying
/// cause of a library error, per the same non-leaking discipline as
/// the degradation model's tool-wrap contract.
pub type TaskResult = Result<String, String>;

pub type TaskFn<Db> = Arc<dyn Fn(TaskContext<Db>) -> Pin<Box<dyn Future<Output = TaskResult> + Send>> + Send + Sync>;
