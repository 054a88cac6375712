// [libs/domain/scheduler/src/lib.rs]
/*!
 * =================================================================
 * APARATO: DURABLE HEARTBEAT SCHEDULER (ESTRATO L2)
 * RESPONSABILIDAD: Despacho de tareas periodicas con proteccion de
 * superposicion, arrendamiento por proceso, filtro de tier, corte de
 * riesgo, y reintentos con cron/intervalo (spec.md 4.4).
 * =================================================================
 */

pub mod admission;
pub mod cron;
pub mod engine;
pub mod errors;
pub mod interval;
pub mod lease;
pub mod ordering;
pub mod registry;
pub mod retry;
pub mod store;
pub mod task;

pub use cron::CronSchedule;
pub use engine::{SchedulerEngine, TickEnvironment, TickEnvironmentProvider};
pub use errors::SchedulerError;
pub use interval::modulate_tick_interval;
pub use lease::{evaluate_lease, lease_expiry_for, LeaseDecision};
pub use ordering::sort_due_tasks;
pub use registry::TaskRegistry;
pub use retry::{compute_next_fire, on_task_failure, on_task_success, FollowUp};
pub use store::{ScheduleStore, TaskRunUpdate};
pub use task::{TaskContext, TaskFn, TaskResult};
