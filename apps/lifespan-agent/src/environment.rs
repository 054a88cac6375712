// [apps/lifespan-agent/src/environment.rs]
/*!
 * APARATO: PROVEEDOR DE ENTORNO DE TICK (ESTRATO L4-APP)
 * RESPONSABILIDAD: La unica implementacion concreta de
 * `TickEnvironmentProvider`: lee la fila de ciclo de vida persistida y
 * recompone la instantanea de cronobiologia y degradacion desde cero en
 * cada tick (spec.md 4.1, 4.2 -- nada de esto se cachea).
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lifespan_core_chronobiology::snapshot as chronobiology_snapshot;
use lifespan_core_degradation::derive_state;
use lifespan_domain_models::DegradationParams;
use lifespan_domain_scheduler::{TickEnvironment, TickEnvironmentProvider};
use lifespan_infra_db::{lifecycle_repository, LifespanDb};

/// Composes the two pure engines (C1, C2) over whatever the persisted
/// lifecycle row currently says. Panics if the genesis row is missing,
/// which cannot happen once `LifespanKernel::ignite` has run.
pub struct LiveEnvironment {
    db: LifespanDb,
    degradation_params: DegradationParams,
}

impl LiveEnvironment {
    pub fn new(db: LifespanDb, degradation_params: DegradationParams) -> Self {
        Self { db, degradation_params }
    }
}

#[async_trait]
impl TickEnvironmentProvider for LiveEnvironment {
    async fn snapshot(&self, now: DateTime<Utc>) -> TickEnvironment {
        let connection = self.db.connection().expect("FATAL: database link collapsed mid-tick");
        let state = lifecycle_repository::load(&connection)
            .await
            .expect("FATAL: failed to read lifecycle row")
            .expect("FATAL: lifecycle row missing after genesis");

        let chrono = chronobiology_snapshot(state.phase, state.birth_timestamp, now);
        let degradation = derive_state(state.degradation_onset_cycle, chrono.lunar.cycle, chrono.mood.value, self.degradation_params);

        TickEnvironment {
            phase: state.phase,
            mood: chrono.mood,
            weekly_day: chrono.weekly,
            degradation,
        }
    }
}
