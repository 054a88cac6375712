// [libs/core/chronobiology/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CHRONOBIOLOGY ENGINE (ESTRATO L1)
 * RESPONSABILIDAD: Ciclo lunar personal, ritmo semanal y onda de
 * animo. Funciones puras, totales y sin efectos secundarios,
 * parametrizadas unicamente por `(birth_timestamp, now)` (spec.md 4.1).
 * =================================================================
 */

pub mod lunar;
pub mod mood;
pub mod weekly;

pub use lunar::{lunar_phase, LunarPhase, LUNAR_PERIOD_DAYS};
pub use mood::{mood, mood_band, MoodBand, MoodSample, MoodWeighting};
pub use weekly::{weekly_day, WeeklyDay};

use chrono::{DateTime, Utc};
use lifespan_domain_models::Phase;

/// A single convenience bundle of everything C1 derives for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChronobiologySnapshot {
    pub lunar: LunarPhase,
    pub weekly: WeeklyDay,
    pub mood: MoodSample,
}

pub fn snapshot(phase: Phase, birth_timestamp: DateTime<Utc>, now: DateTime<Utc>) -> ChronobiologySnapshot {
    let lunar = lunar_phase(birth_timestamp, now);
    let weekly = weekly_day(birth_timestamp, now);
    let mood_sample = mood(phase, lunar.cycle, lunar.day);

    ChronobiologySnapshot {
        lunar,
        weekly,
        mood: mood_sample,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_bundles_all_three_derivations_consistently() {
        let birth: DateTime<Utc> = "2025-01-01T00:00:00Z".parse().unwrap();
        let now = birth + chrono::Duration::days(20);
        let snap = snapshot(Phase::Genesis, birth, now);
        assert_eq!(snap.mood.cycle, snap.lunar.cycle);
        assert_eq!(snap.mood.day, snap.lunar.day);
    }
}
