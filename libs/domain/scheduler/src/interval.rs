// [libs/domain/scheduler/src/interval.rs]
/*!
 * APARATO: MODULACION DEL INTERVALO DE TICK (ESTRATO L2)
 * RESPONSABILIDAD: El intervalo entre ticks del bucle principal no es
 * fijo: lo modulan el animo, el dia de la semana y el drift de
 * degradacion (spec.md 4.4 paso 3).
 */

use lifespan_core_chronobiology::WeeklyDay;

const MINIMUM_TICK_INTERVAL_MS: i64 = 1_000;

/// `rest` days slow the cadence by 20%, `work` days quicken it by 10%;
/// `creative`/`social` leave the base untouched. A buoyant mood then
/// quickens the result by up to 5% (troughing mood slows it by the
/// same amount), and the degradation model's own drift is added last,
/// always lengthening the interval. The result never drops below
/// `MINIMUM_TICK_INTERVAL_MS`.
pub fn modulate_tick_interval(base_interval_ms: i64, weekly_day: WeeklyDay, mood_value: f64, heartbeat_drift_ms: f64) -> i64 {
    let weekly_factor = match weekly_day {
        WeeklyDay::Rest => 1.2,
        WeeklyDay::Work => 0.9,
        WeeklyDay::Creative | WeeklyDay::Social => 1.0,
    };

    let mood_factor = 1.0 - 0.05 * mood_value;
    let modulated = base_interval_ms as f64 * weekly_factor * mood_factor + heartbeat_drift_ms;

    (modulated.round() as i64).max(MINIMUM_TICK_INTERVAL_MS)
}
