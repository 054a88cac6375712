// [libs/domain/risk-gate/src/limits.rs]
/*!
 * APARATO: LIMITES DE RIESGO (ESTRATO L2)
 * RESPONSABILIDAD: Las constantes fijas del corte de riesgo
 * (spec.md 4.5). Todo en centavos y milisegundos; nunca en punto
 * flotante.
 */

pub const STARTING_VIRTUAL_BALANCE_CENTS: i64 = 100_000;
pub const MAX_DRAWDOWN_FRACTION: f64 = 0.05;
pub const DRAWDOWN_LIMIT_CENTS: i64 = -5_000;
pub const HALT_DURATION_MS: i64 = 12 * 3_600 * 1_000;
