// [libs/core/chronobiology/src/mood.rs]
/*!
 * APARATO: ONDA DE ANIMO (ESTRATO L1)
 * RESPONSABILIDAD: Valor de animo senoidal, su ponderacion derivada
 * y su banda descriptiva en lenguaje natural (spec.md 4.1).
 */

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use lifespan_domain_models::Phase;

use crate::lunar::LUNAR_PERIOD_DAYS;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodSample {
    pub value: f64,
    pub amplitude: f64,
    pub cycle: i64,
    pub day: f64,
}

/// Peaks at full-moon-equivalent (`P/2`), troughs at new-moon-equivalent
/// (0 and P). `value` is rounded to 3 decimal places for stability.
pub fn mood(phase: Phase, cycle: i64, lunar_day: f64) -> MoodSample {
    let amplitude = phase.mood_amplitude();
    let half_period = LUNAR_PERIOD_DAYS / 2.0;
    let raw_value = amplitude * ((PI * lunar_day / half_period) - PI / 2.0).sin();

    MoodSample {
        value: round_to(raw_value, 3),
        amplitude,
        cycle,
        day: lunar_day,
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Weighting profile consumed by out-of-scope prompt synthesis. `action`
/// and `reflection` are symmetric counterparts (they sum to 1), as are
/// `social`/`creative`; `rest` mirrors `reflection` (spec.md 4.1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodWeighting {
    pub action: f64,
    pub reflection: f64,
    pub social: f64,
    pub creative: f64,
    pub rest: f64,
}

impl MoodWeighting {
    pub fn from_sample(sample: MoodSample) -> Self {
        let normalized = if sample.amplitude > 0.0 {
            (sample.value / sample.amplitude).clamp(-1.0, 1.0)
        } else {
            0.0
        };
        let action = (normalized + 1.0) / 2.0;
        let reflection = 1.0 - action;

        Self {
            action,
            reflection,
            social: action,
            creative: reflection,
            rest: reflection,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoodBand {
    Euphoric,
    Upbeat,
    Neutral,
    Subdued,
    Despondent,
}

impl MoodBand {
    pub fn describe(self) -> &'static str {
        match self {
            MoodBand::Euphoric => "euphoric",
            MoodBand::Upbeat => "upbeat",
            MoodBand::Neutral => "neutral",
            MoodBand::Subdued => "subdued",
            MoodBand::Despondent => "despondent",
        }
    }
}

/// Five bands at thresholds +-0.7 and +-0.3 (spec.md 4.1).
pub fn mood_band(value: f64) -> MoodBand {
    if value > 0.7 {
        MoodBand::Euphoric
    } else if value > 0.3 {
        MoodBand::Upbeat
    } else if value >= -0.3 {
        MoodBand::Neutral
    } else if value >= -0.7 {
        MoodBand::Subdued
    } else {
        MoodBand::Despondent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peaks_at_half_period_and_troughs_at_the_edges() {
        let peak = mood(Phase::Sovereignty, 0, LUNAR_PERIOD_DAYS / 2.0);
        assert!((peak.value - 1.0).abs() < 0.01);

        let trough_start = mood(Phase::Sovereignty, 0, 0.0);
        assert!((trough_start.value + 1.0).abs() < 0.01);
    }

    #[test]
    fn amplitude_bounds_every_phase() {
        for phase in Phase::ORDERED {
            for day in [0.0, 7.0, 14.7, 22.0, 29.5] {
                let sample = mood(phase, 3, day);
                assert!(sample.value.abs() <= sample.amplitude + 1e-9);
            }
        }
    }

    #[test]
    fn terminal_restores_full_amplitude_versus_legacy() {
        let legacy = mood(Phase::Legacy, 5, LUNAR_PERIOD_DAYS / 2.0);
        let terminal = mood(Phase::Terminal, 5, LUNAR_PERIOD_DAYS / 2.0);
        assert!(terminal.value > legacy.value);
        assert!((terminal.value - 1.0).abs() < 0.01);
    }

    #[test]
    fn weighting_action_and_reflection_sum_to_one() {
        let sample = mood(Phase::Sovereignty, 0, 10.0);
        let weighting = MoodWeighting::from_sample(sample);
        assert!((weighting.action + weighting.reflection - 1.0).abs() < 1e-9);
    }

    #[test]
    fn band_thresholds_match_spec() {
        assert_eq!(mood_band(0.71), MoodBand::Euphoric);
        assert_eq!(mood_band(0.5), MoodBand::Upbeat);
        assert_eq!(mood_band(0.0), MoodBand::Neutral);
        assert_eq!(mood_band(-0.5), MoodBand::Subdued);
        assert_eq!(mood_band(-0.71), MoodBand::Despondent);
    }
}
