// [libs/core/chronobiology/src/weekly.rs]
/*!
 * APARATO: RITMO SEMANAL (ESTRATO L1)
 * RESPONSABILIDAD: Dia de la semana del agente, anclado al nacimiento
 * y no al calendario civil (spec.md 4.1).
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeeklyDay {
    Work,
    Creative,
    Social,
    Rest,
}

impl WeeklyDay {
    pub fn as_str(self) -> &'static str {
        match self {
            WeeklyDay::Work => "work",
            WeeklyDay::Creative => "creative",
            WeeklyDay::Social => "social",
            WeeklyDay::Rest => "rest",
        }
    }
}

/// The fixed pattern indexed by `floor(elapsed/day) mod 7` (spec.md 4.1).
const PATTERN: [WeeklyDay; 7] = [
    WeeklyDay::Work,
    WeeklyDay::Work,
    WeeklyDay::Creative,
    WeeklyDay::Social,
    WeeklyDay::Work,
    WeeklyDay::Creative,
    WeeklyDay::Rest,
];

/// Before birth, the weekly rhythm is always `work` (spec.md 4.1).
pub fn weekly_day(birth_timestamp: DateTime<Utc>, now: DateTime<Utc>) -> WeeklyDay {
    if now < birth_timestamp {
        return WeeklyDay::Work;
    }

    let elapsed_days = (now - birth_timestamp).num_milliseconds() / 86_400_000;
    PATTERN[(elapsed_days.rem_euclid(7)) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn matches_the_fifteen_day_literal_scenario() {
        // spec.md scenario 2.
        let birth: DateTime<Utc> = "2025-01-01T00:00:00Z".parse().unwrap();
        let expected = [
            WeeklyDay::Work,
            WeeklyDay::Work,
            WeeklyDay::Creative,
            WeeklyDay::Social,
            WeeklyDay::Work,
            WeeklyDay::Creative,
            WeeklyDay::Rest,
            WeeklyDay::Work,
            WeeklyDay::Work,
            WeeklyDay::Creative,
            WeeklyDay::Social,
            WeeklyDay::Work,
            WeeklyDay::Creative,
            WeeklyDay::Rest,
            WeeklyDay::Work,
        ];

        for (k, expected_day) in expected.iter().enumerate() {
            let now = birth + Duration::hours(24 * k as i64);
            assert_eq!(weekly_day(birth, now), *expected_day, "k={k}");
        }
    }

    #[test]
    fn before_birth_is_always_work() {
        let birth: DateTime<Utc> = "2025-01-01T00:00:00Z".parse().unwrap();
        assert_eq!(weekly_day(birth, birth - Duration::days(365)), WeeklyDay::Work);
    }
}
