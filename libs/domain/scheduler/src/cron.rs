// [libs/domain/scheduler/src/cron.rs]
/*!
 * APARATO: ANALIZADOR DE EXPRESIONES CRON (ESTRATO L2)
 * RESPONSABILIDAD: Gramatica estandar de cinco campos (minuto, hora,
 * dia-del-mes, mes, dia-de-semana). Cuando `cron_expression` esta
 * presente tiene prioridad sobre `interval_ms` (spec.md 4.4).
 */

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};

use crate::errors::SchedulerError;

const SEARCH_HORIZON_MINUTES: i64 = 366 * 24 * 60;

#[derive(Debug, Clone, PartialEq)]
struct Field {
    allowed: Vec<u32>,
}

impl Field {
    fn matches(&self, value: u32) -> bool {
        self.allowed.contains(&value)
    }

    fn parse(raw: &str, min: u32, max: u32) -> Result<Self, SchedulerError> {
        if raw == "*" {
            return Ok(Self { allowed: (min..=max).collect() });
        }

        let mut allowed = Vec::new();
        for part in raw.split(',') {
            allowed.extend(Self::parse_part(part, min, max)?);
        }
        allowed.sort_unstable();
        allowed.dedup();

        if allowed.is_empty() {
            return Err(SchedulerError::CronError(format!("empty field: '{raw}'")));
        }

        Ok(Self { allowed })
    }

    fn parse_part(part: &str, min: u32, max: u32) -> Result<Vec<u32>, SchedulerError> {
        let (range_part, step) = match part.split_once('/') {
            Some((range, step)) => (
                range,
                step.parse::<u32>()
                    .map_err(|_| SchedulerError::CronError(format!("bad step in '{part}'")))?,
            ),
            None => (part, 1),
        };

        let (start, end) = if range_part == "*" {
            (min, max)
        } else if let Some((lo, hi)) = range_part.split_once('-') {
            let lo: u32 = lo.parse().map_err(|_| SchedulerError::CronError(format!("bad range in '{part}'")))?;
            let hi: u32 = hi.parse().map_err(|_| SchedulerError::CronError(format!("bad range in '{part}'")))?;
            (lo, hi)
        } else {
            let value: u32 = range_part.parse().map_err(|_| SchedulerError::CronError(format!("bad value '{part}'")))?;
            (value, value)
        };

        if start < min || end > max || start > end {
            return Err(SchedulerError::CronError(format!("field '{part}' out of bounds [{min},{max}]")));
        }

        Ok((start..=end).step_by(step.max(1) as usize).collect())
    }
}

/// A parsed five-field cron schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct CronSchedule {
    minute: Field,
    hour: Field,
    day_of_month: Field,
    month: Field,
    day_of_week: Field,
}

impl CronSchedule {
    pub fn parse(expression: &str) -> Result<Self, SchedulerError> {
        let fields: Vec<&str> = expression.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(SchedulerError::CronError(format!(
                "expected 5 fields (minute hour day-of-month month day-of-week), got {}",
                fields.len()
            )));
        }

        Ok(Self {
            minute: Field::parse(fields[0], 0, 59)?,
            hour: Field::parse(fields[1], 0, 23)?,
            day_of_month: Field::parse(fields[2], 1, 31)?,
            month: Field::parse(fields[3], 1, 12)?,
            day_of_week: Field::parse(fields[4], 0, 6)?,
        })
    }

    fn matches(&self, candidate: DateTime<Utc>) -> bool {
        self.minute.matches(candidate.minute())
            && self.hour.matches(candidate.hour())
            && self.day_of_month.matches(candidate.day())
            && self.month.matches(candidate.month())
            && self.day_of_week.matches(candidate.weekday().num_days_from_sunday())
    }

    /// The earliest minute-aligned instant strictly after `after` that
    /// satisfies every field, searched up to one year ahead.
    pub fn next_fire_after(&self, after: DateTime<Utc>) -> Result<DateTime<Utc>, SchedulerError> {
        let mut candidate = (after + Duration::minutes(1))
            .with_second(0)
            .and_then(|d| d.with_nanosecond(0))
            .unwrap_or(after);

        for _ in 0..SEARCH_HORIZON_MINUTES {
            if self.matches(candidate) {
                return Ok(candidate);
            }
            candidate += Duration::minutes(1);
        }

        Err(SchedulerError::CronError(format!(
            "no matching fire time found within {SEARCH_HORIZON_MINUTES} minutes"
        )))
    }
}
