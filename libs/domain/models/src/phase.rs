// [libs/domain/models/src/phase.rs]
/*!
 * APARATO: LIFESPAN PHASE LADDER (ESTRATO L2)
 * RESPONSABILIDAD: Orden total de las siete fases del ciclo vital.
 *
 * The declaration order below IS the monotone ordering used by the
 * phase state machine: `Phase::Genesis < Phase::Terminal`. Never
 * reorder these variants without re-checking every transition guard.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    Genesis,
    Adolescence,
    Sovereignty,
    Senescence,
    Legacy,
    Shedding,
    Terminal,
}

impl Phase {
    /// Mood amplitude for this phase, per spec.md 4.1.
    pub fn mood_amplitude(self) -> f64 {
        match self {
            Phase::Genesis | Phase::Adolescence | Phase::Sovereignty => 1.00,
            Phase::Senescence => 0.70,
            Phase::Legacy => 0.40,
            Phase::Shedding => 0.20,
            Phase::Terminal => 1.00,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub const ORDERED: [Phase; 7] = [
        Phase::Genesis,
        Phase::Adolescence,
        Phase::Sovereignty,
        Phase::Senescence,
        Phase::Legacy,
        Phase::Shedding,
        Phase::Terminal,
    ];
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Genesis => "genesis",
            Phase::Adolescence => "adolescence",
            Phase::Sovereignty => "sovereignty",
            Phase::Senescence => "senescence",
            Phase::Legacy => "legacy",
            Phase::Shedding => "shedding",
            Phase::Terminal => "terminal",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for Phase {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "genesis" => Ok(Phase::Genesis),
            "adolescence" => Ok(Phase::Adolescence),
            "sovereignty" => Ok(Phase::Sovereignty),
            "senescence" => Ok(Phase::Senescence),
            "legacy" => Ok(Phase::Legacy),
            "shedding" => Ok(Phase::Shedding),
            "terminal" => Ok(Phase::Terminal),
            other => Err(format!("unknown phase literal: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_order_is_monotone_genesis_to_terminal() {
        assert!(Phase::Genesis < Phase::Adolescence);
        assert!(Phase::Adolescence < Phase::Sovereignty);
        assert!(Phase::Sovereignty < Phase::Senescence);
        assert!(Phase::Senescence < Phase::Legacy);
        assert!(Phase::Legacy < Phase::Shedding);
        assert!(Phase::Shedding < Phase::Terminal);
    }

    #[test]
    fn terminal_mood_amplitude_is_restored_to_full() {
        assert_eq!(Phase::Terminal.mood_amplitude(), 1.00);
        assert_eq!(Phase::Legacy.mood_amplitude(), 0.40);
    }

    #[test]
    fn round_trips_through_display_and_from_str() {
        for phase in Phase::ORDERED {
            let parsed: Phase = phase.to_string().parse().unwrap();
            assert_eq!(parsed, phase);
        }
    }
}
