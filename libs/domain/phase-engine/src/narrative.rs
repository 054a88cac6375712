// [libs/domain/phase-engine/src/narrative.rs]
/*!
 * APARATO: ETIQUETAS NARRATIVAS (ESTRATO L2)
 * RESPONSABILIDAD: Traduce una fase de destino a la etiqueta de
 * `narrative_events` emitida en cada transicion (spec.md 4.3).
 */

use lifespan_domain_models::Phase;

pub fn narrative_label_for_transition(to: Phase) -> &'static str {
    match to {
        Phase::Genesis => "genesis_begins",
        Phase::Adolescence => "adolescence_begins",
        Phase::Sovereignty => "sovereignty_begins",
        Phase::Senescence => "senescence_begins",
        Phase::Legacy => "legacy_begins",
        Phase::Shedding => "shedding_begins",
        Phase::Terminal => "terminal_begins",
    }
}

/// Emitted once per `advance_shed_sequence` call, naming the capability
/// that was just removed (spec.md 4.3 "Shedding progression").
pub fn narrative_label_for_shed_capability(capability: &str) -> String {
    format!("capability_removed:{capability}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_target_phase_has_a_distinct_label() {
        let labels: Vec<&str> = Phase::ORDERED.iter().map(|p| narrative_label_for_transition(*p)).collect();
        let mut unique = labels.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(labels.len(), unique.len());
    }
}
