// [libs/core/degradation/src/downgrade.rs]
/*!
 * APARATO: ESCALERA DE DEGRADACION DE MODELO (ESTRATO L1)
 * RESPONSABILIDAD: Mapea un modelo de inferencia solicitado a un
 * modelo mas barato segun el coeficiente de degradacion (spec.md 4.2).
 * Modelos desconocidos pasan sin modificar: esta tabla es deliberadamente
 * pequena y no pretende reconocer cada proveedor.
 */

/// Ordered cheapest-last; downgrading walks the list forward, capped at
/// the last (cheapest) entry.
const LADDER: &[&str] = &["flagship", "standard", "economy", "minimal"];

/// `coefficient < 0.3`: unchanged. `[0.3, 0.7]`: one step down. `> 0.7`:
/// two steps down, capped at the cheapest rung (spec.md 4.2).
pub fn downgrade_model(requested: &str, coefficient: f64) -> String {
    let Some(position) = LADDER.iter().position(|&m| m == requested) else {
        return requested.to_string();
    };

    let steps = if coefficient > 0.7 {
        2
    } else if coefficient >= 0.3 {
        1
    } else {
        0
    };

    let capped = (position + steps).min(LADDER.len() - 1);
    LADDER[capped].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_model_passes_through_unchanged() {
        assert_eq!(downgrade_model("some-vendor-custom-v3", 0.9), "some-vendor-custom-v3");
    }

    #[test]
    fn below_threshold_is_unchanged() {
        assert_eq!(downgrade_model("flagship", 0.29), "flagship");
    }

    #[test]
    fn mid_band_downgrades_one_step() {
        assert_eq!(downgrade_model("flagship", 0.3), "standard");
        assert_eq!(downgrade_model("flagship", 0.7), "standard");
    }

    #[test]
    fn high_band_downgrades_two_steps() {
        assert_eq!(downgrade_model("flagship", 0.71), "economy");
    }

    #[test]
    fn downgrade_caps_at_the_cheapest_rung() {
        assert_eq!(downgrade_model("economy", 0.71), "minimal");
        assert_eq!(downgrade_model("minimal", 0.71), "minimal");
    }
}
