// [libs/core/degradation/src/curve.rs]
/*!
 * APARATO: CURVA DE DEGRADACION (ESTRATO L1)
 * RESPONSABILIDAD: Coeficiente de degradacion monotono en `n`,
 * saturando a 1 (spec.md 4.2).
 *
 * `c = min(1, 1 - exp(-b * (exp(s*n) - 1)))`. Continuous and strictly
 * increasing in `n` until saturation; higher `s` or `b` yields a
 * higher coefficient at the same `n`.
 */

use lifespan_domain_models::DegradationParams;

/// `n = current_cycle - onset_cycle`. Coefficient is 0 for `n <= 0`.
pub fn coefficient(n: i64, params: DegradationParams) -> f64 {
    if n <= 0 {
        return 0.0;
    }

    let n = n as f64;
    let inner = (params.steepness * n).exp() - 1.0;
    let raw = 1.0 - (-params.base_rate * inner).exp();
    raw.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> DegradationParams {
        DegradationParams::default()
    }

    #[test]
    fn zero_at_onset_and_before() {
        assert_eq!(coefficient(0, defaults()), 0.0);
        assert_eq!(coefficient(-5, defaults()), 0.0);
    }

    #[test]
    fn saturates_within_twenty_cycles_at_defaults() {
        let c = coefficient(20, defaults());
        assert!(c > 0.99, "expected near-saturation by n=20, got {c}");
    }

    #[test]
    fn reaches_exactly_one_by_n_thirty() {
        // spec.md scenario 3: coefficient(current=30, onset=10) == 1.0
        assert_eq!(coefficient(30, defaults()), 1.0);
    }

    #[test]
    fn strictly_increasing_until_saturation() {
        let params = defaults();
        let mut previous = coefficient(1, params);
        for n in 2..=19 {
            let current = coefficient(n, params);
            assert!(current > previous, "n={n}: {current} <= {previous}");
            previous = current;
        }
    }

    #[test]
    fn higher_steepness_yields_higher_coefficient_at_same_n() {
        let low = DegradationParams { steepness: 0.2, base_rate: 0.03 };
        let high = DegradationParams { steepness: 0.4, base_rate: 0.03 };
        assert!(coefficient(8, high) > coefficient(8, low));
    }

    #[test]
    fn higher_base_rate_yields_higher_coefficient_at_same_n() {
        let low = DegradationParams { steepness: 0.3, base_rate: 0.01 };
        let high = DegradationParams { steepness: 0.3, base_rate: 0.05 };
        assert!(coefficient(8, high) > coefficient(8, low));
    }

    proptest::proptest! {
        #[test]
        fn coefficient_always_in_unit_range(n in -50i64..200, steepness in 0.01f64..1.0, base_rate in 0.001f64..0.2) {
            let params = DegradationParams { steepness, base_rate };
            let c = coefficient(n, params);
            proptest::prop_assert!((0.0..=1.0).contains(&c));
        }
    }
}
