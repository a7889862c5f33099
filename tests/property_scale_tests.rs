use congrats_dash::core::{LinearScale, PixelSpan};
use proptest::prelude::*;

proptest! {
    #[test]
    fn linear_scale_round_trip_property(
        domain_start in -1_000_000.0f64..1_000_000.0,
        domain_span in 0.001f64..1_000_000.0,
        value_factor in 0.0f64..1.0
    ) {
        let domain_end = domain_start + domain_span;
        let value = domain_start + value_factor * domain_span;

        // Vertical spans run bottom to top.
        let span = PixelSpan::new(1024.0, 0.0);
        let scale = LinearScale::new(domain_start, domain_end).expect("valid scale");

        let px = scale.domain_to_pixel(value, span).expect("to pixel");
        let recovered = scale.pixel_to_domain(px, span).expect("from pixel");

        prop_assert!((recovered - value).abs() <= 1e-7 * domain_span.max(1.0));
        prop_assert!((-1e-6..=1024.0 + 1e-6).contains(&px));
    }

    #[test]
    fn nice_ticks_stay_inside_the_domain(
        domain_start in -10_000.0f64..10_000.0,
        domain_span in 0.01f64..10_000.0,
        target in 2usize..10
    ) {
        let scale = LinearScale::new(domain_start, domain_start + domain_span).expect("valid scale");
        let ticks = scale.nice_ticks(target);

        prop_assert!(!ticks.is_empty());
        prop_assert!(ticks.len() <= target * 2 + 1);
        for pair in ticks.windows(2) {
            prop_assert!(pair[1] > pair[0]);
        }
        let tolerance = domain_span * 1e-9;
        for tick in ticks {
            prop_assert!(tick >= domain_start - tolerance);
            prop_assert!(tick <= domain_start + domain_span + tolerance);
        }
    }

    #[test]
    fn fitted_scale_contains_every_value(values in prop::collection::vec(-1e6f64..1e6, 1..64)) {
        let scale = LinearScale::fit(values.iter().copied(), 0.05).expect("fit");
        prop_assert!(values.iter().all(|value| scale.contains(*value)));
    }
}
