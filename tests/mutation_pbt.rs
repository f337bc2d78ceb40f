use microbium_lib::{MutatorLogic, WeightMutator};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Strategies for generating mutators and weights
prop_compose! {
    fn arb_mutator()(
        reference_weight in 0.01f64..0.99,
        noise_sd in 0.0f64..0.5
    ) -> WeightMutator {
        WeightMutator::new(reference_weight, noise_sd)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_mutated_weight_stays_in_unit_interval(
        mutator in arb_mutator(),
        weight in 1e-9f64..1.0,
        seed in any::<u64>()
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut current = weight;
        for _ in 0..50 {
            current = mutator.mutate(current, &mut rng);
            prop_assert!(
                current > 0.0 && current <= 1.0,
                "weight escaped (0, 1]: {}",
                current
            );
        }
    }

    #[test]
    fn test_zero_noise_leaves_weight_untouched(
        reference_weight in 0.01f64..0.99,
        weight in 1e-9f64..1.0,
        seed in any::<u64>()
    ) {
        let mutator = WeightMutator::new(reference_weight, 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        prop_assert_eq!(mutator.mutate(weight, &mut rng), weight);
    }

    #[test]
    fn test_curve_inverts_elapsed(
        mutator in arb_mutator(),
        weight in 0.001f64..0.999
    ) {
        let roundtrip = mutator.curve(mutator.elapsed(weight));
        prop_assert!(
            (roundtrip - weight).abs() < 1e-9,
            "curve(elapsed({})) came back as {}",
            weight,
            roundtrip
        );
    }

    #[test]
    fn test_same_seed_walks_identically(
        mutator in arb_mutator(),
        weight in 0.01f64..0.99,
        seed in any::<u64>()
    ) {
        let mut rng_a = ChaCha8Rng::seed_from_u64(seed);
        let mut rng_b = ChaCha8Rng::seed_from_u64(seed);
        let mut walk_a = weight;
        let mut walk_b = weight;
        for _ in 0..10 {
            walk_a = mutator.mutate(walk_a, &mut rng_a);
            walk_b = mutator.mutate(walk_b, &mut rng_b);
        }
        prop_assert_eq!(walk_a, walk_b);
    }

    #[test]
    fn test_saturated_weight_is_absorbing(
        mutator in arb_mutator(),
        seed in any::<u64>()
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        prop_assert_eq!(mutator.mutate(1.0, &mut rng), 1.0);
    }
}
