//! Edge-weight mutation.
//!
//! Weights live in (0, 1]. Mutation is a Gaussian random walk performed in
//! a transformed time coordinate: the curve `1 / (A * exp(-t) + 1)` with
//! `A = 1/reference_weight - 1` maps every time to a valid weight, so the
//! walk needs no domain clamping beyond a guard against floating-point
//! overshoot at the upper asymptote.

use microbium_data::WeightMutator;
use rand::Rng;
use rand_distr::StandardNormal;

/// Mutation behavior of a [`WeightMutator`].
pub trait MutatorLogic {
    /// Weight reached at transformed time `t` on this mutator's curve.
    fn curve(&self, t: f64) -> f64;

    /// Transformed time at which the curve reproduces `weight`.
    fn elapsed(&self, weight: f64) -> f64;

    /// Draws one Gaussian step in transformed time and returns the mutated
    /// weight.
    ///
    /// With `noise_sd == 0` the current weight is returned unchanged and no
    /// randomness is consumed.
    fn mutate<R: Rng>(&self, current_weight: f64, rng: &mut R) -> f64;
}

impl MutatorLogic for WeightMutator {
    fn curve(&self, t: f64) -> f64 {
        let a = 1.0 / self.reference_weight - 1.0;
        1.0 / (a * (-t).exp() + 1.0)
    }

    fn elapsed(&self, weight: f64) -> f64 {
        let a = 1.0 / self.reference_weight - 1.0;
        (a / (1.0 / weight - 1.0)).abs().ln()
    }

    fn mutate<R: Rng>(&self, current_weight: f64, rng: &mut R) -> f64 {
        if self.is_fixed() {
            return current_weight;
        }
        let step: f64 = self.noise_sd * rng.sample::<f64, _>(StandardNormal);
        let mutated = self.curve(self.elapsed(current_weight) + step);
        if mutated > 1.0 {
            1.0
        } else {
            mutated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_zero_noise_is_identity() {
        let mutator = WeightMutator::new(0.8, 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for weight in [1e-12, 0.3, 0.8, 1.0] {
            for _ in 0..50 {
                assert_eq!(mutator.mutate(weight, &mut rng), weight);
            }
        }
    }

    #[test]
    fn test_curve_inverts_elapsed() {
        let mutator = WeightMutator::new(0.8, 0.02);
        for weight in [0.05, 0.5, 0.8, 0.97] {
            let roundtrip = mutator.curve(mutator.elapsed(weight));
            assert!((roundtrip - weight).abs() < 1e-12);
        }
    }

    #[test]
    fn test_elapsed_zero_at_reference() {
        let mutator = WeightMutator::new(0.7, 0.02);
        assert!(mutator.elapsed(0.7).abs() < 1e-12);
        assert!((mutator.curve(0.0) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_repeated_mutation_stays_in_domain() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mutator = WeightMutator::new(0.8, 0.3);
        let mut weight = 0.8;
        for _ in 0..2000 {
            weight = mutator.mutate(weight, &mut rng);
            assert!(weight > 0.0 && weight <= 1.0, "escaped domain: {weight}");
        }
    }

    #[test]
    fn test_saturated_weight_is_absorbing() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mutator = WeightMutator::new(0.9, 0.5);
        for _ in 0..100 {
            assert_eq!(mutator.mutate(1.0, &mut rng), 1.0);
        }
    }

    #[test]
    fn test_same_seed_same_walk() {
        let mutator = WeightMutator::new(0.6, 0.1);
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        let mut wa = 0.6;
        let mut wb = 0.6;
        for _ in 0..200 {
            wa = mutator.mutate(wa, &mut a);
            wb = mutator.mutate(wb, &mut b);
            assert_eq!(wa, wb);
        }
    }
}
