//! Food supplies: where each generation's nutrient offer comes from.

use microbium_data::FoodMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, PI};

/// Produces the food offer for each generation in turn.
pub trait FoodSupply: Send {
    /// Returns the next generation's offer and advances the supply.
    fn available(&mut self) -> FoodMap;
}

/// A supply that offers the same mapping every generation.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticSupply {
    offer: FoodMap,
}

impl StaticSupply {
    #[must_use]
    pub fn new(offer: FoodMap) -> Self {
        Self { offer }
    }

    #[must_use]
    pub fn offer(&self) -> &FoodMap {
        &self.offer
    }
}

impl Default for StaticSupply {
    /// A glucose-only diet sized for a small population.
    fn default() -> Self {
        let mut offer = FoodMap::new();
        offer.insert("glucose".to_string(), 1000.0);
        offer.insert("sucrose".to_string(), 0.0);
        offer.insert("lactose".to_string(), 0.0);
        Self { offer }
    }
}

impl FoodSupply for StaticSupply {
    fn available(&mut self) -> FoodMap {
        self.offer.clone()
    }
}

/// One sinusoidal component of a periodic supply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wave {
    pub amplitude: f64,
    pub frequency: f64,
    pub phase: f64,
    pub baseline: f64,
}

impl Wave {
    /// Offer level at the given generation index.
    #[must_use]
    pub fn level(&self, generation: u64) -> f64 {
        self.amplitude * (self.frequency * generation as f64 + self.phase).sin() + self.baseline
    }
}

/// A supply whose offers oscillate over generations, one wave per food.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicSupply {
    waves: BTreeMap<String, Wave>,
    generation: u64,
}

impl PeriodicSupply {
    #[must_use]
    pub fn new(waves: BTreeMap<String, Wave>) -> Self {
        Self {
            waves,
            generation: 0,
        }
    }

    /// Alternating feast-and-famine cycle over the three reference sugars.
    ///
    /// Glucose starts at its peak and sucrose at its trough, with lactose
    /// slightly detuned so the three peaks drift apart over time.
    #[must_use]
    pub fn three_sugar_cycle() -> Self {
        let rate = PI / 36.0;
        let mut waves = BTreeMap::new();
        waves.insert(
            "glucose".to_string(),
            Wave {
                amplitude: 500.0,
                frequency: rate,
                phase: FRAC_PI_2,
                baseline: 500.0,
            },
        );
        waves.insert(
            "lactose".to_string(),
            Wave {
                amplitude: 500.0,
                frequency: 0.9 * rate,
                phase: FRAC_PI_2,
                baseline: 500.0,
            },
        );
        waves.insert(
            "sucrose".to_string(),
            Wave {
                amplitude: 500.0,
                frequency: rate,
                phase: 1.5 * PI,
                baseline: 500.0,
            },
        );
        Self::new(waves)
    }
}

impl FoodSupply for PeriodicSupply {
    fn available(&mut self) -> FoodMap {
        let offer = self
            .waves
            .iter()
            .map(|(name, wave)| (name.clone(), wave.level(self.generation)))
            .collect();
        self.generation += 1;
        offer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_supply_repeats_its_offer() {
        let mut supply = StaticSupply::default();
        let first = supply.available();
        assert_eq!(first["glucose"], 1000.0);
        assert_eq!(supply.available(), first);
    }

    #[test]
    fn test_wave_level_formula() {
        let wave = Wave {
            amplitude: 2.0,
            frequency: FRAC_PI_2,
            phase: 0.0,
            baseline: 10.0,
        };
        assert!((wave.level(0) - 10.0).abs() < 1e-12);
        assert!((wave.level(1) - 12.0).abs() < 1e-12);
        assert!((wave.level(2) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_periodic_supply_advances_each_call() {
        let mut waves = BTreeMap::new();
        waves.insert(
            "glucose".to_string(),
            Wave {
                amplitude: 1.0,
                frequency: FRAC_PI_2,
                phase: 0.0,
                baseline: 5.0,
            },
        );
        let mut supply = PeriodicSupply::new(waves);
        assert!((supply.available()["glucose"] - 5.0).abs() < 1e-12);
        assert!((supply.available()["glucose"] - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_three_sugar_cycle_never_goes_negative() {
        let mut supply = PeriodicSupply::three_sugar_cycle();
        for _ in 0..200 {
            for (name, quantity) in supply.available() {
                assert!(quantity >= 0.0, "{name} went negative: {quantity}");
            }
        }
    }

    #[test]
    fn test_three_sugar_cycle_opens_with_glucose() {
        let mut supply = PeriodicSupply::three_sugar_cycle();
        let first = supply.available();
        assert!((first["glucose"] - 1000.0).abs() < 1e-9);
        assert!(first["sucrose"].abs() < 1e-9);
    }
}
