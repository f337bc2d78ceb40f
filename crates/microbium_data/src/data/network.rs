use serde::{Deserialize, Serialize};

/// A metabolite pool inside one cell's network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Name, unique within the owning network.
    pub name: String,
    /// Current quantity. Normally non-negative; the atp node may be driven
    /// negative by cost debits within a step.
    pub amount: f64,
    /// Free-form annotation, empty by default.
    pub description: String,
}

impl Node {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Reaction parameters carried by one edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeParams {
    /// Fraction-like conversion weight in (0, 1].
    pub weight: f64,
    /// Output multiplier applied to the material drawn through the edge.
    pub scale: f64,
    /// ATP debited per unit of output (or of input, per the cost basis).
    pub atp_cost: f64,
}

impl EdgeParams {
    /// Parameters with the given weight, unit scale and no ATP cost.
    pub fn new(weight: f64) -> Self {
        Self {
            weight,
            scale: 1.0,
            atp_cost: 0.0,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_atp_cost(mut self, atp_cost: f64) -> Self {
        self.atp_cost = atp_cost;
        self
    }
}

/// Bounded random-walk parameters for one edge weight.
///
/// The walk runs in a logit-like transformed coordinate anchored at
/// `reference_weight`, so mutated weights always map back into (0, 1].
/// A `noise_sd` of zero marks the edge as held fixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightMutator {
    /// Weight at time zero of the walk; must lie inside (0, 1) whenever the
    /// edge actually evolves.
    pub reference_weight: f64,
    /// Standard deviation of the Gaussian step taken in transformed time.
    pub noise_sd: f64,
}

impl WeightMutator {
    pub fn new(reference_weight: f64, noise_sd: f64) -> Self {
        Self {
            reference_weight,
            noise_sd,
        }
    }

    /// True when mutation is the identity for this edge.
    pub fn is_fixed(&self) -> bool {
        self.noise_sd == 0.0
    }
}
