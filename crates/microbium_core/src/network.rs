//! The per-cell metabolic network and its timestep transition.
//!
//! Nodes and edges live in explicit tables: a node vector plus a name
//! index, and an edge vector in insertion order plus an endpoint index.
//! Lookups are O(1) and iteration order is stable, which keeps both the
//! step arithmetic and the mutation RNG stream deterministic.

use crate::error::{Result, SimError};
use crate::mutation::MutatorLogic;
use microbium_data::{CostBasis, EdgeParams, Node, WeightMutator};
use rand::Rng;
use std::collections::HashMap;

/// Name of the energy-currency node every network carries.
pub const ATP_NODE: &str = "atp";

/// Per-step behavior switches, taken from the owning cell's config.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepOptions {
    /// Charge a floor cost of `atp_cost * weight` when output is negligible.
    pub penalize_underflow: bool,
    /// Cap on how much of a source one edge may draw per step.
    pub throughput_cap: Option<f64>,
    /// Quantity the ATP debit multiplies.
    pub cost_basis: CostBasis,
}

/// One directed reaction between two metabolite pools.
#[derive(Debug, Clone)]
struct MetabolicEdge {
    src: usize,
    dst: usize,
    params: EdgeParams,
    mutator: WeightMutator,
}

/// A directed metabolic graph owned by a single cell.
#[derive(Debug, Clone)]
pub struct MetabolicNetwork {
    nodes: Vec<Node>,
    node_index: HashMap<String, usize>,
    edges: Vec<MetabolicEdge>,
    edge_index: HashMap<(usize, usize), usize>,
    atp: usize,
}

impl MetabolicNetwork {
    /// Creates a network holding only the mandatory `atp` node.
    #[must_use]
    pub fn new(initial_atp: f64) -> Self {
        let mut network = Self {
            nodes: Vec::new(),
            node_index: HashMap::new(),
            edges: Vec::new(),
            edge_index: HashMap::new(),
            atp: 0,
        };
        network.atp = network.insert_node(Node::new(ATP_NODE, initial_atp));
        network
    }

    fn insert_node(&mut self, node: Node) -> usize {
        let idx = self.nodes.len();
        self.node_index.insert(node.name.clone(), idx);
        self.nodes.push(node);
        idx
    }

    /// Adds a metabolite pool. Names are unique; amounts start non-negative.
    pub fn add_node(&mut self, name: &str, amount: f64, description: &str) -> Result<()> {
        if self.node_index.contains_key(name) {
            return Err(SimError::configuration(format!(
                "node '{name}' already exists"
            )));
        }
        if !amount.is_finite() || amount < 0.0 {
            return Err(SimError::configuration(format!(
                "initial amount {amount} for node '{name}' must be finite and non-negative"
            )));
        }
        self.insert_node(Node::new(name, amount).with_description(description));
        Ok(())
    }

    /// Adds a reaction edge and binds a weight mutator to its initial
    /// weight. Both endpoints must already exist and the pair must be new.
    pub fn add_edge(
        &mut self,
        source: &str,
        dest: &str,
        params: EdgeParams,
        noise_sd: f64,
    ) -> Result<()> {
        let src = self.require_endpoint(source, dest)?;
        let dst = self.require_endpoint(dest, source)?;
        if self.edge_index.contains_key(&(src, dst)) {
            return Err(SimError::configuration(format!(
                "edge '{source}' -> '{dest}' already exists"
            )));
        }
        if !params.weight.is_finite() || params.weight <= 0.0 || params.weight > 1.0 {
            return Err(SimError::configuration(format!(
                "weight {} of edge '{source}' -> '{dest}' must lie in (0, 1]",
                params.weight
            )));
        }
        if !params.scale.is_finite() || params.scale <= 0.0 {
            return Err(SimError::configuration(format!(
                "scale {} of edge '{source}' -> '{dest}' must be positive",
                params.scale
            )));
        }
        if !params.atp_cost.is_finite() || params.atp_cost < 0.0 {
            return Err(SimError::configuration(format!(
                "atp cost {} of edge '{source}' -> '{dest}' must be non-negative",
                params.atp_cost
            )));
        }
        if !noise_sd.is_finite() || noise_sd < 0.0 {
            return Err(SimError::configuration(format!(
                "noise sd {noise_sd} of edge '{source}' -> '{dest}' must be non-negative"
            )));
        }
        if noise_sd > 0.0 && params.weight >= 1.0 {
            return Err(SimError::configuration(format!(
                "evolving edge '{source}' -> '{dest}' needs an initial weight inside (0, 1)"
            )));
        }
        let idx = self.edges.len();
        self.edge_index.insert((src, dst), idx);
        self.edges.push(MetabolicEdge {
            src,
            dst,
            params,
            mutator: WeightMutator::new(params.weight, noise_sd),
        });
        Ok(())
    }

    fn require_endpoint(&self, name: &str, other: &str) -> Result<usize> {
        self.node_index.get(name).copied().ok_or_else(|| {
            SimError::configuration(format!(
                "edge endpoint '{name}' does not exist (other endpoint '{other}')"
            ))
        })
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.node_index.get(name).copied()
    }

    pub(crate) fn set_amount_at(&mut self, idx: usize, amount: f64) {
        self.nodes[idx].amount = amount;
    }

    /// Halves every node amount, the resource split applied on division.
    pub(crate) fn halve_amounts(&mut self) {
        for node in &mut self.nodes {
            node.amount *= 0.5;
        }
    }

    /// Current level of the energy-currency pool.
    #[must_use]
    pub fn atp(&self) -> f64 {
        self.nodes[self.atp].amount
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Current amount of the named node.
    pub fn node_amount(&self, name: &str) -> Result<f64> {
        self.node_index
            .get(name)
            .map(|&idx| self.nodes[idx].amount)
            .ok_or_else(|| SimError::not_found(format!("node '{name}'")))
    }

    /// Current weight of the edge between the named endpoints.
    pub fn edge_weight(&self, source: &str, dest: &str) -> Result<f64> {
        let missing = || SimError::not_found(format!("edge '{source}' -> '{dest}'"));
        let src = *self.node_index.get(source).ok_or_else(missing)?;
        let dst = *self.node_index.get(dest).ok_or_else(missing)?;
        self.edge_index
            .get(&(src, dst))
            .map(|&idx| self.edges[idx].params.weight)
            .ok_or_else(missing)
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// All edges as `(source, dest, params)`, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &EdgeParams)> {
        self.edges.iter().map(|edge| {
            (
                self.nodes[edge.src].name.as_str(),
                self.nodes[edge.dst].name.as_str(),
                &edge.params,
            )
        })
    }

    /// Advances the network by exactly one discrete step.
    ///
    /// Every edge claims a weight-proportional share of its source's
    /// pre-step amount, draws it down immediately (capped per edge when a
    /// throughput cap is set), and buffers its production; buffered
    /// increases are committed after the full pass, so no edge sees another
    /// edge's output within the same step. ATP debits are charged per edge
    /// as the pass runs.
    pub fn advance_one_step(&mut self, opts: &StepOptions) -> Result<()> {
        let before: Vec<f64> = self.nodes.iter().map(|node| node.amount).collect();
        let mut out_weight_sum = vec![0.0_f64; self.nodes.len()];
        for edge in &self.edges {
            out_weight_sum[edge.src] += edge.params.weight;
        }
        // Weight domains guarantee positive sums unless a weight decayed to
        // zero; refuse to divide rather than emit NaN.
        for edge in &self.edges {
            if out_weight_sum[edge.src] <= 0.0 {
                return Err(SimError::configuration(format!(
                    "node '{}' has outgoing edges with zero total weight",
                    self.nodes[edge.src].name
                )));
            }
        }

        let cap = opts.throughput_cap.unwrap_or(f64::INFINITY);
        let mut increase = vec![0.0_f64; self.nodes.len()];
        for edge in &self.edges {
            let weight = edge.params.weight;
            let share = before[edge.src] * weight / out_weight_sum[edge.src];
            let used = weight * share.min(cap);
            let produced = used * edge.params.scale;
            self.nodes[edge.src].amount -= used;
            increase[edge.dst] += produced;

            let basis = match opts.cost_basis {
                CostBasis::Product => produced,
                CostBasis::Processed => used,
            };
            let charged = if opts.penalize_underflow {
                basis.max(weight)
            } else {
                basis
            };
            self.nodes[self.atp].amount -= edge.params.atp_cost * charged;
        }
        for (idx, gain) in increase.into_iter().enumerate() {
            if gain > 0.0 {
                self.nodes[idx].amount += gain;
            }
        }
        Ok(())
    }

    /// Replaces every edge weight through its bound mutator, visiting edges
    /// in insertion order so a seeded stream is consumed identically on
    /// every run.
    pub(crate) fn mutate_weights<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        for edge in &mut self.edges {
            let weight = edge.params.weight;
            if !(weight > 0.0) {
                return Err(SimError::configuration(format!(
                    "cannot mutate edge '{}' -> '{}' whose weight decayed to {weight}",
                    self.nodes[edge.src].name, self.nodes[edge.dst].name
                )));
            }
            edge.params.weight = edge.mutator.mutate(weight, rng);
        }
        Ok(())
    }
}
