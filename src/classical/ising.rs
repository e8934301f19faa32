use crate::block::Node;
use crate::errors::{BindingError, StructuralError};
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

/// An edge between two nodes.
pub type Edge = (Node, Node);

/// Couplings of a single node: `(neighbor index, weight)`.
pub(crate) type Bindings = SmallVec<[(usize, f64); 4]>;

/// The parameters which describe an ising model.
///
/// This is the plain, serializable description of an [`IsingEBM`]; converting it into a model
/// runs all structural checks.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct IsingParams {
    /// All nodes, the position of each defines its index.
    pub nodes: Vec<Node>,
    /// Coupled pairs of nodes.
    pub edges: Vec<Edge>,
    /// One bias per node.
    pub biases: Vec<f64>,
    /// One weight per edge.
    pub weights: Vec<f64>,
    /// Inverse temperature.
    pub beta: f64,
}

/// A pairwise energy model over spins.
///
/// For spins `s_i` in `{-1, +1}` the energy is
/// `E(s) = -(sum_i b_i s_i + sum_(i,j) w_ij s_i s_j)` and states are distributed according to
/// `P(s) ~ exp(-beta E(s))`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serialize",
    serde(try_from = "IsingParams", into = "IsingParams")
)]
pub struct IsingEBM {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    biases: Vec<f64>,
    weights: Vec<f64>,
    beta: f64,
    node_index: HashMap<Node, usize>,
    binding_mat: Vec<Bindings>,
}

impl IsingEBM {
    /// Make a new model from nodes, edges `[(a, b), ...]`, per-node biases, per-edge weights
    /// and an inverse temperature.
    pub fn new(
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        biases: Vec<f64>,
        weights: Vec<f64>,
        beta: f64,
    ) -> Result<Self, StructuralError> {
        if biases.len() != nodes.len() {
            return Err(StructuralError::BiasLength {
                n_nodes: nodes.len(),
                n_biases: biases.len(),
            });
        }
        if weights.len() != edges.len() {
            return Err(StructuralError::WeightLength {
                n_edges: edges.len(),
                n_weights: weights.len(),
            });
        }
        if !beta.is_finite() || beta < 0.0 {
            return Err(StructuralError::InvalidBeta(beta));
        }
        check_finite("bias", &biases)?;
        check_finite("weight", &weights)?;

        let mut node_index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if node_index.insert(*node, i).is_some() {
                return Err(StructuralError::DuplicateNode(*node));
            }
        }

        // Adjacency list of all bonds.
        let mut binding_mat: Vec<Bindings> = vec![Bindings::new(); nodes.len()];
        for (e, ((na, nb), j)) in edges.iter().zip(weights.iter()).enumerate() {
            if na == nb {
                return Err(StructuralError::SelfLoop { edge: e, node: *na });
            }
            let lookup = |node: &Node| {
                node_index
                    .get(node)
                    .copied()
                    .ok_or(StructuralError::UnknownNode { edge: e, node: *node })
            };
            let (va, vb) = (lookup(na)?, lookup(nb)?);
            binding_mat[va].push((vb, *j));
            binding_mat[vb].push((va, *j));
        }
        // Sort just in case
        binding_mat.iter_mut().for_each(|vs| {
            vs.sort_by_key(|(i, _)| *i);
        });

        Ok(IsingEBM {
            nodes,
            edges,
            biases,
            weights,
            beta,
            node_index,
            binding_mat,
        })
    }

    /// Make a model over nodes `0..n` from edges `[((a, b), w), ...]`, as a convenience when
    /// nodes are just integers.
    pub fn from_weighted_edges(
        n: usize,
        edges: &[((usize, usize), f64)],
        biases: Vec<f64>,
        beta: f64,
    ) -> Result<Self, StructuralError> {
        let (edges, weights) = edges
            .iter()
            .map(|((a, b), w)| ((Node(*a), Node(*b)), *w))
            .unzip();
        Self::new(Node::range(n), edges, biases, weights, beta)
    }

    /// The parameters of this model.
    pub fn params(&self) -> IsingParams {
        IsingParams {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            biases: self.biases.clone(),
            weights: self.weights.clone(),
            beta: self.beta,
        }
    }

    /// All nodes, in index order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Per-node biases.
    pub fn biases(&self) -> &[f64] {
        &self.biases
    }

    /// Per-edge weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Inverse temperature.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Number of nodes.
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Index of a node, if the node is part of the model.
    pub fn node_index(&self, node: &Node) -> Option<usize> {
        self.node_index.get(node).copied()
    }

    pub(crate) fn index_of(&self, node: &Node) -> Result<usize, BindingError> {
        self.node_index(node).ok_or(BindingError::UnknownNode(*node))
    }

    /// Neighbors of the node at `index` along with the coupling weights, sorted by neighbor.
    pub fn neighbors(&self, index: usize) -> &[(usize, f64)] {
        &self.binding_mat[index]
    }

    pub(crate) fn check_state(&self, state: &[bool]) -> Result<(), BindingError> {
        if state.len() == self.nodes.len() {
            Ok(())
        } else {
            Err(BindingError::StateLength {
                expected: self.nodes.len(),
                got: state.len(),
            })
        }
    }

    /// The bias of `node` plus the sum of neighboring spins times coupling weight.
    pub fn local_field(&self, node: &Node, state: &[bool]) -> Result<f64, BindingError> {
        self.check_state(state)?;
        Ok(self.local_field_at(self.index_of(node)?, state))
    }

    /// Probability that `node` is +1 given all other spins in `state`.
    pub fn conditional_probability(
        &self,
        node: &Node,
        state: &[bool],
    ) -> Result<f64, BindingError> {
        self.check_state(state)?;
        Ok(self.conditional_probability_at(self.index_of(node)?, state))
    }

    pub(crate) fn local_field_at(&self, index: usize, state: &[bool]) -> f64 {
        self.binding_mat[index]
            .iter()
            .fold(self.biases[index], |acc, (indx, j)| {
                acc + j * spin_value(state[*indx])
            })
    }

    // Flipping s_i changes the energy by 2 s_i h_i, so P(s_i = +1 | rest) = sigmoid(2 beta h_i).
    pub(crate) fn conditional_probability_at(&self, index: usize, state: &[bool]) -> f64 {
        sigmoid(2.0 * self.beta * self.local_field_at(index, state))
    }

    /// Get the energy of a state.
    pub fn energy(&self, state: &[bool]) -> Result<f64, BindingError> {
        self.check_state(state)?;
        let bias_e: f64 = self
            .biases
            .iter()
            .zip(state.iter())
            .map(|(b, s)| b * spin_value(*s))
            .sum();
        let edge_e: f64 = self
            .edges
            .iter()
            .zip(self.weights.iter())
            .map(|((na, nb), w)| {
                let (va, vb) = (self.node_index[na], self.node_index[nb]);
                w * spin_value(state[va]) * spin_value(state[vb])
            })
            .sum();
        Ok(-(bias_e + edge_e))
    }
}

impl TryFrom<IsingParams> for IsingEBM {
    type Error = StructuralError;

    fn try_from(params: IsingParams) -> Result<Self, Self::Error> {
        IsingEBM::new(
            params.nodes,
            params.edges,
            params.biases,
            params.weights,
            params.beta,
        )
    }
}

impl From<IsingEBM> for IsingParams {
    fn from(model: IsingEBM) -> Self {
        IsingParams {
            nodes: model.nodes,
            edges: model.edges,
            biases: model.biases,
            weights: model.weights,
            beta: model.beta,
        }
    }
}

fn check_finite(what: &'static str, values: &[f64]) -> Result<(), StructuralError> {
    match values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, value)) => Err(StructuralError::NonFinite {
            what,
            index,
            value: *value,
        }),
        None => Ok(()),
    }
}

/// Convert a stored spin to its value in `{-1, +1}`.
pub fn spin_value(s: bool) -> f64 {
    if s {
        1.0
    } else {
        -1.0
    }
}

/// Logistic function, evaluated without overflow for large `|x|`.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}
