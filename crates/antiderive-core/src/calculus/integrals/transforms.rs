//! Integral transforms
//!
//! A transform is checked against a node (a pure predicate that may capture
//! state), applied forward (creating child subproblems), and applied
//! backward (assembling the parent's solution from child solutions once they
//! exist). The enum variant doubles as the provenance tag stored on every
//! node the transform produces.
//!
//! Safe transforms always make progress and never branch; heuristic
//! transforms may branch into OR alternatives and may lead to failure.

pub(crate) mod heuristic;
pub(crate) mod safe;

use super::tree::{NodeId, Tree};
use crate::algebra::Polynomial;
use crate::core::{Expression, TrigKind};
use crate::pattern::Substitutable;
use crate::simplify::Simplify;

/// Signal that a node's solution cannot be assembled yet because sibling
/// subproblems are still unsolved. Internal to back-propagation.
pub(crate) struct NoSolutionYet;

/// An applied transform together with the state its check captured
#[derive(Debug, Clone)]
pub(crate) enum Transform {
    // safe
    Additivity,
    PullConstant {
        constant: Expression,
    },
    PartialFractions {
        new_integrand: Expression,
    },
    PolynomialDivision {
        numerator: Polynomial,
        denominator: Polynomial,
    },
    LinearUSub {
        inner: Expression,
    },
    Expand,
    // heuristic
    PolynomialUSub {
        substitution: Expression,
    },
    CompoundAngle,
    SinUSub {
        sine: Expression,
    },
    TrigPowerSplit {
        target: Expression,
        replacement: Expression,
    },
    ProductToSum {
        target: Expression,
        replacement: Expression,
    },
    TrigUSub {
        kind: TrigKind,
    },
    ByParts {
        u: Expression,
        du: Expression,
        v: Expression,
    },
    RewriteTrig,
    InverseTrigUSub {
        kind: TrigKind,
    },
    GenericUSub {
        substitution: Expression,
    },
}

impl Transform {
    /// Create this transform's child subproblems under `node`
    pub fn forward(self, tree: &mut Tree, node: NodeId) {
        match &self {
            Transform::Additivity
            | Transform::PullConstant { .. }
            | Transform::PartialFractions { .. }
            | Transform::PolynomialDivision { .. }
            | Transform::LinearUSub { .. }
            | Transform::Expand => safe::forward(tree, node, self),
            _ => heuristic::forward(tree, node, self),
        }
    }

    /// Assemble a solution one level up from a solved node
    ///
    /// `node` is the node this transform produced. Depending on the variant
    /// the parent's solution is the node's solution passed through, scaled,
    /// summed with siblings, or substituted back into the original variable.
    pub fn backward(&self, tree: &mut Tree, node: NodeId) -> Result<(), NoSolutionYet> {
        let solution = tree
            .node(node)
            .solution
            .clone()
            .ok_or(NoSolutionYet)?;
        let parent = tree.node(node).parent.ok_or(NoSolutionYet)?;

        let parent_solution = match self {
            // the parent's solution is the sum over all children
            Transform::Additivity => {
                let children = tree.node(parent).children.clone();
                let mut parts = Vec::with_capacity(children.len());
                for child in children {
                    parts.push(
                        tree.node(child)
                            .solution
                            .clone()
                            .ok_or(NoSolutionYet)?,
                    );
                }
                Expression::add(parts).simplify()
            }

            Transform::PullConstant { constant } => {
                (constant.clone() * solution).simplify()
            }

            // reformulations pass the child solution through unchanged
            Transform::PartialFractions { .. }
            | Transform::PolynomialDivision { .. }
            | Transform::Expand
            | Transform::CompoundAngle
            | Transform::TrigPowerSplit { .. }
            | Transform::ProductToSum { .. }
            | Transform::ByParts { .. }
            | Transform::RewriteTrig => solution,

            // variable changes substitute the original expression back in
            Transform::LinearUSub { inner } => {
                substituted_back(tree, node, solution, inner.clone())
            }
            Transform::PolynomialUSub { substitution }
            | Transform::GenericUSub { substitution } => {
                substituted_back(tree, node, solution, substitution.clone())
            }
            Transform::SinUSub { sine } => {
                substituted_back(tree, node, solution, sine.clone())
            }
            Transform::TrigUSub { kind } => {
                let original = Expression::trig(
                    *kind,
                    Expression::symbol(tree.node(parent).var.clone()),
                );
                substituted_back(tree, node, solution, original)
            }
            Transform::InverseTrigUSub { kind } => {
                let arc = kind.inverse().expect("sin and tan have inverses");
                let original = Expression::trig(
                    arc,
                    Expression::symbol(tree.node(parent).var.clone()),
                );
                substituted_back(tree, node, solution, original)
            }
        };

        tree.node_mut(parent).solution = Some(parent_solution);
        Ok(())
    }
}

/// Replace the node's intermediate variable with the original expression
fn substituted_back(
    tree: &Tree,
    node: NodeId,
    solution: Expression,
    original: Expression,
) -> Expression {
    let intermediate = Expression::symbol(tree.node(node).var.clone());
    solution.subs(&intermediate, &original).simplify()
}
