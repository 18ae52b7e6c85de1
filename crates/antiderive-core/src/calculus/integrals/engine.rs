//! Search scheduler for the AND/OR integration tree
//!
//! Each cycle applies safe transforms exhaustively, consults the elementary
//! table at the leaves, then branches one unfinished leaf heuristically. The
//! next frontier node is chosen by nesting: the easiest alternative inside
//! OR choices, the hardest conjunct inside AND requirements. When the root
//! is solved, solutions propagate from the solution leaves back to the root.

use super::table;
use super::transforms::{heuristic, safe};
use super::tree::{NodeId, NodeKind, Tree};
use super::IntegratorConfig;
use crate::core::expression::methods::nesting;
use crate::core::{Expression, Symbol};
use crate::error::{MathError, MathResult};
use crate::simplify::Simplify;

/// Solve one integral with the transform search
pub(crate) fn run(
    integrand: &Expression,
    var: &Symbol,
    config: &IntegratorConfig,
) -> MathResult<Expression> {
    let failure = || MathError::IntegrationFailed {
        integrand: integrand.clone(),
        variable: var.name().to_string(),
    };

    let (mut tree, root) = Tree::new(integrand.clone(), var.clone());
    let mut current = root;

    let mut cycles = 0;
    loop {
        cycles += 1;
        if cycles > config.max_cycles {
            return Err(failure());
        }

        let outcome = cycle(&mut tree, current, config);

        if tree.is_finished(root) {
            break;
        }

        current = match outcome {
            CycleOutcome::Next(node) => node,
            CycleOutcome::Exhausted => match next_frontier(&tree, root) {
                Some(node) => node,
                None => break,
            },
        };
    }

    if !tree.is_solved(root) {
        return Err(failure());
    }

    propagate_solutions(&mut tree, root);
    tree.node(root)
        .solution
        .clone()
        .map(|solution| solution.simplify())
        .ok_or_else(failure)
}

enum CycleOutcome {
    /// Frontier node for the next cycle
    Next(NodeId),
    /// No unfinished leaves below the cycled node
    Exhausted,
}

fn cycle(tree: &mut Tree, node: NodeId, config: &IntegratorConfig) -> CycleOutcome {
    // 1. apply safe transforms as deep as they reach
    integrate_safely(tree, node);

    // 2. elementary table lookup on the unfinished leaves
    for leaf in tree.unfinished_leaves(node) {
        let (expr, leaf_var) = {
            let leaf_node = tree.node(leaf);
            (leaf_node.expr.clone(), leaf_node.var.clone())
        };
        if let Some(solution) = table::lookup(&expr, &leaf_var) {
            let leaf_node = tree.node_mut(leaf);
            leaf_node.kind = NodeKind::Solution;
            leaf_node.solution = Some(solution);
        }
    }

    let unfinished = tree.unfinished_leaves(node);
    let Some(&first) = unfinished.first() else {
        return CycleOutcome::Exhausted;
    };

    // 3. heuristics branch the first unfinished leaf
    integrate_heuristically(tree, first, config);

    match next_frontier_from(tree, first) {
        Some(next) => CycleOutcome::Next(next),
        None => CycleOutcome::Exhausted,
    }
}

/// Apply the first matching safe transform, then recurse into the children
fn integrate_safely(tree: &mut Tree, node: NodeId) {
    if let Some(transform) = safe::check(tree, node) {
        transform.forward(tree, node);
        let children = tree.node(node).children.clone();
        for child in children {
            integrate_safely(tree, child);
        }
    }
}

/// Fire every applicable heuristic at `node` and classify the result
fn integrate_heuristically(tree: &mut Tree, node: NodeId, config: &IntegratorConfig) {
    if tree.depth(node) >= config.max_depth {
        tree.node_mut(node).kind = NodeKind::Failure;
        return;
    }

    for transform in heuristic::checks(tree, node) {
        transform.forward(tree, node);
    }

    let node_ref = tree.node_mut(node);
    match node_ref.children.len() {
        0 => node_ref.kind = NodeKind::Failure,
        1 => {}
        _ => {
            // by-parts builds AND nodes below itself; the choice between
            // transforms is still a disjunction
            if node_ref.kind == NodeKind::Unset {
                node_ref.kind = NodeKind::Or;
            }
        }
    }
}

/// Frontier choice after a heuristic pass at `node`
///
/// While this subtree has unfinished leaves, descend by nesting. Otherwise
/// climb to the nearest live ancestor with remaining work; a fully finished
/// tree has no frontier.
fn next_frontier_from(tree: &Tree, node: NodeId) -> Option<NodeId> {
    let unfinished = tree.unfinished_leaves(node);
    match unfinished.len() {
        0 => {
            let mut ancestor = tree.node(node).parent;
            while let Some(current) = ancestor {
                if !tree.is_finished(current) && !tree.unfinished_leaves(current).is_empty() {
                    return next_frontier_from(tree, current);
                }
                ancestor = tree.node(current).parent;
            }
            None
        }
        1 => Some(unfinished[0]),
        _ => Some(nesting_node(tree, node)),
    }
}

fn next_frontier(tree: &Tree, root: NodeId) -> Option<NodeId> {
    if tree.unfinished_leaves(root).is_empty() {
        None
    } else {
        next_frontier_from(tree, root)
    }
}

/// Descend to the most promising unfinished leaf
///
/// At OR nodes the child with minimum nesting is preferred (try the easiest
/// alternative); at AND nodes the maximum (attack the hardest conjunct
/// first, since every conjunct must be solved anyway).
fn nesting_node(tree: &Tree, node: NodeId) -> NodeId {
    let active = tree.unfinished_children(node);
    match active.len() {
        0 => node,
        1 => nesting_node(tree, active[0]),
        _ => {
            let all_leaf_like = active
                .iter()
                .all(|&child| tree.unfinished_children(child).is_empty());
            let candidates: Vec<NodeId> = if all_leaf_like {
                active
            } else {
                active
                    .into_iter()
                    .map(|child| nesting_node(tree, child))
                    .collect()
            };
            let minimize = tree.node(node).kind == NodeKind::Or;
            best_by_nesting(tree, &candidates, minimize)
        }
    }
}

fn best_by_nesting(tree: &Tree, nodes: &[NodeId], minimize: bool) -> NodeId {
    let score = |id: NodeId| {
        let node = tree.node(id);
        nesting(&node.expr, Some(&node.var))
    };
    let best = if minimize {
        nodes.iter().copied().min_by_key(|&id| score(id))
    } else {
        nodes.iter().copied().max_by_key(|&id| score(id))
    };
    best.expect("BUG: frontier selection over an empty node list")
}

/// Walk every solution leaf upward, assembling ancestor solutions
///
/// Each chain stops at the first node whose siblings are still missing
/// solutions; a later leaf's chain completes those. After all chains are
/// walked the root carries its solution.
fn propagate_solutions(tree: &mut Tree, root: NodeId) {
    let solution_leaves: Vec<NodeId> = tree
        .leaves(root)
        .into_iter()
        .filter(|&leaf| tree.node(leaf).kind == NodeKind::Solution)
        .collect();

    for leaf in solution_leaves {
        let mut current = leaf;
        loop {
            let Some(transform) = tree.node(current).transform.clone() else {
                break;
            };
            if transform.backward(tree, current).is_err() {
                break;
            }
            match tree.node(current).parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TrigKind;

    fn x() -> Symbol {
        Symbol::new("x")
    }

    fn sym() -> Expression {
        Expression::symbol(x())
    }

    fn config() -> IntegratorConfig {
        IntegratorConfig::default()
    }

    fn integrate(expr: &Expression) -> Expression {
        run(expr, &x(), &config()).expect("integrable")
    }

    #[test]
    fn test_table_hit_at_root() {
        let result = integrate(&Expression::pow(sym(), Expression::integer(2)));
        let expected = (Expression::pow(sym(), Expression::integer(3))
            / Expression::integer(3))
        .simplify();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_sum_of_monomials() {
        // 3x^5 - x^3 + 6 -> x^6/2 - x^4/4 + 6x
        let expr = (Expression::integer(3) * Expression::pow(sym(), Expression::integer(5))
            - Expression::pow(sym(), Expression::integer(3))
            + Expression::integer(6))
        .simplify();
        let result = integrate(&expr);
        let expected = (Expression::pow(sym(), Expression::integer(6))
            / Expression::integer(2)
            - Expression::pow(sym(), Expression::integer(4)) / Expression::integer(4)
            + Expression::integer(6) * sym())
        .simplify();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_linear_substitution_through_power() {
        // (2x - 5)^10 -> (2x - 5)^11 / 22
        let affine = (Expression::integer(2) * sym() - Expression::integer(5)).simplify();
        let expr = Expression::pow(affine.clone(), Expression::integer(10));
        let result = integrate(&expr);
        let expected = (Expression::pow(affine, Expression::integer(11))
            / Expression::integer(22))
        .simplify();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_unsolvable_integrand_fails_cleanly() {
        // e^(x^2) has no elementary antiderivative
        let expr = Expression::pow(
            Expression::e(),
            Expression::pow(sym(), Expression::integer(2)),
        );
        let result = run(&expr, &x(), &config());
        assert!(matches!(
            result,
            Err(MathError::IntegrationFailed { .. })
        ));
    }

    #[test]
    fn test_by_parts_x_cos() {
        // x cos x -> x sin x + cos x
        let expr = (sym() * Expression::trig(TrigKind::Cos, sym())).simplify();
        let result = integrate(&expr);
        let expected = (sym() * Expression::trig(TrigKind::Sin, sym())
            + Expression::trig(TrigKind::Cos, sym()))
        .simplify();
        assert_eq!(result, expected);
    }
}
