//! Safe transforms: always worth applying, never branching
//!
//! Applied in a fixed order during the safe pass of every cycle:
//! additivity, constant pulling, partial fractions, polynomial division,
//! linear u-substitution, expansion. The first match wins; children then
//! re-enter the full safe pass.

use super::super::tree::{NodeId, NodeKind, Tree};
use super::Transform;
use crate::algebra::factor::factor_sum;
use crate::algebra::{solve_2x2, Matrix2, Polynomial};
use crate::calculus::derivatives::Differentiate;
use crate::core::{Expression, Symbol};
use crate::pattern::substitution::Substitutable;
use crate::simplify::arithmetic::helpers::numerator_denominator;
use crate::simplify::Simplify;

/// First safe transform whose precondition holds at `node`
pub(crate) fn check(tree: &Tree, node: NodeId) -> Option<Transform> {
    let expr = &tree.node(node).expr;
    let var = &tree.node(node).var;

    check_additivity(expr)
        .or_else(|| check_pull_constant(expr, var))
        .or_else(|| check_partial_fractions(expr, var))
        .or_else(|| check_polynomial_division(expr, var))
        .or_else(|| check_linear_u_sub(expr, var))
        .or_else(|| check_expand(expr))
}

fn check_additivity(expr: &Expression) -> Option<Transform> {
    matches!(expr, Expression::Add(_)).then_some(Transform::Additivity)
}

fn check_pull_constant(expr: &Expression, var: &Symbol) -> Option<Transform> {
    if let Expression::Mul(factors) = expr {
        for factor in factors.iter() {
            if !factor.contains(var) {
                return Some(Transform::PullConstant {
                    constant: factor.clone(),
                });
            }
        }
    }
    None
}

/// Split a proper rational integrand over a two-factor linear denominator
///
/// The cover-up constants come from the 2x2 system `A*d2 + B*d1 = numerator`
/// coefficient-wise; a singular system means the factors are not
/// independent and the transform does not apply.
fn check_partial_fractions(expr: &Expression, var: &Symbol) -> Option<Transform> {
    let factors = match expr {
        Expression::Mul(factors) => factors,
        _ => return None,
    };
    let (numerator, denominator) = numerator_denominator(factors);
    if denominator.is_one() {
        return None;
    }

    let numerator_poly = Polynomial::from_expression(&numerator, var).ok()?;
    let denominator_poly = Polynomial::from_expression(&denominator, var).ok()?;
    if numerator_poly.len() >= denominator_poly.len() {
        return None;
    }

    // the denominator must be (or factor into) a product
    let denominator_product = match &denominator {
        Expression::Mul(_) => denominator.clone(),
        Expression::Add(terms) => {
            let factored = factor_sum(terms);
            if matches!(factored, Expression::Mul(_)) {
                factored
            } else {
                return None;
            }
        }
        _ => return None,
    };
    let parts = match &denominator_product {
        Expression::Mul(parts) => parts,
        _ => unreachable!("checked above"),
    };
    if parts.len() != 2 {
        return None;
    }
    let (d1, d2) = (&parts[0], &parts[1]);
    if !d1.contains(var) || !d2.contains(var) {
        return None;
    }

    let d1_poly = Polynomial::from_expression(d1, var).ok()?;
    let d2_poly = Polynomial::from_expression(d2, var).ok()?;
    if d1_poly.len() != 2 || d2_poly.len() != 2 {
        return None;
    }

    let matrix: Matrix2 = [
        [d2_poly.coefficient(0), d1_poly.coefficient(0)],
        [d2_poly.coefficient(1), d1_poly.coefficient(1)],
    ];
    let rhs = [numerator_poly.coefficient(0), numerator_poly.coefficient(1)];
    let [a, b] = solve_2x2(&matrix, &rhs)?;

    let new_integrand = Expression::Number(a) / d1.clone() + Expression::Number(b) / d2.clone();
    Some(Transform::PartialFractions { new_integrand })
}

fn check_polynomial_division(expr: &Expression, var: &Symbol) -> Option<Transform> {
    // single-variable rational functions only
    if expr.symbols() != vec![var.clone()] {
        return None;
    }
    let factors = match expr {
        Expression::Mul(factors) => factors,
        _ => return None,
    };
    let (numerator, denominator) = numerator_denominator(factors);
    if denominator.is_one() {
        return None;
    }
    let numerator_poly = Polynomial::from_expression(&numerator, var).ok()?;
    let denominator_poly = Polynomial::from_expression(&denominator, var).ok()?;
    if numerator_poly.len() < denominator_poly.len() {
        return None;
    }
    Some(Transform::PolynomialDivision {
        numerator: numerator_poly,
        denominator: denominator_poly,
    })
}

/// Detect an integrand whose every use of the variable sits inside one
/// common affine expression `a*x + b`
fn check_linear_u_sub(expr: &Expression, var: &Symbol) -> Option<Transform> {
    if expr.count(&Expression::symbol(var.clone())) < 1 {
        return None;
    }

    fn is_affine(expr: &Expression, var: &Symbol) -> bool {
        match expr {
            Expression::Add(terms) => terms.iter().all(|term| {
                !term.contains(var)
                    || !(term.clone() / Expression::symbol(var.clone()))
                        .simplify()
                        .contains(var)
            }),
            Expression::Mul(_) => !(expr.clone() / Expression::symbol(var.clone()))
                .simplify()
                .contains(var),
            _ => false,
        }
    }

    fn walk(expr: &Expression, var: &Symbol, found: &mut Option<Expression>) -> bool {
        if !expr.contains(var) {
            return true;
        }
        if is_affine(expr, var) {
            return match found {
                Some(existing) => existing == expr,
                None => {
                    *found = Some(expr.clone());
                    true
                }
            };
        }
        let children = expr.children();
        if children.is_empty() {
            // this is the bare variable, outside any affine wrapper
            return false;
        }
        children.iter().all(|child| walk(child, var, found))
    }

    let mut found = None;
    if walk(expr, var, &mut found) {
        found.map(|inner| Transform::LinearUSub { inner })
    } else {
        None
    }
}

fn check_expand(expr: &Expression) -> Option<Transform> {
    expr.expandable().then_some(Transform::Expand)
}

/// Apply a safe transform's forward step at `node`
pub(crate) fn forward(tree: &mut Tree, node: NodeId, transform: Transform) {
    let expr = tree.node(node).expr.clone();
    let var = tree.node(node).var.clone();

    if let Transform::Additivity = &transform {
        tree.node_mut(node).kind = NodeKind::And;
        let terms = match &expr {
            Expression::Add(terms) => terms.as_ref().clone(),
            _ => unreachable!("additivity checked the expression is a sum"),
        };
        for term in terms {
            tree.add_child(node, term, var.clone(), Transform::Additivity);
        }
        return;
    }

    let (child_expr, child_var) = match &transform {
        Transform::PullConstant { constant } => {
            ((expr / constant.clone()).simplify(), var)
        }

        Transform::PartialFractions { new_integrand } => (new_integrand.clone(), var),

        Transform::PolynomialDivision {
            numerator,
            denominator,
        } => {
            let (quotient, remainder) = numerator.long_division(denominator);
            let mut result = quotient.to_expression(&var);
            if !remainder.is_zero() {
                result = result
                    + remainder.to_expression(&var) / denominator.to_expression(&var);
            }
            (result, var)
        }

        Transform::LinearUSub { inner } => {
            let intermediate = tree.fresh_symbol();
            let slope = inner
                .diff(&var)
                .expect("affine expressions are differentiable")
                .simplify();
            let substituted = expr.subs(inner, &Expression::symbol(intermediate.clone()));
            ((substituted / slope).simplify(), intermediate)
        }

        Transform::Expand => (expr.expand(), var),

        _ => unreachable!("safe forward on a heuristic transform"),
    };
    tree.add_child(node, child_expr, child_var, transform);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TrigKind;
    use crate::pattern::Substitutable;

    fn x() -> Symbol {
        Symbol::new("x")
    }

    fn sym() -> Expression {
        Expression::symbol(x())
    }

    fn tree_for(expr: Expression) -> (Tree, NodeId) {
        Tree::new(expr, x())
    }

    #[test]
    fn test_additivity_splits_terms() {
        let expr = (sym() + Expression::integer(3)).simplify();
        let (mut tree, root) = tree_for(expr);
        let transform = check(&tree, root).expect("sum splits");
        assert!(matches!(transform, Transform::Additivity));
        transform.forward(&mut tree, root);
        assert_eq!(tree.node(root).children.len(), 2);
        assert_eq!(tree.node(root).kind, NodeKind::And);
    }

    #[test]
    fn test_pull_constant() {
        let expr = (Expression::integer(6) * Expression::pow(Expression::e(), sym())).simplify();
        let (mut tree, root) = tree_for(expr);
        let transform = check(&tree, root).expect("constant pulls out");
        assert!(matches!(transform, Transform::PullConstant { .. }));
        transform.forward(&mut tree, root);
        let child = tree.node(root).children[0];
        assert_eq!(
            tree.node(child).expr,
            Expression::pow(Expression::e(), sym())
        );
    }

    #[test]
    fn test_partial_fractions_cover_up() {
        // (x + 8) / (x * (x + 6))
        let expr = ((sym() + Expression::integer(8))
            / (sym() * (sym() + Expression::integer(6))))
        .simplify();
        let (mut tree, root) = tree_for(expr);
        let transform = check(&tree, root).expect("partial fractions apply");
        assert!(matches!(transform, Transform::PartialFractions { .. }));
        transform.forward(&mut tree, root);
        let child = tree.node(root).children[0];
        // (4/3)/x - (1/3)/(x + 6)
        let expected = (Expression::rational(4, 3) / sym()
            + Expression::rational(-1, 3) / (sym() + Expression::integer(6)))
        .simplify();
        assert_eq!(tree.node(child).expr, expected);
    }

    #[test]
    fn test_partial_fractions_rejects_improper_fractions() {
        // x^2 / (x * (x + 6)) has numerator degree == denominator degree
        let expr = (Expression::pow(sym(), Expression::integer(2))
            / (sym() * (sym() + Expression::integer(6))))
        .simplify();
        let (tree, root) = tree_for(expr);
        let transform = check(&tree, root);
        assert!(!matches!(transform, Some(Transform::PartialFractions { .. })));
    }

    #[test]
    fn test_polynomial_division() {
        // (x^3 - 1) / (x + 2)
        let numerator = Expression::pow(sym(), Expression::integer(3)) - Expression::one();
        let expr = (numerator / (sym() + Expression::integer(2))).simplify();
        let (mut tree, root) = tree_for(expr);
        let transform = check(&tree, root).expect("division applies");
        assert!(matches!(transform, Transform::PolynomialDivision { .. }));
        transform.forward(&mut tree, root);
        let child = tree.node(root).children[0];
        // x^2 - 2x + 4 - 9/(x + 2)
        let child_expr = &tree.node(child).expr;
        assert!(child_expr.count(&Expression::pow(sym(), Expression::integer(2))) >= 1);
    }

    #[test]
    fn test_linear_u_sub_detects_common_affine() {
        // (2x - 5)^10
        let affine = (Expression::integer(2) * sym() - Expression::integer(5)).simplify();
        let expr = Expression::pow(affine.clone(), Expression::integer(10));
        let (mut tree, root) = tree_for(expr);
        let transform = check(&tree, root).expect("affine substitution applies");
        let Transform::LinearUSub { inner } = &transform else {
            panic!("expected LinearUSub, got {:?}", transform);
        };
        assert_eq!(*inner, affine);

        transform.forward(&mut tree, root);
        let child = tree.node(root).children[0];
        let u = Expression::symbol(tree.node(child).var.clone());
        // u^10 / 2
        let expected = (Expression::pow(u, Expression::integer(10))
            / Expression::integer(2))
        .simplify();
        assert_eq!(tree.node(child).expr, expected);
    }

    #[test]
    fn test_linear_u_sub_rejects_bare_variable_uses() {
        // x * e^(4x) mixes a bare x with the affine 4x
        let four_x = (Expression::integer(4) * sym()).simplify();
        let expr = (sym() * Expression::pow(Expression::e(), four_x)).simplify();
        let (tree, root) = tree_for(expr);
        assert!(check(&tree, root).is_none());
    }

    #[test]
    fn test_linear_u_sub_through_trig() {
        // sec(2x) * tan(2x) shares the affine 2x
        let two_x = (Expression::integer(2) * sym()).simplify();
        let expr = (Expression::trig(TrigKind::Sec, two_x.clone())
            * Expression::trig(TrigKind::Tan, two_x.clone()))
        .simplify();
        let (tree, root) = tree_for(expr);
        let transform = check(&tree, root).expect("affine substitution applies");
        let Transform::LinearUSub { inner } = transform else {
            panic!("expected LinearUSub");
        };
        assert_eq!(inner, two_x);
    }

    #[test]
    fn test_expand_fires_on_distributable_products() {
        let expr = ((sym() + Expression::one()) * (sym() + Expression::integer(2)))
            .simplify();
        let (mut tree, root) = tree_for(expr);
        let transform = check(&tree, root).expect("expandable");
        assert!(matches!(transform, Transform::Expand));
        transform.forward(&mut tree, root);
        let child = tree.node(root).children[0];
        assert!(matches!(tree.node(child).expr, Expression::Add(_)));
    }

    #[test]
    fn test_backward_pull_constant() {
        let expr = (Expression::integer(6) * Expression::pow(Expression::e(), sym())).simplify();
        let (mut tree, root) = tree_for(expr);
        let transform = check(&tree, root).expect("constant pulls out");
        transform.forward(&mut tree, root);
        let child = tree.node(root).children[0];
        tree.node_mut(child).solution = Some(Expression::pow(Expression::e(), sym()));

        let child_transform = tree.node(child).transform.clone().expect("has transform");
        child_transform
            .backward(&mut tree, child)
            .unwrap_or_else(|_| panic!("siblings solved"));
        let expected = (Expression::integer(6) * Expression::pow(Expression::e(), sym()))
            .simplify();
        assert_eq!(tree.node(root).solution, Some(expected));
    }

    #[test]
    fn test_backward_linear_u_sub_substitutes_back() {
        let affine = (Expression::integer(2) * sym() - Expression::integer(5)).simplify();
        let expr = Expression::pow(affine.clone(), Expression::integer(10));
        let (mut tree, root) = tree_for(expr);
        let transform = check(&tree, root).expect("affine substitution");
        transform.forward(&mut tree, root);
        let child = tree.node(root).children[0];
        let u = Expression::symbol(tree.node(child).var.clone());

        // pretend the child solved to u^11/22
        let child_solution = (Expression::pow(u, Expression::integer(11))
            / Expression::integer(22))
        .simplify();
        tree.node_mut(child).solution = Some(child_solution.clone());
        let child_transform = tree.node(child).transform.clone().expect("has transform");
        child_transform
            .backward(&mut tree, child)
            .unwrap_or_else(|_| panic!("ready"));

        let expected = child_solution
            .subs(&Expression::symbol(tree.node(child).var.clone()), &affine)
            .simplify();
        assert_eq!(tree.node(root).solution, Some(expected));
    }
}
