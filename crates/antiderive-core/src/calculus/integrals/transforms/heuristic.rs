//! Heuristic transforms: may branch, may fail
//!
//! Checked in priority order; every transform whose predicate holds
//! contributes children, and the node becomes an OR choice when more than
//! one child accumulates. The trig rewrites consult the nearest substantial
//! ancestor transform to avoid undoing each other.

use super::super::table;
use super::super::tree::{NodeId, NodeKind, Tree};
use super::Transform;
use crate::calculus::derivatives::Differentiate;
use crate::core::{Expression, Symbol, TrigData, TrigKind};
use crate::pattern::{replace_trig_functions, Substitutable};
use crate::simplify::arithmetic::helpers::{deconstruct_product, product_from};
use crate::simplify::Simplify;

/// All heuristic transforms whose predicates hold at `node`, in priority
/// order
pub(crate) fn checks(tree: &Tree, node: NodeId) -> Vec<Transform> {
    let expr = &tree.node(node).expr;
    let var = &tree.node(node).var;

    let candidates = [
        check_polynomial_u_sub(expr, var),
        check_compound_angle(expr),
        check_sin_u_sub(expr, var),
        check_trig_power_split(expr),
        check_product_to_sum(expr),
        check_trig_u_sub(tree, node),
        check_by_parts(expr, var),
        check_rewrite_trig(tree, node),
        check_inverse_trig_u_sub(tree, node),
        check_generic_u_sub(expr, var),
    ];
    candidates.into_iter().flatten().collect()
}

/// Apply a heuristic transform's forward step at `node`
pub(crate) fn forward(tree: &mut Tree, node: NodeId, transform: Transform) {
    let expr = tree.node(node).expr.clone();
    let var = tree.node(node).var.clone();

    // the branching transforms manage their own children
    match &transform {
        Transform::ByParts { u, du, v } => {
            let (u, du, v) = (u.clone(), du.clone(), v.clone());
            forward_by_parts(tree, node, &expr, &var, &u, &du, &v);
            return;
        }
        Transform::RewriteTrig => {
            forward_rewrite_trig(tree, node, &expr, &var);
            return;
        }
        _ => {}
    }

    let (child_expr, child_var) = match &transform {
        Transform::PolynomialUSub { substitution } => {
            let intermediate = tree.fresh_symbol();
            let derivative = substitution
                .diff(&var)
                .expect("powers of the variable are differentiable");
            let child = (expr.subs(substitution, &Expression::symbol(intermediate.clone()))
                / derivative)
                .simplify();
            (child, intermediate)
        }

        Transform::CompoundAngle => {
            (replace_trig_functions(&expr, &expand_compound_angle), var)
        }

        Transform::SinUSub { sine } => {
            let intermediate = tree.fresh_symbol();
            let derivative = sine
                .diff(&var)
                .expect("sine applications are differentiable");
            let child =
                expr.subs(sine, &Expression::symbol(intermediate.clone())) / derivative;
            (child, intermediate)
        }

        Transform::TrigPowerSplit {
            target,
            replacement,
        } => {
            // distribute immediately: left unexpanded, the Pythagorean
            // rewrite would fold the split factor straight back
            let substituted = expr.subs(target, replacement);
            let child = if substituted.expandable() {
                substituted.expand()
            } else {
                substituted
            };
            (child, var)
        }

        Transform::ProductToSum {
            target,
            replacement,
        } => (expr.subs(target, replacement), var),

        Transform::TrigUSub { kind } => {
            let intermediate = tree.fresh_symbol();
            let u = Expression::symbol(intermediate.clone());
            // dx expressed in the substituted variable, from the derivative
            // of the matching inverse function
            let dx = match kind {
                TrigKind::Sin => Expression::pow(
                    Expression::one() - Expression::pow(u.clone(), Expression::integer(2)),
                    Expression::rational(-1, 2),
                ),
                TrigKind::Cos => -Expression::pow(
                    Expression::one() - Expression::pow(u.clone(), Expression::integer(2)),
                    Expression::rational(-1, 2),
                ),
                TrigKind::Tan => Expression::pow(
                    Expression::one() + Expression::pow(u.clone(), Expression::integer(2)),
                    Expression::integer(-1),
                ),
                _ => unreachable!("only sin, cos and tan are substituted"),
            };
            let target = Expression::trig(*kind, Expression::symbol(var.clone()));
            (expr.subs(&target, &u) * dx, intermediate)
        }

        Transform::InverseTrigUSub { kind } => {
            let intermediate = tree.fresh_symbol();
            let u = Expression::symbol(intermediate.clone());
            let dx = match kind {
                TrigKind::Sin => Expression::trig(TrigKind::Cos, u.clone()),
                TrigKind::Tan => Expression::pow(
                    Expression::trig(TrigKind::Sec, u.clone()),
                    Expression::integer(2),
                ),
                _ => unreachable!("only sin and tan substitutions exist"),
            };
            let substituted = expr.subs(
                &Expression::symbol(var.clone()),
                &Expression::trig(*kind, u),
            );
            ((substituted * dx).simplify(), intermediate)
        }

        Transform::GenericUSub { substitution } => {
            let intermediate = tree.fresh_symbol();
            let derivative = substitution
                .diff(&var)
                .expect("table antiderivatives are differentiable");
            let child = (expr / derivative)
                .simplify()
                .subs(substitution, &Expression::symbol(intermediate.clone()));
            (child, intermediate)
        }

        _ => unreachable!("heuristic forward on a safe transform"),
    };
    tree.add_child(node, child_expr, child_var, transform);
}

/// u = x^n where a factor supplies x^(n-1) and all other occurrences of the
/// variable appear as x^n
fn check_polynomial_u_sub(expr: &Expression, var: &Symbol) -> Option<Transform> {
    let factors = match expr {
        Expression::Mul(factors) => factors,
        _ => return None,
    };
    let var_expr = Expression::symbol(var.clone());

    for (i, factor) in factors.iter().enumerate() {
        let exponent = match factor {
            Expression::Pow(base, exponent)
                if **base == var_expr && !exponent.contains(var) =>
            {
                ((**exponent).clone() + Expression::one()).simplify()
            }
            _ if *factor == var_expr => Expression::integer(2),
            _ => continue,
        };
        if exponent.is_zero() {
            continue;
        }

        let substitution =
            Expression::pow(var_expr.clone(), exponent).simplify();
        let mut rest: Vec<Expression> = factors.as_ref().clone();
        rest.remove(i);
        let rest = product_from(rest).simplify();

        let occurrences = expr.count(&substitution);
        if occurrences > 0 && occurrences == rest.count(&var_expr) {
            return Some(Transform::PolynomialUSub { substitution });
        }
    }
    None
}

fn check_compound_angle(expr: &Expression) -> Option<Transform> {
    fn has_compound(expr: &Expression) -> bool {
        if let Expression::Trig(data) = expr {
            if matches!(data.kind, TrigKind::Sin | TrigKind::Cos) {
                if let Expression::Add(terms) = &data.inner {
                    if terms.len() == 2 {
                        return true;
                    }
                }
            }
        }
        expr.children().iter().any(|child| has_compound(child))
    }

    has_compound(expr).then_some(Transform::CompoundAngle)
}

/// sin(a + b) and cos(a + b) in sum-of-products form
fn expand_compound_angle(data: &TrigData) -> Option<Expression> {
    if !matches!(data.kind, TrigKind::Sin | TrigKind::Cos) {
        return None;
    }
    let Expression::Add(terms) = &data.inner else {
        return None;
    };
    if terms.len() != 2 {
        return None;
    }
    let (a, b) = (terms[0].clone(), terms[1].clone());
    let sin = |e: Expression| Expression::trig(TrigKind::Sin, e);
    let cos = |e: Expression| Expression::trig(TrigKind::Cos, e);
    Some(match data.kind {
        TrigKind::Sin => sin(a.clone()) * cos(b.clone()) + cos(a) * sin(b),
        TrigKind::Cos => cos(a.clone()) * cos(b.clone()) - sin(a) * sin(b),
        _ => unreachable!("matched above"),
    })
}

/// A sine and cosine of the same linear argument as direct product factors
fn check_sin_u_sub(expr: &Expression, var: &Symbol) -> Option<Transform> {
    let factors = match expr {
        Expression::Mul(factors) => factors,
        _ => return None,
    };

    let is_linear_in_var = |inner: &Expression| -> bool {
        *inner == Expression::symbol(var.clone())
            || !(inner.clone() / Expression::symbol(var.clone()))
                .simplify()
                .contains(var)
    };

    let mut sines: Vec<&Expression> = Vec::new();
    let mut cosines: Vec<&Expression> = Vec::new();
    for factor in factors.iter() {
        let Expression::Trig(data) = factor else {
            continue;
        };
        if !is_linear_in_var(&data.inner) {
            continue;
        }
        match data.kind {
            TrigKind::Sin => {
                if cosines.iter().any(|inner| **inner == data.inner) {
                    return Some(Transform::SinUSub {
                        sine: factor.clone(),
                    });
                }
                sines.push(&data.inner);
            }
            TrigKind::Cos => {
                if sines.iter().any(|inner| **inner == data.inner) {
                    return Some(Transform::SinUSub {
                        sine: Expression::trig(TrigKind::Sin, data.inner.clone()),
                    });
                }
                cosines.push(&data.inner);
            }
            _ => {}
        }
    }
    None
}

/// Odd power of sin or cos: peel one application off and rewrite the even
/// remainder through the Pythagorean identity in the complementary function
fn check_trig_power_split(expr: &Expression) -> Option<Transform> {
    let factors: Vec<&Expression> = match expr {
        Expression::Mul(factors) => factors.iter().collect(),
        other => vec![other],
    };

    for factor in factors {
        let Expression::Pow(base, exponent) = factor else {
            continue;
        };
        let Expression::Trig(data) = base.as_ref() else {
            continue;
        };
        if !matches!(data.kind, TrigKind::Sin | TrigKind::Cos) {
            continue;
        }
        let Some(n) = exponent.as_number().and_then(crate::core::Number::to_i64) else {
            continue;
        };
        if n < 3 || n % 2 == 0 {
            continue;
        }

        let complement = match data.kind {
            TrigKind::Sin => TrigKind::Cos,
            TrigKind::Cos => TrigKind::Sin,
            _ => unreachable!("matched above"),
        };
        let pythagorean = Expression::one()
            - Expression::pow(
                Expression::trig(complement, data.inner.clone()),
                Expression::integer(2),
            );
        // leave the k = 1 case as a bare sum so distribution sees it before
        // the Pythagorean rewrite can fold it back into the original power
        let even_remainder = if n == 3 {
            pythagorean
        } else {
            Expression::pow(pythagorean, Expression::integer((n - 1) / 2))
        };
        let replacement =
            Expression::trig(data.kind, data.inner.clone()) * even_remainder;
        return Some(Transform::TrigPowerSplit {
            target: factor.clone(),
            replacement,
        });
    }
    None
}

/// Product-to-sum identities for sin and cos, including power reduction of
/// even squares
fn check_product_to_sum(expr: &Expression) -> Option<Transform> {
    // a two-factor product of bare sines and cosines
    if let Expression::Mul(factors) = expr {
        if factors.len() == 2 {
            if let (Expression::Trig(a), Expression::Trig(b)) = (&factors[0], &factors[1]) {
                if matches!(a.kind, TrigKind::Sin | TrigKind::Cos)
                    && matches!(b.kind, TrigKind::Sin | TrigKind::Cos)
                {
                    return Some(Transform::ProductToSum {
                        target: expr.clone(),
                        replacement: product_to_sum_pair(a, b),
                    });
                }
            }
        }
    }

    // an even power of sin or cos reduces through the double angle
    let factors: Vec<&Expression> = match expr {
        Expression::Mul(factors) => factors.iter().collect(),
        other => vec![other],
    };
    for factor in factors {
        let Expression::Pow(base, exponent) = factor else {
            continue;
        };
        let Expression::Trig(data) = base.as_ref() else {
            continue;
        };
        if !matches!(data.kind, TrigKind::Sin | TrigKind::Cos) {
            continue;
        }
        let Some(n) = exponent.as_number().and_then(crate::core::Number::to_i64) else {
            continue;
        };
        if n < 2 || n % 2 != 0 {
            continue;
        }

        let reduced = power_reduction(data);
        let replacement = if n == 2 {
            reduced
        } else {
            Expression::pow(reduced, Expression::integer(n / 2))
        };
        return Some(Transform::ProductToSum {
            target: factor.clone(),
            replacement,
        });
    }
    None
}

fn product_to_sum_pair(a: &TrigData, b: &TrigData) -> Expression {
    let sum = (a.inner.clone() + b.inner.clone()).simplify();
    let difference = (a.inner.clone() - b.inner.clone()).simplify();
    let sin = |e: Expression| Expression::trig(TrigKind::Sin, e);
    let cos = |e: Expression| Expression::trig(TrigKind::Cos, e);
    let combined = match (a.kind, b.kind) {
        (TrigKind::Sin, TrigKind::Cos) => sin(sum) + sin(difference),
        (TrigKind::Cos, TrigKind::Sin) => sin(sum) - sin(difference),
        (TrigKind::Cos, TrigKind::Cos) => cos(sum) + cos(difference),
        (TrigKind::Sin, TrigKind::Sin) => cos(difference) - cos(sum),
        _ => unreachable!("only sines and cosines reach here"),
    };
    combined / Expression::integer(2)
}

/// `sin^2(u) = (1 - cos(2u))/2`, `cos^2(u) = (1 + cos(2u))/2`
fn power_reduction(data: &TrigData) -> Expression {
    let doubled = (Expression::integer(2) * data.inner.clone()).simplify();
    let cos_doubled = Expression::trig(TrigKind::Cos, doubled);
    let combined = match data.kind {
        TrigKind::Sin => Expression::one() - cos_doubled,
        TrigKind::Cos => Expression::one() + cos_doubled,
        _ => unreachable!("only sines and cosines reach here"),
    };
    combined / Expression::integer(2)
}

/// Every occurrence of the variable lies inside sin(x), cos(x) or tan(x)
fn check_trig_u_sub(tree: &Tree, node: NodeId) -> Option<Transform> {
    // substituting right after the inverse substitution would undo it
    if matches!(
        tree.last_heuristic_transform(node),
        Some(Transform::InverseTrigUSub { .. })
    ) {
        return None;
    }

    let expr = &tree.node(node).expr;
    let var = &tree.node(node).var;
    let var_expr = Expression::symbol(var.clone());

    for kind in [TrigKind::Sin, TrigKind::Cos, TrigKind::Tan] {
        let target = Expression::trig(kind, var_expr.clone());
        let occurrences = expr.count(&target);
        if occurrences >= 1 && occurrences == expr.count(&var_expr) {
            return Some(Transform::TrigUSub { kind });
        }
    }
    None
}

/// Two-factor integration by parts, with a direct solution when the
/// by-parts remainder is a constant multiple of the original integrand
fn check_by_parts(expr: &Expression, var: &Symbol) -> Option<Transform> {
    let var_expr = Expression::symbol(var.clone());

    let factors = match expr {
        Expression::Mul(factors) => factors,
        // bare log and inverse trig integrate by parts against dv = dx
        Expression::Log(data) if data.inner == var_expr && data.base == Expression::e() => {
            let du = expr.diff(var).ok()?;
            return Some(Transform::ByParts {
                u: expr.clone(),
                du,
                v: var_expr,
            });
        }
        Expression::Trig(data) if data.kind.is_inverse() && data.inner == var_expr => {
            let du = expr.diff(var).ok()?;
            return Some(Transform::ByParts {
                u: expr.clone(),
                du,
                v: var_expr,
            });
        }
        _ => return None,
    };
    if factors.len() != 2 {
        return None;
    }

    let try_pairing = |u: &Expression, dv: &Expression| -> Option<Transform> {
        let du = u.diff(var).ok()?.simplify();
        let v = table::lookup(dv, var)?;
        let remainder = (du.clone() * v.clone() * Expression::integer(-1)).simplify();
        let ratio = (remainder / expr.clone()).simplify();
        if ratio.is_one() {
            // -u'v equal to the integrand would only restate the problem
            return None;
        }
        Some(Transform::ByParts {
            u: u.clone(),
            du,
            v,
        })
    };

    try_pairing(&factors[0], &factors[1]).or_else(|| try_pairing(&factors[1], &factors[0]))
}

fn forward_by_parts(
    tree: &mut Tree,
    node: NodeId,
    expr: &Expression,
    var: &Symbol,
    u: &Expression,
    du: &Expression,
    v: &Expression,
) {
    let solved_part = (u.clone() * v.clone()).simplify();
    let remainder = (du.clone() * v.clone() * Expression::integer(-1)).simplify();
    let transform = Transform::ByParts {
        u: u.clone(),
        du: du.clone(),
        v: v.clone(),
    };

    // direct solve: the remainder is a constant multiple of the integrand
    let ratio = (remainder.clone() / expr.clone()).simplify();
    if !ratio.contains(var) {
        let solution = (solved_part.clone()
            / (Expression::one() - ratio).simplify())
        .simplify();
        tree.add_solution_child(node, expr.clone(), var.clone(), transform, solution);
        return;
    }

    // self-referential closure one level deeper, as in exp times trig
    if let Some(solution) = chained_direct_solve(expr, &solved_part, &remainder, var) {
        tree.add_solution_child(node, expr.clone(), var.clone(), transform, solution);
        return;
    }

    // uv is settled; the remainder integral is a new subproblem
    let compound = tree.add_child(node, expr.clone(), var.clone(), transform);
    tree.node_mut(compound).kind = NodeKind::And;
    tree.add_solution_child(
        compound,
        expr.clone(),
        var.clone(),
        Transform::Additivity,
        solved_part,
    );
    tree.add_child(compound, remainder, var.clone(), Transform::Additivity);
}

/// Apply by parts a second time to the remainder and close the loop when
/// the new remainder is a constant multiple of the original integrand
fn chained_direct_solve(
    original: &Expression,
    first_part: &Expression,
    remainder: &Expression,
    var: &Symbol,
) -> Option<Expression> {
    let (coefficient, factors) = deconstruct_product(remainder);
    if factors.len() != 2 {
        return None;
    }
    let scale = Expression::Number(coefficient);

    for (u, dv) in [
        (&factors[0], &factors[1]),
        (&factors[1], &factors[0]),
    ] {
        let Ok(du) = u.diff(var) else { continue };
        let Some(v) = table::lookup(dv, var) else {
            continue;
        };
        let second_part = (scale.clone() * u.clone() * v.clone()).simplify();
        let second_remainder = (scale.clone()
            * du.simplify()
            * v
            * Expression::integer(-1))
        .simplify();
        let ratio = (second_remainder / original.clone()).simplify();
        if ratio.contains(var) || ratio.is_one() {
            continue;
        }
        let total = (first_part.clone() + second_part).simplify();
        let solution = (total / (Expression::one() - ratio).simplify()).simplify();
        return Some(solution);
    }
    None
}

/// Rewrite all trig functions through (sin, cos), (tan, csc) and (cot, sec)
fn check_rewrite_trig(tree: &Tree, node: NodeId) -> Option<Transform> {
    if matches!(
        tree.last_heuristic_transform(node),
        Some(Transform::RewriteTrig)
    ) {
        return None;
    }

    fn contains_direct_trig(expr: &Expression) -> bool {
        match expr {
            Expression::Trig(data) if !data.kind.is_inverse() => true,
            _ => expr.children().iter().any(|child| contains_direct_trig(child)),
        }
    }

    contains_direct_trig(&tree.node(node).expr).then_some(Transform::RewriteTrig)
}

fn forward_rewrite_trig(tree: &mut Tree, node: NodeId, expr: &Expression, var: &Symbol) {
    let sin = |e: Expression| Expression::trig(TrigKind::Sin, e);
    let cos = |e: Expression| Expression::trig(TrigKind::Cos, e);
    let tan = |e: Expression| Expression::trig(TrigKind::Tan, e);
    let sec = |e: Expression| Expression::trig(TrigKind::Sec, e);
    let csc = |e: Expression| Expression::trig(TrigKind::Csc, e);
    let cot = |e: Expression| Expression::trig(TrigKind::Cot, e);

    let in_sin_cos = replace_trig_functions(expr, &|data: &TrigData| {
        let inner = data.inner.clone();
        match data.kind {
            TrigKind::Tan => Some(sin(inner.clone()) / cos(inner)),
            TrigKind::Csc => Some(Expression::one() / sin(inner)),
            TrigKind::Cot => Some(cos(inner.clone()) / sin(inner)),
            TrigKind::Sec => Some(Expression::one() / cos(inner)),
            _ => None,
        }
    })
    .simplify();

    let in_tan_csc = replace_trig_functions(expr, &|data: &TrigData| {
        let inner = data.inner.clone();
        match data.kind {
            TrigKind::Sin => Some(Expression::one() / csc(inner)),
            TrigKind::Cos => {
                Some(Expression::one() / tan(inner.clone()) / csc(inner))
            }
            TrigKind::Cot => Some(Expression::one() / tan(inner)),
            TrigKind::Sec => Some(tan(inner.clone()) * csc(inner)),
            _ => None,
        }
    })
    .simplify();

    let in_cot_sec = replace_trig_functions(expr, &|data: &TrigData| {
        let inner = data.inner.clone();
        match data.kind {
            TrigKind::Sin => {
                Some(Expression::one() / cot(inner.clone()) / sec(inner))
            }
            TrigKind::Cos => Some(Expression::one() / sec(inner)),
            TrigKind::Tan => Some(Expression::one() / cot(inner)),
            TrigKind::Csc => Some(cot(inner.clone()) * sec(inner)),
            _ => None,
        }
    })
    .simplify();

    for rewritten in [in_sin_cos, in_tan_csc, in_cot_sec] {
        if rewritten != *expr {
            tree.add_child(node, rewritten, var.clone(), Transform::RewriteTrig);
        }
    }
}

/// The integrand mentions `1 - x^2` or `1 + x^2`: substitute x = sin(u) or
/// x = tan(u)
fn check_inverse_trig_u_sub(tree: &Tree, node: NodeId) -> Option<Transform> {
    // undoing a trig substitution would loop
    if matches!(
        tree.last_heuristic_transform(node),
        Some(Transform::TrigUSub { .. })
    ) {
        return None;
    }

    let expr = &tree.node(node).expr;
    let var = &tree.node(node).var;
    let var_expr = Expression::symbol(var.clone());
    let square = Expression::pow(var_expr, Expression::integer(2));

    for (kind, query) in [
        (
            TrigKind::Sin,
            (Expression::one() - square.clone()).simplify(),
        ),
        (
            TrigKind::Tan,
            (Expression::one() + square.clone()).simplify(),
        ),
    ] {
        let negated = (-query.clone()).simplify();
        if expr.count(&query) > 0 || expr.count(&negated) > 0 {
            return Some(Transform::InverseTrigUSub { kind });
        }
    }
    None
}

/// A factor has a table antiderivative u and every other use of the
/// variable is inside a copy of u
fn check_generic_u_sub(expr: &Expression, var: &Symbol) -> Option<Transform> {
    let factors = match expr {
        Expression::Mul(factors) => factors,
        _ => return None,
    };
    let var_expr = Expression::symbol(var.clone());

    for (i, factor) in factors.iter().enumerate() {
        let Some(antiderivative) = table::lookup(factor, var) else {
            continue;
        };
        let substitution = strip_constant_factor(&antiderivative);
        let mut rest: Vec<Expression> = factors.as_ref().clone();
        rest.remove(i);
        let rest = product_from(rest);

        let inside = rest.count(&substitution);
        let var_in_substitution = substitution.count(&var_expr);
        if var_in_substitution == 0 {
            continue;
        }
        if inside * var_in_substitution == rest.count(&var_expr) && inside > 0 {
            return Some(Transform::GenericUSub { substitution });
        }
    }
    None
}

fn strip_constant_factor(expr: &Expression) -> Expression {
    match expr {
        Expression::Mul(factors) => product_from(
            factors
                .iter()
                .filter(|f| !matches!(f, Expression::Number(_)))
                .cloned()
                .collect(),
        ),
        _ => expr.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Symbol {
        Symbol::new("x")
    }

    fn sym() -> Expression {
        Expression::symbol(x())
    }

    fn sin_x() -> Expression {
        Expression::trig(TrigKind::Sin, sym())
    }

    fn cos_x() -> Expression {
        Expression::trig(TrigKind::Cos, sym())
    }

    #[test]
    fn test_polynomial_u_sub_detects_power_pairs() {
        // x * e^(x^2): u = x^2
        let x_squared = Expression::pow(sym(), Expression::integer(2));
        let expr = (sym() * Expression::pow(Expression::e(), x_squared.clone())).simplify();
        let transform = check_polynomial_u_sub(&expr, &x()).expect("fires");
        let Transform::PolynomialUSub { substitution } = transform else {
            panic!("wrong transform");
        };
        assert_eq!(substitution, x_squared);
    }

    #[test]
    fn test_polynomial_u_sub_needs_matching_occurrences() {
        // x * e^x has no x^2 anywhere else
        let expr = (sym() * Expression::pow(Expression::e(), sym())).simplify();
        assert!(check_polynomial_u_sub(&expr, &x()).is_none());
    }

    #[test]
    fn test_compound_angle_detection() {
        let inner = (sym() + Expression::symbol("y")).simplify();
        let expr = Expression::trig(TrigKind::Sin, inner);
        assert!(check_compound_angle(&expr).is_some());
        assert!(check_compound_angle(&sin_x()).is_none());
    }

    #[test]
    fn test_sin_u_sub_pairs_sine_and_cosine() {
        let expr = (sin_x() * cos_x()).simplify();
        let transform = check_sin_u_sub(&expr, &x()).expect("fires");
        let Transform::SinUSub { sine } = transform else {
            panic!("wrong transform");
        };
        assert_eq!(sine, sin_x());
    }

    #[test]
    fn test_trig_power_split_on_odd_powers() {
        // sin^2 * cos^3 splits the cos^3
        let expr = (Expression::pow(sin_x(), Expression::integer(2))
            * Expression::pow(cos_x(), Expression::integer(3)))
        .simplify();
        let transform = check_trig_power_split(&expr).expect("odd power found");
        let Transform::TrigPowerSplit { target, .. } = transform else {
            panic!("wrong transform");
        };
        assert_eq!(target, Expression::pow(cos_x(), Expression::integer(3)));
    }

    #[test]
    fn test_trig_power_split_ignores_even_powers() {
        let expr = Expression::pow(sin_x(), Expression::integer(4));
        assert!(check_trig_power_split(&expr).is_none());
    }

    #[test]
    fn test_product_to_sum_even_power() {
        let expr = Expression::pow(sin_x(), Expression::integer(4));
        let transform = check_product_to_sum(&expr).expect("fires");
        let Transform::ProductToSum { replacement, .. } = transform else {
            panic!("wrong transform");
        };
        // ((1 - cos(2x))/2)^2
        assert!(replacement.count(&Expression::trig(
            TrigKind::Cos,
            (Expression::integer(2) * sym()).simplify()
        )) >= 1);
    }

    #[test]
    fn test_trig_u_sub_counts_occurrences() {
        // tan(x) as 1/cos * sin would not fire; tan(x)^2 * something(tan) does
        let tan_x = Expression::trig(TrigKind::Tan, sym());
        let expr = (Expression::pow(tan_x.clone(), Expression::integer(2))
            * (tan_x.clone() + Expression::one()))
        .simplify();
        let (tree, root) = Tree::new(expr, x());
        let transform = check_trig_u_sub(&tree, root).expect("fires");
        assert!(matches!(transform, Transform::TrigUSub { kind: TrigKind::Tan }));
    }

    #[test]
    fn test_by_parts_picks_algebraic_u() {
        // x * cos(x): u = x, dv = cos
        let expr = (sym() * cos_x()).simplify();
        let transform = check_by_parts(&expr, &x()).expect("fires");
        let Transform::ByParts { u, v, .. } = transform else {
            panic!("wrong transform");
        };
        assert_eq!(u, sym());
        assert_eq!(v, sin_x());
    }

    #[test]
    fn test_by_parts_direct_solve_for_exponential_trig() {
        // e^x sin(x) closes after two applications
        let expr = (Expression::pow(Expression::e(), sym()) * sin_x()).simplify();
        let transform = check_by_parts(&expr, &x()).expect("fires");
        let (mut tree, root) = Tree::new(expr.clone(), x());
        transform.forward(&mut tree, root);

        let child = tree.node(root).children[0];
        assert_eq!(tree.node(child).kind, NodeKind::Solution);
        let solution = tree.node(child).solution.clone().expect("direct solve");
        // e^x (sin x - cos x) / 2
        let expected = ((Expression::pow(Expression::e(), sym()) * sin_x()
            - Expression::pow(Expression::e(), sym()) * cos_x())
            / Expression::integer(2))
        .simplify();
        assert_eq!(solution, expected);
    }

    #[test]
    fn test_by_parts_on_bare_log() {
        let expr = Expression::log(sym());
        let transform = check_by_parts(&expr, &x()).expect("fires");
        let Transform::ByParts { u, v, .. } = transform else {
            panic!("wrong transform");
        };
        assert_eq!(u, Expression::log(sym()));
        assert_eq!(v, sym());
    }

    #[test]
    fn test_rewrite_trig_produces_alternatives() {
        let tan_x = Expression::trig(TrigKind::Tan, sym());
        let (mut tree, root) = Tree::new(tan_x, x());
        let transform = check_rewrite_trig(&tree, root).expect("fires");
        transform.forward(&mut tree, root);
        // sin/cos differs from tan; the tan/csc rendering is identical, the
        // cot/sec one differs
        assert!(!tree.node(root).children.is_empty());
        for &child in &tree.node(root).children {
            assert_ne!(tree.node(child).expr, tree.node(root).expr);
        }
    }

    #[test]
    fn test_rewrite_trig_blocked_by_ancestor() {
        let tan_x = Expression::trig(TrigKind::Tan, sym());
        let (mut tree, root) = Tree::new(tan_x.clone(), x());
        let child = tree.add_child(root, tan_x, x(), Transform::RewriteTrig);
        assert!(check_rewrite_trig(&tree, child).is_none());
    }

    #[test]
    fn test_inverse_trig_u_sub_detects_quadratics() {
        // 1/sqrt(1 - x^2)
        let query = (Expression::one()
            - Expression::pow(sym(), Expression::integer(2)))
        .simplify();
        let expr = Expression::pow(query, Expression::rational(-1, 2));
        let (tree, root) = Tree::new(expr, x());
        let transform = check_inverse_trig_u_sub(&tree, root).expect("fires");
        assert!(matches!(
            transform,
            Transform::InverseTrigUSub { kind: TrigKind::Sin }
        ));
    }

    #[test]
    fn test_generic_u_sub_exponential_fraction() {
        // e^x / (1 + e^x): u = e^x
        let exp_x = Expression::pow(Expression::e(), sym());
        let expr = (exp_x.clone() / (Expression::one() + exp_x.clone())).simplify();
        let transform = check_generic_u_sub(&expr, &x()).expect("fires");
        let Transform::GenericUSub { substitution } = transform else {
            panic!("wrong transform");
        };
        assert_eq!(substitution, exp_x);
    }

    #[test]
    fn test_generic_u_sub_sine_powers() {
        // sin^2(x) * cos(x): u = sin(x)
        let expr = (Expression::pow(sin_x(), Expression::integer(2)) * cos_x()).simplify();
        let transform = check_generic_u_sub(&expr, &x()).expect("fires");
        let Transform::GenericUSub { substitution } = transform else {
            panic!("wrong transform");
        };
        assert_eq!(substitution, sin_x());
    }
}
