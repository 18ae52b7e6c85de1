//! Benchmarks for simplification and the integration search

use antiderive_core::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn simplify_polynomial(c: &mut Criterion) {
    let x = Expression::symbol("x");
    let expr = Expression::pow(
        Expression::add(vec![
            Expression::integer(2),
            Expression::mul(vec![Expression::integer(3), x]),
        ]),
        Expression::integer(6),
    );

    c.bench_function("simplify_binomial_power", |b| {
        b.iter(|| black_box(&expr).simplify())
    });
}

fn integrate_by_parts(c: &mut Criterion) {
    let x = Symbol::new("x");
    let integrand = Expression::mul(vec![
        Expression::symbol(x.clone()),
        cos(Expression::symbol(x.clone())),
    ])
    .simplify();

    c.bench_function("integrate_x_cos_x", |b| {
        b.iter(|| integrate(black_box(&integrand), &x).expect("solvable"))
    });
}

fn integrate_partial_fractions(c: &mut Criterion) {
    let x = Symbol::new("x");
    let sym = Expression::symbol(x.clone());
    let integrand = ((sym.clone() + Expression::integer(8))
        / (sym.clone() * (sym + Expression::integer(6))))
    .simplify();

    c.bench_function("integrate_partial_fractions", |b| {
        b.iter(|| integrate(black_box(&integrand), &x).expect("solvable"))
    });
}

criterion_group!(
    benches,
    simplify_polynomial,
    integrate_by_parts,
    integrate_partial_fractions
);
criterion_main!(benches);
