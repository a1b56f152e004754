//! Minimiser benchmarks: the equivalence oracle on permutation-heavy
//! clauses, and the full driver on a merge-heavy program.
//!
//! Run with: cargo bench

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};

use parfait_ast::{
    Argument, Atom, Attribute, AttributeType, Clause, Literal, Program, Relation, TranslationUnit,
};
use parfait_transform::{are_bijectively_equivalent, minimise};

fn var(name: String) -> Argument {
    Argument::Variable(name)
}

fn step(from: String, to: String) -> Literal {
    Literal::Atom(Atom::new("step", vec![var(from), var(to)]))
}

// ─── Bijective equivalence ──────────────────────────────────────────

/// `r(v0, vn) :- step(v0, v1), ..., step(vn-1, vn).` Every body atom
/// shares a name, so the permutation search has no name-based pruning.
fn chain_clause(n: usize, prefix: &str) -> Clause {
    let head = Atom::new("r", vec![var(format!("{prefix}0")), var(format!("{prefix}{n}"))]);
    let body = (0..n)
        .map(|i| step(format!("{prefix}{i}"), format!("{prefix}{}", i + 1)))
        .collect();
    Clause::new(head, body)
}

/// The same chain renamed and with its body reversed.
fn reversed_chain_clause(n: usize, prefix: &str) -> Clause {
    let mut clause = chain_clause(n, prefix);
    clause.body.reverse();
    clause
}

fn bench_equivalence(c: &mut Criterion) {
    let mut group = c.benchmark_group("bijective_equivalence");

    for &n in &[4usize, 6, 8] {
        let left = chain_clause(n, "v");
        let right = reversed_chain_clause(n, "u");
        assert!(are_bijectively_equivalent(&left, &right));

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| are_bijectively_equivalent(&left, &right));
        });
    }

    group.finish();
}

// ─── Full driver ────────────────────────────────────────────────────

/// A program with `count` singleton relations that all collapse onto the
/// first, plus duplicated body literals to keep every sub-pass busy.
fn merge_heavy_unit(count: usize) -> TranslationUnit {
    let mut program = Program::new();
    program.add_relation(Relation::new(
        "edge",
        vec![
            Attribute::new("from", AttributeType::Number),
            Attribute::new("to", AttributeType::Number),
        ],
    ));

    for i in 0..count {
        let name = format!("view{i}");
        program.add_relation(Relation::new(
            name.as_str(),
            vec![
                Attribute::new("from", AttributeType::Number),
                Attribute::new("to", AttributeType::Number),
            ],
        ));
        program.add_clause(Clause::new(
            Atom::new(name.as_str(), vec![var("x".to_string()), var("y".to_string())]),
            vec![
                Literal::Atom(Atom::new("edge", vec![var("x".to_string()), var("y".to_string())])),
                Literal::Atom(Atom::new("edge", vec![var("x".to_string()), var("y".to_string())])),
            ],
        ));
    }

    TranslationUnit::new(program)
}

fn bench_minimise(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimise");

    for &count in &[8usize, 16, 32] {
        let unit = merge_heavy_unit(count);

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter_batched(
                || unit.clone(),
                |mut unit| minimise(&mut unit),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_equivalence, bench_minimise);
criterion_main!(benches);
