//! Program minimisation: four sub-passes that shrink a program without
//! changing the set of tuples it derives.
//!
//! The passes run once each, in a fixed order: body deduplication and
//! self-implication removal normalise clauses cheaply, local reduction
//! collapses equivalent clauses within a relation, and singleton
//! unification merges equivalent single-clause relations across the
//! program. A pass manager that wants a fixpoint calls [`minimise`] until
//! it reports no change.

use std::collections::BTreeMap;

use parfait_ast::{Clause, Literal, QualifiedName, TranslationUnit};
use parfait_ast::visit;
use rustc_hash::FxHashSet;

use crate::equivalence::are_bijectively_equivalent;

/// Run the four minimisation sub-passes once each. Returns whether any of
/// them changed the program.
pub fn minimise(unit: &mut TranslationUnit) -> bool {
    let mut changed = false;
    changed |= dedup_clause_bodies(unit);
    changed |= drop_self_implied_clauses(unit);
    changed |= reduce_local_equivalences(unit);
    changed |= unify_singleton_relations(unit);
    changed
}

/// Remove body literals that repeat an earlier literal of the same clause.
/// The first occurrence survives; heads are untouched.
pub fn dedup_clause_bodies(unit: &mut TranslationUnit) -> bool {
    let mut changed = false;

    for clause in &mut unit.program_mut().clauses {
        let before = clause.body.len();
        let mut kept: Vec<Literal> = Vec::with_capacity(before);
        for literal in clause.body.drain(..) {
            if !kept.contains(&literal) {
                kept.push(literal);
            }
        }
        changed |= kept.len() != before;
        clause.body = kept;
    }

    changed
}

/// Delete every clause whose head appears verbatim among its own body
/// literals. Such a clause only derives tuples that already hold, so it
/// contributes nothing to the fixpoint.
pub fn drop_self_implied_clauses(unit: &mut TranslationUnit) -> bool {
    let program = unit.program_mut();
    let before = program.clauses.len();

    program.clauses.retain(|clause| {
        !clause
            .body
            .iter()
            .any(|literal| matches!(literal, Literal::Atom(atom) if *atom == clause.head))
    });

    program.clauses.len() != before
}

/// Within each relation, partition the clauses into bijective-equivalence
/// classes and keep only the first clause of each class. Clauses that the
/// equivalence check does not admit form singleton classes and are never
/// deleted.
pub fn reduce_local_equivalences(unit: &mut TranslationUnit) -> bool {
    let program = unit.program_mut();
    let mut doomed: Vec<Clause> = Vec::new();

    for relation in &program.relations {
        let mut representatives: Vec<&Clause> = Vec::new();

        for clause in program.clauses_of(&relation.name) {
            let redundant = representatives
                .iter()
                .any(|rep| are_bijectively_equivalent(rep, clause));
            if redundant {
                doomed.push(clause.clone());
            } else {
                representatives.push(clause);
            }
        }
    }

    for clause in &doomed {
        program.remove_clause(clause);
    }

    !doomed.is_empty()
}

/// Merge non-I/O relations that have exactly one clause each when those
/// clauses are bijectively equivalent. The earliest such relation survives;
/// the others lose their clause and declaration, and every atom that
/// referenced them is rewritten to the survivor's name.
pub fn unify_singleton_relations(unit: &mut TranslationUnit) -> bool {
    let io_types = unit.io_types();
    let program = unit.program_mut();

    // the sole clause of every non-I/O singleton relation, program order
    let mut singletons: Vec<&Clause> = Vec::new();
    for relation in &program.relations {
        if io_types.is_io(&relation.name) {
            continue;
        }
        let mut clauses = program.clauses_of(&relation.name);
        if let (Some(sole), None) = (clauses.next(), clauses.next()) {
            singletons.push(sole);
        }
    }

    let mut redundant: FxHashSet<usize> = FxHashSet::default();
    let mut canonical: BTreeMap<QualifiedName, QualifiedName> = BTreeMap::new();

    for (i, &first) in singletons.iter().enumerate() {
        if redundant.contains(&i) {
            continue;
        }
        for (j, &second) in singletons.iter().enumerate().skip(i + 1) {
            if redundant.contains(&j) {
                continue;
            }
            if are_bijectively_equivalent(first, second) {
                redundant.insert(j);
                canonical.insert(second.head.name.clone(), first.head.name.clone());
            }
        }
    }

    // drop merged clauses and their relation declarations
    let doomed: Vec<Clause> = (0..singletons.len())
        .filter(|j| redundant.contains(j))
        .map(|j| singletons[j].clone())
        .collect();
    for clause in &doomed {
        let name = clause.head.name.clone();
        program.remove_clause(clause);
        program.remove_relation(&name);
    }

    // rewrite every reference to a merged relation to its canonical name
    if !canonical.is_empty() {
        visit::map_atoms(program, &mut |atom| {
            if let Some(name) = canonical.get(&atom.name) {
                atom.name = name.clone();
            }
        });
    }

    !canonical.is_empty()
}
