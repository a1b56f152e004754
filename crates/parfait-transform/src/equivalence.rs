//! Bijective clause equivalence: equality of two clauses up to reordering
//! of body atoms and consistent renaming of variables.
//!
//! The check only admits plain positive clauses over variables and
//! primitive constants; anything else is conservatively reported as not
//! equivalent. Candidate atom pairings are pruned through a compatibility
//! matrix before the permutation search, so the factorial worst case only
//! bites when many body atoms share a relation name.

use parfait_ast::{Argument, Atom, Clause, Literal};
use parfait_ast::visit;
use rustc_hash::FxHashMap;

/// Check whether `left` and `right` compute the same set of tuples: some
/// reordering of `right`'s body slots and some bijection between the two
/// clauses' variable names make them syntactically identical.
///
/// Head relation names are deliberately not compared, so the check can be
/// used across relations as well as within one.
pub fn are_bijectively_equivalent(left: &Clause, right: &Clause) -> bool {
    if !is_admissible(left) || !is_admissible(right) {
        return false;
    }

    // equal clauses must agree on body length, head arity and the number
    // of distinct variables
    if left.body.len() != right.body.len() {
        return false;
    }
    if left.head.arity() != right.head.arity() {
        return false;
    }
    if visit::variable_names(left).len() != visit::variable_names(right).len() {
        return false;
    }

    let matrix = compatibility_matrix(left, right);
    extract_permutations(&matrix)
        .iter()
        .any(|permutation| has_renaming_witness(left, right, permutation))
}

/// Only plain positive clauses participate: every body literal must be an
/// atom, and every argument a named variable or a primitive constant.
fn is_admissible(clause: &Clause) -> bool {
    if !clause.body.iter().all(|literal| matches!(literal, Literal::Atom(_))) {
        return false;
    }

    let mut primitive = true;
    visit::visit_arguments(clause, &mut |arg| match arg {
        Argument::Variable(_)
        | Argument::StringConstant(_)
        | Argument::NumericConstant(_)
        | Argument::NilConstant => {}
        Argument::UnnamedVariable | Argument::Record(_) => primitive = false,
    });
    primitive
}

/// Build the `(n+1) x (n+1)` move matrix for two admissible clauses with
/// `n` body atoms each. Cell `(i, j)` says whether atom `i` of `left` may
/// occupy slot `j` of `right`: index 0 is the head, which pairs only with
/// the head; body atoms pair when their relation names match.
fn compatibility_matrix(left: &Clause, right: &Clause) -> Vec<Vec<bool>> {
    let size = left.body.len() + 1;
    let mut matrix = vec![vec![false; size]; size];

    matrix[0][0] = true;
    for (i, left_literal) in left.body.iter().enumerate() {
        for (j, right_literal) in right.body.iter().enumerate() {
            matrix[i + 1][j + 1] = body_atom(left_literal).name == body_atom(right_literal).name;
        }
    }
    matrix
}

fn body_atom(literal: &Literal) -> &Atom {
    literal.as_atom().expect("admissible clause bodies contain only atoms")
}

/// Extract all valid permutations from a square 0/1 move matrix: every
/// vector `perm` such that each `matrix[i][perm[i]]` holds and no column is
/// used twice. Results come in depth-first order; callers must not rely on
/// that order. An empty matrix yields a single empty permutation.
pub fn extract_permutations(matrix: &[Vec<bool>]) -> Vec<Vec<usize>> {
    let mut used = vec![false; matrix.len()];
    let mut current = Vec::with_capacity(matrix.len());
    let mut found = Vec::new();
    fill_position(matrix, &mut used, &mut current, &mut found);
    found
}

fn fill_position(
    matrix: &[Vec<bool>],
    used: &mut [bool],
    current: &mut Vec<usize>,
    found: &mut Vec<Vec<usize>>,
) {
    let row = current.len();
    if row == matrix.len() {
        found.push(current.clone());
        return;
    }

    for col in 0..matrix.len() {
        if matrix[row][col] && !used[col] {
            used[col] = true;
            current.push(col);
            fill_position(matrix, used, current, found);
            current.pop();
            used[col] = false;
        }
    }
}

/// Decide whether a consistent variable renaming turns the permuted `left`
/// into `right`, argument by argument across body and head.
///
/// The renaming is kept bijective: two left variables may not map to the
/// same right variable.
fn has_renaming_witness(left: &Clause, right: &Clause, permutation: &[usize]) -> bool {
    // The enumerator pairs left atom `i` with right slot `permutation[i]`;
    // the reorder routine wants "position `k` receives literal `order[k]`".
    // Invert once, dropping the head entry (`permutation[0]` is always 0).
    let mut order = vec![0; permutation.len() - 1];
    for (left_idx, &right_idx) in permutation.iter().enumerate().skip(1) {
        order[right_idx - 1] = left_idx - 1;
    }
    let reordered = left.reorder_body(&order);

    let left_atoms = reordered.body.iter().map(body_atom).chain([&reordered.head]);
    let right_atoms = right.body.iter().map(body_atom).chain([&right.head]);

    let mut renaming: FxHashMap<&str, &str> = FxHashMap::default();
    let mut inverse: FxHashMap<&str, &str> = FxHashMap::default();

    for (left_atom, right_atom) in left_atoms.zip(right_atoms) {
        assert_eq!(
            left_atom.arity(),
            right_atom.arity(),
            "atoms of relation {} disagree on arity",
            left_atom.name
        );

        for (left_arg, right_arg) in left_atom.args.iter().zip(&right_atom.args) {
            match (left_arg, right_arg) {
                (Argument::Variable(u), Argument::Variable(v)) => {
                    match renaming.get(u.as_str()) {
                        Some(&mapped) => {
                            if mapped != v.as_str() {
                                return false;
                            }
                        }
                        None => {
                            if inverse.contains_key(v.as_str()) {
                                return false;
                            }
                            renaming.insert(u.as_str(), v.as_str());
                            inverse.insert(v.as_str(), u.as_str());
                        }
                    }
                }
                (Argument::StringConstant(a), Argument::StringConstant(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (Argument::NumericConstant(a), Argument::NumericConstant(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (Argument::NilConstant, Argument::NilConstant) => {}
                _ => return false,
            }
        }
    }

    true
}
