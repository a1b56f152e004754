//! Depth-first traversal helpers over clauses and programs.

use rustc_hash::FxHashSet;

use crate::ast::{Argument, Atom, Clause, Literal, Program};

/// Visit every argument of the clause depth-first: head arguments first,
/// then each body literal's arguments, record fields after the record
/// itself.
pub fn visit_arguments<'a>(clause: &'a Clause, f: &mut impl FnMut(&'a Argument)) {
    visit_atom_arguments(&clause.head, f);
    for literal in &clause.body {
        match literal {
            Literal::Atom(atom) | Literal::Negation(atom) => visit_atom_arguments(atom, f),
            Literal::Constraint(constraint) => {
                visit_argument(&constraint.lhs, f);
                visit_argument(&constraint.rhs, f);
            }
        }
    }
}

fn visit_atom_arguments<'a>(atom: &'a Atom, f: &mut impl FnMut(&'a Argument)) {
    for arg in &atom.args {
        visit_argument(arg, f);
    }
}

fn visit_argument<'a>(arg: &'a Argument, f: &mut impl FnMut(&'a Argument)) {
    f(arg);
    if let Argument::Record(fields) = arg {
        for field in fields {
            visit_argument(field, f);
        }
    }
}

/// Visit the name of every named variable occurrence in the clause.
pub fn visit_variables<'a>(clause: &'a Clause, f: &mut impl FnMut(&'a str)) {
    visit_arguments(clause, &mut |arg| {
        if let Argument::Variable(name) = arg {
            f(name);
        }
    });
}

/// The set of distinct variable names occurring in the clause.
pub fn variable_names(clause: &Clause) -> FxHashSet<&str> {
    let mut names = FxHashSet::default();
    visit_variables(clause, &mut |name| {
        names.insert(name);
    });
    names
}

/// Apply `f` to every atom in the program: each clause's body atoms (both
/// positive and under negation) before its head, clauses in program order.
/// This is the rewrite hook used to rename relation references in place.
pub fn map_atoms(program: &mut Program, f: &mut impl FnMut(&mut Atom)) {
    for clause in &mut program.clauses {
        for literal in &mut clause.body {
            match literal {
                Literal::Atom(atom) | Literal::Negation(atom) => f(atom),
                Literal::Constraint(_) => {}
            }
        }
        f(&mut clause.head);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Constraint, ConstraintOp, Number, QualifiedName};

    fn var(name: &str) -> Argument {
        Argument::Variable(name.to_string())
    }

    #[test]
    fn visit_arguments_recurses_into_records() {
        let clause = Clause::new(
            Atom::new("r", vec![var("x")]),
            vec![Literal::Atom(Atom::new(
                "p",
                vec![Argument::Record(vec![var("y"), Argument::Record(vec![var("z")])])],
            ))],
        );

        let mut count = 0;
        visit_arguments(&clause, &mut |_| count += 1);
        // x, [y, [z]], y, [z], z
        assert_eq!(count, 5);
    }

    #[test]
    fn visit_arguments_covers_negations_and_constraints() {
        let clause = Clause::new(
            Atom::new("r", vec![var("x")]),
            vec![
                Literal::Negation(Atom::new("p", vec![var("x"), var("y")])),
                Literal::Constraint(Constraint::new(
                    ConstraintOp::Ne,
                    var("y"),
                    Argument::NumericConstant(Number::Int(0)),
                )),
            ],
        );

        assert_eq!(variable_names(&clause), ["x", "y"].into_iter().collect());
    }

    #[test]
    fn variable_names_ignores_unnamed_and_constants() {
        let clause = Clause::fact(Atom::new(
            "r",
            vec![
                var("x"),
                Argument::UnnamedVariable,
                Argument::StringConstant("x".to_string()),
                var("x"),
            ],
        ));
        assert_eq!(variable_names(&clause).len(), 1);
    }

    #[test]
    fn map_atoms_touches_heads_bodies_and_negations() {
        let mut program = Program::new();
        program.add_clause(Clause::new(
            Atom::new("a", vec![var("x")]),
            vec![
                Literal::Atom(Atom::new("b", vec![var("x")])),
                Literal::Negation(Atom::new("b", vec![var("x")])),
            ],
        ));

        let target = QualifiedName::from("b");
        map_atoms(&mut program, &mut |atom| {
            if atom.name == target {
                atom.name = "c".into();
            }
        });

        assert_eq!(program.clauses[0].to_string(), "a(x) :- c(x), !c(x).");
    }
}
