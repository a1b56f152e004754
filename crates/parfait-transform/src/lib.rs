//! AST transformation passes for the parfait Datalog compiler.
//!
//! The crate currently ships one transform: program minimisation, which
//! removes semantically redundant clauses and relations while preserving
//! the set of derivable tuples.
//!
//! # Example
//!
//! ```
//! use parfait_ast::{
//!     Argument, Atom, Attribute, AttributeType, Clause, Literal, Program, Relation,
//!     TranslationUnit,
//! };
//! use parfait_transform::minimise;
//!
//! let var = |name: &str| Argument::Variable(name.to_string());
//!
//! let mut program = Program::new();
//! for name in ["a", "b", "p"] {
//!     program.add_relation(Relation::new(name, vec![Attribute::new("x", AttributeType::Number)]));
//! }
//! // a and b are singleton relations with equivalent clauses
//! program.add_clause(Clause::new(
//!     Atom::new("a", vec![var("x")]),
//!     vec![Literal::Atom(Atom::new("p", vec![var("x")]))],
//! ));
//! program.add_clause(Clause::new(
//!     Atom::new("b", vec![var("y")]),
//!     vec![Literal::Atom(Atom::new("p", vec![var("y")]))],
//! ));
//!
//! let mut unit = TranslationUnit::new(program);
//! assert!(minimise(&mut unit));
//! assert_eq!(unit.program().clauses.len(), 1);
//! assert!(unit.program().relation(&"b".into()).is_none());
//! ```

pub mod equivalence;
pub mod minimise;

pub use equivalence::are_bijectively_equivalent;
pub use minimise::minimise;
