//! AST types, traversal and analyses for parfait Datalog programs.
//!
//! Nodes are owned values with structural equality, so passes can clone,
//! compare and rewrite freely.
//!
//! # Example
//!
//! ```
//! use parfait_ast::{Argument, Atom, Clause, Literal};
//!
//! let head = Atom::new("path", vec![
//!     Argument::Variable("x".to_string()),
//!     Argument::Variable("y".to_string()),
//! ]);
//! let body = vec![Literal::Atom(Atom::new("edge", vec![
//!     Argument::Variable("x".to_string()),
//!     Argument::Variable("y".to_string()),
//! ]))];
//!
//! let clause = Clause::new(head, body);
//! assert_eq!(clause.to_string(), "path(x, y) :- edge(x, y).");
//! ```

pub mod analysis;
pub mod ast;
pub mod visit;

pub use analysis::{IoTypes, TranslationUnit};
pub use ast::{
    Argument, Atom, Attribute, AttributeType, Clause, Constraint, ConstraintOp, Directive,
    DirectiveKind, Literal, Number, OrderedF64, Program, QualifiedName, Relation,
};
