//! Core AST node types for parfait Datalog programs.
//!
//! Nodes are plain owned values: deep clone is `Clone`, deep structural
//! equality is `PartialEq`. `Display` renders surface syntax.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A relation identity: one or more dot-separated name segments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualifiedName {
    segments: Vec<String>,
}

impl QualifiedName {
    pub fn new(segments: Vec<String>) -> Self {
        assert!(!segments.is_empty(), "qualified name must have at least one segment");
        QualifiedName { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl From<&str> for QualifiedName {
    fn from(name: &str) -> Self {
        QualifiedName::new(name.split('.').map(str::to_owned).collect())
    }
}

impl From<String> for QualifiedName {
    fn from(name: String) -> Self {
        QualifiedName::from(name.as_str())
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Primitive attribute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Symbol,
    Number,
    Unsigned,
    Float,
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::Symbol => write!(f, "symbol"),
            AttributeType::Number => write!(f, "number"),
            AttributeType::Unsigned => write!(f, "unsigned"),
            AttributeType::Float => write!(f, "float"),
        }
    }
}

/// A typed column of a relation declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub ty: AttributeType,
}

impl Attribute {
    pub fn new(name: impl Into<String>, ty: AttributeType) -> Self {
        Attribute { name: name.into(), ty }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

/// A relation declaration. Identity is the qualified name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub name: QualifiedName,
    pub attributes: Vec<Attribute>,
}

impl Relation {
    pub fn new(name: impl Into<QualifiedName>, attributes: Vec<Attribute>) -> Self {
        Relation { name: name.into(), attributes }
    }

    pub fn arity(&self) -> usize {
        self.attributes.len()
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".decl {}(", self.name)?;
        for (i, attr) in self.attributes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{attr}")?;
        }
        write!(f, ")")
    }
}

/// Wrapper for `f64` constants that implements `Eq`, `Ord` and `Hash` via
/// total ordering.
#[derive(Debug, Clone, Copy)]
pub struct OrderedF64(pub f64);

impl PartialEq for OrderedF64 {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for OrderedF64 {}

impl Hash for OrderedF64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for OrderedF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for OrderedF64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A numeric constant value. Kinds are distinct: `Int(1)` and `Unsigned(1)`
/// do not compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Number {
    Int(i64),
    Unsigned(u64),
    Float(OrderedF64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(value) => write!(f, "{value}"),
            Number::Unsigned(value) => write!(f, "{value}"),
            Number::Float(value) => write!(f, "{value}"),
        }
    }
}

/// An argument position inside an atom, constraint or record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Argument {
    /// A named variable.
    Variable(String),
    /// The anonymous variable `_`.
    UnnamedVariable,
    /// A quoted string constant.
    StringConstant(String),
    /// A numeric constant with an explicit kind.
    NumericConstant(Number),
    /// The empty-record constant `nil`.
    NilConstant,
    /// A record constructor `[a, b, c]`.
    Record(Vec<Argument>),
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Variable(name) => write!(f, "{name}"),
            Argument::UnnamedVariable => write!(f, "_"),
            Argument::StringConstant(value) => write!(f, "\"{value}\""),
            Argument::NumericConstant(value) => write!(f, "{value}"),
            Argument::NilConstant => write!(f, "nil"),
            Argument::Record(fields) => {
                write!(f, "[")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{field}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// A relation name applied to an ordered argument list.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Atom {
    pub name: QualifiedName,
    pub args: Vec<Argument>,
}

impl Atom {
    pub fn new(name: impl Into<QualifiedName>, args: Vec<Argument>) -> Self {
        Atom { name: name.into(), args }
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}

/// Binary comparison operators usable in constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl fmt::Display for ConstraintOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintOp::Eq => write!(f, "="),
            ConstraintOp::Ne => write!(f, "!="),
            ConstraintOp::Lt => write!(f, "<"),
            ConstraintOp::Le => write!(f, "<="),
            ConstraintOp::Gt => write!(f, ">"),
            ConstraintOp::Ge => write!(f, ">="),
        }
    }
}

/// A binary comparison between two arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constraint {
    pub op: ConstraintOp,
    pub lhs: Argument,
    pub rhs: Argument,
}

impl Constraint {
    pub fn new(op: ConstraintOp, lhs: Argument, rhs: Argument) -> Self {
        Constraint { op, lhs, rhs }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op, self.rhs)
    }
}

/// A body literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    /// A positive atom: `edge(x, y)`.
    Atom(Atom),
    /// A negated atom: `!edge(x, y)`.
    Negation(Atom),
    /// A binary constraint: `x < y`.
    Constraint(Constraint),
}

impl Literal {
    /// The positive atom behind this literal, if it is one.
    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Literal::Atom(atom) => Some(atom),
            Literal::Negation(_) | Literal::Constraint(_) => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Atom(atom) => write!(f, "{atom}"),
            Literal::Negation(atom) => write!(f, "!{atom}"),
            Literal::Constraint(constraint) => write!(f, "{constraint}"),
        }
    }
}

/// A rule `head :- body.`, or a fact when the body is empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    pub head: Atom,
    pub body: Vec<Literal>,
}

impl Clause {
    pub fn new(head: Atom, body: Vec<Literal>) -> Self {
        Clause { head, body }
    }

    /// A clause with an empty body.
    pub fn fact(head: Atom) -> Self {
        Clause { head, body: Vec::new() }
    }

    /// Clone this clause with its body reordered: the literal at position
    /// `k` of the result is the literal at position `order[k]` of `self`.
    /// The head is untouched.
    ///
    /// Panics if `order` is not a permutation of `0..body.len()`.
    pub fn reorder_body(&self, order: &[usize]) -> Clause {
        assert_eq!(order.len(), self.body.len(), "reorder vector has wrong length");
        let mut used = vec![false; order.len()];
        for &src in order {
            assert!(src < order.len() && !used[src], "reorder vector is not a permutation");
            used[src] = true;
        }

        Clause {
            head: self.head.clone(),
            body: order.iter().map(|&src| self.body[src].clone()).collect(),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head)?;
        for (i, literal) in self.body.iter().enumerate() {
            write!(f, "{}{literal}", if i == 0 { " :- " } else { ", " })?;
        }
        write!(f, ".")
    }
}

/// The flavour of an I/O directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    Input,
    Output,
    Printsize,
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveKind::Input => write!(f, ".input"),
            DirectiveKind::Output => write!(f, ".output"),
            DirectiveKind::Printsize => write!(f, ".printsize"),
        }
    }
}

/// An I/O directive attaching a relation to the program boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Directive {
    pub kind: DirectiveKind,
    pub relation: QualifiedName,
}

impl Directive {
    pub fn new(kind: DirectiveKind, relation: impl Into<QualifiedName>) -> Self {
        Directive { kind, relation: relation.into() }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.relation)
    }
}

/// A whole Datalog program: relation declarations, I/O directives and
/// clauses, each in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub relations: Vec<Relation>,
    pub clauses: Vec<Clause>,
    pub directives: Vec<Directive>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    /// Look up a relation declaration by name.
    pub fn relation(&self, name: &QualifiedName) -> Option<&Relation> {
        self.relations.iter().find(|rel| rel.name == *name)
    }

    /// The clauses whose head belongs to `name`, in program order.
    pub fn clauses_of<'a>(&'a self, name: &'a QualifiedName) -> impl Iterator<Item = &'a Clause> {
        self.clauses.iter().filter(move |clause| clause.head.name == *name)
    }

    pub fn add_relation(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    pub fn add_directive(&mut self, directive: Directive) {
        self.directives.push(directive);
    }

    pub fn add_clause(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    /// Remove the first clause structurally equal to `clause`. Returns
    /// whether one was found.
    pub fn remove_clause(&mut self, clause: &Clause) -> bool {
        match self.clauses.iter().position(|c| c == clause) {
            Some(idx) => {
                self.clauses.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove a relation declaration and its directives. Clauses of the
    /// relation are untouched; callers remove those first.
    pub fn remove_relation(&mut self, name: &QualifiedName) -> bool {
        let declared = self.relations.len();
        self.relations.retain(|rel| rel.name != *name);
        self.directives.retain(|dir| dir.relation != *name);
        self.relations.len() != declared
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for relation in &self.relations {
            writeln!(f, "{relation}")?;
        }
        for directive in &self.directives {
            writeln!(f, "{directive}")?;
        }
        for clause in &self.clauses {
            writeln!(f, "{clause}")?;
        }
        Ok(())
    }
}
