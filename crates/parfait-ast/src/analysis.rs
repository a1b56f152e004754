//! The translation unit wrapper and program analyses.

use rustc_hash::FxHashSet;

use crate::ast::{Program, QualifiedName};

/// A program together with its analyses.
///
/// Transform passes receive a mutable translation unit, query analyses
/// through it, and mutate the program through [`program_mut`].
///
/// [`program_mut`]: TranslationUnit::program_mut
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationUnit {
    program: Program,
}

impl TranslationUnit {
    pub fn new(program: Program) -> Self {
        TranslationUnit { program }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn program_mut(&mut self) -> &mut Program {
        &mut self.program
    }

    /// The I/O-kind analysis for the current program state. Recomputed on
    /// every call; callers run it once per pass and keep the result.
    pub fn io_types(&self) -> IoTypes {
        IoTypes::analyse(&self.program)
    }
}

/// Which relations sit at the program boundary.
///
/// A relation is I/O when any input, output or printsize directive names
/// it. Such relations are externally observable and must keep their name
/// and declaration.
#[derive(Debug, Clone, Default)]
pub struct IoTypes {
    io: FxHashSet<QualifiedName>,
}

impl IoTypes {
    pub fn analyse(program: &Program) -> Self {
        let mut io = FxHashSet::default();
        for directive in &program.directives {
            io.insert(directive.relation.clone());
        }
        IoTypes { io }
    }

    pub fn is_io(&self, name: &QualifiedName) -> bool {
        self.io.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Attribute, AttributeType, Directive, DirectiveKind, Relation};

    fn declared(name: &str) -> Relation {
        Relation::new(name, vec![Attribute::new("x", AttributeType::Number)])
    }

    #[test]
    fn directives_mark_relations_as_io() {
        let mut program = Program::new();
        program.add_relation(declared("edge"));
        program.add_relation(declared("path"));
        program.add_relation(declared("scratch"));
        program.add_directive(Directive::new(DirectiveKind::Input, "edge"));
        program.add_directive(Directive::new(DirectiveKind::Output, "path"));

        let io = IoTypes::analyse(&program);
        assert!(io.is_io(&"edge".into()));
        assert!(io.is_io(&"path".into()));
        assert!(!io.is_io(&"scratch".into()));
    }

    #[test]
    fn analysis_tracks_program_mutation() {
        let mut unit = TranslationUnit::new(Program::new());
        assert!(!unit.io_types().is_io(&"t".into()));

        unit.program_mut().add_directive(Directive::new(DirectiveKind::Printsize, "t"));
        assert!(unit.io_types().is_io(&"t".into()));
    }
}
