//! JavaScript Emitter Module
//!
//! Prints a whole program: top-level layout on top of the shared expression and statement
//! printing of [`AbstractEmitterVisitor`].

use crate::output::abstract_emitter::{AbstractEmitterVisitor, EmitterVisitorContext};
use crate::output::output_ast as o;

#[derive(Debug, Default)]
pub struct AbstractJsEmitterVisitor {
    base: AbstractEmitterVisitor,
}

impl AbstractJsEmitterVisitor {
    pub fn new() -> Self {
        AbstractJsEmitterVisitor {
            base: AbstractEmitterVisitor::new(),
        }
    }

    /// Top-level statements are printed one after the other, with a blank line closing the
    /// import block and after every top-level function declaration.
    pub fn visit_all_statements(&mut self, statements: &[o::Statement], ctx: &mut EmitterVisitorContext) {
        for (i, statement) in statements.iter().enumerate() {
            statement.visit_statement(&mut self.base, ctx);
            let next = statements.get(i + 1);
            let closes_imports = matches!(statement, o::Statement::ImportDefault(_))
                && !matches!(next, Some(o::Statement::ImportDefault(_)));
            let after_fn = matches!(statement, o::Statement::DeclareFn(_));
            if next.is_some() && (closes_imports || after_fn) {
                ctx.println("");
            }
        }
    }

    pub fn emit_statements(&mut self, statements: &[o::Statement]) -> String {
        let mut ctx = EmitterVisitorContext::create_root();
        self.visit_all_statements(statements, &mut ctx);
        ctx.to_source()
    }

    pub fn emit_expression(&mut self, expr: &o::Expression) -> String {
        let mut ctx = EmitterVisitorContext::create_root();
        expr.visit_expression(&mut self.base, &mut ctx);
        ctx.to_source()
    }
}
