//! Expression binder
//!
//! Lowers template expressions to output expressions. Identifiers naming a component property
//! become placeholders registered in the active scope; loop locals stay plain identifiers.

use crate::codegen::CodegenContext;
use crate::ir::expression::TemplateExpression;
use crate::ir::PrimitiveValue;
use crate::output::output_ast::{self as o, literal, null_expr, variable, Expression};
use tracing::trace;

impl CodegenContext<'_> {
    pub fn bind_expression(&mut self, expr: &TemplateExpression) -> Expression {
        match expr {
            TemplateExpression::Identifier(id) => self.bind_identifier(&id.name),
            // Property names of a member access are never rewritten; only the leftmost
            // identifier of the chain is.
            TemplateExpression::Member(member) => {
                self.bind_expression(&member.object).prop(member.property.as_str())
            }
            TemplateExpression::Keyed(keyed) => {
                let object = self.bind_expression(&keyed.object);
                let key = self.bind_expression(&keyed.key);
                object.key(key)
            }
            TemplateExpression::Literal(lit) => match &lit.value {
                PrimitiveValue::Null => null_expr(),
                PrimitiveValue::Bool(b) => literal(*b),
                PrimitiveValue::Number(n) => literal(*n),
                PrimitiveValue::String(s) => literal(s.as_str()),
            },
        }
    }

    fn bind_identifier(&mut self, name: &str) -> Expression {
        if self.is_local(name) {
            return variable(name);
        }
        let usage = self.scopes.reference(name);
        trace!(property = name, usage = usage.0, "bind property");
        Expression::PropertyRef(o::PropertyRefExpr {
            usage,
            name: name.to_string(),
        })
    }
}
