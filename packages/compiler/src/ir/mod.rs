//! Template IR consumed by the code generator.

pub mod ast;
pub mod expression;

pub use ast::*;
pub use expression::{PrimitiveValue, TemplateExpression};
