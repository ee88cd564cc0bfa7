#![deny(clippy::all)]

/*!
 * Template Compiler
 *
 * Turns a validated template IR into a JavaScript render function. Property reads of the
 * component instance are hoisted into destructured locals per scope.
 */

pub mod codegen;
pub mod compiler;
pub mod config;
pub mod error;
pub mod ir;
pub mod output;
pub mod parse_util;
pub mod schema;

// Re-exports
pub use compiler::{compile_json, compile_template, compile_templates, CompiledTemplate};
pub use config::{CompilerConfig, OutputFormat};
pub use error::{CompileError, Result};
pub use ir::{Element, ElementKind, Node};
