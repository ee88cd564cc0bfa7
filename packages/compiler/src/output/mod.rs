//! Output Module
//!
//! JavaScript AST for generated render functions and the emitter printing it.

pub mod abstract_emitter;
pub mod abstract_js_emitter;
pub mod output_ast;
