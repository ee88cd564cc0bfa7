//! Compiler entry points
//!
//! Runs the whole pipeline over one template IR: validation, the transform walk, scope flattening,
//! render function assembly and emission.

use crate::codegen::assembly::{program, render_function};
use crate::codegen::flatten::flatten_scopes;
use crate::codegen::identifiers::Primitive;
use crate::codegen::validate::validate_template;
use crate::codegen::{CodegenContext, ComponentImport};
use crate::config::CompilerConfig;
use crate::error::Result;
use crate::ir::Node;
use crate::output::abstract_js_emitter::AbstractJsEmitterVisitor;
use crate::output::output_ast::{Expression, Statement};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Result of compiling one template.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledTemplate {
    /// Generated JavaScript source.
    pub code: String,
    #[serde(skip)]
    pub program: Vec<Statement>,
    /// Render primitives the generated code destructures from the API, in first-use order.
    pub primitives: Vec<Primitive>,
    /// Slot names the template renders.
    pub slots: Vec<String>,
    pub components: Vec<ComponentImport>,
    pub stylesheets: Vec<String>,
    pub static_content_optimization: bool,
}

pub fn compile_template(root: &Node, config: &CompilerConfig) -> Result<CompiledTemplate> {
    debug!(name = %config.name, format = ?config.format, "compiling template");

    validate_template(root)?;

    let mut ctx = CodegenContext::new(config);
    let root_expr = ctx.transform_root(root)?;
    let (scopes, output) = ctx.finish();
    let scope_count = scopes.len();

    let flattened = flatten_scopes(scopes);
    let hoisted = flattened.hoisted_count();
    let render_fn = render_function(root_expr, &output, flattened, config);
    let statements = program(render_fn, &output, config);
    debug_assert_eq!(placeholder_count(&statements), 0, "unresolved property reads");
    let code = AbstractJsEmitterVisitor::new().emit_statements(&statements);

    debug!(
        name = %config.name,
        primitives = output.primitives.len(),
        scopes = scope_count,
        hoisted,
        "compiled template"
    );

    Ok(CompiledTemplate {
        code,
        program: statements,
        primitives: output.primitives.into_iter().collect(),
        slots: output.slots.into_keys().collect(),
        components: output.components,
        stylesheets: Vec::new(),
        static_content_optimization: config.enable_static_content_optimization,
    })
}

/// Compiles a template IR serialized as JSON.
pub fn compile_json(ir: &str, config: &CompilerConfig) -> Result<CompiledTemplate> {
    let root: Node = serde_json::from_str(ir)?;
    compile_template(&root, config)
}

/// Compiles independent templates in parallel. Results keep the order of `roots`.
pub fn compile_templates(roots: &[Node], config: &CompilerConfig) -> Vec<Result<CompiledTemplate>> {
    roots
        .par_iter()
        .map(|root| compile_template(root, config))
        .collect()
}

fn placeholder_count(statements: &[Statement]) -> usize {
    let mut count = 0;
    for stmt in statements {
        stmt.walk_expressions(&mut |expr| {
            if matches!(expr, Expression::PropertyRef(_)) {
                count += 1;
            }
        });
    }
    count
}
