//! Render function assembly
//!
//! Wraps the root expression into `function tmpl($api, $cmp, $slotset, $ctx)` and lays out the
//! program for the configured output format.

use crate::codegen::flatten::FlattenedScopes;
use crate::codegen::identifiers::{
    API_PARAM, COMPONENT_PARAM, CONTEXT_PARAM, SLOTS_PROP, SLOT_SET_PARAM,
    STYLESHEETS_PROP,
};
use crate::codegen::CodegenOutput;
use crate::config::{CompilerConfig, OutputFormat};
use crate::output::output_ast::{
    binding, destructure, fn_param, literal, literal_arr, return_stmt, variable,
    DeclareFunctionStmt, ExportDefaultStmt, Expression, ImportDefaultStmt, Statement,
};

/// Body of the render function, in order: primitives from the API, root hoisted properties,
/// helper declarations, slot locals, memoized handler slots, then the return.
pub fn render_function(
    root: Expression,
    output: &CodegenOutput,
    mut flattened: FlattenedScopes,
    config: &CompilerConfig,
) -> DeclareFunctionStmt {
    let mut statements = Vec::new();

    if !output.primitives.is_empty() {
        let bindings = output
            .primitives
            .iter()
            .map(|p| binding(p.api_key(), p.local_name()))
            .collect();
        statements.push(destructure(bindings, variable(API_PARAM)));
    }

    statements.extend(flattened.root_hoist.take());
    statements.append(&mut flattened.helpers);

    if !output.slots.is_empty() {
        let bindings = output
            .slots
            .iter()
            .map(|(name, local)| binding(name.as_str(), local.as_str()))
            .collect();
        statements.push(destructure(bindings, variable(SLOT_SET_PARAM)));
    }

    if !output.memos.is_empty() {
        let bindings = output
            .memos
            .iter()
            .map(|memo| binding(memo.as_str(), memo.as_str()))
            .collect();
        statements.push(destructure(bindings, variable(CONTEXT_PARAM)));
    }

    statements.push(return_stmt(root));

    for stmt in &mut statements {
        flattened.resolve_statement(stmt);
    }

    DeclareFunctionStmt {
        name: config.name.clone(),
        params: [API_PARAM, COMPONENT_PARAM, SLOT_SET_PARAM, CONTEXT_PARAM]
            .into_iter()
            .map(fn_param)
            .collect(),
        statements,
    }
}

/// Full program: component imports (module format only), the render function, the default
/// export (module format only) and the attributes set on the function.
pub fn program(
    render_fn: DeclareFunctionStmt,
    output: &CodegenOutput,
    config: &CompilerConfig,
) -> Vec<Statement> {
    let mut program = Vec::new();
    let name = render_fn.name.clone();

    if config.format == OutputFormat::Module {
        program.extend(output.components.iter().map(|component| {
            Statement::ImportDefault(ImportDefaultStmt {
                local: component.local.clone(),
                source: component.source.clone(),
            })
        }));
    }

    program.push(Statement::DeclareFn(render_fn));

    if config.format == OutputFormat::Module {
        program.push(Statement::ExportDefault(ExportDefaultStmt {
            expr: Box::new(variable(name.as_str())),
        }));
    }

    program.push(
        variable(name.as_str())
            .set_prop(STYLESHEETS_PROP, literal_arr(Vec::new()))
            .into_stmt(),
    );
    if !output.slots.is_empty() {
        let slots = output.slots.keys().map(|slot| literal(slot.as_str())).collect();
        program.push(
            variable(name.as_str())
                .set_prop(SLOTS_PROP, literal_arr(slots))
                .into_stmt(),
        );
    }

    program
}
