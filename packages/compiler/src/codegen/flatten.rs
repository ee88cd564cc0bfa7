//! Scope flattening
//!
//! Walks the scope tree top-down and decides, for every property usage, where the property is
//! read:
//!
//! 1. an ancestor already hoisted it: reuse the ancestor's local;
//! 2. it is read more than once in the scope, or also read in a descendant: destructure it from
//!    the component once, at the top of this scope;
//! 3. otherwise: read it off the component in place.
//!
//! Child helpers are declared right after the hoisting statement of their parent, in creation
//! order. Placeholders are rewritten afterwards by [`FlattenedScopes::resolve_statement`].

use crate::codegen::identifiers::COMPONENT_PARAM;
use crate::codegen::scope::{ScopeId, ScopeTree};
use crate::output::output_ast::{
    binding, destructure, variable, Expression, PropertyRefExpr, Statement,
};
use indexmap::{IndexMap, IndexSet};
use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Read through a destructured local.
    Local(String),
    /// Read directly off the component instance.
    Instance,
}

#[derive(Debug, Clone)]
pub struct FlattenedScopes {
    /// Properties destructured at the top of the render function.
    pub root_hoist: Option<Statement>,
    /// Helper declarations of the root scope's children, nested helpers included.
    pub helpers: Vec<Statement>,
    resolutions: Vec<Resolution>,
}

struct Dumped {
    hoist: Option<Statement>,
    helpers: Vec<Statement>,
}

pub fn flatten_scopes(mut tree: ScopeTree) -> FlattenedScopes {
    let aggregated = tree.aggregate_descendant_usage();
    let mut resolutions = vec![Resolution::Instance; tree.usage_count()];
    let root = dump_scope(
        &mut tree,
        ScopeId::ROOT,
        &IndexMap::new(),
        &aggregated,
        &mut resolutions,
    );
    FlattenedScopes {
        root_hoist: root.hoist,
        helpers: root.helpers,
        resolutions,
    }
}

fn dump_scope(
    tree: &mut ScopeTree,
    id: ScopeId,
    ancestor_aliases: &IndexMap<String, String>,
    aggregated: &[IndexSet<String>],
    resolutions: &mut [Resolution],
) -> Dumped {
    let mut aliases = ancestor_aliases.clone();
    let mut bindings = Vec::new();

    let scope = tree.scope(id);
    let children: Vec<ScopeId> = scope.children.to_vec();
    for usage_id in scope.usages() {
        let usage = tree.usage(usage_id);
        let resolution = if let Some(alias) = ancestor_aliases.get(&usage.name) {
            trace!(scope = id.0, property = %usage.name, alias = %alias, "inherited");
            Resolution::Local(alias.clone())
        } else if usage.occurrences > 1 || aggregated[id.0].contains(&usage.name) {
            trace!(scope = id.0, property = %usage.name, alias = %usage.alias, "hoisted");
            bindings.push(binding(usage.name.as_str(), usage.alias.as_str()));
            aliases.insert(usage.name.clone(), usage.alias.clone());
            Resolution::Local(usage.alias.clone())
        } else {
            trace!(scope = id.0, property = %usage.name, "direct");
            Resolution::Instance
        };
        resolutions[usage_id.0] = resolution;
    }

    let hoist = if bindings.is_empty() {
        None
    } else {
        Some(destructure(bindings, variable(COMPONENT_PARAM)))
    };

    let mut helpers = Vec::new();
    for child in children {
        let dumped = dump_scope(tree, child, &aliases, aggregated, resolutions);
        let mut statements: Vec<Statement> = dumped.hoist.into_iter().collect();
        statements.extend(dumped.helpers);
        match tree.take_main_fn(child) {
            Some(mut main_fn) => {
                statements.append(&mut main_fn.statements);
                main_fn.statements = statements;
                helpers.push(Statement::DeclareFn(main_fn));
            }
            None => helpers.extend(statements),
        }
    }

    Dumped { hoist, helpers }
}

impl FlattenedScopes {
    pub fn resolution(&self, reference: &PropertyRefExpr) -> Expression {
        match self.resolutions.get(reference.usage.0) {
            Some(Resolution::Local(alias)) => variable(alias.as_str()),
            _ => variable(COMPONENT_PARAM).prop(reference.name.as_str()),
        }
    }

    /// Rewrites every placeholder reachable from `stmt` to its resolved read.
    pub fn resolve_statement(&self, stmt: &mut Statement) {
        stmt.walk_expressions_mut(&mut |expr| self.resolve_in_place(expr));
    }

    pub fn resolve_expression(&self, expr: &mut Expression) {
        expr.walk_mut(&mut |e| self.resolve_in_place(e));
    }

    fn resolve_in_place(&self, expr: &mut Expression) {
        let replacement = match &*expr {
            Expression::PropertyRef(reference) => self.resolution(reference),
            _ => return,
        };
        *expr = replacement;
    }

    pub fn hoisted_count(&self) -> usize {
        self.resolutions
            .iter()
            .filter(|r| matches!(r, Resolution::Local(_)))
            .count()
    }
}
