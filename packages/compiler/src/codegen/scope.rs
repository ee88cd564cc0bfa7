//! Scope Tree
//!
//! Lexical scopes mirroring the conditional and iteration helpers of a render function. Every
//! component property read inside the template is recorded as a usage of the scope that was
//! active when the read was bound; the flattening pass later decides where each read happens.
//!
//! Scopes live in an arena indexed by [`ScopeId`]. Ids are handed out in creation order, so a
//! child always has a larger id than its parent.

use crate::codegen::identifiers::HOIST_ALIAS_PREFIX;
use crate::error::{CompileError, Result};
use crate::output::output_ast::DeclareFunctionStmt;
use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub usize);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);
}

/// Index of a usage record. Placeholders in the output AST carry it until resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UsageId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyUsage {
    pub name: String,
    /// `$cv<scopeId>_<n>`, unique within the owning scope.
    pub alias: String,
    pub scope: ScopeId,
    pub occurrences: usize,
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub id: ScopeId,
    pub parent: Option<ScopeId>,
    pub children: SmallVec<[ScopeId; 4]>,
    /// Helper function owned by the scope. The root scope has none.
    pub main_fn: Option<DeclareFunctionStmt>,
    usages: IndexMap<String, UsageId>,
}

impl Scope {
    fn new(id: ScopeId, parent: Option<ScopeId>) -> Self {
        Scope {
            id,
            parent,
            children: SmallVec::new(),
            main_fn: None,
            usages: IndexMap::new(),
        }
    }

    /// Usage records of this scope in first-reference order.
    pub fn usages(&self) -> impl Iterator<Item = UsageId> + '_ {
        self.usages.values().copied()
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.usages.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    usages: Vec<PropertyUsage>,
    stack: Vec<ScopeId>,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    pub fn new() -> Self {
        ScopeTree {
            scopes: vec![Scope::new(ScopeId::ROOT, None)],
            usages: Vec::new(),
            stack: vec![ScopeId::ROOT],
        }
    }

    pub fn current(&self) -> ScopeId {
        self.stack.last().copied().unwrap_or(ScopeId::ROOT)
    }

    /// Opens a child of the current scope and makes it current.
    pub fn push(&mut self) -> ScopeId {
        let parent = self.current();
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope::new(id, Some(parent)));
        self.scopes[parent.0].children.push(id);
        self.stack.push(id);
        trace!(scope = id.0, parent = parent.0, "push scope");
        id
    }

    pub fn pop(&mut self) -> Result<ScopeId> {
        if self.stack.len() <= 1 {
            return Err(CompileError::PopRootScope);
        }
        let id = self.current();
        self.stack.pop();
        trace!(scope = id.0, "pop scope");
        Ok(id)
    }

    /// Records a read of `name` in the current scope. Reading the same property again in the
    /// same scope returns the same usage record.
    pub fn reference(&mut self, name: &str) -> UsageId {
        let scope_id = self.current();
        let scope = &mut self.scopes[scope_id.0];
        if let Some(&usage) = scope.usages.get(name) {
            self.usages[usage.0].occurrences += 1;
            return usage;
        }
        let usage = UsageId(self.usages.len());
        let alias = format!("{}{}_{}", HOIST_ALIAS_PREFIX, scope_id.0, scope.usages.len());
        scope.usages.insert(name.to_string(), usage);
        trace!(scope = scope_id.0, property = name, alias = %alias, "reference property");
        self.usages.push(PropertyUsage {
            name: name.to_string(),
            alias,
            scope: scope_id,
            occurrences: 1,
        });
        usage
    }

    pub fn set_main_fn(&mut self, id: ScopeId, main_fn: DeclareFunctionStmt) {
        self.scopes[id.0].main_fn = Some(main_fn);
    }

    pub fn take_main_fn(&mut self, id: ScopeId) -> Option<DeclareFunctionStmt> {
        self.scopes.get_mut(id.0).and_then(|scope| scope.main_fn.take())
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn usage(&self, id: UsageId) -> &PropertyUsage {
        &self.usages[id.0]
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn usage_count(&self) -> usize {
        self.usages.len()
    }

    /// For every scope, the properties read anywhere in its descendants (the scope itself
    /// excluded). Computed bottom-up in a single pass over the arena.
    pub fn aggregate_descendant_usage(&self) -> Vec<IndexSet<String>> {
        let mut aggregated: Vec<IndexSet<String>> = vec![IndexSet::new(); self.scopes.len()];
        for scope in self.scopes.iter().rev() {
            let Some(parent) = scope.parent else {
                continue;
            };
            let mut names: IndexSet<String> =
                scope.property_names().map(str::to_string).collect();
            names.extend(aggregated[scope.id.0].iter().cloned());
            aggregated[parent.0].extend(names);
        }
        aggregated
    }
}
