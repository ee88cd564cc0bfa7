//! Render function code generation
//!
//! The walk over the template IR ([`transform`]) binds expressions ([`binder`]), emits primitive
//! calls ([`primitives`]) and builds the scope tree ([`scope`]). Once the walk is done the scope
//! tree is flattened ([`flatten`]) and the render function is assembled ([`assembly`]).

pub mod assembly;
pub mod attributes;
pub mod binder;
pub mod flatten;
pub mod identifiers;
pub mod primitives;
pub mod scope;
pub mod transform;
pub mod validate;

use crate::codegen::identifiers::{
    component_import_path, component_local_name, slot_local_name, Primitive, MEMO_PREFIX,
};
use crate::codegen::scope::ScopeTree;
use crate::config::CompilerConfig;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// A component constructor referenced by the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentImport {
    pub tag: String,
    pub local: String,
    pub source: String,
}

/// State of a single compilation. Created fresh for every template, so counters never leak
/// between compilations.
pub struct CodegenContext<'a> {
    pub config: &'a CompilerConfig,
    pub scopes: ScopeTree,
    locals: Vec<String>,
    key_counter: usize,
    memo_counter: usize,
    memos: Vec<String>,
    primitives: IndexSet<Primitive>,
    slots: IndexMap<String, String>,
    components: IndexMap<String, ComponentImport>,
}

/// What the walk collected besides the scope tree, handed over to assembly.
pub struct CodegenOutput {
    pub primitives: IndexSet<Primitive>,
    /// Slot name to slot-set local, in first-use order.
    pub slots: IndexMap<String, String>,
    pub components: Vec<ComponentImport>,
    /// Memoized handler locals destructured from the context parameter.
    pub memos: Vec<String>,
}

impl<'a> CodegenContext<'a> {
    pub fn new(config: &'a CompilerConfig) -> Self {
        CodegenContext {
            config,
            scopes: ScopeTree::new(),
            locals: Vec::new(),
            key_counter: 0,
            memo_counter: 0,
            memos: Vec::new(),
            primitives: IndexSet::new(),
            slots: IndexMap::new(),
            components: IndexMap::new(),
        }
    }

    pub fn next_key(&mut self) -> usize {
        let key = self.key_counter;
        self.key_counter += 1;
        key
    }

    /// Reserves a memoization slot on the context parameter, returning its name. Names taken by
    /// a loop local in scope are skipped, since the local would shadow the memo inside the helper.
    pub fn next_memo(&mut self) -> String {
        loop {
            let name = format!("{}{}", MEMO_PREFIX, self.memo_counter);
            self.memo_counter += 1;
            if !self.is_local(&name) {
                self.memos.push(name.clone());
                return name;
            }
        }
    }

    /// Loop locals visible from the node being transformed, outermost first.
    pub fn locals(&self) -> &[String] {
        &self.locals
    }

    pub fn is_local(&self, name: &str) -> bool {
        self.locals.iter().any(|local| local == name)
    }

    pub fn push_locals<I: IntoIterator<Item = String>>(&mut self, names: I) -> usize {
        let before = self.locals.len();
        self.locals.extend(names);
        self.locals.len() - before
    }

    pub fn pop_locals(&mut self, count: usize) {
        let len = self.locals.len().saturating_sub(count);
        self.locals.truncate(len);
    }

    pub(crate) fn record_primitive(&mut self, primitive: Primitive) {
        self.primitives.insert(primitive);
    }

    /// Slot-set local for a slot name. Names that sanitize to the same local (`a-b`, `a_b`) get
    /// a numeric suffix.
    pub fn register_slot(&mut self, name: &str) -> String {
        if let Some(local) = self.slots.get(name) {
            return local.clone();
        }
        let base = slot_local_name(name);
        let mut local = base.clone();
        let mut suffix = 1;
        while self.slots.values().any(|taken| *taken == local) {
            local = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        self.slots.insert(name.to_string(), local.clone());
        local
    }

    pub fn register_component(&mut self, tag: &str) -> String {
        self.components
            .entry(tag.to_string())
            .or_insert_with(|| ComponentImport {
                tag: tag.to_string(),
                local: component_local_name(tag),
                source: component_import_path(tag),
            })
            .local
            .clone()
    }

    pub fn finish(self) -> (ScopeTree, CodegenOutput) {
        let output = CodegenOutput {
            primitives: self.primitives,
            slots: self.slots,
            components: self.components.into_values().collect(),
            memos: self.memos,
        };
        (self.scopes, output)
    }
}
