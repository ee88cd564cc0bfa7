//! Render Identifiers
//!
//! Names of the render function parameters and of the runtime primitives destructured from the
//! API parameter.

use serde::Serialize;

/// Render function parameters, in signature order.
pub const API_PARAM: &str = "$api";
pub const COMPONENT_PARAM: &str = "$cmp";
pub const SLOT_SET_PARAM: &str = "$slotset";
pub const CONTEXT_PARAM: &str = "$ctx";

pub const SLOT_LOCAL_PREFIX: &str = "$slot_";
pub const DEFAULT_SLOT_LOCAL: &str = "$slot_default";
pub const MEMO_PREFIX: &str = "_m";
pub const HOIST_ALIAS_PREFIX: &str = "$cv";

/// Render function attribute listing the stylesheets of the template.
pub const STYLESHEETS_PROP: &str = "stylesheets";
pub const SLOTS_PROP: &str = "slots";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Primitive {
    Element,
    CustomElement,
    DynamicElement,
    Text,
    DynamicText,
    Comment,
    Iterator,
    Flatten,
    Key,
    Bind,
    TabIndex,
    ScopedId,
    ScopedFragmentId,
    Slot,
    SanitizeAttribute,
}

impl Primitive {
    /// Property of the runtime API object holding the primitive.
    pub fn api_key(&self) -> &'static str {
        match self {
            Primitive::Element => "h",
            Primitive::CustomElement => "c",
            Primitive::DynamicElement => "dc",
            Primitive::Text => "t",
            Primitive::DynamicText => "d",
            Primitive::Comment => "co",
            Primitive::Iterator => "i",
            Primitive::Flatten => "f",
            Primitive::Key => "k",
            Primitive::Bind => "b",
            Primitive::TabIndex => "ti",
            Primitive::ScopedId => "gid",
            Primitive::ScopedFragmentId => "fid",
            Primitive::Slot => "s",
            Primitive::SanitizeAttribute => "sa",
        }
    }

    /// Local the primitive is destructured into at the top of the render function.
    pub fn local_name(&self) -> &'static str {
        match self {
            Primitive::Element => "api_element",
            Primitive::CustomElement => "api_custom_element",
            Primitive::DynamicElement => "api_dynamic_component",
            Primitive::Text => "api_text",
            Primitive::DynamicText => "api_dynamic_text",
            Primitive::Comment => "api_comment",
            Primitive::Iterator => "api_iterator",
            Primitive::Flatten => "api_flatten",
            Primitive::Key => "api_key",
            Primitive::Bind => "api_bind",
            Primitive::TabIndex => "api_tab_index",
            Primitive::ScopedId => "api_scoped_id",
            Primitive::ScopedFragmentId => "api_scoped_frag_id",
            Primitive::Slot => "api_slot",
            Primitive::SanitizeAttribute => "api_sanitize_attribute",
        }
    }

    pub const ALL: [Primitive; 15] = [
        Primitive::Element,
        Primitive::CustomElement,
        Primitive::DynamicElement,
        Primitive::Text,
        Primitive::DynamicText,
        Primitive::Comment,
        Primitive::Iterator,
        Primitive::Flatten,
        Primitive::Key,
        Primitive::Bind,
        Primitive::TabIndex,
        Primitive::ScopedId,
        Primitive::ScopedFragmentId,
        Primitive::Slot,
        Primitive::SanitizeAttribute,
    ];
}

/// Constructor local for a component tag: `x-foo-bar` becomes `_xFooBar`.
pub fn component_local_name(tag: &str) -> String {
    let mut out = String::with_capacity(tag.len() + 1);
    out.push('_');
    let mut upper = false;
    for ch in tag.chars() {
        if ch == '-' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Module specifier a component tag resolves to: `x-foo-bar` becomes `x/fooBar`.
pub fn component_import_path(tag: &str) -> String {
    match tag.split_once('-') {
        Some((namespace, name)) => {
            let camel = component_local_name(name);
            format!("{}/{}", namespace, &camel[1..])
        }
        None => tag.to_string(),
    }
}

/// Local bound to the slot content of the given slot name.
pub fn slot_local_name(name: &str) -> String {
    if name.is_empty() {
        return DEFAULT_SLOT_LOCAL.to_string();
    }
    let sanitized: String = name
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '_' { ch } else { '_' })
        .collect();
    format!("{}{}", SLOT_LOCAL_PREFIX, sanitized)
}
