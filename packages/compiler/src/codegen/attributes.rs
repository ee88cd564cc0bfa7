//! Data bag construction
//!
//! Builds the object literal passed as the second argument of element, component and slot
//! primitives: class, style, attributes, properties, contextual directives, key and listeners.

use crate::codegen::identifiers::CONTEXT_PARAM;
use crate::codegen::CodegenContext;
use crate::ir::{AttributeValue, DomMode, Element, Namespace, TemplateExpression};
use crate::output::output_ast::{
    literal, literal_map, map_entry, null_expr, variable, Expression, LiteralMapEntry,
};
use crate::schema::html_attributes::{
    is_boolean_attribute, is_fragment_link, is_fragment_only_url, is_id_referencing_attribute,
    is_svg_use_href, SVG_NAMESPACE_URI,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// One `property: value` declaration of an inline style.
static STYLE_DECLARATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^:;]+):([^;]+)").expect("valid style declaration regex"));

/// Where a binding ends up on the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BindingTarget {
    Attribute,
    Property,
}

impl CodegenContext<'_> {
    /// Data bag of `element`, with `key` as its key entry.
    pub fn build_data_bag(&mut self, element: &Element, key: Expression) -> Expression {
        let mut entries: Vec<LiteralMapEntry> = Vec::new();

        if let Some(class) = element.attribute("class") {
            match class {
                AttributeValue::Literal(value) => {
                    entries.push(map_entry("classMap", class_map(value)));
                }
                AttributeValue::Expression(expr) => {
                    let bound = self.bind_expression(expr);
                    entries.push(map_entry("className", bound));
                }
                AttributeValue::Boolean => {}
            }
        }

        if let Some(style) = element.attribute("style") {
            match style {
                AttributeValue::Literal(value) => {
                    entries.push(map_entry("styleMap", style_map(value)));
                }
                AttributeValue::Expression(expr) => {
                    let bound = self.bind_expression(expr);
                    entries.push(map_entry("style", bound));
                }
                AttributeValue::Boolean => {}
            }
        }

        let mut attrs = Vec::new();
        for attr in &element.attributes {
            if matches!(attr.name.as_str(), "class" | "style") {
                continue;
            }
            let value = self.binding_value(element, &attr.name, &attr.value, BindingTarget::Attribute);
            attrs.push(map_entry(attr.name.as_str(), value));
        }
        if !attrs.is_empty() {
            entries.push(map_entry("attrs", literal_map(attrs)));
        }

        let mut props = Vec::new();
        for prop in &element.properties {
            let value = self.binding_value(element, &prop.name, &prop.value, BindingTarget::Property);
            props.push(map_entry(prop.name.as_str(), value));
        }
        if !props.is_empty() {
            entries.push(map_entry("props", literal_map(props)));
        }

        if let Some(DomMode::Manual) = element.directives.dom {
            let dom = literal_map(vec![map_entry("dom", literal("manual"))]);
            let context = literal_map(vec![map_entry("lwc", dom)]);
            entries.push(map_entry("context", context));
        }

        if element.namespace == Namespace::Svg {
            entries.push(map_entry("svg", literal(true)));
        }

        entries.push(map_entry("key", key));

        let mut listeners = Vec::new();
        for listener in &element.listeners {
            let handler = self.bind_handler(&listener.handler);
            listeners.push(map_entry(listener.name.as_str(), handler));
        }
        if !listeners.is_empty() {
            entries.push(map_entry("on", literal_map(listeners)));
        }

        literal_map(entries)
    }

    /// Key entry of an element: the key primitive around an explicit key expression, a bare
    /// discriminator otherwise.
    pub fn build_key(&mut self, element: &Element, discriminator: usize) -> Expression {
        match &element.directives.key {
            Some(expr) => {
                let bound = self.bind_expression(expr);
                self.gen_key(discriminator, bound)
            }
            None => literal(discriminator),
        }
    }

    /// Event handlers that do not close over loop locals are bound once and cached on the
    /// context parameter.
    fn bind_handler(&mut self, handler: &TemplateExpression) -> Expression {
        let memoize = !handler.references_any(self.locals());
        let bound = self.bind_expression(handler);
        let bind_call = self.gen_bind(bound);
        if !memoize {
            return bind_call;
        }
        let memo = self.next_memo();
        let store = variable(CONTEXT_PARAM).set_prop(memo.as_str(), bind_call);
        variable(memo).or(store)
    }

    fn binding_value(
        &mut self,
        element: &Element,
        name: &str,
        value: &AttributeValue,
        target: BindingTarget,
    ) -> Expression {
        let tag = element.name.as_str();
        match value {
            AttributeValue::Boolean => {
                if name.eq_ignore_ascii_case("spellcheck") {
                    return literal(true);
                }
                match target {
                    BindingTarget::Attribute if name.eq_ignore_ascii_case("tabindex") => {
                        self.gen_tab_index(literal(""))
                    }
                    BindingTarget::Attribute => literal(""),
                    BindingTarget::Property => literal(true),
                }
            }
            AttributeValue::Literal(raw) => {
                if name.eq_ignore_ascii_case("spellcheck") {
                    return literal(!raw.eq_ignore_ascii_case("false"));
                }
                if target == BindingTarget::Property && is_boolean_attribute(name) {
                    return literal(true);
                }
                let scope_fragment = self.config.scope_fragment_id && is_fragment_only_url(raw);
                if name.eq_ignore_ascii_case("tabindex") {
                    self.gen_tab_index(literal(raw.as_str()))
                } else if is_id_referencing_attribute(name) {
                    self.gen_scoped_id(literal(raw.as_str()))
                } else if is_svg_use_href(tag, element.namespace, name) {
                    let inner = if scope_fragment {
                        self.gen_scoped_frag_id(literal(raw.as_str()))
                    } else {
                        literal(raw.as_str())
                    };
                    self.gen_sanitize_attribute(tag, SVG_NAMESPACE_URI, name, inner)
                } else if scope_fragment && is_fragment_link(tag, name) {
                    self.gen_scoped_frag_id(literal(raw.as_str()))
                } else {
                    literal(raw.as_str())
                }
            }
            AttributeValue::Expression(expr) => {
                let bound = self.bind_expression(expr);
                if target == BindingTarget::Attribute && is_boolean_attribute(name) {
                    bound.conditional(literal(""), null_expr())
                } else if name.eq_ignore_ascii_case("tabindex") {
                    self.gen_tab_index(bound)
                } else if is_id_referencing_attribute(name) {
                    self.gen_scoped_id(bound)
                } else if is_svg_use_href(tag, element.namespace, name) {
                    let inner = if self.config.scope_fragment_id {
                        self.gen_scoped_frag_id(bound)
                    } else {
                        bound
                    };
                    self.gen_sanitize_attribute(tag, SVG_NAMESPACE_URI, name, inner)
                } else if self.config.scope_fragment_id && is_fragment_link(tag, name) {
                    self.gen_scoped_frag_id(bound)
                } else {
                    bound
                }
            }
        }
    }
}

/// `"foo bar"` becomes `{foo: true, bar: true}`; duplicate class names collapse.
fn class_map(value: &str) -> Expression {
    let mut seen = indexmap::IndexSet::new();
    let entries = value
        .split_ascii_whitespace()
        .filter(|class| seen.insert(*class))
        .map(|class| map_entry(class, literal(true)))
        .collect();
    literal_map(entries)
}

/// `"color: red; font-size: 12px"` becomes `{color: 'red', 'font-size': '12px'}`.
fn style_map(value: &str) -> Expression {
    let entries = STYLE_DECLARATION_RE
        .captures_iter(value)
        .filter_map(|caps| {
            let property = caps.get(1)?.as_str().trim();
            let val = caps.get(2)?.as_str().trim();
            if property.is_empty() || val.is_empty() {
                return None;
            }
            Some(map_entry(property, literal(val)))
        })
        .collect();
    literal_map(entries)
}
