//! Template IR builders shared by the integration tests

#![allow(dead_code)]

use template_compiler::ir::{
    AttributeValue, Comment, Element, ElementKind, Node, Text, TextPart, TemplateExpression,
};
use template_compiler::parse_util::SourceSpan;
use template_compiler::{compile_template, CompiledTemplate, CompilerConfig};

pub fn template(children: Vec<Node>) -> Node {
    let mut root = Element::template();
    root.children = children;
    Node::Element(root)
}

pub fn el(tag: &str) -> Element {
    Element::new(ElementKind::Element, tag)
}

pub fn fragment() -> Element {
    Element::template()
}

pub fn component(tag: &str) -> Element {
    Element::new(ElementKind::Component, tag)
}

pub fn slot(name: Option<&str>) -> Element {
    let slot = Element::new(ElementKind::Slot, "slot");
    match name {
        Some(name) => slot.with_attribute("name", lit(name)),
        None => slot,
    }
}

pub fn expr(path: &str) -> TemplateExpression {
    TemplateExpression::path(path)
}

pub fn lit(value: &str) -> AttributeValue {
    AttributeValue::Literal(value.to_string())
}

pub fn bound(path: &str) -> AttributeValue {
    AttributeValue::Expression(expr(path))
}

pub fn text(value: &str) -> Text {
    Text::literal(value)
}

/// `{path}` as a text node.
pub fn text_expr(path: &str) -> Text {
    Text::expression(expr(path))
}

pub fn mixed_text(literal: &str, path: &str) -> Text {
    Text {
        parts: vec![
            TextPart::Literal(literal.to_string()),
            TextPart::Expression(expr(path)),
        ],
        span: SourceSpan::default(),
    }
}

pub fn comment(value: &str) -> Comment {
    Comment {
        value: value.to_string(),
        span: SourceSpan::default(),
    }
}

pub fn compile_with(root: &Node, config: &CompilerConfig) -> CompiledTemplate {
    match compile_template(root, config) {
        Ok(compiled) => compiled,
        Err(err) => panic!("compilation failed: {}", err),
    }
}

/// Source of `root` compiled as a bare function.
pub fn compile_fn(root: &Node) -> String {
    compile_with(root, &CompilerConfig::function()).code
}
