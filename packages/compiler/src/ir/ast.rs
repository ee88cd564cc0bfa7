//! Template IR
//!
//! The validated node tree produced by the template parser. The code generator only reads it.

use crate::ir::expression::TemplateExpression;
use crate::parse_util::SourceSpan;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    Element(Element),
    Text(Text),
    Comment(Comment),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    /// A plain DOM element.
    Element,
    /// A custom element backed by a component class.
    Component,
    Slot,
    /// `<template>`: groups children without producing a DOM node.
    Template,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Namespace {
    #[default]
    Html,
    Svg,
    MathMl,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub kind: ElementKind,
    pub name: String,
    #[serde(default)]
    pub namespace: Namespace,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub listeners: Vec<EventListener>,
    #[serde(default)]
    pub directives: Directives,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default)]
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum AttributeValue {
    Literal(String),
    /// Attribute present without a value, e.g. `<input disabled>`.
    Boolean,
    Expression(TemplateExpression),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: AttributeValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: AttributeValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventListener {
    pub name: String,
    pub handler: TemplateExpression,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directives {
    #[serde(default)]
    pub conditional: Option<IfDirective>,
    #[serde(default)]
    pub for_each: Option<ForEach>,
    #[serde(default)]
    pub for_of: Option<ForOf>,
    #[serde(default)]
    pub key: Option<TemplateExpression>,
    /// Constructor expression of a dynamically rendered component.
    #[serde(default)]
    pub dynamic: Option<TemplateExpression>,
    #[serde(default)]
    pub dom: Option<DomMode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IfKind {
    If,
    ElseIf,
    Else,
}

impl IfKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IfKind::If => "if",
            IfKind::ElseIf => "elseif",
            IfKind::Else => "else",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfDirective {
    pub kind: IfKind,
    /// Raw modifier as written in the template (`true`, `false`, `strict-true`).
    #[serde(default = "default_modifier")]
    pub modifier: String,
    #[serde(default)]
    pub test: Option<TemplateExpression>,
}

fn default_modifier() -> String {
    "true".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForEach {
    pub expression: TemplateExpression,
    pub item: String,
    #[serde(default)]
    pub index: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForOf {
    pub expression: TemplateExpression,
    pub iterator: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DomMode {
    Manual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub parts: Vec<TextPart>,
    #[serde(default)]
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum TextPart {
    Literal(String),
    Expression(TemplateExpression),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub value: String,
    #[serde(default)]
    pub span: SourceSpan,
}

impl Element {
    pub fn new(kind: ElementKind, name: impl Into<String>) -> Self {
        Element {
            kind,
            name: name.into(),
            namespace: Namespace::Html,
            attributes: Vec::new(),
            properties: Vec::new(),
            listeners: Vec::new(),
            directives: Directives::default(),
            children: Vec::new(),
            span: SourceSpan::default(),
        }
    }

    pub fn template() -> Self {
        Element::new(ElementKind::Template, "template")
    }

    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            value,
        });
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.properties.push(Property {
            name: name.into(),
            value,
        });
        self
    }

    pub fn with_listener(mut self, name: impl Into<String>, handler: TemplateExpression) -> Self {
        self.listeners.push(EventListener {
            name: name.into(),
            handler,
        });
        self
    }

    pub fn with_if(mut self, kind: IfKind, modifier: &str, test: Option<TemplateExpression>) -> Self {
        self.directives.conditional = Some(IfDirective {
            kind,
            modifier: modifier.to_string(),
            test,
        });
        self
    }

    pub fn with_for_each(
        mut self,
        expression: TemplateExpression,
        item: &str,
        index: Option<&str>,
    ) -> Self {
        self.directives.for_each = Some(ForEach {
            expression,
            item: item.to_string(),
            index: index.map(str::to_string),
        });
        self
    }

    pub fn with_for_of(mut self, expression: TemplateExpression, iterator: &str) -> Self {
        self.directives.for_of = Some(ForOf {
            expression,
            iterator: iterator.to_string(),
        });
        self
    }

    pub fn with_key(mut self, key: TemplateExpression) -> Self {
        self.directives.key = Some(key);
        self
    }

    pub fn with_dynamic(mut self, constructor: TemplateExpression) -> Self {
        self.directives.dynamic = Some(constructor);
        self
    }

    pub fn with_dom(mut self, mode: DomMode) -> Self {
        self.directives.dom = Some(mode);
        self
    }

    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = span;
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| &attr.value)
    }

    pub fn has_iteration(&self) -> bool {
        self.directives.for_each.is_some() || self.directives.for_of.is_some()
    }
}

impl Text {
    pub fn literal(value: impl Into<String>) -> Self {
        Text {
            parts: vec![TextPart::Literal(value.into())],
            span: SourceSpan::default(),
        }
    }

    pub fn expression(expr: TemplateExpression) -> Self {
        Text {
            parts: vec![TextPart::Expression(expr)],
            span: SourceSpan::default(),
        }
    }
}

impl Node {
    pub fn span(&self) -> &SourceSpan {
        match self {
            Node::Element(element) => &element.span,
            Node::Text(text) => &text.span,
            Node::Comment(comment) => &comment.span,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

impl From<Comment> for Node {
    fn from(comment: Comment) -> Self {
        Node::Comment(comment)
    }
}
