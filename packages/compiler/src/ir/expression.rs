//! Template Expression AST
//!
//! The small expression language the template parser hands over: identifiers, member access
//! chains and literals. Identifiers name either a component instance property or a loop local.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TemplateExpression {
    Identifier(Identifier),
    Member(MemberAccess),
    Keyed(KeyedAccess),
    Literal(LiteralPrimitive),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
}

/// `object.property`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberAccess {
    pub object: Box<TemplateExpression>,
    pub property: String,
}

/// `object[key]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedAccess {
    pub object: Box<TemplateExpression>,
    pub key: Box<TemplateExpression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralPrimitive {
    pub value: PrimitiveValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimitiveValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl TemplateExpression {
    pub fn ident(name: impl Into<String>) -> Self {
        TemplateExpression::Identifier(Identifier { name: name.into() })
    }

    pub fn member(self, property: impl Into<String>) -> Self {
        TemplateExpression::Member(MemberAccess {
            object: Box::new(self),
            property: property.into(),
        })
    }

    pub fn keyed(self, key: TemplateExpression) -> Self {
        TemplateExpression::Keyed(KeyedAccess {
            object: Box::new(self),
            key: Box::new(key),
        })
    }

    pub fn literal(value: PrimitiveValue) -> Self {
        TemplateExpression::Literal(LiteralPrimitive { value })
    }

    /// Parses a dotted path such as `item.author.name`.
    pub fn path(path: &str) -> Self {
        let mut segments = path.split('.');
        let root = TemplateExpression::ident(segments.next().unwrap_or_default());
        segments.fold(root, |expr, segment| expr.member(segment))
    }

    /// Calls `f` for every identifier read by the expression. Non-computed property names are
    /// not identifiers and are skipped.
    pub fn for_each_identifier<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            TemplateExpression::Identifier(id) => f(&id.name),
            TemplateExpression::Member(member) => member.object.for_each_identifier(f),
            TemplateExpression::Keyed(keyed) => {
                keyed.object.for_each_identifier(f);
                keyed.key.for_each_identifier(f);
            }
            TemplateExpression::Literal(_) => {}
        }
    }

    pub fn references_any(&self, names: &[String]) -> bool {
        let mut found = false;
        self.for_each_identifier(&mut |name| {
            if names.iter().any(|n| n == name) {
                found = true;
            }
        });
        found
    }
}
