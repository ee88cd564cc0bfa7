//! Input contract checks
//!
//! Rejects IR the code generator cannot lower before any code is generated: a root that is not
//! a bare `<template>`, conditional branches without a preceding `if`, conflicting iteration
//! directives and dynamic tags outside components.

use crate::error::{CompileError, Result};
use crate::ir::{Element, ElementKind, IfKind, Node};
use crate::parse_util::SourceSpan;

/// State of the if/elseif/else chain formed by the previous sibling.
enum ChainState<'a> {
    Closed,
    Open,
    /// The previous sibling is an `if` that also iterates; it cannot be continued.
    Iterated(&'a Element),
}

pub fn validate_template(root: &Node) -> Result<()> {
    let Node::Element(template) = root else {
        return Err(CompileError::InvalidRoot {
            reason: "the root node must be a <template> element".to_string(),
            span: root.span().clone(),
        });
    };
    if template.kind != ElementKind::Template {
        return Err(CompileError::InvalidRoot {
            reason: format!("expected <template>, found <{}>", template.name),
            span: template.span.clone(),
        });
    }
    let directives = &template.directives;
    if directives.conditional.is_some()
        || template.has_iteration()
        || directives.key.is_some()
        || directives.dynamic.is_some()
        || directives.dom.is_some()
    {
        return Err(CompileError::InvalidRoot {
            reason: "the root <template> cannot carry directives".to_string(),
            span: template.span.clone(),
        });
    }
    validate_children(&template.children)
}

fn validate_children(children: &[Node]) -> Result<()> {
    let mut chain = ChainState::Closed;
    for child in children {
        let Node::Element(element) = child else {
            chain = ChainState::Closed;
            continue;
        };
        validate_element(element, &chain)?;
        chain = match element.directives.conditional.as_ref().map(|c| c.kind) {
            Some(IfKind::If) if element.has_iteration() => ChainState::Iterated(element),
            Some(IfKind::If) | Some(IfKind::ElseIf) => ChainState::Open,
            _ => ChainState::Closed,
        };
        validate_children(&element.children)?;
    }
    Ok(())
}

fn validate_element(element: &Element, chain: &ChainState<'_>) -> Result<()> {
    let directives = &element.directives;
    if directives.for_each.is_some() && directives.for_of.is_some() {
        return Err(CompileError::ConflictingIteration {
            tag: element.name.clone(),
            span: element.span.clone(),
        });
    }
    if directives.dynamic.is_some() && element.kind != ElementKind::Component {
        return Err(CompileError::DynamicTagOnNonComponent {
            tag: element.name.clone(),
            span: element.span.clone(),
        });
    }

    let Some(conditional) = &directives.conditional else {
        return Ok(());
    };
    let span = &element.span;
    match conditional.kind {
        IfKind::If => {
            if conditional.test.is_none() {
                return Err(missing_test(conditional.kind, span));
            }
        }
        IfKind::ElseIf | IfKind::Else => {
            match chain {
                ChainState::Closed => {
                    return Err(CompileError::OrphanConditionalBranch {
                        directive: conditional.kind.as_str(),
                        span: span.clone(),
                    });
                }
                ChainState::Iterated(previous) => {
                    return Err(CompileError::IterationOnConditionalBranch {
                        tag: previous.name.clone(),
                        span: previous.span.clone(),
                    });
                }
                ChainState::Open => {}
            }
            if element.has_iteration() {
                return Err(CompileError::IterationOnConditionalBranch {
                    tag: element.name.clone(),
                    span: span.clone(),
                });
            }
            match (conditional.kind, &conditional.test) {
                (IfKind::ElseIf, None) => return Err(missing_test(conditional.kind, span)),
                (IfKind::Else, Some(_)) => {
                    return Err(CompileError::UnexpectedConditionTest { span: span.clone() })
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn missing_test(kind: IfKind, span: &SourceSpan) -> CompileError {
    CompileError::MissingConditionTest {
        directive: kind.as_str(),
        span: span.clone(),
    }
}
