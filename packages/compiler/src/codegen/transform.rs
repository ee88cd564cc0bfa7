//! Template transform
//!
//! Recursive walk over the IR producing the render function's root expression. Conditional and
//! iteration directives open child scopes and register one helper function each; the helpers are
//! placed by the flattening pass.

use crate::codegen::CodegenContext;
use crate::error::{CompileError, Result};
use crate::ir::{AttributeValue, Element, ElementKind, IfDirective, IfKind, Node, Text, TextPart};
use crate::output::output_ast::{
    fn_param, literal, literal_arr, literal_map, map_entry, not, null_expr, return_stmt, variable,
    DeclareFunctionStmt, DeclareVarStmt, Expression, FnParam, Statement,
};
use crate::parse_util::SourceSpan;

/// Parameter of conditional helpers receiving the evaluated test. Template identifiers never
/// start with `$`, so loop locals cannot shadow it.
const TEST_PARAM: &str = "$test";

/// Output of one child position.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// Evaluates to a single vnode, or `null` when a conditional is off.
    Node(Expression),
    /// Evaluates to an array of vnodes.
    List(Expression),
}

impl Fragment {
    pub fn is_list(&self) -> bool {
        matches!(self, Fragment::List(_))
    }

    pub fn into_expression(self) -> Expression {
        match self {
            Fragment::Node(expr) | Fragment::List(expr) => expr,
        }
    }

    /// Placeholder rendered when a conditional is off: one `null` per slot of a fixed-length
    /// list, an empty list for a variable-length one and a single `null` for a node.
    pub fn falsy(&self) -> Expression {
        match self {
            Fragment::Node(_) => null_expr(),
            Fragment::List(Expression::LiteralArray(array)) => {
                literal_arr(array.entries.iter().map(|_| null_expr()).collect())
            }
            Fragment::List(_) => literal_arr(Vec::new()),
        }
    }
}

/// How the test of an `if`/`elseif` is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IfModifier {
    True,
    False,
    StrictTrue,
}

impl IfModifier {
    pub fn parse(modifier: &str, span: &SourceSpan) -> Result<Self> {
        match modifier {
            "true" => Ok(IfModifier::True),
            "false" => Ok(IfModifier::False),
            "strict-true" => Ok(IfModifier::StrictTrue),
            _ => Err(CompileError::UnknownIfModifier {
                modifier: modifier.to_string(),
                span: span.clone(),
            }),
        }
    }

    pub fn apply(&self, test: Expression) -> Expression {
        match self {
            IfModifier::True => test,
            IfModifier::False => not(test),
            IfModifier::StrictTrue => test.identical(literal(true)),
        }
    }
}

impl CodegenContext<'_> {
    /// Transforms the children of the root `<template>` into the expression the render function
    /// returns.
    pub fn transform_root(&mut self, root: &Node) -> Result<Expression> {
        let Node::Element(template) = root else {
            return Err(CompileError::InvalidRoot {
                reason: "the root node must be a <template> element".to_string(),
                span: root.span().clone(),
            });
        };
        let children = self.transform_children(&template.children)?;
        Ok(self.children_expression(children))
    }

    /// Children array of an element: a plain array, the list itself when it is the only child,
    /// or the flatten primitive around a mix of nodes and lists.
    pub fn children_expression(&mut self, children: Vec<Fragment>) -> Expression {
        let has_list = children.iter().any(Fragment::is_list);
        let mut entries: Vec<Expression> =
            children.into_iter().map(Fragment::into_expression).collect();
        if has_list && entries.len() == 1 {
            if let Some(only) = entries.pop() {
                return only;
            }
        }
        if has_list {
            self.gen_flatten(entries)
        } else {
            literal_arr(entries)
        }
    }

    fn transform_children(&mut self, children: &[Node]) -> Result<Vec<Fragment>> {
        let mut fragments = Vec::with_capacity(children.len());
        let mut index = 0;
        while index < children.len() {
            match &children[index] {
                Node::Text(text) => fragments.push(Fragment::Node(self.transform_text(text))),
                Node::Comment(comment) => {
                    if self.config.preserve_comments {
                        fragments.push(Fragment::Node(self.gen_comment(&comment.value)));
                    }
                }
                Node::Element(element) => {
                    let chain = collect_chain(element, &children[index + 1..]);
                    fragments.push(self.transform_element(&chain)?);
                    index += chain.len();
                    continue;
                }
            }
            index += 1;
        }
        Ok(fragments)
    }

    /// `chain` holds an element followed by the `elseif`/`else` siblings continuing it.
    fn transform_element(&mut self, chain: &[&Element]) -> Result<Fragment> {
        let Some(head) = chain.first() else {
            return Ok(Fragment::List(literal_arr(Vec::new())));
        };
        if head.has_iteration() {
            return self.transform_iteration(head);
        }
        if head.directives.conditional.is_some() {
            return self.transform_conditional(chain);
        }
        self.transform_element_body(head)
    }

    /// `forEach` and `for-of` lowering. The iterable is read in the enclosing scope; the node
    /// itself, including its conditional if any, is rendered inside the helper.
    fn transform_iteration(&mut self, element: &Element) -> Result<Fragment> {
        let directives = &element.directives;
        let (iterable, params, prelude, locals, kind) =
            match (&directives.for_each, &directives.for_of) {
                (Some(for_each), _) => {
                    let iterable = self.bind_expression(&for_each.expression);
                    let mut locals = vec![for_each.item.clone()];
                    locals.extend(for_each.index.clone());
                    let params: Vec<FnParam> = locals.iter().map(|name| fn_param(name.as_str())).collect();
                    (iterable, params, Vec::new(), locals, "forEach")
                }
                (None, Some(for_of)) => {
                    let iterable = self.bind_expression(&for_of.expression);
                    let (params, prelude) = for_of_prelude(&for_of.iterator);
                    (iterable, params, prelude, vec![for_of.iterator.clone()], "forOf")
                }
                (None, None) => return self.transform_element_body(element),
            };

        let scope = self.scopes.push();
        let pushed = self.push_locals(locals);
        let body = if directives.conditional.is_some() {
            self.transform_conditional(&[element])
        } else if element.kind == ElementKind::Template {
            self.transform_iterated_template(element)
        } else {
            self.transform_element_body(element)
        };
        self.pop_locals(pushed);
        let body = body?;
        self.scopes.pop()?;

        let name = format!("{}{}", kind, scope.0);
        let mut statements = prelude;
        statements.push(return_stmt(body.into_expression()));
        self.scopes.set_main_fn(
            scope,
            DeclareFunctionStmt {
                name: name.clone(),
                params,
                statements,
            },
        );
        Ok(Fragment::List(self.gen_iterator(iterable, variable(name))))
    }

    /// An iterated `<template>` holding a single node renders that node per item.
    fn transform_iterated_template(&mut self, template: &Element) -> Result<Fragment> {
        let mut children = self.transform_children(&template.children)?;
        if children.len() == 1 && !children[0].is_list() {
            return Ok(children.remove(0));
        }
        Ok(Fragment::List(self.children_expression(children)))
    }

    /// Lowers an `if` followed by its `elseif`/`else` siblings. Each branch owns a scope nested in
    /// the previous branch's scope, since the next branch is only reached from inside the
    /// previous helper.
    fn transform_conditional(&mut self, chain: &[&Element]) -> Result<Fragment> {
        let Some((head, rest)) = chain.split_first() else {
            return Ok(Fragment::Node(null_expr()));
        };
        let Some(directive) = head.directives.conditional.as_ref() else {
            return self.transform_element_body(head);
        };

        if directive.kind == IfKind::Else {
            let scope = self.scopes.push();
            let body = self.transform_element_body(head)?;
            self.scopes.pop()?;
            let name = format!("if{}", scope.0);
            let is_list = body.is_list();
            self.scopes.set_main_fn(
                scope,
                DeclareFunctionStmt {
                    name: name.clone(),
                    params: Vec::new(),
                    statements: vec![return_stmt(body.into_expression())],
                },
            );
            return Ok(fragment(is_list, variable(name).call_fn(Vec::new())));
        }

        let modifier = IfModifier::parse(&directive.modifier, &head.span)?;
        let test = self.bind_test(directive, &head.span)?;
        let scope = self.scopes.push();
        let body = self.transform_element_body(head)?;
        let fallback = if rest.is_empty() {
            Fragment::Node(body.falsy())
        } else {
            self.transform_conditional(rest)?
        };
        self.scopes.pop()?;

        let is_list = body.is_list() || fallback.is_list();
        let name = format!("if{}", scope.0);
        let ternary = modifier
            .apply(variable(TEST_PARAM))
            .conditional(body.into_expression(), fallback.into_expression());
        self.scopes.set_main_fn(
            scope,
            DeclareFunctionStmt {
                name: name.clone(),
                params: vec![fn_param(TEST_PARAM)],
                statements: vec![return_stmt(ternary)],
            },
        );
        Ok(fragment(is_list, variable(name).call_fn(vec![test])))
    }

    fn bind_test(&mut self, directive: &IfDirective, span: &SourceSpan) -> Result<Expression> {
        match &directive.test {
            Some(test) => Ok(self.bind_expression(test)),
            None => Err(CompileError::MissingConditionTest {
                directive: directive.kind.as_str(),
                span: span.clone(),
            }),
        }
    }

    /// The node itself, directives aside. Keys are handed out before the children are walked,
    /// so they follow document order.
    fn transform_element_body(&mut self, element: &Element) -> Result<Fragment> {
        if element.kind == ElementKind::Template {
            let children = self.transform_children(&element.children)?;
            return Ok(Fragment::List(self.children_expression(children)));
        }
        if element.directives.dynamic.is_some() && element.kind != ElementKind::Component {
            return Err(CompileError::DynamicTagOnNonComponent {
                tag: element.name.clone(),
                span: element.span.clone(),
            });
        }

        let discriminator = self.next_key();
        let key = self.build_key(element, discriminator);
        let constructor = element
            .directives
            .dynamic
            .as_ref()
            .map(|ctor| self.bind_expression(ctor));
        let data = self.build_data_bag(element, key);
        let children = self.transform_children(&element.children)?;
        let children = self.children_expression(children);

        let node = match element.kind {
            ElementKind::Component => match constructor {
                Some(ctor) => self.gen_dynamic_element(&element.name, ctor, data, children),
                None => {
                    let local = self.register_component(&element.name);
                    self.gen_custom_element(&element.name, &local, data, children)
                }
            },
            ElementKind::Slot => {
                let name = match element.attribute("name") {
                    Some(AttributeValue::Literal(name)) => name.clone(),
                    _ => String::new(),
                };
                let local = self.register_slot(&name);
                self.gen_slot(&name, data, children, &local)
            }
            _ => self.gen_element(&element.name, data, children),
        };
        Ok(Fragment::Node(node))
    }

    fn transform_text(&mut self, text: &Text) -> Expression {
        let all_literal = text.parts.iter().all(|part| matches!(part, TextPart::Literal(_)));
        if all_literal {
            let value: String = text
                .parts
                .iter()
                .filter_map(|part| match part {
                    TextPart::Literal(value) => Some(value.as_str()),
                    TextPart::Expression(_) => None,
                })
                .collect();
            return self.gen_text(literal(value));
        }

        let mut concatenated: Option<Expression> = None;
        for part in &text.parts {
            let piece = match part {
                TextPart::Literal(value) => literal(value.as_str()),
                TextPart::Expression(expr) => {
                    let bound = self.bind_expression(expr);
                    self.gen_dynamic_text(bound)
                }
            };
            concatenated = Some(match concatenated {
                Some(lhs) => lhs.plus(piece),
                None => piece,
            });
        }
        let value = concatenated.unwrap_or_else(|| literal(""));
        self.gen_text(value)
    }
}

fn fragment(is_list: bool, expr: Expression) -> Fragment {
    if is_list {
        Fragment::List(expr)
    } else {
        Fragment::Node(expr)
    }
}

/// An element followed by the siblings continuing its conditional chain. Only an `if` that
/// does not iterate starts a chain.
fn collect_chain<'a>(head: &'a Element, following: &'a [Node]) -> Vec<&'a Element> {
    let mut chain = vec![head];
    let starts_chain = matches!(
        head.directives.conditional.as_ref().map(|c| c.kind),
        Some(IfKind::If)
    ) && !head.has_iteration();
    if !starts_chain {
        return chain;
    }
    for node in following {
        let Node::Element(element) = node else {
            break;
        };
        match element.directives.conditional.as_ref().map(|c| c.kind) {
            Some(IfKind::ElseIf) => chain.push(element),
            Some(IfKind::Else) => {
                chain.push(element);
                break;
            }
            _ => break,
        }
    }
    chain
}

/// Helper parameters and the statement gathering them into the iterator object of a for-of.
/// Parameters are `$`-prefixed so they stay clear of enclosing loop locals.
fn for_of_prelude(iterator: &str) -> (Vec<FnParam>, Vec<Statement>) {
    let fields = ["value", "index", "first", "last"];
    let params: Vec<FnParam> = fields
        .iter()
        .map(|field| fn_param(format!("${}_{}", iterator, field)))
        .collect();
    let object = literal_map(
        fields
            .iter()
            .zip(&params)
            .map(|(field, param)| map_entry(*field, variable(param.name.as_str())))
            .collect(),
    );
    let declaration = Statement::DeclareVar(DeclareVarStmt {
        name: iterator.to_string(),
        value: Box::new(object),
    });
    (params, vec![declaration])
}
