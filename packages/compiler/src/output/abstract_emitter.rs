//! Abstract Emitter Module
//!
//! Base emitter functionality for code generation: the line buffer and the printing of
//! expressions and the statements shared by every output flavour.

use crate::output::output_ast as o;
use once_cell::sync::Lazy;
use regex::Regex;

const INDENT_WITH: &str = "  ";

static LEGAL_IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_$][0-9a-zA-Z_$]*$").expect("valid identifier regex"));

#[derive(Debug, Clone)]
struct EmittedLine {
    parts_length: usize,
    parts: Vec<String>,
    indent: usize,
}

impl EmittedLine {
    fn new(indent: usize) -> Self {
        EmittedLine {
            parts_length: 0,
            parts: Vec::new(),
            indent,
        }
    }
}

pub struct EmitterVisitorContext {
    lines: Vec<EmittedLine>,
    indent: usize,
}

impl EmitterVisitorContext {
    pub fn create_root() -> Self {
        EmitterVisitorContext::new(0)
    }

    pub fn new(indent: usize) -> Self {
        EmitterVisitorContext {
            lines: vec![EmittedLine::new(indent)],
            indent,
        }
    }

    // `lines` always holds at least the line being written.
    fn current_line(&self) -> Option<&EmittedLine> {
        self.lines.last()
    }

    pub fn println(&mut self, last_part: &str) {
        self.print(last_part, true);
    }

    pub fn line_is_empty(&self) -> bool {
        match self.current_line() {
            Some(line) => line.parts.is_empty(),
            None => true,
        }
    }

    pub fn line_length(&self) -> usize {
        self.current_line()
            .map_or(0, |line| line.indent * INDENT_WITH.len() + line.parts_length)
    }

    pub fn print(&mut self, part: &str, new_line: bool) {
        if !part.is_empty() {
            if let Some(current) = self.lines.last_mut() {
                current.parts.push(part.to_string());
                current.parts_length += part.len();
            }
        }
        if new_line {
            self.lines.push(EmittedLine::new(self.indent));
        }
    }

    pub fn inc_indent(&mut self) {
        self.indent += 1;
        let indent = self.indent;
        if self.line_is_empty() {
            if let Some(line) = self.lines.last_mut() {
                line.indent = indent;
            }
        }
    }

    pub fn dec_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        let indent = self.indent;
        if self.line_is_empty() {
            if let Some(line) = self.lines.last_mut() {
                line.indent = indent;
            }
        }
    }

    pub fn to_source(&self) -> String {
        let mut lines = self.lines.as_slice();
        if let Some((last, rest)) = lines.split_last() {
            if last.parts.is_empty() {
                lines = rest;
            }
        }
        lines
            .iter()
            .map(|l| {
                if !l.parts.is_empty() {
                    format!("{}{}", create_indent(l.indent), l.parts.join(""))
                } else {
                    String::new()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn create_indent(count: usize) -> String {
    INDENT_WITH.repeat(count)
}

/// Escape identifier for safe use in generated code. Legal identifiers are printed as-is unless
/// `always_quote` is set; everything else becomes a single quoted string.
pub fn escape_identifier(input: &str, escape_dollar: bool, always_quote: bool) -> String {
    if input.is_empty() {
        return "''".to_string();
    }

    if !always_quote && LEGAL_IDENTIFIER_RE.is_match(input) {
        return input.to_string();
    }

    let mut escaped = input.replace('\\', "\\\\");
    escaped = escaped.replace('\'', "\\'");
    escaped = escaped.replace('\n', "\\n");
    escaped = escaped.replace('\r', "\\r");
    if escape_dollar {
        escaped = escaped.replace('$', "\\$");
    }

    format!("'{}'", escaped)
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Abstract base emitter visitor
#[derive(Debug, Default)]
pub struct AbstractEmitterVisitor;

impl AbstractEmitterVisitor {
    pub fn new() -> Self {
        AbstractEmitterVisitor
    }

    fn visit_all_expressions(
        &mut self,
        expressions: &[o::Expression],
        ctx: &mut EmitterVisitorContext,
        separator: &str,
    ) {
        for (i, expr) in expressions.iter().enumerate() {
            if i > 0 {
                ctx.print(separator, false);
            }
            expr.visit_expression(self, ctx);
        }
    }

    // Assignments and nested binaries keep their own grouping.
    fn visit_operand(&mut self, expr: &o::Expression, ctx: &mut EmitterVisitorContext) {
        let needs_parens = matches!(expr, o::Expression::WriteProp(_) | o::Expression::BinaryOp(_));
        if needs_parens {
            ctx.print("(", false);
        }
        expr.visit_expression(self, ctx);
        if needs_parens {
            ctx.print(")", false);
        }
    }
}

impl o::ExpressionVisitor<EmitterVisitorContext> for AbstractEmitterVisitor {
    fn visit_read_var_expr(&mut self, expr: &o::ReadVarExpr, ctx: &mut EmitterVisitorContext) {
        let name = escape_identifier(&expr.name, false, false);
        ctx.print(&name, false);
    }

    fn visit_read_prop_expr(&mut self, expr: &o::ReadPropExpr, ctx: &mut EmitterVisitorContext) {
        expr.receiver.visit_expression(self, ctx);
        if LEGAL_IDENTIFIER_RE.is_match(&expr.name) {
            ctx.print(".", false);
            ctx.print(&expr.name, false);
        } else {
            ctx.print("[", false);
            ctx.print(&escape_identifier(&expr.name, false, true), false);
            ctx.print("]", false);
        }
    }

    fn visit_read_key_expr(&mut self, expr: &o::ReadKeyExpr, ctx: &mut EmitterVisitorContext) {
        expr.receiver.visit_expression(self, ctx);
        ctx.print("[", false);
        expr.index.visit_expression(self, ctx);
        ctx.print("]", false);
    }

    fn visit_write_prop_expr(&mut self, expr: &o::WritePropExpr, ctx: &mut EmitterVisitorContext) {
        expr.receiver.visit_expression(self, ctx);
        ctx.print(".", false);
        let name = escape_identifier(&expr.name, false, false);
        ctx.print(&name, false);
        ctx.print(" = ", false);
        expr.value.visit_expression(self, ctx);
    }

    fn visit_invoke_function_expr(
        &mut self,
        expr: &o::InvokeFunctionExpr,
        ctx: &mut EmitterVisitorContext,
    ) {
        expr.fn_.visit_expression(self, ctx);
        ctx.print("(", false);
        self.visit_all_expressions(&expr.args, ctx, ", ");
        ctx.print(")", false);
    }

    fn visit_literal_expr(&mut self, expr: &o::LiteralExpr, ctx: &mut EmitterVisitorContext) {
        let value_str = match &expr.value {
            o::LiteralValue::Null => "null".to_string(),
            o::LiteralValue::String(s) => escape_identifier(s, false, true),
            o::LiteralValue::Number(n) => format_number(*n),
            o::LiteralValue::Bool(b) => b.to_string(),
        };
        ctx.print(&value_str, false);
    }

    fn visit_literal_array_expr(
        &mut self,
        expr: &o::LiteralArrayExpr,
        ctx: &mut EmitterVisitorContext,
    ) {
        ctx.print("[", false);
        self.visit_all_expressions(&expr.entries, ctx, ", ");
        ctx.print("]", false);
    }

    fn visit_literal_map_expr(&mut self, expr: &o::LiteralMapExpr, ctx: &mut EmitterVisitorContext) {
        ctx.print("{", false);
        for (i, entry) in expr.entries.iter().enumerate() {
            if i > 0 {
                ctx.print(", ", false);
            }
            let key = escape_identifier(&entry.key, false, entry.quoted);
            ctx.print(&key, false);
            ctx.print(": ", false);
            entry.value.visit_expression(self, ctx);
        }
        ctx.print("}", false);
    }

    fn visit_conditional_expr(&mut self, expr: &o::ConditionalExpr, ctx: &mut EmitterVisitorContext) {
        ctx.print("(", false);
        expr.condition.visit_expression(self, ctx);
        ctx.print(" ? ", false);
        expr.true_case.visit_expression(self, ctx);
        ctx.print(" : ", false);
        expr.false_case.visit_expression(self, ctx);
        ctx.print(")", false);
    }

    fn visit_binary_operator_expr(
        &mut self,
        expr: &o::BinaryOperatorExpr,
        ctx: &mut EmitterVisitorContext,
    ) {
        match &*expr.lhs {
            // Left-associative: `a + b + c` needs no grouping.
            o::Expression::BinaryOp(lhs) if lhs.operator == expr.operator => {
                expr.lhs.visit_expression(self, ctx)
            }
            _ => self.visit_operand(&expr.lhs, ctx),
        }
        ctx.print(" ", false);
        ctx.print(expr.operator.as_str(), false);
        ctx.print(" ", false);
        self.visit_operand(&expr.rhs, ctx);
    }

    fn visit_not_expr(&mut self, expr: &o::NotExpr, ctx: &mut EmitterVisitorContext) {
        ctx.print("!", false);
        self.visit_operand(&expr.condition, ctx);
    }

    /// Unresolved placeholders read straight off the component instance.
    fn visit_property_ref_expr(&mut self, expr: &o::PropertyRefExpr, ctx: &mut EmitterVisitorContext) {
        o::variable(crate::codegen::identifiers::COMPONENT_PARAM)
            .prop(expr.name.as_str())
            .visit_expression(self, ctx);
    }
}

impl o::StatementVisitor<EmitterVisitorContext> for AbstractEmitterVisitor {
    fn visit_declare_var_stmt(&mut self, stmt: &o::DeclareVarStmt, ctx: &mut EmitterVisitorContext) {
        ctx.print("const ", false);
        let name = escape_identifier(&stmt.name, false, false);
        ctx.print(&name, false);
        ctx.print(" = ", false);
        stmt.value.visit_expression(self, ctx);
        ctx.println(";");
    }

    fn visit_destructure_stmt(&mut self, stmt: &o::DestructureStmt, ctx: &mut EmitterVisitorContext) {
        ctx.print("const {", false);
        for (i, binding) in stmt.bindings.iter().enumerate() {
            if i > 0 {
                ctx.print(", ", false);
            }
            if binding.key == binding.local {
                ctx.print(&binding.local, false);
            } else {
                ctx.print(&escape_identifier(&binding.key, false, false), false);
                ctx.print(": ", false);
                ctx.print(&binding.local, false);
            }
        }
        ctx.print("} = ", false);
        stmt.value.visit_expression(self, ctx);
        ctx.println(";");
    }

    fn visit_declare_function_stmt(
        &mut self,
        stmt: &o::DeclareFunctionStmt,
        ctx: &mut EmitterVisitorContext,
    ) {
        ctx.print("function ", false);
        let name = escape_identifier(&stmt.name, false, false);
        ctx.print(&name, false);
        ctx.print("(", false);
        for (i, param) in stmt.params.iter().enumerate() {
            if i > 0 {
                ctx.print(", ", false);
            }
            let param_name = escape_identifier(&param.name, false, false);
            ctx.print(&param_name, false);
        }
        ctx.println(") {");
        ctx.inc_indent();
        for statement in &stmt.statements {
            statement.visit_statement(self, ctx);
        }
        ctx.dec_indent();
        ctx.println("}");
    }

    fn visit_expression_stmt(
        &mut self,
        stmt: &o::ExpressionStatement,
        ctx: &mut EmitterVisitorContext,
    ) {
        stmt.expr.visit_expression(self, ctx);
        ctx.println(";");
    }

    fn visit_return_stmt(&mut self, stmt: &o::ReturnStatement, ctx: &mut EmitterVisitorContext) {
        ctx.print("return ", false);
        stmt.value.visit_expression(self, ctx);
        ctx.println(";");
    }

    fn visit_import_default_stmt(
        &mut self,
        stmt: &o::ImportDefaultStmt,
        ctx: &mut EmitterVisitorContext,
    ) {
        ctx.print("import ", false);
        ctx.print(&stmt.local, false);
        ctx.print(" from ", false);
        ctx.print(&escape_identifier(&stmt.source, false, true), false);
        ctx.println(";");
    }

    fn visit_export_default_stmt(
        &mut self,
        stmt: &o::ExportDefaultStmt,
        ctx: &mut EmitterVisitorContext,
    ) {
        ctx.print("export default ", false);
        stmt.expr.visit_expression(self, ctx);
        ctx.println(";");
    }
}
