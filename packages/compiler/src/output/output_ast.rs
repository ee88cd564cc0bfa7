//! Output AST Module
//!
//! The JavaScript AST the code generator builds for a render function, before it is printed by
//! the emitter.

use crate::codegen::scope::UsageId;

///// Expressions

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Identical,
    Or,
    Plus,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Identical => "===",
            BinaryOperator::Or => "||",
            BinaryOperator::Plus => "+",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    ReadVar(ReadVarExpr),
    ReadProp(ReadPropExpr),
    ReadKey(ReadKeyExpr),
    WriteProp(WritePropExpr),
    InvokeFn(InvokeFunctionExpr),
    Literal(LiteralExpr),
    LiteralArray(LiteralArrayExpr),
    LiteralMap(LiteralMapExpr),
    Conditional(ConditionalExpr),
    BinaryOp(BinaryOperatorExpr),
    NotExpr(NotExpr),
    /// A component instance property read whose placement is not decided yet.
    PropertyRef(PropertyRefExpr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadVarExpr {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadPropExpr {
    pub receiver: Box<Expression>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadKeyExpr {
    pub receiver: Box<Expression>,
    pub index: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WritePropExpr {
    pub receiver: Box<Expression>,
    pub name: String,
    pub value: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvokeFunctionExpr {
    pub fn_: Box<Expression>,
    pub args: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub value: LiteralValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Null,
    String(String),
    Number(f64),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralArrayExpr {
    pub entries: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralMapEntry {
    pub key: String,
    pub value: Box<Expression>,
    pub quoted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralMapExpr {
    pub entries: Vec<LiteralMapEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpr {
    pub condition: Box<Expression>,
    pub true_case: Box<Expression>,
    pub false_case: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperatorExpr {
    pub operator: BinaryOperator,
    pub lhs: Box<Expression>,
    pub rhs: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotExpr {
    pub condition: Box<Expression>,
}

/// Placeholder emitted by the expression binder. All placeholders pointing at the same usage
/// record are rewritten together once the scope tree has been flattened.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRefExpr {
    pub usage: UsageId,
    pub name: String,
}

pub trait ExpressionVisitor<C> {
    fn visit_read_var_expr(&mut self, expr: &ReadVarExpr, context: &mut C);
    fn visit_read_prop_expr(&mut self, expr: &ReadPropExpr, context: &mut C);
    fn visit_read_key_expr(&mut self, expr: &ReadKeyExpr, context: &mut C);
    fn visit_write_prop_expr(&mut self, expr: &WritePropExpr, context: &mut C);
    fn visit_invoke_function_expr(&mut self, expr: &InvokeFunctionExpr, context: &mut C);
    fn visit_literal_expr(&mut self, expr: &LiteralExpr, context: &mut C);
    fn visit_literal_array_expr(&mut self, expr: &LiteralArrayExpr, context: &mut C);
    fn visit_literal_map_expr(&mut self, expr: &LiteralMapExpr, context: &mut C);
    fn visit_conditional_expr(&mut self, expr: &ConditionalExpr, context: &mut C);
    fn visit_binary_operator_expr(&mut self, expr: &BinaryOperatorExpr, context: &mut C);
    fn visit_not_expr(&mut self, expr: &NotExpr, context: &mut C);
    fn visit_property_ref_expr(&mut self, expr: &PropertyRefExpr, context: &mut C);
}

impl Expression {
    pub fn visit_expression<C, V: ExpressionVisitor<C> + ?Sized>(
        &self,
        visitor: &mut V,
        context: &mut C,
    ) {
        match self {
            Expression::ReadVar(e) => visitor.visit_read_var_expr(e, context),
            Expression::ReadProp(e) => visitor.visit_read_prop_expr(e, context),
            Expression::ReadKey(e) => visitor.visit_read_key_expr(e, context),
            Expression::WriteProp(e) => visitor.visit_write_prop_expr(e, context),
            Expression::InvokeFn(e) => visitor.visit_invoke_function_expr(e, context),
            Expression::Literal(e) => visitor.visit_literal_expr(e, context),
            Expression::LiteralArray(e) => visitor.visit_literal_array_expr(e, context),
            Expression::LiteralMap(e) => visitor.visit_literal_map_expr(e, context),
            Expression::Conditional(e) => visitor.visit_conditional_expr(e, context),
            Expression::BinaryOp(e) => visitor.visit_binary_operator_expr(e, context),
            Expression::NotExpr(e) => visitor.visit_not_expr(e, context),
            Expression::PropertyRef(e) => visitor.visit_property_ref_expr(e, context),
        }
    }

    /// Pre-order mutable walk. `f` sees a node before its children, so a replacement made by
    /// `f` is walked as well.
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Expression)) {
        f(self);
        match self {
            Expression::ReadVar(_) | Expression::Literal(_) | Expression::PropertyRef(_) => {}
            Expression::ReadProp(e) => e.receiver.walk_mut(f),
            Expression::ReadKey(e) => {
                e.receiver.walk_mut(f);
                e.index.walk_mut(f);
            }
            Expression::WriteProp(e) => {
                e.receiver.walk_mut(f);
                e.value.walk_mut(f);
            }
            Expression::InvokeFn(e) => {
                e.fn_.walk_mut(f);
                for arg in &mut e.args {
                    arg.walk_mut(f);
                }
            }
            Expression::LiteralArray(e) => {
                for entry in &mut e.entries {
                    entry.walk_mut(f);
                }
            }
            Expression::LiteralMap(e) => {
                for entry in &mut e.entries {
                    entry.value.walk_mut(f);
                }
            }
            Expression::Conditional(e) => {
                e.condition.walk_mut(f);
                e.true_case.walk_mut(f);
                e.false_case.walk_mut(f);
            }
            Expression::BinaryOp(e) => {
                e.lhs.walk_mut(f);
                e.rhs.walk_mut(f);
            }
            Expression::NotExpr(e) => e.condition.walk_mut(f),
        }
    }

    pub fn walk(&self, f: &mut impl FnMut(&Expression)) {
        f(self);
        match self {
            Expression::ReadVar(_) | Expression::Literal(_) | Expression::PropertyRef(_) => {}
            Expression::ReadProp(e) => e.receiver.walk(f),
            Expression::ReadKey(e) => {
                e.receiver.walk(f);
                e.index.walk(f);
            }
            Expression::WriteProp(e) => {
                e.receiver.walk(f);
                e.value.walk(f);
            }
            Expression::InvokeFn(e) => {
                e.fn_.walk(f);
                for arg in &e.args {
                    arg.walk(f);
                }
            }
            Expression::LiteralArray(e) => {
                for entry in &e.entries {
                    entry.walk(f);
                }
            }
            Expression::LiteralMap(e) => {
                for entry in &e.entries {
                    entry.value.walk(f);
                }
            }
            Expression::Conditional(e) => {
                e.condition.walk(f);
                e.true_case.walk(f);
                e.false_case.walk(f);
            }
            Expression::BinaryOp(e) => {
                e.lhs.walk(f);
                e.rhs.walk(f);
            }
            Expression::NotExpr(e) => e.condition.walk(f),
        }
    }

    pub fn prop(self, name: impl Into<String>) -> Expression {
        Expression::ReadProp(ReadPropExpr {
            receiver: Box::new(self),
            name: name.into(),
        })
    }

    pub fn key(self, index: Expression) -> Expression {
        Expression::ReadKey(ReadKeyExpr {
            receiver: Box::new(self),
            index: Box::new(index),
        })
    }

    pub fn call_fn(self, args: Vec<Expression>) -> Expression {
        Expression::InvokeFn(InvokeFunctionExpr {
            fn_: Box::new(self),
            args,
        })
    }

    pub fn conditional(self, true_case: Expression, false_case: Expression) -> Expression {
        Expression::Conditional(ConditionalExpr {
            condition: Box::new(self),
            true_case: Box::new(true_case),
            false_case: Box::new(false_case),
        })
    }

    pub fn binary(self, operator: BinaryOperator, rhs: Expression) -> Expression {
        Expression::BinaryOp(BinaryOperatorExpr {
            operator,
            lhs: Box::new(self),
            rhs: Box::new(rhs),
        })
    }

    pub fn identical(self, rhs: Expression) -> Expression {
        self.binary(BinaryOperator::Identical, rhs)
    }

    pub fn or(self, rhs: Expression) -> Expression {
        self.binary(BinaryOperator::Or, rhs)
    }

    pub fn plus(self, rhs: Expression) -> Expression {
        self.binary(BinaryOperator::Plus, rhs)
    }

    pub fn set_prop(self, name: impl Into<String>, value: Expression) -> Expression {
        Expression::WriteProp(WritePropExpr {
            receiver: Box::new(self),
            name: name.into(),
            value: Box::new(value),
        })
    }

    pub fn into_stmt(self) -> Statement {
        Statement::Expression(ExpressionStatement { expr: Box::new(self) })
    }
}

///// Statements

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    DeclareVar(DeclareVarStmt),
    Destructure(DestructureStmt),
    DeclareFn(DeclareFunctionStmt),
    Expression(ExpressionStatement),
    Return(ReturnStatement),
    ImportDefault(ImportDefaultStmt),
    ExportDefault(ExportDefaultStmt),
}

/// `const name = value;`
#[derive(Debug, Clone, PartialEq)]
pub struct DeclareVarStmt {
    pub name: String,
    pub value: Box<Expression>,
}

/// `const {key: local, ...} = value;`
#[derive(Debug, Clone, PartialEq)]
pub struct DestructureStmt {
    pub bindings: Vec<DestructureBinding>,
    pub value: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DestructureBinding {
    pub key: String,
    pub local: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeclareFunctionStmt {
    pub name: String,
    pub params: Vec<FnParam>,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnParam {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expr: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub value: Box<Expression>,
}

/// `import local from 'source';`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDefaultStmt {
    pub local: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportDefaultStmt {
    pub expr: Box<Expression>,
}

pub trait StatementVisitor<C> {
    fn visit_declare_var_stmt(&mut self, stmt: &DeclareVarStmt, context: &mut C);
    fn visit_destructure_stmt(&mut self, stmt: &DestructureStmt, context: &mut C);
    fn visit_declare_function_stmt(&mut self, stmt: &DeclareFunctionStmt, context: &mut C);
    fn visit_expression_stmt(&mut self, stmt: &ExpressionStatement, context: &mut C);
    fn visit_return_stmt(&mut self, stmt: &ReturnStatement, context: &mut C);
    fn visit_import_default_stmt(&mut self, stmt: &ImportDefaultStmt, context: &mut C);
    fn visit_export_default_stmt(&mut self, stmt: &ExportDefaultStmt, context: &mut C);
}

impl Statement {
    pub fn visit_statement<C, V: StatementVisitor<C> + ?Sized>(
        &self,
        visitor: &mut V,
        context: &mut C,
    ) {
        match self {
            Statement::DeclareVar(s) => visitor.visit_declare_var_stmt(s, context),
            Statement::Destructure(s) => visitor.visit_destructure_stmt(s, context),
            Statement::DeclareFn(s) => visitor.visit_declare_function_stmt(s, context),
            Statement::Expression(s) => visitor.visit_expression_stmt(s, context),
            Statement::Return(s) => visitor.visit_return_stmt(s, context),
            Statement::ImportDefault(s) => visitor.visit_import_default_stmt(s, context),
            Statement::ExportDefault(s) => visitor.visit_export_default_stmt(s, context),
        }
    }

    /// Walks every expression reachable from this statement, nested function bodies included.
    pub fn walk_expressions_mut(&mut self, f: &mut impl FnMut(&mut Expression)) {
        match self {
            Statement::DeclareVar(s) => s.value.walk_mut(f),
            Statement::Destructure(s) => s.value.walk_mut(f),
            Statement::DeclareFn(s) => {
                for stmt in &mut s.statements {
                    stmt.walk_expressions_mut(f);
                }
            }
            Statement::Expression(s) => s.expr.walk_mut(f),
            Statement::Return(s) => s.value.walk_mut(f),
            Statement::ExportDefault(s) => s.expr.walk_mut(f),
            Statement::ImportDefault(_) => {}
        }
    }

    pub fn walk_expressions(&self, f: &mut impl FnMut(&Expression)) {
        match self {
            Statement::DeclareVar(s) => s.value.walk(f),
            Statement::Destructure(s) => s.value.walk(f),
            Statement::DeclareFn(s) => {
                for stmt in &s.statements {
                    stmt.walk_expressions(f);
                }
            }
            Statement::Expression(s) => s.expr.walk(f),
            Statement::Return(s) => s.value.walk(f),
            Statement::ExportDefault(s) => s.expr.walk(f),
            Statement::ImportDefault(_) => {}
        }
    }
}

// Helper functions for creating common expressions
pub fn variable(name: impl Into<String>) -> Expression {
    Expression::ReadVar(ReadVarExpr { name: name.into() })
}

pub fn literal(value: impl Into<LiteralValue>) -> Expression {
    Expression::Literal(LiteralExpr {
        value: value.into(),
    })
}

pub fn literal_arr(values: Vec<Expression>) -> Expression {
    Expression::LiteralArray(LiteralArrayExpr { entries: values })
}

pub fn literal_map(entries: Vec<LiteralMapEntry>) -> Expression {
    Expression::LiteralMap(LiteralMapExpr { entries })
}

pub fn map_entry(key: impl Into<String>, value: Expression) -> LiteralMapEntry {
    LiteralMapEntry {
        key: key.into(),
        value: Box::new(value),
        quoted: false,
    }
}

pub fn null_expr() -> Expression {
    literal(LiteralValue::Null)
}

pub fn not(expr: Expression) -> Expression {
    Expression::NotExpr(NotExpr {
        condition: Box::new(expr),
    })
}

pub fn fn_param(name: impl Into<String>) -> FnParam {
    FnParam { name: name.into() }
}

pub fn destructure(bindings: Vec<DestructureBinding>, value: Expression) -> Statement {
    Statement::Destructure(DestructureStmt {
        bindings,
        value: Box::new(value),
    })
}

pub fn binding(key: impl Into<String>, local: impl Into<String>) -> DestructureBinding {
    DestructureBinding {
        key: key.into(),
        local: local.into(),
    }
}

pub fn return_stmt(value: Expression) -> Statement {
    Statement::Return(ReturnStatement {
        value: Box::new(value),
    })
}

// Implement conversions
impl From<String> for LiteralValue {
    fn from(s: String) -> Self {
        LiteralValue::String(s)
    }
}

impl From<&str> for LiteralValue {
    fn from(s: &str) -> Self {
        LiteralValue::String(s.to_string())
    }
}

impl From<f64> for LiteralValue {
    fn from(n: f64) -> Self {
        LiteralValue::Number(n)
    }
}

impl From<usize> for LiteralValue {
    fn from(n: usize) -> Self {
        LiteralValue::Number(n as f64)
    }
}

impl From<bool> for LiteralValue {
    fn from(b: bool) -> Self {
        LiteralValue::Bool(b)
    }
}
