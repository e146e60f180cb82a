use serde_json::Value;
use std::fmt;

/// Parsed marker expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// String, number, boolean or null literal
    Literal(Value),

    /// Top-level model lookup
    Variable(String),

    /// `object.property`
    Member {
        object: Box<Expression>,
        property: String,
    },

    /// `object[index]` with a numeric or string key
    Index {
        object: Box<Expression>,
        index: Box<Expression>,
    },

    /// `value!fallback`, or `value!` which falls back to an empty string
    Default {
        value: Box<Expression>,
        fallback: Option<Box<Expression>>,
    },

    /// `target?name`
    Builtin {
        target: Box<Expression>,
        name: String,
    },

    Unary {
        operator: UnaryOp,
        operand: Box<Expression>,
    },

    Binary {
        left: Box<Expression>,
        operator: BinaryOp,
        right: Box<Expression>,
    },
}

impl Expression {
    /// Dotted path for variable and member chains, used in error messages
    pub fn path(&self) -> Option<String> {
        match self {
            Expression::Variable(name) => Some(name.clone()),
            Expression::Member { object, property } => {
                object.path().map(|base| format!("{}.{}", base, property))
            }
            Expression::Index { object, .. } => object.path().map(|base| format!("{}[]", base)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Negate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Equals => "==",
            BinaryOp::NotEquals => "!=",
            BinaryOp::LessThan => "<",
            BinaryOp::LessThanOrEqual => "<=",
            BinaryOp::GreaterThan => ">",
            BinaryOp::GreaterThanOrEqual => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        };
        f.write_str(symbol)
    }
}
