use crate::ast::{BinaryOp, Expression, UnaryOp};
use crate::builtins;
use crate::error::{EvalError, EvalResult, ParseError};
use crate::lexer::TokenSpan;
use crate::parser::parse;
use crate::value::{has_content, number, to_text, type_name};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use tracing::{instrument, trace};

/// Data a template is rendered against
pub type Model = Map<String, Value>;

/// Renders one-line templates such as `Dear ${user.name?cap_first},`
///
/// Text outside `${...}` passes through untouched. Each expression is parsed
/// and evaluated against the model; `null` counts as missing.
#[derive(Debug, Default, Clone)]
pub struct TemplateEngine;

impl TemplateEngine {
    pub fn new() -> Self {
        Self
    }

    #[instrument(level = "debug", skip(self, model), fields(keys = model.len()))]
    pub fn render(&self, template: &str, model: &Model) -> EvalResult<String> {
        let mut output = String::with_capacity(template.len());
        let mut rest = template;
        let mut offset = 0;

        while let Some(open) = rest.find("${") {
            output.push_str(&rest[..open]);

            let body = open + 2;
            let Some(close) = find_closing_brace(&rest[body..]) else {
                return Err(ParseError::Unterminated {
                    span: TokenSpan::new(offset + open, offset + body),
                }
                .into());
            };

            let source = &rest[body..body + close];
            let expression = parse(source).map_err(|e| e.shifted(offset + body))?;
            let value = self.eval(&expression, model)?;
            let text = to_text(&value)?;
            trace!(expression = source, text = %text, "Evaluated expression");
            output.push_str(&text);

            let consumed = body + close + 1;
            rest = &rest[consumed..];
            offset += consumed;
        }

        output.push_str(rest);
        Ok(output)
    }

    /// Evaluate a bare expression (without `${` `}`) to a value
    pub fn evaluate(&self, expression: &str, model: &Model) -> EvalResult<Value> {
        let expression = parse(expression)?;
        self.eval(&expression, model)
    }

    fn eval(&self, expr: &Expression, model: &Model) -> EvalResult<Value> {
        match expr {
            Expression::Literal(value) => Ok(value.clone()),

            Expression::Variable(name) => present(model.get(name))
                .ok_or_else(|| EvalError::VariableNotFound { name: name.clone() }),

            Expression::Member { object, property } => {
                let object_value = self.eval(object, model)?;
                let Value::Object(map) = &object_value else {
                    return Err(EvalError::type_error("hash", type_name(&object_value)));
                };
                present(map.get(property)).ok_or_else(|| not_found(expr, property))
            }

            Expression::Index { object, index } => {
                let object_value = self.eval(object, model)?;
                let index_value = self.eval(index, model)?;
                let found = match (&object_value, &index_value) {
                    (Value::Array(items), Value::Number(n)) => {
                        n.as_u64().and_then(|i| items.get(i as usize))
                    }
                    (Value::Object(map), Value::String(key)) => map.get(key),
                    (Value::Array(_), other) => {
                        return Err(EvalError::type_error("number index", type_name(other)))
                    }
                    (Value::Object(_), other) => {
                        return Err(EvalError::type_error("string key", type_name(other)))
                    }
                    (other, _) => {
                        return Err(EvalError::type_error("sequence or hash", type_name(other)))
                    }
                };
                present(found).ok_or_else(|| not_found(expr, &index_value.to_string()))
            }

            Expression::Default { value, fallback } => match self.eval(value, model) {
                Ok(Value::Null) | Err(EvalError::VariableNotFound { .. }) => match fallback {
                    Some(fallback) => self.eval(fallback, model),
                    None => Ok(Value::String(String::new())),
                },
                other => other,
            },

            Expression::Builtin { target, name } if name == "has_content" => {
                match self.eval(target, model) {
                    Ok(value) => Ok(Value::Bool(has_content(&value))),
                    Err(EvalError::VariableNotFound { .. }) => Ok(Value::Bool(false)),
                    Err(e) => Err(e),
                }
            }

            Expression::Builtin { target, name } => {
                let value = self.eval(target, model)?;
                builtins::apply(name, value)
            }

            Expression::Unary { operator, operand } => {
                let value = self.eval(operand, model)?;
                match (operator, &value) {
                    (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
                    (UnaryOp::Negate, Value::Number(n)) => Ok(number(-as_f64(n))),
                    (UnaryOp::Not, other) => Err(EvalError::type_error("boolean", type_name(other))),
                    (UnaryOp::Negate, other) => Err(EvalError::type_error("number", type_name(other))),
                }
            }

            Expression::Binary {
                left,
                operator: operator @ (BinaryOp::And | BinaryOp::Or),
                right,
            } => {
                let l = match self.eval(left, model)? {
                    Value::Bool(l) => l,
                    other => return Err(EvalError::type_error("boolean", type_name(&other))),
                };
                // Short-circuit
                if (*operator == BinaryOp::And && !l) || (*operator == BinaryOp::Or && l) {
                    return Ok(Value::Bool(l));
                }
                let right = self.eval(right, model)?;
                match right {
                    Value::Bool(r) => Ok(Value::Bool(r)),
                    other => Err(EvalError::type_error("boolean", type_name(&other))),
                }
            }

            Expression::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.eval(left, model)?;
                let right = self.eval(right, model)?;
                binary(*operator, left, right)
            }
        }
    }
}

fn present(value: Option<&Value>) -> Option<Value> {
    value.filter(|v| !v.is_null()).cloned()
}

fn not_found(expr: &Expression, key: &str) -> EvalError {
    EvalError::VariableNotFound {
        name: expr.path().unwrap_or_else(|| key.to_string()),
    }
}

fn as_f64(n: &serde_json::Number) -> f64 {
    n.as_f64().unwrap_or(f64::NAN)
}

fn binary(operator: BinaryOp, left: Value, right: Value) -> EvalResult<Value> {
    let invalid = |left: &Value, right: &Value| EvalError::InvalidOperands {
        operator,
        left: type_name(left).to_string(),
        right: type_name(right).to_string(),
    };

    match operator {
        BinaryOp::Equals => Ok(Value::Bool(loosely_equal(&left, &right))),
        BinaryOp::NotEquals => Ok(Value::Bool(!loosely_equal(&left, &right))),

        BinaryOp::Add => match (&left, &right) {
            (Value::Number(a), Value::Number(b)) => Ok(number(as_f64(a) + as_f64(b))),
            (Value::String(_), _) | (_, Value::String(_)) => {
                match (to_text(&left), to_text(&right)) {
                    (Ok(l), Ok(r)) => Ok(Value::String(l + &r)),
                    _ => Err(invalid(&left, &right)),
                }
            }
            _ => Err(invalid(&left, &right)),
        },

        BinaryOp::Subtract | BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => {
            let (Value::Number(a), Value::Number(b)) = (&left, &right) else {
                return Err(invalid(&left, &right));
            };
            let (a, b) = (as_f64(a), as_f64(b));
            match operator {
                BinaryOp::Subtract => Ok(number(a - b)),
                BinaryOp::Multiply => Ok(number(a * b)),
                _ if b == 0.0 => Err(invalid(&left, &right)),
                BinaryOp::Divide => Ok(number(a / b)),
                _ => Ok(number(a % b)),
            }
        }

        BinaryOp::LessThan
        | BinaryOp::LessThanOrEqual
        | BinaryOp::GreaterThan
        | BinaryOp::GreaterThanOrEqual => {
            let ordering = match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => as_f64(a).partial_cmp(&as_f64(b)),
                (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
                _ => None,
            };
            let Some(ordering) = ordering else {
                return Err(invalid(&left, &right));
            };
            Ok(Value::Bool(match operator {
                BinaryOp::LessThan => ordering == Ordering::Less,
                BinaryOp::LessThanOrEqual => ordering != Ordering::Greater,
                BinaryOp::GreaterThan => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            }))
        }

        BinaryOp::And | BinaryOp::Or => match (&left, &right) {
            (Value::Bool(l), Value::Bool(r)) if operator == BinaryOp::And => Ok(Value::Bool(*l && *r)),
            (Value::Bool(l), Value::Bool(r)) => Ok(Value::Bool(*l || *r)),
            _ => Err(invalid(&left, &right)),
        },
    }
}

/// Numbers compare by value so `2 == 2.0`
fn loosely_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => as_f64(a) == as_f64(b),
        _ => left == right,
    }
}

/// Byte offset of the `}` closing an expression, skipping quoted strings
fn find_closing_brace(source: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in source.char_indices() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '}' => return Some(i),
            None => {}
        }
    }

    None
}
