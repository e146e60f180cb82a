//! Expression engine for `${...}` markers
//!
//! A marker body is lexed with logos, parsed by a recursive descent parser
//! and evaluated against a JSON model:
//!
//! ```
//! use serde_json::json;
//! use wordtemplate_evaluator::TemplateEngine;
//!
//! let model = json!({"user": {"name": "ada"}}).as_object().cloned().unwrap();
//! let text = TemplateEngine::new()
//!     .render("Dear ${user.name?cap_first},", &model)
//!     .unwrap();
//! assert_eq!(text, "Dear Ada,");
//! ```

pub mod ast;
mod builtins;
mod engine;
pub mod error;
pub mod lexer;
pub mod parser;
mod value;

pub use ast::{BinaryOp, Expression, UnaryOp};
pub use engine::{Model, TemplateEngine};
pub use error::{format_error, EvalError, EvalResult, ParseError, ParseResult};
pub use lexer::{tokenize, Token, TokenSpan};
pub use parser::{parse, Parser};
