use crate::ast::BinaryOp;
use crate::lexer::TokenSpan;
use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token at {span}: expected {expected}, found {found}")]
    UnexpectedToken {
        span: TokenSpan,
        expected: String,
        found: String,
    },

    #[error("Unexpected end of expression: expected {expected}")]
    UnexpectedEof { span: TokenSpan, expected: String },

    #[error("Unrecognized character at {span}")]
    LexError { span: TokenSpan },

    #[error("Unterminated '${{' at {span}")]
    Unterminated { span: TokenSpan },
}

impl ParseError {
    pub fn unexpected_token(
        span: TokenSpan,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::UnexpectedToken {
            span,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn span(&self) -> TokenSpan {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedEof { span, .. }
            | ParseError::LexError { span }
            | ParseError::Unterminated { span } => *span,
        }
    }

    /// Rebase the span onto an enclosing source that starts `by` bytes earlier
    pub fn shifted(self, by: usize) -> Self {
        match self {
            ParseError::UnexpectedToken { span, expected, found } => ParseError::UnexpectedToken {
                span: span.shift(by),
                expected,
                found,
            },
            ParseError::UnexpectedEof { span, expected } => ParseError::UnexpectedEof {
                span: span.shift(by),
                expected,
            },
            ParseError::LexError { span } => ParseError::LexError { span: span.shift(by) },
            ParseError::Unterminated { span } => ParseError::Unterminated { span: span.shift(by) },
        }
    }

    #[cfg(feature = "pretty-errors")]
    fn label(&self) -> String {
        match self {
            ParseError::UnexpectedToken { expected, .. } | ParseError::UnexpectedEof { expected, .. } => {
                format!("expected {}", expected)
            }
            ParseError::LexError { .. } => "not part of any token".to_string(),
            ParseError::Unterminated { .. } => "no closing '}'".to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("'{name}' is not defined in the model")]
    VariableNotFound { name: String },

    #[error("Expected {expected}, found {found}")]
    TypeError { expected: String, found: String },

    #[error("Unknown built-in '?{name}'")]
    UnknownBuiltin { name: String },

    #[error("Operator '{operator}' cannot be applied to {left} and {right}")]
    InvalidOperands {
        operator: BinaryOp,
        left: String,
        right: String,
    },
}

impl EvalError {
    pub fn type_error(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeError {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// Render an error against the template it came from
///
/// Parse errors get a labelled source excerpt; evaluation errors carry no
/// span and print as their message.
#[cfg(feature = "pretty-errors")]
pub fn format_error(source: &str, filename: &str, error: &EvalError) -> String {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let EvalError::Parse(parse_error) = error else {
        return format!("Error: {}\n", error);
    };

    let span = parse_error.span();
    let end = span.end.max(span.start + 1).min(source.len().max(1));
    let start = span.start.min(end.saturating_sub(1));

    let mut output = Vec::new();
    let report = Report::build(ReportKind::Error, filename, start)
        .with_message(parse_error.to_string())
        .with_label(
            Label::new((filename, start..end))
                .with_color(Color::Red)
                .with_message(parse_error.label()),
        )
        .finish();

    if report
        .write((filename, Source::from(source)), &mut output)
        .is_err()
    {
        return format!("Error: {}\n", error);
    }

    String::from_utf8(output).unwrap_or_else(|_| format!("Error: {}\n", error))
}

/// Render an error as its message
#[cfg(not(feature = "pretty-errors"))]
pub fn format_error(_source: &str, _filename: &str, error: &EvalError) -> String {
    format!("Error: {}\n", error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shifted_moves_span() {
        let err = ParseError::unexpected_token(TokenSpan::new(1, 2), "expression", "')'");
        assert_eq!(err.shifted(2).span(), TokenSpan::new(3, 4));
    }

    #[test]
    fn test_format_error_mentions_message() {
        let err = EvalError::Parse(ParseError::Unterminated {
            span: TokenSpan::new(0, 2),
        });
        let rendered = format_error("${name", "marker", &err);
        assert!(rendered.contains("Unterminated"));

        let err = EvalError::VariableNotFound { name: "city".into() };
        assert!(format_error("${city}", "marker", &err).contains("'city' is not defined"));
    }
}
