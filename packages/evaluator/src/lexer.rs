//! Tokens for marker expressions
//!
//! Logos generates the DFA at compile time, so lexing a marker is a single
//! linear pass.

use crate::error::{ParseError, ParseResult};
use logos::Logos;
use std::fmt;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token<'src> {
    #[token("true")]
    True,

    #[token("false")]
    False,

    #[token("null")]
    Null,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice())]
    Ident(&'src str),

    // Quotes are kept; the parser strips and unescapes them
    #[regex(r#""([^"\\]|\\.)*""#, |lex| lex.slice())]
    #[regex(r#"'([^'\\]|\\.)*'"#, |lex| lex.slice())]
    String(&'src str),

    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice())]
    Number(&'src str),

    #[token(".")]
    Dot,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("!")]
    Bang,

    #[token("?")]
    Question,

    #[token(",")]
    Comma,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("==")]
    EqualsEquals,

    #[token("!=")]
    NotEquals,

    #[token("<")]
    LessThan,

    #[token("<=")]
    LessThanEquals,

    #[token(">")]
    GreaterThan,

    #[token(">=")]
    GreaterThanEquals,

    #[token("&&")]
    And,

    #[token("||")]
    Or,
}

impl<'src> fmt::Display for Token<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Null => write!(f, "null"),
            Token::Ident(s) => write!(f, "identifier '{}'", s),
            Token::String(s) => write!(f, "string {}", s),
            Token::Number(n) => write!(f, "number {}", n),
            Token::Dot => write!(f, "'.'"),
            Token::LBracket => write!(f, "'['"),
            Token::RBracket => write!(f, "']'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Bang => write!(f, "'!'"),
            Token::Question => write!(f, "'?'"),
            Token::Comma => write!(f, "','"),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Star => write!(f, "'*'"),
            Token::Slash => write!(f, "'/'"),
            Token::Percent => write!(f, "'%'"),
            Token::EqualsEquals => write!(f, "'=='"),
            Token::NotEquals => write!(f, "'!='"),
            Token::LessThan => write!(f, "'<'"),
            Token::LessThanEquals => write!(f, "'<='"),
            Token::GreaterThan => write!(f, "'>'"),
            Token::GreaterThanEquals => write!(f, "'>='"),
            Token::And => write!(f, "'&&'"),
            Token::Or => write!(f, "'||'"),
        }
    }
}

/// Byte range of a token in the expression source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

impl TokenSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Same span moved `by` bytes to the right
    pub fn shift(self, by: usize) -> Self {
        Self {
            start: self.start + by,
            end: self.end + by,
        }
    }
}

impl fmt::Display for TokenSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Tokenize an expression, failing on the first character no token accepts
pub fn tokenize(source: &str) -> ParseResult<Vec<(Token<'_>, TokenSpan)>> {
    Token::lexer(source)
        .spanned()
        .map(|(result, span)| {
            let span = TokenSpan::new(span.start, span.end);
            result
                .map(|token| (token, span))
                .map_err(|_| ParseError::LexError { span })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token<'_>> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|(token, _)| token)
            .collect()
    }

    #[test]
    fn test_member_and_builtin_chain() {
        assert_eq!(
            kinds("user.name?upper_case"),
            vec![
                Token::Ident("user"),
                Token::Dot,
                Token::Ident("name"),
                Token::Question,
                Token::Ident("upper_case"),
            ]
        );
    }

    #[test]
    fn test_longest_operator_wins() {
        assert_eq!(
            kinds("a != b <= c ! d"),
            vec![
                Token::Ident("a"),
                Token::NotEquals,
                Token::Ident("b"),
                Token::LessThanEquals,
                Token::Ident("c"),
                Token::Bang,
                Token::Ident("d"),
            ]
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            kinds(r#"42 3.5 "a \"b\"" 'c' true null"#),
            vec![
                Token::Number("42"),
                Token::Number("3.5"),
                Token::String(r#""a \"b\"""#),
                Token::String("'c'"),
                Token::True,
                Token::Null,
            ]
        );
    }

    #[test]
    fn test_spans_and_lex_errors() {
        let tokens = tokenize("ab  + 1").unwrap();
        assert_eq!(tokens[1].1, TokenSpan::new(4, 5));

        let err = tokenize("a # b").unwrap_err();
        assert_eq!(err, ParseError::LexError { span: TokenSpan::new(2, 3) });
    }
}
