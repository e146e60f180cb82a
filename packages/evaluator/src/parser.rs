use crate::ast::{BinaryOp, Expression, UnaryOp};
use crate::error::{ParseError, ParseResult};
use crate::lexer::{tokenize, Token, TokenSpan};
use crate::value::number;
use serde_json::Value;

/// Recursive descent parser for a single marker expression
pub struct Parser<'src> {
    tokens: Vec<(Token<'src>, TokenSpan)>,
    pos: usize,
    source_len: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> ParseResult<Self> {
        Ok(Self {
            tokens: tokenize(source)?,
            pos: 0,
            source_len: source.len(),
        })
    }

    /// Parse the whole token stream as one expression
    pub fn parse(&mut self) -> ParseResult<Expression> {
        let expr = self.parse_expression()?;

        if let Some((token, span)) = self.peek() {
            return Err(ParseError::unexpected_token(
                *span,
                "end of expression",
                token.to_string(),
            ));
        }

        Ok(expr)
    }

    fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_or_expression()
    }

    /// Parse OR expression (lowest precedence)
    fn parse_or_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_and_expression()?;

        while self.match_token(Token::Or) {
            let right = self.parse_and_expression()?;
            left = binary(left, BinaryOp::Or, right);
        }

        Ok(left)
    }

    fn parse_and_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_equality_expression()?;

        while self.match_token(Token::And) {
            let right = self.parse_equality_expression()?;
            left = binary(left, BinaryOp::And, right);
        }

        Ok(left)
    }

    /// Parse equality expression (== !=)
    fn parse_equality_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_comparison_expression()?;

        while let Some(op) = self.match_equality_op() {
            let right = self.parse_comparison_expression()?;
            left = binary(left, op, right);
        }

        Ok(left)
    }

    /// Parse comparison expression (< > <= >=)
    fn parse_comparison_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_additive_expression()?;

        while let Some(op) = self.match_comparison_op() {
            let right = self.parse_additive_expression()?;
            left = binary(left, op, right);
        }

        Ok(left)
    }

    /// Parse additive expression (+ -)
    fn parse_additive_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_multiplicative_expression()?;

        while let Some(op) = self.match_additive_op() {
            let right = self.parse_multiplicative_expression()?;
            left = binary(left, op, right);
        }

        Ok(left)
    }

    /// Parse multiplicative expression (* / %)
    fn parse_multiplicative_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_unary_expression()?;

        while let Some(op) = self.match_multiplicative_op() {
            let right = self.parse_unary_expression()?;
            left = binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> ParseResult<Expression> {
        let operator = if self.match_token(Token::Bang) {
            UnaryOp::Not
        } else if self.match_token(Token::Minus) {
            UnaryOp::Negate
        } else {
            return self.parse_postfix_expression();
        };

        let operand = self.parse_unary_expression()?;
        Ok(Expression::Unary {
            operator,
            operand: Box::new(operand),
        })
    }

    /// Parse a primary followed by `.name`, `[index]`, `?builtin` and `!default`
    fn parse_postfix_expression(&mut self) -> ParseResult<Expression> {
        let mut expr = self.parse_primary_expression()?;

        loop {
            if self.match_token(Token::Dot) {
                let property = self.expect_ident()?;
                expr = Expression::Member {
                    object: Box::new(expr),
                    property,
                };
            } else if self.match_token(Token::LBracket) {
                let index = self.parse_expression()?;
                self.expect(Token::RBracket)?;
                expr = Expression::Index {
                    object: Box::new(expr),
                    index: Box::new(index),
                };
            } else if self.match_token(Token::Question) {
                let name = self.expect_ident()?;
                expr = Expression::Builtin {
                    target: Box::new(expr),
                    name,
                };
            } else if self.match_token(Token::Bang) {
                // `x!` alone defaults to an empty string
                let fallback = if self.starts_primary() {
                    Some(Box::new(self.parse_postfix_expression()?))
                } else {
                    None
                };
                expr = Expression::Default {
                    value: Box::new(expr),
                    fallback,
                };
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_primary_expression(&mut self) -> ParseResult<Expression> {
        let Some((token, span)) = self.advance().cloned() else {
            return Err(self.unexpected_eof("expression"));
        };

        match token {
            Token::Number(n) => parse_number(n, span).map(Expression::Literal),
            Token::String(s) => Ok(Expression::Literal(Value::String(unescape(s)))),
            Token::True => Ok(Expression::Literal(Value::Bool(true))),
            Token::False => Ok(Expression::Literal(Value::Bool(false))),
            Token::Null => Ok(Expression::Literal(Value::Null)),
            Token::Ident(name) => Ok(Expression::Variable(name.to_string())),
            Token::LParen => {
                let expr = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            other => Err(ParseError::unexpected_token(span, "expression", other.to_string())),
        }
    }

    // Helper methods for matching operators

    fn match_equality_op(&mut self) -> Option<BinaryOp> {
        if self.match_token(Token::EqualsEquals) {
            Some(BinaryOp::Equals)
        } else if self.match_token(Token::NotEquals) {
            Some(BinaryOp::NotEquals)
        } else {
            None
        }
    }

    fn match_comparison_op(&mut self) -> Option<BinaryOp> {
        if self.match_token(Token::LessThanEquals) {
            Some(BinaryOp::LessThanOrEqual)
        } else if self.match_token(Token::GreaterThanEquals) {
            Some(BinaryOp::GreaterThanOrEqual)
        } else if self.match_token(Token::LessThan) {
            Some(BinaryOp::LessThan)
        } else if self.match_token(Token::GreaterThan) {
            Some(BinaryOp::GreaterThan)
        } else {
            None
        }
    }

    fn match_additive_op(&mut self) -> Option<BinaryOp> {
        if self.match_token(Token::Plus) {
            Some(BinaryOp::Add)
        } else if self.match_token(Token::Minus) {
            Some(BinaryOp::Subtract)
        } else {
            None
        }
    }

    fn match_multiplicative_op(&mut self) -> Option<BinaryOp> {
        if self.match_token(Token::Star) {
            Some(BinaryOp::Multiply)
        } else if self.match_token(Token::Slash) {
            Some(BinaryOp::Divide)
        } else if self.match_token(Token::Percent) {
            Some(BinaryOp::Modulo)
        } else {
            None
        }
    }

    // Helper methods

    fn peek(&self) -> Option<&(Token<'src>, TokenSpan)> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&(Token<'src>, TokenSpan)> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn check(&self, token: Token) -> bool {
        if let Some((t, _)) = self.peek() {
            std::mem::discriminant(t) == std::mem::discriminant(&token)
        } else {
            false
        }
    }

    fn match_token(&mut self, token: Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn starts_primary(&self) -> bool {
        matches!(
            self.peek(),
            Some((
                Token::Ident(_)
                    | Token::String(_)
                    | Token::Number(_)
                    | Token::True
                    | Token::False
                    | Token::Null
                    | Token::LParen,
                _
            ))
        )
    }

    fn expect(&mut self, token: Token) -> ParseResult<()> {
        if self.check(token.clone()) {
            self.advance();
            return Ok(());
        }

        match self.peek() {
            Some((found, span)) => Err(ParseError::unexpected_token(
                *span,
                token.to_string(),
                found.to_string(),
            )),
            None => Err(self.unexpected_eof(token.to_string())),
        }
    }

    fn expect_ident(&mut self) -> ParseResult<String> {
        match self.peek() {
            Some((Token::Ident(name), _)) => {
                let name = name.to_string();
                self.advance();
                Ok(name)
            }
            Some((found, span)) => Err(ParseError::unexpected_token(
                *span,
                "identifier",
                found.to_string(),
            )),
            None => Err(self.unexpected_eof("identifier")),
        }
    }

    fn unexpected_eof(&self, expected: impl Into<String>) -> ParseError {
        ParseError::UnexpectedEof {
            span: TokenSpan::new(self.source_len, self.source_len),
            expected: expected.into(),
        }
    }
}

fn binary(left: Expression, operator: BinaryOp, right: Expression) -> Expression {
    Expression::Binary {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }
}

fn parse_number(literal: &str, span: TokenSpan) -> ParseResult<Value> {
    if let Ok(integer) = literal.parse::<i64>() {
        return Ok(Value::from(integer));
    }
    literal
        .parse::<f64>()
        .map(number)
        .map_err(|_| ParseError::unexpected_token(span, "number", literal))
}

/// Strip the surrounding quotes and resolve backslash escapes
fn unescape(literal: &str) -> String {
    let inner = &literal[1..literal.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

/// Parse one expression (the text between `${` and `}`)
pub fn parse(source: &str) -> ParseResult<Expression> {
    Parser::new(source)?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn var(name: &str) -> Expression {
        Expression::Variable(name.to_string())
    }

    #[test]
    fn test_member_chain() {
        let expr = parse("order.customer.name").unwrap();
        assert_eq!(expr.path().as_deref(), Some("order.customer.name"));
    }

    #[test]
    fn test_precedence() {
        let expr = parse("1 + 2 * 3 == 7 && ok").unwrap();
        let Expression::Binary { operator, left, .. } = expr else {
            panic!("expected binary expression");
        };
        assert_eq!(operator, BinaryOp::And);
        assert!(matches!(*left, Expression::Binary { operator: BinaryOp::Equals, .. }));
    }

    #[test]
    fn test_default_operator() {
        assert_eq!(
            parse(r#"city!"Paris""#).unwrap(),
            Expression::Default {
                value: Box::new(var("city")),
                fallback: Some(Box::new(Expression::Literal(json!("Paris")))),
            }
        );
        assert_eq!(
            parse("city!").unwrap(),
            Expression::Default {
                value: Box::new(var("city")),
                fallback: None,
            }
        );
    }

    #[test]
    fn test_bang_before_operand_is_negation() {
        assert_eq!(
            parse("!done").unwrap(),
            Expression::Unary {
                operator: UnaryOp::Not,
                operand: Box::new(var("done")),
            }
        );
    }

    #[test]
    fn test_index_and_builtin() {
        let expr = parse(r#"items[0]["label"]?upper_case"#).unwrap();
        let Expression::Builtin { target, name } = expr else {
            panic!("expected builtin");
        };
        assert_eq!(name, "upper_case");
        assert!(matches!(*target, Expression::Index { .. }));
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            parse(r#"'it\'s' + "a\tb""#).unwrap(),
            binary(
                Expression::Literal(json!("it's")),
                BinaryOp::Add,
                Expression::Literal(json!("a\tb")),
            )
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(parse("42").unwrap(), Expression::Literal(json!(42)));
        assert_eq!(parse("2.5").unwrap(), Expression::Literal(json!(2.5)));
    }

    #[test]
    fn test_errors_carry_spans() {
        let err = parse("a +").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { span, .. } if span.start == 3));

        let err = parse("a b").unwrap_err();
        assert_eq!(err.span(), TokenSpan::new(2, 3));

        let err = parse("a.").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));

        assert!(parse("").is_err());
        assert!(parse("(a").is_err());
    }
}
