use std::fmt::Display;

use log::trace;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::lex::{Lexer, Op, Token, TokenKind};

#[derive(Error, Debug, Diagnostic)]
#[error("found \"{found}\", expected {expected}")]
#[diagnostic(help("a statement is a number or `(<operator> <operand>...)`"))]
pub struct SyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    bad_bit: SourceSpan,

    pub found: String,
    pub expected: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'de> {
    Leaf(&'de str),
    Apply {
        op: Op,
        operands: Vec<Statement<'de>>,
    },
}

impl Display for Statement<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Leaf(literal) => write!(f, "{literal}"),
            Statement::Apply { op, operands } => {
                write!(f, "({op}")?;
                for operand in operands {
                    write!(f, " {operand}")?;
                }
                write!(f, ")")
            }
        }
    }
}

pub struct Parser<'de> {
    filename: Option<&'de str>,
    whole: &'de str,
    lexer: Lexer<'de>,
    buf: Option<Token<'de>>,
}

impl<'de> Parser<'de> {
    pub fn new(filename: Option<&'de str>, whole: &'de str) -> Self {
        Parser {
            filename,
            whole,
            lexer: Lexer::new(whole),
            buf: None,
        }
    }

    pub fn parse(mut self) -> Result<Statement<'de>, SyntaxError> {
        let statement = self.parse_statement()?;

        // the statement must be followed by the end of the input
        match self.scan_ignore_whitespace() {
            None => Ok(statement),
            found => Err(self.syntax_error(found, "EOF")),
        }
    }

    fn parse_statement(&mut self) -> Result<Statement<'de>, SyntaxError> {
        match self.scan_ignore_whitespace() {
            Some(Token {
                kind: TokenKind::Number,
                literal,
            }) => return Ok(Statement::Leaf(literal)),
            Some(Token {
                kind: TokenKind::LeftParen,
                ..
            }) => {}
            found => return Err(self.syntax_error(found, "( or number")),
        }

        let op = match self.scan_ignore_whitespace() {
            Some(Token {
                kind: TokenKind::Operator(op),
                ..
            }) => op,
            found => return Err(self.syntax_error(found, "operator")),
        };

        // an application carries at least one operand
        match self.scan_ignore_whitespace() {
            Some(
                token @ Token {
                    kind: TokenKind::Number | TokenKind::LeftParen,
                    ..
                },
            ) => self.unscan(token),
            found => return Err(self.syntax_error(found, "number or (")),
        }

        let mut operands = Vec::new();
        loop {
            match self.scan_ignore_whitespace() {
                Some(
                    token @ Token {
                        kind: TokenKind::RightParen,
                        ..
                    },
                ) => {
                    self.unscan(token);
                    break;
                }
                Some(Token {
                    kind: TokenKind::Number,
                    literal,
                }) => operands.push(Statement::Leaf(literal)),
                Some(
                    token @ Token {
                        kind: TokenKind::LeftParen,
                        ..
                    },
                ) => {
                    self.unscan(token);
                    operands.push(self.parse_statement()?);
                }
                None => return Err(self.syntax_error(None, "number or )")),
                found => return Err(self.syntax_error(found, "number or ( or )")),
            }
        }

        match self.scan_ignore_whitespace() {
            Some(Token {
                kind: TokenKind::RightParen,
                ..
            }) => {}
            found => return Err(self.syntax_error(found, ")")),
        }

        Ok(Statement::Apply { op, operands })
    }

    fn scan(&mut self) -> Option<Token<'de>> {
        if let Some(token) = self.buf.take() {
            return Some(token);
        }
        self.lexer.next()
    }

    fn unscan(&mut self, token: Token<'de>) {
        self.buf = Some(token);
    }

    fn scan_ignore_whitespace(&mut self) -> Option<Token<'de>> {
        loop {
            match self.scan() {
                Some(Token {
                    kind: TokenKind::Whitespace,
                    ..
                }) => continue,
                token => {
                    if let Some(token) = &token {
                        trace!("scanned {token}");
                    }
                    return token;
                }
            }
        }
    }

    fn syntax_error(&self, found: Option<Token<'de>>, expected: &'static str) -> SyntaxError {
        let (found, bad_bit) = match found {
            Some(token) => (
                token.literal.to_string(),
                SourceSpan::from(self.lexer.byte - token.literal.len()..self.lexer.byte),
            ),
            None => (
                String::new(),
                SourceSpan::from(self.whole.len().saturating_sub(1)..self.whole.len()),
            ),
        };

        SyntaxError {
            src: NamedSource::new(self.filename.unwrap_or("<input>"), self.whole.to_string()),
            bad_bit,
            found,
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn parse(input: &str) -> Result<Statement<'_>, SyntaxError> {
        Parser::new(None, input).parse()
    }

    #[rstest]
    #[case("0")]
    #[case("7")]
    #[case("123")]
    #[case("4096")]
    fn parses_a_bare_literal(#[case] input: &str) {
        assert_eq!(parse(input).unwrap(), Statement::Leaf(input));
    }

    #[test]
    fn parses_a_flat_application() {
        assert_eq!(
            parse("(+ 1 2 4)").unwrap(),
            Statement::Apply {
                op: Op::Add,
                operands: vec![
                    Statement::Leaf("1"),
                    Statement::Leaf("2"),
                    Statement::Leaf("4"),
                ],
            }
        );
    }

    #[rstest]
    #[case("(+ 1 3)", Op::Add)]
    #[case("(- 1 3)", Op::Subtract)]
    #[case("(* 1 3)", Op::Multiply)]
    #[case("(/ 1 3)", Op::Divide)]
    fn recognizes_every_operator(#[case] input: &str, #[case] op: Op) {
        assert_eq!(
            parse(input).unwrap(),
            Statement::Apply {
                op,
                operands: vec![Statement::Leaf("1"), Statement::Leaf("3")],
            }
        );
    }

    #[test]
    fn parses_nested_operands() {
        assert_eq!(
            parse("(+ 1 (- (* 5 6 4) 3))").unwrap(),
            Statement::Apply {
                op: Op::Add,
                operands: vec![
                    Statement::Leaf("1"),
                    Statement::Apply {
                        op: Op::Subtract,
                        operands: vec![
                            Statement::Apply {
                                op: Op::Multiply,
                                operands: vec![
                                    Statement::Leaf("5"),
                                    Statement::Leaf("6"),
                                    Statement::Leaf("4"),
                                ],
                            },
                            Statement::Leaf("3"),
                        ],
                    },
                ],
            }
        );
    }

    #[test]
    fn arity_is_not_a_parse_time_constraint() {
        assert_eq!(
            parse("(- 1)").unwrap(),
            Statement::Apply {
                op: Op::Subtract,
                operands: vec![Statement::Leaf("1")],
            }
        );
    }

    #[test]
    fn is_insensitive_to_whitespace() {
        assert_eq!(
            parse("  (   *   1   3  )   ").unwrap(),
            parse("(* 1 3)").unwrap()
        );
    }

    #[rstest]
    #[case("", "", "( or number")]
    #[case("A", "A", "( or number")]
    #[case(")", ")", "( or number")]
    #[case("(", "", "operator")]
    #[case("(1)", "1", "operator")]
    #[case("((+ 1 2))", "(", "operator")]
    #[case("(*", "", "number or (")]
    #[case("(+)", ")", "number or (")]
    #[case("(+ *)", "*", "number or (")]
    #[case("(* 1", "", "number or )")]
    #[case("(+ 1 (- 2", "", "number or )")]
    #[case("(+ 1 -)", "-", "number or ( or )")]
    #[case("(+ 1 #)", "#", "number or ( or )")]
    #[case("(* 1 2) 123", "123", "EOF")]
    #[case("1 2", "2", "EOF")]
    fn rejects_malformed_input(
        #[case] input: &str,
        #[case] found: &str,
        #[case] expected: &str,
    ) {
        let err = parse(input).unwrap_err();
        assert_eq!(err.found, found);
        assert_eq!(err.expected, expected);
    }

    #[test]
    fn display_round_trips_the_notation() {
        let statement = parse("(+ 1 (- (* 5 6 4) 3))").unwrap();
        assert_eq!(statement.to_string(), "(+ 1 (- (* 5 6 4) 3))");
    }
}
