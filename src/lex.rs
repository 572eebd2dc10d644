use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Op::Add => write!(f, "+"),
            Op::Subtract => write!(f, "-"),
            Op::Multiply => write!(f, "*"),
            Op::Divide => write!(f, "/"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'de> {
    pub kind: TokenKind,
    pub literal: &'de str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    Whitespace,
    LeftParen,
    RightParen,
    Number,
    Operator(Op),
    Illegal,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lit = self.literal;
        match self.kind {
            TokenKind::Whitespace => write!(f, "WHITESPACE"),
            TokenKind::LeftParen => write!(f, "LEFT_PAREN {lit}"),
            TokenKind::RightParen => write!(f, "RIGHT_PAREN {lit}"),
            TokenKind::Number => write!(f, "NUMBER {lit}"),
            TokenKind::Operator(op) => write!(f, "OPERATOR {op}"),
            TokenKind::Illegal => write!(f, "ILLEGAL {lit}"),
        }
    }
}

pub struct Lexer<'de> {
    rest: &'de str,
    pub byte: usize,
}

impl<'de> Lexer<'de> {
    pub fn new(input: &'de str) -> Self {
        Lexer {
            rest: input,
            byte: 0,
        }
    }
}

impl<'de> Iterator for Lexer<'de> {
    type Item = Token<'de>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut chars = self.rest.chars();
        let c = chars.next()?;
        let literal = &self.rest[..c.len_utf8()];
        let cur = self.rest;
        self.rest = chars.as_str();
        self.byte += c.len_utf8();

        let token = match c {
            '(' => Token {
                kind: TokenKind::LeftParen,
                literal,
            },
            ')' => Token {
                kind: TokenKind::RightParen,
                literal,
            },
            '+' => Token {
                kind: TokenKind::Operator(Op::Add),
                literal,
            },
            '-' => Token {
                kind: TokenKind::Operator(Op::Subtract),
                literal,
            },
            '*' => Token {
                kind: TokenKind::Operator(Op::Multiply),
                literal,
            },
            '/' => Token {
                kind: TokenKind::Operator(Op::Divide),
                literal,
            },
            ' ' | '\r' | '\t' | '\n' => {
                let first_non_whitespace = cur
                    .find(|c| !matches!(c, ' ' | '\r' | '\t' | '\n'))
                    .unwrap_or(cur.len());

                let literal = &cur[..first_non_whitespace];

                let extra_bytes = literal.len() - c.len_utf8();
                self.byte += extra_bytes;
                self.rest = &self.rest[extra_bytes..];

                Token {
                    kind: TokenKind::Whitespace,
                    literal,
                }
            }
            '0'..='9' => {
                let first_non_digit = cur
                    .find(|c| !matches!(c, '0'..='9' | '.'))
                    .unwrap_or(cur.len());

                let mut literal = &cur[..first_non_digit];

                // at most one decimal point, and never as the last character
                let mut dotted = literal.splitn(3, '.');
                match (dotted.next(), dotted.next(), dotted.next()) {
                    (Some(one), Some(two), Some(_)) => {
                        literal = &literal[..one.len() + two.len() + 1]
                    }
                    (Some(one), Some(""), None) => literal = &literal[..one.len()],
                    _ => {}
                };

                let extra_bytes = literal.len() - c.len_utf8();
                self.byte += extra_bytes;
                self.rest = &self.rest[extra_bytes..];

                Token {
                    kind: TokenKind::Number,
                    literal,
                }
            }
            _ => Token {
                kind: TokenKind::Illegal,
                literal,
            },
        };

        Some(token)
    }
}
