//! A tiny interpreter for prefix ("Lisp-like") arithmetic notation.

pub mod eval;
pub mod lex;
pub mod parse;

pub use eval::{EvalError, evaluate};
pub use lex::{Lexer, Op, Token, TokenKind};
pub use parse::{Parser, Statement, SyntaxError};
