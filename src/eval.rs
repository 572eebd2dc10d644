use std::num::ParseFloatError;

use miette::Diagnostic;
use thiserror::Error;

use crate::lex::Op;
use crate::parse::Statement;

#[derive(Error, Debug, Diagnostic)]
pub enum EvalError {
    #[error("invalid number \"{literal}\"")]
    #[diagnostic(help("numeric leaves must parse as 64-bit floats"))]
    InvalidNumber {
        literal: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("`{op}` only accepts 2 arguments, got {found}")]
    #[diagnostic(help("`-` and `/` are binary; only `+` and `*` take any number of operands"))]
    Arity { op: Op, found: usize },

    #[error("divided by zero")]
    #[diagnostic(help("the divisor evaluates to exactly 0"))]
    DividedByZero,
}

pub fn evaluate(statement: &Statement<'_>) -> Result<f64, EvalError> {
    match statement {
        Statement::Leaf(literal) => {
            literal
                .parse()
                .map_err(|source| EvalError::InvalidNumber {
                    literal: literal.to_string(),
                    source,
                })
        }
        Statement::Apply { op, operands } => {
            let values = operands
                .iter()
                .map(evaluate)
                .collect::<Result<Vec<_>, _>>()?;

            match op {
                Op::Add => Ok(values.iter().sum()),
                Op::Multiply => Ok(values.iter().product()),
                Op::Subtract => match values.as_slice() {
                    [lhs, rhs] => Ok(lhs - rhs),
                    _ => Err(EvalError::Arity {
                        op: *op,
                        found: values.len(),
                    }),
                },
                Op::Divide => match values.as_slice() {
                    [_, rhs] if *rhs == 0.0 => Err(EvalError::DividedByZero),
                    [lhs, rhs] => Ok(lhs / rhs),
                    _ => Err(EvalError::Arity {
                        op: *op,
                        found: values.len(),
                    }),
                },
            }
        }
    }
}
