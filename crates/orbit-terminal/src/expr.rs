//! Restricted arithmetic evaluator for the `calc` command.
//!
//! A recursive-descent parser over the grammar
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := '-' factor | '(' expr ')' | number
//! number := digits ['.' digits] | '.' digits
//! ```
//!
//! Nothing else: no identifiers, no function calls, no host evaluation.
//! Input is sanitized first; anything outside the grammar's alphabet never
//! reaches the parser.

use std::iter::Peekable;
use std::str::Chars;

use orbit_types::error::{OrbitError, Result};

/// Maximum nesting depth to keep pathological inputs from overflowing the
/// stack.
const MAX_DEPTH: usize = 64;

/// Strip every character outside the arithmetic alphabet
/// (digits, `+ - * / ( )` and `.`).
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.'))
        .collect()
}

/// Evaluate a sanitized arithmetic expression.
pub fn evaluate(expr: &str) -> Result<f64> {
    let mut parser = Parser {
        chars: expr.chars().peekable(),
        depth: 0,
    };
    let value = parser.parse_expr()?;
    if let Some(&c) = parser.chars.peek() {
        return Err(OrbitError::Expr(format!("unexpected character '{c}'")));
    }
    Ok(value)
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
    depth: usize,
}

impl Parser<'_> {
    fn parse_expr(&mut self) -> Result<f64> {
        let mut value = self.parse_term()?;
        while let Some(&op) = self.chars.peek() {
            match op {
                '+' => {
                    self.chars.next();
                    value += self.parse_term()?;
                },
                '-' => {
                    self.chars.next();
                    value -= self.parse_term()?;
                },
                _ => break,
            }
        }
        Ok(value)
    }

    fn parse_term(&mut self) -> Result<f64> {
        let mut value = self.parse_factor()?;
        while let Some(&op) = self.chars.peek() {
            match op {
                '*' => {
                    self.chars.next();
                    value *= self.parse_factor()?;
                },
                '/' => {
                    self.chars.next();
                    let divisor = self.parse_factor()?;
                    if divisor == 0.0 {
                        return Err(OrbitError::Expr("division by zero".to_string()));
                    }
                    value /= divisor;
                },
                _ => break,
            }
        }
        Ok(value)
    }

    fn parse_factor(&mut self) -> Result<f64> {
        if self.depth >= MAX_DEPTH {
            return Err(OrbitError::Expr("expression too deeply nested".to_string()));
        }
        match self.chars.peek() {
            Some('-') => {
                self.chars.next();
                self.depth += 1;
                let value = self.parse_factor()?;
                self.depth -= 1;
                Ok(-value)
            },
            Some('(') => {
                self.chars.next();
                self.depth += 1;
                let value = self.parse_expr()?;
                self.depth -= 1;
                if self.chars.next() != Some(')') {
                    return Err(OrbitError::Expr("expected ')'".to_string()));
                }
                Ok(value)
            },
            Some(c) if c.is_ascii_digit() || *c == '.' => self.parse_number(),
            Some(c) => Err(OrbitError::Expr(format!("unexpected character '{c}'"))),
            None => Err(OrbitError::Expr("unexpected end of expression".to_string())),
        }
    }

    fn parse_number(&mut self) -> Result<f64> {
        let mut literal = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() || c == '.' {
                literal.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        literal
            .parse::<f64>()
            .map_err(|_| OrbitError::Expr(format!("malformed number '{literal}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_arithmetic_alphabet() {
        assert_eq!(sanitize("2 + 2"), "2+2");
        assert_eq!(sanitize("(1.5*-3)/x"), "(1.5*-3)/");
        assert_eq!(sanitize("; DROP TABLE"), "");
        assert_eq!(sanitize("abc"), "");
    }

    #[test]
    fn addition() {
        assert_eq!(evaluate("2+2").unwrap(), 4.0);
    }

    #[test]
    fn precedence_multiplication_first() {
        assert_eq!(evaluate("2+3*4").unwrap(), 14.0);
        assert_eq!(evaluate("20-10/2").unwrap(), 15.0);
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(evaluate("(2+3)*4").unwrap(), 20.0);
        assert_eq!(evaluate("((1+1))*((2))").unwrap(), 4.0);
    }

    #[test]
    fn division_produces_fractions() {
        assert_eq!(evaluate("10/4").unwrap(), 2.5);
    }

    #[test]
    fn decimal_literals() {
        assert_eq!(evaluate("1.5*2").unwrap(), 3.0);
        assert_eq!(evaluate(".5+.5").unwrap(), 1.0);
    }

    #[test]
    fn unary_minus() {
        assert_eq!(evaluate("-5+10").unwrap(), 5.0);
        assert_eq!(evaluate("-(2+3)").unwrap(), -5.0);
        assert_eq!(evaluate("2*-3").unwrap(), -6.0);
        assert_eq!(evaluate("--4").unwrap(), 4.0);
    }

    #[test]
    fn left_associative_subtraction() {
        assert_eq!(evaluate("10-3-2").unwrap(), 5.0);
    }

    #[test]
    fn division_by_zero_is_an_error() {
        let err = evaluate("1/0").unwrap_err();
        assert!(format!("{err}").contains("division by zero"));
        assert!(evaluate("5/(2-2)").is_err());
    }

    #[test]
    fn malformed_inputs_are_errors() {
        assert!(evaluate("").is_err());
        assert!(evaluate("2+").is_err());
        assert!(evaluate("(1+2").is_err());
        assert!(evaluate("1.2.3").is_err());
        assert!(evaluate("1//2").is_err());
        assert!(evaluate(")").is_err());
    }

    #[test]
    fn trailing_garbage_is_an_error() {
        assert!(evaluate("1+2)").is_err());
    }

    #[test]
    fn nesting_depth_is_bounded() {
        let deep = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        assert!(evaluate(&deep).is_err());
        let ok = format!("{}1{}", "(".repeat(20), ")".repeat(20));
        assert_eq!(evaluate(&ok).unwrap(), 1.0);
    }
}
