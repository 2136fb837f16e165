//! Safe arithmetic evaluator.
//!
//! Expressions are parsed by a hand-written recursive-descent parser into a
//! tree restricted to numeric literals, unary/binary arithmetic operators and
//! parentheses. No identifier, call, attribute or import construct is even
//! expressible in the grammar, so nothing beyond pure arithmetic can run.
//! Every failure (lex error, parse error, division by zero, non-finite
//! result) degrades to `None`.

/// Returns true if the message, with whitespace removed, is non-empty and
/// consists only of characters that can appear in an arithmetic expression.
///
/// This is a cheap prefilter; [`safe_eval`] still rejects anything the
/// grammar cannot parse.
pub fn looks_like_math(s: &str) -> bool {
    let mut seen = false;
    for c in s.chars() {
        if c.is_whitespace() {
            continue;
        }
        if !(c.is_ascii_digit() || ".+-*/%^()".contains(c)) {
            return false;
        }
        seen = true;
    }
    seen
}

/// Evaluates an arithmetic expression. `^` and `**` both denote
/// exponentiation (right-associative, binds tighter than unary minus on its
/// left).
pub fn safe_eval(expr: &str) -> Option<f64> {
    let tokens = lex(expr).ok()?;
    let mut parser = Parser { tokens, pos: 0 };
    let tree = parser.parse_expr().ok()?;
    if parser.pos != parser.tokens.len() {
        return None;
    }
    let value = eval_tree(&tree).ok()?;
    value.is_finite().then_some(value)
}

/// Renders an evaluation result: integral values print without a fractional
/// part, everything else as the float's default display.
pub fn format_number(value: f64) -> String {
    // 2^53: beyond this an f64 no longer represents every integer exactly
    if value == value.trunc() && value.abs() < 9_007_199_254_740_992.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LParen,
    RParen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EvalError;

#[derive(Debug)]
enum Expr {
    Number(f64),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Mod(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

fn lex(expr: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = expr.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            _ if c.is_whitespace() => i += 1,
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let value = literal.parse::<f64>().map_err(|_| EvalError)?;
                tokens.push(Token::Number(value));
            }
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                // two adjacent stars are the exponentiation operator
                if chars.get(i + 1) == Some(&'*') {
                    tokens.push(Token::Caret);
                    i += 2;
                } else {
                    tokens.push(Token::Star);
                    i += 1;
                }
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '%' => {
                tokens.push(Token::Percent);
                i += 1;
            }
            '^' => {
                tokens.push(Token::Caret);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            _ => return Err(EvalError),
        }
    }
    Ok(tokens)
}

/// Grammar:
/// ```text
/// expr  := term (('+'|'-') term)*
/// term  := unary (('*'|'/'|'%') unary)*
/// unary := ('+'|'-') unary | power
/// power := atom ('^' unary)?        -- right-associative
/// atom  := number | '(' expr ')'
/// ```
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token> {
        let t = self.peek();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn parse_expr(&mut self) -> Result<Expr, EvalError> {
        let mut node = self.parse_term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.bump();
                    node = Expr::Add(Box::new(node), Box::new(self.parse_term()?));
                }
                Some(Token::Minus) => {
                    self.bump();
                    node = Expr::Sub(Box::new(node), Box::new(self.parse_term()?));
                }
                _ => return Ok(node),
            }
        }
    }

    fn parse_term(&mut self) -> Result<Expr, EvalError> {
        let mut node = self.parse_unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.bump();
                    node = Expr::Mul(Box::new(node), Box::new(self.parse_unary()?));
                }
                Some(Token::Slash) => {
                    self.bump();
                    node = Expr::Div(Box::new(node), Box::new(self.parse_unary()?));
                }
                Some(Token::Percent) => {
                    self.bump();
                    node = Expr::Mod(Box::new(node), Box::new(self.parse_unary()?));
                }
                _ => return Ok(node),
            }
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, EvalError> {
        match self.peek() {
            Some(Token::Plus) => {
                self.bump();
                self.parse_unary()
            }
            Some(Token::Minus) => {
                self.bump();
                Ok(Expr::Neg(Box::new(self.parse_unary()?)))
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> Result<Expr, EvalError> {
        let base = self.parse_atom()?;
        if self.peek() == Some(Token::Caret) {
            self.bump();
            // right-associative; the exponent may carry its own unary sign
            let exponent = self.parse_unary()?;
            return Ok(Expr::Pow(Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn parse_atom(&mut self) -> Result<Expr, EvalError> {
        match self.bump() {
            Some(Token::Number(v)) => Ok(Expr::Number(v)),
            Some(Token::LParen) => {
                let node = self.parse_expr()?;
                match self.bump() {
                    Some(Token::RParen) => Ok(node),
                    _ => Err(EvalError),
                }
            }
            _ => Err(EvalError),
        }
    }
}

fn eval_tree(node: &Expr) -> Result<f64, EvalError> {
    match node {
        Expr::Number(v) => Ok(*v),
        Expr::Neg(inner) => Ok(-eval_tree(inner)?),
        Expr::Add(l, r) => Ok(eval_tree(l)? + eval_tree(r)?),
        Expr::Sub(l, r) => Ok(eval_tree(l)? - eval_tree(r)?),
        Expr::Mul(l, r) => Ok(eval_tree(l)? * eval_tree(r)?),
        Expr::Div(l, r) => {
            let rhs = eval_tree(r)?;
            if rhs == 0.0 {
                return Err(EvalError);
            }
            Ok(eval_tree(l)? / rhs)
        }
        Expr::Mod(l, r) => {
            let rhs = eval_tree(r)?;
            if rhs == 0.0 {
                return Err(EvalError);
            }
            let lhs = eval_tree(l)?;
            // floored modulo: result takes the divisor's sign
            Ok(lhs - rhs * (lhs / rhs).floor())
        }
        Expr::Pow(base, exp) => Ok(eval_tree(base)?.powf(eval_tree(exp)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_like_math_accepts_expression_characters_only() {
        assert!(looks_like_math("12+5"));
        assert!(looks_like_math("(1.5 * 2) % 3 ^ 2"));
        assert!(!looks_like_math("hello2"));
        assert!(!looks_like_math("2+2="));
        assert!(!looks_like_math(""));
        assert!(!looks_like_math("   "));
    }

    #[test]
    fn precedence_and_parentheses() {
        assert_eq!(safe_eval("2 + 3 * 4"), Some(14.0));
        assert_eq!(safe_eval("(2 + 3) * 4"), Some(20.0));
        assert_eq!(safe_eval("10 - 4 - 3"), Some(3.0));
        assert_eq!(safe_eval("2^3"), Some(8.0));
        assert_eq!(safe_eval("2 * 3 ^ 2"), Some(18.0));
    }

    #[test]
    fn exponentiation_is_right_associative() {
        assert_eq!(safe_eval("2^3^2"), Some(512.0));
    }

    #[test]
    fn double_star_spells_exponentiation_too() {
        assert_eq!(safe_eval("2**3"), Some(8.0));
        assert_eq!(safe_eval("2 ** 3 ** 2"), Some(512.0));
        assert_eq!(safe_eval("-2**2"), Some(-4.0));
        // single star stays multiplication
        assert_eq!(safe_eval("2*3"), Some(6.0));
        // a stray third star is not a valid operand
        assert_eq!(safe_eval("2***3"), None);
        assert_eq!(safe_eval("2 * * 3"), None);
    }

    #[test]
    fn unary_minus_binds_looser_than_power() {
        assert_eq!(safe_eval("-2^2"), Some(-4.0));
        assert_eq!(safe_eval("2^-1"), Some(0.5));
        assert_eq!(safe_eval("--3"), Some(3.0));
    }

    #[test]
    fn modulo_takes_divisor_sign() {
        assert_eq!(safe_eval("7 % 3"), Some(1.0));
        assert_eq!(safe_eval("-7 % 3"), Some(2.0));
    }

    #[test]
    fn division_and_modulo_by_zero_yield_none() {
        assert_eq!(safe_eval("10 / 0"), None);
        assert_eq!(safe_eval("10 % 0"), None);
        assert_eq!(safe_eval("1 / (2 - 2)"), None);
    }

    #[test]
    fn code_shaped_input_is_rejected_at_the_parse_level() {
        assert_eq!(safe_eval("__import__('os')"), None);
        assert_eq!(safe_eval("print(1)"), None);
        assert_eq!(safe_eval("x + 1"), None);
        assert_eq!(safe_eval("(1)(2)"), None);
    }

    #[test]
    fn malformed_expressions_yield_none() {
        assert_eq!(safe_eval(""), None);
        assert_eq!(safe_eval("()"), None);
        assert_eq!(safe_eval("1.2.3"), None);
        assert_eq!(safe_eval("2 +"), None);
        assert_eq!(safe_eval("(2 + 3"), None);
        assert_eq!(safe_eval("2 3"), None);
        assert_eq!(safe_eval("."), None);
    }

    #[test]
    fn overflowing_results_yield_none() {
        assert_eq!(safe_eval("9^9^9"), None);
    }

    #[test]
    fn fractional_results_survive() {
        assert_eq!(safe_eval("7 / 2"), Some(3.5));
    }

    #[test]
    fn format_number_drops_zero_fraction() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(-12.0), "-12");
        assert_eq!(format_number(3.5), "3.5");
        assert_eq!(format_number(0.25), "0.25");
    }
}
