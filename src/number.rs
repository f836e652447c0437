use num::ToPrimitive;

use crate::sentinel::Sentinel;
use crate::sexp::Sexp;

fn arithmetic<F>(a: &Sexp, b: &Sexp, op: F) -> Sexp
    where F: Fn(f64, f64) -> Sexp {

    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => op(x, y),
        _ => Sentinel::NotANumber.to_sexp(),
    }
}

fn comparison<F>(a: &Sexp, b: &Sexp, cmp: F) -> Sexp
    where F: Fn(f64, f64) -> bool {

    arithmetic(a, b, |x, y| Sexp::truth(cmp(x, y)))
}

pub fn add(a: &Sexp, b: &Sexp) -> Sexp {
    arithmetic(a, b, |x, y| Sexp::number(x + y))
}

pub fn sub(a: &Sexp, b: &Sexp) -> Sexp {
    arithmetic(a, b, |x, y| Sexp::number(x - y))
}

pub fn mul(a: &Sexp, b: &Sexp) -> Sexp {
    arithmetic(a, b, |x, y| Sexp::number(x * y))
}

pub fn divide(a: &Sexp, b: &Sexp) -> Sexp {
    arithmetic(a, b, |x, y| {
        if y == 0.0 {
            Sentinel::DivisionByZero.to_sexp()
        } else {
            Sexp::number(x / y)
        }
    })
}

/// Remainder of the operands truncated toward zero, sign of the dividend.
pub fn modulo(a: &Sexp, b: &Sexp) -> Sexp {
    arithmetic(a, b, |x, y| {
        if y == 0.0 {
            return Sentinel::DivisionByZero.to_sexp();
        }
        match (x.to_i64(), y.to_i64()) {
            // (% 5 0.5) truncates the divisor to zero
            (Some(_), Some(0)) => Sentinel::DivisionByZero.to_sexp(),
            (Some(n), Some(m)) => Sexp::number(n.wrapping_rem(m) as f64),
            _ => Sentinel::NotANumber.to_sexp(),
        }
    })
}

pub fn lt(a: &Sexp, b: &Sexp) -> Sexp {
    comparison(a, b, |x, y| x < y)
}

pub fn gt(a: &Sexp, b: &Sexp) -> Sexp {
    comparison(a, b, |x, y| x > y)
}

pub fn lte(a: &Sexp, b: &Sexp) -> Sexp {
    comparison(a, b, |x, y| x <= y)
}

pub fn gte(a: &Sexp, b: &Sexp) -> Sexp {
    comparison(a, b, |x, y| x >= y)
}

/// Integral values print without a fractional part.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        if let Some(i) = n.to_i64() {
            return i.to_string();
        }
    }
    n.to_string()
}
