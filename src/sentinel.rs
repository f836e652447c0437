use std::fmt;

use crate::sexp::Sexp;

/// Error conditions that are reported as ordinary symbols.
///
/// Nothing distinguishes a sentinel from a symbol a program spelled the same
/// way; `recognize` only compares text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sentinel {
    NotANumber,
    DivisionByZero,
    Undefined,
    NotAProcedure,
}

impl Sentinel {
    pub fn as_str(self) -> &'static str {
        match self {
            Sentinel::NotANumber => "ERROR:NOT_A_NUMBER",
            Sentinel::DivisionByZero => "ERROR:DIVISION_BY_ZERO",
            Sentinel::Undefined => "UNDEFINED",
            Sentinel::NotAProcedure => "ERROR:NOT_A_FUNCTION",
        }
    }

    pub fn to_sexp(self) -> Sexp {
        Sexp::symbol(self.as_str())
    }

    pub fn recognize(value: &Sexp) -> Option<Sentinel> {
        let text = value.as_symbol()?;
        [
            Sentinel::NotANumber,
            Sentinel::DivisionByZero,
            Sentinel::Undefined,
            Sentinel::NotAProcedure,
        ].iter().copied().find(|sentinel| sentinel.as_str() == text)
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[test]
fn test_recognize() {
    let value = Sentinel::DivisionByZero.to_sexp();
    assert_eq!(value.as_symbol(), Some("ERROR:DIVISION_BY_ZERO"));
    assert_eq!(Sentinel::recognize(&value), Some(Sentinel::DivisionByZero));
    assert_eq!(Sentinel::recognize(&Sexp::symbol("UNDEFINED")),
        Some(Sentinel::Undefined));
    assert_eq!(Sentinel::recognize(&Sexp::string("UNDEFINED")), None);
    assert_eq!(Sentinel::recognize(&Sexp::symbol("x")), None);
}
