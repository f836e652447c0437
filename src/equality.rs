use crate::sexp::Sexp;

pub trait LispEq {
    fn is_identical(&self, other: &Self) -> bool {
        self as *const _ == other as *const _
    }

    fn lisp_eq(&self, other: &Self) -> bool {
        self.is_identical(other)
    }
}

impl LispEq for Sexp {
    fn is_identical(&self, other: &Sexp) -> bool {
        self.ptr_eq(other)
    }

    /// Atoms compare by value, everything else by identity.
    fn lisp_eq(&self, other: &Sexp) -> bool {
        if self.is_nil() || other.is_nil() {
            self.is_nil() && other.is_nil()
        } else if let Some(n) = self.as_number() {
            Some(n) == other.as_number()
        } else if let s@Some(_) = self.as_symbol() {
            s == other.as_symbol()
        } else if let s@Some(_) = self.as_string() {
            s == other.as_string()
        } else {
            self.is_identical(other)
        }
    }
}

#[cfg(test)]
mod test {
    use super::LispEq;
    use crate::environment::Environment;
    use crate::sexp::{Sexp, NIL};

    #[test]
    fn test_atoms_by_value() {
        assert!(Sexp::number(7.0).lisp_eq(&Sexp::number(7.0)));
        assert!(Sexp::symbol("a").lisp_eq(&Sexp::symbol("a")));
        assert!(Sexp::string("a").lisp_eq(&Sexp::string("a")));
        assert!(!Sexp::symbol("a").lisp_eq(&Sexp::string("a")));
        assert!(!Sexp::number(1.0).lisp_eq(&Sexp::number(2.0)));
    }

    #[test]
    fn test_nil() {
        assert!(NIL.lisp_eq(&Sexp::nil()));
        assert!(!NIL.lisp_eq(&Sexp::number(0.0)));
        assert!(!Sexp::symbol("NIL").lisp_eq(&NIL));
    }

    #[test]
    fn test_pairs_by_identity() {
        let a = Sexp::cons(Sexp::number(1.0), NIL);
        let b = Sexp::cons(Sexp::number(1.0), NIL);
        assert!(a.lisp_eq(&a.clone()));
        assert!(!a.lisp_eq(&b));
    }

    #[test]
    fn test_procedures_reflexive() {
        let closure = Sexp::closure(NIL, NIL, Environment::new());
        assert!(closure.lisp_eq(&closure));
        let other = Sexp::closure(NIL, NIL, Environment::new());
        assert!(!closure.lisp_eq(&other));
    }

    #[test]
    fn test_nan_is_not_eq() {
        let nan = Sexp::number(std::f64::NAN);
        assert!(!nan.lisp_eq(&nan));
    }
}
