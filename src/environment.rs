use std::fmt;

use crate::sentinel::Sentinel;
use crate::sexp::{Sexp, NIL};

/// A chain of frames, stored as ordinary Lisp data.
///
/// The handle is the pair `(frame . parent)`, where `frame` is
/// `(symbols . values)` with both lists kept in lock-step, most recent binding
/// first, and `parent` is the enclosing environment's pair or `()` for the
/// root. Cloning shares the chain, so a binding added through one handle is
/// visible through every other.
#[derive(Clone)]
pub struct Environment(Sexp);

impl Environment {
    /// An empty root environment.
    pub fn new() -> Environment {
        Environment::make(NIL, NIL, NIL)
    }

    fn make(symbols: Sexp, values: Sexp, parent: Sexp) -> Environment {
        Environment(Sexp::cons(Sexp::cons(symbols, values), parent))
    }

    /// A child frame binding `symbols` positionally to `values`.
    ///
    /// The lists are used as given, without checking that their lengths
    /// agree.
    pub fn extend(symbols: Sexp, values: Sexp, parent: &Environment) ->
        Environment {

        Environment::make(symbols, values, parent.0.clone())
    }

    pub fn as_sexp(&self) -> &Sexp {
        &self.0
    }

    pub fn parent(&self) -> Option<Environment> {
        let parent = self.0.cdr();
        if parent.is_pair() {
            Some(Environment(parent))
        } else {
            None
        }
    }

    pub fn symbols(&self) -> Sexp {
        self.0.car().car()
    }

    pub fn values(&self) -> Sexp {
        self.0.car().cdr()
    }

    /// Number of bindings in the innermost frame, shadowed ones included.
    pub fn frame_len(&self) -> usize {
        self.symbols().length()
    }

    /// Finds the most recent binding of `symbol`, innermost frame first.
    /// Returns the `UNDEFINED` sentinel if no frame binds it.
    pub fn lookup(&self, symbol: &Sexp) -> Sexp {
        let name = match symbol.as_symbol() {
            Some(name) => name,
            None => return Sentinel::Undefined.to_sexp(),
        };

        let mut env = Some(self.clone());
        while let Some(frame) = env {
            if let Some(value) = frame.lookup_local(name) {
                return value;
            }
            env = frame.parent();
        }

        Sentinel::Undefined.to_sexp()
    }

    // Walks the value list with the soft accessors, so a symbol whose value
    // list ran out (a missing argument) is bound to () and still shadows any
    // outer binding.
    fn lookup_local(&self, name: &str) -> Option<Sexp> {
        let mut symbols = self.symbols();
        let mut values = self.values();
        while let Some((symbol, rest)) = symbols.as_pair() {
            if symbol.as_symbol() == Some(name) {
                return Some(values.car());
            }
            symbols = rest;
            values = values.cdr();
        }
        None
    }

    /// Adds a binding to the innermost frame and returns `value`.
    ///
    /// Earlier bindings of the same symbol stay in the frame, shadowed.
    pub fn bind(&self, symbol: Sexp, value: Sexp) -> Sexp {
        tracing::debug!("binding {}", symbol);
        let symbols = Sexp::cons(symbol, self.symbols());
        let values = Sexp::cons(value.clone(), self.values());
        self.0.set_car(Sexp::cons(symbols, values));
        value
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

impl Default for Environment {
    fn default() -> Environment {
        Environment::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<environment {}>", self.symbols())
    }
}
