use std::borrow;
use std::cell::RefCell;
use std::fmt;
use std::iter::DoubleEndedIterator;
use std::mem;
use std::rc::Rc;

use crate::environment::Environment;
use crate::number;

/// The empty list. It is also the only false value.
pub const NIL: Sexp = Sexp(None);

enum SexpData {
    Number(f64),
    Symbol(String),
    String(String),
    // Cells so that frames can be extended and dotted tails patched in place.
    Pair(RefCell<Sexp>, RefCell<Sexp>),
    Closure(Closure),
    Builtin(Builtin),
}

/// Handle to a Lisp datum. Cloning shares the datum; `None` is the empty list.
///
/// Closures and the environments they capture can form reference cycles,
/// which are never reclaimed.
#[derive(Clone)]
pub struct Sexp(Option<Rc<SexpData>>);

/// A user-defined procedure together with the environment it was created in.
#[derive(Clone)]
pub struct Closure {
    params: Sexp,
    body: Sexp,
    env: Environment,
}

pub type BuiltinFn = fn(&Sexp, &Environment) -> Sexp;

/// A primitive procedure implemented in Rust.
#[derive(Clone, Copy)]
pub struct Builtin {
    name: &'static str,
    func: BuiltinFn,
}

// Unlinks a uniquely owned spine one pair at a time, so dropping a long list
// or a long frame does not recurse once per element.
impl Drop for Sexp {
    fn drop(&mut self) {
        let mut next = self.0.take();
        while let Some(rc) = next {
            next = match Rc::try_unwrap(rc) {
                Ok(SexpData::Pair(car, cdr)) => {
                    drop(car);
                    let mut tail = cdr.into_inner();
                    tail.0.take()
                }
                _ => None,
            };
        }
    }
}

impl Closure {
    pub fn params(&self) -> &Sexp {
        &self.params
    }

    pub fn body(&self) -> &Sexp {
        &self.body
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }
}

impl Builtin {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn call(&self, args: &Sexp, env: &Environment) -> Sexp {
        (self.func)(args, env)
    }
}

impl Sexp {
    fn from_data(data: SexpData) -> Sexp {
        Sexp(Some(Rc::new(data)))
    }

    fn data(&self) -> Option<&SexpData> {
        self.0.as_ref().map(|rc| &**rc)
    }

    pub fn nil() -> Sexp {
        NIL
    }

    pub fn number(n: f64) -> Sexp {
        Sexp::from_data(SexpData::Number(n))
    }

    pub fn symbol<S: ToString>(s: S) -> Sexp {
        Sexp::from_data(SexpData::Symbol(s.to_string()))
    }

    pub fn string<S: ToString>(s: S) -> Sexp {
        Sexp::from_data(SexpData::String(s.to_string()))
    }

    pub fn cons(car: Sexp, cdr: Sexp) -> Sexp {
        Sexp::from_data(SexpData::Pair(RefCell::new(car), RefCell::new(cdr)))
    }

    pub fn closure(params: Sexp, body: Sexp, env: Environment) -> Sexp {
        Sexp::from_data(SexpData::Closure(Closure { params, body, env }))
    }

    pub fn builtin(name: &'static str, func: BuiltinFn) -> Sexp {
        Sexp::from_data(SexpData::Builtin(Builtin { name, func }))
    }

    /// The canonical truth value, the symbol `T`.
    pub fn t() -> Sexp {
        Sexp::symbol("T")
    }

    pub fn truth(b: bool) -> Sexp {
        if b {
            Sexp::t()
        } else {
            NIL
        }
    }

    pub fn list<E: borrow::Borrow<Sexp>, I: IntoIterator<Item=E>>(iter: I) ->
        Sexp where I::IntoIter : DoubleEndedIterator {

        let mut res = NIL;
        for elem in iter.into_iter().rev() {
            res = Sexp::cons(elem.borrow().clone(), res);
        }
        res
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_none()
    }

    pub fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    pub fn is_symbol(&self) -> bool {
        self.as_symbol().is_some()
    }

    pub fn is_string(&self) -> bool {
        self.as_string().is_some()
    }

    pub fn is_pair(&self) -> bool {
        match self.data() {
            Some(SexpData::Pair(..)) => true,
            _ => false,
        }
    }

    /// True for the empty list and for pairs. Does not walk the chain.
    pub fn is_list(&self) -> bool {
        self.is_nil() || self.is_pair()
    }

    pub fn is_truthy(&self) -> bool {
        !self.is_nil()
    }

    pub fn is_closure(&self) -> bool {
        self.as_closure().is_some()
    }

    pub fn is_builtin(&self) -> bool {
        self.as_builtin().is_some()
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.data() {
            Some(SexpData::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self.data() {
            Some(SexpData::Symbol(s)) => Some(&s[..]),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self.data() {
            Some(SexpData::String(s)) => Some(&s[..]),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<(Sexp, Sexp)> {
        match self.data() {
            Some(SexpData::Pair(car, cdr)) =>
                Some((car.borrow().clone(), cdr.borrow().clone())),
            _ => None,
        }
    }

    pub fn as_closure(&self) -> Option<&Closure> {
        match self.data() {
            Some(SexpData::Closure(closure)) => Some(closure),
            _ => None,
        }
    }

    pub fn as_builtin(&self) -> Option<Builtin> {
        match self.data() {
            Some(SexpData::Builtin(builtin)) => Some(*builtin),
            _ => None,
        }
    }

    /// Pointer identity. Two empty lists are always identical.
    pub fn ptr_eq(&self, other: &Sexp) -> bool {
        match (&self.0, &other.0) {
            (None, None) => true,
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn car(&self) -> Sexp {
        match self.as_pair() {
            Some((car, _)) => car,
            None => {
                tracing::warn!("car called on non-cons cell {}", self);
                NIL
            }
        }
    }

    pub fn cdr(&self) -> Sexp {
        match self.as_pair() {
            Some((_, cdr)) => cdr,
            None => {
                tracing::warn!("cdr called on non-cons cell {}", self);
                NIL
            }
        }
    }

    pub fn cadr(&self) -> Sexp {
        self.cdr().car()
    }

    pub fn caddr(&self) -> Sexp {
        self.cdr().cdr().car()
    }

    pub fn cadddr(&self) -> Sexp {
        self.cdr().cdr().cdr().car()
    }

    // Returns false if `self` is not a pair.
    pub(crate) fn set_car(&self, value: Sexp) -> bool {
        match self.data() {
            Some(SexpData::Pair(car, _)) => {
                let old = mem::replace(&mut *car.borrow_mut(), value);
                drop(old);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn set_cdr(&self, value: Sexp) -> bool {
        match self.data() {
            Some(SexpData::Pair(_, cdr)) => {
                let old = mem::replace(&mut *cdr.borrow_mut(), value);
                drop(old);
                true
            }
            _ => false,
        }
    }

    /// Iterates the elements of a list, stopping at the first non-pair tail.
    pub fn iter(&self) -> ListIter {
        ListIter(self.clone())
    }

    /// Number of pairs in the spine of the list.
    pub fn length(&self) -> usize {
        self.iter().count()
    }

    /// A fresh copy of the spine of `front` whose last tail is `back`.
    pub fn append(front: &Sexp, back: &Sexp) -> Sexp {
        let mut builder = ListBuilder::new();
        for elem in front.iter() {
            builder.push(elem);
        }
        builder.finish_with(back.clone())
    }
}

pub struct ListIter(Sexp);

impl Iterator for ListIter {
    type Item = Sexp;

    fn next(&mut self) -> Option<Sexp> {
        let (car, cdr) = self.0.as_pair()?;
        self.0 = cdr;
        Some(car)
    }
}

/// Builds a list front to back by patching the tail of the last pair.
pub struct ListBuilder {
    head: Sexp,
    last: Sexp,
}

impl ListBuilder {
    pub fn new() -> ListBuilder {
        ListBuilder { head: NIL, last: NIL }
    }

    pub fn push(&mut self, elem: Sexp) {
        let cell = Sexp::cons(elem, NIL);
        if self.head.is_nil() {
            self.head = cell.clone();
        } else {
            self.last.set_cdr(cell.clone());
        }
        self.last = cell;
    }

    pub fn finish(self) -> Sexp {
        self.head
    }

    /// Ends the list with `tail` instead of the empty list.
    pub fn finish_with(self, tail: Sexp) -> Sexp {
        if self.head.is_nil() {
            tail
        } else {
            self.last.set_cdr(tail);
            self.head
        }
    }
}

impl Default for ListBuilder {
    fn default() -> ListBuilder {
        ListBuilder::new()
    }
}

impl fmt::Display for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some((a, b)) = self.as_pair() {
            let mut head = b;
            let mut items = vec![a];
            while let Some((a, b)) = head.as_pair() {
                items.push(a);
                head = b;
            }
            write!(f, "(")?;
            for (n, x) in items.into_iter().enumerate() {
                if n > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", x)?;
            }
            if head.is_nil() {
                write!(f, ")")
            } else {
                write!(f, " . {})", head)
            }
        } else if self.is_nil() {
            write!(f, "()")
        } else if let Some(n) = self.as_number() {
            write!(f, "{}", number::format_number(n))
        } else if let Some(s) = self.as_symbol() {
            write!(f, "{}", s)
        } else if let Some(s) = self.as_string() {
            write!(f, "\"{}\"", s)
        } else if self.is_closure() {
            write!(f, "#<closure>")
        } else {
            write!(f, "#<primitive>")
        }
    }
}

// Closures reach environments which reach closures, so a derived Debug
// would never finish.
impl fmt::Debug for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<closure {} {}>", self.params, self.body)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<builtin {}>", self.name)
    }
}
