//! A minimal Lisp: a reader from text to s-expressions and an evaluator over
//! a chain of lexical environments.
//!
//! ```
//! let env = lisp::global_environment();
//! lisp::rep("(define square (x) (* x x))", &env);
//! assert_eq!(lisp::rep("(square 7)", &env), "49");
//! ```

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate maplit;

pub mod builtin;
pub mod environment;
pub mod equality;
pub mod number;
pub mod read;
pub mod runtime;
pub mod sentinel;
pub mod sexp;

pub use crate::builtin::global_environment;
pub use crate::environment::Environment;
pub use crate::equality::LispEq;
pub use crate::read::{parse, Reader};
pub use crate::runtime::{apply, evaluate};
pub use crate::sentinel::Sentinel;
pub use crate::sexp::{Sexp, NIL};

/// Reads one expression from `input`, evaluates it in `env` and renders the
/// result.
pub fn rep(input: &str, env: &Environment) -> String {
    evaluate(&parse(input), env).to_string()
}
