use std::collections::HashMap;

use crate::environment::Environment;
use crate::sentinel::Sentinel;
use crate::sexp::{ListBuilder, Sexp, NIL};

/// Forms whose operands are not all evaluated before the form runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialForm {
    Quote,
    Set,
    Define,
    Lambda,
    If,
    And,
    Or,
    Cond,
}

lazy_static! {
    static ref SPECIAL_FORMS: HashMap<&'static str, SpecialForm> = hashmap! {
        "quote" => SpecialForm::Quote,
        "set" => SpecialForm::Set,
        "define" => SpecialForm::Define,
        "lambda" => SpecialForm::Lambda,
        "if" => SpecialForm::If,
        "and" => SpecialForm::And,
        "or" => SpecialForm::Or,
        "cond" => SpecialForm::Cond,
    };
}

impl SpecialForm {
    pub fn from_name(name: &str) -> Option<SpecialForm> {
        SPECIAL_FORMS.get(name).copied()
    }

    /// Runs the form. `expr` is the whole form, keyword included.
    fn evaluate(self, expr: &Sexp, env: &Environment) -> Sexp {
        match self {
            SpecialForm::Quote => expr.cadr(),
            SpecialForm::Set => {
                let value = evaluate(&expr.caddr(), env);
                env.bind(expr.cadr(), value)
            }
            SpecialForm::Define => {
                let closure = Sexp::closure(expr.caddr(), expr.cadddr(),
                    env.clone());
                env.bind(expr.cadr(), closure)
            }
            SpecialForm::Lambda =>
                Sexp::closure(expr.cadr(), expr.caddr(), env.clone()),
            SpecialForm::If => {
                if evaluate(&expr.cadr(), env).is_truthy() {
                    evaluate(&expr.caddr(), env)
                } else {
                    evaluate(&expr.cadddr(), env)
                }
            }
            SpecialForm::And => {
                if evaluate(&expr.cadr(), env).is_nil() {
                    NIL
                } else {
                    evaluate(&expr.caddr(), env)
                }
            }
            SpecialForm::Or => {
                if evaluate(&expr.cadr(), env).is_truthy() {
                    Sexp::t()
                } else {
                    evaluate(&expr.caddr(), env)
                }
            }
            SpecialForm::Cond => {
                let mut clauses = expr.cdr();
                while !clauses.is_nil() {
                    let clause = clauses.car();
                    if evaluate(&clause.car(), env).is_truthy() {
                        return evaluate(&clause.cadr(), env);
                    }
                    clauses = clauses.cdr();
                }
                NIL
            }
        }
    }
}

/// Evaluates `expr` in `env`.
///
/// Errors never abort evaluation: they come back as sentinel symbols (see
/// `Sentinel`) or as `()`.
pub fn evaluate(expr: &Sexp, env: &Environment) -> Sexp {
    if let Some((head, tail)) = expr.as_pair() {
        if let Some(form) = head.as_symbol().and_then(SpecialForm::from_name) {
            return form.evaluate(expr, env);
        }
        let procedure = evaluate(&head, env);
        let args = evaluate_arguments(&tail, env);
        apply(&procedure, &args, env)
    } else if expr.is_symbol() {
        env.lookup(expr)
    } else {
        // (), numbers, strings and procedures evaluate to themselves
        expr.clone()
    }
}

/// Evaluates each element of `list` left to right into a fresh list.
pub fn evaluate_arguments(list: &Sexp, env: &Environment) -> Sexp {
    let mut builder = ListBuilder::new();
    let mut rest = list.clone();
    while let Some((arg, next)) = rest.as_pair() {
        builder.push(evaluate(&arg, env));
        rest = next;
    }
    if !rest.is_nil() {
        tracing::warn!("ignoring improper argument tail {}", rest);
    }
    builder.finish()
}

/// Calls `procedure` with already evaluated `args`.
///
/// A closure gets one new frame binding its parameters positionally, parented
/// at the environment it was created in. Surplus arguments are dropped and
/// missing ones read as `()`.
pub fn apply(procedure: &Sexp, args: &Sexp, env: &Environment) -> Sexp {
    if let Some(builtin) = procedure.as_builtin() {
        tracing::debug!("applying {} to {}", builtin.name(), args);
        builtin.call(args, env)
    } else if let Some(closure) = procedure.as_closure() {
        tracing::debug!("applying closure {} to {}", closure.params(), args);
        let frame = Environment::extend(closure.params().clone(), args.clone(),
            closure.env());
        evaluate(closure.body(), &frame)
    } else {
        Sentinel::NotAProcedure.to_sexp()
    }
}
