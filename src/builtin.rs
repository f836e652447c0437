use crate::environment::Environment;
use crate::equality::LispEq;
use crate::number;
use crate::sexp::{BuiltinFn, Sexp};

// Every primitive takes its arguments as a list and reads them with the soft
// accessors, so a missing argument is () and extra arguments are ignored.

fn add(args: &Sexp, _: &Environment) -> Sexp {
    number::add(&args.car(), &args.cadr())
}

fn sub(args: &Sexp, _: &Environment) -> Sexp {
    number::sub(&args.car(), &args.cadr())
}

fn mul(args: &Sexp, _: &Environment) -> Sexp {
    number::mul(&args.car(), &args.cadr())
}

fn div(args: &Sexp, _: &Environment) -> Sexp {
    number::divide(&args.car(), &args.cadr())
}

fn rem(args: &Sexp, _: &Environment) -> Sexp {
    number::modulo(&args.car(), &args.cadr())
}

fn less(args: &Sexp, _: &Environment) -> Sexp {
    number::lt(&args.car(), &args.cadr())
}

fn greater(args: &Sexp, _: &Environment) -> Sexp {
    number::gt(&args.car(), &args.cadr())
}

fn less_equal(args: &Sexp, _: &Environment) -> Sexp {
    number::lte(&args.car(), &args.cadr())
}

fn greater_equal(args: &Sexp, _: &Environment) -> Sexp {
    number::gte(&args.car(), &args.cadr())
}

fn eq(args: &Sexp, _: &Environment) -> Sexp {
    Sexp::truth(args.car().lisp_eq(&args.cadr()))
}

/// `T` for the empty list, `()` for anything else.
pub fn not(value: &Sexp) -> Sexp {
    Sexp::truth(value.is_nil())
}

fn prim_not(args: &Sexp, _: &Environment) -> Sexp {
    not(&args.car())
}

fn cons(args: &Sexp, _: &Environment) -> Sexp {
    Sexp::cons(args.car(), args.cadr())
}

fn car(args: &Sexp, _: &Environment) -> Sexp {
    args.car().car()
}

fn cdr(args: &Sexp, _: &Environment) -> Sexp {
    args.car().cdr()
}

fn null(args: &Sexp, _: &Environment) -> Sexp {
    not(&args.car())
}

fn list(args: &Sexp, _: &Environment) -> Sexp {
    args.clone()
}

fn length(args: &Sexp, _: &Environment) -> Sexp {
    Sexp::number(args.car().length() as f64)
}

fn append(args: &Sexp, _: &Environment) -> Sexp {
    Sexp::append(&args.car(), &args.cadr())
}

const PRIMITIVES: &[(&str, BuiltinFn)] = &[
    ("+", add),
    ("-", sub),
    ("*", mul),
    ("/", div),
    ("%", rem),
    ("<", less),
    (">", greater),
    ("<=", less_equal),
    (">=", greater_equal),
    ("eq", eq),
    ("not", prim_not),
    ("cons", cons),
    ("car", car),
    ("cdr", cdr),
    ("null", null),
    ("list", list),
    ("length", length),
    ("append", append),

    // word aliases
    ("add", add),
    ("sub", sub),
    ("mul", mul),
    ("div", div),
    ("mod", rem),
];

/// A fresh root environment holding the primitive procedures.
pub fn global_environment() -> Environment {
    let env = Environment::new();
    for &(name, func) in PRIMITIVES {
        env.bind(Sexp::symbol(name), Sexp::builtin(name, func));
    }
    env
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{global_environment, not, PRIMITIVES};
    use crate::read::parse;
    use crate::runtime::evaluate;
    use crate::sexp::{Sexp, NIL};

    fn comparison(input: &str, output: &str) {
        let expr = parse(input);
        assert_eq!(evaluate(&expr, &global_environment()).to_string(), output);
    }

    #[test]
    fn test_all_names_bound() {
        let env = global_environment();
        for &(name, _) in PRIMITIVES {
            assert!(env.lookup(&Sexp::symbol(name)).is_builtin(), "{}", name);
        }
        assert_eq!(env.frame_len(), PRIMITIVES.len());
    }

    #[test]
    fn test_aliases() {
        comparison("(add 2 3)", "5");
        comparison("(sub 2 3)", "-1");
        comparison("(mul 2 3)", "6");
        comparison("(div 3 2)", "1.5");
        comparison("(mod 17 5)", "2");
        comparison("(% 17 5)", "2");
    }

    #[test]
    fn test_comparison_results() {
        comparison("(< 5 10)", "T");
        comparison("(>= 10 10)", "T");
        comparison("(> 1 10)", "()");
        comparison("(<= 'a 10)", "ERROR:NOT_A_NUMBER");
    }

    #[test]
    fn test_eq() {
        comparison("(eq 7 7)", "T");
        comparison("(eq 'a 'a)", "T");
        comparison("(eq \"s\" \"s\")", "T");
        comparison("(eq '(1) '(1))", "()");
        comparison("(eq () ())", "T");
        comparison("(eq 0.1 0.10000000000000001)", "T");
    }

    #[test]
    fn test_not() {
        assert_eq!(not(&NIL).as_symbol(), Some("T"));
        assert!(not(&Sexp::number(0.0)).is_nil());
        comparison("(not ())", "T");
        comparison("(not 'x)", "()");
    }

    #[test]
    fn test_pairs() {
        comparison("(cons 1 '(2 3))", "(1 2 3)");
        comparison("(cons 1 2)", "(1 . 2)");
        comparison("(car '(a b c))", "a");
        comparison("(cdr '(a b c))", "(b c)");
        comparison("(car 5)", "()");
        comparison("(cdr ())", "()");
    }

    #[test]
    fn test_list_helpers() {
        comparison("(null ())", "T");
        comparison("(null '(1))", "()");
        comparison("(list 1 (+ 1 1) 'three)", "(1 2 three)");
        comparison("(length '(a b c))", "3");
        comparison("(length ())", "0");
        comparison("(append '(1 2) '(3))", "(1 2 3)");
    }

    #[test]
    fn test_missing_arguments_are_soft() {
        comparison("(+ 1)", "ERROR:NOT_A_NUMBER");
        comparison("(cons 1)", "(1)");
        comparison("(+ 1 2 3)", "3");
    }

    #[test]
    fn test_primitive_can_be_rebound() {
        let env = global_environment();
        evaluate(&parse("(set + -)"), &env);
        assert_eq!(evaluate(&parse("(+ 5 3)"), &env).to_string(), "2");
    }
}
