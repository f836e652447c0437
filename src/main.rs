use std::fs;

use anyhow::{Context, Result};
use clap::{crate_description, crate_version, App, Arg};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use thiserror::Error;

use lisp::{evaluate, global_environment, Environment, Reader};

/// Errors in a script given on the command line
#[derive(Debug, Error)]
enum InputError {
    #[error("{path}: unbalanced parentheses")]
    Unbalanced { path: String },
}

const HELP: &str = "
Example expressions:
  42                                   ; self-evaluating number
  (set x 10)                           ; bind variable
  x                                    ; look up variable
  (+ 2 3)                              ; 5
  (* (+ 1 2) (- 5 2))                  ; 9
  (% 17 5)                             ; 2
  (eq 7 7)                             ; T
  '(a b c)                             ; (a b c), unevaluated
  (if (> 5 3) 'yes 'no)                ; yes
  (cond ((< 5 3) 'first)
        ((> 5 3) 'second)
        (T 'third))                    ; second
  (define square (x) (* x x))          ; define a function
  (square 7)                           ; 49
  ((lambda (x) (* x 2)) 5)             ; 10
  (cons 1 '(2 3))                      ; (1 2 3)
";

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let matches = App::new("lisp")
        .version(crate_version!())
        .about(crate_description!())
        .arg(Arg::with_name("quiet")
            .short("q")
            .long("quiet")
            .help("Do not print the banner"))
        .arg(Arg::with_name("FILE")
            .index(1)
            .help("Evaluate the expressions in FILE instead of starting a \
                REPL"))
        .get_matches();

    let env = global_environment();
    match matches.value_of("FILE") {
        Some(path) => run_file(path, &env),
        None => repl(&env, matches.is_present("quiet")),
    }
}

fn run_file(path: &str, env: &Environment) -> Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path))?;
    if !is_complete(&source) {
        return Err(InputError::Unbalanced { path: path.to_string() }.into());
    }
    for expr in Reader::new(&source) {
        println!("{}", evaluate(&expr, env));
    }
    Ok(())
}

/// True once every '(' outside a string literal has been closed.
///
/// Surplus ')' also counts as complete, the reader skips them.
fn is_complete(text: &str) -> bool {
    let mut depth = 0i64;
    let mut in_string = false;
    let mut prev = None;
    for c in text.chars() {
        if c == '"' && prev != Some('\\') {
            in_string = !in_string;
        }
        if !in_string {
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
        }
        prev = Some(c);
    }
    depth <= 0
}

fn repl(env: &Environment, quiet: bool) -> Result<()> {
    if !quiet {
        println!("=====================================");
        println!("  Lisp REPL");
        println!("  Type 'exit' or 'quit' to exit");
        println!("  Type 'help' for examples");
        println!("=====================================");
        println!();
    }

    let mut rl = DefaultEditor::new()?;
    let mut buffer = String::new();

    loop {
        let prompt = if buffer.is_empty() { "lisp> " } else { "...   " };
        let line = match rl.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                buffer.clear();
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };

        if buffer.is_empty() {
            match line.trim() {
                "exit" | "quit" => break,
                "help" => {
                    println!("{}", HELP);
                    continue;
                }
                "" => continue,
                _ => {}
            }
        }

        buffer.push_str(&line);
        buffer.push('\n');
        if !is_complete(&buffer) {
            continue;
        }

        let _ = rl.add_history_entry(buffer.trim_end());
        let mut printed = false;
        for expr in Reader::new(&buffer) {
            println!("{}", evaluate(&expr, env));
            printed = true;
        }
        if !printed {
            println!("Parse error: could not read expression");
        }
        println!();
        buffer.clear();
    }

    println!("Goodbye!");
    Ok(())
}

#[cfg(test)]
mod test {
    use super::is_complete;

    #[test]
    fn test_is_complete() {
        assert!(is_complete("(+ 1 2)"));
        assert!(is_complete("atom"));
        assert!(!is_complete("(define f (x)\n"));
        assert!(is_complete("(f \"(\")"));
        assert!(!is_complete("(f \"a\\\")\""));
        assert!(is_complete("())"));
    }
}
