mod lexer;

use either::{Either, Left, Right};

use crate::sexp::{ListBuilder, Sexp, NIL};
use self::lexer::{classify_atom, next_token, Token};

/// Reads one expression from the start of `input`, ignoring the rest.
///
/// Empty input reads as `()`, the same value as the literal `()`.
pub fn parse(input: &str) -> Sexp {
    Reader::new(input).read_expr()
}

/// Recursive-descent reader over a string.
///
/// Reading never fails. Input that ends early produces whatever list was
/// built so far, and a token that cannot start an expression reads as `()`.
pub struct Reader<'a> {
    input: &'a str,
}

impl<'a> Reader<'a> {
    pub fn new(input: &'a str) -> Self {
        Reader { input }
    }

    /// The unread part of the input.
    pub fn rest(&self) -> &'a str {
        self.input
    }

    pub fn at_end(&self) -> bool {
        self.input.trim_start().is_empty()
    }

    fn peek_token(&self) -> Token<'a> {
        next_token(self.input).0
    }

    fn read_token(&mut self) -> Token<'a> {
        let (tok, rest) = next_token(self.input);
        self.input = rest;
        tok
    }

    pub fn read_expr(&mut self) -> Sexp {
        match self.peek_token() {
            // Left unread
            Token::End | Token::RightParen => return NIL,
            _ => {}
        }

        match self.read_token() {
            Token::LeftParen => self.read_list(),
            Token::Quote => {
                let quoted = self.read_expr();
                Sexp::list(&[Sexp::symbol("quote"), quoted])
            }
            Token::Str(s) => Sexp::string(s),
            Token::Dot => Sexp::symbol("."),
            Token::Atom(text) => match classify_atom(text) {
                Left(n) => Sexp::number(n),
                Right(name) => Sexp::symbol(name),
            },
            Token::End | Token::RightParen => NIL,
        }
    }

    fn read_list(&mut self) -> Sexp {
        let mut list = ListBuilder::new();

        loop {
            match self.peek_token() {
                Token::RightParen => {
                    self.read_token();
                    break;
                }
                Token::End => break,
                _ => {}
            }
            match self.read_element() {
                Left(elem) => list.push(elem),
                Right((elem, tail)) => {
                    list.push(elem);
                    return list.finish_with(tail);
                }
            }
        }

        list.finish()
    }

    // Right is an element followed by a dotted tail, which ends the list.
    fn read_element(&mut self) -> Either<Sexp, (Sexp, Sexp)> {
        let elem = self.read_expr();
        if self.peek_token() != Token::Dot {
            return Left(elem);
        }
        self.read_token();
        let tail = self.read_expr();
        if self.peek_token() == Token::RightParen {
            self.read_token();
        }
        Right((elem, tail))
    }
}

/// Yields each top-level expression in turn.
impl<'a> Iterator for Reader<'a> {
    type Item = Sexp;

    fn next(&mut self) -> Option<Sexp> {
        loop {
            if self.at_end() {
                return None;
            }
            let before = self.input.len();
            let expr = self.read_expr();
            if self.input.len() < before {
                return Some(expr);
            }
            // Only an unmatched ')' is left unread.
            tracing::warn!("skipping unmatched ')'");
            self.input = &self.input.trim_start()[1..];
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{parse, Reader};
    use crate::equality::LispEq;
    use crate::sexp::Sexp;

    fn round_trip(input: &str) -> String {
        parse(input).to_string()
    }

    #[test]
    fn test_read_0() {
        assert_eq!(parse("0").as_number(), Some(0.0));
    }

    #[test]
    fn test_atoms() {
        assert_eq!(parse("  42  ").as_number(), Some(42.0));
        assert_eq!(parse("-2.5").as_number(), Some(-2.5));
        assert_eq!(parse("foo").as_symbol(), Some("foo"));
        assert_eq!(parse("12abc").as_symbol(), Some("12abc"));
        assert_eq!(parse("Foo").as_symbol(), Some("Foo"));
        assert_eq!(parse("\"a (b) c\"").as_string(), Some("a (b) c"));
    }

    #[test]
    fn test_empty_input_is_nil() {
        assert!(parse("").is_nil());
        assert!(parse("   \n\t").is_nil());
        // indistinguishable from reading the empty list
        assert!(parse("()").is_nil());
        assert!(parse("(   )").is_nil());
    }

    #[test]
    fn test_lists() {
        assert_eq!(round_trip("(a b c)"), "(a b c)");
        assert_eq!(round_trip("( 1  (2 3)\n4 )"), "(1 (2 3) 4)");
        assert_eq!(round_trip("(() ())"), "(() ())");
        assert_eq!(parse("(1 2 3)").length(), 3);
    }

    #[test]
    fn test_quote_sugar() {
        assert_eq!(round_trip("'x"), "(quote x)");
        assert_eq!(round_trip("'(1 2)"), "(quote (1 2))");
        assert_eq!(round_trip("(a 'b)"), "(a (quote b))");
        assert_eq!(round_trip("'"), "(quote ())");
    }

    #[test]
    fn test_dotted_pair() {
        let pair = parse("(1 . 2)");
        let (head, tail) = pair.as_pair().unwrap();
        assert_eq!(head.as_number(), Some(1.0));
        assert_eq!(tail.as_number(), Some(2.0));
    }

    #[test]
    fn test_dotted_list() {
        assert_eq!(round_trip("(a b . c)"), "(a b . c)");
        assert_eq!(round_trip("(a . (b c))"), "(a b c)");
        assert_eq!(round_trip("(a .)"), "(a)");
        assert_eq!(round_trip("(a .b)"), "(a .b)");
        assert_eq!(round_trip("(1 .5)"), "(1 0.5)");
    }

    #[test]
    fn test_trailing_content_ignored() {
        assert_eq!(round_trip("(+ 1 2) (garbage"), "(+ 1 2)");
        assert_eq!(round_trip("a b"), "a");
        let mut reader = Reader::new("(a . b c)");
        assert_eq!(reader.read_expr().to_string(), "(a . b)");
        assert_eq!(reader.rest(), " c)");
    }

    #[test]
    fn test_partial_input() {
        assert_eq!(round_trip("(1 2"), "(1 2)");
        assert_eq!(round_trip("(1 (2 3"), "(1 (2 3))");
        assert_eq!(round_trip("(a . "), "(a)");
        assert!(parse(")").is_nil());
    }

    #[test]
    fn test_reprint_reparses() {
        for input in &["(a b c)", "(1 (2.5 \"s\") . x)", "(quote (x y))",
            "((a . b) (c . d))", "(-7 nested (deeper (still)))"] {
            let first = parse(input);
            let second = parse(&first.to_string());
            assert_eq!(first.to_string(), second.to_string());
            assert!(!first.lisp_eq(&second));
            let (a, b) = (first.car(), second.car());
            assert_eq!(a.is_pair(), b.is_pair());
            if !a.is_pair() {
                assert!(a.lisp_eq(&b));
            }
        }
    }

    #[test]
    fn test_unterminated_string_is_symbol() {
        assert_eq!(parse("\"abc def").as_symbol(), Some("\"abc def"));
        assert_eq!(parse("\"abc\"").as_string(), Some("abc"));
    }

    #[test]
    fn test_long_list() {
        let items: Vec<String> = (0..100_000).map(|i| i.to_string()).collect();
        let list = parse(&format!("({})", items.join(" ")));
        assert_eq!(list.length(), 100_000);
        assert_eq!(list.car().as_number(), Some(0.0));
    }

    #[test]
    fn test_reader_iterates() {
        let exprs: Vec<String> = Reader::new("(set x 1)\n'y 3 \"s\"")
            .map(|expr| expr.to_string())
            .collect();
        assert_eq!(exprs, vec!["(set x 1)", "(quote y)", "3", "\"s\""]);
    }

    #[test]
    fn test_reader_skips_stray_paren() {
        let exprs: Vec<Sexp> = Reader::new(") a ) b").collect();
        assert_eq!(exprs.len(), 2);
        assert_eq!(exprs[1].as_symbol(), Some("b"));
        assert!(Reader::new("  ").next().is_none());
    }
}
