use either::{Either, Left, Right};
use nom::branch::alt;
use nom::bytes::complete::{take_while, take_while1};
use nom::character::complete::{char, satisfy};
use nom::combinator::{map, opt, peek, value};
use nom::sequence::{terminated, tuple};
use nom::IResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    LeftParen,
    RightParen,
    Quote,
    Dot,
    Str(&'a str),
    Atom(&'a str),
    End,
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || c == '(' || c == ')'
}

// No escapes. Without a closing quote the rest of the input, opening quote
// included, is an ordinary atom.
fn string_literal(input: &str) -> IResult<&str, Token> {
    let (rest, (_, body, close)) = tuple((char('"'),
        take_while(|c: char| c != '"'), opt(char('"'))))(input)?;
    match close {
        Some(_) => Ok((rest, Token::Str(body))),
        None => Ok((rest, Token::Atom(input))),
    }
}

// Only a lone dot separates a dotted tail; ".5" and "..." are atoms.
fn dot(input: &str) -> IResult<&str, ()> {
    value((), terminated(char('.'),
        peek(satisfy(|c| c.is_whitespace() || c == ')'))))(input)
}

fn atom(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !is_delimiter(c))(input)
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::LeftParen, char('(')),
        value(Token::RightParen, char(')')),
        value(Token::Quote, char('\'')),
        string_literal,
        value(Token::Dot, dot),
        map(atom, Token::Atom),
    ))(input)
}

/// Skips leading whitespace and splits off the next token.
pub fn next_token(input: &str) -> (Token, &str) {
    let input = input.trim_start();
    match token(input) {
        Ok((rest, tok)) => (tok, rest),
        // Every non-empty input starts with some token.
        Err(_) => (Token::End, input),
    }
}

/// An atom is a number if the whole text parses as one.
pub fn classify_atom(text: &str) -> Either<f64, &str> {
    match text.parse::<f64>() {
        Ok(n) => Left(n),
        Err(_) => Right(text),
    }
}
