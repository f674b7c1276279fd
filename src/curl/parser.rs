//! Token-level parsers for the values that follow a curl flag.
//!
//! Every parser here works on a slice that already starts at the value, the
//! flag and its separating whitespace have been consumed by the caller.

use winnow::{
    ModalResult, Parser,
    combinator::{alt, delimited, not, separated_pair, terminated},
    token::{one_of, rest, take_till, take_until, take_while},
};

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// `"..."`, the content up to the next double quote. No unescaping.
pub fn parse_double_quoted_data<'a>(s: &mut &'a str) -> ModalResult<&'a str> {
    delimited('"', take_until(0.., '"'), '"').parse_next(s)
}

/// `'...'`, the content up to the next single quote.
pub fn parse_single_quoted_data<'a>(s: &mut &'a str) -> ModalResult<&'a str> {
    delimited('\'', take_until(0.., '\''), '\'').parse_next(s)
}

pub fn parse_quoted_data<'a>(s: &mut &'a str) -> ModalResult<&'a str> {
    alt((parse_double_quoted_data, parse_single_quoted_data)).parse_next(s)
}

/// A run of anything but whitespace, quotes included.
pub fn parse_bare_token<'a>(s: &mut &'a str) -> ModalResult<&'a str> {
    take_till(1.., char::is_whitespace).parse_next(s)
}

/// Unquoted url: stops at whitespace and at either quote character.
pub fn parse_bare_url<'a>(s: &mut &'a str) -> ModalResult<&'a str> {
    take_till(1.., |c: char| c.is_whitespace() || is_quote(c)).parse_next(s)
}

/// Body fragment: double quoted, then single quoted, then a bare token.
pub fn parse_data_value<'a>(s: &mut &'a str) -> ModalResult<&'a str> {
    alt((
        parse_double_quoted_data,
        parse_single_quoted_data,
        parse_bare_token,
    ))
    .parse_next(s)
}

/// Any word (`[A-Za-z0-9_]+`), as accepted between `curl -X` and the url.
pub fn parse_word<'a>(s: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., is_word_char).parse_next(s)
}

/// An HTTP verb written in uppercase letters only.
///
/// The run must end the word, so `Post` or `POST2` are rejected instead of
/// yielding a truncated verb.
pub fn parse_method<'a>(s: &mut &'a str) -> ModalResult<&'a str> {
    terminated(
        take_while(1.., |c: char| c.is_ascii_uppercase()),
        not(one_of(is_word_char)),
    )
    .parse_next(s)
}

/// Split `Name: value` at the first colon, trimming both halves.
///
/// Fails when there is no colon or when either half is empty after trimming.
pub fn parse_header_fragment<'a>(s: &mut &'a str) -> ModalResult<(&'a str, &'a str)> {
    separated_pair(take_until(0.., ':'), ':', rest)
        .map(|(name, value): (&str, &str)| (name.trim(), value.trim()))
        .verify(|(name, value): &(&str, &str)| !name.is_empty() && !value.is_empty())
        .parse_next(s)
}
