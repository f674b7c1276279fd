use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_till, take_till1, take_while, take_while1},
    combinator::{eof, map},
    error::{Error, ErrorKind, context},
    multi::fold_many0,
    sequence::{preceded, terminated},
};
use winnow::error::{ContextError, ErrMode};

use crate::curl::parser::{
    parse_bare_url, parse_data_value, parse_header_fragment, parse_method, parse_quoted_data,
    parse_word,
};

const CURL_CMD: &str = "curl";

fn multispace0(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c.is_whitespace())(input)
}

fn multispace1(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_whitespace())(input)
}

/// Run a winnow value parser from inside a nom pipeline.
fn winnow_value<'a, O, P>(mut parser: P) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    P: winnow::Parser<&'a str, O, ErrMode<ContextError>>,
{
    move |input: &'a str| {
        let mut rest = input;
        match parser.parse_next(&mut rest) {
            Ok(value) => Ok((rest, value)),
            Err(_) => Err(nom::Err::Error(Error::new(input, ErrorKind::Verify))),
        }
    }
}

/// One of `names`, tried in order, followed by at least one whitespace.
fn flag<'a>(names: &'static [&'static str]) -> impl Fn(&'a str) -> IResult<&'a str, &'a str> {
    move |input: &'a str| {
        for name in names {
            if let Ok(found) = terminated(tag(*name), multispace1)(input) {
                return Ok(found);
            }
        }
        Err(nom::Err::Error(Error::new(input, ErrorKind::Tag)))
    }
}

/// Collect every match of `item`, leftmost first and non-overlapping.
///
/// `item` is only tried where a token starts, i.e. at the beginning of the
/// input or right after whitespace. When it fails there the whole token is
/// skipped; when it succeeds whatever is left of the current token is skipped.
pub fn scan_all<'a, O, F>(input: &'a str, item: F) -> Vec<O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    let step = alt((
        map(terminated(item, take_till(|c: char| c.is_whitespace())), Some),
        map(take_till1(|c: char| c.is_whitespace()), |_| None),
    ));

    context(
        "scan all",
        fold_many0(preceded(multispace0, step), Vec::new, |mut acc, found| {
            if let Some(found) = found {
                acc.push(found);
            }
            acc
        }),
    )(input)
    .map(|(_rest, found)| found)
    .unwrap_or_default()
}

pub fn scan_first<'a, O, F>(input: &'a str, item: F) -> Option<O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    scan_all(input, item).into_iter().next()
}

macro_rules! parse_command {
    ($name:ident, $value:expr, $($flag:expr),+) => {
        pub fn $name(input: &str) -> IResult<&str, &str> {
            context(
                stringify!($name),
                preceded(flag(&[$($flag),+]), winnow_value($value)),
            )(input)
        }
    };
}

parse_command!(method_parse, parse_method, "-X");
parse_command!(header_parse, parse_quoted_data, "-H");
parse_command!(cookie_parse, parse_quoted_data, "-b");
parse_command!(
    data_parse,
    parse_data_value,
    "--data-raw",
    "--data-binary",
    "--data",
    "-d"
);

/// A bare `-d`/`--data` token, the ones that imply a POST.
pub fn post_data_flag_parse(input: &str) -> IResult<&str, &str> {
    context("post data flag parse", flag(&["--data", "-d"]))(input)
}

fn curl_word(input: &str) -> IResult<&str, &str> {
    context("curl word", terminated(tag(CURL_CMD), alt((multispace1, eof))))(input)
}

/// Whether a `curl` word appears anywhere as a token of its own.
pub fn is_curl(input: &str) -> bool {
    scan_first(input, curl_word).is_some()
}

/// `curl` plus an optional `-X <WORD>` before the target.
fn curl_target<'a, P>(target: P) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str>
where
    P: winnow::Parser<&'a str, &'a str, ErrMode<ContextError>> + Clone,
{
    let method_before_target =
        terminated(preceded(flag(&["-X"]), winnow_value(parse_word)), multispace1);

    preceded(
        terminated(tag(CURL_CMD), multispace1),
        alt((
            preceded(method_before_target, winnow_value(target.clone())),
            winnow_value(target),
        )),
    )
}

pub fn quoted_url_parse(input: &str) -> IResult<&str, &str> {
    context("quoted url parse", curl_target(parse_quoted_data))(input)
}

pub fn bare_url_parse(input: &str) -> IResult<&str, &str> {
    context("bare url parse", curl_target(parse_bare_url))(input)
}

/// The target url; a quoted one anywhere wins over an unquoted one.
pub fn url_extract(input: &str) -> &str {
    scan_first(input, quoted_url_parse)
        .or_else(|| scan_first(input, bare_url_parse))
        .unwrap_or_default()
}

/// `-X` value when present, else POST when a data flag is present, else GET.
pub fn method_extract(input: &str) -> &str {
    match scan_first(input, method_parse) {
        Some(method) => method,
        None if scan_first(input, post_data_flag_parse).is_some() => "POST",
        None => "GET",
    }
}

/// Every well-formed `-H` fragment as a trimmed `(name, value)` pair, in order.
///
/// Like every flag, `-H` only counts where a token starts: in `-H 'a: 1'-H 'b: 2'`
/// the second flag is glued to the first value and is not seen.
pub fn headers_extract(input: &str) -> Vec<(&str, &str)> {
    scan_all(input, header_parse)
        .into_iter()
        .filter_map(|mut fragment| parse_header_fragment(&mut fragment).ok())
        .collect()
}

pub fn cookie_extract(input: &str) -> Option<&str> {
    scan_first(input, cookie_parse)
}

/// Non-empty data fragments in order of appearance.
pub fn datas_extract(input: &str) -> Vec<&str> {
    scan_all(input, data_parse)
        .into_iter()
        .filter(|data| !data.is_empty())
        .collect()
}
