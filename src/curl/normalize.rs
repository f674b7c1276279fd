use nom::{
    IResult,
    branch::alt,
    bytes::complete::{is_a, is_not, tag, take_while},
    character::complete::char,
    combinator::value,
    error::{Error, ErrorKind, context},
    multi::fold_many0,
    sequence::preceded,
};

/// Identify a shell line continuation: `\<whitespace*>\n`.
///
/// The whitespace run is consumed up to its last newline, anything after that
/// newline is left for the next piece.
pub fn slash_line_ending(input: &str) -> IResult<&str, &str> {
    let (_, trailing) = context(
        "Slash line ending",
        preceded(char('\\'), take_while(|c: char| c.is_whitespace())),
    )(input)?;

    match trailing.rfind('\n') {
        Some(last_newline) => {
            let consumed = '\\'.len_utf8() + last_newline + '\n'.len_utf8();
            Ok((&input[consumed..], &input[..consumed]))
        }
        None => Err(nom::Err::Error(Error::new(input, ErrorKind::CrLf))),
    }
}

fn normalized_piece(input: &str) -> IResult<&str, &str> {
    alt((
        value(" ", slash_line_ending),
        value(" ", is_a("\r\n")),
        is_not("\\\r\n"),
        tag("\\"),
    ))(input)
}

/// Flatten a pasted command onto one line.
///
/// Line continuations become a single space, any other run of `\r`/`\n`
/// becomes a single space, and the result is trimmed. Applying it twice gives
/// the same text as applying it once.
pub fn normalize_curl_text(input: &str) -> String {
    let joined = fold_many0(normalized_piece, String::new, |mut acc, piece| {
        acc.push_str(piece);
        acc
    })(input);

    match joined {
        Ok((_rest, joined)) => joined.trim().to_owned(),
        // Every character belongs to some piece.
        Err(_) => input.trim().to_owned(),
    }
}
