// Shared tokens for the descriptor and edit-script DSLs

use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, is_not, tag, take_while, take_while1},
    character::complete::{char, multispace0},
    combinator::{map, opt, recognize, value},
    multi::separated_list0,
    sequence::{delimited, pair},
    IResult,
};

/// Wrap a parser so it skips surrounding whitespace
pub fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Bare identifier: a letter or underscore, then letters, digits or underscores
pub fn identifier(input: &str) -> IResult<&str, String> {
    map(
        recognize(pair(
            take_while1(|c: char| c.is_alphabetic() || c == '_'),
            take_while(|c: char| c.is_alphanumeric() || c == '_'),
        )),
        String::from,
    )(input)
}

/// Double-quoted string supporting `\"`, `\\` and `\n` escapes
pub fn string_literal(input: &str) -> IResult<&str, String> {
    let inner = escaped_transform(
        is_not("\\\""),
        '\\',
        alt((
            value("\\", tag("\\")),
            value("\"", tag("\"")),
            value("\n", tag("n")),
        )),
    );
    map(delimited(char('"'), opt(inner), char('"')), Option::unwrap_or_default)(input)
}

/// Column reference: identifier, or a quoted name for anything else
pub fn column_name(input: &str) -> IResult<&str, String> {
    alt((string_literal, identifier))(input)
}

/// `[a, b, "c d"]` or a single bare column
pub fn column_list(input: &str) -> IResult<&str, Vec<String>> {
    alt((
        delimited(
            ws(char('[')),
            separated_list0(ws(char(',')), ws(column_name)),
            ws(char(']')),
        ),
        map(column_name, |c| vec![c]),
    ))(input)
}
