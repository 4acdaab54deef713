// Edit scripts: `kind(pie) | toggle_y(cost) | title("Costs")`

use super::lexer::{column_name, string_literal, ws};
use crate::editor::FieldEdit;
use anyhow::{anyhow, Result};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::{eof, map, opt},
    multi::separated_list0,
    sequence::{delimited, preceded, terminated},
    IResult,
};

/// `name(arg)` with whitespace allowed around every token
fn command<'a, O, F>(name: &'static str, arg: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    preceded(ws(tag(name)), delimited(ws(char('(')), ws(arg), ws(char(')'))))
}

/// Parse one edit command. An empty argument clears the field.
pub fn parse_edit(input: &str) -> IResult<&str, FieldEdit> {
    alt((
        map(command("kind", opt(column_name)), FieldEdit::ChartKind),
        map(command("toggle_y", column_name), FieldEdit::ToggleYAxis),
        map(command("x", opt(column_name)), FieldEdit::XAxis),
        map(command("title", opt(string_literal)), FieldEdit::Title),
        map(command("description", opt(string_literal)), FieldEdit::Description),
    ))(input)
}

pub fn parse_edit_script(input: &str) -> IResult<&str, Vec<FieldEdit>> {
    separated_list0(ws(char('|')), parse_edit)(input)
}

/// Parse a complete edit script, rejecting trailing input
pub fn edit_script_from_str(input: &str) -> Result<Vec<FieldEdit>> {
    terminated(parse_edit_script, ws(eof))(input)
        .map(|(_, edits)| edits)
        .map_err(|e| anyhow!("Parse error: {:?}", e))
}
