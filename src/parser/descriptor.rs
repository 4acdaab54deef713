// Compact descriptor syntax:
// chart(kind: bar, x: region, y: [sales, cost], title: "Sales", description: "...")

use super::lexer::{column_list, column_name, string_literal, ws};
use crate::ir::VisualizationDescriptor;
use anyhow::{anyhow, Result};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::{eof, map},
    multi::separated_list0,
    sequence::{preceded, terminated},
    IResult,
};

#[derive(Debug)]
enum DescriptorArg {
    Kind(String),
    X(String),
    Y(Vec<String>),
    Title(String),
    Description(String),
}

/// Parse a `chart(...)` descriptor. Every argument is optional.
pub fn parse_descriptor(input: &str) -> IResult<&str, VisualizationDescriptor> {
    let (input, _) = ws(tag("chart"))(input)?;
    let (input, _) = ws(char('('))(input)?;

    let (input, args) = separated_list0(
        ws(char(',')),
        alt((
            map(preceded(ws(tag("kind:")), ws(column_name)), DescriptorArg::Kind),
            map(preceded(ws(tag("x:")), ws(column_name)), DescriptorArg::X),
            map(preceded(ws(tag("y:")), ws(column_list)), DescriptorArg::Y),
            map(preceded(ws(tag("title:")), ws(string_literal)), DescriptorArg::Title),
            map(
                preceded(ws(tag("description:")), ws(string_literal)),
                DescriptorArg::Description,
            ),
        )),
    )(input)?;

    let (input, _) = ws(char(')'))(input)?;

    // Later arguments override earlier ones
    let mut descriptor = VisualizationDescriptor::default();
    for arg in args {
        match arg {
            DescriptorArg::Kind(k) => descriptor.chart_kind = Some(k),
            DescriptorArg::X(x) => descriptor.x_axis = Some(x),
            DescriptorArg::Y(y) => descriptor.y_axis = Some(y),
            DescriptorArg::Title(t) => descriptor.title = Some(t),
            DescriptorArg::Description(d) => descriptor.description = Some(d),
        }
    }

    Ok((input, descriptor))
}

/// Parse a complete descriptor string, rejecting trailing input
pub fn descriptor_from_str(input: &str) -> Result<VisualizationDescriptor> {
    terminated(parse_descriptor, ws(eof))(input)
        .map(|(_, descriptor)| descriptor)
        .map_err(|e| anyhow!("Parse error: {:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_descriptor() {
        let d = descriptor_from_str(
            r#"chart(kind: bar, x: region, y: [sales, cost], title: "Sales by region")"#,
        )
        .unwrap();
        assert_eq!(d.chart_kind.as_deref(), Some("bar"));
        assert_eq!(d.x_axis.as_deref(), Some("region"));
        assert_eq!(d.y_axis, Some(vec!["sales".to_string(), "cost".to_string()]));
        assert_eq!(d.title.as_deref(), Some("Sales by region"));
        assert_eq!(d.description, None);
    }

    #[test]
    fn test_parse_empty_descriptor() {
        let d = descriptor_from_str("chart()").unwrap();
        assert_eq!(d, VisualizationDescriptor::default());
    }

    #[test]
    fn test_parse_single_y_and_quoted_column() {
        let d = descriptor_from_str(r#"chart(kind: pie, x: "sales region", y: sales)"#).unwrap();
        assert_eq!(d.x_axis.as_deref(), Some("sales region"));
        assert_eq!(d.y_axis, Some(vec!["sales".to_string()]));
    }

    #[test]
    fn test_unknown_kind_is_kept() {
        let d = descriptor_from_str("chart(kind: sankey)").unwrap();
        assert_eq!(d.chart_kind.as_deref(), Some("sankey"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(descriptor_from_str("chart(kind: bar").is_err());
        assert!(descriptor_from_str("chart(colour: red)").is_err());
        let err = descriptor_from_str("chart() extra").unwrap_err();
        assert!(err.to_string().contains("Parse error"));
    }
}
