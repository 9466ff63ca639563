//! Query document parser using nom
//!
//! Accepts the small subset of the query language the catalog speaks: an
//! optional `query Name($var: Type!)` header, exactly one root field with
//! optional arguments, and a selection set. Nested selections are read but
//! only their field name is kept. Whitespace, commas and `#` comments are
//! insignificant.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, multispace1, none_of, not_line_ending},
    combinator::{map, map_res, opt, recognize, value},
    multi::many0,
    sequence::{delimited, pair, preceded, terminated, tuple},
};

use crate::ast::*;
use crate::error::ParseError;

/// Parse a complete query document
pub fn parse_document(input: &str) -> Result<QueryDocument, ParseError> {
    let source = input.trim();
    let (remaining, doc) = document(source).map_err(|e| to_parse_error(source, e))?;

    let (remaining, _) = ignored(remaining).map_err(|e| to_parse_error(source, e))?;
    if !remaining.is_empty() {
        return Err(
            ParseError::new(format!("Unexpected trailing content: {}", remaining))
                .with_position(source.len() - remaining.len()),
        );
    }

    Ok(doc)
}

fn to_parse_error(source: &str, err: nom::Err<nom::error::Error<&str>>) -> ParseError {
    match err {
        nom::Err::Incomplete(_) => ParseError::new("Incomplete input"),
        nom::Err::Error(e) | nom::Err::Failure(e) => ParseError::new(format!(
            "unexpected input near: {:?}",
            e.input.chars().take(20).collect::<String>()
        ))
        .with_position(source.len() - e.input.len()),
    }
}

// ============================================================================
// Document
// ============================================================================

fn document(input: &str) -> IResult<&str, QueryDocument> {
    let (input, _) = ignored(input)?;
    let (input, header) = opt(header)(input)?;
    let (input, _) = ignored(input)?;
    let (input, _) = char('{')(input)?;
    let (input, _) = ignored(input)?;
    let (input, root_name) = name(input)?;
    let (input, _) = ignored(input)?;
    let (input, arguments) = opt(arguments)(input)?;
    let (input, _) = ignored(input)?;
    let (input, fields) = opt(selection_set)(input)?;
    let (input, _) = ignored(input)?;
    let (input, _) = char('}')(input)?;

    let (op_name, variables) = header.unwrap_or((None, Vec::new()));

    Ok((input, QueryDocument {
        name: op_name,
        variables,
        root: RootField {
            name: root_name.to_string(),
            arguments: arguments.unwrap_or_default(),
        },
        fields: fields.unwrap_or_default(),
    }))
}

fn header(input: &str) -> IResult<&str, (Option<String>, Vec<VariableDef>)> {
    let (input, _) = tag("query")(input)?;
    let (input, _) = ignored(input)?;
    let (input, op_name) = opt(name)(input)?;
    let (input, _) = ignored(input)?;
    let (input, variables) = opt(variable_defs)(input)?;

    Ok((input, (op_name.map(String::from), variables.unwrap_or_default())))
}

// ============================================================================
// Variables
// ============================================================================

fn variable_defs(input: &str) -> IResult<&str, Vec<VariableDef>> {
    delimited(
        pair(char('('), ignored),
        many0(terminated(variable_def, ignored)),
        char(')'),
    )(input)
}

fn variable_def(input: &str) -> IResult<&str, VariableDef> {
    let (input, _) = char('$')(input)?;
    let (input, var_name) = name(input)?;
    let (input, _) = ignored(input)?;
    let (input, _) = char(':')(input)?;
    let (input, _) = ignored(input)?;
    let (input, type_name) = type_ref(input)?;
    let (input, bang) = opt(char('!'))(input)?;

    Ok((input, VariableDef {
        name: var_name.to_string(),
        type_name: type_name.to_string(),
        required: bang.is_some(),
    }))
}

fn type_ref(input: &str) -> IResult<&str, &str> {
    alt((
        recognize(tuple((char('['), name, opt(char('!')), char(']')))),
        name,
    ))(input)
}

// ============================================================================
// Arguments and selections
// ============================================================================

fn arguments(input: &str) -> IResult<&str, Vec<Argument>> {
    delimited(
        pair(char('('), ignored),
        many0(terminated(argument, ignored)),
        char(')'),
    )(input)
}

fn argument(input: &str) -> IResult<&str, Argument> {
    let (input, arg_name) = name(input)?;
    let (input, _) = ignored(input)?;
    let (input, _) = char(':')(input)?;
    let (input, _) = ignored(input)?;
    let (input, arg) = arg_value(input)?;

    Ok((input, Argument {
        name: arg_name.to_string(),
        value: arg,
    }))
}

fn arg_value(input: &str) -> IResult<&str, ArgValue> {
    alt((
        map(preceded(char('$'), name), |n| ArgValue::Variable(n.to_string())),
        map(string_literal, ArgValue::String),
        map(integer_literal, ArgValue::Int),
        value(ArgValue::Bool(true), tag("true")),
        value(ArgValue::Bool(false), tag("false")),
        value(ArgValue::Null, tag("null")),
    ))(input)
}

fn selection_set(input: &str) -> IResult<&str, Vec<String>> {
    delimited(
        pair(char('{'), ignored),
        many0(terminated(selection, ignored)),
        char('}'),
    )(input)
}

fn selection(input: &str) -> IResult<&str, String> {
    let (input, field) = name(input)?;
    let (input, _) = ignored(input)?;
    let (input, _) = opt(arguments)(input)?;
    let (input, _) = ignored(input)?;
    let (input, _) = opt(selection_set)(input)?;

    Ok((input, field.to_string()))
}

// ============================================================================
// Primitives
// ============================================================================

/// Whitespace, commas and `#` comments
fn ignored(input: &str) -> IResult<&str, ()> {
    value(
        (),
        many0(alt((
            value((), multispace1),
            value((), char(',')),
            value((), pair(char('#'), not_line_ending)),
        ))),
    )(input)
}

fn name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

fn integer_literal(input: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(char('-')), digit1)), str::parse::<i64>)(input)
}

fn string_literal(input: &str) -> IResult<&str, String> {
    delimited(
        char('"'),
        map(
            many0(alt((
                map(tag("\\\""), |_| "\"".to_string()),
                map(tag("\\n"), |_| "\n".to_string()),
                map(tag("\\\\"), |_| "\\".to_string()),
                map(none_of("\"\\"), |c| c.to_string()),
            ))),
            |v| v.join(""),
        ),
        char('"'),
    )(input)
}
