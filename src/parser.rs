//! Compact filter and sort expressions, parsed with nom.
//!
//! ```text
//! name~spring cohort                  GroupName("spring cohort")
//! start>=2024-09-01T00:00:00Z         StartDate(.., FROM)
//! start<=2024-12-31T23:59:59Z         StartDate(.., TO)
//! start=2024-09-01T09:00:00Z          StartDate(.., EQUAL)
//! member[teacher]=g1,g2               Member([g1, g2], TEACHER)
//!
//! start_day:desc                      StartDay(DESC)
//! mentor                              Mentor(ASC)
//! ```

use chrono::{DateTime, Utc};
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, opt, rest, value},
    multi::separated_list1,
    sequence::{delimited, preceded},
    IResult,
};

use crate::ast::*;
use crate::error::{QueryError, QueryResult};

/// Parse a filter expression.
pub fn parse_filter(input: &str) -> QueryResult<Filter> {
    let input = input.trim();

    match parse_filter_expr(input) {
        Ok(("", expr)) => expr.into_filter(input),
        Ok((remaining, _)) => Err(QueryError::parse(
            input.len() - remaining.len(),
            format!("Unexpected trailing content: '{}'", remaining),
        )),
        Err(e) => Err(QueryError::parse(0, format!("Parse failed: {:?}", e))),
    }
}

/// Parse a sort expression such as `mentor:desc`.
pub fn parse_sorting(input: &str) -> QueryResult<Sorting> {
    let input = input.trim();

    all_consuming(parse_sorting_expr)(input)
        .map(|(_, sorting)| sorting)
        .map_err(|e| QueryError::parse(0, format!("Parse failed: {:?}", e)))
}

/// Filter as written, before values are checked.
enum FilterExpr<'a> {
    GroupName(&'a str),
    StartDate(DateExpression, &'a str),
    Member(&'a str, Vec<&'a str>),
}

impl FilterExpr<'_> {
    fn into_filter(self, input: &str) -> QueryResult<Filter> {
        match self {
            FilterExpr::GroupName(term) => Ok(Filter::group_name(term.trim())),
            FilterExpr::StartDate(expression, raw) => {
                let instant = parse_instant(raw).map_err(|message| {
                    QueryError::parse(input.len() - raw.len(), message)
                })?;
                Ok(Filter::start_date(instant, expression))
            }
            FilterExpr::Member(role, guids) => {
                let role: MemberRole = role.parse()?;
                Filter::member(guids, role)
            }
        }
    }
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("Invalid timestamp '{}': {}", raw.trim(), e))
}

fn parse_filter_expr(input: &str) -> IResult<&str, FilterExpr<'_>> {
    alt((parse_group_name, parse_start_date, parse_member))(input)
}

/// name~<term>
fn parse_group_name(input: &str) -> IResult<&str, FilterExpr<'_>> {
    let (input, _) = tag_no_case("name")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char('~')(input)?;
    let (input, term) = rest(input)?;
    Ok((input, FilterExpr::GroupName(term)))
}

/// start>=<ts>, start<=<ts>, start=<ts>
fn parse_start_date(input: &str) -> IResult<&str, FilterExpr<'_>> {
    let (input, _) = tag_no_case("start")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, expression) = alt((
        value(DateExpression::From, tag(">=")),
        value(DateExpression::To, tag("<=")),
        value(DateExpression::Equal, tag("=")),
    ))(input)?;
    let (input, raw) = rest(input)?;
    Ok((input, FilterExpr::StartDate(expression, raw)))
}

/// member[<role>]=<guid>,<guid>
fn parse_member(input: &str) -> IResult<&str, FilterExpr<'_>> {
    let (input, _) = tag_no_case("member")(input)?;
    let (input, role) = delimited(
        char('['),
        delimited(multispace0, parse_identifier, multispace0),
        char(']'),
    )(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char('=')(input)?;
    let (input, guids) = separated_list1(
        char(','),
        delimited(multispace0, parse_guid, multispace0),
    )(input)?;
    Ok((input, FilterExpr::Member(role, guids)))
}

fn parse_sorting_expr(input: &str) -> IResult<&str, Sorting> {
    let (input, kind) = alt((
        value(Sorting::start_day as fn(SortDirection) -> Sorting, tag_no_case("start_day")),
        value(Sorting::mentor as fn(SortDirection) -> Sorting, tag_no_case("mentor")),
    ))(input)?;
    let (input, direction) = opt(preceded(char(':'), parse_direction))(input)?;
    Ok((input, kind(direction.unwrap_or_default())))
}

fn parse_direction(input: &str) -> IResult<&str, SortDirection> {
    alt((
        map(tag_no_case("asc"), |_| SortDirection::Asc),
        map(tag_no_case("desc"), |_| SortDirection::Desc),
    ))(input)
}

fn parse_identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

fn parse_guid(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}
