use nom::{
    IResult,
    branch::alt,
    bytes::complete::{is_not, tag, take_till},
    character::complete::{anychar, char},
    combinator::{map, recognize, rest},
    error::context,
    multi::{many0, separated_list0},
    sequence::{delimited, preceded, separated_pair},
};

/// Split a raw `Name: value` header on its first colon, trimming both sides.
pub fn header_line_parse(input: &str) -> IResult<&str, (&str, &str)> {
    context(
        "header line parse",
        map(
            separated_pair(take_till(|c: char| c == ':'), char(':'), rest),
            |(name, value): (&str, &str)| (name.trim(), value.trim()),
        ),
    )(input)
}

/// One `name=value` pair, both sides trimmed. The value is left quoted.
pub fn cookie_pair_parse(input: &str) -> IResult<&str, (&str, &str)> {
    context(
        "cookie pair parse",
        map(
            separated_pair(take_till(|c: char| c == '='), char('='), rest),
            |(name, value): (&str, &str)| (name.trim(), value.trim()),
        ),
    )(input)
}

/// A double quoted run, `\x` escapes included, recognized as is.
fn quoted_run_parse(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        char('"'),
        many0(alt((recognize(preceded(char('\\'), anychar)), is_not("\"\\")))),
        char('"'),
    ))(input)
}

/// One segment up to the next `;` outside double quotes. A quote that is
/// never closed is kept as plain text.
fn cookie_segment_parse(input: &str) -> IResult<&str, &str> {
    recognize(many0(alt((quoted_run_parse, is_not(";\""), tag("\"")))))(input)
}

/// The `;` separated segments of a cookie string, unparsed.
pub fn cookie_segments_parse(input: &str) -> IResult<&str, Vec<&str>> {
    context(
        "cookie segments parse",
        separated_list0(char(';'), cookie_segment_parse),
    )(input)
}

/// Drop the double quotes around a cookie value and resolve its `\x` escapes.
pub fn unquote_value(value: &str) -> String {
    let Some(inner) = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
    else {
        return value.to_owned();
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            c => out.push(c),
        }
    }
    out
}

/// Every well formed `name=value` pair of a `Cookie` header or `-b` value,
/// in order. Segments without `=` or with an empty name are skipped.
pub fn parse_cookies(raw: &str) -> Vec<(String, String)> {
    let segments = match cookie_segments_parse(raw) {
        Ok((_rest, segments)) => segments,
        Err(_) => return Vec::new(),
    };

    segments
        .into_iter()
        .filter_map(|segment| cookie_pair_parse(segment).ok())
        .map(|(_rest, pair)| pair)
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, value)| (name.to_owned(), unquote_value(value)))
        .collect()
}
