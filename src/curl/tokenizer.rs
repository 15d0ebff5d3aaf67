//! Shell word splitting for pasted curl commands.
//!
//! A word is a run of segments with no unquoted blank between them. Each
//! segment is parsed by the combinator matching its quoting state:
//! bare text, `\x` escapes, `'...'`, `"..."`, `$'...'` (ANSI-C) and
//! `$"..."`. Nothing is expanded: `$VAR` and backticks stay literal.

use winnow::{
    ModalResult, Parser,
    ascii::{line_ending, multispace1},
    combinator::{alt, cut_err, empty, opt, preceded, repeat, terminated},
    error::{StrContext, StrContextValue},
    token::{any, one_of, take_till, take_while},
};

use crate::error::{CurlError, Result};

type Input<'a> = &'a str;

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Blanks and `\<newline>` continuations between words.
fn separator(s: &mut Input<'_>) -> ModalResult<()> {
    repeat(0.., alt((multispace1.void(), ('\\', line_ending).void()))).parse_next(s)
}

fn bare_text(s: &mut Input<'_>) -> ModalResult<String> {
    take_while(1.., |c: char| {
        !is_blank(c) && !matches!(c, '\'' | '"' | '\\' | '$')
    })
    .map(String::from)
    .parse_next(s)
}

/// A `$` that does not open `$'...'` or `$"..."`.
fn lone_dollar(s: &mut Input<'_>) -> ModalResult<String> {
    '$'.map(String::from).parse_next(s)
}

/// Backslash outside quotes: escapes the next character, or joins lines.
fn escaped_char(s: &mut Input<'_>) -> ModalResult<String> {
    preceded(
        '\\',
        alt((
            line_ending.value(String::new()),
            any.map(String::from),
            empty.value(String::from("\\")),
        )),
    )
    .parse_next(s)
}

fn single_quoted(s: &mut Input<'_>) -> ModalResult<String> {
    preceded('\'', cut_err(terminated(take_till(0.., '\''), '\'')))
        .context(StrContext::Expected(StrContextValue::CharLiteral('\'')))
        .map(String::from)
        .parse_next(s)
}

fn double_quoted_body(s: &mut Input<'_>) -> ModalResult<String> {
    repeat(
        0..,
        alt((
            take_till(1.., ['"', '\\']).map(String::from),
            preceded(
                '\\',
                alt((
                    line_ending.value(String::new()),
                    one_of(['"', '\\', '$', '`']).map(String::from),
                    any.map(|c: char| format!("\\{c}")),
                )),
            ),
        )),
    )
    .fold(String::new, |mut acc, part: String| {
        acc.push_str(&part);
        acc
    })
    .parse_next(s)
}

fn double_quoted(s: &mut Input<'_>) -> ModalResult<String> {
    preceded('"', cut_err(terminated(double_quoted_body, '"')))
        .context(StrContext::Expected(StrContextValue::CharLiteral('"')))
        .parse_next(s)
}

/// `$"..."` is locale translation in bash; without a catalog it reads as `"..."`.
fn locale_quoted(s: &mut Input<'_>) -> ModalResult<String> {
    preceded("$\"", cut_err(terminated(double_quoted_body, '"')))
        .context(StrContext::Expected(StrContextValue::CharLiteral('"')))
        .parse_next(s)
}

fn code_point(s: &mut Input<'_>, radix: u32, max_digits: usize) -> ModalResult<Option<char>> {
    take_while(1..=max_digits, |c: char| c.is_digit(radix))
        .try_map(|digits: &str| u32::from_str_radix(digits, radix))
        .map(char::from_u32)
        .parse_next(s)
}

/// One escape inside `$'...'`, the leading backslash already consumed.
fn ansi_c_escape(s: &mut Input<'_>) -> ModalResult<String> {
    let c = any.parse_next(s)?;
    let decoded = match c {
        'a' => '\x07',
        'b' => '\x08',
        'e' | 'E' => '\x1b',
        'f' => '\x0c',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\x0b',
        '\\' | '\'' | '"' | '?' => c,
        'x' | 'u' | 'U' => {
            let width = match c {
                'x' => 2,
                'u' => 4,
                _ => 8,
            };
            match opt(|i: &mut Input<'_>| code_point(i, 16, width)).parse_next(s)? {
                Some(Some(ch)) => ch,
                Some(None) => char::REPLACEMENT_CHARACTER,
                None => return Ok(format!("\\{c}")),
            }
        }
        '0'..='7' => {
            let more = take_while(0..=2, |d: char| d.is_digit(8)).parse_next(s)?;
            u32::from_str_radix(&format!("{c}{more}"), 8)
                .ok()
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER)
        }
        'c' => match opt(any).parse_next(s)? {
            Some(ctrl) => char::from_u32(u32::from(ctrl) & 0x1f).unwrap_or(ctrl),
            None => return Ok(String::from("\\c")),
        },
        other => return Ok(format!("\\{other}")),
    };
    Ok(decoded.to_string())
}

fn ansi_c_quoted(s: &mut Input<'_>) -> ModalResult<String> {
    let body = repeat(
        0..,
        alt((
            take_till(1.., ['\'', '\\']).map(String::from),
            preceded('\\', ansi_c_escape),
        )),
    )
    .fold(String::new, |mut acc, part: String| {
        acc.push_str(&part);
        acc
    });

    // A decoded NUL ends the string; the rest up to the closing quote is dropped.
    preceded("$'", cut_err(terminated(body, '\'')))
        .map(|mut text: String| {
            if let Some(nul) = text.find('\0') {
                text.truncate(nul);
            }
            text
        })
        .context(StrContext::Expected(StrContextValue::CharLiteral('\'')))
        .parse_next(s)
}

fn segment(s: &mut Input<'_>) -> ModalResult<String> {
    alt((
        ansi_c_quoted,
        locale_quoted,
        single_quoted,
        double_quoted,
        escaped_char,
        bare_text,
        lone_dollar,
    ))
    .parse_next(s)
}

/// The quote character a failed segment opened with.
fn opening_quote(segment_start: &str) -> char {
    segment_start
        .trim_start_matches('$')
        .chars()
        .next()
        .unwrap_or('\'')
}

/// Split `input` into the argv a POSIX shell would hand to the command.
///
/// Fails with [`CurlError::MalformedQuoting`] when a quote is never closed;
/// `offset` is the byte position of the segment that opened it.
pub fn shell_split(input: &str) -> Result<Vec<String>> {
    let mut rest = input;
    let mut tokens = Vec::new();

    loop {
        // repeat(0..) cannot fail
        let _ = separator.parse_next(&mut rest);
        if rest.is_empty() {
            break;
        }

        let mut word = String::new();
        while rest.chars().next().is_some_and(|c| !is_blank(c)) {
            let before = rest;
            match segment.parse_next(&mut rest) {
                Ok(part) => word.push_str(&part),
                Err(e) => {
                    let offset = input.len() - before.len();
                    log::debug!("tokenizer stopped at byte {offset}: {e:?}");
                    return Err(CurlError::MalformedQuoting {
                        quote: opening_quote(before),
                        offset,
                    });
                }
            }
        }
        tokens.push(word);
    }

    log::debug!("tokenized into {} words", tokens.len());
    Ok(tokens)
}
