use nom::{
    IResult,
    bytes::complete::{tag, take_while},
    character::complete::satisfy,
    combinator::recognize,
    error::context,
    sequence::{pair, terminated},
};

/// Scheme given to urls that name none.
pub const DEFAULT_SCHEME: &str = "http";

/// Recognize a leading `scheme://`, returning the scheme name.
///
/// Scheme names follow RFC 3986: a letter, then letters, digits, `+`, `-` or `.`.
pub fn scheme_parse(input: &str) -> IResult<&str, &str> {
    context(
        "scheme parse",
        terminated(
            recognize(pair(
                satisfy(|c| c.is_ascii_alphabetic()),
                take_while(|c: char| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
            )),
            tag("://"),
        ),
    )(input)
}

/// Prefix urls that carry no `scheme://` with `http://`.
pub fn normalize_url(url: &str) -> String {
    match scheme_parse(url) {
        Ok((_rest, scheme)) => {
            log::debug!("url {url:?} already names scheme {scheme:?}");
            url.to_owned()
        }
        Err(_) => format!("{DEFAULT_SCHEME}://{url}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{generic_command_parse, generic_parse};
    use rstest::*;

    #[test]
    fn test_scheme_parse() {
        generic_command_parse(scheme_parse, "https://www.url.com/page", "https");
        generic_command_parse(scheme_parse, "svn+ssh://host/repo", "svn+ssh");
        assert!(scheme_parse("www.example.org").is_err());
        assert!(scheme_parse("localhost:8080/path").is_err());
        assert!(scheme_parse("1http://x").is_err());
    }

    #[rstest]
    #[case("http://example.org/", "http://example.org/")]
    #[case("https://www.url.com/page", "https://www.url.com/page")]
    #[case("www.example.org", "http://www.example.org")]
    #[case("httpbin.org/anything", "http://httpbin.org/anything")]
    #[case("localhost:8080", "http://localhost:8080")]
    #[case("example.org/?next=https://x.org", "http://example.org/?next=https://x.org")]
    #[case("ws://chat.example.org", "ws://chat.example.org")]
    #[case("FTP://files.example.org", "FTP://files.example.org")]
    fn test_normalize_url(#[case] url: &str, #[case] expected: &str) {
        generic_parse(normalize_url, url, expected.to_string());
    }
}
