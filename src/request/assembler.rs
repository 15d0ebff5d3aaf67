use base64::{Engine as _, engine::general_purpose};
use indexmap::IndexMap;

use super::{RequestDescriptor, Warning, cookie};
use crate::{curl::curl_parsers::ParsedOptions, url::normalize_url};

const DEFAULT_METHOD: &str = "GET";
const DATA_METHOD: &str = "POST";

/// `Basic <base64(user:password)>`. A credential without a colon is a user
/// with an empty password.
pub fn basic_auth_header(credential: &str) -> String {
    let (user, password) = credential.split_once(':').unwrap_or((credential, ""));
    let encoded = general_purpose::STANDARD.encode(format!("{user}:{password}"));
    format!("Basic {encoded}")
}

fn resolve_method(options: &ParsedOptions) -> String {
    match (options.explicit_method(), options.data()) {
        (Some(method), _) => method.to_owned(),
        (None, Some(_)) => DATA_METHOD.to_owned(),
        (None, None) => DEFAULT_METHOD.to_owned(),
    }
}

/// Turn parsed options into the request descriptor.
///
/// `Cookie` headers (any casing) move into the cookie map, followed by every
/// `-b` value; on a repeated name the later value wins. `-u` always lands as
/// the final `Authorization` header.
pub fn assemble(options: &ParsedOptions) -> (RequestDescriptor, Vec<Warning>) {
    let mut warnings = Vec::new();
    let mut headers = Vec::new();
    let mut header_cookies = Vec::new();

    for raw in options.headers() {
        match cookie::header_line_parse(raw) {
            Ok((_, (name, value))) if name.eq_ignore_ascii_case("cookie") => {
                header_cookies.push(value.to_owned())
            }
            Ok((_, (name, value))) if !name.is_empty() => {
                headers.push((name.to_owned(), value.to_owned()))
            }
            _ => {
                log::warn!("Dropping header without a name or colon: {raw:?}");
                warnings.push(Warning::MalformedHeader(raw.clone()));
            }
        }
    }

    let cookies: IndexMap<String, String> = header_cookies
        .iter()
        .map(String::as_str)
        .chain(options.cookie_flag_values().iter().map(String::as_str))
        .flat_map(cookie::parse_cookies)
        .collect();

    if let Some(credential) = options.user_credential() {
        headers.push(("Authorization".to_owned(), basic_auth_header(credential)));
    }

    let request = RequestDescriptor {
        method: resolve_method(options),
        url: normalize_url(options.url()),
        headers,
        cookies,
        body: options.data().map(str::to_owned),
    };
    (request, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curl::{curl_parsers::curl_cmd_parse, tokenizer::shell_split};
    use rstest::*;

    fn assemble_cmd(cmd: &str) -> RequestDescriptor {
        let tokens = shell_split(cmd).unwrap();
        let options = ParsedOptions::from_curls(curl_cmd_parse(&tokens).unwrap()).unwrap();
        assemble(&options).0
    }

    #[rstest]
    #[case("some_username:some_password", "Basic c29tZV91c2VybmFtZTpzb21lX3Bhc3N3b3Jk")]
    #[case("username:password", "Basic dXNlcm5hbWU6cGFzc3dvcmQ=")]
    #[case("user", "Basic dXNlcjo=")]
    #[case("user:pa:ss", "Basic dXNlcjpwYTpzcw==")]
    fn test_basic_auth_header(#[case] credential: &str, #[case] expected: &str) {
        assert_eq!(basic_auth_header(credential), expected);
    }

    #[rstest]
    #[case("curl x", "GET")]
    #[case("curl x -d a", "POST")]
    #[case("curl x --data-raw ''", "POST")]
    #[case("curl x -X GET --data asdf", "GET")]
    #[case("curl x -d a -X FOO", "FOO")]
    #[case("curl x -X patch", "patch")]
    #[case("curl x -X ''", "GET")]
    #[case("curl x -X '' -d a", "POST")]
    #[case("curl x -X PUT -X ''", "GET")]
    fn test_resolve_method(#[case] cmd: &str, #[case] expected: &str) {
        assert_eq!(assemble_cmd(cmd).method, expected);
    }

    #[test]
    fn test_authorization_is_last() {
        let request = assemble_cmd("curl -u me:pw -H 'A: 1' x -H 'B: 2'");
        assert_eq!(
            request.headers,
            vec![
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "2".to_string()),
                ("Authorization".to_string(), basic_auth_header("me:pw")),
            ]
        );
    }

    #[test]
    fn test_cookie_header_moves_to_cookies() {
        let request = assemble_cmd("curl x -H 'cookie: a=1; b=2' -H 'Accept: */*' -b 'c=3'");
        assert_eq!(request.headers, vec![("Accept".to_string(), "*/*".to_string())]);
        let cookies: Vec<(&str, &str)> = request
            .cookies
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(cookies, vec![("a", "1"), ("b", "2"), ("c", "3")]);
    }

    #[test]
    fn test_cookie_flag_overrides_header() {
        let request = assemble_cmd("curl x -b 'a=flag' -H 'Cookie: a=header; b=2'");
        assert_eq!(request.cookies.get("a").map(String::as_str), Some("flag"));
        assert_eq!(request.cookies.get("b").map(String::as_str), Some("2"));
    }

    #[rstest]
    #[case("curl x -H 'broken' -H 'Ok: 1'", "broken")]
    #[case("curl x -H ':v' -H 'Ok: 1'", ":v")]
    #[case("curl x -H '  : v' -H 'Ok: 1'", "  : v")]
    fn test_malformed_header_warning(#[case] cmd: &str, #[case] dropped: &str) {
        let tokens = shell_split(cmd).unwrap();
        let options = ParsedOptions::from_curls(curl_cmd_parse(&tokens).unwrap()).unwrap();
        let (request, warnings) = assemble(&options);
        assert_eq!(request.headers, vec![("Ok".to_string(), "1".to_string())]);
        assert_eq!(warnings, vec![Warning::MalformedHeader(dropped.to_string())]);
    }

    #[test]
    fn test_quoted_cookie_keeps_semicolon() {
        let request = assemble_cmd(r#"curl x -H 'Cookie: theme="a;b"; id=7' -b 'c="x;y"'"#);
        let cookies: Vec<(&str, &str)> = request
            .cookies
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(cookies, vec![("theme", "a;b"), ("id", "7"), ("c", "x;y")]);
    }

    #[test]
    fn test_body_is_verbatim() {
        let request = assemble_cmd(r#"curl x -d '{"hostname": "a",  "b": ["c"]}'"#);
        assert_eq!(request.body.as_deref(), Some(r#"{"hostname": "a",  "b": ["c"]}"#));
        assert!(assemble_cmd("curl x").body.is_none());
    }
}
