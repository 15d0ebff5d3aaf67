use crate::{
    config::CurlConfig,
    curl::{Curl, FlagKind, FlagSpec, Switch},
    error::{CurlError, Result},
    request::Warning,
};

const CURL_CMD: &str = "curl";

pub fn is_curl(token: &str) -> bool {
    token == CURL_CMD
}

/// Anything with a leading dash except the lone `-` (stdin) is an option.
fn is_flag(token: &str) -> bool {
    token.starts_with('-') && token != "-"
}

fn next_value<'a, I>(args: &mut I, flag: &str) -> Result<&'a str>
where
    I: Iterator<Item = &'a str>,
{
    args.next()
        .ok_or_else(|| CurlError::MissingValue(flag.to_owned()))
}

/// `--name`, `--name value` and `--name=value`.
fn long_flag_parse<'a, I>(token: &'a str, args: &mut I) -> Result<Curl>
where
    I: Iterator<Item = &'a str>,
{
    let body = &token[2..];
    let (name, inline) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };

    let curl = match (FlagSpec::by_long(name).map(|spec| spec.kind), inline) {
        (Some(FlagKind::Value(flag)), Some(value)) => flag.with(value),
        (Some(FlagKind::Value(flag)), None) => flag.with(next_value(args, token)?),
        (Some(FlagKind::Switch(switch)), None) => Curl::Flag(switch),
        // A switch handed an explicit value is as foreign as an unknown name.
        (Some(FlagKind::Switch(_)), Some(_)) | (None, _) => Curl::Unknown(token.to_owned()),
    };
    Ok(curl)
}

/// `-s`, `-X value`, `-Xvalue` and clusters such as `-sv` or `-sXPOST`.
///
/// A cluster holding any unknown letter is reported whole and applies nothing.
fn short_flags_parse<'a, I>(token: &'a str, args: &mut I) -> Result<Vec<Curl>>
where
    I: Iterator<Item = &'a str>,
{
    let cluster = &token[1..];
    let mut curls = Vec::new();

    for (idx, c) in cluster.char_indices() {
        let Some(spec) = FlagSpec::by_short(c) else {
            return Ok(vec![Curl::Unknown(token.to_owned())]);
        };
        match spec.kind {
            FlagKind::Switch(switch) => curls.push(Curl::Flag(switch)),
            FlagKind::Value(flag) => {
                let attached = &cluster[idx + c.len_utf8()..];
                let value = if attached.is_empty() {
                    next_value(args, &format!("-{c}"))?
                } else {
                    attached
                };
                curls.push(flag.with(value));
                break;
            }
        }
    }
    Ok(curls)
}

pub fn flag_parse<'a, I>(token: &'a str, args: &mut I) -> Result<Vec<Curl>>
where
    I: Iterator<Item = &'a str>,
{
    if token.starts_with("--") {
        long_flag_parse(token, args).map(|curl| vec![curl])
    } else {
        short_flags_parse(token, args)
    }
}

/// Walk the argv of a curl command, `curl` itself included.
pub fn curl_cmd_parse(tokens: &[String]) -> Result<Vec<Curl>> {
    let (first, rest) = tokens
        .split_first()
        .ok_or(CurlError::MissingLeadingCurl)?;
    if !is_curl(first) {
        return Err(CurlError::MissingLeadingCurl);
    }

    let mut args = rest.iter().map(String::as_str);
    let mut curls = Vec::new();
    let mut options_ended = false;

    while let Some(token) = args.next() {
        if options_ended || !is_flag(token) {
            curls.push(Curl::new_as_url(token));
        } else if token == "--" {
            options_ended = true;
        } else {
            curls.append(&mut flag_parse(token, &mut args)?);
        }
    }
    Ok(curls)
}

/// Everything the command line said, before any request semantics apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOptions {
    url: String,
    explicit_method: Option<String>,
    headers: Vec<String>,
    cookie_flag_values: Vec<String>,
    user_credential: Option<String>,
    data: Option<String>,
    compressed: bool,
    silent: bool,
    unrecognized: Vec<String>,
}

impl ParsedOptions {
    /// Fold parsed arguments in order: repeatable flags accumulate, single
    /// valued flags keep their last occurrence, the first positional is the url.
    pub fn from_curls(curls: Vec<Curl>) -> Result<Self> {
        let mut url = None;
        let mut explicit_method = None;
        let mut headers = Vec::new();
        let mut cookie_flag_values = Vec::new();
        let mut user_credential = None;
        let mut data = None;
        let (mut compressed, mut silent) = (false, false);
        let mut unrecognized: Vec<String> = Vec::new();

        for curl in curls {
            match curl {
                Curl::Url(u) if url.is_none() => url = Some(u),
                // `-X ''` names no method, so the GET/POST default applies.
                Curl::Method(m) => explicit_method = Some(m).filter(|m| !m.is_empty()),
                Curl::Header(h) => headers.push(h),
                Curl::Cookie(c) => cookie_flag_values.push(c),
                Curl::User(u) => user_credential = Some(u),
                Curl::Data(d) => data = Some(d),
                Curl::Flag(Switch::Compressed) => compressed = true,
                Curl::Flag(Switch::Silent) => silent = true,
                Curl::Flag(Switch::Verbose | Switch::ProgressBar) => {}
                Curl::Url(extra) | Curl::Unknown(extra) => {
                    if !unrecognized.contains(&extra) {
                        unrecognized.push(extra);
                    }
                }
            }
        }

        Ok(Self {
            url: url.ok_or(CurlError::MissingUrl)?,
            explicit_method,
            headers,
            cookie_flag_values,
            user_credential,
            data,
            compressed,
            silent,
            unrecognized,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn explicit_method(&self) -> Option<&str> {
        self.explicit_method.as_deref()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn cookie_flag_values(&self) -> &[String] {
        &self.cookie_flag_values
    }

    pub fn user_credential(&self) -> Option<&str> {
        self.user_credential.as_deref()
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    pub fn compressed(&self) -> bool {
        self.compressed
    }

    pub fn silent(&self) -> bool {
        self.silent
    }

    pub fn unrecognized(&self) -> &[String] {
        &self.unrecognized
    }
}

/// Parse `tokens` and apply the unknown option policy from `config`.
pub fn parse_options(tokens: &[String], config: &CurlConfig) -> Result<(ParsedOptions, Vec<Warning>)> {
    let options = ParsedOptions::from_curls(curl_cmd_parse(tokens)?)?;
    log::debug!("parsed curl options: {:?}", options);
    if options.compressed() || options.silent() {
        log::debug!("--compressed and --silent do not change the request");
    }

    let mut warnings = Vec::new();
    if !options.unrecognized.is_empty() {
        if !config.ignore_unknown_options {
            return Err(CurlError::UnrecognizedOptions(options.unrecognized.clone()));
        }
        log::warn!(
            "Unrecognized options are ignored: {}",
            options.unrecognized.join(", ")
        );
        warnings.push(Warning::IgnoredOptions(options.unrecognized.clone()));
    }
    Ok((options, warnings))
}
