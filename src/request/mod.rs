pub mod assembler;
pub mod cookie;

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{CurlError, Result};

/// The request a curl command describes, ready for an HTTP client.
///
/// Serializes to the keyed form `{method, url, headers?, cookies?, body?}`;
/// empty collections and a missing body are left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestDescriptor {
    pub method: String,
    pub url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<(String, String)>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub cookies: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl RequestDescriptor {
    /// All cookies folded back into a single `Cookie` header value.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        let pairs: Vec<String> = self
            .cookies
            .iter()
            .map(|(name, value)| format!("{name}={}", quote_cookie_value(value)))
            .collect();
        Some(pairs.join("; "))
    }

    /// Build an [`http::Request`], rejecting methods, urls or headers the
    /// `http` crate cannot represent.
    pub fn to_http_request(&self) -> Result<http::Request<String>> {
        let mut builder = http::Request::builder()
            .method(self.method.as_str())
            .uri(self.url.as_str());
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(cookie) = self.cookie_header() {
            builder = builder.header(http::header::COOKIE, cookie);
        }
        builder
            .body(self.body.clone().unwrap_or_default())
            .map_err(|e| CurlError::InvalidRequest(e.to_string()))
    }
}

/// Values holding `;`, `"` or `\` only survive a `Cookie` header quoted.
fn quote_cookie_value(value: &str) -> String {
    if !value.contains([';', '"', '\\']) {
        return value.to_owned();
    }
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Non-fatal findings reported next to a successful translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    IgnoredOptions(Vec<String>),
    MalformedHeader(String),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::IgnoredOptions(flags) => {
                write!(f, "Unrecognized options are ignored: {}", flags.join(", "))
            }
            Warning::MalformedHeader(raw) => {
                write!(f, "header without a name or colon dropped: {raw}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub request: RequestDescriptor,
    pub warnings: Vec<Warning>,
}
