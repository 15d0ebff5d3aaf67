//! Turn a pasted `curl ...` command into a normalized request descriptor.
//!
//! The pipeline is linear: [`curl::tokenizer::shell_split`] resolves shell
//! quoting, [`curl::curl_parsers::parse_options`] interprets the curl flags,
//! and [`request::assembler::assemble`] settles method, url, headers, cookies
//! and body. No I/O happens anywhere.
//!
//! ```
//! use curlreq::{CurlConfig, curl_to_request};
//!
//! let translation = curl_to_request(
//!     "curl httpbin.org/anything -X GET --data asdf",
//!     &CurlConfig::default(),
//! )
//! .unwrap();
//! assert_eq!(translation.request.method, "GET");
//! assert_eq!(translation.request.url, "http://httpbin.org/anything");
//! assert_eq!(translation.request.body.as_deref(), Some("asdf"));
//! ```

pub mod config;
pub mod curl;
pub mod error;
pub mod request;
pub mod url;

#[cfg(test)]
mod test_util;

pub use config::CurlConfig;
pub use error::{CurlError, Result};
pub use request::{RequestDescriptor, Translation, Warning};

pub fn curl_to_request(input: &str, config: &CurlConfig) -> Result<Translation> {
    let tokens = curl::tokenizer::shell_split(input)?;
    let (options, mut warnings) = curl::curl_parsers::parse_options(&tokens, config)?;
    let (request, assembly_warnings) = request::assembler::assemble(&options);
    warnings.extend(assembly_warnings);
    Ok(Translation { request, warnings })
}
