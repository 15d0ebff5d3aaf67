use crate::{Translation, curl_to_request, error::Result};

/// Per call translation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurlConfig {
    /// Warn about and skip options outside the supported grammar instead of
    /// failing with [`crate::CurlError::UnrecognizedOptions`].
    pub ignore_unknown_options: bool,
}

impl Default for CurlConfig {
    fn default() -> Self {
        Self {
            ignore_unknown_options: true,
        }
    }
}

impl CurlConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore_unknown_options(mut self, ignore: bool) -> Self {
        self.ignore_unknown_options = ignore;
        self
    }

    pub fn translate(&self, input: &str) -> Result<Translation> {
        curl_to_request(input, self)
    }
}
