use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CurlError {
    #[error("No closing quotation: unbalanced {quote} quote opened at offset {offset}")]
    MalformedQuoting { quote: char, offset: usize },

    #[error("A curl command must start with \"curl\"")]
    MissingLeadingCurl,

    #[error("too few arguments: the url is required")]
    MissingUrl,

    #[error("Unrecognized options: {}", .0.join(", "))]
    UnrecognizedOptions(Vec<String>),

    #[error("option {0} expected one argument")]
    MissingValue(String),

    #[error("Invalid HTTP request: {0}")]
    InvalidRequest(String),
}

pub type Result<T> = std::result::Result<T, CurlError>;
