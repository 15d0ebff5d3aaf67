pub mod parser;

pub use parser::normalize_url;
