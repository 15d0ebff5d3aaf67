pub mod curl_parsers;
pub mod tokenizer;

/// Boolean curl switches that are accepted but leave no trace on the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    Compressed,
    Silent,
    Verbose,
    ProgressBar,
}

/// Flags that consume a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFlag {
    Method,
    Header,
    User,
    Data,
    Cookie,
}

impl ValueFlag {
    pub fn with(self, param: &str) -> Curl {
        let param = param.to_owned();
        match self {
            ValueFlag::Method => Curl::Method(param),
            ValueFlag::Header => Curl::Header(param),
            ValueFlag::User => Curl::User(param),
            ValueFlag::Data => Curl::Data(param),
            ValueFlag::Cookie => Curl::Cookie(param),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    Value(ValueFlag),
    Switch(Switch),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSpec {
    pub short: Option<char>,
    pub long: &'static str,
    pub kind: FlagKind,
}

/// Every curl option the parser understands.
pub const FLAGS: &[FlagSpec] = &[
    FlagSpec {
        short: Some('X'),
        long: "request",
        kind: FlagKind::Value(ValueFlag::Method),
    },
    FlagSpec {
        short: Some('H'),
        long: "header",
        kind: FlagKind::Value(ValueFlag::Header),
    },
    FlagSpec {
        short: Some('u'),
        long: "user",
        kind: FlagKind::Value(ValueFlag::User),
    },
    FlagSpec {
        short: Some('d'),
        long: "data",
        kind: FlagKind::Value(ValueFlag::Data),
    },
    FlagSpec {
        short: None,
        long: "data-raw",
        kind: FlagKind::Value(ValueFlag::Data),
    },
    FlagSpec {
        short: Some('b'),
        long: "cookie",
        kind: FlagKind::Value(ValueFlag::Cookie),
    },
    FlagSpec {
        short: None,
        long: "compressed",
        kind: FlagKind::Switch(Switch::Compressed),
    },
    FlagSpec {
        short: Some('s'),
        long: "silent",
        kind: FlagKind::Switch(Switch::Silent),
    },
    FlagSpec {
        short: Some('v'),
        long: "verbose",
        kind: FlagKind::Switch(Switch::Verbose),
    },
    FlagSpec {
        short: Some('#'),
        long: "progress-bar",
        kind: FlagKind::Switch(Switch::ProgressBar),
    },
];

impl FlagSpec {
    pub fn by_short(c: char) -> Option<&'static FlagSpec> {
        FLAGS.iter().find(|spec| spec.short == Some(c))
    }

    /// `name` without the leading `--`.
    pub fn by_long(name: &str) -> Option<&'static FlagSpec> {
        FLAGS.iter().find(|spec| spec.long == name)
    }
}

/// One recognized piece of a curl command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Curl {
    Method(String),
    Url(String),
    Header(String),
    User(String),
    Data(String),
    Cookie(String),
    Flag(Switch),
    Unknown(String),
}

impl Curl {
    pub fn new_as_url(url: &str) -> Self {
        Curl::Url(url.into())
    }
}
