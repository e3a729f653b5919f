#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    NoSwitch,
    BadShortSwitch(char),
    BadLongSwitch(String),
    DuplicateSwitch(String),
    BadParamName(String),
    DuplicateParam(String),
    RequiredAfterOptional(String),
    ParamAfterTrailing(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSwitch => f.write_str("a command must declare at least one switch"),
            Self::BadShortSwitch(c) => write!(
                f,
                "invalid short switch '{}': must be a letter or '?'",
                c
            ),
            Self::BadLongSwitch(s) => write!(
                f,
                "invalid long switch '{}': must start with a letter, '_' or '?' \
                 and contain only letters, digits, '_', '-' or '?'",
                s
            ),
            Self::DuplicateSwitch(s) => write!(f, "duplicate switch: {}", s),
            Self::BadParamName(s) => write!(
                f,
                "invalid parameter name '{}': only alphanumerics and '_' are allowed",
                s
            ),
            Self::DuplicateParam(s) => write!(f, "duplicate parameter: {}", s),
            Self::RequiredAfterOptional(s) => write!(
                f,
                "required parameter '{}' cannot follow an optional one",
                s
            ),
            Self::ParamAfterTrailing(s) => write!(
                f,
                "parameter '{}' cannot follow a trailing array parameter",
                s
            ),
        }
    }
}

impl std::error::Error for Error {}
