use switchyard_commands::{Metadata, ParamKind};

use crate::convert::{Converters, Value};

#[derive(Debug)]
pub enum BindError {
    /// The tag has no registered converter.
    UnsupportedType { param: Box<str>, tag: Box<str> },
    /// Every required parameter that had no token, so all of them can be
    /// reported at once.
    Missing(Vec<Box<str>>),
    /// Tokens were left over and no trailing array parameter takes them.
    TooMany { expected: usize, got: usize },
    /// The converter rejected the token.
    Convert {
        param: Box<str>,
        source: anyhow::Error,
    },
}

impl std::fmt::Display for BindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedType { param, tag } => {
                write!(f, "parameter '{}' has unsupported type '{}'", param, tag)
            }
            Self::Missing(names) => {
                write!(f, "missing required parameter(s): {}", names.join(", "))
            }
            Self::TooMany { expected, got } => {
                write!(f, "too many arguments: expected {}, got {}", expected, got)
            }
            Self::Convert { param, source } => {
                write!(f, "parameter '{}': {:#}", param, source)
            }
        }
    }
}

impl std::error::Error for BindError {}

/// Convert a group's raw tokens into one typed argument per parameter.
///
/// Parameters are walked in declared order. A trailing array parameter
/// consumes every remaining token into a [`Value::Seq`]; an optional
/// parameter with no token converts its default through the same converter
/// as a supplied token would use. Missing required parameters are collected
/// rather than failing one at a time.
pub fn bind(
    converters: &Converters,
    meta: &Metadata,
    tokens: &[String],
) -> Result<Vec<Value>, BindError> {
    let mut out = Vec::with_capacity(meta.params().len());
    let mut missing = Vec::new();
    let mut index = 0;

    for param in meta.params() {
        let convert =
            converters
                .get(&param.tag)
                .ok_or_else(|| BindError::UnsupportedType {
                    param: param.name.clone(),
                    tag: param.tag.clone(),
                })?;

        let convert = |input: &str| {
            convert(input).map_err(|source| BindError::Convert {
                param: param.name.clone(),
                source,
            })
        };

        match &param.kind {
            ParamKind::Trailing => {
                let mut seq = Vec::with_capacity(tokens.len().saturating_sub(index));
                while index < tokens.len() {
                    seq.push(convert(&tokens[index])?);
                    index += 1;
                }
                out.push(Value::Seq(seq));
            }
            kind => {
                if index < tokens.len() {
                    out.push(convert(&tokens[index])?);
                    index += 1;
                } else if let ParamKind::Optional { default } = kind {
                    out.push(convert(default)?);
                } else {
                    missing.push(param.name.clone());
                }
            }
        }
    }

    if !missing.is_empty() {
        return Err(BindError::Missing(missing));
    }

    if index < tokens.len() {
        return Err(BindError::TooMany {
            expected: meta.params().len(),
            got: tokens.len(),
        });
    }

    Ok(out)
}
