//! Command metadata for the switchyard dispatch engine.
//!
//! A [`Metadata`] describes one command handler: its help text, the short
//! and long switches that select it, and the ordered parameters it binds.
//! The builder validates everything up front so a handler that survives
//! [`Builder::build`] can never produce a malformed dispatch.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Required,
    Optional { default: Box<str> },
    Trailing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: Box<str>,
    pub tag: Box<str>,
    pub help: Box<str>,
    pub kind: ParamKind,
}

impl Param {
    pub fn is_optional(&self) -> bool {
        matches!(self.kind, ParamKind::Optional { .. })
    }

    pub fn is_trailing(&self) -> bool {
        matches!(self.kind, ParamKind::Trailing)
    }
}

mod metadata;
pub use metadata::{Builder, Metadata};

mod error;
pub use error::Error;

#[cfg(test)]
mod tests;
