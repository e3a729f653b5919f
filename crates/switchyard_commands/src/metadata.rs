use std::collections::HashSet;

use crate::{Error, Param, ParamKind};

/// An immutable, validated command descriptor.
#[derive(Default, Clone, Debug)]
pub struct Metadata {
    help: Box<str>,
    shorts: Box<[char]>,
    longs: Box<[Box<str>]>,
    params: Box<[Param]>,
}

impl Metadata {
    /// Start describing a command. The text is what the help renderer shows.
    pub fn describe<S>(help: S) -> Builder
    where
        S: Into<Box<str>>,
    {
        Builder {
            help: help.into(),
            shorts: Vec::new(),
            longs: Vec::new(),
            params: Vec::new(),
        }
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn shorts(&self) -> &[char] {
        &self.shorts
    }

    pub fn longs(&self) -> impl Iterator<Item = &str> {
        self.longs.iter().map(|s| &**s)
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn has_short(&self, switch: char) -> bool {
        self.shorts.contains(&switch)
    }

    pub fn has_long(&self, switch: &str) -> bool {
        self.longs.iter().any(|s| &**s == switch)
    }
}

pub struct Builder {
    help: Box<str>,
    shorts: Vec<char>,
    longs: Vec<Box<str>>,
    params: Vec<Param>,
}

impl Builder {
    pub fn short(mut self, switch: char) -> Self {
        self.shorts.push(switch);
        self
    }

    pub fn long<S>(mut self, switch: S) -> Self
    where
        S: Into<Box<str>>,
    {
        self.longs.push(switch.into());
        self
    }

    pub fn required(self, name: &str, tag: &str, help: &str) -> Self {
        self.param(name, tag, help, ParamKind::Required)
    }

    pub fn optional(self, name: &str, tag: &str, help: &str, default: &str) -> Self {
        self.param(
            name,
            tag,
            help,
            ParamKind::Optional {
                default: default.into(),
            },
        )
    }

    /// A trailing array parameter consumes every remaining token of a group.
    pub fn trailing(self, name: &str, tag: &str, help: &str) -> Self {
        self.param(name, tag, help, ParamKind::Trailing)
    }

    fn param(mut self, name: &str, tag: &str, help: &str, kind: ParamKind) -> Self {
        self.params.push(Param {
            name: name.into(),
            tag: tag.into(),
            help: help.into(),
            kind,
        });
        self
    }

    pub fn build(self) -> Result<Metadata, Error> {
        if self.shorts.is_empty() && self.longs.is_empty() {
            return Err(Error::NoSwitch);
        }

        let mut shorts = HashSet::new();
        for &switch in &self.shorts {
            if switch != '?' && !switch.is_ascii_alphabetic() {
                return Err(Error::BadShortSwitch(switch));
            }
            if !shorts.insert(switch) {
                return Err(Error::DuplicateSwitch(switch.to_string()));
            }
        }

        let mut longs = HashSet::new();
        for switch in &self.longs {
            if !Self::valid_long(switch) {
                return Err(Error::BadLongSwitch(switch.to_string()));
            }
            if !longs.insert(&**switch) {
                return Err(Error::DuplicateSwitch(switch.to_string()));
            }
        }

        let mut names = HashSet::new();
        let mut optional_seen = false;
        let mut trailing_seen = false;

        for param in &self.params {
            if trailing_seen {
                return Err(Error::ParamAfterTrailing(param.name.to_string()));
            }

            if param.name.is_empty()
                || !param
                    .name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                return Err(Error::BadParamName(param.name.to_string()));
            }

            if !names.insert(param.name.clone()) {
                return Err(Error::DuplicateParam(param.name.to_string()));
            }

            match param.kind {
                ParamKind::Required if optional_seen => {
                    return Err(Error::RequiredAfterOptional(param.name.to_string()));
                }
                ParamKind::Required => {}
                ParamKind::Optional { .. } => optional_seen = true,
                ParamKind::Trailing => trailing_seen = true,
            }
        }

        Ok(Metadata {
            help: self.help,
            shorts: self.shorts.into_boxed_slice(),
            longs: self.longs.into_boxed_slice(),
            params: self.params.into_boxed_slice(),
        })
    }

    fn valid_long(switch: &str) -> bool {
        let mut chars = switch.chars();
        let head = match chars.next() {
            Some(c) => c,
            None => return false,
        };
        if !head.is_ascii_alphabetic() && head != '_' && head != '?' {
            return false;
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '?')
    }
}
