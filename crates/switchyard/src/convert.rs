use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

/// A typed argument produced by the binder.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Byte(u8),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    Path(PathBuf),
    Seq(Vec<Value>),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_byte(&self) -> Option<u8> {
        match self {
            Value::Byte(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Value::Path(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(v) => Some(v),
            _ => None,
        }
    }
}

pub type Convert = fn(&str) -> anyhow::Result<Value>;

/// Maps a semantic type tag to its parsing function.
///
/// The binder receives this table at construction time; parameters declare
/// a tag and never inspect types at runtime. Callers may add their own tags.
pub struct Converters {
    map: HashMap<Box<str>, Convert>,
}

impl Default for Converters {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Converters {
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut this = Self::empty();
        this.insert("bool", bool_value);
        this.insert("byte", byte_value);
        this.insert("int", int_value);
        this.insert("uint", uint_value);
        this.insert("float", float_value);
        this.insert("string", string_value);
        this.insert("path", path_value);
        this
    }

    pub fn insert(&mut self, tag: &str, convert: Convert) {
        self.map.insert(tag.into(), convert);
    }

    pub fn get(&self, tag: &str) -> Option<Convert> {
        self.map.get(tag).copied()
    }
}

fn bool_value(input: &str) -> anyhow::Result<Value> {
    match input {
        "true" | "1" => Ok(Value::Bool(true)),
        "false" | "0" => Ok(Value::Bool(false)),
        _ => Err(anyhow::anyhow!("'{}' is not a bool", input)),
    }
}

fn byte_value(input: &str) -> anyhow::Result<Value> {
    input
        .parse()
        .map(Value::Byte)
        .with_context(|| format!("'{}' is not a byte", input))
}

fn int_value(input: &str) -> anyhow::Result<Value> {
    input
        .parse()
        .map(Value::Int)
        .with_context(|| format!("'{}' is not an integer", input))
}

fn uint_value(input: &str) -> anyhow::Result<Value> {
    input
        .parse()
        .map(Value::Uint)
        .with_context(|| format!("'{}' is not an unsigned integer", input))
}

fn float_value(input: &str) -> anyhow::Result<Value> {
    input
        .parse()
        .map(Value::Float)
        .with_context(|| format!("'{}' is not a number", input))
}

fn string_value(input: &str) -> anyhow::Result<Value> {
    Ok(Value::Str(input.to_string()))
}

fn path_value(input: &str) -> anyhow::Result<Value> {
    Ok(Value::Path(PathBuf::from(input)))
}
