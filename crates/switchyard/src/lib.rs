//! A declarative command-line dispatch engine.
//!
//! Handlers declare their switches and parameters as [`Metadata`]; the
//! [`Runner`] tokenizes an argument vector into per-command groups, binds
//! each group's tokens to typed [`Value`]s, invokes the handler and folds
//! every outcome into one process-level [`Outcome`].

mod bind;
pub use bind::{bind, BindError};

pub mod builtins;

mod config;
pub use config::Config;

mod convert;
pub use convert::{Convert, Converters, Value};

pub mod help;

mod invoke;
pub use invoke::{invoke, Outcome};

mod registry;
pub use registry::{Context, Handler, Registry, Target};

mod runner;
pub use runner::Runner;

mod sink;
pub use sink::{Level, Record, Sink};

pub use switchyard_commands::{Builder, Error as MetadataError, Metadata, Param, ParamKind};
