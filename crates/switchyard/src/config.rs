use std::path::Path;

use crate::sink::Sink;

/// Startup defaults for the binary, read from `switchyard.toml` when the
/// file exists. Everything here can still be changed mid-run through the
/// built-in switches.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub verbosity: u8,
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbosity: Sink::ALL,
            log_file: None,
        }
    }
}

impl Config {
    pub const FILE: &'static str = "switchyard.toml";

    pub fn load() -> Self {
        let data = match std::fs::read_to_string(Self::FILE) {
            Ok(data) => data,
            Err(..) => return Self::default(),
        };

        toml::from_str(&data).unwrap_or_else(|err| {
            log::warn!("cannot parse {}: {}", Self::FILE, err);
            Self::default()
        })
    }

    pub fn apply(&self, sink: &Sink) -> anyhow::Result<()> {
        sink.set_verbosity(self.verbosity);
        if let Some(path) = &self.log_file {
            sink.redirect_to_file(Path::new(path))?;
        }
        Ok(())
    }
}
