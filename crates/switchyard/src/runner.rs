use std::sync::Arc;

use crate::bind::{self, BindError};
use crate::builtins;
use crate::convert::Converters;
use crate::invoke::{self, Outcome};
use crate::registry::{Handler, Registry};
use crate::sink::Sink;

/// The dispatch loop: tokenizes an argument vector into command groups and
/// runs each one through bind → invoke → aggregate.
///
/// A run is synchronous and single-threaded; the only early exit is the
/// fatal escalation, which skips everything that follows.
pub struct Runner {
    registry: Registry,
    converters: Converters,
    sink: Arc<Sink>,
}

/// The raw tokens accumulated for one resolved handler between two
/// switch tokens.
struct Group<'a> {
    handler: &'a Handler,
    switch: String,
    tokens: Vec<String>,
}

impl Runner {
    /// A runner with the built-in handlers and default converters installed.
    pub fn new(sink: Arc<Sink>) -> anyhow::Result<Self> {
        let mut registry = Registry::default();
        builtins::install(&mut registry)?;

        Ok(Self {
            registry,
            converters: Converters::with_defaults(),
            sink,
        })
    }

    /// Register a consumer handler. Reusing a built-in's name overrides it.
    pub fn register(&mut self, handler: Handler) -> anyhow::Result<()> {
        self.registry.register(handler)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn converters_mut(&mut self) -> &mut Converters {
        &mut self.converters
    }

    pub fn sink(&self) -> &Arc<Sink> {
        &self.sink
    }

    /// Process a whole argument vector and return the run's verdict.
    ///
    /// An empty vector is treated as a request for help. A parse abort
    /// (unrecognized switch, argument before any switch) is logged through
    /// the sink and the verdict never stays below [`Outcome::Error`].
    pub fn run<I>(&self, args: I) -> Outcome
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut tokens: Vec<String> = args.into_iter().map(Into::into).collect();
        if tokens.is_empty() {
            tokens.push("-h".to_string());
        }

        let mut verdict = Outcome::Ok;
        if let Err(err) = self.dispatch(&tokens, &mut verdict) {
            self.sink.error(format!("{:#}", err));
            verdict = verdict.max(Outcome::Error);
        }
        verdict
    }

    fn dispatch(&self, tokens: &[String], verdict: &mut Outcome) -> anyhow::Result<()> {
        let mut open: Option<Group<'_>> = None;

        for (position, token) in tokens.iter().enumerate() {
            if let Some(switch) = long_switch(token) {
                if self.flush(&mut open, verdict) {
                    self.report_skipped(&tokens[position..]);
                    return Ok(());
                }
                let handler = self
                    .registry
                    .lookup_long(switch)
                    .ok_or_else(|| anyhow::anyhow!("unrecognized switch: --{}", switch))?;
                open = Some(Group {
                    handler,
                    switch: format!("--{}", switch),
                    tokens: Vec::new(),
                });
            } else if let Some((switch, glued)) = short_switch(token) {
                if self.flush(&mut open, verdict) {
                    self.report_skipped(&tokens[position..]);
                    return Ok(());
                }
                let handler = self
                    .registry
                    .lookup_short(switch)
                    .ok_or_else(|| anyhow::anyhow!("unrecognized switch: -{}", switch))?;
                let mut group = Group {
                    handler,
                    switch: format!("-{}", switch),
                    tokens: Vec::new(),
                };
                // "-v3" carries its first argument glued to the switch
                if !glued.is_empty() {
                    group.tokens.push(glued.to_string());
                }
                open = Some(group);
            } else if let Some(group) = open.as_mut() {
                group.tokens.push(token.clone());
            } else {
                anyhow::bail!("expected a command, found '{}'", token);
            }
        }

        self.flush(&mut open, verdict);
        Ok(())
    }

    /// Bind and invoke the open group, if any. Returns true once the
    /// verdict is fatal and nothing further may run.
    fn flush(&self, open: &mut Option<Group<'_>>, verdict: &mut Outcome) -> bool {
        if let Some(group) = open.take() {
            *verdict = (*verdict).max(self.run_group(group));
        }
        *verdict == Outcome::Fatal
    }

    fn run_group(&self, group: Group<'_>) -> Outcome {
        match bind::bind(&self.converters, group.handler.meta(), &group.tokens) {
            Ok(args) => {
                let (outcome, _elapsed) =
                    invoke::invoke(group.handler, &args, &self.registry, &self.sink);
                outcome
            }
            Err(BindError::Missing(names)) => {
                for name in names {
                    self.sink
                        .error(format!("{}: missing required parameter '{}'", group.switch, name));
                }
                Outcome::Fatal
            }
            Err(err) => {
                self.sink.error(format!("{}: {}", group.switch, err));
                Outcome::Fatal
            }
        }
    }

    fn report_skipped(&self, rest: &[String]) {
        self.sink
            .warning(format!("skipping remaining arguments: {}", rest.join(" ")));
    }
}

fn long_switch(token: &str) -> Option<&str> {
    if token.len() <= 2 || !token.starts_with("--") {
        return None;
    }
    let rest = &token[2..];
    if rest.chars().next().map_or(false, |c| c.is_ascii_alphabetic()) {
        Some(rest)
    } else {
        None
    }
}

fn short_switch(token: &str) -> Option<(char, &str)> {
    if token.len() < 2 || !token.starts_with('-') {
        return None;
    }
    let mut chars = token[1..].chars();
    let switch = chars.next()?;
    if switch.is_ascii_alphabetic() || switch == '?' {
        Some((switch, chars.as_str()))
    } else {
        None
    }
}
