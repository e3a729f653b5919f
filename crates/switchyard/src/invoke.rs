use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::convert::Value;
use crate::registry::{Context, Handler, Registry};
use crate::sink::Sink;

/// Outcome of one invocation, or of a whole run.
///
/// Ordered so aggregation is a plain `max`: `Ok < Error < Fatal`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Outcome {
    Ok,
    Error,
    Fatal,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Ok => 0,
            Outcome::Error => 1,
            Outcome::Fatal => 2,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Outcome::Ok => "ok",
            Outcome::Error => "error",
            Outcome::Fatal => "fatal error",
        })
    }
}

/// Execute a bound handler and classify what happened.
///
/// The sink's error counter is snapshotted around the call: a target that
/// logs an error while returning [`Outcome::Ok`] is downgraded to
/// [`Outcome::Error`]. A target that returns `Err` is logged and forced to
/// [`Outcome::Fatal`]. Elapsed time is diagnostics only.
pub fn invoke(
    handler: &Handler,
    args: &[Value],
    registry: &Registry,
    sink: &Arc<Sink>,
) -> (Outcome, Duration) {
    let before = sink.error_count();
    let start = Instant::now();

    let result = handler.call(Context {
        args,
        registry,
        sink,
    });

    let elapsed = start.elapsed();

    let outcome = match result {
        Ok(Outcome::Ok) if sink.error_count() > before => Outcome::Error,
        Ok(outcome) => outcome,
        Err(err) => {
            sink.error(format!("{} failed: {:#}", handler.name(), err));
            Outcome::Fatal
        }
    };

    log::debug!(
        "'{}' finished in {:?} with outcome: {}",
        handler.name(),
        elapsed,
        outcome
    );

    (outcome, elapsed)
}
