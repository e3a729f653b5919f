use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// The message categories a [`Sink`] accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    Note,
    Warning,
    Error,
}

impl Level {
    pub const fn mask(self) -> u8 {
        match self {
            Level::Note => 1,
            Level::Warning => 2,
            Level::Error => 4,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Level::Note => "note",
            Level::Warning => "warning",
            Level::Error => "error",
        })
    }
}

/// One logged message, as delivered to observers.
#[derive(Clone, Debug)]
pub struct Record {
    pub level: Level,
    pub text: String,
}

/// The leveled log sink the dispatch engine writes through.
///
/// Warning and error counters only ever go up; the invoker snapshots the
/// error counter around each command to detect handlers that log errors
/// while still returning an ok result. A single mutex guards the counters,
/// the verbosity mask, the destination and the observer list so those
/// snapshots stay consistent when handlers log from background threads.
pub struct Sink {
    inner: Mutex<Inner>,
}

struct Inner {
    errors: u64,
    warnings: u64,
    mask: u8,
    dest: Dest,
    observers: Vec<async_channel::Sender<Record>>,
}

enum Dest {
    Stderr,
    File(std::fs::File),
}

impl Default for Sink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink {
    /// Mask with every category enabled.
    pub const ALL: u8 = Level::Note.mask() | Level::Warning.mask() | Level::Error.mask();

    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                errors: 0,
                warnings: 0,
                mask: Self::ALL,
                dest: Dest::Stderr,
                observers: Vec::new(),
            }),
        }
    }

    pub fn note<S>(&self, text: S)
    where
        S: Into<String>,
    {
        self.push(Level::Note, text.into())
    }

    pub fn warning<S>(&self, text: S)
    where
        S: Into<String>,
    {
        self.push(Level::Warning, text.into())
    }

    pub fn error<S>(&self, text: S)
    where
        S: Into<String>,
    {
        self.push(Level::Error, text.into())
    }

    pub fn error_count(&self) -> u64 {
        self.lock().errors
    }

    pub fn warning_count(&self) -> u64 {
        self.lock().warnings
    }

    /// Bitmask of [`Level::mask`] bits controlling which categories are
    /// written to the destination. Counters and observers are unaffected.
    pub fn set_verbosity(&self, mask: u8) {
        self.lock().mask = mask;
    }

    pub fn verbosity(&self) -> u8 {
        self.lock().mask
    }

    /// Redirect all further output to a file, created if missing.
    pub fn redirect_to_file(&self, path: &Path) -> anyhow::Result<()> {
        use anyhow::Context as _;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open log file '{}'", path.display()))?;

        self.lock().dest = Dest::File(file);
        Ok(())
    }

    /// Register an observer. Every record is delivered fire-and-forget;
    /// a dropped receiver is pruned on the next send.
    pub fn subscribe(&self) -> async_channel::Receiver<Record> {
        let (tx, rx) = async_channel::unbounded();
        self.lock().observers.push(tx);
        rx
    }

    fn push(&self, level: Level, text: String) {
        let mut inner = self.lock();

        // counters first: the invoker's snapshots must observe the
        // increment even when the destination write fails
        match level {
            Level::Warning => inner.warnings += 1,
            Level::Error => inner.errors += 1,
            Level::Note => {}
        }

        let record = Record { level, text };

        if inner.mask & level.mask() != 0 {
            if let Err(err) = inner.emit(&record) {
                log::warn!("cannot write to the log destination: {}", err);
            }
        }

        inner
            .observers
            .retain(|tx| tx.try_send(record.clone()).is_ok());
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|err| err.into_inner())
    }
}

impl Inner {
    fn emit(&mut self, record: &Record) -> std::io::Result<()> {
        match &mut self.dest {
            Dest::Stderr => {
                eprintln!("[{}] {}", record.level, record.text);
                Ok(())
            }
            Dest::File(file) => writeln!(file, "[{}] {}", record.level, record.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_are_monotonic() {
        let sink = Sink::new();
        assert_eq!(sink.error_count(), 0);
        assert_eq!(sink.warning_count(), 0);

        sink.note("just a note");
        sink.warning("careful");
        sink.error("boom");
        sink.error("boom again");

        assert_eq!(sink.warning_count(), 1);
        assert_eq!(sink.error_count(), 2);
    }

    #[test]
    fn mask_gates_emission_but_not_counters() {
        let sink = Sink::new();
        sink.set_verbosity(0);

        sink.error("still counted");
        assert_eq!(sink.error_count(), 1);
        assert_eq!(sink.verbosity(), 0);
    }

    #[test]
    fn observers_receive_every_record() {
        let sink = Sink::new();
        sink.set_verbosity(0);
        let rx = sink.subscribe();

        sink.note("one");
        sink.error("two");

        let first = futures_lite::future::block_on(rx.recv()).unwrap();
        assert_eq!(first.level, Level::Note);
        assert_eq!(first.text, "one");

        let second = rx.try_recv().unwrap();
        assert_eq!(second.level, Level::Error);
        assert_eq!(second.text, "two");
    }

    #[test]
    fn dropped_observers_are_pruned() {
        let sink = Sink::new();
        let rx = sink.subscribe();
        drop(rx);

        // must not fail, the closed channel is forgotten
        sink.note("nobody listens");
        assert_eq!(sink.lock().observers.len(), 0);
    }

    #[test]
    fn redirect_writes_to_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");

        let sink = Sink::new();
        sink.redirect_to_file(&path).unwrap();
        sink.error("written to disk");

        let data = std::fs::read_to_string(&path).unwrap();
        assert_eq!(data, "[error] written to disk\n");
    }
}
