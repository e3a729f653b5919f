use std::collections::HashMap;
use std::sync::Arc;

use switchyard_commands::Metadata;

use crate::convert::Value;
use crate::invoke::Outcome;
use crate::sink::Sink;

/// What a handler target gets to see while it runs.
pub struct Context<'a> {
    /// Typed arguments, one per declared parameter, in declared order.
    pub args: &'a [Value],
    pub registry: &'a Registry,
    pub sink: &'a Arc<Sink>,
}

pub type Target = Box<dyn Fn(Context<'_>) -> anyhow::Result<Outcome> + Send + Sync>;

/// A registered command: validated metadata plus the callable target.
/// Owned by the [`Registry`]; the invoker only ever borrows one.
pub struct Handler {
    name: Box<str>,
    meta: Metadata,
    target: Target,
}

impl Handler {
    pub fn new<F>(name: &str, meta: Metadata, target: F) -> Self
    where
        F: Fn(Context<'_>) -> anyhow::Result<Outcome> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            meta,
            target: Box::new(target),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn meta(&self) -> &Metadata {
        &self.meta
    }

    pub(crate) fn call(&self, ctx: Context<'_>) -> anyhow::Result<Outcome> {
        (self.target)(ctx)
    }
}

/// Switch lookup plus the registration-ordered handler list.
///
/// Registering a handler whose name matches an earlier one replaces that
/// handler in place, keeping its list position and unmapping its old
/// switches. A switch already owned by a *different* handler is rejected
/// outright instead of being shadowed.
#[derive(Default)]
pub struct Registry {
    handlers: Vec<Handler>,
    shorts: HashMap<char, usize>,
    longs: HashMap<Box<str>, usize>,
}

impl Registry {
    pub fn register(&mut self, handler: Handler) -> anyhow::Result<()> {
        let slot = self
            .handlers
            .iter()
            .position(|h| h.name() == handler.name());

        for &switch in handler.meta().shorts() {
            if let Some(&index) = self.shorts.get(&switch) {
                anyhow::ensure!(
                    Some(index) == slot,
                    "short switch '-{}' is already taken by '{}'",
                    switch,
                    self.handlers[index].name()
                );
            }
        }
        for switch in handler.meta().longs() {
            if let Some(&index) = self.longs.get(switch) {
                anyhow::ensure!(
                    Some(index) == slot,
                    "long switch '--{}' is already taken by '{}'",
                    switch,
                    self.handlers[index].name()
                );
            }
        }

        let shorts: Vec<char> = handler.meta().shorts().to_vec();
        let longs: Vec<Box<str>> = handler.meta().longs().map(Into::into).collect();

        let index = match slot {
            Some(index) => {
                log::debug!("'{}' overrides an earlier registration", handler.name());
                self.shorts.retain(|_, i| *i != index);
                self.longs.retain(|_, i| *i != index);
                self.handlers[index] = handler;
                index
            }
            None => {
                self.handlers.push(handler);
                self.handlers.len() - 1
            }
        };

        for switch in shorts {
            self.shorts.insert(switch, index);
        }
        for switch in longs {
            self.longs.insert(switch, index);
        }

        Ok(())
    }

    pub fn lookup_short(&self, switch: char) -> Option<&Handler> {
        self.shorts.get(&switch).map(|&i| &self.handlers[i])
    }

    pub fn lookup_long(&self, switch: &str) -> Option<&Handler> {
        self.longs.get(switch).map(|&i| &self.handlers[i])
    }

    /// Handlers in registration order.
    pub fn handlers(&self) -> impl Iterator<Item = &Handler> {
        self.handlers.iter()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(name: &str, short: char) -> Handler {
        let meta = Metadata::describe(name).short(short).build().unwrap();
        Handler::new(name, meta, |_ctx: Context<'_>| Ok(Outcome::Ok))
    }

    #[test]
    fn lookup_finds_registered_switches() {
        let mut registry = Registry::default();
        registry.register(handler("alpha", 'a')).unwrap();
        registry.register(handler("beta", 'b')).unwrap();

        assert_eq!(registry.lookup_short('a').unwrap().name(), "alpha");
        assert_eq!(registry.lookup_short('b').unwrap().name(), "beta");
        assert!(registry.lookup_short('c').is_none());
        assert!(registry.lookup_long("alpha").is_none());
    }

    #[test]
    fn switch_collisions_fail_loudly() {
        let mut registry = Registry::default();
        registry.register(handler("alpha", 'a')).unwrap();

        let err = registry.register(handler("beta", 'a')).unwrap_err();
        assert!(err.to_string().contains("'-a'"), "{}", err);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn same_name_overrides_in_place() {
        let mut registry = Registry::default();
        registry.register(handler("alpha", 'a')).unwrap();
        registry.register(handler("beta", 'b')).unwrap();

        // takes alpha's slot and remaps its switch
        let meta = Metadata::describe("replacement").short('x').build().unwrap();
        registry
            .register(Handler::new("alpha", meta, |_ctx: Context<'_>| {
                Ok(Outcome::Error)
            }))
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.lookup_short('a').is_none());
        assert_eq!(registry.lookup_short('x').unwrap().name(), "alpha");

        let order: Vec<&str> = registry.handlers().map(Handler::name).collect();
        assert_eq!(order, vec!["alpha", "beta"]);
        assert_eq!(registry.handlers().next().unwrap().meta().help(), "replacement");
    }

    #[test]
    fn override_can_keep_its_own_switches() {
        let mut registry = Registry::default();
        registry.register(handler("alpha", 'a')).unwrap();
        registry.register(handler("alpha", 'a')).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup_short('a').unwrap().name(), "alpha");
    }
}
