//! # Runtime
//!
//! Explicit process-wide state with a documented lifecycle.
//!
//! A [`ProcessScope`] owns every value that would otherwise live in a global static.
//! Entries are constructed in installation order before the body of the program runs,
//! and torn down in reverse order after the last use, exactly once.
//!
//! ## Example
//!
//! ```rust
//! use persona_runtime::ProcessScope;
//!
//! # fn main() -> Result<(), persona_runtime::RuntimeError> {
//! let greeting = ProcessScope::builder()
//!     .install("greeting", || Ok(String::from("hello")))
//!     .start()?
//!     .run(|scope| scope.get::<String>("greeting").map(Clone::clone))?;
//!
//! assert_eq!(greeting, "hello");
//! # Ok(())
//! # }
//! ```

mod error;

pub use anyhow::Result as FactoryResult;
pub use error::{Result, RuntimeError, RuntimeErrorExt};

use std::any::{Any, type_name};
use std::borrow::Cow;
use tracing::{debug, info, trace};

type Factory = Box<dyn FnOnce() -> anyhow::Result<Box<dyn Any>>>;

struct Pending {
    name: Cow<'static, str>,
    type_name: &'static str,
    factory: Factory,
}

struct Entry {
    name: Cow<'static, str>,
    type_name: &'static str,
    value: Box<dyn Any>,
}

/// Collects entry factories; nothing is constructed until [`ProcessScopeBuilder::start`].
#[must_use = "The scope does not exist until `start` is called"]
#[derive(Default)]
pub struct ProcessScopeBuilder {
    pending: Vec<Pending>,
}

impl std::fmt::Debug for ProcessScopeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.pending.iter().map(|p| p.name.as_ref()).collect();
        f.debug_struct("ProcessScopeBuilder").field("pending", &names).finish()
    }
}

impl ProcessScopeBuilder {
    /// Queues a named entry. Factories run in the order they were installed.
    pub fn install<T, F>(mut self, name: impl Into<Cow<'static, str>>, factory: F) -> Self
    where
        T: Any,
        F: FnOnce() -> anyhow::Result<T> + 'static,
    {
        self.pending.push(Pending {
            name: name.into(),
            type_name: type_name::<T>(),
            factory: Box::new(move || factory().map(|value| Box::new(value) as Box<dyn Any>)),
        });
        self
    }

    /// Runs every factory in installation order.
    ///
    /// # Errors
    /// * [`RuntimeError::Duplicate`] if two entries share a name; no factory runs.
    /// * [`RuntimeError::Init`] if a factory fails; entries already constructed are torn
    ///   down in reverse order before the error is returned.
    pub fn start(self) -> Result<ProcessScope> {
        for (idx, pending) in self.pending.iter().enumerate() {
            if self.pending[..idx].iter().any(|p| p.name == pending.name) {
                return Err(RuntimeError::Duplicate {
                    message: pending.name.clone(),
                    context: Some("ProcessScope::start".into()),
                });
            }
        }

        let mut scope = ProcessScope { entries: Vec::with_capacity(self.pending.len()) };
        for Pending { name, type_name, factory } in self.pending {
            debug!(entry = %name, ty = type_name, "Initializing scope entry");
            let value = factory().context(name.clone())?;
            scope.entries.push(Entry { name, type_name, value });
        }

        info!(entries = scope.entries.len(), "Process scope started");
        Ok(scope)
    }
}

/// Owner of process-wide state. Dropping the scope tears it down.
pub struct ProcessScope {
    entries: Vec<Entry>,
}

impl std::fmt::Debug for ProcessScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.entries.iter().map(|e| (e.name.as_ref(), e.type_name))).finish()
    }
}

impl ProcessScope {
    pub fn builder() -> ProcessScopeBuilder {
        ProcessScopeBuilder::default()
    }

    /// Typed access to an installed entry.
    ///
    /// # Errors
    /// Returns [`RuntimeError::NotInstalled`] if no entry has this name, or the entry
    /// holds a type other than `T`.
    pub fn get<T: Any>(&self, name: &str) -> Result<&T> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .and_then(|entry| entry.value.downcast_ref::<T>())
            .ok_or_else(|| RuntimeError::NotInstalled {
                message: format!("{name}: {}", type_name::<T>()).into(),
                context: None,
            })
    }

    /// Installed names, in installation order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_ref()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs `body` with the scope, then tears the scope down.
    pub fn run<R>(self, body: impl FnOnce(&Self) -> R) -> R {
        let output = body(&self);
        self.shutdown();
        output
    }

    /// Tears every entry down in reverse installation order.
    ///
    /// Returns the number of entries dropped.
    pub fn shutdown(mut self) -> usize {
        self.teardown()
    }

    fn teardown(&mut self) -> usize {
        let count = self.entries.len();
        while let Some(entry) = self.entries.pop() {
            trace!(entry = %entry.name, ty = entry.type_name, "Tearing down scope entry");
            drop(entry.value);
        }
        if count > 0 {
            info!(entries = count, "Process scope torn down");
        }
        count
    }
}

impl Drop for ProcessScope {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Tracked {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.log.borrow_mut().push(format!("drop {}", self.name));
        }
    }

    fn tracked(
        name: &'static str,
        log: &Rc<RefCell<Vec<String>>>,
    ) -> impl FnOnce() -> anyhow::Result<Tracked> + 'static {
        let log = Rc::clone(log);
        move || {
            log.borrow_mut().push(format!("init {name}"));
            Ok(Tracked { name, log })
        }
    }

    #[test]
    fn teardown_runs_in_reverse_installation_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let scope = ProcessScope::builder()
            .install("first", tracked("first", &log))
            .install("second", tracked("second", &log))
            .start()
            .unwrap();

        assert_eq!(scope.names(), vec!["first", "second"]);
        assert_eq!(scope.shutdown(), 2);
        assert_eq!(*log.borrow(), vec!["init first", "init second", "drop second", "drop first"]);
    }

    #[test]
    fn drop_tears_down_exactly_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let _scope =
                ProcessScope::builder().install("only", tracked("only", &log)).start().unwrap();
        }
        assert_eq!(*log.borrow(), vec!["init only", "drop only"]);
    }

    #[test]
    fn duplicate_names_rejected_before_any_factory_runs() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let result = ProcessScope::builder()
            .install("dup", tracked("a", &log))
            .install("dup", tracked("b", &log))
            .start();

        assert!(matches!(result, Err(RuntimeError::Duplicate { .. })));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn failed_factory_unwinds_started_entries() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let result = ProcessScope::builder()
            .install("ok", tracked("ok", &log))
            .install("broken", || -> anyhow::Result<u8> { Err(anyhow::anyhow!("no disk")) })
            .install("never", tracked("never", &log))
            .start();

        let err = result.unwrap_err();
        assert!(matches!(err, RuntimeError::Init { .. }));
        assert_eq!(err.to_string(), "Failed to initialize scope entry (broken): no disk");
        assert_eq!(*log.borrow(), vec!["init ok", "drop ok"]);
    }

    #[test]
    fn get_checks_name_and_type() {
        let scope = ProcessScope::builder().install("answer", || Ok(42_u32)).start().unwrap();

        assert_eq!(*scope.get::<u32>("answer").unwrap(), 42);
        assert!(matches!(scope.get::<String>("answer"), Err(RuntimeError::NotInstalled { .. })));
        assert!(matches!(scope.get::<u32>("missing"), Err(RuntimeError::NotInstalled { .. })));
    }

    #[test]
    fn run_tears_down_after_body() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let body_log = Rc::clone(&log);
        let scope =
            ProcessScope::builder().install("tracked", tracked("tracked", &log)).start().unwrap();
        let len = scope.run(|scope| {
            body_log.borrow_mut().push("body".to_owned());
            scope.len()
        });

        assert_eq!(len, 1);
        assert_eq!(*log.borrow(), vec!["init tracked", "body", "drop tracked"]);
    }
}
