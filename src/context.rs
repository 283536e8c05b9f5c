//! Execution context: named bindings, reserved hook names, and the shared scope.
//!
//! A [`Context`] is the registration-based rendition of a test file's
//! namespace: callers bind named zero-argument callables into an ordered
//! list, and the harness discovers tests by the `test` name prefix.
//! Binding order is observable: it fixes both execution order and the
//! order of records in the resulting summary.
//!
//! The [`Scope`] is the explicit shared mutable state that every callable
//! receives by `&mut`. It is intentionally shared: fixtures set by `setUp`
//! or by an earlier test are visible to later tests in the same context,
//! and the harness never resets it between tests.

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Reserved name for the once-before-all hook.
pub const SETUP: &str = "setUp";
/// Reserved name for the once-after-all hook.
pub const TEARDOWN: &str = "tearDown";
/// Name prefix that marks a binding as a test case.
pub const TEST_PREFIX: &str = "test";

/// A value raised by a test body.
///
/// Test bodies in dynamic hosts throw heterogeneous values: bare strings,
/// engine-level errors carrying a script stack, or arbitrary structured
/// objects. The harness normalizes all of these into one canonical
/// [`Failure`](crate::report::Failure) shape before recording; the variant
/// only determines how that normalization goes.
#[derive(Debug, Error)]
pub enum Thrown {
    /// A bare string. Wrapped into a structured failure with the
    /// string-origin marker set, so reporting layers can render it
    /// without a stack trace.
    #[error("{0}")]
    Message(String),
    /// An error carrying host-engine stack metadata. The stack is
    /// extracted into the failure record as a human-readable string.
    #[error("{message}")]
    Native { message: String, stack: String },
    /// Any structured error value; recorded as-is.
    #[error(transparent)]
    Error(Box<dyn StdError + Send + Sync>),
}

impl Thrown {
    /// Raise a structured error value.
    pub fn error(err: impl StdError + Send + Sync + 'static) -> Self {
        Thrown::Error(Box::new(err))
    }
}

impl From<String> for Thrown {
    fn from(message: String) -> Self {
        Thrown::Message(message)
    }
}

impl From<&str> for Thrown {
    fn from(message: &str) -> Self {
        Thrown::Message(message.to_string())
    }
}

/// A test case or lifecycle hook: a zero-argument callable over the shared scope.
pub type TestFn = Box<dyn FnMut(&mut Scope) -> Result<(), Thrown>>;

/// Shared mutable fixture store, passed by `&mut` into every callable.
///
/// Mutations made by one test are visible to subsequent tests in the same
/// context. This is deliberate (matching the shared-namespace model tests
/// are written against), not incidental global state.
#[derive(Debug, Default)]
pub struct Scope {
    values: BTreeMap<String, Value>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a fixture value, replacing any previous value under the name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.values.get(name).and_then(Value::as_bool)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.values.get(name).and_then(Value::as_i64)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    /// Increment an integer fixture, treating a missing value as 0.
    /// Returns the new value. Handy for run-once flags and counters.
    pub fn incr(&mut self, name: &str) -> i64 {
        let next = self.get_i64(name).unwrap_or(0) + 1;
        self.set(name, next);
        next
    }
}

pub(crate) struct Binding {
    pub(crate) name: String,
    pub(crate) func: TestFn,
}

/// An ordered collection of named callables plus the shared [`Scope`].
///
/// Bindings whose name starts with [`TEST_PREFIX`] are test cases; the
/// reserved names [`SETUP`] and [`TEARDOWN`] are lifecycle hooks. All
/// other bindings are inert as far as the harness is concerned (fixture
/// data belongs in the scope, not the binding list).
///
/// Rebinding an existing name replaces the callable in place and keeps
/// its original position, so at most one hook of each kind exists.
#[derive(Default)]
pub struct Context {
    pub(crate) bindings: Vec<Binding>,
    pub(crate) scope: Scope,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a named callable, preserving insertion order.
    ///
    /// If the name is already bound, the callable is replaced in place.
    pub fn bind(
        &mut self,
        name: impl Into<String>,
        func: impl FnMut(&mut Scope) -> Result<(), Thrown> + 'static,
    ) -> &mut Self {
        let name = name.into();
        let func: TestFn = Box::new(func);
        match self.bindings.iter_mut().find(|b| b.name == name) {
            Some(existing) => existing.func = func,
            None => self.bindings.push(Binding { name, func }),
        }
        self
    }

    /// Bind the `setUp` hook (sugar for [`bind`](Context::bind)).
    pub fn set_up(&mut self, func: impl FnMut(&mut Scope) -> Result<(), Thrown> + 'static) -> &mut Self {
        self.bind(SETUP, func)
    }

    /// Bind the `tearDown` hook (sugar for [`bind`](Context::bind)).
    pub fn tear_down(&mut self, func: impl FnMut(&mut Scope) -> Result<(), Thrown> + 'static) -> &mut Self {
        self.bind(TEARDOWN, func)
    }

    /// Names of the bindings that qualify as test cases, in binding order.
    ///
    /// Computed fresh on each call; the harness performs the same scan at
    /// the start of every run (no caching across runs).
    pub fn test_names(&self) -> Vec<&str> {
        self.bindings
            .iter()
            .filter(|b| b.name.starts_with(TEST_PREFIX))
            .map(|b| b.name.as_str())
            .collect()
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn scope_mut(&mut self) -> &mut Scope {
        &mut self.scope
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field(
                "bindings",
                &self.bindings.iter().map(|b| b.name.as_str()).collect::<Vec<_>>(),
            )
            .field("scope", &self.scope)
            .finish()
    }
}
