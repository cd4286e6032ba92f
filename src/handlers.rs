//! Handler registration
//!
//! Commands name their implementation with an opaque `<namespace>/<symbol>`
//! locator. Hosts register a typed handler for each locator up front; the
//! dispatcher only ever looks locators up in this table.

use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use crate::errors::{CmdlineError, Result};

/// A validated `<namespace>/<symbol>` handler locator
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerLocator {
    raw: String,
    split: usize,
}

impl HandlerLocator {
    /// Parse a locator, rejecting anything but exactly one non-empty namespace
    /// and one non-empty symbol
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = || CmdlineError::InvalidLocator(raw.to_string());

        let split = raw.find('/').ok_or_else(invalid)?;
        let (namespace, symbol) = (&raw[..split], &raw[split + 1..]);
        if namespace.is_empty() || symbol.is_empty() || symbol.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            raw: raw.to_string(),
            split,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.raw[..self.split]
    }

    pub fn symbol(&self) -> &str {
        &self.raw[self.split + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for HandlerLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Argument values bound for one dispatch, in declaration order.
///
/// Flags bind to `None`, value-taking arguments to `Some(value)`. Absent
/// optional arguments have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundArguments {
    values: IndexMap<String, Option<String>>,
}

impl BoundArguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: String, value: Option<String>) {
        self.values.insert(name, value);
    }

    /// Whether the argument was supplied (flag or value)
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The value bound to a value-taking argument
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn into_inner(self) -> IndexMap<String, Option<String>> {
        self.values
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for BoundArguments {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Implementation invoked for a matched command
pub trait Handler: Send + Sync {
    fn call(&self, args: &BoundArguments) -> anyhow::Result<()>;
}

impl<F> Handler for F
where
    F: Fn(&BoundArguments) -> anyhow::Result<()> + Send + Sync,
{
    fn call(&self, args: &BoundArguments) -> anyhow::Result<()> {
        self(args)
    }
}

/// Locator → handler table, populated at startup
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn Handler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under a locator.
    ///
    /// Fails if the locator is malformed or already taken.
    pub fn register<H>(&mut self, locator: &str, handler: H) -> Result<&mut Self>
    where
        H: Handler + 'static,
    {
        let locator = HandlerLocator::parse(locator)?;
        if self.handlers.contains_key(locator.as_str()) {
            return Err(CmdlineError::DuplicateHandler(locator.to_string()));
        }

        self.handlers.insert(locator.to_string(), Arc::new(handler));
        Ok(self)
    }

    pub fn get(&self, locator: &str) -> Option<&dyn Handler> {
        self.handlers.get(locator).map(|h| h.as_ref())
    }

    pub fn contains(&self, locator: &str) -> bool {
        self.handlers.contains_key(locator)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut locators: Vec<&str> = self.handlers.keys().map(|k| k.as_str()).collect();
        locators.sort_unstable();
        f.debug_struct("HandlerRegistry")
            .field("locators", &locators)
            .finish()
    }
}
