// File: src/registry.rs
// Purpose: Registry mapping validator names to validator functions

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

type PlainFn = dyn Fn(&dyn Any) -> anyhow::Result<()> + Send + Sync;
type ParamsFn = dyn Fn(&dyn Any, &[String]) -> anyhow::Result<()> + Send + Sync;

/// A registered validator, in one of the two accepted shapes.
///
/// The shape is chosen at registration time. Bracketed parameters in a
/// directive are ignored by `Plain` validators; `WithParams` validators
/// named without brackets receive an empty slice.
pub enum Validator {
    /// `fn(value) -> Result`
    Plain(Box<PlainFn>),
    /// `fn(value, params) -> Result`
    WithParams(Box<ParamsFn>),
}

impl Validator {
    pub fn call(&self, value: &dyn Any, params: &[String]) -> anyhow::Result<()> {
        match self {
            Validator::Plain(f) => f(value),
            Validator::WithParams(f) => f(value, params),
        }
    }

    pub fn takes_params(&self) -> bool {
        matches!(self, Validator::WithParams(_))
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::Plain(_) => f.write_str("Validator::Plain"),
            Validator::WithParams(_) => f.write_str("Validator::WithParams"),
        }
    }
}

/// Map of directive names to validators.
///
/// Built once by the caller, then only read while validating. Share it across
/// threads behind an `Arc` once construction is finished; validation never
/// mutates it.
#[derive(Debug, Default)]
pub struct Validators {
    validators: HashMap<String, Validator>,
}

impl Validators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a validator taking only the field value.
    /// A later registration under the same name replaces the earlier one.
    pub fn insert<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&dyn Any) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.validators.insert(name.into(), Validator::Plain(Box::new(f)));
        self
    }

    /// Register a validator taking the field value and the directive's bracketed parameters
    pub fn insert_with_params<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&dyn Any, &[String]) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.validators
            .insert(name.into(), Validator::WithParams(Box::new(f)));
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<Validator> {
        self.validators.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Validator> {
        self.validators.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
