use crate::bind;
use crate::describe::{self, EnvKeys};
use crate::env::{self, Environment, PREFIX_VAR, ProcessEnv};
use crate::error::BindError;
use crate::field::Field;
use crate::record::Record;

/// Builder for binding environment variables onto a record.
///
/// By default the binder reads the process environment and takes its prefix
/// from `APP_PREFIX`. Both can be replaced:
///
/// - [`prefix()`](Self::prefix) sets the prefix explicitly; `APP_PREFIX` is
///   then never read.
/// - [`prefix_var()`](Self::prefix_var) reads the default prefix from a
///   different variable.
/// - [`env()`](Self::env) swaps in any [`Environment`], e.g. a `HashMap`.
#[derive(Debug, Clone)]
pub struct EnvBinder<E = ProcessEnv> {
    env: E,
    prefix: Option<String>,
    prefix_var: String,
}

impl EnvBinder<ProcessEnv> {
    pub fn new() -> Self {
        Self {
            env: ProcessEnv,
            prefix: None,
            prefix_var: PREFIX_VAR.to_string(),
        }
    }
}

impl Default for EnvBinder<ProcessEnv> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Environment> EnvBinder<E> {
    /// Read variables from `env` instead of the current source.
    pub fn env<F: Environment>(self, env: F) -> EnvBinder<F> {
        EnvBinder {
            env,
            prefix: self.prefix,
            prefix_var: self.prefix_var,
        }
    }

    /// Use an explicit prefix. An empty string binds bare keys.
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    /// Read the default prefix from `name` (default: `APP_PREFIX`).
    /// Ignored when [`prefix()`](Self::prefix) is set.
    pub fn prefix_var(mut self, name: &str) -> Self {
        self.prefix_var = name.to_string();
        self
    }

    /// Resolve the effective prefix: explicit, else the prefix variable, else empty.
    fn effective_prefix(&self) -> Result<String, BindError> {
        if let Some(prefix) = &self.prefix {
            return Ok(prefix.clone());
        }
        env::default_prefix(&self.env, &self.prefix_var)
    }

    /// Bind environment values onto `target` in place.
    ///
    /// `target` must be record-shaped; anything else fails with
    /// [`BindError::InvalidTarget`]. Unset variables leave fields untouched.
    pub fn bind<T: Field + ?Sized>(&self, target: &mut T) -> Result<(), BindError> {
        let prefix = self.effective_prefix()?;
        bind::bind_target(&self.env, &prefix, target)
    }

    /// Like [`bind()`](Self::bind), but panics on error.
    pub fn must_bind<T: Field + ?Sized>(&self, target: &mut T) {
        if let Err(e) = self.bind(target) {
            panic!("envbind: {e}");
        }
    }

    /// List the environment keys `R` reads under the effective prefix.
    ///
    /// Walks `R::default()`; optional records are expanded on that scratch
    /// value, so keys below unset `Option` dives are included.
    pub fn describe<R: Record + Default>(&self) -> Result<EnvKeys, BindError> {
        let prefix = self.effective_prefix()?;
        describe::describe(&prefix, &mut R::default())
    }
}
