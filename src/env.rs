use std::collections::{BTreeMap, HashMap};
use std::env::VarError;

use crate::error::BindError;

/// Well-known variable holding the default prefix.
pub const PREFIX_VAR: &str = "APP_PREFIX";

/// A read-only source of environment variables.
///
/// The binder only ever asks for single keys, so any map can stand in for the
/// process environment. Tests pass a `HashMap` instead of calling
/// `std::env::set_var`.
pub trait Environment {
    /// Look up `key`. `NotPresent` means the variable is unset.
    fn var(&self, key: &str) -> Result<String, VarError>;
}

/// The current process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Result<String, VarError> {
        std::env::var(key)
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Result<String, VarError> {
        self.get(key).cloned().ok_or(VarError::NotPresent)
    }
}

impl Environment for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Result<String, VarError> {
        self.get(key).cloned().ok_or(VarError::NotPresent)
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, key: &str) -> Result<String, VarError> {
        (**self).var(key)
    }
}

/// Look up `key`, treating unset as `None` and non-unicode values as errors.
///
/// A variable set to the empty string is present.
pub fn lookup(env: &dyn Environment, key: &str) -> Result<Option<String>, BindError> {
    match env.var(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(BindError::NotUnicode { key: key.into() }),
    }
}

/// Build the variable name for a literal tag: `{prefix}_{key}`, or `key` alone
/// when the prefix is empty. No case conversion happens.
pub fn env_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        return key.to_string();
    }
    format!("{prefix}_{key}")
}

/// Resolve the default prefix from `prefix_var`. Unset means empty.
pub fn default_prefix(env: &dyn Environment, prefix_var: &str) -> Result<String, BindError> {
    Ok(lookup(env, prefix_var)?.unwrap_or_default())
}
