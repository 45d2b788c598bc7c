//! Bind environment variables onto the fields of a config struct. Tag the
//! fields, pick a prefix, and go.
//!
//! ```ignore
//! #[derive(Default, envbind::Record)]
//! struct ServiceConfig {
//!     #[env("ADDR")]
//!     addr: String,
//!     #[env("PORT")]
//!     port: u16,
//!     #[env(",dive")]
//!     metrics: MetricsConfig,
//! }
//!
//! let mut config = ServiceConfig { port: 8080, ..Default::default() };
//! envbind::bind(&mut config)?;
//! ```
//!
//! With `APP_PREFIX=EXAMPLE` that call reads `EXAMPLE_ADDR`, `EXAMPLE_PORT`,
//! and whatever keys `MetricsConfig` declares, and writes each value that is
//! set into the struct. Variables that are not set leave the field alone, so
//! defaults are whatever the struct held before the call.
//!
//! # Tags
//!
//! Each field carries one tag:
//!
//! | Tag | Effect |
//! |-----|--------|
//! | none, or `""` | field ignored |
//! | `"KEY"` | bound from `{PREFIX}_KEY`, or `KEY` with an empty prefix |
//! | `",dive"` | the field is a nested record, walked with the same prefix |
//!
//! Keys are used verbatim. There is no case conversion and no separator
//! other than the single `_` between prefix and key.
//!
//! A `,dive` field may be a record or an `Option` of one. An unset `Option`
//! is replaced with the record's `Default` before the walk continues into it.
//! Diving into anything else fails with [`BindError::InvalidDiveTarget`].
//!
//! # Coercion
//!
//! A set variable is converted according to the field type:
//!
//! 1. Types implementing [`UnmarshalText`] (registered with
//!    [`text_field!`]) parse the value themselves. This wins over every
//!    built-in rule, so a `struct Port(u16)` with a hook never sees the
//!    numeric parser.
//! 2. Integers of every width, base 10, sized to the field. Signed types
//!    take a leading `+` or `-`; unsigned types reject any sign.
//! 3. `f32` and `f64`.
//! 4. `bool`: `1 t T TRUE true True` or `0 f F FALSE false False`.
//! 5. `String` verbatim, and `char` for exactly one character.
//! 6. `Option<T>`: a fresh `T::default()` is converted under the same rules,
//!    and the field becomes `Some` only if that succeeds.
//!
//! Sequences, maps and records have no built-in text form. Binding one from a
//! literal tag fails with [`BindError::UnsupportedKind`]; give it a hook, or
//! wrap it in [`Json`] (behind the `json` feature).
//!
//! A variable that is present but empty is still converted: an empty
//! `String` becomes `""`, an empty integer is an error.
//!
//! # Records without the derive
//!
//! `#[derive(Record)]` (the `derive` feature, on by default) is a shorthand
//! for implementing [`Record`] and [`Field`] by hand. A hand-written
//! [`Record::visit_fields`] is the explicit field table: one
//! [`FieldRef`] per tagged field, in declaration order. See [`Record`].
//!
//! # Derive rules
//!
//! The derive accepts `#[env("KEY")]`, `#[env = "KEY"]` and `#[env(",dive")]`:
//!
//! ```
//! #[derive(Default, envbind::Record)]
//! struct Database {
//!     #[env("DB_HOST")]
//!     host: String,
//! }
//!
//! #[derive(Default, envbind::Record)]
//! struct Service {
//!     #[env = "PORT"]
//!     port: u16,
//!     #[env(",dive")]
//!     database: Database,
//! }
//! ```
//!
//! A tag is either a key or the dive marker, never both:
//!
//! ```compile_fail
//! #[derive(Default, envbind::Record)]
//! struct Service {
//!     #[env("DB,dive")]
//!     database: String,
//! }
//! ```
//!
//! Only structs can be records:
//!
//! ```compile_fail
//! #[derive(envbind::Record)]
//! enum Mode {
//!     Fast,
//!     Slow,
//! }
//! ```
//!
//! A field carries at most one tag:
//!
//! ```compile_fail
//! #[derive(Default, envbind::Record)]
//! struct Service {
//!     #[env("PORT")]
//!     #[env("LISTEN_PORT")]
//!     port: u16,
//! }
//! ```
//!
//! # Prefix
//!
//! [`bind()`] reads the prefix from `APP_PREFIX`; unset means no prefix.
//! [`bind_with_prefix()`] takes it explicitly and never reads `APP_PREFIX`.
//! [`EnvBinder`] can also read it from another variable, or bind against a
//! synthetic environment:
//!
//! ```
//! use std::collections::HashMap;
//!
//! # #[derive(Default)] struct Empty;
//! # impl envbind::Record for Empty {
//! #     fn visit_fields(&mut self, _: &mut dyn envbind::Visitor) -> Result<(), envbind::BindError> { Ok(()) }
//! # }
//! # impl envbind::Field for Empty {
//! #     fn slot(&mut self) -> envbind::Slot<'_> { envbind::Slot::Record(self) }
//! # }
//! let env = HashMap::from([("SVC_PORT".to_string(), "8080".to_string())]);
//! let mut config = Empty::default();
//! envbind::EnvBinder::new().env(env).prefix("SVC").bind(&mut config)?;
//! # Ok::<(), envbind::BindError>(())
//! ```
//!
//! # Errors
//!
//! Binding stops at the first failure and returns it; there is no partial
//! success mode and no error aggregation. Fields bound before the failure keep
//! their new values. Every error names the field or key involved. See
//! [`BindError`] for the full set.
//!
//! The `must_*` variants panic with the error message instead of returning it.

pub mod error;
pub mod types;

mod bind;
mod builder;
mod describe;
mod env;
mod field;
#[cfg(feature = "json")]
mod json;
mod record;

#[cfg(test)]
mod fixtures;

pub use builder::EnvBinder;
pub use describe::{EnvKey, EnvKeys};
pub use env::{Environment, PREFIX_VAR, ProcessEnv, env_key};
pub use error::{BindError, BoxError, CoerceError};
pub use field::{Field, OptionalField, Scalar, Slot, UnmarshalText, parse_bool};
#[cfg(feature = "json")]
pub use json::Json;
pub use record::{FieldRef, Record, Visitor};
pub use types::{DIVE, Kind, Tag};

#[cfg(feature = "derive")]
pub use envbind_derive::Record;

/// Bind from the process environment, taking the prefix from `APP_PREFIX`.
pub fn bind<T: Field + ?Sized>(target: &mut T) -> Result<(), BindError> {
    EnvBinder::new().bind(target)
}

/// Bind from the process environment with an explicit prefix.
pub fn bind_with_prefix<T: Field + ?Sized>(target: &mut T, prefix: &str) -> Result<(), BindError> {
    EnvBinder::new().prefix(prefix).bind(target)
}

/// [`bind()`], panicking on error.
pub fn must_bind<T: Field + ?Sized>(target: &mut T) {
    EnvBinder::new().must_bind(target)
}

/// [`bind_with_prefix()`], panicking on error.
pub fn must_bind_with_prefix<T: Field + ?Sized>(target: &mut T, prefix: &str) {
    EnvBinder::new().prefix(prefix).must_bind(target)
}
