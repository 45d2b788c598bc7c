//! The binding walk: visit a record's fields depth first and apply matching
//! environment values in place.
//!
//! The first failing field stops the walk. Fields visited before it keep their
//! new values; fields after it are never looked at.

use std::any::type_name;

use tracing::{debug, trace};

use crate::env::{self, Environment};
use crate::error::BindError;
use crate::field::{self, Field, SetFailure, Slot};
use crate::record::{self, FieldRef, Record, Visitor};
use crate::types::{Kind, Tag};

/// Bind `target`, which must be record-shaped, against `env`.
pub(crate) fn bind_target<T: Field + ?Sized>(
    env: &dyn Environment,
    prefix: &str,
    target: &mut T,
) -> Result<(), BindError> {
    let type_name = type_name::<T>();
    match target.slot() {
        Slot::Record(record) => {
            debug!(prefix, target = type_name, "binding environment");
            Walker::new(env, prefix).walk(record)
        }
        Slot::Optional(opt) => Err(BindError::InvalidTarget {
            type_name,
            kind: Kind::Optional,
            unset: !opt.is_set(),
        }),
        other => Err(BindError::InvalidTarget {
            type_name,
            kind: other.kind(),
            unset: false,
        }),
    }
}

struct Walker<'a> {
    env: &'a dyn Environment,
    prefix: &'a str,
    parents: Vec<&'static str>,
}

impl<'a> Walker<'a> {
    fn new(env: &'a dyn Environment, prefix: &'a str) -> Self {
        Self {
            env,
            prefix,
            parents: Vec::new(),
        }
    }

    fn walk(&mut self, record: &mut dyn Record) -> Result<(), BindError> {
        record.visit_fields(self)
    }

    fn dive(&mut self, field: FieldRef<'_>) -> Result<(), BindError> {
        let path = record::field_path(&self.parents, field.name);
        let nested = record::dive_target(&path, field.type_name, field.slot)?;

        self.parents.push(field.name);
        let result = self.walk(nested);
        self.parents.pop();
        result
    }

    fn set(&mut self, field: FieldRef<'_>, key: &str) -> Result<(), BindError> {
        let env_key = env::env_key(self.prefix, key);
        let Some(value) = env::lookup(self.env, &env_key)? else {
            trace!(key = %env_key, "env key not set, keeping current value");
            return Ok(());
        };

        match field::set_slot(field.slot, &value) {
            Ok(()) => {
                debug!(
                    key = %env_key,
                    field = %record::field_path(&self.parents, field.name),
                    "applied env value"
                );
                Ok(())
            }
            Err(SetFailure::Unsupported(kind)) => Err(BindError::UnsupportedKind {
                field: record::field_path(&self.parents, field.name),
                key: env_key,
                type_name: field.type_name,
                kind,
            }),
            Err(SetFailure::Coerce(source)) => Err(BindError::SetValue {
                key: env_key,
                value,
                source,
            }),
        }
    }
}

impl Visitor for Walker<'_> {
    fn visit(&mut self, field: FieldRef<'_>) -> Result<(), BindError> {
        match Tag::parse(field.tag) {
            Tag::Skip => {
                trace!(field = field.name, "untagged field skipped");
                Ok(())
            }
            Tag::Dive => self.dive(field),
            Tag::Key(key) => self.set(field, key),
        }
    }
}
