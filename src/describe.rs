//! List the environment keys a record reads, without touching the environment.

use std::fmt;

use crate::env;
use crate::error::BindError;
use crate::field::Slot;
use crate::record::{self, FieldRef, Record, Visitor};
use crate::types::{Kind, Tag};

/// One environment variable a record would read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvKey {
    /// Full variable name, prefix included.
    pub key: String,
    /// Dotted path of the field, e.g. `database.host`.
    pub field: String,
    /// Kind of the value; for `Option<T>`, the kind of `T`.
    pub kind: Kind,
    pub optional: bool,
    pub type_name: &'static str,
}

/// The keys of a record in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvKeys(pub Vec<EnvKey>);

impl EnvKeys {
    /// Entries in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = &EnvKey> {
        self.0.iter()
    }

    /// Just the variable names, in traversal order.
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|k| k.key.as_str()).collect()
    }

    /// Number of keys, nested records included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the record reads no variables.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EnvKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let marker = if entry.optional { "?" } else { "" };
            write!(f, "{} ({}{marker}) -> {}", entry.key, entry.kind, entry.field)?;
        }
        Ok(())
    }
}

pub(crate) fn describe(prefix: &str, record: &mut dyn Record) -> Result<EnvKeys, BindError> {
    let mut collector = Collector {
        prefix,
        parents: Vec::new(),
        keys: Vec::new(),
    };
    record.visit_fields(&mut collector)?;
    Ok(EnvKeys(collector.keys))
}

struct Collector<'a> {
    prefix: &'a str,
    parents: Vec<&'static str>,
    keys: Vec<EnvKey>,
}

impl Visitor for Collector<'_> {
    fn visit(&mut self, field: FieldRef<'_>) -> Result<(), BindError> {
        match Tag::parse(field.tag) {
            Tag::Skip => Ok(()),
            Tag::Dive => {
                let path = record::field_path(&self.parents, field.name);
                let nested = record::dive_target(&path, field.type_name, field.slot)?;
                self.parents.push(field.name);
                let result = nested.visit_fields(self);
                self.parents.pop();
                result
            }
            Tag::Key(key) => {
                let (kind, optional) = match field.slot {
                    Slot::Optional(opt) => (opt.inner_kind(), true),
                    other => (other.kind(), false),
                };
                self.keys.push(EnvKey {
                    key: env::env_key(self.prefix, key),
                    field: record::field_path(&self.parents, field.name),
                    kind,
                    optional,
                    type_name: field.type_name,
                });
                Ok(())
            }
        }
    }
}
