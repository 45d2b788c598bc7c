use std::any::type_name;

use tracing::debug;

use crate::error::BindError;
use crate::field::{Field, Slot};
use crate::types::Kind;

/// A struct whose tagged fields can be bound from the environment.
///
/// Usually derived. A hand-written impl reports each tagged field, in
/// declaration order, to the visitor:
///
/// ```
/// use envbind::{BindError, Field, FieldRef, Record, Slot, Visitor};
///
/// #[derive(Default)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// impl Record for Server {
///     fn visit_fields(&mut self, visitor: &mut dyn Visitor) -> Result<(), BindError> {
///         visitor.visit(FieldRef::new("host", "HOST", &mut self.host))?;
///         visitor.visit(FieldRef::new("port", "PORT", &mut self.port))?;
///         Ok(())
///     }
/// }
///
/// impl Field for Server {
///     fn slot(&mut self) -> Slot<'_> {
///         Slot::Record(self)
///     }
/// }
/// ```
pub trait Record {
    fn visit_fields(&mut self, visitor: &mut dyn Visitor) -> Result<(), BindError>;
}

/// Receives the fields of a [`Record`] one at a time.
///
/// Returning an error stops the walk; the record must propagate it unchanged.
pub trait Visitor {
    fn visit(&mut self, field: FieldRef<'_>) -> Result<(), BindError>;
}

/// One field of a record, as handed to a [`Visitor`].
pub struct FieldRef<'a> {
    /// Rust field name.
    pub name: &'static str,
    /// Binding tag: `""`, `",dive"`, or a literal key.
    pub tag: &'static str,
    pub type_name: &'static str,
    pub slot: Slot<'a>,
}

impl<'a> FieldRef<'a> {
    pub fn new<T: Field + ?Sized>(name: &'static str, tag: &'static str, value: &'a mut T) -> Self {
        Self {
            name,
            tag,
            type_name: type_name::<T>(),
            slot: value.slot(),
        }
    }
}

/// Dotted path of `name` below the dive fields in `parents`.
pub(crate) fn field_path(parents: &[&'static str], name: &str) -> String {
    let mut path = parents.join(".");
    if !path.is_empty() {
        path.push('.');
    }
    path.push_str(name);
    path
}

/// Resolve the record a `,dive` field points into.
///
/// An unset optional record is replaced with its default first. Optional
/// fields whose inner type is not a record are rejected before anything is
/// allocated.
pub(crate) fn dive_target<'a>(
    path: &str,
    type_name: &'static str,
    slot: Slot<'a>,
) -> Result<&'a mut dyn Record, BindError> {
    let invalid = |kind: Kind| BindError::InvalidDiveTarget {
        field: path.to_string(),
        type_name,
        kind,
    };

    match slot {
        Slot::Record(record) => Ok(record),
        Slot::Optional(opt) => {
            let kind = opt.inner_kind();
            if kind != Kind::Record {
                return Err(invalid(kind));
            }
            if !opt.is_set() {
                debug!(field = path, "allocating nested record");
            }
            match opt.get_or_insert_default() {
                Slot::Record(record) => Ok(record),
                other => Err(invalid(other.kind())),
            }
        }
        other => Err(invalid(other.kind())),
    }
}
