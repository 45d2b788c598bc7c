//! Field slots and built-in value coercion.
//!
//! Every bindable type describes itself as a [`Slot`]. The slot decides how a
//! raw environment string reaches the value:
//!
//! 1. [`Slot::Text`]: the type's own [`UnmarshalText`] hook. A type that opts
//!    in is never parsed by the built-in rules, even if it wraps a number.
//! 2. [`Slot::Scalar`]: integers, floats, `bool`, `char` and `String`.
//! 3. [`Slot::Optional`]: a fresh inner value is coerced with the same rules
//!    and stored only on success.
//! 4. Records, sequences and maps have no text form and fail as unsupported.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use crate::error::{BoxError, CoerceError};
use crate::record::Record;
use crate::types::Kind;

/// Custom text parsing for a field type.
///
/// The hook must work on a freshly defaulted value: an unset `Option<T>` field
/// is filled by calling it on `T::default()`.
pub trait UnmarshalText {
    fn unmarshal_text(&mut self, text: &str) -> Result<(), BoxError>;
}

/// A value with a built-in conversion from text.
///
/// Integers parse in base 10 at the field's width. Signed types take a
/// leading `+` or `-`; unsigned types take no sign at all.
pub trait Scalar {
    fn kind(&self) -> Kind;
    fn set_from_str(&mut self, raw: &str) -> Result<(), CoerceError>;
}

/// An optional slot, such as `Option<T>`.
pub trait OptionalField {
    fn is_set(&self) -> bool;

    /// Kind of the wrapped type, whether or not a value is present.
    fn inner_kind(&mut self) -> Kind;

    /// Store a default value if unset, then hand out the inner slot.
    fn get_or_insert_default(&mut self) -> Slot<'_>;

    /// Build a default inner value, pass its slot to `apply`, and store it
    /// only if `apply` returns `true`.
    fn with_fresh(&mut self, apply: &mut dyn FnMut(Slot<'_>) -> bool);
}

/// How a field can be reached by the binder.
pub enum Slot<'a> {
    Scalar(&'a mut dyn Scalar),
    Text(&'a mut dyn UnmarshalText),
    Record(&'a mut dyn Record),
    Optional(&'a mut dyn OptionalField),
    Unsupported(Kind),
}

impl Slot<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            Slot::Scalar(s) => s.kind(),
            Slot::Text(_) => Kind::Text,
            Slot::Record(_) => Kind::Record,
            Slot::Optional(_) => Kind::Optional,
            Slot::Unsupported(kind) => *kind,
        }
    }
}

/// A type that can appear as a tagged field of a [`Record`].
///
/// Implemented for the built-in scalars, `Option<T>`, `Box<T>`, and the
/// standard collections (as unsupported). `#[derive(Record)]` implements it
/// for records, and [`text_field!`](crate::text_field) for hook types.
pub trait Field {
    fn slot(&mut self) -> Slot<'_>;
}

/// Implement [`Field`] for types that parse themselves via [`UnmarshalText`].
///
/// ```
/// use envbind::{BoxError, UnmarshalText};
///
/// #[derive(Default)]
/// struct Level(u8);
///
/// impl UnmarshalText for Level {
///     fn unmarshal_text(&mut self, text: &str) -> Result<(), BoxError> {
///         self.0 = match text {
///             "low" => 1,
///             "high" => 9,
///             other => return Err(format!("unknown level {other}").into()),
///         };
///         Ok(())
///     }
/// }
///
/// envbind::text_field!(Level);
/// ```
#[macro_export]
macro_rules! text_field {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Field for $ty {
                fn slot(&mut self) -> $crate::Slot<'_> {
                    $crate::Slot::Text(self)
                }
            }
        )+
    };
}

/// Failure while pushing a raw value into a slot.
#[derive(Debug)]
pub(crate) enum SetFailure {
    Unsupported(Kind),
    Coerce(CoerceError),
}

/// Apply `raw` to `slot` following the coercion order in the module docs.
pub(crate) fn set_slot(slot: Slot<'_>, raw: &str) -> Result<(), SetFailure> {
    match slot {
        Slot::Text(hook) => hook
            .unmarshal_text(raw)
            .map_err(|e| SetFailure::Coerce(CoerceError::Custom(e))),
        Slot::Scalar(scalar) => scalar.set_from_str(raw).map_err(SetFailure::Coerce),
        Slot::Optional(opt) => {
            let mut failure = None;
            opt.with_fresh(&mut |inner| match set_slot(inner, raw) {
                Ok(()) => true,
                Err(e) => {
                    failure = Some(e);
                    false
                }
            });
            failure.map_or(Ok(()), Err)
        }
        Slot::Record(_) => Err(SetFailure::Unsupported(Kind::Record)),
        Slot::Unsupported(kind) => Err(SetFailure::Unsupported(kind)),
    }
}

/// Parse a bool using the conventional spellings:
/// `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(raw: &str) -> Result<bool, CoerceError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(CoerceError::Bool(other.to_string())),
    }
}

macro_rules! from_str_scalar {
    ($kind:expr => $($ty:ty),+) => {
        $(
            impl Scalar for $ty {
                fn kind(&self) -> Kind {
                    $kind
                }

                fn set_from_str(&mut self, raw: &str) -> Result<(), CoerceError> {
                    // `str::parse` takes a leading `+` even for unsigned types.
                    if $kind == Kind::Uint && raw.starts_with('+') {
                        return Err(CoerceError::UnsignedSign(raw.to_string()));
                    }
                    *self = raw.parse::<$ty>()?;
                    Ok(())
                }
            }

            impl Field for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::Scalar(self)
                }
            }
        )+
    };
}

from_str_scalar!(Kind::Int => i8, i16, i32, i64, i128, isize);
from_str_scalar!(Kind::Uint => u8, u16, u32, u64, u128, usize);
from_str_scalar!(Kind::Float => f32, f64);

impl Scalar for bool {
    fn kind(&self) -> Kind {
        Kind::Bool
    }

    fn set_from_str(&mut self, raw: &str) -> Result<(), CoerceError> {
        *self = parse_bool(raw)?;
        Ok(())
    }
}

impl Scalar for char {
    fn kind(&self) -> Kind {
        Kind::Char
    }

    fn set_from_str(&mut self, raw: &str) -> Result<(), CoerceError> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                *self = c;
                Ok(())
            }
            _ => Err(CoerceError::Char(raw.to_string())),
        }
    }
}

impl Scalar for String {
    fn kind(&self) -> Kind {
        Kind::String
    }

    fn set_from_str(&mut self, raw: &str) -> Result<(), CoerceError> {
        raw.clone_into(self);
        Ok(())
    }
}

impl Field for bool {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Scalar(self)
    }
}

impl Field for char {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Scalar(self)
    }
}

impl Field for String {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Scalar(self)
    }
}

impl<T: Field + Default> OptionalField for Option<T> {
    fn is_set(&self) -> bool {
        self.is_some()
    }

    fn inner_kind(&mut self) -> Kind {
        match self {
            Some(value) => value.slot().kind(),
            None => T::default().slot().kind(),
        }
    }

    fn get_or_insert_default(&mut self) -> Slot<'_> {
        self.get_or_insert_with(T::default).slot()
    }

    fn with_fresh(&mut self, apply: &mut dyn FnMut(Slot<'_>) -> bool) {
        let mut fresh = T::default();
        if apply(fresh.slot()) {
            *self = Some(fresh);
        }
    }
}

impl<T: Field + Default> Field for Option<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Optional(self)
    }
}

impl<T: Field + ?Sized> Field for Box<T> {
    fn slot(&mut self) -> Slot<'_> {
        (**self).slot()
    }
}

macro_rules! unsupported_field {
    ($kind:expr => $($ty:ty $([$($gen:tt)*])?),+) => {
        $(
            impl $(<$($gen)*>)? Field for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::Unsupported($kind)
                }
            }
        )+
    };
}

unsupported_field!(Kind::Sequence =>
    Vec<T> [T],
    VecDeque<T> [T],
    HashSet<T, S> [T, S],
    BTreeSet<T> [T],
    [T; N] [T, const N: usize]
);
unsupported_field!(Kind::Map =>
    HashMap<K, V, S> [K, V, S],
    BTreeMap<K, V> [K, V]
);
unsupported_field!(Kind::Unit => ());
