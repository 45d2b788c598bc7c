use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;

use crate::error::BoxError;
use crate::field::{Field, Slot, UnmarshalText};

/// A field parsed as JSON.
///
/// Gives sequences and maps a text form without writing a hook:
/// `APP_HOSTS='["a", "b"]'` binds a `Json<Vec<String>>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Json<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: DeserializeOwned> UnmarshalText for Json<T> {
    fn unmarshal_text(&mut self, text: &str) -> Result<(), BoxError> {
        self.0 = serde_json::from_str(text)?;
        Ok(())
    }
}

impl<T: DeserializeOwned> Field for Json<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Text(self)
    }
}
