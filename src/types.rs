use std::fmt;

/// Tag value that marks a field as a nested record to traverse.
pub const DIVE: &str = ",dive";

/// How a field's binding tag is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag<'a> {
    /// Empty tag: the field is not bound.
    Skip,
    /// Recurse into the field with the same prefix.
    Dive,
    /// Bind the field from `{prefix}_{key}`.
    Key(&'a str),
}

impl<'a> Tag<'a> {
    /// Interpret a field tag.
    ///
    /// Only the exact marker `",dive"` recurses. Any other non-empty text,
    /// including `"DB,dive"`, is a literal key used verbatim.
    pub fn parse(tag: &'a str) -> Self {
        match tag {
            "" => Tag::Skip,
            DIVE => Tag::Dive,
            key => Tag::Key(key),
        }
    }
}

/// The shape of a field, as reported in errors and key listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Bool,
    Int,
    Uint,
    Float,
    Char,
    String,
    /// A type parsed by its own [`UnmarshalText`](crate::UnmarshalText) hook.
    Text,
    Record,
    Optional,
    Sequence,
    Map,
    /// Anything without a more specific shape.
    Unit,
}

impl Kind {
    /// Lowercase name used in error messages and key listings.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Char => "char",
            Kind::String => "string",
            Kind::Text => "text",
            Kind::Record => "record",
            Kind::Optional => "optional",
            Kind::Sequence => "sequence",
            Kind::Map => "map",
            Kind::Unit => "unit",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
