use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::types::Kind;

/// Error type returned by [`UnmarshalText`](crate::UnmarshalText) hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum BindError {
    #[error("Invalid bind target: {}", describe_target(.type_name, .kind, .unset))]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(envbind::invalid_target),
            help("pass `&mut` to a struct that derives or implements `Record`")
        )
    )]
    InvalidTarget {
        type_name: &'static str,
        kind: Kind,
        /// The target was an unset `Option`.
        unset: bool,
    },

    #[error("Field '{field}' is tagged ',dive' but {type_name} is of kind {kind}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(envbind::invalid_dive_target),
            help("',dive' only applies to records and optional records")
        )
    )]
    InvalidDiveTarget {
        field: String,
        type_name: &'static str,
        kind: Kind,
    },

    #[error("Field '{field}' (env key '{key}') has unsupported kind {kind} ({type_name})")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(envbind::unsupported_kind),
            help("implement `UnmarshalText` for the field type, or wrap it in `Json<T>`")
        )
    )]
    UnsupportedKind {
        field: String,
        key: String,
        type_name: &'static str,
        kind: Kind,
    },

    #[error("Failed to set env key '{key}' from value '{value}': {source}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envbind::set_value)))]
    SetValue {
        key: String,
        value: String,
        source: CoerceError,
    },

    #[error("Env key '{key}' is set but its value is not valid unicode")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envbind::not_unicode)))]
    NotUnicode { key: String },
}

impl BindError {
    /// Whether the failure was reported by a custom [`UnmarshalText`](crate::UnmarshalText) hook.
    pub fn is_custom_parse(&self) -> bool {
        matches!(
            self,
            BindError::SetValue {
                source: CoerceError::Custom(_),
                ..
            }
        )
    }
}

fn describe_target(type_name: &str, kind: &Kind, unset: &bool) -> String {
    if *unset {
        return format!("unset {type_name}");
    }
    format!("{type_name} of kind {kind}")
}

/// Why a raw environment string could not be converted into a field value.
#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum CoerceError {
    #[error("invalid integer: {0}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envbind::coerce::int)))]
    Int(#[from] ParseIntError),

    #[error("unsigned value '{0}' must not carry a sign")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envbind::coerce::unsigned_sign)))]
    UnsignedSign(String),

    #[error("invalid float: {0}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envbind::coerce::float)))]
    Float(#[from] ParseFloatError),

    #[error("invalid bool '{0}'")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(envbind::coerce::bool),
            help("use one of 1 t T TRUE true True 0 f F FALSE false False")
        )
    )]
    Bool(String),

    #[error("expected a single character, got '{0}'")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envbind::coerce::char)))]
    Char(String),

    #[error("unmarshal value: {0}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envbind::coerce::custom)))]
    Custom(#[source] BoxError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_target_formats_type_and_kind() {
        let err = BindError::InvalidTarget {
            type_name: "u16",
            kind: Kind::Uint,
            unset: false,
        };
        let msg = err.to_string();
        assert!(msg.contains("u16"));
        assert!(msg.contains("uint"));
    }

    #[test]
    fn unset_target_formats_as_unset() {
        let err = BindError::InvalidTarget {
            type_name: "core::option::Option<Config>",
            kind: Kind::Optional,
            unset: true,
        };
        assert!(err.to_string().contains("unset"));
    }

    #[test]
    fn set_value_includes_key_and_value() {
        let source: CoerceError = "x".parse::<u16>().unwrap_err().into();
        let err = BindError::SetValue {
            key: "APP_PORT".into(),
            value: "x".into(),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("APP_PORT"));
        assert!(msg.contains("'x'"));
        assert!(!err.is_custom_parse());
    }

    #[test]
    fn custom_errors_are_flagged() {
        let err = BindError::SetValue {
            key: "K".into(),
            value: "v".into(),
            source: CoerceError::Custom("boom".into()),
        };
        assert!(err.is_custom_parse());
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn dive_target_names_field() {
        let err = BindError::InvalidDiveTarget {
            field: "info".into(),
            type_name: "alloc::string::String",
            kind: Kind::String,
        };
        assert!(err.to_string().contains("'info'"));
    }

    #[cfg(feature = "rich-errors")]
    #[test]
    fn diagnostic_codes() {
        use miette::Diagnostic;

        let err = BindError::InvalidTarget {
            type_name: "u16",
            kind: Kind::Uint,
            unset: false,
        };
        assert_eq!(err.code().unwrap().to_string(), "envbind::invalid_target");
        assert!(err.help().is_some());

        let coerce = CoerceError::Bool("yes".into());
        assert_eq!(coerce.code().unwrap().to_string(), "envbind::coerce::bool");
    }
}
