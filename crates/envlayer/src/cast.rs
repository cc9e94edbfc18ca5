//! Typed conversion of environment values.
//!
//! Responsibilities:
//! - Convert raw strings into typed values (string, atom, boolean, integer, float).
//! - Apply the empty-string policy of each flavor: plain, `!` (required),
//!   `?` (optional).
//! - Accept caller-supplied conversion functions.
//!
//! Does NOT handle:
//! - Reading the environment (see `loader::typed`).
//!
//! Invariants:
//! - `?` flavors map `""` to `None`; `!` flavors reject `""` with `CastError::Empty`.
//! - Plain flavors pass `""` through when the target type can represent it
//!   (string, atom, boolean) and reject it otherwise (integer, float).
//! - Error messages never echo the raw value.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Result of a successful cast.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Str(String),
    /// Symbolic identifier, kept as its textual name.
    Atom(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastKind {
    String,
    Atom,
    Boolean,
    Integer,
    Float,
}

impl CastKind {
    fn name(self) -> &'static str {
        match self {
            CastKind::String => "string",
            CastKind::Atom => "atom",
            CastKind::Boolean => "boolean",
            CastKind::Integer => "integer",
            CastKind::Float => "float",
        }
    }
}

/// Empty-string policy of a built-in caster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flavor {
    #[default]
    Plain,
    /// `!` suffix: empty input is an error.
    Required,
    /// `?` suffix: empty input is absent.
    Optional,
}

type CustomCast = Box<dyn Fn(&str) -> Result<TypedValue, String>>;

/// How to convert a raw environment string.
pub enum Caster {
    Builtin { kind: CastKind, flavor: Flavor },
    /// Caller-supplied conversion; `Err` carries a short reason.
    Custom(CustomCast),
}

impl Caster {
    pub fn new(kind: CastKind, flavor: Flavor) -> Self {
        Caster::Builtin { kind, flavor }
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<TypedValue, String> + 'static,
    {
        Caster::Custom(Box::new(f))
    }
}

impl fmt::Debug for Caster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Caster({self})")
    }
}

impl fmt::Display for Caster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Caster::Builtin { kind, flavor } => {
                let suffix = match flavor {
                    Flavor::Plain => "",
                    Flavor::Required => "!",
                    Flavor::Optional => "?",
                };
                write!(f, "{}{}", kind.name(), suffix)
            }
            Caster::Custom(_) => f.write_str("custom"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown caster '{0}'")]
pub struct UnknownCaster(pub String);

impl FromStr for Caster {
    type Err = UnknownCaster;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, flavor) = if let Some(name) = s.strip_suffix('!') {
            (name, Flavor::Required)
        } else if let Some(name) = s.strip_suffix('?') {
            (name, Flavor::Optional)
        } else {
            (s, Flavor::Plain)
        };
        let kind = match name {
            "string" => CastKind::String,
            "atom" => CastKind::Atom,
            "boolean" => CastKind::Boolean,
            "integer" => CastKind::Integer,
            "float" => CastKind::Float,
            _ => return Err(UnknownCaster(s.to_string())),
        };
        Ok(Caster::new(kind, flavor))
    }
}

/// Conversion failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CastError {
    #[error("empty value not allowed for caster {caster}")]
    Empty { caster: String },

    #[error("cannot cast value with caster {caster}: {reason}")]
    BadCast { caster: String, reason: String },
}

/// Convert `raw` with `caster`. `Ok(None)` means "absent".
pub fn cast(raw: &str, caster: &Caster) -> Result<Option<TypedValue>, CastError> {
    let (kind, flavor) = match caster {
        Caster::Custom(f) => {
            return f(raw).map(Some).map_err(|reason| CastError::BadCast {
                caster: caster.to_string(),
                reason,
            });
        }
        Caster::Builtin { kind, flavor } => (*kind, *flavor),
    };

    if raw.is_empty() {
        return match (flavor, kind) {
            (Flavor::Optional, _) => Ok(None),
            (Flavor::Plain, CastKind::String) => Ok(Some(TypedValue::Str(String::new()))),
            (Flavor::Plain, CastKind::Atom) => Ok(Some(TypedValue::Atom(String::new()))),
            (Flavor::Plain, CastKind::Boolean) => Ok(Some(TypedValue::Bool(false))),
            _ => Err(CastError::Empty {
                caster: caster.to_string(),
            }),
        };
    }

    let bad = |reason: &str| CastError::BadCast {
        caster: caster.to_string(),
        reason: reason.to_string(),
    };
    let value = match kind {
        CastKind::String => TypedValue::Str(raw.to_string()),
        CastKind::Atom => TypedValue::Atom(raw.to_string()),
        CastKind::Boolean => TypedValue::Bool(parse_bool(raw)),
        CastKind::Integer => TypedValue::Int(raw.parse().map_err(|_| bad("must be an integer"))?),
        CastKind::Float => TypedValue::Float(raw.parse().map_err(|_| bad("must be a number"))?),
    };
    Ok(Some(value))
}

fn parse_bool(raw: &str) -> bool {
    !(raw == "0" || raw.eq_ignore_ascii_case("false"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caster(name: &str) -> Caster {
        name.parse().unwrap()
    }

    fn ok(raw: &str, name: &str) -> Option<TypedValue> {
        cast(raw, &caster(name)).unwrap_or_else(|e| panic!("{raw:?} as {name}: {e}"))
    }

    #[test]
    fn test_caster_names_round_trip() {
        for name in ["string", "atom!", "boolean?", "integer", "float!"] {
            assert_eq!(caster(name).to_string(), name);
        }
        assert_eq!(
            "number".parse::<Caster>().unwrap_err(),
            UnknownCaster("number".to_string())
        );
    }

    #[test]
    fn test_string_flavors_on_empty() {
        assert_eq!(ok("", "string"), Some(TypedValue::Str(String::new())));
        assert_eq!(ok("", "string?"), None);
        assert_eq!(
            cast("", &caster("string!")),
            Err(CastError::Empty {
                caster: "string!".to_string()
            })
        );
    }

    #[test]
    fn test_atom() {
        assert_eq!(ok("info", "atom"), Some(TypedValue::Atom("info".to_string())));
        assert_eq!(ok("", "atom"), Some(TypedValue::Atom(String::new())));
        assert_eq!(ok("", "atom?"), None);
    }

    #[test]
    fn test_boolean() {
        for falsy in ["false", "FALSE", "False", "0"] {
            assert_eq!(ok(falsy, "boolean"), Some(TypedValue::Bool(false)), "{falsy}");
        }
        for truthy in ["true", "1", "yes", "anything"] {
            assert_eq!(ok(truthy, "boolean!"), Some(TypedValue::Bool(true)), "{truthy}");
        }
        assert_eq!(ok("", "boolean"), Some(TypedValue::Bool(false)));
        assert_eq!(ok("", "boolean?"), None);
        assert!(matches!(cast("", &caster("boolean!")), Err(CastError::Empty { .. })));
    }

    #[test]
    fn test_integer() {
        assert_eq!(ok("42", "integer"), Some(TypedValue::Int(42)));
        assert_eq!(ok("-7", "integer!"), Some(TypedValue::Int(-7)));
        assert_eq!(ok("", "integer?"), None);
        assert!(matches!(cast("", &caster("integer")), Err(CastError::Empty { .. })));
        assert!(matches!(cast(" 42", &caster("integer")), Err(CastError::BadCast { .. })));
        assert!(matches!(cast("4.2", &caster("integer?")), Err(CastError::BadCast { .. })));
    }

    #[test]
    fn test_float() {
        assert_eq!(ok("1.5", "float"), Some(TypedValue::Float(1.5)));
        assert_eq!(ok("3", "float"), Some(TypedValue::Float(3.0)));
        assert!(matches!(cast("", &caster("float!")), Err(CastError::Empty { .. })));
        assert!(matches!(cast("abc", &caster("float")), Err(CastError::BadCast { .. })));
    }

    #[test]
    fn test_bad_cast_message_hides_value() {
        let err = cast("s3cr3t", &caster("integer")).unwrap_err();
        let message = err.to_string();
        assert_eq!(message, "cannot cast value with caster integer: must be an integer");
        assert!(!message.contains("s3cr3t"));
    }

    #[test]
    fn test_custom_caster() {
        let port = Caster::custom(|raw| match raw.parse::<u16>() {
            Ok(p) if p > 0 => Ok(TypedValue::Int(i64::from(p))),
            _ => Err("must be a port number".to_string()),
        });

        assert_eq!(cast("8080", &port), Ok(Some(TypedValue::Int(8080))));
        assert_eq!(
            cast("0", &port),
            Err(CastError::BadCast {
                caster: "custom".to_string(),
                reason: "must be a port number".to_string(),
            })
        );
    }
}
