//! Values exchanged with the scripting engine.

use std::fmt;
use std::rc::Rc;

use crate::binding::HostObject;

/// A value crossing the host/engine boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    /// The engine's `undefined` sentinel.
    Undefined,
    /// `null`.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    String(String),
    /// A host object.
    Object(Rc<HostObject>),
    /// A method, read as a property.
    Function(FunctionRef),
}

/// Names a method of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionRef {
    /// Class declaring the method.
    pub class: &'static str,
    /// Method name.
    pub name: &'static str,
}

impl HostValue {
    /// The string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The host object, if this is one.
    #[must_use]
    pub const fn as_object(&self) -> Option<&Rc<HostObject>> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Whether this is `undefined`.
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Whether this is `null` or `undefined`.
    #[must_use]
    pub const fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// ECMAScript `ToNumber`, for the primitive cases.
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Null => 0.0,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Number(n) => *n,
            Self::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
            Self::Undefined | Self::Object(_) | Self::Function(_) => f64::NAN,
        }
    }

    /// ECMAScript `ToString`.
    #[must_use]
    pub fn to_js_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => format_number(*n, f),
            Self::String(s) => f.write_str(s),
            Self::Object(object) => write!(f, "[object {}]", object.class()),
            Self::Function(function) => write!(f, "function {}() {{ [native code] }}", function.name),
        }
    }
}

/// `Number::toString` for the common cases. Rust already prints integral
/// floats without a fraction; only the special values differ.
fn format_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        f.write_str("0")
    } else {
        write!(f, "{n}")
    }
}

impl From<&str> for HostValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for HostValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for HostValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for HostValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Rc<HostObject>> for HostValue {
    fn from(value: Rc<HostObject>) -> Self {
        Self::Object(value)
    }
}

/// Outcome of a member request.
///
/// `NotFound` means the member does not exist for the active browser; the
/// engine reports it through its own not-found path. A member that exists
/// but yields `undefined` is `Found(HostValue::Undefined)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// No such member.
    NotFound,
    /// The member exists.
    Found(T),
}

impl<T> Lookup<T> {
    /// Whether the member exists.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The found value.
    #[must_use]
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => None,
        }
    }
}
