use thiserror::Error;

/// Error codes prefixed by layer: R = reflection metadata / path resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Naming
    R001, // method name is not a getter/setter name

    // Descriptor lookups
    R002, // accessor is ambiguous
    R003, // no such property
    R004, // no default constructor

    // Paths and types
    R005, // malformed path expression
    R006, // type not registered in the universe

    // Invocation
    R007, // instance could not perform the access
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::R001 => "R001",
            Self::R002 => "R002",
            Self::R003 => "R003",
            Self::R004 => "R004",
            Self::R005 => "R005",
            Self::R006 => "R006",
            Self::R007 => "R007",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{}] {message}", code.as_str())]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    // ── Constructors for the common cases ─────────────────────────────────────

    pub fn invalid_accessor_name(name: &str) -> Self {
        Self::new(ErrorCode::R001, format!(
            "error parsing property name '{name}': didn't start with 'is', 'get' or 'set'"
        ))
    }

    pub fn no_getter(property: &str, owner: impl std::fmt::Display) -> Self {
        Self::new(ErrorCode::R003, format!(
            "there is no getter for property named '{property}' in '{owner}'"
        ))
    }

    pub fn no_setter(property: &str, owner: impl std::fmt::Display) -> Self {
        Self::new(ErrorCode::R003, format!(
            "there is no setter for property named '{property}' in '{owner}'"
        ))
    }

    pub fn invalid_path(path: &str, reason: &str) -> Self {
        Self::new(ErrorCode::R005, format!("invalid property path `{path}`: {reason}"))
    }

    pub fn unknown_type(name: &str) -> Self {
        Self::new(ErrorCode::R006, format!("type `{name}` is not registered"))
    }
}
