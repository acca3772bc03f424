//! Declared type expressions.
//!
//! `Ty` is what a member's signature says, before or after type-variable
//! substitution. The erased form (`Ty::erasure`) is what conflict resolution
//! and assignability checks compare.

use std::fmt;

/// Name of the root of the reference-type hierarchy.
pub const OBJECT: &str = "Object";

// ─── Primitives ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prim {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
}

impl Prim {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte    => "byte",
            Self::Short   => "short",
            Self::Int     => "int",
            Self::Long    => "long",
            Self::Float   => "float",
            Self::Double  => "double",
            Self::Char    => "char",
        }
    }
}

// ─── Ty ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ty {
    /// Return type of a method that produces nothing.
    Void,
    Prim(Prim),
    /// A named class or interface used without type arguments.
    Class(String),
    /// `List<Item>`, `Map<String, T>`.
    Generic { raw: String, args: Vec<Ty> },
    /// A type variable such as `T`.
    Var(String),
    Array(Box<Ty>),
}

impl Ty {
    pub const BOOLEAN: Ty = Ty::Prim(Prim::Boolean);
    pub const INT:     Ty = Ty::Prim(Prim::Int);
    pub const LONG:    Ty = Ty::Prim(Prim::Long);
    pub const DOUBLE:  Ty = Ty::Prim(Prim::Double);

    pub fn class(name: impl Into<String>) -> Self {
        Ty::Class(name.into())
    }

    pub fn generic(raw: impl Into<String>, args: impl IntoIterator<Item = Ty>) -> Self {
        Ty::Generic { raw: raw.into(), args: args.into_iter().collect() }
    }

    pub fn var(name: impl Into<String>) -> Self {
        Ty::Var(name.into())
    }

    pub fn array(elem: Ty) -> Self {
        Ty::Array(Box::new(elem))
    }

    pub fn object() -> Self {
        Ty::class(OBJECT)
    }

    pub fn string() -> Self {
        Ty::class("String")
    }

    /// Name of the class this type refers to, for `Class` and `Generic`.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Ty::Class(name) | Ty::Generic { raw: name, .. } => Some(name),
            _ => None,
        }
    }

    /// Type arguments, empty for anything that is not `Generic`.
    pub fn type_args(&self) -> &[Ty] {
        match self {
            Ty::Generic { args, .. } => args,
            _ => &[],
        }
    }

    pub fn is_reference(&self) -> bool {
        !matches!(self, Ty::Void | Ty::Prim(_))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Ty::Void)
    }

    /// Drop type arguments; unbound type variables erase to `Object`.
    pub fn erasure(&self) -> Ty {
        match self {
            Ty::Generic { raw, .. } => Ty::Class(raw.clone()),
            Ty::Var(_)              => Ty::object(),
            Ty::Array(elem)         => Ty::Array(Box::new(elem.erasure())),
            other                   => other.clone(),
        }
    }

    /// True when the type is a class or parameterized class, i.e. something
    /// that can carry its own property table.
    pub fn is_class_like(&self) -> bool {
        matches!(self, Ty::Class(_) | Ty::Generic { .. })
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Void        => f.write_str("void"),
            Ty::Prim(p)     => f.write_str(p.as_str()),
            Ty::Class(name) => f.write_str(name),
            Ty::Var(name)   => f.write_str(name),
            Ty::Array(elem) => write!(f, "{elem}[]"),
            Ty::Generic { raw, args } => {
                write!(f, "{raw}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
        }
    }
}

// ─── TypePair ─────────────────────────────────────────────────────────────────

/// A property type as both its generic form and its erasure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypePair {
    pub generic: Ty,
    pub erased:  Ty,
}

impl TypePair {
    pub fn new(generic: Ty, erased: Ty) -> Self {
        Self { generic, erased }
    }

    /// Pair a resolved type with its own erasure.
    pub fn of(generic: Ty) -> Self {
        let erased = generic.erasure();
        Self { generic, erased }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erasure_strips_arguments_and_variables() {
        let list = Ty::generic("List", [Ty::var("E")]);
        assert_eq!(list.erasure(), Ty::class("List"));
        assert_eq!(Ty::var("T").erasure(), Ty::object());
        assert_eq!(
            Ty::array(Ty::generic("List", [Ty::string()])).erasure(),
            Ty::array(Ty::class("List")),
        );
        assert_eq!(Ty::INT.erasure(), Ty::INT);
    }

    #[test]
    fn display_matches_source_notation() {
        let ty = Ty::generic("Map", [Ty::string(), Ty::array(Ty::INT)]);
        assert_eq!(ty.to_string(), "Map<String, int[]>");
        assert_eq!(Ty::Void.to_string(), "void");
    }
}
