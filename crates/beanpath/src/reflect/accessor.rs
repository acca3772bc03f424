//! How a property is read or written.

use std::fmt;

use crate::error::{Error, ErrorCode};
use crate::runtime::object::Instance;
use crate::runtime::value::Value;
use crate::types::class::{FieldDef, MethodDef};

// ─── Member references ────────────────────────────────────────────────────────

/// A method together with the class that declares it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRef {
    pub declaring: String,
    pub method:    MethodDef,
}

/// A field together with the class that declares it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    pub declaring: String,
    pub field:     FieldDef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAccess {
    Read,
    Write,
}

// ─── Accessor ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    /// Zero-argument getter or one-argument setter.
    Method(MethodRef),
    /// Direct field access, used when no accessor method claims the name.
    Field { field: FieldRef, access: FieldAccess },
    /// Several candidates and no rule to pick one. Fails on use.
    Ambiguous { property: String, message: String },
}

impl Accessor {
    /// Perform the access on `target`. Getters ignore `args`; setters and
    /// field writes expect exactly one value and return `Value::Null`.
    pub fn invoke(&self, target: &mut dyn Instance, args: &[Value]) -> Result<Value, Error> {
        match self {
            Accessor::Method(m) => target.call_method(&m.method.name, args),
            Accessor::Field { field, access: FieldAccess::Read } => target.read_field(&field.field.name),
            Accessor::Field { field, access: FieldAccess::Write } => {
                let [value] = args else {
                    return Err(Error::new(ErrorCode::R007, format!(
                        "writing field `{}` on `{}` takes one value, got {}",
                        field.field.name, target.type_name(), args.len()
                    )));
                };
                target.write_field(&field.field.name, value.clone())?;
                Ok(Value::Null)
            }
            Accessor::Ambiguous { message, .. } => Err(Error::new(ErrorCode::R002, message.clone())),
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Accessor::Ambiguous { .. })
    }

    /// Class declaring the underlying member, `None` for ambiguous accessors.
    pub fn declaring_type(&self) -> Option<&str> {
        match self {
            Accessor::Method(m)         => Some(&m.declaring),
            Accessor::Field { field, .. } => Some(&field.declaring),
            Accessor::Ambiguous { .. }  => None,
        }
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Method(m) => write!(f, "{}.{}()", m.declaring, m.method.name),
            Accessor::Field { field, access } => {
                let verb = match access {
                    FieldAccess::Read  => "get",
                    FieldAccess::Write => "set",
                };
                write!(f, "{verb} {}.{}", field.declaring, field.field.name)
            }
            Accessor::Ambiguous { property, .. } => write!(f, "ambiguous `{property}`"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::object::DynObject;
    use crate::types::ty::Ty;

    fn field(access: FieldAccess) -> Accessor {
        Accessor::Field {
            field: FieldRef { declaring: "User".into(), field: FieldDef::new("name", Ty::string()) },
            access,
        }
    }

    #[test]
    fn field_read_and_write() {
        let mut obj = DynObject::new("User").with_field("name", "ada");
        field(FieldAccess::Write).invoke(&mut obj, &[Value::from("grace")]).unwrap();
        assert_eq!(field(FieldAccess::Read).invoke(&mut obj, &[]).unwrap(), Value::from("grace"));
    }

    #[test]
    fn field_write_needs_one_value() {
        let mut obj = DynObject::new("User").with_field("name", "ada");
        let err = field(FieldAccess::Write).invoke(&mut obj, &[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::R007);
    }

    #[test]
    fn ambiguous_always_fails() {
        let acc = Accessor::Ambiguous { property: "id".into(), message: "two getters for 'id'".into() };
        let mut obj = DynObject::new("User");
        let err = acc.invoke(&mut obj, &[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::R002);
        assert_eq!(err.message, "two getters for 'id'");
        assert!(acc.declaring_type().is_none());
    }
}
