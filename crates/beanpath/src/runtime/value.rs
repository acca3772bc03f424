use std::fmt;

/// A property value read from or written to an instance.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null     => "null",
            Value::Bool(_)  => "boolean",
            Value::Int(_)   => "long",
            Value::Float(_) => "double",
            Value::Str(_)   => "String",
            Value::List(_)  => "List",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null     => f.write_str("null"),
            Value::Bool(b)  => write!(f, "{b}"),
            Value::Int(i)   => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s)   => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::Str(s.to_string()) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Value::Str(s) }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self { Value::Int(i) }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}
