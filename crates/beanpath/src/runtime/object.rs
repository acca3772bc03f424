//! Access to live instances.
//!
//! The reflection layer decides *which* member to use; an `Instance` performs
//! the actual call or field access. Hosts implement `Instance` for their own
//! object representation. `DynObject` is a table-driven implementation: a
//! field map plus function-pointer methods.

use std::collections::HashMap;

use crate::error::{Error, ErrorCode};
use super::value::Value;

// ─── Function pointer alias ───────────────────────────────────────────────────

/// Method body. Receives the receiver and pre-evaluated args.
pub type MethodFn = fn(&mut DynObject, &[Value]) -> Result<Value, Error>;

// ─── Interface ────────────────────────────────────────────────────────────────

/// What accessor invocation needs from an object.
pub trait Instance {
    /// Name of the object's class, for error messages.
    fn type_name(&self) -> &str;

    fn call_method(&mut self, name: &str, args: &[Value]) -> Result<Value, Error>;

    fn read_field(&self, name: &str) -> Result<Value, Error>;

    fn write_field(&mut self, name: &str, value: Value) -> Result<(), Error>;
}

// ─── DynObject ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DynObject {
    type_name: String,
    fields:    HashMap<String, Value>,
    methods:   HashMap<String, MethodFn>,
}

impl DynObject {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self { type_name: type_name.into(), fields: HashMap::new(), methods: HashMap::new() }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with_method(mut self, name: impl Into<String>, body: MethodFn) -> Self {
        self.methods.insert(name.into(), body);
        self
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

impl std::fmt::Debug for DynObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut methods: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        methods.sort_unstable();
        f.debug_struct("DynObject")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .field("methods", &methods)
            .finish()
    }
}

impl Instance for DynObject {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn call_method(&mut self, name: &str, args: &[Value]) -> Result<Value, Error> {
        let Some(body) = self.methods.get(name).copied() else {
            return Err(Error::new(ErrorCode::R007, format!(
                "`{}` has no method `{name}`", self.type_name
            )));
        };
        body(self, args)
    }

    fn read_field(&self, name: &str) -> Result<Value, Error> {
        self.fields.get(name).cloned().ok_or_else(|| Error::new(ErrorCode::R007, format!(
            "`{}` has no field `{name}`", self.type_name
        )))
    }

    fn write_field(&mut self, name: &str, value: Value) -> Result<(), Error> {
        match self.fields.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(Error::new(ErrorCode::R007, format!(
                "`{}` has no field `{name}`", self.type_name
            ))),
        }
    }
}
