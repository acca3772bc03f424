pub mod value;
pub mod object;

pub use object::{DynObject, Instance, MethodFn};
pub use value::Value;
