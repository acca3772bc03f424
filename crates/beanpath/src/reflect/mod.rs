//! Property metadata: accessor naming, path tokens, per-type descriptors,
//! the descriptor cache and path resolution over it.

pub mod namer;
pub mod token;
pub mod accessor;
pub mod descriptor;
pub mod cache;
pub mod meta;


pub use accessor::{Accessor, FieldAccess, FieldRef, MethodRef};
pub use cache::DescriptorCache;
pub use descriptor::TypeDescriptor;
pub use meta::MetaType;
pub use token::PathToken;
