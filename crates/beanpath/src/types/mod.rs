//! Declared type model: type expressions, class shapes, the universe that
//! holds them, and generic resolution over it.

pub mod ty;
pub mod class;
pub mod universe;
pub mod generics;

pub use ty::{Prim, Ty, TypePair, OBJECT};
pub use class::{ClassDef, ClassKind, FieldDef, MethodDef};
pub use universe::{TypeUniverse, COLLECTION};
pub use generics::{Substitution, TypeEnv, TypeParameterResolver};
