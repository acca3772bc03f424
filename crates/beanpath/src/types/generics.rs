//! Generic type resolution for members seen through a concrete root type.
//!
//! A member declared as `T getValue()` in `Box<T>` reads as `Item getValue()`
//! when looked at through `class ItemBox extends Box<Item>`. Resolution walks
//! from the root down to the declaring class, binding each supertype's type
//! parameters to the (already substituted) arguments written at that
//! inheritance step, then applies the final bindings to the member type.

use std::collections::{HashMap, HashSet};

use super::class::{FieldDef, MethodDef};
use super::ty::Ty;
use super::universe::TypeUniverse;

/// Type-variable bindings in effect for one class along the chain.
pub type TypeEnv = HashMap<String, Ty>;

// ─── Interface ────────────────────────────────────────────────────────────────

/// What descriptor construction needs from generic resolution. Each method
/// returns the member's type fully substituted for `root`, where `declaring`
/// names the class that declares the member.
pub trait TypeParameterResolver: Send + Sync {
    fn resolve_return_type(&self, universe: &TypeUniverse, method: &MethodDef, declaring: &str, root: &Ty) -> Ty;

    fn resolve_param_types(&self, universe: &TypeUniverse, method: &MethodDef, declaring: &str, root: &Ty) -> Vec<Ty>;

    fn resolve_field_type(&self, universe: &TypeUniverse, field: &FieldDef, declaring: &str, root: &Ty) -> Ty;
}

// ─── Substitution ─────────────────────────────────────────────────────────────

/// Environment-passing resolver. Unbound variables are left as `Ty::Var`
/// and erase to `Object`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Substitution;

impl Substitution {
    /// Bindings visible inside `declaring` when the object is a `root`.
    /// Empty when `declaring` is not an ancestor of `root`.
    pub fn env_for(universe: &TypeUniverse, declaring: &str, root: &Ty) -> TypeEnv {
        let Some(root_name) = root.class_name() else { return TypeEnv::new() };
        let root_env = bind(universe, root_name, root.type_args());
        let mut visited = HashSet::new();
        find_env(universe, root_name, root_env, declaring, &mut visited).unwrap_or_default()
    }

    /// Replace every bound variable in `ty`.
    pub fn substitute(ty: &Ty, env: &TypeEnv) -> Ty {
        match ty {
            Ty::Var(name) => env.get(name).cloned().unwrap_or_else(|| ty.clone()),
            Ty::Generic { raw, args } => Ty::Generic {
                raw:  raw.clone(),
                args: args.iter().map(|a| Self::substitute(a, env)).collect(),
            },
            Ty::Array(elem) => Ty::Array(Box::new(Self::substitute(elem, env))),
            other => other.clone(),
        }
    }

    fn resolve(universe: &TypeUniverse, ty: &Ty, declaring: &str, root: &Ty) -> Ty {
        let env = Self::env_for(universe, declaring, root);
        Self::substitute(ty, &env)
    }
}

impl TypeParameterResolver for Substitution {
    fn resolve_return_type(&self, universe: &TypeUniverse, method: &MethodDef, declaring: &str, root: &Ty) -> Ty {
        Self::resolve(universe, &method.ret, declaring, root)
    }

    fn resolve_param_types(&self, universe: &TypeUniverse, method: &MethodDef, declaring: &str, root: &Ty) -> Vec<Ty> {
        let env = Self::env_for(universe, declaring, root);
        method.params.iter().map(|p| Self::substitute(p, &env)).collect()
    }

    fn resolve_field_type(&self, universe: &TypeUniverse, field: &FieldDef, declaring: &str, root: &Ty) -> Ty {
        Self::resolve(universe, &field.ty, declaring, root)
    }
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Bind the type parameters of `class` to `args`. Missing arguments (raw use)
/// leave the parameter unbound.
fn bind(universe: &TypeUniverse, class: &str, args: &[Ty]) -> TypeEnv {
    let Some(def) = universe.get(class) else { return TypeEnv::new() };
    def.type_params.iter().cloned().zip(args.iter().cloned()).collect()
}

/// Depth-first search from `current` to `target`, carrying the environment
/// of the class being visited.
fn find_env(
    universe: &TypeUniverse,
    current:  &str,
    env:      TypeEnv,
    target:   &str,
    visited:  &mut HashSet<String>,
) -> Option<TypeEnv> {
    if current == target {
        return Some(env);
    }
    if !visited.insert(current.to_string()) {
        return None;
    }
    for sup in universe.supertypes(current) {
        let sup = Substitution::substitute(sup, &env);
        let Some(name) = sup.class_name() else { continue };
        let next = bind(universe, name, sup.type_args());
        if let Some(found) = find_env(universe, name, next, target, visited) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::class::ClassDef;

    fn universe() -> TypeUniverse {
        let mut u = TypeUniverse::default();
        u.register(
            ClassDef::class("Holder")
                .type_params(["T"])
                .method(MethodDef::getter("getValue", Ty::var("T")))
                .method(MethodDef::setter("setValue", Ty::var("T")))
                .field(FieldDef::new("values", Ty::generic("List", [Ty::var("T")]))),
        );
        u.register(
            ClassDef::class("Pair")
                .type_params(["A", "B"])
                .extends(Ty::generic("Holder", [Ty::var("B")])),
        );
        u.register(ClassDef::class("NamedPair").extends(Ty::generic("Pair", [Ty::INT, Ty::string()])));
        u
    }

    #[test]
    fn binds_through_two_inheritance_steps() {
        let u = universe();
        let root = Ty::class("NamedPair");
        let holder = u.get("Holder").unwrap();
        let ret = Substitution.resolve_return_type(&u, &holder.methods[0], "Holder", &root);
        assert_eq!(ret, Ty::string());
        let params = Substitution.resolve_param_types(&u, &holder.methods[1], "Holder", &root);
        assert_eq!(params, vec![Ty::string()]);
    }

    #[test]
    fn parameterized_root_binds_its_own_variables() {
        let u = universe();
        let root = Ty::generic("Holder", [Ty::class("Date")]);
        let holder = u.get("Holder").unwrap();
        let field = Substitution.resolve_field_type(&u, &holder.fields[0], "Holder", &root);
        assert_eq!(field, Ty::generic("List", [Ty::class("Date")]));
    }

    #[test]
    fn raw_root_leaves_variables_unbound() {
        let u = universe();
        let holder = u.get("Holder").unwrap();
        let ret = Substitution.resolve_return_type(&u, &holder.methods[0], "Holder", &Ty::class("Holder"));
        assert_eq!(ret, Ty::var("T"));
        assert_eq!(ret.erasure(), Ty::object());
    }

    #[test]
    fn interface_chain_is_followed() {
        let u = TypeUniverse::default();
        let env = Substitution::env_for(&u, "Iterable", &Ty::generic("ArrayList", [Ty::string()]));
        assert_eq!(env.get("T"), Some(&Ty::string()));
    }
}
