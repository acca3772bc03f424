//! Type universe — single source of truth for declared class shapes.
//!
//! Consumed by:
//!   • The descriptor builder — class members and hierarchy walks
//!   • The generic resolver   — type parameters along the inheritance chain
//!   • The path resolver      — collection checks on indexed segments
//!
//! Adding a new type = registering one `ClassDef` here before the universe is
//! handed to a `Reflector`. Once shared, the universe is read-only.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::class::ClassDef;
use super::ty::{Ty, OBJECT};

/// Root interface of the sequence containers an indexed segment unwraps.
pub const COLLECTION: &str = "Collection";

// ─── Universe ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TypeUniverse {
    classes: HashMap<String, Arc<ClassDef>>,
}

impl TypeUniverse {
    /// An empty universe, without even `Object`.
    pub fn new() -> Self {
        Self { classes: HashMap::new() }
    }

    /// Register `def`, replacing any earlier shape with the same name.
    pub fn register(&mut self, def: ClassDef) {
        self.classes.insert(def.name.clone(), Arc::new(def));
    }

    pub fn get(&self, name: &str) -> Option<&Arc<ClassDef>> {
        self.classes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Direct supertypes of `name` as declared: superclass first, then
    /// interfaces in declaration order.
    pub fn supertypes(&self, name: &str) -> Vec<&Ty> {
        let Some(def) = self.classes.get(name) else { return Vec::new() };
        def.superclass.iter().chain(def.interfaces.iter()).collect()
    }

    // ── Assignability ─────────────────────────────────────────────────────────

    /// Whether a value of erased type `source` can be stored in `target`.
    /// Both sides are compared by erasure.
    pub fn is_assignable(&self, target: &Ty, source: &Ty) -> bool {
        let target = target.erasure();
        let source = source.erasure();
        if target == source {
            return true;
        }
        match (&target, &source) {
            (Ty::Class(t), _) if t == OBJECT => source.is_reference(),
            (Ty::Class(t), Ty::Class(s)) => self.is_subclass(s, t),
            (Ty::Array(t), Ty::Array(s)) => {
                t.is_reference() && s.is_reference() && self.is_assignable(t, s)
            }
            _ => false,
        }
    }

    /// Whether class `sub` is `sup` or inherits from it, through superclasses
    /// or interfaces. Cyclic declarations terminate.
    pub fn is_subclass(&self, sub: &str, sup: &str) -> bool {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut pending = vec![sub];
        while let Some(name) = pending.pop() {
            if name == sup {
                return true;
            }
            if !seen.insert(name) {
                continue;
            }
            pending.extend(self.supertypes(name).into_iter().filter_map(Ty::class_name));
        }
        false
    }

    /// Whether `ty` is a sequence container (`Collection` or a subtype).
    pub fn is_collection(&self, ty: &Ty) -> bool {
        self.is_assignable(&Ty::class(COLLECTION), ty)
    }
}

impl Default for TypeUniverse {
    fn default() -> Self {
        let mut u = Self::new();
        u.register(object_desc());
        // Value types
        u.register(ClassDef::class("String"));
        u.register(ClassDef::class("Number"));
        u.register(ClassDef::class("Boolean"));
        u.register(number_desc("Integer"));
        u.register(number_desc("Long"));
        u.register(number_desc("Double"));
        u.register(number_desc("BigDecimal"));
        u.register(ClassDef::class("Date"));
        // Containers
        u.register(ClassDef::interface("Iterable").type_params(["T"]));
        u.register(element_iface(COLLECTION, "Iterable"));
        u.register(element_iface("List", COLLECTION));
        u.register(element_iface("Set", COLLECTION));
        u.register(element_class("ArrayList", "List"));
        u.register(element_class("HashSet", "Set"));
        u.register(ClassDef::interface("Map").type_params(["K", "V"]));
        u.register(
            ClassDef::class("HashMap")
                .type_params(["K", "V"])
                .implements(Ty::generic("Map", [Ty::var("K"), Ty::var("V")])),
        );
        u
    }
}

// ─── Built-in shapes ──────────────────────────────────────────────────────────

fn object_desc() -> ClassDef {
    ClassDef::class(OBJECT)
}

fn number_desc(name: &str) -> ClassDef {
    ClassDef::class(name).extends(Ty::class("Number"))
}

/// `interface <name><E> extends <parent><E>`
fn element_iface(name: &str, parent: &str) -> ClassDef {
    ClassDef::interface(name)
        .type_params(["E"])
        .implements(Ty::generic(parent, [Ty::var("E")]))
}

/// `class <name><E> implements <iface><E>`
fn element_class(name: &str, iface: &str) -> ClassDef {
    ClassDef::class(name)
        .type_params(["E"])
        .implements(Ty::generic(iface, [Ty::var("E")]))
}
