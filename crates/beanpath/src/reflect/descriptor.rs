//! Type descriptor — the property tables of one type, built once.
//!
//! Construction, in order:
//!   1. default constructor discovery
//!   2. candidate method collection over the class, its interfaces and its
//!      superclass chain (most-derived declaration wins, bridges skipped)
//!   3. getter conflict resolution
//!   4. setter conflict resolution, preferring the setter that matches the
//!      getter's type
//!   5. field fallback for names no accessor method claimed
//!   6. name lists and the normalized-name index
//!
//! A conflict that cannot be resolved never fails construction: the property
//! gets an `Accessor::Ambiguous` and only using it fails.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::config::ReflectorConfig;
use crate::error::{Error, ErrorCode};
use crate::types::class::{ClassDef, FieldDef, MethodDef};
use crate::types::generics::TypeParameterResolver;
use crate::types::ty::{Ty, TypePair, OBJECT};
use crate::types::universe::TypeUniverse;
use super::accessor::{Accessor, FieldAccess, FieldRef, MethodRef};
use super::namer;

// ─── Descriptor ───────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct TypeDescriptor {
    ty:                  Ty,
    readable:            Vec<String>,
    writable:            Vec<String>,
    get_accessors:       IndexMap<String, Accessor>,
    set_accessors:       IndexMap<String, Accessor>,
    get_types:           IndexMap<String, TypePair>,
    set_types:           IndexMap<String, TypePair>,
    /// `normalize(name)` → declared name, over readable and writable names.
    normalized:          HashMap<String, String>,
    /// Same as `normalized` with `separator` also removed from the key.
    lenient:             HashMap<String, String>,
    separator:           char,
    default_constructor: Option<Vec<Ty>>,
}

impl TypeDescriptor {
    /// Build the descriptor of `ty`. Only an unregistered class name fails;
    /// types without members of their own (primitives, arrays, `void`) get
    /// an empty descriptor.
    #[tracing::instrument(skip_all, fields(ty = %ty))]
    pub fn build(
        ty:       &Ty,
        universe: &TypeUniverse,
        resolver: &dyn TypeParameterResolver,
        config:   &ReflectorConfig,
    ) -> Result<Self, Error> {
        let Some(name) = ty.class_name() else { return Ok(Self::opaque(ty.clone(), config.separator)) };
        let class: &ClassDef = universe.get(name).ok_or_else(|| Error::unknown_type(name))?;

        let default_constructor = class.no_arg_constructor().map(<[Ty]>::to_vec);

        let mut builder = Builder::new(ty, universe, resolver, config);
        let methods = builder.class_methods(class);
        if class.is_record() {
            builder.add_record_getters(&methods);
        } else {
            builder.add_getters(&methods);
            builder.add_setters(&methods);
            builder.add_fields(class);
        }
        Ok(builder.finish(default_constructor))
    }

    fn opaque(ty: Ty, separator: char) -> Self {
        Self {
            ty,
            readable: Vec::new(),
            writable: Vec::new(),
            get_accessors: IndexMap::new(),
            set_accessors: IndexMap::new(),
            get_types: IndexMap::new(),
            set_types: IndexMap::new(),
            normalized: HashMap::new(),
            lenient: HashMap::new(),
            separator,
            default_constructor: None,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn ty(&self) -> &Ty {
        &self.ty
    }

    /// Readable property names in discovery order.
    pub fn readable_names(&self) -> &[String] {
        &self.readable
    }

    /// Writable property names in discovery order.
    pub fn writable_names(&self) -> &[String] {
        &self.writable
    }

    pub fn has_getter(&self, name: &str) -> bool {
        self.get_accessors.contains_key(name)
    }

    pub fn has_setter(&self, name: &str) -> bool {
        self.set_accessors.contains_key(name)
    }

    pub fn get_accessor(&self, name: &str) -> Result<&Accessor, Error> {
        self.get_accessors.get(name).ok_or_else(|| Error::no_getter(name, &self.ty))
    }

    pub fn set_accessor(&self, name: &str) -> Result<&Accessor, Error> {
        self.set_accessors.get(name).ok_or_else(|| Error::no_setter(name, &self.ty))
    }

    pub fn getter_type(&self, name: &str) -> Result<&TypePair, Error> {
        self.get_types.get(name).ok_or_else(|| Error::no_getter(name, &self.ty))
    }

    pub fn setter_type(&self, name: &str) -> Result<&TypePair, Error> {
        self.set_types.get(name).ok_or_else(|| Error::no_setter(name, &self.ty))
    }

    /// Declared name matching `name` case-insensitively.
    pub fn find_property_name(&self, name: &str) -> Option<&str> {
        self.normalized.get(&normalize(name)).map(String::as_str)
    }

    /// Declared name matching `name` case-insensitively with the configured
    /// separator ignored on both sides: `order_no`, `orderNo` and `ORDERNO`
    /// all find a property declared as either `order_no` or `orderNo`.
    pub fn find_lenient_name(&self, name: &str) -> Option<&str> {
        self.lenient.get(&normalize_lenient(name, self.separator)).map(String::as_str)
    }

    pub fn has_default_constructor(&self) -> bool {
        self.default_constructor.is_some()
    }

    /// Parameter list of the zero-argument constructor (always empty).
    pub fn default_constructor(&self) -> Result<&[Ty], Error> {
        self.default_constructor.as_deref().ok_or_else(|| Error::new(
            ErrorCode::R004,
            format!("there is no default constructor for '{}'", self.ty),
        ))
    }
}

/// Key of the normalized-name index.
pub(crate) fn normalize(name: &str) -> String {
    name.to_uppercase()
}

/// Key of the lenient index.
pub(crate) fn normalize_lenient(name: &str, separator: char) -> String {
    normalize(&name.replace(separator, ""))
}

/// Names that never become properties: synthetic `$` members, the
/// serialization version marker and the object's own class.
fn is_valid_property_name(name: &str) -> bool {
    !name.starts_with('$') && name != "serialVersionUID" && name != "class"
}

// ─── Builder ──────────────────────────────────────────────────────────────────

/// A method met while walking the hierarchy.
#[derive(Debug, Clone, Copy)]
struct Candidate<'u> {
    declaring: &'u str,
    method:    &'u MethodDef,
}

impl Candidate<'_> {
    fn to_ref(self) -> MethodRef {
        MethodRef { declaring: self.declaring.to_string(), method: self.method.clone() }
    }

    /// Declared (not substituted) erasure of the single parameter.
    fn param_erasure(&self) -> Ty {
        self.method.params.first().map(Ty::erasure).unwrap_or_else(Ty::object)
    }
}

type Conflicts<'u> = IndexMap<String, Vec<Candidate<'u>>>;

struct Builder<'u> {
    root:          &'u Ty,
    universe:      &'u TypeUniverse,
    resolver:      &'u dyn TypeParameterResolver,
    config:        &'u ReflectorConfig,
    get_accessors: IndexMap<String, Accessor>,
    set_accessors: IndexMap<String, Accessor>,
    get_types:     IndexMap<String, TypePair>,
    set_types:     IndexMap<String, TypePair>,
}

impl<'u> Builder<'u> {
    fn new(
        root:     &'u Ty,
        universe: &'u TypeUniverse,
        resolver: &'u dyn TypeParameterResolver,
        config:   &'u ReflectorConfig,
    ) -> Self {
        Self {
            root,
            universe,
            resolver,
            config,
            get_accessors: IndexMap::new(),
            set_accessors: IndexMap::new(),
            get_types: IndexMap::new(),
            set_types: IndexMap::new(),
        }
    }

    fn superclass_of(&self, class: &ClassDef) -> Option<&'u ClassDef> {
        let name = class.superclass.as_ref()?.class_name()?;
        self.universe.get(name).map(|def| def.as_ref())
    }

    // ── 2. Candidate methods ──────────────────────────────────────────────────

    /// Every distinct method signature visible on the class, most-derived
    /// declaration first. `Object` itself contributes nothing.
    fn class_methods(&self, class: &'u ClassDef) -> Vec<Candidate<'u>> {
        let mut unique: IndexMap<String, Candidate<'u>> = IndexMap::new();
        let mut visited: HashSet<&'u str> = HashSet::new();
        let mut current = Some(class);
        while let Some(c) = current {
            if c.name == OBJECT || !visited.insert(c.name.as_str()) {
                break;
            }
            add_unique_methods(&mut unique, c);
            // Abstract classes may leave accessors to their interfaces.
            for iface in &c.interfaces {
                self.add_interface_methods(&mut unique, iface, &mut visited);
            }
            current = self.superclass_of(c);
        }
        unique.into_values().collect()
    }

    fn add_interface_methods(
        &self,
        unique:  &mut IndexMap<String, Candidate<'u>>,
        iface:   &Ty,
        visited: &mut HashSet<&'u str>,
    ) {
        let Some(def) = iface.class_name().and_then(|n| self.universe.get(n)) else { return };
        if !visited.insert(def.name.as_str()) {
            return;
        }
        add_unique_methods(unique, def);
        for sup in &def.interfaces {
            self.add_interface_methods(unique, sup, visited);
        }
    }

    fn add_method_conflict(conflicts: &mut Conflicts<'u>, candidate: Candidate<'u>) {
        match namer::method_to_property(&candidate.method.name) {
            Ok(prop) if is_valid_property_name(&prop) => {
                conflicts.entry(prop).or_default().push(candidate);
            }
            Ok(prop) => trace!(property = %prop, "reserved property name skipped"),
            Err(err) => trace!(%err, "accessor candidate skipped"),
        }
    }

    // ── 3. Getters ────────────────────────────────────────────────────────────

    fn add_getters(&mut self, methods: &[Candidate<'u>]) {
        let mut conflicts = Conflicts::new();
        for &candidate in methods {
            let m = candidate.method;
            if m.params.is_empty() && !m.is_static && !m.ret.is_void() && namer::is_getter(&m.name) {
                Self::add_method_conflict(&mut conflicts, candidate);
            }
        }
        self.resolve_getter_conflicts(conflicts);
    }

    fn resolve_getter_conflicts(&mut self, conflicts: Conflicts<'u>) {
        for (prop, candidates) in conflicts {
            let mut candidates = candidates.into_iter();
            let Some(mut winner) = candidates.next() else { continue };
            let mut rival = None;
            for candidate in candidates {
                let winner_ty = winner.method.ret.erasure();
                let candidate_ty = candidate.method.ret.erasure();
                if candidate_ty == winner_ty {
                    if candidate_ty != Ty::BOOLEAN {
                        rival = Some(candidate);
                        break;
                    }
                    if candidate.method.name.starts_with("is") {
                        winner = candidate;
                    }
                } else if self.universe.is_assignable(&candidate_ty, &winner_ty) {
                    // winner's return type is the more specific one
                } else if self.universe.is_assignable(&winner_ty, &candidate_ty) {
                    winner = candidate;
                } else {
                    rival = Some(candidate);
                    break;
                }
            }
            self.add_get_method(prop, winner, rival);
        }
    }

    fn add_get_method(&mut self, prop: String, winner: Candidate<'u>, rival: Option<Candidate<'u>>) {
        let accessor = match rival {
            Some(rival) => {
                trace!(property = %prop, first = winner.declaring, second = rival.declaring, "ambiguous getter");
                Accessor::Ambiguous {
                    message: format!(
                        "illegal overloaded getter method with ambiguous type for property '{prop}' in class '{}': \
                         '{}.{}' and '{}.{}' return unrelated types",
                        self.root, winner.declaring, winner.method.name, rival.declaring, rival.method.name,
                    ),
                    property: prop.clone(),
                }
            }
            None => Accessor::Method(winner.to_ref()),
        };
        let generic = self.resolver.resolve_return_type(self.universe, winner.method, winner.declaring, self.root);
        self.get_types.insert(prop.clone(), TypePair::of(generic));
        self.get_accessors.insert(prop, accessor);
    }

    /// Records: every zero-argument method is a component accessor named
    /// exactly like the method. Candidates arrive most-derived first, so the
    /// first one seen for a name is kept.
    fn add_record_getters(&mut self, methods: &[Candidate<'u>]) {
        for &candidate in methods {
            let m = candidate.method;
            if !m.params.is_empty() || m.is_static || m.ret.is_void() {
                continue;
            }
            if !is_valid_property_name(&m.name) || self.get_accessors.contains_key(&m.name) {
                continue;
            }
            self.add_get_method(m.name.clone(), candidate, None);
        }
    }

    // ── 4. Setters ────────────────────────────────────────────────────────────

    fn add_setters(&mut self, methods: &[Candidate<'u>]) {
        let mut conflicts = Conflicts::new();
        for &candidate in methods {
            let m = candidate.method;
            if m.params.len() == 1 && !m.is_static && namer::is_setter(&m.name) {
                Self::add_method_conflict(&mut conflicts, candidate);
            }
        }
        self.resolve_setter_conflicts(conflicts);
    }

    fn resolve_setter_conflicts(&mut self, conflicts: Conflicts<'u>) {
        for (prop, setters) in conflicts {
            let getter_ty = self.get_types.get(&prop).map(|pair| pair.erased.clone());
            let getter_ambiguous = self.get_accessors.get(&prop).is_some_and(Accessor::is_ambiguous);
            let mut setter_ambiguous = false;
            let mut matched: Option<Candidate<'u>> = None;
            for setter in setters {
                if !getter_ambiguous && getter_ty.as_ref() == Some(&setter.param_erasure()) {
                    // pairs with the getter
                    matched = Some(setter);
                    break;
                }
                if !setter_ambiguous {
                    matched = self.pick_better_setter(matched, setter, &prop);
                    setter_ambiguous = matched.is_none();
                }
            }
            if let Some(setter) = matched {
                self.add_set_method(prop, setter);
            }
        }
    }

    /// The setter with the more specific parameter type. Unrelated parameter
    /// types register an ambiguous setter and return `None`.
    fn pick_better_setter(
        &mut self,
        current:   Option<Candidate<'u>>,
        candidate: Candidate<'u>,
        prop:      &str,
    ) -> Option<Candidate<'u>> {
        let Some(current) = current else { return Some(candidate) };
        let current_ty = current.param_erasure();
        let candidate_ty = candidate.param_erasure();
        if self.universe.is_assignable(&current_ty, &candidate_ty) {
            return Some(candidate);
        }
        if self.universe.is_assignable(&candidate_ty, &current_ty) {
            return Some(current);
        }

        trace!(property = %prop, %current_ty, %candidate_ty, "ambiguous setter");
        self.set_accessors.insert(prop.to_string(), Accessor::Ambiguous {
            property: prop.to_string(),
            message: format!(
                "ambiguous setters defined for property '{prop}' in class '{}' with types '{current_ty}' and '{candidate_ty}'",
                candidate.declaring,
            ),
        });
        let param = self.resolved_param(current);
        self.set_types.insert(prop.to_string(), TypePair::of(param));
        None
    }

    fn add_set_method(&mut self, prop: String, setter: Candidate<'u>) {
        let param = self.resolved_param(setter);
        self.set_types.insert(prop.clone(), TypePair::of(param));
        self.set_accessors.insert(prop, Accessor::Method(setter.to_ref()));
    }

    fn resolved_param(&self, setter: Candidate<'u>) -> Ty {
        self.resolver
            .resolve_param_types(self.universe, setter.method, setter.declaring, self.root)
            .into_iter()
            .next()
            .unwrap_or_else(Ty::object)
    }

    // ── 5. Fields ─────────────────────────────────────────────────────────────

    fn add_fields(&mut self, class: &'u ClassDef) {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = Some(class);
        while let Some(c) = current {
            if !visited.insert(c.name.as_str()) {
                break;
            }
            for field in &c.fields {
                if !is_valid_property_name(&field.name) {
                    continue;
                }
                if !self.set_accessors.contains_key(&field.name)
                    && self.config.is_field_settable(field.is_final, field.is_static)
                {
                    self.add_field(c, field, FieldAccess::Write);
                }
                if !self.get_accessors.contains_key(&field.name) {
                    self.add_field(c, field, FieldAccess::Read);
                }
            }
            current = self.superclass_of(c);
        }
    }

    fn add_field(&mut self, declaring: &ClassDef, field: &FieldDef, access: FieldAccess) {
        trace!(field = %field.name, declaring = %declaring.name, ?access, "field accessor");
        let generic = self.resolver.resolve_field_type(self.universe, field, &declaring.name, self.root);
        let accessor = Accessor::Field {
            field: FieldRef { declaring: declaring.name.clone(), field: field.clone() },
            access,
        };
        let (accessors, types) = match access {
            FieldAccess::Read  => (&mut self.get_accessors, &mut self.get_types),
            FieldAccess::Write => (&mut self.set_accessors, &mut self.set_types),
        };
        accessors.insert(field.name.clone(), accessor);
        types.insert(field.name.clone(), TypePair::of(generic));
    }

    // ── 6. Index ──────────────────────────────────────────────────────────────

    fn finish(self, default_constructor: Option<Vec<Ty>>) -> TypeDescriptor {
        let readable: Vec<String> = self.get_accessors.keys().cloned().collect();
        let writable: Vec<String> = self.set_accessors.keys().cloned().collect();
        let separator = self.config.separator;
        let normalized = readable
            .iter()
            .chain(&writable)
            .map(|name| (normalize(name), name.clone()))
            .collect();
        let mut lenient = HashMap::new();
        for name in readable.iter().chain(&writable) {
            lenient.entry(normalize_lenient(name, separator)).or_insert_with(|| name.clone());
        }
        debug!(readable = readable.len(), writable = writable.len(), "type descriptor built");
        TypeDescriptor {
            ty: self.root.clone(),
            readable,
            writable,
            get_accessors: self.get_accessors,
            set_accessors: self.set_accessors,
            get_types: self.get_types,
            set_types: self.set_types,
            normalized,
            lenient,
            separator,
            default_constructor,
        }
    }
}

fn add_unique_methods<'u>(unique: &mut IndexMap<String, Candidate<'u>>, class: &'u ClassDef) {
    for method in class.methods.iter().filter(|m| !m.bridge) {
        unique
            .entry(method.signature())
            .or_insert(Candidate { declaring: &class.name, method });
    }
}
