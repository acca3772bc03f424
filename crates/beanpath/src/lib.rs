pub mod types;
pub mod reflect;
pub mod runtime;
pub mod config;
pub mod error;

pub use config::{FinalFieldPolicy, ReflectorConfig};
pub use error::{Error, ErrorCode};
pub use reflect::{Accessor, MetaType, PathToken, TypeDescriptor};
pub use runtime::{DynObject, Instance, Value};
pub use types::{ClassDef, FieldDef, MethodDef, Ty, TypePair, TypeUniverse};

use std::sync::Arc;

use reflect::DescriptorCache;
use types::{Substitution, TypeParameterResolver};

// ─── Public API types ─────────────────────────────────────────────────────────

/// What a path resolves to on a root type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    pub path:   String,
    pub getter: Option<TypePair>,
    pub setter: Option<TypePair>,
}

impl PropertyInfo {
    pub fn is_readable(&self) -> bool {
        self.getter.is_some()
    }

    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }
}

// ─── Reflector ────────────────────────────────────────────────────────────────

/// Entry point for property metadata over one type universe.
///
/// Owns the descriptor cache, so every type is analysed once per `Reflector`.
/// It is `Send + Sync`; share it across threads behind an `Arc`.
///
/// Lookups by path never fail: an unknown type, a malformed path or a
/// missing segment all read as "no such property". Lookups of a single
/// named member report why through `Error`.
#[derive(Debug)]
pub struct Reflector {
    cache: DescriptorCache,
}

impl Reflector {
    pub fn new(universe: impl Into<Arc<TypeUniverse>>) -> Self {
        Self::with_config(universe, ReflectorConfig::default())
    }

    pub fn with_config(universe: impl Into<Arc<TypeUniverse>>, config: ReflectorConfig) -> Self {
        Self::with_resolver(universe, Substitution, config)
    }

    /// Use a custom generic type resolver in place of `Substitution`.
    pub fn with_resolver(
        universe: impl Into<Arc<TypeUniverse>>,
        resolver: impl TypeParameterResolver + 'static,
        config:   ReflectorConfig,
    ) -> Self {
        Self { cache: DescriptorCache::new(universe.into(), Box::new(resolver), config) }
    }

    pub fn universe(&self) -> &TypeUniverse {
        self.cache.universe()
    }

    pub fn config(&self) -> &ReflectorConfig {
        self.cache.config()
    }

    /// Number of types analysed so far.
    pub fn cached_types(&self) -> usize {
        self.cache.len()
    }

    // ── Types ─────────────────────────────────────────────────────────────────

    pub fn meta(&self, ty: &Ty) -> Result<MetaType<'_>, Error> {
        MetaType::for_type(&self.cache, ty)
    }

    pub fn descriptor(&self, ty: &Ty) -> Result<Arc<TypeDescriptor>, Error> {
        self.cache.get_or_build(ty)
    }

    /// Readable property names of `ty`, in discovery order.
    pub fn readable_names(&self, ty: &Ty) -> Result<Vec<String>, Error> {
        Ok(self.descriptor(ty)?.readable_names().to_vec())
    }

    /// Writable property names of `ty`, in discovery order.
    pub fn writable_names(&self, ty: &Ty) -> Result<Vec<String>, Error> {
        Ok(self.descriptor(ty)?.writable_names().to_vec())
    }

    pub fn get_accessor(&self, ty: &Ty, name: &str) -> Result<Accessor, Error> {
        self.descriptor(ty)?.get_accessor(name).cloned()
    }

    pub fn set_accessor(&self, ty: &Ty, name: &str) -> Result<Accessor, Error> {
        self.descriptor(ty)?.set_accessor(name).cloned()
    }

    pub fn has_default_constructor(&self, ty: &Ty) -> bool {
        self.descriptor(ty).is_ok_and(|d| d.has_default_constructor())
    }

    // ── Paths ─────────────────────────────────────────────────────────────────

    /// Getter and setter types of `path` on `root`, or `None` when the path
    /// is neither readable nor writable.
    pub fn resolve(&self, root: &Ty, path: &str) -> Option<PropertyInfo> {
        let meta = self.meta(root).ok()?;
        let getter = meta.getter_type_pair(path).ok();
        let setter = meta.setter_type_pair(path).ok();
        if getter.is_none() && setter.is_none() {
            return None;
        }
        Some(PropertyInfo { path: path.to_string(), getter, setter })
    }

    pub fn has_readable_property(&self, root: &Ty, path: &str) -> bool {
        self.meta(root).is_ok_and(|meta| meta.has_getter(path))
    }

    pub fn has_writable_property(&self, root: &Ty, path: &str) -> bool {
        self.meta(root).is_ok_and(|meta| meta.has_setter(path))
    }

    /// Canonical spelling of `path` on `root`. See `MetaType::find_property`.
    pub fn find_property(&self, root: &Ty, path: &str, normalize: bool) -> Option<String> {
        self.meta(root).ok()?.find_property(path, normalize)
    }
}
