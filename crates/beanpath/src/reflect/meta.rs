//! Path resolution over cached descriptors.
//!
//! A `MetaType` is a cheap view: the shared cache plus the descriptor of one
//! type. Walking `a.b[0].c` derives a fresh `MetaType` per intermediate
//! segment, always through the cache.

use std::sync::Arc;

use crate::error::Error;
use crate::types::ty::{Ty, TypePair};
use super::accessor::Accessor;
use super::cache::DescriptorCache;
use super::descriptor::TypeDescriptor;
use super::token::PathToken;

#[derive(Debug, Clone)]
pub struct MetaType<'r> {
    cache:      &'r DescriptorCache,
    descriptor: Arc<TypeDescriptor>,
}

impl<'r> MetaType<'r> {
    pub fn for_type(cache: &'r DescriptorCache, ty: &Ty) -> Result<Self, Error> {
        Ok(Self { cache, descriptor: cache.get_or_build(ty)? })
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    pub fn ty(&self) -> &Ty {
        self.descriptor.ty()
    }

    /// `MetaType` of the readable property `name` on this type. An index
    /// (`items[0]`) selects the element type.
    pub fn meta_for_property(&self, name: &str) -> Result<MetaType<'r>, Error> {
        let tok = PathToken::parse(name)?;
        if tok.has_next() {
            return Err(Error::invalid_path(name, "expected a single property"));
        }
        let pair = self.property_pair(tok.name(), tok.index().is_some())?;
        self.nested(&pair)
    }

    // ── Path queries ──────────────────────────────────────────────────────────

    /// Whether every segment of `path` resolves and the last one is readable.
    pub fn has_getter(&self, path: &str) -> bool {
        self.walk(path, |meta, tok| Ok(meta.descriptor.has_getter(tok.name())))
            .unwrap_or(false)
    }

    /// Whether every intermediate segment is readable and the last one is
    /// writable.
    pub fn has_setter(&self, path: &str) -> bool {
        self.walk(path, |meta, tok| Ok(meta.descriptor.has_setter(tok.name())))
            .unwrap_or(false)
    }

    /// Getter type of the last segment. An index on the last segment selects
    /// the element type of a collection or array.
    pub fn getter_type_pair(&self, path: &str) -> Result<TypePair, Error> {
        self.walk(path, |meta, tok| meta.property_pair(tok.name(), tok.index().is_some()))
    }

    pub fn getter_type(&self, path: &str) -> Result<Ty, Error> {
        self.getter_type_pair(path).map(|pair| pair.erased)
    }

    pub fn generic_getter_type(&self, path: &str) -> Result<Ty, Error> {
        self.getter_type_pair(path).map(|pair| pair.generic)
    }

    pub fn setter_type_pair(&self, path: &str) -> Result<TypePair, Error> {
        self.walk(path, |meta, tok| meta.descriptor.setter_type(tok.name()).cloned())
    }

    pub fn setter_type(&self, path: &str) -> Result<Ty, Error> {
        self.setter_type_pair(path).map(|pair| pair.erased)
    }

    pub fn generic_setter_type(&self, path: &str) -> Result<Ty, Error> {
        self.setter_type_pair(path).map(|pair| pair.generic)
    }

    /// Canonical spelling of `path`: each segment matched case-insensitively,
    /// indexes dropped. With `normalize`, the configured separator is ignored
    /// within each segment, so `order_date` finds `orderDate`. Any unknown
    /// segment gives `None`.
    pub fn find_property(&self, path: &str, normalize: bool) -> Option<String> {
        let mut canonical = String::new();
        self.build_property(path, normalize, &mut canonical).then_some(canonical)
    }

    // ── Local queries ─────────────────────────────────────────────────────────

    pub fn get_accessor(&self, name: &str) -> Result<&Accessor, Error> {
        self.descriptor.get_accessor(name)
    }

    pub fn set_accessor(&self, name: &str) -> Result<&Accessor, Error> {
        self.descriptor.set_accessor(name)
    }

    pub fn getter_names(&self) -> &[String] {
        self.descriptor.readable_names()
    }

    pub fn setter_names(&self) -> &[String] {
        self.descriptor.writable_names()
    }

    pub fn has_default_constructor(&self) -> bool {
        self.descriptor.has_default_constructor()
    }

    pub fn default_constructor(&self) -> Result<&[Ty], Error> {
        self.descriptor.default_constructor()
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Descend through every segment but the last, then apply `last`.
    fn walk<T>(
        &self,
        path: &str,
        last: impl Fn(&MetaType<'r>, &PathToken<'_>) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let mut tok = PathToken::parse(path)?;
        let mut meta = self.clone();
        while let Some(next) = tok.next() {
            let next = next?;
            let pair = meta.property_pair(tok.name(), tok.index().is_some())?;
            meta = meta.nested(&pair)?;
            tok = next;
        }
        last(&meta, &tok)
    }

    fn build_property(&self, path: &str, normalize: bool, canonical: &mut String) -> bool {
        let Ok(tok) = PathToken::parse(path) else { return false };
        let found = if normalize {
            self.descriptor.find_lenient_name(tok.name())
        } else {
            self.descriptor.find_property_name(tok.name())
        };
        let Some(name) = found else { return false };
        if !canonical.is_empty() {
            canonical.push('.');
        }
        canonical.push_str(name);
        if !tok.has_next() {
            return true;
        }
        self.property_pair(name, tok.index().is_some())
            .and_then(|pair| self.nested(&pair))
            .is_ok_and(|meta| meta.build_property(tok.children(), normalize, canonical))
    }

    /// Getter pair of `name`; `indexed` unwraps arrays and single-argument
    /// collections to their element type. An unbound element variable is
    /// not unwrapped.
    fn property_pair(&self, name: &str, indexed: bool) -> Result<TypePair, Error> {
        let pair = self.descriptor.getter_type(name)?;
        if !indexed {
            return Ok(pair.clone());
        }
        if let Ty::Array(component) = &pair.generic {
            return Ok(TypePair::of((**component).clone()));
        }
        if self.cache.universe().is_collection(&pair.erased) {
            if let [element] = pair.generic.type_args() {
                if !matches!(element, Ty::Var(_)) {
                    return Ok(TypePair::of(element.clone()));
                }
            }
        }
        Ok(pair.clone())
    }

    /// Class-like generic types keep their arguments so members of the
    /// nested type resolve against them.
    fn nested(&self, pair: &TypePair) -> Result<MetaType<'r>, Error> {
        let target = if pair.generic.is_class_like() { &pair.generic } else { &pair.erased };
        Self::for_type(self.cache, target)
    }
}
