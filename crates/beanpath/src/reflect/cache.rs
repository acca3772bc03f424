//! Concurrent descriptor cache.
//!
//! One descriptor per type. A miss builds the descriptor while holding the
//! map entry, so concurrent first requests for the same type build it once
//! and every caller gets the same `Arc`. Descriptor construction never reads
//! the cache, so holding the entry cannot deadlock.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use crate::config::ReflectorConfig;
use crate::error::Error;
use crate::types::generics::TypeParameterResolver;
use crate::types::ty::Ty;
use crate::types::universe::TypeUniverse;
use super::descriptor::TypeDescriptor;

pub struct DescriptorCache {
    universe:    Arc<TypeUniverse>,
    resolver:    Box<dyn TypeParameterResolver>,
    config:      ReflectorConfig,
    descriptors: DashMap<Ty, Arc<TypeDescriptor>>,
}

impl DescriptorCache {
    pub fn new(
        universe: Arc<TypeUniverse>,
        resolver: Box<dyn TypeParameterResolver>,
        config:   ReflectorConfig,
    ) -> Self {
        Self { universe, resolver, config, descriptors: DashMap::new() }
    }

    /// Descriptor for `ty`, built on first request. Failed builds are not
    /// cached.
    pub fn get_or_build(&self, ty: &Ty) -> Result<Arc<TypeDescriptor>, Error> {
        if let Some(found) = self.descriptors.get(ty) {
            return Ok(Arc::clone(found.value()));
        }
        match self.descriptors.entry(ty.clone()) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let built = TypeDescriptor::build(ty, &self.universe, self.resolver.as_ref(), &self.config)?;
                debug!(ty = %ty, "descriptor cached");
                Ok(Arc::clone(entry.insert(Arc::new(built)).value()))
            }
        }
    }

    pub fn universe(&self) -> &TypeUniverse {
        &self.universe
    }

    pub fn config(&self) -> &ReflectorConfig {
        &self.config
    }

    /// Number of descriptors built so far.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl std::fmt::Debug for DescriptorCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptorCache")
            .field("types", &self.universe.len())
            .field("config", &self.config)
            .field("cached", &self.descriptors.len())
            .finish()
    }
}
