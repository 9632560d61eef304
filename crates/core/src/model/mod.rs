//! Type models - the reflectable properties of one type
//!
//! A [`TypeModel`] is built once (usually by `#[derive(Reflect)]` through
//! [`ModelBuilder`]) and never changes afterwards, except for its lookup
//! cache.
//!
//! # Lookup
//!
//! ```text
//! get_property("overthetop", ignore_case = true)
//!        │
//!        ├── cache hit (exact requested string) ──► handle
//!        │
//!        └── miss: scan properties from the end (last declaration wins)
//!                 ├── found ──► cache[requested string] = handle ──► handle
//!                 └── none  ──► PropertyNotFound
//! ```
//!
//! The cache is keyed by the literal requested string. A case-insensitive
//! lookup for `"overthetop"` does not make a later exact lookup for
//! `"OverTheTop"` a hit; that lookup scans once and is cached separately.
//! The reverse also holds: once `"overthetop"` is cached by a
//! case-insensitive lookup, an exact lookup for `"overthetop"` is a cache
//! hit and succeeds, even though no property is spelled that way.

mod builder;
mod descriptor;

use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::error::{ReflectError, ReflectResult};
use crate::property::PropertyHandle;
use crate::types::TypeInfo;

pub use builder::ModelBuilder;
pub use descriptor::{ModelDescriptor, PropertyDescriptor};

/// Reflectable properties of a single type
pub struct TypeModel {
    subject: TypeInfo,
    properties: Vec<PropertyHandle>,
    lookup: RwLock<HashMap<String, PropertyHandle>>,
    cache_lookups: bool,
}

impl TypeModel {
    /// Create a model from properties in declaration order
    ///
    /// Properties may repeat a name; lookups resolve to the last one.
    pub fn new(subject: TypeInfo, properties: Vec<PropertyHandle>) -> Self {
        Self {
            subject,
            properties,
            lookup: RwLock::new(HashMap::new()),
            cache_lookups: true,
        }
    }

    /// Enable or disable caching of name lookups
    pub fn with_lookup_cache(mut self, enabled: bool) -> Self {
        self.cache_lookups = enabled;
        self
    }

    /// Type this model describes
    pub fn subject(&self) -> TypeInfo {
        self.subject
    }

    /// All properties in declaration order
    pub fn properties(&self) -> &[PropertyHandle] {
        &self.properties
    }

    /// Number of declared properties, including shadowed ones
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Declared property names in declaration order
    pub fn property_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.properties.iter().map(|p| p.name())
    }

    /// Get a property by name
    ///
    /// With `ignore_case` set, names are compared after Unicode lowercase
    /// folding; otherwise they must match exactly.
    ///
    /// # Errors
    /// `PropertyNotFound` if no property has a matching name.
    pub fn get_property(&self, name: &str, ignore_case: bool) -> ReflectResult<PropertyHandle> {
        self.try_get_property(name, ignore_case)
            .ok_or_else(|| ReflectError::PropertyNotFound {
                name: name.to_string(),
                type_name: self.subject.name(),
            })
    }

    /// Get a property by name, returning `None` if it does not exist
    pub fn try_get_property(&self, name: &str, ignore_case: bool) -> Option<PropertyHandle> {
        if self.cache_lookups {
            if let Some(property) = self.lookup.read().get(name) {
                trace!("Cache hit for {}.{}", self.subject, name);
                return Some(property.clone());
            }
        }

        let property = self
            .properties
            .iter()
            .rev()
            .find(|p| names_match(p.name(), name, ignore_case))?
            .clone();

        debug!(
            "Resolved {}.{} (ignore_case={})",
            self.subject, name, ignore_case
        );

        if self.cache_lookups {
            // Concurrent misses may both insert; they store the same handle
            self.lookup
                .write()
                .entry(name.to_string())
                .or_insert_with(|| property.clone());
        }
        Some(property)
    }

    /// Number of cached lookup entries
    pub fn cache_len(&self) -> usize {
        self.lookup.read().len()
    }

    /// Serializable summary of the model
    pub fn describe(&self) -> ModelDescriptor {
        ModelDescriptor::from_model(self)
    }
}

impl fmt::Debug for TypeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeModel")
            .field("subject", &self.subject)
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

fn names_match(declared: &str, requested: &str, ignore_case: bool) -> bool {
    if ignore_case {
        declared
            .chars()
            .flat_map(char::to_lowercase)
            .eq(requested.chars().flat_map(char::to_lowercase))
    } else {
        declared == requested
    }
}
