//! Incremental construction of type models

use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use super::TypeModel;
use crate::property::{Inherited, Property, PropertyHandle};
use crate::reflect::Reflect;
use crate::types::TypeInfo;

/// Collects the properties of `T` in declaration order
///
/// # Example
///
/// ```ignore
/// let mut builder = ModelBuilder::<Player>::new();
/// builder
///     .inherit(|p: &Player| &p.entity, |p: &mut Player| &mut p.entity)
///     .read_write("Health", |p| p.health, |p, v| p.health = v)
///     .read_only("Name", |p| p.name.clone());
/// let model = builder.build();
/// ```
pub struct ModelBuilder<T> {
    properties: Vec<PropertyHandle>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ModelBuilder<T>
where
    T: Any + Send + Sync,
{
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Append a fully configured property
    pub fn add<V>(&mut self, property: Property<T, V>) -> &mut Self
    where
        V: Any + Send,
    {
        self.properties.push(property.into_handle());
        self
    }

    /// Append a property with both accessors
    pub fn read_write<V, G, S>(&mut self, name: &str, getter: G, setter: S) -> &mut Self
    where
        V: Any + Send,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.add(Property::new(name).with_getter(getter).with_setter(setter))
    }

    /// Append a property with only a getter
    pub fn read_only<V, G>(&mut self, name: &str, getter: G) -> &mut Self
    where
        V: Any + Send,
        G: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.add(Property::new(name).with_getter(getter))
    }

    /// Append a property with only a setter
    pub fn write_only<V, S>(&mut self, name: &str, setter: S) -> &mut Self
    where
        V: Any + Send,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.add(Property::new(name).with_setter(setter))
    }

    /// Append every property of the embedded base `B`
    ///
    /// Call this before declaring own properties so that same-named ones
    /// declared afterwards override the inherited ones.
    pub fn inherit<B>(&mut self, project: fn(&T) -> &B, project_mut: fn(&mut T) -> &mut B) -> &mut Self
    where
        B: Reflect,
    {
        let mut base = ModelBuilder::<B>::new();
        B::declare(&mut base);
        self.properties.extend(base.properties.into_iter().map(|inner| {
            Arc::new(Inherited::new(inner, project, project_mut)) as PropertyHandle
        }));
        self
    }

    /// Number of properties collected so far
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Finish the model
    pub fn build(self) -> TypeModel {
        TypeModel::new(TypeInfo::of::<T>(), self.properties)
    }
}

impl<T> Default for ModelBuilder<T>
where
    T: Any + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}
