//! Typed property bound to concrete accessors

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::{mismatch, unsupported, PropertyHandle, PropertyInfo, Value};
use crate::attribute::Attribute;
use crate::error::{Operand, Operation, ReflectResult};
use crate::types::TypeInfo;

type Getter<T, V> = Arc<dyn Fn(&T) -> V + Send + Sync>;
type Setter<T, V> = Arc<dyn Fn(&mut T, V) + Send + Sync>;

/// A property of instances of `T` holding values of `V`
///
/// # Example
///
/// ```ignore
/// let prop = Property::<Player, i32>::new("Health")
///     .with_attribute(Attribute::new(DataMember::named("hp")))
///     .with_getter(|p| p.health)
///     .with_setter(|p, v| p.health = v);
///
/// prop.set(&mut player, 100)?;
/// assert_eq!(prop.get(&player)?, 100);
/// ```
pub struct Property<T, V> {
    name: String,
    attributes: Vec<Attribute>,
    getter: Option<Getter<T, V>>,
    setter: Option<Setter<T, V>>,
}

impl<T, V> Property<T, V>
where
    T: Any + Send + Sync,
    V: Any + Send,
{
    /// Create a property with no accessors and no attributes
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            getter: None,
            setter: None,
        }
    }

    /// Bind the getter
    pub fn with_getter<F>(mut self, getter: F) -> Self
    where
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.getter = Some(Arc::new(getter));
        self
    }

    /// Bind the setter
    pub fn with_setter<F>(mut self, setter: F) -> Self
    where
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.setter = Some(Arc::new(setter));
        self
    }

    /// Append one attribute
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Append attributes, keeping their order
    pub fn with_attributes(mut self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Read through the getter without erasure
    #[inline]
    pub fn get(&self, instance: &T) -> ReflectResult<V> {
        let getter = self
            .getter
            .as_ref()
            .ok_or_else(|| unsupported(&self.name, Operation::Get))?;
        Ok(getter(instance))
    }

    /// Write through the setter without erasure
    #[inline]
    pub fn set(&self, instance: &mut T, value: V) -> ReflectResult<()> {
        let setter = self
            .setter
            .as_ref()
            .ok_or_else(|| unsupported(&self.name, Operation::Set))?;
        setter(instance, value);
        Ok(())
    }

    /// Erase into a shareable handle
    pub fn into_handle(self) -> PropertyHandle {
        Arc::new(self)
    }
}

impl<T, V> PropertyInfo for Property<T, V>
where
    T: Any + Send + Sync,
    V: Any + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    fn value_type(&self) -> TypeInfo {
        TypeInfo::of::<V>()
    }

    fn instance_type(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn has_getter(&self) -> bool {
        self.getter.is_some()
    }

    fn has_setter(&self) -> bool {
        self.setter.is_some()
    }

    fn get_value(&self, instance: &dyn Any) -> ReflectResult<Value> {
        let getter = self
            .getter
            .as_ref()
            .ok_or_else(|| unsupported(&self.name, Operation::Get))?;
        let instance = instance
            .downcast_ref::<T>()
            .ok_or_else(|| mismatch(&self.name, Operand::Instance, TypeInfo::of::<T>()))?;
        Ok(Box::new(getter(instance)))
    }

    fn set_value(&self, instance: &mut dyn Any, value: Value) -> ReflectResult<()> {
        let setter = self
            .setter
            .as_ref()
            .ok_or_else(|| unsupported(&self.name, Operation::Set))?;
        let instance = instance
            .downcast_mut::<T>()
            .ok_or_else(|| mismatch(&self.name, Operand::Instance, TypeInfo::of::<T>()))?;
        let value = value
            .downcast::<V>()
            .map_err(|_| mismatch(&self.name, Operand::Value, TypeInfo::of::<V>()))?;
        setter(instance, *value);
        Ok(())
    }
}

impl<T, V> Clone for Property<T, V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            attributes: self.attributes.clone(),
            getter: self.getter.clone(),
            setter: self.setter.clone(),
        }
    }
}

fn same_accessor<F: ?Sized>(a: &Option<Arc<F>>, b: &Option<Arc<F>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

/// Equal when names, attributes and bound accessors are the same
impl<T, V> PartialEq for Property<T, V> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.attributes == other.attributes
            && same_accessor(&self.getter, &other.getter)
            && same_accessor(&self.setter, &other.setter)
    }
}

impl<T, V> fmt::Debug for Property<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("instance_type", &std::any::type_name::<T>())
            .field("value_type", &std::any::type_name::<V>())
            .field("attributes", &self.attributes)
            .field("getter", &self.getter.is_some())
            .field("setter", &self.setter.is_some())
            .finish()
    }
}
