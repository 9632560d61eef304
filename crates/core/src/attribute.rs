//! Descriptive metadata attached to property declarations
//!
//! An [`Attribute`] wraps an arbitrary descriptor value. The model never
//! interprets attributes; consumers look for the descriptor types they
//! understand with [`Attribute::downcast_ref`].
//!
//! ```ignore
//! let attrs = property.attributes();
//! if let Some(member) = attrs.iter().find_map(|a| a.downcast_ref::<DataMember>()) {
//!     println!("serialized as {:?}", member.name);
//! }
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Object-safe view over a descriptor payload
trait Descriptor: Any + Send + Sync + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn eq_descriptor(&self, other: &dyn Any) -> bool;
}

impl<A> Descriptor for A
where
    A: Any + Send + Sync + PartialEq + fmt::Debug,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_descriptor(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<A>().is_some_and(|other| self == other)
    }
}

/// An opaque metadata value attached to a property
///
/// Cloning is cheap; clones share the same payload.
#[derive(Clone)]
pub struct Attribute {
    inner: Arc<dyn Descriptor>,
    type_name: &'static str,
}

impl Attribute {
    /// Wrap a descriptor value
    pub fn new<A>(descriptor: A) -> Self
    where
        A: Any + Send + Sync + PartialEq + fmt::Debug,
    {
        Self {
            inner: Arc::new(descriptor),
            type_name: std::any::type_name::<A>(),
        }
    }

    /// Check whether the payload is an `A`
    pub fn is<A: Any>(&self) -> bool {
        self.inner.as_any().is::<A>()
    }

    /// Borrow the payload as an `A`
    pub fn downcast_ref<A: Any>(&self) -> Option<&A> {
        self.inner.as_any().downcast_ref::<A>()
    }

    /// Type name of the payload
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
            || self.inner.eq_descriptor(other.inner.as_any())
    }
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

/// Marks the name a property is serialized under
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataMember {
    /// Serialized member name, if it differs from the property name
    pub name: Option<String>,
}

impl DataMember {
    /// A data member serialized under the property's own name
    pub fn new() -> Self {
        Self::default()
    }

    /// A data member serialized under `name`
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// Free-form human readable description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(pub String);

impl Description {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast() {
        let attr = Attribute::new(DataMember::named("over_the_top"));
        assert!(attr.is::<DataMember>());
        assert!(!attr.is::<Description>());

        let member = attr.downcast_ref::<DataMember>().unwrap();
        assert_eq!(member.name.as_deref(), Some("over_the_top"));
        assert!(attr.downcast_ref::<Description>().is_none());
    }

    #[test]
    fn test_equality_compares_payloads() {
        let a = Attribute::new(DataMember::named("x"));
        let b = Attribute::new(DataMember::named("x"));
        let c = Attribute::new(DataMember::named("y"));
        let d = Attribute::new(Description::new("x"));

        assert_eq!(a, b);
        assert_eq!(a, a.clone());
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_type_name_and_debug() {
        let attr = Attribute::new(Description::new("health points"));
        assert!(attr.type_name().ends_with("Description"));
        assert_eq!(format!("{:?}", attr), "Description(\"health points\")");
    }
}
