//! Property handles - bound accessors behind a type-erased interface
//!
//! A [`Property<T, V>`] keeps its getter and setter fully typed. Models store
//! it behind the object-safe [`PropertyInfo`] trait, so callers that only know
//! a property's name can still read and write it through `&dyn Any`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ PropertyHandle = Arc<dyn PropertyInfo>                    │
//! │   get_value(&dyn Any) -> Value                            │
//! │   set_value(&mut dyn Any, Value)                          │
//! └───────────────┬──────────────────────────┬───────────────┘
//!                 │                          │
//!                 ▼                          ▼
//! ┌───────────────────────────┐  ┌───────────────────────────┐
//! │ Property<T, V>            │  │ Inherited<T, B>           │
//! │   Fn(&T) -> V             │  │   fn(&T) -> &B            │
//! │   Fn(&mut T, V)           │  │   delegates to B's handle │
//! └───────────────────────────┘  └───────────────────────────┘
//! ```
//!
//! The downcasts at the erasure boundary are the only runtime checks; a
//! mismatch surfaces as [`ReflectError::TypeMismatch`].

mod inherited;
mod typed;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use crate::attribute::Attribute;
use crate::error::{Operand, Operation, ReflectError, ReflectResult};
use crate::types::TypeInfo;

pub(crate) use inherited::Inherited;
pub use typed::Property;

/// Erased property value
pub type Value = Box<dyn Any + Send>;

/// Shared handle to a property of some model
pub type PropertyHandle = Arc<dyn PropertyInfo>;

bitflags! {
    /// Accessors available on a property
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Access: u8 {
        /// A getter is bound
        const READ = 0x01;
        /// A setter is bound
        const WRITE = 0x02;
    }
}

/// Type-erased view of a single property
pub trait PropertyInfo: Send + Sync + fmt::Debug {
    /// Declared property name
    fn name(&self) -> &str;

    /// Metadata attached to the declaration, in declaration order
    fn attributes(&self) -> &[Attribute];

    /// Declared type of the property value
    fn value_type(&self) -> TypeInfo;

    /// Type the accessors expect as their subject
    fn instance_type(&self) -> TypeInfo;

    /// Whether a getter is bound
    fn has_getter(&self) -> bool;

    /// Whether a setter is bound
    fn has_setter(&self) -> bool;

    /// Read the property from `instance`
    ///
    /// Fails with `UnsupportedOperation` when no getter is bound and with
    /// `TypeMismatch` when `instance` is not of [`instance_type`](Self::instance_type).
    fn get_value(&self, instance: &dyn Any) -> ReflectResult<Value>;

    /// Write `value` to the property of `instance`
    ///
    /// Fails like [`get_value`](Self::get_value), and additionally with
    /// `TypeMismatch` when `value` is not of [`value_type`](Self::value_type).
    fn set_value(&self, instance: &mut dyn Any, value: Value) -> ReflectResult<()>;

    /// Summary of the bound accessors
    fn access(&self) -> Access {
        let mut access = Access::empty();
        access.set(Access::READ, self.has_getter());
        access.set(Access::WRITE, self.has_setter());
        access
    }
}

impl dyn PropertyInfo {
    /// Read the property and downcast the result to `V`
    pub fn get_as<V: Any>(&self, instance: &dyn Any) -> ReflectResult<V> {
        self.get_value(instance)?
            .downcast::<V>()
            .map(|value| *value)
            .map_err(|_| ReflectError::TypeMismatch {
                property: self.name().to_string(),
                operand: Operand::Value,
                expected: self.value_type().name(),
            })
    }

    /// Box `value` and write it to the property
    pub fn set_as<V: Any + Send>(&self, instance: &mut dyn Any, value: V) -> ReflectResult<()> {
        self.set_value(instance, Box::new(value))
    }

    /// First attached attribute whose payload is an `A`
    pub fn attribute<A: Any>(&self) -> Option<&A> {
        self.attributes().iter().find_map(Attribute::downcast_ref::<A>)
    }
}

pub(crate) fn unsupported(property: &str, operation: Operation) -> ReflectError {
    ReflectError::UnsupportedOperation {
        property: property.to_string(),
        operation,
    }
}

pub(crate) fn mismatch(property: &str, operand: Operand, expected: TypeInfo) -> ReflectError {
    ReflectError::TypeMismatch {
        property: property.to_string(),
        operand,
        expected: expected.name(),
    }
}
