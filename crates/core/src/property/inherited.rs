//! Properties reached through an embedded base value

use std::any::Any;
use std::fmt;

use super::{mismatch, unsupported, PropertyHandle, PropertyInfo, Value};
use crate::attribute::Attribute;
use crate::error::{Operand, Operation, ReflectResult};
use crate::types::TypeInfo;

/// A base property re-exposed on an outer type
///
/// The outer instance is projected onto its embedded `B` before the base
/// handle runs, so the base accessors are reused unchanged.
pub(crate) struct Inherited<T, B> {
    inner: PropertyHandle,
    project: fn(&T) -> &B,
    project_mut: fn(&mut T) -> &mut B,
}

impl<T, B> Inherited<T, B> {
    pub(crate) fn new(
        inner: PropertyHandle,
        project: fn(&T) -> &B,
        project_mut: fn(&mut T) -> &mut B,
    ) -> Self {
        Self {
            inner,
            project,
            project_mut,
        }
    }
}

impl<T, B> PropertyInfo for Inherited<T, B>
where
    T: Any + Send + Sync,
    B: Any + Send + Sync,
{
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn attributes(&self) -> &[Attribute] {
        self.inner.attributes()
    }

    fn value_type(&self) -> TypeInfo {
        self.inner.value_type()
    }

    fn instance_type(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn has_getter(&self) -> bool {
        self.inner.has_getter()
    }

    fn has_setter(&self) -> bool {
        self.inner.has_setter()
    }

    fn get_value(&self, instance: &dyn Any) -> ReflectResult<Value> {
        if !self.inner.has_getter() {
            return Err(unsupported(self.name(), Operation::Get));
        }
        let instance = instance
            .downcast_ref::<T>()
            .ok_or_else(|| mismatch(self.name(), Operand::Instance, TypeInfo::of::<T>()))?;
        self.inner.get_value((self.project)(instance))
    }

    fn set_value(&self, instance: &mut dyn Any, value: Value) -> ReflectResult<()> {
        if !self.inner.has_setter() {
            return Err(unsupported(self.name(), Operation::Set));
        }
        let instance = instance
            .downcast_mut::<T>()
            .ok_or_else(|| mismatch(self.name(), Operand::Instance, TypeInfo::of::<T>()))?;
        self.inner.set_value((self.project_mut)(instance), value)
    }
}

impl<T, B> fmt::Debug for Inherited<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inherited")
            .field("via", &std::any::type_name::<B>())
            .field("inner", &self.inner)
            .finish()
    }
}
