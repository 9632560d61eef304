//! Error types for property models and the model registry

use std::fmt;

/// Direction of a property access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Reading through the getter
    Get,
    /// Writing through the setter
    Set,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Get => f.write_str("get"),
            Operation::Set => f.write_str("set"),
        }
    }
}

/// Which argument of an access failed its type check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// The instance the property is read from or written to
    Instance,
    /// The value passed to a setter
    Value,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Instance => f.write_str("instance"),
            Operand::Value => f.write_str("value"),
        }
    }
}

/// Error type for model lookups and property access
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReflectError {
    /// No property with the requested name exists in the model
    #[error("Property '{name}' was not found in type '{type_name}'")]
    PropertyNotFound {
        name: String,
        type_name: &'static str,
    },

    /// The type was never registered
    #[error("No model registered for type {type_name}")]
    ModelNotRegistered { type_name: String },

    /// The property has no accessor for the requested direction
    #[error("Property '{property}' does not support {operation}")]
    UnsupportedOperation {
        property: String,
        operation: Operation,
    },

    /// The supplied instance or value has the wrong type
    #[error("Type mismatch on property '{property}': {operand} must be of type {expected}")]
    TypeMismatch {
        property: String,
        operand: Operand,
        expected: &'static str,
    },
}

/// Result type for model and property operations
pub type ReflectResult<T> = Result<T, ReflectError>;
