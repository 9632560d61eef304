//! fastprop - Precompiled property models
//!
//! Named, strongly-typed property access without runtime type
//! introspection. Each reflectable type gets a [`TypeModel`] once; callers
//! then read and write its properties by name through pre-bound accessors.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐  register   ┌───────────────────────────┐
//! │ #[derive(Reflect)]   │────────────►│ ModelRegistry             │
//! │ or ModelBuilder      │             │   TypeId -> TypeModel     │
//! └──────────────────────┘             └─────────────┬─────────────┘
//!                                                    │ get::<T>()
//!                                                    ▼
//!                                      ┌───────────────────────────┐
//!                                      │ TypeModel                 │
//!                                      │   get_property(name, ic)  │
//!                                      │   lookup cache            │
//!                                      └─────────────┬─────────────┘
//!                                                    │
//!                                                    ▼
//!                                      ┌───────────────────────────┐
//!                                      │ PropertyHandle            │
//!                                      │   get_value / set_value   │
//!                                      └───────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use fastprop_core::{DataMember, ModelRegistry, Reflect};
//!
//! #[derive(Reflect, Default)]
//! pub struct SnakeData {
//!     #[reflect(rename = "OverTheTop", attr = DataMember::named("over_the_top"))]
//!     pub over_the_top: i32,
//! }
//!
//! let registry = ModelRegistry::new();
//! registry.register_type::<SnakeData>();
//!
//! let mut data = SnakeData::default();
//! let model = registry.get_type::<SnakeData>()?;
//! model.get_property("overthetop", true)?.set_as(&mut data, 3i32)?;
//! assert_eq!(model.get_property("OverTheTop", false)?.get_as::<i32>(&data)?, 3);
//! ```

// Allow the crate to refer to itself as `fastprop_core` for proc macro compatibility
extern crate self as fastprop_core;

pub mod attribute;
pub mod config;
pub mod error;
pub mod model;
pub mod property;
pub mod reflect;
pub mod registry;
pub mod types;

pub use attribute::{Attribute, DataMember, Description};
pub use config::{ConfigError, ConfigResult, ReflectConfig};
pub use error::{Operand, Operation, ReflectError, ReflectResult};
pub use model::{ModelBuilder, ModelDescriptor, PropertyDescriptor, TypeModel};
pub use property::{Access, Property, PropertyHandle, PropertyInfo, Value};
pub use reflect::Reflect;
pub use registry::{global, ModelRegistry};
pub use types::TypeInfo;

// Re-export macros
pub use fastprop_macros::Reflect;
