//! fastprop Proc Macros
//!
//! This crate provides `#[derive(Reflect)]`, which emits the property model
//! of a struct at compile time.
//!
//! # Example
//!
//! ```ignore
//! use fastprop_core::{DataMember, Description, Reflect};
//!
//! #[derive(Reflect)]
//! pub struct Player {
//!     #[reflect(base)]
//!     entity: Entity,
//!
//!     #[reflect(rename = "Health", attr = DataMember::named("hp"))]
//!     pub health: i32,
//!
//!     #[reflect(readonly, attr = Description::new("steam name"))]
//!     pub name: String,
//!
//!     #[reflect(skip)]
//!     pub cache: Vec<u8>,
//! }
//!
//! // Generated:
//! // - impl Reflect for Player (Entity's properties first, then Health, name)
//! // - Player::DECLARED_PROPERTIES == ["Health", "name"]
//! ```
//!
//! # Attributes
//!
//! ## Field Attributes
//!
//! - `#[reflect(rename = "Name")]` - Property name (default: the field name).
//! - `#[reflect(skip)]` - Don't reflect this field.
//! - `#[reflect(include)]` - Reflect a field that is not `pub`.
//! - `#[reflect(readonly)]` - Don't generate a setter.
//! - `#[reflect(writeonly)]` - Don't generate a getter.
//! - `#[reflect(attr = <expr>)]` - Attach metadata; repeatable, order kept.
//! - `#[reflect(base)]` - Inherit the properties of an embedded `Reflect` type.
//!
//! Only `pub` fields are reflected unless `include` is given. Getters clone
//! the field value.

mod parse;
mod reflect;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derive macro for reflectable structs
///
/// Generates an implementation of `fastprop_core::Reflect` that binds a
/// getter and setter closure per reflected field, plus a
/// `DECLARED_PROPERTIES` constant listing the property names declared
/// directly on the struct.
///
/// # Inheritance
///
/// Fields marked `#[reflect(base)]` contribute their own type's properties
/// before the struct's own fields, so an own field with the same property
/// name overrides the inherited one on lookup.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    reflect::derive_reflect(input).into()
}
