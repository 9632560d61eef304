//! Attribute parsing for the Reflect derive macro

use darling::{FromDeriveInput, FromField};
use syn::ext::IdentExt;
use syn::{DeriveInput, Expr, Generics, Ident, Type, Visibility};

/// Parsed #[reflect(...)] input on the struct
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(reflect), supports(struct_named))]
pub struct ReflectArgs {
    /// Struct identifier
    pub ident: Ident,

    /// Struct generics
    pub generics: Generics,

    /// Struct fields
    pub data: darling::ast::Data<(), ReflectFieldArgs>,
}

/// Parsed #[reflect(...)] attributes on a field
#[derive(Debug, FromField)]
#[darling(attributes(reflect))]
pub struct ReflectFieldArgs {
    /// Field identifier
    pub ident: Option<Ident>,

    /// Field type
    pub ty: Type,

    /// Field visibility
    pub vis: Visibility,

    /// Property name; defaults to the field name
    #[darling(default)]
    pub rename: Option<String>,

    /// Exclude the field
    #[darling(default)]
    pub skip: bool,

    /// Reflect the field even though it is not `pub`
    #[darling(default)]
    pub include: bool,

    /// No setter
    #[darling(default)]
    pub readonly: bool,

    /// No getter
    #[darling(default)]
    pub writeonly: bool,

    /// Embedded base whose properties are inherited
    #[darling(default)]
    pub base: bool,

    /// Attribute expressions, in order
    #[darling(multiple, rename = "attr")]
    pub attributes: Vec<Expr>,
}

impl ReflectFieldArgs {
    /// Check if this field becomes a property of its own
    pub fn is_property(&self) -> bool {
        !self.skip && !self.base && (self.include || matches!(self.vis, Visibility::Public(_)))
    }

    /// Property name exposed by the model
    pub fn property_name(&self) -> String {
        match (&self.rename, &self.ident) {
            (Some(name), _) => name.clone(),
            (None, Some(ident)) => ident.unraw().to_string(),
            (None, None) => String::new(),
        }
    }

    /// Reject option combinations that make no sense
    pub fn validate(&self) -> darling::Result<()> {
        let mut errors = darling::Error::accumulator();

        if self.readonly && self.writeonly {
            errors.push(
                darling::Error::custom("`readonly` and `writeonly` cannot be combined")
                    .with_span(&self.ty),
            );
        }

        if self.base
            && (self.skip
                || self.readonly
                || self.writeonly
                || self.rename.is_some()
                || !self.attributes.is_empty())
        {
            errors.push(
                darling::Error::custom("`base` fields take no other reflect options")
                    .with_span(&self.ty),
            );
        }

        errors.finish()
    }
}

/// Parse a DeriveInput into ReflectArgs
pub fn parse_reflect(input: &DeriveInput) -> darling::Result<ReflectArgs> {
    ReflectArgs::from_derive_input(input)
}
