//! Reflect derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, DeriveInput, WherePredicate};

use crate::parse::{parse_reflect, ReflectArgs, ReflectFieldArgs};

/// Generate the Reflect implementation
pub fn derive_reflect(input: DeriveInput) -> TokenStream {
    match parse_reflect(&input).and_then(generate_impl) {
        Ok(tokens) => tokens,
        Err(e) => e.write_errors(),
    }
}

fn generate_impl(args: ReflectArgs) -> darling::Result<TokenStream> {
    let struct_name = &args.ident;

    let fields = match args.data {
        darling::ast::Data::Struct(fields) => fields.fields,
        _ => {
            return Err(darling::Error::custom("Reflect can only be derived for structs")
                .with_span(struct_name))
        }
    };

    let mut errors = darling::Error::accumulator();
    for field in &fields {
        errors.handle(field.validate());
    }
    errors.finish()?;

    let bases: Vec<_> = fields.iter().filter(|f| f.base).collect();
    let properties: Vec<_> = fields.iter().filter(|f| f.is_property()).collect();

    let inherits = bases.iter().map(|f| generate_inherit(f));
    let adds = properties.iter().map(|f| generate_property(f));
    let names = properties.iter().map(|f| f.property_name());

    let mut generics = args.generics.clone();
    let (impl_generics, ty_generics, where_clause) = args.generics.split_for_impl();

    let predicates = generics.make_where_clause();
    predicates.predicates.push(parse_quote! {
        Self: ::core::marker::Send + ::core::marker::Sync + 'static
    });
    if !args.generics.params.is_empty() {
        predicates.predicates.extend(field_bounds(&bases, &properties));
    }
    let (_, _, reflect_where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            /// Names of the properties declared directly on this type
            pub const DECLARED_PROPERTIES: &'static [&'static str] = &[#(#names),*];
        }

        impl #impl_generics ::fastprop_core::Reflect for #struct_name #ty_generics #reflect_where_clause {
            fn declare(builder: &mut ::fastprop_core::ModelBuilder<Self>) {
                #(#inherits)*
                #(#adds)*
            }
        }
    })
}

/// Bounds the generated accessors need from generic field types
fn field_bounds(bases: &[&ReflectFieldArgs], properties: &[&ReflectFieldArgs]) -> Vec<WherePredicate> {
    let base_bounds = bases.iter().map(|f| {
        let ty = &f.ty;
        parse_quote! { #ty: ::fastprop_core::Reflect }
    });

    let property_bounds = properties.iter().map(|f| {
        let ty = &f.ty;
        if f.writeonly {
            parse_quote! { #ty: ::core::marker::Send + 'static }
        } else {
            parse_quote! { #ty: ::core::clone::Clone + ::core::marker::Send + 'static }
        }
    });

    base_bounds.chain(property_bounds).collect()
}

fn generate_inherit(field: &ReflectFieldArgs) -> TokenStream {
    let field_ident = field.ident.as_ref();
    let field_ty = &field.ty;

    quote! {
        builder.inherit::<#field_ty>(
            |this: &Self| &this.#field_ident,
            |this: &mut Self| &mut this.#field_ident,
        );
    }
}

fn generate_property(field: &ReflectFieldArgs) -> TokenStream {
    let field_ident = field.ident.as_ref();
    let field_ty = &field.ty;
    let name = field.property_name();
    let attributes = &field.attributes;

    let getter = if field.writeonly {
        quote! {}
    } else {
        quote! {
            .with_getter(|this: &Self| ::core::clone::Clone::clone(&this.#field_ident))
        }
    };

    let setter = if field.readonly {
        quote! {}
    } else {
        quote! {
            .with_setter(|this: &mut Self, value: #field_ty| this.#field_ident = value)
        }
    };

    quote! {
        builder.add(
            ::fastprop_core::Property::<Self, #field_ty>::new(#name)
                #(.with_attribute(::fastprop_core::Attribute::new(#attributes)))*
                #getter
                #setter
        );
    }
}
