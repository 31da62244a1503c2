// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitInt, LitStr, Type};

/// Parsed `#[packbuf(...)]` options of one field.
#[derive(Default)]
struct FieldOptions {
    length: Option<usize>,
    padding: Option<usize>,
    read_only: bool,
}

/// `#[derive(Composite)]` macro: generates the schema and field codecs
///
/// Fields are laid out in declaration order with no implicit alignment.
///
/// Attributes:
/// - `#[packbuf(name = "Native")]` on the struct: schema name (defaults to
///   the struct name)
/// - `#[packbuf(length = N)]`: element count of a `Vec<T>` array field
///   (`[T; N]` declares its own)
/// - `#[packbuf(padding = N)]` on a `Padding` field: `N` filler bytes
/// - `#[packbuf(read_only)]`: populate leaves this scalar untouched
///
/// # Errors
///
/// Enums, unions, tuple structs, unit structs and generic structs are not
/// aggregates and are rejected at compile time.
///
/// Example:
/// ```ignore
/// use packbuf::{Composite, Padding};
///
/// #[derive(Composite)]
/// struct Header {
///     flag: u8,
///     #[packbuf(padding = 3)]
///     _pad: Padding,
///     value: u32,
/// }
/// ```
#[proc_macro_derive(Composite, attributes(packbuf))]
pub fn derive_composite(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn not_aggregate(span: &impl quote::ToTokens, what: &str) -> syn::Error {
    syn::Error::new_spanned(
        span,
        format!("{what} is not an aggregate and can't be serialized; use a struct with named fields"),
    )
}

#[allow(clippy::too_many_lines)]
fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(not_aggregate(&input.generics, "a generic struct"));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unnamed(_) => return Err(not_aggregate(input, "a tuple struct")),
            Fields::Unit => return Err(not_aggregate(input, "a unit struct")),
        },
        Data::Enum(_) => return Err(not_aggregate(input, "an enum")),
        Data::Union(_) => return Err(not_aggregate(input, "a union")),
    };

    let type_name = schema_name(input)?;

    let mut decls = Vec::new();
    let mut encode_fields = Vec::new();
    let mut decode_fields = Vec::new();
    let mut populate_fields = Vec::new();
    let mut field_idents = Vec::new();

    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "Field must have a name"));
        };
        let ty = &field.ty;
        let field_name = ident.to_string().trim_start_matches("r#").to_string();
        let options = field_options(field)?;
        field_idents.push(ident.clone());

        if is_padding_type(ty) {
            if options.length.is_some() || options.read_only {
                return Err(syn::Error::new_spanned(
                    field,
                    "padding fields only accept `padding = N`",
                ));
            }
            // Without a byte count the layout reports the missing size.
            decls.push(match options.padding {
                Some(bytes) => quote! { ::packbuf::FieldDecl::padding(#field_name, #bytes) },
                None => quote! { ::packbuf::FieldDecl::of::<::packbuf::Padding>(#field_name) },
            });
            decode_fields.push(quote! { let #ident = ::packbuf::Padding; });
            continue;
        }

        if options.padding.is_some() {
            return Err(syn::Error::new_spanned(
                ty,
                "`padding = N` requires a field of type `packbuf::Padding`",
            ));
        }

        let mut decl = quote! { ::packbuf::FieldDecl::of::<#ty>(#field_name) };
        if let Some(length) = options.length {
            decl = quote! { #decl.length(#length) };
        }
        if options.read_only {
            decl = quote! { #decl.read_only() };
        }
        decls.push(decl);

        encode_fields.push(quote! { __packbuf_fields.field(#field_name, &self.#ident)?; });
        decode_fields.push(quote! { let #ident: #ty = __packbuf_fields.field(#field_name)?; });
        populate_fields.push(quote! { __packbuf_fields.field_into(#field_name, &mut self.#ident)?; });
    }

    Ok(quote! {
        impl ::packbuf::Composite for #name {
            fn schema() -> ::packbuf::Schema {
                ::packbuf::Schema::builder(#type_name)
                    #(.decl(#decls))*
                    .build()
            }

            #[allow(unused_variables)]
            fn encode_fields(
                &self,
                __packbuf_fields: &mut ::packbuf::FieldEncoder<'_, '_>,
            ) -> ::packbuf::Result<()> {
                #(#encode_fields)*
                Ok(())
            }

            #[allow(unused_variables)]
            fn decode_fields(
                __packbuf_fields: &mut ::packbuf::FieldDecoder<'_, '_>,
            ) -> ::packbuf::Result<Self> {
                #(#decode_fields)*
                Ok(Self {
                    #(#field_idents),*
                })
            }

            #[allow(unused_variables)]
            fn populate_fields(
                &mut self,
                __packbuf_fields: &mut ::packbuf::FieldDecoder<'_, '_>,
            ) -> ::packbuf::Result<()> {
                #(#populate_fields)*
                Ok(())
            }
        }
    })
}

/// Schema name from `#[packbuf(name = "...")]`, or the struct name.
fn schema_name(input: &DeriveInput) -> syn::Result<String> {
    let mut name = input.ident.to_string();
    for attr in &input.attrs {
        if !attr.path().is_ident("packbuf") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                name = value.value();
                Ok(())
            } else {
                Err(meta.error("unsupported packbuf attribute, expected `name`"))
            }
        })?;
    }
    Ok(name)
}

fn field_options(field: &syn::Field) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("packbuf") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("length") {
                let value: LitInt = meta.value()?.parse()?;
                options.length = Some(value.base10_parse()?);
                Ok(())
            } else if meta.path.is_ident("padding") {
                let value: LitInt = meta.value()?.parse()?;
                options.padding = Some(value.base10_parse()?);
                Ok(())
            } else if meta.path.is_ident("read_only") {
                options.read_only = true;
                Ok(())
            } else {
                Err(meta.error(
                    "unsupported packbuf attribute, expected `length`, `padding` or `read_only`",
                ))
            }
        })?;
    }
    Ok(options)
}

/// `Padding` or any path ending in `::Padding`.
fn is_padding_type(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Padding" && segment.arguments.is_empty()),
        _ => false,
    }
}
