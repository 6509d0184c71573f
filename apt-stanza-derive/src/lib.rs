extern crate proc_macro;
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, DeriveInput};
use syn::{GenericArgument, PathArguments, Type, TypePath};

/// The `T` of an `Option<T>`, or `None` if the type is not an `Option`.
fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    let Type::Path(TypePath { path, .. }) = ty else {
        return None;
    };
    let segment = path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

// Generate `required_fields` and `project` for the annotated struct, i.e.:
//
// ```rust
// #[derive(FromStanza)]
// struct X {
//    #[stanza(field = "Package")]
//    name: String,
//    #[stanza(field = "Installed-Size", lenient)]
//    installed_size: Option<u64>,
//    #[stanza(fields)]
//    raw: FieldMap,
// }
// ```
//
// will generate:
//
// ```rust
// impl apt_stanza::FromStanza for X {
//     fn required_fields() -> Vec<&'static str> {
//         let mut required: Vec<&'static str> = Vec::new();
//         required.push("Package");
//         required
//     }
//
//     fn project(fields: FieldMap, validation: Validation) -> Result<Self, Error> {
//         let __name = required_value(&fields, "Package", validation, false, <String as FromStr>::from_str)?;
//         let __installed_size = optional_value(&fields, "Installed-Size", validation, true, <u64 as FromStr>::from_str)?;
//         let __raw = fields;
//         Ok(Self { name: __name, installed_size: __installed_size, raw: __raw })
//     }
// }
// ```
//
// Fields marked `flatten` are records of their own, projected from the same
// field map; their required fields are checked before the outer ones.

struct FieldAttributes {
    field: Option<String>,
    deserialize_with: Option<syn::ExprPath>,
    lenient: bool,
    flatten: bool,
    fields: bool,
}

fn extract_field_attributes(attrs: &[syn::Attribute]) -> Result<FieldAttributes, syn::Error> {
    let mut field = None;
    let mut deserialize_with = None;
    let mut lenient = false;
    let mut flatten = false;
    let mut fields = false;

    for attr in attrs {
        if !attr.path().is_ident("stanza") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("field") {
                let value = meta.value()?;
                let s: syn::LitStr = value.parse()?;
                field = Some(s.value());
                Ok(())
            } else if meta.path.is_ident("deserialize_with") {
                let value = meta.value()?;
                let path: syn::ExprPath = value.parse()?;
                deserialize_with = Some(path);
                Ok(())
            } else if meta.path.is_ident("lenient") {
                lenient = true;
                Ok(())
            } else if meta.path.is_ident("flatten") {
                flatten = true;
                Ok(())
            } else if meta.path.is_ident("fields") {
                fields = true;
                Ok(())
            } else {
                Err(meta.error("unsupported stanza attribute"))
            }
        })?;
    }

    if flatten && fields {
        return Err(syn::Error::new(
            proc_macro2::Span::call_site(),
            "only one of 'flatten' or 'fields' can be specified",
        ));
    }

    Ok(FieldAttributes {
        field,
        deserialize_with,
        lenient,
        flatten,
        fields,
    })
}

#[proc_macro_derive(FromStanza, attributes(stanza))]
pub fn derive_from_stanza(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> Result<proc_macro2::TokenStream, syn::Error> {
    let name = &input.ident;

    let syn::Data::Struct(s) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "FromStanza can only be derived for structs",
        ));
    };

    let mut nested_required = vec![];
    let mut own_required = vec![];
    let mut locals = vec![];
    let mut consumer = None;
    let mut assignments = vec![];

    for f in s.fields.iter() {
        let attrs = extract_field_attributes(&f.attrs)?;
        let ident = f
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(f, "FromStanza requires named fields"))?;
        let local = format_ident!("__{}", ident);
        let ty = &f.ty;

        assignments.push(quote! { #ident: #local });

        if attrs.flatten || attrs.fields {
            if consumer.is_some() {
                return Err(syn::Error::new_spanned(
                    f,
                    "only one field can take the field map ('flatten' or 'fields')",
                ));
            }
            if attrs.flatten {
                nested_required.push(quote! {
                    required.extend(<#ty as apt_stanza::FromStanza>::required_fields());
                });
                consumer = Some(quote! {
                    let #local = <#ty as apt_stanza::FromStanza>::project(fields, validation)?;
                });
            } else {
                consumer = Some(quote! { let #local = fields; });
            }
            continue;
        }

        // Get key either from the #[stanza(field = "Foo")] attribute, or derive it from the
        // field name
        let key = attrs.field.unwrap_or_else(|| ident.to_string());
        let lenient = attrs.lenient;
        let inner = option_inner(ty);
        let parse = match (&attrs.deserialize_with, inner) {
            (Some(path), _) => quote! { #path },
            (None, Some(inner)) => quote! { <#inner as std::str::FromStr>::from_str },
            (None, None) => quote! { <#ty as std::str::FromStr>::from_str },
        };

        if inner.is_some() {
            locals.push(quote! {
                let #local = apt_stanza::convert::optional_value(&fields, #key, validation, #lenient, #parse)?;
            });
        } else {
            own_required.push(quote! { required.push(#key); });
            locals.push(quote! {
                let #local = apt_stanza::convert::required_value(&fields, #key, validation, #lenient, #parse)?;
            });
        }
    }

    let consumer = consumer.unwrap_or_else(|| quote! { drop(fields); });

    Ok(quote! {
        impl apt_stanza::FromStanza for #name {
            fn required_fields() -> Vec<&'static str> {
                #[allow(unused_mut)]
                let mut required: Vec<&'static str> = Vec::new();
                #(#nested_required)*
                #(#own_required)*
                required
            }

            #[allow(unused_variables)]
            fn project(
                fields: apt_stanza::FieldMap,
                validation: apt_stanza::Validation,
            ) -> Result<Self, apt_stanza::Error> {
                #(#locals)*
                #consumer
                Ok(Self {
                    #(#assignments,)*
                })
            }
        }
    })
}
