// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Derive macros for `khora-content`.
//!
//! `#[derive(Content)]` marks a custom object type and, when given a reader
//! and a writer, registers them for `ContentRegistry::discover`:
//!
//! ```ignore
//! #[derive(Content)]
//! #[content(reader = PointReader, writer = PointWriter)]
//! struct Point { x: i32, y: i32 }
//! ```
//!
//! `#[derive(ContentEnum)]` does the same for fieldless enums, stored by
//! member name.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr, Path};

/// Options read from `#[content(..)]`.
#[derive(Default)]
struct ContentOptions {
    name: Option<LitStr>,
    reader: Option<Path>,
    writer: Option<Path>,
}

impl ContentOptions {
    fn parse(input: &DeriveInput, allow_plugins: bool) -> syn::Result<Self> {
        let mut options = Self::default();
        for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("content")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    options.name = Some(meta.value()?.parse()?);
                } else if allow_plugins && meta.path.is_ident("reader") {
                    options.reader = Some(meta.value()?.parse()?);
                } else if allow_plugins && meta.path.is_ident("writer") {
                    options.writer = Some(meta.value()?.parse()?);
                } else {
                    return Err(meta.error("unsupported content option"));
                }
                Ok(())
            })?;
        }
        Ok(options)
    }

    /// The registered name: the explicit one, or `module::path::Ident`.
    fn type_name(&self, input: &DeriveInput) -> TokenStream2 {
        let ident = &input.ident;
        match &self.name {
            Some(name) => quote! { #name },
            None => quote! { ::core::concat!(::core::module_path!(), "::", ::core::stringify!(#ident)) },
        }
    }
}

fn reject_generics(input: &DeriveInput) -> syn::Result<()> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "content types cannot be generic",
        ));
    }
    Ok(())
}

/// Implements `Content` and `ContentObject` for a custom object type.
///
/// With `#[content(reader = R, writer = W)]` the pair is registered at link
/// time; both must implement `Default`. `#[content(name = "..")]` overrides
/// the name written in tags.
#[proc_macro_derive(Content, attributes(content))]
pub fn derive_content(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_content(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_content(input: &DeriveInput) -> syn::Result<TokenStream2> {
    reject_generics(input)?;
    let options = ContentOptions::parse(input, true)?;
    let ident = &input.ident;
    let type_name = options.type_name(input);

    let registration = match (&options.reader, &options.writer) {
        (Some(reader), Some(writer)) => quote! {
            ::khora_content::__private::inventory::submit! {
                ::khora_content::ContentRegistration::object::<#ident, #reader, #writer>()
            }
        },
        (None, None) => quote! {},
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "`reader` and `writer` must be given together",
            ))
        }
    };

    Ok(quote! {
        impl ::khora_content::ContentObject for #ident {
            fn type_name() -> &'static str {
                #type_name
            }
        }

        impl ::khora_content::Content for #ident {
            fn descriptor() -> ::khora_content::TypeDescriptor {
                ::khora_content::content::object_descriptor::<Self>()
            }

            fn to_value(
                &self,
                registry: &::khora_content::ContentRegistry,
            ) -> ::khora_content::Result<::khora_content::Value> {
                registry.write_object(self)
            }

            fn from_value(
                value: ::khora_content::Value,
                registry: &::khora_content::ContentRegistry,
            ) -> ::khora_content::Result<Self> {
                registry.read_object(value)
            }
        }

        #registration
    })
}

/// Implements `ContentEnum` and `Content` for a fieldless enum and
/// registers it at link time.
#[proc_macro_derive(ContentEnum, attributes(content))]
pub fn derive_content_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_content_enum(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_content_enum(input: &DeriveInput) -> syn::Result<TokenStream2> {
    reject_generics(input)?;
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "ContentEnum can only be derived for enums",
        ));
    };
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "ContentEnum needs at least one variant",
        ));
    }

    let mut members = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "ContentEnum variants cannot have fields",
            ));
        }
        members.push(&variant.ident);
    }

    let options = ContentOptions::parse(input, false)?;
    let ident = &input.ident;
    let type_name = options.type_name(input);
    let names: Vec<LitStr> = members
        .iter()
        .map(|member| LitStr::new(&member.to_string(), member.span()))
        .collect();

    Ok(quote! {
        impl ::khora_content::ContentEnum for #ident {
            const MEMBERS: &'static [&'static str] = &[#(#names),*];

            fn type_name() -> &'static str {
                #type_name
            }

            fn member_name(&self) -> &'static str {
                match self {
                    #(Self::#members => #names,)*
                }
            }

            fn from_member_name(name: &str) -> ::core::option::Option<Self> {
                match name {
                    #(#names => ::core::option::Option::Some(Self::#members),)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl ::khora_content::Content for #ident {
            fn descriptor() -> ::khora_content::TypeDescriptor {
                ::khora_content::content::enum_descriptor::<Self>()
            }

            fn to_value(
                &self,
                _registry: &::khora_content::ContentRegistry,
            ) -> ::khora_content::Result<::khora_content::Value> {
                ::core::result::Result::Ok(::khora_content::content::enum_to_value(self))
            }

            fn from_value(
                value: ::khora_content::Value,
                _registry: &::khora_content::ContentRegistry,
            ) -> ::khora_content::Result<Self> {
                ::khora_content::content::enum_from_value(value)
            }
        }

        ::khora_content::__private::inventory::submit! {
            ::khora_content::ContentRegistration::enumeration::<#ident>()
        }
    })
}
