//! Derive macros for `shapecast`.
//!
//! - `#[derive(Record)]` exposes a struct's named fields to record schemas.
//! - `#[derive(Scrub)]` walks a type's fields, turning blank optional text
//!   into `None`.
//!
//! Field external names follow `#[shapecast(rename = "..")]`, then
//! `#[serde(rename = "..")]`, then a container-level `rename_all` (shapecast
//! first, then serde), then the field name itself.

#![forbid(unsafe_code)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{
    parse_macro_input, parse_quote, Attribute, Data, DeriveInput, Fields, GenericParam, Generics,
    LitStr, Token,
};

/// Implements `shapecast::Record` for a struct with named fields.
#[proc_macro_derive(Record, attributes(shapecast, serde))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_record(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Implements `shapecast::Scrub` by scrubbing every field.
///
/// Fields marked `#[shapecast(skip_scrub)]` are left alone.
#[proc_macro_derive(Scrub, attributes(shapecast))]
pub fn derive_scrub(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_scrub(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_record(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new(
            input.ident.span(),
            "Record can only be derived for structs with named fields",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new(
            data.fields.span(),
            "Record can only be derived for structs with named fields",
        ));
    };
    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(syn::Error::new(
            lifetime.span(),
            "Record types must be 'static; borrowed fields are not supported",
        ));
    }

    let container = ContainerAttrs::parse(&input.attrs)?;

    let mut metas = Vec::with_capacity(fields.named.len());
    let mut arms = Vec::with_capacity(fields.named.len());
    for (index, field) in fields.named.iter().enumerate() {
        let Some(ident) = &field.ident else { continue };
        let attrs = FieldAttrs::parse(&field.attrs)?;
        let name = ident.unraw().to_string();
        let tag = attrs
            .rename
            .unwrap_or_else(|| container.rename_all.map_or_else(|| name.clone(), |rule| rule.apply(&name)));
        let ty = &field.ty;

        metas.push(quote! {
            ::shapecast::FieldMeta::new::<#ty>(#index, #name, #tag)
        });
        arms.push(quote! {
            #name => ::std::option::Option::Some(&mut self.#ident),
        });
    }

    let ident = &input.ident;
    let generics = add_bound(&input.generics, &parse_quote!('static));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::shapecast::Record for #ident #ty_generics #where_clause {
            fn fields() -> ::std::vec::Vec<::shapecast::FieldMeta> {
                ::std::vec![#(#metas),*]
            }

            fn field_mut(
                &mut self,
                name: &str,
            ) -> ::std::option::Option<&mut dyn ::std::any::Any> {
                match name {
                    #(#arms)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    })
}

fn expand_scrub(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let body = match &input.data {
        Data::Struct(data) => {
            let calls = scrub_fields(&data.fields)?
                .into_iter()
                .map(|(member, _)| quote!(::shapecast::Scrub::scrub(&mut self.#member);));
            quote!(#(#calls)*)
        }
        Data::Enum(data) => {
            let mut arms = Vec::with_capacity(data.variants.len());
            for variant in &data.variants {
                let name = &variant.ident;
                let scrubbed = scrub_fields(&variant.fields)?;
                let bindings = scrubbed.iter().map(|(_, binding)| binding);
                let members = scrubbed.iter().map(|(member, _)| member);
                let calls = scrubbed
                    .iter()
                    .map(|(_, binding)| quote!(::shapecast::Scrub::scrub(#binding);));
                arms.push(quote! {
                    Self::#name { #(#members: #bindings,)* .. } => { #(#calls)* }
                });
            }
            if arms.is_empty() {
                quote!()
            } else {
                quote! {
                    match self {
                        #(#arms)*
                    }
                }
            }
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span(),
                "Scrub cannot be derived for unions",
            ));
        }
    };

    let ident = &input.ident;
    let generics = add_bound(&input.generics, &parse_quote!(::shapecast::Scrub));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::shapecast::Scrub for #ident #ty_generics #where_clause {
            fn scrub(&mut self) {
                #body
            }
        }
    })
}

/// Members to scrub, each with a binding name for pattern matching.
fn scrub_fields(fields: &Fields) -> syn::Result<Vec<(syn::Member, syn::Ident)>> {
    let mut out = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        if FieldAttrs::parse(&field.attrs)?.skip_scrub {
            continue;
        }
        let member = field.ident.clone().map_or_else(
            || syn::Member::Unnamed(syn::Index::from(index)),
            syn::Member::Named,
        );
        let binding = syn::Ident::new(&format!("__field{index}"), field.span());
        out.push((member, binding));
    }
    Ok(out)
}

fn add_bound(generics: &Generics, bound: &syn::TypeParamBound) -> Generics {
    let mut generics = generics.clone();
    for param in &mut generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(bound.clone());
        }
    }
    generics
}

#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    skip_scrub: bool,
}

impl FieldAttrs {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut own = None;
        let mut serde = None;
        let mut skip_scrub = false;

        for attr in attrs {
            if attr.path().is_ident("shapecast") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") {
                        own = Some(meta.value()?.parse::<LitStr>()?.value());
                        Ok(())
                    } else if meta.path.is_ident("skip_scrub") {
                        skip_scrub = true;
                        Ok(())
                    } else {
                        Err(meta.error("unknown shapecast field attribute"))
                    }
                })?;
            } else if attr.path().is_ident("serde") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") {
                        if let Some(name) = deserialize_name(&meta)? {
                            serde = Some(name);
                        }
                        Ok(())
                    } else {
                        skip_value(&meta)
                    }
                })?;
            }
        }

        Ok(Self {
            rename: own.or(serde),
            skip_scrub,
        })
    }
}

#[derive(Default)]
struct ContainerAttrs {
    rename_all: Option<RenameRule>,
}

impl ContainerAttrs {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut own = None;
        let mut serde = None;

        for attr in attrs {
            if attr.path().is_ident("shapecast") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename_all") {
                        let lit = meta.value()?.parse::<LitStr>()?;
                        own = Some(RenameRule::from_lit(&lit)?);
                        Ok(())
                    } else {
                        Err(meta.error("unknown shapecast container attribute"))
                    }
                })?;
            } else if attr.path().is_ident("serde") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename_all") {
                        if let Some(rule) = deserialize_name(&meta)? {
                            serde = Some(RenameRule::parse_rule(&rule, meta.path.span())?);
                        }
                        Ok(())
                    } else {
                        skip_value(&meta)
                    }
                })?;
            }
        }

        Ok(Self {
            rename_all: own.or(serde),
        })
    }
}

/// Reads `key = "x"` or `key(deserialize = "x", ..)`.
fn deserialize_name(meta: &ParseNestedMeta<'_>) -> syn::Result<Option<String>> {
    if meta.input.peek(Token![=]) {
        return Ok(Some(meta.value()?.parse::<LitStr>()?.value()));
    }
    let mut name = None;
    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("deserialize") {
            name = Some(inner.value()?.parse::<LitStr>()?.value());
            Ok(())
        } else {
            skip_value(&inner)
        }
    })?;
    Ok(name)
}

/// Consumes an attribute entry this crate does not care about.
fn skip_value(meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|inner| skip_value(&inner))?;
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    fn from_lit(lit: &LitStr) -> syn::Result<Self> {
        Self::parse_rule(&lit.value(), lit.span())
    }

    fn parse_rule(rule: &str, span: proc_macro2::Span) -> syn::Result<Self> {
        Ok(match rule {
            "lowercase" => Self::Lower,
            "UPPERCASE" => Self::Upper,
            "PascalCase" => Self::Pascal,
            "camelCase" => Self::Camel,
            "snake_case" => Self::Snake,
            "SCREAMING_SNAKE_CASE" => Self::ScreamingSnake,
            "kebab-case" => Self::Kebab,
            "SCREAMING-KEBAB-CASE" => Self::ScreamingKebab,
            other => {
                return Err(syn::Error::new(
                    span,
                    format!("unknown rename rule `{other}`"),
                ))
            }
        })
    }

    /// Renames a snake_case field name.
    fn apply(self, field: &str) -> String {
        match self {
            Self::Lower | Self::Snake => field.to_string(),
            Self::Upper | Self::ScreamingSnake => field.to_ascii_uppercase(),
            Self::Kebab => field.replace('_', "-"),
            Self::ScreamingKebab => field.to_ascii_uppercase().replace('_', "-"),
            Self::Pascal => pascal(field),
            Self::Camel => {
                let pascal = pascal(field);
                let mut chars = pascal.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_ascii_lowercase().to_string() + chars.as_str()
                })
            }
        }
    }
}

fn pascal(field: &str) -> String {
    field
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + chars.as_str()
            })
        })
        .collect()
}
