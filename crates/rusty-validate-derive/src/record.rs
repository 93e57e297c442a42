// File: rusty-validate-derive/src/record.rs
// Purpose: Field table generation and attribute processing for #[derive(Record)]

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Expr, ExprLit, Fields, Index, Lit, LitStr, Member, Meta, Type,
    WherePredicate,
};

const DIRECTIVE_KEY: &str = "validate";
const STRUCT_DIRECTIVE: &str = "struct";

/// Metadata collected from one field's attributes
struct FieldAttrs {
    tags: Vec<(String, String)>,
    opaque: bool,
}

impl FieldAttrs {
    fn directive(&self) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == DIRECTIVE_KEY)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the directive contains the `struct` entry
    fn is_nested(&self) -> bool {
        self.directive()
            .map(|d| top_level_entries(d).iter().any(|e| e.trim() == STRUCT_DIRECTIVE))
            .unwrap_or(false)
    }
}

pub fn impl_record(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "#[derive(Record)] is only supported on structs, not enums",
            ))
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "#[derive(Record)] is only supported on structs, not unions",
            ))
        }
    };

    // Field values are handed out as `&dyn Any`, which needs `'static` types
    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "#[derive(Record)] does not support lifetime parameters; field types must be 'static",
        ));
    }

    let mut rows = Vec::new();
    let mut bounds: Vec<WherePredicate> = Vec::new();

    for (idx, field) in iter_fields(fields).enumerate() {
        let (member, field_name) = match &field.ident {
            Some(ident) => {
                let raw = ident.to_string();
                let display = raw.trim_start_matches("r#").to_string();
                (Member::Named(ident.clone()), display)
            }
            None => (Member::Unnamed(Index::from(idx)), idx.to_string()),
        };

        let attrs = extract_field_attrs(&field.attrs)?;
        let tags = attrs.tags.iter().map(|(k, v)| quote! { (#k, #v) });
        let ty = &field.ty;

        let row = if attrs.opaque {
            quote! {
                ::rusty_validate::Field::opaque(#field_name).with_tags(&[#(#tags),*])
            }
        } else if attrs.is_nested() {
            bounds.push(any_bound(ty));
            bounds.push(syn::parse_quote!(#ty: ::rusty_validate::Inspect));
            quote! {
                ::rusty_validate::Field::new(#field_name, &self.#member)
                    .with_tags(&[#(#tags),*])
                    .nested(&self.#member)
            }
        } else {
            bounds.push(any_bound(ty));
            quote! {
                ::rusty_validate::Field::new(#field_name, &self.#member).with_tags(&[#(#tags),*])
            }
        };

        rows.push(row);
    }

    let mut generics = input.generics.clone();
    if !generics.params.is_empty() {
        generics.make_where_clause().predicates.extend(bounds);
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::rusty_validate::Record for #name #ty_generics #where_clause {
            fn fields(&self) -> ::std::vec::Vec<::rusty_validate::Field<'_>> {
                ::std::vec![#(#rows),*]
            }
        }

        impl #impl_generics ::rusty_validate::Inspect for #name #ty_generics #where_clause {
            fn as_record(&self) -> ::std::option::Option<&dyn ::rusty_validate::Record> {
                ::std::option::Option::Some(self)
            }
        }
    })
}

fn iter_fields(fields: &Fields) -> Box<dyn Iterator<Item = &syn::Field> + '_> {
    match fields {
        Fields::Named(named) => Box::new(named.named.iter()),
        Fields::Unnamed(unnamed) => Box::new(unnamed.unnamed.iter()),
        Fields::Unit => Box::new(std::iter::empty()),
    }
}

fn any_bound(ty: &Type) -> WherePredicate {
    syn::parse_quote!(#ty: ::std::any::Any)
}

/// Parse `#[validate(..)]`, `#[tag(..)]` and `#[opaque]` from a field
fn extract_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut tags: Vec<(String, String)> = Vec::new();
    let mut opaque = false;

    let mut push_tag = |key: String, value: String, span: &dyn quote::ToTokens| {
        if tags.iter().any(|(k, _)| *k == key) {
            return Err(syn::Error::new_spanned(
                span,
                format!("duplicate `{}` metadata on field", key),
            ));
        }
        tags.push((key, value));
        Ok(())
    };

    for attr in attrs {
        if attr.path().is_ident(DIRECTIVE_KEY) {
            let directive = parse_directive_attr(attr)?;
            push_tag(DIRECTIVE_KEY.to_string(), directive, attr)?;
        } else if attr.path().is_ident("tag") {
            attr.parse_nested_meta(|meta| {
                let key = meta
                    .path
                    .get_ident()
                    .map(|ident| ident.to_string())
                    .ok_or_else(|| meta.error("expected a metadata key such as `json`"))?;
                let value: LitStr = meta.value()?.parse()?;
                push_tag(key, value.value(), &meta.path)
            })?;
        } else if attr.path().is_ident("opaque") {
            attr.meta.require_path_only()?;
            opaque = true;
        }
    }

    Ok(FieldAttrs { tags, opaque })
}

/// `#[validate("long,short")]` or `#[validate = "long,short"]`
fn parse_directive_attr(attr: &Attribute) -> syn::Result<String> {
    match &attr.meta {
        Meta::List(_) => Ok(attr.parse_args::<LitStr>()?.value()),
        Meta::NameValue(nv) => match &nv.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(s), ..
            }) => Ok(s.value()),
            other => Err(syn::Error::new_spanned(
                other,
                "expected a string literal directive",
            )),
        },
        Meta::Path(path) => Err(syn::Error::new_spanned(
            path,
            r#"expected a directive, e.g. #[validate("nonzero")]"#,
        )),
    }
}

/// Split a directive on commas outside brackets
fn top_level_entries(directive: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, ch) in directive.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                entries.push(&directive[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    entries.push(&directive[start..]);

    entries
}
