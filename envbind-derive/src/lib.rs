//! `#[derive(Record)]` for envbind.
//!
//! Generates `envbind::Record` (one `FieldRef` per tagged field, in
//! declaration order) and `envbind::Field` (as `Slot::Record`).

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{
    Attribute, Data, DeriveInput, Expr, ExprLit, Index, Lit, LitStr, Member, Meta,
    parse_macro_input,
};

const DIVE: &str = ",dive";

#[proc_macro_derive(Record, attributes(env))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span(),
                "Record can only be derived for structs",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span(),
                "Record can only be derived for structs",
            ));
        }
    };

    let mut visits = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        let Some(tag) = field_tag(&field.attrs)? else {
            continue;
        };
        let tag_value = tag.value();
        if tag_value.is_empty() {
            continue;
        }
        if tag_value.contains(',') && tag_value != DIVE {
            return Err(syn::Error::new(
                tag.span(),
                format!("invalid env tag {tag_value:?}: use \"KEY\" or \",dive\", not both"),
            ));
        }

        let (member, name) = match &field.ident {
            Some(ident) => (Member::Named(ident.clone()), ident.unraw().to_string()),
            None => (Member::Unnamed(Index::from(index)), index.to_string()),
        };
        visits.push(quote! {
            visitor.visit(::envbind::FieldRef::new(#name, #tag, &mut self.#member))?;
        });
    }

    // Empty records still need `visitor` to be used.
    let visitor_arg = if visits.is_empty() {
        quote!(_visitor)
    } else {
        quote!(visitor)
    };

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::envbind::Record for #ident #ty_generics #where_clause {
            fn visit_fields(
                &mut self,
                #visitor_arg: &mut dyn ::envbind::Visitor,
            ) -> ::core::result::Result<(), ::envbind::BindError> {
                #(#visits)*
                ::core::result::Result::Ok(())
            }
        }

        impl #impl_generics ::envbind::Field for #ident #ty_generics #where_clause {
            fn slot(&mut self) -> ::envbind::Slot<'_> {
                ::envbind::Slot::Record(self)
            }
        }
    })
}

/// The `#[env(...)]` tag on a field, if any. Accepts `#[env("KEY")]` and
/// `#[env = "KEY"]`.
fn field_tag(attrs: &[Attribute]) -> syn::Result<Option<LitStr>> {
    let mut found = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("env")) {
        if found.is_some() {
            return Err(syn::Error::new(attr.span(), "duplicate env attribute"));
        }
        let tag = match &attr.meta {
            Meta::List(_) => attr.parse_args::<LitStr>()?,
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => s.clone(),
                other => return Err(syn::Error::new(other.span(), "expected a string tag")),
            },
            Meta::Path(path) => {
                return Err(syn::Error::new(
                    path.span(),
                    "expected #[env(\"KEY\")] or #[env(\",dive\")]",
                ));
            }
        };
        found = Some(tag);
    }
    Ok(found)
}
