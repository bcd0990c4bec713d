//! `FromResponse` derive macro implementation.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, Field, Fields, Index, Member, Type, parse2};

/// Expand the `#[derive(FromResponse)]` macro.
pub fn expand_from_response_derive(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        syn::Data::Struct(data) => &data.fields,
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "FromResponse derive only supports structs",
            ));
        }
    };

    if matches!(fields, Fields::Unit) {
        return Err(syn::Error::new_spanned(
            &input,
            "FromResponse derive needs a field to store the response",
        ));
    }

    let fields: Vec<&Field> = fields.iter().collect();
    let response_index = select_response_field(&input, &fields)?;
    let response = format_ident!("response");

    let initializers = fields.iter().enumerate().map(|(index, field)| {
        let member = member(index, field);
        if index == response_index {
            quote! { #member: #response }
        } else {
            quote! { #member: ::core::default::Default::default() }
        }
    });

    Ok(quote! {
        impl #impl_generics ::triage::FromResponse for #name #ty_generics #where_clause {
            fn from_response(#response: ::std::sync::Arc<::triage::Response>) -> Self {
                Self {
                    #(#initializers,)*
                }
            }
        }
    })
}

/// Pick the field that receives the response.
fn select_response_field(input: &DeriveInput, fields: &[&Field]) -> syn::Result<usize> {
    let marked: Vec<usize> = fields
        .iter()
        .enumerate()
        .filter(|(_, field)| has_response_attr(field))
        .map(|(index, _)| index)
        .collect();

    match marked.as_slice() {
        [index] => return Ok(*index),
        [] => {}
        [_, second, ..] => {
            return Err(syn::Error::new_spanned(
                fields.get(*second).copied(),
                "only one field can be marked #[response]",
            ));
        }
    }

    if fields.len() == 1 {
        return Ok(0);
    }

    let arcs: Vec<usize> = fields
        .iter()
        .enumerate()
        .filter(|(_, field)| is_arc_type(&field.ty))
        .map(|(index, _)| index)
        .collect();

    match arcs.as_slice() {
        [index] => Ok(*index),
        _ => Err(syn::Error::new_spanned(
            input,
            "cannot tell which field holds the response, mark it with #[response]",
        )),
    }
}

/// Named or positional member for a field.
fn member(index: usize, field: &Field) -> Member {
    match &field.ident {
        Some(ident) => Member::Named(ident.clone()),
        None => Member::Unnamed(Index::from(index)),
    }
}

/// Check for a bare `#[response]` attribute.
fn has_response_attr(field: &Field) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident("response"))
}

/// Check if a type is `Arc<T>`.
fn is_arc_type(ty: &Type) -> bool {
    matches!(ty, Type::Path(type_path)
        if type_path.path.segments.last()
            .is_some_and(|seg| seg.ident == "Arc"))
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use insta::assert_snapshot;

    use super::*;

    fn expand(input: TokenStream) -> String {
        expand_from_response_derive(input)
            .expect("expand")
            .to_string()
            .split_whitespace()
            .collect()
    }

    fn error(input: TokenStream) -> String {
        let_assert!(Err(err) = expand_from_response_derive(input));
        err.to_string()
    }

    #[test]
    fn single_named_field() {
        let output = expand(quote! {
            struct CsvHandler {
                response: Arc<Response>,
            }
        });
        check!(output.contains("impl::triage::FromResponseforCsvHandler"));
        check!(output.contains("Self{response:response,}"));
    }

    #[test]
    fn tuple_struct() {
        let output = expand(quote! {
            struct CsvHandler(Arc<Response>);
        });
        check!(output.contains("Self{0:response,}"));
    }

    #[test]
    fn marked_field_and_defaults() {
        let output = expand(quote! {
            struct JsonHandler<E> {
                seen: Vec<String>,
                #[response]
                page: Arc<Response>,
                _error: PhantomData<E>,
            }
        });
        check!(output.contains("impl<E>::triage::FromResponseforJsonHandler<E>"));
        check!(output.contains("seen:::core::default::Default::default()"));
        check!(output.contains("page:response"));
        check!(output.contains("_error:::core::default::Default::default()"));
    }

    #[test]
    fn single_arc_field_is_picked() {
        let output = expand(quote! {
            struct FormHandler {
                cache: Option<String>,
                response: std::sync::Arc<Response>,
            }
        });
        check!(output.contains("response:response"));
        check!(output.contains("cache:::core::default::Default::default()"));
    }

    #[test]
    fn rejects_enums_and_unit_structs() {
        assert_snapshot!(
            error(quote! { enum Handler { A } }),
            @"FromResponse derive only supports structs"
        );
        assert_snapshot!(
            error(quote! { struct Handler; }),
            @"FromResponse derive needs a field to store the response"
        );
    }

    #[test]
    fn rejects_ambiguous_fields() {
        assert_snapshot!(
            error(quote! {
                struct Handler {
                    a: Arc<Response>,
                    b: Arc<Response>,
                }
            }),
            @"cannot tell which field holds the response, mark it with #[response]"
        );
        assert_snapshot!(
            error(quote! {
                struct Handler {
                    #[response]
                    a: Arc<Response>,
                    #[response]
                    b: Arc<Response>,
                }
            }),
            @"only one field can be marked #[response]"
        );
    }
}
