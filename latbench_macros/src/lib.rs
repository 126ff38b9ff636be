use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Index, ItemStruct, Member, parse_macro_input};

extern crate proc_macro;

/// Turns a plain struct into a `Metric`.
///
/// Exactly one field must be marked `#[elapsed]`; it has to be a
/// `std::time::Duration` and becomes the value returned by `Metric::elapsed`.
/// The marker is stripped from the emitted struct. `Metric` must be in scope
/// where the macro is used.
///
/// ```rust, ignore
/// #[metric]
/// pub struct Sample {
///     #[elapsed]
///     pub elapsed: Duration,
///     pub status: u16,
/// }
/// ```
#[proc_macro_attribute]
pub fn metric(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut ast = parse_macro_input!(item as ItemStruct);
    let elapsed = match take_elapsed_field(&mut ast) {
        Ok(member) => member,
        Err(e) => return e.to_compile_error().into(),
    };

    let ident = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();
    let expanded = quote! {
        #[derive(
            serde::Serialize,
            serde::Deserialize,
            std::cmp::PartialOrd,
            std::cmp::PartialEq,
            std::fmt::Debug,
            std::clone::Clone
        )]
        #ast

        impl #impl_generics Metric for #ident #ty_generics #where_clause {
            fn elapsed(&self) -> std::time::Duration {
                self.#elapsed
            }
        }
    };

    TokenStream::from(expanded)
}

/// Finds the single `#[elapsed]` field, removes the marker and returns how to
/// access it (by name, or by position on tuple structs).
fn take_elapsed_field(ast: &mut ItemStruct) -> syn::Result<Member> {
    let mut found: Option<Member> = None;

    for (i, field) in ast.fields.iter_mut().enumerate() {
        let before = field.attrs.len();
        field.attrs.retain(|a| !a.path().is_ident("elapsed"));
        if field.attrs.len() == before {
            continue;
        }
        if found.is_some() {
            return Err(syn::Error::new_spanned(
                &*field,
                "only one field can be marked #[elapsed]",
            ));
        }
        found = Some(match &field.ident {
            Some(name) => Member::Named(name.clone()),
            None => Member::Unnamed(Index {
                index: i as u32,
                span: Span::call_site(),
            }),
        });
    }

    found.ok_or_else(|| {
        syn::Error::new_spanned(
            &ast.ident,
            "a metric needs one field marked #[elapsed]",
        )
    })
}
