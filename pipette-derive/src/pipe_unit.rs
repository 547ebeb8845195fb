//! Implementation of the `#[pipe_unit]` attribute macro.
//!
//! # Generated Code Structure
//!
//! For
//!
//! ```text
//! /// Docs.
//! pub fn scale<T: Mul<Output = T> + Clone>(values: Vec<T>, factor: T) -> Vec<T> { body }
//! ```
//!
//! the macro generates:
//!
//! ```text
//! /// Docs.
//! pub fn scale<T: Mul<Output = T> + Clone>(factor: T)
//!     -> ::pipette::Pipe<impl Fn(Vec<T>) -> Vec<T>>
//! {
//!     fn __pipette_body<T: Mul<Output = T> + Clone>(values: Vec<T>, factor: T) -> Vec<T> { body }
//!     ::pipette::Pipe::new(move |__pipette_input: Vec<T>| {
//!         __pipette_body::<T>(__pipette_input, ::core::clone::Clone::clone(&factor))
//!     })
//! }
//! ```
//!
//! The closure goes through `Pipe::new`, which places no `Fn` bound on it,
//! so an elided lifetime in the input type stays higher-ranked.
//!
//! Parameters bound by a pattern other than a plain identifier are renamed
//! to `__pipette_parameter_{index}` in the factory signature; the original
//! pattern stays on the inner function.

use proc_macro::TokenStream;
use proc_macro2::{Ident, TokenStream as TokenStream2, TokenTree};
use quote::{ToTokens, format_ident, quote};
use syn::spanned::Spanned;
use syn::{FnArg, GenericParam, ItemFn, Pat, PatIdent, PatType, ReturnType, Visibility};

pub fn pipe_unit_impl(attribute: TokenStream, item: TokenStream) -> TokenStream {
    let expanded = syn::parse2::<ItemFn>(item.into())
        .and_then(|function| expand(attribute.into(), function))
        .unwrap_or_else(|error| error.to_compile_error());

    TokenStream::from(expanded)
}

fn expand(attribute: TokenStream2, function: ItemFn) -> syn::Result<TokenStream2> {
    if !attribute.is_empty() {
        return Err(syn::Error::new(
            attribute.span(),
            "#[pipe_unit] does not take arguments",
        ));
    }

    let signature = &function.sig;
    if let Some(asyncness) = &signature.asyncness {
        return Err(syn::Error::new(
            asyncness.span(),
            "#[pipe_unit] cannot be applied to an async fn",
        ));
    }

    let mut arguments = signature.inputs.iter();
    let input = match arguments.next() {
        Some(FnArg::Typed(input)) => input,
        Some(FnArg::Receiver(receiver)) => {
            return Err(syn::Error::new(
                receiver.span(),
                "#[pipe_unit] cannot be applied to a method",
            ));
        }
        None => {
            return Err(syn::Error::new(
                signature.ident.span(),
                "#[pipe_unit] requires an input parameter",
            ));
        }
    };
    reject_impl_trait(input)?;

    let parameters = arguments
        .enumerate()
        .map(|(index, argument)| match argument {
            FnArg::Typed(parameter) => {
                reject_impl_trait(parameter)?;
                Ok((binding(index, &parameter.pat), parameter))
            }
            FnArg::Receiver(receiver) => Err(syn::Error::new(
                receiver.span(),
                "#[pipe_unit] cannot be applied to a method",
            )),
        })
        .collect::<syn::Result<Vec<_>>>()?;

    let factory_parameters = parameters.iter().map(|(binding, parameter)| {
        let parameter_type = &parameter.ty;
        quote! { #binding: #parameter_type }
    });
    let cloned_parameters = parameters.iter().map(|(binding, _)| {
        quote! { ::core::clone::Clone::clone(&#binding) }
    });

    let attributes = &function.attrs;
    let visibility = &function.vis;
    let name = &signature.ident;
    let generics = &signature.generics;
    let where_clause = &generics.where_clause;
    let input_type = &input.ty;
    let output_type = match &signature.output {
        ReturnType::Default => quote! { () },
        ReturnType::Type(_, output_type) => output_type.to_token_stream(),
    };
    let turbofish = turbofish(generics);
    let body_function = body_function(&function);

    Ok(quote! {
        #(#attributes)*
        #visibility fn #name #generics (#(#factory_parameters),*)
            -> ::pipette::Pipe<impl Fn(#input_type) -> #output_type>
            #where_clause
        {
            #body_function
            ::pipette::Pipe::new(move |__pipette_input: #input_type| {
                __pipette_body #turbofish (__pipette_input, #(#cloned_parameters),*)
            })
        }
    })
}

/// The original function, renamed and stripped of attributes and
/// visibility, to be nested inside the factory.
fn body_function(function: &ItemFn) -> ItemFn {
    let mut body_function = function.clone();
    body_function.attrs.clear();
    body_function.vis = Visibility::Inherited;
    body_function.sig.ident = format_ident!("__pipette_body");
    body_function
}

/// Name the factory uses for the parameter at `index` (counted after the
/// input).
fn binding(index: usize, pattern: &Pat) -> Ident {
    match pattern {
        Pat::Ident(PatIdent {
            ident,
            subpat: None,
            ..
        }) => ident.clone(),
        _ => format_ident!("__pipette_parameter_{}", index),
    }
}

/// Explicit type and const arguments for calling the inner function.
fn turbofish(generics: &syn::Generics) -> TokenStream2 {
    let arguments: Vec<_> = generics
        .params
        .iter()
        .filter_map(|parameter| match parameter {
            GenericParam::Type(type_parameter) => Some(&type_parameter.ident),
            GenericParam::Const(const_parameter) => Some(&const_parameter.ident),
            GenericParam::Lifetime(_) => None,
        })
        .collect();

    if arguments.is_empty() {
        TokenStream2::new()
    } else {
        quote! { ::<#(#arguments),*> }
    }
}

fn reject_impl_trait(parameter: &PatType) -> syn::Result<()> {
    if contains_impl_trait(parameter.ty.to_token_stream()) {
        Err(syn::Error::new(
            parameter.ty.span(),
            "#[pipe_unit] does not support `impl Trait` parameters; use a named generic",
        ))
    } else {
        Ok(())
    }
}

fn contains_impl_trait(tokens: TokenStream2) -> bool {
    tokens.into_iter().any(|tree| match tree {
        TokenTree::Ident(identifier) => identifier == "impl",
        TokenTree::Group(group) => contains_impl_trait(group.stream()),
        TokenTree::Punct(_) | TokenTree::Literal(_) => false,
    })
}
