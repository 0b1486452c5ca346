//! Lowering of natural member and call syntax

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{Expr, Member, parse_macro_input};

/// Method name that maps onto construction
const CONSTRUCT: &str = "new";

pub fn natural_impl(input: TokenStream) -> TokenStream {
    let expr = parse_macro_input!(input as Expr);

    match lower(&expr) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn lower(expr: &Expr) -> syn::Result<TokenStream2> {
    match expr {
        Expr::Path(_) => Ok(quote! { #expr }),
        Expr::Paren(paren) => lower(&paren.expr),
        Expr::Group(group) => lower(&group.expr),
        Expr::Field(field) => {
            let base = lower(&field.base)?;
            let name = member_name(&field.member);
            Ok(quote! { #base.field(#name) })
        }
        Expr::Index(index) => {
            let base = lower(&index.expr)?;
            let key = &index.index;
            Ok(quote! { #base.field(&::std::string::ToString::to_string(&(#key))) })
        }
        Expr::MethodCall(call) => {
            if let Some(turbofish) = &call.turbofish {
                return Err(syn::Error::new_spanned(
                    turbofish,
                    "natural! members cannot take generic arguments",
                ));
            }
            let base = lower(&call.receiver)?;
            let args = lower_args(&call.args);
            if call.method == CONSTRUCT {
                Ok(quote! { #base.construct(&[#args])? })
            } else {
                let name = call.method.to_string();
                let name = name.trim_start_matches("r#");
                Ok(quote! { #base.field(#name).invoke(&[#args])? })
            }
        }
        Expr::Call(call) => {
            let callee = lower(&call.func)?;
            let args = lower_args(&call.args);
            Ok(quote! { #callee.invoke(&[#args])? })
        }
        other => Err(syn::Error::new_spanned(
            other,
            "natural! supports member reads, indexing, calls and `.new(..)` only",
        )),
    }
}

fn member_name(member: &Member) -> String {
    match member {
        Member::Named(ident) => ident.to_string().trim_start_matches("r#").to_string(),
        Member::Unnamed(index) => index.index.to_string(),
    }
}

fn lower_args(args: &Punctuated<Expr, Comma>) -> TokenStream2 {
    let args = args.iter();
    quote! { #(::safe_traverse::Value::from(#args)),* }
}
