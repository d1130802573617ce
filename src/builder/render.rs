//! Token rendering for generated resolvers.
//!
//! Everything here is a pure function of definition data; the builder decides
//! where the fragments go.

use std::collections::HashMap;

use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use serde_json::{Number, Value};

use super::{naming::is_valid_service_name, BuilderError};
use crate::{
    argument::{Argument, ServiceArguments},
    container::{Resolved, CONTAINER_SERVICE_NAME},
};

pub trait CodeGen {
    fn generate_rust(&self) -> TokenStream;
}

/// JSON-shaped tokens, meant to be wrapped in `serde_json::json!`.
impl CodeGen for Value {
    fn generate_rust(&self) -> TokenStream {
        match self {
            Value::Null => quote! { null },
            Value::Bool(b) => quote! { #b },
            Value::Number(n) => render_number(n),
            Value::String(s) => {
                let s = Literal::string(s);
                quote! { #s }
            }
            Value::Array(items) => {
                let items = items.iter().map(|item| item.generate_rust());
                quote! { [#(#items),*] }
            }
            Value::Object(entries) => {
                let entries = entries.iter().map(|(key, value)| {
                    let key = Literal::string(key);
                    let value = value.generate_rust();
                    quote! { #key: #value }
                });
                quote! { { #(#entries),* } }
            }
        }
    }
}

fn render_number(n: &Number) -> TokenStream {
    if let Some(u) = n.as_u64() {
        let lit = Literal::u64_unsuffixed(u);
        quote! { #lit }
    } else if let Some(i) = n.as_i64() {
        let lit = Literal::u64_unsuffixed(i.unsigned_abs());
        quote! { -#lit }
    } else {
        let f = n.as_f64().unwrap_or_default();
        let lit = Literal::f64_unsuffixed(f.abs());
        if f.is_sign_negative() {
            quote! { -#lit }
        } else {
            quote! { #lit }
        }
    }
}

/// How a declared service is produced by the generated container.
#[derive(Debug, Clone)]
pub struct ResolverTarget {
    pub method: String,
    pub shared: bool,
}

/// What argument rendering needs to know about the services being generated.
pub struct RenderContext<'a> {
    pub runtime: &'a syn::Path,
    pub targets: &'a HashMap<String, ResolverTarget>,
}

impl RenderContext<'_> {
    pub fn render_argument(&self, service: &str, argument: &Argument) -> Result<TokenStream, BuilderError> {
        let runtime = self.runtime;
        match argument {
            Argument::Dependency(name) => {
                check_reference(argument, name)?;
                if name == CONTAINER_SERVICE_NAME {
                    return Ok(quote! { container.self_reference() });
                }
                Ok(match self.targets.get(name) {
                    Some(target) => {
                        let method = format_ident!("{}", target.method);
                        if target.shared {
                            quote! { container.resolve_shared(#name, Self::#method)? }
                        } else {
                            quote! { Self::#method(container)? }
                        }
                    }
                    None => quote! { container.get(#name)? },
                })
            }
            Argument::Parameter(name) => {
                check_reference(argument, name)?;
                Ok(quote! { container.parameter(#name) })
            }
            Argument::Raw(Resolved::Value(value)) => {
                let value = value.generate_rust();
                Ok(quote! { #runtime::Resolved::Value(#runtime::serde_json::json!(#value)) })
            }
            Argument::Raw(_) => Err(BuilderError::UnrenderableArgument {
                service: service.to_string(),
                argument: argument.to_string(),
            }),
        }
    }

    /// `vec![...]` of the rendered arguments.
    pub fn render_arguments(
        &self,
        service: &str,
        arguments: &ServiceArguments,
    ) -> Result<TokenStream, BuilderError> {
        let rendered = arguments
            .iter()
            .map(|argument| self.render_argument(service, argument))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(quote! { vec![#(#rendered),*] })
    }
}

fn check_reference(argument: &Argument, name: &str) -> Result<(), BuilderError> {
    if is_valid_service_name(name) {
        Ok(())
    } else {
        Err(BuilderError::InvalidReference(argument.to_string()))
    }
}
