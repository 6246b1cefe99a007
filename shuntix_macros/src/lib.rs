use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, FnArg, Ident, ItemFn, PatType, Type};

fn formatted_arity_error_msg(fn_name: &str, arity: usize) -> String {
    format!("Expected {} arguments for {}, but got {{}}", arity, fn_name)
}

/// Turns `fn name(a: f64, b: f64) -> Result<f64, String>` into
/// `fn name() -> shuntix_rs::Function` whose arity is the parameter count.
///
/// `#[shuntix_fn(nondeterministic)]` marks the function as unsafe to fold.
#[proc_macro_attribute]
pub fn shuntix_fn(attr: TokenStream, item: TokenStream) -> TokenStream {
    let deterministic = if attr.is_empty() {
        true
    } else {
        let flag = parse_macro_input!(attr as Ident);
        if flag != "nondeterministic" {
            return syn::Error::new(flag.span(), "expected `nondeterministic`")
                .to_compile_error()
                .into();
        }
        false
    };

    let input = parse_macro_input!(item as ItemFn);
    let attrs = &input.attrs;
    let vis = &input.vis;
    let fn_name = &input.sig.ident;
    let fn_args = &input.sig.inputs;
    let fn_body = &input.block;
    let fn_output = &input.sig.output;

    let mut arg_extractions = Vec::new();

    for (i, arg) in fn_args.iter().enumerate() {
        let FnArg::Typed(PatType { pat, ty, .. }) = arg else {
            return syn::Error::new_spanned(arg, "methods are not supported")
                .to_compile_error()
                .into();
        };
        let arg_name = match **pat {
            syn::Pat::Ident(ref ident) => &ident.ident,
            _ => {
                return syn::Error::new_spanned(pat, "unsupported pattern")
                    .to_compile_error()
                    .into()
            }
        };

        let extract_code = match **ty {
            Type::Path(ref type_path) => {
                let type_ident = type_path.path.segments.last().map(|s| s.ident.to_string());
                match type_ident.as_deref() {
                    Some("f64") => quote! {
                        let #arg_name: f64 = args[#i];
                    },
                    Some("i64") => quote! {
                        let #arg_name: i64 = args[#i] as i64;
                    },
                    Some("bool") => quote! {
                        let #arg_name: bool = args[#i] != 0.0;
                    },
                    _ => {
                        return syn::Error::new_spanned(ty, "expected f64, i64 or bool")
                            .to_compile_error()
                            .into()
                    }
                }
            }
            _ => {
                return syn::Error::new_spanned(ty, "unsupported argument type")
                    .to_compile_error()
                    .into()
            }
        };

        arg_extractions.push(extract_code);
    }

    let args_len = arg_extractions.len();
    let name = fn_name.to_string();
    let err_msg = formatted_arity_error_msg(&name, args_len);
    let expanded = quote! {
        #(#attrs)*
        #vis fn #fn_name() -> ::shuntix_rs::Function {
            ::shuntix_rs::Function::with_determinism(
                #name,
                #args_len,
                #deterministic,
                |args: &[f64]| #fn_output {
                    if args.len() != #args_len {
                        return Err(format!(#err_msg, args.len()));
                    }

                    #(#arg_extractions)*

                    #fn_body
                },
            )
        }
    };

    TokenStream::from(expanded)
}
