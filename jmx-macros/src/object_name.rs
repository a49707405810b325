//! `object_name!` implementation
//!
//! Input:
//! ```ignore
//! object_name!("d:type=Foo,*")
//! ```
//!
//! Generated output:
//! ```ignore
//! match ::jmx_core::ObjectName::parse("d:type=Foo,*") {
//!     Ok(name) => name,
//!     Err(_) => unreachable!(...),
//! }
//! ```

use proc_macro2::TokenStream;
use quote::quote;
use syn::LitStr;

/// Validate the literal now and emit the runtime constructor
///
/// Errors come back as `compile_error!` tokens.
pub fn expand(input: TokenStream) -> TokenStream {
    let literal = match syn::parse2::<LitStr>(input) {
        Ok(literal) => literal,
        Err(e) => return e.to_compile_error(),
    };

    if let Err(e) = jmx_core::ObjectName::parse(&literal.value()) {
        return syn::Error::new(literal.span(), format!("invalid object name: {}", e))
            .to_compile_error();
    }

    quote! {
        match ::jmx_core::ObjectName::parse(#literal) {
            ::core::result::Result::Ok(name) => name,
            ::core::result::Result::Err(_) => {
                ::core::unreachable!("object name was validated at compile time")
            }
        }
    }
}
