// Procedural macros for rusty-validate

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod record;

/// Derive macro for the `Record` field table
///
/// Generates `Record` and `Inspect` implementations listing every field in
/// declaration order together with its metadata.
///
/// # Example
///
/// ```ignore
/// use rusty_validate::Record;
///
/// #[derive(Record)]
/// struct CreateUser {
///     #[validate("nonzero,len[3,32]")]
///     #[tag(json = "user_name")]
///     name: String,
///
///     #[validate("between[18,120]")]
///     age: u8,
///
///     #[validate("struct,verified")]
///     address: Address,
///
///     #[opaque]
///     #[validate("nonzero")]
///     password_hash: Vec<u8>,  // never inspected
/// }
/// ```
///
/// # Field Attributes
///
/// - `#[validate("a,b[1,2]")]` - validator directive, also accepted as `#[validate = "..."]`
/// - `#[tag(key = "value", ...)]` - extra metadata, e.g. alternate names for error paths
/// - `#[opaque]` - the value is never handed to validators
///
/// A directive containing `struct` validates the field as a nested record;
/// its type must implement `Inspect`.
#[proc_macro_derive(Record, attributes(validate, tag, opaque))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::impl_record(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
