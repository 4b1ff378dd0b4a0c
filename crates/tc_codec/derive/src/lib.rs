//! Derive macro for `tc_codec::info::Model`.
//!
//! See [`Model`](derive_model).
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static MODEL_ATTRIBUTE_NAME: &str = "model";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Model Derivation
///
/// `#[derive(Model)]` implements `Model` for a struct (named, tuple or unit).
/// The struct is classified as a composite: its fields are encoded one after
/// another in declaration order, each through the processor of its type.
///
/// Enums and unions are not supported.
///
/// ## Construction
///
/// Decoding creates an instance first and then assigns every member, so the
/// type needs a no-argument construction path:
///
/// ```rust, ignore
/// #[derive(Model, Default)]
/// #[model(default)]
/// struct A { /* ... */ }
///
/// #[derive(Model)]
/// #[model(construct = B::empty)]
/// struct B { /* ... */ }
/// ```
///
/// Without one, requesting the processor fails with
/// `CodecError::Construction`.
///
/// ## Layout
///
/// By default a composite is a nullable reference: a presence byte (`1`
/// present, `0` null) precedes its members. `#[model(value)]` removes the
/// presence byte; the type then cannot be null and is constructed with
/// `Default` unless `construct` is given.
///
/// ```rust, ignore
/// #[derive(Model, Default)]
/// #[model(value)]
/// struct Point { x: f32, y: f32 }
/// ```
///
/// ## Unmanaged
///
/// `#[model(unmanaged)]` implements `Fixed` for a `Copy` struct whose fields
/// are all `Fixed`. The struct is then copied as raw bytes: fields in
/// declaration order, no padding, no presence byte.
///
/// ```rust, ignore
/// #[derive(Model, Clone, Copy)]
/// #[model(unmanaged)]
/// struct Color(u8, u8, u8, u8);
/// ```
///
/// `unmanaged` cannot be combined with other type attributes or with
/// skipped fields.
///
/// ## Skipped fields
///
/// `#[model(skip)]` on a field leaves it out of the encoding. Decoding keeps
/// the value the construction path produced.
///
/// ```rust, ignore
/// #[derive(Model, Default)]
/// #[model(default)]
/// struct Session {
///     id: u64,
///     #[model(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// ## Generics
///
/// Every type parameter receives a `Model` bound (`Fixed` for unmanaged
/// structs).
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ModelDerive::from_input(&ast) {
        Ok(data) => impls::impl_model(&data).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
