//! Parsed form of a `#[derive(Model)]` input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod model_field;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use attributes::{FieldAttributes, TypeAttributes};
pub(crate) use model_field::ModelField;

use syn::{Data, DeriveInput, Generics, Ident};

/// A struct accepted by `#[derive(Model)]`.
pub(crate) struct ModelDerive<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub attrs: TypeAttributes,
    /// Every field, skipped ones included, in declaration order.
    pub fields: Vec<ModelField<'a>>,
}

impl<'a> ModelDerive<'a> {
    pub fn from_input(ast: &'a DeriveInput) -> syn::Result<Self> {
        let fields = match &ast.data {
            Data::Struct(data) => &data.fields,
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span,
                    "`#[derive(Model)]` only supports structs, enums cannot be encoded",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span,
                    "`#[derive(Model)]` only supports structs, unions cannot be encoded",
                ));
            }
        };

        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;
        let fields = fields
            .iter()
            .enumerate()
            .map(|(index, field)| ModelField::new(index, field))
            .collect::<syn::Result<Vec<_>>>()?;

        let this = Self {
            ident: &ast.ident,
            generics: &ast.generics,
            attrs,
            fields,
        };
        this.validate()?;
        Ok(this)
    }

    /// Fields taking part in the encoding.
    pub fn members(&self) -> impl Iterator<Item = &ModelField<'a>> {
        self.fields.iter().filter(|field| field.attrs.skip.is_none())
    }

    fn validate(&self) -> syn::Result<()> {
        let attrs = &self.attrs;
        let Some(unmanaged) = attrs.unmanaged else {
            return Ok(());
        };

        if attrs.value.is_some() || attrs.default.is_some() || attrs.construct.is_some() {
            return Err(syn::Error::new(
                unmanaged,
                "`unmanaged` cannot be combined with `value`, `default` or `construct`",
            ));
        }

        if let Some(skip) = self.fields.iter().find_map(|field| field.attrs.skip) {
            return Err(syn::Error::new(
                skip,
                "fields of an `unmanaged` struct cannot be skipped",
            ));
        }

        Ok(())
    }
}
