use syn::ext::IdentExt;
use syn::{Field, Index, Member, Type};

use crate::derive_data::FieldAttributes;

/// One field of the derived struct.
pub(crate) struct ModelField<'a> {
    /// `self.#member` access.
    pub member: Member,
    /// Name reported by the member descriptor, the index for tuple fields.
    pub name: String,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
}

impl<'a> ModelField<'a> {
    pub fn new(index: usize, field: &'a Field) -> syn::Result<Self> {
        let (member, name) = match &field.ident {
            Some(ident) => (Member::Named(ident.clone()), ident.unraw().to_string()),
            None => (Member::Unnamed(Index::from(index)), index.to_string()),
        };

        Ok(Self {
            member,
            name,
            ty: &field.ty,
            attrs: FieldAttributes::parse_attrs(&field.attrs)?,
        })
    }
}
