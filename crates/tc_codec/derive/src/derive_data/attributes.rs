use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Path};

use crate::MODEL_ATTRIBUTE_NAME;

/// Type-level `#[model(...)]` options.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `#[model(default)]`: construct with `Default::default`.
    pub default: Option<Span>,
    /// `#[model(construct = path)]`: construct with `path`.
    pub construct: Option<Path>,
    /// `#[model(value)]`: no presence byte.
    pub value: Option<Span>,
    /// `#[model(unmanaged)]`: raw byte copy through `Fixed`.
    pub unmanaged: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(MODEL_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
            }
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta<'_>) -> syn::Result<()> {
        let span = meta.path.get_ident().map(syn::Ident::span);
        if meta.path.is_ident("default") {
            set_flag(&mut self.default, &meta, span)
        } else if meta.path.is_ident("value") {
            set_flag(&mut self.value, &meta, span)
        } else if meta.path.is_ident("unmanaged") {
            set_flag(&mut self.unmanaged, &meta, span)
        } else if meta.path.is_ident("construct") {
            if self.construct.is_some() {
                return Err(meta.error("duplicate `construct` attribute"));
            }
            self.construct = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error(
                "unknown model attribute, expected `default`, `construct`, `value` or `unmanaged`",
            ))
        }
    }
}

/// Field-level `#[model(...)]` options.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    /// `#[model(skip)]`: not encoded.
    pub skip: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(MODEL_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("skip") {
                        let span = meta.path.get_ident().map(syn::Ident::span);
                        set_flag(&mut this.skip, &meta, span)
                    } else {
                        Err(meta.error("unknown model field attribute, expected `skip`"))
                    }
                })?;
            }
        }
        Ok(this)
    }
}

fn set_flag(
    flag: &mut Option<Span>,
    meta: &ParseNestedMeta<'_>,
    span: Option<Span>,
) -> syn::Result<()> {
    if flag.is_some() {
        return Err(meta.error("duplicate model attribute"));
    }
    *flag = Some(span.unwrap_or_else(Span::call_site));
    Ok(())
}
