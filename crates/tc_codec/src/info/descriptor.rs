use alloc::boxed::Box;
use core::any::{TypeId, type_name};
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::info::{CompositeLayout, ShapeKind};

// -----------------------------------------------------------------------------
// TypeRef

/// A [`TypeId`] together with the type's name.
///
/// Equality and hashing only consider the [`TypeId`].
#[derive(Clone, Copy)]
pub struct TypeRef {
    type_id: TypeId,
    type_name: &'static str,
}

impl TypeRef {
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the name reported by [`core::any::type_name`].
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeRef {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.type_name)
    }
}

// -----------------------------------------------------------------------------
// MemberDescriptor

/// The name and type of one composite member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    name: &'static str,
    ty: TypeRef,
}

impl MemberDescriptor {
    #[inline]
    pub const fn new(name: &'static str, ty: TypeRef) -> Self {
        Self { name, ty }
    }

    /// Returns the member name, `"0"`, `"1"`... for tuple structs.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn ty(&self) -> TypeRef {
        self.ty
    }
}

// -----------------------------------------------------------------------------
// TypeDescriptor

/// The classification of one concrete type, as published by the registry.
///
/// A descriptor is derived once per type and never changes afterwards.
///
/// # Examples
///
/// ```
/// use tc_codec::info::ShapeKind;
/// use tc_codec::registry::ProcessorRegistry;
///
/// let registry = ProcessorRegistry::new();
/// let descriptor = registry.descriptor::<Vec<u16>>().unwrap();
///
/// assert_eq!(descriptor.kind(), ShapeKind::List);
/// assert!(descriptor.element().unwrap().is::<u16>());
/// assert!(!descriptor.is_nullable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    ty: TypeRef,
    kind: ShapeKind,
    nullable: bool,
    size: Option<usize>,
    element: Option<TypeRef>,
    layout: Option<CompositeLayout>,
    members: Box<[MemberDescriptor]>,
}

impl TypeDescriptor {
    pub(crate) fn new(ty: TypeRef, kind: ShapeKind) -> Self {
        Self {
            ty,
            kind,
            nullable: false,
            size: None,
            element: None,
            layout: None,
            members: Box::new([]),
        }
    }

    pub(crate) fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub(crate) fn with_element(mut self, element: TypeRef) -> Self {
        self.element = Some(element);
        self
    }

    pub(crate) fn with_members(
        mut self,
        layout: CompositeLayout,
        members: impl IntoIterator<Item = MemberDescriptor>,
    ) -> Self {
        self.layout = Some(layout);
        self.members = members.into_iter().collect();
        self
    }

    pub(crate) fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Reuses this classification for a wrapper type.
    pub(crate) fn wrapped_as(&self, ty: TypeRef) -> Self {
        Self { ty, ..self.clone() }
    }

    #[inline]
    pub const fn ty(&self) -> TypeRef {
        self.ty
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty.id()
    }

    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.ty.name()
    }

    #[inline]
    pub const fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Returns `true` if a value of this type may be null (`Option<T>`).
    #[inline]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Returns the encoded size of an [`Unmanaged`](ShapeKind::Unmanaged) type.
    #[inline]
    pub const fn size(&self) -> Option<usize> {
        self.size
    }

    /// Returns the element type of an array, list or collection.
    #[inline]
    pub const fn element(&self) -> Option<TypeRef> {
        self.element
    }

    /// Returns the layout of a [`Composite`](ShapeKind::Composite) type.
    #[inline]
    pub const fn layout(&self) -> Option<CompositeLayout> {
        self.layout
    }

    /// Returns the members of a composite type in encoding order.
    #[inline]
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// Returns the member named `name`, if present.
    pub fn member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|member| member.name == name)
    }
}
