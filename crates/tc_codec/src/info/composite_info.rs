use alloc::vec::Vec;

use crate::info::MemberInfo;

/// Whether a composite carries a presence byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeLayout {
    /// A nullable object: a presence byte (`1` present, `0` null) precedes
    /// the members.
    Reference,
    /// A plain value: members only, never null.
    Value,
}

/// The member structure of a composite type.
///
/// Members are encoded in the order they are given to [`CompositeInfo::new`].
///
/// # Examples
///
/// ```
/// use tc_codec::info::{CompositeInfo, CompositeLayout, MemberInfo, Model, TypeShape};
///
/// #[derive(Default)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Model for Point {
///     fn shape() -> TypeShape<Self> {
///         let members = [
///             MemberInfo::<Self>::new::<i32>("x", |p| &p.x, |p, v| p.x = v),
///             MemberInfo::<Self>::new::<i32>("y", |p| &p.y, |p, v| p.y = v),
///         ];
///         TypeShape::Composite(
///             CompositeInfo::new(CompositeLayout::Value, members).with_construct(Point::default),
///         )
///     }
/// }
///
/// let bytes = tc_codec::to_bytes(&Point { x: 1, y: -1 }).unwrap();
/// assert_eq!(bytes, [1, 0, 0, 0, 255, 255, 255, 255]);
/// ```
pub struct CompositeInfo<T> {
    pub(crate) layout: CompositeLayout,
    pub(crate) members: Vec<MemberInfo<T>>,
    pub(crate) construct: Option<fn() -> T>,
}

impl<T> CompositeInfo<T> {
    /// Creates a composite without a construction path.
    ///
    /// Building a processor for it fails with
    /// [`CodecError::Construction`](crate::CodecError::Construction) until
    /// [`with_construct`](Self::with_construct) provides one.
    pub fn new(layout: CompositeLayout, members: impl IntoIterator<Item = MemberInfo<T>>) -> Self {
        Self {
            layout,
            members: members.into_iter().collect(),
            construct: None,
        }
    }

    /// Sets the no-argument constructor used before members are decoded.
    pub fn with_construct(mut self, construct: fn() -> T) -> Self {
        self.construct = Some(construct);
        self
    }

    #[inline]
    pub fn layout(&self) -> CompositeLayout {
        self.layout
    }

    /// Returns the members in encoding order.
    #[inline]
    pub fn members(&self) -> &[MemberInfo<T>] {
        &self.members
    }

    #[inline]
    pub fn has_construct(&self) -> bool {
        self.construct.is_some()
    }
}
