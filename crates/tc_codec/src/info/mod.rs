//! Static shape information that drives processor construction.
//!
//! ## Menu
//!
//! - [`Model`]: the trait every encodable type implements, returning its [`TypeShape`].
//!
//! - [`TypeShape`]: the classification of one concrete type, one of:
//!     - [`UnmanagedInfo`]: fixed-width, reference-free values (raw byte copy).
//!     - [`TextInfo`]: text-like values (tri-state length prefix).
//!     - [`SequenceInfo`]: arrays, growable lists and collection interfaces.
//!     - [`CompositeInfo`]: structs encoded member by member.
//!     - [`IndirectInfo`]: `Option<T>` and `Box<T>`, reusing the inner type's processor.
//!
//! - [`MemberInfo`]: name, type and accessors of one composite member.
//!
//! - [`ShapeKind`]: the kind of a classification, without payload.
//!
//! - [`TypeDescriptor`]: the published, type-erased projection of a [`TypeShape`].
//!     - [`TypeRef`]: a `TypeId` paired with the type's name.
//!     - [`MemberDescriptor`]: name and type of one composite member.

// -----------------------------------------------------------------------------
// Modules

mod composite_info;
mod descriptor;
mod member_info;
mod model;
mod type_shape;

// -----------------------------------------------------------------------------
// Exports

pub use composite_info::{CompositeInfo, CompositeLayout};
pub use descriptor::{MemberDescriptor, TypeDescriptor, TypeRef};
pub use member_info::MemberInfo;
pub use model::{Model, ShapeKind};
pub use type_shape::{IndirectInfo, SequenceInfo, TextInfo, TypeShape, UnmanagedInfo};

pub(crate) use member_info::BoundMember;
