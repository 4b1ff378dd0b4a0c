use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;

use crate::CodecError;
use crate::info::{MemberDescriptor, Model, TypeRef};
use crate::registry::{LazyProcessor, WeakRegistry};
use crate::stream::{ByteReader, ByteWriter};

type Binder<T> = Box<dyn Fn(&WeakRegistry) -> BoundMember<T> + Send + Sync>;
type WriteMember<T> = Box<dyn Fn(&T, &mut ByteWriter) -> Result<(), CodecError> + Send + Sync>;
type ReadMember<T> = Box<dyn Fn(&mut ByteReader<'_>, &mut T) -> Result<(), CodecError> + Send + Sync>;

// -----------------------------------------------------------------------------
// MemberInfo

/// One member of a composite: its name, its type and a getter/setter pair.
///
/// The member type's processor is not requested when the composite is built.
/// It is resolved through the registry the first time the member is encoded
/// or decoded, so a composite may contain itself (through `Box` or `Option`).
pub struct MemberInfo<T> {
    descriptor: MemberDescriptor,
    binder: Binder<T>,
}

impl<T: 'static> MemberInfo<T> {
    /// Creates a member of type `M`.
    ///
    /// `get` borrows the member out of an instance, `set` stores a decoded
    /// value into an instance.
    pub fn new<M: Model>(name: &'static str, get: fn(&T) -> &M, set: fn(&mut T, M)) -> Self {
        Self {
            descriptor: MemberDescriptor::new(name, TypeRef::of::<M>()),
            binder: Box::new(move |registry: &WeakRegistry| {
                let writing = Arc::new(LazyProcessor::<M>::new(registry.clone()));
                let reading = Arc::clone(&writing);
                BoundMember {
                    name,
                    write: Box::new(move |this: &T, writer: &mut ByteWriter| {
                        writing.get()?.serialize(get(this), writer)
                    }),
                    read: Box::new(move |reader: &mut ByteReader<'_>, this: &mut T| {
                        set(this, reading.get()?.deserialize(reader)?);
                        Ok(())
                    }),
                }
            }),
        }
    }
}

impl<T> MemberInfo<T> {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.descriptor.name()
    }

    #[inline]
    pub fn ty(&self) -> TypeRef {
        self.descriptor.ty()
    }

    #[inline]
    pub fn descriptor(&self) -> &MemberDescriptor {
        &self.descriptor
    }

    /// Attaches the accessors to processors resolved through `registry`.
    pub(crate) fn bind(&self, registry: &WeakRegistry) -> BoundMember<T> {
        (self.binder)(registry)
    }
}

impl<T> fmt::Debug for MemberInfo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberInfo")
            .field("name", &self.name())
            .field("ty", &self.ty())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// BoundMember

/// A member attached to a registry, ready to encode and decode.
pub(crate) struct BoundMember<T> {
    /// Only read by decode diagnostics.
    #[cfg_attr(not(all(debug_assertions, feature = "debug")), allow(dead_code))]
    pub(crate) name: &'static str,
    write: WriteMember<T>,
    read: ReadMember<T>,
}

impl<T> BoundMember<T> {
    #[inline]
    pub(crate) fn write(&self, this: &T, writer: &mut ByteWriter) -> Result<(), CodecError> {
        (self.write)(this, writer)
    }

    #[inline]
    pub(crate) fn read(&self, reader: &mut ByteReader<'_>, this: &mut T) -> Result<(), CodecError> {
        (self.read)(reader, this)
    }
}
