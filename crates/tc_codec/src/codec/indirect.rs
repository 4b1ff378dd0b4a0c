use alloc::boxed::Box;
use core::any::type_name;

use crate::CodecError;
use crate::codec::Built;
use crate::info::{Model, TypeRef};
use crate::registry::{Processor, ProcessorRegistry};

/// `None` is the null form of `I`, `Some` is encoded as `I`.
///
/// The result has no null form of its own, so `Option<Option<I>>` is
/// rejected rather than made ambiguous.
pub(crate) fn build_option<I: Model>(
    registry: &ProcessorRegistry,
) -> Result<Built<Option<I>>, CodecError> {
    let (descriptor, inner) = registry.resolve::<I>()?;
    let Some(write_null) = inner.null_writer() else {
        return Err(CodecError::UnsupportedShape {
            type_name: type_name::<Option<I>>(),
            reason: "the wrapped type has no null wire form",
        });
    };

    let reading = inner.clone();
    let processor = Processor::from_parts(
        type_name::<Option<I>>(),
        move |value: &Option<I>, writer| match value {
            Some(value) => inner.serialize(value, writer),
            None => {
                write_null(writer);
                Ok(())
            }
        },
        move |reader| reading.deserialize_nullable(reader).map(Some),
        None,
    );

    Ok(Built {
        descriptor: descriptor
            .wrapped_as(TypeRef::of::<Option<I>>())
            .with_nullable(true),
        processor,
    })
}

/// Encoded exactly like `I`, including its null form.
pub(crate) fn build_box<I: Model>(registry: &ProcessorRegistry) -> Result<Built<Box<I>>, CodecError> {
    let (descriptor, inner) = registry.resolve::<I>()?;
    let write_null = inner.null_writer();

    let reading = inner.clone();
    let processor = Processor::from_parts(
        type_name::<Box<I>>(),
        move |value: &Box<I>, writer| inner.serialize(value, writer),
        move |reader| Ok(reading.deserialize_nullable(reader)?.map(Box::new)),
        write_null,
    );

    Ok(Built {
        descriptor: descriptor.wrapped_as(TypeRef::of::<Box<I>>()),
        processor,
    })
}
