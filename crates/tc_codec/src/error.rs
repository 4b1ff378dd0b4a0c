use core::fmt;
use core::str::Utf8Error;

use thiserror::Error;

// -----------------------------------------------------------------------------
// ErrorKind

/// Coarse grouping of [`CodecError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A composite type cannot be instantiated for decoding.
    Construction,
    /// The source ran out of bytes.
    Underflow,
    /// The type has no usable wire form.
    UnsupportedShape,
    /// The bytes do not describe a valid value of the expected type.
    InvalidData,
    /// A length does not fit the 32-bit prefix.
    Overflow,
    /// The owning registry is gone.
    Registry,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Construction => f.pad("Construction"),
            Self::Underflow => f.pad("Underflow"),
            Self::UnsupportedShape => f.pad("UnsupportedShape"),
            Self::InvalidData => f.pad("InvalidData"),
            Self::Overflow => f.pad("Overflow"),
            Self::Registry => f.pad("Registry"),
        }
    }
}

// -----------------------------------------------------------------------------
// CodecError

/// Every failure raised while building a processor, encoding or decoding.
///
/// Errors propagate to the top-level caller unchanged. Bytes already written
/// to a [`ByteWriter`](crate::stream::ByteWriter) are left as they are, and a
/// failed decode never yields a partially populated value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CodecError {
    #[error(
        "`{type_name}` has no no-argument construction path, \
         add `#[model(default)]` or `#[model(construct = ...)]`"
    )]
    Construction { type_name: &'static str },

    #[error(
        "unexpected end of input at offset {offset}: needed {needed} bytes, {remaining} remaining"
    )]
    Underflow {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("`{type_name}` cannot be encoded: {reason}")]
    UnsupportedShape {
        type_name: &'static str,
        reason: &'static str,
    },

    #[error("null found where `{type_name}` is not nullable")]
    UnexpectedNull { type_name: &'static str },

    #[error("invalid length prefix {length} at offset {offset}")]
    InvalidLength { offset: usize, length: i32 },

    #[error("invalid UTF-8 text at offset {offset}: {source}")]
    InvalidUtf8 {
        offset: usize,
        #[source]
        source: Utf8Error,
    },

    #[error("invalid `{type_name}` at offset {offset}: {reason}")]
    InvalidValue {
        type_name: &'static str,
        offset: usize,
        reason: &'static str,
    },

    #[error("`{type_name}` declares {declared} items but yields {actual}")]
    ItemCountMismatch {
        type_name: &'static str,
        declared: usize,
        actual: usize,
    },

    #[error("{remaining} trailing bytes after the decoded value")]
    TrailingBytes { remaining: usize },

    #[error("length {len} does not fit the 32-bit length prefix")]
    LengthOverflow { len: usize },

    #[error("the registry owning this processor has been dropped")]
    RegistryDropped,
}

impl CodecError {
    /// Returns the group this error belongs to.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Construction { .. } => ErrorKind::Construction,
            Self::Underflow { .. } => ErrorKind::Underflow,
            Self::UnsupportedShape { .. } => ErrorKind::UnsupportedShape,
            Self::UnexpectedNull { .. }
            | Self::InvalidLength { .. }
            | Self::InvalidUtf8 { .. }
            | Self::InvalidValue { .. }
            | Self::ItemCountMismatch { .. }
            | Self::TrailingBytes { .. } => ErrorKind::InvalidData,
            Self::LengthOverflow { .. } => ErrorKind::Overflow,
            Self::RegistryDropped => ErrorKind::Registry,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{CodecError, ErrorKind};

    #[test]
    fn kinds_group_variants() {
        let underflow = CodecError::Underflow {
            offset: 4,
            needed: 100,
            remaining: 10,
        };
        assert_eq!(underflow.kind(), ErrorKind::Underflow);
        assert_eq!(
            underflow.to_string(),
            "unexpected end of input at offset 4: needed 100 bytes, 10 remaining"
        );

        let mismatch = CodecError::ItemCountMismatch {
            type_name: "Short",
            declared: 3,
            actual: 2,
        };
        assert_eq!(mismatch.kind(), ErrorKind::InvalidData);
        assert_eq!(mismatch.to_string(), "`Short` declares 3 items but yields 2");

        let null = CodecError::UnexpectedNull {
            type_name: "alloc::string::String",
        };
        assert_eq!(null.kind(), ErrorKind::InvalidData);
    }
}
