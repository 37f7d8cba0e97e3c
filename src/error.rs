//! Error types for attribute structs, command models and document assembly

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised synchronously at the point of violation; nothing is
/// retried or recovered internally.
#[derive(Error, Debug)]
pub enum Error {
    /// Get/set of a field name outside an attribute struct's declared list
    #[error("struct '{name}' accepts no '{field}' value")]
    UndeclaredField { name: &'static str, field: String },

    /// Get/set of a field name outside a transform variant's declared list
    #[error("transform '{name}' accepts no '{field}' value")]
    UndeclaredTransformField { name: &'static str, field: String },

    /// Get/set of a field name outside a path command's declared list
    #[error("path command '{letter}' accepts no '{field}' value")]
    UndeclaredPathField { letter: char, field: String },

    /// `set_unit` called with a name outside the fixed allowed set
    #[error("invalid units: '{0}' not one of px, pt, em, rem or %")]
    InvalidUnit(String),

    /// Direct insertion of a tag the document manages internally
    #[error("tag '{0}' is managed by the document and cannot be added directly")]
    ReservedTag(String),

    /// An element handle that does not belong to this document's tree
    #[error("element is not attached to this document")]
    NotAttached,

    #[error("failed to write XML output: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialized document was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
