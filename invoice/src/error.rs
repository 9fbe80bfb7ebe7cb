use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for the invoice core.
#[derive(Debug, Error)]
pub enum Error {
    /// The document is not well-formed XML.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// The document is well-formed but is not a product list.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// The image of a single product could not be copied into the picture directory.
    #[error("could not copy the image of product #{index} ({}): {source}", .path.display())]
    ImageCopy {
        index: usize,
        path: PathBuf,
        source: io::Error,
    },

    /// The XML file could not be written.
    #[error("could not write {}: {source}", .path.display())]
    WriteFailure { path: PathBuf, source: io::Error },

    /// The XML file could not be read.
    #[error("could not read {}: {source}", .path.display())]
    ReadFailure { path: PathBuf, source: io::Error },

    /// Saving requires at least one product.
    #[error("the list must contain at least one product")]
    EmptyList,

    /// The add form contains invalid values, one message per problem.
    #[error("invalid input: {}", .0.join("; "))]
    InvalidInput(Vec<String>),

    /// There is no product at the given position.
    #[error("there is no product #{0}")]
    NoSuchProduct(usize),

    /// The product at the given position has no image attached.
    #[error("product #{0} has no image")]
    NoImage(usize),

    /// The image viewer could not open the file.
    #[error("could not open {}: {source}", .path.display())]
    Preview { path: PathBuf, source: io::Error },

    /// No handler is registered for the request.
    #[error("handler not found: {0}")]
    NotFound(&'static str),

    /// The handler for the request is already running further up the stack.
    #[error("handler already running: {0}")]
    HandlerBusy(&'static str),
}

/// Error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedDocument,
    SchemaMismatch,
    ImageCopy,
    WriteFailure,
    ReadFailure,
    EmptyList,
    InvalidInput,
    NoSuchProduct,
    NoImage,
    Preview,
    NotFound,
    HandlerBusy,
}

impl ErrorKind {
    /// Returns the description of the error kind.
    pub fn as_str(&self) -> &str {
        match *self {
            ErrorKind::MalformedDocument => "malformed document",
            ErrorKind::SchemaMismatch => "schema mismatch",
            ErrorKind::ImageCopy => "image copy failed",
            ErrorKind::WriteFailure => "write failed",
            ErrorKind::ReadFailure => "read failed",
            ErrorKind::EmptyList => "empty list",
            ErrorKind::InvalidInput => "invalid input",
            ErrorKind::NoSuchProduct => "no such product",
            ErrorKind::NoImage => "no image",
            ErrorKind::Preview => "preview failed",
            ErrorKind::NotFound => "handler not found",
            ErrorKind::HandlerBusy => "handler busy",
        }
    }
}

impl Error {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedDocument(_) => ErrorKind::MalformedDocument,
            Error::SchemaMismatch(_) => ErrorKind::SchemaMismatch,
            Error::ImageCopy { .. } => ErrorKind::ImageCopy,
            Error::WriteFailure { .. } => ErrorKind::WriteFailure,
            Error::ReadFailure { .. } => ErrorKind::ReadFailure,
            Error::EmptyList => ErrorKind::EmptyList,
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::NoSuchProduct(_) => ErrorKind::NoSuchProduct,
            Error::NoImage(_) => ErrorKind::NoImage,
            Error::Preview { .. } => ErrorKind::Preview,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::HandlerBusy(_) => ErrorKind::HandlerBusy,
        }
    }

    /// Whether the operation that produced this error still completed.
    ///
    /// Image copy failures are warnings: the save goes on without them.
    pub fn is_warning(&self) -> bool {
        self.kind() == ErrorKind::ImageCopy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant_test() {
        let err = Error::SchemaMismatch("expected <products>".to_owned());
        assert_eq!(ErrorKind::SchemaMismatch, err.kind());
        assert_eq!("schema mismatch", err.kind().as_str());
        assert!(!err.is_warning());
    }

    #[test]
    fn image_copy_is_warning_test() {
        let err = Error::ImageCopy {
            index: 0,
            path: PathBuf::from("/tmp/missing.png"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };

        assert!(err.is_warning());
        assert_eq!(
            "could not copy the image of product #0 (/tmp/missing.png): no such file",
            err.to_string()
        );
    }

    #[test]
    fn invalid_input_joins_messages_test() {
        let err = Error::InvalidInput(vec![
            "name must not be empty".to_owned(),
            "price must not be empty".to_owned(),
        ]);

        assert_eq!(
            "invalid input: name must not be empty; price must not be empty",
            err.to_string()
        );
    }
}
