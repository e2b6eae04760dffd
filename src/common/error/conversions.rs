//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! and third-party error types to the unified Error type.

use super::types::Error;
use crate::common::binary::BinaryError;

impl From<BinaryError> for Error {
    fn from(err: BinaryError) -> Self {
        match err {
            BinaryError::InsufficientData { .. } => Error::CorruptedFile(err.to_string()),
        }
    }
}

#[cfg(any(feature = "ooxml", feature = "odf", feature = "iwa"))]
impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            other => Error::ZipError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_error_is_corruption() {
        let err: Error = BinaryError::InsufficientData {
            expected: 8,
            available: 3,
        }
        .into();
        assert!(matches!(err, Error::CorruptedFile(_)));
        assert!(err.to_string().contains("expected 8"));
    }
}
